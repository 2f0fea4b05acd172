use std::fmt;

/// The six sticker colors. The discriminant is the number the scramble rules compute with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Red = 0,
    Yellow = 1,
    Blue = 2,
    Orange = 3,
    Green = 4,
    White = 5,
}

impl Color {
    pub const ALL: [Color; 6] = [
        Color::Red,
        Color::Yellow,
        Color::Blue,
        Color::Orange,
        Color::Green,
        Color::White,
    ];

    #[must_use]
    pub fn value(self) -> usize {
        self as usize
    }

    /// Red, yellow and blue
    #[must_use]
    pub fn is_primary(self) -> bool {
        matches!(self, Color::Red | Color::Yellow | Color::Blue)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
            Color::Orange => "orange",
            Color::Green => "green",
            Color::White => "white",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn values_are_indices() {
        for (i, color) in Color::ALL.into_iter().enumerate() {
            assert_eq!(color.value(), i);
        }

        assert_eq!(Color::ALL.iter().filter(|c| c.is_primary()).count(), 3);
    }
}
