use std::fmt;

/// Number of movable cubelets. The core at `(1, 1, 1)` never moves and has no slot.
pub const SLOT_COUNT: usize = 26;

const CORE_RAW_INDEX: usize = 13;

/// One of the three grid axes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// A grid position `(x, y, z)` with every coordinate in `0..3`, excluding the core.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot {
    coords: [u8; 3],
}

impl Slot {
    /// Create a slot from its coordinates.
    ///
    /// Returns `None` if a coordinate is out of range or the position is the core.
    #[must_use]
    pub fn new(x: u8, y: u8, z: u8) -> Option<Slot> {
        if x > 2 || y > 2 || z > 2 || (x, y, z) == (1, 1, 1) {
            return None;
        }

        Some(Slot { coords: [x, y, z] })
    }

    /// Get the slot stored at the given index of a state array
    ///
    /// # Panics
    ///
    /// Panics if `index >= SLOT_COUNT`
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_index(index: usize) -> Slot {
        assert!(index < SLOT_COUNT, "slot index {index} out of range");

        let raw = if index >= CORE_RAW_INDEX {
            index + 1
        } else {
            index
        };

        Slot {
            coords: [(raw / 9) as u8, (raw / 3 % 3) as u8, (raw % 3) as u8],
        }
    }

    /// The position of this slot in a state array
    #[must_use]
    pub fn index(self) -> usize {
        let [x, y, z] = self.coords.map(usize::from);
        let raw = x * 9 + y * 3 + z;

        if raw > CORE_RAW_INDEX { raw - 1 } else { raw }
    }

    /// Iterate over every slot in state-array order
    pub fn all() -> impl Iterator<Item = Slot> {
        (0..SLOT_COUNT).map(Slot::from_index)
    }

    #[must_use]
    pub fn coord(self, axis: Axis) -> u8 {
        self.coords[axis.index()]
    }

    /// Whether exactly two coordinates sit on the middle layer. Face centers only ever spin in place.
    #[must_use]
    pub fn is_face_center(self) -> bool {
        self.coords.iter().filter(|&&c| c == 1).count() == 2
    }

    /// The slot as a vector relative to the core, with every component in `-1..=1`
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn centered(self) -> [i8; 3] {
        self.coords.map(|c| c as i8 - 1)
    }

    /// Inverse of `centered`. Returns `None` for the zero vector or anything off the grid.
    #[must_use]
    pub fn from_centered(v: [i8; 3]) -> Option<Slot> {
        if v.iter().any(|c| !(-1..=1).contains(c)) {
            return None;
        }

        #[allow(clippy::cast_sign_loss)]
        let [x, y, z] = v.map(|c| (c + 1) as u8);

        Slot::new(x, y, z)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.coords;
        write!(f, "({x}, {y}, {z})")
    }
}

#[cfg(test)]
mod tests {
    use super::{SLOT_COUNT, Slot};

    #[test]
    fn indices_round_trip() {
        for i in 0..SLOT_COUNT {
            assert_eq!(Slot::from_index(i).index(), i);
        }

        assert!(Slot::all().all(|slot| slot != Slot { coords: [1, 1, 1] }));
        assert_eq!(Slot::from_index(12), Slot::new(1, 1, 0).unwrap());
        assert_eq!(Slot::from_index(13), Slot::new(1, 1, 2).unwrap());
    }

    #[test]
    fn core_is_not_a_slot() {
        assert_eq!(Slot::new(1, 1, 1), None);
        assert_eq!(Slot::new(3, 0, 0), None);
        assert_eq!(Slot::from_centered([0, 0, 0]), None);
    }

    #[test]
    fn six_face_centers() {
        let centers = Slot::all().filter(|slot| slot.is_face_center()).count();
        assert_eq!(centers, 6);

        assert!(Slot::new(1, 1, 0).unwrap().is_face_center());
        assert!(Slot::new(0, 1, 1).unwrap().is_face_center());
        assert!(!Slot::new(0, 1, 0).unwrap().is_face_center());
        assert!(!Slot::new(0, 0, 0).unwrap().is_face_center());
    }

    #[test]
    fn centered_round_trip() {
        for slot in Slot::all() {
            assert_eq!(Slot::from_centered(slot.centered()), Some(slot));
        }
    }
}
