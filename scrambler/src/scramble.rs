use std::fmt;

use cube_core::{Move, format_moves};
use itertools::Itertools;
use log::{debug, info};

use crate::{colors::Color, minimize::minimize, serial::SerialNumber};

/// A scramble whose solution minimizes to fewer moves than this is too easy and gets rerolled
pub const MIN_SOLUTION_LEN: usize = 8;

/// Total number of color permutations tried before settling for a short solution
pub const MAX_ATTEMPTS: usize = 10;

/// Each serial character picks one of these rows, each row contributes two moves to the solution
pub const SOLUTION_TABLE: [[Move; 2]; 12] = [
    [Move::L_PRIME, Move::F_PRIME],
    [Move::D_PRIME, Move::U_PRIME],
    [Move::U, Move::B_PRIME],
    [Move::F, Move::B],
    [Move::L, Move::D],
    [Move::R_PRIME, Move::U],
    [Move::U_PRIME, Move::F],
    [Move::B_PRIME, Move::L_PRIME],
    [Move::B, Move::R],
    [Move::D, Move::L],
    [Move::R, Move::D_PRIME],
    [Move::F_PRIME, Move::R_PRIME],
];

/// How the rows picked by the serial number are laid out into a move list
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// Both moves of each row, row after row
    Paired,
    /// The first move of every row, then the second move of every row
    TwoPasses,
}

/// The rewrite applied to the laid out move list
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transform {
    InvertFirstFive,
    Reverse,
    Keep,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Layout::Paired => "row by row",
            Layout::TwoPasses => "first moves then second moves",
        })
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Transform::InvertFirstFive => "invert the first five moves",
            Transform::Reverse => "reverse the move order",
            Transform::Keep => "no change",
        })
    }
}

/// Everything derived from one permutation of the face colors
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrambleSpec {
    colors: [Color; 6],
    column_shifts: [usize; 3],
    ignored_serial_index: usize,
    reference_color: Color,
}

impl ScrambleSpec {
    #[must_use]
    pub fn from_colors(colors: [Color; 6]) -> ScrambleSpec {
        ScrambleSpec {
            colors,
            column_shifts: [0, 1, 2].map(|i| colors[i].value() + 1),
            ignored_serial_index: colors[3].value(),
            reference_color: colors[4],
        }
    }

    pub fn random(rng: &mut fastrand::Rng) -> ScrambleSpec {
        let mut colors = Color::ALL;
        rng.shuffle(&mut colors);
        ScrambleSpec::from_colors(colors)
    }

    #[must_use]
    pub fn colors(&self) -> [Color; 6] {
        self.colors
    }

    #[must_use]
    pub fn column_shifts(&self) -> [usize; 3] {
        self.column_shifts
    }

    #[must_use]
    pub fn ignored_serial_index(&self) -> usize {
        self.ignored_serial_index
    }

    #[must_use]
    pub fn reference_color(&self) -> Color {
        self.reference_color
    }

    #[must_use]
    pub fn layout(&self) -> Layout {
        if self.reference_color.is_primary() {
            Layout::Paired
        } else {
            Layout::TwoPasses
        }
    }

    #[must_use]
    pub fn transform(&self) -> Transform {
        match self.reference_color {
            Color::Red | Color::Orange => Transform::InvertFirstFive,
            Color::Yellow | Color::White => Transform::Reverse,
            Color::Blue | Color::Green => Transform::Keep,
        }
    }

    /// The rows of `SOLUTION_TABLE` picked by the serial number
    #[must_use]
    pub fn rows(&self, serial: &SerialNumber) -> Vec<usize> {
        serial
            .values_without(self.ignored_serial_index)
            .into_iter()
            .map(|n| (n / 3 + self.column_shifts[n % 3]) % SOLUTION_TABLE.len())
            .collect()
    }

    /// The move sequence that solves the cube, before minimizing
    #[must_use]
    pub fn solution(&self, serial: &SerialNumber) -> Vec<Move> {
        let rows = self.rows(serial).into_iter().map(|row| SOLUTION_TABLE[row]);

        let mut moves = match self.layout() {
            Layout::Paired => rows.flatten().collect::<Vec<_>>(),
            Layout::TwoPasses => {
                let rows = rows.collect::<Vec<_>>();
                rows.iter()
                    .map(|row| row[0])
                    .chain(rows.iter().map(|row| row[1]))
                    .collect()
            }
        };

        match self.transform() {
            Transform::InvertFirstFive => {
                for mv in moves.iter_mut().take(5) {
                    *mv = mv.reverse();
                }
            }
            Transform::Reverse => moves.reverse(),
            Transform::Keep => {}
        }

        moves
    }
}

/// One roll of the colors and the solution it produced
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attempt {
    spec: ScrambleSpec,
    solution: Vec<Move>,
    minimized: Vec<Move>,
}

impl Attempt {
    #[must_use]
    pub fn new(spec: ScrambleSpec, serial: &SerialNumber) -> Attempt {
        let solution = spec.solution(serial);
        let minimized = minimize(&solution);

        Attempt {
            spec,
            solution,
            minimized,
        }
    }

    #[must_use]
    pub fn spec(&self) -> &ScrambleSpec {
        &self.spec
    }

    /// The solution as computed from the table
    #[must_use]
    pub fn solution(&self) -> &[Move] {
        &self.solution
    }

    #[must_use]
    pub fn minimized(&self) -> &[Move] {
        &self.minimized
    }

    #[must_use]
    pub fn is_long_enough(&self) -> bool {
        self.minimized.len() >= MIN_SOLUTION_LEN
    }
}

/// The result of scrambling: the accepted attempt plus every attempt rejected for being too short
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scramble {
    accepted: Attempt,
    rejected: Vec<Attempt>,
}

impl Scramble {
    /// Roll color permutations until one yields a long enough solution, accepting the last one after
    /// `MAX_ATTEMPTS` tries no matter how short it is.
    pub fn generate(serial: &SerialNumber, rng: &mut fastrand::Rng) -> Scramble {
        let mut rejected = Vec::new();

        for _ in 1..MAX_ATTEMPTS {
            let attempt = Attempt::new(ScrambleSpec::random(rng), serial);

            if attempt.is_long_enough() {
                return Scramble {
                    accepted: attempt,
                    rejected,
                };
            }

            rejected.push(attempt);
        }

        Scramble {
            accepted: Attempt::new(ScrambleSpec::random(rng), serial),
            rejected,
        }
    }

    #[must_use]
    pub fn accepted(&self) -> &Attempt {
        &self.accepted
    }

    #[must_use]
    pub fn rejected(&self) -> &[Attempt] {
        &self.rejected
    }

    /// How many color permutations were rolled, including the accepted one
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.rejected.len() + 1
    }

    /// The minimized solution
    #[must_use]
    pub fn solution(&self) -> &[Move] {
        self.accepted.minimized()
    }

    /// The moves that take a solved cube to the puzzle: the solution undone, last move first
    #[must_use]
    pub fn scramble_moves(&self) -> Vec<Move> {
        self.solution().iter().rev().map(|mv| mv.reverse()).collect()
    }

    /// Write out how the scramble was derived, prefixing every line with `prefix`
    pub fn log_report(&self, prefix: &str) {
        let spec = self.accepted.spec();
        let [a, b, c] = spec.column_shifts();

        for attempt in &self.rejected {
            debug!(
                "{prefix} Rerolled colors {}, solution {} is only {} moves",
                attempt.spec().colors().iter().join(", "),
                format_moves(attempt.minimized()),
                attempt.minimized().len()
            );
        }

        info!("{prefix} Colors: {}", spec.colors().iter().join(", "));
        info!("{prefix} Column shifts: A={a}, B={b}, C={c}");
        info!(
            "{prefix} Ignoring serial number character {}",
            spec.ignored_serial_index() + 1
        );
        info!(
            "{prefix} Reference color is {}, so the rows are read {} and we {}",
            spec.reference_color(),
            spec.layout(),
            spec.transform()
        );
        info!(
            "{prefix} Solution moves: {}",
            format_moves(self.accepted.solution())
        );
        info!(
            "{prefix} Minimized after {} attempt(s): {}",
            self.attempts(),
            format_moves(self.solution())
        );
    }
}

#[cfg(test)]
mod tests {
    use cube_core::{CubeState, Move};
    use pretty_assertions::assert_eq;

    use crate::{colors::Color, serial::SerialNumber};

    use super::{Layout, MAX_ATTEMPTS, MIN_SOLUTION_LEN, Scramble, ScrambleSpec, Transform};

    fn moves(s: &str) -> Vec<Move> {
        s.split_whitespace().map(|mv| mv.parse().unwrap()).collect()
    }

    fn serial() -> SerialNumber {
        "AB1CD2".parse().unwrap()
    }

    #[test]
    fn spec_from_colors() {
        use Color::*;

        let spec = ScrambleSpec::from_colors([Red, Yellow, Blue, Orange, Green, White]);
        assert_eq!(spec.column_shifts(), [1, 2, 3]);
        assert_eq!(spec.ignored_serial_index(), 3);
        assert_eq!(spec.reference_color(), Green);
        assert_eq!(spec.layout(), Layout::TwoPasses);
        assert_eq!(spec.transform(), Transform::Keep);
    }

    #[test]
    fn two_passes_without_transform() {
        use Color::*;

        let spec = ScrambleSpec::from_colors([Red, Yellow, Blue, Orange, Green, White]);
        assert_eq!(spec.rows(&serial()), vec![5, 6, 2, 6, 3]);
        assert_eq!(
            spec.solution(&serial()),
            moves("R' U' U U' F U F B' F B")
        );
    }

    #[test]
    fn paired_with_inverted_start() {
        use Color::*;

        let spec = ScrambleSpec::from_colors([Green, White, Orange, Yellow, Red, Blue]);
        assert_eq!(spec.column_shifts(), [5, 6, 4]);
        assert_eq!(spec.layout(), Layout::Paired);
        assert_eq!(spec.transform(), Transform::InvertFirstFive);
        assert_eq!(spec.rows(&serial()), vec![9, 6, 9, 10, 4]);
        assert_eq!(
            spec.solution(&serial()),
            moves("D' L' U F' D' L R D' L D")
        );
    }

    #[test]
    fn paired_and_reversed() {
        use Color::*;

        let spec = ScrambleSpec::from_colors([Red, Blue, Green, White, Yellow, Orange]);
        assert_eq!(spec.transform(), Transform::Reverse);
        assert_eq!(spec.rows(&serial()), vec![6, 8, 3, 5, 7]);
        assert_eq!(
            spec.solution(&serial()),
            moves("L' B' U R' B F R B F U'")
        );
    }

    #[test]
    fn minimized_attempt() {
        use Color::*;

        let attempt = super::Attempt::new(
            ScrambleSpec::from_colors([Red, Yellow, Blue, Orange, Green, White]),
            &serial(),
        );
        assert_eq!(attempt.minimized(), moves("R' U' F U F F"));
        assert!(!attempt.is_long_enough());
    }

    #[test_log::test]
    fn scrambles_undo_their_solution() {
        let mut rng = fastrand::Rng::with_seed(2024);
        let solved = CubeState::solved();

        for _ in 0..200 {
            let serial = SerialNumber::random(&mut rng);
            let scramble = Scramble::generate(&serial, &mut rng);

            assert!(scramble.attempts() <= MAX_ATTEMPTS);
            assert!(
                scramble.solution().len() >= MIN_SOLUTION_LEN
                    || scramble.attempts() == MAX_ATTEMPTS
            );
            assert!(scramble.rejected().iter().all(|a| !a.is_long_enough()));

            let scrambled = solved.apply_all(&scramble.scramble_moves());
            assert!(scrambled.apply_all(scramble.solution()).is_solved(&solved));

            // The raw solution does the same thing as the minimized one
            assert_eq!(
                scrambled.apply_all(scramble.accepted().solution()),
                scrambled.apply_all(scramble.solution())
            );

            scramble.log_report("[test]");
        }
    }

    #[test]
    fn seeded_generation_is_deterministic() {
        let serial = serial();
        let a = Scramble::generate(&serial, &mut fastrand::Rng::with_seed(99));
        let b = Scramble::generate(&serial, &mut fastrand::Rng::with_seed(99));

        assert_eq!(a, b);
    }
}
