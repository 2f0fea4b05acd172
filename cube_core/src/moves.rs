use std::{fmt, str::FromStr, sync::LazyLock};

use itertools::Itertools;
use thiserror::Error;

use crate::{
    rotation::{Quaternion, Rotation},
    slot::{Axis, SLOT_COUNT, Slot},
};

/// One of the six outer layers of the cube
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    Front,
    Back,
    Left,
    Right,
    Up,
    Down,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Front,
        Face::Back,
        Face::Left,
        Face::Right,
        Face::Up,
        Face::Down,
    ];

    /// Opposite faces are adjacent in `ALL`, so flipping the low bit of the index pairs them
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Face::Front => 0,
            Face::Back => 1,
            Face::Left => 2,
            Face::Right => 3,
            Face::Up => 4,
            Face::Down => 5,
        }
    }

    #[must_use]
    pub fn opposite(self) -> Face {
        Face::ALL[self.index() ^ 1]
    }

    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Face::Front => 'F',
            Face::Back => 'B',
            Face::Left => 'L',
            Face::Right => 'R',
            Face::Up => 'U',
            Face::Down => 'D',
        }
    }

    /// Parse a face letter, ignoring case
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Face> {
        Face::ALL
            .into_iter()
            .find(|face| face.letter().eq_ignore_ascii_case(&letter))
    }

    /// The axis the layer is perpendicular to and the coordinate every slot of the layer has on it
    #[must_use]
    pub fn layer(self) -> (Axis, u8) {
        match self {
            Face::Front => (Axis::Z, 0),
            Face::Back => (Axis::Z, 2),
            Face::Left => (Axis::X, 0),
            Face::Right => (Axis::X, 2),
            Face::Up => (Axis::Y, 0),
            Face::Down => (Axis::Y, 2),
        }
    }

    /// Whether a clockwise turn of this face is a positive rotation about its axis
    fn clockwise_is_positive(self) -> bool {
        matches!(self, Face::Front | Face::Left | Face::Up)
    }
}

/// A quarter turn, identified by its index into the move table.
///
/// Indices are `face * 2 + prime`, so the reverse of a move is the index with the low bit flipped and the moves of the
/// opposite face are the index with the second bit flipped.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move(u8);

impl Move {
    pub const F: Move = Move(0);
    pub const F_PRIME: Move = Move(1);
    pub const B: Move = Move(2);
    pub const B_PRIME: Move = Move(3);
    pub const L: Move = Move(4);
    pub const L_PRIME: Move = Move(5);
    pub const R: Move = Move(6);
    pub const R_PRIME: Move = Move(7);
    pub const U: Move = Move(8);
    pub const U_PRIME: Move = Move(9);
    pub const D: Move = Move(10);
    pub const D_PRIME: Move = Move(11);

    pub const COUNT: usize = 12;

    pub const ALL: [Move; Move::COUNT] = [
        Move::F,
        Move::F_PRIME,
        Move::B,
        Move::B_PRIME,
        Move::L,
        Move::L_PRIME,
        Move::R,
        Move::R_PRIME,
        Move::U,
        Move::U_PRIME,
        Move::D,
        Move::D_PRIME,
    ];

    /// Build the move turning `face`, counter-clockwise if `prime` is set
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(face: Face, prime: bool) -> Move {
        Move(((face.index() as u8) << 1) | u8::from(prime))
    }

    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    #[must_use]
    pub fn face(self) -> Face {
        Face::ALL[usize::from(self.0 >> 1)]
    }

    #[must_use]
    pub fn is_prime(self) -> bool {
        self.0 & 1 == 1
    }

    /// The quarter turn of the same layer in the other direction
    #[must_use]
    pub fn reverse(self) -> Move {
        Move(self.0 ^ 1)
    }

    /// Both quarter turns of the parallel layer. They touch disjoint slots so they commute with `self`.
    #[must_use]
    pub fn opposite_side(self) -> [Move; 2] {
        let base = (self.0 & !1) ^ 2;
        [Move(base), Move(base | 1)]
    }

    /// The table entry for this move
    #[must_use]
    pub fn def(self) -> &'static MoveDef {
        &MoveTable::get().moves[self.index()]
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.face().letter())?;

        if self.is_prime() {
            write!(f, "'")?;
        }

        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseMoveError {
    #[error("Empty move")]
    Empty,
    #[error("Unknown move `{0}`")]
    UnknownMove(String),
}

/// Accepts the typewriter apostrophe as well as the typographic and mathematical primes
pub fn is_prime_mark(c: char) -> bool {
    matches!(c, '\'' | '’' | '′')
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Move, ParseMoveError> {
        let s = s.trim();
        let mut chars = s.chars();

        let Some(letter) = chars.next() else {
            return Err(ParseMoveError::Empty);
        };

        let face =
            Face::from_letter(letter).ok_or_else(|| ParseMoveError::UnknownMove(s.to_owned()))?;

        match (chars.next(), chars.next()) {
            (None, _) => Ok(Move::new(face, false)),
            (Some(c), None) if is_prime_mark(c) => Ok(Move::new(face, true)),
            _ => Err(ParseMoveError::UnknownMove(s.to_owned())),
        }
    }
}

/// Format a sequence of moves the way they are typed, space separated
pub fn format_moves(moves: &[Move]) -> String {
    moves.iter().join(" ")
}

/// Everything there is to know about one quarter turn
#[derive(Debug)]
pub struct MoveDef {
    mv: Move,
    axis: Axis,
    layer: u8,
    positive: bool,
    turn: Rotation,
    slots: [Slot; 9],
    sources: [u8; SLOT_COUNT],
}

impl MoveDef {
    fn new(mv: Move) -> MoveDef {
        let face = mv.face();
        let (axis, layer) = face.layer();
        let positive = face.clockwise_is_positive() != mv.is_prime();
        let turn = Rotation::quarter_turn(axis, positive);
        let undo = turn.inverse();

        let slots: [Slot; 9] = Slot::all()
            .filter(|slot| slot.coord(axis) == layer)
            .collect_vec()
            .try_into()
            .expect("every layer holds nine slots");

        #[allow(clippy::cast_possible_truncation)]
        let mut sources: [u8; SLOT_COUNT] = std::array::from_fn(|i| i as u8);

        for target in slots {
            // A turn keeps the layer coordinate fixed, so the source is always inside the layer too
            let source = Slot::from_centered(undo.apply(target.centered()))
                .expect("turns map slots onto slots");

            #[allow(clippy::cast_possible_truncation)]
            let source = source.index() as u8;
            sources[target.index()] = source;
        }

        MoveDef {
            mv,
            axis,
            layer,
            positive,
            turn,
            slots,
            sources,
        }
    }

    #[must_use]
    pub fn mv(&self) -> Move {
        self.mv
    }

    /// The name as it is written in commands, e.g. `R'`
    #[must_use]
    pub fn name(&self) -> String {
        self.mv.to_string()
    }

    /// Whether the move carries the cubelet in `slot`
    #[must_use]
    pub fn in_layer(&self, slot: Slot) -> bool {
        slot.coord(self.axis) == self.layer
    }

    /// The nine slots this move touches
    #[must_use]
    pub fn slots(&self) -> &[Slot; 9] {
        &self.slots
    }

    /// The slot whose cubelet ends up in `target` after the move. Slots outside the layer map to themselves.
    #[must_use]
    pub fn source(&self, target: Slot) -> Slot {
        Slot::from_index(usize::from(self.sources[target.index()]))
    }

    /// The full quarter turn applied to every carried cubelet
    #[must_use]
    pub fn turn(&self) -> Rotation {
        self.turn
    }

    #[must_use]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// The turn after `degrees` of progress, for animating. At 90 it agrees with `turn`.
    #[must_use]
    pub fn turn_at(&self, degrees: f32) -> Quaternion {
        Quaternion::from_axis_angle(self.axis, self.positive, degrees)
    }
}

/// The twelve quarter turns, built once and never modified
#[derive(Debug)]
pub struct MoveTable {
    moves: [MoveDef; Move::COUNT],
}

static MOVE_TABLE: LazyLock<MoveTable> = LazyLock::new(|| MoveTable {
    moves: Move::ALL.map(MoveDef::new),
});

impl MoveTable {
    /// Get the process-wide table, building it on first use
    pub fn get() -> &'static MoveTable {
        &MOVE_TABLE
    }

    pub fn iter(&self) -> impl Iterator<Item = &MoveDef> {
        self.moves.iter()
    }
}
