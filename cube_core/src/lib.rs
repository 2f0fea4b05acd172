#![warn(clippy::pedantic)]
#![allow(clippy::missing_panics_doc, clippy::similar_names)]

//! The 3x3x3 cube as a permutation of cubelets: slots, the quarter-turn table, applying turns and checking for a solve.

pub mod moves;
pub mod rotation;
pub mod slot;
mod state;

pub use moves::{Face, Move, MoveDef, MoveTable, ParseMoveError, format_moves};
pub use rotation::{Quaternion, Rotation};
pub use slot::{Axis, SLOT_COUNT, Slot};
pub use state::*;
