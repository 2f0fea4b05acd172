#![warn(clippy::pedantic)]
#![allow(clippy::missing_panics_doc, clippy::must_use_candidate)]

pub mod colors;
mod minimize;
pub mod scramble;
pub mod serial;

pub use colors::Color;
pub use minimize::minimize;
pub use scramble::{Attempt, Layout, MAX_ATTEMPTS, MIN_SOLUTION_LEN, Scramble, ScrambleSpec, Transform};
pub use serial::{SERIAL_LEN, SerialError, SerialNumber};
