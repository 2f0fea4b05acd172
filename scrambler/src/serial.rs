use std::{fmt, str::FromStr};

use thiserror::Error;

/// Number of characters in a serial number
pub const SERIAL_LEN: usize = 6;

const ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SerialError {
    #[error("Serial number must be six characters long, found {0}")]
    Length(usize),
    #[error("Serial number may only contain letters and digits, found `{0}`")]
    Character(char),
}

/// The bomb's serial number: six uppercase letters or digits
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SerialNumber {
    chars: [u8; SERIAL_LEN],
}

impl SerialNumber {
    /// Generate a random serial number
    pub fn random(rng: &mut fastrand::Rng) -> SerialNumber {
        SerialNumber {
            chars: std::array::from_fn(|_| ALPHABET[rng.usize(..ALPHABET.len())]),
        }
    }

    /// The number a character stands for: digits are themselves, letters count up from 10 at `A`.
    /// Only called on characters that passed validation.
    fn digit_value(c: u8) -> usize {
        match c {
            b'0'..=b'9' => usize::from(c - b'0'),
            _ => usize::from(c - b'A') + 10,
        }
    }

    /// The value of every character except the one at `ignored`
    #[must_use]
    pub fn values_without(&self, ignored: usize) -> Vec<usize> {
        self.chars
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != ignored)
            .map(|(_, &c)| SerialNumber::digit_value(c))
            .collect()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        // Only ever holds ASCII from `ALPHABET`
        std::str::from_utf8(&self.chars).unwrap_or_default()
    }
}

impl FromStr for SerialNumber {
    type Err = SerialError;

    fn from_str(s: &str) -> Result<SerialNumber, SerialError> {
        let s = s.trim();
        let len = s.chars().count();

        if len != SERIAL_LEN {
            return Err(SerialError::Length(len));
        }

        let mut chars = [0; SERIAL_LEN];

        for (slot, c) in chars.iter_mut().zip(s.chars()) {
            if !c.is_ascii_alphanumeric() {
                return Err(SerialError::Character(c));
            }

            #[allow(clippy::cast_possible_truncation)]
            let upper = c.to_ascii_uppercase() as u8;
            *slot = upper;
        }

        Ok(SerialNumber { chars })
    }
}

impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
