//! Computer opponent strength.

use serde::{Deserialize, Serialize};

/// Move-selection policy for the computer opponent.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Uniformly random legal move.
    Easy,
    /// Alpha-beta search cut off at a shallow horizon.
    Medium,
    /// Full-depth alpha-beta search. Never loses.
    #[default]
    Hard,
}

impl Difficulty {
    /// The next difficulty, wrapping from hard back to easy.
    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }
}
