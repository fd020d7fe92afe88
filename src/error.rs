use thiserror::Error;

use crate::Val;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("the grid has no rows")]
    EmptyGrid,

    #[error("row {row} has {len} cells, expected {size}")]
    NotSquare { row: usize, len: usize, size: usize },

    #[error("expected {expected} hints, got {got}")]
    HintCount { expected: usize, got: usize },

    #[error("hint {index} is {value}, hints must lie between 1 and {max}")]
    HintOutOfRange { index: usize, value: Val, max: Val },

    #[error("the value {value} given at ({row}, {col}) is out of range")]
    GivenOutOfRange { row: usize, col: usize, value: Val },

    #[error("the value {value} is outside {lowest}..={highest}")]
    ValueOutOfRange { value: Val, lowest: Val, highest: Val },

    #[error("there are only {count} hints, got hint {hint}")]
    HintIndex { hint: usize, count: usize },

    #[error("distance {distance} does not fit a grid of size {size}")]
    Distance { distance: usize, size: usize },

    /// The current branch has no valid completion.
    #[error("contradiction: {0}")]
    Contradiction(&'static str),
}

impl Error {
    pub fn is_contradiction(&self) -> bool {
        matches!(self, Error::Contradiction(_))
    }
}
