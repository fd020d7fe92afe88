//! This crate solves skyline visibility puzzles.
//! Perimeter hints are turned into candidate eliminations, and greedy
//! guessing decides whether a puzzle has zero, one or many solutions.

pub mod rules;

mod cell;
mod draw;
mod error;
mod hint;
mod minimize;
mod puzzle;

use std::ops;

pub use cell::{Cell, Visibility};
pub use draw::Drawing;
pub use error::Error;
pub use hint::{Perimeter, Side};
pub use puzzle::{Puzzle, PuzzleSearch};
pub use rules::{Rules, Variant};

/// The type of a building height.  Zero is an empty lot.
pub type Val = usize;

/// A result during a puzzle solution search (Err = contradiction).
pub type PsResult<T> = Result<T, Error>;

/// A snapshot of the values in every cell of a grid.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Board {
    size: usize,
    values: Vec<Option<Val>>,
}

/// The outcome of solving a puzzle.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Solution {
    Unsolvable,
    Unique(Board),
    /// Two boards witnessing ambiguity.  If greedy guessing could not
    /// complete either of them they are left partially filled.
    Multiple(Board, Board),
}

impl Board {
    pub(crate) fn new(size: usize, values: Vec<Option<Val>>) -> Self {
        debug_assert_eq!(values.len(), size * size);
        Board { size, values }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Get the value of a cell, or None if it is unknown.
    pub fn get(&self, row: usize, col: usize) -> Option<Val> {
        self.values[row * self.size + col]
    }

    pub fn is_complete(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    pub fn rows(&self) -> Vec<Vec<Option<Val>>> {
        self.values.chunks(self.size).map(<[_]>::to_vec).collect()
    }

    /// Get the grid of values if every cell is known.
    pub fn filled(&self) -> Option<Vec<Vec<Val>>> {
        self.values
            .chunks(self.size)
            .map(|row| row.iter().copied().collect::<Option<Vec<_>>>())
            .collect()
    }
}

impl ops::Index<(usize, usize)> for Board {
    type Output = Val;

    /// Get the value of a cell.
    ///
    /// # Panics
    ///
    /// Panics if the cell is unknown.
    fn index(&self, (row, col): (usize, usize)) -> &Val {
        match self.values[row * self.size + col] {
            Some(ref val) => val,
            None => panic!("unassigned"),
        }
    }
}

impl Solution {
    pub fn is_unsolvable(&self) -> bool {
        matches!(self, Solution::Unsolvable)
    }

    pub fn is_unique(&self) -> bool {
        matches!(self, Solution::Unique(_))
    }

    pub fn is_multiple(&self) -> bool {
        matches!(self, Solution::Multiple(..))
    }

    /// Get the board if the solution is unique.
    pub fn unique(&self) -> Option<&Board> {
        match self {
            Solution::Unique(board) => Some(board),
            _ => None,
        }
    }
}
