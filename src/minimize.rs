//! Removing redundant hints.

use log::debug;

use crate::{Puzzle, Val};

impl Puzzle {
    /// Remove hints one at a time, in index order, keeping each removal
    /// after which the puzzle still has a unique solution.
    ///
    /// Returns None if the puzzle itself is not uniquely solvable.  The
    /// result depends on the order of removal and need not be the
    /// smallest set of hints.
    ///
    /// # Examples
    ///
    /// ```
    /// use skyline_solver::{Puzzle, Variant};
    ///
    /// let grid = vec![
    ///     vec![Some(1), Some(2), Some(3)],
    ///     vec![Some(2), Some(3), Some(1)],
    ///     vec![Some(3), Some(1), Some(2)],
    /// ];
    /// let mut hints = vec![None; 12];
    /// hints[0] = Some(3);
    ///
    /// let puzzle = Puzzle::new(Variant::Skyscrapers, &grid, &hints).unwrap();
    /// assert_eq!(puzzle.minimal_hints(), Some(vec![None; 12]));
    /// ```
    pub fn minimal_hints(&self) -> Option<Vec<Option<Val>>> {
        if !self.solve().is_unique() {
            return None;
        }

        let mut hints = self.hints().to_vec();
        for index in 0..hints.len() {
            let hint = match hints[index].take() {
                Some(hint) => hint,
                None => continue,
            };

            let unique = self
                .with_hints(hints.clone())
                .map_or(false, |puzzle| puzzle.solve().is_unique());
            if unique {
                debug!("hint {} ({}) is redundant", index, hint);
            } else {
                hints[index] = Some(hint);
            }
        }

        Some(hints)
    }
}
