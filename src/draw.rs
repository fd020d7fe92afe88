//! Drawing a board framed by its hints.

use std::fmt;

use crate::{Board, Puzzle, Val};

const GAP: &str = "   ";

/// A board framed by the hints of its puzzle.  Unknown values and
/// absent hints are drawn as `x`.
pub struct Drawing<'a> {
    puzzle: &'a Puzzle,
    board: &'a Board,
}

impl Puzzle {
    /// Draw a board of this puzzle.
    ///
    /// # Examples
    ///
    /// ```
    /// use skyline_solver::{Puzzle, Variant};
    ///
    /// let grid = vec![vec![None, Some(1)], vec![None, None]];
    /// let hints = [Some(2), None, None, None, None, None, None, Some(1)];
    /// let puzzle = Puzzle::new(Variant::Skyscrapers, &grid, &hints).unwrap();
    ///
    /// assert_eq!(
    ///     puzzle.draw(puzzle.givens()).to_string(),
    ///     "\n    2 x\n\nx   x 1   x\n1   x x   x\n\n    x x\n"
    /// );
    /// ```
    pub fn draw<'a>(&'a self, board: &'a Board) -> Drawing<'a> {
        Drawing {
            puzzle: self,
            board,
        }
    }
}

impl Drawing<'_> {
    fn hint_row(&self, f: &mut fmt::Formatter, side: usize) -> fmt::Result {
        let size = self.puzzle.size();
        let hints = &self.puzzle.hints()[side * size..(side + 1) * size];
        writeln!(f)?;
        writeln!(f, " {}{}", GAP, join(hints.iter().copied()))
    }
}

impl fmt::Display for Drawing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let size = self.puzzle.size();
        let hints = self.puzzle.hints();

        self.hint_row(f, 0)?;
        writeln!(f)?;
        for (row, values) in self.board.rows().into_iter().enumerate() {
            let cells = join(values.into_iter());
            writeln!(
                f,
                "{}{}{}{}{}",
                glyph(hints[3 * size + row]),
                GAP,
                cells,
                GAP,
                glyph(hints[size + row])
            )?;
        }
        self.hint_row(f, 2)
    }
}

fn glyph(val: Option<Val>) -> String {
    val.map_or_else(|| "x".to_string(), |val| val.to_string())
}

fn join<I>(values: I) -> String
where
    I: Iterator<Item = Option<Val>>,
{
    values.map(glyph).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use crate::{Puzzle, Variant};

    #[test]
    fn test_draw_givens() {
        let grid = vec![
            vec![None, Some(1), None],
            vec![Some(2), None, None],
            vec![None, None, Some(1)],
        ];
        let hints = [
            Some(2), None, None,
            Some(1), None, None,
            None, None, Some(2),
            None, None, Some(3),
        ];
        let sys = Puzzle::new(Variant::Skyscrapers, &grid, &hints).unwrap();

        assert_eq!(
            sys.draw(sys.givens()).to_string(),
            "\n    2 x x\n\nx   x 1 x   1\nx   2 x x   x\n3   x x 1   x\n\n    x x 2\n"
        );
    }
}
