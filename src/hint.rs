//! Mapping perimeter hints onto grid coordinates.
//!
//! Hints are numbered clockwise: the top hints from left to right,
//! then the right hints from top to bottom, then the bottom hints from
//! left to right, and finally the left hints from top to bottom.

use crate::{Error, PsResult};

/// The side of the grid a hint stands on.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

/// The hint geometry of a square grid.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Perimeter {
    size: usize,
}

/*--------------------------------------------------------------*/

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Right and bottom hints look against the row/column order.
    fn is_backward(self) -> bool {
        matches!(self, Side::Right | Side::Bottom)
    }

    fn looks_along_column(self) -> bool {
        matches!(self, Side::Top | Side::Bottom)
    }
}

impl Perimeter {
    pub fn new(size: usize) -> Self {
        Perimeter { size }
    }

    pub fn num_hints(&self) -> usize {
        4 * self.size
    }

    pub fn validate(&self, hint: usize) -> PsResult<()> {
        if hint < self.num_hints() {
            Ok(())
        } else {
            Err(Error::HintIndex {
                hint,
                count: self.num_hints(),
            })
        }
    }

    pub fn side(&self, hint: usize) -> PsResult<Side> {
        self.validate(hint)?;
        Ok(Side::ALL[hint / self.size])
    }

    /// Get the (row, column) of the cell at the given distance from a
    /// hint.  Distance 0 is the cell next to the hint.
    pub fn cell_at_distance(&self, hint: usize, distance: usize) -> PsResult<(usize, usize)> {
        let side = self.side(hint)?;
        if distance >= self.size {
            return Err(Error::Distance {
                distance,
                size: self.size,
            });
        }

        let along = if side.is_backward() {
            self.size - 1 - distance
        } else {
            distance
        };
        let offset = hint % self.size;

        if side.looks_along_column() {
            Ok((along, offset))
        } else {
            Ok((offset, along))
        }
    }
}
