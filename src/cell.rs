//! The knowledge state of one grid cell.

use bit_set::BitSet;

use crate::{Error, PsResult, Side, Val};

/// Whether a building can be seen from one side of the grid.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Visibility {
    Unknown,
    Seen,
    Hidden,
}

/// A cell's candidate heights and visibility from the four sides.
///
/// Candidates only ever shrink and visibility flags only ever resolve.
/// When a single candidate remains it becomes the cell's value.
#[derive(Clone, Debug)]
pub struct Cell {
    lowest: Val,
    highest: Val,
    value: Option<Val>,
    excluded: BitSet,
    seen: [Visibility; 4],
}

/*--------------------------------------------------------------*/

impl Visibility {
    pub fn is_resolved(self) -> bool {
        self != Visibility::Unknown
    }

    /// Merge two flags.  A resolved flag cannot change.
    pub fn merge(self, other: Visibility) -> PsResult<Visibility> {
        match (self, other) {
            (Visibility::Unknown, flag) | (flag, Visibility::Unknown) => Ok(flag),
            (a, b) if a == b => Ok(a),
            _ => Err(Error::Contradiction("a resolved visibility cannot change")),
        }
    }
}

impl From<bool> for Visibility {
    fn from(seen: bool) -> Self {
        if seen {
            Visibility::Seen
        } else {
            Visibility::Hidden
        }
    }
}

/*--------------------------------------------------------------*/

impl Cell {
    /// Allocate a cell accepting every height in lowest..=highest.
    /// A lowest height of 0 allows an empty lot.
    pub fn new(lowest: Val, highest: Val) -> Self {
        Cell {
            lowest,
            highest,
            value: None,
            excluded: BitSet::with_capacity(highest + 1),
            seen: [Visibility::Unknown; 4],
        }
    }

    pub fn lowest(&self) -> Val {
        self.lowest
    }

    pub fn highest(&self) -> Val {
        self.highest
    }

    pub fn can_be_empty(&self) -> bool {
        self.lowest == 0
    }

    pub fn value(&self) -> Option<Val> {
        self.value
    }

    /// Get an iterator over the heights proven impossible.
    pub fn excluded(&self) -> impl Iterator<Item = Val> + '_ {
        self.excluded.iter()
    }

    /// Get an iterator over the remaining candidates, in ascending order.
    pub fn candidates(&self) -> impl DoubleEndedIterator<Item = Val> + '_ {
        (self.lowest..=self.highest).filter(move |&val| !self.excluded.contains(val))
    }

    pub fn has_candidate(&self, val: Val) -> bool {
        self.lowest <= val && val <= self.highest && !self.excluded.contains(val)
    }

    pub fn num_candidates(&self) -> usize {
        self.highest - self.lowest + 1 - self.excluded.len()
    }

    pub fn min_candidate(&self) -> Val {
        self.candidates().next().expect("candidates")
    }

    pub fn max_candidate(&self) -> Val {
        self.candidates().next_back().expect("candidates")
    }

    pub fn seen(&self, side: Side) -> Visibility {
        self.seen[side.index()]
    }

    pub fn seen_flags(&self) -> [Visibility; 4] {
        self.seen
    }

    /// Set the cell to a value.  Setting the same value again is a
    /// no-op.
    pub fn set_value(&mut self, val: Val) -> PsResult<()> {
        self.check_range(val)?;
        match self.value {
            Some(v) if v == val => return Ok(()),
            Some(_) => return Err(Error::Contradiction("cell already holds another value")),
            None => (),
        }
        if self.excluded.contains(val) {
            return Err(Error::Contradiction("value was already excluded"));
        }

        self.value = Some(val);
        for other in self.lowest..=self.highest {
            if other != val {
                self.excluded.insert(other);
            }
        }

        if val == self.highest {
            self.set_seen([Visibility::Seen; 4])?;
        }
        if val == 0 {
            self.set_seen([Visibility::Hidden; 4])?;
        }

        Ok(())
    }

    /// Remove a candidate.  The last remaining candidate becomes the
    /// cell's value.
    pub fn exclude(&mut self, val: Val) -> PsResult<()> {
        self.check_range(val)?;
        if self.value == Some(val) {
            return Err(Error::Contradiction("excluding the cell's own value"));
        }
        if !self.excluded.insert(val) {
            return Ok(());
        }

        match self.num_candidates() {
            0 => Err(Error::Contradiction("no candidates left")),
            1 if self.value.is_none() => {
                let last = self.min_candidate();
                self.set_value(last)
            }
            _ => Ok(()),
        }
    }

    /// Merge visibility flags into the cell.
    pub fn set_seen(&mut self, seen: [Visibility; 4]) -> PsResult<()> {
        let mut merged = self.seen;
        for (flag, new) in merged.iter_mut().zip(seen) {
            *flag = flag.merge(new)?;
        }
        self.seen = merged;

        // An empty lot is never seen, and the tallest building is never hidden.
        if self.can_be_empty() && merged.contains(&Visibility::Seen) {
            self.exclude(0)?;
        }
        if merged.contains(&Visibility::Hidden) {
            self.exclude(self.highest)?;
        }

        Ok(())
    }

    pub fn set_seen_from(&mut self, side: Side, seen: bool) -> PsResult<()> {
        let mut flags = [Visibility::Unknown; 4];
        flags[side.index()] = seen.into();
        self.set_seen(flags)
    }

    /// A measure that grows whenever the cell learns something.
    pub(crate) fn knowledge(&self) -> usize {
        self.excluded.len() + self.seen.iter().filter(|flag| flag.is_resolved()).count()
    }

    fn check_range(&self, val: Val) -> PsResult<()> {
        if self.lowest <= val && val <= self.highest {
            Ok(())
        } else {
            Err(Error::ValueOutOfRange {
                value: val,
                lowest: self.lowest,
                highest: self.highest,
            })
        }
    }
}
