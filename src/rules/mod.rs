//! Puzzle dialects.
//!
//! The solving engine owns the generic deductions: unique values per
//! row and column, forced locations, and the skyline visibility of
//! every cell.  A [`Rules`] implementation supplies the bounds of a
//! dialect and its reading of the perimeter hints.

use std::rc::Rc;

use crate::{PsResult, PuzzleSearch, Val};

mod haido;
mod skyscrapers;

pub use self::haido::Haido;
pub use self::skyscrapers::{ExtraBuilding, Gaps, Skyscrapers};

/// The hooks a puzzle dialect provides to the solving engine.
///
/// Every hook receives the search state it should refine and returns
/// Err on a contradiction.  The hint hooks default to counting visible
/// buildings.
pub trait Rules {
    /// The number of empty lots in every row and column.
    fn empty_cells(&self) -> usize {
        0
    }

    /// The tallest building on a grid of the given size.
    fn highest(&self, size: usize) -> Val {
        size
    }

    /// The lowest value a cell may take; zero is an empty lot.
    fn lowest(&self) -> Val {
        if self.empty_cells() > 0 {
            0
        } else {
            1
        }
    }

    /// The largest hint allowed on a grid of the given size.
    fn max_hint(&self, size: usize) -> Val {
        size - self.empty_cells()
    }

    /// Whether every height must appear in every row and column.
    fn must_all_values_appear(&self) -> bool {
        true
    }

    /// Check that opposite hints do not rule each other out.  By default
    /// hints count visible buildings, so both counts must fit one line.
    fn are_hints_valid(&self, size: usize, hints: &[Option<Val>]) -> bool {
        skyscrapers::opposite_hints_fit(size, self.empty_cells(), hints)
    }

    /// Eliminations that follow from the hints alone.
    fn initial_conclusions(&self, search: &mut PuzzleSearch) -> PsResult<()> {
        skyscrapers::bound_tallest_buildings(search)
    }

    /// Resolve visibility of the cells facing a present hint.
    fn mark_seen_and_unseen(
        &self,
        search: &mut PuzzleSearch,
        hint: usize,
        value: Val,
    ) -> PsResult<()> {
        skyscrapers::count_seen_and_unseen(search, hint, value)
    }

    /// Exclude the values a cell cannot take given its visibility from
    /// a present hint.
    fn mark_cell_illegals(
        &self,
        search: &mut PuzzleSearch,
        hint: usize,
        _value: Val,
        distance: usize,
    ) -> PsResult<()> {
        skyscrapers::exclude_for_visibility(search, hint, distance)
    }

    /// Any further deductions of the dialect.
    fn specific_rules(&self, _search: &mut PuzzleSearch) -> PsResult<()> {
        Ok(())
    }
}

/// The built-in puzzle dialects.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Variant {
    /// Hints count the visible buildings.
    Skyscrapers,
    /// Hints name a height that is visible from that side.
    Haido,
    /// Every row and column has one empty lot.
    Gaps,
    /// Heights run up to N+1, so one height is missing from each line.
    ExtraBuilding,
}

impl Variant {
    pub fn rules(self) -> Rc<dyn Rules> {
        match self {
            Variant::Skyscrapers => Rc::new(Skyscrapers),
            Variant::Haido => Rc::new(Haido),
            Variant::Gaps => Rc::new(Gaps),
            Variant::ExtraBuilding => Rc::new(ExtraBuilding),
        }
    }
}
