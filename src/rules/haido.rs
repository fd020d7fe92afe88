//! Haido: each hint names a height that can be seen from its position.

use crate::{Error, PsResult, PuzzleSearch, Rules, Val, Visibility};

/// Heights 1..=N.  A hint of h means the building of height h is
/// visible from that side.
#[derive(Copy, Clone, Debug, Default)]
pub struct Haido;

impl Rules for Haido {
    /// Opposite hints cannot name the same height, unless it is the
    /// tallest one.
    fn are_hints_valid(&self, size: usize, hints: &[Option<Val>]) -> bool {
        let half = hints.len() / 2;
        (0..half).all(|idx| match (hints[idx], hints[half + idx]) {
            (Some(a), Some(b)) => a != b || a == size,
            _ => true,
        })
    }

    fn initial_conclusions(&self, search: &mut PuzzleSearch) -> PsResult<()> {
        // Only h-1 heights can stand in front of a visible h.
        for hint in 0..search.num_hints() {
            if let Some(val) = search.hint(hint) {
                for distance in val..search.size() {
                    search.exclude_from(hint, distance, val)?;
                }
            }
        }

        self.specific_rules(search)
    }

    fn mark_seen_and_unseen(
        &self,
        search: &mut PuzzleSearch,
        hint: usize,
        value: Val,
    ) -> PsResult<()> {
        for distance in 0..search.size() {
            if search.cell_from(hint, distance).value() == Some(value) {
                search.set_seen_from(hint, distance, true)?;
            }
        }
        Ok(())
    }

    fn mark_cell_illegals(
        &self,
        search: &mut PuzzleSearch,
        hint: usize,
        value: Val,
        distance: usize,
    ) -> PsResult<()> {
        if search.seen_from(hint, distance) == Visibility::Hidden {
            search.exclude_from(hint, distance, value)?;
        }
        Ok(())
    }

    /// Nothing taller than the hint may stand before its first possible
    /// position.
    fn specific_rules(&self, search: &mut PuzzleSearch) -> PsResult<()> {
        let highest = search.highest();

        for hint in 0..search.num_hints() {
            let val = match search.hint(hint) {
                Some(val) => val,
                None => continue,
            };

            let first = (0..search.size())
                .find(|&distance| search.cell_from(hint, distance).has_candidate(val))
                .ok_or(Error::Contradiction("a hinted height has no place left"))?;
            for distance in 0..=first {
                for taller in val + 1..=highest {
                    search.exclude_from(hint, distance, taller)?;
                }
            }
        }

        Ok(())
    }
}
