//! The counting dialects: each hint is the number of buildings visible
//! from its position.

use crate::{Error, PsResult, PuzzleSearch, Rules, Val, Visibility};

/// Heights 1..=N, every height once per row and column.
#[derive(Copy, Clone, Debug, Default)]
pub struct Skyscrapers;

/// Heights 0..=N-1 where 0 is the single empty lot of each row and
/// column.
#[derive(Copy, Clone, Debug, Default)]
pub struct Gaps;

/// Heights 1..=N+1, one of them missing from each row and column.
#[derive(Copy, Clone, Debug, Default)]
pub struct ExtraBuilding;

impl Rules for Skyscrapers {}

impl Rules for Gaps {
    fn empty_cells(&self) -> usize {
        1
    }

    fn highest(&self, size: usize) -> Val {
        size - 1
    }
}

impl Rules for ExtraBuilding {
    fn highest(&self, size: usize) -> Val {
        size + 1
    }

    fn must_all_values_appear(&self) -> bool {
        false
    }
}

/*--------------------------------------------------------------*/

/// Opposite hints (absent = 0) cannot see more buildings between them
/// than fit in a line.
pub(super) fn opposite_hints_fit(size: usize, empty_cells: usize, hints: &[Option<Val>]) -> bool {
    let half = hints.len() / 2;
    (0..half).all(|idx| {
        hints[idx].unwrap_or(0) + hints[half + idx].unwrap_or(0) <= size + 1 - empty_cells
    })
}

/// With a hint of h, the t-th tallest building must stand at or behind
/// the (h - t)-th position that is not yet hidden.
pub(super) fn bound_tallest_buildings(search: &mut PuzzleSearch) -> PsResult<()> {
    let highest = search.highest();

    for hint in 0..search.num_hints() {
        let count = match search.hint(hint) {
            Some(count) => count,
            None => continue,
        };

        let visible = (0..search.size())
            .filter(|&distance| search.seen_from(hint, distance) != Visibility::Hidden)
            .collect::<Vec<_>>();

        for rank in 0..count {
            let first = *visible
                .get(count - 1 - rank)
                .ok_or(Error::Contradiction("too few buildings can be seen from a hint"))?;
            for distance in 0..first {
                search.exclude_from(hint, distance, highest - rank)?;
            }
        }
    }

    Ok(())
}

pub(super) fn count_seen_and_unseen(search: &mut PuzzleSearch, hint: usize, count: Val) -> PsResult<()> {
    let size = search.size();

    if count + count_with(search, hint, Visibility::Hidden) == size {
        set_unknown(search, hint, true)?;
    }
    if count + count_with(search, hint, Visibility::Hidden) > size {
        return Err(Error::Contradiction("too many buildings hidden from a hint"));
    }
    if count == count_with(search, hint, Visibility::Seen) {
        set_unknown(search, hint, false)?;
    }
    if count < count_with(search, hint, Visibility::Seen) {
        return Err(Error::Contradiction("too many buildings seen from a hint"));
    }

    Ok(())
}

fn count_with(search: &PuzzleSearch, hint: usize, flag: Visibility) -> usize {
    (0..search.size())
        .filter(|&distance| search.seen_from(hint, distance) == flag)
        .count()
}

fn set_unknown(search: &mut PuzzleSearch, hint: usize, seen: bool) -> PsResult<()> {
    for distance in 0..search.size() {
        if search.seen_from(hint, distance) == Visibility::Unknown {
            search.set_seen_from(hint, distance, seen)?;
        }
    }
    Ok(())
}

pub(super) fn exclude_for_visibility(search: &mut PuzzleSearch, hint: usize, distance: usize) -> PsResult<()> {
    let size = search.size();
    let lowest = search.lowest();
    let highest = search.highest();

    // A seen building is taller than anything in front of it.
    if search.seen_from(hint, distance) == Visibility::Seen {
        if distance == 0 {
            if search.cell_from(hint, 0).can_be_empty() {
                search.exclude_from(hint, 0, 0)?;
            }
        } else {
            let (lower, _) = search.bounds_in_front(hint, distance);
            for val in lowest..=lower {
                search.exclude_from(hint, distance, val)?;
            }
        }
    }

    // Nothing may block a seen building further back.
    if distance + 1 < size {
        let limit = (distance + 1..size)
            .filter(|&behind| search.seen_from(hint, behind) == Visibility::Seen)
            .map(|behind| search.cell_from(hint, behind).max_candidate())
            .min();
        if let Some(limit) = limit {
            for val in limit..=highest {
                search.exclude_from(hint, distance, val)?;
            }
        }
    }

    // A hidden building is shorter than something in front of it.
    if search.seen_from(hint, distance) == Visibility::Hidden {
        if distance == 0 {
            if !search.cell_from(hint, 0).can_be_empty() {
                return Err(Error::Contradiction("the building next to a hint is hidden"));
            }
            search.set_value_from(hint, 0, 0)?;
        } else {
            let (_, upper) = search.bounds_in_front(hint, distance);
            for val in upper..=highest {
                search.exclude_from(hint, distance, val)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{opposite_hints_fit, ExtraBuilding, Gaps, Skyscrapers};
    use crate::{Puzzle, PuzzleSearch, Rules, Variant, Visibility};

    fn empty_puzzle(variant: Variant, size: usize, hints: &[(usize, usize)]) -> Puzzle {
        let grid = vec![vec![None; size]; size];
        let mut all = vec![None; 4 * size];
        for &(idx, val) in hints {
            all[idx] = Some(val);
        }
        Puzzle::new(variant, &grid, &all).unwrap()
    }

    fn excluded(search: &PuzzleSearch, row: usize, col: usize) -> Vec<usize> {
        search.cell(row, col).excluded().collect()
    }

    #[test]
    fn test_opposite_hints() {
        let mut hints = vec![None; 16];
        hints[0] = Some(3);
        hints[8] = Some(2);
        assert!(opposite_hints_fit(4, 0, &hints));
        assert!(!opposite_hints_fit(4, 1, &hints));
        hints[8] = Some(3);
        assert!(!opposite_hints_fit(4, 0, &hints));
    }

    #[test]
    fn test_dialects_share_counting() {
        let mut hints = vec![None; 16];
        hints[1] = Some(3);
        hints[9] = Some(2);
        assert!(Skyscrapers.are_hints_valid(4, &hints));
        assert!(ExtraBuilding.are_hints_valid(4, &hints));
        assert!(!Gaps.are_hints_valid(4, &hints));

        // The tallest building of an extra-building grid is N+1.
        let puzzle = empty_puzzle(Variant::ExtraBuilding, 4, &[(0, 2)]);
        let mut search = PuzzleSearch::new(&puzzle);
        ExtraBuilding.initial_conclusions(&mut search).unwrap();
        assert_eq!(excluded(&search, 0, 0), vec![5]);
        assert!(excluded(&search, 1, 0).is_empty());
    }

    #[test]
    fn test_bound_tallest_gaps() {
        let puzzle = empty_puzzle(Variant::Gaps, 6, &[(0, 4)]);
        let mut search = PuzzleSearch::new(&puzzle);
        Gaps.initial_conclusions(&mut search).unwrap();

        assert_eq!(excluded(&search, 0, 0), vec![3, 4, 5]);
        assert_eq!(excluded(&search, 1, 0), vec![4, 5]);
        assert_eq!(excluded(&search, 2, 0), vec![5]);
        assert!(excluded(&search, 3, 0).is_empty());
        assert!(excluded(&search, 0, 1).is_empty());
    }

    #[test]
    fn test_bound_tallest_from_right() {
        let puzzle = empty_puzzle(Variant::Skyscrapers, 4, &[(5, 3)]);
        let mut search = PuzzleSearch::new(&puzzle);
        Skyscrapers.initial_conclusions(&mut search).unwrap();

        // Row 1, looking in from the right.
        assert_eq!(excluded(&search, 1, 3), vec![3, 4]);
        assert_eq!(excluded(&search, 1, 2), vec![4]);
        assert!(excluded(&search, 1, 1).is_empty());
    }

    #[test]
    fn test_count_all_seen() {
        let puzzle = empty_puzzle(Variant::Skyscrapers, 4, &[(12, 4)]);
        let mut search = PuzzleSearch::new(&puzzle);
        Skyscrapers.mark_seen_and_unseen(&mut search, 12, 4).unwrap();

        for distance in 0..4 {
            assert_eq!(search.seen_from(12, distance), Visibility::Seen);
        }
    }

    #[test]
    fn test_count_rest_hidden() {
        let puzzle = empty_puzzle(Variant::Skyscrapers, 4, &[(0, 1)]);
        let mut search = PuzzleSearch::new(&puzzle);
        Skyscrapers.mark_seen_and_unseen(&mut search, 0, 1).unwrap();

        assert_eq!(search.seen_from(0, 0), Visibility::Seen);
        for distance in 1..4 {
            assert_eq!(search.seen_from(0, distance), Visibility::Hidden);
        }
    }

    #[test]
    fn test_seen_excludes_blocked_values() {
        let puzzle = empty_puzzle(Variant::Skyscrapers, 4, &[(0, 2)]);
        let mut search = PuzzleSearch::new(&puzzle);
        search.exclude_from(0, 0, 1).unwrap();
        search.set_seen_from(0, 1, true).unwrap();
        Skyscrapers.mark_cell_illegals(&mut search, 0, 2, 1).unwrap();

        // The cell in front is at least 2, so (1, 0) must beat it.
        assert_eq!(excluded(&search, 1, 0), vec![1, 2]);
        // And (0, 0) must stay below whatever (1, 0) can be.
        Skyscrapers.mark_cell_illegals(&mut search, 0, 2, 0).unwrap();
        assert_eq!(excluded(&search, 0, 0), vec![1, 4]);
    }

    #[test]
    fn test_hidden_excludes_unblockable_values() {
        let puzzle = empty_puzzle(Variant::Skyscrapers, 4, &[(0, 2)]);
        let mut search = PuzzleSearch::new(&puzzle);
        search.exclude_from(0, 0, 4).unwrap();
        search.set_seen_from(0, 1, false).unwrap();
        Skyscrapers.mark_cell_illegals(&mut search, 0, 2, 1).unwrap();

        assert_eq!(excluded(&search, 1, 0), vec![3, 4]);
    }

    #[test]
    fn test_hidden_next_to_hint() {
        let puzzle = empty_puzzle(Variant::Gaps, 5, &[(3, 2)]);
        let mut search = PuzzleSearch::new(&puzzle);
        search.set_seen_from(3, 0, false).unwrap();
        Gaps.mark_cell_illegals(&mut search, 3, 2, 0).unwrap();
        assert_eq!(search.cell(0, 3).value(), Some(0));
    }
}
