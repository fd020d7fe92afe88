//! The puzzle's state and the solving engine.

use bit_set::BitSet;
use log::{debug, trace, warn};
use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

use crate::cell::Cell;
use crate::{Board, Error, Perimeter, PsResult, Rules, Side, Solution, Val, Variant, Visibility};

/// The puzzle to be solved.
pub struct Puzzle {
    // The width and height of the grid.
    size: usize,

    // The rules of the puzzle dialect.
    rules: Rc<dyn Rules>,

    // The values given as part of the problem.
    givens: Board,

    // The perimeter hints, clockwise from the top left corner.
    hints: Vec<Option<Val>>,

    // The cells facing each hint, ordered by distance.
    lines: Vec<Line>,

    // The cells of every row, followed by those of every column.
    units: Vec<Vec<usize>>,

    // The state of every cell before any deduction.
    cells: Vec<Cell>,

    // The number of guesses to solve the puzzle.
    num_guesses: std::cell::Cell<u32>,

    // The solution, once found.
    solution: OnceCell<Solution>,
}

/// The cells seen from one hint.
struct Line {
    side: Side,
    cells: Vec<usize>,
}

/// Intermediate puzzle search state.
#[derive(Clone)]
pub struct PuzzleSearch<'a> {
    puzzle: &'a Puzzle,
    cells: Vec<Cell>,
}

/*--------------------------------------------------------------*/

impl Puzzle {
    /// Allocate a new puzzle of one of the built-in dialects.
    ///
    /// The grid holds the given values, and the hints are listed
    /// clockwise: top (left to right), right (top to bottom), bottom
    /// (left to right), left (top to bottom).
    ///
    /// # Examples
    ///
    /// ```
    /// use skyline_solver::{Puzzle, Variant};
    ///
    /// let grid = vec![vec![None; 4]; 4];
    /// let mut hints = vec![None; 16];
    /// hints[0] = Some(4);
    ///
    /// let puzzle = Puzzle::new(Variant::Skyscrapers, &grid, &hints).unwrap();
    /// assert_eq!(puzzle.size(), 4);
    /// ```
    pub fn new(variant: Variant, grid: &[Vec<Option<Val>>], hints: &[Option<Val>]) -> PsResult<Self> {
        Self::build(variant.rules(), grid, hints)
    }

    /// Allocate a new puzzle following custom rules.
    pub fn with_rules<R>(rules: R, grid: &[Vec<Option<Val>>], hints: &[Option<Val>]) -> PsResult<Self>
    where
        R: Rules + 'static,
    {
        Self::build(Rc::new(rules), grid, hints)
    }

    fn build(rules: Rc<dyn Rules>, grid: &[Vec<Option<Val>>], hints: &[Option<Val>]) -> PsResult<Self> {
        let size = grid.len();
        if size == 0 {
            return Err(Error::EmptyGrid);
        }
        if let Some((row, values)) = grid.iter().enumerate().find(|(_, values)| values.len() != size) {
            return Err(Error::NotSquare {
                row,
                len: values.len(),
                size,
            });
        }

        let givens = Board::new(size, grid.iter().flatten().copied().collect());
        Self::assemble(rules, givens, hints.to_vec())
    }

    fn assemble(rules: Rc<dyn Rules>, givens: Board, hints: Vec<Option<Val>>) -> PsResult<Self> {
        let size = givens.size();
        let perimeter = Perimeter::new(size);

        if hints.len() != perimeter.num_hints() {
            return Err(Error::HintCount {
                expected: perimeter.num_hints(),
                got: hints.len(),
            });
        }

        let max = rules.max_hint(size);
        for (index, hint) in hints.iter().enumerate() {
            if let Some(value) = *hint {
                if value < 1 || value > max {
                    return Err(Error::HintOutOfRange { index, value, max });
                }
            }
        }

        let lines = (0..perimeter.num_hints())
            .map(|hint| {
                let side = perimeter.side(hint)?;
                let cells = (0..size)
                    .map(|distance| {
                        perimeter
                            .cell_at_distance(hint, distance)
                            .map(|(row, col)| row * size + col)
                    })
                    .collect::<PsResult<Vec<_>>>()?;
                Ok(Line { side, cells })
            })
            .collect::<PsResult<Vec<_>>>()?;

        let units = (0..size)
            .map(|row| (0..size).map(|col| row * size + col).collect::<Vec<_>>())
            .chain((0..size).map(|col| (0..size).map(|row| row * size + col).collect::<Vec<_>>()))
            .collect::<Vec<Vec<usize>>>();

        let lowest = rules.lowest();
        let highest = rules.highest(size);
        let mut cells = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                let mut cell = Cell::new(lowest, highest);

                // Without empty lots nothing stands between an edge cell and its hint.
                if rules.empty_cells() == 0 {
                    let edges = [row == 0, col == size - 1, row == size - 1, col == 0];
                    for (&side, on_edge) in Side::ALL.iter().zip(edges) {
                        if on_edge {
                            cell.set_seen_from(side, true)?;
                        }
                    }
                }

                if let Some(value) = givens.get(row, col) {
                    if value < lowest || value > highest {
                        return Err(Error::GivenOutOfRange { row, col, value });
                    }
                    cell.set_value(value)?;
                }

                cells.push(cell);
            }
        }

        Ok(Puzzle {
            size,
            rules,
            givens,
            hints,
            lines,
            units,
            cells,
            num_guesses: std::cell::Cell::new(0),
            solution: OnceCell::new(),
        })
    }

    /// Allocate the same puzzle with other hints.
    pub(crate) fn with_hints(&self, hints: Vec<Option<Val>>) -> PsResult<Puzzle> {
        Self::assemble(Rc::clone(&self.rules), self.givens.clone(), hints)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn hints(&self) -> &[Option<Val>] {
        &self.hints
    }

    /// Get the values given as part of the problem.
    pub fn givens(&self) -> &Board {
        &self.givens
    }

    /// Solve the puzzle, deciding whether it has zero, one or several
    /// solutions.  The result is computed once and cached.
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
    /// let puzzle = Puzzle::new(Variant::Skyscrapers, &grid, &[None; 12]).unwrap();
    ///
    /// let solution = puzzle.solve();
    /// assert!(solution.is_unique());
    /// assert!(std::ptr::eq(solution, puzzle.solve()));
    /// ```
    pub fn solve(&self) -> &Solution {
        self.solution.get_or_init(|| self.search())
    }

    fn search(&self) -> Solution {
        self.num_guesses.set(0);

        let mut search = PuzzleSearch::new(self);
        if let Err(err) = search.settle() {
            debug!("no solution: {}", err);
            return Solution::Unsolvable;
        }
        if search.is_complete() {
            debug!("solved without guessing");
            return Solution::Unique(search.board());
        }

        let snapshot = search.clone();
        let ascending = match search.guess(true) {
            Ok(completed) => completed,
            Err(err) => {
                debug!("no solution after guessing: {}", err);
                return Solution::Unsolvable;
            }
        };

        let mut reverse = snapshot.clone();
        let descending = match reverse.guess(false) {
            Ok(completed) => completed,
            Err(err) => {
                debug!("no solution after guessing downwards: {}", err);
                return Solution::Unsolvable;
            }
        };

        if ascending != descending {
            panic!("guessing upwards and downwards disagree on completing the grid");
        }

        let first = search.board();
        let second = reverse.board();
        if !ascending {
            debug!("guessing could not complete the grid");
            return Solution::Multiple(first, second);
        }
        if first != second {
            debug!("guessing upwards and downwards found different grids");
            return Solution::Multiple(first, second);
        }

        match snapshot.find_alternate_solution(&search) {
            Some(other) => {
                debug!("found another solution after {} guesses", self.num_guesses());
                Solution::Multiple(first, other.board())
            }
            None => {
                debug!("unique solution after {} guesses", self.num_guesses());
                Solution::Unique(first)
            }
        }
    }

    /// Take any obvious non-choices, using the rules to eliminate
    /// candidates.  Stops when it must start guessing.
    /// Primarily for testing.
    ///
    /// Returns the intermediate puzzle search state, or None if a
    /// contradiction was found.
    pub fn step(&self) -> Option<PuzzleSearch<'_>> {
        let mut search = PuzzleSearch::new(self);
        if search.settle().is_ok() {
            return Some(search);
        }

        None
    }

    /// Get the number of guesses taken to solve the puzzle.
    pub fn num_guesses(&self) -> u32 {
        self.num_guesses.get()
    }
}

/*--------------------------------------------------------------*/

impl<'a> PuzzleSearch<'a> {
    /// Allocate a new puzzle searcher.
    pub(crate) fn new(puzzle: &'a Puzzle) -> Self {
        PuzzleSearch {
            puzzle,
            cells: puzzle.cells.clone(),
        }
    }

    pub fn size(&self) -> usize {
        self.puzzle.size
    }

    pub fn num_hints(&self) -> usize {
        self.puzzle.lines.len()
    }

    pub fn hint(&self, hint: usize) -> Option<Val> {
        self.puzzle.hints[hint]
    }

    pub fn lowest(&self) -> Val {
        self.puzzle.rules.lowest()
    }

    pub fn highest(&self) -> Val {
        self.puzzle.rules.highest(self.puzzle.size)
    }

    pub fn empty_cells(&self) -> usize {
        self.puzzle.rules.empty_cells()
    }

    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        &self.cells[row * self.puzzle.size + col]
    }

    /// Get the cell at a distance from a hint.
    pub fn cell_from(&self, hint: usize, distance: usize) -> &Cell {
        &self.cells[self.puzzle.lines[hint].cells[distance]]
    }

    /// Get the visibility of a cell from the side of a hint.
    pub fn seen_from(&self, hint: usize, distance: usize) -> Visibility {
        let line = &self.puzzle.lines[hint];
        self.cells[line.cells[distance]].seen(line.side)
    }

    pub fn set_seen_from(&mut self, hint: usize, distance: usize, seen: bool) -> PsResult<()> {
        let puzzle = self.puzzle;
        let line = &puzzle.lines[hint];
        self.cells[line.cells[distance]].set_seen_from(line.side, seen)
    }

    pub fn exclude_from(&mut self, hint: usize, distance: usize, val: Val) -> PsResult<()> {
        let idx = self.puzzle.lines[hint].cells[distance];
        self.cells[idx].exclude(val)
    }

    pub fn set_value_from(&mut self, hint: usize, distance: usize, val: Val) -> PsResult<()> {
        let idx = self.puzzle.lines[hint].cells[distance];
        self.cells[idx].set_value(val)
    }

    /// Get the largest lower bound and the largest upper bound of the
    /// cells standing between a hint and the given distance.
    pub fn bounds_in_front(&self, hint: usize, distance: usize) -> (Val, Val) {
        (0..distance)
            .map(|d| self.cell_from(hint, d))
            .fold((0, 0), |(lower, upper), cell| {
                (lower.max(cell.min_candidate()), upper.max(cell.max_candidate()))
            })
    }

    pub fn count_filled(&self) -> usize {
        self.cells.iter().filter(|cell| cell.value().is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|cell| cell.value().is_some())
    }

    /// Get the current value of every cell.
    pub fn board(&self) -> Board {
        Board::new(self.puzzle.size, self.cells.iter().map(Cell::value).collect())
    }

    /// Check the given values and the hints for obvious conflicts.
    pub fn validate(&self) -> PsResult<()> {
        bool_to_result(
            self.are_values_unique(),
            "a value repeats in a row or column",
        )?;
        bool_to_result(
            self.puzzle.rules.are_hints_valid(self.puzzle.size, &self.puzzle.hints),
            "opposite hints cannot both hold",
        )
    }

    /// Propagate until a pass fills no further cell.
    pub fn propagate(&mut self) -> PsResult<()> {
        let rules = Rc::clone(&self.puzzle.rules);
        let mut filled = self.count_filled();

        loop {
            self.propagate_once(&*rules)?;

            let now = self.count_filled();
            if now <= filled {
                return Ok(());
            }
            filled = now;
        }
    }

    /// Try to complete the grid by guessing, in ascending or descending
    /// order of the candidates.  Returns whether the grid is complete.
    ///
    /// A guess is only kept if it completes the grid.  Guesses that
    /// lead to a contradiction are excluded.
    pub fn guess(&mut self, ascending: bool) -> PsResult<bool> {
        let mut knowledge = None;

        while !self.is_complete() && knowledge != Some(self.knowledge()) {
            knowledge = Some(self.knowledge());
            for idx in 0..self.cells.len() {
                if self.cells[idx].value().is_none() {
                    self.guess_cell(idx, ascending)?;
                }
            }
        }

        Ok(self.is_complete())
    }

    fn settle(&mut self) -> PsResult<()> {
        self.validate()?;
        self.propagate()
    }

    fn propagate_once(&mut self, rules: &dyn Rules) -> PsResult<()> {
        rules.initial_conclusions(self)?;
        self.exclude_clashing_values()?;
        if rules.must_all_values_appear() {
            self.fill_only_possible_locations()?;
        }

        for hint in 0..self.num_hints() {
            self.mark_general_seen_and_unseen(hint)?;
            if let Some(value) = self.hint(hint) {
                rules.mark_seen_and_unseen(self, hint, value)?;
            }
        }

        for hint in 0..self.num_hints() {
            if let Some(value) = self.hint(hint) {
                for distance in 0..self.size() {
                    rules.mark_cell_illegals(self, hint, value, distance)?;
                }
            }
        }

        rules.specific_rules(self)?;

        bool_to_result(
            self.can_units_be_filled(),
            "not enough candidates to fill a row or column",
        )?;
        bool_to_result(
            self.are_values_unique(),
            "a value repeats in a row or column",
        )
    }

    /// A value excludes itself from the rest of its row and column.  Once
    /// a line has all its empty lots, no other cell there can be empty.
    fn exclude_clashing_values(&mut self) -> PsResult<()> {
        let puzzle = self.puzzle;
        let quota = self.empty_cells();

        for unit in puzzle.units.iter() {
            for &idx in unit {
                match self.cells[idx].value() {
                    Some(0) | None => (),
                    Some(val) => {
                        for &other in unit {
                            if other != idx {
                                self.cells[other].exclude(val)?;
                            }
                        }
                    }
                }
            }

            let empty = unit
                .iter()
                .filter(|&&idx| self.cells[idx].value() == Some(0))
                .count();
            if empty > quota {
                return Err(Error::Contradiction("too many empty lots in a row or column"));
            }
            if empty > 0 && empty == quota {
                for &idx in unit {
                    if self.cells[idx].value() != Some(0) {
                        self.cells[idx].exclude(0)?;
                    }
                }
            }
        }

        Ok(())
    }

    /// Place each value in the only cell of a line that can still hold
    /// it.
    fn fill_only_possible_locations(&mut self) -> PsResult<()> {
        let puzzle = self.puzzle;
        let quota = self.empty_cells();
        let mut filled = self.count_filled();

        loop {
            for val in self.lowest()..=self.highest() {
                for unit in puzzle.units.iter() {
                    let spots = unit
                        .iter()
                        .copied()
                        .filter(|&idx| self.cells[idx].has_candidate(val))
                        .collect::<Vec<_>>();

                    if val > 0 {
                        match spots.len() {
                            0 => return Err(Error::Contradiction("a value has no place in a line")),
                            1 => self.cells[spots[0]].set_value(val)?,
                            _ => (),
                        }
                    } else if spots.len() < quota {
                        return Err(Error::Contradiction("too few cells can be left empty"));
                    } else if spots.len() == quota {
                        for idx in spots {
                            self.cells[idx].set_value(0)?;
                        }
                    }
                }
            }

            let now = self.count_filled();
            if now <= filled {
                return Ok(());
            }
            filled = now;
        }
    }

    /// Visibility that follows from the candidates alone.
    fn mark_general_seen_and_unseen(&mut self, hint: usize) -> PsResult<()> {
        if !self.cell_from(hint, 0).has_candidate(0) {
            self.set_seen_from(hint, 0, true)?;
        }

        for distance in 1..self.size() {
            let (lower, _) = self.bounds_in_front(hint, distance);
            if lower >= self.cell_from(hint, distance).max_candidate() {
                self.set_seen_from(hint, distance, false)?;
            }

            let (_, upper) = self.bounds_in_front(hint, distance);
            if upper <= self.cell_from(hint, distance).min_candidate() {
                self.set_seen_from(hint, distance, true)?;
            }
        }

        Ok(())
    }

    /// Check that every line can still muster enough distinct values.
    fn can_units_be_filled(&self) -> bool {
        let needed = self.size() - self.empty_cells().saturating_sub(1);

        self.puzzle.units.iter().all(|unit| {
            let mut values = BitSet::new();
            for &idx in unit {
                values.extend(self.cells[idx].candidates());
            }
            values.len() >= needed
        })
    }

    fn are_values_unique(&self) -> bool {
        let quota = self.empty_cells();

        self.puzzle.units.iter().all(|unit| {
            let mut values = BitSet::new();
            let mut empty = 0;
            for &idx in unit {
                match self.cells[idx].value() {
                    Some(0) => empty += 1,
                    Some(val) => {
                        if !values.insert(val) {
                            return false;
                        }
                    }
                    None => (),
                }
            }
            empty <= quota
        })
    }

    /// Try the candidates of one cell.  The first one that completes the
    /// grid is kept.
    fn guess_cell(&mut self, idx: usize, ascending: bool) -> PsResult<()> {
        let mut values = self.cells[idx].candidates().collect::<Vec<_>>();
        if !ascending {
            values.reverse();
        }

        for val in values {
            let num_guesses = self.puzzle.num_guesses.get() + 1;
            self.puzzle.num_guesses.set(num_guesses);

            let mut new = self.clone();
            match new.assign(idx, val) {
                Ok(()) if new.is_complete() => {
                    *self = new;
                    return Ok(());
                }
                Ok(()) => (),
                Err(err) => {
                    trace!("cell {} cannot be {}: {}", idx, val, err);
                    self.cells[idx].exclude(val)?;
                }
            }
        }

        Ok(())
    }

    /// Assign a cell (given by index) to a value.
    fn assign(&mut self, idx: usize, val: Val) -> PsResult<()> {
        self.cells[idx].set_value(val)?;
        self.propagate()
    }

    /// Look for a completion of this state that differs from the
    /// baseline in some cell.
    fn find_alternate_solution(&self, baseline: &PuzzleSearch) -> Option<PuzzleSearch<'a>> {
        for idx in 0..self.cells.len() {
            if self.cells[idx].value().is_some() {
                continue;
            }
            let val = match baseline.cells[idx].value() {
                Some(val) => val,
                None => continue,
            };

            let mut probe = self.clone();
            if probe.cells[idx].exclude(val).is_err() {
                continue;
            }

            match probe.guess(true) {
                Ok(true) => return Some(probe),
                Ok(false) => warn!("could not complete the grid without {} at cell {}", val, idx),
                Err(err) => trace!("cell {} must be {}: {}", idx, val, err),
            }
        }

        None
    }

    fn knowledge(&self) -> usize {
        self.cells.iter().map(Cell::knowledge).sum()
    }
}

impl fmt::Debug for PuzzleSearch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "PuzzleSearch={{")?;
        for (idx, cell) in self.cells.iter().enumerate() {
            writeln!(f)?;

            let (row, col) = (idx / self.puzzle.size, idx % self.puzzle.size);
            match cell.value() {
                Some(val) => {
                    write!(f, "  cell ({}, {}): {}", row, col, val)?;
                }
                None => {
                    write!(f, "  cell ({}, {}):", row, col)?;
                    for val in cell.candidates() {
                        write!(f, " {}", val)?;
                    }
                }
            }
        }
        write!(f, "}}")?;
        Ok(())
    }
}

fn bool_to_result(cond: bool, reason: &'static str) -> PsResult<()> {
    if cond {
        Ok(())
    } else {
        Err(Error::Contradiction(reason))
    }
}
