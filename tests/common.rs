use skyline_solver::{Board, Puzzle, Val, Variant};

/// Unknown cell or absent hint.
pub const X: Val = Val::MAX;

fn known(val: Val) -> Option<Val> {
    if val == X {
        None
    } else {
        Some(val)
    }
}

#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Build a puzzle from rows of values and a perimeter of hints, where
/// `X` marks an unknown.
#[allow(dead_code)]
pub fn make_puzzle(variant: Variant, grid: &[Vec<Val>], hints: &[Val]) -> Puzzle {
    let grid = grid
        .iter()
        .map(|row| row.iter().copied().map(known).collect())
        .collect::<Vec<_>>();
    let hints = hints.iter().copied().map(known).collect::<Vec<_>>();
    Puzzle::new(variant, &grid, &hints).expect("valid puzzle")
}

/// An empty grid of the given size.
#[allow(dead_code)]
pub fn empty_grid(size: usize) -> Vec<Vec<Val>> {
    vec![vec![X; size]; size]
}

#[allow(dead_code)]
pub fn print_board(puzzle: &Puzzle, board: &Board) {
    println!("{}", puzzle.draw(board));
}

/// Every row and column holds distinct values in `lowest..=highest`.
#[allow(dead_code)]
pub fn verify_lines(board: &[Vec<Val>], lowest: Val, highest: Val) {
    let size = board.len();
    for idx in 0..size {
        let row = board[idx].clone();
        let col = board.iter().map(|row| row[idx]).collect::<Vec<_>>();
        for line in [row, col].iter() {
            let mut sorted = line.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), size, "repeated value in {:?}", line);
            assert!(sorted.iter().all(|&val| lowest <= val && val <= highest));
        }
    }
}

/// The cells of each perimeter line, nearest first, in hint order.
#[allow(dead_code)]
pub fn lines_from_hints(board: &[Vec<Val>]) -> Vec<Vec<Val>> {
    let size = board.len();
    let mut lines = Vec::with_capacity(4 * size);
    for col in 0..size {
        lines.push((0..size).map(|row| board[row][col]).collect());
    }
    for row in 0..size {
        lines.push((0..size).rev().map(|col| board[row][col]).collect());
    }
    for col in 0..size {
        lines.push((0..size).rev().map(|row| board[row][col]).collect());
    }
    for row in 0..size {
        lines.push(board[row].clone());
    }
    lines
}

/// The heights visible along a line: each one taller than all in front.
#[allow(dead_code)]
pub fn visible(line: &[Val]) -> Vec<Val> {
    let mut tallest = 0;
    let mut seen = Vec::new();
    for &val in line {
        if val > tallest {
            tallest = val;
            seen.push(val);
        }
    }
    seen
}

/// Every present hint counts the buildings visible from its position.
#[allow(dead_code)]
pub fn verify_counts(board: &[Vec<Val>], hints: &[Val]) {
    for (idx, line) in lines_from_hints(board).iter().enumerate() {
        if hints[idx] != X {
            assert_eq!(visible(line).len(), hints[idx], "hint {} on {:?}", idx, line);
        }
    }
}

/// Every present hint names a height visible from its position.
#[allow(dead_code)]
pub fn verify_heights(board: &[Vec<Val>], hints: &[Val]) {
    for (idx, line) in lines_from_hints(board).iter().enumerate() {
        if hints[idx] != X {
            assert!(visible(line).contains(&hints[idx]), "hint {} on {:?}", idx, line);
        }
    }
}
