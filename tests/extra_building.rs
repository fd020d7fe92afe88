//! Skyscrapers with an extra building: heights 1..=N+1, one of them
//! missing from every row and column.

mod common;

use common::*;
use skyline_solver::*;

fn make_extra(grid: &[Vec<Val>], hints: &[Val]) -> Puzzle {
    make_puzzle(Variant::ExtraBuilding, grid, hints)
}

#[test]
fn extra_building_grid1() {
    init_logger();
    let hints = vec![
        X, X, X, X, X,
        5, 5, 3, 3, X,
        4, X, 3, 1, X,
        X, X, X, 3, X,
    ];

    let sys = make_extra(&empty_grid(5), &hints);
    let expected = vec![
        vec![6, 5, 4, 3, 2],
        vec![5, 4, 3, 2, 1],
        vec![3, 1, 6, 5, 4],
        vec![1, 2, 5, 4, 3],
        vec![2, 3, 1, 6, 5],
    ];

    let board = sys.solve().unique().expect("solution");
    print_board(&sys, board);

    let filled = board.filled().expect("complete board");
    assert_eq!(filled, expected);
    verify_lines(&filled, 1, 6);
    verify_counts(&filled, &hints);
    println!("extra_building_grid1: {} guesses", sys.num_guesses());
}

#[test]
fn extra_building_hints_and_givens() {
    let mut grid = empty_grid(6);
    grid[2][5] = 1;
    grid[4][5] = 4;
    let mut hints = vec![X; 24];
    hints[..6].copy_from_slice(&[6, 6, 5, 4, 3, 2]);
    hints[16] = 4;
    hints[23] = 2;

    let sys = make_extra(&grid, &hints);
    let expected = vec![
        vec![1, 2, 3, 4, 5, 6],
        vec![2, 3, 4, 5, 6, 7],
        vec![3, 4, 5, 6, 7, 1],
        vec![4, 5, 6, 7, 3, 2],
        vec![5, 6, 7, 1, 2, 4],
        vec![6, 7, 2, 3, 1, 5],
    ];

    let board = sys.solve().unique().expect("solution");
    let filled = board.filled().expect("complete board");
    assert_eq!(filled, expected);
    verify_counts(&filled, &hints);
    println!("extra_building_hints_and_givens: {} guesses", sys.num_guesses());
}

#[test]
fn extra_building_unsolvable() {
    let hints = vec![
        2, X, X, X, X,
        5, 5, 3, 3, X,
        4, X, 3, 1, X,
        X, X, X, 3, X,
    ];
    let sys = make_extra(&empty_grid(5), &hints);
    assert!(sys.solve().is_unsolvable());

    let mut grid = empty_grid(6);
    grid[0][0] = 5;
    let mut hints = vec![X; 24];
    hints[0] = 4;
    let sys = make_extra(&grid, &hints);
    assert!(sys.solve().is_unsolvable());
}

#[test]
fn extra_building_ambiguous() {
    let sys = make_extra(&empty_grid(6), &vec![X; 24]);
    assert!(sys.solve().is_multiple());
}
