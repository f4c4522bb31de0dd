//! Tests for board reconstruction and evaluation.

use versus_tictactoe::{
    Board, Coord, GameStatus, PlacedMove, Player, Square, derive_player, evaluate,
};

fn placed(cells: &[(u8, u8)]) -> Vec<PlacedMove> {
    cells
        .iter()
        .enumerate()
        .map(|(i, (x, y))| PlacedMove::new(i as u32 + 1, Coord::at(*x, *y)))
        .collect()
}

/// Cell-by-cell simulation kept deliberately naive.
fn simulate(starting: Player, cells: &[(u8, u8)]) -> [[char; 3]; 3] {
    let mut grid = [['.'; 3]; 3];
    let mut player = starting;
    for (x, y) in cells {
        grid[*y as usize][*x as usize] = if player == Player::X { 'X' } else { 'O' };
        player = player.opponent();
    }
    grid
}

fn as_chars(board: &Board) -> [[char; 3]; 3] {
    let mut grid = [['.'; 3]; 3];
    for (y, row) in board.rows().iter().enumerate() {
        for (x, sq) in row.iter().enumerate() {
            grid[y][x] = match sq {
                Square::Empty => '.',
                Square::Occupied(Player::X) => 'X',
                Square::Occupied(Player::O) => 'O',
            };
        }
    }
    grid
}

#[test]
fn test_reconstruct_from_history() {
    let moves = placed(&[(0, 0), (1, 1), (2, 2)]);
    let board = Board::reconstruct(Player::O, moves);
    assert_eq!(as_chars(&board), [['O', '.', '.'], ['.', 'X', '.'], ['.', '.', 'O']]);
}

#[test]
fn test_reconstruct_matches_naive_simulation() {
    let histories: [&[(u8, u8)]; 4] = [
        &[],
        &[(1, 1)],
        &[(0, 0), (2, 0), (1, 0), (0, 1), (2, 2)],
        &[(0, 0), (1, 0), (2, 0), (1, 1), (0, 1), (0, 2), (2, 1), (2, 2), (1, 2)],
    ];
    for starting in [Player::X, Player::O] {
        for cells in histories {
            let board = Board::reconstruct(starting, placed(cells));
            assert_eq!(as_chars(&board), simulate(starting, cells));
            // Replaying again gives the same board.
            assert_eq!(board, Board::reconstruct(starting, placed(cells)));
        }
    }
}

#[test]
fn test_reconstructed_cells_belong_to_derived_player() {
    let moves = placed(&[(2, 0), (0, 2), (1, 1)]);
    let board = Board::reconstruct(Player::X, moves.clone());
    for m in moves {
        assert_eq!(board.get(m.coord), Square::Occupied(derive_player(Player::X, m.number)));
    }
}

#[test]
fn test_column_win_scenario() {
    let board = Board::reconstruct(Player::X, placed(&[(0, 0), (1, 1), (0, 1), (2, 2), (0, 2)]));
    assert_eq!(evaluate(&board), GameStatus::XWins);
}

#[test]
fn test_nine_moves_without_line_is_draw() {
    // X O X / X O O / O X X
    let board = Board::reconstruct(
        Player::X,
        placed(&[(0, 0), (1, 0), (2, 0), (1, 1), (0, 1), (2, 1), (1, 2), (0, 2), (2, 2)]),
    );
    assert!(board.empty_cells().is_empty());
    assert_eq!(evaluate(&board), GameStatus::Draw);
}

#[test]
fn test_board_serializes_as_rows_of_symbols() {
    let board = Board::reconstruct(Player::O, placed(&[(2, 0), (0, 1)]));
    let json = serde_json::to_value(&board).expect("serialize");
    assert_eq!(
        json,
        serde_json::json!([[".", ".", "O"], ["X", ".", "."], [".", ".", "."]])
    );
}
