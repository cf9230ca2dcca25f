//! Perft — exhaustive move-count correctness suite.
//!
//! Each test checks that the number of leaf nodes at a given depth matches
//! known-correct values. A wrong count at any depth means a bug in move
//! generation, legality filtering, or move application.
//!
//! Reference: <https://www.chessprogramming.org/Perft_Results>

use chess_rules::{Board, Color, Game, Move, Piece, PieceKind, Position};

fn sq(name: &str) -> Position {
    Position::from_algebraic(name).unwrap()
}

fn game_with(pieces: &[(&str, Color, PieceKind)]) -> Game {
    let mut board = Board::empty();
    for &(name, color, kind) in pieces {
        board.place(sq(name), Piece::new(color, kind));
    }
    let mut game = Game::new();
    game.set_board(board);
    game
}

/// All legal moves for the side to move.
fn side_moves(game: &Game) -> Vec<Move> {
    game.board()
        .pieces()
        .filter(|&(_, piece)| piece.color == game.turn())
        .flat_map(|(pos, _)| game.valid_moves(pos).unwrap())
        .collect()
}

/// Recursive perft: count leaf nodes at `depth`.
fn perft(game: &Game, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = side_moves(game);
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0u64;
    for mv in moves {
        let mut child = game.clone();
        child
            .apply_move(mv)
            .unwrap_or_else(|e| panic!("generated move {mv} must apply: {e}"));
        nodes += perft(&child, depth - 1);
    }
    nodes
}

// =====================================================================
// Position 1 — starting position
// =====================================================================

#[test]
fn perft_start_depth_1() {
    assert_eq!(perft(&Game::new(), 1), 20);
}

#[test]
fn perft_start_depth_2() {
    assert_eq!(perft(&Game::new(), 2), 400);
}

#[test]
fn perft_start_depth_3() {
    assert_eq!(perft(&Game::new(), 3), 8_902);
}

#[test]
fn perft_start_depth_4() {
    assert_eq!(perft(&Game::new(), 4), 197_281);
}

// =====================================================================
// Castling position — back ranks cleared down to rooks and kings
// =====================================================================

fn castling_position() -> Game {
    let mut game = Game::new();
    let mut board = Board::standard();
    for column in [2, 3, 4, 6, 7] {
        board.remove(Position::new(1, column));
        board.remove(Position::new(8, column));
    }
    game.set_board(board);
    game
}

#[test]
fn perft_castling_depth_1() {
    // 16 pawn moves, 5 rook moves, 2 king steps, both castles.
    assert_eq!(perft(&castling_position(), 1), 25);
}

#[test]
fn perft_castling_depth_2() {
    // The halves cannot interact yet, so Black mirrors all 25 replies.
    assert_eq!(perft(&castling_position(), 2), 625);
}

// =====================================================================
// Position 3 — rook endgame with pins, en passant, and a cornered king
// =====================================================================

fn position_3() -> Game {
    game_with(&[
        ("a5", Color::White, PieceKind::King),
        ("b5", Color::White, PieceKind::Pawn),
        ("b4", Color::White, PieceKind::Rook),
        ("e2", Color::White, PieceKind::Pawn),
        ("g2", Color::White, PieceKind::Pawn),
        ("c7", Color::Black, PieceKind::Pawn),
        ("d6", Color::Black, PieceKind::Pawn),
        ("f4", Color::Black, PieceKind::Pawn),
        ("h5", Color::Black, PieceKind::Rook),
        ("h4", Color::Black, PieceKind::King),
    ])
}

#[test]
fn perft_pos3_depth_1() {
    assert_eq!(perft(&position_3(), 1), 14);
}

#[test]
fn perft_pos3_depth_2() {
    assert_eq!(perft(&position_3(), 2), 191);
}

#[test]
fn perft_pos3_depth_3() {
    assert_eq!(perft(&position_3(), 3), 2_812);
}

#[test]
fn perft_pos3_depth_4() {
    assert_eq!(perft(&position_3(), 4), 43_238);
}
