//! Pseudo-legal move generation, one pure function per piece kind.
//!
//! "Pseudo-legal" means geometrically valid and respecting occupancy, but
//! ignoring whether the mover's own king ends up attacked — that filtering
//! happens in [`crate::Game`]. Generators never mutate the board, and a
//! generator invoked on an empty square is a caller bug and panics.

use crate::board::Board;
use crate::types::{Color, Move, Piece, PieceKind, Position};

/// King step offsets: the 8 adjacent squares.
const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Knight jump offsets; never blocked by intervening pieces.
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
];

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (-1, 1), (-1, -1), (1, -1)];

const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, 1),
    (-1, -1),
    (1, -1),
];

// =========================================================================
// Dispatch
// =========================================================================

/// Pseudo-legal moves for the piece occupying `from`, dispatched by kind.
pub fn pseudo_legal_moves(board: &Board, from: Position) -> Vec<Move> {
    let generator: fn(&Board, Position) -> Vec<Move> = match occupant(board, from).kind {
        PieceKind::King => king_moves,
        PieceKind::Queen => queen_moves,
        PieceKind::Rook => rook_moves,
        PieceKind::Bishop => bishop_moves,
        PieceKind::Knight => knight_moves,
        PieceKind::Pawn => pawn_moves,
    };
    generator(board, from)
}

fn occupant(board: &Board, position: Position) -> Piece {
    match board.piece_at(position) {
        Some(piece) => piece,
        None => panic!("no piece to generate moves for on {position}"),
    }
}

// =========================================================================
// King
// =========================================================================

/// The 8 adjacent squares, plus castling candidates.
///
/// A castling candidate needs an unmoved king on its home square, an unmoved
/// same-color rook on the matching corner, and empty squares between them.
/// Whether the king starts in, passes through, or lands on an attacked square
/// is the legality filter's concern, not the generator's.
pub fn king_moves(board: &Board, from: Position) -> Vec<Move> {
    let king = occupant(board, from);
    let mut moves = step_moves(board, from, king.color, &KING_OFFSETS);

    let home = Position::new(king.color.home_row(), 5);
    if from == home && !board.has_moved(from) {
        // Kingside: rook on h, f and g clear. Queenside: rook on a, b-d clear.
        for (rook_column, king_to, between) in [(8, 7, &[6, 7][..]), (1, 3, &[2, 3, 4][..])] {
            let corner = Position::new(from.row, rook_column);
            let rook_ready = board.piece_at(corner)
                == Some(Piece::new(king.color, PieceKind::Rook))
                && !board.has_moved(corner);
            let path_clear = between
                .iter()
                .all(|&column| board.piece_at(Position::new(from.row, column)).is_none());
            if rook_ready && path_clear {
                moves.push(Move::new(from, Position::new(from.row, king_to)));
            }
        }
    }

    moves
}

// =========================================================================
// Knight
// =========================================================================

/// The 8 L-shaped jumps, filtered by bounds and own-color occupancy.
pub fn knight_moves(board: &Board, from: Position) -> Vec<Move> {
    let knight = occupant(board, from);
    step_moves(board, from, knight.color, &KNIGHT_OFFSETS)
}

// =========================================================================
// Sliders
// =========================================================================

/// Diagonal rays.
pub fn bishop_moves(board: &Board, from: Position) -> Vec<Move> {
    slider_moves(board, from, &BISHOP_DIRECTIONS)
}

/// Orthogonal rays.
pub fn rook_moves(board: &Board, from: Position) -> Vec<Move> {
    slider_moves(board, from, &ROOK_DIRECTIONS)
}

/// Orthogonal and diagonal rays.
pub fn queen_moves(board: &Board, from: Position) -> Vec<Move> {
    slider_moves(board, from, &QUEEN_DIRECTIONS)
}

// =========================================================================
// Pawn
// =========================================================================

/// Pushes, captures, en passant, and promotion expansion.
pub fn pawn_moves(board: &Board, from: Position) -> Vec<Move> {
    let pawn = occupant(board, from);
    let forward = pawn.color.forward();
    let (start_row, last_row) = match pawn.color {
        Color::White => (2, 8),
        Color::Black => (7, 1),
    };
    let mut moves = Vec::new();

    // Forward one if empty; forward two from the start rank if both squares
    // are empty. A double step never promotes, so it skips the expansion.
    let one = from.offset(forward, 0);
    if one.inside_board() && board.piece_at(one).is_none() {
        push_pawn_move(&mut moves, from, one, last_row);
        let two = from.offset(2 * forward, 0);
        if from.row == start_row && two.inside_board() && board.piece_at(two).is_none() {
            moves.push(Move::new(from, two));
        }
    }

    for d_column in [-1, 1] {
        // Diagonal capture only onto an opponent piece.
        let diagonal = from.offset(forward, d_column);
        if diagonal.inside_board()
            && board
                .piece_at(diagonal)
                .is_some_and(|other| other.color != pawn.color)
        {
            push_pawn_move(&mut moves, from, diagonal, last_row);
        }

        // En passant: the orthogonally adjacent square holds the opponent
        // pawn that just double-stepped; the capture lands behind it.
        let adjacent = from.offset(0, d_column);
        if adjacent.inside_board()
            && diagonal.inside_board()
            && board.en_passant_pawn() == Some(adjacent)
            && board.piece_at(adjacent) == Some(Piece::new(!pawn.color, PieceKind::Pawn))
        {
            moves.push(Move::new(from, diagonal));
        }
    }

    moves
}

/// Push a pawn move, expanding it into the four promotion variants when it
/// lands on the final rank.
fn push_pawn_move(moves: &mut Vec<Move>, from: Position, to: Position, last_row: i8) {
    if to.row == last_row {
        for promotion in PieceKind::PROMOTIONS {
            moves.push(Move::with_promotion(from, to, promotion));
        }
    } else {
        moves.push(Move::new(from, to));
    }
}

// =========================================================================
// Shared walkers
// =========================================================================

/// Fixed-offset moves (king steps, knight jumps): keep targets that are on
/// the board and not occupied by a same-color piece.
fn step_moves(board: &Board, from: Position, color: Color, offsets: &[(i8, i8)]) -> Vec<Move> {
    offsets
        .iter()
        .map(|&(d_row, d_column)| from.offset(d_row, d_column))
        .filter(|to| to.inside_board())
        .filter(|&to| board.piece_at(to).is_none_or(|other| other.color != color))
        .map(|to| Move::new(from, to))
        .collect()
}

/// Ray-cast along each direction: empty squares continue the ray, an
/// opponent piece is included as a capture and stops it, an own piece or the
/// board edge stops it outright.
fn slider_moves(board: &Board, from: Position, directions: &[(i8, i8)]) -> Vec<Move> {
    let mover = occupant(board, from);
    let mut moves = Vec::new();
    for &(d_row, d_column) in directions {
        let mut to = from.offset(d_row, d_column);
        while to.inside_board() {
            match board.piece_at(to) {
                None => moves.push(Move::new(from, to)),
                Some(other) => {
                    if other.color != mover.color {
                        moves.push(Move::new(from, to));
                    }
                    break;
                }
            }
            to = to.offset(d_row, d_column);
        }
    }
    moves
}

// =========================================================================
// Attack detection
// =========================================================================

/// Is `target` attacked by any piece of color `by`?
///
/// Probes attackers in reverse from the target: pawn capture diagonals,
/// knight and king offsets, then the first piece along each orthogonal and
/// diagonal ray. Equivalent to asking whether some pseudo-legal move of `by`
/// captures on `target`, except that pawn pushes — moves, not attacks — are
/// excluded, which matters when the target square is empty (castling paths).
pub fn attacks_square(board: &Board, target: Position, by: Color) -> bool {
    // A pawn of `by` attacks `target` from one row behind it.
    let behind = -by.forward();
    for d_column in [-1, 1] {
        let from = target.offset(behind, d_column);
        if from.inside_board() && board.piece_at(from) == Some(Piece::new(by, PieceKind::Pawn)) {
            return true;
        }
    }

    for (offsets, kind) in [
        (&KNIGHT_OFFSETS, PieceKind::Knight),
        (&KING_OFFSETS, PieceKind::King),
    ] {
        for &(d_row, d_column) in offsets {
            let from = target.offset(d_row, d_column);
            if from.inside_board() && board.piece_at(from) == Some(Piece::new(by, kind)) {
                return true;
            }
        }
    }

    slider_attacks(board, target, by, &ROOK_DIRECTIONS, PieceKind::Rook)
        || slider_attacks(board, target, by, &BISHOP_DIRECTIONS, PieceKind::Bishop)
}

/// Walk each ray outward from the target; the first occupied square decides.
fn slider_attacks(
    board: &Board,
    target: Position,
    by: Color,
    directions: &[(i8, i8)],
    kind: PieceKind,
) -> bool {
    for &(d_row, d_column) in directions {
        let mut from = target.offset(d_row, d_column);
        while from.inside_board() {
            if let Some(piece) = board.piece_at(from) {
                if piece.color == by && (piece.kind == kind || piece.kind == PieceKind::Queen) {
                    return true;
                }
                break;
            }
            from = from.offset(d_row, d_column);
        }
    }
    false
}

// =========================================================================
// Tests
// =========================================================================
