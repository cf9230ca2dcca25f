//! Turn orchestration and the legality filter.
//!
//! `Game` owns the board and the side to move. It narrows pseudo-legal
//! generator output down to legal moves by replaying each candidate on a
//! scratch copy of the board and testing king safety, applies chosen moves
//! with all special-move side effects, and answers the check, checkmate, and
//! stalemate queries.

use std::fmt;

use crate::board::Board;
use crate::movegen;
use crate::types::{ChessError, Color, Move, Piece, PieceKind, Position};

// =========================================================================
// GameStatus
// =========================================================================

/// Condition of the side to move, derived on demand — never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Active,
    Check,
    Checkmate,
    Stalemate,
}

impl GameStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            GameStatus::Active => "active",
            GameStatus::Check => "check",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
        }
    }

    pub fn is_game_over(self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Stalemate)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =========================================================================
// Game
// =========================================================================

/// A chess game: one board plus whose turn it is.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    turn: Color,
}

impl Game {
    /// A fresh game: standard setup, White to move.
    pub fn new() -> Self {
        Game {
            board: Board::standard(),
            turn: Color::White,
        }
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    /// The current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Replace the board. The turn resets to White.
    pub fn set_board(&mut self, board: Board) {
        tracing::debug!("board replaced, turn reset to white");
        self.board = board;
        self.turn = Color::White;
    }

    /// The side to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Override the side to move (useful when probing constructed positions).
    pub fn set_turn(&mut self, color: Color) {
        self.turn = color;
    }

    // -----------------------------------------------------------------
    // Legal moves
    // -----------------------------------------------------------------

    /// Legal moves for the piece on `from`, regardless of whose turn it is;
    /// `None` when the square is empty or off the board.
    ///
    /// A pseudo-legal candidate survives iff replaying it — with every
    /// special-move side effect — on a scratch copy of the board leaves the
    /// mover's king unattacked. Castling additionally requires the king to
    /// be out of check now and the square it passes over to be safe.
    pub fn valid_moves(&self, from: Position) -> Option<Vec<Move>> {
        if !from.inside_board() {
            return None;
        }
        let piece = self.board.piece_at(from)?;
        let moves = movegen::pseudo_legal_moves(&self.board, from)
            .into_iter()
            .filter(|&mv| self.is_legal(piece, mv))
            .collect();
        Some(moves)
    }

    fn is_legal(&self, piece: Piece, mv: Move) -> bool {
        let enemy = !piece.color;

        if is_castling(piece, mv) {
            // Castling out of or through check is forbidden; landing in
            // check falls out of the simulation below.
            let passed = Position::new(mv.from.row, (mv.from.column + mv.to.column) / 2);
            if movegen::attacks_square(&self.board, mv.from, enemy)
                || movegen::attacks_square(&self.board, passed, enemy)
            {
                return false;
            }
        }

        let mut scratch = self.board.clone();
        apply_to_board(&mut scratch, mv);
        !in_check_on(&scratch, piece.color)
    }

    /// Does any piece of `color` have a legal move?
    fn has_any_legal_move(&self, color: Color) -> bool {
        self.board
            .pieces()
            .filter(|&(_, piece)| piece.color == color)
            .any(|(pos, _)| self.valid_moves(pos).is_some_and(|moves| !moves.is_empty()))
    }

    // -----------------------------------------------------------------
    // Check / checkmate / stalemate
    // -----------------------------------------------------------------

    /// Is `color`'s king attacked on the current board? Independent of whose
    /// turn it is; a board without that king is not in check.
    pub fn is_in_check(&self, color: Color) -> bool {
        in_check_on(&self.board, color)
    }

    /// In check with no legal move for any piece of `color` — escaping,
    /// blocking, and capturing the checker all count as outs.
    pub fn is_in_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && !self.has_any_legal_move(color)
    }

    /// Not in check, yet no piece of `color` has a legal move.
    pub fn is_in_stalemate(&self, color: Color) -> bool {
        !self.is_in_check(color) && !self.has_any_legal_move(color)
    }

    /// Condition of the side to move.
    pub fn status(&self) -> GameStatus {
        let in_check = self.is_in_check(self.turn);
        if !self.has_any_legal_move(self.turn) {
            if in_check {
                GameStatus::Checkmate
            } else {
                GameStatus::Stalemate
            }
        } else if in_check {
            GameStatus::Check
        } else {
            GameStatus::Active
        }
    }

    // -----------------------------------------------------------------
    // Apply move
    // -----------------------------------------------------------------

    /// Play a move for the side to move.
    ///
    /// Rejects moves from an empty square, out-of-turn moves, and anything
    /// absent from [`Game::valid_moves`]. On success the board mutates —
    /// including en-passant victim removal, the castling rook shift,
    /// promotion substitution, and history-flag updates — and the turn
    /// passes to the other side.
    pub fn apply_move(&mut self, mv: Move) -> Result<(), ChessError> {
        for end in [mv.from, mv.to] {
            if !end.inside_board() {
                return Err(ChessError::OutOfRange {
                    row: end.row,
                    column: end.column,
                });
            }
        }

        let piece = self
            .board
            .piece_at(mv.from)
            .ok_or_else(|| ChessError::IllegalMove {
                from: mv.from,
                to: mv.to,
                reason: "no piece on the starting square".into(),
            })?;

        if piece.color != self.turn {
            return Err(ChessError::IllegalMove {
                from: mv.from,
                to: mv.to,
                reason: format!("it is {}'s turn", self.turn),
            });
        }

        let legal = self.valid_moves(mv.from).unwrap_or_default();
        if !legal.contains(&mv) {
            return Err(ChessError::IllegalMove {
                from: mv.from,
                to: mv.to,
                reason: "not a legal move".into(),
            });
        }

        apply_to_board(&mut self.board, mv);
        self.turn = !self.turn;
        tracing::debug!(%mv, %piece, next = %self.turn, "move applied");
        Ok(())
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// Board-level move application (shared by play and simulation)
// =========================================================================

fn is_castling(piece: Piece, mv: Move) -> bool {
    piece.kind == PieceKind::King && (mv.to.column - mv.from.column).abs() == 2
}

/// Replay a move's full effect on a board: captures (en passant included),
/// the paired rook shift for castling, promotion substitution, moved flags,
/// and the en-passant window. No legality checks — callers validate first,
/// and an unreplayable move is a logic bug that fails loudly.
fn apply_to_board(board: &mut Board, mv: Move) {
    let piece = board
        .piece_at(mv.from)
        .expect("applying a move from an empty square");

    // En passant: a pawn moving diagonally onto an empty square captures the
    // pawn it passed, not the destination square's occupant.
    if piece.kind == PieceKind::Pawn
        && mv.from.column != mv.to.column
        && board.piece_at(mv.to).is_none()
    {
        board.remove(Position::new(mv.from.row, mv.to.column));
    }

    // Castling: relocate the paired rook (h→f or a→d on the king's rank).
    if is_castling(piece, mv) {
        let (rook_from, rook_to) = if mv.to.column == 7 { (8, 6) } else { (1, 4) };
        let rook = board
            .remove(Position::new(mv.from.row, rook_from))
            .expect("castling without a rook");
        board.place(Position::new(mv.from.row, rook_to), rook);
        board.mark_moved(Position::new(mv.from.row, rook_to));
    }

    board.remove(mv.from);
    board.place(mv.to, Piece::new(piece.color, mv.promotion.unwrap_or(piece.kind)));
    board.mark_moved(mv.to);

    // The en-passant window closes for every pawn, then reopens only for a
    // mover that just advanced two squares.
    let double_step = piece.kind == PieceKind::Pawn && (mv.to.row - mv.from.row).abs() == 2;
    board.set_en_passant_pawn(double_step.then_some(mv.to));
}

fn find_king(board: &Board, color: Color) -> Option<Position> {
    board
        .pieces()
        .find(|&(_, piece)| piece == Piece::new(color, PieceKind::King))
        .map(|(pos, _)| pos)
}

fn in_check_on(board: &Board, color: Color) -> bool {
    find_king(board, color).is_some_and(|king| movegen::attacks_square(board, king, !color))
}

// =========================================================================
// Tests
// =========================================================================
