use std::fmt;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// The two sides in a chess game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Index for array lookups: White=0, Black=1.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Pawn push direction along the row axis: +1 for White, -1 for Black.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// The rank this side's king and rooks start on (1 or 8).
    #[inline]
    pub const fn home_row(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => 8,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

// ---------------------------------------------------------------------------
// PieceKind
// ---------------------------------------------------------------------------

/// The six piece kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// All piece kinds in order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// The four kinds a pawn may promote to.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    /// Single uppercase letter for white, lowercase for black.
    pub fn to_char(self, color: Color) -> char {
        let c = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parse a piece character: uppercase = white, lowercase = black.
    pub fn from_char(c: char) -> Option<(Color, PieceKind)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some((color, kind))
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceKind::Pawn => write!(f, "pawn"),
            PieceKind::Knight => write!(f, "knight"),
            PieceKind::Bishop => write!(f, "bishop"),
            PieceKind::Rook => write!(f, "rook"),
            PieceKind::Queen => write!(f, "queen"),
            PieceKind::King => write!(f, "king"),
        }
    }
}

// ---------------------------------------------------------------------------
// Piece
// ---------------------------------------------------------------------------

/// An immutable piece value: a color and a kind.
///
/// Movement history (castling eligibility, the en-passant window) lives in
/// side tables on [`crate::Board`], not here, so two pieces compare equal
/// whenever color and kind match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Piece { color, kind }
    }

    /// Board-rendering character: uppercase white, lowercase black.
    #[inline]
    pub fn to_char(self) -> char {
        self.kind.to_char(self.color)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.kind)
    }
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A board coordinate: `row` 1..=8 bottom-up (rank), `column` 1..=8
/// left-to-right from White's view (file 'a' = 1).
///
/// Offset arithmetic may produce out-of-range values; those are legitimate
/// transients and must be rejected with [`Position::inside_board`] before the
/// position is used to index a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: i8,
    pub column: i8,
}

impl Position {
    #[inline]
    pub const fn new(row: i8, column: i8) -> Self {
        Position { row, column }
    }

    /// Is this position on the 8×8 board?
    #[inline]
    pub const fn inside_board(self) -> bool {
        self.row >= 1 && self.row <= 8 && self.column >= 1 && self.column <= 8
    }

    /// The position displaced by `(d_row, d_column)`; may land off the board.
    #[inline]
    pub const fn offset(self, d_row: i8, d_column: i8) -> Self {
        Position {
            row: self.row + d_row,
            column: self.column + d_column,
        }
    }

    /// Parse algebraic notation like "e4".
    pub fn from_algebraic(s: &str) -> Result<Self, ChessError> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(ChessError::OutOfRange { row: 0, column: 0 });
        }
        let column = bytes[0].wrapping_sub(b'a') as i8 + 1;
        let row = bytes[1].wrapping_sub(b'1') as i8 + 1;
        let pos = Position { row, column };
        if pos.inside_board() {
            Ok(pos)
        } else {
            Err(ChessError::OutOfRange { row, column })
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inside_board() {
            let file = (b'a' + (self.column - 1) as u8) as char;
            write!(f, "{}{}", file, self.row)
        } else {
            write!(f, "({},{})", self.row, self.column)
        }
    }
}

// ---------------------------------------------------------------------------
// Move
// ---------------------------------------------------------------------------

/// A chess move: start square, end square, and the promotion kind for a pawn
/// reaching the final rank (absent otherwise).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub promotion: Option<PieceKind>,
}

impl Move {
    #[inline]
    pub const fn new(from: Position, to: Position) -> Self {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    #[inline]
    pub const fn with_promotion(from: Position, to: Position, promotion: PieceKind) -> Self {
        Move {
            from,
            to,
            promotion: Some(promotion),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promo) = self.promotion {
            write!(f, "={}", promo.to_char(Color::Black))?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ChessError
// ---------------------------------------------------------------------------

/// Domain errors surfaced to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ChessError {
    #[error("position ({row}, {column}) is off the board")]
    OutOfRange { row: i8, column: i8 },

    #[error("illegal move {from} -> {to}: {reason}")]
    IllegalMove {
        from: Position,
        to: Position,
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
