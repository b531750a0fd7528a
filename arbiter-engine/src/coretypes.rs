//! The fundamental and simple types of `arbiter-engine`.

use std::fmt::{self, Display};
use std::ops::Not;
use std::str::FromStr;

use crate::error::{self, ErrorKind};

///////////////
// Constants //
///////////////
pub const NUM_FILES: usize = 8; // a, b, c, d, e, f, g, h
pub const NUM_RANKS: usize = 8; // 1, 2, 3, 4, 5, 6, 7, 8
pub const NUM_SQUARES: usize = NUM_FILES * NUM_RANKS;

// The max possible measured number of legal moves for any chess position.
pub const MAX_MOVES: usize = 218;

// The most destinations a single piece can have: a queen on a central square.
pub const MAX_PIECE_DESTS: usize = 27;

// The greatest number of plies supported for a game, 600 ply, or 300 moves.
// Supports exceptionally long games of 300 moves. If a game goes longer than
// this, expect a crash.
pub const MAX_HISTORY: usize = 600;

/////////////////////////
// Data and Structures //
/////////////////////////

/// Color can represent the color of a piece, or a player.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Color {
    White,
    Black,
}

/// The six chess piece kinds.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

/// A board coordinate as a (row, column) pair, each in 0-7.
/// Row 0 is White's back rank (rank 1 in algebraic notation).
/// Column 0 is the leftmost file from White's side (the 'a' file).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Coordinate {
    row: u8,
    col: u8,
}

/// A chess piece: its color and kind, whether it has moved, and the
/// coordinate of the square it currently occupies.
///
/// The coordinate is the piece's back-reference into the board. It is
/// only ever updated by `Board::place` and `Board::relocate`, which keep
/// it consistent with the square that actually holds the piece.
/// `has_moved` only matters for kings and rooks, where it gates castling.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Piece {
    pub(crate) color: Color,
    pub(crate) kind: PieceKind,
    pub(crate) has_moved: bool,
    pub(crate) coord: Coordinate,
}

/// Move
/// An immutable record of a single ply: where a piece moved from and to,
/// what it captured, and any special-move metadata.
///
/// A Move is a value: two moves with identical fields are equal.
/// Mutually exclusive flag combinations are rejected at construction.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Move {
    pub(crate) from: Coordinate,
    pub(crate) to: Coordinate,
    pub(crate) piece: Piece,
    pub(crate) captured: Option<Piece>,
    pub(crate) promotion: Option<PieceKind>,
    pub(crate) castling: bool,
    pub(crate) en_passant: bool,
}

/// The possible states of a chess game.
///
/// Only the first five states are ever derived by the engine. The three
/// draw variants are reserved: no code path currently produces them, as
/// draw-by-agreement, the 50-move rule and repetition detection are not
/// implemented.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum GameState {
    Ongoing,
    Check,
    CheckmateWhiteWins,
    CheckmateBlackWins,
    Stalemate,
    DrawAgreed,
    Draw50Move,
    DrawRepetition,
}

/// A participant in the game, identified by color.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Player {
    pub(crate) color: Color,
}

/////////////////////
// Implementations //
/////////////////////

impl Color {
    /// The row direction a pawn of this color advances in.
    pub const fn forward(&self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// The row this color's pawns start on, from which a double step is allowed.
    pub const fn pawn_start_row(&self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// The row this color's pawns must stand on to capture en passant.
    pub const fn en_passant_row(&self) -> u8 {
        match self {
            Color::White => 4,
            Color::Black => 3,
        }
    }

    /// The row where this color's pawns promote.
    pub const fn promotion_row(&self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl Not for &Color {
    type Output = Color;
    fn not(self) -> Self::Output {
        Color::not(*self)
    }
}

impl PieceKind {
    /// Standard English piece letter, 'N' for knight.
    pub const fn to_char(&self) -> char {
        match self {
            PieceKind::King => 'K',
            PieceKind::Queen => 'Q',
            PieceKind::Rook => 'R',
            PieceKind::Bishop => 'B',
            PieceKind::Knight => 'N',
            PieceKind::Pawn => 'P',
        }
    }
}

impl Coordinate {
    /// Create a Coordinate, checking that both indices are in 0-7.
    pub fn new(row: u8, col: u8) -> error::Result<Self> {
        if row as usize >= NUM_RANKS || col as usize >= NUM_FILES {
            Err((
                ErrorKind::CoordinateOutOfBounds,
                format!("row={row}, col={col}"),
            )
                .into())
        } else {
            Ok(Self { row, col })
        }
    }

    /// Create a Coordinate from indices already known to be in bounds.
    pub(crate) const fn at(row: u8, col: u8) -> Self {
        debug_assert!((row as usize) < NUM_RANKS && (col as usize) < NUM_FILES);
        Self { row, col }
    }

    pub const fn row(&self) -> u8 {
        self.row
    }

    pub const fn col(&self) -> u8 {
        self.col
    }

    /// Row-major index into a 64-element board array.
    pub(crate) const fn index(&self) -> usize {
        self.row as usize * NUM_FILES + self.col as usize
    }

    pub(crate) const fn from_index(index: usize) -> Self {
        debug_assert!(index < NUM_SQUARES);
        Self::at((index / NUM_FILES) as u8, (index % NUM_FILES) as u8)
    }

    /// The coordinate offset by (delta row, delta col), or None if the
    /// result falls off the board.
    pub fn offset(&self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        if (0..NUM_RANKS as i8).contains(&row) && (0..NUM_FILES as i8).contains(&col) {
            Some(Self::at(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Algebraic file letter, 'a' through 'h'.
    pub const fn file_char(&self) -> char {
        (b'a' + self.col) as char
    }

    /// Algebraic rank digit, '1' through '8'.
    pub const fn rank_char(&self) -> char {
        (b'1' + self.row) as char
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for Coordinate {
    type Err = error::Error;

    /// Parses algebraic notation, "a1" through "h8".
    fn from_str(s: &str) -> error::Result<Self> {
        let bytes = s.as_bytes();
        match bytes {
            [file @ b'a'..=b'h', rank @ b'1'..=b'8'] => {
                Ok(Self::at(rank - b'1', file - b'a'))
            }
            _ => Err((ErrorKind::ParseCoordinateMalformed, s).into()),
        }
    }
}

impl Piece {
    /// Create a new piece on the given square, with its moved flag unset.
    pub const fn new(color: Color, kind: PieceKind, coord: Coordinate) -> Self {
        Self {
            color,
            kind,
            has_moved: false,
            coord,
        }
    }

    pub const fn color(&self) -> Color {
        self.color
    }

    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    pub const fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// The coordinate of the square this piece currently occupies.
    pub const fn coord(&self) -> Coordinate {
        self.coord
    }

    pub(crate) fn set_moved(&mut self) {
        self.has_moved = true;
    }

    /// Piece letter, lowercased for black. Used for board rendering.
    pub const fn to_char(&self) -> char {
        match self.color {
            Color::White => self.kind.to_char(),
            Color::Black => self.kind.to_char().to_ascii_lowercase(),
        }
    }
}

impl Move {
    /// Create a standard move or capture.
    pub const fn new(from: Coordinate, to: Coordinate, piece: Piece, captured: Option<Piece>) -> Self {
        Self {
            from,
            to,
            piece,
            captured,
            promotion: None,
            castling: false,
            en_passant: false,
        }
    }

    /// Create a castling move for a king. The rook's relocation is a side
    /// effect of execution, not part of the record.
    pub const fn castle(from: Coordinate, to: Coordinate, piece: Piece) -> Self {
        Self {
            from,
            to,
            piece,
            captured: None,
            promotion: None,
            castling: true,
            en_passant: false,
        }
    }

    /// Create an en passant capture. The destination square is empty, so
    /// the captured field stays None; the victim pawn's removal is a side
    /// effect of execution.
    pub const fn en_passant(from: Coordinate, to: Coordinate, piece: Piece) -> Self {
        Self {
            from,
            to,
            piece,
            captured: None,
            promotion: None,
            castling: false,
            en_passant: true,
        }
    }

    /// Create a promotion move. Fails unless the moved piece is a pawn.
    pub fn promote(
        from: Coordinate,
        to: Coordinate,
        piece: Piece,
        captured: Option<Piece>,
        promote_to: PieceKind,
    ) -> error::Result<Self> {
        Self::with_flags(from, to, piece, captured, Some(promote_to), false, false)
    }

    /// Full constructor. Enforces the exclusivity invariants:
    /// castling excludes en passant and promotion, en passant excludes
    /// promotion, and only pawns may carry a promotion target.
    pub fn with_flags(
        from: Coordinate,
        to: Coordinate,
        piece: Piece,
        captured: Option<Piece>,
        promotion: Option<PieceKind>,
        castling: bool,
        en_passant: bool,
    ) -> error::Result<Self> {
        if castling && (en_passant || promotion.is_some()) {
            return Err((
                ErrorKind::MoveConflictingFlags,
                "castling move cannot be en passant or promotion",
            )
                .into());
        }
        if en_passant && promotion.is_some() {
            return Err((
                ErrorKind::MoveConflictingFlags,
                "en passant move cannot be a promotion",
            )
                .into());
        }
        if promotion.is_some() && piece.kind != PieceKind::Pawn {
            return Err(ErrorKind::MovePromotionNotPawn.into());
        }
        Ok(Self {
            from,
            to,
            piece,
            captured,
            promotion,
            castling,
            en_passant,
        })
    }

    pub const fn from(&self) -> Coordinate {
        self.from
    }

    pub const fn to(&self) -> Coordinate {
        self.to
    }

    /// The piece as it stood on the source square when the move was made.
    pub const fn piece(&self) -> &Piece {
        &self.piece
    }

    /// The piece that stood on the destination square, if any.
    /// None for en passant captures; the victim never occupies the
    /// destination square.
    pub const fn captured(&self) -> Option<&Piece> {
        self.captured.as_ref()
    }

    pub const fn promotion(&self) -> Option<PieceKind> {
        self.promotion
    }

    pub const fn is_castling(&self) -> bool {
        self.castling
    }

    pub const fn is_en_passant(&self) -> bool {
        self.en_passant
    }

    pub const fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

/// Renders basic algebraic notation: "O-O"/"O-O-O" for castling,
/// otherwise piece letter (omitted for pawns), capturing pawn's file and
/// "x" on captures, destination, and "=X" for promotions.
/// Check and checkmate suffixes are not rendered; they need game-state
/// context a Move does not have.
impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.castling {
            let notation = if self.to.col() > self.from.col() {
                "O-O"
            } else {
                "O-O-O"
            };
            return write!(f, "{notation}");
        }

        let mut s = String::new();
        if self.piece.kind != PieceKind::Pawn {
            s.push(self.piece.kind.to_char());
        }
        if self.is_capture() {
            if self.piece.kind == PieceKind::Pawn {
                s.push(self.from.file_char());
            }
            s.push('x');
        }
        s.push(self.to.file_char());
        s.push(self.to.rank_char());
        if let Some(promote_to) = self.promotion {
            s.push('=');
            s.push(promote_to.to_char());
        }
        write!(f, "{s}")
    }
}

impl GameState {
    /// True for states no further move can leave.
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, GameState::Ongoing | GameState::Check)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            GameState::Ongoing => "ongoing",
            GameState::Check => "check",
            GameState::CheckmateWhiteWins => "checkmate, white wins",
            GameState::CheckmateBlackWins => "checkmate, black wins",
            GameState::Stalemate => "stalemate",
            GameState::DrawAgreed => "draw by agreement",
            GameState::Draw50Move => "draw by fifty-move rule",
            GameState::DrawRepetition => "draw by repetition",
        }
    }
}

impl Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Player {
    pub const fn new(color: Color) -> Self {
        Self { color }
    }

    pub const fn color(&self) -> Color {
        self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn coord(s: &str) -> Coordinate {
        s.parse().unwrap()
    }

    #[test]
    fn logical_not_color() {
        assert_eq!(!Color::White, Color::Black);
        assert_eq!(!Color::Black, Color::White);
    }

    #[test]
    fn coordinate_bounds() {
        assert!(Coordinate::new(0, 0).is_ok());
        assert!(Coordinate::new(7, 7).is_ok());
        assert_eq!(
            Coordinate::new(8, 0).unwrap_err().kind(),
            ErrorKind::CoordinateOutOfBounds
        );
        assert_eq!(
            Coordinate::new(3, 9).unwrap_err().kind(),
            ErrorKind::CoordinateOutOfBounds
        );
    }

    #[test]
    fn coordinate_notation() {
        assert_eq!(Coordinate::new(0, 0).unwrap().to_string(), "a1");
        assert_eq!(Coordinate::new(3, 4).unwrap().to_string(), "e4");
        assert_eq!(Coordinate::new(7, 7).unwrap().to_string(), "h8");

        assert_eq!(coord("e4"), Coordinate::new(3, 4).unwrap());
        assert_eq!(coord("a1"), Coordinate::new(0, 0).unwrap());
        assert!("i1".parse::<Coordinate>().is_err());
        assert!("a9".parse::<Coordinate>().is_err());
        assert!("e44".parse::<Coordinate>().is_err());
        assert!("".parse::<Coordinate>().is_err());
    }

    #[test]
    fn coordinate_offset() {
        let e4 = coord("e4");
        assert_eq!(e4.offset(1, 0), Some(coord("e5")));
        assert_eq!(e4.offset(-1, -1), Some(coord("d3")));
        assert_eq!(coord("a1").offset(-1, 0), None);
        assert_eq!(coord("h8").offset(0, 1), None);
    }

    #[test]
    fn move_flag_invariants() {
        let pawn = Piece::new(Color::White, PieceKind::Pawn, coord("e7"));
        let king = Piece::new(Color::White, PieceKind::King, coord("e1"));

        // Castling excludes en passant and promotion.
        let err = Move::with_flags(
            coord("e1"),
            coord("g1"),
            king,
            None,
            None,
            true,
            true,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MoveConflictingFlags);
        let err = Move::with_flags(
            coord("e7"),
            coord("e8"),
            pawn,
            None,
            Some(PieceKind::Queen),
            true,
            false,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MoveConflictingFlags);

        // En passant excludes promotion.
        let err = Move::with_flags(
            coord("e7"),
            coord("d8"),
            pawn,
            None,
            Some(PieceKind::Queen),
            false,
            true,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MoveConflictingFlags);

        // Only pawns promote.
        let err = Move::promote(coord("e1"), coord("e2"), king, None, PieceKind::Queen)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MovePromotionNotPawn);

        // A plain promotion is fine.
        assert!(Move::promote(coord("e7"), coord("e8"), pawn, None, PieceKind::Queen).is_ok());
    }

    #[test]
    fn move_notation() {
        let w_pawn = Piece::new(Color::White, PieceKind::Pawn, coord("e2"));
        let w_knight = Piece::new(Color::White, PieceKind::Knight, coord("g1"));
        let w_king = Piece::new(Color::White, PieceKind::King, coord("e1"));
        let b_pawn = Piece::new(Color::Black, PieceKind::Pawn, coord("f3"));

        let quiet = Move::new(coord("e2"), coord("e4"), w_pawn, None);
        assert_eq!(quiet.to_string(), "e4");

        let knight_capture = Move::new(coord("g1"), coord("f3"), w_knight, Some(b_pawn));
        assert_eq!(knight_capture.to_string(), "Nxf3");

        let pawn_capture = Move::new(coord("e2"), coord("f3"), w_pawn, Some(b_pawn));
        assert_eq!(pawn_capture.to_string(), "exf3");

        let kingside = Move::castle(coord("e1"), coord("g1"), w_king);
        assert_eq!(kingside.to_string(), "O-O");
        let queenside = Move::castle(coord("e1"), coord("c1"), w_king);
        assert_eq!(queenside.to_string(), "O-O-O");

        // En passant carries no captured piece, so no "x" is rendered.
        let ep_pawn = Piece::new(Color::White, PieceKind::Pawn, coord("e5"));
        let ep = Move::en_passant(coord("e5"), coord("d6"), ep_pawn);
        assert_eq!(ep.to_string(), "d6");

        let promoting = Piece::new(Color::White, PieceKind::Pawn, coord("e7"));
        let promo =
            Move::promote(coord("e7"), coord("e8"), promoting, None, PieceKind::Queen).unwrap();
        assert_eq!(promo.to_string(), "e8=Q");
    }

    #[test]
    fn moves_are_values() {
        let pawn = Piece::new(Color::White, PieceKind::Pawn, coord("e2"));
        let a = Move::new(coord("e2"), coord("e4"), pawn, None);
        let b = Move::new(coord("e2"), coord("e4"), pawn, None);
        assert_eq!(a, b);

        let c = Move::new(coord("e2"), coord("e3"), pawn, None);
        assert_ne!(a, c);
    }

    #[test]
    fn terminal_states() {
        assert!(!GameState::Ongoing.is_terminal());
        assert!(!GameState::Check.is_terminal());
        assert!(GameState::CheckmateWhiteWins.is_terminal());
        assert!(GameState::CheckmateBlackWins.is_terminal());
        assert!(GameState::Stalemate.is_terminal());
    }
}
