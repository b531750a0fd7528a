//! Classic 8x8 square board representation.
//!
//! The board is an arena of 64 fixed squares created once at
//! construction. Pieces are relocated by rewriting the occupant slots of
//! the source and destination squares; the squares themselves never
//! move. `place` and `relocate` are the only operations that write
//! occupant slots, and both also update the occupant's own coordinate
//! back-reference, so the two sides of the bookkeeping cannot drift
//! apart.
//!
//! The board knows nothing about turn order or legality; it is a pure
//! grid.

use std::fmt::{self, Display};

use crate::coretypes::{Color, Coordinate, Piece, PieceKind, NUM_FILES, NUM_RANKS, NUM_SQUARES};

/// A board cell: a fixed coordinate plus a mutable occupant slot.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Square {
    coord: Coordinate,
    piece: Option<Piece>,
}

impl Square {
    pub const fn coord(&self) -> Coordinate {
        self.coord
    }

    pub const fn piece(&self) -> Option<&Piece> {
        self.piece.as_ref()
    }

    pub const fn is_empty(&self) -> bool {
        self.piece.is_none()
    }
}

/// The chessboard: 64 squares in row-major order, row 0 nearest White.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Board {
    squares: [Square; NUM_SQUARES],
}

impl Board {
    /// Create an empty board.
    pub fn empty() -> Self {
        let mut index = 0;
        let squares = [(); NUM_SQUARES].map(|_| {
            let square = Square {
                coord: Coordinate::from_index(index),
                piece: None,
            };
            index += 1;
            square
        });
        Self { squares }
    }

    /// A board with the standard 32-piece starting setup.
    /// All moved flags are unset.
    pub fn start_position() -> Self {
        const BACK_RANK: [PieceKind; NUM_FILES] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut board = Self::empty();
        for col in 0..NUM_FILES as u8 {
            let kind = BACK_RANK[col as usize];
            board.place(
                Some(Piece::new(Color::White, kind, Coordinate::at(0, col))),
                Coordinate::at(0, col),
            );
            board.place(
                Some(Piece::new(Color::White, PieceKind::Pawn, Coordinate::at(1, col))),
                Coordinate::at(1, col),
            );
            board.place(
                Some(Piece::new(Color::Black, PieceKind::Pawn, Coordinate::at(6, col))),
                Coordinate::at(6, col),
            );
            board.place(
                Some(Piece::new(Color::Black, kind, Coordinate::at(7, col))),
                Coordinate::at(7, col),
            );
        }
        board
    }

    pub fn square(&self, coord: Coordinate) -> &Square {
        &self.squares[coord.index()]
    }

    pub fn piece_at(&self, coord: Coordinate) -> Option<&Piece> {
        self.squares[coord.index()].piece.as_ref()
    }

    pub(crate) fn piece_at_mut(&mut self, coord: Coordinate) -> Option<&mut Piece> {
        self.squares[coord.index()].piece.as_mut()
    }

    pub fn is_empty(&self, coord: Coordinate) -> bool {
        self.squares[coord.index()].is_empty()
    }

    /// Unconditionally overwrite the occupant of a square.
    /// `place(None, coord)` clears the square. A placed piece's
    /// coordinate back-reference is set to the target square.
    pub fn place(&mut self, piece: Option<Piece>, coord: Coordinate) {
        let mut piece = piece;
        if let Some(ref mut piece) = piece {
            piece.coord = coord;
        }
        self.squares[coord.index()].piece = piece;
    }

    /// Move whatever occupies `from` into `to`, leaving `from` empty.
    /// Returns the displaced occupant of `to`, if any. The moved piece's
    /// coordinate back-reference is updated to `to`.
    pub fn relocate(&mut self, from: Coordinate, to: Coordinate) -> Option<Piece> {
        let moved = self.squares[from.index()].piece.take();
        let displaced = self.squares[to.index()].piece;
        self.place(moved, to);
        displaced
    }

    /// Walks the straight or diagonal line strictly between two
    /// coordinates, exclusive of both endpoints, and reports whether
    /// every intervening square is empty.
    ///
    /// `from == to` is not clear: a zero-length path is not a meaningful
    /// traversal. Coordinates that do not share a rank, file or diagonal
    /// have no line between them and are likewise not clear.
    pub fn is_path_clear(&self, from: Coordinate, to: Coordinate) -> bool {
        if from == to {
            return false;
        }
        let row_diff = to.row() as i8 - from.row() as i8;
        let col_diff = to.col() as i8 - from.col() as i8;
        if row_diff != 0 && col_diff != 0 && row_diff.abs() != col_diff.abs() {
            return false;
        }

        let step = (row_diff.signum(), col_diff.signum());
        let mut current = from;
        loop {
            current = match current.offset(step.0, step.1) {
                Some(next) => next,
                None => return false,
            };
            if current == to {
                return true;
            }
            if !self.is_empty(current) {
                return false;
            }
        }
    }

    /// Iterate over all 64 squares in row-major order.
    pub fn squares(&self) -> impl Iterator<Item = &Square> {
        self.squares.iter()
    }

    /// Apply a candidate move to the board, evaluate the resulting
    /// position, then restore the board to its exact prior state.
    ///
    /// Occupant slots are moved raw, without touching coordinate
    /// back-references, so writing the saved values back restores the
    /// board bit for bit. The closure shape guarantees every exit path
    /// runs the restore.
    pub(crate) fn with_move_applied<R>(
        &mut self,
        from: Coordinate,
        to: Coordinate,
        en_passant_victim: Option<Coordinate>,
        eval: impl FnOnce(&Board) -> R,
    ) -> R {
        let saved_from = self.squares[from.index()].piece;
        let saved_to = self.squares[to.index()].piece;
        let saved_victim = en_passant_victim.map(|coord| self.squares[coord.index()].piece);

        if let Some(victim) = en_passant_victim {
            self.squares[victim.index()].piece = None;
        }
        self.squares[to.index()].piece = saved_from;
        self.squares[from.index()].piece = None;

        let result = eval(self);

        self.squares[from.index()].piece = saved_from;
        self.squares[to.index()].piece = saved_to;
        if let (Some(victim), Some(saved)) = (en_passant_victim, saved_victim) {
            self.squares[victim.index()].piece = saved;
        }
        result
    }
}

impl Default for Board {
    /// The default board is the standard starting position.
    fn default() -> Self {
        Self::start_position()
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in (0..NUM_RANKS as u8).rev() {
            write!(f, "{} ", row + 1)?;
            for col in 0..NUM_FILES as u8 {
                let ch = match self.piece_at(Coordinate::at(row, col)) {
                    Some(piece) => piece.to_char(),
                    None => '.',
                };
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        write!(f, "\n   a b c d e f g h")
    }
}
