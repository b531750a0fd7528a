//! The top-level game session.
//!
//! `Game` owns the board, the two players, the turn order, the move
//! history, and the derived game state. Moves enter through
//! `make_move`, which validates, executes, records, passes the turn,
//! and re-derives the state, in that order. A rejected move changes
//! nothing.

use crate::board::Board;
use crate::coretypes::{Color, Coordinate, GameState, Move, Piece, PieceKind, Player, NUM_SQUARES};
use crate::error::{self, ErrorKind};
use crate::movegen::pseudo_legal_moves;
use crate::movelist::{MoveHistory, MoveList};
use crate::validator::{is_castling_attempt, is_king_in_check, is_move_legal};

/// Promotion targets, in the order promotion moves are expanded.
const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// A complete chess game: position, players, history and derived state.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    players: [Player; 2],
    current: usize,
    state: GameState,
    history: MoveHistory,
}

impl Game {
    /// A fresh game from the standard starting position, White to move.
    pub fn new() -> Self {
        Self {
            board: Board::start_position(),
            players: [Player::new(Color::White), Player::new(Color::Black)],
            current: 0,
            state: GameState::Ongoing,
            history: MoveHistory::new(),
        }
    }

    /// Reset this session to a fresh game. The players stay.
    pub fn start_game(&mut self) {
        self.board = Board::start_position();
        self.current = 0;
        self.state = GameState::Ongoing;
        self.history.clear();
    }

    /// Build a game from an arbitrary position with the given side to
    /// move. The history is empty, so en passant is never available in
    /// the opening position of such a game. The state is derived
    /// immediately and may already be terminal.
    pub fn from_setup(board: Board, to_move: Color) -> Self {
        let mut game = Self {
            board,
            players: [Player::new(Color::White), Player::new(Color::Black)],
            current: match to_move {
                Color::White => 0,
                Color::Black => 1,
            },
            state: GameState::Ongoing,
            history: MoveHistory::new(),
        };
        game.update_state();
        game
    }

    /// Play a sequence of moves from the starting position. Fails on the
    /// first illegal move.
    pub fn replay(moves: &[Move]) -> error::Result<Self> {
        let mut game = Self::new();
        for mv in moves {
            if !game.make_move(*mv) {
                return Err((
                    ErrorKind::GameIllegalMove,
                    format!("illegal move {} at ply {}", mv, game.history.len() + 1),
                )
                    .into());
            }
        }
        Ok(game)
    }

    /// Attempt to play a move for the current player. Returns whether
    /// the move was accepted; a rejected move leaves the game untouched.
    ///
    /// No move is accepted once the state is terminal.
    pub fn make_move(&mut self, mv: Move) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        let mover = self.current_color();
        if !is_move_legal(&mv, &mut self.board, mover, &self.history) {
            return false;
        }

        self.execute_move(&mv);
        self.history.push(mv);
        self.current = 1 - self.current;
        self.update_state();
        true
    }

    /// Apply an already-validated move to the board, including its
    /// special-move side effects.
    fn execute_move(&mut self, mv: &Move) {
        let mover = mv.piece().color();

        // En passant removes the victim pawn from beside the source
        // square before the capturing pawn relocates.
        if mv.is_en_passant() {
            let victim = Coordinate::at(mv.from().row(), mv.to().col());
            self.board.place(None, victim);
        }

        // Castling brings the rook across first and marks it moved.
        if mv.is_castling() {
            let row = mv.from().row();
            let (rook_from, rook_to) = if mv.to().col() > mv.from().col() {
                (Coordinate::at(row, 7), Coordinate::at(row, 5))
            } else {
                (Coordinate::at(row, 0), Coordinate::at(row, 3))
            };
            self.board.relocate(rook_from, rook_to);
            if let Some(rook) = self.board.piece_at_mut(rook_to) {
                rook.set_moved();
            }
        }

        self.board.relocate(mv.from(), mv.to());

        // Promotion replaces the arrived pawn outright. Generation
        // always supplies a target; a bare pawn move onto the last row
        // defaults to a queen. A promoted rook is marked moved so it
        // can never castle.
        let promote_to = mv.promotion().or_else(|| {
            (mv.piece().kind() == PieceKind::Pawn && mv.to().row() == mover.promotion_row())
                .then_some(PieceKind::Queen)
        });
        if let Some(kind) = promote_to {
            let mut piece = Piece::new(mover, kind, mv.to());
            if kind == PieceKind::Rook {
                piece.set_moved();
            }
            self.board.place(Some(piece), mv.to());
        }

        // Kings and rooks lose castling rights after their first move.
        if let Some(piece) = self.board.piece_at_mut(mv.to()) {
            if matches!(piece.kind(), PieceKind::King | PieceKind::Rook) {
                piece.set_moved();
            }
        }
    }

    /// Every fully legal move available to `color` in the current
    /// position. Promotions appear once per target kind; castling and en
    /// passant moves carry their flags set, ready for `make_move`.
    pub fn legal_moves(&mut self, color: Color) -> MoveList {
        let mut moves = MoveList::new();

        for index in 0..NUM_SQUARES {
            let from = Coordinate::from_index(index);
            let piece = match self.board.piece_at(from) {
                Some(piece) if piece.color() == color => *piece,
                _ => continue,
            };

            for to in pseudo_legal_moves(&self.board, &piece, from) {
                let captured = self.board.piece_at(to).copied();
                let candidate =
                    if piece.kind() == PieceKind::Pawn && from.col() != to.col() && captured.is_none() {
                        Move::en_passant(from, to, piece)
                    } else {
                        Move::new(from, to, piece, captured)
                    };

                if piece.kind() == PieceKind::Pawn && to.row() == color.promotion_row() {
                    // A pawn reaching the last row must promote; the one
                    // destination expands into four moves.
                    for kind in PROMOTION_KINDS {
                        let promo = Move::promote(from, to, piece, captured, kind)
                            .expect("promotion moves are only built for pawns");
                        if is_move_legal(&promo, &mut self.board, color, &self.history) {
                            moves.push(promo);
                        }
                    }
                } else if is_move_legal(&candidate, &mut self.board, color, &self.history) {
                    moves.push(candidate);
                }
            }

            // Castling is probed directly; it is not a pseudo-legal
            // destination of the king.
            if piece.kind() == PieceKind::King {
                for d_col in [2i8, -2] {
                    if let Some(to) = from.offset(0, d_col) {
                        let candidate = Move::castle(from, to, piece);
                        if is_castling_attempt(&candidate)
                            && is_move_legal(&candidate, &mut self.board, color, &self.history)
                        {
                            moves.push(candidate);
                        }
                    }
                }
            }
        }

        moves
    }

    /// Re-derive the game state for the player now to move.
    fn update_state(&mut self) {
        let color = self.current_color();
        let in_check = is_king_in_check(&self.board, color);
        let no_moves = self.legal_moves(color).is_empty();

        self.state = match (in_check, no_moves) {
            (true, true) => match color {
                Color::White => GameState::CheckmateBlackWins,
                Color::Black => GameState::CheckmateWhiteWins,
            },
            (false, true) => GameState::Stalemate,
            (true, false) => GameState::Check,
            (false, false) => GameState::Ongoing,
        };
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    pub fn current_color(&self) -> Color {
        self.players[self.current].color()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// The moves played so far, in order.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn is_check(&self) -> bool {
        self.state == GameState::Check
    }

    pub fn is_checkmate(&self) -> bool {
        matches!(
            self.state,
            GameState::CheckmateWhiteWins | GameState::CheckmateBlackWins
        )
    }

    pub fn is_stalemate(&self) -> bool {
        self.state == GameState::Stalemate
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
