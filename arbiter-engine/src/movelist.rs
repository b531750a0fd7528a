//! Bounded move containers used in the Arbiter engine.
//!
//! Every list of moves in a chess position has a small known upper
//! bound, so fixed-capacity vectors on the stack are used throughout.

use arrayvec::ArrayVec;

use crate::coretypes::{Coordinate, Move, MAX_HISTORY, MAX_MOVES, MAX_PIECE_DESTS};

/// MoveList holds the legal moves of one side in one position, capped at
/// `MAX_MOVES`.
pub type MoveList = ArrayVec<Move, MAX_MOVES>;
/// DestList holds the pseudo-legal destinations of a single piece.
pub type DestList = ArrayVec<Coordinate, MAX_PIECE_DESTS>;
/// MoveHistory is the append-only record of the moves played in a game.
pub type MoveHistory = ArrayVec<Move, MAX_HISTORY>;
