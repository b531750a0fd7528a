//! Move legality checking.
//!
//! A candidate move passes through a series of gates: the game must not
//! be over (checked by the game, which owns the state), the move's piece
//! snapshot must match the actual occupant of the source square, the
//! piece must belong to the player whose turn it is, the destination
//! must be pseudo-legal for the piece, any special-move preconditions
//! must hold, and the mover's own king must not be left in check afterwards. The
//! last gate is decided by applying the move to the board, probing the
//! resulting position, and restoring the board exactly.
//!
//! The board is borrowed mutably only for the duration of the self-check
//! probe; a move that fails any earlier gate never touches it.

use crate::board::Board;
use crate::coretypes::{Color, Coordinate, Move, PieceKind};
use crate::movegen::pseudo_legal_moves;

/// Decide whether a move is fully legal for `mover` in the current
/// position, given the moves played so far.
///
/// The history is consulted only for en passant, whose legality depends
/// on the immediately preceding move.
pub fn is_move_legal(mv: &Move, board: &mut Board, mover: Color, history: &[Move]) -> bool {
    // The move's piece is a value snapshot. It must agree field for
    // field with the piece actually standing on the source square, or
    // the later gates would judge a position that does not exist:
    // a cleared moved flag would re-open castling, and an empty source
    // square would execute as a phantom relocation.
    if board.piece_at(mv.from()) != Some(mv.piece()) {
        return false;
    }
    if mv.piece().color() != mover {
        return false;
    }

    // Special moves may bypass the plain pseudo-legal list; their
    // destinations are not always enumerated by it.
    let dests = pseudo_legal_moves(board, mv.piece(), mv.from());
    if !dests.contains(&mv.to())
        && !is_castling_attempt(mv)
        && !is_en_passant_attempt(mv, board)
    {
        return false;
    }

    if is_castling_attempt(mv) {
        if !is_castling_legal(mv, board, mover) {
            return false;
        }
    } else if is_en_passant_attempt(mv, board) && !is_en_passant_legal(mv, history) {
        return false;
    }

    !leaves_king_in_check(mv, board, mover)
}

/// True if any piece of `attacker` could capture on `target` right now.
///
/// Pawns are handled directly instead of through their pseudo-legal
/// destinations, which include quiet forward steps that are not attacks
/// and omit diagonal threats onto empty squares.
pub fn is_square_attacked(target: Coordinate, board: &Board, attacker: Color) -> bool {
    for square in board.squares() {
        let piece = match square.piece() {
            Some(piece) if piece.color() == attacker => piece,
            _ => continue,
        };
        let from = square.coord();

        if piece.kind() == PieceKind::Pawn {
            let row_reached = from.row() as i8 + attacker.forward();
            let col_diff = (target.col() as i8 - from.col() as i8).abs();
            if target.row() as i8 == row_reached && col_diff == 1 {
                return true;
            }
            continue;
        }

        if pseudo_legal_moves(board, piece, from).contains(&target) {
            return true;
        }
    }
    false
}

/// True if `color`'s king currently stands on a square attacked by the
/// opponent.
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    is_square_attacked(find_king(board, color), board, !color)
}

/// Locate the king of the given color.
///
/// Panics if no such king exists: every reachable position has both
/// kings, so a missing one means the board was corrupted.
fn find_king(board: &Board, color: Color) -> Coordinate {
    board
        .squares()
        .find(|square| {
            matches!(square.piece(), Some(piece)
                if piece.kind() == PieceKind::King && piece.color() == color)
        })
        .map(|square| square.coord())
        .unwrap_or_else(|| panic!("no {:?} king on board: game state is corrupted", color))
}

/// A king moving two columns sideways is read as a castling attempt.
/// No other legal king move spans two columns.
pub fn is_castling_attempt(mv: &Move) -> bool {
    mv.piece().kind() == PieceKind::King
        && mv.from().row() == mv.to().row()
        && (mv.to().col() as i8 - mv.from().col() as i8).abs() == 2
}

/// Castling preconditions: the king is not in check, neither the king
/// nor the chosen rook has moved, the squares between them are empty,
/// and no square the king crosses or lands on is attacked.
fn is_castling_legal(mv: &Move, board: &Board, mover: Color) -> bool {
    let king = mv.piece();
    if king.kind() != PieceKind::King || king.has_moved() {
        return false;
    }
    if is_king_in_check(board, mover) {
        return false;
    }

    let row = mv.from().row();
    let kingside = mv.to().col() > mv.from().col();
    let rook_coord = Coordinate::at(row, if kingside { 7 } else { 0 });
    match board.piece_at(rook_coord) {
        Some(rook)
            if rook.kind() == PieceKind::Rook
                && rook.color() == mover
                && !rook.has_moved() => {}
        _ => return false,
    }

    if !board.is_path_clear(mv.from(), rook_coord) {
        return false;
    }

    // The king's transit squares, source through destination inclusive.
    let step = if kingside { 1 } else { -1i8 };
    let mut col = mv.from().col() as i8;
    loop {
        if is_square_attacked(Coordinate::at(row, col as u8), board, !mover) {
            return false;
        }
        if col as u8 == mv.to().col() {
            return true;
        }
        col += step;
    }
}

/// A pawn stepping diagonally onto an empty square is read as an en
/// passant attempt. An ordinary diagonal pawn move always captures an
/// occupant.
pub(crate) fn is_en_passant_attempt(mv: &Move, board: &Board) -> bool {
    mv.piece().kind() == PieceKind::Pawn
        && mv.from().col() != mv.to().col()
        && board.is_empty(mv.to())
}

/// En passant is legal only immediately after the victim pawn's double
/// step: the last move in the history must be an opposing pawn advancing
/// two rows, ending beside the capturing pawn, and the capture must land
/// on the square that pawn skipped.
fn is_en_passant_legal(mv: &Move, history: &[Move]) -> bool {
    let last = match history.last() {
        Some(last) => last,
        None => return false,
    };
    let mover = mv.piece().color();

    if last.piece().kind() != PieceKind::Pawn || last.piece().color() == mover {
        return false;
    }
    let row_diff = (last.to().row() as i8 - last.from().row() as i8).abs();
    if row_diff != 2 {
        return false;
    }
    if last.to().row() != mv.from().row() {
        return false;
    }
    let col_diff = (last.to().col() as i8 - mv.from().col() as i8).abs();
    if col_diff != 1 {
        return false;
    }

    // The capture lands on the square the victim pawn skipped.
    let target = Coordinate::at(
        (mv.from().row() as i8 + mover.forward()) as u8,
        last.to().col(),
    );
    mv.to() == target
}

/// The square a pawn is removed from if this move is an en passant
/// capture, None otherwise. The victim stands beside the capturing
/// pawn's source square, on the destination file.
fn en_passant_victim(mv: &Move, board: &Board, mover: Color) -> Option<Coordinate> {
    if !is_en_passant_attempt(mv, board) {
        return None;
    }
    let beside = Coordinate::at(mv.from().row(), mv.to().col());
    match board.piece_at(beside) {
        Some(piece) if piece.color() != mover && piece.kind() == PieceKind::Pawn => Some(beside),
        _ => None,
    }
}

/// Apply the move, ask whether the mover's king is attacked, restore.
fn leaves_king_in_check(mv: &Move, board: &mut Board, mover: Color) -> bool {
    let victim = en_passant_victim(mv, board, mover);
    board.with_move_applied(mv.from(), mv.to(), victim, |board| {
        is_king_in_check(board, mover)
    })
}
