//! Pseudo-legal destination generation.
//!
//! Each piece kind produces the set of destination coordinates reachable
//! from its current square given board occupancy, ignoring whether the
//! resulting position leaves its own king in check. Castling is not
//! generated here; it is a two-square king move with its own
//! precondition set, probed separately by the game. A pawn's diagonal
//! step onto an empty square is produced only as an en passant
//! *candidate*; its final legality depends on move history and is
//! decided by the validator.

use crate::board::Board;
use crate::coretypes::{Color, Coordinate, Piece, PieceKind};
use crate::movelist::DestList;

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

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const ORTHOGONAL_RAYS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

const DIAGONAL_RAYS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Generate all pseudo-legal destinations for a piece standing on `from`.
pub fn pseudo_legal_moves(board: &Board, piece: &Piece, from: Coordinate) -> DestList {
    let color = piece.color();
    match piece.kind() {
        PieceKind::King => step_moves(board, from, color, &KING_OFFSETS),
        PieceKind::Knight => step_moves(board, from, color, &KNIGHT_OFFSETS),
        PieceKind::Bishop => ray_moves(board, from, color, &DIAGONAL_RAYS),
        PieceKind::Rook => ray_moves(board, from, color, &ORTHOGONAL_RAYS),
        PieceKind::Queen => {
            let mut dests = ray_moves(board, from, color, &DIAGONAL_RAYS);
            dests.extend(ray_moves(board, from, color, &ORTHOGONAL_RAYS));
            dests
        }
        PieceKind::Pawn => pawn_moves(board, from, color),
    }
}

/// Single-step movers: each offset is admissible if the target square is
/// on the board and empty or held by an opponent.
fn step_moves(board: &Board, from: Coordinate, color: Color, offsets: &[(i8, i8)]) -> DestList {
    let mut dests = DestList::new();
    for &(d_row, d_col) in offsets {
        if let Some(to) = from.offset(d_row, d_col) {
            match board.piece_at(to) {
                None => dests.push(to),
                Some(occupant) if occupant.color() != color => dests.push(to),
                Some(_) => {}
            }
        }
    }
    dests
}

/// Sliding movers: walk each ray outward until the board edge or the
/// first occupied square, which is included only if capturable.
fn ray_moves(board: &Board, from: Coordinate, color: Color, rays: &[(i8, i8)]) -> DestList {
    let mut dests = DestList::new();
    for &(d_row, d_col) in rays {
        let mut current = from;
        while let Some(next) = current.offset(d_row, d_col) {
            match board.piece_at(next) {
                None => {
                    dests.push(next);
                    current = next;
                }
                Some(occupant) => {
                    if occupant.color() != color {
                        dests.push(next);
                    }
                    break;
                }
            }
        }
    }
    dests
}

fn pawn_moves(board: &Board, from: Coordinate, color: Color) -> DestList {
    let mut dests = DestList::new();
    let forward = color.forward();

    // Single step onto an empty square, and from the starting row a
    // double step when the single step is also empty (no jumping).
    if let Some(one) = from.offset(forward, 0) {
        if board.is_empty(one) {
            dests.push(one);
            if from.row() == color.pawn_start_row() {
                if let Some(two) = from.offset(2 * forward, 0) {
                    if board.is_empty(two) {
                        dests.push(two);
                    }
                }
            }
        }
    }

    // Diagonal captures.
    for d_col in [-1, 1] {
        if let Some(to) = from.offset(forward, d_col) {
            if let Some(occupant) = board.piece_at(to) {
                if occupant.color() != color {
                    dests.push(to);
                }
            }
        }
    }

    // En passant candidates: from the capture row only, a diagonal step
    // onto an empty square next to an opposing pawn. Whether that pawn
    // just made a double step is checked against history later.
    if from.row() == color.en_passant_row() {
        for d_col in [-1, 1] {
            let diagonal = match from.offset(forward, d_col) {
                Some(coord) => coord,
                None => continue,
            };
            if !board.is_empty(diagonal) {
                continue;
            }
            let adjacent = match from.offset(0, d_col) {
                Some(coord) => coord,
                None => continue,
            };
            match board.piece_at(adjacent) {
                Some(occupant)
                    if occupant.color() != color && occupant.kind() == PieceKind::Pawn =>
                {
                    dests.push(diagonal)
                }
                _ => {}
            }
        }
    }

    dests
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coretypes::PieceKind::*;

    fn coord(s: &str) -> Coordinate {
        s.parse().unwrap()
    }

    fn place(board: &mut Board, color: Color, kind: PieceKind, at: &str) -> Piece {
        let coord = coord(at);
        let piece = Piece::new(color, kind, coord);
        board.place(Some(piece), coord);
        *board.piece_at(coord).unwrap()
    }

    fn dests(board: &Board, at: &str) -> DestList {
        let from = coord(at);
        let piece = *board.piece_at(from).unwrap();
        pseudo_legal_moves(board, &piece, from)
    }

    #[test]
    fn rook_on_open_board() {
        let mut board = Board::empty();
        place(&mut board, Color::White, Rook, "d4");
        assert_eq!(dests(&board, "d4").len(), 14);
    }

    #[test]
    fn rook_stops_at_first_occupied() {
        let mut board = Board::empty();
        place(&mut board, Color::White, Rook, "d4");
        place(&mut board, Color::White, Pawn, "d6"); // own piece: stop, exclude
        place(&mut board, Color::Black, Pawn, "f4"); // opponent: stop, include

        let moves = dests(&board, "d4");
        assert!(moves.contains(&coord("d5")));
        assert!(!moves.contains(&coord("d6")));
        assert!(!moves.contains(&coord("d7")));
        assert!(moves.contains(&coord("f4")));
        assert!(!moves.contains(&coord("g4")));
    }

    #[test]
    fn bishop_rays() {
        let mut board = Board::empty();
        place(&mut board, Color::White, Bishop, "c1");
        place(&mut board, Color::White, Pawn, "e3");

        let moves = dests(&board, "c1");
        assert!(moves.contains(&coord("d2")));
        assert!(!moves.contains(&coord("e3")));
        assert!(moves.contains(&coord("b2")));
        assert!(moves.contains(&coord("a3")));
        assert_eq!(moves.len(), 3);
    }

    #[test]
    fn queen_on_open_board() {
        let mut board = Board::empty();
        place(&mut board, Color::White, Queen, "d4");
        assert_eq!(dests(&board, "d4").len(), 27);
    }

    #[test]
    fn knight_in_corner() {
        let mut board = Board::empty();
        place(&mut board, Color::White, Knight, "a1");
        let moves = dests(&board, "a1");
        assert_eq!(moves.len(), 2);
        assert!(moves.contains(&coord("b3")));
        assert!(moves.contains(&coord("c2")));
    }

    #[test]
    fn knight_jumps_over_pieces() {
        let board = Board::start_position();
        let moves = dests(&board, "b1");
        assert_eq!(moves.len(), 2);
        assert!(moves.contains(&coord("a3")));
        assert!(moves.contains(&coord("c3")));
    }

    #[test]
    fn king_steps() {
        let mut board = Board::empty();
        place(&mut board, Color::White, King, "e4");
        assert_eq!(dests(&board, "e4").len(), 8);

        let mut board = Board::empty();
        place(&mut board, Color::White, King, "a1");
        place(&mut board, Color::White, Pawn, "a2");
        place(&mut board, Color::Black, Pawn, "b2");
        let moves = dests(&board, "a1");
        assert!(!moves.contains(&coord("a2"))); // own piece
        assert!(moves.contains(&coord("b2"))); // capturable
        assert!(moves.contains(&coord("b1")));
        assert_eq!(moves.len(), 2);
    }

    #[test]
    fn pawn_single_and_double_step() {
        let board = Board::start_position();
        let moves = dests(&board, "e2");
        assert_eq!(moves.len(), 2);
        assert!(moves.contains(&coord("e3")));
        assert!(moves.contains(&coord("e4")));

        // Off the starting row only a single step remains.
        let mut board = Board::empty();
        place(&mut board, Color::White, Pawn, "e3");
        let moves = dests(&board, "e3");
        assert_eq!(moves.len(), 1);
        assert!(moves.contains(&coord("e4")));
    }

    #[test]
    fn pawn_cannot_jump_a_blocker() {
        let mut board = Board::empty();
        place(&mut board, Color::White, Pawn, "e2");
        place(&mut board, Color::Black, Knight, "e3");
        assert!(dests(&board, "e2").is_empty());

        // Blocker on the double-step square only.
        let mut board = Board::empty();
        place(&mut board, Color::White, Pawn, "e2");
        place(&mut board, Color::Black, Knight, "e4");
        let moves = dests(&board, "e2");
        assert_eq!(moves.len(), 1);
        assert!(moves.contains(&coord("e3")));
    }

    #[test]
    fn pawn_captures_diagonally_only() {
        let mut board = Board::empty();
        place(&mut board, Color::White, Pawn, "e4");
        place(&mut board, Color::Black, Pawn, "d5");
        place(&mut board, Color::White, Knight, "f5");
        place(&mut board, Color::Black, Rook, "e5");

        let moves = dests(&board, "e4");
        assert!(moves.contains(&coord("d5"))); // opponent, capturable
        assert!(!moves.contains(&coord("f5"))); // own piece
        assert!(!moves.contains(&coord("e5"))); // forward is never a capture
        assert_eq!(moves.len(), 1);
    }

    #[test]
    fn black_pawn_moves_down() {
        let board = Board::start_position();
        let moves = dests(&board, "e7");
        assert_eq!(moves.len(), 2);
        assert!(moves.contains(&coord("e6")));
        assert!(moves.contains(&coord("e5")));
    }

    #[test]
    fn en_passant_candidate_generated() {
        let mut board = Board::empty();
        place(&mut board, Color::White, Pawn, "e5");
        place(&mut board, Color::Black, Pawn, "d5");

        let moves = dests(&board, "e5");
        assert!(moves.contains(&coord("d6"))); // candidate, history-checked later
        assert!(moves.contains(&coord("e6")));

        // No candidate off the capture row.
        let mut board = Board::empty();
        place(&mut board, Color::White, Pawn, "e4");
        place(&mut board, Color::Black, Pawn, "d4");
        let moves = dests(&board, "e4");
        assert!(!moves.contains(&coord("d5")));
    }
}
