//! Tactical move ordering. Moves likely to change material or force a
//! sequence are searched first so alpha-beta bounds tighten early.

use crate::board;
use chess::{Board, ChessMove};

pub const CHECK_EVASION: u8 = 4;
pub const CAPTURE: u8 = 3;
pub const PROMOTION: u8 = 2;
pub const CHECK: u8 = 1;
pub const QUIET: u8 = 0;

/// Priority of `mv`. In check every legal move is an evasion and outranks
/// everything else.
pub fn priority(board: &Board, mv: ChessMove) -> u8 {
    if board::is_in_check(board) {
        CHECK_EVASION
    } else {
        unforced_priority(board, mv)
    }
}

fn unforced_priority(board: &Board, mv: ChessMove) -> u8 {
    if board::is_capture(board, mv) {
        CAPTURE
    } else if board::is_promotion(board, mv) {
        PROMOTION
    } else if board::gives_check(board, mv) {
        CHECK
    } else {
        QUIET
    }
}

/// Legal moves sorted by descending priority. Equal priorities keep the
/// rules engine's enumeration order.
pub fn order_moves(board: &Board) -> Vec<ChessMove> {
    let in_check = board::is_in_check(board);
    let mut scored: Vec<(u8, ChessMove)> = board::legal_moves(board)
        .into_iter()
        .map(|mv| {
            let priority = if in_check {
                CHECK_EVASION
            } else {
                unforced_priority(board, mv)
            };
            (priority, mv)
        })
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, mv)| mv).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_order_is_enumeration_order() {
        let board = board::starting_position();
        let ordered = order_moves(&board);

        assert_eq!(ordered.len(), 20);
        assert!(ordered.iter().all(|mv| priority(&board, *mv) == QUIET));
        assert_eq!(ordered, board::legal_moves(&board));
    }

    #[test]
    fn test_capture_comes_first() {
        let board = board::from_fen("k7/8/8/3q4/8/8/8/K2R4 w - - 0 1").unwrap();
        let ordered = order_moves(&board);
        let capture = board::parse_move(&board, "d1d5").unwrap();

        assert_eq!(ordered[0], capture);
        assert_eq!(priority(&board, capture), CAPTURE);
        assert!(ordered[1..].iter().all(|mv| priority(&board, *mv) == QUIET));
    }

    #[test]
    fn test_every_move_in_check_is_an_evasion() {
        let board = board::from_fen("4k3/8/8/8/8/8/4r3/4K3 w - - 0 1").unwrap();
        let ordered = order_moves(&board);

        assert!(!ordered.is_empty());
        assert!(ordered.iter().all(|mv| priority(&board, *mv) == CHECK_EVASION));
        assert_eq!(ordered, board::legal_moves(&board));
    }

    #[test]
    fn test_promotions_before_quiet_moves() {
        let board = board::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let ordered = order_moves(&board);

        assert!(ordered[..4].iter().all(|mv| priority(&board, *mv) == PROMOTION));
        assert!(ordered[4..].iter().all(|mv| priority(&board, *mv) == QUIET));
    }

    #[test]
    fn test_checks_before_quiet_moves() {
        let board = board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        let ordered = order_moves(&board);
        let check = board::parse_move(&board, "a1a8").unwrap();

        assert_eq!(priority(&board, check), CHECK);
        assert_eq!(ordered[0], check);
    }
}
