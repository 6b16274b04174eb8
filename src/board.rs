//! Thin boundary over the `chess` rules engine.
//!
//! The search never touches the rules engine directly; everything it needs
//! about a position goes through these functions.

use crate::error::{EngineError, Result};
use chess::{Board, BoardStatus, ChessMove, Color, MoveGen, Piece, Rank, Square};
use std::str::FromStr;

pub fn starting_position() -> Board {
    Board::default()
}

pub fn from_fen(fen: &str) -> Result<Board> {
    Board::from_str(fen).map_err(|e| EngineError::InvalidFen {
        fen: fen.to_string(),
        reason: e.to_string(),
    })
}

/// All legal moves, in the rules engine's enumeration order.
pub fn legal_moves(board: &Board) -> Vec<ChessMove> {
    MoveGen::new_legal(board).collect()
}

pub fn apply(board: &Board, mv: ChessMove) -> Board {
    board.make_move_new(mv)
}

pub fn is_legal(board: &Board, mv: ChessMove) -> bool {
    board.legal(mv)
}

pub fn is_game_over(board: &Board) -> bool {
    board.status() != BoardStatus::Ongoing
}

pub fn is_in_check(board: &Board) -> bool {
    board.checkers().popcnt() > 0
}

pub fn gives_check(board: &Board, mv: ChessMove) -> bool {
    apply(board, mv).checkers().popcnt() > 0
}

pub fn piece_at(board: &Board, square: Square) -> Option<(Piece, Color)> {
    board.piece_on(square).zip(board.color_on(square))
}

/// FEN text of the position. Covers layout, side to move, castling and
/// en passant rights.
pub fn canonical_key(board: &Board) -> String {
    board.to_string()
}

/// The piece removed from the board by `mv`, if any. En passant takes a pawn
/// from a square other than the destination.
pub fn captured_piece(board: &Board, mv: ChessMove) -> Option<Piece> {
    let (src, dest) = (mv.get_source(), mv.get_dest());
    if let Some(piece) = board.piece_on(dest) {
        return Some(piece);
    }
    let is_pawn = board.piece_on(src) == Some(Piece::Pawn);
    if is_pawn && src.get_file() != dest.get_file() {
        return Some(Piece::Pawn);
    }
    None
}

pub fn is_capture(board: &Board, mv: ChessMove) -> bool {
    captured_piece(board, mv).is_some()
}

/// A pawn reaching the first or last rank.
pub fn is_promotion(board: &Board, mv: ChessMove) -> bool {
    board.piece_on(mv.get_source()) == Some(Piece::Pawn)
        && matches!(mv.get_dest().get_rank(), Rank::First | Rank::Eighth)
}

/// Parses coordinate notation (`e2e4`, `e7e8q`) and checks it against the
/// legal moves of `board`.
pub fn parse_move(board: &Board, text: &str) -> Result<ChessMove> {
    let text = text.trim();
    let unparsable = || EngineError::UnparsableMove {
        text: text.to_string(),
    };

    if text.len() != 4 && text.len() != 5 {
        return Err(unparsable());
    }
    let from = text
        .get(0..2)
        .and_then(|s| Square::from_str(s).ok())
        .ok_or_else(unparsable)?;
    let to = text
        .get(2..4)
        .and_then(|s| Square::from_str(s).ok())
        .ok_or_else(unparsable)?;
    let promotion = match text.get(4..) {
        None | Some("") => None,
        Some("q") => Some(Piece::Queen),
        Some("r") => Some(Piece::Rook),
        Some("b") => Some(Piece::Bishop),
        Some("n") => Some(Piece::Knight),
        Some(_) => return Err(unparsable()),
    };

    let mv = ChessMove::new(from, to, promotion);
    if is_legal(board, mv) {
        Ok(mv)
    } else {
        Err(EngineError::IllegalMove { mv: mv.to_string() })
    }
}
