use crate::board;
use crate::captured::CapturedSet;
use crate::history::PositionHistory;
use chess::{Board, Color, Piece};

pub type Score = i32;

/// Material-only evaluator. Positive scores favor White.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluator {
    // Piece values
    pub pawn_value: Score,
    pub knight_value: Score,
    pub bishop_value: Score,
    pub rook_value: Score,
    pub queen_value: Score,
    pub king_value: Score,

    // Applied when the position already occurred more than once on the branch
    pub repetition_penalty: Score,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            pawn_value: 1,
            knight_value: 3,
            bishop_value: 3,
            rook_value: 5,
            queen_value: 9,
            king_value: 0,
            repetition_penalty: -10,
        }
    }

    pub fn piece_value(&self, piece: Piece) -> Score {
        match piece {
            Piece::Pawn => self.pawn_value,
            Piece::Knight => self.knight_value,
            Piece::Bishop => self.bishop_value,
            Piece::Rook => self.rook_value,
            Piece::Queen => self.queen_value,
            Piece::King => self.king_value,
        }
    }

    /// White-positive score of `board` given the captures and branch history
    /// that led to it.
    pub fn evaluate(&self, board: &Board, captured: &CapturedSet, history: &PositionHistory) -> Score {
        let key = board::canonical_key(board);
        self.evaluate_for(board, &key, captured, history, Color::White)
    }

    /// Score from `perspective`'s point of view. The repetition penalty is
    /// not mirrored: it always counts against the side doing the searching.
    pub fn evaluate_for(
        &self,
        board: &Board,
        key: &str,
        captured: &CapturedSet,
        history: &PositionHistory,
        perspective: Color,
    ) -> Score {
        let balance = self.material(board) + self.captured_balance(captured);
        let oriented = match perspective {
            Color::White => balance,
            Color::Black => -balance,
        };
        oriented + self.repetition(key, history)
    }

    /// Sum of piece values on the board, White minus Black.
    pub fn material(&self, board: &Board) -> Score {
        let mut score = 0;
        for square in *board.combined() {
            if let Some((piece, color)) = board::piece_at(board, square) {
                let value = self.piece_value(piece);
                score += if color == Color::White { value } else { -value };
            }
        }
        score
    }

    /// Value captured by White minus value captured by Black.
    pub fn captured_balance(&self, captured: &CapturedSet) -> Score {
        let total = |color| -> Score {
            captured
                .captured_by(color)
                .iter()
                .map(|piece| self.piece_value(*piece))
                .sum()
        };
        total(Color::White) - total(Color::Black)
    }

    pub fn repetition(&self, key: &str, history: &PositionHistory) -> Score {
        if history.occurrences(key) > 1 {
            self.repetition_penalty
        } else {
            0
        }
    }
}
