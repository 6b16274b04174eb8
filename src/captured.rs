//! Pieces captured along one search branch (or over the real game).

use chess::{Color, Piece};

/// Captured piece types keyed by the side that made the capture.
///
/// Pushes and pops must mirror move application and undo exactly, otherwise
/// sibling branches are evaluated against the wrong material.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedSet {
    by_white: Vec<Piece>,
    by_black: Vec<Piece>,
}

impl CapturedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, capturer: Color, piece: Piece) {
        self.side_mut(capturer).push(piece);
    }

    pub fn pop(&mut self, capturer: Color) -> Option<Piece> {
        self.side_mut(capturer).pop()
    }

    pub fn captured_by(&self, capturer: Color) -> &[Piece] {
        match capturer {
            Color::White => &self.by_white,
            Color::Black => &self.by_black,
        }
    }

    /// The same captures seen from the other side of the board.
    pub fn mirrored(&self) -> Self {
        Self {
            by_white: self.by_black.clone(),
            by_black: self.by_white.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.by_white.len() + self.by_black.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn side_mut(&mut self, capturer: Color) -> &mut Vec<Piece> {
        match capturer {
            Color::White => &mut self.by_white,
            Color::Black => &mut self.by_black,
        }
    }
}
