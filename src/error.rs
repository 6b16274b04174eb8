use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("illegal move {mv} in the current position")]
    IllegalMove { mv: String },

    #[error("could not read move '{text}', expected coordinates like e2e4 or e7e8q")]
    UnparsableMove { text: String },

    #[error("invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    #[error("no legal moves in this position")]
    NoLegalMoves,

    #[error("failed to spawn search worker: {0}")]
    WorkerSpawn(#[source] io::Error),

    #[error("search worker panicked")]
    WorkerPanicked,

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
