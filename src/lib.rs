pub mod board;
pub mod captured;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod history;
pub mod ordering;
pub mod render;
pub mod search;
pub mod session;
pub mod stats;
pub mod supervisor;
pub mod transposition;

pub use captured::CapturedSet;
pub use config::SearchConfig;
pub use error::{EngineError, Result};
pub use evaluation::{Evaluator, Score};
pub use history::PositionHistory;
pub use search::{BestMoveRegister, CancelToken, Search, SearchStats};
pub use session::SessionController;
pub use stats::GameStats;
pub use supervisor::{SearchOutcome, SearchSupervisor};
pub use transposition::{NodeType, TranspositionEntry, TranspositionTable};
