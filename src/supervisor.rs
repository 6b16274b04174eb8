//! Runs one root search on a worker thread under a wall-clock deadline.
//!
//! On timeout the worker is told to stop and is joined before returning, so
//! the register it writes to is never touched after the caller gets its move.

use crate::board;
use crate::captured::CapturedSet;
use crate::config::SearchConfig;
use crate::error::{EngineError, Result};
use crate::evaluation::Score;
use crate::history::PositionHistory;
use crate::search::{BestMoveRegister, CancelToken, Search, SearchStats, INFINITY};
use crate::transposition::TranspositionTable;
use chess::{Board, ChessMove};
use crossbeam_channel::RecvTimeoutError;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub best_move: ChessMove,
    /// `None` when the search never improved on the random fallback.
    pub score: Option<Score>,
    pub timed_out: bool,
    pub stats: SearchStats,
    pub elapsed: Duration,
}

pub struct SearchSupervisor {
    config: SearchConfig,
    transposition_table: Arc<TranspositionTable>,
    rng: StdRng,
}

impl SearchSupervisor {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_table(config, Arc::new(TranspositionTable::new()))
    }

    pub fn with_table(config: SearchConfig, transposition_table: Arc<TranspositionTable>) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            transposition_table,
            rng,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn transposition_table(&self) -> &Arc<TranspositionTable> {
        &self.transposition_table
    }

    /// Searches `board` for the side to move, waiting at most `deadline`.
    /// Always returns a legal move of `board` unless it has none.
    pub fn find_best_move(
        &mut self,
        board: &Board,
        captured: &CapturedSet,
        deadline: Duration,
    ) -> Result<SearchOutcome> {
        let start = Instant::now();
        let fallback = *board::legal_moves(board)
            .choose(&mut self.rng)
            .ok_or(EngineError::NoLegalMoves)?;

        let register = Arc::new(BestMoveRegister::new(fallback));
        let cancel = CancelToken::new();
        let (tx, rx) = crossbeam_channel::bounded::<Score>(1);
        let depth = self.config.depth;

        debug!(depth, ?deadline, %fallback, "starting search");

        let worker = {
            let table = Arc::clone(&self.transposition_table);
            let register = Arc::clone(&register);
            let cancel = cancel.clone();
            let board = *board;
            let mut captured = captured.clone();

            thread::Builder::new()
                .name("salmon-search".to_string())
                .spawn(move || {
                    let mut history = PositionHistory::new();
                    let mut search = Search::new(&table, &register, &cancel, depth, board.side_to_move());
                    let score = search.search(
                        &board,
                        depth,
                        -INFINITY,
                        INFINITY,
                        true,
                        &mut captured,
                        &mut history,
                    );
                    // The supervisor may have stopped listening
                    let _ = tx.send(score);
                    search.stats()
                })
                .map_err(EngineError::WorkerSpawn)?
        };

        let timed_out = match rx.recv_timeout(deadline) {
            Ok(_) => false,
            Err(RecvTimeoutError::Timeout) => {
                warn!(?deadline, "search timed out, using best move found so far");
                cancel.cancel();
                true
            }
            // Worker died without reporting; join below surfaces the panic
            Err(RecvTimeoutError::Disconnected) => false,
        };

        let stats = worker.join().map_err(|_| EngineError::WorkerPanicked)?;
        let (best_move, score) = register.snapshot();
        let elapsed = start.elapsed();

        info!(
            %best_move,
            ?score,
            timed_out,
            nodes = stats.nodes,
            cutoffs = stats.cutoffs,
            cache_hits = stats.cache_hits,
            table_hits = self.transposition_table.hits(),
            table_misses = self.transposition_table.misses(),
            cache_size = self.transposition_table.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "search finished"
        );

        Ok(SearchOutcome {
            best_move,
            score,
            timed_out,
            stats,
            elapsed,
        })
    }
}
