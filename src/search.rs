use crate::board;
use crate::captured::CapturedSet;
use crate::evaluation::{Evaluator, Score};
use crate::history::PositionHistory;
use crate::ordering;
use crate::transposition::{NodeType, TranspositionEntry, TranspositionTable};
use chess::{Board, ChessMove, Color};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Bound used for the root window. Negating it never overflows.
pub const INFINITY: Score = Score::MAX;

/// Cooperative stop flag, checked on entry to every node.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Best root move of one search invocation. Starts out holding a fallback
/// move with no score.
#[derive(Debug)]
pub struct BestMoveRegister {
    slot: Mutex<(ChessMove, Option<Score>)>,
}

impl BestMoveRegister {
    pub fn new(fallback: ChessMove) -> Self {
        Self {
            slot: Mutex::new((fallback, None)),
        }
    }

    /// Replaces the held move only on strict improvement, so the first move
    /// enumerated at a given score wins ties.
    pub fn offer(&self, mv: ChessMove, score: Score) -> bool {
        let mut slot = self.slot.lock();
        match slot.1 {
            Some(best) if score <= best => false,
            _ => {
                *slot = (mv, Some(score));
                true
            }
        }
    }

    pub fn best_move(&self) -> ChessMove {
        self.slot.lock().0
    }

    pub fn snapshot(&self) -> (ChessMove, Option<Score>) {
        *self.slot.lock()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub cutoffs: u64,
    pub cache_hits: u64,
}

/// State for one search invocation. Only the transposition table outlives it.
pub struct Search<'a> {
    evaluator: Evaluator,
    transposition_table: &'a TranspositionTable,
    register: &'a BestMoveRegister,
    cancel: &'a CancelToken,
    root_depth: u32,
    perspective: Color,
    stats: SearchStats,
}

impl<'a> Search<'a> {
    /// `perspective` is the side the maximizing player plays; leaf scores are
    /// oriented so that larger is better for it.
    pub fn new(
        transposition_table: &'a TranspositionTable,
        register: &'a BestMoveRegister,
        cancel: &'a CancelToken,
        root_depth: u32,
        perspective: Color,
    ) -> Self {
        Self {
            evaluator: Evaluator::new(),
            transposition_table,
            register,
            cancel,
            root_depth,
            perspective,
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Alpha-beta minimax. Records strictly improving root moves in the
    /// register when `depth` equals the root depth. `captured` and `history`
    /// are returned to their original contents.
    #[allow(clippy::too_many_arguments)]
    pub fn search(
        &mut self,
        board: &Board,
        depth: u32,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
        captured: &mut CapturedSet,
        history: &mut PositionHistory,
    ) -> Score {
        self.stats.nodes += 1;
        let key = board::canonical_key(board);

        if self.cancel.is_cancelled() {
            return self.evaluate(board, &key, captured, history);
        }

        // No probe at the root: a hit there would return without offering
        // anything and leave the register at the fallback
        let is_root = depth == self.root_depth;
        if !is_root {
            if let Some(score) = self.probe(&key, depth, alpha, beta) {
                self.stats.cache_hits += 1;
                return score;
            }
        }

        if depth == 0 || board::is_game_over(board) {
            return self.evaluate(board, &key, captured, history);
        }

        let moves = ordering::order_moves(board);
        if moves.is_empty() {
            return self.evaluate(board, &key, captured, history);
        }

        let (alpha_orig, beta_orig) = (alpha, beta);
        let mover = board.side_to_move();
        let mut best = if maximizing { -INFINITY } else { INFINITY };

        for mv in moves {
            let captured_piece = board::captured_piece(board, mv);
            if let Some(piece) = captured_piece {
                captured.push(mover, piece);
            }
            let child = board::apply(board, mv);
            history.push(board::canonical_key(&child));

            let score = self.search(&child, depth - 1, alpha, beta, !maximizing, captured, history);

            history.pop();
            if captured_piece.is_some() {
                captured.pop(mover);
            }

            if self.cancel.is_cancelled() {
                // The child was cut short; keep it only if nothing better is known
                if best == -INFINITY || best == INFINITY {
                    best = score;
                }
                break;
            }

            if maximizing {
                if score > best {
                    best = score;
                    if is_root {
                        self.register.offer(mv, score);
                    }
                }
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }

            if beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        if !self.cancel.is_cancelled() {
            self.store(key, depth, best, NodeType::classify(best, alpha_orig, beta_orig));
        }

        best
    }

    fn evaluate(&self, board: &Board, key: &str, captured: &CapturedSet, history: &PositionHistory) -> Score {
        self.evaluator
            .evaluate_for(board, key, captured, history, self.perspective)
    }

    // The table holds White-oriented scores; translate when searching for Black.
    fn probe(&self, key: &str, depth: u32, alpha: Score, beta: Score) -> Option<Score> {
        match self.perspective {
            Color::White => self.transposition_table.probe(key, depth, alpha, beta),
            Color::Black => self
                .transposition_table
                .probe(key, depth, -beta, -alpha)
                .map(|score| -score),
        }
    }

    fn store(&self, key: String, depth: u32, score: Score, node_type: NodeType) {
        let entry = match self.perspective {
            Color::White => TranspositionEntry { depth, score, node_type },
            Color::Black => TranspositionEntry {
                depth,
                score: -score,
                node_type: node_type.negated(),
            },
        };
        self.transposition_table.put(key, entry);
    }
}
