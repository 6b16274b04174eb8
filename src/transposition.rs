use crate::evaluation::Score;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Exact,
    LowerBound,
    UpperBound,
}

impl NodeType {
    /// Classifies a value returned from a node searched with `(alpha, beta)`.
    pub fn classify(score: Score, alpha: Score, beta: Score) -> Self {
        if score <= alpha {
            NodeType::UpperBound
        } else if score >= beta {
            NodeType::LowerBound
        } else {
            NodeType::Exact
        }
    }

    /// The same bound after negating the score.
    pub fn negated(self) -> Self {
        match self {
            NodeType::Exact => NodeType::Exact,
            NodeType::LowerBound => NodeType::UpperBound,
            NodeType::UpperBound => NodeType::LowerBound,
        }
    }
}

/// Score is always stored from White's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranspositionEntry {
    pub depth: u32,
    pub score: Score,
    pub node_type: NodeType,
}

/// Canonical position key -> evaluation. Grows for the lifetime of the
/// process and is shared by every search, including one still unwinding
/// after a timeout.
#[derive(Debug, Default)]
pub struct TranspositionTable {
    table: RwLock<HashMap<String, TranspositionEntry>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<TranspositionEntry> {
        self.table.read().get(key).copied()
    }

    pub fn put(&self, key: String, entry: TranspositionEntry) {
        self.table.write().insert(key, entry);
    }

    /// Returns a stored score usable for a node at `depth` searched with
    /// `(alpha, beta)`, all in White's point of view.
    pub fn probe(&self, key: &str, depth: u32, alpha: Score, beta: Score) -> Option<Score> {
        let usable = self.get(key).and_then(|entry| {
            if entry.depth < depth {
                return None;
            }
            match entry.node_type {
                NodeType::Exact => Some(entry.score),
                NodeType::LowerBound if entry.score >= beta => Some(entry.score),
                NodeType::UpperBound if entry.score <= alpha => Some(entry.score),
                _ => None,
            }
        });

        let counter = if usable.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        usable
    }

    pub fn len(&self) -> usize {
        self.table.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.read().is_empty()
    }

    pub fn clear(&self) {
        self.table.write().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    /// Probes answered from the table since creation or the last `clear`.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn entry(depth: u32, score: Score, node_type: NodeType) -> TranspositionEntry {
        TranspositionEntry { depth, score, node_type }
    }

    #[test]
    fn test_get_put() {
        let table = TranspositionTable::new();
        assert!(table.get("k").is_none());
        assert!(table.is_empty());

        table.put("k".to_string(), entry(3, 7, NodeType::Exact));
        assert_eq!(table.get("k"), Some(entry(3, 7, NodeType::Exact)));
        assert_eq!(table.len(), 1);

        table.put("k".to_string(), entry(4, -2, NodeType::Exact));
        assert_eq!(table.get("k").map(|e| e.score), Some(-2));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_probe_requires_enough_depth() {
        let table = TranspositionTable::new();
        table.put("k".to_string(), entry(2, 5, NodeType::Exact));

        assert_eq!(table.probe("k", 2, -100, 100), Some(5));
        assert_eq!(table.probe("k", 1, -100, 100), Some(5));
        assert_eq!(table.probe("k", 3, -100, 100), None);
        assert_eq!(table.hits(), 2);
        assert_eq!(table.misses(), 1);
    }

    #[test]
    fn test_probe_respects_bounds() {
        let table = TranspositionTable::new();
        table.put("low".to_string(), entry(2, 10, NodeType::LowerBound));
        table.put("up".to_string(), entry(2, -10, NodeType::UpperBound));

        assert_eq!(table.probe("low", 2, 0, 10), Some(10));
        assert_eq!(table.probe("low", 2, 0, 20), None);
        assert_eq!(table.probe("up", 2, -10, 0), Some(-10));
        assert_eq!(table.probe("up", 2, -20, 0), None);
    }

    #[test]
    fn test_classify_and_negate() {
        assert_eq!(NodeType::classify(0, 0, 10), NodeType::UpperBound);
        assert_eq!(NodeType::classify(10, 0, 10), NodeType::LowerBound);
        assert_eq!(NodeType::classify(5, 0, 10), NodeType::Exact);
        assert_eq!(NodeType::LowerBound.negated(), NodeType::UpperBound);
        assert_eq!(NodeType::Exact.negated(), NodeType::Exact);
    }

    #[test]
    fn test_concurrent_writers() {
        let table = Arc::new(TranspositionTable::new());
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let table = Arc::clone(&table);
                thread::spawn(move || {
                    for i in 0..250 {
                        table.put(format!("{}-{}", t, i), entry(1, i, NodeType::Exact));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(table.len(), 1000);
        assert_eq!(table.get("3-249").map(|e| e.score), Some(249));
    }

    #[test]
    fn test_clear() {
        let table = TranspositionTable::new();
        table.put("k".to_string(), entry(1, 1, NodeType::Exact));
        table.probe("k", 1, -1, 2);
        table.clear();

        assert!(table.is_empty());
        assert_eq!(table.hits(), 0);
    }
}
