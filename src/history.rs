/// Canonical keys of the positions visited on the current search branch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionHistory {
    keys: Vec<String>,
}

impl PositionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: String) {
        self.keys.push(key);
    }

    pub fn pop(&mut self) -> Option<String> {
        self.keys.pop()
    }

    pub fn occurrences(&self, key: &str) -> usize {
        self.keys.iter().filter(|k| k.as_str() == key).count()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
