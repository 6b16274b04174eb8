use std::time::Duration;

pub const DEFAULT_DEPTH: u32 = 7;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies searched from the root. Never zero.
    pub depth: u32,
    /// Wall-clock budget for one engine move.
    pub timeout: Duration,
    /// Seeds the fallback move choice; entropy when unset.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            timeout: DEFAULT_TIMEOUT,
            seed: None,
        }
    }
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_max_depth(&mut self, depth: u32) {
        self.depth = depth.max(1);
    }

    pub fn set_max_time(&mut self, seconds: u64) {
        self.timeout = Duration::from_secs(seconds);
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.seed = Some(seed);
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.set_max_depth(depth);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.set_seed(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_setup() {
        let config = SearchConfig::default();
        assert_eq!(config.depth, 7);
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_depth_is_never_zero() {
        let mut config = SearchConfig::new();
        config.set_max_depth(0);
        assert_eq!(config.depth, 1);

        config.set_max_time(3);
        assert_eq!(config.timeout, Duration::from_secs(3));
    }
}
