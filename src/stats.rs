//! Per-game timing and move records, written out when the game ends.

use crate::error::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameStats {
    pub engine_times: Vec<Duration>,
    pub engine_moves: Vec<String>,
    pub opponent_moves: Vec<String>,
}

impl GameStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mean_time_secs(&self) -> f64 {
        if self.engine_times.is_empty() {
            return 0.0;
        }
        let total: f64 = self.engine_times.iter().map(Duration::as_secs_f64).sum();
        total / self.engine_times.len() as f64
    }

    /// Sample standard deviation; zero with fewer than two samples.
    pub fn std_dev_time_secs(&self) -> f64 {
        let n = self.engine_times.len();
        if n < 2 {
            return 0.0;
        }
        let mean = self.mean_time_secs();
        let variance = self
            .engine_times
            .iter()
            .map(|t| (t.as_secs_f64() - mean).powi(2))
            .sum::<f64>()
            / (n - 1) as f64;
        variance.sqrt()
    }

    pub fn summary(&self) -> String {
        format!(
            "Average engine move time: {:.2}s\nEngine move time standard deviation: {:.2}s\n",
            self.mean_time_secs(),
            self.std_dev_time_secs()
        )
    }

    pub fn write_report<W: Write>(&self, out: &mut W) -> Result<()> {
        out.write_all(self.summary().as_bytes())?;
        writeln!(out)?;
        writeln!(out, "Engine moves:")?;
        writeln!(out, "{}", self.engine_moves.join("\n"))?;
        writeln!(out)?;
        writeln!(out, "Opponent moves:")?;
        write!(out, "{}", self.opponent_moves.join("\n"))?;
        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        self.write_report(&mut out)?;
        out.flush()?;
        Ok(())
    }
}
