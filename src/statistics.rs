use std::fmt;
use std::time::Duration;

/// Frontier bookkeeping collected during one search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchStats {
    pub pushes: usize,
    pub pops: usize,
    pub stale_pops: usize,
    pub finalized: usize,
    pub max_frontier: usize,
    pub elapsed: Duration,
}

impl SearchStats {
    /// Share of popped entries that were superseded duplicates.
    pub fn stale_ratio(&self) -> f64 {
        if self.pops > 0 {
            self.stale_pops as f64 / self.pops as f64
        } else {
            0.0
        }
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cells finalized: {}", self.finalized)?;
        writeln!(f, "Frontier pushes: {}", self.pushes)?;
        writeln!(
            f,
            "Frontier pops: {} ({} stale, {:.1}%)",
            self.pops,
            self.stale_pops,
            self.stale_ratio() * 100.0
        )?;
        writeln!(f, "Peak frontier size: {}", self.max_frontier)?;
        writeln!(f, "Search time: {:.2?}", self.elapsed)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_ratio() {
        let stats = SearchStats {
            pops: 8,
            stale_pops: 2,
            ..Default::default()
        };
        assert_eq!(stats.stale_ratio(), 0.25);
        assert_eq!(SearchStats::default().stale_ratio(), 0.0);
    }

    #[test]
    fn test_display_mentions_counts() {
        let stats = SearchStats {
            pushes: 12,
            pops: 10,
            stale_pops: 1,
            finalized: 9,
            max_frontier: 5,
            elapsed: Duration::from_micros(3),
        };
        let text = stats.to_string();
        assert!(text.contains("Cells finalized: 9"));
        assert!(text.contains("Frontier pops: 10 (1 stale, 10.0%)"));
        assert!(text.contains("Peak frontier size: 5"));
    }
}
