//! Core data types shared across the pipeline.

/// Summary of a pipeline run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessingStats {
    /// Files converted and written
    pub transcoded: usize,

    /// Files skipped because their content was already in the ledger
    pub skipped: usize,

    /// Files abandoned after an error
    pub failed: usize,

    /// Wall-clock duration of the run in seconds
    pub total_seconds: f64,
}

impl ProcessingStats {
    /// Total files the workers picked up.
    pub fn attempted(&self) -> usize {
        self.transcoded + self.skipped + self.failed
    }

    /// Conversion rate over the run.
    pub fn images_per_second(&self) -> f64 {
        if self.total_seconds > 0.0 {
            self.transcoded as f64 / self.total_seconds
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempted_sums_all_outcomes() {
        let stats = ProcessingStats {
            transcoded: 3,
            skipped: 2,
            failed: 1,
            total_seconds: 2.0,
        };
        assert_eq!(stats.attempted(), 6);
        assert_eq!(stats.images_per_second(), 1.5);
    }

    #[test]
    fn test_rate_of_instant_run_is_zero() {
        let stats = ProcessingStats::default();
        assert_eq!(stats.images_per_second(), 0.0);
    }
}
