//! Configuration for the equity simulator.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Configuration for a simulation run.
///
/// # Example
/// ```
/// use holdem_equity::SimConfig;
///
/// let config = SimConfig::default().with_iterations(20_000).with_seed(42);
/// assert_eq!(config.iterations, 20_000);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of deals to simulate.
    ///
    /// More iterations shrink the sampling error at the cost of
    /// latency; callers trade the two per call site.
    pub iterations: u64,

    /// Number of worker threads.
    ///
    /// `None` uses all available cores.
    pub num_threads: Option<usize>,

    /// Random seed for reproducibility.
    ///
    /// If set, results are fully deterministic regardless of how work
    /// is scheduled across threads. If `None`, a fresh seed is drawn
    /// per run.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            iterations: 5_000,
            num_threads: None,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Create a new config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the iteration count.
    pub fn with_iterations(mut self, iterations: u64) -> Self {
        self.iterations = iterations;
        self
    }

    /// Builder method: set the number of worker threads.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads);
        self
    }

    /// Builder method: set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.iterations == 0 {
            return Err(EngineError::InvalidConfig(
                "iteration count must be positive".to_string(),
            ));
        }
        if self.num_threads == Some(0) {
            return Err(EngineError::InvalidConfig(
                "thread count must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimConfig::default();
        assert_eq!(config.iterations, 5_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let config = SimConfig::default().with_iterations(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_threads_rejected() {
        let config = SimConfig::default().with_threads(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builder_methods() {
        let config = SimConfig::new()
            .with_iterations(1_000)
            .with_threads(4)
            .with_seed(7);
        assert_eq!(config.iterations, 1_000);
        assert_eq!(config.num_threads, Some(4));
        assert_eq!(config.seed, Some(7));
    }
}
