//! Simulation driver configuration.

use crate::content::SimulationSettings;
use std::time::Duration;

/// Default day budget per run before it is stopped as timed out.
pub const DEFAULT_MAX_GAME_DAYS: u64 = 100_000;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulation runs to perform
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// In-game days per run before timeout (None = unbounded)
    pub max_game_days: Option<u64>,

    /// Sleep between days using the content's speed setting
    pub pace: bool,

    /// Log verbosity (0 = silent, 1 = summary, 2 = detailed)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1,
            seed: None,
            max_game_days: Some(DEFAULT_MAX_GAME_DAYS),
            pace: false,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Single reproducible run
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Many runs for balance analysis
    pub fn balance_analysis(num_runs: u32) -> Self {
        Self {
            num_runs,
            verbosity: 0,
            ..Default::default()
        }
    }

    /// Paced, chatty single run for watching the narrative
    pub fn watch() -> Self {
        Self {
            pace: true,
            verbosity: 2,
            ..Default::default()
        }
    }

    /// Seed for run `index` of a batch.
    pub fn seed_for_run(&self, index: u32) -> Option<u64> {
        self.seed.map(|s| s.wrapping_add(index as u64))
    }

    /// Sleep between days, if pacing is on and the content allows it.
    pub fn day_delay(&self, settings: &SimulationSettings) -> Option<Duration> {
        if self.pace {
            settings.day_delay()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_bounded_single_run() {
        let config = SimConfig::default();
        assert_eq!(config.num_runs, 1);
        assert_eq!(config.max_game_days, Some(DEFAULT_MAX_GAME_DAYS));
        assert!(!config.pace);
    }

    #[test]
    fn test_batch_seeds_are_offset() {
        let config = SimConfig {
            num_runs: 3,
            ..SimConfig::seeded(40)
        };
        assert_eq!(config.seed_for_run(0), Some(40));
        assert_eq!(config.seed_for_run(2), Some(42));
        assert_eq!(SimConfig::default().seed_for_run(2), None);
    }

    #[test]
    fn test_delay_only_when_pacing() {
        let settings = SimulationSettings {
            auto_run: true,
            speed: 4.0,
        };
        assert_eq!(SimConfig::default().day_delay(&settings), None);
        assert_eq!(
            SimConfig::watch().day_delay(&settings),
            Some(Duration::from_millis(250))
        );
    }
}
