//! Per-drive hysteresis tracking.

use super::config::{Config, DriveLetter};

/// Free-space percentage assumed before the first sample.
const INITIAL_FREE_PERCENT: f64 = 100.0;

/// Remembers the last free percentage seen for one monitored drive.
///
/// A drive that stays low but stops getting worse alerts once per falling streak, unless
/// `obsess` is set, in which case every qualifying sample alerts.
#[derive(Debug, Clone, PartialEq)]
pub struct DriveState {
    letter: DriveLetter,
    last_free_percent: f64,
}

impl DriveState {
    pub fn new(letter: DriveLetter) -> Self {
        Self {
            letter,
            last_free_percent: INITIAL_FREE_PERCENT,
        }
    }

    /// One state per configured drive, in configuration order.
    pub fn for_config(config: &Config) -> Vec<DriveState> {
        config.drives().iter().copied().map(DriveState::new).collect()
    }

    pub fn letter(&self) -> DriveLetter {
        self.letter
    }

    pub fn last_free_percent(&self) -> f64 {
        self.last_free_percent
    }

    /// Feed one sample and report whether it should raise an alert.
    ///
    /// The stored percentage is updated whatever the outcome.
    pub fn record_sample(&mut self, percent_free: f64, free_bytes: u64, config: &Config) -> bool {
        let below_percent = percent_free < f64::from(config.warn_percent());
        let below_bytes = free_bytes < config.warn_below_bytes();
        let worsening = percent_free < self.last_free_percent || config.obsess();

        self.last_free_percent = percent_free;

        below_percent && below_bytes && worsening
    }
}
