//! The polling loop.
//!
//! Each tick enumerates volumes, feeds the configured ones through their [`DriveState`] and
//! folds every alert of that tick into a single notification. The poll interval starts at the
//! warm-up value and is raised to the steady value on the first tick.

mod notifier;
mod scheduler;
mod volumes;

pub use notifier::Notifier;
pub use scheduler::{run, Scheduler, TokioScheduler};
pub use volumes::{drive_letter_of, VolumeSample, VolumeSource};

use std::sync::Arc;
use std::time::Duration;

use super::config::{Config, DriveLetter};
use super::drive_state::DriveState;

/// Title of the combined low-space notification.
pub const ALERT_TITLE: &str = "Low disk space";

const CLOSING_LINE: &str = "Please delete unnecessary files.\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    WarmingUp,
    Steady,
}

/// One drive that fired during a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct DriveAlert {
    pub letter: DriveLetter,
    pub volume: String,
    pub percent_free: f64,
}

impl DriveAlert {
    pub fn line(&self) -> String {
        format!(
            "Drive {} has only {:.2}% free space.\n",
            self.volume, self.percent_free
        )
    }
}

/// What happened during one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub alerts: Vec<DriveAlert>,
    /// Configured drives that were found ready and sampled.
    pub checked: usize,
    pub skipped_not_ready: usize,
    pub enumeration_failed: bool,
    pub notified: bool,
}

/// Owns the per-drive state and the adaptive poll interval.
pub struct MonitorLoop {
    config: Arc<Config>,
    drives: Vec<DriveState>,
    interval: Duration,
    phase: Phase,
    ticks: u64,
}

impl MonitorLoop {
    pub fn new(config: Arc<Config>) -> Self {
        let drives = DriveState::for_config(&config);
        let interval = config.initial_interval();
        Self {
            config,
            drives,
            interval,
            phase: Phase::WarmingUp,
            ticks: 0,
        }
    }

    /// Delay before the next tick.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn drive_states(&self) -> &[DriveState] {
        &self.drives
    }

    /// Comma-separated configured letters, for log lines.
    pub fn drive_list(&self) -> String {
        self.drives
            .iter()
            .map(|d| d.letter().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Run one evaluation pass and emit at most one notification.
    pub fn tick(&mut self, volumes: &mut dyn VolumeSource, notifier: &dyn Notifier) -> TickReport {
        self.settle_interval();
        self.ticks += 1;

        let mut report = TickReport::default();

        let samples = match volumes.volumes() {
            Ok(samples) => samples,
            Err(e) => {
                log::warn!("Skipping check, could not enumerate volumes: {}", e);
                report.enumeration_failed = true;
                return report;
            }
        };

        for volume in &samples {
            if !volume.is_ready() {
                report.skipped_not_ready += 1;
                continue;
            }
            let Some(letter) = volume.letter() else {
                continue;
            };
            let Some(state) = self.drives.iter_mut().find(|d| d.letter() == letter) else {
                continue;
            };

            let percent_free = volume.percent_free();
            report.checked += 1;
            if state.record_sample(percent_free, volume.free_bytes, &self.config) {
                report.alerts.push(DriveAlert {
                    letter,
                    volume: volume.display_name().to_string(),
                    percent_free,
                });
            }
        }

        if let Some(message) = compose_message(&report.alerts, &self.config) {
            log::info!("{} drive(s) low on space, notifying", report.alerts.len());
            match notifier.notify(ALERT_TITLE, &message) {
                Ok(()) => report.notified = true,
                Err(e) => log::error!("Failed to deliver low space notification: {}", e),
            }
        }

        report
    }

    /// Raise the interval to the steady cadence; it is never lowered.
    fn settle_interval(&mut self) {
        let steady = self.config.check_interval();
        if self.interval < steady {
            log::debug!(
                "Warm-up over, polling every {} ms",
                steady.as_millis()
            );
            self.interval = steady;
        }
        self.phase = Phase::Steady;
    }
}

/// Body of the combined notification, or `None` when nothing fired.
pub fn compose_message(alerts: &[DriveAlert], config: &Config) -> Option<String> {
    if alerts.is_empty() {
        return None;
    }

    let mut message: String = alerts.iter().map(DriveAlert::line).collect();
    message.push_str(CLOSING_LINE);
    if let Some(extra) = config.warn_message() {
        message.push_str(extra);
    }
    Some(message)
}
