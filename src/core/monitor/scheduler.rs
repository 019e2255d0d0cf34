//! Timer abstraction driving [`MonitorLoop`].

use std::future::Future;
use std::time::Duration;
use tokio::sync::broadcast;

use super::{MonitorLoop, Notifier, VolumeSource};

/// Waits between ticks. Returning `false` ends the loop.
pub trait Scheduler {
    fn wait(&mut self, period: Duration) -> impl Future<Output = bool>;
}

/// Sleeps on the tokio timer until the period elapses or shutdown is signalled.
pub struct TokioScheduler {
    shutdown: broadcast::Receiver<()>,
}

impl TokioScheduler {
    pub fn new(shutdown: broadcast::Receiver<()>) -> Self {
        Self { shutdown }
    }
}

impl Scheduler for TokioScheduler {
    async fn wait(&mut self, period: Duration) -> bool {
        tokio::select! {
            _ = tokio::time::sleep(period) => true,
            _ = self.shutdown.recv() => {
                log::info!("Shutdown requested, stopping monitor");
                false
            }
        }
    }
}

/// Wait the current interval, tick, repeat. Ticks never overlap and missed ticks are not
/// caught up: the next wait starts only once the previous tick returned.
pub async fn run<S: Scheduler>(
    monitor: &mut MonitorLoop,
    scheduler: &mut S,
    volumes: &mut dyn VolumeSource,
    notifier: &dyn Notifier,
) {
    log::info!(
        "Monitoring drives {} (first check in {} ms)",
        monitor.drive_list(),
        monitor.interval().as_millis()
    );

    while scheduler.wait(monitor.interval()).await {
        let report = monitor.tick(volumes, notifier);
        log::debug!(
            "Tick {} done: {} alert(s), next check in {} ms",
            monitor.ticks(),
            report.alerts.len(),
            monitor.interval().as_millis()
        );
    }
}
