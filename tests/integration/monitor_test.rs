use quota_notify::core::monitor::{run, Scheduler, ALERT_TITLE};
use quota_notify::core::{
    ConfigKey, ConfigOverlay, ConfigResolver, MonitorLoop, Notifier, OverlayValue, Phase,
    VolumeSample, VolumeSource,
};
use quota_notify::Result;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

const GIB: u64 = 1024 * 1024 * 1024;

/// Records every requested wait and stops after `budget` ticks.
struct RecordingScheduler {
    waits: Vec<Duration>,
    budget: usize,
}

impl RecordingScheduler {
    fn new(budget: usize) -> Self {
        Self {
            waits: Vec::new(),
            budget,
        }
    }
}

impl Scheduler for RecordingScheduler {
    async fn wait(&mut self, period: Duration) -> bool {
        self.waits.push(period);
        if self.budget == 0 {
            return false;
        }
        self.budget -= 1;
        true
    }
}

/// Plays back one volume list per tick, repeating the last one.
struct Script {
    ticks: VecDeque<Vec<VolumeSample>>,
    last: Vec<VolumeSample>,
}

impl Script {
    fn new(ticks: Vec<Vec<VolumeSample>>) -> Self {
        Self {
            ticks: ticks.into(),
            last: Vec::new(),
        }
    }
}

impl VolumeSource for Script {
    fn volumes(&mut self) -> Result<Vec<VolumeSample>> {
        if let Some(next) = self.ticks.pop_front() {
            self.last = next;
        }
        Ok(self.last.clone())
    }
}

#[derive(Default)]
struct Inbox {
    messages: RefCell<Vec<(String, String)>>,
}

impl Notifier for Inbox {
    fn notify(&self, title: &str, message: &str) -> Result<()> {
        self.messages
            .borrow_mut()
            .push((title.to_string(), message.to_string()));
        Ok(())
    }

    fn show_error(&self, _message: &str) -> Result<()> {
        Ok(())
    }
}

fn volume(mount_point: &str, free_percent: u64) -> VolumeSample {
    VolumeSample {
        label: "Local Disk".to_string(),
        mount_point: mount_point.to_string(),
        total_bytes: 100 * GIB,
        free_bytes: free_percent * GIB,
        ready: true,
    }
}

fn monitor(overlay: ConfigOverlay) -> MonitorLoop {
    let config = ConfigResolver::new().with_source(overlay).resolve().config;
    MonitorLoop::new(Arc::new(config))
}

fn thresholds(drives: &[&str], obsess: bool) -> ConfigOverlay {
    ConfigOverlay::new("test")
        .with(ConfigKey::WarnPercent, OverlayValue::Int(50))
        .with(ConfigKey::WarnBelow, OverlayValue::Int(1 << 50))
        .with(ConfigKey::Obsess, OverlayValue::Int(obsess as i64))
        .with(
            ConfigKey::Drives,
            OverlayValue::List(drives.iter().map(|d| d.to_string()).collect()),
        )
}

#[tokio::test]
async fn test_run_warms_up_then_keeps_steady_interval() {
    let overlay = ConfigOverlay::new("test")
        .with(ConfigKey::InitialInterval, OverlayValue::Int(5_000))
        .with(ConfigKey::CheckInterval, OverlayValue::Int(300_000));
    let mut monitor = monitor(overlay);
    let mut scheduler = RecordingScheduler::new(3);
    let mut volumes = Script::new(Vec::new());
    let inbox = Inbox::default();

    run(&mut monitor, &mut scheduler, &mut volumes, &inbox).await;

    assert_eq!(
        scheduler.waits,
        vec![
            Duration::from_millis(5_000),
            Duration::from_millis(300_000),
            Duration::from_millis(300_000),
            Duration::from_millis(300_000),
        ]
    );
    assert_eq!(monitor.ticks(), 3);
    assert_eq!(monitor.phase(), Phase::Steady);
}

#[tokio::test]
async fn test_run_stops_before_first_tick_when_scheduler_says_so() {
    let mut monitor = monitor(ConfigOverlay::new("empty"));
    let mut scheduler = RecordingScheduler::new(0);

    run(&mut monitor, &mut scheduler, &mut Script::new(Vec::new()), &Inbox::default()).await;

    assert_eq!(monitor.ticks(), 0);
    assert_eq!(monitor.phase(), Phase::WarmingUp);
}

#[tokio::test]
async fn test_run_alerts_on_falling_edge_only() {
    let mut monitor = monitor(thresholds(&["C"], false));
    let mut scheduler = RecordingScheduler::new(3);
    let mut volumes = Script::new(vec![
        vec![volume("C:\\", 40)],
        vec![volume("C:\\", 30)],
        vec![volume("C:\\", 35)],
    ]);
    let inbox = Inbox::default();

    run(&mut monitor, &mut scheduler, &mut volumes, &inbox).await;

    let messages = inbox.messages.borrow();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].1.starts_with("Drive C:\\ has only 40.00% free space."));
    assert!(messages[1].1.starts_with("Drive C:\\ has only 30.00% free space."));
}

#[tokio::test]
async fn test_run_obsess_alerts_every_qualifying_tick() {
    let mut monitor = monitor(thresholds(&["C"], true));
    let mut scheduler = RecordingScheduler::new(3);
    let mut volumes = Script::new(vec![
        vec![volume("C:\\", 40)],
        vec![volume("C:\\", 45)],
        vec![volume("C:\\", 40)],
    ]);
    let inbox = Inbox::default();

    run(&mut monitor, &mut scheduler, &mut volumes, &inbox).await;

    assert_eq!(inbox.messages.borrow().len(), 3);
}

#[tokio::test]
async fn test_run_obsess_skips_tick_above_threshold() {
    let mut monitor = monitor(thresholds(&["C"], true));
    let mut scheduler = RecordingScheduler::new(3);
    let mut volumes = Script::new(vec![
        vec![volume("C:\\", 40)],
        vec![volume("C:\\", 55)],
        vec![volume("C:\\", 40)],
    ]);
    let inbox = Inbox::default();

    run(&mut monitor, &mut scheduler, &mut volumes, &inbox).await;

    assert_eq!(inbox.messages.borrow().len(), 2);
}

#[test]
fn test_tick_combines_drives_into_single_notification() {
    let mut monitor = monitor(thresholds(&["c", "d"], false));
    let mut volumes = Script::new(vec![vec![
        volume("C:\\", 12),
        volume("D:\\", 7),
        volume("/", 1),
    ]]);
    let inbox = Inbox::default();

    let report = monitor.tick(&mut volumes, &inbox);

    assert_eq!(report.alerts.len(), 2);
    let messages = inbox.messages.borrow();
    assert_eq!(messages.len(), 1);
    let (title, body) = &messages[0];
    assert_eq!(title, ALERT_TITLE);
    assert!(body.contains("Drive C:\\ has only 12.00% free space."));
    assert!(body.contains("Drive D:\\ has only 7.00% free space."));
    assert!(body.ends_with("Please delete unnecessary files.\n"));
}

#[test]
fn test_tick_ignores_unconfigured_and_offline_volumes() {
    let mut monitor = monitor(thresholds(&["C"], false));
    let mut offline = volume("C:\\", 5);
    offline.ready = false;
    let mut volumes = Script::new(vec![vec![offline, volume("E:\\", 1)]]);
    let inbox = Inbox::default();

    let report = monitor.tick(&mut volumes, &inbox);

    assert_eq!(report.skipped_not_ready, 1);
    assert!(report.alerts.is_empty());
    assert!(inbox.messages.borrow().is_empty());
    assert_eq!(monitor.drive_states()[0].last_free_percent(), 100.0);
}
