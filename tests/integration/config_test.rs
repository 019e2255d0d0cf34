use quota_notify::core::config::FALLBACK_DRIVE;
use quota_notify::core::{
    report_warnings, ConfigKey, ConfigOverlay, ConfigResolver, Notifier, OverlaySource,
    OverlayValue,
};
use quota_notify::{QuotaError, Result};
use std::cell::RefCell;

struct Offline(&'static str);

impl OverlaySource for Offline {
    fn name(&self) -> &str {
        self.0
    }

    fn load(&self) -> Result<ConfigOverlay> {
        Err(QuotaError::registry("the store is unreachable"))
    }
}

#[derive(Default)]
struct ErrorLog {
    errors: RefCell<Vec<String>>,
}

impl Notifier for ErrorLog {
    fn notify(&self, _title: &str, _message: &str) -> Result<()> {
        Ok(())
    }

    fn show_error(&self, message: &str) -> Result<()> {
        self.errors.borrow_mut().push(message.to_string());
        Ok(())
    }
}

fn drives(items: &[&str]) -> OverlayValue {
    OverlayValue::List(items.iter().map(|s| s.to_string()).collect())
}

#[test]
fn test_config_precedence_higher_overlay_wins() {
    let resolution = ConfigResolver::new()
        .with_source(ConfigOverlay::new("file").with(ConfigKey::WarnPercent, OverlayValue::Int(15)))
        .with_source(ConfigOverlay::new("machine").with(ConfigKey::WarnPercent, OverlayValue::Int(20)))
        .with_source(ConfigOverlay::new("user").with(ConfigKey::WarnPercent, OverlayValue::Int(5)))
        .resolve();

    assert_eq!(resolution.config.warn_percent(), 5);
}

#[test]
fn test_config_drive_list_is_replaced_not_merged() {
    let resolution = ConfigResolver::new()
        .with_source(ConfigOverlay::new("machine").with(ConfigKey::Drives, drives(&["C", "D"])))
        .with_source(ConfigOverlay::new("user").with(ConfigKey::Drives, drives(&["E"])))
        .resolve();

    let letters: Vec<char> = resolution.config.drives().iter().map(|d| d.as_char()).collect();
    assert_eq!(letters, vec!['E']);
}

#[test]
fn test_config_falls_back_to_home_drive() {
    let resolution = ConfigResolver::new()
        .with_source(ConfigOverlay::new("file").with(ConfigKey::Obsess, OverlayValue::Int(1)))
        .with_source(ConfigOverlay::new("user").with(ConfigKey::Drives, drives(&[])))
        .resolve();

    assert_eq!(resolution.config.drives(), &[FALLBACK_DRIVE]);
    assert!(resolution.config.obsess());
}

#[test]
fn test_config_scalars_merge_field_by_field() {
    let resolution = ConfigResolver::new()
        .with_source(
            ConfigOverlay::new("machine")
                .with(ConfigKey::CheckInterval, OverlayValue::Int(60_000))
                .with(ConfigKey::WarnBelow, OverlayValue::Int(1 << 30))
                .with(ConfigKey::WarnMessage, OverlayValue::Text("Ring 4242.".into())),
        )
        .with_source(
            ConfigOverlay::new("user").with(ConfigKey::InitialInterval, OverlayValue::Int(1_000)),
        )
        .resolve();

    let config = &resolution.config;
    assert_eq!(config.initial_interval_ms(), 1_000);
    assert_eq!(config.check_interval_ms(), 60_000);
    assert_eq!(config.warn_below_bytes(), 1 << 30);
    assert_eq!(config.warn_message(), Some("Ring 4242."));
    assert_eq!(config.warn_percent(), 10);
}

#[test]
fn test_config_unavailable_source_is_reported_once() {
    let resolution = ConfigResolver::new()
        .with_source(ConfigOverlay::new("file").with(ConfigKey::Drives, drives(&["C"])))
        .with_source(Offline("registry HKLM"))
        .with_source(
            ConfigOverlay::new("user")
                .with(ConfigKey::WarnPercent, OverlayValue::Text("lots".into())),
        )
        .resolve();

    assert_eq!(resolution.config.drives()[0].as_char(), 'C');
    assert_eq!(resolution.config.warn_percent(), 10);
    assert_eq!(resolution.warnings.len(), 2);

    let ui = ErrorLog::default();
    report_warnings(&resolution.warnings, &ui);

    let errors = ui.errors.borrow();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("registry HKLM"));
    assert!(errors[0].contains("the store is unreachable"));
}
