//! Layered configuration resolution.
//!
//! Sources are applied lowest precedence first. Every field is decided independently: a
//! malformed value only loses that field for that overlay, and a source that cannot be read
//! contributes nothing. Neither case aborts resolution; both are reported back as
//! [`ResolveWarning`]s so the caller decides what the user gets to see.

use super::config::{Config, ConfigKey, ConfigOverlay, DriveLetter, OverlayValue, FALLBACK_DRIVE};
use super::monitor::Notifier;
use crate::error::Result;
use std::fmt;

/// Anything that can contribute a [`ConfigOverlay`].
///
/// A source with nothing to say returns an empty overlay. `Err` means the source exists but
/// could not be read.
pub trait OverlaySource {
    fn name(&self) -> &str;
    fn load(&self) -> Result<ConfigOverlay>;
}

/// An in-memory overlay is its own source.
impl OverlaySource for ConfigOverlay {
    fn name(&self) -> &str {
        self.source()
    }

    fn load(&self) -> Result<ConfigOverlay> {
        Ok(self.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningKind {
    MalformedField { key: ConfigKey, reason: String },
    InvalidDrive { entry: String },
    SourceUnavailable { reason: String },
}

/// A non-fatal problem met while resolving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveWarning {
    pub source: String,
    pub kind: WarningKind,
}

impl ResolveWarning {
    /// Only unreadable sources are shown to the user; field-level fallbacks stay in the log.
    pub fn is_user_visible(&self) -> bool {
        matches!(self.kind, WarningKind::SourceUnavailable { .. })
    }
}

impl fmt::Display for ResolveWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WarningKind::MalformedField { key, reason } => {
                write!(f, "{}: ignoring {}: {}", self.source, key, reason)
            }
            WarningKind::InvalidDrive { entry } => {
                write!(f, "{}: ignoring drive entry '{}'", self.source, entry)
            }
            WarningKind::SourceUnavailable { reason } => {
                write!(f, "Could not read configuration from {}: {}", self.source, reason)
            }
        }
    }
}

/// Outcome of [`ConfigResolver::resolve`].
#[derive(Debug)]
pub struct Resolution {
    pub config: Config,
    pub warnings: Vec<ResolveWarning>,
}

/// Ordered list of overlay sources, lowest precedence first.
#[derive(Default)]
pub struct ConfigResolver {
    sources: Vec<Box<dyn OverlaySource>>,
}

impl ConfigResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source above every source added so far.
    pub fn with_source<S: OverlaySource + 'static>(mut self, source: S) -> Self {
        self.push(Box::new(source));
        self
    }

    pub fn push(&mut self, source: Box<dyn OverlaySource>) {
        self.sources.push(source);
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub fn resolve(&self) -> Resolution {
        let mut config = Config::defaults();
        let mut warnings = Vec::new();

        for source in &self.sources {
            match source.load() {
                Ok(overlay) => {
                    log::debug!(
                        "Applying overlay {} ({} values)",
                        source.name(),
                        overlay.len()
                    );
                    apply_overlay(&mut config, &overlay, source.name(), &mut warnings);
                }
                Err(e) => warnings.push(ResolveWarning {
                    source: source.name().to_string(),
                    kind: WarningKind::SourceUnavailable {
                        reason: e.to_string(),
                    },
                }),
            }
        }

        if config.drives().is_empty() {
            config.replace_drives([FALLBACK_DRIVE]);
        }

        Resolution { config, warnings }
    }
}

/// Log every warning and forward the user-visible ones to the notifier's error display.
pub fn report_warnings(warnings: &[ResolveWarning], notifier: &dyn Notifier) {
    for warning in warnings {
        if warning.is_user_visible() {
            log::warn!("{}", warning);
            if let Err(e) = notifier.show_error(&warning.to_string()) {
                log::error!("Failed to display configuration error: {}", e);
            }
        } else {
            log::debug!("{}", warning);
        }
    }
}

fn apply_overlay(
    config: &mut Config,
    overlay: &ConfigOverlay,
    source: &str,
    warnings: &mut Vec<ResolveWarning>,
) {
    if let Some(v) = take(overlay, ConfigKey::InitialInterval, source, warnings, interval_ms) {
        config.set_initial_interval_ms(v);
    }
    if let Some(v) = take(overlay, ConfigKey::CheckInterval, source, warnings, interval_ms) {
        config.set_check_interval_ms(v);
    }
    if let Some(v) = take(overlay, ConfigKey::WarnPercent, source, warnings, percent) {
        config.set_warn_percent(v);
    }
    if let Some(v) = take(overlay, ConfigKey::WarnBelow, source, warnings, byte_count) {
        config.set_warn_below_bytes(v);
    }
    if let Some(Some(v)) = take(overlay, ConfigKey::WarnMessage, source, warnings, message) {
        config.set_warn_message(v);
    }
    if let Some(v) = take(overlay, ConfigKey::Obsess, source, warnings, flag) {
        config.set_obsess(v);
    }
    if let Some(entries) = take(overlay, ConfigKey::Drives, source, warnings, drive_entries) {
        let mut drives = Vec::new();
        for entry in entries {
            match DriveLetter::parse(&entry) {
                Some(letter) => drives.push(letter),
                None => warnings.push(ResolveWarning {
                    source: source.to_string(),
                    kind: WarningKind::InvalidDrive { entry },
                }),
            }
        }
        if !drives.is_empty() {
            config.replace_drives(drives);
        }
    }
}

/// Parse a present value, recording a warning when it is malformed.
fn take<T>(
    overlay: &ConfigOverlay,
    key: ConfigKey,
    source: &str,
    warnings: &mut Vec<ResolveWarning>,
    parse: fn(&OverlayValue) -> std::result::Result<T, String>,
) -> Option<T> {
    let value = overlay.get(key)?;
    match parse(value) {
        Ok(parsed) => Some(parsed),
        Err(reason) => {
            warnings.push(ResolveWarning {
                source: source.to_string(),
                kind: WarningKind::MalformedField { key, reason },
            });
            None
        }
    }
}

fn integer(value: &OverlayValue) -> std::result::Result<i64, String> {
    match value {
        OverlayValue::Int(v) => Ok(*v),
        OverlayValue::Text(text) => text
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("'{}' is not an integer", text)),
        OverlayValue::List(_) => Err("expected an integer, found a list".to_string()),
        OverlayValue::Unsupported(kind) => Err(format!("expected an integer, found {}", kind)),
    }
}

fn interval_ms(value: &OverlayValue) -> std::result::Result<u64, String> {
    let ms = integer(value)?;
    if ms > 0 {
        Ok(ms as u64)
    } else {
        Err(format!("interval must be positive, got {}", ms))
    }
}

fn percent(value: &OverlayValue) -> std::result::Result<u8, String> {
    let pct = integer(value)?;
    match u8::try_from(pct) {
        Ok(p) if p <= 100 => Ok(p),
        _ => Err(format!("percentage must be within 0..=100, got {}", pct)),
    }
}

fn byte_count(value: &OverlayValue) -> std::result::Result<u64, String> {
    let bytes = integer(value)?;
    u64::try_from(bytes).map_err(|_| format!("byte count must not be negative, got {}", bytes))
}

fn flag(value: &OverlayValue) -> std::result::Result<bool, String> {
    integer(value).map(|v| v > 0)
}

/// `Ok(None)` for blank text: present but not an override.
fn message(value: &OverlayValue) -> std::result::Result<Option<String>, String> {
    match value {
        OverlayValue::Text(text) if text.trim().is_empty() => Ok(None),
        OverlayValue::Text(text) => Ok(Some(text.clone())),
        OverlayValue::Int(_) => Err("expected text, found an integer".to_string()),
        OverlayValue::List(_) => Err("expected text, found a list".to_string()),
        OverlayValue::Unsupported(kind) => Err(format!("expected text, found {}", kind)),
    }
}

fn drive_entries(value: &OverlayValue) -> std::result::Result<Vec<String>, String> {
    match value {
        OverlayValue::List(entries) => Ok(entries
            .iter()
            .filter(|e| !e.trim().is_empty())
            .cloned()
            .collect()),
        OverlayValue::Text(text) => Ok(text
            .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
            .filter(|e| !e.is_empty())
            .map(str::to_string)
            .collect()),
        OverlayValue::Int(_) => Err("expected a drive list, found an integer".to_string()),
        OverlayValue::Unsupported(kind) => Err(format!("expected a drive list, found {}", kind)),
    }
}
