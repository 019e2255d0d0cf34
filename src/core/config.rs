//! Effective configuration and the raw overlay shapes it is resolved from.
//!
//! A [`Config`] is only ever produced by [`ConfigResolver`](super::resolver::ConfigResolver)
//! and is read-only afterwards. Overlays carry loosely typed [`OverlayValue`]s so that each
//! source (JSON file, registry, environment) can hand over whatever it found and leave the
//! well-formedness decision to the resolver.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_INITIAL_INTERVAL_MS: u64 = 5_000;
pub const DEFAULT_CHECK_INTERVAL_MS: u64 = 300_000;
pub const DEFAULT_WARN_PERCENT: u8 = 10;
pub const DEFAULT_WARN_BELOW_BYTES: u64 = 100 * 1024 * 1024;

/// Drive monitored when no overlay configures any (the home drive).
pub const FALLBACK_DRIVE: DriveLetter = DriveLetter('H');

/// A volume identifier: one upper-case ASCII letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DriveLetter(char);

impl DriveLetter {
    /// Build from a single character, normalizing case. Non-letters are rejected.
    pub fn new(letter: char) -> Option<Self> {
        if letter.is_ascii_alphabetic() {
            Some(Self(letter.to_ascii_uppercase()))
        } else {
            None
        }
    }

    /// Parse the leading character of `input`, so `"c"`, `"C:"` and `"C:\"` are all `C`.
    pub fn parse(input: &str) -> Option<Self> {
        input.trim().chars().next().and_then(Self::new)
    }

    pub fn as_char(self) -> char {
        self.0
    }
}

impl fmt::Display for DriveLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The immutable, fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    initial_interval_ms: u64,
    check_interval_ms: u64,
    warn_percent: u8,
    warn_below_bytes: u64,
    warn_message: Option<String>,
    obsess: bool,
    drives: Vec<DriveLetter>,
}

impl Config {
    /// Hardcoded defaults with an empty drive set; the starting point of every resolution.
    pub(crate) fn defaults() -> Self {
        Self {
            initial_interval_ms: DEFAULT_INITIAL_INTERVAL_MS,
            check_interval_ms: DEFAULT_CHECK_INTERVAL_MS,
            warn_percent: DEFAULT_WARN_PERCENT,
            warn_below_bytes: DEFAULT_WARN_BELOW_BYTES,
            warn_message: None,
            obsess: false,
            drives: Vec::new(),
        }
    }

    pub(crate) fn set_initial_interval_ms(&mut self, value: u64) {
        self.initial_interval_ms = value;
    }

    pub(crate) fn set_check_interval_ms(&mut self, value: u64) {
        self.check_interval_ms = value;
    }

    pub(crate) fn set_warn_percent(&mut self, value: u8) {
        self.warn_percent = value;
    }

    pub(crate) fn set_warn_below_bytes(&mut self, value: u64) {
        self.warn_below_bytes = value;
    }

    pub(crate) fn set_warn_message(&mut self, value: String) {
        self.warn_message = Some(value);
    }

    pub(crate) fn set_obsess(&mut self, value: bool) {
        self.obsess = value;
    }

    /// Replace the whole drive set, keeping the first occurrence of each letter.
    pub(crate) fn replace_drives(&mut self, drives: impl IntoIterator<Item = DriveLetter>) {
        let mut unique: Vec<DriveLetter> = Vec::new();
        for drive in drives {
            if !unique.contains(&drive) {
                unique.push(drive);
            }
        }
        self.drives = unique;
    }

    pub fn initial_interval_ms(&self) -> u64 {
        self.initial_interval_ms
    }

    pub fn check_interval_ms(&self) -> u64 {
        self.check_interval_ms
    }

    pub fn initial_interval(&self) -> Duration {
        Duration::from_millis(self.initial_interval_ms)
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_millis(self.check_interval_ms)
    }

    pub fn warn_percent(&self) -> u8 {
        self.warn_percent
    }

    pub fn warn_below_bytes(&self) -> u64 {
        self.warn_below_bytes
    }

    pub fn warn_message(&self) -> Option<&str> {
        self.warn_message.as_deref()
    }

    pub fn obsess(&self) -> bool {
        self.obsess
    }

    pub fn drives(&self) -> &[DriveLetter] {
        &self.drives
    }

    pub fn monitors(&self, letter: DriveLetter) -> bool {
        self.drives.contains(&letter)
    }
}

impl Default for Config {
    /// Defaults with the fallback drive applied, i.e. what resolving zero overlays yields.
    fn default() -> Self {
        let mut config = Self::defaults();
        config.replace_drives([FALLBACK_DRIVE]);
        config
    }
}

/// Keys an overlay may provide. Names match the registry value names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    InitialInterval,
    CheckInterval,
    WarnPercent,
    WarnBelow,
    WarnMessage,
    Obsess,
    Drives,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 7] = [
        ConfigKey::InitialInterval,
        ConfigKey::CheckInterval,
        ConfigKey::WarnPercent,
        ConfigKey::WarnBelow,
        ConfigKey::WarnMessage,
        ConfigKey::Obsess,
        ConfigKey::Drives,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::InitialInterval => "initialInterval",
            ConfigKey::CheckInterval => "checkInterval",
            ConfigKey::WarnPercent => "warnPercent",
            ConfigKey::WarnBelow => "warnBelow",
            ConfigKey::WarnMessage => "warnMessage",
            ConfigKey::Obsess => "obsess",
            ConfigKey::Drives => "Drives",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw value as delivered by an overlay source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayValue {
    Int(i64),
    Text(String),
    List(Vec<String>),
    /// A value of a type the resolver cannot interpret; the payload describes it.
    Unsupported(String),
}

/// The values one source contributes, keyed by [`ConfigKey`].
#[derive(Debug, Clone, Default)]
pub struct ConfigOverlay {
    source: String,
    values: HashMap<ConfigKey, OverlayValue>,
}

impl ConfigOverlay {
    pub fn new<S: Into<String>>(source: S) -> Self {
        Self {
            source: source.into(),
            values: HashMap::new(),
        }
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, key: ConfigKey, value: OverlayValue) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: ConfigKey, value: OverlayValue) {
        self.values.insert(key, value);
    }

    pub fn get(&self, key: ConfigKey) -> Option<&OverlayValue> {
        self.values.get(&key)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}
