//! Environment variable overlay (`QUOTA_NOTIFY_WARN_PERCENT=15` and friends).

use std::env;

use crate::core::config::{ConfigKey, ConfigOverlay, OverlayValue};
use crate::core::resolver::OverlaySource;
use crate::error::Result;

pub const DEFAULT_PREFIX: &str = "QUOTA_NOTIFY";

pub struct EnvOverlay {
    prefix: String,
    name: String,
}

impl EnvOverlay {
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_PREFIX)
    }

    pub fn with_prefix<S: Into<String>>(prefix: S) -> Self {
        let prefix = prefix.into();
        Self {
            name: format!("environment ({}_*)", prefix),
            prefix,
        }
    }

    pub fn var_name(&self, key: ConfigKey) -> String {
        let suffix = match key {
            ConfigKey::InitialInterval => "INITIAL_INTERVAL",
            ConfigKey::CheckInterval => "CHECK_INTERVAL",
            ConfigKey::WarnPercent => "WARN_PERCENT",
            ConfigKey::WarnBelow => "WARN_BELOW",
            ConfigKey::WarnMessage => "WARN_MESSAGE",
            ConfigKey::Obsess => "OBSESS",
            ConfigKey::Drives => "DRIVES",
        };
        format!("{}_{}", self.prefix, suffix)
    }
}

impl Default for EnvOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlaySource for EnvOverlay {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<ConfigOverlay> {
        let mut overlay = ConfigOverlay::new(self.name.clone());

        for key in ConfigKey::ALL {
            match env::var(self.var_name(key)) {
                Ok(value) if value.trim().is_empty() => {}
                Ok(value) => overlay.set(key, OverlayValue::Text(value)),
                Err(env::VarError::NotPresent) => {}
                Err(env::VarError::NotUnicode(_)) => {
                    overlay.set(key, OverlayValue::Unsupported("non-unicode text".to_string()))
                }
            }
        }

        Ok(overlay)
    }
}
