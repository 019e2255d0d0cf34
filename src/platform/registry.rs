//! Windows registry overlays under `SOFTWARE\Amalgam`.
//!
//! The machine scope reads `HKEY_LOCAL_MACHINE`, trying the 64-bit view before the 32-bit one;
//! the user scope reads `HKEY_CURRENT_USER`. A missing key is an empty overlay.

use std::io;
use winreg::enums::*;
use winreg::types::FromRegValue;
use winreg::{RegKey, RegValue};

use crate::core::config::{ConfigKey, ConfigOverlay, OverlayValue};
use crate::core::resolver::OverlaySource;
use crate::error::{QuotaError, Result};

pub const SETTINGS_KEY: &str = "SOFTWARE\\Amalgam";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryScope {
    Machine,
    User,
}

pub struct RegistryOverlay {
    scope: RegistryScope,
    name: String,
}

impl RegistryOverlay {
    pub fn new(scope: RegistryScope) -> Self {
        let hive = match scope {
            RegistryScope::Machine => "HKLM",
            RegistryScope::User => "HKCU",
        };
        Self {
            scope,
            name: format!("registry {}\\{}", hive, SETTINGS_KEY),
        }
    }

    pub fn machine() -> Self {
        Self::new(RegistryScope::Machine)
    }

    pub fn user() -> Self {
        Self::new(RegistryScope::User)
    }

    /// `Ok(None)` when the key does not exist in any view.
    fn open(&self) -> io::Result<Option<RegKey>> {
        let (hive, views): (RegKey, &[u32]) = match self.scope {
            RegistryScope::Machine => (
                RegKey::predef(HKEY_LOCAL_MACHINE),
                &[KEY_WOW64_64KEY, KEY_WOW64_32KEY],
            ),
            RegistryScope::User => (RegKey::predef(HKEY_CURRENT_USER), &[0]),
        };

        for view in views {
            match hive.open_subkey_with_flags(SETTINGS_KEY, KEY_READ | view) {
                Ok(key) => return Ok(Some(key)),
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(None)
    }
}

impl OverlaySource for RegistryOverlay {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<ConfigOverlay> {
        let mut overlay = ConfigOverlay::new(self.name.clone());

        let key = self
            .open()
            .map_err(|e| QuotaError::registry(format!("cannot open {}: {}", self.name, e)))?;
        let Some(key) = key else {
            log::debug!("No settings in {}", self.name);
            return Ok(overlay);
        };

        for config_key in ConfigKey::ALL {
            match key.get_raw_value(config_key.as_str()) {
                Ok(raw) => overlay.set(config_key, to_overlay_value(&raw)),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => overlay.set(
                    config_key,
                    OverlayValue::Unsupported(format!("an unreadable value ({})", e)),
                ),
            }
        }

        Ok(overlay)
    }
}

fn to_overlay_value(raw: &RegValue) -> OverlayValue {
    let converted = match raw.vtype {
        REG_DWORD => u32::from_reg_value(raw).map(|v| OverlayValue::Int(i64::from(v))),
        REG_QWORD => u64::from_reg_value(raw).map(|v| match i64::try_from(v) {
            Ok(n) => OverlayValue::Int(n),
            Err(_) => OverlayValue::Unsupported(format!("the number {}", v)),
        }),
        REG_SZ | REG_EXPAND_SZ => String::from_reg_value(raw).map(OverlayValue::Text),
        REG_MULTI_SZ => Vec::<String>::from_reg_value(raw).map(OverlayValue::List),
        ref other => Ok(OverlayValue::Unsupported(format!("a {:?} value", other))),
    };

    converted.unwrap_or_else(|e| OverlayValue::Unsupported(format!("a corrupt value ({})", e)))
}
