//! JSON configuration file overlay.
//!
//! The file is a flat object using the same key names as the registry, matched
//! case-insensitively:
//!
//! ```json
//! { "warnPercent": 15, "warnBelow": 524288000, "Drives": ["C", "D"] }
//! ```

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::config::{ConfigKey, ConfigOverlay, OverlayValue};
use crate::core::resolver::OverlaySource;
use crate::error::{QuotaError, Result};

pub struct JsonFileOverlay {
    name: String,
    path: PathBuf,
}

impl JsonFileOverlay {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        Self {
            name: format!("config file {}", path.display()),
            path,
        }
    }

    /// `<config_dir>/quota-notify/config.json`, when the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("quota-notify").join("config.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OverlaySource for JsonFileOverlay {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<ConfigOverlay> {
        let mut overlay = ConfigOverlay::new(self.name.clone());

        if !self.path.exists() {
            log::debug!("No config file at {:?}", self.path);
            return Ok(overlay);
        }

        let data = fs::read_to_string(&self.path)?;
        if data.trim().is_empty() {
            return Ok(overlay);
        }

        let document: Value = serde_json::from_str(&data)?;
        let Value::Object(fields) = document else {
            return Err(QuotaError::config(format!(
                "expected a JSON object at the top of {:?}",
                self.path
            )));
        };

        for key in ConfigKey::ALL {
            if let Some(value) = lookup(&fields, key).and_then(to_overlay_value) {
                overlay.set(key, value);
            }
        }

        Ok(overlay)
    }
}

fn lookup(fields: &Map<String, Value>, key: ConfigKey) -> Option<&Value> {
    fields
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key.as_str()))
        .map(|(_, value)| value)
}

/// `null` counts as absent.
fn to_overlay_value(value: &Value) -> Option<OverlayValue> {
    let converted = match value {
        Value::Null => return None,
        Value::Bool(flag) => OverlayValue::Int(i64::from(*flag)),
        Value::Number(number) => match number.as_i64() {
            Some(n) => OverlayValue::Int(n),
            None => OverlayValue::Unsupported(format!("the number {}", number)),
        },
        Value::String(text) => OverlayValue::Text(text.clone()),
        Value::Array(items) => {
            let strings: Option<Vec<String>> = items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect();
            match strings {
                Some(list) => OverlayValue::List(list),
                None => OverlayValue::Unsupported("an array of non-strings".to_string()),
            }
        }
        Value::Object(_) => OverlayValue::Unsupported("an object".to_string()),
    };
    Some(converted)
}
