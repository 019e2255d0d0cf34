//! Volume samples as handed over by the OS collaborator.

use crate::core::config::DriveLetter;
use crate::error::Result;

/// Capacity snapshot of one mounted volume.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeSample {
    /// Volume label as reported by the OS, possibly empty.
    pub label: String,
    /// Mount point, e.g. `C:\`.
    pub mount_point: String,
    pub total_bytes: u64,
    pub free_bytes: u64,
    /// False for volumes the OS lists but cannot currently read (empty card readers etc.).
    pub ready: bool,
}

impl VolumeSample {
    /// Ready and with a known capacity.
    pub fn is_ready(&self) -> bool {
        self.ready && self.total_bytes > 0
    }

    pub fn percent_free(&self) -> f64 {
        if self.total_bytes == 0 {
            return 0.0;
        }
        (self.free_bytes as f64 / self.total_bytes as f64) * 100.0
    }

    /// Letter of a `X:`-style mount point; `None` for anything else.
    pub fn letter(&self) -> Option<DriveLetter> {
        drive_letter_of(&self.mount_point)
    }

    /// Name used in alert messages.
    pub fn display_name(&self) -> &str {
        if self.mount_point.is_empty() {
            &self.label
        } else {
            &self.mount_point
        }
    }
}

/// Extract the drive letter of a path like `C:` or `c:\`.
pub fn drive_letter_of(path: &str) -> Option<DriveLetter> {
    let mut chars = path.chars();
    let letter = chars.next()?;
    match chars.next() {
        Some(':') => DriveLetter::new(letter),
        _ => None,
    }
}

/// Source of volume samples, queried once per tick.
pub trait VolumeSource {
    fn volumes(&mut self) -> Result<Vec<VolumeSample>>;
}
