// Core business logic module

pub mod config;
pub mod drive_state;
pub mod monitor;
pub mod resolver;

// Re-export commonly used items
pub use config::{Config, ConfigKey, ConfigOverlay, DriveLetter, OverlayValue};
pub use drive_state::DriveState;
pub use monitor::{MonitorLoop, Notifier, Phase, TickReport, VolumeSample, VolumeSource};
pub use resolver::{report_warnings, ConfigResolver, OverlaySource, Resolution, ResolveWarning};
