// Quota Notify Library - Public API

// Re-export error types
pub mod error;
pub use error::{QuotaError, Result};

// Module declarations
pub mod core;
pub mod platform;
pub mod ui;

// Re-export commonly used types
pub use crate::core::config::Config;
pub use crate::core::monitor::MonitorLoop;
pub use crate::core::resolver::ConfigResolver;

// Initialize logging
pub fn init_logging() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
