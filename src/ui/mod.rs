// UI and formatting module

pub mod console;
pub mod formatters;

// Re-export commonly used items for cleaner imports
pub use console::ConsoleNotifier;
pub use formatters::{format_check_outcome, format_config_summary, format_interval};
