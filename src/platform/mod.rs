// Platform-specific code module

pub mod env_overlay;
pub mod file_overlay;
#[cfg(windows)]
pub mod message_box;
#[cfg(windows)]
pub mod registry;
pub mod volumes;

use std::path::PathBuf;

use crate::core::resolver::ConfigResolver;

// Re-exports for shorter imports
pub use env_overlay::EnvOverlay;
pub use file_overlay::JsonFileOverlay;
#[cfg(windows)]
pub use message_box::MessageBoxNotifier;
#[cfg(windows)]
pub use registry::{RegistryOverlay, RegistryScope};
pub use volumes::SysinfoVolumes;

/// Resolver with every source this platform offers, lowest precedence first:
/// config file, machine registry, user registry (Windows only), environment.
pub fn default_resolver(config_file: Option<PathBuf>) -> ConfigResolver {
    let mut resolver = ConfigResolver::new();

    if let Some(path) = config_file.or_else(JsonFileOverlay::default_path) {
        resolver.push(Box::new(JsonFileOverlay::new(path)));
    }

    #[cfg(windows)]
    {
        resolver.push(Box::new(RegistryOverlay::machine()));
        resolver.push(Box::new(RegistryOverlay::user()));
    }

    resolver.push(Box::new(EnvOverlay::new()));
    resolver
}
