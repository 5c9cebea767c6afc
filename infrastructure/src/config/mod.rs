//! Configuration file loading for toolrelay
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `TOOLRELAY_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./toolrelay.toml` or `./.toolrelay.toml`
//! 4. Global: `$XDG_CONFIG_HOME/toolrelay/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_STATUS_URL, FileCacheConfig, FileCatalogConfig, FileConfig,
    FileExternalServiceConfig, FileLoggingConfig, FileTimeoutsConfig, FileWarehousesConfig,
};
pub use loader::ConfigLoader;
