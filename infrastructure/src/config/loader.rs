//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Project-level config file names, checked in order
const PROJECT_CONFIG_FILES: [&str; 2] = ["toolrelay.toml", ".toolrelay.toml"];

/// Environment variable prefix (`TOOLRELAY_TIMEOUTS__AGGREGATE_MS=500`)
const ENV_PREFIX: &str = "TOOLRELAY_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `TOOLRELAY_*` environment variables (`__` separates sections)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./toolrelay.toml` or `./.toolrelay.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/toolrelay/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(Box::new)
    }

    /// Load a single file on top of defaults, ignoring every other source
    pub fn load_file(path: &Path) -> Result<FileConfig, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns `XDG_CONFIG_HOME/toolrelay/config.toml` if set,
    /// otherwise falls back to `~/.config/toolrelay/config.toml`
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("toolrelay").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources() {
        println!("Configuration sources (in priority order):");
        println!("  [     ] Env:     {}*", ENV_PREFIX);

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./toolrelay.toml or ./.toolrelay.toml");
        }

        if let Some(path) = Self::global_config_path() {
            let marker = if path.exists() { "FOUND" } else { "     " };
            println!("  [{}] Global:  {}", marker, path.display());
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("toolrelay"));
    }

    #[test]
    fn test_load_file_merges_over_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[timeouts]
aggregate_ms = 750

[warehouses.inventory]
A = 1
"#
        )
        .unwrap();

        let config = ConfigLoader::load_file(file.path()).unwrap();
        assert_eq!(config.timeouts.aggregate_ms, 750);
        assert_eq!(config.timeouts.probe_ms, 2_000);
        assert_eq!(config.warehouses.inventory.count_for("A"), 1);
        assert_eq!(config.cache.capacity, 100);
    }

    #[test]
    fn test_env_overrides_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[cache]\ncapacity = 10\n\n[timeouts]\nprobe_ms = 300").unwrap();

        // Only this test touches the variable, and no other test calls `load`
        unsafe { std::env::set_var("TOOLRELAY_CACHE__CAPACITY", "7") };
        let loaded = ConfigLoader::load(Some(&file.path().to_path_buf()));
        unsafe { std::env::remove_var("TOOLRELAY_CACHE__CAPACITY") };

        let config = loaded.unwrap();
        assert_eq!(config.cache.capacity, 7);
        assert_eq!(config.timeouts.probe_ms, 300);
    }

    #[test]
    fn test_load_file_rejects_bad_types() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[cache]\ncapacity = \"lots\"").unwrap();

        assert!(ConfigLoader::load_file(file.path()).is_err());
    }
}
