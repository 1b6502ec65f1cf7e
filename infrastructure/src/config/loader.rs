//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Application directory name under the platform config/data dirs.
pub const APP_DIR: &str = "wiz-weather";

/// Project-level config file names, checked in order.
const PROJECT_FILES: [&str; 2] = ["wiz-weather.toml", ".wiz-weather.toml"];

/// Prefix of environment overrides (`WIZ_MODEL__MODEL=...`).
const ENV_PREFIX: &str = "WIZ_";

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `WIZ_` environment variables (`__` separates sections)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./wiz-weather.toml` or `./.wiz-weather.toml`
    /// 4. Global: `~/.config/wiz-weather/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, ConfigError> {
        if let Some(path) = config_path
            && !path.exists()
        {
            return Err(ConfigError::NotFound(path.clone()));
        }

        let figment = Self::file_figment(
            Self::global_config_path().as_deref(),
            Self::project_config_path().as_deref(),
            config_path.map(PathBuf::as_path),
        )
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(|e| ConfigError::Load(Box::new(e)))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Defaults merged with whichever of the given files exist.
    fn file_figment(global: Option<&Path>, project: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));
        for path in [global, project, explicit].into_iter().flatten() {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }
        figment
    }

    /// Get the global config file path
    ///
    /// Returns `$XDG_CONFIG_HOME/wiz-weather/config.toml` (or the platform
    /// equivalent).
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");

        println!("  [ENV  ] Environment: {}*", ENV_PREFIX);

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISS " };
            println!("  [{}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./{} or ./{}", PROJECT_FILES[0], PROJECT_FILES[1]);
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            println!("  [{}] Global:  {}", mark, path.display());
        }

        println!("  [     ] Default: built-in defaults");
    }

    /// The default configuration as TOML (for --print-default-config)
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&FileConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_toml(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.model.model, "gemini-2.0-flash");
        assert!(config.model.tracing_disabled);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path().unwrap();
        assert!(path.to_string_lossy().contains("wiz-weather"));
    }

    #[test]
    fn test_later_files_override_earlier_ones() {
        let dir = tempfile::tempdir().unwrap();
        let global = write_toml(
            &dir,
            "global.toml",
            "[model]\nmodel = \"from-global\"\nmax_tool_turns = 3\n",
        );
        let explicit = write_toml(&dir, "explicit.toml", "[model]\nmodel = \"from-explicit\"\n");

        let config: FileConfig =
            ConfigLoader::file_figment(Some(global.as_path()), None, Some(explicit.as_path()))
                .extract()
                .unwrap();

        assert_eq!(config.model.model, "from-explicit");
        // Keys not set by the explicit file survive from the global one.
        assert_eq!(config.model.max_tool_turns, 3);
        // Untouched sections keep their defaults.
        assert_eq!(config.weather.api_key_env, "WEATHER_API_KEY");
    }

    #[test]
    fn test_missing_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let config: FileConfig = ConfigLoader::file_figment(Some(missing.as_path()), Some(missing.as_path()), None)
            .extract()
            .unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let err = ConfigLoader::load(Some(&missing)).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let bad = write_toml(&dir, "bad.toml", "[model]\nmax_tool_turns = \"many\"\n");

        let result: Result<FileConfig, _> = ConfigLoader::file_figment(None, None, Some(bad.as_path())).extract();
        assert!(result.is_err());
    }

    #[test]
    fn test_default_toml_round_trips() {
        let text = ConfigLoader::default_toml().unwrap();
        assert!(text.contains("[model]"));
        assert!(text.contains("gemini-2.0-flash"));
        let parsed: FileConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, FileConfig::default());
    }
}
