//! User configuration and the ~/.dailychess/ data directory.

use crate::error::{Error, Result};
use crate::puzzle::Promotion;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info};

pub const DATA_DIR_NAME: &str = ".dailychess";
pub const CONFIG_FILE: &str = "config.toml";
pub const LOG_FILE: &str = "dailychess.log";

/// Get the ~/.dailychess/ directory path, creating it if needed.
pub fn data_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or(Error::NoHomeDir)?;
    let dir = home_dir.join(DATA_DIR_NAME);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Piece used for promotions the solution does not spell out
    pub default_promotion: Promotion,
    /// How long the wrong-move feedback stays visible
    pub feedback_millis: u64,
    /// External TOML catalog replacing the built-in puzzles
    pub catalog_path: Option<PathBuf>,
    /// Progress file name (inside the data directory) or absolute path
    pub stats_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_promotion: Promotion::Queen,
            feedback_millis: 500,
            catalog_path: None,
            stats_file: PathBuf::from("stats.json"),
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read `path`. A missing file yields defaults; any other failure is an error.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Load `path` (or the default location), logging and falling back to
    /// defaults when the file is unreadable or malformed.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match data_dir() {
                Ok(dir) => dir.join(CONFIG_FILE),
                Err(_) => return Self::default(),
            },
        };
        match Self::load(&path) {
            Ok(config) => {
                info!(target: "dailychess", path = %path.display(), "Configuration loaded");
                config
            }
            Err(e) => {
                error!(target: "dailychess", path = %path.display(), error = %e, "Bad configuration, using defaults");
                Self::default()
            }
        }
    }

    pub fn feedback_duration(&self) -> Duration {
        Duration::from_millis(self.feedback_millis)
    }

    /// Resolve `stats_file` against `base` unless it is already absolute.
    pub fn stats_path(&self, base: &Path) -> PathBuf {
        if self.stats_file.is_absolute() {
            self.stats_file.clone()
        } else {
            base.join(&self.stats_file)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.default_promotion, Promotion::Queen);
        assert_eq!(config.feedback_duration(), Duration::from_millis(500));
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str("default_promotion = \"knight\"").unwrap();
        assert_eq!(config.default_promotion, Promotion::Knight);
        assert_eq!(config.feedback_millis, 500);
        assert_eq!(config.stats_file, PathBuf::from("stats.json"));
    }

    #[test]
    fn test_full_toml() {
        let text = r#"
            default_promotion = "rook"
            feedback_millis = 250
            catalog_path = "/tmp/puzzles.toml"
            stats_file = "/var/lib/stats.json"
        "#;
        let config = Config::from_toml_str(text).unwrap();
        assert_eq!(config.default_promotion, Promotion::Rook);
        assert_eq!(config.feedback_duration(), Duration::from_millis(250));
        assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/puzzles.toml")));
        assert_eq!(
            config.stats_path(Path::new("/home/x/.dailychess")),
            PathBuf::from("/var/lib/stats.json")
        );
    }

    #[test]
    fn test_relative_stats_path() {
        let config = Config::default();
        assert_eq!(
            config.stats_path(Path::new("/home/x/.dailychess")),
            PathBuf::from("/home/x/.dailychess/stats.json")
        );
    }

    #[test]
    fn test_malformed_toml_is_error() {
        assert!(matches!(
            Config::from_toml_str("default_promotion = \"king\""),
            Err(Error::Toml { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_default() {
        let config = Config::load(Path::new("/nonexistent/dailychess/config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }
}
