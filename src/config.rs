// src/config.rs
//
// Application configuration
//
// Resolution order for the config file:
// 1. Explicit path (CLI flag)
// 2. MANGASHELF_CONFIG environment variable
// 3. {config_dir}/mangashelf/config.toml
// 4. Built-in defaults (no file)
//
// Environment overrides are applied last, on top of whatever was loaded.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

pub const CONFIG_ENV_VAR: &str = "MANGASHELF_CONFIG";
pub const GOOGLE_BOOKS_KEY_ENV_VAR: &str = "MANGASHELF_GOOGLE_BOOKS_KEY";
pub const DB_PATH_ENV_VAR: &str = "MANGASHELF_DB_PATH";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub google_books: GoogleBooksConfig,
    pub jikan: JikanConfig,
    pub mangadex: MangaDexConfig,
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub log_level: LogLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleBooksConfig {
    pub base_url: String,
    /// Optional key for higher rate limits. Sent as the `key` query parameter.
    pub api_key: Option<String>,
}

impl Default for GoogleBooksConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.googleapis.com/books/v1/volumes".to_string(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JikanConfig {
    pub base_url: String,
}

impl Default for JikanConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.jikan.moe/v4".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MangaDexConfig {
    pub base_url: String,
    pub cover_base_url: String,
}

impl Default for MangaDexConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.mangadex.org".to_string(),
            cover_base_url: "https://uploads.mangadex.org/covers".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Overrides the default `{data_dir}/mangashelf/mangashelf.db`
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl AppConfig {
    /// Load configuration following the documented priority order
    pub fn load(explicit_path: Option<&Path>) -> AppResult<Self> {
        let mut config = match Self::locate_file(explicit_path)? {
            Some(path) => {
                log::debug!("Loading configuration from {}", path.display());
                Self::from_file(&path)?
            }
            None => Self::default(),
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse a TOML configuration file
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        Ok(toml::from_str(content)?)
    }

    fn locate_file(explicit_path: Option<&Path>) -> AppResult<Option<PathBuf>> {
        // An explicitly requested file must exist
        if let Some(path) = explicit_path {
            if !path.exists() {
                return Err(AppError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Ok(Some(path.to_path_buf()));
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let path = PathBuf::from(path);
            if !path.exists() {
                return Err(AppError::Config(format!(
                    "{} points to a missing file: {}",
                    CONFIG_ENV_VAR,
                    path.display()
                )));
            }
            return Ok(Some(path));
        }

        Ok(default_config_path().filter(|path| path.exists()))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(GOOGLE_BOOKS_KEY_ENV_VAR) {
            if !key.trim().is_empty() {
                self.google_books.api_key = Some(key);
            }
        }

        if let Ok(path) = std::env::var(DB_PATH_ENV_VAR) {
            if !path.trim().is_empty() {
                self.database.path = Some(PathBuf::from(path));
            }
        }
    }
}

/// `{config_dir}/mangashelf/config.toml`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("mangashelf").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(
            config.google_books.base_url,
            "https://www.googleapis.com/books/v1/volumes"
        );
        assert!(config.google_books.api_key.is_none());
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.database.path.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            log_level = "debug"

            [google_books]
            api_key = "abc123"
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.google_books.api_key.as_deref(), Some("abc123"));
        assert_eq!(
            config.google_books.base_url,
            "https://www.googleapis.com/books/v1/volumes"
        );
        assert_eq!(config.jikan.base_url, "https://api.jikan.moe/v4");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = AppConfig::from_toml_str("log_level = [");
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_load_from_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[http]\ntimeout_secs = 5\n\n[database]\npath = \"/tmp/shelf.db\"").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.http.timeout_secs, 5);
        assert_eq!(config.database.path, Some(PathBuf::from("/tmp/shelf.db")));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let result = AppConfig::load(Some(Path::new("/definitely/not/here/config.toml")));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(log::LevelFilter::from(LogLevel::Warn), log::LevelFilter::Warn);
        assert_eq!(log::LevelFilter::from(LogLevel::Trace), log::LevelFilter::Trace);
    }
}
