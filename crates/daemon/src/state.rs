use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

pub const APP_NAME: &str = "duolink";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DB_FILE_NAME: &str = "db.sqlite";

pub const DEFAULT_LISTEN_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Port for the HTTP server
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,
    /// Public root issued links are rendered under (e.g., https://paste.example.com)
    #[serde(default)]
    pub site_url: Option<Url>,
}

fn default_listen_port() -> u16 {
    DEFAULT_LISTEN_PORT
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_port: default_listen_port(),
            site_url: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the duolink directory (~/.duolink)
    pub app_dir: PathBuf,
    /// Path to the SQLite database
    pub db_path: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Loaded configuration
    pub config: AppConfig,
}

impl AppState {
    /// Get the duolink directory path (custom or default ~/.duolink)
    pub fn app_dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    /// Initialize a new duolink state directory
    pub fn init(
        custom_path: Option<PathBuf>,
        config: Option<AppConfig>,
    ) -> Result<Self, StateError> {
        let app_dir = Self::app_dir(custom_path)?;

        if app_dir.exists() {
            return Err(StateError::AlreadyInitialized);
        }

        fs::create_dir_all(&app_dir)?;

        let config = config.unwrap_or_default();
        let config_path = app_dir.join(CONFIG_FILE_NAME);
        let config_toml = toml::to_string_pretty(&config)?;
        fs::write(&config_path, config_toml)?;

        // Create empty database (just touch the file, it will be migrated by the service)
        let db_path = app_dir.join(DB_FILE_NAME);
        fs::write(&db_path, "")?;

        Ok(Self {
            app_dir,
            db_path,
            config_path,
            config,
        })
    }

    /// Load existing state from the duolink directory
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let app_dir = Self::app_dir(custom_path)?;

        if !app_dir.exists() {
            return Err(StateError::NotInitialized);
        }

        let db_path = app_dir.join(DB_FILE_NAME);
        let config_path = app_dir.join(CONFIG_FILE_NAME);

        if !db_path.exists() {
            return Err(StateError::MissingFile(DB_FILE_NAME.to_string()));
        }
        if !config_path.exists() {
            return Err(StateError::MissingFile(CONFIG_FILE_NAME.to_string()));
        }

        let config_toml = fs::read_to_string(&config_path)?;
        let config: AppConfig = toml::from_str(&config_toml)?;

        Ok(Self {
            app_dir,
            db_path,
            config_path,
            config,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("duolink directory not initialized. Run 'duolink init' first")]
    NotInitialized,

    #[error("duolink directory already initialized")]
    AlreadyInitialized,

    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("missing required file: {0}")]
    MissingFile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("state");

        let config = AppConfig {
            listen_port: 9191,
            site_url: Some(Url::parse("https://paste.example.com").unwrap()),
        };
        let created = AppState::init(Some(dir.clone()), Some(config.clone())).unwrap();
        assert!(created.db_path.exists());
        assert!(created.config_path.exists());

        let loaded = AppState::load(Some(dir)).unwrap();
        assert_eq!(loaded.config, config);
    }

    #[test]
    fn test_init_twice_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("state");

        AppState::init(Some(dir.clone()), None).unwrap();
        assert!(matches!(
            AppState::init(Some(dir), None),
            Err(StateError::AlreadyInitialized)
        ));
    }

    #[test]
    fn test_load_missing_dir() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(matches!(
            AppState::load(Some(tmp.path().join("nope"))),
            Err(StateError::NotInitialized)
        ));
    }

    #[test]
    fn test_config_defaults_when_fields_absent() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.listen_port, DEFAULT_LISTEN_PORT);
    }
}
