use crate::db::initialize::DEFAULT_EMPLOYEE_ID;
use crate::db::pool::DEFAULT_BUSY_TIMEOUT_MS;
use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    /// Actor used when `--as` is not given.
    #[serde(default = "default_user")]
    pub default_user: String,
    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_busy_timeout")]
    pub busy_timeout_ms: u64,
    /// SQL script used by `init` to seed profiles on a fresh database.
    #[serde(default)]
    pub seed_file: Option<String>,
    #[serde(default = "default_allow_role_changes")]
    pub allow_role_changes: bool,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_user() -> String {
    DEFAULT_EMPLOYEE_ID.to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}
fn default_busy_timeout() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}
fn default_allow_role_changes() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            default_user: default_user(),
            log_level: default_log_level(),
            busy_timeout_ms: default_busy_timeout(),
            seed_file: None,
            allow_role_changes: default_allow_role_changes(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory (`~/.rtimesheet`)
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rtimesheet")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rtimesheet.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rtimesheet.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)?;
        let mut cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
        Ok(cfg)
    }

    /// Seed script path, if configured.
    pub fn seed_path(&self) -> Option<PathBuf> {
        self.seed_file.as_deref().map(expand_tilde)
    }

    /// Write the configuration file (creating the config directory).
    pub fn save(&self) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let yaml = serde_yaml::to_string(self)?;
        let path = Self::config_file();
        let mut file = fs::File::create(&path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: Config = serde_yaml::from_str("database: /tmp/x.sqlite\n").unwrap();
        assert_eq!(cfg.database, "/tmp/x.sqlite");
        assert_eq!(cfg.default_user, DEFAULT_EMPLOYEE_ID);
        assert_eq!(cfg.log_level, "warn");
        assert_eq!(cfg.busy_timeout_ms, DEFAULT_BUSY_TIMEOUT_MS);
        assert!(cfg.allow_role_changes);
        assert!(cfg.seed_file.is_none());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let cfg = Config::load_from(Path::new("/nonexistent/rtimesheet.conf")).unwrap();
        assert_eq!(cfg.log_level, "warn");
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let mut path = std::env::temp_dir();
        path.push("rtimesheet_bad_config.conf");
        fs::write(&path, "busy_timeout_ms: [not a number]\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        fs::remove_file(&path).ok();
    }
}
