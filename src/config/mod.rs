use std::{
    env, fs,
    io::Write,
    path::{Path, PathBuf},
};

use dirs::home_dir;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{LedgerError, Result};

const HOME_ENV: &str = "LUCA_HOME";
const DEFAULT_DIR_NAME: &str = ".luca";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// Persisted user preferences. Every field is optional; command-line flags
/// and environment variables take precedence.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csv_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

impl Config {
    /// Picks the CSV directory: `explicit` (flag or `LUCA_CSV_DIR`) first,
    /// then the configured one.
    pub fn resolve_csv_dir(&self, explicit: Option<PathBuf>) -> Result<PathBuf> {
        explicit
            .filter(|dir| !dir.as_os_str().is_empty())
            .or_else(|| self.csv_dir.clone())
            .ok_or_else(|| {
                LedgerError::Config(
                    "CSV dir not set (--csv-dir flag, LUCA_CSV_DIR env or config file)".into(),
                )
            })
    }
}

/// Returns the application data directory, defaulting to `~/.luca`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: impl AsRef<Path>) -> Self {
        Self {
            path: base.as_ref().join(CONFIG_FILE),
        }
    }

    /// Reads the config file, or returns defaults when there is none.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| {
            LedgerError::Config(format!("{}: {}", self.path.display(), err))
        })
    }

    /// Writes the config through a temporary file and renames it into place.
    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        let mut file = fs::File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path());
        assert_eq!(manager.load().unwrap(), Config::default());
    }

    #[test]
    fn save_then_load_preserves_fields() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().join("nested"));
        let config = Config {
            csv_dir: Some(PathBuf::from("/data/books")),
            log_filter: Some("luca_core=debug".into()),
        };
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
        assert!(!tmp_path(manager.path()).exists());
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "{ not json").unwrap();
        let err = ConfigManager::with_base_dir(dir.path()).load().unwrap_err();
        assert!(matches!(err, LedgerError::Config(_)));
    }

    #[test]
    fn explicit_csv_dir_wins() {
        let config = Config {
            csv_dir: Some(PathBuf::from("from-config")),
            log_filter: None,
        };
        assert_eq!(
            config.resolve_csv_dir(Some(PathBuf::from("from-flag"))).unwrap(),
            PathBuf::from("from-flag")
        );
        assert_eq!(
            config.resolve_csv_dir(None).unwrap(),
            PathBuf::from("from-config")
        );
        assert!(matches!(
            Config::default().resolve_csv_dir(Some(PathBuf::new())),
            Err(LedgerError::Config(_))
        ));
    }
}
