use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::app::timer::DEFAULT_SEMESTERS;

/// Overrides `access_token` from the config file.
pub const TOKEN_ENV: &str = "JOURNAL_TIMER_TOKEN";

const APP_DIR: &str = "journal-timer";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Base URL of the Sheets v4 API
    #[serde(default = "default_sheets_api_url")]
    pub sheets_api_url: String,
    /// JSON file mapping journal names to spreadsheet ids. Defaults to
    /// `journal_mapping.json` next to this config.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journals_path: Option<PathBuf>,
    #[serde(default = "default_semesters")]
    pub semesters: Vec<String>,
    /// Google service-account JSON key shared with the journals' spreadsheets. Defaults to
    /// `svc.json` next to this config.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_account_path: Option<PathBuf>,
    /// OAuth access token with the spreadsheets scope. Used instead of the service account
    /// when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

fn default_sheets_api_url() -> String {
    sheets::DEFAULT_SHEETS_API_URL.to_string()
}

fn default_semesters() -> Vec<String> {
    DEFAULT_SEMESTERS.iter().map(|s| s.to_string()).collect()
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            sheets_api_url: default_sheets_api_url(),
            journals_path: None,
            semesters: default_semesters(),
            service_account_path: None,
            access_token: None,
        }
    }
}

impl TimerConfig {
    pub fn config_dir() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join(APP_DIR))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("journal-timer.log"))
    }

    /// Load config from disk. Returns default config if file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(path, raw)
            .with_context(|| format!("Failed to write config at {}", path.display()))?;
        Ok(())
    }

    pub fn journals_path(&self) -> Result<PathBuf> {
        match &self.journals_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("journal_mapping.json")),
        }
    }

    pub fn service_account_path(&self) -> Result<PathBuf> {
        match &self.service_account_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("svc.json")),
        }
    }

    /// Token from the environment, falling back to the config file.
    pub fn access_token(&self) -> Option<String> {
        self.access_token_with(std::env::var(TOKEN_ENV).ok())
    }

    pub(crate) fn access_token_with(&self, from_env: Option<String>) -> Option<String> {
        from_env
            .or_else(|| self.access_token.clone())
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: TimerConfig = toml::from_str(r#"access_token = "abc""#).unwrap();
        assert_eq!(config.sheets_api_url, "https://sheets.googleapis.com/v4");
        assert_eq!(config.semesters, vec!["Fall", "Spring"]);
        assert_eq!(config.journals_path, None);
        assert_eq!(config.service_account_path, None);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = TimerConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, TimerConfig::default());
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = TimerConfig {
            journals_path: Some(PathBuf::from("/srv/journals.json")),
            semesters: vec!["Summer".to_string()],
            service_account_path: Some(PathBuf::from("/srv/svc.json")),
            ..TimerConfig::default()
        };

        config.save_to(&path).unwrap();

        assert_eq!(TimerConfig::load_from(&path).unwrap(), config);
        assert_eq!(
            config.journals_path().unwrap(),
            PathBuf::from("/srv/journals.json")
        );
        assert_eq!(
            config.service_account_path().unwrap(),
            PathBuf::from("/srv/svc.json")
        );
    }

    #[test]
    fn bad_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "semesters = 3").unwrap();
        let err = TimerConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn environment_token_wins_over_file() {
        let config = TimerConfig {
            access_token: Some("from-file".to_string()),
            ..TimerConfig::default()
        };
        assert_eq!(
            config.access_token_with(Some("from-env".to_string())),
            Some("from-env".to_string())
        );
        assert_eq!(config.access_token_with(None), Some("from-file".to_string()));
        assert_eq!(
            TimerConfig::default().access_token_with(Some("  ".to_string())),
            None
        );
    }
}
