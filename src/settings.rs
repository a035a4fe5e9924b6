use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{MonthcloseError, Result};
use crate::store::DEFAULT_BATCH_SIZE;

/// Overrides `licence.application_token` when set.
pub const LICENCE_TOKEN_ENV: &str = "MONTHCLOSE_LICENCE_TOKEN";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub data_dir: String,
    #[serde(default)]
    pub user_email: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub business_name: String,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default)]
    pub licence: LicenceSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LicenceSettings {
    #[serde(default)]
    pub product_permalink: String,
    #[serde(default)]
    pub application_token: Option<String>,
    #[serde(default)]
    pub webhook_token: Option<String>,
}

impl LicenceSettings {
    pub fn application_token(&self) -> Option<String> {
        std::env::var(LICENCE_TOKEN_ENV)
            .ok()
            .filter(|t| !t.is_empty())
            .or_else(|| self.application_token.clone())
    }
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir().to_string_lossy().to_string(),
            user_email: String::new(),
            user_name: String::new(),
            business_name: String::new(),
            batch_size: default_batch_size(),
            licence: LicenceSettings::default(),
        }
    }
}

impl Settings {
    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("monthclose.db")
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("monthclose")
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join("monthclose")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), "ignoring unreadable settings: {e}");
            Settings::default()
        })
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| MonthcloseError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

pub fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| PathBuf::from(path))
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            data_dir: "/tmp/test".to_string(),
            user_email: "ana@example.com".to_string(),
            user_name: "Ana".to_string(),
            business_name: "Café Ana".to_string(),
            batch_size: 100,
            licence: LicenceSettings {
                product_permalink: "monthly".to_string(),
                application_token: None,
                webhook_token: Some("hook".to_string()),
            },
        };
        let json = serde_json::to_string_pretty(&settings).unwrap();
        std::fs::write(&path, &json).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let loaded: Settings = serde_json::from_str(&content).unwrap();
        assert_eq!(loaded.user_email, "ana@example.com");
        assert_eq!(loaded.business_name, "Café Ana");
        assert_eq!(loaded.batch_size, 100);
        assert_eq!(loaded.licence.webhook_token.as_deref(), Some("hook"));
    }

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert!(s.user_email.is_empty());
        assert_eq!(s.batch_size, 500);
        assert!(s.db_path().ends_with("monthclose.db"));
    }

    #[test]
    fn test_load_merges_with_defaults() {
        let json = r#"{"data_dir": "/tmp/test", "user_email": "bob@example.com"}"#;
        let s: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(s.batch_size, 500);
        assert_eq!(s.user_email, "bob@example.com");
        assert!(s.licence.product_permalink.is_empty());
    }
}
