//! Application configuration. Backend URL, data paths, clipboard command.

use serde::Deserialize;
use std::path::PathBuf;

/// Backend used when nothing is configured (local FastAPI dev server).
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// File name of the client cache inside the data directory.
pub const CACHE_FILE: &str = "cache.json";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Lead backend base URL. Read from LEADSENSE_API_URL.
    #[serde(default)]
    pub api_url: Option<String>,

    /// Directory for the client cache and exports. Read from LEADSENSE_DATA_DIR.
    #[serde(default)]
    pub data_dir: Option<String>,

    /// Use the in-memory backend instead of HTTP. Read from LEADSENSE_OFFLINE.
    #[serde(default)]
    pub offline: Option<bool>,

    /// Clipboard program and args (e.g. "xclip -selection clipboard"). Read from LEADSENSE_CLIPBOARD_CMD.
    #[serde(default)]
    pub clipboard_cmd: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        if let Ok(path) = std::env::var("LEADSENSE_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c = c.add_source(config::Environment::with_prefix("LEADSENSE").try_parsing(true));
        c.build()?.try_deserialize()
    }

    /// Returns the backend URL. Defaults to DEFAULT_API_URL.
    pub fn api_url_or_default(&self) -> String {
        self.api_url
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    /// Returns the data directory. Defaults to "./data".
    pub fn data_dir_or_default(&self) -> PathBuf {
        PathBuf::from(self.data_dir.as_deref().unwrap_or("./data"))
    }

    pub fn cache_path(&self) -> PathBuf {
        self.data_dir_or_default().join(CACHE_FILE)
    }

    /// Default target for CSV exports.
    pub fn export_path(&self) -> PathBuf {
        self.data_dir_or_default()
            .join("exports")
            .join("saved_leads.csv")
    }

    pub fn is_offline(&self) -> bool {
        self.offline.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.api_url_or_default(), DEFAULT_API_URL);
        assert_eq!(cfg.cache_path(), PathBuf::from("./data").join("cache.json"));
        assert!(!cfg.is_offline());
    }

    #[test]
    fn test_overrides() {
        let cfg = AppConfig {
            api_url: Some("https://leads.internal".into()),
            data_dir: Some("/tmp/ls".into()),
            offline: Some(true),
            clipboard_cmd: None,
        };
        assert_eq!(cfg.api_url_or_default(), "https://leads.internal");
        assert_eq!(cfg.export_path(), PathBuf::from("/tmp/ls/exports/saved_leads.csv"));
        assert!(cfg.is_offline());
    }

    #[test]
    fn test_blank_url_falls_back() {
        let cfg = AppConfig {
            api_url: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(cfg.api_url_or_default(), DEFAULT_API_URL);
    }
}
