//! Implements LeadCachePort using a JSON file.
//!
//! The file is a flat key-value object. Discovered leads live under a fixed key, so the
//! list survives restarts and backs the lead detail view when no lead is passed in.

use crate::domain::{DiscoveredLead, DomainError};
use crate::ports::LeadCachePort;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// Key under which the last discovered-leads array is stored.
pub const DISCOVERED_LEADS_KEY: &str = "discoveredLeads";

/// JSON file-based key-value cache.
pub struct CacheJson {
    path: PathBuf,
    cache: tokio::sync::RwLock<Map<String, Value>>,
}

impl CacheJson {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cache: tokio::sync::RwLock::new(Map::new()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the file from disk. A missing or unreadable file yields an empty cache.
    pub async fn load(&self) -> Result<(), DomainError> {
        let data = match fs::read_to_string(&self.path).await {
            Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
                warn!(path = %self.path.display(), error = %e, "cache file corrupt; starting empty");
                Map::new()
            }),
            Err(_) => Map::new(),
        };
        *self.cache.write().await = data;
        Ok(())
    }

    /// Typed read of one key. `None` when absent or when the stored value no longer decodes.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let cache = self.cache.read().await;
        let value = cache.get(key)?.clone();
        serde_json::from_value(value)
            .inspect_err(|e| warn!(key, error = %e, "cached value does not decode"))
            .ok()
    }

    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), DomainError> {
        let value = serde_json::to_value(value).map_err(|e| DomainError::Cache(e.to_string()))?;
        self.cache.write().await.insert(key.to_string(), value);
        self.save().await
    }

    /// Write-replace: temp file, fsync, rename over the target.
    async fn save(&self) -> Result<(), DomainError> {
        let json = {
            let data = self.cache.read().await;
            serde_json::to_string_pretty(&*data).map_err(|e| DomainError::Cache(e.to_string()))?
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::Cache(format!("create cache dir: {}", e)))?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| DomainError::Cache(format!("create temp file: {}", e)))?;
        f.write_all(json.as_bytes())
            .await
            .map_err(|e| DomainError::Cache(format!("write temp file: {}", e)))?;
        f.sync_all()
            .await
            .map_err(|e| DomainError::Cache(format!("sync temp file: {}", e)))?;
        drop(f);

        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| DomainError::Cache(format!("atomic rename failed: {}", e)))?;

        debug!(path = %self.path.display(), "cache saved");
        Ok(())
    }
}

#[async_trait::async_trait]
impl LeadCachePort for CacheJson {
    async fn load_discovered(&self) -> Result<Vec<DiscoveredLead>, DomainError> {
        Ok(self.get(DISCOVERED_LEADS_KEY).await.unwrap_or_default())
    }

    async fn store_discovered(&self, leads: &[DiscoveredLead]) -> Result<(), DomainError> {
        self.set(DISCOVERED_LEADS_KEY, leads).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead(name: &str) -> DiscoveredLead {
        DiscoveredLead {
            company_name: name.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_round_trip_through_fresh_instance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("cache.json");

        let cache = CacheJson::new(&path);
        cache.load().await.unwrap();
        assert!(cache.load_discovered().await.unwrap().is_empty());
        cache
            .store_discovered(&[lead("Acme"), lead("Beta")])
            .await
            .unwrap();

        let reopened = CacheJson::new(&path);
        reopened.load().await.unwrap();
        let leads = reopened.load_discovered().await.unwrap();
        assert_eq!(leads.len(), 2);
        assert_eq!(leads[1].company_name, "Beta");
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_stores_under_fixed_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        let cache = CacheJson::new(&path);
        cache.store_discovered(&[lead("Acme")]).await.unwrap();
        cache.set("other", &1u8).await.unwrap();

        let raw: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw[DISCOVERED_LEADS_KEY][0]["company_name"], "Acme");
        assert_eq!(raw["other"], 1);
        assert_eq!(cache.get::<u8>("other").await, Some(1));
        assert_eq!(cache.get::<u8>(DISCOVERED_LEADS_KEY).await, None);
    }

    #[tokio::test]
    async fn test_corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        std::fs::write(&path, "{not json").unwrap();
        let cache = CacheJson::new(&path);
        cache.load().await.unwrap();
        assert!(cache.load_discovered().await.unwrap().is_empty());
    }
}
