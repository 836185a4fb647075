//! Content decryption-key cache.
//!
//! Structured key/value text (TOML) with one `[keys]` table mapping content
//! id to a hex-encoded key.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::pool::ContentId;

/// Cache of binary decryption keys, backed by a TOML file.
#[derive(Debug, Clone)]
pub struct KeyStore {
    path: PathBuf,
    keys: BTreeMap<ContentId, Vec<u8>>,
}

impl KeyStore {
    /// Default path: `~/.local/state/cdm/keys.toml`.
    pub fn default_path() -> Result<PathBuf> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("cdm")?;
        Ok(xdg_dirs.get_state_home().join("cdm").join("keys.toml"))
    }

    /// Load the cache at `path`. Missing file means an empty cache; an
    /// unparsable file or individual bad records are logged and skipped.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut keys = BTreeMap::new();

        let data = match std::fs::read_to_string(&path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Self { path, keys };
            }
            Err(e) => {
                tracing::warn!("failed to load key cache {}: {}", path.display(), e);
                return Self { path, keys };
            }
        };

        let table: toml::Table = match data.parse() {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!("failed to parse key cache {}: {}", path.display(), e);
                return Self { path, keys };
            }
        };

        let Some(toml::Value::Table(records)) = table.get("keys") else {
            return Self { path, keys };
        };
        for (id, value) in records {
            let Ok(id) = id.parse::<ContentId>() else {
                tracing::warn!("skipping key cache record with bad id: {:?}", id);
                continue;
            };
            let Some(hex_key) = value.as_str() else {
                tracing::warn!("skipping non-string key cache record for {}", id);
                continue;
            };
            if hex_key.is_empty() {
                continue;
            }
            match hex::decode(hex_key) {
                Ok(key) => {
                    keys.insert(id, key);
                }
                Err(_) => {
                    tracing::warn!("skipping key cache record with bad hex for {}", id);
                }
            }
        }

        Self { path, keys }
    }

    pub fn get(&self, id: ContentId) -> Option<&[u8]> {
        self.keys.get(&id).map(Vec::as_slice)
    }

    pub fn set(&mut self, id: ContentId, key: Vec<u8>) {
        self.keys.insert(id, key);
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Rewrite the whole backing file. Failures are logged, never fatal.
    pub fn save(&self) {
        if let Err(e) = self.try_save() {
            tracing::warn!("failed to save key cache {}: {:#}", self.path.display(), e);
        }
    }

    fn try_save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
        }
        let records: toml::Table = self
            .keys
            .iter()
            .map(|(id, key)| (id.to_string(), toml::Value::String(hex::encode(key))))
            .collect();
        let mut file = toml::Table::new();
        file.insert("keys".to_string(), toml::Value::Table(records));
        std::fs::write(&self.path, toml::to_string_pretty(&file)?)
            .with_context(|| format!("write {}", self.path.display()))?;
        Ok(())
    }
}
