//! Content display-name cache.
//!
//! One `id<TAB>name` record per line, so the file stays greppable and
//! hand-editable.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::pool::ContentId;

/// Cache of human-readable content names, backed by a text file.
#[derive(Debug, Clone)]
pub struct NameStore {
    path: PathBuf,
    names: BTreeMap<ContentId, String>,
}

impl NameStore {
    /// Default path: `~/.local/state/cdm/names.txt`.
    pub fn default_path() -> Result<PathBuf> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("cdm")?;
        Ok(xdg_dirs.get_state_home().join("cdm").join("names.txt"))
    }

    /// Load the cache at `path`. Missing file means an empty cache;
    /// unreadable files and malformed lines are logged and skipped.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut names = BTreeMap::new();

        let data = match std::fs::read_to_string(&path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Self { path, names };
            }
            Err(e) => {
                tracing::warn!("failed to load name cache {}: {}", path.display(), e);
                return Self { path, names };
            }
        };

        for line in data.lines() {
            if line.is_empty() {
                continue;
            }
            match line.split_once('\t') {
                Some((id, name)) if !name.is_empty() => match id.parse::<ContentId>() {
                    Ok(id) => {
                        names.insert(id, name.to_string());
                    }
                    Err(_) => {
                        tracing::warn!("skipping name cache record with bad id: {:?}", line);
                    }
                },
                _ => {
                    tracing::warn!("skipping malformed name cache record: {:?}", line);
                }
            }
        }

        Self { path, names }
    }

    pub fn get(&self, id: ContentId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Record a name. Blank names are ignored.
    pub fn set(&mut self, id: ContentId, name: &str) {
        let name = name.trim();
        if !name.is_empty() {
            self.names.insert(id, name.to_string());
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Rewrite the whole backing file. Failures are logged, never fatal.
    pub fn save(&self) {
        if let Err(e) = self.try_save() {
            tracing::warn!("failed to save name cache {}: {:#}", self.path.display(), e);
        }
    }

    fn try_save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
        }
        let mut out = String::new();
        for (id, name) in &self.names {
            let _ = writeln!(out, "{id}\t{name}");
        }
        std::fs::write(&self.path, out)
            .with_context(|| format!("write {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = NameStore::load(dir.path().join("names.txt"));
        assert!(store.is_empty());
        assert_eq!(store.get(440), None);
    }

    #[test]
    fn set_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("names.txt");

        let mut store = NameStore::load(&path);
        store.set(440, "Team Fortress 2");
        store.set(730, "Counter-Strike 2");
        store.save();

        let reloaded = NameStore::load(&path);
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.get(440), Some("Team Fortress 2"));
        assert_eq!(reloaded.get(730), Some("Counter-Strike 2"));
    }

    #[test]
    fn blank_names_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = NameStore::load(dir.path().join("names.txt"));
        store.set(440, "   ");
        assert!(store.is_empty());
    }

    #[test]
    fn malformed_lines_are_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("names.txt");
        std::fs::write(
            &path,
            "440\tTeam Fortress 2\nno-tab-here\nnot-a-number\tGame\n730\tCounter-Strike 2\n",
        )
        .unwrap();

        let store = NameStore::load(&path);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(440), Some("Team Fortress 2"));
        assert_eq!(store.get(730), Some("Counter-Strike 2"));
    }

    #[test]
    fn names_may_contain_further_tabs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("names.txt");
        std::fs::write(&path, "99\tOdd\tName\n").unwrap();
        let store = NameStore::load(&path);
        assert_eq!(store.get(99), Some("Odd\tName"));
    }
}
