//! Read-only host penalty book.
//!
//! Maps a server host to an externally maintained demerit score; higher
//! penalties push a server down the ranking. The book is loaded once per
//! process from a JSON file under the XDG state dir and is never written
//! back here; maintaining the file belongs to whoever tracks the demerits.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Result;

/// Host → penalty mapping. Unknown hosts rank best (penalty 0).
#[derive(Debug, Clone, Default)]
pub struct PenaltyBook {
    entries: HashMap<String, u32>,
}

impl PenaltyBook {
    /// Empty book: every host ranks equally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a book from explicit entries.
    pub fn from_entries(entries: HashMap<String, u32>) -> Self {
        Self { entries }
    }

    /// Penalty for a host, if one is recorded.
    pub fn get(&self, host: &str) -> Option<u32> {
        self.entries.get(host).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Default path for the penalty file: `~/.local/state/cdm/penalties.json`.
    pub fn default_path() -> Result<PathBuf> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("cdm")?;
        Ok(xdg_dirs.get_state_home().join("cdm").join("penalties.json"))
    }

    /// Load the book from `path`. A missing file is an empty book; an
    /// unreadable or malformed file is logged and treated as empty. Never
    /// fatal.
    pub fn load_from_path(path: &Path) -> Self {
        let bytes = match std::fs::read(path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no penalty file at {}", path.display());
                return Self::new();
            }
            Err(e) => {
                tracing::warn!("failed to read penalty file {}: {}", path.display(), e);
                return Self::new();
            }
        };
        match serde_json::from_slice::<HashMap<String, u32>>(&bytes) {
            Ok(entries) => Self { entries },
            Err(e) => {
                tracing::warn!("failed to parse penalty file {}: {}", path.display(), e);
                Self::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn unknown_hosts_have_no_penalty() {
        let book = PenaltyBook::new();
        assert_eq!(book.get("cdn.example.net"), None);
        assert!(book.is_empty());
    }

    #[test]
    fn loads_entries_from_json() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(br#"{"slow.example.net": 3, "flaky.example.net": 1}"#)
            .unwrap();
        f.flush().unwrap();

        let book = PenaltyBook::load_from_path(f.path());
        assert_eq!(book.len(), 2);
        assert_eq!(book.get("slow.example.net"), Some(3));
        assert_eq!(book.get("flaky.example.net"), Some(1));
        assert_eq!(book.get("fast.example.net"), None);
    }

    #[test]
    fn missing_file_is_empty_book() {
        let dir = tempfile::tempdir().unwrap();
        let book = PenaltyBook::load_from_path(&dir.path().join("absent.json"));
        assert!(book.is_empty());
    }

    #[test]
    fn malformed_file_is_empty_book() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"{ not json").unwrap();
        f.flush().unwrap();
        let book = PenaltyBook::load_from_path(f.path());
        assert!(book.is_empty());
    }
}
