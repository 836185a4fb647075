//! Checksum verification for downloaded content files.
//!
//! Computed on demand, never inline with transfers.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const READ_CHUNK: usize = 128 * 1024;

/// SHA-256 of a file as lowercase hex. Streams in chunks so large content
/// files don't get pulled into memory.
pub fn sha256_path(path: &Path) -> Result<String> {
    let mut f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; READ_CHUNK];
    loop {
        let n = f
            .read(&mut buf)
            .with_context(|| format!("read {}", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Compare a file's SHA-256 against an expected hex digest
/// (case-insensitive).
pub fn verify_sha256(path: &Path, expected: &str) -> Result<bool> {
    let actual = sha256_path(path)?;
    Ok(actual.eq_ignore_ascii_case(expected.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn digest_of_known_content() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"content bytes").unwrap();
        f.flush().unwrap();
        let digest = sha256_path(f.path()).unwrap();
        assert_eq!(
            digest,
            "43111a21c925d75b068166648c15d6bca1d05240bc43a40fb6a1625ba43a76f7"
        );
    }

    #[test]
    fn verify_accepts_uppercase_expected() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"content bytes").unwrap();
        f.flush().unwrap();
        assert!(verify_sha256(
            f.path(),
            "43111A21C925D75B068166648C15D6BCA1D05240BC43A40FB6A1625BA43A76F7"
        )
        .unwrap());
        assert!(!verify_sha256(f.path(), "00").unwrap());
    }
}
