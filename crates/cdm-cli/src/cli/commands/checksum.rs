//! `cdm checksum` – compute SHA-256 of a downloaded file.

use anyhow::Result;
use cdm_core::checksum;
use std::path::Path;

/// Print SHA-256 of the file; with `expected`, fail on mismatch.
pub fn run_checksum(path: &Path, expected: Option<&str>) -> Result<()> {
    let digest = checksum::sha256_path(path)?;
    println!("{}  {}", digest, path.display());
    if let Some(expected) = expected {
        if !digest.eq_ignore_ascii_case(expected.trim()) {
            anyhow::bail!("checksum mismatch: expected {}", expected.trim());
        }
        println!("OK");
    }
    Ok(())
}
