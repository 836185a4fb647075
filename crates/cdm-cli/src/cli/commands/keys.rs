//! `cdm key` – content decryption-key cache access.

use anyhow::{Context, Result};
use cdm_core::pool::ContentId;
use cdm_core::stores::KeyStore;

pub fn run_key_get(content_id: ContentId) -> Result<()> {
    let store = KeyStore::load(KeyStore::default_path()?);
    match store.get(content_id) {
        Some(key) => println!("{}", hex::encode(key)),
        None => println!("no cached key for {}", content_id),
    }
    Ok(())
}

pub fn run_key_set(content_id: ContentId, hex_key: &str) -> Result<()> {
    let key = hex::decode(hex_key.trim()).context("key must be hex-encoded")?;
    if key.is_empty() {
        anyhow::bail!("refusing to cache an empty key");
    }
    let mut store = KeyStore::load(KeyStore::default_path()?);
    store.set(content_id, key);
    store.save();
    println!("cached key for {}", content_id);
    Ok(())
}
