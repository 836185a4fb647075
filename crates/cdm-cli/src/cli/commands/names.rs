//! `cdm name` – content display-name cache access.

use anyhow::Result;
use cdm_core::pool::ContentId;
use cdm_core::stores::NameStore;

pub fn run_name_get(content_id: ContentId) -> Result<()> {
    let store = NameStore::load(NameStore::default_path()?);
    match store.get(content_id) {
        Some(name) => println!("{}", name),
        None => println!("no cached name for {}", content_id),
    }
    Ok(())
}

pub fn run_name_set(content_id: ContentId, name: &str) -> Result<()> {
    let mut store = NameStore::load(NameStore::default_path()?);
    store.set(content_id, name);
    store.save();
    println!("cached name for {}", content_id);
    Ok(())
}
