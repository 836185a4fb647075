//! `cdm servers` – resolve and print the ranked delivery servers for a
//! content id.

use anyhow::Result;
use cdm_core::config::CdmConfig;
use cdm_core::directory::web::WebDirectory;
use cdm_core::directory::NoSessions;
use cdm_core::penalty::PenaltyBook;
use cdm_core::pool::{ContentId, EndpointPool};
use cdm_core::stores::NameStore;

pub fn run_servers(cfg: &CdmConfig, content_id: ContentId) -> Result<()> {
    let penalties = PenaltyBook::load_from_path(&PenaltyBook::default_path()?);
    let options = cfg.fetch_options();

    let pool = match &cfg.directory_url {
        Some(url) => {
            let directory = WebDirectory::new(url)?;
            EndpointPool::build(content_id, None, &directory, &options, &penalties)?
        }
        None if options.accelerator_host.is_some() => {
            EndpointPool::build(content_id, None, &NoSessions, &options, &penalties)?
        }
        None => anyhow::bail!("config.toml sets neither directory_url nor accelerator_host"),
    };

    let names = NameStore::load(NameStore::default_path()?);
    match names.get(content_id) {
        Some(name) => println!("Servers for {} ({}):", content_id, name),
        None => println!("Servers for {}:", content_id),
    }

    println!("{:<6} {:<42} {:<12} {:>8}", "SLOT", "HOST", "TYPE", "PENALTY");
    for (slot, server) in pool.slots().iter().enumerate() {
        println!(
            "{:<6} {:<42} {:<12} {:>8}",
            slot,
            server.host,
            server.kind.to_string(),
            penalties.get(&server.host).unwrap_or(0)
        );
    }
    match pool.proxy_endpoint() {
        Some(proxy) => println!("Proxy: {}", proxy.host),
        None => println!("Proxy: none"),
    }

    Ok(())
}
