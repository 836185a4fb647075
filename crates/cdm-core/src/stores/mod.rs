//! Persistent per-user caches.
//!
//! Two independent flat stores: content-id → display name (tab-separated
//! text) and content-id → decryption key (TOML, hex-encoded). Both load the
//! whole file up front, rewrite the whole file on save, and treat every I/O
//! or parse problem as a logged warning rather than an error — a damaged
//! cache never stops a download.
//!
//! Stores are explicit values constructed with their backing path and passed
//! by reference; there is no ambient global state.

mod keys;
mod names;

pub use keys::KeyStore;
pub use names::NameStore;
