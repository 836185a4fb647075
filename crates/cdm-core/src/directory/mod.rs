//! Server directory acquisition.
//!
//! Obtains the raw candidate list for a content session: from an existing
//! authenticated session, from a throwaway anonymous session, or — in local
//! accelerator mode — by synthesizing a single static endpoint without
//! touching the network at all.
//!
//! Session establishment itself lives behind the [`ContentSession`] /
//! [`SessionProvider`] seams; the core never speaks the login protocol.

pub mod web;

use std::time::Duration;

use anyhow::Result;

use crate::pool::{Endpoint, PoolError};

/// A live session against the delivery network, authenticated or anonymous.
pub trait ContentSession {
    /// Block until credentials are established, up to `timeout`.
    /// Returns false on timeout.
    fn wait_for_credentials(&self, timeout: Duration) -> bool;

    /// Fetch the raw delivery server directory through this session.
    fn server_directory(&self) -> Result<Vec<Endpoint>>;

    /// Tear the session down. Idempotent.
    fn disconnect(&self);
}

/// Opens throwaway anonymous sessions for directory retrieval when no
/// authenticated session exists.
pub trait SessionProvider {
    fn open_anonymous(&self) -> Result<Box<dyn ContentSession>>;
}

/// Provider for configurations that never open a session (accelerator mode).
pub struct NoSessions;

impl SessionProvider for NoSessions {
    fn open_anonymous(&self) -> Result<Box<dyn ContentSession>> {
        anyhow::bail!("no session provider configured")
    }
}

/// Knobs for a directory fetch, usually derived from `CdmConfig`.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// When set, skip the directory and return this single local endpoint.
    pub accelerator_host: Option<String>,
    /// Bound on anonymous credential establishment.
    pub credential_timeout: Duration,
}

/// Fetch the raw server list for a content session.
///
/// Accelerator mode short-circuits before any session logic. Otherwise the
/// authenticated session is used when present; an anonymous session is opened
/// and released for the single fetch when not.
pub fn fetch_directory(
    session: Option<&dyn ContentSession>,
    provider: &dyn SessionProvider,
    options: &FetchOptions,
) -> Result<Vec<Endpoint>, PoolError> {
    if let Some(host) = &options.accelerator_host {
        tracing::debug!(host = %host, "accelerator mode, skipping server directory");
        return Ok(vec![Endpoint::accelerator(host)]);
    }

    if let Some(session) = session {
        return session.server_directory().map_err(PoolError::Directory);
    }

    tracing::info!("no active session, logging in anonymously for the server directory");
    let anonymous = provider.open_anonymous().map_err(PoolError::Directory)?;
    if !anonymous.wait_for_credentials(options.credential_timeout) {
        anonymous.disconnect();
        return Err(PoolError::Auth);
    }
    let listed = anonymous.server_directory();
    // The throwaway session is released whether or not the fetch worked.
    anonymous.disconnect();
    listed.map_err(PoolError::Directory)
}
