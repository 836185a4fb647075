//! Pool build error taxonomy.

use super::endpoint::ContentId;

/// Errors raised while building an endpoint pool. Steady-state selection
/// (`connection` / `report_failure`) cannot fail by construction.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    /// The filtered, expanded server sequence came out empty. Fatal to the
    /// content session that requested the pool.
    #[error("no eligible delivery servers for content {content_id}")]
    NoServers { content_id: ContentId },

    /// Anonymous credential establishment did not complete within its
    /// timeout while fetching the server directory.
    #[error("anonymous login for the server directory did not complete in time")]
    Auth,

    /// The directory fetch itself failed (transport or malformed response).
    #[error("server directory fetch failed")]
    Directory(#[source] anyhow::Error),
}
