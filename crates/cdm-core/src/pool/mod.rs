//! Capacity-weighted delivery endpoint pool.
//!
//! Built once per content session: server directory → eligibility filter →
//! (penalty, load) ranking with capacity expansion → shared failover cursor.
//! Many download workers then read the pool concurrently; the cursor only
//! advances on a confirmed failure of the slot it currently points at.

mod endpoint;
mod error;
mod rank;

pub use endpoint::{ContentId, Endpoint, EndpointKind};
pub use error::PoolError;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::directory::{self, ContentSession, FetchOptions, SessionProvider};
use crate::penalty::PenaltyBook;

/// Shared pool of ranked delivery endpoints for one content session.
///
/// The slot sequence is immutable after the build; the cursor is the only
/// mutable state. `connection` is a lock-free read, `report_failure` holds a
/// mutex just long enough for its check-then-advance.
pub struct EndpointPool {
    slots: Vec<Arc<Endpoint>>,
    cursor: AtomicUsize,
    advance: Mutex<()>,
    proxy: Option<Arc<Endpoint>>,
}

impl EndpointPool {
    /// Build the pool for `content_id`: fetch the directory, filter, rank and
    /// expand. One-shot blocking call; fails rather than returning an empty
    /// pool.
    pub fn build(
        content_id: ContentId,
        session: Option<&dyn ContentSession>,
        provider: &dyn SessionProvider,
        options: &FetchOptions,
        penalties: &PenaltyBook,
    ) -> Result<Self, PoolError> {
        let raw = directory::fetch_directory(session, provider, options)?;
        Self::from_directory(content_id, raw, penalties)
    }

    /// Build the pool from an already-fetched raw server list.
    pub fn from_directory(
        content_id: ContentId,
        raw: Vec<Endpoint>,
        penalties: &PenaltyBook,
    ) -> Result<Self, PoolError> {
        let (eligible, proxy) = rank::split_eligible(raw, content_id);
        let slots = rank::expand_ranked(eligible, penalties);
        if slots.is_empty() {
            return Err(PoolError::NoServers { content_id });
        }
        tracing::debug!(
            slots = slots.len(),
            proxy = proxy.as_ref().map(|p| p.host.as_str()),
            "endpoint pool built"
        );
        Ok(Self {
            slots,
            cursor: AtomicUsize::new(0),
            advance: Mutex::new(()),
            proxy: proxy.map(Arc::new),
        })
    }

    /// The endpoint the cursor currently points at.
    ///
    /// Lock-free; unbounded concurrent callers are fine, and simultaneous
    /// callers receive the same slot. Load spreading comes from the capacity
    /// expansion at build time, not per-call rotation.
    pub fn connection(&self) -> Arc<Endpoint> {
        let at = self.cursor.load(Ordering::Acquire);
        Arc::clone(&self.slots[at % self.slots.len()])
    }

    /// Report that `endpoint` failed a transfer.
    ///
    /// Advances the cursor by one only if the front slot is still the exact
    /// slot that was handed out (pointer identity, not field equality), so
    /// concurrent duplicate reports for one slot collapse into a single
    /// advance. Stale reports are no-ops.
    pub fn report_failure(&self, endpoint: &Arc<Endpoint>) {
        let _guard = self.advance.lock().unwrap();
        let at = self.cursor.load(Ordering::Acquire);
        let len = self.slots.len();
        if !Arc::ptr_eq(&self.slots[at % len], endpoint) {
            return;
        }
        let next = at + 1;
        self.cursor.store(next, Ordering::Release);
        if next % len == 0 {
            // Every slot has now been advanced past at least once; selection
            // wraps back to the front of the ranking.
            tracing::warn!(
                slots = len,
                "all delivery slots reported broken, wrapping around"
            );
        }
    }

    /// Report that `endpoint` completed a transfer. No feedback is recorded;
    /// the penalty book is read-only here.
    pub fn report_success(&self, _endpoint: &Arc<Endpoint>) {}

    /// Proxy candidate picked from the unfiltered directory, if any.
    pub fn proxy_endpoint(&self) -> Option<Arc<Endpoint>> {
        self.proxy.as_ref().map(Arc::clone)
    }

    /// The expanded slot sequence, in selection order. Never empty.
    pub fn slots(&self) -> &[Arc<Endpoint>] {
        &self.slots
    }
}
