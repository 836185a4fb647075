//! Eligibility filtering and capacity-weighted ranking.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::penalty::PenaltyBook;

use super::endpoint::{ContentId, Endpoint};

/// Split the raw directory list into the eligible servers for `content_id`
/// and the proxy candidate.
///
/// The proxy candidate is the first server (directory order) flagged
/// `use_as_proxy`, taken from the unfiltered list: a proxy-only server of an
/// ineligible kind is still a valid proxy. Eligible order is preserved so the
/// later sort stays stable against directory order.
pub(super) fn split_eligible(
    raw: Vec<Endpoint>,
    content_id: ContentId,
) -> (Vec<Endpoint>, Option<Endpoint>) {
    let proxy = raw.iter().find(|s| s.use_as_proxy).cloned();
    let eligible = raw
        .into_iter()
        .filter(|s| s.kind.is_selectable() && s.may_serve(content_id))
        .collect();
    (eligible, proxy)
}

/// Rank eligible servers by (penalty, load) and expand each into `capacity`
/// consecutive slots.
///
/// Every slot is a distinct `Arc` allocation: the failover cursor tells
/// repeated slots of the same server apart by pointer identity.
pub(super) fn expand_ranked(
    eligible: Vec<Endpoint>,
    penalties: &PenaltyBook,
) -> Vec<Arc<Endpoint>> {
    let mut weighted: Vec<(u32, Endpoint)> = eligible
        .into_iter()
        .map(|s| (penalties.get(&s.host).unwrap_or(0), s))
        .collect();
    // sort_by is stable, so directory order breaks remaining ties.
    weighted.sort_by(|(pa, a), (pb, b)| {
        pa.cmp(pb)
            .then_with(|| a.load.partial_cmp(&b.load).unwrap_or(Ordering::Equal))
    });

    let total: usize = weighted.iter().map(|(_, s)| s.capacity as usize).sum();
    let mut slots = Vec::with_capacity(total);
    for (_, server) in weighted {
        for _ in 0..server.capacity {
            slots.push(Arc::new(server.clone()));
        }
    }
    slots
}
