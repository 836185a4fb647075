//! Delivery endpoint records as reported by the server directory.

/// Content identifier used by the delivery network (app/depot id).
pub type ContentId = u32;

/// Kind of delivery server, from the directory's `type` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointKind {
    /// Plain HTTP content delivery node.
    Cdn,
    /// LAN / ISP cache node.
    Cache,
    /// Any other kind the directory reports (relays, proxy-only nodes).
    /// Carried through so proxy selection still sees the record; never
    /// enters the selectable sequence.
    Other(String),
}

impl EndpointKind {
    /// Parse the directory's wire name for a server kind.
    pub fn from_wire(s: &str) -> Self {
        match s {
            "CDN" => EndpointKind::Cdn,
            "SteamCache" => EndpointKind::Cache,
            other => EndpointKind::Other(other.to_string()),
        }
    }

    /// Whether this kind may serve content bytes.
    pub fn is_selectable(&self) -> bool {
        matches!(self, EndpointKind::Cdn | EndpointKind::Cache)
    }
}

impl std::fmt::Display for EndpointKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EndpointKind::Cdn => write!(f, "CDN"),
            EndpointKind::Cache => write!(f, "SteamCache"),
            EndpointKind::Other(s) => write!(f, "{}", s),
        }
    }
}

/// One candidate delivery server.
///
/// Plain value type; the pool never mutates an endpoint after the directory
/// hands it over.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    /// Server identity; also the penalty-book lookup key.
    pub host: String,
    pub kind: EndpointKind,
    /// Number of slots this server occupies in the expanded sequence.
    /// Zero effectively excludes the server.
    pub capacity: u32,
    /// Content ids this server may serve; empty means "serves all".
    pub allowed_content_ids: Vec<ContentId>,
    /// Reported load, lower preferred. Tie-break after penalty.
    pub load: f32,
    /// Proxy-candidate flag, independent of kind/content eligibility.
    pub use_as_proxy: bool,
}

impl Endpoint {
    /// Synthetic endpoint for a local cache accelerator. Bypasses the
    /// directory entirely: one slot, serves everything.
    pub fn accelerator(host: &str) -> Self {
        Self {
            host: host.to_string(),
            kind: EndpointKind::Cdn,
            capacity: 1,
            allowed_content_ids: Vec::new(),
            load: 0.0,
            use_as_proxy: false,
        }
    }

    /// Whether the server's content restriction admits `content_id`.
    pub fn may_serve(&self, content_id: ContentId) -> bool {
        self.allowed_content_ids.is_empty() || self.allowed_content_ids.contains(&content_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_wire_names_round_trip() {
        assert_eq!(EndpointKind::from_wire("CDN"), EndpointKind::Cdn);
        assert_eq!(EndpointKind::from_wire("SteamCache"), EndpointKind::Cache);
        assert_eq!(
            EndpointKind::from_wire("CDNProxy"),
            EndpointKind::Other("CDNProxy".to_string())
        );
        assert_eq!(EndpointKind::Cdn.to_string(), "CDN");
        assert_eq!(EndpointKind::Cache.to_string(), "SteamCache");
    }

    #[test]
    fn only_cdn_and_cache_are_selectable() {
        assert!(EndpointKind::Cdn.is_selectable());
        assert!(EndpointKind::Cache.is_selectable());
        assert!(!EndpointKind::Other("CDNProxy".to_string()).is_selectable());
    }

    #[test]
    fn empty_restriction_serves_all() {
        let ep = Endpoint::accelerator("cache.lan");
        assert!(ep.may_serve(10));
        assert!(ep.may_serve(u32::MAX));
    }

    #[test]
    fn restriction_admits_listed_ids_only() {
        let ep = Endpoint {
            allowed_content_ids: vec![440, 730],
            ..Endpoint::accelerator("region.example.net")
        };
        assert!(ep.may_serve(440));
        assert!(!ep.may_serve(570));
    }

    #[test]
    fn accelerator_endpoint_shape() {
        let ep = Endpoint::accelerator("cache.lan");
        assert_eq!(ep.host, "cache.lan");
        assert_eq!(ep.kind, EndpointKind::Cdn);
        assert_eq!(ep.capacity, 1);
        assert!(!ep.use_as_proxy);
    }
}
