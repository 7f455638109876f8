//! Header hygiene between the edge hop and the upstream hop.
//!
//! # Responsibilities
//! - Strip hop-by-hop and connection-management headers
//! - Attach the backend credential, overriding anything the caller sent
//!
//! # Design Decisions
//! - Comparison is on lower-cased names; the output map is keyed lower-case
//!   so a later insert of the same header always replaces, never duplicates
//! - Never trust a caller-supplied credential header

use std::collections::BTreeMap;

/// Header mapping used on the outbound side. Keys are lower-case.
pub type HeaderMapping = BTreeMap<String, String>;

/// Headers that only make sense for the caller → gateway connection.
pub const HOP_BY_HOP_HEADERS: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "host",
    "accept-encoding",
];

/// Whether `name` is on the hop-by-hop deny-list (case-insensitive).
pub fn is_hop_by_hop(name: &str) -> bool {
    HOP_BY_HOP_HEADERS
        .iter()
        .any(|h| name.eq_ignore_ascii_case(h))
}

/// Copy every header that is not hop-by-hop, lower-casing its name.
pub fn filter_headers<'a, I>(inbound: I) -> HeaderMapping
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    inbound
        .into_iter()
        .filter(|(name, _)| !is_hop_by_hop(name))
        .map(|(name, value)| (name.to_ascii_lowercase(), value.clone()))
        .collect()
}

/// Set `header` to `credential`, replacing any caller-supplied value.
/// Without a credential the mapping is returned untouched.
pub fn inject_credential(
    mut headers: HeaderMapping,
    header: &str,
    credential: Option<&str>,
) -> HeaderMapping {
    if let Some(credential) = credential {
        headers.insert(header.to_ascii_lowercase(), credential.to_string());
    }
    headers
}
