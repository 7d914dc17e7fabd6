//! Host-origin hit filtering.
//!
//! The index format cannot express "document lives on the serving host"
//! as a term, so the constraint is enforced as a second pass over the
//! raw hit list returned by the engine.

use url::Url;

use crate::types::Hit;

/// Filter hits down to those originating from `current_host`.
///
/// Identity when `enabled` is false. Otherwise a hit survives when its
/// `url` parses and its authority component contains `current_host` as a
/// substring. A hit with an unparseable origin is excluded — a malformed
/// origin is a non-match, not an error.
///
/// The relative order of surviving hits is preserved exactly as
/// received: no re-sorting, no re-scoring.
pub fn filter_by_origin(hits: Vec<Hit>, current_host: &str, enabled: bool) -> Vec<Hit> {
    if !enabled {
        return hits;
    }
    hits.into_iter()
        .filter(|hit| origin_matches_host(&hit.url, current_host))
        .collect()
}

/// Returns `true` when `origin` is a well-formed URL whose authority
/// component contains `host`.
///
/// Substring matching means `host = "example.com"` also keeps hits from
/// `shop.example.com` and `example.com:8080`.
fn origin_matches_host(origin: &str, host: &str) -> bool {
    match Url::parse(origin) {
        Ok(parsed) => parsed.authority().contains(host),
        Err(_) => false,
    }
}
