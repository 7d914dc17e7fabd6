//! Search criteria extraction from raw request parameters.
//!
//! Mapping raw request values into a plain [`SearchCriteria`] is kept
//! separate from query compilation, so the compiler can be unit-tested
//! without any HTTP or framework context. Resolution consults the
//! configuration toggles and the locale collaborator; compilation then
//! runs over the resolved value alone.

use std::collections::HashSet;

use crate::config::SearchConfig;
use crate::context::LocaleResolver;
use crate::normalize::clean_query;

/// Special country parameter value meaning "no specific region".
///
/// Resolves to [`SearchConfig::default_country`] rather than to an
/// absent dimension: once the country dimension is enabled and selected,
/// results are always constrained by region.
pub const COUNTRY_GLOBAL: &str = "global";

/// Raw, untrusted request parameters as they arrive from the caller.
#[derive(Debug, Clone, Default)]
pub struct RawSearchParams {
    /// Free-text query (`q`).
    pub query: Option<String>,
    /// Explicit language selection (`language`).
    pub language: Option<String>,
    /// Explicit country selection (`country`).
    pub country: Option<String>,
    /// Requested category identifiers (`categories`), still unparsed.
    pub categories: Vec<String>,
}

/// Resolved, validated inputs for one search request.
///
/// Created fresh per request and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    /// Cleaned free-text query. Empty compiles to a match-all clause.
    pub text: String,
    /// Language selection. `None` when the dimension is disabled or no
    /// locale could be resolved.
    pub language: Option<String>,
    /// Country selection. `None` omits the dimension entirely.
    pub country: Option<String>,
    /// Requested category ids, deduplicated in request order. Not yet
    /// validated against the known category set — the compiler drops
    /// unknown ids.
    pub categories: Vec<u32>,
}

impl SearchCriteria {
    /// Resolve raw request parameters into search criteria.
    ///
    /// - The free text is cleaned via [`clean_query`]; an absent
    ///   parameter resolves to the empty (match-all) query.
    /// - Language: `None` when `ignore_language` is set; otherwise the
    ///   explicit parameter, falling back to the locale collaborator.
    /// - Country: `None` when `ignore_country` is set; an empty
    ///   parameter is treated as absent; [`COUNTRY_GLOBAL`] maps to the
    ///   configured default region token.
    /// - Categories: parsed as integers; non-numeric values are dropped
    ///   silently, duplicates collapse keeping first occurrence.
    pub fn resolve(
        params: &RawSearchParams,
        config: &SearchConfig,
        locale: &dyn LocaleResolver,
    ) -> Self {
        let text = params.query.as_deref().map(clean_query).unwrap_or_default();

        let language = if config.ignore_language {
            None
        } else {
            params
                .language
                .clone()
                .filter(|lang| !lang.is_empty())
                .or_else(|| locale.current_locale())
        };

        let country = if config.ignore_country {
            None
        } else {
            match params.country.as_deref() {
                None | Some("") => None,
                Some(COUNTRY_GLOBAL) => Some(config.default_country.clone()),
                Some(other) => Some(other.to_string()),
            }
        };

        let mut seen = HashSet::new();
        let categories = params
            .categories
            .iter()
            .filter_map(|raw| raw.trim().parse::<u32>().ok())
            .filter(|id| seen.insert(*id))
            .collect();

        Self {
            text,
            language,
            country,
            categories,
        }
    }
}
