//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] carries the per-deployment toggles and bounds the
//! pipeline reads. It is loaded once by the embedding application and
//! treated as read-only for the duration of each request — nothing in
//! this crate mutates it.

use crate::error::SearchError;

/// A category documents can be tagged with at indexing time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Stable numeric identifier, referenced by search requests.
    pub id: u32,
    /// Human-readable label for rendering facet controls.
    pub label: String,
}

impl Category {
    /// Create a category from an id and any string-like label.
    pub fn new(id: u32, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

/// Configuration for the faceted search pipeline.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Constrain results to the caller's permitted restriction groups.
    pub restriction_enabled: bool,
    /// Allow approximate matching in the free-text clause.
    pub fuzzy_enabled: bool,
    /// Drop hits whose origin is not the current serving host.
    pub own_host_only: bool,
    /// Disable the language dimension entirely; no language clause is
    /// ever built, regardless of input.
    pub ignore_language: bool,
    /// Disable the country dimension entirely; no country clause is
    /// ever built, regardless of input.
    pub ignore_country: bool,
    /// Region token substituted when the caller selects "no specific
    /// region". The dimension is constrained to this token rather than
    /// left unconstrained.
    pub default_country: String,
    /// The known category set. Requested ids outside this set are
    /// silently dropped.
    pub categories: Vec<Category>,
    /// Maximum hits returned per request.
    pub max_per_page: usize,
    /// Maximum number of autocomplete suggestions returned.
    pub max_suggestions: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            restriction_enabled: false,
            fuzzy_enabled: false,
            own_host_only: false,
            ignore_language: false,
            ignore_country: false,
            default_country: "international".into(),
            categories: Vec::new(),
            max_per_page: 10,
            max_suggestions: 10,
        }
    }
}

impl SearchConfig {
    /// Look up a known category by id.
    pub fn category(&self, id: u32) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Validates this configuration, returning an error if any field is
    /// invalid.
    ///
    /// Checks:
    /// - `max_per_page` must be greater than 0
    /// - `max_suggestions` must be greater than 0
    /// - `default_country` must not be empty
    /// - category ids must be unique
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_per_page == 0 {
            return Err(SearchError::Config(
                "max_per_page must be greater than 0".into(),
            ));
        }
        if self.max_suggestions == 0 {
            return Err(SearchError::Config(
                "max_suggestions must be greater than 0".into(),
            ));
        }
        if self.default_country.is_empty() {
            return Err(SearchError::Config(
                "default_country must not be empty".into(),
            ));
        }
        for (i, category) in self.categories.iter().enumerate() {
            if self.categories[..i].iter().any(|c| c.id == category.id) {
                return Err(SearchError::Config(format!(
                    "duplicate category id {}",
                    category.id
                )));
            }
        }
        Ok(())
    }
}
