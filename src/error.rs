//! Error types for the facet-search crate.
//!
//! All errors use stable string messages suitable for display to callers
//! and programmatic handling. The compiler itself reports no domain errors
//! of its own — facets without valid selections are omitted, never
//! rejected. Failures originate at the index-engine boundary and are
//! propagated unchanged.

/// Errors that can occur during a search request.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The index engine could not be reached or opened. Fatal to the
    /// current request.
    #[error("index unavailable: {0}")]
    IndexUnavailable(String),

    /// The free-text subquery could not be parsed by the index engine.
    /// Carries the offending query string for diagnostics.
    #[error("query syntax error in {query:?}: {message}")]
    QuerySyntax {
        /// The free-text query that failed to parse.
        query: String,
        /// Engine-supplied description of the parse failure.
        message: String,
    },

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for facet-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
