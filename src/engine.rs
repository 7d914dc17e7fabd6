//! Trait definition for pluggable index-engine backends.
//!
//! The compiler produces plain [`Query`] trees; executing them belongs
//! to an index-engine collaborator. The production engine (index
//! storage, analysis, segment format) lives outside this crate —
//! anything that can evaluate a query tree into ranked hits sits behind
//! [`IndexEngine`]. An in-memory implementation ships in
//! [`crate::engines`] for tests and embedded use.

use crate::error::SearchError;
use crate::query::Query;
use crate::types::Hit;

/// A pluggable index-engine backend.
///
/// Implementations evaluate a composite boolean query against an
/// inverted text index and return hits pre-sorted by descending
/// relevance. All implementations must be `Send + Sync` so concurrent
/// requests can share one engine.
pub trait IndexEngine: Send + Sync {
    /// Execute a compiled query and return ranked hits.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::IndexUnavailable`] when the index cannot
    /// be reached or opened, or [`SearchError::QuerySyntax`] when the
    /// free-text subquery cannot be parsed. Both are propagated to the
    /// caller unchanged — this crate adds no retry policy.
    fn execute(
        &self,
        query: &Query,
    ) -> impl std::future::Future<Output = Result<Vec<Hit>, SearchError>> + Send;

    /// Enumerate indexed terms starting with `prefix`, for autocomplete.
    ///
    /// The default implementation returns no suggestions; engines with a
    /// term dictionary should override it.
    fn suggest_terms(
        &self,
        prefix: &str,
        limit: usize,
    ) -> impl std::future::Future<Output = Result<Vec<String>, SearchError>> + Send {
        let _ = (prefix, limit);
        std::future::ready(Ok(Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A mock engine for testing trait bounds and error propagation.
    struct MockEngine {
        hits: Vec<Hit>,
        available: bool,
    }

    impl MockEngine {
        fn with_hits(hits: Vec<Hit>) -> Self {
            Self {
                hits,
                available: true,
            }
        }

        fn unavailable() -> Self {
            Self {
                hits: vec![],
                available: false,
            }
        }
    }

    impl IndexEngine for MockEngine {
        async fn execute(&self, _query: &Query) -> Result<Vec<Hit>, SearchError> {
            if !self.available {
                return Err(SearchError::IndexUnavailable("mock index offline".into()));
            }
            Ok(self.hits.clone())
        }
    }

    fn hit(url: &str) -> Hit {
        Hit {
            title: "Test".into(),
            url: url.into(),
            snippet: String::new(),
            score: 1.0,
        }
    }

    #[test]
    fn mock_engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MockEngine>();
    }

    #[tokio::test]
    async fn mock_engine_returns_hits() {
        let engine = MockEngine::with_hits(vec![hit("https://example.com/a")]);
        let hits = engine.execute(&Query::All).await.expect("should succeed");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].url, "https://example.com/a");
    }

    #[tokio::test]
    async fn mock_engine_propagates_unavailability() {
        let engine = MockEngine::unavailable();
        let result = engine.execute(&Query::All).await;
        assert!(matches!(result, Err(SearchError::IndexUnavailable(_))));
    }

    #[tokio::test]
    async fn default_suggest_terms_is_empty() {
        let engine = MockEngine::with_hits(vec![]);
        let terms = engine.suggest_terms("cam", 10).await.expect("should succeed");
        assert!(terms.is_empty());
    }
}
