//! Core types for search hits.

use serde::{Deserialize, Serialize};

/// A single retrieved document reference returned by the index engine.
///
/// Hits arrive from the engine pre-sorted by descending relevance; the
/// origin filter preserves that order when narrowing the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    /// The title of the indexed document.
    pub title: String,
    /// The document's origin URL.
    pub url: String,
    /// A text snippet summarising the document content.
    pub snippet: String,
    /// Relevance score assigned by the index engine (higher is better).
    pub score: f64,
}
