//! In-memory index engine for tests and embedded use.
//!
//! Holds documents as token lists plus literal facet terms and evaluates
//! query trees directly against them. Relevance is matched-token count,
//! so ordering is deterministic; score ties keep insertion order. Facet
//! terms never contribute to relevance — they only constrain.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use crate::engine::IndexEngine;
use crate::error::SearchError;
use crate::query::Query;
use crate::types::Hit;

/// Splits text into normalised index tokens.
///
/// Supplied to [`MemoryIndex::new`] explicitly — never process-global —
/// so differently configured indexes can coexist in one process (e.g. a
/// stable index next to a rebuild in progress).
pub trait Analyzer: Send + Sync {
    /// Tokenize `text` into normalised tokens.
    fn tokens(&self, text: &str) -> Vec<String>;
}

/// Case-insensitive alphanumeric analyzer: splits on any
/// non-alphanumeric character and lowercases each token.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleAnalyzer;

impl Analyzer for SimpleAnalyzer {
    fn tokens(&self, text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
            .collect()
    }
}

/// A document to be held by [`MemoryIndex`].
#[derive(Debug, Clone, Default)]
pub struct IndexedDocument {
    /// Origin URL, carried through to hits.
    pub url: String,
    /// Document title; tokenized into the searchable token list.
    pub title: String,
    /// Snippet carried through to hits verbatim.
    pub snippet: String,
    /// Body text; tokenized into the searchable token list.
    pub body: String,
    /// Literal facet terms tagged onto this document, as (field, value).
    pub facets: Vec<(String, String)>,
}

impl IndexedDocument {
    /// Create a document with the given origin URL and title.
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the snippet, builder-style.
    pub fn snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = snippet.into();
        self
    }

    /// Set the body text, builder-style.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Tag a literal facet term, builder-style.
    pub fn facet(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.facets.push((field.into(), value.into()));
        self
    }
}

struct StoredDocument {
    doc: IndexedDocument,
    /// Title + body tokens, duplicates kept for term-frequency scoring.
    tokens: Vec<String>,
    facets: HashSet<(String, String)>,
}

impl StoredDocument {
    fn has_facet(&self, field: &str, value: &str) -> bool {
        self.facets.contains(&(field.to_string(), value.to_string()))
    }
}

/// In-memory inverted-index engine.
pub struct MemoryIndex {
    analyzer: Box<dyn Analyzer>,
    docs: Vec<StoredDocument>,
}

impl Default for MemoryIndex {
    fn default() -> Self {
        Self::new(SimpleAnalyzer)
    }
}

impl MemoryIndex {
    /// Create an empty index with an explicit analyzer.
    pub fn new(analyzer: impl Analyzer + 'static) -> Self {
        Self {
            analyzer: Box::new(analyzer),
            docs: Vec::new(),
        }
    }

    /// Add a document. Title and body are tokenized with the index
    /// analyzer at insertion time; facet terms are stored literally.
    pub fn insert(&mut self, doc: IndexedDocument) {
        let mut tokens = self.analyzer.tokens(&doc.title);
        tokens.extend(self.analyzer.tokens(&doc.body));
        let facets = doc.facets.iter().cloned().collect();
        self.docs.push(StoredDocument { doc, tokens, facets });
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Whether the index holds no documents.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Evaluate `query` against one document. `Ok(None)` means no match;
    /// `Ok(Some(score))` is the relevance contribution.
    fn evaluate(&self, stored: &StoredDocument, query: &Query) -> Result<Option<f64>, SearchError> {
        match query {
            Query::All => Ok(Some(0.0)),
            Query::Term(term) => Ok(stored.has_facet(&term.field, &term.value).then_some(0.0)),
            Query::Text { query, fuzzy } => self.evaluate_text(stored, query, *fuzzy),
            Query::Conjunction(subs) => {
                let mut total = 0.0;
                for sub in subs {
                    match self.evaluate(stored, sub)? {
                        Some(score) => total += score,
                        None => return Ok(None),
                    }
                }
                Ok(Some(total))
            }
            Query::Disjunction(subs) => {
                let mut best: Option<f64> = None;
                for sub in subs {
                    if let Some(score) = self.evaluate(stored, sub)? {
                        best = Some(best.map_or(score, |b| b.max(score)));
                    }
                }
                Ok(best)
            }
        }
    }

    /// Match a free-text subquery: every query token must occur in the
    /// document. Score is the total frequency of matched tokens.
    fn evaluate_text(
        &self,
        stored: &StoredDocument,
        raw: &str,
        fuzzy: bool,
    ) -> Result<Option<f64>, SearchError> {
        let tokens = self.parse_text(raw)?;
        if tokens.is_empty() {
            return Ok(Some(0.0));
        }
        let mut total = 0.0;
        for token in &tokens {
            let count = stored
                .tokens
                .iter()
                .filter(|doc_token| token_matches(doc_token.as_str(), token, fuzzy))
                .count();
            if count == 0 {
                return Ok(None);
            }
            total += count as f64;
        }
        Ok(Some(total))
    }

    /// Parse the free-text query syntax. Quoted phrases degrade to a
    /// conjunction of their tokens; an unterminated quote is a syntax
    /// error carrying the offending query.
    fn parse_text(&self, raw: &str) -> Result<Vec<String>, SearchError> {
        if raw.matches('"').count() % 2 != 0 {
            return Err(SearchError::QuerySyntax {
                query: raw.to_string(),
                message: "unterminated quoted phrase".into(),
            });
        }
        Ok(self.analyzer.tokens(&raw.replace('"', " ")))
    }
}

impl IndexEngine for MemoryIndex {
    async fn execute(&self, query: &Query) -> Result<Vec<Hit>, SearchError> {
        let mut hits = Vec::new();
        for stored in &self.docs {
            if let Some(score) = self.evaluate(stored, query)? {
                hits.push(Hit {
                    title: stored.doc.title.clone(),
                    url: stored.doc.url.clone(),
                    snippet: stored.doc.snippet.clone(),
                    score,
                });
            }
        }
        // Stable sort: score ties keep insertion order.
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        Ok(hits)
    }

    async fn suggest_terms(&self, prefix: &str, limit: usize) -> Result<Vec<String>, SearchError> {
        let normalized = self
            .analyzer
            .tokens(prefix)
            .pop()
            .unwrap_or_else(|| prefix.to_string());
        let mut terms = BTreeSet::new();
        for stored in &self.docs {
            for token in &stored.tokens {
                if token.starts_with(&normalized) {
                    terms.insert(token.clone());
                }
            }
        }
        Ok(terms.into_iter().take(limit).collect())
    }
}

/// Exact token match, widened to single-edit variants when `fuzzy`.
fn token_matches(doc_token: &str, query_token: &str, fuzzy: bool) -> bool {
    doc_token == query_token || (fuzzy && within_one_edit(doc_token, query_token))
}

/// Levenshtein distance at most 1 (one substitution, insertion, or
/// deletion).
fn within_one_edit(a: &str, b: &str) -> bool {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    match a.len().abs_diff(b.len()) {
        0 => a.iter().zip(&b).filter(|(x, y)| x != y).count() <= 1,
        1 => {
            let (short, long) = if a.len() < b.len() { (&a, &b) } else { (&b, &a) };
            let mut skipped = false;
            let (mut i, mut j) = (0, 0);
            while i < short.len() && j < long.len() {
                if short[i] == long[j] {
                    i += 1;
                } else if skipped {
                    return false;
                } else {
                    skipped = true;
                }
                j += 1;
            }
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{FIELD_COUNTRY, SENTINEL_ALL};

    fn index_with(docs: Vec<IndexedDocument>) -> MemoryIndex {
        let mut index = MemoryIndex::default();
        for doc in docs {
            index.insert(doc);
        }
        index
    }

    fn text(query: &str) -> Query {
        Query::Text {
            query: query.into(),
            fuzzy: false,
        }
    }

    #[test]
    fn simple_analyzer_lowercases_and_splits() {
        let tokens = SimpleAnalyzer.tokens("Digital CAMERA, 2nd-gen!");
        assert_eq!(tokens, vec!["digital", "camera", "2nd", "gen"]);
    }

    #[test]
    fn simple_analyzer_empty_input() {
        assert!(SimpleAnalyzer.tokens("  ,,, ").is_empty());
    }

    #[tokio::test]
    async fn match_all_returns_every_document() {
        let index = index_with(vec![
            IndexedDocument::new("https://a.test/1", "One"),
            IndexedDocument::new("https://a.test/2", "Two"),
        ]);
        let hits = index.execute(&Query::All).await.expect("should succeed");
        assert_eq!(hits.len(), 2);
        // All scores are 0, so insertion order is preserved.
        assert_eq!(hits[0].url, "https://a.test/1");
        assert_eq!(hits[1].url, "https://a.test/2");
    }

    #[tokio::test]
    async fn text_requires_every_token() {
        let index = index_with(vec![
            IndexedDocument::new("https://a.test/1", "Digital camera"),
            IndexedDocument::new("https://a.test/2", "Analog camera"),
        ]);
        let hits = index
            .execute(&text("digital camera"))
            .await
            .expect("should succeed");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].url, "https://a.test/1");
    }

    #[tokio::test]
    async fn term_frequency_drives_ranking() {
        let index = index_with(vec![
            IndexedDocument::new("https://a.test/once", "camera").body("specs"),
            IndexedDocument::new("https://a.test/twice", "camera").body("camera accessories"),
        ]);
        let hits = index.execute(&text("camera")).await.expect("should succeed");
        assert_eq!(hits[0].url, "https://a.test/twice");
        assert!(hits[0].score > hits[1].score);
    }

    #[tokio::test]
    async fn facet_terms_constrain_without_scoring() {
        let index = index_with(vec![
            IndexedDocument::new("https://a.test/at", "Camera").facet(FIELD_COUNTRY, "AT"),
            IndexedDocument::new("https://a.test/all", "Camera").facet(FIELD_COUNTRY, SENTINEL_ALL),
            IndexedDocument::new("https://a.test/de", "Camera").facet(FIELD_COUNTRY, "DE"),
        ]);
        let query = Query::Conjunction(vec![
            text("camera"),
            Query::Disjunction(vec![
                Query::term(FIELD_COUNTRY, SENTINEL_ALL),
                Query::term(FIELD_COUNTRY, "AT"),
            ]),
        ]);
        let hits = index.execute(&query).await.expect("should succeed");
        let urls: Vec<&str> = hits.iter().map(|h| h.url.as_str()).collect();
        assert_eq!(urls, vec!["https://a.test/at", "https://a.test/all"]);
    }

    #[tokio::test]
    async fn conjunction_of_nothing_matches_everything() {
        let index = index_with(vec![IndexedDocument::new("https://a.test/1", "One")]);
        let hits = index
            .execute(&Query::Conjunction(vec![]))
            .await
            .expect("should succeed");
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn disjunction_of_nothing_matches_nothing() {
        let index = index_with(vec![IndexedDocument::new("https://a.test/1", "One")]);
        let hits = index
            .execute(&Query::Disjunction(vec![]))
            .await
            .expect("should succeed");
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn fuzzy_matches_single_edit_variants() {
        let index = index_with(vec![IndexedDocument::new("https://a.test/1", "camera")]);
        let exact_miss = index
            .execute(&text("camrea"))
            .await
            .expect("should succeed");
        assert!(exact_miss.is_empty());

        let fuzzy_hit = index
            .execute(&Query::Text {
                query: "camer".into(),
                fuzzy: true,
            })
            .await
            .expect("should succeed");
        assert_eq!(fuzzy_hit.len(), 1);
    }

    #[tokio::test]
    async fn fuzzy_rejects_two_edits() {
        let index = index_with(vec![IndexedDocument::new("https://a.test/1", "camera")]);
        let hits = index
            .execute(&Query::Text {
                query: "cmr".into(),
                fuzzy: true,
            })
            .await
            .expect("should succeed");
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn unterminated_phrase_is_a_syntax_error() {
        let index = index_with(vec![IndexedDocument::new("https://a.test/1", "One")]);
        let result = index.execute(&text("\"digital camera")).await;
        match result {
            Err(SearchError::QuerySyntax { query, .. }) => {
                assert_eq!(query, "\"digital camera");
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn balanced_phrase_degrades_to_token_conjunction() {
        let index = index_with(vec![
            IndexedDocument::new("https://a.test/1", "Digital camera"),
        ]);
        let hits = index
            .execute(&text("\"digital camera\""))
            .await
            .expect("should succeed");
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn suggest_terms_prefix_scan_sorted_and_limited() {
        let index = index_with(vec![
            IndexedDocument::new("https://a.test/1", "camera camcorder").body("campaign"),
            IndexedDocument::new("https://a.test/2", "camping camera"),
        ]);
        let terms = index.suggest_terms("cam", 3).await.expect("should succeed");
        assert_eq!(terms, vec!["camcorder", "camera", "campaign"]);
    }

    #[tokio::test]
    async fn suggest_terms_normalizes_the_prefix() {
        let index = index_with(vec![IndexedDocument::new("https://a.test/1", "Camera")]);
        let terms = index.suggest_terms("CAM", 10).await.expect("should succeed");
        assert_eq!(terms, vec!["camera"]);
    }

    #[test]
    fn within_one_edit_cases() {
        assert!(within_one_edit("camera", "camera"));
        assert!(within_one_edit("camera", "camere")); // substitution
        assert!(within_one_edit("camera", "camer")); // deletion
        assert!(within_one_edit("camera", "cameras")); // insertion
        assert!(!within_one_edit("camera", "camrea")); // transposition = 2 edits
        assert!(!within_one_edit("camera", "cam"));
    }

    #[test]
    fn len_and_is_empty() {
        let mut index = MemoryIndex::default();
        assert!(index.is_empty());
        index.insert(IndexedDocument::new("https://a.test/1", "One"));
        assert_eq!(index.len(), 1);
        assert!(!index.is_empty());
    }

    #[test]
    fn memory_index_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MemoryIndex>();
    }
}
