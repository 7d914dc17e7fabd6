//! # facet-search
//!
//! Engine-agnostic faceted search for site indexes.
//!
//! Given a free-text query plus orthogonal facet selections (language,
//! country, category, restriction group), this crate compiles a single
//! composite boolean query tree for an inverted-text index, then
//! post-filters the returned hits by a host-origin constraint the index
//! format cannot express as a term.
//!
//! ## Design
//!
//! - Dimensions combine conjunctively; values within a dimension combine
//!   disjunctively
//! - Optional dimensions are omitted entirely — an empty selection never
//!   narrows the result set to nothing
//! - Country and language clauses carry a sentinel term so documents can
//!   opt out of a dimension
//! - The query tree is a plain serialisable value, testable without any
//!   index engine
//! - Index engines plug in behind [`IndexEngine`]; an in-memory engine
//!   ships in [`engines`] for tests and embedded use
//!
//! ## Security
//!
//! - Restriction-group clauses are compiled from an opaque permitted-group
//!   set resolved by the embedding application's authorization layer
//! - Free-text input is cleaned of query-syntax metacharacters before it
//!   reaches the engine's parser
//! - Queries are logged only at debug level

pub mod compiler;
pub mod config;
pub mod context;
pub mod criteria;
pub mod engine;
pub mod engines;
pub mod error;
pub mod filter;
pub mod normalize;
pub mod query;
pub mod types;

pub use compiler::compile;
pub use config::{Category, SearchConfig};
pub use context::{FixedLocale, LocaleResolver, NoLocale, RequestContext, RestrictionContext};
pub use criteria::{RawSearchParams, SearchCriteria};
pub use engine::IndexEngine;
pub use error::{Result, SearchError};
pub use filter::filter_by_origin;
pub use query::{Query, Term};
pub use types::Hit;

/// Run one search request end-to-end against an index engine.
///
/// # Pipeline
///
/// 1. Validate configuration
/// 2. Compile criteria + restriction context into a composite query
/// 3. Execute the query on the engine (hits arrive ranked)
/// 4. Filter hits by origin host when `own_host_only` is set
/// 5. Truncate to `max_per_page`
///
/// # Errors
///
/// Returns [`SearchError::Config`] for an invalid configuration; engine
/// failures ([`SearchError::IndexUnavailable`],
/// [`SearchError::QuerySyntax`]) are propagated unchanged.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> facet_search::Result<()> {
/// use facet_search::engines::MemoryIndex;
/// use facet_search::{RequestContext, SearchConfig, SearchCriteria};
///
/// let engine = MemoryIndex::default();
/// let criteria = SearchCriteria {
///     text: "camera".into(),
///     ..Default::default()
/// };
/// let hits = facet_search::search(
///     &engine,
///     &criteria,
///     &RequestContext::default(),
///     &SearchConfig::default(),
/// )
/// .await?;
/// for hit in &hits {
///     println!("{}: {}", hit.title, hit.url);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search<E: IndexEngine>(
    engine: &E,
    criteria: &SearchCriteria,
    context: &RequestContext,
    config: &SearchConfig,
) -> Result<Vec<Hit>> {
    config.validate()?;

    // 1. Compile the composite boolean query.
    let query = compile(criteria, &context.restrictions, config);
    tracing::debug!(%query, "executing compiled query");

    // 2. Execute; hits arrive pre-sorted by descending relevance.
    let hits = engine.execute(&query).await?;
    tracing::debug!(hits = hits.len(), "engine returned hits");

    // 3. Narrow by origin host, preserving order.
    let mut hits = filter_by_origin(hits, &context.current_host, config.own_host_only);

    // 4. Bound the page size.
    hits.truncate(config.max_per_page);
    Ok(hits)
}

/// Autocomplete: indexed terms starting with `prefix`.
///
/// Delegates to the engine's term dictionary and truncates to
/// `config.max_suggestions`, preserving the engine's order.
///
/// # Errors
///
/// Same as [`search`].
pub async fn suggest<E: IndexEngine>(
    engine: &E,
    prefix: &str,
    config: &SearchConfig,
) -> Result<Vec<String>> {
    config.validate()?;
    let mut terms = engine.suggest_terms(prefix, config.max_suggestions).await?;
    terms.truncate(config.max_suggestions);
    Ok(terms)
}
