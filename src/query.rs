//! Composite boolean query trees and the shared facet vocabulary.
//!
//! The compiler produces a [`Query`] tree of nested AND/OR nodes over
//! literal (field, value) terms. The tree is a plain serialisable value,
//! so it can be unit-tested and transported independent of any concrete
//! index engine.
//!
//! The constants below are shared by the indexing side (document tagging)
//! and the query side. A mismatch between the two silently breaks the
//! opt-out invariant for optional dimensions, so both sides must use
//! these constants rather than inline strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel term value tagging a document that opts out of a facet
/// dimension entirely ("not restricted by this dimension").
pub const SENTINEL_ALL: &str = "all";

/// Term value used for boolean tag fields (categories, restriction groups).
pub const FLAG_TRUE: &str = "true";

/// Field holding a document's country/region tag.
pub const FIELD_COUNTRY: &str = "country";

/// Field holding a document's language tag.
pub const FIELD_LANGUAGE: &str = "lang";

/// Prefix for per-category tag fields (`category_<id>`).
pub const CATEGORY_FIELD_PREFIX: &str = "category_";

/// Prefix for per-restriction-group tag fields (`restrictionGroup_<id>`).
pub const RESTRICTION_FIELD_PREFIX: &str = "restrictionGroup_";

/// Identifier of the restriction group every unrestricted document is
/// tagged with. A document carrying only this tag is visible to everyone.
pub const RESTRICTION_DEFAULT_GROUP: &str = "default";

/// A literal (field, value) pair matched against tokenized field content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// The index field this term matches against.
    pub field: String,
    /// The literal value to match.
    pub value: String,
}

impl Term {
    /// Create a term from any string-like field and value.
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// A node in a composite boolean query tree.
///
/// The compiler always produces a [`Query::Conjunction`] root whose first
/// clause is the free-text clause, followed by one [`Query::Disjunction`]
/// per active facet dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Query {
    /// Matches every document. Compiled from an empty free-text query.
    All,
    /// A single literal term match.
    Term(Term),
    /// Free-text subquery in the index engine's own query syntax. The
    /// engine parses it; a malformed query surfaces as
    /// [`crate::SearchError::QuerySyntax`] at execution time.
    Text {
        /// The raw (cleaned) free-text query.
        query: String,
        /// Whether the engine may match approximate token variants.
        fuzzy: bool,
    },
    /// All subqueries must match (logical AND).
    Conjunction(Vec<Query>),
    /// At least one subquery must match (logical OR).
    Disjunction(Vec<Query>),
}

impl Query {
    /// Convenience constructor for a literal term node.
    pub fn term(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Term(Term::new(field, value))
    }

    /// Number of direct subqueries at this node. Leaf nodes report 0.
    pub fn clause_count(&self) -> usize {
        match self {
            Self::Conjunction(subs) | Self::Disjunction(subs) => subs.len(),
            _ => 0,
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("*"),
            Self::Term(term) => write!(f, "{}:{}", term.field, term.value),
            Self::Text { query, fuzzy } => {
                write!(f, "text:{query:?}{}", if *fuzzy { "~" } else { "" })
            }
            Self::Conjunction(subs) => write_list(f, "AND", subs),
            Self::Disjunction(subs) => write_list(f, "OR", subs),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, op: &str, subs: &[Query]) -> fmt::Result {
    write!(f, "{op}(")?;
    for (i, sub) in subs.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{sub}")?;
    }
    f.write_str(")")
}
