//! Term and facet-value normalization helpers.
//!
//! Free-text queries arrive as raw, untrusted request strings and are
//! cleaned before they reach the index engine's parser. Facet values are
//! canonicalised so they compare equal to the tags written at indexing
//! time — the tagging side applies the same transformations.

/// Characters with meaning in the index engine's query syntax, replaced
/// with whitespace during cleaning. Double quotes are preserved so phrase
/// syntax passes through to the engine's parser.
const QUERY_METACHARS: &[char] = &[
    '+', '-', '&', '|', '!', '(', ')', '{', '}', '[', ']', '^', '~', '*', '?', ':', '\\', '/',
    '<', '>',
];

/// Clean a raw free-text query for compilation.
///
/// Strips control characters, replaces query-syntax metacharacters with
/// whitespace, and collapses runs of whitespace into single spaces. An
/// input with no searchable content cleans to the empty string, which
/// compiles to a match-all text clause.
pub fn clean_query(raw: &str) -> String {
    let stripped: String = raw
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| if QUERY_METACHARS.contains(&c) { ' ' } else { c })
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Canonicalise a country/region token.
///
/// Separators (`_`, `-`) are stripped; case is preserved — country tags
/// are written case-sensitively at indexing time.
pub fn normalize_country(raw: &str) -> String {
    raw.chars().filter(|c| *c != '_' && *c != '-').collect()
}

/// Canonicalise a language/locale token: lowercased, `_` converted to `-`.
pub fn normalize_language(raw: &str) -> String {
    raw.to_lowercase().replace('_', "-")
}
