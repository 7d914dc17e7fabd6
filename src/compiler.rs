//! The faceted query compiler.
//!
//! Combines the free-text clause with one disjunctive clause per active
//! facet dimension into a single conjunctive [`Query`] tree. Dimensions
//! combine with AND; values within a dimension combine with OR. Optional
//! dimensions are omitted rather than attached empty, so an absent
//! selection never narrows the result set to nothing.
//!
//! Clause attachment order is fixed (text, country, language, category,
//! restriction) but affects only the engine's execution plan, never the
//! result set.

use crate::config::SearchConfig;
use crate::context::RestrictionContext;
use crate::criteria::SearchCriteria;
use crate::normalize::{normalize_country, normalize_language};
use crate::query::{
    Query, CATEGORY_FIELD_PREFIX, FIELD_COUNTRY, FIELD_LANGUAGE, FLAG_TRUE,
    RESTRICTION_DEFAULT_GROUP, RESTRICTION_FIELD_PREFIX, SENTINEL_ALL,
};

/// Compile search criteria into a composite boolean query.
///
/// Pure and total: never fails on well-formed inputs, and facets without
/// valid selections are omitted rather than erroring. The root is always
/// a [`Query::Conjunction`] whose first clause is the free-text clause.
pub fn compile(
    criteria: &SearchCriteria,
    restrictions: &RestrictionContext,
    config: &SearchConfig,
) -> Query {
    let mut clauses = vec![text_clause(&criteria.text, config)];

    if let Some(clause) = country_clause(criteria, config) {
        clauses.push(clause);
    }
    if let Some(clause) = language_clause(criteria, config) {
        clauses.push(clause);
    }
    if let Some(clause) = category_clause(criteria, config) {
        clauses.push(clause);
    }
    if let Some(clause) = restriction_clause(restrictions, config) {
        clauses.push(clause);
    }

    tracing::debug!(clauses = clauses.len(), "compiled composite query");
    Query::Conjunction(clauses)
}

/// The base free-text clause. An empty query matches all documents.
fn text_clause(text: &str, config: &SearchConfig) -> Query {
    if text.is_empty() {
        Query::All
    } else {
        Query::Text {
            query: text.to_string(),
            fuzzy: config.fuzzy_enabled,
        }
    }
}

/// `OR(country:all, country:<normalized>)`.
///
/// Built only when the dimension is enabled and a country was selected.
/// The sentinel term keeps documents tagged country-agnostic visible.
fn country_clause(criteria: &SearchCriteria, config: &SearchConfig) -> Option<Query> {
    if config.ignore_country {
        return None;
    }
    let country = criteria.country.as_deref()?;
    Some(Query::Disjunction(vec![
        Query::term(FIELD_COUNTRY, SENTINEL_ALL),
        Query::term(FIELD_COUNTRY, normalize_country(country)),
    ]))
}

/// `OR(lang:all, lang:<normalized>)`.
///
/// Built only when the dimension is enabled and a language was resolved
/// (explicitly or from the locale collaborator).
fn language_clause(criteria: &SearchCriteria, config: &SearchConfig) -> Option<Query> {
    if config.ignore_language {
        return None;
    }
    let language = criteria.language.as_deref()?;
    Some(Query::Disjunction(vec![
        Query::term(FIELD_LANGUAGE, SENTINEL_ALL),
        Query::term(FIELD_LANGUAGE, normalize_language(language)),
    ]))
}

/// `OR(category_<id>:true, …)` over the selections present in the known
/// category set.
///
/// No sentinel term here: any valid selection strictly narrows results
/// to the selected categories. Unknown ids are dropped, not rejected; a
/// selection with no valid ids omits the clause entirely.
fn category_clause(criteria: &SearchCriteria, config: &SearchConfig) -> Option<Query> {
    let mut terms = Vec::new();
    for id in &criteria.categories {
        if config.category(*id).is_some() {
            terms.push(Query::term(format!("{CATEGORY_FIELD_PREFIX}{id}"), FLAG_TRUE));
        } else {
            tracing::debug!(category = *id, "dropping unknown category selection");
        }
    }
    if terms.is_empty() {
        None
    } else {
        Some(Query::Disjunction(terms))
    }
}

/// `OR(restrictionGroup_default:true, restrictionGroup_<g>:true, …)`.
///
/// Attached whenever restriction checking is enabled — even with an
/// empty permitted set, in which case visibility degenerates to the
/// default group only. A document is visible if it carries the default
/// tag or any permitted group tag.
fn restriction_clause(restrictions: &RestrictionContext, config: &SearchConfig) -> Option<Query> {
    if !config.restriction_enabled {
        return None;
    }
    let mut terms = vec![Query::term(
        format!("{RESTRICTION_FIELD_PREFIX}{RESTRICTION_DEFAULT_GROUP}"),
        FLAG_TRUE,
    )];
    for group in restrictions.iter() {
        terms.push(Query::term(
            format!("{RESTRICTION_FIELD_PREFIX}{group}"),
            FLAG_TRUE,
        ));
    }
    Some(Query::Disjunction(terms))
}
