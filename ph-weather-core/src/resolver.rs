//! Matching free-text queries against a [`Directory`].
//!
//! Ties are broken by directory order: the first matching record wins.
//! Nothing here ranks by similarity or population.

use crate::{
    directory::Directory,
    model::{MatchKind, ResolvedQuery},
};

pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Resolve `query` to a single record.
///
/// The exact pass compares against cleaned and original names. The
/// partial pass accepts containment in either direction, so a query may
/// also match a record whose name is a substring of it.
pub fn resolve_exact(query: &str, directory: &Directory) -> Option<ResolvedQuery> {
    let query = normalize_query(query);

    if let Some(record) = directory.exact_position(&query).and_then(|pos| directory.get(pos)) {
        return Some(ResolvedQuery { record: record.clone(), match_kind: MatchKind::Exact });
    }

    directory
        .places()
        .iter()
        .find(|place| {
            contains_either_way(&place.cleaned_lower, &query)
                || contains_either_way(&place.original_lower, &query)
        })
        .map(|place| ResolvedQuery { record: place.record.clone(), match_kind: MatchKind::Partial })
}

fn contains_either_way(name: &str, query: &str) -> bool {
    name.contains(query) || query.contains(name)
}

/// Cleaned names of up to `limit` records containing `query`, in directory
/// order. Queries of one character or less get no suggestions.
pub fn suggest(query: &str, directory: &Directory, limit: usize) -> Vec<String> {
    if query.chars().count() <= 1 {
        return Vec::new();
    }

    let needle = query.to_lowercase();

    directory
        .places()
        .iter()
        .filter(|place| place.cleaned_lower.contains(&needle) || place.original_lower.contains(&needle))
        .take(limit)
        .map(|place| place.record.cleaned.clone())
        .collect()
}
