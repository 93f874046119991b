//! Title search used to pick a movie before asking for recommendations.

use data_loader::{Catalog, MovieRecord};

/// Maximum number of search hits returned
pub const MAX_SEARCH_RESULTS: usize = 20;

/// Case-insensitive title search.
///
/// Exact matches come first, then substring matches; catalog order is kept
/// within each group.
pub fn search_titles<'a>(catalog: &'a Catalog, query: &str) -> Vec<&'a MovieRecord> {
    let query_lower = query.trim().to_lowercase();
    if query_lower.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<(u8, &MovieRecord)> = catalog
        .movies()
        .iter()
        .filter_map(|movie| {
            let title_lower = movie.title.to_lowercase();
            if title_lower == query_lower {
                Some((0, movie))
            } else if title_lower.contains(&query_lower) {
                Some((1, movie))
            } else {
                None
            }
        })
        .collect();

    matches.sort_by_key(|(relevance, _)| *relevance);
    matches
        .into_iter()
        .take(MAX_SEARCH_RESULTS)
        .map(|(_, movie)| movie)
        .collect()
}
