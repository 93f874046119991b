//! Similar-movie lookup over the precomputed similarity matrix.
//!
//! ## Algorithm
//! 1. Find the first catalog entry whose title matches exactly
//! 2. Read that entry's row from the similarity matrix
//! 3. Pair every other position with its score (the query's own position is skipped)
//! 4. Sort by score DESC, ties by catalog position ASC
//! 5. Keep the top `limit` and map positions back to (title, movie_id)

use crate::error::{RecommendError, Result};
use data_loader::{Catalog, MovieId};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Default number of recommendations per query
pub const DEFAULT_LIMIT: usize = 10;

/// One recommended movie
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub title: String,
    pub movie_id: MovieId,
    /// Catalog position of the recommended movie
    pub index: usize,
    /// Similarity to the queried movie
    pub score: f32,
}

/// Recommends movies by nearest-neighbour lookup in the similarity matrix
#[derive(Debug, Clone)]
pub struct SimilarMovies {
    /// Shared reference to the catalog (read-only, so no Mutex needed)
    catalog: Arc<Catalog>,

    /// Maximum number of results per query
    limit: usize,
}

impl SimilarMovies {
    /// Create a recommender returning up to 10 results
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            limit: DEFAULT_LIMIT,
        }
    }

    /// Configure the number of results (default: 10)
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Movies most similar to `title`, best first.
    ///
    /// Returns `RecommendError::NotFound` when no movie has exactly this title.
    #[instrument(skip(self))]
    pub fn recommend(&self, title: &str) -> Result<Vec<Recommendation>> {
        let query = self
            .catalog
            .find_by_title(title)
            .ok_or_else(|| RecommendError::NotFound {
                title: title.to_string(),
            })?;

        // A validated catalog always has a row for every movie
        let row = self
            .catalog
            .similarity_row(query.index)
            .ok_or_else(|| RecommendError::NotFound {
                title: title.to_string(),
            })?;

        let ranked = rank_neighbours(row, query.index, self.limit);

        let recommendations: Vec<Recommendation> = ranked
            .into_iter()
            .filter_map(|(index, score)| {
                self.catalog.get(index).map(|movie| Recommendation {
                    title: movie.title.clone(),
                    movie_id: movie.movie_id,
                    index,
                    score,
                })
            })
            .collect();

        debug!(
            "Found {} recommendations for '{}' (position {})",
            recommendations.len(),
            title,
            query.index
        );
        Ok(recommendations)
    }
}

/// Top `limit` (position, score) pairs from `row`, excluding `skip`
fn rank_neighbours(row: &[f32], skip: usize, limit: usize) -> Vec<(usize, f32)> {
    let mut scored: Vec<(usize, f32)> = row
        .iter()
        .copied()
        .enumerate()
        .filter(|&(index, _)| index != skip)
        .collect();

    // Stable sort keeps catalog order among equal scores
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored.truncate(limit);
    scored
}
