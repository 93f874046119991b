//! Core domain types for the movie catalog.
//!
//! A `Catalog` is the movie list and its similarity matrix held together as one
//! immutable unit. Position `i` in the movie list is row/column `i` of the matrix,
//! and nothing outside this crate can mutate either half.

use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// TMDB identifier for a movie
pub type MovieId = u32;

// =============================================================================
// Movie Record
// =============================================================================

/// A single movie in the catalog.
///
/// Titles are not guaranteed to be unique. `index` is the movie's position in
/// the catalog and therefore its row in the similarity matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieRecord {
    pub index: usize,
    pub movie_id: MovieId,
    pub title: String,
}

// =============================================================================
// Similarity Matrix
// =============================================================================

/// Square matrix of pairwise similarity scores.
///
/// Stored row-major in a single `Vec<f32>` so a row lookup is one slice.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    pub(crate) dim: usize,
    pub(crate) scores: Vec<f32>,
}

impl SimilarityMatrix {
    /// Number of rows (and columns)
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Borrow row `index`, or `None` when out of range
    pub fn row(&self, index: usize) -> Option<&[f32]> {
        if index >= self.dim {
            return None;
        }
        let start = index * self.dim;
        Some(&self.scores[start..start + self.dim])
    }

    /// Score between movie `i` and movie `j`
    pub fn score(&self, i: usize, j: usize) -> Option<f32> {
        self.row(i).and_then(|row| row.get(j).copied())
    }
}

// =============================================================================
// Catalog - The Immutable Context
// =============================================================================

/// Movies plus their similarity matrix, loaded once and shared read-only.
///
/// Construct it with [`Catalog::new`] or [`Catalog::load_from_file`]; both
/// validate that the two halves line up before handing out a value.
#[derive(Debug)]
pub struct Catalog {
    pub(crate) movies: Vec<MovieRecord>,
    pub(crate) similarity: SimilarityMatrix,
    /// Title -> position of the first movie with that title
    pub(crate) title_index: HashMap<String, usize>,
    pub(crate) duplicate_titles: usize,
}

impl Catalog {
    /// Number of movies
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// All movies in catalog order
    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    /// Get a movie by catalog position
    pub fn get(&self, index: usize) -> Option<&MovieRecord> {
        self.movies.get(index)
    }

    /// Find the first movie whose title matches exactly.
    ///
    /// When the catalog holds duplicate titles only the first one is reachable.
    pub fn find_by_title(&self, title: &str) -> Option<&MovieRecord> {
        self.title_index
            .get(title)
            .and_then(|&index| self.movies.get(index))
    }

    /// Similarity row for the movie at `index`
    pub fn similarity_row(&self, index: usize) -> Option<&[f32]> {
        self.similarity.row(index)
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    /// How many movies share a title with an earlier movie
    pub fn duplicate_title_count(&self) -> usize {
        self.duplicate_titles
    }
}
