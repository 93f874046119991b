//! Catalog building and validation logic.
//!
//! Turns a parsed bundle into a `Catalog`:
//! - Check the matrix is square and matches the movie count
//! - Reject NaN/infinite scores (row checks run in parallel with Rayon)
//! - Flatten the matrix and build the first-match title index

use crate::error::{DataLoadError, Result};
use crate::parser::{self, BundleMovie, MovieBundle};
use crate::types::*;
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

impl Catalog {
    /// Load a catalog bundle from disk
    ///
    /// This is the main entry point for loading data. The result is meant to be
    /// built once at startup and shared behind an `Arc`.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading catalog bundle from {:?}", path);

        let bundle = parser::read_bundle(path)?;
        let catalog = Self::from_bundle(bundle)?;

        info!(
            movies = catalog.len(),
            duplicate_titles = catalog.duplicate_titles,
            "Catalog successfully built and validated"
        );
        Ok(catalog)
    }

    /// Build a catalog from an already parsed bundle
    pub fn from_bundle(bundle: MovieBundle) -> Result<Self> {
        Self::new(bundle.movies, bundle.similarity)
    }

    /// Build a catalog from movies and matrix rows, validating that they line up
    pub fn new(movies: Vec<BundleMovie>, similarity: Vec<Vec<f32>>) -> Result<Self> {
        if movies.is_empty() {
            return Err(DataLoadError::ValidationError(
                "bundle contains no movies".to_string(),
            ));
        }

        let similarity = build_matrix(similarity, movies.len())?;

        let movies: Vec<MovieRecord> = movies
            .into_iter()
            .enumerate()
            .map(|(index, movie)| MovieRecord {
                index,
                movie_id: movie.movie_id,
                title: movie.title,
            })
            .collect();

        let (title_index, duplicate_titles) = build_title_index(&movies);
        if duplicate_titles > 0 {
            warn!(
                duplicate_titles,
                "Catalog contains duplicate titles; only the first of each is reachable by title"
            );
        }

        Ok(Self {
            movies,
            similarity,
            title_index,
            duplicate_titles,
        })
    }
}

/// Validate the rows and flatten them into a `SimilarityMatrix`
fn build_matrix(rows: Vec<Vec<f32>>, expected: usize) -> Result<SimilarityMatrix> {
    if rows.len() != expected {
        return Err(DataLoadError::DimensionMismatch {
            rows: rows.len(),
            expected,
        });
    }

    // Report the lowest offending row so errors are deterministic
    let problem = rows
        .par_iter()
        .enumerate()
        .find_map_first(|(row, values)| validate_row(row, values, expected).err());
    if let Some(err) = problem {
        return Err(err);
    }

    let scores: Vec<f32> = rows.into_iter().flatten().collect();
    Ok(SimilarityMatrix {
        dim: expected,
        scores,
    })
}

fn validate_row(row: usize, values: &[f32], expected: usize) -> Result<()> {
    if values.len() != expected {
        return Err(DataLoadError::RowLengthMismatch {
            row,
            expected,
            found: values.len(),
        });
    }
    if let Some(col) = values.iter().position(|v| !v.is_finite()) {
        return Err(DataLoadError::NonFiniteScore { row, col });
    }
    Ok(())
}

/// Map each title to its first position and count the shadowed duplicates
fn build_title_index(movies: &[MovieRecord]) -> (HashMap<String, usize>, usize) {
    let mut index = HashMap::with_capacity(movies.len());
    let mut duplicates = 0;

    for movie in movies {
        if index.contains_key(&movie.title) {
            duplicates += 1;
        } else {
            index.insert(movie.title.clone(), movie.index);
        }
    }

    (index, duplicates)
}
