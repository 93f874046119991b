//! Parser for catalog bundle files.
//!
//! A bundle is a single JSON document holding the movie list and the
//! similarity matrix side by side:
//!
//! ```json
//! { "movies": [ { "movie_id": 862, "title": "Toy Story" } ],
//!   "similarity": [ [1.0] ] }
//! ```
//!
//! Positions are implied by array order, so the file never carries an
//! explicit index that could disagree with the matrix.

use crate::error::{DataLoadError, Result};
use crate::types::MovieId;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

/// One movie entry as stored in the bundle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleMovie {
    pub movie_id: MovieId,
    pub title: String,
}

/// On-disk shape of a catalog bundle
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovieBundle {
    pub movies: Vec<BundleMovie>,
    pub similarity: Vec<Vec<f32>>,
}

/// Read and parse a bundle file
pub fn read_bundle(path: &Path) -> Result<MovieBundle> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;

    parse_bundle(BufReader::new(file), &path.display().to_string())
}

/// Parse a bundle from any reader
///
/// `source` names the input in error messages.
pub fn parse_bundle<R: Read>(reader: R, source: &str) -> Result<MovieBundle> {
    serde_json::from_reader(reader).map_err(|e| DataLoadError::ParseError {
        file: source.to_string(),
        reason: e.to_string(),
    })
}
