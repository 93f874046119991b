//! # Data Loader Crate
//!
//! This crate loads the movie catalog and its precomputed similarity matrix.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (MovieRecord, SimilarityMatrix, Catalog)
//! - **parser**: Parse the JSON bundle into Rust structs
//! - **index**: Validate the bundle and build the catalog
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Catalog;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! // Load once at startup, share read-only afterwards
//! let catalog = Arc::new(Catalog::load_from_file(Path::new("data/movie_data.json"))?);
//!
//! let movie = catalog.find_by_title("Avatar").unwrap();
//! let row = catalog.similarity_row(movie.index).unwrap();
//! println!("{} has {} similarity scores", movie.title, row.len());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use parser::{BundleMovie, MovieBundle};
pub use types::{
    // Type aliases
    MovieId,
    // Core types
    MovieRecord,
    SimilarityMatrix,
    Catalog,
};
