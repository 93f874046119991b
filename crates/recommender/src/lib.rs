//! # Recommender Crate
//!
//! Content-based "more like this" recommendations over a precomputed
//! similarity matrix.
//!
//! ## Components
//!
//! ### SimilarMovies
//! Nearest-neighbour lookup: given a title, returns the movies whose
//! similarity row scores are highest, never including the movie itself.
//!
//! ### search_titles
//! Case-insensitive title search for choosing the query movie.
//!
//! ## Example Usage
//!
//! ```ignore
//! use recommender::SimilarMovies;
//! use data_loader::Catalog;
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(Catalog::load_from_file(path)?);
//! let recommender = SimilarMovies::new(catalog.clone());
//!
//! match recommender.recommend("Avatar") {
//!     Ok(recs) => for rec in recs { println!("{} ({})", rec.title, rec.movie_id) },
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

pub mod error;
pub mod search;
pub mod similar;

// Re-export commonly used types
pub use error::{RecommendError, Result};
pub use search::{search_titles, MAX_SEARCH_RESULTS};
pub use similar::{Recommendation, SimilarMovies, DEFAULT_LIMIT};
