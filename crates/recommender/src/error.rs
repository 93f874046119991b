use thiserror::Error;

/// Errors returned by the recommender
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecommendError {
    /// No catalog entry has this exact title
    #[error("Movie not found in database: {title}")]
    NotFound { title: String },
}

pub type Result<T> = std::result::Result<T, RecommendError>;
