//! Engine crate for the movie recommender.
//!
//! This crate contains the orchestrator that turns a selected title into
//! display-ready recommendation cards.

pub mod orchestrator;

pub use orchestrator::{EngineError, MovieCard, RecommendationEngine, Result};
