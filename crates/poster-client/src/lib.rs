//! Poster client for the TMDB metadata service.
//!
//! This crate resolves a movie id into a displayable poster URL. It handles:
//! - Skipping the network entirely when no API key is configured
//! - One GET per attempt with a per-attempt timeout
//! - Retrying connection failures and timeouts with an injectable delay
//! - Falling back to a fixed placeholder image for every failure class
//!
//! ## Example Usage
//!
//! ```ignore
//! use poster_client::{PosterClient, PosterConfig};
//!
//! let client = PosterClient::new(PosterConfig::from_env_or_default())?;
//! let url = client.fetch_poster(19995).await;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod placeholder;
pub mod retry;

pub use client::{PosterClient, PosterLookup, PosterOutcome};
pub use config::PosterConfig;
pub use error::{PosterClientError, Result};
pub use retry::{DelayStrategy, FixedDelay};
