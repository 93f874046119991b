//! # Recommendation Orchestrator
//!
//! Coordinates one user request end to end:
//! 1. Look up similar movies for the selected title
//! 2. Resolve a poster for each one, in rank order, one at a time
//! 3. Return display-ready cards
//!
//! Only a missing title is an error here. Poster problems are folded into
//! each card's `PosterLookup` so the caller can show a placeholder and a warning.

use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tracing::{info, instrument};

use data_loader::{Catalog, MovieId};
use poster_client::{PosterClient, PosterLookup};
use recommender::{Recommendation, RecommendError, SimilarMovies};

/// Errors surfaced to the presentation layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Movie not found in database: {title}")]
    NotFound { title: String },
}

impl From<RecommendError> for EngineError {
    fn from(err: RecommendError) -> Self {
        match err {
            RecommendError::NotFound { title } => EngineError::NotFound { title },
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// A recommendation ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct MovieCard {
    /// 1-based position in the result list
    pub rank: usize,
    pub title: String,
    pub movie_id: MovieId,
    pub score: f32,
    pub poster: PosterLookup,
}

/// Joins the recommender with the poster client
#[derive(Clone)]
pub struct RecommendationEngine {
    recommender: SimilarMovies,
    posters: PosterClient,
}

impl RecommendationEngine {
    /// Create an engine over a loaded catalog
    pub fn new(catalog: Arc<Catalog>, posters: PosterClient) -> Self {
        Self {
            recommender: SimilarMovies::new(catalog),
            posters,
        }
    }

    /// Configure how many recommendations to return (default: 10)
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.recommender = self.recommender.with_limit(limit);
        self
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        self.recommender.catalog()
    }

    /// Recommendations without posters
    pub fn recommend(&self, title: &str) -> Result<Vec<Recommendation>> {
        Ok(self.recommender.recommend(title)?)
    }

    /// Recommendations with a resolved poster for each
    #[instrument(skip(self))]
    pub async fn recommend_with_posters(&self, title: &str) -> Result<Vec<MovieCard>> {
        let start_time = Instant::now();

        let recommendations = self.recommend(title)?;
        info!(
            "Found {} recommendations for '{}'",
            recommendations.len(),
            title
        );

        let mut cards = Vec::with_capacity(recommendations.len());
        for (i, rec) in recommendations.into_iter().enumerate() {
            let poster = self.posters.lookup(rec.movie_id).await;
            cards.push(MovieCard {
                rank: i + 1,
                title: rec.title,
                movie_id: rec.movie_id,
                score: rec.score,
                poster,
            });
        }

        let warnings = cards.iter().filter(|c| c.poster.warning.is_some()).count();
        info!(
            "Built {} cards for '{}' ({} poster warnings) in {:.2?}",
            cards.len(),
            title,
            warnings,
            start_time.elapsed()
        );
        Ok(cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::BundleMovie;
    use poster_client::{placeholder, FixedDelay, PosterConfig, PosterOutcome};
    use serde_json::json;
    use wiremock::matchers::{method, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // ============================================================================
    // Test Helpers
    // ============================================================================

    fn build_test_catalog() -> Arc<Catalog> {
        let movies = vec![
            BundleMovie { movie_id: 603, title: "The Matrix".to_string() },
            BundleMovie { movie_id: 604, title: "The Matrix Reloaded".to_string() },
            BundleMovie { movie_id: 605, title: "The Matrix Revolutions".to_string() },
            BundleMovie { movie_id: 13, title: "Forrest Gump".to_string() },
        ];
        let similarity = vec![
            vec![1.0, 0.9, 0.8, 0.1],
            vec![0.9, 1.0, 0.95, 0.1],
            vec![0.8, 0.95, 1.0, 0.1],
            vec![0.1, 0.1, 0.1, 1.0],
        ];
        Arc::new(Catalog::new(movies, similarity).expect("valid test catalog"))
    }

    fn build_test_engine(api_url: &str, api_key: Option<&str>) -> RecommendationEngine {
        let mut config = PosterConfig {
            tmdb_api_url: api_url.to_string(),
            poster_timeout_ms: 200,
            ..PosterConfig::default()
        };
        if let Some(key) = api_key {
            config = config.with_api_key(key);
        }
        let posters = PosterClient::new(config)
            .expect("Failed to build poster client")
            .with_delay_strategy(FixedDelay::none());

        RecommendationEngine::new(build_test_catalog(), posters)
    }

    // ============================================================================
    // Tests
    // ============================================================================

    #[tokio::test]
    async fn test_cards_carry_posters_in_rank_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/movie/60[45]$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "poster_path": "/p.jpg" })))
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/movie/13$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let engine = build_test_engine(&server.uri(), Some("key"));
        let cards = engine.recommend_with_posters("The Matrix").await.unwrap();

        let ids: Vec<MovieId> = cards.iter().map(|c| c.movie_id).collect();
        assert_eq!(ids, vec![604, 605, 13]);
        assert_eq!(cards[0].rank, 1);
        assert_eq!(cards[2].rank, 3);
        assert_eq!(cards[0].poster.url, "https://image.tmdb.org/t/p/w500/p.jpg");
        assert_eq!(cards[2].poster.outcome, PosterOutcome::NoPoster);
    }

    #[tokio::test]
    async fn test_not_found_makes_no_poster_calls() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let engine = build_test_engine(&server.uri(), Some("key"));
        let result = engine.recommend_with_posters("Inception").await;

        assert_eq!(
            result,
            Err(EngineError::NotFound { title: "Inception".to_string() })
        );
    }

    #[tokio::test]
    async fn test_missing_key_uses_placeholders() {
        let engine = build_test_engine("http://127.0.0.1:1", None).with_limit(2);

        let cards = engine.recommend_with_posters("Forrest Gump").await.unwrap();
        assert_eq!(cards.len(), 2);
        for card in &cards {
            assert_eq!(card.poster.url, placeholder::NO_API_KEY);
            assert!(card.poster.warning.is_none());
        }
    }

    #[tokio::test]
    async fn test_server_errors_become_warnings() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let engine = build_test_engine(&server.uri(), Some("key")).with_limit(1);
        let cards = engine.recommend_with_posters("The Matrix Revolutions").await.unwrap();

        assert_eq!(cards[0].title, "The Matrix Reloaded");
        assert_eq!(cards[0].poster.url, placeholder::ERROR);
        assert!(cards[0].poster.warning.is_some());
    }

    #[test]
    fn test_recommend_without_posters() {
        let engine = build_test_engine("http://127.0.0.1:1", None);

        let recs = engine.recommend("The Matrix Reloaded").unwrap();
        assert_eq!(recs[0].title, "The Matrix Revolutions");
        assert_eq!(engine.catalog().len(), 4);
    }
}
