//! TMDB poster client.
//!
//! `fetch_poster` never fails: every path ends in either a real image URL or
//! one of the fixed placeholders. Connection failures and timeouts are retried
//! up to the configured number of attempts; everything else finishes on the
//! first attempt.

use crate::config::PosterConfig;
use crate::error::{PosterClientError, Result};
use crate::placeholder;
use crate::retry::{transition, AttemptOutcome, DelayStrategy, FixedDelay, Transition};
use data_loader::MovieId;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// How a lookup ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosterOutcome {
    Found,
    NoCredential,
    NoPoster,
    ConnectionError,
    Timeout,
    Error,
}

/// Full result of a poster lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosterLookup {
    /// Image URL to display; always non-empty
    pub url: String,
    pub outcome: PosterOutcome,
    /// HTTP attempts made
    pub attempts: u32,
    /// Non-fatal message for the user, set for connection, timeout and request errors
    pub warning: Option<String>,
}

impl PosterLookup {
    fn placeholder(outcome: PosterOutcome, url: &str, attempts: u32, warning: Option<String>) -> Self {
        Self {
            url: url.to_string(),
            outcome,
            attempts,
            warning,
        }
    }
}

/// Client for resolving poster URLs from the metadata service.
#[derive(Clone)]
pub struct PosterClient {
    http: reqwest::Client,
    api_key: Option<String>,
    api_url: String,
    image_base_url: String,
    retries: u32,
    delay: Arc<dyn DelayStrategy>,
}

impl PosterClient {
    /// Build a client from configuration.
    ///
    /// Only fails when the underlying HTTP client cannot be constructed.
    pub fn new(config: PosterConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| PosterClientError::ClientBuild(e.to_string()))?;

        Ok(Self {
            http,
            api_key: config.credential().map(str::to_string),
            api_url: config.tmdb_api_url.trim_end_matches('/').to_string(),
            image_base_url: config.tmdb_image_base_url.trim_end_matches('/').to_string(),
            retries: config.poster_retries,
            delay: Arc::new(FixedDelay(config.delay())),
        })
    }

    /// Replace the wait between attempts (default: fixed delay from config)
    pub fn with_delay_strategy(mut self, strategy: impl DelayStrategy + 'static) -> Self {
        self.delay = Arc::new(strategy);
        self
    }

    /// Configure the total number of attempts (default: 3)
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Resolve a poster URL for `movie_id`; never fails
    pub async fn fetch_poster(&self, movie_id: MovieId) -> String {
        self.lookup(movie_id).await.url
    }

    /// Resolve a poster and report how the lookup went
    #[instrument(skip(self))]
    pub async fn lookup(&self, movie_id: MovieId) -> PosterLookup {
        let Some(api_key) = self.api_key.as_deref() else {
            return PosterLookup::placeholder(
                PosterOutcome::NoCredential,
                placeholder::NO_API_KEY,
                0,
                None,
            );
        };

        if self.retries == 0 {
            return PosterLookup::placeholder(PosterOutcome::NoPoster, placeholder::NO_POSTER, 0, None);
        }

        let mut attempt = 1;
        loop {
            let outcome = self.attempt(api_key, movie_id).await;

            match transition(attempt, self.retries, &outcome) {
                Transition::Retry => {
                    let wait = self.delay.delay(attempt);
                    debug!(attempt, ?wait, "Transient poster failure, retrying: {:?}", outcome);
                    if !wait.is_zero() {
                        tokio::time::sleep(wait).await;
                    }
                    attempt += 1;
                }
                Transition::Finish => return self.finish(movie_id, attempt, outcome),
            }
        }
    }

    /// One HTTP round trip, classified
    async fn attempt(&self, api_key: &str, movie_id: MovieId) -> AttemptOutcome {
        match self.request_details(api_key, movie_id).await {
            Ok(details) => match poster_path(&details) {
                Some(path) => AttemptOutcome::Poster(path.to_string()),
                None => AttemptOutcome::NoPoster,
            },
            Err(err) => AttemptOutcome::from(err),
        }
    }

    async fn request_details(&self, api_key: &str, movie_id: MovieId) -> Result<Value> {
        let url = format!("{}/movie/{}", self.api_url, movie_id);

        let response = self
            .http
            .get(&url)
            .query(&[("api_key", api_key)])
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<Value>().await?)
    }

    /// Turn the last attempt into a lookup result, warning where the user should know
    fn finish(&self, movie_id: MovieId, attempts: u32, outcome: AttemptOutcome) -> PosterLookup {
        match outcome {
            AttemptOutcome::Poster(path) => PosterLookup {
                url: format!("{}{}", self.image_base_url, path),
                outcome: PosterOutcome::Found,
                attempts,
                warning: None,
            },
            AttemptOutcome::NoPoster => {
                PosterLookup::placeholder(PosterOutcome::NoPoster, placeholder::NO_POSTER, attempts, None)
            }
            AttemptOutcome::Transient(PosterClientError::Timeout(reason)) => {
                warn!(movie_id, attempts, %reason, "Poster request timed out");
                PosterLookup::placeholder(
                    PosterOutcome::Timeout,
                    placeholder::TIMEOUT,
                    attempts,
                    Some(format!("Timeout for movie ID {}", movie_id)),
                )
            }
            AttemptOutcome::Transient(err) => {
                warn!(movie_id, attempts, error = %err, "Could not connect to metadata service");
                PosterLookup::placeholder(
                    PosterOutcome::ConnectionError,
                    placeholder::CONNECTION_ERROR,
                    attempts,
                    Some(format!("Connection error for movie ID {}", movie_id)),
                )
            }
            AttemptOutcome::Permanent(err) => {
                warn!(movie_id, attempts, error = %err, "Poster request failed");
                PosterLookup::placeholder(
                    PosterOutcome::Error,
                    placeholder::ERROR,
                    attempts,
                    Some(format!("Error fetching poster: {}", err)),
                )
            }
        }
    }
}

/// Non-empty `poster_path` string from a movie details body.
///
/// Any other JSON shape (array, string, object without the field) has no poster.
fn poster_path(details: &Value) -> Option<&str> {
    details
        .get("poster_path")
        .and_then(Value::as_str)
        .filter(|path| !path.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(config: PosterConfig) -> PosterClient {
        PosterClient::new(config).unwrap()
    }

    #[test]
    fn test_credential_detection() {
        assert!(!client(PosterConfig::default()).has_credential());
        assert!(client(PosterConfig::default().with_api_key("key")).has_credential());
    }

    #[test]
    fn test_finish_builds_image_url() {
        let client = client(PosterConfig::default().with_api_key("key"));

        let lookup = client.finish(19995, 1, AttemptOutcome::Poster("/abc.jpg".into()));
        assert_eq!(lookup.url, "https://image.tmdb.org/t/p/w500/abc.jpg");
        assert_eq!(lookup.outcome, PosterOutcome::Found);
        assert!(lookup.warning.is_none());
    }

    #[test]
    fn test_finish_warnings() {
        let client = client(PosterConfig::default().with_api_key("key"));

        let lookup = client.finish(
            7,
            3,
            AttemptOutcome::Transient(PosterClientError::Connection("refused".into())),
        );
        assert_eq!(lookup.url, placeholder::CONNECTION_ERROR);
        assert_eq!(lookup.warning.as_deref(), Some("Connection error for movie ID 7"));

        let lookup = client.finish(
            7,
            1,
            AttemptOutcome::Permanent(PosterClientError::Status { status: 401 }),
        );
        assert_eq!(lookup.url, placeholder::ERROR);
        assert_eq!(
            lookup.warning.as_deref(),
            Some("Error fetching poster: Metadata service returned status 401")
        );
    }

    #[test]
    fn test_poster_path_extraction() {
        assert_eq!(poster_path(&json!({ "poster_path": "/a.jpg" })), Some("/a.jpg"));
        assert_eq!(poster_path(&json!({ "poster_path": "" })), None);
        assert_eq!(poster_path(&json!({ "poster_path": null })), None);
        assert_eq!(poster_path(&json!({ "id": 1 })), None);
        assert_eq!(poster_path(&json!(["/a.jpg"])), None);
        assert_eq!(poster_path(&json!("/a.jpg")), None);
    }

    #[tokio::test]
    async fn test_zero_retries_makes_no_request() {
        // Unroutable URL: any request would fail with a connection error
        let config = PosterConfig {
            tmdb_api_url: "http://127.0.0.1:9".to_string(),
            ..PosterConfig::default().with_api_key("key")
        };
        let lookup = client(config).with_retries(0).lookup(1).await;

        assert_eq!(lookup.outcome, PosterOutcome::NoPoster);
        assert_eq!(lookup.attempts, 0);
        assert_eq!(lookup.url, placeholder::NO_POSTER);
    }
}
