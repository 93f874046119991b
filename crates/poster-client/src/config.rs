use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

/// Value shipped in sample configs; treated the same as no key at all
pub const API_KEY_SENTINEL: &str = "YOUR_API_KEY_HERE";

/// Poster fetcher configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct PosterConfig {
    /// TMDB API key
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// TMDB API base URL
    #[serde(default = "default_api_url")]
    pub tmdb_api_url: String,

    /// Prefix joined with a movie's `poster_path`
    #[serde(default = "default_image_base_url")]
    pub tmdb_image_base_url: String,

    /// Total attempts per poster for transient failures
    #[serde(default = "default_retries")]
    pub poster_retries: u32,

    /// Delay between attempts in milliseconds
    #[serde(default = "default_delay_ms")]
    pub poster_delay_ms: u64,

    /// Per-attempt HTTP timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub poster_timeout_ms: u64,
}

fn default_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_retries() -> u32 {
    3
}

fn default_delay_ms() -> u64 {
    1000
}

fn default_timeout_ms() -> u64 {
    5000
}

impl Default for PosterConfig {
    fn default() -> Self {
        Self {
            tmdb_api_key: None,
            tmdb_api_url: default_api_url(),
            tmdb_image_base_url: default_image_base_url(),
            poster_retries: default_retries(),
            poster_delay_ms: default_delay_ms(),
            poster_timeout_ms: default_timeout_ms(),
        }
    }
}

impl PosterConfig {
    /// Load configuration from environment variables (and `.env` if present).
    ///
    /// A malformed optional setting is logged and ignored; the API key is still
    /// honoured so posters keep working.
    pub fn from_env_or_default() -> Self {
        dotenvy::dotenv().ok();
        Self::from_vars_or_default(std::env::vars())
    }

    /// Same as [`PosterConfig::from_env_or_default`] over explicit `(NAME, value)` pairs
    pub fn from_vars_or_default<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: Vec<(String, String)> = vars.into_iter().collect();

        match envy::from_iter::<_, PosterConfig>(vars.iter().cloned()) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "Invalid poster configuration, using defaults");
                let api_key = vars
                    .into_iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case("TMDB_API_KEY"))
                    .map(|(_, value)| value);
                Self {
                    tmdb_api_key: api_key,
                    ..Self::default()
                }
            }
        }
    }

    /// Set the API key
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.tmdb_api_key = Some(key.into());
        self
    }

    /// The API key, if it is usable
    pub fn credential(&self) -> Option<&str> {
        self.tmdb_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != API_KEY_SENTINEL)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.poster_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.poster_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PosterConfig::default();
        assert_eq!(config.poster_retries, 3);
        assert_eq!(config.delay(), Duration::from_secs(1));
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.tmdb_image_base_url, "https://image.tmdb.org/t/p/w500");
    }

    #[test]
    fn test_credential_validation() {
        assert_eq!(PosterConfig::default().credential(), None);
        assert_eq!(PosterConfig::default().with_api_key("").credential(), None);
        assert_eq!(PosterConfig::default().with_api_key("   ").credential(), None);
        assert_eq!(
            PosterConfig::default().with_api_key(API_KEY_SENTINEL).credential(),
            None
        );
        assert_eq!(
            PosterConfig::default().with_api_key("abc123").credential(),
            Some("abc123")
        );
    }

    #[test]
    fn test_malformed_setting_falls_back_to_defaults() {
        let vars = vec![
            ("TMDB_API_KEY".to_string(), "k".to_string()),
            ("POSTER_RETRIES".to_string(), "three".to_string()),
            ("POSTER_TIMEOUT_MS".to_string(), "250".to_string()),
        ];
        assert!(envy::from_iter::<_, PosterConfig>(vars.clone()).is_err());

        let config = PosterConfig::from_vars_or_default(vars);
        assert_eq!(config.credential(), Some("k"));
        assert_eq!(config.poster_retries, 3);
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_fallback_keeps_valid_config() {
        let vars = vec![("POSTER_RETRIES".to_string(), "1".to_string())];

        let config = PosterConfig::from_vars_or_default(vars);
        assert_eq!(config.poster_retries, 1);
        assert_eq!(config.credential(), None);
    }

    #[test]
    fn test_deserialize_from_pairs() {
        let vars = vec![
            ("TMDB_API_KEY".to_string(), "k".to_string()),
            ("POSTER_RETRIES".to_string(), "5".to_string()),
        ];
        let config: PosterConfig = envy::from_iter(vars).unwrap();
        assert_eq!(config.credential(), Some("k"));
        assert_eq!(config.poster_retries, 5);
        assert_eq!(config.tmdb_api_url, "https://api.themoviedb.org/3");
    }
}
