//! Bounded retry state machine for poster lookups.
//!
//! ```text
//! Attempt(n) -> Poster | NoPoster | Permanent       => Finish
//! Attempt(n) -> Transient, n <  max                  => wait delay(n), Attempt(n + 1)
//! Attempt(n) -> Transient, n == max                  => Finish
//! ```
//!
//! Waiting is delegated to a `DelayStrategy` so tests can run the full
//! machine without real sleeps.

use crate::error::PosterClientError;
use std::time::Duration;

/// Decides how long to wait before the next attempt
pub trait DelayStrategy: Send + Sync {
    /// Delay after failed attempt number `attempt` (1-based)
    fn delay(&self, attempt: u32) -> Duration;
}

/// Same delay between every attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay(pub Duration);

impl FixedDelay {
    /// No waiting at all
    pub fn none() -> Self {
        Self(Duration::ZERO)
    }
}

impl DelayStrategy for FixedDelay {
    fn delay(&self, _attempt: u32) -> Duration {
        self.0
    }
}

/// Result of a single HTTP attempt
#[derive(Debug)]
pub enum AttemptOutcome {
    /// Response carried a non-empty `poster_path`
    Poster(String),
    /// Well-formed response without a poster
    NoPoster,
    /// Connection failure or timeout
    Transient(PosterClientError),
    /// Anything else: bad status, undecodable body, request error
    Permanent(PosterClientError),
}

impl From<PosterClientError> for AttemptOutcome {
    fn from(err: PosterClientError) -> Self {
        if err.is_transient() {
            Self::Transient(err)
        } else {
            Self::Permanent(err)
        }
    }
}

/// What to do after an attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Retry,
    Finish,
}

/// Next step after attempt `attempt` out of `max_attempts`
pub fn transition(attempt: u32, max_attempts: u32, outcome: &AttemptOutcome) -> Transition {
    match outcome {
        AttemptOutcome::Transient(_) if attempt < max_attempts => Transition::Retry,
        _ => Transition::Finish,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timeout() -> AttemptOutcome {
        AttemptOutcome::from(PosterClientError::Timeout("slow".into()))
    }

    #[test]
    fn test_transient_retries_until_bound() {
        assert_eq!(transition(1, 3, &timeout()), Transition::Retry);
        assert_eq!(transition(2, 3, &timeout()), Transition::Retry);
        assert_eq!(transition(3, 3, &timeout()), Transition::Finish);
    }

    #[test]
    fn test_terminal_outcomes_never_retry() {
        let permanent = AttemptOutcome::from(PosterClientError::Status { status: 500 });
        assert!(matches!(permanent, AttemptOutcome::Permanent(_)));

        assert_eq!(transition(1, 3, &permanent), Transition::Finish);
        assert_eq!(transition(1, 3, &AttemptOutcome::NoPoster), Transition::Finish);
        assert_eq!(
            transition(1, 3, &AttemptOutcome::Poster("/a.jpg".into())),
            Transition::Finish
        );
    }

    #[test]
    fn test_fixed_delay() {
        let delay = FixedDelay(Duration::from_millis(250));
        assert_eq!(delay.delay(1), Duration::from_millis(250));
        assert_eq!(delay.delay(7), Duration::from_millis(250));
        assert_eq!(FixedDelay::none().delay(1), Duration::ZERO);
    }
}
