//! Blocking fetch of one character record, with a bounded retry loop.
//!
//! Transport problems never escape: after the last attempt they are folded
//! into an [`ErrorPayload`] and handed downstream as data.

use std::thread;
use std::time::Duration;

use log::{debug, error, warn};
use rand::Rng;
use serde_json::Value;
use thiserror::Error;

use crate::model::payload::{ErrorPayload, RawCharacter};

pub const DEFAULT_BASE_URL: &str =
    "https://character-service.dndbeyond.com/character/v5/character";

const ATTEMPTS: u32 = 3;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const RETRY_BASE_SECS: f64 = 0.6;
const RETRY_JITTER_SECS: f64 = 0.2;

const FETCH_FAILED_MSG: &str =
    "Failed to fetch character data. Please check your connection or try again later.";

/// Internal to the retry loop; the caller only ever sees an `ErrorPayload`.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service returned HTTP {0}")]
    Status(u16),
    #[error("response body was not valid JSON: {0}")]
    Body(#[from] serde_json::Error),
}

pub struct Fetcher {
    client: reqwest::blocking::Client,
    base_url: String,
    timeout: Duration,
}

impl Fetcher {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the fetcher somewhere else (tests use a local endpoint).
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Up to three GETs against the character endpoint. Success yields the
    /// body's `data` field (or the whole body when there is none); exhausting
    /// the attempts yields an error payload instead.
    pub fn fetch(&self, character_id: &str) -> RawCharacter {
        let url = format!("{}/{}", self.base_url, character_id);
        let referer = format!("https://www.dndbeyond.com/characters/{}", character_id);

        let mut last_err = None;
        for attempt in 1..=ATTEMPTS {
            if attempt > 1 {
                thread::sleep(retry_delay(attempt - 1));
            }
            match self.attempt(&url, &referer) {
                Ok(record) => {
                    debug!("fetched character {} on attempt {}", character_id, attempt);
                    return RawCharacter::Record(record);
                }
                Err(e) => {
                    warn!(
                        "attempt {}/{} for character {} failed: {}",
                        attempt, ATTEMPTS, character_id, e
                    );
                    last_err = Some(e);
                }
            }
        }

        error!(
            "giving up on character {} after {} attempts",
            character_id, ATTEMPTS
        );
        RawCharacter::Error(ErrorPayload {
            error: FETCH_FAILED_MSG.to_string(),
            character_id: character_id.to_string(),
            details: last_err.map(|e| e.to_string()),
        })
    }

    fn attempt(&self, url: &str, referer: &str) -> Result<Value, FetchError> {
        let res = self
            .client
            .get(url)
            .header("User-Agent", "Mozilla/5.0")
            .header("Referer", referer)
            .timeout(self.timeout)
            .send()?;

        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let mut body: Value = serde_json::from_str(&res.text()?)?;
        Ok(match body.get_mut("data") {
            Some(data) => data.take(),
            None => body,
        })
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Linearly increasing delay with a little jitter so retries from parallel
/// invocations don't line up.
fn retry_delay(failures: u32) -> Duration {
    let jitter = rand::thread_rng().gen_range(0.0..RETRY_JITTER_SECS);
    Duration::from_secs_f64(RETRY_BASE_SECS * failures as f64 + jitter)
}
