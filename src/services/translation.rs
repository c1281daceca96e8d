//! Translation service implementation
//!
//! Wraps the third-party batch translation API used to fill in the non-canonical
//! language variants of event titles and descriptions. Calls are throttled and
//! retried on transient failures, and one call never outlives its deadline:
//! waiting for a send permit, every attempt and every backoff all count
//! against it. Failures never reach the caller: an unavailable provider yields
//! an empty mapping, and the event keeps only its canonical text.

use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use governor::clock::{Clock, DefaultClock};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{debug, warn};
use crate::config::TranslationConfig;
use crate::i18n::{Language, LanguageMap};
use crate::utils::errors::{CampusEventsError, Result, TranslationError, TranslationResult};
use crate::utils::logging;

/// Source of translated variants for canonical text
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `source` into every target language.
    ///
    /// Blank input yields an empty mapping without contacting the provider.
    /// Languages the provider could not translate are simply absent.
    async fn translate(&self, source: &str) -> LanguageMap;
}

/// Translator used when the translation feature is switched off
#[derive(Debug, Clone, Default)]
pub struct DisabledTranslator;

#[async_trait]
impl Translator for DisabledTranslator {
    async fn translate(&self, _source: &str) -> LanguageMap {
        LanguageMap::new()
    }
}

/// Bounded exponential backoff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_backoff: Duration,
}

impl RetryPolicy {
    /// Delay before retry number `retry` (zero-based)
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.initial_backoff.saturating_mul(2u32.saturating_pow(retry))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_backoff: Duration::from_secs(1),
        }
    }
}

impl From<&TranslationConfig> for RetryPolicy {
    fn from(config: &TranslationConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            initial_backoff: Duration::from_millis(config.initial_backoff_ms),
        }
    }
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: Language,
    targets: &'a [Language],
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translations: HashMap<String, String>,
}

impl TranslateResponse {
    /// Keep non-blank variants for the requested languages
    fn into_language_map(self, targets: &[Language]) -> LanguageMap {
        self.translations
            .into_iter()
            .filter_map(|(code, text)| {
                let lang = code.parse::<Language>().ok()?;
                (targets.contains(&lang) && !text.trim().is_empty()).then_some((lang, text))
            })
            .collect()
    }
}

/// HTTP client for the batch translation API
#[derive(Clone)]
pub struct HttpTranslator {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    targets: Vec<Language>,
    retry: RetryPolicy,
    deadline: Duration,
    limiter: Arc<DefaultDirectRateLimiter>,
    clock: DefaultClock,
}

impl HttpTranslator {
    /// Create a new HttpTranslator instance
    pub fn new(config: &TranslationConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("CampusEvents/1.0")
            .build()
            .map_err(CampusEventsError::Http)?;

        let per_second = NonZeroU32::new(config.requests_per_second).unwrap_or(NonZeroU32::MIN);

        Ok(Self {
            client,
            endpoint: format!("{}/translate", config.api_url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
            targets: Language::TARGETS.to_vec(),
            retry: RetryPolicy::from(config),
            deadline: Duration::from_millis(config.deadline_ms),
            limiter: Arc::new(RateLimiter::direct(Quota::per_second(per_second))),
            clock: DefaultClock::default(),
        })
    }

    /// Restrict the requested languages, e.g. to the configured supported set
    pub fn with_targets(mut self, targets: Vec<Language>) -> Self {
        self.targets = targets
            .into_iter()
            .filter(|lang| *lang != Language::CANONICAL)
            .collect();
        self
    }

    pub fn targets(&self) -> &[Language] {
        &self.targets
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Request all target languages, retrying transient failures until
    /// `deadline`
    async fn translate_with_retry(&self, source: &str, deadline: Instant) -> TranslationResult<LanguageMap> {
        let mut retry = 0;
        loop {
            self.acquire_permit(deadline).await?;

            match self.request_translations(source).await {
                Ok(map) => return Ok(map),
                Err(e) if e.is_transient() && retry < self.retry.max_retries => {
                    let delay = self.retry.delay_for(retry);
                    if Instant::now() + delay >= deadline {
                        return Err(e);
                    }
                    warn!(
                        error = %e,
                        retry = retry + 1,
                        delay_ms = delay.as_millis() as u64,
                        "Transient translation failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    retry += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Wait for a send permit, failing fast when none frees up before `deadline`
    async fn acquire_permit(&self, deadline: Instant) -> TranslationResult<()> {
        loop {
            match self.limiter.check() {
                Ok(()) => return Ok(()),
                Err(not_until) => {
                    let wait = not_until.wait_time_from(self.clock.now());
                    if Instant::now() + wait >= deadline {
                        return Err(TranslationError::DeadlineExceeded);
                    }
                    tokio::time::sleep(wait).await;
                }
            }
        }
    }

    /// Make a single translation API request
    async fn request_translations(&self, source: &str) -> TranslationResult<LanguageMap> {
        debug!(endpoint = %self.endpoint, chars = source.len(), "Making translation API request");

        let body = TranslateRequest {
            q: source,
            source: Language::CANONICAL,
            targets: &self.targets,
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                TranslationError::Timeout
            } else {
                TranslationError::ServiceUnavailable(e.to_string())
            }
        })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(TranslationError::RateLimited);
        }
        if status.is_server_error() {
            return Err(TranslationError::ServerError(status.as_u16()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranslationError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TranslateResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                TranslationError::Timeout
            } else {
                TranslationError::InvalidResponse(e.to_string())
            }
        })?;

        Ok(parsed.into_language_map(&self.targets))
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(&self, source: &str) -> LanguageMap {
        if source.trim().is_empty() || self.targets.is_empty() {
            return LanguageMap::new();
        }

        let deadline = Instant::now() + self.deadline;
        let outcome = tokio::time::timeout_at(deadline, self.translate_with_retry(source, deadline))
            .await
            .unwrap_or(Err(TranslationError::DeadlineExceeded));

        match outcome {
            Ok(map) => {
                debug!(languages = map.len(), "Translation completed");
                map
            }
            Err(e) => {
                logging::log_api_error("translation", &e.to_string(), Some("falling back to canonical text"));
                LanguageMap::new()
            }
        }
    }
}

impl std::fmt::Debug for HttpTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTranslator")
            .field("endpoint", &self.endpoint)
            .field("targets", &self.targets)
            .field("retry", &self.retry)
            .field("deadline", &self.deadline)
            .finish_non_exhaustive()
    }
}
