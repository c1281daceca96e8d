//! Mock translation API server for testing
//!
//! Simulates the batch translation endpoint with wiremock.

use std::time::Duration;
use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};
use campus_events::config::TranslationConfig;

pub struct TranslationMockServer {
    pub server: MockServer,
}

impl TranslationMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Client settings pointing at the mock, with short backoff and no throttling
    pub fn config(&self) -> TranslationConfig {
        TranslationConfig {
            api_url: self.server.uri(),
            api_key: None,
            timeout_seconds: 5,
            deadline_ms: 5000,
            max_retries: 2,
            initial_backoff_ms: 10,
            requests_per_second: 1000,
        }
    }

    /// Respond to every request with the given translations
    pub async fn mock_success(&self, translations: Value) {
        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "translations": translations })))
            .mount(&self.server)
            .await;
    }

    /// Respond with `status` to the next `times` requests, ahead of other mocks
    pub async fn mock_status(&self, status: u16, times: u64) {
        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(ResponseTemplate::new(status))
            .up_to_n_times(times)
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    /// Respond after `delay`
    pub async fn mock_slow(&self, delay: Duration) {
        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "translations": {} }))
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }

    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0)
    }
}

/// A full set of target-language translations for `text`
pub fn all_targets(text: &str) -> Value {
    json!({
        "hi": format!("hi {}", text),
        "bn": format!("bn {}", text),
        "gu": format!("gu {}", text),
        "mr": format!("mr {}", text),
        "ta": format!("ta {}", text),
    })
}
