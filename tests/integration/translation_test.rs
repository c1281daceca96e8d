//! Translation client tests against a mock provider

use std::sync::Arc;
use std::time::{Duration, Instant};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};
use campus_events::i18n::Language;
use campus_events::Settings;
use campus_events::services::{HttpTranslator, Translator};

use crate::helpers::{all_targets, new_event, TestContext, TranslationMockServer};

#[tokio::test]
async fn test_batch_request_returns_all_targets() {
    let mock = TranslationMockServer::new().await;
    Mock::given(method("POST"))
        .and(path("/translate"))
        .and(body_partial_json(json!({ "q": "Welcome", "source": "en" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "translations": all_targets("Welcome") })))
        .expect(1)
        .mount(&mock.server)
        .await;

    let translator = HttpTranslator::new(&mock.config()).unwrap();
    let map = translator.translate("Welcome").await;

    assert_eq!(map.len(), 5);
    assert_eq!(map.get(&Language::Ta).map(String::as_str), Some("ta Welcome"));
    assert!(!map.contains_key(&Language::En));
}

#[tokio::test]
async fn test_api_key_sent_as_bearer_token() {
    let mock = TranslationMockServer::new().await;
    Mock::given(method("POST"))
        .and(path("/translate"))
        .and(header("authorization", "Bearer secret-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "translations": { "hi": "नमस्ते" } })))
        .expect(1)
        .mount(&mock.server)
        .await;

    let mut config = mock.config();
    config.api_key = Some("secret-key".to_string());
    let translator = HttpTranslator::new(&config).unwrap();

    let map = translator.translate("Hello").await;
    assert_eq!(map.get(&Language::Hi).map(String::as_str), Some("नमस्ते"));
}

#[tokio::test]
async fn test_transient_failure_is_retried() {
    let mock = TranslationMockServer::new().await;
    mock.mock_status(503, 1).await;
    mock.mock_success(all_targets("Sports Day")).await;

    let translator = HttpTranslator::new(&mock.config()).unwrap();
    let map = translator.translate("Sports Day").await;

    assert_eq!(map.len(), 5);
    assert_eq!(mock.request_count().await, 2);
}

#[tokio::test]
async fn test_rate_limited_response_is_retried() {
    let mock = TranslationMockServer::new().await;
    mock.mock_status(429, 2).await;
    mock.mock_success(all_targets("Quiz")).await;

    let translator = HttpTranslator::new(&mock.config()).unwrap();
    let map = translator.translate("Quiz").await;

    assert_eq!(map.len(), 5);
    assert_eq!(mock.request_count().await, 3);
}

#[tokio::test]
async fn test_exhausted_retries_yield_empty_mapping() {
    let mock = TranslationMockServer::new().await;
    mock.mock_status(500, 10).await;

    let translator = HttpTranslator::new(&mock.config()).unwrap();
    let map = translator.translate("Career Fair").await;

    assert!(map.is_empty());
    // One attempt plus two retries
    assert_eq!(mock.request_count().await, 3);
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let mock = TranslationMockServer::new().await;
    mock.mock_status(400, 10).await;

    let translator = HttpTranslator::new(&mock.config()).unwrap();
    assert!(translator.translate("Open Mic").await.is_empty());
    assert_eq!(mock.request_count().await, 1);
}

#[tokio::test]
async fn test_malformed_body_is_not_retried() {
    let mock = TranslationMockServer::new().await;
    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock.server)
        .await;

    let translator = HttpTranslator::new(&mock.config()).unwrap();
    assert!(translator.translate("Open Mic").await.is_empty());
    assert_eq!(mock.request_count().await, 1);
}

#[tokio::test]
async fn test_blank_input_makes_no_request() {
    let mock = TranslationMockServer::new().await;
    mock.mock_success(all_targets("unused")).await;

    let translator = HttpTranslator::new(&mock.config()).unwrap();
    assert!(translator.translate("").await.is_empty());
    assert!(translator.translate(" \n\t").await.is_empty());
    assert_eq!(mock.request_count().await, 0);
}

#[tokio::test]
async fn test_timeout_degrades_to_empty_mapping() {
    let mock = TranslationMockServer::new().await;
    mock.mock_slow(Duration::from_secs(3)).await;

    let mut config = mock.config();
    config.timeout_seconds = 1;
    config.max_retries = 0;
    let translator = HttpTranslator::new(&config).unwrap();

    assert!(translator.translate("Late Show").await.is_empty());
}

#[tokio::test]
async fn test_slow_provider_is_cut_off_at_deadline() {
    let mock = TranslationMockServer::new().await;
    mock.mock_slow(Duration::from_secs(30)).await;

    let mut config = mock.config();
    config.deadline_ms = 1000;
    let translator = HttpTranslator::new(&config).unwrap();

    let started = Instant::now();
    assert!(translator.translate("Hello").await.is_empty());
    assert!(started.elapsed() < Duration::from_secs(2), "took {:?}", started.elapsed());
}

#[tokio::test]
async fn test_retries_stop_at_deadline() {
    let mock = TranslationMockServer::new().await;
    mock.mock_status(503, 100).await;

    let mut config = mock.config();
    config.initial_backoff_ms = 400;
    config.deadline_ms = 600;
    let translator = HttpTranslator::new(&config).unwrap();

    let started = Instant::now();
    assert!(translator.translate("Hackathon").await.is_empty());
    assert!(started.elapsed() < Duration::from_millis(600));
    // The second backoff (800ms) would overrun the deadline
    assert_eq!(mock.request_count().await, 2);
}

#[tokio::test]
async fn test_throttled_call_gives_up_before_deadline() {
    let mock = TranslationMockServer::new().await;
    mock.mock_success(all_targets("Chess Club")).await;

    let mut config = mock.config();
    config.requests_per_second = 1;
    config.deadline_ms = 300;
    let translator = HttpTranslator::new(&config).unwrap();

    assert_eq!(translator.translate("Chess Club").await.len(), 5);

    let started = Instant::now();
    assert!(translator.translate("Chess Club").await.is_empty());
    assert!(started.elapsed() < Duration::from_millis(300));
    assert_eq!(mock.request_count().await, 1);
}

#[tokio::test]
async fn test_targets_follow_supported_languages() {
    let mock = TranslationMockServer::new().await;
    Mock::given(method("POST"))
        .and(path("/translate"))
        .and(body_partial_json(json!({ "targets": ["hi", "ta"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "translations": all_targets("Debate") })))
        .expect(1)
        .mount(&mock.server)
        .await;

    let mut i18n = Settings::default().i18n;
    i18n.supported_languages = ["en", "hi", "ta"].iter().map(|s| s.to_string()).collect();
    let translator = HttpTranslator::new(&mock.config())
        .unwrap()
        .with_targets(i18n.target_languages().unwrap());

    let map = translator.translate("Debate").await;
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![Language::Hi, Language::Ta]);
}

#[tokio::test]
async fn test_event_creation_survives_provider_outage() {
    let mock = TranslationMockServer::new().await;
    mock.mock_status(503, 100).await;

    let ctx = TestContext::new();
    let translator = Arc::new(HttpTranslator::new(&mock.config()).unwrap());
    let events = ctx.event_service_with(translator);

    let event = events
        .create_event(&ctx.organizer, new_event("Photography Walk"))
        .await
        .expect("Event creation must not depend on translation");

    assert_eq!(event.title.canonical(), Some("Photography Walk"));
    assert_eq!(event.title.get(Language::Hi), None);
    assert_eq!(event.description.canonical(), Some("Photography Walk for everyone on campus"));
}
