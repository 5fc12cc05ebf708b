use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use time::macros::datetime;
use tower::ServiceExt;

use super::*;
use crate::config::StoreSettings;

struct FixedVerifier(bool);

#[async_trait]
impl CaptchaVerifier for FixedVerifier {
    async fn verify(&self, _token: &str) -> Result<bool, VerifyError> {
        Ok(self.0)
    }
}

struct MisconfiguredVerifier;

#[async_trait]
impl CaptchaVerifier for MisconfiguredVerifier {
    async fn verify(&self, _token: &str) -> Result<bool, VerifyError> {
        Err(VerifyError::MissingSecret)
    }
}

struct FailingStore;

#[async_trait]
impl SubmissionStore for FailingStore {
    async fn create(&self, _submission: &Submission) -> Result<String, StoreError> {
        Err(StoreError::Rejected {
            status: 403,
            body: "insufficient permissions".into(),
        })
    }
}

fn app(verifier: impl CaptchaVerifier + 'static, store: Arc<dyn SubmissionStore>) -> axum::Router {
    let state = ContactState::new(Arc::new(verifier), store, "contactFromSubmission");
    router("/api/contact", state)
}

async fn post_json(app: axum::Router, body: impl Into<Body>) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn full_body() -> String {
    json!({
        "name": "Ada",
        "email": "ada@example.com",
        "message": "Do you have studio time in May?",
        "token": "captcha-proof"
    })
    .to_string()
}

#[tokio::test]
async fn valid_submission_is_saved_and_returns_id() {
    let store = Arc::new(MemoryStore::new());
    let (status, body) = post_json(app(FixedVerifier(true), store.clone()), full_body()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Submission saved");
    let id = body["id"].as_str().unwrap();
    assert!(!id.is_empty());

    let saved = store.submissions();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].0, id);
    let sub = &saved[0].1;
    assert_eq!(sub.document_type, "contactFromSubmission");
    assert_eq!(sub.name, "Ada");
    assert_eq!(sub.email, "ada@example.com");
    assert_eq!(sub.message, "Do you have studio time in May?");
    assert!(!sub.submitted_at.is_empty());
}

#[tokio::test]
async fn missing_token_is_rejected_before_verification() {
    let store = Arc::new(MemoryStore::new());
    let body = json!({"name": "Ada", "email": "ada@example.com", "message": "hi"}).to_string();
    let (status, body) = post_json(app(MisconfiguredVerifier, store.clone()), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Missing fields"}));
    assert!(store.submissions().is_empty());
}

#[tokio::test]
async fn empty_strings_count_as_missing() {
    let store = Arc::new(MemoryStore::new());
    let body = json!({"name": "", "email": "ada@example.com", "message": "hi", "token": "t"})
        .to_string();
    let (status, body) = post_json(app(FixedVerifier(true), store), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing fields");
}

#[tokio::test]
async fn malformed_body_counts_as_missing_fields() {
    let store = Arc::new(MemoryStore::new());
    let (status, body) = post_json(app(FixedVerifier(true), store), "not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing fields");
}

#[tokio::test]
async fn non_string_fields_count_when_truthy() {
    let store = Arc::new(MemoryStore::new());
    let body = json!({"name": "Ada", "email": "ada@example.com", "message": 42, "token": "t"})
        .to_string();
    let (status, _) = post_json(app(FixedVerifier(true), store.clone()), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(store.submissions()[0].1.message, "42");
}

#[tokio::test]
async fn falsy_fields_count_as_missing() {
    for message in [json!(null), json!(false), json!(0)] {
        let store = Arc::new(MemoryStore::new());
        let body = json!({"name": "Ada", "email": "ada@example.com", "message": message, "token": "t"})
            .to_string();
        let (status, body) = post_json(app(FixedVerifier(true), store.clone()), body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "message = {message}");
        assert_eq!(body["error"], "Missing fields");
        assert!(store.submissions().is_empty());
    }
}

#[tokio::test]
async fn rejected_captcha_is_a_bad_request() {
    let store = Arc::new(MemoryStore::new());
    let (status, body) = post_json(app(FixedVerifier(false), store.clone()), full_body()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Failed CAPTCHA"}));
    assert!(store.submissions().is_empty());
}

#[tokio::test]
async fn verifier_failure_is_a_server_error() {
    let store = Arc::new(MemoryStore::new());
    let (status, body) = post_json(app(MisconfiguredVerifier, store), full_body()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Server error"}));
}

#[tokio::test]
async fn store_failure_is_a_server_error_without_details() {
    let (status, body) = post_json(app(FixedVerifier(true), Arc::new(FailingStore)), full_body()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Server error"}));
}

#[tokio::test]
async fn get_is_not_allowed() {
    let req = Request::builder()
        .method("GET")
        .uri("/api/contact")
        .body(Body::empty())
        .unwrap();
    let res = app(FixedVerifier(true), Arc::new(MemoryStore::new()))
        .oneshot(req)
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[test]
fn submission_serializes_with_content_store_field_names() {
    let form = ContactForm {
        name: "Ada".into(),
        email: "ada@example.com".into(),
        message: "hello".into(),
        token: "t".into(),
    };
    let sub = Submission::new("contactFromSubmission", form, datetime!(2025-03-01 12:30:00 UTC));
    let v = serde_json::to_value(&sub).unwrap();

    assert_eq!(
        v,
        json!({
            "_type": "contactFromSubmission",
            "name": "Ada",
            "email": "ada@example.com",
            "message": "hello",
            "submittedAt": "2025-03-01T12:30:00Z"
        })
    );
}

#[test]
fn mutate_url_targets_project_dataset_and_version() {
    let settings = StoreSettings {
        project_id: "tes1c0mg".into(),
        ..StoreSettings::default()
    };
    assert_eq!(
        mutate_url(&settings),
        "https://tes1c0mg.api.sanity.io/v2024-01-01/data/mutate/production?returnIds=true"
    );
}

#[test]
fn sanity_store_requires_project_and_token() {
    let client = reqwest::Client::new();
    let mut settings = StoreSettings::default();
    assert!(matches!(
        SanityStore::new(client.clone(), &settings),
        Err(StoreError::MissingProject)
    ));

    settings.project_id = "abc".into();
    assert!(matches!(
        SanityStore::new(client.clone(), &settings),
        Err(StoreError::MissingToken)
    ));

    settings.token = Some("sk-write".into());
    assert!(SanityStore::new(client, &settings).is_ok());
}

#[test]
fn recaptcha_verifier_requires_a_secret() {
    let client = reqwest::Client::new();
    assert!(matches!(
        RecaptchaVerifier::new(client.clone(), None, "https://example.invalid"),
        Err(VerifyError::MissingSecret)
    ));
    assert!(RecaptchaVerifier::new(client, Some("s".into()), "https://example.invalid").is_ok());
}
