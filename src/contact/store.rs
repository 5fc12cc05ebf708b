use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::config::StoreSettings;

use super::model::Submission;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no content store write token configured")]
    MissingToken,
    #[error("no content store project configured")]
    MissingProject,
    #[error("content store request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("content store rejected the mutation ({status}): {body}")]
    Rejected { status: u16, body: String },
    #[error("content store response carried no document id")]
    MissingId,
}

/// Where contact submissions end up.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Persist `submission` and return the id the store assigned to it.
    async fn create(&self, submission: &Submission) -> Result<String, StoreError>;
}

/// Writes submissions to the headless CMS through its mutate API.
pub struct SanityStore {
    client: reqwest::Client,
    mutate_url: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct MutateResponse {
    #[serde(default)]
    results: Vec<MutateResult>,
}

#[derive(Debug, Deserialize)]
struct MutateResult {
    id: String,
}

/// `https://<project>.api.sanity.io/v<version>/data/mutate/<dataset>?returnIds=true`
pub fn mutate_url(settings: &StoreSettings) -> String {
    format!(
        "https://{}.api.sanity.io/v{}/data/mutate/{}?returnIds=true",
        settings.project_id,
        settings.api_version.trim_start_matches('v'),
        settings.dataset
    )
}

impl SanityStore {
    pub fn new(client: reqwest::Client, settings: &StoreSettings) -> Result<Self, StoreError> {
        if settings.project_id.trim().is_empty() {
            return Err(StoreError::MissingProject);
        }
        let token = settings
            .token
            .clone()
            .filter(|t| !t.is_empty())
            .ok_or(StoreError::MissingToken)?;
        Ok(Self {
            client,
            mutate_url: mutate_url(settings),
            token,
        })
    }
}

#[async_trait]
impl SubmissionStore for SanityStore {
    async fn create(&self, submission: &Submission) -> Result<String, StoreError> {
        let res = self
            .client
            .post(&self.mutate_url)
            .bearer_auth(&self.token)
            .json(&json!({ "mutations": [{ "create": submission }] }))
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let body: MutateResponse = res.json().await?;
        body.results
            .into_iter()
            .next()
            .map(|r| r.id)
            .ok_or(StoreError::MissingId)
    }
}

/// In-process store for tests and local development.
#[derive(Default)]
pub struct MemoryStore {
    submissions: Mutex<Vec<(String, Submission)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything stored so far, oldest first.
    #[cfg(test)]
    pub fn submissions(&self) -> Vec<(String, Submission)> {
        self.submissions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn create(&self, submission: &Submission) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        self.submissions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id.clone(), submission.clone()));
        Ok(id)
    }
}
