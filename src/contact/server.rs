use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::config::ContactSettings;

use super::captcha::{CaptchaVerifier, RecaptchaVerifier};
use super::error::ContactError;
use super::model::{ContactRequest, ContactResponse, Submission};
use super::store::{MemoryStore, SanityStore, SubmissionStore};

/// Shared state passed to the submission handler.
#[derive(Clone)]
pub struct ContactState {
    verifier: Arc<dyn CaptchaVerifier>,
    store: Arc<dyn SubmissionStore>,
    document_type: Arc<str>,
}

impl ContactState {
    pub fn new(
        verifier: Arc<dyn CaptchaVerifier>,
        store: Arc<dyn SubmissionStore>,
        document_type: &str,
    ) -> Self {
        Self {
            verifier,
            store,
            document_type: Arc::from(document_type),
        }
    }

    /// Production wiring: reCAPTCHA plus the content store, or an in-memory
    /// store when `memory` is set.
    pub fn from_settings(
        settings: &ContactSettings,
        memory: bool,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let client = reqwest::Client::new();
        let verifier = RecaptchaVerifier::new(
            client.clone(),
            settings.recaptcha_secret.clone(),
            settings.recaptcha_verify_url.clone(),
        )?;
        let store: Arc<dyn SubmissionStore> = if memory {
            Arc::new(MemoryStore::new())
        } else {
            Arc::new(SanityStore::new(client, &settings.store)?)
        };
        Ok(Self::new(
            Arc::new(verifier),
            store,
            &settings.store.document_type,
        ))
    }
}

/// Build the router serving the contact endpoint at `route`.
pub fn router(route: &str, state: ContactState) -> Router {
    Router::new()
        .route(route, post(submit))
        .with_state(state)
}

async fn submit(
    State(state): State<ContactState>,
    body: Bytes,
) -> Result<Json<ContactResponse>, ContactError> {
    let form = ContactRequest::from_slice(&body).validate()?;

    if !state.verifier.verify(&form.token).await? {
        warn!("rejecting contact submission with failed CAPTCHA");
        return Err(ContactError::CaptchaFailed);
    }

    let submission = Submission::new(&state.document_type, form, OffsetDateTime::now_utc());
    let id = state.store.create(&submission).await?;
    info!(%id, "contact submission saved");

    Ok(Json(ContactResponse {
        message: "Submission saved",
        id,
    }))
}

/// Serve the contact endpoint until Ctrl-C.
pub async fn serve(settings: &ContactSettings, state: ContactState) -> std::io::Result<()> {
    let app = router(&settings.route, state);
    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    info!(addr = %listener.local_addr()?, route = %settings.route, "contact endpoint listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down contact endpoint");
        })
        .await
}
