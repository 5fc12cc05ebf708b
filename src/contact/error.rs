use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use super::captcha::VerifyError;
use super::store::StoreError;

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("Missing fields")]
    MissingFields,
    #[error("Failed CAPTCHA")]
    CaptchaFailed,
    #[error("captcha verification failed: {0}")]
    Verification(#[from] VerifyError),
    #[error("failed to store submission: {0}")]
    Storage(#[from] StoreError),
}

impl ContactError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingFields | Self::CaptchaFailed => StatusCode::BAD_REQUEST,
            Self::Verification(_) | Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text shown to the visitor. Server-side causes are never echoed.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::MissingFields => "Missing fields",
            Self::CaptchaFailed => "Failed CAPTCHA",
            Self::Verification(_) | Self::Storage(_) => "Server error",
        }
    }
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "contact submission failed");
        }
        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}
