use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("no reCAPTCHA secret configured")]
    MissingSecret,
    #[error("verification request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Checks a CAPTCHA proof produced by the visitor's browser.
#[async_trait]
pub trait CaptchaVerifier: Send + Sync {
    /// `Ok(false)` means the service answered and rejected the token.
    async fn verify(&self, token: &str) -> Result<bool, VerifyError>;
}

/// Google reCAPTCHA `siteverify`.
pub struct RecaptchaVerifier {
    client: reqwest::Client,
    secret: String,
    verify_url: String,
}

#[derive(Debug, Deserialize)]
struct SiteVerifyResponse {
    success: bool,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

impl RecaptchaVerifier {
    pub fn new(
        client: reqwest::Client,
        secret: Option<String>,
        verify_url: impl Into<String>,
    ) -> Result<Self, VerifyError> {
        let secret = secret
            .filter(|s| !s.is_empty())
            .ok_or(VerifyError::MissingSecret)?;
        Ok(Self {
            client,
            secret,
            verify_url: verify_url.into(),
        })
    }
}

#[async_trait]
impl CaptchaVerifier for RecaptchaVerifier {
    async fn verify(&self, token: &str) -> Result<bool, VerifyError> {
        let res: SiteVerifyResponse = self
            .client
            .post(&self.verify_url)
            .form(&[("secret", self.secret.as_str()), ("response", token)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !res.success {
            warn!(codes = ?res.error_codes, "failed reCAPTCHA");
        }
        Ok(res.success)
    }
}
