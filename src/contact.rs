//! Contact form endpoint.
//!
//! `POST /api/contact` takes `{name, email, message, token}`, checks the
//! CAPTCHA token with a `CaptchaVerifier` and writes a `Submission` through
//! a `SubmissionStore`. Every outcome maps to one of four flat responses:
//!
//! | Outcome | Status | Body |
//! |---------|--------|------|
//! | saved | 200 | `{"message": "Submission saved", "id": ...}` |
//! | a field missing or empty | 400 | `{"error": "Missing fields"}` |
//! | token rejected | 400 | `{"error": "Failed CAPTCHA"}` |
//! | verifier or store failure | 500 | `{"error": "Server error"}` |

mod captcha;
mod error;
mod model;
mod server;
mod store;

pub use captcha::*;
pub use error::*;
pub use model::*;
pub use server::*;
pub use store::*;

#[cfg(test)]
mod tests;
