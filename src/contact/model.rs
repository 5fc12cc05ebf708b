use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use super::error::ContactError;

/// Raw request body. Every field is optional on the wire.
#[derive(Debug, Default)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    pub token: Option<String>,
}

/// A request with all four fields present and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    pub token: String,
}

impl ContactRequest {
    /// Parse a JSON body. Anything that isn't a JSON object yields an empty
    /// request, which then fails validation.
    ///
    /// A field counts as given when it is truthy: a non-empty string, or any
    /// value other than `null`, `false` and `0`. Non-string values keep their
    /// JSON text, so `"message": 42` is stored as `42`.
    pub fn from_slice(body: &[u8]) -> Self {
        let Ok(Value::Object(mut fields)) = serde_json::from_slice::<Value>(body) else {
            return Self::default();
        };
        let mut take = |key: &str| fields.remove(key).and_then(truthy_text);
        Self {
            name: take("name"),
            email: take("email"),
            message: take("message"),
            token: take("token"),
        }
    }

    pub fn validate(self) -> Result<ContactForm, ContactError> {
        fn present(v: Option<String>) -> Result<String, ContactError> {
            v.filter(|s| !s.is_empty()).ok_or(ContactError::MissingFields)
        }

        Ok(ContactForm {
            name: present(self.name)?,
            email: present(self.email)?,
            message: present(self.message)?,
            token: present(self.token)?,
        })
    }
}

fn truthy_text(value: Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) => Some(s),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

/// The document written to the content store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    #[serde(rename = "_type")]
    pub document_type: String,
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(rename = "submittedAt")]
    pub submitted_at: String,
}

impl Submission {
    pub fn new(document_type: &str, form: ContactForm, at: OffsetDateTime) -> Self {
        let submitted_at = at
            .format(&Rfc3339)
            .unwrap_or_else(|_| at.unix_timestamp().to_string());
        Self {
            document_type: document_type.to_string(),
            name: form.name,
            email: form.email,
            message: form.message,
            submitted_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub message: &'static str,
    pub id: String,
}
