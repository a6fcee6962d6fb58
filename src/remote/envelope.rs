//! The uniform success/failure envelope every endpoint answers with, and
//! the normalization that maps any HTTP response onto it.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

pub const UNEXPECTED_RESPONSE: &str = "unexpected response from server";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceResult<T> {
    #[serde(default)]
    pub is_success: bool,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,

    #[serde(default, deserialize_with = "flexible_errors")]
    pub errors: Vec<String>,

    // A path default keeps serde from demanding `T: Default`.
    #[serde(default = "no_data")]
    pub data: Option<T>,

    #[serde(default)]
    pub status_code: u16,
}

fn no_data<T>() -> Option<T> {
    None
}

impl<T> ResourceResult<T> {
    pub fn success(status_code: u16, data: Option<T>) -> Self {
        Self {
            is_success: true,
            message: String::new(),
            errors: Vec::new(),
            data,
            status_code,
        }
    }

    pub fn failure(status_code: u16, message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            is_success: false,
            message: message.into(),
            errors,
            data: None,
            status_code,
        }
    }

    /// The payload, only when the call succeeded.
    pub fn payload(&self) -> Option<&T> {
        if self.is_success {
            self.data.as_ref()
        } else {
            None
        }
    }

    pub fn into_payload(self) -> Option<T> {
        if self.is_success { self.data } else { None }
    }

    /// Re-types a failure so it can be handed back through a different call.
    pub fn cast_failure<U>(self) -> ResourceResult<U> {
        ResourceResult {
            is_success: false,
            message: self.message,
            errors: self.errors,
            data: None,
            status_code: self.status_code,
        }
    }

    /// Server message followed by the field-level errors, one per line.
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();
        if !self.message.trim().is_empty() {
            lines.push(self.message.trim().to_string());
        }
        for e in &self.errors {
            lines.push(format!("- {}", e));
        }
        lines.join("\n")
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FailureBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default, deserialize_with = "flexible_errors")]
    errors: Vec<String>,
}

impl FailureBody {
    fn headline(&self) -> Option<String> {
        [&self.message, &self.error, &self.title]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .map(str::to_string)
    }
}

/// Maps a status code and raw body onto a [`ResourceResult`].
///
/// 2xx bodies are parsed as the envelope. Anything else is a failure,
/// carrying the server's message and errors when the body is structured.
pub fn normalize<T: DeserializeOwned>(status: u16, body: &[u8]) -> ResourceResult<T> {
    if (200..300).contains(&status) {
        if body.iter().all(u8::is_ascii_whitespace) {
            return ResourceResult::success(status, None);
        }
        return match serde_json::from_slice::<ResourceResult<T>>(body) {
            Ok(mut out) => {
                if out.status_code == 0 {
                    out.status_code = status;
                }
                if !out.is_success {
                    out.data = None;
                }
                out
            }
            Err(err) => {
                warn!(status, error = %err, "response body does not match the envelope");
                ResourceResult::failure(status, UNEXPECTED_RESPONSE, Vec::new())
            }
        };
    }

    let parsed: Option<FailureBody> = serde_json::from_slice(body).ok();
    match parsed {
        Some(b) => match b.headline() {
            Some(msg) => ResourceResult::failure(status, msg, b.errors),
            None if !b.errors.is_empty() => {
                ResourceResult::failure(status, generic_failure(status), b.errors)
            }
            None => ResourceResult::failure(status, generic_failure(status), Vec::new()),
        },
        None => ResourceResult::failure(status, generic_failure(status), Vec::new()),
    }
}

fn generic_failure(status: u16) -> String {
    format!("request failed ({})", status)
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// Errors arrive either as a list of strings or as a field -> messages map
// (validation problem details).
fn flexible_errors<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = serde_json::Value::deserialize(deserializer)?;
    Ok(flatten_errors(&v))
}

fn flatten_errors(v: &serde_json::Value) -> Vec<String> {
    use serde_json::Value;

    match v {
        Value::Null => Vec::new(),
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items.iter().flat_map(flatten_errors).collect(),
        Value::Object(fields) => fields
            .iter()
            .flat_map(|(field, msgs)| {
                flatten_errors(msgs)
                    .into_iter()
                    .map(move |m| format!("{}: {}", field, m))
            })
            .collect(),
        other => vec![other.to_string()],
    }
}

#[cfg(test)]
#[path = "../tests/remote/envelope_tests.rs"]
mod tests;
