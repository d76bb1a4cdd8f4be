//! The generic response envelope returned by every bot API method.
//!
//! Decoding happens in two stages: the body is first parsed into [`ApiResponse`]
//! with the `result` left untyped, then [`ApiResponse::into_result`] decodes that
//! slot into the concrete type the caller expects. Each stage has its own error
//! variant so callers can tell a garbled response from an unexpected payload.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Bytes of a malformed body kept on [`Error::DecodeEnvelope`].
const BODY_PREVIEW_LEN: usize = 256;

/// Outer wrapper of every API response.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ApiResponse {
    pub ok: bool,
    /// Present only when `ok` is true
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    /// Human-readable error text, present when `ok` is false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<ResponseParameters>,
}

/// Extra hints attached to some failed responses.
///
/// These are surfaced on [`Error::Api`] for the caller to act on; nothing in this
/// crate retries or follows a migration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResponseParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migrate_to_chat_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
}

impl ApiResponse {
    /// Parse a raw response body as a single envelope.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(|source| Error::DecodeEnvelope {
            source,
            body: preview(body),
        })
    }

    /// Unwrap the envelope into a typed result, or the remote error it carries.
    pub fn into_result<T: DeserializeOwned>(self) -> Result<T> {
        if !self.ok {
            return Err(Error::Api {
                description: self.description.unwrap_or_default(),
                error_code: self.error_code,
                parameters: self.parameters,
            });
        }

        // A missing result decodes as null, which fails for any struct payload
        let result = self.result.unwrap_or(serde_json::Value::Null);
        serde_json::from_value(result).map_err(Error::DecodeResult)
    }
}

fn preview(body: &[u8]) -> String {
    let end = body.len().min(BODY_PREVIEW_LEN);
    String::from_utf8_lossy(&body[..end]).into_owned()
}
