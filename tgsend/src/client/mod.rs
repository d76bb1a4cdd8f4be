//! Bot API client.
//!
//! [`BotClient`] owns the bot token, the API base URL and a reqwest client. Every call is
//! a single request with a single response: no retries, no rate limiting and no
//! deduplication of identical calls.

mod request;


use std::fmt;
use std::path::Path;

use reqwest::multipart::Form;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::{Config, DEFAULT_API_URL};
use crate::envelope::ApiResponse;
use crate::error::{Error, Result};
use crate::types::Message;

pub use request::SendAudio;

/// Client for the bot HTTP API.
///
/// Cloning is cheap and clones share the underlying connection pool.
#[derive(Clone)]
pub struct BotClient {
    token: String,
    api_url: Url,
    http: reqwest::Client,
}

impl BotClient {
    /// Create a client for the public API endpoint with no request timeout.
    pub fn new(token: impl Into<String>) -> Self {
        let api_url = Url::parse(DEFAULT_API_URL).expect("default API URL is valid");
        Self::with_api_url(token, api_url)
    }

    /// Create a client against a custom API server (e.g. a self-hosted bot API).
    pub fn with_api_url(token: impl Into<String>, api_url: Url) -> Self {
        Self {
            token: token.into(),
            api_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(Error::HttpClient)?;

        Ok(Self {
            token: config.bot_token.clone(),
            api_url: config.api_url.clone(),
            http,
        })
    }

    /// Build `{api_url}/bot{token}/{method}`.
    pub fn method_url(&self, method: &str) -> Result<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .push(&format!("bot{}", self.token))
            .push(method);
        Ok(url)
    }

    /// Upload a local audio file to `chat_id` with forwarding disabled.
    pub async fn send_protected_audio(&self, chat_id: i64, path: impl AsRef<Path>) -> Result<Message> {
        self.send_audio(&SendAudio::new(chat_id, path.as_ref())).await
    }

    #[tracing::instrument(skip(self, request), fields(chat_id = request.chat_id, path = %request.path.display()))]
    pub async fn send_audio(&self, request: &SendAudio) -> Result<Message> {
        let form = request.to_form().await?;
        let message: Message = self.send_multipart("sendAudio", form).await?;

        tracing::info!(
            message_id = message.message_id,
            protected = message.has_protected_content,
            "Audio sent"
        );

        Ok(message)
    }

    /// POST a multipart form to `method` and unwrap the response envelope.
    ///
    /// The body is decoded regardless of HTTP status, since failed calls still carry an
    /// envelope describing the failure.
    pub async fn send_multipart<T: DeserializeOwned>(&self, method: &str, form: Form) -> Result<T> {
        let url = self.method_url(method)?;

        tracing::debug!(method = method, boundary = form.boundary(), "Executing multipart request");

        // without_url() keeps the token out of error messages
        let response = self.http.post(url).multipart(form).send().await.map_err(|e| {
            let e = e.without_url();
            tracing::error!(method = method, error = %e, "HTTP request failed");
            Error::Transport(e)
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| {
            let e = e.without_url();
            tracing::error!(method = method, status = status, error = %e, "Failed to read response body");
            Error::Transport(e)
        })?;

        tracing::debug!(
            method = method,
            status = status,
            response_len = body.len(),
            "HTTP request completed"
        );

        let envelope = ApiResponse::from_slice(&body).inspect_err(|e| {
            tracing::warn!(method = method, status = status, error = %e, "Response is not a valid envelope");
        })?;

        envelope.into_result().inspect_err(|e| match e {
            Error::Api {
                description,
                error_code,
                ..
            } => {
                tracing::warn!(
                    method = method,
                    error_code = ?error_code,
                    description = %description,
                    "API reported failure"
                );
            }
            other => {
                tracing::warn!(method = method, error = %other, "Unexpected result shape");
            }
        })
    }
}

impl fmt::Debug for BotClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotClient")
            .field("token", &"<redacted>")
            .field("api_url", &self.api_url.as_str())
            .finish()
    }
}
