use std::path::PathBuf;

use thiserror::Error;

use crate::envelope::ResponseParameters;

/// Result type for bot API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while sending a file to the bot API.
///
/// Each variant identifies the stage that failed. No variant is retried; the
/// first failure encountered is returned to the caller.
#[derive(Debug, Error)]
pub enum Error {
    /// The local file could not be opened
    #[error("failed to open audio file {}: {source}", path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The path exists but is not a regular file (e.g. a directory)
    #[error("audio path {} is not a regular file", path.display())]
    NotAFile { path: PathBuf },

    /// Reading the file contents into the form failed
    #[error("failed to read audio file {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The multipart file part could not be constructed
    #[error("failed to create form file: {0}")]
    BuildPart(#[source] reqwest::Error),

    /// The underlying HTTP client could not be initialized
    #[error("failed to build http client: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// The endpoint URL could not be built from the base URL and token
    #[error("failed to build request url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Connection, DNS, TLS or body read failure
    #[error("failed to send request: {0}")]
    Transport(#[source] reqwest::Error),

    /// The response body was not a valid API envelope
    #[error("failed to decode response: {source}")]
    DecodeEnvelope {
        #[source]
        source: serde_json::Error,
        /// Leading bytes of the offending body, for diagnostics
        body: String,
    },

    /// The API answered with `ok: false`; displays the remote description verbatim
    #[error("{description}")]
    Api {
        description: String,
        error_code: Option<i64>,
        parameters: Option<ResponseParameters>,
    },

    /// The envelope reported success but its result did not match the expected type
    #[error("failed to decode result: {0}")]
    DecodeResult(#[source] serde_json::Error),
}

/// Coarse classification of [`Error`] by failing stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Opening or reading the local file
    LocalIo,
    /// Building the multipart body or the request URL
    RequestBuild,
    /// Network-level failure
    Transport,
    /// Envelope or payload JSON did not match
    ResponseDecode,
    /// The remote service rejected the call
    Remote,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::OpenFile { .. } | Error::NotAFile { .. } | Error::ReadFile { .. } => {
                ErrorKind::LocalIo
            }
            Error::BuildPart(_) | Error::HttpClient(_) | Error::InvalidUrl(_) => {
                ErrorKind::RequestBuild
            }
            Error::Transport(_) => ErrorKind::Transport,
            Error::DecodeEnvelope { .. } | Error::DecodeResult(_) => ErrorKind::ResponseDecode,
            Error::Api { .. } => ErrorKind::Remote,
        }
    }

    /// Remote error code, if the API reported one.
    pub fn error_code(&self) -> Option<i64> {
        match self {
            Error::Api { error_code, .. } => *error_code,
            _ => None,
        }
    }
}
