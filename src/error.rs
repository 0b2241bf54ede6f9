// Error types for the Toniebox client.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by any client call. None of them are retried internally.
#[derive(Error, Debug)]
pub enum TonieError {
    /// Proxy address could not be parsed; raised before any network activity.
    #[error("invalid proxy URL {url:?}: {reason}")]
    InvalidProxy { url: String, reason: String },

    /// Local upload source could not be opened or inspected.
    #[error("failed to open {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Timeout, refused connection, DNS failure and the like.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Identity endpoint rejected the credentials.
    #[error("login failed with status {status}: {body}")]
    Login { status: u16, body: String },

    /// Any other unexpected HTTP status.
    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body did not have the expected shape.
    #[error("failed to decode response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// Creative-Tonie is not attached to this client.
    #[error("tonie not properly initialized")]
    NotInitialized,
}

impl TonieError {
    /// HTTP status for errors caused by an unexpected response code.
    pub fn status(&self) -> Option<u16> {
        match self {
            TonieError::Login { status, .. } | TonieError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for 401/403, which usually means the token expired and the
    /// caller should log in again.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

pub type Result<T> = std::result::Result<T, TonieError>;
