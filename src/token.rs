// Session token and the holder the request executor consults on every call.
// There is no expiry check and no refresh: an expired token surfaces as an
// ordinary 401 from whichever request used it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Token object returned by the identity endpoint.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtToken {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "is_unset_number")]
    pub expires_in: Option<u64>,
    #[serde(default, skip_serializing_if = "is_unset_text")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub token_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub scope: String,
}

impl JwtToken {
    /// Token with only the access part set, e.g. one loaded from storage.
    pub fn new(access_token: impl Into<String>) -> Self {
        JwtToken {
            access_token: access_token.into(),
            expires_in: None,
            refresh_token: None,
            token_type: String::new(),
            scope: String::new(),
        }
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

// Zero and empty count as absent when writing, the way the server does.
fn is_unset_number(value: &Option<u64>) -> bool {
    matches!(value, None | Some(0))
}

fn is_unset_text(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

// Keeps secrets out of logs and panic messages.
impl fmt::Debug for JwtToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtToken")
            .field("access_token", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "<redacted>"),
            )
            .field("token_type", &self.token_type)
            .field("scope", &self.scope)
            .finish()
    }
}

/// Holds at most one active token.
#[derive(Debug, Default, Clone)]
pub struct TokenHolder {
    current: Option<JwtToken>,
}

impl TokenHolder {
    /// Replaces whatever was stored before.
    pub fn set(&mut self, token: JwtToken) {
        self.current = Some(token);
    }

    pub fn get(&self) -> Option<&JwtToken> {
        self.current.as_ref()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn is_present(&self) -> bool {
        self.current.is_some()
    }
}
