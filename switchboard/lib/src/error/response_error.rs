use std::fmt;

use bytes::Bytes;
use thiserror::Error;

use crate::wire::WireCode;

/// Why a success body failed to decode against the output format.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid JSON body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("body is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// An error status with no declared variant for it.
///
/// Carries the raw status and body so callers can diagnose responses the
/// operation never declared.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct UnrecognizedApiError {
    pub status: u16,
    /// The wire code the status maps to, if the status is in the table.
    pub wire_code: Option<WireCode>,
    pub body: Bytes,
}

impl UnrecognizedApiError {
    /// Returns the body as text, replacing invalid UTF-8.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

impl fmt::Display for UnrecognizedApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.wire_code {
            Some(code) => write!(
                f,
                "unrecognized API error (status {}, {code}): {}",
                self.status,
                self.body_text()
            ),
            None => write!(
                f,
                "unrecognized API error (status {}): {}",
                self.status,
                self.body_text()
            ),
        }
    }
}

/// A success status whose body does not match the output format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed response (status {status}): {reason}")]
pub struct MalformedResponse {
    pub status: u16,
    pub reason: String,
    pub body: Bytes,
}
