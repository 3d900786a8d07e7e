// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportErrorKind {
    /// Device did not answer or refused the request
    Unreachable,
    Timeout,
    /// Response could not be parsed
    Malformed,
    /// Requested object is absent on the device
    NoSuchObject,
    /// Local query tooling is not installed
    ToolMissing,
}

impl TransportErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unreachable => "device unreachable",
            Self::Timeout => "request timed out",
            Self::Malformed => "malformed response",
            Self::NoSuchObject => "no such object",
            Self::ToolMissing => "query tool missing",
        }
    }
}

/// Communication failure for one request. Always terminal for the check.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{} for {request}: {message}", .kind.as_str())]
pub struct TransportError {
    pub kind: TransportErrorKind,
    /// The request that failed (object identifier or command)
    pub request: String,
    pub message: String,
}

impl TransportError {
    pub fn new(
        kind: TransportErrorKind,
        request: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            request: request.into(),
            message: message.into(),
        }
    }
}
