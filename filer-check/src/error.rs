// SPDX-License-Identifier: GPL-3.0-only

use filer_contracts::TransportError;
use filer_types::Severity;
use thiserror::Error;

/// Errors that end a check invocation. Every variant is reported as UNKNOWN.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("{0}")]
    Communication(#[from] TransportError),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invalid threshold '{spec}': {reason}")]
    ThresholdSyntax { spec: String, reason: String },
}

impl CheckError {
    pub fn severity(&self) -> Severity {
        Severity::Unknown
    }
}

pub type Result<T> = std::result::Result<T, CheckError>;
