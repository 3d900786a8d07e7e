// SPDX-License-Identifier: GPL-3.0-only

use std::path::PathBuf;

use thiserror::Error;

/// Error types for system-level operations
#[derive(Error, Debug)]
pub enum SysError {
    #[error("failed to read host map {path:?}: {reason}")]
    HostMapRead { path: PathBuf, reason: String },

    #[error("failed to parse host map {path:?}: {reason}")]
    HostMapParse { path: PathBuf, reason: String },
}

/// Result type alias for system operations
pub type Result<T> = std::result::Result<T, SysError>;
