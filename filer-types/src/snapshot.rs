// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SnapshotKey {
    pub volume: u32,
    pub snapshot: u32,
}

/// One row of the per-volume snapshot table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub key: SnapshotKey,
    pub name: Option<String>,
    pub volume_name: Option<String>,
}

impl SnapshotEntry {
    pub fn new(key: SnapshotKey) -> Self {
        Self {
            key,
            name: None,
            volume_name: None,
        }
    }

    /// Volume the snapshot belongs to, falling back to its index.
    pub fn volume_label(&self) -> String {
        match self.volume_name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("volume {}", self.key.volume),
        }
    }
}
