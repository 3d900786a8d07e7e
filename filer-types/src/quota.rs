// SPDX-License-Identifier: GPL-3.0-only

//! Quota report models

use serde::{Deserialize, Serialize};

use crate::codes::{QuotaIdType, QuotaType, UnlimitedFlag};
use crate::common::percent_of;

/// Identity of a quota row: the owning volume and the row within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuotaKey {
    pub volume: u32,
    pub row: u32,
}

/// One decoded quota table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotaEntity {
    pub key: QuotaKey,
    pub quota_type: Option<QuotaType>,

    // === Target identity ===
    pub id: Option<i64>,
    pub id_type: Option<QuotaIdType>,
    pub sid: Option<String>,
    pub path: Option<String>,
    pub volume_name: Option<String>,
    pub tree_name: Option<String>,
    pub vfiler: Option<String>,

    // === Usage and limits ===
    pub bytes_used: Option<u64>,
    pub bytes_limit: Option<u64>,
    pub bytes_threshold: Option<u64>,
    pub files_used: Option<u64>,
    pub files_limit: Option<u64>,
    pub files_threshold: Option<u64>,
    pub bytes_unlimited: Option<UnlimitedFlag>,
    pub files_unlimited: Option<UnlimitedFlag>,

    // === Derived ===
    pub byte_percent: Option<f64>,
    pub file_percent: Option<f64>,
}

impl QuotaEntity {
    pub fn new(key: QuotaKey) -> Self {
        Self {
            key,
            quota_type: None,
            id: None,
            id_type: None,
            sid: None,
            path: None,
            volume_name: None,
            tree_name: None,
            vfiler: None,
            bytes_used: None,
            bytes_limit: None,
            bytes_threshold: None,
            files_used: None,
            files_limit: None,
            files_threshold: None,
            bytes_unlimited: None,
            files_unlimited: None,
            byte_percent: None,
            file_percent: None,
        }
    }

    /// Usage as a share of the hard limit. Unlimited resources never get a
    /// percentage.
    pub fn derive_fields(&mut self) {
        self.byte_percent = if self.is_bytes_unlimited() {
            None
        } else {
            percent_of(self.bytes_used, self.bytes_limit)
        };

        self.file_percent = if self.is_files_unlimited() {
            None
        } else {
            percent_of(self.files_used, self.files_limit)
        };
    }

    pub fn is_bytes_unlimited(&self) -> bool {
        self.bytes_unlimited.is_some_and(UnlimitedFlag::is_unlimited)
    }

    pub fn is_files_unlimited(&self) -> bool {
        self.files_unlimited.is_some_and(UnlimitedFlag::is_unlimited)
    }

    /// Human identity of the quota target: the qtree path for tree quotas,
    /// otherwise the SID or numeric id depending on the id type.
    pub fn identity(&self) -> String {
        if self.quota_type.is_some_and(QuotaType::is_tree) {
            if let Some(path) = self.path.as_deref().filter(|path| !path.is_empty()) {
                return path.to_string();
            }
            if let Some(tree) = self.tree_name.as_deref().filter(|tree| !tree.is_empty()) {
                return match self.volume_name.as_deref() {
                    Some(volume) => format!("{volume}/{tree}"),
                    None => tree.to_string(),
                };
            }
            return self.fallback_identity();
        }

        match (self.id_type, self.sid.as_deref(), self.id) {
            (Some(QuotaIdType::Sid), Some(sid), _) if !sid.is_empty() => sid.to_string(),
            (_, _, Some(id)) => id.to_string(),
            _ => self.fallback_identity(),
        }
    }

    /// Name of the container the row belongs to, for messages.
    pub fn container(&self) -> String {
        self.volume_name
            .clone()
            .unwrap_or_else(|| format!("volume {}", self.key.volume))
    }

    fn fallback_identity(&self) -> String {
        format!("quota {}.{}", self.key.volume, self.key.row)
    }
}
