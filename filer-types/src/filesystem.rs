// SPDX-License-Identifier: GPL-3.0-only

//! Volume and aggregate models
//!
//! Both kinds come out of the same df table; `is_aggregate` tells them apart.

use serde::{Deserialize, Serialize};

use crate::codes::{MirrorStatus, VolumeStatus, VolumeType};
use crate::common::{checked_total, percent_of};

/// Name suffix of the hidden per-volume snapshot reserve row.
pub const SNAPSHOT_SUFFIX: &str = "/.snapshot";

/// One decoded df table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FilesystemEntity {
    /// Row index reported by the device
    pub index: u32,

    /// Volume path (e.g., "/vol/vol0/") or aggregate name (e.g., "aggr0")
    pub name: String,

    pub mounted_on: Option<String>,

    // === Raw counters ===
    pub used_bytes: Option<u64>,
    pub free_bytes: Option<u64>,
    pub used_inodes: Option<u64>,
    pub free_inodes: Option<u64>,

    // === Derived ===
    /// used + free, unset if either is missing
    pub total_bytes: Option<u64>,
    pub total_inodes: Option<u64>,
    /// used / total * 100, unset when it cannot be computed
    pub byte_percent: Option<f64>,
    pub inode_percent: Option<f64>,

    // === State codes ===
    pub status: Option<VolumeStatus>,
    pub mirror_status: Option<MirrorStatus>,
    pub volume_type: Option<VolumeType>,

    pub is_aggregate: bool,
    pub is_snapshot: bool,
}

impl FilesystemEntity {
    pub fn new(index: u32) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    /// Second decode pass: totals, percentages and classification flags.
    pub fn derive_fields(&mut self) {
        self.total_bytes = checked_total(self.used_bytes, self.free_bytes);
        self.total_inodes = checked_total(self.used_inodes, self.free_inodes);
        self.byte_percent = percent_of(self.used_bytes, self.total_bytes);
        self.inode_percent = percent_of(self.used_inodes, self.total_inodes);
        self.is_aggregate = self.volume_type.is_some_and(VolumeType::is_aggregate);
        self.is_snapshot = self.name.ends_with(SNAPSHOT_SUFFIX);
    }

    /// Traditional or flexible volume; untyped rows are neither volume nor
    /// aggregate.
    pub fn is_volume(&self) -> bool {
        matches!(
            self.volume_type,
            Some(VolumeType::Traditional | VolumeType::Flexible)
        )
    }

    /// Bare volume name as other tables report it: `/vol/vol0/` -> `vol0`.
    pub fn volume_name(&self) -> &str {
        let name = self.name.strip_prefix("/vol/").unwrap_or(&self.name);
        name.trim_end_matches('/')
    }
}
