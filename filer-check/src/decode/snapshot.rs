// SPDX-License-Identifier: GPL-3.0-only

use std::collections::BTreeMap;

use filer_contracts::WalkResult;
use filer_types::{SnapshotEntry, SnapshotKey};

use super::{split_cell, text};
use crate::oids;

/// Decode a snapshot walk into entries keyed by (volume, snapshot).
pub fn decode_snapshots(walk: &WalkResult) -> BTreeMap<SnapshotKey, SnapshotEntry> {
    let prefix = oids::snapshot_table();
    let mut entries: BTreeMap<SnapshotKey, SnapshotEntry> = BTreeMap::new();

    for (rest, value) in walk.rows_under(&prefix) {
        let Some((column, &[volume, snapshot])) = split_cell(rest) else {
            continue;
        };
        let key = SnapshotKey { volume, snapshot };
        let entry = entries
            .entry(key)
            .or_insert_with(|| SnapshotEntry::new(key));

        match column {
            6 => entry.name = text(value),
            9 => entry.volume_name = text(value),
            _ => {}
        }
    }

    entries
}

/// Snapshot counts per volume label, in label order.
pub fn count_per_volume<'a>(
    entries: impl IntoIterator<Item = &'a SnapshotEntry>,
) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for entry in entries {
        *counts.entry(entry.volume_label()).or_insert(0) += 1;
    }
    counts
}
