// SPDX-License-Identifier: GPL-3.0-only

use std::collections::BTreeMap;

use filer_contracts::{Value, WalkResult};
use filer_types::{QuotaEntity, QuotaIdType, QuotaKey, QuotaType, UnlimitedFlag};
use tracing::debug;

use super::{combine_high_low, split_cell, text};
use crate::oids;

/// Kilobyte counters split into high/low halves, keyed by resource.
#[derive(Debug, Default)]
struct SplitKilobytes {
    used: (Option<i64>, Option<i64>),
    limit: (Option<i64>, Option<i64>),
    threshold: (Option<i64>, Option<i64>),
}

fn bytes_from(pair: (Option<i64>, Option<i64>)) -> Option<u64> {
    combine_high_low(pair.0, pair.1).map(|kb| kb.saturating_mul(1024))
}

/// Decode a quota report walk into entities keyed by (volume, row).
pub fn decode_quotas(walk: &WalkResult) -> BTreeMap<QuotaKey, QuotaEntity> {
    let prefix = oids::quota_table();
    let mut entities: BTreeMap<QuotaKey, QuotaEntity> = BTreeMap::new();
    let mut split: BTreeMap<QuotaKey, SplitKilobytes> = BTreeMap::new();

    for (rest, value) in walk.rows_under(&prefix) {
        let Some((column, &[volume, row])) = split_cell(rest) else {
            debug!("Skipping quota cell with unexpected index {:?}", rest);
            continue;
        };
        let key = QuotaKey { volume, row };
        let entity = entities
            .entry(key)
            .or_insert_with(|| QuotaEntity::new(key));
        let kilobytes = split.entry(key).or_default();

        match column {
            2 => entity.quota_type = value.as_i64().map(QuotaType::from_code),
            3 => entity.id = value.as_i64(),
            4 => kilobytes.used.0 = value.as_i64(),
            5 => kilobytes.used.1 = value.as_i64(),
            6 => kilobytes.limit.0 = value.as_i64(),
            7 => kilobytes.limit.1 = value.as_i64(),
            8 => entity.files_used = value.as_u64(),
            9 => entity.files_limit = value.as_u64(),
            10 => entity.path = text(value),
            11 => kilobytes.threshold.0 = value.as_i64(),
            12 => kilobytes.threshold.1 = value.as_i64(),
            13 => entity.files_threshold = value.as_u64(),
            14 => entity.vfiler = text(value),
            15 => entity.volume_name = text(value),
            16 => entity.tree_name = text(value),
            17 => entity.id_type = value.as_i64().map(QuotaIdType::from_code),
            18 => entity.sid = text(value),
            22 => entity.bytes_unlimited = unlimited_flag(value),
            23 => entity.files_unlimited = unlimited_flag(value),
            _ => {}
        }
    }

    for (key, entity) in entities.iter_mut() {
        if let Some(kilobytes) = split.remove(key) {
            entity.bytes_used = bytes_from(kilobytes.used);
            entity.bytes_limit = bytes_from(kilobytes.limit);
            entity.bytes_threshold = bytes_from(kilobytes.threshold);
        }
        entity.derive_fields();
    }

    debug!("Decoded {} quota rows", entities.len());
    entities
}

fn unlimited_flag(value: &Value) -> Option<UnlimitedFlag> {
    value.as_i64().map(UnlimitedFlag::from_code)
}
