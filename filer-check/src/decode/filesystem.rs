// SPDX-License-Identifier: GPL-3.0-only

use std::collections::BTreeMap;

use filer_contracts::{Value, WalkResult};
use filer_types::{FilesystemEntity, MirrorStatus, VolumeStatus, VolumeType};
use tracing::debug;

use super::{combine_high_low, kilobytes, split_cell, text};
use crate::oids;

/// Columns of the df table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DfColumn {
    Index,
    FileSys,
    KBytesTotal,
    KBytesUsed,
    KBytesAvail,
    PerCentKBytesCapacity,
    InodesUsed,
    InodesFree,
    PerCentInodeCapacity,
    MountedOn,
    MaxFilesAvail,
    MaxFilesUsed,
    MaxFilesPossible,
    HighTotalKBytes,
    LowTotalKBytes,
    HighUsedKBytes,
    LowUsedKBytes,
    HighAvailKBytes,
    LowAvailKBytes,
    Status,
    MirrorStatus,
    PlexCount,
    Type,
    Total64KBytes,
    Used64KBytes,
    Avail64KBytes,
}

impl DfColumn {
    fn from_number(column: u32) -> Option<Self> {
        Some(match column {
            1 => Self::Index,
            2 => Self::FileSys,
            3 => Self::KBytesTotal,
            4 => Self::KBytesUsed,
            5 => Self::KBytesAvail,
            6 => Self::PerCentKBytesCapacity,
            7 => Self::InodesUsed,
            8 => Self::InodesFree,
            9 => Self::PerCentInodeCapacity,
            10 => Self::MountedOn,
            11 => Self::MaxFilesAvail,
            12 => Self::MaxFilesUsed,
            13 => Self::MaxFilesPossible,
            14 => Self::HighTotalKBytes,
            15 => Self::LowTotalKBytes,
            16 => Self::HighUsedKBytes,
            17 => Self::LowUsedKBytes,
            18 => Self::HighAvailKBytes,
            19 => Self::LowAvailKBytes,
            20 => Self::Status,
            21 => Self::MirrorStatus,
            22 => Self::PlexCount,
            23 => Self::Type,
            29 => Self::Total64KBytes,
            30 => Self::Used64KBytes,
            31 => Self::Avail64KBytes,
            _ => return None,
        })
    }
}

/// Byte counters as reported, before choosing which encoding to trust.
#[derive(Debug, Default)]
struct ByteColumns {
    used_32: Option<u64>,
    avail_32: Option<u64>,
    high_used: Option<i64>,
    low_used: Option<i64>,
    high_avail: Option<i64>,
    low_avail: Option<i64>,
    used_64: Option<u64>,
    avail_64: Option<u64>,
}

impl ByteColumns {
    /// Prefer 64-bit columns, then recombined halves, then 32-bit columns.
    fn used_bytes(&self) -> Option<u64> {
        self.used_64
            .or_else(|| combine_high_low(self.high_used, self.low_used).map(kb_to_bytes))
            .or(self.used_32)
    }

    fn free_bytes(&self) -> Option<u64> {
        self.avail_64
            .or_else(|| combine_high_low(self.high_avail, self.low_avail).map(kb_to_bytes))
            .or(self.avail_32)
    }
}

fn kb_to_bytes(kb: u64) -> u64 {
    kb.saturating_mul(1024)
}

/// Decode a df table walk into entities keyed by row index.
pub fn decode_filesystems(walk: &WalkResult) -> BTreeMap<u32, FilesystemEntity> {
    let prefix = oids::df_table();
    let mut entities: BTreeMap<u32, FilesystemEntity> = BTreeMap::new();
    let mut bytes: BTreeMap<u32, ByteColumns> = BTreeMap::new();

    for (rest, value) in walk.rows_under(&prefix) {
        let Some((column, &[index])) = split_cell(rest) else {
            debug!("Skipping df cell with unexpected index {:?}", rest);
            continue;
        };
        let Some(column) = DfColumn::from_number(column) else {
            continue;
        };

        let entity = entities
            .entry(index)
            .or_insert_with(|| FilesystemEntity::new(index));
        let counters = bytes.entry(index).or_default();
        assign(entity, counters, column, value);
    }

    for (index, entity) in entities.iter_mut() {
        if let Some(counters) = bytes.get(index) {
            entity.used_bytes = counters.used_bytes();
            entity.free_bytes = counters.free_bytes();
        }
        entity.derive_fields();
    }

    debug!("Decoded {} filesystem rows", entities.len());
    entities
}

fn assign(entity: &mut FilesystemEntity, bytes: &mut ByteColumns, column: DfColumn, value: &Value) {
    match column {
        DfColumn::FileSys => entity.name = text(value).unwrap_or_default(),
        DfColumn::MountedOn => entity.mounted_on = text(value),
        DfColumn::InodesUsed => entity.used_inodes = value.as_u64(),
        DfColumn::InodesFree => entity.free_inodes = value.as_u64(),
        DfColumn::KBytesUsed => bytes.used_32 = kilobytes(value),
        DfColumn::KBytesAvail => bytes.avail_32 = kilobytes(value),
        DfColumn::HighUsedKBytes => bytes.high_used = value.as_i64(),
        DfColumn::LowUsedKBytes => bytes.low_used = value.as_i64(),
        DfColumn::HighAvailKBytes => bytes.high_avail = value.as_i64(),
        DfColumn::LowAvailKBytes => bytes.low_avail = value.as_i64(),
        DfColumn::Used64KBytes => bytes.used_64 = kilobytes(value),
        DfColumn::Avail64KBytes => bytes.avail_64 = kilobytes(value),
        DfColumn::Status => entity.status = value.as_i64().map(VolumeStatus::from_code),
        DfColumn::MirrorStatus => {
            entity.mirror_status = value.as_i64().map(MirrorStatus::from_code)
        }
        DfColumn::Type => entity.volume_type = value.as_i64().map(VolumeType::from_code),
        // Totals and percentages are recomputed from used + free.
        DfColumn::Index
        | DfColumn::KBytesTotal
        | DfColumn::PerCentKBytesCapacity
        | DfColumn::PerCentInodeCapacity
        | DfColumn::MaxFilesAvail
        | DfColumn::MaxFilesUsed
        | DfColumn::MaxFilesPossible
        | DfColumn::HighTotalKBytes
        | DfColumn::LowTotalKBytes
        | DfColumn::PlexCount
        | DfColumn::Total64KBytes => {}
    }
}
