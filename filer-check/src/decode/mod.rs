// SPDX-License-Identifier: GPL-3.0-only

//! Walk result decoders
//!
//! A table walk arrives as flat `prefix.column.index... = value` pairs. The
//! first component after the table prefix selects the attribute, the rest
//! forms the row identity. A first pass assigns attributes per row, a second
//! pass computes derived fields on the finished rows.

pub mod enclosure;
pub mod filesystem;
pub mod quota;
pub mod snapshot;

pub use enclosure::decode_enclosures;
pub use filesystem::decode_filesystems;
pub use quota::decode_quotas;
pub use snapshot::{count_per_volume, decode_snapshots};

use filer_contracts::Value;

/// Split a walk suffix into its column and row index components.
pub(crate) fn split_cell(rest: &[u32]) -> Option<(u32, &[u32])> {
    rest.split_first().map(|(column, index)| (*column, index))
}

/// Text value with surrounding whitespace removed; empty text is unset.
pub(crate) fn text(value: &Value) -> Option<String> {
    let text = value.as_text();
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Kilobyte counter converted to bytes.
pub(crate) fn kilobytes(value: &Value) -> Option<u64> {
    value.as_u64().map(|kb| kb.saturating_mul(1024))
}

/// Recombine a 64-bit counter the device splits into two signed 32-bit
/// halves. A negative low half is the unsigned value wrapped around.
pub(crate) fn combine_high_low(high: Option<i64>, low: Option<i64>) -> Option<u64> {
    let (high, low) = (high?, low?);
    let high = u64::try_from(high).ok()?;
    let low = if low < 0 { low + (1_i64 << 32) } else { low };
    let low = u64::try_from(low).ok()?;
    Some((high << 32) | (low & 0xFFFF_FFFF))
}
