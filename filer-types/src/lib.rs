// SPDX-License-Identifier: GPL-3.0-only

//! Canonical domain models for the check-filer probe
//!
//! This crate defines the single source of truth for every value that flows
//! between the transport, the decoders and the metric handlers:
//!
//! - **filer-contracts**: produces raw walk results that decode into these types
//! - **check-filer**: evaluates these types against thresholds and fixed tables
//!
//! ## Architecture
//!
//! - `Severity` / `CheckResult` → the verdict vocabulary of a monitoring plugin
//! - `FilesystemEntity`, `QuotaEntity`, `EnclosureEntity`, `SnapshotEntry` →
//!   one decoded table row each, built fresh per invocation
//! - `codes` → device status code tables, parsed once at the decode boundary

pub mod codes;
pub mod common;
pub mod enclosure;
pub mod filesystem;
pub mod quota;
pub mod severity;
pub mod snapshot;

pub use codes::{
    AutosupportStatus, BatteryStatus, FailoverSettings, GlobalStatus, InterconnectStatus,
    MirrorStatus, OverTemperature, PartnerStatus, QuotaIdType, QuotaType, UnlimitedFlag,
    VolumeStatus, VolumeType,
};
pub use common::{
    bytes_to_pretty, checked_total, format_count, format_duration, percent_of, pluralize,
    round_to,
};
pub use enclosure::{EnclosureEntity, count_list_elements};
pub use filesystem::{FilesystemEntity, SNAPSHOT_SUFFIX};
pub use quota::{QuotaEntity, QuotaKey};
pub use severity::{CheckResult, Severity};
pub use snapshot::{SnapshotEntry, SnapshotKey};
