// SPDX-License-Identifier: GPL-3.0-only

use std::collections::BTreeMap;

use filer_contracts::{DeviceTransport, TransportErrorKind};
use filer_types::{CheckResult, SnapshotEntry, SnapshotKey, pluralize};
use tracing::debug;

use super::CheckContext;
use crate::decode::{count_per_volume, decode_filesystems, decode_snapshots};
use crate::error::Result;
use crate::oids;
use crate::report::{Outcome, PerfDatum};

/// One verdict line per volume; volumes are not reduced to the worst one.
/// Every name in `volumes` is reported, with zero when it has no snapshot.
pub fn evaluate_snapshots(
    volumes: &[String],
    entries: &BTreeMap<SnapshotKey, SnapshotEntry>,
    context: &CheckContext,
) -> Outcome {
    let thresholds = &context.thresholds;
    let mut outcome = Outcome::new();

    let mut counts = count_per_volume(
        entries
            .values()
            .filter(|entry| !context.is_excluded(&entry.volume_label())),
    );
    for volume in volumes {
        if !context.is_excluded(volume) {
            counts.entry(volume.clone()).or_insert(0);
        }
    }

    for (volume, count) in counts {
        let severity = thresholds.evaluate(count as f64);
        outcome.push(CheckResult::new(
            severity,
            format!("{volume}: {}", pluralize(count, "snapshot", "snapshots")),
        ));
        outcome.push_perf(
            PerfDatum::new(volume, count as f64)
                .thresholds(thresholds.warning_str(), thresholds.critical_str())
                .bounds(Some(0.0), None),
        );
    }

    outcome
}

pub async fn run_snapshots(
    transport: &dyn DeviceTransport,
    context: &CheckContext,
) -> Result<Outcome> {
    let df = transport.fetch_subtree(&oids::df_table()).await?;
    let volumes: Vec<String> = decode_filesystems(&df)
        .values()
        .filter(|entity| entity.is_volume() && !entity.is_snapshot)
        .map(|entity| entity.volume_name().to_string())
        .collect();

    let entries = match transport.fetch_subtree(&oids::snapshot_table()).await {
        Ok(walk) => decode_snapshots(&walk),
        // No snapshot anywhere leaves the table empty.
        Err(error) if error.kind == TransportErrorKind::NoSuchObject && !volumes.is_empty() => {
            debug!("Snapshot table is empty: {}", error);
            BTreeMap::new()
        }
        Err(error) => return Err(error.into()),
    };

    Ok(evaluate_snapshots(&volumes, &entries, context))
}
