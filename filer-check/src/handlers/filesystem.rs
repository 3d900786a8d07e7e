// SPDX-License-Identifier: GPL-3.0-only

//! Aggregate and volume capacity metrics

use std::collections::BTreeMap;

use filer_contracts::DeviceTransport;
use filer_types::{
    CheckResult, FilesystemEntity, MirrorStatus, VolumeStatus, bytes_to_pretty, format_count,
    pluralize,
};
use tracing::debug;

use super::CheckContext;
use crate::decode::decode_filesystems;
use crate::error::Result;
use crate::oids;
use crate::report::{Outcome, PerfDatum};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Aggregates,
    Volumes,
}

impl Scope {
    fn includes(self, entity: &FilesystemEntity) -> bool {
        match self {
            Self::Aggregates => entity.is_aggregate,
            Self::Volumes => entity.is_volume(),
        }
    }

    fn nouns(self) -> (&'static str, &'static str) {
        match self {
            Self::Aggregates => ("aggregate", "aggregates"),
            Self::Volumes => ("volume", "volumes"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Bytes,
    Inodes,
}

impl Resource {
    fn percent(self, entity: &FilesystemEntity) -> Option<f64> {
        match self {
            Self::Bytes => entity.byte_percent,
            Self::Inodes => entity.inode_percent,
        }
    }

    fn usage(self, entity: &FilesystemEntity) -> (String, String) {
        let (used, total) = match self {
            Self::Bytes => (entity.used_bytes, entity.total_bytes),
            Self::Inodes => (entity.used_inodes, entity.total_inodes),
        };
        let render = |count: Option<u64>| match (self, count) {
            (_, None) => "?".to_string(),
            (Self::Bytes, Some(bytes)) => bytes_to_pretty(bytes, false),
            (Self::Inodes, Some(inodes)) => format_count(inodes),
        };
        (render(used), render(total))
    }
}

/// Entities the report is about: the requested scope, never snapshot
/// reserves, minus exclusions.
fn reportable<'a>(
    entities: &'a BTreeMap<u32, FilesystemEntity>,
    scope: Scope,
    context: &'a CheckContext,
) -> impl Iterator<Item = &'a FilesystemEntity> + 'a {
    entities.values().filter(move |entity| {
        !entity.is_snapshot && scope.includes(entity) && !context.is_excluded(&entity.name)
    })
}

/// Threshold check of used percentage for every reportable entity.
pub fn evaluate_usage(
    entities: &BTreeMap<u32, FilesystemEntity>,
    scope: Scope,
    resource: Resource,
    context: &CheckContext,
) -> Outcome {
    let thresholds = &context.thresholds;
    let mut outcome = Outcome::new();
    let mut checked = 0;
    let mut unavailable = 0;

    for entity in reportable(entities, scope, context) {
        let Some(percent) = resource.percent(entity) else {
            debug!("No usage percentage for {}, skipping", entity.name);
            unavailable += 1;
            continue;
        };
        checked += 1;

        outcome.push_perf(
            PerfDatum::new(&entity.name, percent)
                .unit("%")
                .thresholds(thresholds.warning_str(), thresholds.critical_str())
                .bounds(Some(0.0), Some(100.0)),
        );

        let severity = thresholds.evaluate(percent);
        if !severity.is_ok() {
            let (used, total) = resource.usage(entity);
            outcome.push(CheckResult::new(
                severity,
                format!("{}: {used}/{total} ({percent:.2}%)", entity.name),
            ));
        }
    }

    if outcome.results.is_empty() {
        let (singular, plural) = scope.nouns();
        let mut summary = format!("{} within thresholds", pluralize(checked, singular, plural));
        if unavailable > 0 {
            summary.push_str(&format!(", {unavailable} without usage data"));
        }
        outcome.push(CheckResult::ok(summary));
    }

    outcome
}

/// Mount and mirror state of every reportable volume.
pub fn evaluate_volume_status(
    entities: &BTreeMap<u32, FilesystemEntity>,
    context: &CheckContext,
) -> Outcome {
    let mut outcome = Outcome::new();
    let mut checked = 0;

    for entity in reportable(entities, Scope::Volumes, context) {
        checked += 1;

        match entity.status {
            Some(VolumeStatus::Mounted) => {}
            Some(status @ VolumeStatus::Unrecognized(_)) => outcome.push(CheckResult::unknown(
                format!("{} is {status}", entity.name),
            )),
            Some(status) => outcome.push(CheckResult::critical(format!(
                "{} is {status}",
                entity.name
            ))),
            None => outcome.push(CheckResult::unknown(format!(
                "{} reports no status",
                entity.name
            ))),
        }

        if let Some(mirror) = entity.mirror_status {
            let result = match mirror {
                MirrorStatus::Failed => Some(CheckResult::critical(format!(
                    "{} mirror {mirror}",
                    entity.name
                ))),
                MirrorStatus::Degraded
                | MirrorStatus::Resyncing
                | MirrorStatus::NeedCpCheck
                | MirrorStatus::CpCheckWait => Some(CheckResult::warning(format!(
                    "{} mirror {mirror}",
                    entity.name
                ))),
                MirrorStatus::Unrecognized(_) => Some(CheckResult::unknown(format!(
                    "{} mirror {mirror}",
                    entity.name
                ))),
                _ => None,
            };
            if let Some(result) = result {
                outcome.push(result);
            }
        }
    }

    if outcome.results.is_empty() {
        outcome.push(CheckResult::ok(format!(
            "{} mounted",
            pluralize(checked, "volume", "volumes")
        )));
    }

    outcome
}

pub async fn run_usage(
    transport: &dyn DeviceTransport,
    context: &CheckContext,
    scope: Scope,
    resource: Resource,
) -> Result<Outcome> {
    let walk = transport.fetch_subtree(&oids::df_table()).await?;
    let entities = decode_filesystems(&walk);
    Ok(evaluate_usage(&entities, scope, resource, context))
}

pub async fn run_volume_status(
    transport: &dyn DeviceTransport,
    context: &CheckContext,
) -> Result<Outcome> {
    let walk = transport.fetch_subtree(&oids::df_table()).await?;
    let entities = decode_filesystems(&walk);
    Ok(evaluate_volume_status(&entities, context))
}
