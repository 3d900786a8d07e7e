// SPDX-License-Identifier: GPL-3.0-only

use filer_contracts::{DeviceTransport, TransportError, TransportErrorKind, Value};
use filer_types::{CheckResult, pluralize};

use super::expect_integer;
use crate::error::Result;
use crate::oids;
use crate::report::{Outcome, PerfDatum};

/// Disk summary counters, fetched as one positional group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiskSummary {
    pub total: i64,
    pub active: i64,
    pub reconstructing: i64,
    pub reconstructing_parity: i64,
    pub verifying_parity: i64,
    pub scrubbing: i64,
    pub failed: i64,
    pub spare: i64,
    pub adding_spare: i64,
    /// Device-provided description of the failed disks
    pub failed_message: String,
    pub prefailed: i64,
}

impl DiskSummary {
    /// Build from the values of `oids::disk_counters()`, in that order.
    pub fn from_values(values: &[Value]) -> std::result::Result<Self, TransportError> {
        let requests = oids::disk_counters();
        let number = |position: usize| -> std::result::Result<i64, TransportError> {
            let request = requests[position].to_string();
            match values.get(position) {
                Some(value) => expect_integer(value, &request),
                None => Err(TransportError::new(
                    TransportErrorKind::NoSuchObject,
                    request,
                    "counter missing from response",
                )),
            }
        };

        Ok(Self {
            total: number(0)?,
            active: number(1)?,
            reconstructing: number(2)?,
            reconstructing_parity: number(3)?,
            verifying_parity: number(4)?,
            scrubbing: number(5)?,
            failed: number(6)?,
            spare: number(7)?,
            adding_spare: number(8)?,
            failed_message: values
                .get(9)
                .map(|value| value.as_text().trim().to_string())
                .unwrap_or_default(),
            prefailed: number(10)?,
        })
    }
}

/// Every abnormal condition is reported on its own; OK only when none hold.
pub fn evaluate_disks(summary: &DiskSummary) -> Outcome {
    let mut outcome = Outcome::new();

    if summary.failed > 0 {
        let failed = pluralize(count(summary.failed), "failed disk", "failed disks");
        let message = if summary.failed_message.is_empty() {
            failed
        } else {
            format!("{failed}: {}", summary.failed_message)
        };
        outcome.push(CheckResult::critical(message));
    }

    for (number, condition) in [
        (summary.reconstructing, "reconstructing"),
        (summary.reconstructing_parity, "reconstructing parity"),
        (summary.adding_spare, "adding spare"),
    ] {
        if number > 0 {
            outcome.push(CheckResult::warning(format!(
                "{} {condition}",
                pluralize(count(number), "disk", "disks")
            )));
        }
    }

    if outcome.results.is_empty() {
        outcome.push(CheckResult::ok(format!(
            "{} present, {} active.",
            pluralize(count(summary.total), "disk", "disks"),
            summary.active
        )));
    }

    for (label, value) in [
        ("total", summary.total),
        ("active", summary.active),
        ("spare", summary.spare),
        ("failed", summary.failed),
        ("prefailed", summary.prefailed),
    ] {
        outcome.push_perf(PerfDatum::new(label, value as f64).bounds(Some(0.0), None));
    }

    outcome
}

fn count(number: i64) -> usize {
    usize::try_from(number).unwrap_or(0)
}

pub async fn run_disks(transport: &dyn DeviceTransport) -> Result<Outcome> {
    let values = transport.fetch_scalars(&oids::disk_counters()).await?;
    let summary = DiskSummary::from_values(&values)?;
    Ok(evaluate_disks(&summary))
}
