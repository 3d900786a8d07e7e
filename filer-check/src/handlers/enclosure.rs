// SPDX-License-Identifier: GPL-3.0-only

//! Per-shelf fan and power supply health

use std::collections::BTreeMap;

use filer_contracts::DeviceTransport;
use filer_types::{CheckResult, EnclosureEntity, pluralize};
use tracing::debug;

use super::expect_integer;
use crate::decode::decode_enclosures;
use crate::error::Result;
use crate::oids;
use crate::report::{Outcome, PerfDatum};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShelfComponent {
    Fans,
    PowerSupplies,
}

impl ShelfComponent {
    fn counts(self, shelf: &EnclosureEntity) -> (usize, usize) {
        match self {
            Self::Fans => (shelf.fans_present, shelf.fans_failed),
            Self::PowerSupplies => (shelf.psus_present, shelf.psus_failed),
        }
    }

    fn nouns(self) -> (&'static str, &'static str) {
        match self {
            Self::Fans => ("fan", "fans"),
            Self::PowerSupplies => ("power supply", "power supplies"),
        }
    }
}

pub fn no_enclosures() -> Outcome {
    Outcome::single(CheckResult::ok("No enclosures present"))
}

/// Critical for each shelf with a failed component; otherwise one summary of
/// everything present.
pub fn evaluate_enclosures(
    shelves: &BTreeMap<u32, EnclosureEntity>,
    component: ShelfComponent,
) -> Outcome {
    let (singular, plural) = component.nouns();
    let mut outcome = Outcome::new();
    let mut present_total = 0;
    let mut failed_total = 0;

    for shelf in shelves.values() {
        let (present, failed) = component.counts(shelf);
        present_total += present;
        failed_total += failed;

        if failed > 0 {
            let failed = pluralize(failed, singular, plural);
            outcome.push(CheckResult::critical(format!(
                "{}: {failed} failed",
                shelf.display_name()
            )));
        }
    }

    if shelves.is_empty() {
        outcome.push(CheckResult::unknown("enclosure table is empty"));
    } else if outcome.results.is_empty() {
        outcome.push(CheckResult::ok(format!(
            "{} present in {}",
            pluralize(present_total, singular, plural),
            pluralize(shelves.len(), "enclosure", "enclosures")
        )));
    }

    outcome.push_perf(PerfDatum::new("present", present_total as f64).bounds(Some(0.0), None));
    outcome.push_perf(PerfDatum::new("failed", failed_total as f64).bounds(Some(0.0), None));

    outcome
}

/// Reads the enclosure count first; the table is only walked when shelves
/// exist.
pub async fn run_enclosures(
    transport: &dyn DeviceTransport,
    component: ShelfComponent,
) -> Result<Outcome> {
    let count_oid = oids::enclosure_count();
    let count = transport.fetch_scalar(&count_oid).await?;
    if expect_integer(&count, &count_oid.to_string())? == 0 {
        debug!("Device reports no enclosures");
        return Ok(no_enclosures());
    }

    let walk = transport.fetch_subtree(&oids::enclosure_table()).await?;
    let shelves = decode_enclosures(&walk);
    Ok(evaluate_enclosures(&shelves, component))
}
