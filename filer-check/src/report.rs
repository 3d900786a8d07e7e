// SPDX-License-Identifier: GPL-3.0-only

//! Reducing handler results to the single plugin verdict

use std::fmt;

use filer_types::{CheckResult, Severity};
use serde::Serialize;

use crate::error::CheckError;

/// One performance data point, rendered as
/// `'label'=value[unit];warn;crit;min;max`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerfDatum {
    pub label: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub warning: Option<String>,
    pub critical: Option<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl PerfDatum {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
            unit: None,
            warning: None,
            critical: None,
            min: None,
            max: None,
        }
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn thresholds(mut self, warning: Option<String>, critical: Option<String>) -> Self {
        self.warning = warning;
        self.critical = critical;
        self
    }

    pub fn bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }
}

impl fmt::Display for PerfDatum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self.label.replace('\'', "''");
        write!(
            f,
            "'{label}'={}{};{};{};{};{}",
            self.value,
            self.unit.as_deref().unwrap_or(""),
            self.warning.as_deref().unwrap_or(""),
            self.critical.as_deref().unwrap_or(""),
            self.min.map(|min| min.to_string()).unwrap_or_default(),
            self.max.map(|max| max.to_string()).unwrap_or_default(),
        )
    }
}

/// Everything one handler invocation produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    pub results: Vec<CheckResult>,
    pub perfdata: Vec<PerfDatum>,
}

impl Outcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(result: CheckResult) -> Self {
        Self {
            results: vec![result],
            perfdata: Vec::new(),
        }
    }

    pub fn push(&mut self, result: CheckResult) {
        self.results.push(result);
    }

    pub fn push_perf(&mut self, datum: PerfDatum) {
        self.perfdata.push(datum);
    }

    /// Results that are not OK.
    pub fn problems(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|result| !result.severity.is_ok())
    }
}

/// Final verdict of an invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub status: Severity,
    pub exit_code: i32,
    pub summary: String,
    pub results: Vec<CheckResult>,
    pub perfdata: Vec<PerfDatum>,
}

impl Report {
    /// Worst severity wins, with UNKNOWN deciding over everything. Messages
    /// are ordered worst first; equal severities keep handler order.
    pub fn aggregate(outcome: Outcome) -> Self {
        let Outcome {
            mut results,
            perfdata,
        } = outcome;

        if results.is_empty() {
            results.push(CheckResult::unknown("no data returned"));
        }

        results.sort_by_key(|result| std::cmp::Reverse(result.severity.precedence()));

        let status = results
            .iter()
            .map(|result| result.severity)
            .fold(Severity::Ok, Severity::worst);

        let summary = results
            .iter()
            .map(|result| result.message.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            status,
            exit_code: status.exit_code(),
            summary,
            results,
            perfdata,
        }
    }

    pub fn from_error(error: &CheckError) -> Self {
        Self::aggregate(Outcome::single(CheckResult::new(
            error.severity(),
            error.to_string(),
        )))
    }

    /// The single plugin output line.
    pub fn render(&self) -> String {
        let mut line = format!("{} - {}", self.status, self.summary);
        if !self.perfdata.is_empty() {
            let perfdata = self
                .perfdata
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            line.push_str(" | ");
            line.push_str(&perfdata);
        }
        line
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
