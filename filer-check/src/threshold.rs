// SPDX-License-Identifier: GPL-3.0-only

//! Monitoring-plugin threshold ranges
//!
//! | range     | alerts when value is        |
//! |-----------|-----------------------------|
//! | `10`      | < 0 or > 10                 |
//! | `10:`     | < 10                        |
//! | `~:10`    | > 10                        |
//! | `10:20`   | < 10 or > 20                |
//! | `@10:20`  | >= 10 and <= 20             |

use std::fmt;
use std::str::FromStr;

use filer_types::Severity;

use crate::error::CheckError;

#[derive(Debug, Clone, PartialEq)]
pub struct Range {
    pub start: f64,
    pub end: f64,
    /// `@` prefix: alert inside the range instead of outside
    pub inside: bool,
    source: String,
}

impl Range {
    pub fn parse(spec: &str) -> Result<Self, CheckError> {
        let source = spec.trim();
        if source.is_empty() {
            return Err(syntax_error(spec, "empty range"));
        }

        let (inside, body) = match source.strip_prefix('@') {
            Some(rest) => (true, rest),
            None => (false, source),
        };

        let (start, end) = match body.split_once(':') {
            Some((start, end)) => {
                let start = match start.trim() {
                    "" => 0.0,
                    "~" => f64::NEG_INFINITY,
                    value => parse_bound(spec, value)?,
                };
                let end = match end.trim() {
                    "" => f64::INFINITY,
                    value => parse_bound(spec, value)?,
                };
                (start, end)
            }
            None => (0.0, parse_bound(spec, body.trim())?),
        };

        if start > end {
            return Err(syntax_error(spec, "start is greater than end"));
        }

        Ok(Self {
            start,
            end,
            inside,
            source: source.to_string(),
        })
    }

    pub fn violated_by(&self, value: f64) -> bool {
        let outside = value < self.start || value > self.end;
        if self.inside { !outside } else { outside }
    }

    /// The range as the operator wrote it, for performance data.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl FromStr for Range {
    type Err = CheckError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        Self::parse(spec)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn parse_bound(spec: &str, value: &str) -> Result<f64, CheckError> {
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(number),
        _ => Err(syntax_error(spec, &format!("'{value}' is not a number"))),
    }
}

fn syntax_error(spec: &str, reason: &str) -> CheckError {
    CheckError::ThresholdSyntax {
        spec: spec.to_string(),
        reason: reason.to_string(),
    }
}

/// Critical is checked before warning; an absent range never triggers.
pub fn evaluate(value: f64, warning: Option<&Range>, critical: Option<&Range>) -> Severity {
    if critical.is_some_and(|range| range.violated_by(value)) {
        Severity::Critical
    } else if warning.is_some_and(|range| range.violated_by(value)) {
        Severity::Warning
    } else {
        Severity::Ok
    }
}

/// Warning and critical ranges configured for one invocation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Thresholds {
    pub warning: Option<Range>,
    pub critical: Option<Range>,
}

impl Thresholds {
    pub fn parse(warning: Option<&str>, critical: Option<&str>) -> Result<Self, CheckError> {
        Ok(Self {
            warning: warning.map(Range::parse).transpose()?,
            critical: critical.map(Range::parse).transpose()?,
        })
    }

    pub fn evaluate(&self, value: f64) -> Severity {
        evaluate(value, self.warning.as_ref(), self.critical.as_ref())
    }

    pub fn warning_str(&self) -> Option<String> {
        self.warning.as_ref().map(|range| range.as_str().to_string())
    }

    pub fn critical_str(&self) -> Option<String> {
        self.critical.as_ref().map(|range| range.as_str().to_string())
    }
}
