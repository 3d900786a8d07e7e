// SPDX-License-Identifier: GPL-3.0-only

use filer_contracts::{DeviceTransport, TransportError, TransportErrorKind, Value};
use filer_types::{CheckResult, format_duration, round_to};

use super::CheckContext;
use crate::error::Result;
use crate::oids;
use crate::report::{Outcome, PerfDatum};

/// Uptime in whole seconds from either encoding the agent may use: raw
/// timeticks (hundredths of a second) or a rendered duration such as
/// `12 days, 3:04:05.67`, optionally led by the raw ticks in parentheses.
pub fn parse_uptime(value: &Value) -> Option<u64> {
    match value {
        Value::Integer(_) | Value::Counter(_) => value.as_u64().map(|ticks| ticks / 100),
        Value::Text(text) => parse_uptime_text(text),
    }
}

fn parse_uptime_text(text: &str) -> Option<u64> {
    let text = text.trim();

    if let Some(rest) = text.strip_prefix('(') {
        let (ticks, _) = rest.split_once(')')?;
        return ticks.trim().parse::<u64>().ok().map(|ticks| ticks / 100);
    }
    if let Ok(ticks) = text.parse::<u64>() {
        return Some(ticks / 100);
    }

    let (days, clock) = match text.split_once(',') {
        Some((days, clock)) => {
            let days = days
                .trim()
                .trim_end_matches("days")
                .trim_end_matches("day")
                .trim()
                .parse::<u64>()
                .ok()?;
            (days, clock.trim())
        }
        None => (0, text),
    };

    let clock = clock.split_once('.').map_or(clock, |(whole, _)| whole);
    let mut fields = clock.split(':').map(|field| field.trim().parse::<u64>());
    let (hours, minutes, seconds) = match (fields.next(), fields.next(), fields.next()) {
        (Some(Ok(h)), Some(Ok(m)), Some(Ok(s))) => (h, m, s),
        _ => return None,
    };
    if fields.next().is_some() {
        return None;
    }

    days.checked_mul(86_400)?
        .checked_add(hours.checked_mul(3600)?)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)
}

/// Threshold check on uptime in hours.
pub fn evaluate_uptime(seconds: u64, context: &CheckContext) -> Outcome {
    let thresholds = &context.thresholds;
    let hours = round_to(seconds as f64 / 3600.0, 3);
    let severity = thresholds.evaluate(hours);

    let mut outcome = Outcome::single(CheckResult::new(
        severity,
        format!("Up {}", format_duration(seconds)),
    ));
    outcome.push_perf(
        PerfDatum::new("uptime_hours", hours)
            .thresholds(thresholds.warning_str(), thresholds.critical_str())
            .bounds(Some(0.0), None),
    );
    outcome
}

pub async fn run_uptime(transport: &dyn DeviceTransport, context: &CheckContext) -> Result<Outcome> {
    let oid = oids::sys_uptime();
    let value = transport.fetch_scalar(&oid).await?;
    let seconds = parse_uptime(&value).ok_or_else(|| {
        TransportError::new(
            TransportErrorKind::Malformed,
            oid.to_string(),
            format!("unrecognised uptime '{value}'"),
        )
    })?;
    Ok(evaluate_uptime(seconds, context))
}
