// SPDX-License-Identifier: GPL-3.0-only

//! System-wide fan, power supply and temperature health

use filer_contracts::DeviceTransport;
use filer_types::{CheckResult, OverTemperature, pluralize};

use super::expect_integer;
use crate::error::Result;
use crate::oids;
use crate::report::Outcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Fans,
    PowerSupplies,
}

impl Component {
    fn nouns(self) -> (&'static str, &'static str) {
        match self {
            Self::Fans => ("failed fan", "failed fans"),
            Self::PowerSupplies => ("failed power supply", "failed power supplies"),
        }
    }
}

/// The device precomputes the failed count and a description of the
/// failures; any failure is critical.
pub fn evaluate_failed_components(component: Component, failed: i64, message: &str) -> Outcome {
    let (singular, plural) = component.nouns();
    let result = if failed > 0 {
        let message = message.trim();
        if message.is_empty() {
            let failed = usize::try_from(failed).unwrap_or(0);
            CheckResult::critical(pluralize(failed, singular, plural))
        } else {
            CheckResult::critical(message)
        }
    } else {
        CheckResult::ok(format!("No {plural}"))
    };
    Outcome::single(result)
}

pub fn evaluate_over_temperature(flag: OverTemperature) -> Outcome {
    Outcome::single(match flag {
        OverTemperature::No => CheckResult::ok("Temperature normal"),
        OverTemperature::Yes => CheckResult::critical("Over temperature"),
        OverTemperature::Unrecognized(_) => {
            CheckResult::unknown(format!("Over-temperature flag: {flag}"))
        }
    })
}

pub async fn run_failed_components(
    transport: &dyn DeviceTransport,
    component: Component,
) -> Result<Outcome> {
    let (count_oid, message_oid) = match component {
        Component::Fans => (oids::failed_fan_count(), oids::failed_fan_message()),
        Component::PowerSupplies => (oids::failed_psu_count(), oids::failed_psu_message()),
    };

    let count = transport.fetch_scalar(&count_oid).await?;
    let failed = expect_integer(&count, &count_oid.to_string())?;
    let message = transport.fetch_scalar(&message_oid).await?;

    Ok(evaluate_failed_components(component, failed, &message.as_text()))
}

pub async fn run_over_temperature(transport: &dyn DeviceTransport) -> Result<Outcome> {
    let oid = oids::over_temperature();
    let value = transport.fetch_scalar(&oid).await?;
    let flag = OverTemperature::from_code(expect_integer(&value, &oid.to_string())?);
    Ok(evaluate_over_temperature(flag))
}
