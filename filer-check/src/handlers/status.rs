// SPDX-License-Identifier: GPL-3.0-only

//! Scalar status metrics decided by fixed code tables

use filer_contracts::{DeviceTransport, Oid};
use filer_types::{
    AutosupportStatus, BatteryStatus, CheckResult, FailoverSettings, GlobalStatus,
    InterconnectStatus, PartnerStatus, Severity,
};
use tracing::debug;

use super::expect_integer;
use crate::error::Result;
use crate::oids;
use crate::report::Outcome;

pub fn evaluate_battery(status: BatteryStatus) -> Outcome {
    Outcome::single(CheckResult::new(
        status.severity(),
        format!("NVRAM battery {status}"),
    ))
}

/// Settings decide whether a failover pair exists at all; when it does, the
/// partner and the interconnect are reported separately.
pub fn evaluate_failover(
    settings: FailoverSettings,
    partner: PartnerStatus,
    interconnect: InterconnectStatus,
) -> Outcome {
    let mut outcome = Outcome::new();

    let settings_severity = match settings {
        FailoverSettings::NotConfigured | FailoverSettings::Enabled => None,
        FailoverSettings::Disabled | FailoverSettings::TakeoverByPartnerDisabled => {
            Some(Severity::Warning)
        }
        FailoverSettings::ThisNodeDead => Some(Severity::Critical),
        FailoverSettings::Unrecognized(_) => Some(Severity::Unknown),
    };
    if let Some(severity) = settings_severity {
        outcome.push(CheckResult::new(
            severity,
            format!("Clustered failover {settings}"),
        ));
    }

    outcome.push(CheckResult::new(
        partner.severity(),
        format!("Partner {partner}"),
    ));
    outcome.push(CheckResult::new(
        interconnect.severity(),
        format!("Interconnect {interconnect}"),
    ));

    outcome
}

pub fn failover_not_configured() -> Outcome {
    Outcome::single(CheckResult::ok("Clustered failover not configured"))
}

pub fn evaluate_autosupport(status: AutosupportStatus, message: &str) -> Outcome {
    let message = message.trim();
    let text = if message.is_empty() {
        format!("Autosupport {status}")
    } else {
        format!("Autosupport {status}: {message}")
    };
    Outcome::single(CheckResult::new(status.severity(), text))
}

/// The device's own summary text is preferred over the code label.
pub fn evaluate_global(status: GlobalStatus, message: &str) -> Outcome {
    let message = message.trim();
    let text = if message.is_empty() {
        format!("Global status {status}")
    } else {
        message.to_string()
    };
    Outcome::single(CheckResult::new(status.severity(), text))
}

async fn fetch_code(transport: &dyn DeviceTransport, oid: &Oid) -> Result<i64> {
    let value = transport.fetch_scalar(oid).await?;
    Ok(expect_integer(&value, &oid.to_string())?)
}

async fn fetch_text(transport: &dyn DeviceTransport, oid: &Oid) -> Result<String> {
    Ok(transport.fetch_scalar(oid).await?.as_text())
}

pub async fn run_battery(transport: &dyn DeviceTransport) -> Result<Outcome> {
    let code = fetch_code(transport, &oids::nvram_battery_status()).await?;
    Ok(evaluate_battery(BatteryStatus::from_code(code)))
}

pub async fn run_failover(transport: &dyn DeviceTransport) -> Result<Outcome> {
    let settings = FailoverSettings::from_code(
        fetch_code(transport, &oids::failover_settings()).await?,
    );
    if settings == FailoverSettings::NotConfigured {
        debug!("Clustered failover not configured, skipping partner checks");
        return Ok(failover_not_configured());
    }

    let partner =
        PartnerStatus::from_code(fetch_code(transport, &oids::failover_partner_status()).await?);
    let interconnect = InterconnectStatus::from_code(
        fetch_code(transport, &oids::failover_interconnect_status()).await?,
    );

    Ok(evaluate_failover(settings, partner, interconnect))
}

pub async fn run_autosupport(transport: &dyn DeviceTransport) -> Result<Outcome> {
    let status = AutosupportStatus::from_code(
        fetch_code(transport, &oids::autosupport_status()).await?,
    );
    let message = fetch_text(transport, &oids::autosupport_message()).await?;
    Ok(evaluate_autosupport(status, &message))
}

pub async fn run_global(transport: &dyn DeviceTransport) -> Result<Outcome> {
    let status = GlobalStatus::from_code(fetch_code(transport, &oids::global_status()).await?);
    let message = fetch_text(transport, &oids::global_status_message()).await?;
    Ok(evaluate_global(status, &message))
}
