// SPDX-License-Identifier: GPL-3.0-only

//! Metric selection and dispatch

use clap::ValueEnum;
use filer_contracts::DeviceTransport;
use tracing::{debug, info};

use crate::error::{CheckError, Result};
use crate::handlers::{
    CheckContext, disk,
    enclosure::{self, ShelfComponent},
    environment::{self, Component},
    filesystem::{self, Resource, Scope},
    quota::{self, QuotaResource, QuotaScope},
    snapshot, status, uptime,
};
use crate::report::{Outcome, Report};
use crate::threshold::Thresholds;

/// Every metric the probe can evaluate. One invocation checks one metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Metric {
    AggregateBytes,
    AggregateInodes,
    VolumeBytes,
    VolumeInodes,
    VolumeStatus,
    TreeBytes,
    TreeFiles,
    UserBytes,
    UserFiles,
    GroupBytes,
    GroupFiles,
    DiskHealth,
    FanHealth,
    PsuHealth,
    OverTemperature,
    EnclosureFans,
    EnclosurePsus,
    NvramBattery,
    ClusterFailover,
    Autosupport,
    GlobalStatus,
    Uptime,
    SnapshotCount,
}

impl Metric {
    /// Metrics evaluated against operator thresholds need both ranges.
    pub fn requires_thresholds(self) -> bool {
        matches!(
            self,
            Self::AggregateBytes
                | Self::AggregateInodes
                | Self::VolumeBytes
                | Self::VolumeInodes
                | Self::TreeBytes
                | Self::TreeFiles
                | Self::UserBytes
                | Self::UserFiles
                | Self::GroupBytes
                | Self::GroupFiles
                | Self::Uptime
                | Self::SnapshotCount
        )
    }

    /// Command-line spelling, e.g. `aggregate-bytes`.
    pub fn name(self) -> String {
        self.to_possible_value()
            .map(|value| value.get_name().to_string())
            .unwrap_or_else(|| format!("{self:?}"))
    }
}

/// What the operator asked for, before anything is fetched.
#[derive(Debug, Clone)]
pub struct CheckRequest {
    pub metric: Metric,
    pub warning: Option<String>,
    pub critical: Option<String>,
    pub exclude: Vec<String>,
}

impl CheckRequest {
    pub fn new(metric: Metric) -> Self {
        Self {
            metric,
            warning: None,
            critical: None,
            exclude: Vec::new(),
        }
    }

    pub fn with_thresholds(mut self, warning: &str, critical: &str) -> Self {
        self.warning = Some(warning.to_string());
        self.critical = Some(critical.to_string());
        self
    }

    pub fn with_exclusions(mut self, exclude: Vec<String>) -> Self {
        self.exclude = exclude;
        self
    }

    /// Validate thresholds for the metric. Runs before any device request.
    pub fn context(&self) -> Result<CheckContext> {
        if self.metric.requires_thresholds()
            && (self.warning.is_none() || self.critical.is_none())
        {
            return Err(CheckError::Configuration(format!(
                "metric '{}' requires both --warning and --critical",
                self.metric.name()
            )));
        }

        let thresholds = Thresholds::parse(self.warning.as_deref(), self.critical.as_deref())?;
        Ok(CheckContext::new(thresholds).with_exclusions(self.exclude.clone()))
    }
}

/// Run the handler of one metric.
pub async fn run_metric(
    metric: Metric,
    transport: &dyn DeviceTransport,
    context: &CheckContext,
) -> Result<Outcome> {
    debug!("Dispatching metric {}", metric.name());

    match metric {
        Metric::AggregateBytes => {
            filesystem::run_usage(transport, context, Scope::Aggregates, Resource::Bytes).await
        }
        Metric::AggregateInodes => {
            filesystem::run_usage(transport, context, Scope::Aggregates, Resource::Inodes).await
        }
        Metric::VolumeBytes => {
            filesystem::run_usage(transport, context, Scope::Volumes, Resource::Bytes).await
        }
        Metric::VolumeInodes => {
            filesystem::run_usage(transport, context, Scope::Volumes, Resource::Inodes).await
        }
        Metric::VolumeStatus => filesystem::run_volume_status(transport, context).await,
        Metric::TreeBytes => {
            quota::run_quotas(transport, context, QuotaScope::Tree, QuotaResource::Bytes).await
        }
        Metric::TreeFiles => {
            quota::run_quotas(transport, context, QuotaScope::Tree, QuotaResource::Files).await
        }
        Metric::UserBytes => {
            quota::run_quotas(transport, context, QuotaScope::User, QuotaResource::Bytes).await
        }
        Metric::UserFiles => {
            quota::run_quotas(transport, context, QuotaScope::User, QuotaResource::Files).await
        }
        Metric::GroupBytes => {
            quota::run_quotas(transport, context, QuotaScope::Group, QuotaResource::Bytes).await
        }
        Metric::GroupFiles => {
            quota::run_quotas(transport, context, QuotaScope::Group, QuotaResource::Files).await
        }
        Metric::DiskHealth => disk::run_disks(transport).await,
        Metric::FanHealth => environment::run_failed_components(transport, Component::Fans).await,
        Metric::PsuHealth => {
            environment::run_failed_components(transport, Component::PowerSupplies).await
        }
        Metric::OverTemperature => environment::run_over_temperature(transport).await,
        Metric::EnclosureFans => enclosure::run_enclosures(transport, ShelfComponent::Fans).await,
        Metric::EnclosurePsus => {
            enclosure::run_enclosures(transport, ShelfComponent::PowerSupplies).await
        }
        Metric::NvramBattery => status::run_battery(transport).await,
        Metric::ClusterFailover => status::run_failover(transport).await,
        Metric::Autosupport => status::run_autosupport(transport).await,
        Metric::GlobalStatus => status::run_global(transport).await,
        Metric::Uptime => uptime::run_uptime(transport, context).await,
        Metric::SnapshotCount => snapshot::run_snapshots(transport, context).await,
    }
}

/// Full invocation: validate, fetch, evaluate, aggregate. Any error ends the
/// check with a single UNKNOWN result.
pub async fn check(transport: &dyn DeviceTransport, request: &CheckRequest) -> Report {
    let outcome = match request.context() {
        Ok(context) => run_metric(request.metric, transport, &context).await,
        Err(error) => Err(error),
    };

    let report = match outcome {
        Ok(outcome) => Report::aggregate(outcome),
        Err(error) => {
            info!("Check {} failed: {}", request.metric.name(), error);
            Report::from_error(&error)
        }
    };

    debug!(
        "Metric {} finished with {} ({} results)",
        request.metric.name(),
        report.status,
        report.results.len()
    );
    report
}
