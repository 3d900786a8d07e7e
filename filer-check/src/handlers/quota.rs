// SPDX-License-Identifier: GPL-3.0-only

//! Tree, user and group quota metrics

use std::collections::BTreeMap;

use filer_contracts::DeviceTransport;
use filer_types::{CheckResult, QuotaEntity, QuotaKey, QuotaType, bytes_to_pretty, format_count};
use tracing::debug;

use super::CheckContext;
use crate::decode::decode_quotas;
use crate::error::Result;
use crate::oids;
use crate::report::{Outcome, PerfDatum};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaScope {
    Tree,
    User,
    Group,
}

impl QuotaScope {
    fn matches(self, quota_type: QuotaType) -> bool {
        match self {
            Self::Tree => quota_type.is_tree(),
            Self::User => quota_type.is_user(),
            Self::Group => quota_type.is_group(),
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Tree => "tree",
            Self::User => "user",
            Self::Group => "group",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaResource {
    Bytes,
    Files,
}

impl QuotaResource {
    fn is_unlimited(self, quota: &QuotaEntity) -> bool {
        match self {
            Self::Bytes => quota.is_bytes_unlimited(),
            Self::Files => quota.is_files_unlimited(),
        }
    }

    fn percent(self, quota: &QuotaEntity) -> Option<f64> {
        match self {
            Self::Bytes => quota.byte_percent,
            Self::Files => quota.file_percent,
        }
    }

    fn usage(self, quota: &QuotaEntity) -> String {
        let render = |count: Option<u64>| match (self, count) {
            (_, None) => "?".to_string(),
            (Self::Bytes, Some(bytes)) => bytes_to_pretty(bytes, false),
            (Self::Files, Some(files)) => format_count(files),
        };
        match self {
            Self::Bytes => format!("{}/{}", render(quota.bytes_used), render(quota.bytes_limit)),
            Self::Files => format!("{}/{}", render(quota.files_used), render(quota.files_limit)),
        }
    }
}

/// Threshold check of quota usage against the hard limit. Rows without a
/// limit on the resource are tallied as unlimited and never evaluated.
pub fn evaluate_quotas(
    quotas: &BTreeMap<QuotaKey, QuotaEntity>,
    scope: QuotaScope,
    resource: QuotaResource,
    context: &CheckContext,
) -> Outcome {
    let thresholds = &context.thresholds;
    let mut outcome = Outcome::new();
    let mut checked = 0_usize;
    let mut unlimited = 0_usize;
    let mut violations = 0_usize;

    let selected = quotas.values().filter(|quota| {
        quota.quota_type.is_some_and(|quota_type| scope.matches(quota_type))
    });

    for quota in selected {
        let identity = quota.identity();
        if context.is_excluded(&identity) {
            continue;
        }
        if resource.is_unlimited(quota) {
            unlimited += 1;
            continue;
        }
        let Some(percent) = resource.percent(quota) else {
            debug!("Quota {} has no usable limit, skipping", identity);
            continue;
        };
        checked += 1;

        let label = format!("{}:{identity}", quota.container());
        outcome.push_perf(
            PerfDatum::new(label, percent)
                .unit("%")
                .thresholds(thresholds.warning_str(), thresholds.critical_str())
                .bounds(Some(0.0), None),
        );

        let severity = thresholds.evaluate(percent);
        if !severity.is_ok() {
            violations += 1;
            outcome.push(CheckResult::new(
                severity,
                format!(
                    "{} quota {identity} on {}: {} ({percent:.2}%)",
                    scope.label(),
                    quota.container(),
                    resource.usage(quota)
                ),
            ));
        }
    }

    let noun = if checked == 1 { "quota" } else { "quotas" };
    let summary = if checked == 0 && unlimited == 0 {
        format!("no {} quotas defined", scope.label())
    } else if violations == 0 {
        format!(
            "{checked} {} {noun} within thresholds, {unlimited} unlimited",
            scope.label()
        )
    } else {
        format!(
            "{violations} of {checked} {} {noun} over thresholds, {unlimited} unlimited",
            scope.label()
        )
    };
    outcome.push(CheckResult::ok(summary));

    outcome
}

pub async fn run_quotas(
    transport: &dyn DeviceTransport,
    context: &CheckContext,
    scope: QuotaScope,
    resource: QuotaResource,
) -> Result<Outcome> {
    let walk = transport.fetch_subtree(&oids::quota_table()).await?;
    let quotas = decode_quotas(&walk);
    Ok(evaluate_quotas(&quotas, scope, resource, context))
}

#[cfg(test)]
mod tests {
    use filer_types::{QuotaIdType, Severity, UnlimitedFlag};

    use super::*;
    use crate::report::Report;
    use crate::threshold::Thresholds;

    fn quota(row: u32, code: i64, used: u64, limit: u64) -> QuotaEntity {
        let mut quota = QuotaEntity::new(QuotaKey { volume: 1, row });
        quota.quota_type = Some(QuotaType::from_code(code));
        quota.volume_name = Some("vol1".to_string());
        quota.id = Some(1000 + i64::from(row));
        quota.id_type = Some(QuotaIdType::Numeric);
        quota.path = Some(format!("/vol/vol1/q{row}"));
        quota.bytes_used = Some(used);
        quota.bytes_limit = Some(limit);
        quota.files_used = Some(used);
        quota.files_limit = Some(limit);
        quota.derive_fields();
        quota
    }

    fn table(quotas: Vec<QuotaEntity>) -> BTreeMap<QuotaKey, QuotaEntity> {
        quotas.into_iter().map(|quota| (quota.key, quota)).collect()
    }

    fn context() -> CheckContext {
        CheckContext::new(Thresholds::parse(Some("80"), Some("90")).expect("thresholds"))
    }

    #[test]
    fn unlimited_quotas_are_tallied_not_evaluated() {
        let mut unlimited = quota(1, 3, 1_000_000, 1);
        unlimited.bytes_unlimited = Some(UnlimitedFlag::Unlimited);
        unlimited.derive_fields();

        let quotas = table(vec![unlimited, quota(2, 3, 10, 100)]);
        let outcome = evaluate_quotas(&quotas, QuotaScope::Tree, QuotaResource::Bytes, &context());

        assert_eq!(
            outcome.results,
            vec![CheckResult::ok("1 tree quota within thresholds, 1 unlimited")]
        );
        assert_eq!(outcome.perfdata.len(), 1);
    }

    #[test]
    fn user_quotas_include_default_user_rows_only() {
        let quotas = table(vec![
            quota(1, 1, 95, 100),
            quota(2, 4, 85, 100),
            quota(3, 2, 99, 100),
            quota(4, 3, 99, 100),
        ]);

        let outcome = evaluate_quotas(&quotas, QuotaScope::User, QuotaResource::Files, &context());
        let report = Report::aggregate(outcome);

        assert_eq!(report.status, Severity::Critical);
        assert_eq!(
            report.summary,
            "user quota 1001 on vol1: 95/100 (95.00%), \
             user quota 1002 on vol1: 85/100 (85.00%), \
             2 of 2 user quotas over thresholds, 0 unlimited"
        );
    }

    #[test]
    fn group_quotas_use_group_types() {
        let quotas = table(vec![quota(1, 2, 10, 100), quota(2, 5, 50, 100), quota(3, 1, 99, 100)]);

        let outcome =
            evaluate_quotas(&quotas, QuotaScope::Group, QuotaResource::Bytes, &context());

        assert_eq!(
            outcome.results,
            vec![CheckResult::ok("2 group quotas within thresholds, 0 unlimited")]
        );
    }

    #[test]
    fn tree_quotas_are_named_by_path() {
        let quotas = table(vec![quota(1, 3, 2048 * 95, 2048 * 100)]);

        let outcome = evaluate_quotas(&quotas, QuotaScope::Tree, QuotaResource::Bytes, &context());

        assert_eq!(outcome.results[0].severity, Severity::Critical);
        assert_eq!(
            outcome.results[0].message,
            "tree quota /vol/vol1/q1 on vol1: 190.00 KB/200.00 KB (95.00%)"
        );
    }

    #[test]
    fn reports_when_no_quota_of_the_kind_exists() {
        let quotas = table(vec![quota(1, 3, 10, 100)]);
        let outcome = evaluate_quotas(&quotas, QuotaScope::User, QuotaResource::Bytes, &context());
        assert_eq!(outcome.results, vec![CheckResult::ok("no user quotas defined")]);
    }
}
