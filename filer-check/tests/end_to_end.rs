// SPDX-License-Identifier: GPL-3.0-only

mod common;

use check_filer::{CheckRequest, Metric, check, oids};
use filer_types::Severity;

use common::assertions::{assert_single_line, assert_status};
use common::fixtures::{self, FakeTransport, df, with_disks, with_filesystem};

const GB_IN_KB: i64 = 1024 * 1024;

#[tokio::test]
async fn full_aggregate_is_critical() {
    let transport = FakeTransport::new();
    let transport = with_filesystem(transport, 1, "aggr0", 95 * GB_IN_KB, 5 * GB_IN_KB, 3);
    let transport = with_filesystem(transport, 2, "aggr1", 10 * GB_IN_KB, 90 * GB_IN_KB, 3);
    let transport = with_filesystem(transport, 3, "/vol/vol0/", 99 * GB_IN_KB, GB_IN_KB, 2);

    let request = CheckRequest::new(Metric::AggregateBytes).with_thresholds("70", "90");
    let report = check(&transport, &request).await;

    assert_status(&report, Severity::Critical);
    assert_eq!(report.exit_code, 2);
    assert_eq!(report.summary, "aggr0: 95.00 GB/100.00 GB (95.00%)");
    assert!(report.render().starts_with(
        "CRITICAL - aggr0: 95.00 GB/100.00 GB (95.00%) | 'aggr0'=95%;70;90;0;100"
    ));
    assert_single_line(&report);
}

#[tokio::test]
async fn traditional_volumes_only_leave_no_aggregates() {
    let transport = with_filesystem(FakeTransport::new(), 1, "/vol/vol0/", 50, 50, 1);

    let request = CheckRequest::new(Metric::AggregateBytes).with_thresholds("70", "90");
    let report = check(&transport, &request).await;

    assert_status(&report, Severity::Ok);
    assert_eq!(report.render(), "OK - 0 aggregates within thresholds");
}

#[tokio::test]
async fn healthy_disks_report_counts() {
    let transport = with_disks(FakeTransport::new(), [24, 24, 0, 0, 0, 0, 0, 2, 0], "", 0);

    let report = check(&transport, &CheckRequest::new(Metric::DiskHealth)).await;

    assert_status(&report, Severity::Ok);
    assert_eq!(report.summary, "24 disks present, 24 active.");
    assert_eq!(transport.requests().len(), 11);
}

#[tokio::test]
async fn disk_problems_are_listed_separately() {
    let transport = with_disks(
        FakeTransport::new(),
        [24, 21, 1, 1, 0, 0, 1, 1, 0],
        "Disk 0b.23 is broken.",
        1,
    );

    let report = check(&transport, &CheckRequest::new(Metric::DiskHealth)).await;

    assert_status(&report, Severity::Critical);
    assert_eq!(
        report.summary,
        "1 failed disk: Disk 0b.23 is broken., 1 disk reconstructing, 1 disk reconstructing parity"
    );
}

#[tokio::test]
async fn multi_line_failure_message_stays_on_one_line() {
    let stdout = ".1.3.6.1.4.1.789.1.6.4.1.0 = 24
.1.3.6.1.4.1.789.1.6.4.2.0 = 22
.1.3.6.1.4.1.789.1.6.4.3.0 = 0
.1.3.6.1.4.1.789.1.6.4.4.0 = 0
.1.3.6.1.4.1.789.1.6.4.5.0 = 0
.1.3.6.1.4.1.789.1.6.4.6.0 = 0
.1.3.6.1.4.1.789.1.6.4.7.0 = 2
.1.3.6.1.4.1.789.1.6.4.8.0 = 0
.1.3.6.1.4.1.789.1.6.4.9.0 = 0
.1.3.6.1.4.1.789.1.6.4.10.0 = \"Disk 0a.17 failed
Disk 0b.22 failed\"
.1.3.6.1.4.1.789.1.6.4.11.0 = 0
";
    let transport = FakeTransport::from_agent_output(stdout);

    let report = check(&transport, &CheckRequest::new(Metric::DiskHealth)).await;

    assert_status(&report, Severity::Critical);
    assert_eq!(
        report.summary,
        "2 failed disks: Disk 0a.17 failed Disk 0b.22 failed"
    );
    assert!(report.render().contains("failed | 'total'=24;;;0;"));
    assert_single_line(&report);
}

#[tokio::test]
async fn snapshot_reserves_never_reach_the_volume_report() {
    let transport = with_filesystem(FakeTransport::new(), 1, "/vol/vol0/", 50, 50, 2);
    let transport = with_filesystem(transport, 2, "/vol/vol0/.snapshot", 100, 0, 2);
    let transport = with_filesystem(transport, 3, "aggr0", 99, 1, 3);

    let request = CheckRequest::new(Metric::VolumeBytes).with_thresholds("80", "90");
    let report = check(&transport, &request).await;

    assert_status(&report, Severity::Ok);
    assert_eq!(report.summary, "1 volume within thresholds");
    assert!(!report.render().contains(".snapshot"));
}

#[tokio::test]
async fn inode_usage_of_volumes() {
    let transport = with_filesystem(FakeTransport::new(), 1, "/vol/vol0/", 400, 400, 2)
        .with_int(df(7, 1), 850)
        .with_int(df(8, 1), 150);

    let request = CheckRequest::new(Metric::VolumeInodes).with_thresholds("80", "90");
    let report = check(&transport, &request).await;

    assert_status(&report, Severity::Warning);
    assert_eq!(report.summary, "/vol/vol0/: 850/1,000 (85.00%)");
}

#[tokio::test]
async fn excluded_volume_is_not_evaluated() {
    let transport = with_filesystem(FakeTransport::new(), 1, "/vol/scratch/", 99, 1, 2);
    let transport = with_filesystem(transport, 2, "/vol/vol0/", 10, 90, 2);

    let request = CheckRequest::new(Metric::VolumeBytes)
        .with_thresholds("80", "90")
        .with_exclusions(vec!["/vol/scratch/".to_string()]);
    let report = check(&transport, &request).await;

    assert_status(&report, Severity::Ok);
}

#[tokio::test]
async fn unmounted_volume_is_critical() {
    let transport = with_filesystem(FakeTransport::new(), 1, "/vol/vol0/", 10, 90, 2)
        .with_int(df(20, 1), 1);
    let transport = with_filesystem(transport, 2, "/vol/vol1/", 10, 90, 2);

    let report = check(&transport, &CheckRequest::new(Metric::VolumeStatus)).await;

    assert_status(&report, Severity::Critical);
    assert_eq!(report.summary, "/vol/vol0/ is unmounted");
}

#[tokio::test]
async fn unlimited_user_quota_is_tallied() {
    use fixtures::quota;

    let transport = FakeTransport::new()
        // unlimited user quota far over its nominal limit
        .with_int(quota(2, 1, 1), 1)
        .with_int(quota(3, 1, 1), 501)
        .with_int(quota(4, 1, 1), 0)
        .with_int(quota(5, 1, 1), 1_000_000)
        .with_int(quota(6, 1, 1), 0)
        .with_int(quota(7, 1, 1), 1)
        .with_int(quota(17, 1, 1), 1)
        .with_int(quota(22, 1, 1), 2)
        // limited default user quota at 50%
        .with_int(quota(2, 1, 2), 4)
        .with_int(quota(3, 1, 2), 0)
        .with_int(quota(4, 1, 2), 0)
        .with_int(quota(5, 1, 2), 500)
        .with_int(quota(6, 1, 2), 0)
        .with_int(quota(7, 1, 2), 1000)
        .with_int(quota(22, 1, 2), 1)
        // tree quota is not a user quota
        .with_int(quota(2, 1, 3), 3)
        .with_int(quota(5, 1, 3), 999)
        .with_int(quota(7, 1, 3), 1000);

    let request = CheckRequest::new(Metric::UserBytes).with_thresholds("80", "90");
    let report = check(&transport, &request).await;

    assert_status(&report, Severity::Ok);
    assert_eq!(report.summary, "1 user quota within thresholds, 1 unlimited");
}

#[tokio::test]
async fn zero_enclosures_skip_the_table() {
    let transport = FakeTransport::new()
        .with_int(oids::enclosure_count(), 0)
        .with_text(fixtures::enclosure(3, 1), "stale.shelf");

    let report = check(&transport, &CheckRequest::new(Metric::EnclosureFans)).await;

    assert_status(&report, Severity::Ok);
    assert_eq!(report.summary, "No enclosures present");
    assert_eq!(report.results.len(), 1);
    assert_eq!(
        transport.requests(),
        vec![format!("get {}", oids::enclosure_count())]
    );
}

#[tokio::test]
async fn failed_shelf_power_supply() {
    use fixtures::enclosure;

    let transport = FakeTransport::new()
        .with_int(oids::enclosure_count(), 2)
        .with_text(enclosure(3, 1), "0a.shelf1")
        .with_text(enclosure(13, 1), "1, 2")
        .with_text(enclosure(15, 1), "2")
        .with_text(enclosure(3, 2), "0b.shelf2")
        .with_text(enclosure(13, 2), "1, 2")
        .with_text(enclosure(15, 2), "");

    let report = check(&transport, &CheckRequest::new(Metric::EnclosurePsus)).await;

    assert_status(&report, Severity::Critical);
    assert_eq!(report.summary, "0a.shelf1: 1 power supply failed");
}

#[tokio::test]
async fn failover_not_configured_short_circuits() {
    let transport = FakeTransport::new().with_int(oids::failover_settings(), 1);

    let report = check(&transport, &CheckRequest::new(Metric::ClusterFailover)).await;

    assert_status(&report, Severity::Ok);
    assert_eq!(report.summary, "Clustered failover not configured");
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn failover_partner_taken_over() {
    let transport = FakeTransport::new()
        .with_int(oids::failover_settings(), 2)
        .with_int(oids::failover_partner_status(), 4)
        .with_int(oids::failover_interconnect_status(), 4);

    let report = check(&transport, &CheckRequest::new(Metric::ClusterFailover)).await;

    assert_status(&report, Severity::Warning);
    assert_eq!(report.summary, "Partner taken over, Interconnect up");
}

#[tokio::test]
async fn battery_and_global_status_tables() {
    let transport = FakeTransport::new()
        .with_int(oids::nvram_battery_status(), 5)
        .with_int(oids::global_status(), 4)
        .with_text(oids::global_status_message(), "Disk shelf fan failed.");

    let battery = check(&transport, &CheckRequest::new(Metric::NvramBattery)).await;
    assert_status(&battery, Severity::Warning);
    assert_eq!(battery.summary, "NVRAM battery near end of life");

    let global = check(&transport, &CheckRequest::new(Metric::GlobalStatus)).await;
    assert_status(&global, Severity::Warning);
    assert_eq!(global.summary, "Disk shelf fan failed.");
}

#[tokio::test]
async fn system_fans_and_temperature() {
    let transport = FakeTransport::new()
        .with_int(oids::failed_fan_count(), 1)
        .with_text(oids::failed_fan_message(), "Fan 3 in chassis failed")
        .with_int(oids::failed_psu_count(), 0)
        .with_text(oids::failed_psu_message(), "")
        .with_int(oids::over_temperature(), 1);

    let fans = check(&transport, &CheckRequest::new(Metric::FanHealth)).await;
    assert_status(&fans, Severity::Critical);
    assert_eq!(fans.summary, "Fan 3 in chassis failed");

    let psus = check(&transport, &CheckRequest::new(Metric::PsuHealth)).await;
    assert_status(&psus, Severity::Ok);

    let temperature = check(&transport, &CheckRequest::new(Metric::OverTemperature)).await;
    assert_status(&temperature, Severity::Ok);
}

#[tokio::test]
async fn autosupport_failure_warns() {
    let transport = FakeTransport::new()
        .with_int(oids::autosupport_status(), 3)
        .with_text(oids::autosupport_message(), "HTTP POST failed");

    let report = check(&transport, &CheckRequest::new(Metric::Autosupport)).await;

    assert_status(&report, Severity::Warning);
    assert_eq!(report.summary, "Autosupport post failure: HTTP POST failed");
}

#[tokio::test]
async fn uptime_accepts_rendered_durations() {
    let transport = FakeTransport::new().with_text(oids::sys_uptime(), "2 days, 1:00:00.42");

    let request = CheckRequest::new(Metric::Uptime).with_thresholds("72:", "24:");
    let report = check(&transport, &request).await;

    assert_status(&report, Severity::Warning);
    assert_eq!(report.summary, "Up 2 days, 01:00:00");
}

#[tokio::test]
async fn every_volume_gets_a_snapshot_line() {
    use fixtures::snapshot;

    let transport = with_filesystem(FakeTransport::new(), 1, "/vol/vol0/", 10, 90, 2);
    let transport = with_filesystem(transport, 2, "/vol/vol1/", 10, 90, 1);
    let transport = with_filesystem(transport, 3, "/vol/vol0/.snapshot", 1, 9, 2);
    let transport = transport
        .with_text(snapshot(6, 1, 1), "hourly.0")
        .with_text(snapshot(9, 1, 1), "vol0")
        .with_text(snapshot(6, 1, 2), "hourly.1")
        .with_text(snapshot(9, 1, 2), "vol0")
        .with_text(snapshot(6, 2, 1), "nightly.0")
        .with_text(snapshot(9, 2, 1), "vol1");

    let request = CheckRequest::new(Metric::SnapshotCount).with_thresholds("1", "5");
    let report = check(&transport, &request).await;

    assert_status(&report, Severity::Warning);
    assert_eq!(report.summary, "vol0: 2 snapshots, vol1: 1 snapshot");
}

#[tokio::test]
async fn volume_without_snapshots_breaks_a_minimum() {
    let transport = with_filesystem(FakeTransport::new(), 1, "/vol/vol0/", 10, 90, 2);
    let transport = with_filesystem(transport, 2, "/vol/scratch/", 10, 90, 2);
    let transport = with_filesystem(transport, 3, "aggr0", 20, 180, 3)
        .with_text(fixtures::snapshot(6, 1, 1), "hourly.0")
        .with_text(fixtures::snapshot(9, 1, 1), "vol0");

    let request = CheckRequest::new(Metric::SnapshotCount).with_thresholds("10", "1:");
    let report = check(&transport, &request).await;

    assert_status(&report, Severity::Critical);
    assert_eq!(report.summary, "scratch: 0 snapshots, vol0: 1 snapshot");
    assert_eq!(
        transport.requests(),
        vec![
            format!("walk {}", oids::df_table()),
            format!("walk {}", oids::snapshot_table()),
        ]
    );
}

#[tokio::test]
async fn empty_snapshot_table_counts_zero_everywhere() {
    let transport = with_filesystem(FakeTransport::new(), 1, "/vol/vol0/", 10, 90, 2);

    let request = CheckRequest::new(Metric::SnapshotCount).with_thresholds("10", "20");
    let report = check(&transport, &request).await;

    assert_status(&report, Severity::Ok);
    assert_eq!(report.render(), "OK - vol0: 0 snapshots | 'vol0'=0;10;20;0;");
}

#[tokio::test]
async fn json_report_carries_results_and_perfdata() {
    let transport = with_filesystem(FakeTransport::new(), 1, "aggr0", 700, 300, 3);

    let request = CheckRequest::new(Metric::AggregateBytes).with_thresholds("80", "90");
    let report = check(&transport, &request).await;
    let json = serde_json::to_value(&report).expect("serialise report");

    assert_eq!(json["status"], "OK");
    assert_eq!(json["exit_code"], 0);
    assert_eq!(json["results"][0]["severity"], "OK");
    assert_eq!(json["perfdata"][0]["label"], "aggr0");
    assert_eq!(json["perfdata"][0]["value"], 70.0);
    assert_eq!(json["perfdata"][0]["warning"], "80");
}
