// SPDX-License-Identifier: GPL-3.0-only

//! Object identifiers of the appliance MIB and MIB-II used by the handlers

use filer_contracts::Oid;

const NETAPP: [u32; 7] = [1, 3, 6, 1, 4, 1, 789];

fn netapp(suffix: &[u32]) -> Oid {
    Oid::from_components(NETAPP).child(suffix)
}

/// dfEntry: one row per volume, aggregate and snapshot reserve
pub fn df_table() -> Oid {
    netapp(&[1, 5, 4, 1])
}

/// qrV2Entry: quota report rows indexed by (volume, row)
pub fn quota_table() -> Oid {
    netapp(&[1, 4, 6, 1])
}

/// enclEntry: one row per disk shelf
pub fn enclosure_table() -> Oid {
    netapp(&[1, 21, 1, 2, 1])
}

pub fn enclosure_count() -> Oid {
    netapp(&[1, 21, 1, 1, 0])
}

/// snapshotV2Entry: snapshot rows indexed by (volume, snapshot)
pub fn snapshot_table() -> Oid {
    netapp(&[1, 5, 5, 2, 1])
}

/// Disk summary counters, in the order total, active, reconstructing,
/// reconstructing parity, verifying parity, scrubbing, failed, spare,
/// adding spare, failed message, prefailed.
pub fn disk_counters() -> Vec<Oid> {
    (1..=11).map(|column| netapp(&[1, 6, 4, column, 0])).collect()
}

pub fn over_temperature() -> Oid {
    netapp(&[1, 2, 4, 1, 0])
}

pub fn failed_fan_count() -> Oid {
    netapp(&[1, 2, 4, 2, 0])
}

pub fn failed_fan_message() -> Oid {
    netapp(&[1, 2, 4, 3, 0])
}

pub fn failed_psu_count() -> Oid {
    netapp(&[1, 2, 4, 4, 0])
}

pub fn failed_psu_message() -> Oid {
    netapp(&[1, 2, 4, 5, 0])
}

pub fn nvram_battery_status() -> Oid {
    netapp(&[1, 2, 5, 1, 0])
}

pub fn failover_settings() -> Oid {
    netapp(&[1, 2, 3, 1, 0])
}

pub fn failover_partner_status() -> Oid {
    netapp(&[1, 2, 3, 4, 0])
}

pub fn failover_interconnect_status() -> Oid {
    netapp(&[1, 2, 3, 8, 0])
}

pub fn autosupport_status() -> Oid {
    netapp(&[1, 2, 7, 1, 0])
}

pub fn autosupport_message() -> Oid {
    netapp(&[1, 2, 7, 2, 0])
}

pub fn global_status() -> Oid {
    netapp(&[1, 2, 2, 4, 0])
}

pub fn global_status_message() -> Oid {
    netapp(&[1, 2, 2, 25, 0])
}

/// MIB-II sysUpTime, in hundredths of a second
pub fn sys_uptime() -> Oid {
    Oid::from_components([1, 3, 6, 1, 2, 1, 1, 3, 0])
}
