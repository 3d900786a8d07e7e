// SPDX-License-Identifier: GPL-3.0-only

//! Device status code tables
//!
//! Every small integer the appliance reports for a state is parsed into one of
//! these enums at the decode boundary. Codes outside a table become
//! `Unrecognized(code)` and render as an explicit label instead of an empty
//! string.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Severity;

macro_rules! code_table {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident = $code:literal => $label:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant,)+
            Unrecognized(i64),
        }

        impl $name {
            pub fn from_code(code: i64) -> Self {
                match code {
                    $($code => Self::$variant,)+
                    other => Self::Unrecognized(other),
                }
            }

            pub fn code(self) -> i64 {
                match self {
                    $(Self::$variant => $code,)+
                    Self::Unrecognized(other) => other,
                }
            }

            pub fn is_recognized(self) -> bool {
                !matches!(self, Self::Unrecognized(_))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($label),)+
                    Self::Unrecognized(code) => write!(f, "unrecognized code ({code})"),
                }
            }
        }
    };
}

code_table! {
    /// Mount state of a volume or aggregate (`dfStatus`).
    VolumeStatus {
        Unmounted = 1 => "unmounted",
        Mounted = 2 => "mounted",
        Frozen = 3 => "frozen",
        Destroying = 4 => "destroying",
        Creating = 5 => "creating",
        Mounting = 6 => "mounting",
        Unmounting = 7 => "unmounting",
        NoFsInfo = 8 => "nofsinfo",
        Replaying = 9 => "replaying",
        Replayed = 10 => "replayed",
    }
}

code_table! {
    /// SyncMirror state of a volume or aggregate (`dfMirrorStatus`).
    MirrorStatus {
        Invalid = 1 => "invalid",
        Uninitialized = 2 => "uninitialized",
        NeedCpCheck = 3 => "needcpcheck",
        CpCheckWait = 4 => "cpcheckwait",
        Unmirrored = 5 => "unmirrored",
        Normal = 6 => "normal",
        Degraded = 7 => "degraded",
        Resyncing = 8 => "resyncing",
        Failed = 9 => "failed",
        Limbo = 10 => "limbo",
    }
}

code_table! {
    /// Kind of filesystem row in the df table (`dfType`).
    VolumeType {
        Traditional = 1 => "traditional",
        Flexible = 2 => "flexible",
        Aggregate = 3 => "aggregate",
    }
}

code_table! {
    /// Quota row kind (`qrV2Type`).
    QuotaType {
        User = 1 => "user",
        Group = 2 => "group",
        Tree = 3 => "tree",
        UserDefault = 4 => "userdefault",
        GroupDefault = 5 => "groupdefault",
        Unknown = 6 => "unknown",
    }
}

code_table! {
    /// How the quota target identity is encoded (`qrV2IdType`).
    QuotaIdType {
        Numeric = 1 => "numeric id",
        Sid = 2 => "security identifier",
    }
}

code_table! {
    /// Device encoding of the per-resource "no limit" marker. `2` means
    /// unlimited; it is not a boolean.
    UnlimitedFlag {
        Limited = 1 => "limited",
        Unlimited = 2 => "unlimited",
    }
}

code_table! {
    /// NVRAM battery state (`nvramBatteryStatus`).
    BatteryStatus {
        Ok = 1 => "ok",
        PartiallyDischarged = 2 => "partially discharged",
        FullyDischarged = 3 => "fully discharged",
        NotPresent = 4 => "not present",
        NearEndOfLife = 5 => "near end of life",
        AtEndOfLife = 6 => "at end of life",
        Unknown = 7 => "unknown",
        OverCharged = 8 => "overcharged",
        FullyCharged = 9 => "fully charged",
    }
}

code_table! {
    /// Clustered failover configuration (`cfSettings`).
    FailoverSettings {
        NotConfigured = 1 => "not configured",
        Enabled = 2 => "enabled",
        Disabled = 3 => "disabled",
        TakeoverByPartnerDisabled = 4 => "takeover by partner disabled",
        ThisNodeDead = 5 => "this node dead",
    }
}

code_table! {
    /// Clustered failover interconnect state (`cfInterconnectStatus`).
    InterconnectStatus {
        NotPresent = 1 => "not present",
        Down = 2 => "down",
        PartialFailure = 3 => "partially failed",
        Up = 4 => "up",
    }
}

code_table! {
    /// Clustered failover partner state (`cfPartnerStatus`).
    PartnerStatus {
        MaybeDown = 1 => "may be down",
        Ok = 2 => "ok",
        Dead = 3 => "dead",
        TakenOver = 4 => "taken over",
    }
}

code_table! {
    /// Last autosupport delivery outcome (`autosupportStatus`).
    AutosupportStatus {
        Ok = 1 => "ok",
        SmtpFailure = 2 => "smtp failure",
        PostFailure = 3 => "post failure",
        SmtpPostFailure = 4 => "smtp and post failure",
        Unknown = 5 => "unknown",
    }
}

code_table! {
    /// Appliance-wide health summary (`miscGlobalStatus`).
    GlobalStatus {
        Other = 1 => "other",
        Unknown = 2 => "unknown",
        Ok = 3 => "ok",
        NonCritical = 4 => "non-critical",
        Critical = 5 => "critical",
        NonRecoverable = 6 => "non-recoverable",
    }
}

code_table! {
    /// Chassis over-temperature flag (`envOverTemperature`).
    OverTemperature {
        No = 1 => "no",
        Yes = 2 => "yes",
    }
}

impl VolumeType {
    pub fn is_aggregate(self) -> bool {
        self == Self::Aggregate
    }
}

impl QuotaType {
    pub fn is_user(self) -> bool {
        matches!(self, Self::User | Self::UserDefault)
    }

    pub fn is_group(self) -> bool {
        matches!(self, Self::Group | Self::GroupDefault)
    }

    pub fn is_tree(self) -> bool {
        self == Self::Tree
    }
}

impl UnlimitedFlag {
    pub fn is_unlimited(self) -> bool {
        self == Self::Unlimited
    }
}

impl BatteryStatus {
    pub fn severity(self) -> Severity {
        match self {
            Self::Ok | Self::FullyCharged => Severity::Ok,
            Self::PartiallyDischarged | Self::NearEndOfLife | Self::OverCharged => {
                Severity::Warning
            }
            Self::FullyDischarged | Self::NotPresent | Self::AtEndOfLife => Severity::Critical,
            Self::Unknown | Self::Unrecognized(_) => Severity::Unknown,
        }
    }
}

impl InterconnectStatus {
    pub fn severity(self) -> Severity {
        match self {
            Self::NotPresent | Self::Up => Severity::Ok,
            Self::PartialFailure => Severity::Warning,
            Self::Down => Severity::Critical,
            Self::Unrecognized(_) => Severity::Unknown,
        }
    }
}

impl PartnerStatus {
    pub fn severity(self) -> Severity {
        match self {
            Self::Ok => Severity::Ok,
            Self::MaybeDown | Self::TakenOver => Severity::Warning,
            Self::Dead => Severity::Critical,
            Self::Unrecognized(_) => Severity::Unknown,
        }
    }
}

impl AutosupportStatus {
    pub fn severity(self) -> Severity {
        match self {
            Self::Ok => Severity::Ok,
            Self::SmtpFailure | Self::PostFailure | Self::SmtpPostFailure => Severity::Warning,
            Self::Unknown | Self::Unrecognized(_) => Severity::Unknown,
        }
    }
}

impl GlobalStatus {
    pub fn severity(self) -> Severity {
        match self {
            Self::Ok => Severity::Ok,
            Self::NonCritical => Severity::Warning,
            Self::Critical | Self::NonRecoverable => Severity::Critical,
            Self::Other | Self::Unknown | Self::Unrecognized(_) => Severity::Unknown,
        }
    }
}
