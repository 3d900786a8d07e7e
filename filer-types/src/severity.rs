// SPDX-License-Identifier: GPL-3.0-only

use std::fmt;

use serde::{Deserialize, Serialize};

/// Verdict class of a monitoring plugin.
///
/// `Ok < Warning < Critical` by urgency. `Unknown` means the state could not
/// be determined; it is not "worse than critical", but when raised it decides
/// the reported status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    #[default]
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Severity {
    /// Process exit code of the monitoring plugin protocol.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::Warning => 1,
            Self::Critical => 2,
            Self::Unknown => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Ordering key used when reducing several results to one.
    pub fn precedence(self) -> u8 {
        match self {
            Self::Ok => 0,
            Self::Warning => 1,
            Self::Critical => 2,
            Self::Unknown => 3,
        }
    }

    /// Pick whichever of the two decides the reported status.
    pub fn worst(self, other: Severity) -> Severity {
        if other.precedence() > self.precedence() {
            other
        } else {
            self
        }
    }

    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One (severity, message) pair emitted by a metric handler. Messages are
/// always a single line; embedded line breaks collapse to one space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub severity: Severity,
    pub message: String,
}

impl CheckResult {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: single_line(message.into()),
        }
    }

    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(Severity::Ok, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn critical(message: impl Into<String>) -> Self {
        Self::new(Severity::Critical, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(Severity::Unknown, message)
    }
}

fn single_line(message: String) -> String {
    if !message.contains(['\r', '\n']) {
        return message;
    }
    message
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_never_span_lines() {
        let result = CheckResult::critical("Disk 0a.17 failed\r\n\nDisk 0b.22 failed\n");
        assert_eq!(result.message, "Disk 0a.17 failed Disk 0b.22 failed");

        let result = CheckResult::ok("24 disks present");
        assert_eq!(result.message, "24 disks present");
    }

    #[test]
    fn unknown_decides_over_critical() {
        assert_eq!(Severity::Critical.worst(Severity::Unknown), Severity::Unknown);
        assert_eq!(Severity::Unknown.worst(Severity::Critical), Severity::Unknown);
        assert_eq!(Severity::Warning.worst(Severity::Ok), Severity::Warning);
        assert_eq!(Severity::Ok.worst(Severity::Critical), Severity::Critical);
    }

    #[test]
    fn exit_codes_follow_plugin_protocol() {
        assert_eq!(Severity::Ok.exit_code(), 0);
        assert_eq!(Severity::Warning.exit_code(), 1);
        assert_eq!(Severity::Critical.exit_code(), 2);
        assert_eq!(Severity::Unknown.exit_code(), 3);
    }

    #[test]
    fn severity_serializes_uppercase() {
        let json = serde_json::to_string(&Severity::Critical).expect("serialize severity");
        assert_eq!(json, "\"CRITICAL\"");
    }
}
