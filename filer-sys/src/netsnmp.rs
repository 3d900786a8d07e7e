// SPDX-License-Identifier: GPL-3.0-only

//! net-snmp CLI transport
//!
//! Wraps the `snmpget` and `snmpwalk` command-line tools. Output is requested
//! with numeric OIDs, numeric enums, raw timeticks and quick-print values so
//! that every line has the form `.1.3.6... = value`.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use filer_contracts::{
    DeviceTransport, Oid, TransportError, TransportErrorKind, Value, WalkResult,
};
use tokio::process::Command;
use tracing::{debug, info, warn};
use which::which;

/// Extra time granted to the subprocess beyond the agent timeout.
const PROCESS_GRACE: Duration = Duration::from_secs(5);

const NO_SUCH_MARKERS: [&str; 3] = [
    "No Such Object available",
    "No Such Instance currently exists",
    "No more variables left",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnmpVersion {
    V1,
    V2c,
}

impl SnmpVersion {
    pub fn as_arg(self) -> &'static str {
        match self {
            Self::V1 => "1",
            Self::V2c => "2c",
        }
    }
}

/// Connection parameters for one device.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub target: String,
    pub port: u16,
    pub community: String,
    pub version: SnmpVersion,
    pub timeout: Duration,
}

/// net-snmp CLI wrapper implementing the device transport
pub struct NetSnmpCli {
    get_binary: PathBuf,
    walk_binary: PathBuf,
    config: SessionConfig,
}

impl NetSnmpCli {
    /// Create a transport for one device.
    ///
    /// Returns an error if the net-snmp tools are not installed
    pub fn new(config: SessionConfig) -> Result<Self, TransportError> {
        let get_binary = find_binary("snmpget")?;
        let walk_binary = find_binary("snmpwalk")?;
        info!(
            "Using {:?} and {:?} against {}:{}",
            get_binary, walk_binary, config.target, config.port
        );

        Ok(Self {
            get_binary,
            walk_binary,
            config,
        })
    }

    fn base_args(&self) -> Vec<String> {
        vec![
            "-v".to_string(),
            self.config.version.as_arg().to_string(),
            "-c".to_string(),
            self.config.community.clone(),
            "-On".to_string(),
            "-OQ".to_string(),
            "-Oe".to_string(),
            "-Ot".to_string(),
            "-t".to_string(),
            self.config.timeout.as_secs().max(1).to_string(),
            "-r".to_string(),
            "0".to_string(),
            format!("{}:{}", self.config.target, self.config.port),
        ]
    }

    /// Run one tool invocation. The child is killed if this future is dropped
    /// or the deadline passes.
    async fn run(&self, binary: &Path, oid: &Oid) -> Result<String, TransportError> {
        let request = oid.to_string();
        debug!("Running {:?} for {}", binary, request);

        let child = Command::new(binary)
            .args(self.base_args())
            .arg(&request)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                TransportError::new(
                    TransportErrorKind::ToolMissing,
                    &request,
                    format!("failed to execute {}: {}", binary.display(), e),
                )
            })?;

        let deadline = self.config.timeout + PROCESS_GRACE;
        let output = match tokio::time::timeout(deadline, child.wait_with_output()).await {
            Ok(result) => result.map_err(|e| {
                TransportError::new(TransportErrorKind::Unreachable, &request, e.to_string())
            })?,
            Err(_) => {
                warn!("{} did not finish within {:?}", request, deadline);
                return Err(TransportError::new(
                    TransportErrorKind::Timeout,
                    &request,
                    format!("no answer from {} within {:?}", self.config.target, deadline),
                ));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!("{:?} failed for {}: {}", binary, request, stderr);
            let kind = if stderr.contains("Timeout") {
                TransportErrorKind::Timeout
            } else {
                TransportErrorKind::Unreachable
            };
            let message = if stderr.is_empty() {
                format!("{} exited with {}", binary.display(), output.status)
            } else {
                stderr
            };
            return Err(TransportError::new(kind, request, message));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl std::fmt::Debug for NetSnmpCli {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetSnmpCli")
            .field("get_binary", &self.get_binary)
            .field("walk_binary", &self.walk_binary)
            .field("target", &self.config.target)
            .field("port", &self.config.port)
            .finish()
    }
}

#[async_trait]
impl DeviceTransport for NetSnmpCli {
    async fn fetch_scalar(&self, oid: &Oid) -> Result<Value, TransportError> {
        let stdout = self.run(&self.get_binary, oid).await?;
        let request = oid.to_string();
        parse_output(&stdout, &request)?
            .into_iter()
            .next()
            .map(|(_, value)| value)
            .ok_or_else(|| {
                TransportError::new(TransportErrorKind::Malformed, request, "empty response")
            })
    }

    async fn fetch_subtree(&self, prefix: &Oid) -> Result<WalkResult, TransportError> {
        let stdout = self.run(&self.walk_binary, prefix).await?;
        let request = prefix.to_string();
        let walk: WalkResult = parse_output(&stdout, &request)?
            .into_iter()
            .filter(|(oid, _)| oid.starts_with(prefix))
            .collect();

        if walk.is_empty() {
            return Err(TransportError::new(
                TransportErrorKind::NoSuchObject,
                request,
                "subtree is empty",
            ));
        }

        debug!("Walk of {} returned {} entries", prefix, walk.len());
        Ok(walk)
    }
}

fn find_binary(name: &str) -> Result<PathBuf, TransportError> {
    which(name).map_err(|e| {
        TransportError::new(
            TransportErrorKind::ToolMissing,
            name,
            format!("{name} not found in PATH: {e}"),
        )
    })
}

/// Parse quick-print output (`.1.3.6... = value` per line).
///
/// Quoted strings may span several lines. An agent-side "no such object"
/// marker fails the whole request.
pub fn parse_output(stdout: &str, request: &str) -> Result<Vec<(Oid, Value)>, TransportError> {
    let mut entries: Vec<(Oid, Value)> = Vec::new();
    let mut open_text: Option<(Oid, String)> = None;

    for line in stdout.lines() {
        if let Some((oid, mut text)) = open_text.take() {
            text.push('\n');
            match line.strip_suffix('"') {
                Some(rest) if closes_string(rest) => {
                    text.push_str(rest);
                    entries.push((oid, Value::Text(unescape(&text))));
                }
                _ => {
                    text.push_str(line);
                    open_text = Some((oid, text));
                }
            }
            continue;
        }

        if line.trim().is_empty() {
            continue;
        }

        let Some((raw_oid, raw_value)) = line.split_once(" = ") else {
            if NO_SUCH_MARKERS.iter().any(|marker| line.contains(marker)) {
                return Err(no_such_object(request, line));
            }
            return Err(TransportError::new(
                TransportErrorKind::Malformed,
                request,
                format!("unexpected line: {line}"),
            ));
        };

        let oid: Oid = raw_oid.trim().parse().map_err(|e: filer_contracts::OidParseError| {
            TransportError::new(TransportErrorKind::Malformed, request, e.to_string())
        })?;

        if NO_SUCH_MARKERS
            .iter()
            .any(|marker| raw_value.starts_with(marker))
        {
            return Err(no_such_object(request, raw_value));
        }

        match raw_value.strip_prefix('"') {
            Some(quoted) => match quoted.strip_suffix('"') {
                Some(body) if closes_string(body) => {
                    entries.push((oid, Value::Text(unescape(body))));
                }
                _ => open_text = Some((oid, quoted.to_string())),
            },
            None => entries.push((oid, Value::parse_raw(raw_value))),
        }
    }

    if let Some((oid, _)) = open_text {
        return Err(TransportError::new(
            TransportErrorKind::Malformed,
            request,
            format!("unterminated string value for {oid}"),
        ));
    }

    Ok(entries)
}

fn no_such_object(request: &str, detail: &str) -> TransportError {
    TransportError::new(TransportErrorKind::NoSuchObject, request, detail.trim())
}

/// A trailing quote closes the value unless it is itself escaped.
fn closes_string(body: &str) -> bool {
    !body.ends_with('\\') || body.ends_with("\\\\")
}

fn unescape(text: &str) -> String {
    text.replace("\\\"", "\"").replace("\\\\", "\\")
}
