// SPDX-License-Identifier: GPL-3.0-only

//! In-memory device used by the integration tests

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use check_filer::oids;
use filer_contracts::{
    DeviceTransport, Oid, TransportError, TransportErrorKind, Value, WalkResult,
};

/// Serves scalars and subtrees from a fixed object map and records every
/// request it receives.
#[derive(Default)]
pub struct FakeTransport {
    objects: BTreeMap<Oid, Value>,
    failures: BTreeMap<Oid, TransportErrorKind>,
    requests: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Objects as printed by the agent tools, decoded by the real parser.
    pub fn from_agent_output(stdout: &str) -> Self {
        let entries = filer_sys::parse_output(stdout, ".1.3").expect("parse agent output");
        entries
            .into_iter()
            .fold(Self::new(), |transport, (oid, value)| transport.with(oid, value))
    }

    pub fn with(mut self, oid: Oid, value: Value) -> Self {
        self.objects.insert(oid, value);
        self
    }

    pub fn with_int(self, oid: Oid, value: i64) -> Self {
        self.with(oid, Value::Integer(value))
    }

    pub fn with_text(self, oid: Oid, value: &str) -> Self {
        self.with(oid, Value::Text(value.to_string()))
    }

    /// Any request for `oid` fails with `kind`.
    pub fn failing(mut self, oid: Oid, kind: TransportErrorKind) -> Self {
        self.failures.insert(oid, kind);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn record(&self, kind: &str, oid: &Oid) -> Result<(), TransportError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(format!("{kind} {oid}"));
        }
        match self.failures.get(oid) {
            Some(kind) => Err(TransportError::new(*kind, oid.to_string(), "injected failure")),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DeviceTransport for FakeTransport {
    async fn fetch_scalar(&self, oid: &Oid) -> Result<Value, TransportError> {
        self.record("get", oid)?;
        self.objects.get(oid).cloned().ok_or_else(|| {
            TransportError::new(
                TransportErrorKind::NoSuchObject,
                oid.to_string(),
                "No Such Object available on this agent at this OID",
            )
        })
    }

    async fn fetch_subtree(&self, prefix: &Oid) -> Result<WalkResult, TransportError> {
        self.record("walk", prefix)?;
        let walk: WalkResult = self
            .objects
            .iter()
            .filter(|(oid, _)| oid.starts_with(prefix))
            .map(|(oid, value)| (oid.clone(), value.clone()))
            .collect();
        if walk.is_empty() {
            return Err(TransportError::new(
                TransportErrorKind::NoSuchObject,
                prefix.to_string(),
                "subtree is empty",
            ));
        }
        Ok(walk)
    }
}

pub fn df(column: u32, index: u32) -> Oid {
    oids::df_table().child(&[column, index])
}

pub fn quota(column: u32, volume: u32, row: u32) -> Oid {
    oids::quota_table().child(&[column, volume, row])
}

pub fn enclosure(column: u32, index: u32) -> Oid {
    oids::enclosure_table().child(&[column, index])
}

pub fn snapshot(column: u32, volume: u32, snapshot: u32) -> Oid {
    oids::snapshot_table().child(&[column, volume, snapshot])
}

/// One df row with 64-bit counters. Sizes are in kilobytes.
pub fn with_filesystem(
    transport: FakeTransport,
    index: u32,
    name: &str,
    used_kb: i64,
    free_kb: i64,
    type_code: i64,
) -> FakeTransport {
    transport
        .with_text(df(2, index), name)
        .with_int(df(7, index), used_kb / 4)
        .with_int(df(8, index), free_kb / 4)
        .with_int(df(20, index), 2)
        .with_int(df(21, index), 5)
        .with_int(df(23, index), type_code)
        .with_int(df(30, index), used_kb)
        .with_int(df(31, index), free_kb)
}

/// Disk summary counters in `oids::disk_counters()` order.
pub fn with_disks(
    mut transport: FakeTransport,
    counters: [i64; 9],
    message: &str,
    prefailed: i64,
) -> FakeTransport {
    let oids = oids::disk_counters();
    for (oid, value) in oids.iter().zip(counters) {
        transport = transport.with_int(oid.clone(), value);
    }
    transport
        .with_text(oids[9].clone(), message)
        .with_int(oids[10].clone(), prefailed)
}
