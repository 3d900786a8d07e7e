// SPDX-License-Identifier: GPL-3.0-only

use async_trait::async_trait;

use crate::{Oid, TransportError, Value, WalkResult};

/// Query primitive against one remote device.
///
/// Implementations own the session lifecycle and apply their request timeout.
/// A missing object must be reported as an error, never as a zero value.
#[async_trait]
pub trait DeviceTransport: Send + Sync {
    async fn fetch_scalar(&self, oid: &Oid) -> Result<Value, TransportError>;

    async fn fetch_subtree(&self, prefix: &Oid) -> Result<WalkResult, TransportError>;

    /// Fetch several scalars one after another, stopping at the first failure.
    async fn fetch_scalars(&self, oids: &[Oid]) -> Result<Vec<Value>, TransportError> {
        let mut values = Vec::with_capacity(oids.len());
        for oid in oids {
            values.push(self.fetch_scalar(oid).await?);
        }
        Ok(values)
    }
}
