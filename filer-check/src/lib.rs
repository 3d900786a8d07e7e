// SPDX-License-Identifier: GPL-3.0-only

//! Metric evaluation engine of the check-filer monitoring probe
//!
//! One invocation selects a [`Metric`], fetches what it needs through a
//! [`filer_contracts::DeviceTransport`], decodes the raw walk into typed
//! entities, classifies them with operator thresholds or fixed code tables,
//! and reduces everything to a single [`Report`].

pub mod decode;
pub mod error;
pub mod handlers;
pub mod metric;
pub mod oids;
pub mod report;
pub mod threshold;

pub use error::{CheckError, Result};
pub use handlers::CheckContext;
pub use metric::{CheckRequest, Metric, check, run_metric};
pub use report::{Outcome, PerfDatum, Report};
pub use threshold::{Range, Thresholds, evaluate};
