// SPDX-License-Identifier: GPL-3.0-only

//! Metric handlers
//!
//! Each module pairs a pure `evaluate_*` function (decoded data in, results
//! out) with an async `run_*` wrapper that fetches what the metric needs
//! through the transport and hands it to the evaluator.

pub mod disk;
pub mod enclosure;
pub mod environment;
pub mod filesystem;
pub mod quota;
pub mod snapshot;
pub mod status;
pub mod uptime;

use filer_contracts::{TransportError, TransportErrorKind, Value};

use crate::threshold::Thresholds;

/// Per-invocation settings shared by all handlers.
#[derive(Debug, Clone, Default)]
pub struct CheckContext {
    pub thresholds: Thresholds,
    /// Entity names removed before evaluation
    pub exclude: Vec<String>,
}

impl CheckContext {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            exclude: Vec::new(),
        }
    }

    pub fn with_exclusions(mut self, exclude: Vec<String>) -> Self {
        self.exclude = exclude;
        self
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclude.iter().any(|excluded| excluded == name)
    }
}

/// Numeric scalar, or a malformed-response error naming the request.
pub(crate) fn expect_integer(value: &Value, request: &str) -> Result<i64, TransportError> {
    value.as_i64().ok_or_else(|| {
        TransportError::new(
            TransportErrorKind::Malformed,
            request,
            format!("expected an integer, got '{value}'"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exclusion_matches_whole_names() {
        let context = CheckContext::default().with_exclusions(vec!["/vol/vol0/".to_string()]);
        assert!(context.is_excluded("/vol/vol0/"));
        assert!(!context.is_excluded("/vol/vol0"));
        assert!(!context.is_excluded("/vol/vol01/"));
    }

    #[test]
    fn non_numeric_scalars_are_malformed() {
        let error = expect_integer(&Value::Text("n/a".into()), ".1.2.0").expect_err("text");
        assert_eq!(error.kind, TransportErrorKind::Malformed);
        assert_eq!(expect_integer(&Value::Integer(4), ".1.2.0").ok(), Some(4));
    }
}
