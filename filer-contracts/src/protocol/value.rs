// SPDX-License-Identifier: GPL-3.0-only

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single value returned by the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Integer(i64),
    /// Unsigned values too large for `Integer` (64-bit counters)
    Counter(u64),
    Text(String),
}

impl Value {
    /// Classify an unquoted textual rendering of a value.
    pub fn parse_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(number) = trimmed.parse::<i64>() {
            return Self::Integer(number);
        }
        if let Ok(number) = trimmed.parse::<u64>() {
            return Self::Counter(number);
        }
        Self::Text(trimmed.to_string())
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(number) => Some(*number),
            Self::Counter(number) => i64::try_from(*number).ok(),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Integer(number) => u64::try_from(*number).ok(),
            Self::Counter(number) => Some(*number),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }

    pub fn as_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(number) => write!(f, "{number}"),
            Self::Counter(number) => write!(f, "{number}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_raw_values() {
        assert_eq!(Value::parse_raw("42"), Value::Integer(42));
        assert_eq!(Value::parse_raw("-7"), Value::Integer(-7));
        assert_eq!(
            Value::parse_raw("18446744073709551615"),
            Value::Counter(u64::MAX)
        );
        assert_eq!(Value::parse_raw("aggr0"), Value::Text("aggr0".to_string()));
    }

    #[test]
    fn numeric_accessors_reject_out_of_range() {
        assert_eq!(Value::Integer(-1).as_u64(), None);
        assert_eq!(Value::Counter(u64::MAX).as_i64(), None);
        assert_eq!(Value::Text(" 12 ".to_string()).as_u64(), Some(12));
        assert_eq!(Value::Text("n/a".to_string()).as_i64(), None);
    }
}
