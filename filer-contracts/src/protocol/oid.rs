// SPDX-License-Identifier: GPL-3.0-only

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Dotted numeric object identifier (e.g., `.1.3.6.1.2.1.1.3.0`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Oid(Vec<u32>);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid object identifier '{input}'")]
pub struct OidParseError {
    pub input: String,
}

impl Oid {
    pub fn from_components(components: impl Into<Vec<u32>>) -> Self {
        Self(components.into())
    }

    pub fn components(&self) -> &[u32] {
        &self.0
    }

    /// Append sub-identifiers, e.g. a column and row index to a table entry.
    pub fn child(&self, suffix: &[u32]) -> Self {
        let mut components = self.0.clone();
        components.extend_from_slice(suffix);
        Self(components)
    }

    /// Remaining components when `self` lives under `prefix`.
    pub fn strip_prefix(&self, prefix: &Oid) -> Option<&[u32]> {
        self.0.strip_prefix(prefix.0.as_slice())
    }

    pub fn starts_with(&self, prefix: &Oid) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl FromStr for Oid {
    type Err = OidParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let body = trimmed.strip_prefix('.').unwrap_or(trimmed);
        if body.is_empty() {
            return Err(OidParseError {
                input: input.to_string(),
            });
        }

        body.split('.')
            .map(|part| part.parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
            .map_err(|_| OidParseError {
                input: input.to_string(),
            })
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for component in &self.0 {
            write!(f, ".{component}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_or_without_leading_dot() {
        let dotted: Oid = ".1.3.6.1.2.1.1.3.0".parse().expect("parse oid");
        let bare: Oid = "1.3.6.1.2.1.1.3.0".parse().expect("parse oid");
        assert_eq!(dotted, bare);
        assert_eq!(dotted.to_string(), ".1.3.6.1.2.1.1.3.0");
    }

    #[test]
    fn rejects_non_numeric_components() {
        assert!("".parse::<Oid>().is_err());
        assert!(".1.3.x".parse::<Oid>().is_err());
        assert!("1..3".parse::<Oid>().is_err());
    }

    #[test]
    fn strips_table_prefix() {
        let table: Oid = ".1.3.6.1.4.1.789.1.5.4.1".parse().expect("parse oid");
        let cell = table.child(&[2, 17]);
        assert_eq!(cell.strip_prefix(&table), Some(&[2, 17][..]));
        assert!(cell.starts_with(&table));

        let other: Oid = ".1.3.6.1.4.1.789.1.4.6.1".parse().expect("parse oid");
        assert_eq!(cell.strip_prefix(&other), None);
    }
}
