// SPDX-License-Identifier: GPL-3.0-only

use std::collections::BTreeMap;

use super::{Oid, Value};

/// Flat result of a subtree walk, keyed by full object identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkResult {
    entries: BTreeMap<Oid, Value>,
}

impl WalkResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, oid: Oid, value: Value) {
        self.entries.insert(oid, value);
    }

    pub fn get(&self, oid: &Oid) -> Option<&Value> {
        self.entries.get(oid)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Oid, &Value)> {
        self.entries.iter()
    }

    /// Entries under `prefix`, keyed by the components after it.
    pub fn rows_under<'a>(
        &'a self,
        prefix: &'a Oid,
    ) -> impl Iterator<Item = (&'a [u32], &'a Value)> + 'a {
        self.entries
            .range(prefix.clone()..)
            .map_while(move |(oid, value)| oid.strip_prefix(prefix).map(|rest| (rest, value)))
    }
}

impl FromIterator<(Oid, Value)> for WalkResult {
    fn from_iter<T: IntoIterator<Item = (Oid, Value)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
