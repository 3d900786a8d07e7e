// SPDX-License-Identifier: GPL-3.0-only

use std::collections::BTreeMap;

use filer_contracts::WalkResult;
use filer_types::EnclosureEntity;
use tracing::debug;

use super::{split_cell, text};
use crate::oids;

/// Decode a shelf enclosure walk into entities keyed by enclosure index.
pub fn decode_enclosures(walk: &WalkResult) -> BTreeMap<u32, EnclosureEntity> {
    let prefix = oids::enclosure_table();
    let mut entities: BTreeMap<u32, EnclosureEntity> = BTreeMap::new();

    for (rest, value) in walk.rows_under(&prefix) {
        let Some((column, &[index])) = split_cell(rest) else {
            continue;
        };
        let entity = entities
            .entry(index)
            .or_insert_with(|| EnclosureEntity::new(index));

        match column {
            3 => entity.address = text(value),
            5 => entity.product_id = text(value),
            13 => entity.psus_present_list = text(value),
            15 => entity.psus_failed_list = text(value),
            17 => entity.fans_present_list = text(value),
            18 => entity.fans_failed_list = text(value),
            _ => {}
        }
    }

    entities.values_mut().for_each(EnclosureEntity::derive_fields);

    debug!("Decoded {} enclosure rows", entities.len());
    entities
}

#[cfg(test)]
mod tests {
    use filer_contracts::{Oid, Value};

    use super::*;

    fn cell(column: u32, index: u32) -> Oid {
        oids::enclosure_table().child(&[column, index])
    }

    #[test]
    fn counts_components_from_lists() {
        let walk: WalkResult = [
            (cell(1, 1), Value::Integer(1)),
            (cell(3, 1), Value::Text("0a.shelf1".into())),
            (cell(13, 1), Value::Text("1, 2".into())),
            (cell(15, 1), Value::Text("".into())),
            (cell(17, 1), Value::Text("1, 2, 3, 4".into())),
            (cell(18, 1), Value::Text("3".into())),
            (cell(3, 2), Value::Text("0b.shelf2".into())),
            (cell(17, 2), Value::Text("1, 2".into())),
        ]
        .into_iter()
        .collect();

        let shelves = decode_enclosures(&walk);

        assert_eq!(shelves.len(), 2);
        assert_eq!(shelves[&1].display_name(), "0a.shelf1");
        assert_eq!(shelves[&1].fans_present, 4);
        assert_eq!(shelves[&1].fans_failed, 1);
        assert_eq!(shelves[&1].psus_present, 2);
        assert_eq!(shelves[&1].psus_failed, 0);
        assert_eq!(shelves[&2].fans_failed, 0);
        assert_eq!(shelves[&2].psus_present, 0);
    }
}
