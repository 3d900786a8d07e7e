// SPDX-License-Identifier: GPL-3.0-only

//! Disk shelf enclosure models

use serde::{Deserialize, Serialize};

/// One decoded enclosure row. Component counts are derived from the
/// comma-separated presence/failure lists the shelf reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EnclosureEntity {
    pub index: u32,
    /// Channel and shelf address (e.g., "0a.shelf1")
    pub address: Option<String>,
    pub product_id: Option<String>,

    pub fans_present_list: Option<String>,
    pub fans_failed_list: Option<String>,
    pub psus_present_list: Option<String>,
    pub psus_failed_list: Option<String>,

    pub fans_present: usize,
    pub fans_failed: usize,
    pub psus_present: usize,
    pub psus_failed: usize,
}

impl EnclosureEntity {
    pub fn new(index: u32) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    pub fn derive_fields(&mut self) {
        self.fans_present = count_list_elements(self.fans_present_list.as_deref());
        self.fans_failed = count_list_elements(self.fans_failed_list.as_deref());
        self.psus_present = count_list_elements(self.psus_present_list.as_deref());
        self.psus_failed = count_list_elements(self.psus_failed_list.as_deref());
    }

    pub fn display_name(&self) -> String {
        match self.address.as_deref() {
            Some(address) if !address.is_empty() => address.to_string(),
            _ => format!("enclosure {}", self.index),
        }
    }
}

/// Number of entries in a device list such as "1, 2, 4". Blank entries are
/// ignored, so an empty or missing list counts as zero.
pub fn count_list_elements(list: Option<&str>) -> usize {
    list.map(|list| {
        list.split(',')
            .filter(|entry| !entry.trim().is_empty())
            .count()
    })
    .unwrap_or(0)
}
