// SPDX-License-Identifier: GPL-3.0-only

//! Host identifier remapping
//!
//! An optional INI file maps the host name a monitoring system passes in to
//! the address the probe should actually query:
//!
//! ```ini
//! [hosts]
//! filer01 = 10.0.0.21
//! filer02 = filer02-mgmt.example.net
//! ```
//!
//! Lookups are case-insensitive. Hosts without an entry are used verbatim.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use configparser::ini::Ini;
use tracing::{debug, warn};

use crate::error::{Result, SysError};

const HOSTS_SECTION: &str = "hosts";
const DEFAULT_SECTION: &str = "default";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostMap {
    entries: HashMap<String, String>,
}

impl HostMap {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the map from `path`. A missing file yields an empty map.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("Host map {:?} not present, using host names verbatim", path);
            return Ok(Self::empty());
        }

        let content = std::fs::read_to_string(path).map_err(|e| SysError::HostMapRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let map = Self::parse(&content, path)?;
        debug!("Loaded {} host map entries from {:?}", map.len(), path);
        Ok(map)
    }

    /// Parse INI content; `origin` is only used in error messages.
    pub fn parse(content: &str, origin: &Path) -> Result<Self> {
        if content.trim().is_empty() {
            warn!("Host map is empty: {:?}", origin);
            return Ok(Self::empty());
        }

        let mut conf = Ini::new();
        let sections = conf
            .read(content.to_string())
            .map_err(|reason| SysError::HostMapParse {
                path: PathBuf::from(origin),
                reason,
            })?;

        let mut entries = HashMap::new();
        for section in [DEFAULT_SECTION, HOSTS_SECTION] {
            let Some(properties) = sections.get(section) else {
                continue;
            };
            for (key, value) in properties {
                match value.as_deref().map(str::trim) {
                    Some(target) if !target.is_empty() => {
                        entries.insert(key.to_lowercase(), target.to_string());
                    }
                    _ => warn!("Ignoring host map entry '{}' without a target", key),
                }
            }
        }

        Ok(Self { entries })
    }

    /// Connection target for `host`, or `host` itself when unmapped.
    pub fn resolve<'a>(&'a self, host: &'a str) -> &'a str {
        self.entries
            .get(&host.to_lowercase())
            .map(String::as_str)
            .unwrap_or(host)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
