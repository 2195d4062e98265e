//! # Configuration
//!
//! A store is built from a [`StoreConfig`]: the data directory root plus the
//! machine groups to serve. Nothing else configures a store.
//!
//! [`BootcfgConfig`] is the on-disk form of the same settings, managed by
//! [`confique`] with layered loading:
//! 1. **Environment variables**: `BOOTCFG_DATA_PATH`.
//! 2. **Config file**: `bootcfg.toml` (optional, a missing file is skipped).
//! 3. **Compiled Defaults**: via `#[config(default = ...)]`.
//!
//! ## Example
//!
//! ```toml
//! data_path = "/var/lib/bootcfg"
//!
//! [[groups]]
//! id = "node1"
//! name = "etcd node 1"
//! profile = "etcd"
//! selector = { mac = "52:54:00:a1:9c:ae" }
//! metadata = { etcd_name = "node1" }
//! ```

use crate::error::{Result, StoreError};
use crate::model::Group;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_PATH: &str = "/var/lib/bootcfg";

/// Everything a store is constructed from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StoreConfig {
    /// Directory holding `profiles/`, `ignition/` and `cloud/`.
    pub root: PathBuf,
    pub groups: Vec<Group>,
}

impl StoreConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            groups: Vec::new(),
        }
    }

    pub fn with_groups(mut self, groups: Vec<Group>) -> Self {
        self.groups = groups;
        self
    }
}

/// Configuration file for bootcfg, stored in `bootcfg.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BootcfgConfig {
    /// Root of the data directory.
    #[config(default = "/var/lib/bootcfg", env = "BOOTCFG_DATA_PATH")]
    pub data_path: PathBuf,

    /// Machine groups served by the store.
    #[config(default = [])]
    pub groups: Vec<Group>,
}

impl Default for BootcfgConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            groups: Vec::new(),
        }
    }
}

impl BootcfgConfig {
    /// Load from environment, then `path`, then defaults.
    pub fn load(path: &Path) -> Result<Self> {
        Self::builder()
            .env()
            .file(path)
            .load()
            .map_err(|e| StoreError::Config(e.to_string()))
    }

    /// Load from `path` and defaults only, ignoring the environment.
    pub fn load_file(path: &Path) -> Result<Self> {
        Self::builder()
            .file(path)
            .load()
            .map_err(|e| StoreError::Config(e.to_string()))
    }

    /// Validate the configured groups and produce a [`StoreConfig`].
    pub fn into_store_config(self) -> Result<StoreConfig> {
        for group in &self.groups {
            group.assert_valid().map_err(|e| {
                StoreError::Config(format!("group {:?}: {}", group.id, e))
            })?;
        }
        Ok(StoreConfig {
            root: self.data_path,
            groups: self.groups,
        })
    }
}
