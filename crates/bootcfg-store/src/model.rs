//! # Records
//!
//! Two record types flow through the store:
//!
//! - [`Group`]: a machine group, supplied once at startup and never persisted
//!   by the store. A group selects machines by label and points at a profile.
//! - [`Profile`]: a boot profile, persisted as `profiles/<id>.json`.
//!
//! Both carry an `assert_valid` predicate. The store checks a profile before
//! every write and again after every read, so a [`Profile`] handed out by a
//! store has always passed [`Profile::assert_valid`].
//!
//! ## JSON Shape
//!
//! ```json
//! {
//!     "id": "etcd",
//!     "name": "etcd node",
//!     "boot": {
//!         "kernel": "/assets/coreos/vmlinuz",
//!         "initrd": ["/assets/coreos/cpio.gz"],
//!         "cmdline": { "coreos.autologin": "" }
//!     },
//!     "cloud_id": "",
//!     "ignition_id": "etcd.yaml"
//! }
//! ```
//!
//! Every field except `id` may be omitted when writing documents by hand.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A machine group: label requirements plus the profile matching machines get.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Group {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub profile: String,
    /// Label requirements. An empty selector matches every machine.
    #[serde(default)]
    pub selector: BTreeMap<String, String>,
    /// Free-form data handed to templates; never interpreted here.
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl Group {
    pub fn new(id: impl Into<String>, profile: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            profile: profile.into(),
            ..Default::default()
        }
    }

    pub fn with_selector(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.selector.insert(key.into(), value.into());
        self
    }

    pub fn assert_valid(&self) -> Result<(), ValidationError> {
        if self.id.is_empty() {
            return Err(ValidationError::IdRequired);
        }
        if self.profile.is_empty() {
            return Err(ValidationError::ProfileRequired);
        }
        Ok(())
    }

    /// Whether every selector requirement is satisfied by `labels`.
    pub fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        self.selector
            .iter()
            .all(|(key, want)| labels.get(key) == Some(want))
    }
}

/// Network boot settings of a profile.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct NetBoot {
    #[serde(default)]
    pub kernel: String,
    #[serde(default)]
    pub initrd: Vec<String>,
    #[serde(default)]
    pub cmdline: BTreeMap<String, String>,
}

/// A boot profile: what a matched machine boots and which templates it gets.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub boot: NetBoot,
    /// Name of the cloud-config template under `cloud/`.
    #[serde(default)]
    pub cloud_id: String,
    /// Name of the ignition template under `ignition/`.
    #[serde(default)]
    pub ignition_id: String,
}

impl Profile {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// The profile validity predicate.
    ///
    /// The id doubles as the file stem of `profiles/<id>.json`, so it must be
    /// a single plain path segment.
    pub fn assert_valid(&self) -> Result<(), ValidationError> {
        if self.id.is_empty() {
            return Err(ValidationError::IdRequired);
        }
        if !is_plain_file_name(&self.id) {
            return Err(ValidationError::InvalidId(self.id.clone()));
        }
        Ok(())
    }
}

fn is_plain_file_name(name: &str) -> bool {
    name != "." && name != ".." && !name.contains(['/', '\\', '\0'])
}
