//! # Storage Layer
//!
//! The [`Store`] trait is the single surface callers use to fetch groups,
//! profiles and templates. Backends can be swapped without touching callers.
//!
//! ## Implementations
//!
//! - [`file::FileStore`]: production backend. Groups live in memory, profiles
//!   and templates live under a root directory.
//! - [`memory::MemStore`]: everything in memory, for tests and embedding.
//!
//! ## Storage Layout
//!
//! ```text
//! <root>/
//! ├── profiles/<profile-id>.json   # one JSON document per profile
//! ├── ignition/<name>              # raw ignition templates
//! └── cloud/<name>                 # raw cloud-config templates
//! ```
//!
//! ## Consistency
//!
//! There is no cache: every read goes back to disk and re-validates. Profile
//! writes are atomic (temp file + rename) but otherwise unsynchronised, so
//! concurrent writers to one id race and the last rename wins. A listing that
//! runs during writes may or may not include the records being written.
//!
//! Operations are blocking and have no timeout of their own.

use crate::error::Result;
use crate::model::{Group, Profile};
use std::fmt;

pub mod dir;
pub mod file;
pub mod groups;
pub mod memory;

/// The two kinds of raw template text a store serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    Ignition,
    Cloud,
}

impl TemplateKind {
    /// Sub-directory of the store root holding templates of this kind.
    pub fn dir_name(self) -> &'static str {
        match self {
            TemplateKind::Ignition => "ignition",
            TemplateKind::Cloud => "cloud",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Abstract interface for group, profile and template storage.
pub trait Store: Send + Sync {
    /// Get a group by id.
    fn group_get(&self, id: &str) -> Result<Group>;

    /// List all groups. Order is unspecified.
    fn group_list(&self) -> Result<Vec<Group>>;

    /// Validate and save a profile, replacing any profile with the same id.
    fn profile_put(&self, profile: &Profile) -> Result<()>;

    /// Get a profile by id. The returned profile has passed validation.
    fn profile_get(&self, id: &str) -> Result<Profile>;

    /// List all loadable profiles. Records that fail to load are left out.
    fn profile_list(&self) -> Result<Vec<Profile>>;

    /// Get an ignition template by name.
    fn ignition_get(&self, name: &str) -> Result<String>;

    /// Get a cloud-config template by name.
    fn cloud_get(&self, name: &str) -> Result<String>;
}
