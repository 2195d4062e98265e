use super::groups::GroupRegistry;
use super::{Store, TemplateKind};
use crate::error::{Result, StoreError};
use crate::model::{Group, Profile};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::RwLock;

/// In-memory store.
///
/// Same contracts as [`super::file::FileStore`]: profiles are validated on
/// the way in, missing records are `NotFound`, and profiles are listed sorted
/// by id. Groups come back in no particular order. Templates are seeded with
/// [`MemStore::with_template`].
#[derive(Debug, Default)]
pub struct MemStore {
    groups: GroupRegistry,
    profiles: RwLock<BTreeMap<String, Profile>>,
    templates: HashMap<(TemplateKind, String), String>,
}

impl MemStore {
    pub fn new(groups: impl IntoIterator<Item = Group>) -> Self {
        Self {
            groups: GroupRegistry::new(groups),
            ..Default::default()
        }
    }

    pub fn with_template(
        mut self,
        kind: TemplateKind,
        name: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.templates.insert((kind, name.into()), text.into());
        self
    }

    fn template_get(&self, kind: TemplateKind, name: &str) -> Result<String> {
        self.templates
            .get(&(kind, name.to_string()))
            .cloned()
            .ok_or_else(|| StoreError::NotFound(PathBuf::from(kind.dir_name()).join(name)))
    }

    fn read_profiles(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<String, Profile>> {
        // A panicking writer cannot leave a half-inserted map behind.
        self.profiles.read().unwrap_or_else(|e| e.into_inner())
    }
}

impl Store for MemStore {
    fn group_get(&self, id: &str) -> Result<Group> {
        self.groups.get(id)
    }

    fn group_list(&self) -> Result<Vec<Group>> {
        Ok(self.groups.list())
    }

    fn profile_put(&self, profile: &Profile) -> Result<()> {
        profile.assert_valid()?;
        self.profiles
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(profile.id.clone(), profile.clone());
        Ok(())
    }

    fn profile_get(&self, id: &str) -> Result<Profile> {
        self.read_profiles()
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(PathBuf::from(format!("profiles/{}.json", id))))
    }

    fn profile_list(&self) -> Result<Vec<Profile>> {
        Ok(self.read_profiles().values().cloned().collect())
    }

    fn ignition_get(&self, name: &str) -> Result<String> {
        self.template_get(TemplateKind::Ignition, name)
    }

    fn cloud_get(&self, name: &str) -> Result<String> {
        self.template_get(TemplateKind::Cloud, name)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub struct StoreFixture {
        pub store: MemStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: MemStore::default(),
            }
        }

        pub fn with_groups(groups: Vec<Group>) -> Self {
            Self {
                store: MemStore::new(groups),
            }
        }

        pub fn with_profile(self, id: &str, kernel: &str) -> Self {
            let mut profile = Profile::new(id);
            profile.boot.kernel = kernel.to_string();
            self.store.profile_put(&profile).unwrap();
            self
        }

        pub fn with_ignition(mut self, name: &str, text: &str) -> Self {
            self.store = self.store.with_template(TemplateKind::Ignition, name, text);
            self
        }

        pub fn with_cloud(mut self, name: &str, text: &str) -> Self {
            self.store = self.store.with_template(TemplateKind::Cloud, name, text);
            self
        }
    }
}
