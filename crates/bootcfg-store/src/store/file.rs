use super::dir::Dir;
use super::groups::GroupRegistry;
use super::{Store, TemplateKind};
use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::model::{Group, Profile};
use serde::Serialize;
use std::path::{Path, PathBuf};

const PROFILES_DIR: &str = "profiles";
const PROFILE_EXT: &str = ".json";

/// Outcome of scanning `profiles/`: what loaded and what was left out.
#[derive(Debug, Default)]
pub struct ProfileScan {
    pub profiles: Vec<Profile>,
    /// Candidate ids that failed to load, with the reason.
    pub skipped: Vec<(String, StoreError)>,
}

/// Store backed by a directory tree, with groups held in memory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: Dir,
    groups: GroupRegistry,
}

impl FileStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            dir: Dir::new(config.root),
            groups: GroupRegistry::new(config.groups),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.root()
    }

    fn profile_path(id: &str) -> PathBuf {
        Path::new(PROFILES_DIR).join(format!("{}{}", id, PROFILE_EXT))
    }

    /// Root-relative path of a template.
    pub fn template_path(kind: TemplateKind, name: &str) -> PathBuf {
        Path::new(kind.dir_name()).join(name)
    }

    /// Load every profile under `profiles/`, separating failures from
    /// successes instead of aborting on the first bad record.
    ///
    /// Fails only when the directory itself cannot be listed.
    pub fn profile_scan(&self) -> Result<ProfileScan> {
        // Phase 1: candidate ids from the .json files.
        let candidates: Vec<String> = self
            .dir
            .read_dir(PROFILES_DIR)?
            .into_iter()
            .filter(|entry| !entry.is_dir && entry.extension() == PROFILE_EXT)
            .map(|entry| entry.stem().to_string())
            .collect();

        // Phase 2: load each candidate, keeping successes and failures apart.
        let mut scan = ProfileScan::default();
        for id in candidates {
            match self.profile_get(&id) {
                Ok(profile) => scan.profiles.push(profile),
                Err(err) => {
                    tracing::debug!(profile = %id, error = %err, "skipping unloadable profile");
                    scan.skipped.push((id, err));
                }
            }
        }
        Ok(scan)
    }

    /// Read raw template text of the given kind.
    pub fn template_get(&self, kind: TemplateKind, name: &str) -> Result<String> {
        let path = Self::template_path(kind, name);
        let data = self.dir.read_file(&path)?;
        String::from_utf8(data).map_err(|e| StoreError::decode(path, e))
    }
}

impl Store for FileStore {
    fn group_get(&self, id: &str) -> Result<Group> {
        self.groups.get(id)
    }

    fn group_list(&self) -> Result<Vec<Group>> {
        Ok(self.groups.list())
    }

    fn profile_put(&self, profile: &Profile) -> Result<()> {
        profile.assert_valid()?;
        let data = to_json_tabbed(profile)?;
        self.dir.write_file(Self::profile_path(&profile.id), &data)?;
        tracing::debug!(profile = %profile.id, bytes = data.len(), "wrote profile");
        Ok(())
    }

    fn profile_get(&self, id: &str) -> Result<Profile> {
        let path = Self::profile_path(id);
        let data = self.dir.read_file(&path)?;
        let profile: Profile =
            serde_json::from_slice(&data).map_err(|e| StoreError::decode(&path, e))?;
        profile.assert_valid()?;
        Ok(profile)
    }

    fn profile_list(&self) -> Result<Vec<Profile>> {
        Ok(self.profile_scan()?.profiles)
    }

    fn ignition_get(&self, name: &str) -> Result<String> {
        self.template_get(TemplateKind::Ignition, name)
    }

    fn cloud_get(&self, name: &str) -> Result<String> {
        self.template_get(TemplateKind::Cloud, name)
    }
}

/// Pretty JSON indented with tabs, the on-disk profile format.
pub fn to_json_tabbed<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}
