use crate::error::{Result, StoreError};
use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use uuid::Uuid;

/// Name and basic metadata of one directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    pub name: String,
    pub is_dir: bool,
    /// Size in bytes, or None when the entry could not be stat'ed.
    pub len: Option<u64>,
}

impl DirEntryInfo {
    /// File name without its final extension (`etcd.json` -> `etcd`).
    pub fn stem(&self) -> &str {
        match self.name.rfind('.') {
            Some(idx) if idx > 0 => &self.name[..idx],
            _ => &self.name,
        }
    }

    /// Final extension including the dot, or "" when there is none.
    pub fn extension(&self) -> &str {
        &self.name[self.stem().len()..]
    }
}

/// Filesystem access confined to a root directory.
///
/// Every path handed to a `Dir` is relative to its root. Paths that would
/// leave the root (absolute paths, `..` segments) resolve to nothing and
/// fail with [`StoreError::NotFound`].
#[derive(Debug, Clone)]
pub struct Dir {
    root: PathBuf,
}

impl Dir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Join `rel` under the root, refusing anything that could escape it.
    pub fn resolve(&self, rel: &Path) -> Result<PathBuf> {
        let mut resolved = self.root.clone();
        for component in rel.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(StoreError::NotFound(rel.to_path_buf()));
                }
            }
        }
        Ok(resolved)
    }

    /// Read a whole file. Missing and unreadable files are both `NotFound`.
    pub fn read_file(&self, rel: impl AsRef<Path>) -> Result<Vec<u8>> {
        let rel = rel.as_ref();
        let path = self.resolve(rel)?;
        tracing::trace!(path = %path.display(), "read file");
        fs::read(&path).map_err(|_| StoreError::NotFound(rel.to_path_buf()))
    }

    /// List a directory, sorted by entry name.
    ///
    /// Entries that disappear between the directory read and their stat
    /// (e.g. another writer's temp file being renamed) are left out.
    pub fn read_dir(&self, rel: impl AsRef<Path>) -> Result<Vec<DirEntryInfo>> {
        let rel = rel.as_ref();
        let path = self.resolve(rel)?;
        tracing::trace!(path = %path.display(), "read dir");

        let entries = fs::read_dir(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => StoreError::NotFound(rel.to_path_buf()),
            _ => StoreError::io(rel, e),
        })?;

        let mut infos = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(StoreError::io(rel, e)),
            };
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    tracing::trace!(entry = %name, "entry vanished during listing");
                    continue;
                }
                Err(e) => return Err(StoreError::io(rel, e)),
            };
            infos.push(DirEntryInfo {
                name,
                is_dir: file_type.is_dir(),
                len: entry.metadata().ok().map(|meta| meta.len()),
            });
        }
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(infos)
    }

    /// Write a whole file, creating parent directories as needed.
    ///
    /// The bytes land in a hidden temporary sibling first and are renamed over
    /// the target, so readers see either the old or the new content.
    pub fn write_file(&self, rel: impl AsRef<Path>, data: &[u8]) -> Result<()> {
        let rel = rel.as_ref();
        let path = self.resolve(rel)?;
        let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
            return Err(StoreError::io(
                rel,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a file path"),
            ));
        };
        fs::create_dir_all(parent).map_err(|e| StoreError::io(rel, e))?;

        let tmp_path = parent.join(format!(
            ".{}.{}.tmp",
            name.to_string_lossy(),
            Uuid::new_v4()
        ));
        let written = write_and_sync(&tmp_path, data).and_then(|_| fs::rename(&tmp_path, &path));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(StoreError::io(rel, e));
        }
        Ok(())
    }
}

fn write_and_sync(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(data)?;
    file.sync_all()
}
