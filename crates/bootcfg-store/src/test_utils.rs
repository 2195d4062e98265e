use crate::config::StoreConfig;
use crate::model::Group;
use crate::store::file::FileStore;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub store: FileStore,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_groups(Vec::new())
    }

    pub fn with_groups(groups: Vec<Group>) -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let store = FileStore::new(StoreConfig::new(root.clone()).with_groups(groups));
        Self {
            _temp_dir: temp_dir,
            store,
            root,
        }
    }

    /// Write a file under the store root behind the store's back.
    pub fn write(&self, rel: &str, content: &str) {
        let path = self.root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}
