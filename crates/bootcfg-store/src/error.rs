use std::path::PathBuf;
use thiserror::Error;

/// A record failed its validity predicate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("id is required")]
    IdRequired,

    #[error("profile is required")]
    ProfileRequired,

    #[error("invalid id {0:?}: must be a plain file name")]
    InvalidId(String),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Group not found: {0}")]
    GroupNotFound(String),

    #[error("Not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Decode error in {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Encode error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn decode(
        path: impl Into<PathBuf>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        StoreError::Decode {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// True for the "record does not exist" class: missing files, directories
    /// and groups.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_) | StoreError::GroupNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
