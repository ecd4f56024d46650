//! Persistence of output records.

use super::OutputRecord;
use crate::error::{Error, Result};
use crate::render::{to_json, JsonFormat};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Destination for processed records.
pub trait RecordStore: Send + Sync {
    /// Store `record` under `key`.
    fn put(&self, key: &str, record: &OutputRecord) -> Result<()>;
}

/// Writes records as pretty JSON files below a root directory.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Create a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path a key maps to.
    ///
    /// Keys must be relative and must not climb out of the root.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        let relative = Path::new(key);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if key.is_empty() || escapes {
            return Err(Error::Store(format!("invalid record key: {}", key)));
        }
        Ok(self.root.join(relative))
    }
}

impl RecordStore for DirectoryStore {
    fn put(&self, key: &str, record: &OutputRecord) -> Result<()> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = to_json(record, JsonFormat::Pretty)?;
        fs::write(&path, json)?;
        log::info!("stored {} at {}", record.document_name, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_for_rejects_escape() {
        let store = DirectoryStore::new("/tmp/out");
        assert!(store.path_for("processed/a.json").is_ok());
        assert!(store.path_for("../a.json").is_err());
        assert!(store.path_for("/etc/passwd").is_err());
        assert!(store.path_for("").is_err());
    }
}
