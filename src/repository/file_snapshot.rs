//! File Snapshot Store
//!
//! Persists each favorite set as one small JSON file under the client's
//! data directory. The file body is a plain id array, matching what the
//! snapshot key's set contained at the last write.

use super::traits::{SnapshotError, SnapshotStore};
use crate::domain::ItemId;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Snapshot keys contain a colon; file names use an underscore instead
    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key.replace(':', "_")))
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn read_snapshot(&self, key: &str) -> Option<HashSet<ItemId>> {
        let path = self.path_for(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("snapshot {} unreadable: {}", path.display(), e);
                }
                return None;
            }
        };

        match serde_json::from_str::<Vec<ItemId>>(&raw) {
            Ok(ids) => Some(ids.into_iter().collect()),
            Err(e) => {
                log::warn!("snapshot {} corrupt, ignoring: {}", path.display(), e);
                None
            }
        }
    }

    fn write_snapshot(&self, key: &str, ids: &HashSet<ItemId>) -> Result<(), SnapshotError> {
        fs::create_dir_all(&self.dir).map_err(|e| SnapshotError::Io(e.to_string()))?;

        let mut sorted: Vec<ItemId> = ids.iter().copied().collect();
        sorted.sort_unstable();
        let body =
            serde_json::to_string(&sorted).map_err(|e| SnapshotError::Io(e.to_string()))?;
        fs::write(self.path_for(key), body).map_err(|e| SnapshotError::Io(e.to_string()))
    }
}
