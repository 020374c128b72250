//! Repository Integration Tests
//!
//! Tests for the snapshot stores backing the favorites fallback tier.

#[cfg(test)]
mod tests {
    use crate::repository::{FileSnapshotStore, MemorySnapshotStore, SnapshotStore};
    use std::collections::HashSet;

    fn ids(values: &[u32]) -> HashSet<u32> {
        values.iter().copied().collect()
    }

    fn setup_file_store() -> (tempfile::TempDir, FileSnapshotStore) {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = FileSnapshotStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_file_store_round_trip() {
        let (_dir, store) = setup_file_store();

        store
            .write_snapshot("favorites:pets", &ids(&[3, 1, 8]))
            .expect("write failed");

        let read = store.read_snapshot("favorites:pets").expect("missing");
        assert_eq!(read, ids(&[1, 3, 8]));
    }

    #[test]
    fn test_file_store_missing_key_is_absent() {
        let (_dir, store) = setup_file_store();
        assert!(store.read_snapshot("favorites:tips").is_none());
    }

    #[test]
    fn test_file_store_keys_do_not_collide() {
        let (_dir, store) = setup_file_store();

        store.write_snapshot("favorites:pets", &ids(&[1])).unwrap();
        store.write_snapshot("favorites:tips", &ids(&[2])).unwrap();

        assert_eq!(store.read_snapshot("favorites:pets"), Some(ids(&[1])));
        assert_eq!(store.read_snapshot("favorites:tips"), Some(ids(&[2])));
    }

    #[test]
    fn test_file_store_overwrites_previous_snapshot() {
        let (_dir, store) = setup_file_store();

        store.write_snapshot("favorites:pets", &ids(&[1, 2])).unwrap();
        store.write_snapshot("favorites:pets", &ids(&[2])).unwrap();

        assert_eq!(store.read_snapshot("favorites:pets"), Some(ids(&[2])));
    }

    #[test]
    fn test_file_store_key_maps_to_plain_filename() {
        let (dir, store) = setup_file_store();

        store.write_snapshot("favorites:pets", &ids(&[5])).unwrap();

        assert!(dir.path().join("favorites_pets.json").exists());
    }

    #[test]
    fn test_file_store_corrupt_file_reads_as_absent() {
        let (dir, store) = setup_file_store();

        std::fs::write(dir.path().join("favorites_pets.json"), "not json").unwrap();

        assert!(store.read_snapshot("favorites:pets").is_none());
    }

    #[test]
    fn test_file_store_empty_set_round_trips() {
        let (_dir, store) = setup_file_store();

        store.write_snapshot("favorites:pets", &ids(&[])).unwrap();

        assert_eq!(store.read_snapshot("favorites:pets"), Some(ids(&[])));
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemorySnapshotStore::new();

        store.write_snapshot("favorites:tips", &ids(&[4, 6])).unwrap();

        assert_eq!(store.read_snapshot("favorites:tips"), Some(ids(&[4, 6])));
        assert!(store.read_snapshot("favorites:pets").is_none());
    }

    #[test]
    fn test_memory_store_simulated_write_failure() {
        let store = MemorySnapshotStore::new();
        store.write_snapshot("favorites:pets", &ids(&[1])).unwrap();

        store.set_fail_writes(true);
        assert!(store.write_snapshot("favorites:pets", &ids(&[1, 2])).is_err());

        // Previous snapshot survives the failed write
        assert_eq!(store.read_snapshot("favorites:pets"), Some(ids(&[1])));

        store.set_fail_writes(false);
        store.write_snapshot("favorites:pets", &ids(&[1, 2])).unwrap();
        assert_eq!(store.read_snapshot("favorites:pets"), Some(ids(&[1, 2])));
    }
}
