//! Favorites Store Tests
//!
//! Exercises the optimistic toggle protocol against a scripted in-process
//! server. Confirmations can be held at a gate and released by the test,
//! so settlement order is controlled without timing assumptions.

#[cfg(test)]
mod tests {
    use crate::domain::{Campaign, CollectionKind, DomainResult, ItemId, Pet, Tip};
    use crate::favorites::{FavoriteStore, LoadSource, SyncHealth};
    use crate::repository::{
        AdoptionApi, MemorySnapshotStore, ParticipationOutcome, RemoteError, SnapshotStore,
        ToggleReceipt,
    };
    use async_trait::async_trait;
    use std::collections::{HashSet, VecDeque};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::sync::Notify;

    /// In-process stand-in for the platform API. Keeps its own favorite
    /// set and flips it on each confirmation, like the real toggle
    /// endpoint does.
    struct ScriptedApi {
        server: Mutex<HashSet<ItemId>>,
        fail_fetch: AtomicBool,
        fail_confirms: AtomicBool,
        gates: Mutex<VecDeque<Arc<Notify>>>,
        confirm_calls: AtomicUsize,
    }

    impl ScriptedApi {
        fn new() -> Self {
            Self {
                server: Mutex::new(HashSet::new()),
                fail_fetch: AtomicBool::new(false),
                fail_confirms: AtomicBool::new(false),
                gates: Mutex::new(VecDeque::new()),
                confirm_calls: AtomicUsize::new(0),
            }
        }

        fn seed_server(&self, ids: &[ItemId]) {
            *self.server.lock().unwrap() = ids.iter().copied().collect();
        }

        fn server_ids(&self) -> HashSet<ItemId> {
            self.server.lock().unwrap().clone()
        }

        fn set_fail_fetch(&self, fail: bool) {
            self.fail_fetch.store(fail, Ordering::SeqCst);
        }

        fn set_fail_confirms(&self, fail: bool) {
            self.fail_confirms.store(fail, Ordering::SeqCst);
        }

        /// Queue a gate; the next confirmation blocks on it until the
        /// test calls `notify_one`
        fn hold_next_confirm(&self) -> Arc<Notify> {
            let gate = Arc::new(Notify::new());
            self.gates.lock().unwrap().push_back(gate.clone());
            gate
        }

        fn waiting_gates(&self) -> usize {
            self.gates.lock().unwrap().len()
        }

        fn confirm_calls(&self) -> usize {
            self.confirm_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AdoptionApi for ScriptedApi {
        async fn fetch_active_set(
            &self,
            _kind: CollectionKind,
        ) -> Result<HashSet<ItemId>, RemoteError> {
            if self.fail_fetch.load(Ordering::SeqCst) {
                return Err(RemoteError::Unreachable("scripted outage".to_string()));
            }
            Ok(self.server_ids())
        }

        async fn confirm_toggle(
            &self,
            _kind: CollectionKind,
            id: ItemId,
        ) -> Result<ToggleReceipt, RemoteError> {
            let gate = self.gates.lock().unwrap().pop_front();
            if let Some(gate) = gate {
                gate.notified().await;
            }
            self.confirm_calls.fetch_add(1, Ordering::SeqCst);

            if self.fail_confirms.load(Ordering::SeqCst) {
                return Err(RemoteError::Unreachable("scripted outage".to_string()));
            }

            let mut server = self.server.lock().unwrap();
            let active = if server.remove(&id) {
                false
            } else {
                server.insert(id);
                true
            };
            Ok(ToggleReceipt { id, active })
        }

        async fn list_pets(&self) -> Result<Vec<Pet>, RemoteError> {
            Ok(Vec::new())
        }

        async fn list_tips(&self) -> Result<Vec<Tip>, RemoteError> {
            Ok(Vec::new())
        }

        async fn list_campaigns(&self) -> Result<Vec<Campaign>, RemoteError> {
            Ok(Vec::new())
        }

        async fn request_adoption(&self, _pet_id: ItemId, _message: &str) -> DomainResult<()> {
            Ok(())
        }

        async fn join_campaign(&self, _id: ItemId) -> DomainResult<ParticipationOutcome> {
            Ok(ParticipationOutcome::Joined)
        }

        async fn cancel_participation(&self, _id: ItemId) -> DomainResult<()> {
            Ok(())
        }
    }

    fn setup() -> (Arc<ScriptedApi>, Arc<MemorySnapshotStore>, FavoriteStore) {
        let api = Arc::new(ScriptedApi::new());
        let snapshots = Arc::new(MemorySnapshotStore::new());
        let store = FavoriteStore::new(CollectionKind::Pets, api.clone(), snapshots.clone());
        (api, snapshots, store)
    }

    fn snapshot_ids(snapshots: &MemorySnapshotStore) -> Option<HashSet<ItemId>> {
        snapshots.read_snapshot(CollectionKind::Pets.snapshot_key())
    }

    /// Let spawned confirmation tasks run up to their next await point
    async fn drain_tasks() {
        for _ in 0..16 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_toggle_is_visible_before_confirmation() {
        let (api, _snapshots, store) = setup();
        let gate = api.hold_next_confirm();

        assert!(store.toggle(3));
        assert!(store.is_active(3));

        gate.notify_one();
        store.flush().await;

        assert!(store.is_active(3));
        assert_eq!(api.server_ids(), [3].into_iter().collect());
    }

    #[tokio::test]
    async fn test_toggle_off_after_load() {
        let (api, snapshots, store) = setup();
        api.seed_server(&[4]);

        let report = store.load().await;
        assert_eq!(report.source, LoadSource::Remote);
        assert_eq!(report.count, 1);

        assert!(!store.toggle(4));
        store.flush().await;

        assert!(!store.is_active(4));
        assert!(api.server_ids().is_empty());
        assert_eq!(snapshot_ids(&snapshots), Some(HashSet::new()));
    }

    #[tokio::test]
    async fn test_rapid_double_toggle_settles_to_original() {
        let (api, snapshots, store) = setup();
        let gate = api.hold_next_confirm();

        assert!(store.toggle(7));
        assert!(!store.toggle(7));
        assert!(!store.is_active(7));

        gate.notify_one();
        store.flush().await;

        assert!(!store.is_active(7));
        assert!(api.server_ids().is_empty());
        assert_eq!(snapshot_ids(&snapshots), Some(HashSet::new()));
        // the first flip plus the queued counter-flip
        assert_eq!(api.confirm_calls(), 2);
    }

    #[tokio::test]
    async fn test_triple_toggle_coalesces_queued_intent() {
        let (api, _snapshots, store) = setup();
        let gate = api.hold_next_confirm();

        assert!(store.toggle(4));
        assert!(!store.toggle(4));
        assert!(store.toggle(4));

        gate.notify_one();
        store.flush().await;

        assert!(store.is_active(4));
        assert_eq!(api.server_ids(), [4].into_iter().collect());
        // intent landed back on the in-flight guess, no second call
        assert_eq!(api.confirm_calls(), 1);
    }

    #[tokio::test]
    async fn test_failed_confirmation_keeps_local_state() {
        let (api, snapshots, store) = setup();
        api.set_fail_confirms(true);

        assert!(store.toggle(5));
        store.flush().await;

        assert!(store.is_active(5));
        assert_eq!(snapshot_ids(&snapshots), Some([5].into_iter().collect()));
        assert!(store.sync_health().is_degraded());
        assert!(api.server_ids().is_empty());
    }

    #[tokio::test]
    async fn test_confirmation_disagreement_adopts_server_state() {
        let (api, snapshots, store) = setup();
        // another session already favorited 5, so our flip removes it
        api.seed_server(&[5]);

        assert!(store.toggle(5));
        store.flush().await;

        assert!(!store.is_active(5));
        assert!(api.server_ids().is_empty());
        assert_eq!(snapshot_ids(&snapshots), Some(HashSet::new()));
    }

    #[tokio::test]
    async fn test_load_prefers_server_and_updates_snapshot() {
        let (api, snapshots, store) = setup();
        api.seed_server(&[2, 9]);
        snapshots
            .write_snapshot(CollectionKind::Pets.snapshot_key(), &[1].into_iter().collect())
            .unwrap();

        let report = store.load().await;

        assert_eq!(report.source, LoadSource::Remote);
        assert!(!report.used_fallback());
        assert_eq!(report.count, 2);
        assert!(store.is_active(2));
        assert!(!store.is_active(1));
        assert_eq!(snapshot_ids(&snapshots), Some([2, 9].into_iter().collect()));
    }

    #[tokio::test]
    async fn test_load_falls_back_to_snapshot_when_offline() {
        let (api, snapshots, store) = setup();
        api.set_fail_fetch(true);
        snapshots
            .write_snapshot(CollectionKind::Pets.snapshot_key(), &[1, 6].into_iter().collect())
            .unwrap();

        let report = store.load().await;

        assert_eq!(report.source, LoadSource::Snapshot);
        assert!(report.used_fallback());
        assert_eq!(report.count, 2);
        assert!(store.is_active(1));
        assert!(store.is_active(6));
        assert!(store.sync_health().is_degraded());
    }

    #[tokio::test]
    async fn test_load_starts_empty_when_nothing_stored() {
        let (api, _snapshots, store) = setup();
        api.set_fail_fetch(true);

        let report = store.load().await;

        assert_eq!(report.source, LoadSource::Empty);
        assert!(report.used_fallback());
        assert_eq!(report.count, 0);
        assert!(!store.is_active(1));
        assert_eq!(store.active_count(), 0);
    }

    #[tokio::test]
    async fn test_distinct_items_confirm_independently() {
        let (api, _snapshots, store) = setup();
        let first = api.hold_next_confirm();
        let second = api.hold_next_confirm();

        assert!(store.toggle(1));
        assert!(store.toggle(2));
        drain_tasks().await;

        // both confirmations reached the server without waiting on each
        // other
        assert_eq!(api.waiting_gates(), 0);

        first.notify_one();
        second.notify_one();
        store.flush().await;

        assert_eq!(api.server_ids(), [1, 2].into_iter().collect());
        assert_eq!(api.confirm_calls(), 2);
    }

    #[tokio::test]
    async fn test_snapshot_write_failure_is_not_fatal() {
        let (api, snapshots, store) = setup();
        snapshots.set_fail_writes(true);

        assert!(store.toggle(3));
        store.flush().await;

        assert!(store.is_active(3));
        assert_eq!(api.server_ids(), [3].into_iter().collect());
        assert!(snapshot_ids(&snapshots).is_none());
    }

    #[tokio::test]
    async fn test_health_recovers_after_successful_confirmation() {
        let (api, _snapshots, store) = setup();
        let mut health = store.watch_health();

        api.set_fail_confirms(true);
        store.toggle(1);
        store.flush().await;
        assert_eq!(store.sync_health(), SyncHealth::Degraded);

        api.set_fail_confirms(false);
        store.toggle(2);
        store.flush().await;
        assert_eq!(store.sync_health(), SyncHealth::Confirmed);

        // the watcher observed the latest transition
        assert!(health.has_changed().unwrap());
        assert_eq!(*health.borrow_and_update(), SyncHealth::Confirmed);
    }
}
