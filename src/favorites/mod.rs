//! Favorites Store
//!
//! Optimistic favorite state for one catalog collection. A toggle flips
//! the in-memory set and mirrors it to the durable snapshot before
//! returning; the server confirmation runs in the background. When the
//! server disagrees its answer wins, and when it cannot be reached the
//! local state stays. Repeated toggles of one item wait for the
//! confirmation in flight, while distinct items confirm independently.

use crate::domain::{CollectionKind, ItemId};
use crate::repository::{AdoptionApi, RemoteError, SnapshotStore, ToggleReceipt};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;

#[cfg(test)]
mod tests;

/// Which tier supplied the initial active set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Fresh from the server
    Remote,
    /// Durable local snapshot, server unreachable
    Snapshot,
    /// Nothing stored anywhere
    Empty,
}

/// Outcome of [`FavoriteStore::load`]
#[derive(Debug, Clone, Copy)]
pub struct LoadReport {
    pub source: LoadSource,
    pub count: usize,
}

impl LoadReport {
    /// True when the server could not supply the set
    pub fn used_fallback(&self) -> bool {
        self.source != LoadSource::Remote
    }
}

/// Whether the last remote contact succeeded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncHealth {
    Confirmed,
    Degraded,
}

impl SyncHealth {
    pub fn is_degraded(&self) -> bool {
        matches!(self, SyncHealth::Degraded)
    }
}

/// Confirmation currently on the wire for one item
struct Flight {
    seq: u64,
    /// State the in-flight request is expected to land on
    guess: bool,
    /// Newest local intent recorded while the request was in flight
    queued: Option<bool>,
}

#[derive(Default)]
struct StoreState {
    active: HashSet<ItemId>,
    flights: HashMap<ItemId, Flight>,
    last_settled: HashMap<ItemId, u64>,
    next_seq: u64,
}

struct Inner {
    kind: CollectionKind,
    api: Arc<dyn AdoptionApi>,
    snapshots: Arc<dyn SnapshotStore>,
    state: Mutex<StoreState>,
    health: watch::Sender<SyncHealth>,
    pending: watch::Sender<usize>,
}

/// Favorite set for one collection kind
///
/// Cheap to clone; clones share the same state. Toggling spawns onto the
/// ambient tokio runtime, so call it from within one.
#[derive(Clone)]
pub struct FavoriteStore {
    inner: Arc<Inner>,
}

impl FavoriteStore {
    pub fn new(
        kind: CollectionKind,
        api: Arc<dyn AdoptionApi>,
        snapshots: Arc<dyn SnapshotStore>,
    ) -> Self {
        let (health, _) = watch::channel(SyncHealth::Confirmed);
        let (pending, _) = watch::channel(0usize);
        Self {
            inner: Arc::new(Inner {
                kind,
                api,
                snapshots,
                state: Mutex::new(StoreState::default()),
                health,
                pending,
            }),
        }
    }

    /// Populate the set from the server, falling back to the local
    /// snapshot and then to empty. Never fails; the report says which
    /// tier answered.
    pub async fn load(&self) -> LoadReport {
        let inner = &self.inner;
        match inner.api.fetch_active_set(inner.kind).await {
            Ok(remote) => {
                let count = remote.len();
                {
                    let mut state = inner.state();
                    state.active = remote;
                    inner.mirror(&state.active);
                }
                inner.set_health(SyncHealth::Confirmed);
                log::info!("{} favorites loaded from server ({} ids)", inner.kind, count);
                LoadReport {
                    source: LoadSource::Remote,
                    count,
                }
            }
            Err(e) => {
                inner.set_health(SyncHealth::Degraded);
                match inner.snapshots.read_snapshot(inner.kind.snapshot_key()) {
                    Some(saved) => {
                        let count = saved.len();
                        inner.state().active = saved;
                        log::warn!(
                            "{} favorites restored from snapshot ({} ids), server unavailable: {}",
                            inner.kind,
                            count,
                            e
                        );
                        LoadReport {
                            source: LoadSource::Snapshot,
                            count,
                        }
                    }
                    None => {
                        log::warn!(
                            "{} favorites starting empty, server unavailable: {}",
                            inner.kind,
                            e
                        );
                        LoadReport {
                            source: LoadSource::Empty,
                            count: 0,
                        }
                    }
                }
            }
        }
    }

    /// Flip one favorite and return the state it now has locally
    ///
    /// The new set is mirrored to the snapshot before this returns. The
    /// server confirmation happens in the background; while one is in
    /// flight for this item, further flips only record the newest intent.
    pub fn toggle(&self, id: ItemId) -> bool {
        let inner = &self.inner;
        let mut guard = inner.state();
        let state = &mut *guard;

        let now_active = if state.active.remove(&id) {
            false
        } else {
            state.active.insert(id);
            true
        };
        inner.mirror(&state.active);

        let mut launch = None;
        match state.flights.entry(id) {
            Entry::Occupied(mut entry) => {
                let flight = entry.get_mut();
                // landing back on the in-flight guess needs no extra
                // server flip
                flight.queued = if now_active == flight.guess {
                    None
                } else {
                    Some(now_active)
                };
            }
            Entry::Vacant(entry) => {
                state.next_seq += 1;
                let seq = state.next_seq;
                entry.insert(Flight {
                    seq,
                    guess: now_active,
                    queued: None,
                });
                launch = Some(seq);
            }
        }
        drop(guard);

        if let Some(seq) = launch {
            Arc::clone(inner).spawn_confirm(id, seq, now_active);
        }
        now_active
    }

    /// Synchronous membership check against the in-memory set
    pub fn is_active(&self, id: ItemId) -> bool {
        self.inner.state().active.contains(&id)
    }

    /// Copy of the current active set
    pub fn active_ids(&self) -> HashSet<ItemId> {
        self.inner.state().active.clone()
    }

    pub fn active_count(&self) -> usize {
        self.inner.state().active.len()
    }

    pub fn sync_health(&self) -> SyncHealth {
        *self.inner.health.borrow()
    }

    /// Subscribe to sync health transitions
    pub fn watch_health(&self) -> watch::Receiver<SyncHealth> {
        self.inner.health.subscribe()
    }

    /// Wait until every confirmation issued so far has settled
    pub async fn flush(&self) {
        let mut pending = self.inner.pending.subscribe();
        let _ = pending.wait_for(|count| *count == 0).await;
    }
}

impl Inner {
    fn state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Best-effort snapshot write; a failure leaves this session
    /// memory-only and is not surfaced to the caller
    fn mirror(&self, active: &HashSet<ItemId>) {
        if let Err(e) = self.snapshots.write_snapshot(self.kind.snapshot_key(), active) {
            log::warn!("{} favorites kept in memory only: {}", self.kind, e);
        }
    }

    fn set_health(&self, next: SyncHealth) {
        let prev = self.health.send_replace(next);
        if prev != next {
            match next {
                SyncHealth::Degraded => {
                    log::warn!("{} favorites syncing degraded, changes kept locally", self.kind)
                }
                SyncHealth::Confirmed => {
                    log::info!("{} favorites syncing restored", self.kind)
                }
            }
        }
    }

    fn spawn_confirm(self: Arc<Self>, id: ItemId, seq: u64, guess: bool) {
        self.pending.send_modify(|count| *count += 1);
        tokio::spawn(async move {
            let result = self.api.confirm_toggle(self.kind, id).await;
            if let Some((next, desired)) = self.settle(id, seq, guess, result) {
                Arc::clone(&self).spawn_confirm(id, next, desired);
            }
            self.pending.send_modify(|count| *count -= 1);
        });
    }

    /// Apply one confirmation outcome under its sequence number. Returns
    /// the follow-up confirmation to issue, if an intent was queued while
    /// this one was in flight.
    fn settle(
        &self,
        id: ItemId,
        seq: u64,
        guess: bool,
        result: Result<ToggleReceipt, RemoteError>,
    ) -> Option<(u64, bool)> {
        let mut guard = self.state();
        let state = &mut *guard;

        if state.last_settled.get(&id).copied().unwrap_or(0) >= seq {
            // a newer settlement already applied for this item
            return None;
        }
        state.last_settled.insert(id, seq);

        let flight = state.flights.remove(&id)?;

        let mut launch = None;
        match result {
            Ok(receipt) => {
                self.set_health(SyncHealth::Confirmed);
                match flight.queued {
                    Some(desired) if desired != receipt.active => {
                        // settled state is the baseline for the next flip
                        state.next_seq += 1;
                        let next = state.next_seq;
                        state.flights.insert(
                            id,
                            Flight {
                                seq: next,
                                guess: desired,
                                queued: None,
                            },
                        );
                        launch = Some((next, desired));
                    }
                    Some(_) => {
                        // server already sits where the newest intent
                        // wants it
                    }
                    None if receipt.active != guess => {
                        // another session moved it meanwhile; the
                        // server's answer wins
                        log::info!(
                            "{} favorite {} reconciled to server state ({})",
                            self.kind,
                            id,
                            receipt.active
                        );
                        if receipt.active {
                            state.active.insert(id);
                        } else {
                            state.active.remove(&id);
                        }
                    }
                    None => {}
                }
            }
            Err(e) => {
                log::warn!(
                    "{} favorite {} not confirmed, keeping local state: {}",
                    self.kind,
                    id,
                    e
                );
                self.set_health(SyncHealth::Degraded);
            }
        }

        self.mirror(&state.active);
        launch
    }
}
