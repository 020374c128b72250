//! Session Facade
//!
//! Owns the remote client, the snapshot store and one favorites store
//! per collection kind. An embedding UI builds one session at sign-in
//! and routes every catalog and favorites call through it.

use crate::config::ClientConfig;
use crate::domain::{Campaign, CollectionKind, DomainError, DomainResult, ItemId, Pet, Tip};
use crate::favorites::{FavoriteStore, LoadReport};
use crate::repository::{
    AdoptionApi, FileSnapshotStore, HttpApi, ParticipationOutcome, RemoteError, SnapshotStore,
};
use serde::Serialize;
use std::sync::Arc;

/// What each favorites store loaded from at session start
#[derive(Debug, Clone, Copy)]
pub struct ConnectReport {
    pub pets: LoadReport,
    pub tips: LoadReport,
}

impl ConnectReport {
    /// True when any favorite set came from a fallback tier
    pub fn used_fallback(&self) -> bool {
        self.pets.used_fallback() || self.tips.used_fallback()
    }
}

/// Counters shown on the visitor dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub favorite_pets: usize,
    pub saved_tips: usize,
    pub active_campaigns: usize,
}

/// One signed-in visitor's client state
pub struct Session {
    api: Arc<dyn AdoptionApi>,
    pet_favorites: FavoriteStore,
    tip_favorites: FavoriteStore,
}

impl Session {
    /// Build a session against the live backend from configuration
    pub fn new(config: &ClientConfig) -> DomainResult<Self> {
        let api: Arc<dyn AdoptionApi> = Arc::new(HttpApi::new(config)?);
        let snapshots: Arc<dyn SnapshotStore> =
            Arc::new(FileSnapshotStore::new(&config.data_dir));
        Ok(Self::with_stores(api, snapshots))
    }

    /// Build a session over caller-supplied backends
    pub fn with_stores(api: Arc<dyn AdoptionApi>, snapshots: Arc<dyn SnapshotStore>) -> Self {
        let pet_favorites =
            FavoriteStore::new(CollectionKind::Pets, api.clone(), snapshots.clone());
        let tip_favorites = FavoriteStore::new(CollectionKind::Tips, api.clone(), snapshots);
        Self {
            api,
            pet_favorites,
            tip_favorites,
        }
    }

    /// Load both favorite sets. Infallible; the report says which tier
    /// supplied each set.
    pub async fn connect(&self) -> ConnectReport {
        ConnectReport {
            pets: self.pet_favorites.load().await,
            tips: self.tip_favorites.load().await,
        }
    }

    pub fn pet_favorites(&self) -> &FavoriteStore {
        &self.pet_favorites
    }

    pub fn tip_favorites(&self) -> &FavoriteStore {
        &self.tip_favorites
    }

    /// Flip a pet favorite, returning its new local state
    pub fn toggle_pet_favorite(&self, id: ItemId) -> bool {
        self.pet_favorites.toggle(id)
    }

    /// Flip a tip favorite, returning its new local state
    pub fn toggle_tip_favorite(&self, id: ItemId) -> bool {
        self.tip_favorites.toggle(id)
    }

    /// Adoptable pets, fetched fresh for the calling view
    pub async fn pets(&self) -> DomainResult<Vec<Pet>> {
        self.api.list_pets().await.map_err(list_error)
    }

    /// Published care tips, fetched fresh for the calling view
    pub async fn tips(&self) -> DomainResult<Vec<Tip>> {
        self.api.list_tips().await.map_err(list_error)
    }

    /// Campaigns open to this visitor, fetched fresh for the calling view
    pub async fn campaigns(&self) -> DomainResult<Vec<Campaign>> {
        self.api.list_campaigns().await.map_err(list_error)
    }

    /// Submit an adoption request for a pet
    pub async fn request_adoption(&self, pet_id: ItemId, message: &str) -> DomainResult<()> {
        self.api.request_adoption(pet_id, message).await
    }

    pub async fn join_campaign(&self, id: ItemId) -> DomainResult<ParticipationOutcome> {
        self.api.join_campaign(id).await
    }

    pub async fn cancel_participation(&self, id: ItemId) -> DomainResult<()> {
        self.api.cancel_participation(id).await
    }

    /// Dashboard counters. Favorite counts read the local stores; an
    /// unreachable campaign listing counts as zero.
    pub async fn dashboard_stats(&self) -> DashboardStats {
        let active_campaigns = match self.api.list_campaigns().await {
            Ok(campaigns) => campaigns.iter().filter(|c| c.is_active()).count(),
            Err(e) => {
                log::warn!("campaign count unavailable: {}", e);
                0
            }
        };

        DashboardStats {
            favorite_pets: self.pet_favorites.active_count(),
            saved_tips: self.tip_favorites.active_count(),
            active_campaigns,
        }
    }

    /// Wait for outstanding favorite confirmations, for orderly shutdown
    pub async fn flush(&self) {
        self.pet_favorites.flush().await;
        self.tip_favorites.flush().await;
    }
}

fn list_error(err: RemoteError) -> DomainError {
    match err {
        RemoteError::Unreachable(msg) => DomainError::Unavailable(msg),
        other => DomainError::Internal(other.to_string()),
    }
}
