//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access: the remote platform
//! API and the durable local snapshot store. Implementations can use
//! HTTP, files, in-memory, etc.

use crate::domain::{Campaign, CollectionKind, DomainResult, ItemId, Pet, Tip};
use async_trait::async_trait;
use std::collections::HashSet;

/// Failure talking to the remote platform
#[derive(Debug, Clone)]
pub enum RemoteError {
    /// Connection refused, DNS failure, timeout
    Unreachable(String),
    /// Server replied with a non-success status
    Status(u16),
    /// Body did not match the expected shape
    Decode(String),
}

impl RemoteError {
    /// True when the server answered but refused the request
    pub fn is_rejection(&self) -> bool {
        matches!(self, RemoteError::Status(code) if (400..500).contains(code))
    }
}

impl std::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemoteError::Unreachable(msg) => write!(f, "remote unreachable: {}", msg),
            RemoteError::Status(code) => write!(f, "remote returned status {}", code),
            RemoteError::Decode(msg) => write!(f, "remote payload malformed: {}", msg),
        }
    }
}

impl std::error::Error for RemoteError {}

/// Failure persisting a local snapshot
#[derive(Debug)]
pub enum SnapshotError {
    Io(String),
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotError::Io(msg) => write!(f, "snapshot write failed: {}", msg),
        }
    }
}

impl std::error::Error for SnapshotError {}

/// Server-confirmed result of a favorite toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleReceipt {
    pub id: ItemId,
    /// State the item ended up in on the server
    pub active: bool,
}

/// Result of asking to join a campaign
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipationOutcome {
    Joined,
    AlreadyJoined,
    NotActive,
}

/// Remote platform API as seen by this client
///
/// The toggle endpoint is a server-side flip: it creates the favorite when
/// absent and deletes it when present, reporting the state it left behind.
#[async_trait]
pub trait AdoptionApi: Send + Sync {
    /// Fetch the ids currently marked as favorites for the signed-in user
    async fn fetch_active_set(&self, kind: CollectionKind) -> Result<HashSet<ItemId>, RemoteError>;

    /// Flip one favorite on the server and report the resulting state
    async fn confirm_toggle(
        &self,
        kind: CollectionKind,
        id: ItemId,
    ) -> Result<ToggleReceipt, RemoteError>;

    /// List adoptable pets visible to the signed-in user
    async fn list_pets(&self) -> Result<Vec<Pet>, RemoteError>;

    /// List published care tips
    async fn list_tips(&self) -> Result<Vec<Tip>, RemoteError>;

    /// List campaigns open to the signed-in user
    async fn list_campaigns(&self) -> Result<Vec<Campaign>, RemoteError>;

    /// Submit an adoption request for a pet
    async fn request_adoption(&self, pet_id: ItemId, message: &str) -> DomainResult<()>;

    /// Join a campaign
    async fn join_campaign(&self, id: ItemId) -> DomainResult<ParticipationOutcome>;

    /// Withdraw from a campaign
    async fn cancel_participation(&self, id: ItemId) -> DomainResult<()>;
}

/// Durable key-value store for favorite id sets
///
/// Reads degrade to absent on any problem; writes report failure so the
/// caller can log it, but callers never treat it as fatal. Operations are
/// synchronous so a toggle can mirror its state before returning.
pub trait SnapshotStore: Send + Sync {
    /// Read the set stored under `key`, or None when missing or unreadable
    fn read_snapshot(&self, key: &str) -> Option<HashSet<ItemId>>;

    /// Replace the set stored under `key`
    fn write_snapshot(&self, key: &str, ids: &HashSet<ItemId>) -> Result<(), SnapshotError>;
}
