//! Kopets Client Core
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Remote API and snapshot store abstractions and implementations
//! - favorites: Optimistic favorite state with background reconciliation
//! - filter: In-memory catalog narrowing
//! - session: Facade wiring the layers together for an embedding UI

pub mod config;
pub mod domain;
pub mod favorites;
pub mod filter;
pub mod repository;
pub mod session;

pub use config::ClientConfig;
pub use domain::{Campaign, CollectionKind, DomainError, DomainResult, ItemId, Pet, Tip};
pub use favorites::{FavoriteStore, LoadReport, LoadSource, SyncHealth};
pub use filter::{CampaignFilter, Filtered, PetFilter, TipFilter};
pub use repository::{AdoptionApi, ParticipationOutcome, SnapshotStore};
pub use session::{ConnectReport, DashboardStats, Session};
