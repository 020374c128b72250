//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO external dependencies (except serde for serialization).

mod campaign;
mod collection;
mod entity;
mod pet;
mod tip;
pub(crate) mod wire;

pub use campaign::{Campaign, CampaignStatus, GoalKind};
pub use collection::CollectionKind;
pub use entity::{DomainError, DomainResult, Entity, ItemId};
pub use pet::{EnergyLevel, Pet, PetAge, PetSize, PetStatus};
pub use tip::{Tip, TipCategory};
