//! Tip Entity
//!
//! A care article published by a shelter.

use super::entity::{Entity, ItemId};
use super::wire;
use serde::{Deserialize, Serialize};

/// Editorial category of a tip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TipCategory {
    #[serde(rename = "SALUD")]
    Health,
    #[serde(rename = "NUTRICION")]
    Nutrition,
    #[serde(rename = "COMPORTAMIENTO")]
    Behavior,
    #[serde(rename = "ADIESTRAMIENTO")]
    Training,
    #[serde(rename = "HIGIENE")]
    Grooming,
    #[default]
    #[serde(rename = "GENERAL")]
    General,
}

impl TipCategory {
    /// Wire code used by the backend
    pub fn as_str(&self) -> &'static str {
        match self {
            TipCategory::Health => "SALUD",
            TipCategory::Nutrition => "NUTRICION",
            TipCategory::Behavior => "COMPORTAMIENTO",
            TipCategory::Training => "ADIESTRAMIENTO",
            TipCategory::Grooming => "HIGIENE",
            TipCategory::General => "GENERAL",
        }
    }

    /// Human-readable label shown in listings
    pub fn label(&self) -> &'static str {
        match self {
            TipCategory::Health => "Salud",
            TipCategory::Nutrition => "Nutrición",
            TipCategory::Behavior => "Comportamiento",
            TipCategory::Training => "Adiestramiento",
            TipCategory::Grooming => "Higiene",
            TipCategory::General => "General",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "SALUD" => TipCategory::Health,
            "NUTRICION" => TipCategory::Nutrition,
            "COMPORTAMIENTO" => TipCategory::Behavior,
            "ADIESTRAMIENTO" => TipCategory::Training,
            "HIGIENE" => TipCategory::Grooming,
            _ => TipCategory::General,
        }
    }
}

/// A care article as served by the catalog endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tip {
    /// Unique identifier
    pub id: ItemId,
    #[serde(rename = "titulo")]
    pub title: String,
    /// Article body, plain text
    #[serde(rename = "contenido", default)]
    pub body: String,
    #[serde(rename = "categoria", default, deserialize_with = "wire::lenient_or_default")]
    pub category: TipCategory,
    /// Species the advice applies to, absent when general
    #[serde(rename = "tipo_animal_nombre", default)]
    pub species: Option<String>,
    /// Shelter display name
    #[serde(rename = "refugio_nombre", default)]
    pub shelter: Option<String>,
    #[serde(rename = "publicado", default)]
    pub published: bool,
    #[serde(rename = "created_at", default, deserialize_with = "wire::lenient")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Entity for Tip {
    type Id = ItemId;

    fn id(&self) -> Self::Id {
        self.id
    }
}
