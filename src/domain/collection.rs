//! Collection Kind
//!
//! Selects which favorites set a store manages. Each kind owns a fixed
//! durable snapshot key; the keys are part of the on-disk contract and
//! must not change between releases.

use serde::{Deserialize, Serialize};

/// Catalog collections that support favorites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    Pets,
    Tips,
}

impl CollectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKind::Pets => "pets",
            CollectionKind::Tips => "tips",
        }
    }

    /// Key under which this kind's active set is persisted locally
    pub fn snapshot_key(&self) -> &'static str {
        match self {
            CollectionKind::Pets => "favorites:pets",
            CollectionKind::Tips => "favorites:tips",
        }
    }
}

impl std::fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
