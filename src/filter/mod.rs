//! Filter Engine
//!
//! Pure, deterministic narrowing of fetched collections. Criteria are
//! plain data built from user input; applying them never mutates the
//! source and preserves its order, so a view can recompute the visible
//! subset on every change.

use crate::domain::Entity;

mod campaigns;
mod pets;
mod tips;

pub use campaigns::CampaignFilter;
pub use pets::PetFilter;
pub use tips::TipFilter;

/// Result of one filter pass
#[derive(Debug, Clone)]
pub struct Filtered<T> {
    /// Retained items in source order
    pub items: Vec<T>,
    /// Whether any criterion narrowed the view
    pub criteria_active: bool,
}

impl<T> Filtered<T> {
    /// Number of retained items
    pub fn matched(&self) -> usize {
        self.items.len()
    }
}

impl<T: Entity> Filtered<T> {
    /// Ids of the retained items, in order (view row keys)
    pub fn ids(&self) -> Vec<T::Id> {
        self.items.iter().map(|item| item.id()).collect()
    }
}

/// Case-insensitive substring test; the needle must already be lowercased
pub(crate) fn contains_fold(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Normalized free-text query, or None when blank
pub(crate) fn effective_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}
