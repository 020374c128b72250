//! Pet Filter
//!
//! Free text is matched against name, breed, species, color and the size
//! label. Size compares by code, color by case-insensitive label. All
//! criteria combine with AND.

use super::{contains_fold, effective_query, Filtered};
use crate::domain::{ItemId, Pet, PetSize};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PetFilter {
    /// Free-text query, blank means no text criterion
    pub query: String,
    /// Exact size class
    pub size: Option<PetSize>,
    /// Coat color label, compared case-insensitively
    pub color: Option<String>,
    /// Keep only ids in the caller's favorite set
    pub favorites_only: bool,
}

impl PetFilter {
    /// Narrow `pets` to the ones matching every active criterion
    pub fn apply(&self, pets: &[Pet], favorites: &HashSet<ItemId>) -> Filtered<Pet> {
        let query = effective_query(&self.query);
        let color = self
            .color
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_lowercase);

        let criteria_active =
            query.is_some() || self.size.is_some() || color.is_some() || self.favorites_only;

        let items = pets
            .iter()
            .filter(|pet| self.matches(pet, query.as_deref(), color.as_deref(), favorites))
            .cloned()
            .collect();

        Filtered {
            items,
            criteria_active,
        }
    }

    fn matches(
        &self,
        pet: &Pet,
        query: Option<&str>,
        color: Option<&str>,
        favorites: &HashSet<ItemId>,
    ) -> bool {
        if self.favorites_only && !favorites.contains(&pet.id) {
            return false;
        }

        if let Some(size) = self.size {
            if pet.size != Some(size) {
                return false;
            }
        }

        if let Some(color) = color {
            let matched = pet
                .color
                .as_deref()
                .map_or(false, |c| c.trim().to_lowercase() == color);
            if !matched {
                return false;
            }
        }

        if let Some(q) = query {
            if !text_fields_match(pet, q) {
                return false;
            }
        }

        true
    }
}

fn text_fields_match(pet: &Pet, q: &str) -> bool {
    contains_fold(&pet.name, q)
        || pet.breed.as_deref().map_or(false, |b| contains_fold(b, q))
        || pet.species.as_deref().map_or(false, |s| contains_fold(s, q))
        || pet.color.as_deref().map_or(false, |c| contains_fold(c, q))
        || pet.size.map_or(false, |s| contains_fold(s.label(), q))
}
