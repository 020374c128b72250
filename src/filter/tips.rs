//! Tip Filter
//!
//! Free text is matched against title, body and the category label.
//! Category compares by code.

use super::{contains_fold, effective_query, Filtered};
use crate::domain::{ItemId, Tip, TipCategory};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TipFilter {
    /// Free-text query, blank means no text criterion
    pub query: String,
    /// Exact category
    pub category: Option<TipCategory>,
    /// Keep only ids in the caller's favorite set
    pub favorites_only: bool,
}

impl TipFilter {
    /// Narrow `tips` to the ones matching every active criterion
    pub fn apply(&self, tips: &[Tip], favorites: &HashSet<ItemId>) -> Filtered<Tip> {
        let query = effective_query(&self.query);
        let criteria_active = query.is_some() || self.category.is_some() || self.favorites_only;

        let items = tips
            .iter()
            .filter(|tip| self.matches(tip, query.as_deref(), favorites))
            .cloned()
            .collect();

        Filtered {
            items,
            criteria_active,
        }
    }

    fn matches(&self, tip: &Tip, query: Option<&str>, favorites: &HashSet<ItemId>) -> bool {
        if self.favorites_only && !favorites.contains(&tip.id) {
            return false;
        }

        if let Some(category) = self.category {
            if tip.category != category {
                return false;
            }
        }

        if let Some(q) = query {
            let matched = contains_fold(&tip.title, q)
                || contains_fold(&tip.body, q)
                || contains_fold(tip.category.label(), q);
            if !matched {
                return false;
            }
        }

        true
    }
}
