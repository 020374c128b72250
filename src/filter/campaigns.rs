//! Campaign Filter
//!
//! Free text is matched against title and description. Status compares
//! by code. Campaigns have no favorites, so there is no membership
//! criterion.

use super::{contains_fold, effective_query, Filtered};
use crate::domain::{Campaign, CampaignStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignFilter {
    /// Free-text query, blank means no text criterion
    pub query: String,
    /// Exact lifecycle state
    pub status: Option<CampaignStatus>,
}

impl CampaignFilter {
    /// Narrow `campaigns` to the ones matching every active criterion
    pub fn apply(&self, campaigns: &[Campaign]) -> Filtered<Campaign> {
        let query = effective_query(&self.query);
        let criteria_active = query.is_some() || self.status.is_some();

        let items = campaigns
            .iter()
            .filter(|campaign| self.matches(campaign, query.as_deref()))
            .cloned()
            .collect();

        Filtered {
            items,
            criteria_active,
        }
    }

    fn matches(&self, campaign: &Campaign, query: Option<&str>) -> bool {
        if let Some(status) = self.status {
            if campaign.status != status {
                return false;
            }
        }

        if let Some(q) = query {
            let matched =
                contains_fold(&campaign.title, q) || contains_fold(&campaign.description, q);
            if !matched {
                return false;
            }
        }

        true
    }
}
