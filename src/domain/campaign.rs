//! Campaign Entity
//!
//! A shelter campaign visitors can join. Participation is confirmed by the
//! backend and is not part of the optimistic favorites flow.

use super::entity::{Entity, ItemId};
use super::wire;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a campaign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CampaignStatus {
    #[default]
    #[serde(rename = "ACTIVA")]
    Active,
    #[serde(rename = "PAUSADA")]
    Paused,
    #[serde(rename = "FINALIZADA")]
    Finished,
}

impl CampaignStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Active => "ACTIVA",
            CampaignStatus::Paused => "PAUSADA",
            CampaignStatus::Finished => "FINALIZADA",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CampaignStatus::Active => "Activa",
            CampaignStatus::Paused => "Pausada",
            CampaignStatus::Finished => "Finalizada",
        }
    }
}

/// Metric a campaign tracks toward its goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalKind {
    #[serde(rename = "PARTICIPANTES")]
    Participants,
    #[serde(rename = "ADOPCIONES")]
    Adoptions,
    #[serde(rename = "DONACIONES")]
    Donations,
    #[serde(rename = "VISITAS")]
    Visits,
}

/// A campaign as served by the catalog endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    /// Unique identifier
    pub id: ItemId,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "estado", default, deserialize_with = "wire::lenient_or_default")]
    pub status: CampaignStatus,
    #[serde(rename = "fecha_inicio", default, deserialize_with = "wire::lenient")]
    pub starts_on: Option<chrono::NaiveDate>,
    #[serde(rename = "fecha_fin", default, deserialize_with = "wire::lenient")]
    pub ends_on: Option<chrono::NaiveDate>,
    #[serde(rename = "tipo_kpi", default, deserialize_with = "wire::lenient")]
    pub goal_kind: Option<GoalKind>,
    /// Target value for the tracked metric
    #[serde(rename = "meta_kpi", default)]
    pub goal_target: i64,
    #[serde(rename = "valor_actual_kpi", default)]
    pub goal_current: i64,
    /// Shelter display name
    #[serde(rename = "refugio_nombre", default)]
    pub shelter: Option<String>,
    /// Whether the signed-in visitor already participates
    #[serde(rename = "usuario_participa", default)]
    pub participating: bool,
}

impl Campaign {
    pub fn is_active(&self) -> bool {
        self.status == CampaignStatus::Active
    }

    /// Progress toward the goal, clamped to 0..=100
    pub fn progress_percent(&self) -> u8 {
        if self.goal_target <= 0 {
            return 0;
        }
        let pct = self.goal_current.saturating_mul(100) / self.goal_target;
        pct.clamp(0, 100) as u8
    }
}

impl Entity for Campaign {
    type Id = ItemId;

    fn id(&self) -> Self::Id {
        self.id
    }
}
