//! HTTP Remote API
//!
//! reqwest-backed implementation of [`AdoptionApi`] against the platform's
//! REST backend. List endpoints are served either as a plain JSON array or
//! as a paginated `{"results": [...]}` object depending on server
//! configuration; both shapes decode here.

use super::traits::{AdoptionApi, ParticipationOutcome, RemoteError, ToggleReceipt};
use crate::config::ClientConfig;
use crate::domain::{
    Campaign, CollectionKind, DomainError, DomainResult, ItemId, Pet, Tip,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashSet;
use std::time::Duration;

/// Either wire shape of a list endpoint
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListEnvelope<T> {
    Plain(Vec<T>),
    Paginated { results: Vec<T> },
}

impl<T> ListEnvelope<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            ListEnvelope::Plain(items) => items,
            ListEnvelope::Paginated { results } => results,
        }
    }
}

/// One row of the pet favorites listing; `mascota` is the pet id
#[derive(Debug, Deserialize)]
struct PetFavoriteRow {
    mascota: ItemId,
}

/// One row of the tip favorites listing; `tip` is the tip id
#[derive(Debug, Deserialize)]
struct TipFavoriteRow {
    tip: ItemId,
}

#[derive(Debug, Deserialize)]
struct ToggleResponse {
    favorito: bool,
}

/// Error body shape used by the backend (`error` or `detail`)
#[derive(Debug, Deserialize, Default)]
struct ApiErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

impl ApiErrorBody {
    fn message(self) -> Option<String> {
        self.error.or(self.detail)
    }
}

/// HTTP client for the adoption platform
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpApi {
    pub fn new(config: &ClientConfig) -> DomainResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.access_token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, RemoteError> {
        let response = self
            .authed(self.client.get(self.url(path)))
            .send()
            .await
            .map_err(send_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status.as_u16()));
        }

        let envelope: ListEnvelope<T> = response
            .json()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))?;
        Ok(envelope.into_items())
    }

    /// POST with a JSON body, returning the raw response for status handling
    async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<reqwest::Response, RemoteError> {
        self.authed(self.client.post(self.url(path)))
            .json(body)
            .send()
            .await
            .map_err(send_error)
    }
}

fn send_error(err: reqwest::Error) -> RemoteError {
    RemoteError::Unreachable(err.to_string())
}

fn remote_to_domain(err: RemoteError) -> DomainError {
    match err {
        RemoteError::Unreachable(msg) => DomainError::Unavailable(msg),
        RemoteError::Status(code) => DomainError::Internal(format!("unexpected status {}", code)),
        RemoteError::Decode(msg) => DomainError::Internal(msg),
    }
}

/// Pull the backend's error message out of a rejected response
async fn rejection_message(response: reqwest::Response) -> Option<String> {
    response.json::<ApiErrorBody>().await.ok()?.message()
}

#[async_trait]
impl AdoptionApi for HttpApi {
    async fn fetch_active_set(&self, kind: CollectionKind) -> Result<HashSet<ItemId>, RemoteError> {
        match kind {
            CollectionKind::Pets => {
                let rows: Vec<PetFavoriteRow> = self.get_list("mascotas-favoritas/").await?;
                Ok(rows.into_iter().map(|row| row.mascota).collect())
            }
            CollectionKind::Tips => {
                let rows: Vec<TipFavoriteRow> = self.get_list("tips-favoritos/").await?;
                Ok(rows.into_iter().map(|row| row.tip).collect())
            }
        }
    }

    async fn confirm_toggle(
        &self,
        kind: CollectionKind,
        id: ItemId,
    ) -> Result<ToggleReceipt, RemoteError> {
        let (path, body) = match kind {
            CollectionKind::Pets => ("mascotas-favoritas/toggle/", json!({ "mascota_id": id })),
            CollectionKind::Tips => ("tips-favoritos/toggle/", json!({ "tip_id": id })),
        };

        let response = self.post_json(path, &body).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status.as_u16()));
        }

        let confirmed: ToggleResponse = response
            .json()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))?;
        Ok(ToggleReceipt {
            id,
            active: confirmed.favorito,
        })
    }

    async fn list_pets(&self) -> Result<Vec<Pet>, RemoteError> {
        self.get_list("mascotas-publicas/").await
    }

    async fn list_tips(&self) -> Result<Vec<Tip>, RemoteError> {
        self.get_list("tips/").await
    }

    async fn list_campaigns(&self) -> Result<Vec<Campaign>, RemoteError> {
        self.get_list("campanas/").await
    }

    async fn request_adoption(&self, pet_id: ItemId, message: &str) -> DomainResult<()> {
        let body = json!({ "mascota": pet_id, "mensaje": message });
        let response = self
            .post_json("solicitudes-adopcion/", &body)
            .await
            .map_err(remote_to_domain)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let message = rejection_message(response)
            .await
            .unwrap_or_else(|| format!("adoption request rejected ({})", status.as_u16()));
        match status.as_u16() {
            404 => Err(DomainError::NotFound(message)),
            400..=499 => Err(DomainError::InvalidInput(message)),
            _ => Err(DomainError::Internal(message)),
        }
    }

    async fn join_campaign(&self, id: ItemId) -> DomainResult<ParticipationOutcome> {
        let path = format!("campanas/{}/participar/", id);
        let response = self
            .post_json(&path, &json!({}))
            .await
            .map_err(remote_to_domain)?;

        // 201 = joined now, 200 = was already in, 400 = campaign not active
        match response.status().as_u16() {
            201 => Ok(ParticipationOutcome::Joined),
            200 => Ok(ParticipationOutcome::AlreadyJoined),
            400 => Ok(ParticipationOutcome::NotActive),
            404 => Err(DomainError::NotFound(format!("campaign {}", id))),
            code => Err(DomainError::Internal(format!("unexpected status {}", code))),
        }
    }

    async fn cancel_participation(&self, id: ItemId) -> DomainResult<()> {
        let path = format!("campanas/{}/cancelar_participacion/", id);
        let response = self
            .post_json(&path, &json!({}))
            .await
            .map_err(remote_to_domain)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let message = rejection_message(response)
            .await
            .unwrap_or_else(|| format!("campaign {}", id));
        match status.as_u16() {
            404 => Err(DomainError::NotFound(message)),
            _ => Err(DomainError::Internal(message)),
        }
    }
}
