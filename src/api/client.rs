//! Remote fare service.
//!
//! `FareBackend` is the seam between the console and the network. The HTTP
//! implementation talks JSON to `<base_url>/airports/baseprice`; tests swap
//! in fakes.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::credentials::CredentialProvider;
use super::error::ApiError;
use super::types::{Envelope, Fare, FareId, FareUpdate};

const RESOURCE: &str = "airports/baseprice";

#[async_trait]
pub trait FareBackend: Send + Sync {
    /// Returns the name of the backend.
    fn name(&self) -> &str;

    /// Fetches the whole fare collection.
    async fn list_fares(&self) -> Result<Vec<Fare>, ApiError>;

    /// Deletes one fare. Deleting an id the service no longer has is a failure.
    async fn delete_fare(&self, id: FareId) -> Result<(), ApiError>;

    /// Saves the edited fields and returns the fare as now stored.
    async fn update_fare(&self, id: FareId, update: &FareUpdate) -> Result<Fare, ApiError>;
}

pub struct HttpFareBackend {
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
    client: reqwest::Client,
}

impl HttpFareBackend {
    pub fn new(base_url: impl Into<String>, credentials: Arc<dyn CredentialProvider>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            credentials,
            client: reqwest::Client::new(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, RESOURCE)
    }

    fn item_url(&self, id: FareId) -> String {
        format!("{}/{}/{}", self.base_url, RESOURCE, id)
    }

    /// Attaches the bearer token. Fails before anything is sent if there is none.
    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        let token = self
            .credentials
            .bearer_token()
            .ok_or(ApiError::MissingCredential)?;
        Ok(request.bearer_auth(token))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        self.authorized(request)?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }
}

/// Turns a non-success response into `ApiError::Api`, preferring the body's
/// `message` field over `fallback`.
async fn reject(response: Response, fallback: &str) -> ApiError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Envelope<serde_json::Value>>(&body)
        .ok()
        .and_then(|env| env.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| fallback.to_string());
    warn!("Fare service error: {} - {}", status, body);
    ApiError::Api { status, message }
}

async fn parse_envelope<T: DeserializeOwned>(response: Response) -> Result<Envelope<T>, ApiError> {
    response
        .json::<Envelope<T>>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

#[async_trait]
impl FareBackend for HttpFareBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn list_fares(&self) -> Result<Vec<Fare>, ApiError> {
        info!("GET {}", self.collection_url());
        let response = self.send(self.client.get(self.collection_url())).await?;
        debug!("List response status: {}", response.status());

        if !response.status().is_success() {
            return Err(reject(response, "Error fetching data").await);
        }

        let envelope: Envelope<Vec<Fare>> = parse_envelope(response).await?;
        let fares = envelope
            .data
            .ok_or_else(|| ApiError::Parse("response carried no data".to_string()))?;
        info!("Fetched {} fares", fares.len());
        Ok(fares)
    }

    async fn delete_fare(&self, id: FareId) -> Result<(), ApiError> {
        info!("DELETE {}", self.item_url(id));
        let response = self.send(self.client.delete(self.item_url(id))).await?;
        debug!("Delete response status: {}", response.status());

        if !response.status().is_success() {
            return Err(reject(response, "Error deleting data").await);
        }
        Ok(())
    }

    async fn update_fare(&self, id: FareId, update: &FareUpdate) -> Result<Fare, ApiError> {
        info!("PUT {}", self.item_url(id));
        let response = self
            .send(self.client.put(self.item_url(id)).json(update))
            .await?;
        debug!("Update response status: {}", response.status());

        if !response.status().is_success() {
            return Err(reject(response, "Error updating data").await);
        }

        // Some deployments answer with an empty body; the submitted fields
        // are then what the service stored.
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if body.trim().is_empty() {
            return Ok(update.clone().into_fare(id));
        }
        let envelope: Envelope<Fare> =
            serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok(envelope
            .data
            .unwrap_or_else(|| update.clone().into_fare(id)))
    }
}
