//! Star Notary API client.
//!
//! One JSON request per confirmed event. Routes are resolved against
//! `scheme://host:port/`.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use serde::Serialize;
use shared_types::{
    ChangeNameEvent, CreateEvent, PurchaseEvent, PutForSaleEvent, RemoveFromSaleEvent,
};
use snl_03_confirmation_pipeline::{NotificationClient, NotifyError};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::ApiConfig;

/// Route for newly registered stars.
pub const CREATE_ROUTE: &str = "create";
/// Route for renamed stars.
pub const SET_NAME_ROUTE: &str = "set-name";
/// Route for stars listed for sale.
pub const SET_PRICE_ROUTE: &str = "set-price";
/// Route for delisted stars.
pub const REMOVE_FROM_SALE_ROUTE: &str = "remove-from-sale";
/// Route for purchased stars.
pub const PURCHASE_ROUTE: &str = "purchase";

const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Client construction failed.
#[derive(Debug, Error)]
#[error("Failed to build HTTP client: {0}")]
pub struct ApiClientError(#[from] reqwest::Error);

/// `reqwest` implementation of [`NotificationClient`].
pub struct StarNotaryApiClient {
    client: Client,
    base_url: String,
}

impl StarNotaryApiClient {
    /// Build a client for the configured API.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiClientError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url(),
        })
    }

    /// Full URL of a route.
    pub fn url(&self, route: &str) -> String {
        format!("{}/{}", self.base_url, route)
    }

    async fn send<T: Serialize + Sync>(
        &self,
        method: Method,
        route: &str,
        body: &T,
    ) -> Result<(), NotifyError> {
        let payload = serde_json::to_vec(body).map_err(|e| NotifyError::Transport {
            route: route.to_string(),
            reason: e.to_string(),
        })?;
        let url = self.url(route);
        debug!(%method, %url, "Notifying API");

        let response = self
            .client
            .request(method, &url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(payload)
            .send()
            .await
            .map_err(|e| {
                warn!(%url, error = %e, "API request failed");
                NotifyError::Transport {
                    route: route.to_string(),
                    reason: e.to_string(),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "API rejected notification");
            return Err(NotifyError::Status {
                route: route.to_string(),
                status: status.as_u16(),
            });
        }

        info!(%url, status = status.as_u16(), "API notified");
        Ok(())
    }
}

#[async_trait]
impl NotificationClient for StarNotaryApiClient {
    async fn create_star(&self, event: &CreateEvent) -> Result<(), NotifyError> {
        self.send(Method::POST, CREATE_ROUTE, event).await
    }

    async fn change_name(&self, event: &ChangeNameEvent) -> Result<(), NotifyError> {
        self.send(Method::PUT, SET_NAME_ROUTE, event).await
    }

    async fn put_for_sale(&self, event: &PutForSaleEvent) -> Result<(), NotifyError> {
        self.send(Method::PUT, SET_PRICE_ROUTE, event).await
    }

    async fn remove_from_sale(&self, event: &RemoveFromSaleEvent) -> Result<(), NotifyError> {
        self.send(Method::PUT, REMOVE_FROM_SALE_ROUTE, event).await
    }

    async fn purchase(&self, event: &PurchaseEvent) -> Result<(), NotifyError> {
        self.send(Method::PUT, PURCHASE_ROUTE, event).await
    }
}
