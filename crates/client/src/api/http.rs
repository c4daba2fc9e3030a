//! reqwest-backed implementation of the inventory API.

use dealership_core::{Car, CarDraft, CarId};
use reqwest::{Response, Url};

use crate::api::InventoryApi;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult, Operation};

/// HTTP client for the `/api/cars` resource.
#[derive(Debug, Clone)]
pub struct HttpInventoryApi {
    http: reqwest::Client,
    config: ClientConfig,
}

impl HttpInventoryApi {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Reuse an existing connection pool.
    pub fn with_client(http: reqwest::Client, config: ClientConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn check(operation: Operation, url: &Url, resp: Response) -> ClientResult<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        tracing::warn!(%operation, %url, status = status.as_u16(), "inventory API request failed");
        Err(ClientError::http(operation, status.as_u16()))
    }
}

#[async_trait::async_trait(?Send)]
impl InventoryApi for HttpInventoryApi {
    async fn list_cars(&self) -> ClientResult<Vec<Car>> {
        let url = self.config.collection_url();
        let resp = self.http.get(url.clone()).send().await?;
        let resp = Self::check(Operation::Fetch, &url, resp)?;

        let cars: Vec<Car> = resp.json().await?;
        tracing::debug!(%url, count = cars.len(), "fetched cars");
        Ok(cars)
    }

    async fn create_car(&self, draft: &CarDraft) -> ClientResult<()> {
        let url = self.config.collection_url();
        let resp = self.http.post(url.clone()).json(draft).send().await?;
        Self::check(Operation::Create, &url, resp)?;
        Ok(())
    }

    async fn update_car(&self, car: &Car) -> ClientResult<()> {
        let url = self.config.item_url(car.id);
        let resp = self.http.put(url.clone()).json(car).send().await?;
        Self::check(Operation::Update, &url, resp)?;
        Ok(())
    }

    async fn delete_car(&self, id: CarId) -> ClientResult<()> {
        let url = self.config.item_url(id);
        let resp = self.http.delete(url.clone()).send().await?;
        Self::check(Operation::Delete, &url, resp)?;
        Ok(())
    }
}
