//! REST API client for VaultRE.
//!
//! Every request carries the account API key (`X-Api-Key`) and the
//! integration bearer token. Non-2xx responses are surfaced as
//! [`VaultReError::Api`] with the upstream status and body; nothing is
//! retried.

use async_trait::async_trait;
use listdesk_core::types::CrmId;
use reqwest::RequestBuilder;

use crate::directory::CrmClient;
use crate::error::VaultReError;
use crate::models::{CreatedRecord, Page, Property, Suburb};

/// Default production endpoint.
pub const DEFAULT_BASE_URL: &str = "https://ap-southeast-2.api.vaultre.com.au/api/v1.3";

/// Credentials and endpoint for a VaultRE account.
#[derive(Debug, Clone)]
pub struct VaultReConfig {
    pub api_key: String,
    pub bearer_token: String,
    pub base_url: String,
}

/// HTTP client for the VaultRE API.
#[derive(Clone)]
pub struct VaultReApi {
    client: reqwest::Client,
    config: VaultReConfig,
}

impl VaultReApi {
    pub fn new(config: VaultReConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, mut config: VaultReConfig) -> Self {
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        Self { client, config }
    }

    /// `GET /suburbs?name=`
    pub async fn search_suburbs(&self, name: &str) -> Result<Vec<Suburb>, VaultReError> {
        let request = self
            .get("/suburbs")
            .query(&[("name", name), ("pagesize", "50")]);
        let page: Page<Suburb> = Self::send_json(request).await?;
        Ok(page.items)
    }

    /// `GET /properties/residential/sale?suburbs=&page=&pagesize=`
    pub async fn sale_properties_page(
        &self,
        suburb_id: CrmId,
        page: u32,
        page_size: u32,
    ) -> Result<Page<Property>, VaultReError> {
        let request = self.get("/properties/residential/sale").query(&[
            ("suburbs", suburb_id.to_string()),
            ("page", page.to_string()),
            ("pagesize", page_size.to_string()),
        ]);
        Self::send_json(request).await
    }

    /// `GET /properties/residential/sale/available`: properties currently
    /// on the market, used to populate the offer form.
    pub async fn available_sale_properties(
        &self,
        page_size: u32,
    ) -> Result<Page<Property>, VaultReError> {
        let request = self
            .get("/properties/residential/sale/available")
            .query(&[("pagesize", page_size.to_string())]);
        Self::send_json(request).await
    }

    /// `GET /properties/{id}` as raw JSON.
    pub async fn get_property(&self, property_id: CrmId) -> Result<serde_json::Value, VaultReError> {
        Self::send_json(self.get(&format!("/properties/{property_id}"))).await
    }

    /// `GET /types/expense` as raw JSON.
    pub async fn expense_types(&self) -> Result<serde_json::Value, VaultReError> {
        Self::send_json(self.get("/types/expense")).await
    }

    /// `POST /properties/residential/sale`
    pub async fn create_appraisal(
        &self,
        payload: &serde_json::Value,
    ) -> Result<CrmId, VaultReError> {
        let request = self
            .authed(self.client.post(self.url("/properties/residential/sale")))
            .json(payload);
        let created: CreatedRecord = Self::send_json(request).await?;
        Ok(created.id)
    }

    /// `PUT /properties/residential/sale/{id}`
    pub async fn update_property(
        &self,
        property_id: CrmId,
        payload: &serde_json::Value,
    ) -> Result<(), VaultReError> {
        let request = self
            .authed(
                self.client
                    .put(self.url(&format!("/properties/residential/sale/{property_id}"))),
            )
            .json(payload);
        Self::ensure_success(request.send().await?).await?;
        Ok(())
    }

    // ---- private helpers ----

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.authed(self.client.get(self.url(path)))
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("X-Api-Key", &self.config.api_key)
            .bearer_auth(&self.config.bearer_token)
            .header(reqwest::header::ACCEPT, "application/json")
    }

    /// Ensure the response has a success status code, returning the
    /// status and body as [`VaultReError::Api`] otherwise.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, VaultReError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(VaultReError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn send_json<T: serde::de::DeserializeOwned>(
        request: RequestBuilder,
    ) -> Result<T, VaultReError> {
        let response = Self::ensure_success(request.send().await?).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl CrmClient for VaultReApi {
    async fn search_suburbs(&self, name: &str) -> Result<Vec<Suburb>, VaultReError> {
        VaultReApi::search_suburbs(self, name).await
    }

    async fn sale_properties_page(
        &self,
        suburb_id: CrmId,
        page: u32,
        page_size: u32,
    ) -> Result<Page<Property>, VaultReError> {
        VaultReApi::sale_properties_page(self, suburb_id, page, page_size).await
    }

    async fn create_appraisal(&self, payload: &serde_json::Value) -> Result<CrmId, VaultReError> {
        VaultReApi::create_appraisal(self, payload).await
    }

    async fn update_property(
        &self,
        property_id: CrmId,
        payload: &serde_json::Value,
    ) -> Result<(), VaultReError> {
        VaultReApi::update_property(self, property_id, payload).await
    }
}
