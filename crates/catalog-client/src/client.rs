//! HTTP client for the catalog REST API

use crate::error::{ClientError, Result};
use crate::types::*;
use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

const ENTITY_API: &str = "api/meta/entity";
const SEARCH_API: &str = "api/meta/search/indexsearch";

/// HTTP client for the catalog REST API
///
/// Payloads are generic: callers choose the entity representation they
/// serialize and deserialize.
///
/// # Example
///
/// ```rust,no_run
/// use catalog_client::{CatalogClient, ClientConfig, RetrieveParams};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = CatalogClient::new(ClientConfig {
///     base_url: "https://tenant.example.com".into(),
///     api_key: Some("token".into()),
///     ..Default::default()
/// })?;
///
/// let entity = client
///     .get_entity_by_guid::<serde_json::Value>("5d9a1b0e-6b7d-4a8e-9a1f-1d2e3f4a5b6c", RetrieveParams::default())
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CatalogClient {
    config: ClientConfig,
    client: Client,
}

impl CatalogClient {
    /// Create a new catalog client
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(ref api_key) = config.api_key {
            let value = header::HeaderValue::from_str(&format!("Bearer {}", api_key))
                .map_err(|e| ClientError::Config(format!("invalid API key: {}", e)))?;
            headers.insert(header::AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Create a client configured from `CATALOG_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env())
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // ==================== Entity retrieval ====================

    /// Retrieve an entity by GUID, `None` if the server has no such entity
    pub async fn get_entity_by_guid<T: DeserializeOwned>(
        &self,
        guid: &str,
        params: RetrieveParams,
    ) -> Result<Option<EntityResponse<T>>> {
        let url = format!(
            "{}/{}/guid/{}?{}",
            self.config.base_url,
            ENTITY_API,
            urlencoding::encode(guid),
            params.to_query()
        );

        tracing::debug!("GET entity by guid {}", guid);
        let response = self.client.get(&url).send().await?;
        self.handle_optional(response).await
    }

    /// Retrieve an entity by type and qualifiedName, `None` if absent
    pub async fn get_entity_by_unique_attribute<T: DeserializeOwned>(
        &self,
        type_name: &str,
        qualified_name: &str,
        params: RetrieveParams,
    ) -> Result<Option<EntityResponse<T>>> {
        let url = format!(
            "{}&{}",
            self.unique_attribute_url(type_name, qualified_name),
            params.to_query()
        );

        tracing::debug!("GET {} by qualifiedName {}", type_name, qualified_name);
        let response = self.client.get(&url).send().await?;
        self.handle_optional(response).await
    }

    // ==================== Search ====================

    /// Run an index search
    pub async fn index_search<T: DeserializeOwned>(
        &self,
        request: &IndexSearchRequest,
    ) -> Result<IndexSearchResponse<T>> {
        let url = format!("{}/{}", self.config.base_url, SEARCH_API);

        tracing::debug!(
            "POST index search (from={}, size={})",
            request.dsl.from,
            request.dsl.size
        );
        let response = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await?;

        self.handle_response(response).await
    }

    // ==================== Mutation ====================

    /// Create or partially update entities in bulk
    ///
    /// Attributes not present on a submitted entity are left unchanged.
    pub async fn upsert_entities<T: Serialize, R: DeserializeOwned>(
        &self,
        entities: &[T],
    ) -> Result<MutationResponse<R>> {
        let url = format!(
            "{}/{}/bulk?replaceClassifications=false&replaceBusinessAttributes=false",
            self.config.base_url, ENTITY_API
        );

        tracing::debug!("POST bulk upsert of {} entities", entities.len());
        let response = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&BulkEntitiesRequest { entities })
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Restore soft-deleted entities by GUID
    pub async fn restore_entities<R: DeserializeOwned>(
        &self,
        guids: &[String],
    ) -> Result<MutationResponse<R>> {
        let params: Vec<String> = guids
            .iter()
            .map(|guid| format!("guid={}", urlencoding::encode(guid)))
            .collect();
        let url = format!(
            "{}/{}/restore/bulk?{}",
            self.config.base_url,
            ENTITY_API,
            params.join("&")
        );

        tracing::debug!("POST restore of {} entities", guids.len());
        let response = self.client.post(&url).send().await?;
        self.handle_response(response).await
    }

    /// Attach classifications, `false` if no entity has that qualifiedName
    pub async fn add_classifications<T: Serialize>(
        &self,
        type_name: &str,
        qualified_name: &str,
        classifications: &[T],
    ) -> Result<bool> {
        let url = format!(
            "{}/classifications?attr:qualifiedName={}",
            self.unique_attribute_base(type_name),
            urlencoding::encode(qualified_name)
        );

        let response = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(classifications)
            .send()
            .await?;

        self.handle_empty(response).await
    }

    /// Remove one classification, `false` if the entity or tag was absent
    pub async fn delete_classification(
        &self,
        type_name: &str,
        qualified_name: &str,
        classification: &str,
    ) -> Result<bool> {
        let url = format!(
            "{}/classification/{}?attr:qualifiedName={}",
            self.unique_attribute_base(type_name),
            urlencoding::encode(classification),
            urlencoding::encode(qualified_name)
        );

        let response = self.client.delete(&url).send().await?;
        self.handle_empty(response).await
    }

    // ==================== Helper Methods ====================

    fn unique_attribute_base(&self, type_name: &str) -> String {
        format!(
            "{}/{}/uniqueAttribute/type/{}",
            self.config.base_url,
            ENTITY_API,
            urlencoding::encode(type_name)
        )
    }

    fn unique_attribute_url(&self, type_name: &str, qualified_name: &str) -> String {
        format!(
            "{}?attr:qualifiedName={}",
            self.unique_attribute_base(type_name),
            urlencoding::encode(qualified_name)
        )
    }

    async fn handle_optional<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<Option<T>> {
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        self.handle_response(response).await.map(Some)
    }

    /// `Ok(false)` on 404, `Ok(true)` on any success status
    async fn handle_empty(&self, response: reqwest::Response) -> Result<bool> {
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        if !response.status().is_success() {
            return Err(Self::server_error(response).await);
        }
        Ok(true)
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        if !response.status().is_success() {
            return Err(Self::server_error(response).await);
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            ClientError::InvalidResponse(format!("{} (body: {})", e, truncate(&body, 200)))
        })
    }

    async fn server_error(response: reqwest::Response) -> ClientError {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        tracing::error!("Catalog request failed: HTTP {} - {}", status, message);
        ClientError::Server { status, message }
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_unencodable_api_key() {
        let result = CatalogClient::new(ClientConfig::default().with_api_key("bad\nkey"));
        assert!(matches!(result, Err(ClientError::Config(_))));
    }

    #[test]
    fn test_unique_attribute_url_encodes_qualified_name() {
        let client = CatalogClient::new(ClientConfig::default()).unwrap();
        let url = client.unique_attribute_url("Table", "default/snowflake/db/sch/tbl one");
        assert_eq!(
            url,
            "http://localhost:8080/api/meta/entity/uniqueAttribute/type/Table\
             ?attr:qualifiedName=default%2Fsnowflake%2Fdb%2Fsch%2Ftbl%20one"
        );
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("short", 200), "short");
    }
}
