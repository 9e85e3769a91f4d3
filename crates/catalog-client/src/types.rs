//! Types for the catalog REST API

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Environment variable holding the catalog base URL
pub const ENV_BASE_URL: &str = "CATALOG_BASE_URL";
/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "CATALOG_API_KEY";
/// Environment variable holding the request timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "CATALOG_TIMEOUT_SECS";

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the catalog tenant (e.g., "https://tenant.example.com")
    pub base_url: String,
    /// Optional API key, sent as a bearer token
    pub api_key: Option<String>,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    /// Build a configuration from `CATALOG_*` environment variables,
    /// falling back to defaults for anything unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            base_url: lookup(ENV_BASE_URL)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            api_key: lookup(ENV_API_KEY).filter(|key| !key.is_empty()),
            timeout_secs: lookup(ENV_TIMEOUT_SECS)
                .and_then(|secs| secs.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Query parameters for single-entity retrieval
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetrieveParams {
    /// Return minimal extended information about related entities
    pub min_ext_info: bool,
    /// Skip relationship attributes entirely
    pub ignore_relationships: bool,
}

impl RetrieveParams {
    /// Parameters for a retrieval with or without relationships
    pub fn with_relationships(include_relationships: bool) -> Self {
        Self {
            min_ext_info: !include_relationships,
            ignore_relationships: !include_relationships,
        }
    }

    pub(crate) fn to_query(self) -> String {
        format!(
            "minExtInfo={}&ignoreRelationships={}",
            self.min_ext_info, self.ignore_relationships
        )
    }
}

/// Envelope returned by the single-entity endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityResponse<T> {
    /// The entity itself
    pub entity: T,
    /// Related entities keyed by GUID (raw JSON)
    #[serde(default)]
    pub referred_entities: HashMap<String, serde_json::Value>,
}

/// Elasticsearch-style query wrapper for index search
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchDsl {
    /// Offset of the first result
    pub from: u32,
    /// Page size
    pub size: u32,
    /// Query clause (raw DSL)
    pub query: serde_json::Value,
    /// Whether to compute an exact hit count
    #[serde(rename = "track_total_hits")]
    pub track_total_hits: bool,
}

/// Request body for the index search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSearchRequest {
    /// Query DSL
    pub dsl: SearchDsl,
    /// Attributes to materialize on each result
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<String>,
    /// Attributes to materialize on related entities
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relation_attributes: Vec<String>,
    /// Keep this query out of the search log
    pub suppress_logs: bool,
}

/// Response from the index search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSearchResponse<T> {
    /// Approximate number of matches across all pages
    #[serde(default)]
    pub approximate_count: u64,
    /// Matching entities for this page
    #[serde(default = "Vec::new")]
    pub entities: Vec<T>,
}

/// Request body for bulk entity upserts
#[derive(Debug, Clone, Serialize)]
pub struct BulkEntitiesRequest<'a, T> {
    pub entities: &'a [T],
}

/// Entities touched by a mutation, grouped by operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutatedEntities<T> {
    #[serde(rename = "CREATE", default = "Vec::new")]
    pub create: Vec<T>,
    #[serde(rename = "UPDATE", default = "Vec::new")]
    pub update: Vec<T>,
    #[serde(rename = "PARTIAL_UPDATE", default = "Vec::new")]
    pub partial_update: Vec<T>,
    #[serde(rename = "DELETE", default = "Vec::new")]
    pub delete: Vec<T>,
}

impl<T> Default for MutatedEntities<T> {
    fn default() -> Self {
        Self {
            create: Vec::new(),
            update: Vec::new(),
            partial_update: Vec::new(),
            delete: Vec::new(),
        }
    }
}

/// Response from any entity mutation endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: serde::de::DeserializeOwned"))]
pub struct MutationResponse<T> {
    /// Entities touched by the mutation
    #[serde(default)]
    pub mutated_entities: MutatedEntities<T>,
    /// Placeholder GUID → server-assigned GUID
    #[serde(default)]
    pub guid_assignments: HashMap<String, String>,
}

impl<T> Default for MutationResponse<T> {
    fn default() -> Self {
        Self {
            mutated_entities: MutatedEntities::default(),
            guid_assignments: HashMap::new(),
        }
    }
}

impl<T> MutationResponse<T> {
    /// Whether nothing at all was mutated
    pub fn is_empty(&self) -> bool {
        let m = &self.mutated_entities;
        m.create.is_empty() && m.update.is_empty() && m.partial_update.is_empty() && m.delete.is_empty()
    }
}
