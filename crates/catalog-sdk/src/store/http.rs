//! Store backed by the catalog REST API

use super::{MutationResult, Store};
use crate::error::Result;
use crate::model::{AtlanTag, Entity, EntityStatus};
use crate::search::{Condition, SearchPage, SearchRequest};
use async_trait::async_trait;
use catalog_client::{
    CatalogClient, ClientConfig, IndexSearchRequest, MutationResponse, RetrieveParams, SearchDsl,
};
use serde_json::{json, Map, Value};

/// [`Store`] over a [`CatalogClient`]
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: CatalogClient,
}

impl HttpStore {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self::from_client(CatalogClient::new(config)?))
    }

    pub fn from_client(client: CatalogClient) -> Self {
        Self { client }
    }

    /// Configure from `CATALOG_*` environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self::from_client(CatalogClient::from_env()?))
    }

    pub fn client(&self) -> &CatalogClient {
        &self.client
    }
}

/// Translate conditions into a bool/filter query
fn to_query(conditions: &[Condition]) -> Value {
    let filters: Vec<Value> = conditions
        .iter()
        .map(|condition| match condition {
            Condition::Term { field, value } => {
                let mut term = Map::new();
                term.insert(field.clone(), Value::String(value.clone()));
                json!({ "term": Value::Object(term) })
            }
        })
        .collect();
    json!({ "bool": { "filter": filters } })
}

fn to_index_search(request: &SearchRequest) -> IndexSearchRequest {
    IndexSearchRequest {
        dsl: SearchDsl {
            from: request.from,
            size: request.page_size,
            query: to_query(&request.conditions),
            track_total_hits: true,
        },
        attributes: request.projection.attributes.clone(),
        relation_attributes: request.projection.related_attributes.clone(),
        suppress_logs: true,
    }
}

impl From<MutationResponse<Entity>> for MutationResult {
    fn from(response: MutationResponse<Entity>) -> Self {
        let mutated = response.mutated_entities;
        Self {
            created: mutated.create,
            updated: mutated.update,
            partially_updated: mutated.partial_update,
            deleted: mutated.delete,
            guid_assignments: response.guid_assignments,
        }
    }
}

#[async_trait]
impl Store for HttpStore {
    async fn get_by_guid(&self, guid: &str, include_relationships: bool) -> Result<Option<Entity>> {
        let response = self
            .client
            .get_entity_by_guid::<Entity>(guid, RetrieveParams::with_relationships(include_relationships))
            .await?;
        Ok(response.map(|r| r.entity))
    }

    async fn get_by_type_and_identifier(
        &self,
        type_name: &str,
        qualified_name: &str,
        include_relationships: bool,
    ) -> Result<Option<Entity>> {
        let response = self
            .client
            .get_entity_by_unique_attribute::<Entity>(
                type_name,
                qualified_name,
                RetrieveParams::with_relationships(include_relationships),
            )
            .await?;
        Ok(response.map(|r| r.entity))
    }

    async fn search(&self, request: &SearchRequest) -> Result<SearchPage> {
        let response = self
            .client
            .index_search::<Entity>(&to_index_search(request))
            .await?;
        Ok(SearchPage {
            approximate_count: response.approximate_count,
            entities: response.entities,
        })
    }

    async fn save(&self, entities: Vec<Entity>) -> Result<MutationResult> {
        if entities.is_empty() {
            return Ok(MutationResult::default());
        }
        let response: MutationResponse<Entity> = self.client.upsert_entities(&entities).await?;
        Ok(response.into())
    }

    async fn restore(&self, type_name: &str, qualified_name: &str) -> Result<bool> {
        let Some(existing) = self
            .get_by_type_and_identifier(type_name, qualified_name, false)
            .await?
        else {
            return Ok(false);
        };

        match existing.status {
            Some(EntityStatus::Deleted) => {}
            Some(EntityStatus::Purged) => return Ok(false),
            _ => return Ok(true),
        }

        let Some(guid) = existing.guid.as_ref().and_then(|g| g.as_guid()) else {
            return Ok(false);
        };
        let response: MutationResponse<Entity> =
            self.client.restore_entities(&[guid.to_string()]).await?;
        tracing::debug!("Restored {} {}", type_name, qualified_name);
        Ok(!response.is_empty())
    }

    async fn append_atlan_tags(
        &self,
        type_name: &str,
        qualified_name: &str,
        tags: Vec<AtlanTag>,
    ) -> Result<Option<Entity>> {
        if !self
            .client
            .add_classifications(type_name, qualified_name, &tags)
            .await?
        {
            return Ok(None);
        }
        self.get_by_type_and_identifier(type_name, qualified_name, false)
            .await
    }

    async fn remove_atlan_tag(
        &self,
        type_name: &str,
        qualified_name: &str,
        tag_name: &str,
    ) -> Result<bool> {
        Ok(self
            .client
            .delete_classification(type_name, qualified_name, tag_name)
            .await?)
    }
}
