//! The store capability the resolver and fetcher sit on
//!
//! A [`Store`] is the remote catalog as seen by this crate: lookups, search,
//! partial-update saves and a few server-side operations. Transport,
//! authentication and retries are the implementation's business; errors it
//! raises pass through untouched.

use crate::error::Result;
use crate::model::{AtlanTag, Entity, EntityId};
use crate::search::{SearchPage, SearchRequest};
use async_trait::async_trait;
use std::collections::HashMap;

#[cfg(feature = "http")]
mod http;
mod memory;

#[cfg(feature = "http")]
pub use http::HttpStore;
pub use memory::InMemoryStore;

/// Remote catalog operations.
///
/// Lookups may return an entity of a different runtime type than asked for
/// (a supertype lookup resolving to a subtype, for instance); callers that
/// need a specific type check it themselves.
#[async_trait]
pub trait Store: Send + Sync {
    /// Entity with this GUID, `None` if there is none
    async fn get_by_guid(&self, guid: &str, include_relationships: bool) -> Result<Option<Entity>>;

    /// Entity with this type and qualifiedName, `None` if there is none
    async fn get_by_type_and_identifier(
        &self,
        type_name: &str,
        qualified_name: &str,
        include_relationships: bool,
    ) -> Result<Option<Entity>>;

    /// One page of matches
    async fn search(&self, request: &SearchRequest) -> Result<SearchPage>;

    /// Create or partially update entities; unspecified attributes are left
    /// unchanged
    async fn save(&self, entities: Vec<Entity>) -> Result<MutationResult>;

    /// Make the entity active again. `false` if nothing exists at that
    /// qualifiedName or it cannot be restored
    async fn restore(&self, type_name: &str, qualified_name: &str) -> Result<bool>;

    /// Attach tags, returning the updated entity (`None` if absent)
    async fn append_atlan_tags(
        &self,
        type_name: &str,
        qualified_name: &str,
        tags: Vec<AtlanTag>,
    ) -> Result<Option<Entity>>;

    /// Detach one tag, `false` if the entity or tag was absent
    async fn remove_atlan_tag(
        &self,
        type_name: &str,
        qualified_name: &str,
        tag_name: &str,
    ) -> Result<bool>;
}

/// Outcome of a save
#[derive(Debug, Clone, Default)]
pub struct MutationResult {
    pub created: Vec<Entity>,
    pub updated: Vec<Entity>,
    pub partially_updated: Vec<Entity>,
    pub deleted: Vec<Entity>,
    /// Placeholder GUID (as sent) → server-assigned GUID
    pub guid_assignments: HashMap<String, String>,
}

impl MutationResult {
    pub fn is_empty(&self) -> bool {
        self.created.is_empty()
            && self.updated.is_empty()
            && self.partially_updated.is_empty()
            && self.deleted.is_empty()
    }

    /// Server GUID assigned to a placeholder sent in this save
    pub fn assigned_guid(&self, placeholder: &EntityId) -> Option<&str> {
        self.guid_assignments
            .get(&placeholder.to_string())
            .map(String::as_str)
    }

    /// The first updated entity, in update, partial-update, create order
    pub fn into_first_mutated(self) -> Option<Entity> {
        self.updated
            .into_iter()
            .chain(self.partially_updated)
            .chain(self.created)
            .next()
    }
}
