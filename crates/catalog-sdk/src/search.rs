//! Minimal search requests
//!
//! Just enough of the catalog's query DSL to express equality filters and
//! attribute projections; stores translate these into their own query form.

use crate::assets::AssetType;
use crate::error::Result;
use crate::model::{AttributeProjection, AttributeValue, Entity, EntityStatus};
use crate::store::Store;
use std::marker::PhantomData;

/// Indexed field names
pub mod field {
    pub const GUID: &str = "__guid";
    pub const TYPE_NAME: &str = "__typeName.keyword";
    pub const STATE: &str = "__state";
    pub const QUALIFIED_NAME: &str = "qualifiedName";
}

/// Default page size for searches
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// A single filter clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Exact equality on an indexed field
    Term { field: String, value: String },
}

impl Condition {
    pub fn term(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Term {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn type_name(type_name: impl Into<String>) -> Self {
        Self::term(field::TYPE_NAME, type_name)
    }

    pub fn active() -> Self {
        Self::term(field::STATE, EntityStatus::Active.as_str())
    }

    /// Evaluate against an in-memory entity
    pub fn matches(&self, entity: &Entity) -> bool {
        match self {
            Self::Term { field, value } => match field.as_str() {
                field::GUID => entity.guid.as_ref().is_some_and(|g| g.to_string() == *value),
                field::TYPE_NAME => entity.type_name == *value,
                field::STATE => {
                    entity.status.unwrap_or(EntityStatus::Active).as_str() == value.as_str()
                }
                other => match entity.attribute(other) {
                    Some(AttributeValue::String(s)) => s == value,
                    Some(AttributeValue::Strings(values)) => values.iter().any(|v| v == value),
                    Some(AttributeValue::Bool(b)) => b.to_string() == *value,
                    Some(AttributeValue::Int(n)) => n.to_string() == *value,
                    _ => false,
                },
            },
        }
    }
}

/// A filtered, projected, paged search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// All conditions must hold
    pub conditions: Vec<Condition>,
    pub projection: AttributeProjection,
    pub from: u32,
    pub page_size: u32,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            conditions: Vec::new(),
            projection: AttributeProjection::default(),
            from: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl SearchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn with_projection(mut self, projection: AttributeProjection) -> Self {
        self.projection = projection;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_from(mut self, from: u32) -> Self {
        self.from = from;
        self
    }

    pub fn matches(&self, entity: &Entity) -> bool {
        self.conditions.iter().all(|c| c.matches(entity))
    }
}

/// One page of search results
#[derive(Debug, Clone, Default)]
pub struct SearchPage {
    /// Matches across all pages, as estimated by the store
    pub approximate_count: u64,
    pub entities: Vec<Entity>,
}

impl SearchPage {
    pub fn first(self) -> Option<Entity> {
        self.entities.into_iter().next()
    }
}

/// Typed search over one asset type
///
/// Built by [`AssetClient::select`](crate::AssetClient::select) with the type
/// filter (and, unless archived assets are wanted, the active filter) already
/// applied.
pub struct Select<'a, A, S: ?Sized> {
    store: &'a S,
    request: SearchRequest,
    _asset: PhantomData<fn() -> A>,
}

impl<'a, A, S> Select<'a, A, S>
where
    A: AssetType,
    S: Store + ?Sized,
{
    pub(crate) fn new(store: &'a S, include_archived: bool) -> Self {
        let mut request = SearchRequest::new().with_condition(Condition::type_name(A::TYPE_NAME));
        if !include_archived {
            request = request.with_condition(Condition::active());
        }
        Self {
            store,
            request,
            _asset: PhantomData,
        }
    }

    pub fn where_term(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.request = self.request.with_condition(Condition::term(field, value));
        self
    }

    /// Materialize `attribute` on each result
    pub fn include_on_results(mut self, attribute: impl Into<String>) -> Self {
        self.request.projection = std::mem::take(&mut self.request.projection).attribute(attribute);
        self
    }

    /// Materialize `attribute` on related entities
    pub fn include_on_relations(mut self, attribute: impl Into<String>) -> Self {
        self.request.projection =
            std::mem::take(&mut self.request.projection).related_attribute(attribute);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.request.page_size = page_size;
        self
    }

    pub fn to_request(&self) -> SearchRequest {
        self.request.clone()
    }

    /// Run the search and return the first page
    pub async fn execute(self) -> Result<Vec<A>> {
        let page = self.store.search(&self.request).await?;
        let mut assets = Vec::with_capacity(page.entities.len());
        for entity in page.entities {
            if entity.type_name != A::TYPE_NAME {
                tracing::warn!(
                    "Skipping {} result of type {} in a {} search",
                    entity.guid.as_ref().map(|g| g.to_string()).unwrap_or_default(),
                    entity.type_name,
                    A::TYPE_NAME
                );
                continue;
            }
            assets.push(A::from_entity_unchecked(entity));
        }
        Ok(assets)
    }
}
