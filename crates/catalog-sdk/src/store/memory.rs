//! In-memory store for tests and offline use.

use super::{MutationResult, Store};
use crate::error::Result;
use crate::model::{
    attr, AtlanTag, AttributeValue, Attributes, Entity, EntityId, EntityReference, EntityStatus,
};
use crate::search::{SearchPage, SearchRequest};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

/// A store holding entities in a map keyed by GUID.
///
/// Every trait call counts as one round trip. Lookups by qualifiedName fall
/// back to any type when no entity of the requested type matches, the way a
/// supertype lookup would.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entities: RwLock<BTreeMap<String, Entity>>,
    round_trips: AtomicU32,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store; entities without a server GUID get one
    pub fn with_entities<I>(entities: I) -> Self
    where
        I: IntoIterator<Item = Entity>,
    {
        let map = entities
            .into_iter()
            .map(|entity| {
                let entity = assign_guid(entity);
                (guid_key(&entity), entity)
            })
            .collect();
        Self {
            entities: RwLock::new(map),
            round_trips: AtomicU32::new(0),
        }
    }

    /// Insert or overwrite an entity, returning its GUID
    pub async fn insert(&self, entity: Entity) -> String {
        let entity = assign_guid(entity);
        let key = guid_key(&entity);
        self.entities.write().await.insert(key.clone(), entity);
        key
    }

    /// Look an entity up without counting a round trip
    pub async fn snapshot(&self, guid: &str) -> Option<Entity> {
        self.entities.read().await.get(guid).cloned()
    }

    pub async fn len(&self) -> usize {
        self.entities.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entities.read().await.is_empty()
    }

    /// Number of store calls made so far
    pub fn round_trips(&self) -> u32 {
        self.round_trips.load(Ordering::SeqCst)
    }

    pub fn reset_round_trips(&self) {
        self.round_trips.store(0, Ordering::SeqCst);
    }

    fn count(&self) {
        self.round_trips.fetch_add(1, Ordering::SeqCst);
    }
}

fn assign_guid(mut entity: Entity) -> Entity {
    let needs_guid = match &entity.guid {
        None => true,
        Some(id) => id.is_empty() || id.is_unassigned(),
    };
    if needs_guid {
        entity.guid = Some(EntityId::guid(Uuid::new_v4().to_string()));
    }
    entity
}

fn guid_key(entity: &Entity) -> String {
    entity
        .guid
        .as_ref()
        .map(|g| g.to_string())
        .unwrap_or_default()
}

/// GUID of the entity of `type_name` at `qualified_name`, exact type only
fn find_exact(map: &BTreeMap<String, Entity>, type_name: &str, qualified_name: &str) -> Option<String> {
    map.iter()
        .find(|(_, e)| e.type_name == type_name && e.qualified_name() == Some(qualified_name))
        .map(|(guid, _)| guid.clone())
}

fn without_relationships(mut entity: Entity) -> Entity {
    entity.relationship_attributes.clear();
    entity
}

/// Narrow a search hit to the projected attributes.
///
/// Relationships are requested by name in `attributes`, as with the catalog's
/// index search. Stored relationship values are bare references with no
/// attributes of their own, so `related_attributes` has nothing to narrow
/// here and is ignored.
fn project(mut entity: Entity, request: &SearchRequest) -> Entity {
    let projection = &request.projection;
    if projection.is_empty() {
        return entity;
    }
    let keep = |name: &str| {
        name == attr::QUALIFIED_NAME || name == attr::NAME || projection.attributes.iter().any(|a| a == name)
    };
    entity.attributes.retain(|name, _| keep(name.as_str()));
    entity
        .relationship_attributes
        .retain(|name, _| keep(name.as_str()));
    entity
}

fn references(value: &AttributeValue) -> Vec<EntityReference> {
    value.as_references().map(<[_]>::to_vec).unwrap_or_default()
}

fn merge_attributes(target: &mut Attributes, incoming: Attributes) {
    for (name, value) in incoming {
        if value.is_null() {
            target.remove(&name);
        } else {
            target.insert(name, value);
        }
    }
}

fn merge(existing: &mut Entity, incoming: Entity) {
    if let Some(status) = incoming.status {
        existing.status = Some(status);
    }
    merge_attributes(&mut existing.attributes, incoming.attributes);
    merge_attributes(&mut existing.relationship_attributes, incoming.relationship_attributes);

    for (name, value) in incoming.append_relationship_attributes {
        let mut current = existing
            .relationship_attributes
            .get(&name)
            .map(references)
            .unwrap_or_default();
        for reference in references(&value) {
            if !current.iter().any(|r| r.same_target(&reference)) {
                current.push(reference);
            }
        }
        existing
            .relationship_attributes
            .insert(name, AttributeValue::References(current));
    }

    for (name, value) in incoming.remove_relationship_attributes {
        if let Some(current) = existing.relationship_attributes.get(&name) {
            let removals = references(&value);
            let kept: Vec<EntityReference> = references(current)
                .into_iter()
                .filter(|r| !removals.iter().any(|x| x.same_target(r)))
                .collect();
            existing
                .relationship_attributes
                .insert(name, AttributeValue::References(kept));
        }
    }

    for tag in incoming.classifications {
        add_tag(existing, tag);
    }
}

fn create(incoming: Entity, guid: String) -> Entity {
    let mut created = Entity::new(incoming.type_name.clone());
    created.guid = Some(EntityId::guid(guid));
    created.status = Some(EntityStatus::Active);
    created.unique_attributes = incoming.unique_attributes.clone();
    merge(&mut created, incoming);
    created
}

fn add_tag(entity: &mut Entity, mut tag: AtlanTag) {
    if entity.classifications.iter().any(|t| t.type_name == tag.type_name) {
        return;
    }
    tag.entity_guid = entity.guid.as_ref().map(|g| g.to_string());
    entity.classifications.push(tag);
}

#[async_trait]
impl Store for InMemoryStore {
    async fn get_by_guid(&self, guid: &str, include_relationships: bool) -> Result<Option<Entity>> {
        self.count();
        let found = self.entities.read().await.get(guid).cloned();
        Ok(found.map(|e| if include_relationships { e } else { without_relationships(e) }))
    }

    async fn get_by_type_and_identifier(
        &self,
        type_name: &str,
        qualified_name: &str,
        include_relationships: bool,
    ) -> Result<Option<Entity>> {
        self.count();
        let map = self.entities.read().await;
        let found = find_exact(&map, type_name, qualified_name)
            .and_then(|guid| map.get(&guid))
            .or_else(|| map.values().find(|e| e.qualified_name() == Some(qualified_name)))
            .cloned();
        Ok(found.map(|e| if include_relationships { e } else { without_relationships(e) }))
    }

    async fn search(&self, request: &SearchRequest) -> Result<SearchPage> {
        self.count();
        let map = self.entities.read().await;
        let matches: Vec<&Entity> = map.values().filter(|e| request.matches(e)).collect();
        let entities = matches
            .iter()
            .skip(request.from as usize)
            .take(request.page_size as usize)
            .map(|e| project((*e).clone(), request))
            .collect();
        Ok(SearchPage {
            approximate_count: matches.len() as u64,
            entities,
        })
    }

    async fn save(&self, entities: Vec<Entity>) -> Result<MutationResult> {
        self.count();
        let mut map = self.entities.write().await;
        let mut result = MutationResult::default();

        for incoming in entities {
            let placeholder = incoming.guid.clone().filter(EntityId::is_unassigned);
            let by_guid = incoming
                .guid
                .as_ref()
                .and_then(EntityId::as_guid)
                .filter(|guid| map.contains_key(*guid))
                .map(str::to_string);
            let existing = by_guid.or_else(|| {
                incoming
                    .qualified_name()
                    .and_then(|qn| find_exact(&map, &incoming.type_name, qn))
            });

            let (guid, entity) = match existing {
                Some(guid) => {
                    let Some(current) = map.get_mut(&guid) else {
                        continue;
                    };
                    merge(current, incoming);
                    result.partially_updated.push(current.clone());
                    (guid, None)
                }
                None => {
                    let creatable = incoming.qualified_name().is_some_and(|s| !s.is_empty())
                        && incoming.name().is_some_and(|s| !s.is_empty());
                    if !creatable {
                        tracing::debug!(
                            "Skipping {} without match or qualifiedName+name",
                            incoming.type_name
                        );
                        continue;
                    }
                    let guid = Uuid::new_v4().to_string();
                    let created = create(incoming, guid.clone());
                    result.created.push(created.clone());
                    (guid, Some(created))
                }
            };

            if let Some(placeholder) = placeholder {
                result.guid_assignments.insert(placeholder.to_string(), guid.clone());
            }
            if let Some(created) = entity {
                map.insert(guid, created);
            }
        }

        Ok(result)
    }

    async fn restore(&self, type_name: &str, qualified_name: &str) -> Result<bool> {
        self.count();
        let mut map = self.entities.write().await;
        let Some(guid) = find_exact(&map, type_name, qualified_name) else {
            return Ok(false);
        };
        let Some(entity) = map.get_mut(&guid) else {
            return Ok(false);
        };
        match entity.status {
            Some(EntityStatus::Purged) => Ok(false),
            _ => {
                entity.status = Some(EntityStatus::Active);
                Ok(true)
            }
        }
    }

    async fn append_atlan_tags(
        &self,
        type_name: &str,
        qualified_name: &str,
        tags: Vec<AtlanTag>,
    ) -> Result<Option<Entity>> {
        self.count();
        let mut map = self.entities.write().await;
        let Some(guid) = find_exact(&map, type_name, qualified_name) else {
            return Ok(None);
        };
        let Some(entity) = map.get_mut(&guid) else {
            return Ok(None);
        };
        for tag in tags {
            add_tag(entity, tag);
        }
        Ok(Some(entity.clone()))
    }

    async fn remove_atlan_tag(
        &self,
        type_name: &str,
        qualified_name: &str,
        tag_name: &str,
    ) -> Result<bool> {
        self.count();
        let mut map = self.entities.write().await;
        let Some(guid) = find_exact(&map, type_name, qualified_name) else {
            return Ok(false);
        };
        let Some(entity) = map.get_mut(&guid) else {
            return Ok(false);
        };
        let before = entity.classifications.len();
        entity.classifications.retain(|t| t.type_name != tag_name);
        Ok(entity.classifications.len() != before)
    }
}
