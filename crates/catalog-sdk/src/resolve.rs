//! Reference resolution
//!
//! Reduces any entity to the smallest value that still identifies it: a
//! reference for relationship declarations, or an updater for partial
//! updates. Pure functions of already-loaded fields; nothing here touches
//! the store.

use crate::error::{Result, SdkError};
use crate::model::{attr, EntityBuilder, EntityReference, HasIdentity};

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Reduce an entity to a reference.
///
/// Precedence, first match wins: GUID (placeholders included), then the
/// `qualifiedName` attribute, then the unique-attributes qualifiedName.
pub fn resolve_reference<E>(entity: &E) -> Result<EntityReference>
where
    E: HasIdentity + ?Sized,
{
    let type_name = entity.type_name();
    let semantic = entity.save_semantic();

    if let Some(guid) = entity.guid().filter(|guid| !guid.is_empty()) {
        return Ok(EntityReference::by_guid(type_name, guid.clone()).with_semantic(semantic));
    }
    if let Some(qualified_name) = non_empty(entity.qualified_name()) {
        return Ok(EntityReference::by_qualified_name(type_name, qualified_name).with_semantic(semantic));
    }
    if let Some(qualified_name) = non_empty(entity.unique_qualified_name()) {
        return Ok(EntityReference::by_qualified_name(type_name, qualified_name).with_semantic(semantic));
    }
    Err(SdkError::missing_identifier(type_name))
}

/// Reduce an entity to a builder carrying only what a partial update needs.
///
/// Fails listing every missing field, not just the first.
pub fn resolve_updater<E>(entity: &E) -> Result<EntityBuilder>
where
    E: HasIdentity + ?Sized,
{
    let qualified_name = non_empty(entity.qualified_name());
    let name = non_empty(entity.name());

    match (qualified_name, name) {
        (Some(qualified_name), Some(name)) => {
            Ok(updater(entity.type_name(), qualified_name, name))
        }
        _ => {
            let mut fields = Vec::with_capacity(2);
            if qualified_name.is_none() {
                fields.push(attr::QUALIFIED_NAME);
            }
            if name.is_none() {
                fields.push(attr::NAME);
            }
            Err(SdkError::MissingRequiredField {
                type_name: entity.type_name().to_string(),
                fields,
            })
        }
    }
}

/// Minimal updater: placeholder GUID, qualifiedName and name.
pub fn updater(
    type_name: impl Into<String>,
    qualified_name: impl Into<String>,
    name: impl Into<String>,
) -> EntityBuilder {
    EntityBuilder::new(type_name)
        .placeholder_guid()
        .qualified_name(qualified_name)
        .name(name)
}

/// Minimal partial-update builder when no name is at hand.
pub(crate) fn partial(type_name: &str, qualified_name: &str) -> EntityBuilder {
    EntityBuilder::new(type_name)
        .placeholder_guid()
        .qualified_name(qualified_name)
}
