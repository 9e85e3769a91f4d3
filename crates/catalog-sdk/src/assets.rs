//! Concrete asset types
//!
//! Every asset type is the same shape: a newtype over [`Entity`] tagged with
//! its catalog type name. Resolution, fetching and the mutation passthroughs
//! are written once against [`AssetType`]; the macro below only stamps out
//! the tags.

use crate::error::{Result, SdkError};
use crate::model::{Entity, EntityBuilder, EntityId, EntityReference, HasIdentity, SaveSemantic};
use crate::resolve;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog type with a fixed type name.
pub trait AssetType: HasIdentity + Clone + Send + Sync + Sized + 'static {
    /// Catalog type name, e.g. "Table"
    const TYPE_NAME: &'static str;

    fn as_entity(&self) -> &Entity;

    fn into_entity(self) -> Entity;

    /// Wrap an entity without checking its type
    fn from_entity_unchecked(entity: Entity) -> Self;

    /// Wrap an entity, failing if it is of another type
    fn from_entity(entity: Entity) -> Result<Self> {
        if entity.type_name != Self::TYPE_NAME {
            let identifier = entity
                .guid
                .as_ref()
                .map(EntityId::to_string)
                .or_else(|| entity.qualified_name().map(str::to_string))
                .unwrap_or_else(|| entity.type_name.clone());
            return Err(SdkError::wrong_type(identifier, Self::TYPE_NAME));
        }
        Ok(Self::from_entity_unchecked(entity))
    }

    /// Empty builder of this type
    fn builder() -> EntityBuilder {
        EntityBuilder::new(Self::TYPE_NAME)
    }

    fn ref_by_guid(guid: impl Into<EntityId>) -> EntityReference {
        EntityReference::by_guid(Self::TYPE_NAME, guid)
    }

    fn ref_by_qualified_name(qualified_name: impl Into<String>) -> EntityReference {
        EntityReference::by_qualified_name(Self::TYPE_NAME, qualified_name)
    }

    fn ref_by_guid_with(guid: impl Into<EntityId>, semantic: SaveSemantic) -> EntityReference {
        Self::ref_by_guid(guid).with_semantic(semantic)
    }

    fn ref_by_qualified_name_with(
        qualified_name: impl Into<String>,
        semantic: SaveSemantic,
    ) -> EntityReference {
        Self::ref_by_qualified_name(qualified_name).with_semantic(semantic)
    }

    /// Builder for a partial update of the asset at `qualified_name`
    fn updater(qualified_name: impl Into<String>, name: impl Into<String>) -> EntityBuilder {
        resolve::updater(Self::TYPE_NAME, qualified_name, name)
    }

    /// This asset reduced to what a partial update needs
    fn trim_to_required(&self) -> Result<EntityBuilder> {
        resolve::resolve_updater(self)
    }

    /// This asset reduced to a reference
    fn trim_to_reference(&self) -> Result<EntityReference> {
        resolve::resolve_reference(self)
    }

    /// Reference carrying an explicit save semantic
    fn trim_to_reference_with(&self, semantic: SaveSemantic) -> Result<EntityReference> {
        Ok(self.trim_to_reference()?.with_semantic(semantic))
    }
}

impl EntityBuilder {
    /// Finish building as a typed asset
    pub fn build_as<A: AssetType>(self) -> Result<A> {
        A::from_entity(self.build())
    }
}

macro_rules! asset_types {
    ($( $(#[$meta:meta])* $name:ident => $type_name:literal ),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
            #[serde(transparent)]
            pub struct $name(Entity);

            impl AssetType for $name {
                const TYPE_NAME: &'static str = $type_name;

                fn as_entity(&self) -> &Entity {
                    &self.0
                }

                fn into_entity(self) -> Entity {
                    self.0
                }

                fn from_entity_unchecked(entity: Entity) -> Self {
                    Self(entity)
                }
            }

            impl HasIdentity for $name {
                fn type_name(&self) -> &str {
                    &self.0.type_name
                }

                fn guid(&self) -> Option<&EntityId> {
                    self.0.guid.as_ref()
                }

                fn qualified_name(&self) -> Option<&str> {
                    self.0.qualified_name()
                }

                fn unique_qualified_name(&self) -> Option<&str> {
                    HasIdentity::unique_qualified_name(&self.0)
                }

                fn name(&self) -> Option<&str> {
                    self.0.name()
                }
            }

            impl std::ops::Deref for $name {
                type Target = Entity;

                fn deref(&self) -> &Entity {
                    &self.0
                }
            }

            impl From<$name> for Entity {
                fn from(asset: $name) -> Entity {
                    asset.0
                }
            }

            impl TryFrom<Entity> for $name {
                type Error = SdkError;

                fn try_from(entity: Entity) -> Result<Self> {
                    <$name as AssetType>::from_entity(entity)
                }
            }
        )*
    };
}

asset_types! {
    /// A saved query against an API
    ApiQuery => "APIQuery",
    /// An API specification
    ApiSpec => "APISpec",
    AuthService => "AuthService",
    CogniteEvent => "CogniteEvent",
    /// External link attached to another asset
    Link => "Link",
    Task => "Task",
    /// Rich-text documentation attached to another asset
    Readme => "Readme",
    Table => "Table",
    Column => "Column",
    Schema => "Schema",
    Database => "Database",
    /// A business glossary term
    GlossaryTerm => "AtlasGlossaryTerm",
}

/// Relationship from readmes and links to the asset they document
pub const ASSET_RELATIONSHIP: &str = "asset";
/// Attribute holding a link's URL
pub const LINK_ATTRIBUTE: &str = "link";

impl Readme {
    /// A new readme for `asset`, which must already have a server GUID.
    pub fn creator<E>(asset: &E, asset_name: &str, content: impl Into<String>) -> Result<Self>
    where
        E: HasIdentity + ?Sized,
    {
        let Some(asset_guid) = asset.guid().and_then(EntityId::as_guid) else {
            return Err(SdkError::MissingRequiredField {
                type_name: asset.type_name().to_string(),
                fields: vec!["guid"],
            });
        };
        let reference = resolve::resolve_reference(asset)?;

        Self::builder()
            .placeholder_guid()
            .qualified_name(format!("{}/readme", asset_guid))
            .name(format!("{} Readme", asset_name))
            .description(content)
            .relationship_one(ASSET_RELATIONSHIP, reference)
            .build_as()
    }

    /// Markdown or HTML body of the readme
    pub fn content(&self) -> Option<&str> {
        self.0.description()
    }
}

impl Link {
    /// A new link attached to `asset`.
    pub fn creator<E>(asset: &E, title: impl Into<String>, url: impl Into<String>) -> Result<Self>
    where
        E: HasIdentity + ?Sized,
    {
        let reference = resolve::resolve_reference(asset)?;

        Self::builder()
            .placeholder_guid()
            .qualified_name(Uuid::new_v4().to_string())
            .name(title)
            .attribute(LINK_ATTRIBUTE, url.into())
            .relationship_one(ASSET_RELATIONSHIP, reference)
            .build_as()
    }

    pub fn url(&self) -> Option<&str> {
        self.0.attribute(LINK_ATTRIBUTE).and_then(|v| v.as_str())
    }
}

impl GlossaryTerm {
    /// Reference suitable for `assigned_terms`, carrying `semantic`
    pub fn term_ref(qualified_name: impl Into<String>, semantic: SaveSemantic) -> EntityReference {
        Self::ref_by_qualified_name_with(qualified_name, semantic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{attr, looks_like_guid, AttributeValue};

    fn table() -> Table {
        Table::builder()
            .guid("5d9a1b0e-6b7d-4a8e-9a1f-1d2e3f4a5b6c")
            .qualified_name("default/db/schema/orders")
            .name("orders")
            .description("All orders")
            .build_as()
            .unwrap()
    }

    #[test]
    fn test_from_entity_checks_type() {
        let column = Column::builder().qualified_name("default/db/c").build();
        let err = Table::from_entity(column).unwrap_err();
        assert!(matches!(
            err,
            SdkError::WrongTypeRequested { ref expected_type, .. } if expected_type == "Table"
        ));
    }

    #[test]
    fn test_trim_to_reference_prefers_guid() {
        let reference = table().trim_to_reference().unwrap();
        assert_eq!(reference.type_name, "Table");
        assert_eq!(
            reference.guid,
            Some(EntityId::guid("5d9a1b0e-6b7d-4a8e-9a1f-1d2e3f4a5b6c"))
        );
        assert!(reference.unique_attributes.is_none());
    }

    #[test]
    fn test_trim_to_required_drops_everything_else() {
        let updater = table().trim_to_required().unwrap().build();
        assert_eq!(updater.qualified_name(), Some("default/db/schema/orders"));
        assert_eq!(updater.name(), Some("orders"));
        assert!(updater.description().is_none());
        assert!(updater.guid.as_ref().is_some_and(EntityId::is_unassigned));
    }

    #[test]
    fn test_readme_creator() {
        let readme = Readme::creator(&table(), "orders", "<p>Docs</p>").unwrap();

        assert_eq!(
            readme.qualified_name(),
            Some("5d9a1b0e-6b7d-4a8e-9a1f-1d2e3f4a5b6c/readme")
        );
        assert_eq!(readme.name(), Some("orders Readme"));
        assert_eq!(readme.content(), Some("<p>Docs</p>"));
        match readme.relationship(ASSET_RELATIONSHIP) {
            Some(AttributeValue::Reference(r)) => assert_eq!(r.type_name, "Table"),
            other => panic!("unexpected asset relationship: {other:?}"),
        }
    }

    #[test]
    fn test_readme_requires_persisted_asset() {
        let unsaved = Table::builder()
            .placeholder_guid()
            .qualified_name("default/db/schema/new")
            .build_as::<Table>()
            .unwrap();
        assert!(matches!(
            Readme::creator(&unsaved, "new", "x"),
            Err(SdkError::MissingRequiredField { .. })
        ));
    }

    #[test]
    fn test_link_creator() {
        let link = Link::creator(&table(), "Runbook", "https://wiki.example.com/orders").unwrap();

        assert!(looks_like_guid(link.qualified_name().unwrap()));
        assert_eq!(link.name(), Some("Runbook"));
        assert_eq!(link.url(), Some("https://wiki.example.com/orders"));
        assert!(link.guid.as_ref().is_some_and(EntityId::is_unassigned));
    }

    #[test]
    fn test_refs_carry_requested_semantic() {
        let by_guid = Table::ref_by_guid_with("g1", SaveSemantic::Remove);
        assert_eq!(by_guid.type_name, "Table");
        assert_eq!(by_guid.guid, Some(EntityId::guid("g1")));
        assert_eq!(by_guid.semantic, SaveSemantic::Remove);

        let by_name = GlossaryTerm::ref_by_qualified_name_with("t@g", SaveSemantic::Append);
        assert_eq!(by_name.type_name, "AtlasGlossaryTerm");
        assert_eq!(by_name.qualified_name(), Some("t@g"));
        assert_eq!(by_name.semantic, SaveSemantic::Append);

        assert_eq!(Table::ref_by_guid("g1").semantic, SaveSemantic::Replace);
    }

    #[test]
    fn test_transparent_serialization() {
        let json = serde_json::to_value(table()).unwrap();
        assert_eq!(json["typeName"], "Table");
        assert_eq!(json["attributes"][attr::NAME], "orders");
    }
}
