//! Minimal references used to declare relationships

use super::ids::EntityId;
use serde::{Deserialize, Serialize};

/// How a submitted reference affects a collection-valued relationship.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SaveSemantic {
    /// The submitted set replaces the current one
    #[default]
    Replace,
    /// Added to the current set
    Append,
    /// Removed from the current set
    Remove,
}

/// Structured unique key of an entity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniqueAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualified_name: Option<String>,
}

impl UniqueAttributes {
    pub fn qualified_name(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: Some(qualified_name.into()),
        }
    }
}

/// Identifies an entity without carrying its data.
///
/// At least one of `guid` / `unique_attributes.qualified_name` should be set;
/// this is checked when a reference is resolved, not on assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityReference {
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_attributes: Option<UniqueAttributes>,
    /// Routes the reference into the replace/append/remove relationship map
    /// of the owning entity; never sent on its own.
    #[serde(skip)]
    pub semantic: SaveSemantic,
}

impl EntityReference {
    /// Reference keyed by GUID
    pub fn by_guid(type_name: impl Into<String>, guid: impl Into<EntityId>) -> Self {
        Self {
            type_name: type_name.into(),
            guid: Some(guid.into()),
            unique_attributes: None,
            semantic: SaveSemantic::Replace,
        }
    }

    /// Reference keyed by qualifiedName
    pub fn by_qualified_name(
        type_name: impl Into<String>,
        qualified_name: impl Into<String>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            guid: None,
            unique_attributes: Some(UniqueAttributes::qualified_name(qualified_name)),
            semantic: SaveSemantic::Replace,
        }
    }

    pub fn with_semantic(mut self, semantic: SaveSemantic) -> Self {
        self.semantic = semantic;
        self
    }

    pub fn qualified_name(&self) -> Option<&str> {
        self.unique_attributes
            .as_ref()
            .and_then(|u| u.qualified_name.as_deref())
    }

    /// Whether both references point at the same entity.
    ///
    /// GUIDs are compared when both sides have one; otherwise the
    /// qualifiedNames are.
    pub fn same_target(&self, other: &EntityReference) -> bool {
        if self.type_name != other.type_name {
            return false;
        }
        match (&self.guid, &other.guid) {
            (Some(a), Some(b)) if !a.is_empty() && !b.is_empty() => a == b,
            _ => match (self.qualified_name(), other.qualified_name()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semantic_is_not_serialized() {
        let reference = EntityReference::by_qualified_name("AtlasGlossaryTerm", "term@glossary")
            .with_semantic(SaveSemantic::Append);
        let json = serde_json::to_value(&reference).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "typeName": "AtlasGlossaryTerm",
                "uniqueAttributes": {"qualifiedName": "term@glossary"}
            })
        );

        let back: EntityReference = serde_json::from_value(json).unwrap();
        assert_eq!(back.semantic, SaveSemantic::Replace);
    }

    #[test]
    fn test_same_target() {
        let by_guid = EntityReference::by_guid("Table", "g1");
        let by_qn = EntityReference::by_qualified_name("Table", "default/db/t");
        let mut both = by_qn.clone();
        both.guid = Some(EntityId::guid("g1"));

        assert!(by_guid.same_target(&both));
        assert!(by_qn.same_target(&both));
        assert!(!by_guid.same_target(&by_qn));
        assert!(!by_guid.same_target(&EntityReference::by_guid("Column", "g1")));
    }
}
