//! The identity capability shared by entities, references and asset types

use super::entity::Entity;
use super::ids::EntityId;
use super::reference::{EntityReference, SaveSemantic};

/// Anything that can be reduced to a reference.
pub trait HasIdentity {
    /// Concrete type name, e.g. "Table"
    fn type_name(&self) -> &str;

    fn guid(&self) -> Option<&EntityId>;

    /// qualifiedName held as an ordinary attribute
    fn qualified_name(&self) -> Option<&str>;

    /// qualifiedName held in the structured unique key
    fn unique_qualified_name(&self) -> Option<&str>;

    fn name(&self) -> Option<&str> {
        None
    }

    /// Semantic a reference to this value should carry
    fn save_semantic(&self) -> SaveSemantic {
        SaveSemantic::Replace
    }
}

impl HasIdentity for Entity {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn guid(&self) -> Option<&EntityId> {
        self.guid.as_ref()
    }

    fn qualified_name(&self) -> Option<&str> {
        Entity::qualified_name(self)
    }

    fn unique_qualified_name(&self) -> Option<&str> {
        self.unique_attributes
            .as_ref()
            .and_then(|u| u.qualified_name.as_deref())
    }

    fn name(&self) -> Option<&str> {
        Entity::name(self)
    }
}

impl HasIdentity for EntityReference {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn guid(&self) -> Option<&EntityId> {
        self.guid.as_ref()
    }

    fn qualified_name(&self) -> Option<&str> {
        None
    }

    fn unique_qualified_name(&self) -> Option<&str> {
        EntityReference::qualified_name(self)
    }

    fn save_semantic(&self) -> SaveSemantic {
        self.semantic
    }
}
