//! Full entities, Atlan tags and the fluent entity builder

use super::ids::EntityId;
use super::reference::{EntityReference, SaveSemantic, UniqueAttributes};
use super::value::{AnnouncementType, AttributeValue, CertificateStatus, EntityStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Open attribute bag, keyed by schema attribute name
pub type Attributes = BTreeMap<String, AttributeValue>;

/// Attribute names shared by every asset type
pub mod attr {
    pub const QUALIFIED_NAME: &str = "qualifiedName";
    pub const NAME: &str = "name";
    pub const DESCRIPTION: &str = "description";
    pub const USER_DESCRIPTION: &str = "userDescription";
    pub const CERTIFICATE_STATUS: &str = "certificateStatus";
    pub const CERTIFICATE_STATUS_MESSAGE: &str = "certificateStatusMessage";
    pub const ANNOUNCEMENT_TYPE: &str = "announcementType";
    pub const ANNOUNCEMENT_TITLE: &str = "announcementTitle";
    pub const ANNOUNCEMENT_MESSAGE: &str = "announcementMessage";
    pub const OWNER_USERS: &str = "ownerUsers";
    pub const OWNER_GROUPS: &str = "ownerGroups";
    /// Relationship to assigned glossary terms
    pub const MEANINGS: &str = "meanings";
}

/// A typed catalog record: identity plus an open attribute bag.
///
/// Relationship-valued attributes hold [`EntityReference`]s, never owned
/// entities. They are kept in three maps so the save semantic of each
/// reference survives serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EntityStatus>,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub relationship_attributes: Attributes,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub append_relationship_attributes: Attributes,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub remove_relationship_attributes: Attributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_attributes: Option<UniqueAttributes>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classifications: Vec<AtlanTag>,
}

impl Entity {
    /// An empty entity of the given type
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            guid: None,
            status: None,
            attributes: Attributes::new(),
            relationship_attributes: Attributes::new(),
            append_relationship_attributes: Attributes::new(),
            remove_relationship_attributes: Attributes::new(),
            unique_attributes: None,
            classifications: Vec::new(),
        }
    }

    pub fn builder(type_name: impl Into<String>) -> EntityBuilder {
        EntityBuilder::new(type_name)
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    fn str_attribute(&self, name: &str) -> Option<&str> {
        self.attribute(name).and_then(AttributeValue::as_str)
    }

    /// Relationship value, falling back to the plain attribute bag where
    /// some endpoints place it.
    pub fn relationship(&self, name: &str) -> Option<&AttributeValue> {
        self.relationship_attributes
            .get(name)
            .or_else(|| self.attributes.get(name))
    }

    pub fn qualified_name(&self) -> Option<&str> {
        self.str_attribute(attr::QUALIFIED_NAME)
    }

    pub fn name(&self) -> Option<&str> {
        self.str_attribute(attr::NAME)
    }

    pub fn description(&self) -> Option<&str> {
        self.str_attribute(attr::DESCRIPTION)
    }

    pub fn user_description(&self) -> Option<&str> {
        self.str_attribute(attr::USER_DESCRIPTION)
    }

    pub fn certificate_status(&self) -> Option<CertificateStatus> {
        self.str_attribute(attr::CERTIFICATE_STATUS)
            .and_then(CertificateStatus::parse)
    }

    pub fn certificate_status_message(&self) -> Option<&str> {
        self.str_attribute(attr::CERTIFICATE_STATUS_MESSAGE)
    }

    pub fn announcement_type(&self) -> Option<AnnouncementType> {
        self.str_attribute(attr::ANNOUNCEMENT_TYPE)
            .and_then(AnnouncementType::parse)
    }

    pub fn announcement_title(&self) -> Option<&str> {
        self.str_attribute(attr::ANNOUNCEMENT_TITLE)
    }

    pub fn announcement_message(&self) -> Option<&str> {
        self.str_attribute(attr::ANNOUNCEMENT_MESSAGE)
    }

    pub fn owner_users(&self) -> &[String] {
        self.attribute(attr::OWNER_USERS)
            .and_then(AttributeValue::as_strings)
            .unwrap_or_default()
    }

    pub fn owner_groups(&self) -> &[String] {
        self.attribute(attr::OWNER_GROUPS)
            .and_then(AttributeValue::as_strings)
            .unwrap_or_default()
    }

    /// Glossary terms assigned to this entity
    pub fn assigned_terms(&self) -> &[EntityReference] {
        self.relationship(attr::MEANINGS)
            .and_then(AttributeValue::as_references)
            .unwrap_or_default()
    }

    pub fn atlan_tags(&self) -> &[AtlanTag] {
        &self.classifications
    }

    /// Entities without a status have never been soft-deleted
    pub fn is_active(&self) -> bool {
        matches!(self.status, None | Some(EntityStatus::Active))
    }
}

/// A classification attached to an entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtlanTag {
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_guid: Option<String>,
    #[serde(default)]
    pub propagate: bool,
    #[serde(default)]
    pub remove_propagations_on_entity_delete: bool,
    #[serde(default)]
    pub restrict_propagation_through_lineage: bool,
    #[serde(default)]
    pub restrict_propagation_through_hierarchy: bool,
}

/// Propagation flags applied when appending tags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagOptions {
    pub propagate: bool,
    pub remove_propagations_on_delete: bool,
    pub restrict_lineage_propagation: bool,
    pub restrict_propagation_through_hierarchy: bool,
}

impl Default for TagOptions {
    fn default() -> Self {
        Self {
            propagate: true,
            remove_propagations_on_delete: true,
            restrict_lineage_propagation: false,
            restrict_propagation_through_hierarchy: false,
        }
    }
}

impl TagOptions {
    /// Tag that is never propagated
    pub fn no_propagation() -> Self {
        Self {
            propagate: false,
            remove_propagations_on_delete: false,
            ..Self::default()
        }
    }

    /// Build a tag of the given name carrying these flags
    pub fn tag(&self, type_name: impl Into<String>) -> AtlanTag {
        AtlanTag {
            type_name: type_name.into(),
            entity_guid: None,
            propagate: self.propagate,
            remove_propagations_on_entity_delete: self.remove_propagations_on_delete,
            restrict_propagation_through_lineage: self.restrict_lineage_propagation,
            restrict_propagation_through_hierarchy: self.restrict_propagation_through_hierarchy,
        }
    }
}

/// Fluent builder for [`Entity`]
///
/// # Example
///
/// ```rust
/// use catalog_sdk::{CertificateStatus, EntityBuilder};
///
/// let table = EntityBuilder::new("Table")
///     .qualified_name("default/snowflake/1700000000/db/schema/orders")
///     .name("orders")
///     .certificate(CertificateStatus::Verified, Some("Reviewed"))
///     .build();
///
/// assert_eq!(table.name(), Some("orders"));
/// ```
#[derive(Debug, Clone)]
pub struct EntityBuilder {
    entity: Entity,
}

impl EntityBuilder {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            entity: Entity::new(type_name),
        }
    }

    /// Continue building from an existing entity
    pub fn from_entity(entity: Entity) -> Self {
        Self { entity }
    }

    pub fn type_name(&self) -> &str {
        &self.entity.type_name
    }

    pub fn guid(mut self, guid: impl Into<EntityId>) -> Self {
        self.entity.guid = Some(guid.into());
        self
    }

    /// Assign a fresh negative placeholder GUID
    pub fn placeholder_guid(self) -> Self {
        self.guid(EntityId::unassigned())
    }

    pub fn status(mut self, status: EntityStatus) -> Self {
        self.entity.status = Some(status);
        self
    }

    pub fn qualified_name(self, qualified_name: impl Into<String>) -> Self {
        self.attribute(attr::QUALIFIED_NAME, qualified_name.into())
    }

    pub fn name(self, name: impl Into<String>) -> Self {
        self.attribute(attr::NAME, name.into())
    }

    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.entity.attributes.insert(name.into(), value.into());
        self
    }

    /// Explicitly clear an attribute on the next save
    pub fn null_attribute(mut self, name: impl Into<String>) -> Self {
        self.entity.attributes.insert(name.into(), AttributeValue::Null);
        self
    }

    pub fn description(self, description: impl Into<String>) -> Self {
        self.attribute(attr::DESCRIPTION, description.into())
    }

    pub fn user_description(self, description: impl Into<String>) -> Self {
        self.attribute(attr::USER_DESCRIPTION, description.into())
    }

    pub fn certificate(self, status: CertificateStatus, message: Option<&str>) -> Self {
        let builder = self.attribute(attr::CERTIFICATE_STATUS, status.as_str());
        match message {
            Some(message) => builder.attribute(attr::CERTIFICATE_STATUS_MESSAGE, message),
            None => builder,
        }
    }

    pub fn announcement(
        self,
        kind: AnnouncementType,
        title: impl Into<String>,
        message: Option<&str>,
    ) -> Self {
        let builder = self
            .attribute(attr::ANNOUNCEMENT_TYPE, kind.as_str())
            .attribute(attr::ANNOUNCEMENT_TITLE, title.into());
        match message {
            Some(message) => builder.attribute(attr::ANNOUNCEMENT_MESSAGE, message),
            None => builder,
        }
    }

    pub fn owner_users<I, S>(self, users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let users: Vec<String> = users.into_iter().map(Into::into).collect();
        self.attribute(attr::OWNER_USERS, users)
    }

    pub fn owner_groups<I, S>(self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let groups: Vec<String> = groups.into_iter().map(Into::into).collect();
        self.attribute(attr::OWNER_GROUPS, groups)
    }

    /// Set a relationship, routing each reference by its save semantic.
    ///
    /// An empty iterator replaces the relationship with an empty set.
    pub fn relationship<I>(mut self, name: impl Into<String>, references: I) -> Self
    where
        I: IntoIterator<Item = EntityReference>,
    {
        let name = name.into();
        let mut replace = Vec::new();
        let mut append = Vec::new();
        let mut remove = Vec::new();
        for reference in references {
            match reference.semantic {
                SaveSemantic::Replace => replace.push(reference),
                SaveSemantic::Append => append.push(reference),
                SaveSemantic::Remove => remove.push(reference),
            }
        }

        let nothing_given = replace.is_empty() && append.is_empty() && remove.is_empty();
        if !replace.is_empty() || nothing_given {
            self.entity
                .relationship_attributes
                .insert(name.clone(), AttributeValue::References(replace));
        }
        if !append.is_empty() {
            self.entity
                .append_relationship_attributes
                .insert(name.clone(), AttributeValue::References(append));
        }
        if !remove.is_empty() {
            self.entity
                .remove_relationship_attributes
                .insert(name, AttributeValue::References(remove));
        }
        self
    }

    /// Single-valued relationship
    pub fn relationship_one(mut self, name: impl Into<String>, reference: EntityReference) -> Self {
        self.entity
            .relationship_attributes
            .insert(name.into(), AttributeValue::Reference(reference));
        self
    }

    /// Explicitly clear a relationship on the next save
    pub fn null_relationship(mut self, name: impl Into<String>) -> Self {
        self.entity
            .relationship_attributes
            .insert(name.into(), AttributeValue::Null);
        self
    }

    pub fn assigned_terms<I>(self, terms: I) -> Self
    where
        I: IntoIterator<Item = EntityReference>,
    {
        self.relationship(attr::MEANINGS, terms)
    }

    pub fn atlan_tag(mut self, tag: AtlanTag) -> Self {
        self.entity.classifications.push(tag);
        self
    }

    pub fn build(self) -> Entity {
        self.entity
    }
}
