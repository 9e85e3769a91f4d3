//! Entity model: identifiers, references, values and projections

mod entity;
mod identity;
mod ids;
mod projection;
mod reference;
mod value;

pub use entity::{attr, AtlanTag, Attributes, Entity, EntityBuilder, TagOptions};
pub use identity::HasIdentity;
pub use ids::{looks_like_guid, EntityId, Identifier};
pub use projection::AttributeProjection;
pub use reference::{EntityReference, SaveSemantic, UniqueAttributes};
pub use value::{AnnouncementType, AttributeValue, CertificateStatus, EntityStatus};
