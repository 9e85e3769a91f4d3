//! Entity identifiers
//!
//! Server-assigned GUIDs and client-side placeholders share one wire field.
//! [`EntityId`] keeps them apart in the type system; [`Identifier`] does the
//! same for the GUID-or-qualifiedName strings callers pass to lookups.

use crate::error::{Result, SdkError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identity of an entity, persisted or not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityId {
    /// Server-assigned GUID
    Guid(String),
    /// Not yet persisted: a negative sentinel telling the server that the
    /// qualifiedName is authoritative.
    Unassigned(i64),
}

impl EntityId {
    /// A GUID-keyed identity
    pub fn guid(guid: impl Into<String>) -> Self {
        Self::Guid(guid.into())
    }

    /// A fresh negative placeholder
    pub fn unassigned() -> Self {
        let magnitude: i64 = rand::thread_rng().gen_range(1..i64::MAX);
        Self::Unassigned(-magnitude)
    }

    pub fn is_unassigned(&self) -> bool {
        matches!(self, Self::Unassigned(_))
    }

    /// Empty GUID strings count as no identity at all
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Guid(guid) if guid.is_empty())
    }

    /// The server GUID, if this identity has one
    pub fn as_guid(&self) -> Option<&str> {
        match self {
            Self::Guid(guid) => Some(guid),
            Self::Unassigned(_) => None,
        }
    }
}

impl From<String> for EntityId {
    fn from(raw: String) -> Self {
        match raw.parse::<i64>() {
            Ok(n) if n < 0 => Self::Unassigned(n),
            _ => Self::Guid(raw),
        }
    }
}

impl From<&str> for EntityId {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.to_string()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Guid(guid) => f.write_str(guid),
            Self::Unassigned(n) => write!(f, "{}", n),
        }
    }
}

/// What a caller looks an entity up by.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    Guid(String),
    QualifiedName(String),
}

impl Identifier {
    /// Classify a raw string: UUID-shaped means GUID, anything else is a
    /// qualifiedName. A qualifiedName that happens to be UUID-shaped is
    /// misrouted; construct [`Identifier::QualifiedName`] directly to avoid it.
    pub fn classify(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(SdkError::InvalidRequest(
                "identifier must not be empty".to_string(),
            ));
        }
        if looks_like_guid(raw) {
            Ok(Self::Guid(raw.to_string()))
        } else {
            Ok(Self::QualifiedName(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Guid(s) | Self::QualifiedName(s) => s,
        }
    }

    pub fn is_guid(&self) -> bool {
        matches!(self, Self::Guid(_))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hyphenated 8-4-4-4-12 hex form only.
pub fn looks_like_guid(raw: &str) -> bool {
    raw.len() == 36 && Uuid::try_parse(raw).is_ok()
}
