//! Error types for the catalog SDK

use thiserror::Error;

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;

/// SDK error types
#[derive(Error, Debug)]
pub enum SdkError {
    /// No GUID or qualifiedName to build a reference from
    #[error("{type_name} has no usable identifier, expected one of: {}", .fields.join(", "))]
    MissingIdentifier {
        type_name: String,
        fields: Vec<&'static str>,
    },

    /// Fields required for a partial update are absent
    #[error("{type_name} is missing required field(s): {}", .fields.join(", "))]
    MissingRequiredField {
        type_name: String,
        fields: Vec<&'static str>,
    },

    /// Nothing exists with this GUID
    #[error("No asset found with GUID: {0}")]
    NotFoundByGuid(String),

    /// Nothing of this type exists with this qualifiedName
    #[error("No {type_name} found with qualifiedName: {qualified_name}")]
    NotFoundByQualifiedName {
        type_name: String,
        qualified_name: String,
    },

    /// Found, but not of the requested type
    #[error("Asset {identifier} is not of the requested type {expected_type}")]
    WrongTypeRequested {
        identifier: String,
        expected_type: String,
    },

    /// Caller passed an argument that cannot be dispatched
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Transport, authentication or server failure, passed through as-is
    #[cfg(feature = "http")]
    #[error(transparent)]
    Transport(#[from] catalog_client::ClientError),
}

impl SdkError {
    pub(crate) fn missing_identifier(type_name: impl Into<String>) -> Self {
        Self::MissingIdentifier {
            type_name: type_name.into(),
            fields: vec!["guid", "qualifiedName"],
        }
    }

    pub(crate) fn wrong_type(identifier: impl Into<String>, expected_type: impl Into<String>) -> Self {
        Self::WrongTypeRequested {
            identifier: identifier.into(),
            expected_type: expected_type.into(),
        }
    }

    /// Whether this error means "nothing exists at that identifier"
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFoundByGuid(_) | Self::NotFoundByQualifiedName { .. }
        )
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(err: serde_json::Error) -> Self {
        SdkError::Serialization(err.to_string())
    }
}
