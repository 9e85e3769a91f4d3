//! Attribute values and the enumerations shared by every asset type

use super::reference::EntityReference;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A single attribute in an entity's attribute bag.
///
/// `Null` in a submitted partial update clears the attribute server-side.
/// Decoding picks the narrowest shape; see [`AttributeValue::from_json`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Reference(EntityReference),
    References(Vec<EntityReference>),
    Strings(Vec<String>),
    Json(serde_json::Value),
}

impl AttributeValue {
    /// Classify raw JSON.
    ///
    /// Objects are references only when keyed by `guid` or
    /// `uniqueAttributes` and carrying no `attributes`; anything else that
    /// is not a scalar or a string array is kept whole as `Json`. An empty
    /// array decodes as an empty `Strings`.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(f) = n.as_f64() {
                    Self::Float(f)
                } else {
                    Self::Json(Value::Number(n))
                }
            }
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::from_array(items),
            Value::Object(map) => {
                let value = Value::Object(map);
                match as_reference(&value) {
                    Some(reference) => Self::Reference(reference),
                    None => Self::Json(value),
                }
            }
        }
    }

    fn from_array(items: Vec<Value>) -> Self {
        if items.iter().all(Value::is_string) {
            return Self::Strings(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
            );
        }
        let references: Option<Vec<EntityReference>> = items.iter().map(as_reference).collect();
        match references {
            Some(references) => Self::References(references),
            None => Self::Json(Value::Array(items)),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Single references are viewed as a one-element slice
    pub fn as_references(&self) -> Option<&[EntityReference]> {
        match self {
            Self::Reference(r) => Some(std::slice::from_ref(r)),
            Self::References(refs) => Some(refs),
            _ => None,
        }
    }

    pub fn as_strings(&self) -> Option<&[String]> {
        match self {
            Self::Strings(values) => Some(values),
            _ => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<EntityReference> for AttributeValue {
    fn from(value: EntityReference) -> Self {
        Self::Reference(value)
    }
}

impl From<Vec<EntityReference>> for AttributeValue {
    fn from(value: Vec<EntityReference>) -> Self {
        Self::References(value)
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(value: Vec<String>) -> Self {
        Self::Strings(value)
    }
}

fn is_reference_shape(map: &Map<String, Value>) -> bool {
    map.get("typeName").is_some_and(Value::is_string)
        && (map.contains_key("guid") || map.contains_key("uniqueAttributes"))
        && !map.contains_key("attributes")
}

fn as_reference(value: &Value) -> Option<EntityReference> {
    match value {
        Value::Object(map) if is_reference_shape(map) => {
            EntityReference::deserialize(value).ok()
        }
        _ => None,
    }
}

impl<'de> Deserialize<'de> for AttributeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_json)
    }
}

/// Lifecycle status reported by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityStatus {
    Active,
    Deleted,
    Purged,
}

impl EntityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Deleted => "DELETED",
            Self::Purged => "PURGED",
        }
    }
}

/// Certification state of an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CertificateStatus {
    Verified,
    Draft,
    Deprecated,
}

impl CertificateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verified => "VERIFIED",
            Self::Draft => "DRAFT",
            Self::Deprecated => "DEPRECATED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "VERIFIED" => Some(Self::Verified),
            "DRAFT" => Some(Self::Draft),
            "DEPRECATED" => Some(Self::Deprecated),
            _ => None,
        }
    }
}

/// Severity of an announcement banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnouncementType {
    Information,
    Warning,
    Issue,
}

impl AnnouncementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Information => "information",
            Self::Warning => "warning",
            Self::Issue => "issue",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "information" => Some(Self::Information),
            "warning" => Some(Self::Warning),
            "issue" => Some(Self::Issue),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_untagged_decoding_picks_narrowest_shape() {
        let decode = |v: serde_json::Value| serde_json::from_value::<AttributeValue>(v).unwrap();

        assert_eq!(decode(json!(null)), AttributeValue::Null);
        assert_eq!(decode(json!(7)), AttributeValue::Int(7));
        assert_eq!(decode(json!(1.5)), AttributeValue::Float(1.5));
        assert_eq!(decode(json!("x")), AttributeValue::from("x"));
        assert_eq!(
            decode(json!(["a", "b"])),
            AttributeValue::Strings(vec!["a".into(), "b".into()])
        );
        assert!(matches!(
            decode(json!({"typeName": "Table", "guid": "g1"})),
            AttributeValue::Reference(_)
        ));
        assert!(matches!(
            decode(json!([{"typeName": "Table", "guid": "g1"}])),
            AttributeValue::References(_)
        ));
        assert!(matches!(
            decode(json!({"nested": true})),
            AttributeValue::Json(_)
        ));
        assert_eq!(decode(json!(["jane"])), AttributeValue::Strings(vec!["jane".into()]));
        assert_eq!(decode(json!([])), AttributeValue::Strings(vec![]));
    }

    #[test]
    fn test_struct_values_are_kept_whole() {
        let raw = json!({
            "typeName": "SourceTagAttachment",
            "attributes": {"sourceTagName": "pii", "sourceTagQualifiedName": "default/snowflake/pii"}
        });
        let value = serde_json::from_value::<AttributeValue>(raw.clone()).unwrap();

        assert_eq!(value, AttributeValue::Json(raw.clone()));
        assert_eq!(serde_json::to_value(&value).unwrap(), raw);
    }

    #[test]
    fn test_related_entity_with_attributes_is_not_truncated() {
        let raw = json!([{
            "typeName": "AtlasGlossaryTerm",
            "guid": "t1",
            "attributes": {"name": "Revenue"}
        }]);
        let value = serde_json::from_value::<AttributeValue>(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&value).unwrap(), raw);
    }

    #[test]
    fn test_mixed_arrays_fall_back_to_json() {
        let raw = json!(["a", 1]);
        assert_eq!(
            serde_json::from_value::<AttributeValue>(raw.clone()).unwrap(),
            AttributeValue::Json(raw)
        );
    }

    #[test]
    fn test_single_reference_viewed_as_slice() {
        let value = AttributeValue::from(EntityReference::by_guid("Table", "g1"));
        assert_eq!(value.as_references().map(|r| r.len()), Some(1));
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(serde_json::to_value(CertificateStatus::Verified).unwrap(), json!("VERIFIED"));
        assert_eq!(serde_json::to_value(AnnouncementType::Warning).unwrap(), json!("warning"));
        assert_eq!(CertificateStatus::parse("DRAFT"), Some(CertificateStatus::Draft));
        assert_eq!(AnnouncementType::parse("issue"), Some(AnnouncementType::Issue));
    }
}
