//! Attribute projections for fetches

/// Which attributes to materialize on a fetched entity and on the entities
/// it relates to. Governs completeness of the result, not its identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeProjection {
    /// Attributes of the entity itself
    pub attributes: Vec<String>,
    /// Attributes of related entities
    pub related_attributes: Vec<String>,
}

impl AttributeProjection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attributes<I, J>(attributes: I, related_attributes: J) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        J: IntoIterator,
        J::Item: Into<String>,
    {
        Self {
            attributes: attributes.into_iter().map(Into::into).collect(),
            related_attributes: related_attributes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn attribute(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.attributes.contains(&name) {
            self.attributes.push(name);
        }
        self
    }

    pub fn related_attribute(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.related_attributes.contains(&name) {
            self.related_attributes.push(name);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.related_attributes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_deduplicates() {
        let projection = AttributeProjection::new()
            .attribute("description")
            .attribute("description")
            .related_attribute("name");

        assert_eq!(projection.attributes, vec!["description"]);
        assert_eq!(projection.related_attributes, vec!["name"]);
        assert!(!projection.is_empty());
        assert!(AttributeProjection::new().is_empty());
    }
}
