use serde::{Deserialize, Serialize};

/// Metadata the compiler needs about the root entity of a request.
pub trait EntityMetadata {
    /// Unqualified entity name as used in the FROM clause, e.g. `Parent`.
    fn simple_name(&self) -> &str;

    /// Navigable to-one relationship fields, in declaration order.
    fn relationship_fields(&self) -> Vec<String>;

    fn is_valid_entity(&self) -> bool {
        true
    }

    fn is_relationship(&self, field: &str) -> bool {
        self.relationship_fields().iter().any(|f| f == field)
    }
}

/// A statically registered entity description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySchema {
    pub name: String,
    #[serde(default)]
    pub relationships: Vec<String>,
    #[serde(default = "default_entity")]
    pub entity: bool,
}

fn default_entity() -> bool {
    true
}

impl EntitySchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            relationships: Vec::new(),
            entity: true,
        }
    }

    pub fn with_relationship(mut self, field: impl Into<String>) -> Self {
        let field = field.into();
        if !self.relationships.contains(&field) {
            self.relationships.push(field);
        }
        self
    }

    /// Marks the type as something that is not a persistent entity.
    pub fn not_entity(mut self) -> Self {
        self.entity = false;
        self
    }
}

impl EntityMetadata for EntitySchema {
    fn simple_name(&self) -> &str {
        &self.name
    }

    fn relationship_fields(&self) -> Vec<String> {
        self.relationships.clone()
    }

    fn is_valid_entity(&self) -> bool {
        self.entity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_metadata() {
        let schema = EntitySchema::new("Parent")
            .with_relationship("child")
            .with_relationship("owner")
            .with_relationship("child");

        assert_eq!(schema.simple_name(), "Parent");
        assert_eq!(schema.relationship_fields(), vec!["child", "owner"]);
        assert!(schema.is_relationship("owner"));
        assert!(!schema.is_relationship("data"));
        assert!(schema.is_valid_entity());
        assert!(!schema.not_entity().is_valid_entity());
    }

    #[test]
    fn test_deserialize_schema() {
        let schema: EntitySchema =
            serde_json::from_str(r#"{"name": "Parent", "relationships": ["child"]}"#).unwrap();
        assert!(schema.is_valid_entity());
        assert!(schema.is_relationship("child"));
    }
}
