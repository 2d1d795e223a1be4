// Semantic schema definitions for field mapping
//
// A semantic schema names the abstract fields a content type exposes and maps
// each of them to a concrete path inside the generic field-value tree the
// upstream repository delivers. Schemas are loaded once per localization and
// never mutated afterwards.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    fmt::{Display, Formatter},
    sync::Arc,
};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identity of one semantic field: vocabulary, entity name, property name.
///
/// Two schemas that declare the same `FieldSemantics` describe the same
/// abstract field; the field resolver's merge policy decides which concrete
/// path wins.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FieldSemantics {
    pub vocabulary: String,
    pub entity: String,
    pub property: String,
}

impl FieldSemantics {
    pub fn new(vocabulary: &str, entity: &str, property: &str) -> Self {
        FieldSemantics {
            vocabulary: vocabulary.to_string(),
            entity: entity.to_string(),
            property: property.to_string(),
        }
    }
}

impl Display for FieldSemantics {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}/{}", self.vocabulary, self.entity, self.property)
    }
}

/// Concrete mapping target for one semantic field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticField {
    /// Field name on the hydrated model.
    pub name: String,
    /// Slash-separated path into the field-value tree. The first segment is
    /// the schema's root element name and addresses the tree root itself.
    pub path: String,
    pub multi_value: bool,
}

impl SemanticField {
    pub fn new(name: &str, path: &str) -> Self {
        SemanticField {
            name: name.to_string(),
            path: path.to_string(),
            multi_value: false,
        }
    }

    pub fn multi(name: &str, path: &str) -> Self {
        SemanticField {
            multi_value: true,
            ..SemanticField::new(name, path)
        }
    }

    /// Follow this field's path into a field-value tree. Returns `None` when
    /// any intermediate segment is missing or not an object.
    pub fn extract<'a>(&self, tree: &'a Value) -> Option<&'a Value> {
        let mut segments = self.path.split('/').filter(|s| !s.is_empty());
        // Root element segment addresses the tree itself.
        segments.next()?;
        let mut current = tree;
        for segment in segments {
            current = current.get(segment)?;
        }
        Some(current)
    }
}

/// A named field-mapping schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SemanticSchema {
    pub id: u64,
    pub root_element: String,
    /// Fully-qualified semantic names this schema maps, e.g. `s:Article`.
    pub fully_qualified_names: BTreeSet<String>,
    pub fields: BTreeMap<FieldSemantics, SemanticField>,
}

impl SemanticSchema {
    pub fn new(id: u64, root_element: &str) -> Self {
        SemanticSchema {
            id,
            root_element: root_element.to_string(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, fully_qualified: &str) -> Self {
        self.fully_qualified_names.insert(fully_qualified.to_string());
        self
    }

    pub fn with_field(mut self, semantics: FieldSemantics, field: SemanticField) -> Self {
        self.fields.insert(semantics, field);
        self
    }
}

/// Lookup table of semantic schemas keyed by numeric identifier.
///
/// Frozen after construction and shared across threads without locking.
/// `get` returns a cheap Arc clone.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry(Arc<HashMap<u64, Arc<SemanticSchema>>>);

impl SchemaRegistry {
    pub fn from_schemas<I: IntoIterator<Item = SemanticSchema>>(schemas: I) -> Self {
        SchemaRegistry(Arc::new(
            schemas
                .into_iter()
                .map(|schema| (schema.id, Arc::new(schema)))
                .collect(),
        ))
    }

    pub fn get(&self, id: u64) -> Option<Arc<SemanticSchema>> {
        self.0.get(&id).cloned()
    }

    /// Resolve a schema from its wire form, a numeric string. Unparseable or
    /// unknown identifiers resolve to `None`; the caller decides whether
    /// that is fatal.
    pub fn get_by_wire_id(&self, id: &str) -> Option<Arc<SemanticSchema>> {
        match id.parse::<u64>() {
            Ok(id) => self.get(id),
            Err(_) => {
                tracing::debug!("Schema identifier '{}' is not numeric", id);
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_registry_lookup() {
        let registry = SchemaRegistry::from_schemas(vec![
            SemanticSchema::new(1, "Article").with_name("s:Article"),
            SemanticSchema::new(2, "Place"),
        ]);

        assert!(registry.get(1).is_some());
        assert!(registry.get(3).is_none());
        assert!(registry.get_by_wire_id("2").is_some());
        assert!(registry.get_by_wire_id("not-a-number").is_none());
    }

    #[test]
    fn test_arc_clone_cheap() {
        let registry =
            SchemaRegistry::from_schemas(vec![SemanticSchema::new(1, "Article")]);

        let schema1 = registry.get(1).unwrap();
        let schema2 = registry.get(1).unwrap();

        // Arc clones should point to same allocation
        assert!(Arc::ptr_eq(&schema1, &schema2));
    }

    #[test]
    fn test_field_extraction() {
        let tree = json!({
            "heading": "Top story",
            "location": { "city": "Amsterdam" }
        });

        let flat = SemanticField::new("heading", "/Article/heading");
        assert_eq!(flat.extract(&tree), Some(&json!("Top story")));

        let nested = SemanticField::new("city", "/Article/location/city");
        assert_eq!(nested.extract(&tree), Some(&json!("Amsterdam")));

        let missing = SemanticField::new("author", "/Article/author");
        assert_eq!(missing.extract(&tree), None);

        let root = SemanticField::new("all", "/Article");
        assert_eq!(root.extract(&tree), Some(&tree));
    }
}
