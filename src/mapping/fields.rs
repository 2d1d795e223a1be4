//! Field resolution and hydration.
//!
//! Resolution turns a node's schema declaration into one merged mapping from
//! semantic field identity to concrete field path; hydration follows those
//! paths into the node's generic field-value tree. Inherited schemas listed
//! under the reserved `"Schemas"` extension key contribute additional
//! fields; later entries in resolution order overwrite earlier ones on
//! field-identity collision. Collision is deterministic, not an error.

use std::{collections::BTreeMap, sync::Arc};

use serde_json::Value;

use crate::{
    localization::Localization,
    mapping::schema::{FieldSemantics, SemanticField, SemanticSchema},
    model::data::EXTENSION_SCHEMAS_KEY,
    model::view::FieldMap,
};

/// Resolve the inherited schema list from a node's extension data, in
/// declaration order. Unresolvable identifiers are dropped.
pub fn inherited_schemas(
    localization: &Localization,
    extension_data: &BTreeMap<String, Value>,
) -> Vec<Arc<SemanticSchema>> {
    let Some(Value::Array(ids)) = extension_data.get(EXTENSION_SCHEMAS_KEY) else {
        return Vec::new();
    };
    ids.iter()
        .filter_map(|id| id.as_str())
        .filter_map(|id| localization.schemas.get_by_wire_id(id))
        .collect()
}

/// Resolve the merged field mapping for a node.
///
/// An explicit schema id is authoritative for the primary schema; without
/// one, the first resolvable inherited schema is primary. All inherited
/// schemas then contribute their fields, last-wins. No schema at all yields
/// an empty mapping: hydration is skipped and the model keeps default
/// fields.
pub fn resolve_fields(
    localization: &Localization,
    schema_id: Option<&str>,
    extension_data: &BTreeMap<String, Value>,
) -> BTreeMap<FieldSemantics, SemanticField> {
    let inherited = inherited_schemas(localization, extension_data);

    let primary = match schema_id.filter(|id| !id.is_empty()) {
        Some(id) => match localization.schemas.get_by_wire_id(id) {
            Some(schema) => Some(schema),
            None => {
                tracing::debug!("Declared schema id '{}' is not registered", id);
                return BTreeMap::new();
            }
        },
        None => inherited.first().cloned(),
    };

    let Some(primary) = primary else {
        return BTreeMap::new();
    };

    let mut merged = primary.fields.clone();
    if !inherited.is_empty() {
        tracing::debug!(
            "Merging {} additional semantic schema(s) into schema {}",
            inherited.len(),
            primary.id
        );
        for schema in &inherited {
            merged.extend(
                schema
                    .fields
                    .iter()
                    .map(|(semantics, field)| (semantics.clone(), field.clone())),
            );
        }
    }
    merged
}

/// Hydrate a field map by following each mapped path into the node's
/// field-value tree. Multi-value fields normalize to arrays.
pub fn hydrate_fields(
    mapping: &BTreeMap<FieldSemantics, SemanticField>,
    content: Option<&Value>,
) -> FieldMap {
    let Some(tree) = content else {
        return FieldMap::new();
    };
    let mut fields = FieldMap::new();
    for field in mapping.values() {
        if let Some(value) = field.extract(tree) {
            let value = if field.multi_value && !value.is_array() {
                Value::Array(vec![value.clone()])
            } else {
                value.clone()
            };
            fields.insert(field.name.clone(), value);
        }
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::schema::SchemaRegistry;
    use serde_json::json;

    fn semantics(property: &str) -> FieldSemantics {
        FieldSemantics::new("s", "Article", property)
    }

    fn localization() -> Localization {
        let primary = SemanticSchema::new(1, "Article")
            .with_field(semantics("a"), SemanticField::new("a", "/Article/one"))
            .with_field(semantics("b"), SemanticField::new("b", "/Article/two"));
        let additional = SemanticSchema::new(2, "Teaser")
            .with_field(semantics("b"), SemanticField::new("b", "/Article/three"))
            .with_field(semantics("c"), SemanticField::new("c", "/Article/four"));
        Localization::new("1", "/")
            .with_schemas(SchemaRegistry::from_schemas(vec![primary, additional]))
    }

    #[test]
    fn test_merge_is_last_wins() {
        let localization = localization();
        let extension =
            BTreeMap::from([(EXTENSION_SCHEMAS_KEY.to_string(), json!(["2"]))]);

        let merged = resolve_fields(&localization, Some("1"), &extension);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged.get(&semantics("a")).unwrap().path, "/Article/one");
        // Additional schema overwrote the primary's mapping for `b`.
        assert_eq!(merged.get(&semantics("b")).unwrap().path, "/Article/three");
        assert_eq!(merged.get(&semantics("c")).unwrap().path, "/Article/four");
    }

    #[test]
    fn test_inherited_primary_without_explicit_id() {
        let localization = localization();
        let extension =
            BTreeMap::from([(EXTENSION_SCHEMAS_KEY.to_string(), json!(["2"]))]);

        let merged = resolve_fields(&localization, None, &extension);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get(&semantics("b")).unwrap().path, "/Article/three");
    }

    #[test]
    fn test_no_schema_yields_empty_mapping() {
        let localization = localization();
        assert!(resolve_fields(&localization, None, &BTreeMap::new()).is_empty());
        assert!(resolve_fields(&localization, Some("99"), &BTreeMap::new()).is_empty());
    }

    #[test]
    fn test_hydration_follows_paths() {
        let localization = localization();
        let mapping = resolve_fields(&localization, Some("1"), &BTreeMap::new());
        let content = json!({ "one": "first", "two": ["x", "y"] });

        let fields = hydrate_fields(&mapping, Some(&content));
        assert_eq!(fields.get("a"), Some(&json!("first")));
        assert_eq!(fields.get("b"), Some(&json!(["x", "y"])));
        assert!(!fields.contains_key("c"));

        assert!(hydrate_fields(&mapping, None).is_empty());
    }

    #[test]
    fn test_multi_value_normalizes_to_array() {
        let schema = SemanticSchema::new(3, "Gallery").with_field(
            semantics("images"),
            SemanticField::multi("images", "/Gallery/image"),
        );
        let localization = Localization::new("1", "/")
            .with_schemas(SchemaRegistry::from_schemas(vec![schema]));
        let mapping = resolve_fields(&localization, Some("3"), &BTreeMap::new());

        let fields = hydrate_fields(&mapping, Some(&json!({ "image": "solo.png" })));
        assert_eq!(fields.get("images"), Some(&json!(["solo.png"])));
    }
}
