//! Name-indexed table of schema type definitions.

use crate::{HirError, Result, TypeDef, TypeDefMap};
use std::sync::Arc;

/// All type definitions of a schema, keyed by name, with extensions merged
/// into their base definitions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaTypes {
    types: TypeDefMap,
}

impl SchemaTypes {
    /// Build the table from extracted definitions.
    ///
    /// Base definitions are registered first so an extension may appear before
    /// the type it extends. An extension with no base definition is kept as the
    /// definition itself.
    #[tracing::instrument(skip(type_defs))]
    pub fn from_type_defs(type_defs: impl IntoIterator<Item = TypeDef>) -> Result<Self> {
        let (extensions, bases): (Vec<TypeDef>, Vec<TypeDef>) =
            type_defs.into_iter().partition(|def| def.is_extension);

        let mut types = TypeDefMap::new();
        for def in bases {
            if types.contains_key(&def.name) {
                return Err(HirError::DuplicateType(def.name.to_string()));
            }
            types.insert(Arc::clone(&def.name), def);
        }

        for ext in extensions {
            if let Some(base) = types.get_mut(&ext.name) {
                tracing::trace!(name = %ext.name, "Merging type extension");
                base.fields.extend(ext.fields);
                base.enum_values.extend(ext.enum_values);
            } else {
                tracing::warn!(name = %ext.name, "Extension without a base definition");
                types.insert(
                    Arc::clone(&ext.name),
                    TypeDef {
                        is_extension: false,
                        ..ext
                    },
                );
            }
        }

        tracing::debug!(types = types.len(), "Schema types collected");
        Ok(Self { types })
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InputFieldSignature, TypeDefKind, TypeRef};

    fn enum_def(name: &str, values: &[&str], is_extension: bool) -> TypeDef {
        TypeDef {
            name: Arc::from(name),
            kind: TypeDefKind::Enum,
            fields: Vec::new(),
            enum_values: values.iter().map(|v| Arc::from(*v)).collect(),
            is_extension,
        }
    }

    #[test]
    fn test_extension_before_base_is_merged() {
        let types = SchemaTypes::from_type_defs([
            enum_def("Color", &["PURPLE"], true),
            enum_def("Color", &["RED", "GREEN"], false),
        ])
        .unwrap();

        let color = types.get("Color").unwrap();
        let values: Vec<&str> = color.enum_values.iter().map(AsRef::as_ref).collect();
        assert_eq!(values, ["RED", "GREEN", "PURPLE"]);
    }

    #[test]
    fn test_input_extension_appends_fields() {
        let base = TypeDef {
            name: Arc::from("Filter"),
            kind: TypeDefKind::InputObject,
            fields: vec![InputFieldSignature {
                name: Arc::from("name"),
                type_ref: TypeRef::named("String"),
            }],
            enum_values: Vec::new(),
            is_extension: false,
        };
        let ext = TypeDef {
            fields: vec![InputFieldSignature {
                name: Arc::from("limit"),
                type_ref: TypeRef::named("Int"),
            }],
            is_extension: true,
            ..base.clone()
        };

        let types = SchemaTypes::from_type_defs([base, ext]).unwrap();
        let filter = types.get("Filter").unwrap();
        assert_eq!(filter.fields.len(), 2);
        assert_eq!(filter.fields[1].name.as_ref(), "limit");
    }

    #[test]
    fn test_duplicate_definition_is_rejected() {
        let result = SchemaTypes::from_type_defs([
            enum_def("Color", &["RED"], false),
            enum_def("Color", &["BLUE"], false),
        ]);
        assert!(matches!(result, Err(HirError::DuplicateType(name)) if name == "Color"));
    }

    #[test]
    fn test_orphan_extension_becomes_definition() {
        let types = SchemaTypes::from_type_defs([enum_def("Mood", &["HAPPY"], true)]).unwrap();
        assert!(types.contains("Mood"));
        assert!(!types.get("Mood").unwrap().is_extension);
    }
}
