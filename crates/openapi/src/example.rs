//! Representative example values for GraphQL type references.

use graphql_hir::{SchemaTypes, TypeDef, TypeDefKind, TypeRef};
use indexmap::IndexMap;
use serde::Serialize;

/// Placeholder used for enums that declare no values.
pub const EMPTY_ENUM_PLACEHOLDER: &str = "VALUE";

/// Literal used for strings, custom scalars and unresolved types.
const STRING_EXAMPLE: &str = "string";

/// An example value shaped like the schema node of the same type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExampleValue {
    Int(i64),
    Float(f64),
    String(String),
    Bool(bool),
    Array(Vec<ExampleValue>),
    Object(IndexMap<String, ExampleValue>),
}

impl From<ExampleValue> for serde_json::Value {
    fn from(value: ExampleValue) -> Self {
        match value {
            ExampleValue::Int(n) => Self::from(n),
            ExampleValue::Float(n) => Self::from(n),
            ExampleValue::String(s) => Self::String(s),
            ExampleValue::Bool(b) => Self::Bool(b),
            ExampleValue::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            ExampleValue::Object(fields) => Self::Object(
                fields
                    .into_iter()
                    .map(|(name, value)| (name, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

/// Synthesize a deterministic example for a GraphQL type reference.
///
/// Lists hold exactly one element and input objects include every field,
/// optional ones too.
#[must_use]
pub fn example_for(schema: &SchemaTypes, type_ref: &TypeRef) -> ExampleValue {
    ExampleSynthesizer {
        schema,
        expanding: Vec::new(),
    }
    .example(type_ref)
}

struct ExampleSynthesizer<'a> {
    schema: &'a SchemaTypes,
    expanding: Vec<&'a str>,
}

impl<'a> ExampleSynthesizer<'a> {
    fn example(&mut self, type_ref: &TypeRef) -> ExampleValue {
        match type_ref {
            TypeRef::List { item, .. } => ExampleValue::Array(vec![self.example(item)]),
            TypeRef::Named { name, .. } => self.example_named(name),
        }
    }

    fn example_named(&mut self, name: &str) -> ExampleValue {
        match name {
            "Int" => ExampleValue::Int(0),
            "Float" => ExampleValue::Float(0.0),
            "String" => ExampleValue::String(STRING_EXAMPLE.to_string()),
            "Boolean" => ExampleValue::Bool(true),
            "ID" => ExampleValue::String("id".to_string()),
            _ => match self.schema.get(name) {
                Some(def) if def.kind == TypeDefKind::Enum => ExampleValue::String(
                    def.enum_values
                        .first()
                        .map_or_else(|| EMPTY_ENUM_PLACEHOLDER.to_string(), ToString::to_string),
                ),
                Some(def) if def.kind == TypeDefKind::InputObject => self.example_input_object(def),
                _ => ExampleValue::String(STRING_EXAMPLE.to_string()),
            },
        }
    }

    fn example_input_object(&mut self, def: &'a TypeDef) -> ExampleValue {
        // A cycle ends in an empty object
        if self.expanding.contains(&def.name.as_ref()) {
            return ExampleValue::Object(IndexMap::new());
        }

        self.expanding.push(&def.name);
        let fields = def
            .fields
            .iter()
            .map(|field| (field.name.to_string(), self.example(&field.type_ref)))
            .collect();
        self.expanding.pop();

        ExampleValue::Object(fields)
    }
}
