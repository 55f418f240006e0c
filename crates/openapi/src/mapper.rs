//! GraphQL type references to JSON-Schema nodes.
//!
//! The walk recurses through list wrappers and input objects. Input objects
//! currently being expanded are tracked so that self-referencing inputs end
//! in a placeholder node instead of recursing forever.

use crate::json_schema::SchemaNode;
use graphql_hir::{SchemaTypes, TypeDef, TypeDefKind, TypeRef};

/// Map a GraphQL type reference to a JSON-Schema node.
///
/// Unknown names degrade to a described string node; this never fails.
#[must_use]
pub fn map_type(schema: &SchemaTypes, type_ref: &TypeRef) -> SchemaNode {
    TypeMapper::new(schema).map(type_ref)
}

struct TypeMapper<'a> {
    schema: &'a SchemaTypes,
    /// Input objects on the current recursion path
    expanding: Vec<&'a str>,
}

impl<'a> TypeMapper<'a> {
    const fn new(schema: &'a SchemaTypes) -> Self {
        Self {
            schema,
            expanding: Vec::new(),
        }
    }

    fn map(&mut self, type_ref: &TypeRef) -> SchemaNode {
        match type_ref {
            TypeRef::List { item, .. } => SchemaNode::array(self.map(item)),
            TypeRef::Named { name, .. } => self.map_named(name),
        }
    }

    fn map_named(&mut self, name: &str) -> SchemaNode {
        match name {
            "Int" => SchemaNode::integer(),
            "Float" => SchemaNode::number().with_format("double"),
            "String" => SchemaNode::string(),
            "Boolean" => SchemaNode::boolean(),
            "ID" => SchemaNode::string().with_description("GraphQL ID"),
            _ => match self.schema.get(name) {
                Some(def) => match def.kind {
                    TypeDefKind::Enum => SchemaNode::string()
                        .with_enum_values(def.enum_values.iter().map(ToString::to_string)),
                    TypeDefKind::InputObject => self.map_input_object(def),
                    _ => SchemaNode::string()
                        .with_description(format!("GraphQL custom scalar {name}")),
                },
                None => {
                    tracing::trace!(name, "Unresolved type name");
                    SchemaNode::string().with_description(format!("GraphQL type {name}"))
                }
            },
        }
    }

    fn map_input_object(&mut self, def: &'a TypeDef) -> SchemaNode {
        if self.expanding.contains(&def.name.as_ref()) {
            tracing::debug!(name = %def.name, "Recursive input object reference");
            return SchemaNode::object()
                .with_description(format!("Recursive reference to {}", def.name));
        }

        self.expanding.push(&def.name);
        let node = def.fields.iter().fold(SchemaNode::object(), |node, field| {
            let field_schema = self.map(&field.type_ref);
            node.with_property(
                field.name.to_string(),
                field_schema,
                field.type_ref.is_non_null(),
            )
        });
        self.expanding.pop();

        node
    }
}
