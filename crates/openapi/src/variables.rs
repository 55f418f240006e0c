//! The `variables` object of a selected operation.

use crate::example::{example_for, ExampleValue};
use crate::json_schema::SchemaNode;
use crate::mapper::map_type;
use graphql_hir::{OperationStructure, SchemaTypes};

/// Object schema for an operation's variables and the names of the
/// variables declared non-null, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariablesSchema {
    pub schema: SchemaNode,
    pub required: Vec<String>,
}

#[must_use]
#[tracing::instrument(skip_all, fields(operation = operation.display_name(), variables = operation.variables.len()))]
pub fn build_variables_schema(
    schema: &SchemaTypes,
    operation: &OperationStructure,
) -> VariablesSchema {
    let node = operation
        .variables
        .iter()
        .fold(SchemaNode::object(), |node, variable| {
            node.with_property(
                variable.name.to_string(),
                map_type(schema, &variable.type_ref),
                variable.type_ref.is_non_null(),
            )
        });

    tracing::debug!(required = node.required.len(), "Built variables schema");
    VariablesSchema {
        required: node.required.clone(),
        schema: node,
    }
}

/// Example `variables` object covering every declared variable.
#[must_use]
pub fn build_variables_example(
    schema: &SchemaTypes,
    operation: &OperationStructure,
) -> ExampleValue {
    ExampleValue::Object(
        operation
            .variables
            .iter()
            .map(|variable| {
                (
                    variable.name.to_string(),
                    example_for(schema, &variable.type_ref),
                )
            })
            .collect(),
    )
}
