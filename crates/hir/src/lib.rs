//! # GraphQL HIR
//!
//! Loads GraphQL source text into the small semantic model the OpenAPI
//! generator works on: a name-indexed table of type definitions for the
//! schema, and the operations (with their variable signatures) of an
//! executable document.
//!
//! ```rust,ignore
//! let types = graphql_hir::parse_schema(sdl, "schema.graphql")?;
//! let operations = graphql_hir::parse_operations(query, "query.graphql")?;
//! let operation = graphql_hir::select_operation(&operations, None)?;
//! ```

use apollo_compiler::ast;
use std::collections::HashMap;
use std::sync::Arc;

mod error;
mod schema;
mod selection;
mod structure;

pub use error::{HirError, Result};
pub use schema::SchemaTypes;
pub use selection::select_operation;
pub use structure::*;

/// Map from type name to type definition.
pub type TypeDefMap = HashMap<Arc<str>, TypeDef>;

/// Parse SDL text into the schema type table.
///
/// Syntax errors are reported verbatim; no schema validation is performed
/// beyond rejecting duplicate type definitions.
#[tracing::instrument(skip(sdl), fields(size = sdl.len()))]
pub fn parse_schema(sdl: &str, path: &str) -> Result<SchemaTypes> {
    let document = parse_document(sdl, path)?;
    let structure = document_structure(&document);
    tracing::debug!(type_defs = structure.type_defs.len(), "Extracted type definitions");
    SchemaTypes::from_type_defs(structure.type_defs)
}

/// Parse an executable document and return its operations in declaration order.
#[tracing::instrument(skip(source), fields(size = source.len()))]
pub fn parse_operations(source: &str, path: &str) -> Result<Vec<OperationStructure>> {
    let document = parse_document(source, path)?;
    let operations = document_structure(&document).operations;
    tracing::debug!(operations = operations.len(), "Extracted operations");
    Ok(operations)
}

fn parse_document(source: &str, path: &str) -> Result<ast::Document> {
    ast::Document::parse(source, path).map_err(|with_errors| HirError::Parse {
        path: path.to_string(),
        message: with_errors.errors.to_string(),
    })
}
