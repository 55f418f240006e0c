//! # GraphQL OpenAPI
//!
//! Describes a GraphQL operation as a REST-like `POST` endpoint.
//!
//! Variable types are mapped to JSON-Schema nodes, a deterministic example
//! payload is synthesized for them, and both are wrapped in an OpenAPI 3.0
//! document. A matching `curl` command can be produced for the same payload.
//!
//! ```rust,ignore
//! let types = graphql_hir::parse_schema(sdl, "schema.graphql")?;
//! let operations = graphql_hir::parse_operations(query, "query.graphql")?;
//! let operation = graphql_hir::select_operation(&operations, None)?;
//!
//! let variables = build_variables_schema(&types, operation);
//! let example = build_variables_example(&types, operation).into();
//! let document = build_document(&DocumentOptions::new(endpoint), operation, query, &variables, example)?;
//! println!("{}", render(&document, OutputFormat::Yaml)?);
//! ```

mod curl;
mod document;
mod error;
mod example;
mod json_schema;
mod mapper;
mod render;
mod variables;

pub use curl::build_curl;
pub use document::{
    build_document, parse_endpoint, DocumentOptions, Endpoint, Info, MediaType, OpenApiDocument,
    Operation, PathItem, RequestBody, Response, Server, DEFAULT_PATH, DEFAULT_TITLE,
    DEFAULT_VERSION, OPENAPI_VERSION,
};
pub use error::{OpenApiError, Result};
pub use example::{example_for, ExampleValue, EMPTY_ENUM_PLACEHOLDER};
pub use json_schema::{SchemaKind, SchemaNode};
pub use mapper::map_type;
pub use render::{render, OutputFormat};
pub use variables::{build_variables_example, build_variables_schema, VariablesSchema};
