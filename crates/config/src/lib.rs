//! # GraphQL Config
//!
//! Discovery and parsing of `graphql-config` files (`.graphqlrc.yml`,
//! `graphql.config.json`, ...). Besides the standard `schema` and `documents`
//! keys, which hold paths or glob patterns, a project may carry an
//! `extensions.openapi` block with defaults for the OpenAPI generator.

mod config;
mod error;
mod loader;

pub use config::{
    DocumentsConfig, GraphQLConfig, OpenApiExtension, ProjectConfig, SchemaConfig,
    DEFAULT_PROJECT,
};
pub use error::{ConfigError, Result};
pub use loader::{
    expand_paths, find_config, load_config, load_config_from_str, locate_config, ConfigLocation,
    ConfigOrigin, CONFIG_FILES,
};
