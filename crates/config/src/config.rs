use crate::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Name given to the project of a single-project config.
pub const DEFAULT_PROJECT: &str = "default";

/// Top-level GraphQL configuration.
/// Either a single project or multiple named projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GraphQLConfig {
    /// Multi-project configuration
    Multi {
        projects: HashMap<String, ProjectConfig>,
    },
    /// Single project configuration (boxed to reduce enum size)
    Single(Box<ProjectConfig>),
}

impl GraphQLConfig {
    /// Get all projects as an iterator.
    /// For single project configs, yields a single item with name "default".
    #[must_use]
    pub fn projects(&self) -> Box<dyn Iterator<Item = (&str, &ProjectConfig)> + '_> {
        match self {
            Self::Single(config) => Box::new(std::iter::once((DEFAULT_PROJECT, config.as_ref()))),
            Self::Multi { projects } => Box::new(
                projects
                    .iter()
                    .map(|(name, config)| (name.as_str(), config)),
            ),
        }
    }

    /// Get a specific project by name.
    /// For single project configs, returns the project if name is "default".
    #[must_use]
    pub fn get_project(&self, name: &str) -> Option<&ProjectConfig> {
        match self {
            Self::Single(config) if name == DEFAULT_PROJECT => Some(config.as_ref()),
            Self::Single(_) => None,
            Self::Multi { projects } => projects.get(name),
        }
    }

    /// Check if this is a multi-project configuration
    #[must_use]
    pub const fn is_multi_project(&self) -> bool {
        matches!(self, Self::Multi { .. })
    }

    /// Get the number of projects
    #[must_use]
    pub fn project_count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Multi { projects } => projects.len(),
        }
    }

    /// Sorted project names.
    #[must_use]
    pub fn project_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.projects().map(|(name, _)| name.to_string()).collect();
        names.sort();
        names
    }

    /// Pick the project to work on.
    ///
    /// Without a name, a single-project config yields its only project and a
    /// multi-project config yields the project named "default", or the only
    /// project when there is exactly one.
    pub fn select_project(&self, name: Option<&str>) -> Result<(&str, &ProjectConfig)> {
        if let Some(name) = name {
            return self
                .projects()
                .find(|(project, _)| *project == name)
                .ok_or_else(|| ConfigError::ProjectNotFound {
                    name: name.to_string(),
                    available: self.project_names(),
                });
        }

        match self {
            Self::Single(config) => Ok((DEFAULT_PROJECT, config.as_ref())),
            Self::Multi { projects } => {
                if let Some((name, config)) = projects.get_key_value(DEFAULT_PROJECT) {
                    return Ok((name.as_str(), config));
                }
                let mut iter = projects.iter();
                match (iter.next(), iter.next()) {
                    (Some((name, config)), None) => Ok((name.as_str(), config)),
                    _ => Err(ConfigError::ProjectRequired {
                        available: self.project_names(),
                    }),
                }
            }
        }
    }
}

/// Configuration for a single project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Schema source(s)
    pub schema: SchemaConfig,

    /// Executable document(s) holding the operations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<DocumentsConfig>,

    /// Tool-specific extensions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<HashMap<String, serde_json::Value>>,
}

impl ProjectConfig {
    /// Get the OpenAPI generator settings from extensions.
    ///
    /// ```yaml
    /// extensions:
    ///   openapi:
    ///     endpoint: https://api.example.com/graphql
    ///     operation: GetUser
    ///     out: openapi.yaml
    /// ```
    pub fn openapi(&self) -> std::result::Result<Option<OpenApiExtension>, serde_json::Error> {
        self.extensions
            .as_ref()
            .and_then(|ext| ext.get("openapi"))
            .map(|value| serde_json::from_value(value.clone()))
            .transpose()
    }
}

/// Settings under `extensions.openapi`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenApiExtension {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vars_file: Option<String>,
}

/// Schema source configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaConfig {
    /// Single path or glob pattern
    Path(String),
    /// Multiple paths or glob patterns, concatenated in order
    Paths(Vec<String>),
}

impl SchemaConfig {
    #[must_use]
    pub fn paths(&self) -> Vec<&str> {
        match self {
            Self::Path(path) => vec![path.as_str()],
            Self::Paths(paths) => paths.iter().map(String::as_str).collect(),
        }
    }
}

/// Documents configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentsConfig {
    Path(String),
    Paths(Vec<String>),
}

impl DocumentsConfig {
    #[must_use]
    pub fn paths(&self) -> Vec<&str> {
        match self {
            Self::Path(path) => vec![path.as_str()],
            Self::Paths(paths) => paths.iter().map(String::as_str).collect(),
        }
    }
}
