//! Input resolution shared by the `openapi` and `curl` commands.
//!
//! Every setting is taken from the command line first, then from the
//! project's config file, then from built-in defaults.

use crate::exit_code::{ExitCode, WithExitCode};
use crate::prompt::Prompter;
use anyhow::{Context, Result};
use graphql_config::{expand_paths, load_config, locate_config, ConfigOrigin, OpenApiExtension};
use graphql_hir::{OperationStructure, SchemaTypes};
use std::path::{Path, PathBuf};

/// Flags shared by every generator command.
#[derive(Debug, Default, Clone, clap::Args)]
pub struct SourceArgs {
    /// Path to GraphQL schema SDL (.graphql/.gql)
    #[arg(long, value_name = "FILE")]
    pub schema: Option<PathBuf>,

    /// Path to GraphQL query document (.graphql/.gql)
    #[arg(long, value_name = "FILE")]
    pub query: Option<PathBuf>,

    /// GraphQL HTTP endpoint URL
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Operation name to document (if multiple in query doc)
    #[arg(long, value_name = "NAME")]
    pub operation: Option<String>,

    /// JSON file with example variable values
    #[arg(long, value_name = "FILE")]
    pub vars_file: Option<PathBuf>,
}

/// Settings contributed by the selected config project.
#[derive(Debug, Default, Clone)]
pub struct ProjectDefaults {
    /// `schema` entries as written, paths or glob patterns
    pub schema: Vec<String>,
    /// `documents` entries as written, paths or glob patterns
    pub documents: Vec<String>,
    pub openapi: OpenApiExtension,
    /// Directory the config file lives in
    pub base_dir: PathBuf,
}

impl ProjectDefaults {
    /// Resolve a config-relative path.
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.base_dir.join(path)
    }

    /// Expand `schema` or `documents` entries into files.
    fn files(&self, key: &str, entries: &[String]) -> Result<Vec<PathBuf>> {
        expand_paths(&self.base_dir, entries)
            .with_context(|| format!("Failed to resolve {key} from config"))
    }
}

/// Load the project defaults from `--config` or the nearest config file.
///
/// A missing config file is fine unless `--config` or `--project` asked for
/// one. A discovered config that fails to load is skipped with a warning, so
/// flags alone can still drive the run.
#[tracing::instrument(skip_all)]
pub fn load_project_defaults(
    config_path: Option<PathBuf>,
    project: Option<&str>,
) -> Result<Option<ProjectDefaults>> {
    let current_dir = std::env::current_dir()?;
    let Some(location) = locate_config(config_path, &current_dir) else {
        if project.is_some() {
            anyhow::bail!("--project requires a GraphQL config file. Use --config to specify one.");
        }
        tracing::debug!("No config file found, using command line flags only");
        return Ok(None);
    };

    let config = match load_config(&location.path) {
        Ok(config) => config,
        Err(err) if location.origin == ConfigOrigin::Discovered && project.is_none() => {
            tracing::warn!(
                config = %location.path.display(),
                error = %err,
                "Ignoring config file that could not be loaded"
            );
            return Ok(None);
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("Failed to load config {}", location.path.display()));
        }
    };
    let (project_name, project_config) = config.select_project(project)?;
    tracing::info!(
        project = project_name,
        config = %location.path.display(),
        "Using config project"
    );

    let openapi = project_config
        .openapi()
        .with_context(|| format!("Invalid extensions.openapi in project '{project_name}'"))
        .exit_code(ExitCode::ConfigError)?
        .unwrap_or_default();

    Ok(Some(ProjectDefaults {
        schema: owned(project_config.schema.paths()),
        documents: project_config
            .documents
            .as_ref()
            .map(|documents| owned(documents.paths()))
            .unwrap_or_default(),
        openapi,
        base_dir: location.base_dir().to_path_buf(),
    }))
}

fn owned(entries: Vec<&str>) -> Vec<String> {
    entries.into_iter().map(str::to_string).collect()
}

/// Inputs after merging flags and config, before anything is read.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Sources {
    pub schema: Vec<PathBuf>,
    pub query: Vec<PathBuf>,
    pub endpoint: Option<String>,
    pub operation: Option<String>,
    pub vars_file: Option<PathBuf>,
}

impl Sources {
    /// Merge flags over config. Config entries are only expanded when no
    /// flag replaces them.
    pub fn resolve(args: SourceArgs, defaults: Option<&ProjectDefaults>) -> Result<Self> {
        let Some(defaults) = defaults else {
            return Ok(Self {
                schema: args.schema.into_iter().collect(),
                query: args.query.into_iter().collect(),
                endpoint: args.endpoint,
                operation: args.operation,
                vars_file: args.vars_file,
            });
        };

        let openapi = &defaults.openapi;
        Ok(Self {
            schema: match args.schema {
                Some(path) => vec![path],
                None => defaults.files("schema", &defaults.schema)?,
            },
            query: match args.query {
                Some(path) => vec![path],
                None => defaults.files("documents", &defaults.documents)?,
            },
            endpoint: args.endpoint.or_else(|| openapi.endpoint.clone()),
            operation: args.operation.or_else(|| openapi.operation.clone()),
            vars_file: args
                .vars_file
                .or_else(|| openapi.vars_file.as_deref().map(|p| defaults.resolve(p))),
        })
    }

    /// Prompt for whatever is still missing, when prompts are enabled.
    pub fn prompt_missing(&mut self, prompter: &Prompter) -> Result<()> {
        if !prompter.is_enabled()
            || (!self.schema.is_empty() && !self.query.is_empty() && self.endpoint.is_some())
        {
            return Ok(());
        }

        eprintln!("Interactive mode: let's collect the missing inputs.");
        if self.schema.is_empty() {
            self.schema
                .push(prompter.existing_file("Path to GraphQL schema SDL (.graphql/.gql)")?);
        }
        if self.query.is_empty() {
            self.query
                .push(prompter.existing_file("Path to GraphQL query document (.graphql/.gql)")?);
        }
        if self.endpoint.is_none() {
            self.endpoint = Some(prompter.text("GraphQL HTTP endpoint URL", None)?);
        }
        Ok(())
    }

    /// Fail with a usage error unless schema, query and endpoint are known.
    pub fn require_endpoint(&self) -> Result<&str> {
        let mut missing = Vec::new();
        if self.schema.is_empty() {
            missing.push("--schema");
        }
        if self.query.is_empty() {
            missing.push("--query");
        }
        match self.endpoint.as_deref() {
            Some(endpoint) if missing.is_empty() => Ok(endpoint),
            Some(_) => anyhow::bail!("{} required", missing.join(", ")),
            None => {
                missing.push("--endpoint");
                anyhow::bail!(
                    "{} required (pass them as flags or set them in a GraphQL config file)",
                    missing.join(", ")
                )
            }
        }
    }
}

/// Schema, query text, and the operations it declares.
#[derive(Debug)]
pub struct LoadedInputs {
    pub types: SchemaTypes,
    pub query: String,
    pub operations: Vec<OperationStructure>,
}

impl LoadedInputs {
    #[tracing::instrument(skip_all, fields(schema_files = sources.schema.len(), query_files = sources.query.len()))]
    pub fn load(sources: &Sources) -> Result<Self> {
        let sdl = read_all(&sources.schema)
            .context("Failed to read schema")
            .exit_code(ExitCode::SchemaError)?;
        let types = graphql_hir::parse_schema(&sdl, &source_name(&sources.schema))
            .context("Failed to parse schema")
            .exit_code(ExitCode::SchemaError)?;

        let query = read_all(&sources.query).context("Failed to read query")?;
        let operations = graphql_hir::parse_operations(&query, &source_name(&sources.query))
            .context("Failed to parse query")
            .exit_code(ExitCode::ParseError)?;

        tracing::debug!(types = types.len(), operations = operations.len(), "Loaded inputs");
        Ok(Self {
            types,
            query,
            operations,
        })
    }

    /// Select the operation to document.
    ///
    /// In interactive mode, with several operations and no name given, the
    /// user picks among the named ones.
    pub fn select_operation(
        &self,
        name: Option<&str>,
        prompter: &Prompter,
    ) -> Result<&OperationStructure> {
        let mut name = name.map(str::to_string);
        if name.is_none() && prompter.is_enabled() && self.operations.len() > 1 {
            let names: Vec<&str> = self
                .operations
                .iter()
                .filter_map(|op| op.name.as_deref())
                .collect();
            if !names.is_empty() {
                let choice = prompter.select("Select operation", &names)?;
                name = names.get(choice).map(ToString::to_string);
            }
        }

        let operation = graphql_hir::select_operation(&self.operations, name.as_deref())
            .context("Failed to select operation")?;
        tracing::info!(
            operation = operation.display_name(),
            variables = operation.variables.len(),
            "Selected operation"
        );
        Ok(operation)
    }

    /// Example `variables` value: the file's contents when given, otherwise
    /// synthesized from the operation's variable types.
    pub fn example_variables(
        &self,
        operation: &OperationStructure,
        vars_file: Option<&Path>,
    ) -> Result<serde_json::Value> {
        match vars_file {
            Some(path) => read_vars_file(path),
            None => Ok(graphql_openapi::build_variables_example(&self.types, operation).into()),
        }
    }
}

/// Read a variables file, which must hold a JSON object.
pub fn read_vars_file(path: &Path) -> Result<serde_json::Value> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read vars-file {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&contents)
        .with_context(|| format!("vars-file {} is not valid JSON", path.display()))
        .exit_code(ExitCode::ParseError)?;
    if !value.is_object() {
        return Err(anyhow::anyhow!(
            "vars-file {} must contain a JSON object",
            path.display()
        ))
        .exit_code(ExitCode::ParseError);
    }
    Ok(value)
}

/// Read and concatenate files in order.
fn read_all(paths: &[PathBuf]) -> Result<String> {
    let mut contents = Vec::with_capacity(paths.len());
    for path in paths {
        tracing::trace!(path = %path.display(), "Reading file");
        contents.push(
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
        );
    }
    Ok(contents.join("\n"))
}

/// Name used in diagnostics for a (possibly concatenated) source.
fn source_name(paths: &[PathBuf]) -> String {
    match paths {
        [path] => path
            .file_name()
            .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned()),
        _ => paths
            .iter()
            .map(|path| path.display().to_string())
            .collect::<Vec<_>>()
            .join(" + "),
    }
}
