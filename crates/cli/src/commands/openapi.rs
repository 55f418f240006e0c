//! `graphql openapi`: write the OpenAPI wrapper document and a curl example.

use crate::commands::common::{
    load_project_defaults, LoadedInputs, ProjectDefaults, SourceArgs, Sources,
};
use crate::exit_code::{ExitCode, WithExitCode};
use crate::prompt::Prompter;
use crate::OutputOptions;
use anyhow::{Context, Result};
use colored::Colorize;
use graphql_openapi::{
    build_curl, build_document, build_variables_schema, render, DocumentOptions, OutputFormat,
    DEFAULT_TITLE, DEFAULT_VERSION,
};
use std::path::PathBuf;

const DEFAULT_OUT: &str = "openapi.yaml";

#[derive(Debug, Clone, clap::Args)]
pub struct OpenApiArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Output path for the OpenAPI document (stdout if omitted)
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Output format (inferred from --out when omitted)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// OpenAPI document title
    #[arg(long)]
    pub title: Option<String>,

    /// OpenAPI document version
    #[arg(long = "version", value_name = "VERSION")]
    pub doc_version: Option<String>,

    /// Prompt for missing inputs interactively (requires a terminal)
    #[arg(short, long)]
    pub interactive: bool,
}

/// Document settings after merging flags, config and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DocumentSettings {
    title: String,
    version: String,
    out: Option<PathBuf>,
    format: OutputFormat,
}

impl DocumentSettings {
    fn resolve(args: &OpenApiArgs, defaults: Option<&ProjectDefaults>) -> Result<Self> {
        let openapi = defaults.map(|d| &d.openapi);

        let out = args.out.clone().or_else(|| {
            defaults.and_then(|d| d.openapi.out.as_deref().map(|out| d.resolve(out)))
        });
        let config_format = openapi
            .and_then(|o| o.format.as_deref())
            .map(str::parse::<OutputFormat>)
            .transpose()
            .context("Invalid format in extensions.openapi")?;
        let format = args
            .format
            .or(config_format)
            .or_else(|| out.as_deref().map(OutputFormat::from_path))
            .unwrap_or_default();

        Ok(Self {
            title: args
                .title
                .clone()
                .or_else(|| openapi.and_then(|o| o.title.clone()))
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            version: args
                .doc_version
                .clone()
                .or_else(|| openapi.and_then(|o| o.version.clone()))
                .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            out,
            format,
        })
    }
}

pub fn run(
    config_path: Option<PathBuf>,
    project: Option<&str>,
    args: OpenApiArgs,
    output: OutputOptions,
) -> Result<()> {
    let prompter = Prompter::new(args.interactive);
    let defaults = load_project_defaults(config_path, project)?;
    let mut settings = DocumentSettings::resolve(&args, defaults.as_ref())?;
    let explicit_format = args.format.is_some();

    let mut sources = Sources::resolve(args.sources, defaults.as_ref())?;
    sources.prompt_missing(&prompter)?;
    let endpoint = sources.require_endpoint()?.to_string();

    let inputs = LoadedInputs::load(&sources)?;
    let operation = inputs.select_operation(sources.operation.as_deref(), &prompter)?;

    if sources.vars_file.is_none()
        && prompter.is_enabled()
        && prompter.confirm("Provide a variables JSON file?", false)?
    {
        sources.vars_file = Some(prompter.existing_file("Path to variables JSON file")?);
    }
    let example = inputs.example_variables(operation, sources.vars_file.as_deref())?;

    let variables = build_variables_schema(&inputs.types, operation);
    let options = DocumentOptions {
        title: settings.title.clone(),
        version: settings.version.clone(),
        endpoint: endpoint.clone(),
    };
    let document = build_document(&options, operation, &inputs.query, &variables, example.clone())?;

    if settings.out.is_none()
        && prompter.is_enabled()
        && prompter.confirm("Write OpenAPI document to a file?", true)?
    {
        let out = PathBuf::from(prompter.text("Output path", Some(DEFAULT_OUT))?);
        if !explicit_format {
            settings.format = OutputFormat::from_path(&out);
        }
        settings.out = Some(out);
    }

    let rendered = render(&document, settings.format)?;
    match &settings.out {
        Some(out) => {
            std::fs::write(out, &rendered)
                .with_context(|| format!("Failed to write {}", out.display()))
                .exit_code(ExitCode::IoError)?;
            tracing::info!(
                path = %out.display(),
                format = %settings.format,
                "Wrote OpenAPI document"
            );
            if output.show_info {
                eprintln!(
                    "{} Wrote OpenAPI document to {}",
                    "✓".green().bold(),
                    out.display()
                );
            }
        }
        None => print!("{rendered}"),
    }

    println!("\n# Example curl:\n{}", build_curl(&endpoint, &inputs.query, &example));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphql_config::OpenApiExtension;

    fn args() -> OpenApiArgs {
        OpenApiArgs {
            sources: SourceArgs::default(),
            out: None,
            format: None,
            title: None,
            doc_version: None,
            interactive: false,
        }
    }

    #[test]
    fn test_defaults_without_config() {
        let settings = DocumentSettings::resolve(&args(), None).unwrap();
        assert_eq!(settings.title, DEFAULT_TITLE);
        assert_eq!(settings.version, DEFAULT_VERSION);
        assert_eq!(settings.out, None);
        assert_eq!(settings.format, OutputFormat::Yaml);
    }

    #[test]
    fn test_format_inferred_from_out() {
        let args = OpenApiArgs {
            out: Some(PathBuf::from("api.json")),
            ..args()
        };
        let settings = DocumentSettings::resolve(&args, None).unwrap();
        assert_eq!(settings.format, OutputFormat::Json);

        let args = OpenApiArgs {
            format: Some(OutputFormat::Yaml),
            ..args
        };
        let settings = DocumentSettings::resolve(&args, None).unwrap();
        assert_eq!(settings.format, OutputFormat::Yaml);
    }

    #[test]
    fn test_config_fills_unset_flags() {
        let defaults = ProjectDefaults {
            openapi: OpenApiExtension {
                title: Some("Users API".to_string()),
                version: Some("2.1.0".to_string()),
                out: Some("build/openapi.json".to_string()),
                ..OpenApiExtension::default()
            },
            base_dir: PathBuf::from("/project"),
            ..ProjectDefaults::default()
        };
        let args = OpenApiArgs {
            title: Some("From Flag".to_string()),
            ..args()
        };

        let settings = DocumentSettings::resolve(&args, Some(&defaults)).unwrap();
        assert_eq!(settings.title, "From Flag");
        assert_eq!(settings.version, "2.1.0");
        assert_eq!(settings.out, Some(PathBuf::from("/project/build/openapi.json")));
        assert_eq!(settings.format, OutputFormat::Json);
    }

    #[test]
    fn test_invalid_config_format() {
        let defaults = ProjectDefaults {
            openapi: OpenApiExtension {
                format: Some("toml".to_string()),
                ..OpenApiExtension::default()
            },
            ..ProjectDefaults::default()
        };
        let err = DocumentSettings::resolve(&args(), Some(&defaults)).unwrap_err();
        assert_eq!(ExitCode::for_error(&err), ExitCode::ConfigError);
    }
}
