//! `graphql curl`: print a curl command that invokes the operation.

use crate::commands::common::{load_project_defaults, LoadedInputs, SourceArgs, Sources};
use crate::prompt::Prompter;
use anyhow::Result;
use graphql_openapi::build_curl;
use std::path::PathBuf;

#[derive(Debug, Clone, clap::Args)]
pub struct CurlArgs {
    #[command(flatten)]
    pub sources: SourceArgs,
}

pub fn run(config_path: Option<PathBuf>, project: Option<&str>, args: CurlArgs) -> Result<()> {
    let defaults = load_project_defaults(config_path, project)?;
    let sources = Sources::resolve(args.sources, defaults.as_ref())?;
    let endpoint = sources.require_endpoint()?;

    let inputs = LoadedInputs::load(&sources)?;
    let operation = inputs.select_operation(sources.operation.as_deref(), &Prompter::new(false))?;
    let example = inputs.example_variables(operation, sources.vars_file.as_deref())?;

    // Reject endpoints the document generator would reject too
    graphql_openapi::parse_endpoint(endpoint)?;

    println!("{}", build_curl(endpoint, &inputs.query, &example));
    Ok(())
}
