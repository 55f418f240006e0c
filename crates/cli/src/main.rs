mod commands;
mod exit_code;
mod prompt;

use clap::{Parser, Subcommand};
use colored::Colorize;
use exit_code::ExitCode;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "graphql")]
#[command(about = "Describe GraphQL operations as REST-like OpenAPI endpoints", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to GraphQL config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Project name (for multi-project configs)
    #[arg(short, long, global = true)]
    project: Option<String>,

    /// Force colored output even when not a TTY
    #[arg(long, global = true, conflicts_with = "no_color")]
    color: bool,

    /// Disable colored output
    #[arg(long, global = true, conflicts_with = "color")]
    no_color: bool,

    /// Suppress all output except errors and generated artifacts
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output verbosity options
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    /// Whether to show informational output (success messages)
    pub show_info: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an OpenAPI document wrapping a GraphQL operation
    ///
    /// The document describes a single POST endpoint whose JSON body carries the
    /// query text and its variables. It is written to --out (or stdout) and is
    /// followed by an example curl invocation.
    Openapi(commands::openapi::OpenApiArgs),

    /// Print an example curl command for a GraphQL operation
    Curl(commands::curl::CurlArgs),
}

fn main() {
    let cli = Cli::parse();

    init_tracing();
    configure_colors(cli.color, cli.no_color);

    let output_opts = OutputOptions {
        show_info: !cli.quiet,
    };

    let result = match cli.command {
        Commands::Openapi(args) => {
            commands::openapi::run(cli.config, cli.project.as_deref(), args, output_opts)
        }
        Commands::Curl(args) => commands::curl::run(cli.config, cli.project.as_deref(), args),
    };

    let code = match result {
        Ok(()) => ExitCode::Success,
        Err(err) => {
            let code = ExitCode::for_error(&err);
            tracing::debug!(exit_code = code.code(), reason = %code, "Command failed");
            eprintln!("{} {}", "✗".red().bold(), format!("{err:#}").red());
            code
        }
    };

    // process::exit skips destructors, so flush buffered output first
    let _ = std::io::stdout().flush();
    code.exit();
}

/// Initialize tracing to stderr, filtered by `RUST_LOG` (off by default)
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Configure colored output based on flags and environment variables.
///
/// Priority order (highest to lowest):
/// 1. `--color` flag (force colors on)
/// 2. `--no-color` flag (force colors off)
/// 3. `NO_COLOR` environment variable (if set to any value, disable colors)
/// 4. `CLICOLOR_FORCE` environment variable (if set to non-zero, force colors)
/// 5. `CLICOLOR` environment variable (if set to "0", disable colors)
/// 6. Default: colors enabled if stderr is a TTY (handled by `colored` crate)
///
/// See: <https://no-color.org/> and <https://bixense.com/clicolors/>
fn configure_colors(force_color: bool, no_color: bool) {
    use colored::control;

    if force_color {
        control::set_override(true);
    } else if no_color || std::env::var_os("NO_COLOR").is_some() {
        control::set_override(false);
    } else if let Ok(val) = std::env::var("CLICOLOR_FORCE") {
        if !val.is_empty() && val != "0" {
            control::set_override(true);
        }
    } else if std::env::var("CLICOLOR").is_ok_and(|val| val == "0") {
        control::set_override(false);
    }
}
