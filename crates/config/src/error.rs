use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config in {}: {message}", path.display())]
    Invalid { path: PathBuf, message: String },

    #[error("Invalid path pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("No files match '{pattern}' (relative to {})", base_dir.display())]
    NoMatches { pattern: String, base_dir: PathBuf },

    #[error("Unsupported config format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Project '{name}' not found in config. Available projects: {}", available.join(", "))]
    ProjectNotFound {
        name: String,
        available: Vec<String>,
    },

    #[error("Config defines multiple projects; choose one with --project ({})", available.join(", "))]
    ProjectRequired { available: Vec<String> },
}
