//! Locating, parsing and validating config files, and expanding the schema
//! and document entries they declare into files.

use crate::{ConfigError, GraphQLConfig, ProjectConfig, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Config file names, in order of preference within a directory
pub const CONFIG_FILES: &[&str] = &[
    ".graphqlrc.yml",
    ".graphqlrc.yaml",
    ".graphqlrc.json",
    ".graphqlrc",
    "graphql.config.yml",
    "graphql.config.yaml",
    "graphql.config.json",
];

/// How a config file was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Named on the command line
    Explicit,
    /// Found by searching upward from the working directory
    Discovered,
}

/// A config file together with how it was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocation {
    pub path: PathBuf,
    pub origin: ConfigOrigin,
}

impl ConfigLocation {
    /// Directory that relative entries in the config resolve against.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }
}

/// Use `explicit` when given, otherwise the nearest config above `start_dir`.
#[tracing::instrument(skip(explicit), fields(start = %start_dir.display()))]
pub fn locate_config(explicit: Option<PathBuf>, start_dir: &Path) -> Option<ConfigLocation> {
    if let Some(path) = explicit {
        return Some(ConfigLocation {
            path,
            origin: ConfigOrigin::Explicit,
        });
    }
    find_config(start_dir).map(|path| ConfigLocation {
        path,
        origin: ConfigOrigin::Discovered,
    })
}

/// Nearest config file in `start_dir` or one of its ancestors.
#[must_use]
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    let found = start_dir.ancestors().find_map(|dir| {
        CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    });
    match &found {
        Some(path) => tracing::debug!(path = %path.display(), "Found config file"),
        None => tracing::debug!("No config file in any parent directory"),
    }
    found
}

#[tracing::instrument(fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Result<GraphQLConfig> {
    let contents = std::fs::read_to_string(path)?;
    load_config_from_str(&contents, path)
}

/// Parse and validate config text. `path` picks the format and names the
/// file in errors.
pub fn load_config_from_str(contents: &str, path: &Path) -> Result<GraphQLConfig> {
    let format = ConfigFormat::detect(path)
        .ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;
    let invalid = |message: String| ConfigError::Invalid {
        path: path.to_path_buf(),
        message,
    };

    let config = format.parse(contents).map_err(invalid)?;
    for (name, project) in config.projects() {
        validate_project(project)
            .map_err(|problem| invalid(format!("Project '{name}' {problem}")))?;
    }

    tracing::debug!(?format, projects = config.project_count(), "Parsed config");
    Ok(config)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Yaml,
    Json,
    /// Extensionless `.graphqlrc`, either YAML or JSON
    Rc,
}

impl ConfigFormat {
    fn detect(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yml" | "yaml") => Some(Self::Yaml),
            Some("json") => Some(Self::Json),
            None if path.file_name().is_some_and(|name| name == ".graphqlrc") => Some(Self::Rc),
            _ => None,
        }
    }

    fn parse(self, contents: &str) -> std::result::Result<GraphQLConfig, String> {
        match self {
            Self::Yaml => {
                serde_yaml::from_str(contents).map_err(|e| format!("YAML parse error: {e}"))
            }
            Self::Json => {
                serde_json::from_str(contents).map_err(|e| format!("JSON parse error: {e}"))
            }
            Self::Rc => Self::Yaml
                .parse(contents)
                .or_else(|_| Self::Json.parse(contents)),
        }
    }
}

/// Reject entries that can never name a file, and unreadable extensions.
fn validate_project(project: &ProjectConfig) -> std::result::Result<(), String> {
    check_entries("schema", &project.schema.paths())?;
    if let Some(documents) = &project.documents {
        check_entries("documents", &documents.paths())?;
    }
    project
        .openapi()
        .map_err(|e| format!("has invalid extensions.openapi: {e}"))?;
    Ok(())
}

fn check_entries(key: &str, entries: &[&str]) -> std::result::Result<(), String> {
    if entries.is_empty() {
        return Err(format!("has an empty {key} list"));
    }
    for entry in entries {
        if entry.trim().is_empty() {
            return Err(format!("has an empty {key} entry"));
        }
        for pattern in expand_braces(entry) {
            glob::Pattern::new(&pattern)
                .map_err(|e| format!("has an invalid {key} pattern '{entry}': {e}"))?;
        }
    }
    Ok(())
}

/// Expand `schema`/`documents` entries into files under `base_dir`.
///
/// Entries may be glob patterns (`ops/**/*.graphql`) with at most one
/// `{a,b}` group. Each pattern's matches are sorted, entries keep their
/// declared order, and a file matched twice is kept once. Plain paths pass
/// through unchanged so a missing file is reported when it is read.
#[tracing::instrument(skip(entries), fields(base_dir = %base_dir.display(), entries = entries.len()))]
pub fn expand_paths<S: AsRef<str>>(base_dir: &Path, entries: &[S]) -> Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.as_ref();
        let matched = if is_pattern(entry) {
            expand_pattern(base_dir, entry)?
        } else {
            vec![base_dir.join(entry)]
        };
        files.extend(matched.into_iter().filter(|path| seen.insert(path.clone())));
    }
    Ok(files)
}

fn is_pattern(entry: &str) -> bool {
    entry.contains(['*', '?', '[', '{'])
}

fn expand_pattern(base_dir: &Path, entry: &str) -> Result<Vec<PathBuf>> {
    let root = glob::Pattern::escape(&base_dir.to_string_lossy());
    let mut matches = Vec::new();

    for pattern in expand_braces(entry) {
        let full = Path::new(&root).join(&pattern);
        let paths =
            glob::glob(&full.to_string_lossy()).map_err(|e| ConfigError::InvalidPattern {
                pattern: entry.to_string(),
                message: e.to_string(),
            })?;
        for path in paths {
            match path {
                Ok(path) if path.is_file() => matches.push(path),
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, pattern = entry, "Skipping unreadable path"),
            }
        }
    }

    if matches.is_empty() {
        return Err(ConfigError::NoMatches {
            pattern: entry.to_string(),
            base_dir: base_dir.to_path_buf(),
        });
    }
    matches.sort();
    tracing::debug!(pattern = entry, matches = matches.len(), "Expanded pattern");
    Ok(matches)
}

/// `ops/*.{graphql,gql}` becomes `ops/*.graphql` and `ops/*.gql`.
fn expand_braces(entry: &str) -> Vec<String> {
    let group = entry
        .find('{')
        .and_then(|open| entry[open..].find('}').map(|len| (open, open + len)));
    match group {
        Some((open, close)) => entry[open + 1..close]
            .split(',')
            .map(|alt| format!("{}{}{}", &entry[..open], alt.trim(), &entry[close + 1..]))
            .collect(),
        None => vec![entry.to_string()],
    }
}
