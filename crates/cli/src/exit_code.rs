//! Exit codes for the GraphQL CLI.
//!
//! This module defines distinct exit codes for different error types,
//! allowing scripts and CI systems to distinguish between different
//! failure modes.

use graphql_config::ConfigError;
use graphql_hir::HirError;
use graphql_openapi::OpenApiError;

/// Exit codes used by the CLI.
///
/// These follow standard Unix conventions where 0 indicates success
/// and non-zero values indicate different types of failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - no errors
    Success = 0,
    /// The requested operation could not be selected from the query document
    OperationError = 1,
    /// Configuration or usage error (missing inputs, invalid config file)
    ConfigError = 2,
    /// Schema load error (file not found, invalid SDL)
    SchemaError = 3,
    /// I/O error (file read/write failure)
    IoError = 4,
    /// Invalid input (query syntax, endpoint URL, variables file)
    ParseError = 5,
}

impl ExitCode {
    /// Exit the process with this exit code.
    pub fn exit(self) -> ! {
        std::process::exit(self as i32)
    }

    /// Get the numeric value of this exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Pick the exit code for a failed run.
    ///
    /// An explicit tag attached with [`WithExitCode`] wins; otherwise the
    /// code is derived from the first recognized error in the chain.
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        if let Some(code) = err.downcast_ref::<Self>() {
            return *code;
        }

        for cause in err.chain() {
            if let Some(hir) = cause.downcast_ref::<HirError>() {
                return match hir {
                    HirError::OperationNotFound { .. } | HirError::NoOperations => {
                        Self::OperationError
                    }
                    _ => Self::SchemaError,
                };
            }
            if let Some(openapi) = cause.downcast_ref::<OpenApiError>() {
                return match openapi {
                    OpenApiError::InvalidEndpoint { .. } => Self::ParseError,
                    OpenApiError::UnknownFormat(_) => Self::ConfigError,
                    OpenApiError::Serialize(_) => Self::IoError,
                };
            }
            if cause.is::<ConfigError>() {
                return Self::ConfigError;
            }
            if cause.is::<std::io::Error>() {
                return Self::IoError;
            }
        }

        Self::ConfigError
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::OperationError => write!(f, "operation error"),
            Self::ConfigError => write!(f, "configuration error"),
            Self::SchemaError => write!(f, "schema load error"),
            Self::IoError => write!(f, "I/O error"),
            Self::ParseError => write!(f, "parse error"),
        }
    }
}

/// Tag a failure with the exit code it should produce.
pub trait WithExitCode<T> {
    fn exit_code(self, code: ExitCode) -> anyhow::Result<T>;
}

impl<T, E> WithExitCode<T> for Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn exit_code(self, code: ExitCode) -> anyhow::Result<T> {
        self.map_err(|e| e.into().context(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_operation_errors() {
        let err = anyhow::Error::from(HirError::NoOperations);
        assert_eq!(ExitCode::for_error(&err), ExitCode::OperationError);

        let err = anyhow::Error::from(HirError::OperationNotFound {
            name: "Missing".to_string(),
            available: vec!["GetUser".to_string()],
            suggestion: None,
        })
        .context("Failed to select operation");
        assert_eq!(ExitCode::for_error(&err).code(), 1);
    }

    #[test]
    fn test_schema_parse_defaults_to_schema_error() {
        let err = anyhow::Error::from(HirError::DuplicateType("User".to_string()));
        assert_eq!(ExitCode::for_error(&err), ExitCode::SchemaError);
    }

    #[test]
    fn test_explicit_tag_wins() {
        let result: Result<(), HirError> = Err(HirError::Parse {
            path: "query.graphql".to_string(),
            message: "Syntax Error".to_string(),
        });
        let err = result
            .exit_code(ExitCode::ParseError)
            .context("Failed to load query")
            .unwrap_err();
        assert_eq!(ExitCode::for_error(&err), ExitCode::ParseError);
    }

    #[test]
    fn test_library_errors() {
        let endpoint = anyhow::Error::from(OpenApiError::InvalidEndpoint {
            url: "nope".to_string(),
            reason: "relative URL without a base".to_string(),
        });
        assert_eq!(ExitCode::for_error(&endpoint), ExitCode::ParseError);

        let io = anyhow::Error::from(std::io::Error::other("disk full"));
        assert_eq!(ExitCode::for_error(&io), ExitCode::IoError);

        let config = anyhow::Error::from(ConfigError::ProjectRequired {
            available: vec!["a".to_string(), "b".to_string()],
        });
        assert_eq!(ExitCode::for_error(&config), ExitCode::ConfigError);

        let usage = anyhow::anyhow!("--schema is required");
        assert_eq!(ExitCode::for_error(&usage), ExitCode::ConfigError);
    }
}
