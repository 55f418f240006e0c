use thiserror::Error;

pub type Result<T> = std::result::Result<T, OpenApiError>;

#[derive(Debug, Error)]
pub enum OpenApiError {
    #[error("Invalid endpoint URL '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("Unknown output format '{0}' (expected yaml or json)")]
    UnknownFormat(String),

    #[error("Failed to serialize document: {0}")]
    Serialize(String),
}

impl From<serde_json::Error> for OpenApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize(err.to_string())
    }
}

impl From<serde_yaml::Error> for OpenApiError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialize(err.to_string())
    }
}
