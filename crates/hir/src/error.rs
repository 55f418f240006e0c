use thiserror::Error;

pub type Result<T> = std::result::Result<T, HirError>;

#[derive(Debug, Error)]
pub enum HirError {
    #[error("Failed to parse {path}:\n{message}")]
    Parse { path: String, message: String },

    #[error("Type '{0}' is defined more than once")]
    DuplicateType(String),

    #[error("Operation '{name}' not found{}", not_found_hint(.suggestion.as_ref(), .available))]
    OperationNotFound {
        name: String,
        available: Vec<String>,
        suggestion: Option<String>,
    },

    #[error("Document contains no operations")]
    NoOperations,
}

fn not_found_hint(suggestion: Option<&String>, available: &[String]) -> String {
    if let Some(suggestion) = suggestion {
        format!(". Did you mean '{suggestion}'?")
    } else if available.is_empty() {
        ". The document has no named operations".to_string()
    } else {
        format!(". Available operations: {}", available.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn not_found(available: &[&str], suggestion: Option<&str>) -> String {
        HirError::OperationNotFound {
            name: "GetUsr".to_string(),
            available: available.iter().map(ToString::to_string).collect(),
            suggestion: suggestion.map(ToString::to_string),
        }
        .to_string()
    }

    #[test]
    fn test_operation_not_found_hints() {
        assert_eq!(
            not_found(&["GetUser"], Some("GetUser")),
            "Operation 'GetUsr' not found. Did you mean 'GetUser'?"
        );
        assert_eq!(
            not_found(&["ListUsers", "DeleteUser"], None),
            "Operation 'GetUsr' not found. Available operations: ListUsers, DeleteUser"
        );
        assert_eq!(
            not_found(&[], None),
            "Operation 'GetUsr' not found. The document has no named operations"
        );
    }
}
