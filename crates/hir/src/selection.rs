//! Choosing the operation to document from a parsed executable document.

use crate::{HirError, OperationStructure, Result};

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Select an operation by name, or pick one when no name is given.
///
/// - With a name, the operation with exactly that name is returned.
/// - Without a name, a lone operation is returned as is; among several, the
///   first named operation wins, falling back to the first operation when
///   none are named.
#[tracing::instrument(skip(operations), fields(operations = operations.len()))]
pub fn select_operation<'a>(
    operations: &'a [OperationStructure],
    name: Option<&str>,
) -> Result<&'a OperationStructure> {
    if let Some(name) = name {
        return operations
            .iter()
            .find(|op| op.name.as_deref() == Some(name))
            .ok_or_else(|| not_found(operations, name));
    }

    let selected = match operations {
        [] => return Err(HirError::NoOperations),
        [only] => only,
        [first, ..] => operations
            .iter()
            .find(|op| op.name.is_some())
            .unwrap_or(first),
    };

    tracing::debug!(
        operation = selected.display_name(),
        index = selected.index,
        "Selected operation"
    );
    Ok(selected)
}

fn not_found(operations: &[OperationStructure], name: &str) -> HirError {
    let available: Vec<String> = operations
        .iter()
        .filter_map(|op| op.name.as_deref().map(str::to_string))
        .collect();

    let suggestion = available
        .iter()
        .map(|candidate| (strsim::jaro_winkler(name, candidate), candidate))
        .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, candidate)| candidate.clone());

    HirError::OperationNotFound {
        name: name.to_string(),
        available,
        suggestion,
    }
}
