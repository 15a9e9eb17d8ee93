//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::KzError;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &KzError) -> String {
    match e {
        KzError::SelectionCancelled => "no selection made".to_string(),
        other => other.to_string(),
    }
}
