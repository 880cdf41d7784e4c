use std::collections::BTreeMap;

use thiserror::Error;

/// Field name → human-readable message, as returned to API clients.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {}", describe(.0))]
    Validation(FieldErrors),
    #[error("coercion error: {}", describe(.0))]
    Coercion(FieldErrors),
}

impl ModelError {
    pub fn fields(&self) -> &FieldErrors {
        match self {
            ModelError::Validation(e) | ModelError::Coercion(e) => e,
        }
    }
}

fn describe(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, msg)| format!("{field}: {msg}"))
        .collect::<Vec<_>>()
        .join("; ")
}
