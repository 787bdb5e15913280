use thiserror::Error;

use crate::schema::FieldKind;

/// The input value does not satisfy the operation's input schema.
///
/// Always raised locally, before any network exchange.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("input could not be serialized: {0}")]
    Serialization(String),

    #[error("input must serialize to an object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("unknown field '{field}'")]
    UnknownField { field: String },

    #[error("missing required field '{field}'")]
    MissingField { field: String },

    #[error("field '{field}' expected {expected}, found {found}")]
    InvalidType {
        field: String,
        expected: FieldKind,
        found: &'static str,
    },

    #[error("path parameter '{parameter}' {reason}")]
    InvalidPathParameter { parameter: String, reason: String },

    #[error("query parameter '{field}' cannot carry {found} values")]
    UnsupportedQueryValue { field: String, found: &'static str },
}

/// Caller-contract failures produced while building a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("missing path parameter '{parameter}'")]
    MissingPathParameter { parameter: String },
}
