use thiserror::Error;

use crate::method::RestMethod;
use crate::operation_id::OperationIdError;
use crate::schema::FieldKind;
use crate::wire::WireCode;

/// A path template that cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("path template '{template}' must start with '/'")]
    MissingLeadingSlash { template: String },

    #[error("unclosed placeholder at byte {position} in '{template}'")]
    Unclosed { template: String, position: usize },

    #[error("unexpected '}}' at byte {position} in '{template}'")]
    UnexpectedClose { template: String, position: usize },

    #[error("invalid placeholder name '{name}' in '{template}'")]
    InvalidPlaceholder { template: String, name: String },
}

/// A descriptor that violates its construction invariants.
///
/// These are programmer errors: they surface when descriptors are built at
/// startup, never from a call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error("invalid operation id: {0}")]
    InvalidId(#[from] OperationIdError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("placeholder '{{{placeholder}}}' in '{template}' has no declared path parameter")]
    UndeclaredPlaceholder { placeholder: String, template: String },

    #[error("path parameter '{parameter}' does not appear in '{template}'")]
    UnusedPathParameter { parameter: String, template: String },

    #[error("path parameter '{parameter}' is declared more than once")]
    DuplicatePathParameter { parameter: String },

    #[error("path parameter '{parameter}' is not a field of the input schema")]
    PathParameterNotInSchema { parameter: String },

    #[error("path parameter '{parameter}' must be a scalar field, found {kind}")]
    NonScalarPathParameter { parameter: String, kind: FieldKind },

    #[error("'{parameter}' is reserved for error messages and cannot be a path parameter")]
    ReservedPathParameter { parameter: String },

    #[error("input field '{field}' is declared more than once")]
    DuplicateField { field: String },

    #[error("invalid error variant tag: {0}")]
    InvalidVariantTag(OperationIdError),

    #[error("error variant '{tag}' is declared more than once")]
    DuplicateVariantTag { tag: String },

    #[error("wire code '{wire_code}' is declared by both '{first}' and '{second}'")]
    DuplicateWireCode {
        wire_code: WireCode,
        first: String,
        second: String,
    },

    #[error("error variant '{tag}' cannot be constructed: {reason}")]
    UnconstructibleVariant { tag: String, reason: String },

    #[error("invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("operation '{id}' is already registered")]
    DuplicateOperation { id: String },

    #[error("route {method} {template} is already registered by '{existing}'")]
    DuplicateRoute {
        method: RestMethod,
        template: String,
        existing: String,
    },
}
