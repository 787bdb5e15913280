use strum::{Display, EnumIter};
use thiserror::Error;

use super::{ContractError, MalformedResponse, TransportError, UnrecognizedApiError, ValidationError};

/// The broad class of an [`OperationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// The input did not satisfy the descriptor; nothing was sent.
    CallerContract,
    /// One of the operation's declared error variants.
    Declared,
    /// An error status the operation never declared.
    Unrecognized,
    /// A success status with an undecodable body.
    MalformedResponse,
    /// The network exchange itself failed.
    Transport,
    /// The exchange was cancelled before a response arrived.
    Cancelled,
}

/// Every way a single operation call can fail.
///
/// `E` is the operation's closed set of declared API errors. The remaining
/// variants are shared by all operations and can be told apart with
/// [`kind`](OperationError::kind).
#[derive(Debug, Error)]
pub enum OperationError<E> {
    #[error("invalid input: {0}")]
    Validation(ValidationError),

    #[error("missing path parameter '{parameter}'")]
    MissingPathParameter { parameter: String },

    #[error("{0}")]
    Declared(E),

    #[error(transparent)]
    Unrecognized(UnrecognizedApiError),

    #[error(transparent)]
    MalformedResponse(MalformedResponse),

    #[error(transparent)]
    Transport(TransportError),

    #[error("operation cancelled")]
    Cancelled,
}

impl<E> OperationError<E> {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::MissingPathParameter { .. } => ErrorKind::CallerContract,
            Self::Declared(_) => ErrorKind::Declared,
            Self::Unrecognized(_) => ErrorKind::Unrecognized,
            Self::MalformedResponse(_) => ErrorKind::MalformedResponse,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Cancelled => ErrorKind::Cancelled,
        }
    }

    /// Returns the declared variant, if this is one.
    pub fn declared(&self) -> Option<&E> {
        match self {
            Self::Declared(err) => Some(err),
            _ => None,
        }
    }

    /// Consumes the error, returning the declared variant if this is one.
    pub fn into_declared(self) -> Option<E> {
        match self {
            Self::Declared(err) => Some(err),
            _ => None,
        }
    }
}

impl<E> From<ContractError> for OperationError<E> {
    fn from(err: ContractError) -> Self {
        match err {
            ContractError::Validation(err) => Self::Validation(err),
            ContractError::MissingPathParameter { parameter } => {
                Self::MissingPathParameter { parameter }
            }
        }
    }
}

impl<E> From<ValidationError> for OperationError<E> {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl<E> From<TransportError> for OperationError<E> {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Cancelled => Self::Cancelled,
            other => Self::Transport(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[derive(Debug, thiserror::Error)]
    #[error("declared")]
    struct Declared;

    #[test]
    fn transport_cancellation_becomes_cancelled() {
        let err: OperationError<Declared> = TransportError::Cancelled.into();
        assert_eq!(err.kind(), ErrorKind::Cancelled);

        let err: OperationError<Declared> = TransportError::Timeout.into();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn contract_errors_map_to_caller_contract() {
        let missing: OperationError<Declared> = ContractError::MissingPathParameter {
            parameter: "organization".into(),
        }
        .into();
        assert!(matches!(
            missing,
            OperationError::MissingPathParameter { ref parameter } if parameter == "organization"
        ));
        assert_eq!(missing.kind(), ErrorKind::CallerContract);

        let invalid: OperationError<Declared> = ContractError::Validation(
            ValidationError::MissingField {
                field: "name".into(),
            },
        )
        .into();
        assert_eq!(invalid.kind(), ErrorKind::CallerContract);
    }

    #[test]
    fn every_kind_is_distinct() {
        let errors: Vec<OperationError<Declared>> = vec![
            OperationError::Validation(ValidationError::NotAnObject { found: "string" }),
            OperationError::Declared(Declared),
            OperationError::Unrecognized(UnrecognizedApiError {
                status: 418,
                wire_code: None,
                body: Bytes::from_static(b"teapot"),
            }),
            OperationError::MalformedResponse(MalformedResponse {
                status: 200,
                reason: "eof".into(),
                body: Bytes::new(),
            }),
            OperationError::Transport(TransportError::Timeout),
            OperationError::Cancelled,
        ];

        let kinds: Vec<_> = errors.iter().map(OperationError::kind).collect();
        let expected: Vec<_> = <ErrorKind as strum::IntoEnumIterator>::iter().collect();
        assert_eq!(kinds, expected);
    }

    #[test]
    fn declared_accessors() {
        let err: OperationError<Declared> = OperationError::Declared(Declared);
        assert!(err.declared().is_some());
        assert!(err.into_declared().is_some());

        let err: OperationError<Declared> = OperationError::Cancelled;
        assert!(err.declared().is_none());
        assert_eq!(err.to_string(), "operation cancelled");
    }
}
