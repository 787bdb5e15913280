//! Layered error types for the operation runtime.
//!
//! - [`OperationError`] - Everything a single call can fail with, classified by [`ErrorKind`]
//! - [`ValidationError`] / [`ContractError`] - Input did not satisfy the descriptor
//! - [`UnrecognizedApiError`] - Error status with no matching declared variant
//! - [`MalformedResponse`] - Success status whose body failed to decode
//! - [`TransportError`] - Network, timeout and cancellation failures
//! - [`DescriptorError`] - Invalid descriptors, rejected at construction
//! - [`CredentialError`] - Credentials could not be assembled

mod credential_error;
mod descriptor_error;
mod operation_error;
mod response_error;
mod transport_error;
mod validation_error;

pub use credential_error::CredentialError;
pub use descriptor_error::{DescriptorError, TemplateError};
pub use operation_error::{ErrorKind, OperationError};
pub use response_error::{DecodeError, MalformedResponse, UnrecognizedApiError};
pub use transport_error::TransportError;
pub use validation_error::{ContractError, ValidationError};
