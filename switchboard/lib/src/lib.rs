//! Switchboard
//!
//! Runtime for typed REST clients. Each API operation is declared once as an
//! [`OperationDescriptor`] (method, path template, input schema, output
//! format and the closed set of API errors it can raise) and registered
//! into a callable [`Operation`]. The runtime builds the request, performs
//! one exchange through a [`Transport`] and turns the response into either
//! the typed output or a typed error.
//!
//! ## Features
//!
//! - **Validated at construction**: malformed templates, mismatched path
//!   parameters and error enums that cannot hold a declared variant are
//!   rejected when the descriptor is built
//! - **Table-driven errors**: failure statuses map to a [`WireCode`], which
//!   selects the first declared variant of the operation's error enum
//! - **No I/O outside the transport**: request building and response
//!   interpretation are pure
//! - **Pluggable transport**: [`ReqwestTransport`] by default, any
//!   [`Transport`] for tests or custom stacks
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use serde::{Deserialize, Serialize};
//! use switchboard::{
//!     Client, Credentials, ErrorVariant, FieldKind, InputSchema, JsonFormat,
//!     OperationDescriptor, RestMethod, WireCode, register,
//! };
//!
//! #[derive(Serialize)]
//! struct CreateTeam {
//!     organization: String,
//!     name: String,
//! }
//!
//! #[derive(Deserialize)]
//! struct Team {
//!     id: u64,
//!     name: String,
//! }
//!
//! #[derive(Debug, Deserialize, thiserror::Error)]
//! enum CreateTeamError {
//!     #[error("organization '{organization}' not found: {message}")]
//!     NotFound { organization: String, message: String },
//! }
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let create_team = register(
//!     OperationDescriptor::<CreateTeam, JsonFormat<Team>, CreateTeamError>::builder()
//!         .id("CreateTeam")
//!         .method(RestMethod::Post)
//!         .path("/organizations/{organization}/teams")
//!         .path_param("organization")
//!         .input(
//!             InputSchema::new()
//!                 .required("organization", FieldKind::String)
//!                 .required("name", FieldKind::String),
//!         )
//!         .error(ErrorVariant::new("NotFound", WireCode::NotFound))
//!         .build()?,
//! );
//!
//! let client = Client::new(Credentials::parse("https://api.example.com")?.bearer("t0k3n"))?;
//! let input = CreateTeam { organization: "acme".into(), name: "infra".into() };
//! let team = create_team.call(&client, &input).await?;
//! println!("created team {} ({})", team.name, team.id);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Structure
//!
//! - [`descriptor`] - Operation descriptors and their type-state builder
//! - [`operation`] - Callable operations
//! - [`api`] - Catalog of one API's operations
//! - [`request`] - Request building
//! - [`response`] - Output formats and response interpretation
//! - [`client`] - Client, credentials and transports
//! - [`error`] - Error types

pub mod api;
pub mod client;
pub mod descriptor;
pub mod error;
pub mod method;
pub mod operation;
pub mod operation_id;
pub mod path;
pub mod request;
pub mod response;
pub mod schema;
pub mod variant;
pub mod wire;

pub use api::{Api, OperationSummary};
pub use client::{
    AuthStrategy, Client, Credentials, HttpRequest, HttpResponse, ReqwestTransport,
    ReqwestTransportBuilder, Transport,
};
pub use descriptor::{DEFAULT_MESSAGE_POINTERS, DescriptorBuilder, OperationDescriptor};
pub use error::{
    ContractError, CredentialError, DecodeError, DescriptorError, ErrorKind, MalformedResponse,
    OperationError, TemplateError, TransportError, UnrecognizedApiError, ValidationError,
};
pub use method::RestMethod;
pub use operation::{Operation, register};
pub use operation_id::{OperationId, OperationIdError};
pub use path::PathTemplate;
pub use request::PreparedRequest;
pub use response::{
    BinaryFormat, JsonFormat, PlainTextFormat, ResponseFormat, VoidFormat, extract_message,
};
pub use schema::{Field, FieldKind, InputSchema};
pub use variant::{ErrorVariant, MESSAGE_FIELD, NoErrors};
pub use wire::WireCode;
