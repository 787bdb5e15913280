//! The client: credentials plus a transport.
//!
//! A [`Client`] holds no mutable state, so one instance can be shared by
//! every task making calls.

mod credentials;
mod executor;
mod transport;

pub use credentials::{AuthStrategy, Credentials};
pub use executor::{ReqwestTransport, ReqwestTransportBuilder};
pub use transport::{HttpRequest, HttpResponse, Transport};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{OperationError, TransportError};
use crate::operation::Operation;
use crate::request::merge_headers;
use crate::response::ResponseFormat;

/// Executes operations against one API deployment.
///
/// ## Examples
///
/// ```rust,no_run
/// use switchboard::{Client, Credentials};
///
/// let credentials = Credentials::parse("https://api.example.com")?.bearer("t0k3n");
/// let client = Client::new(credentials)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Client<T = ReqwestTransport> {
    credentials: Credentials,
    transport: T,
}

impl Client<ReqwestTransport> {
    /// Creates a client using a default [`ReqwestTransport`].
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(credentials: Credentials) -> Result<Self, TransportError> {
        Ok(Self::with_transport(credentials, ReqwestTransport::new()?))
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(credentials: Credentials, transport: T) -> Self {
        Self {
            credentials,
            transport,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Calls `operation` with `input`. Same as [`Operation::call`].
    pub async fn execute<I, F, E>(
        &self,
        operation: &Operation<I, F, E>,
        input: &I,
    ) -> Result<F::Output, OperationError<E>>
    where
        I: Serialize,
        F: ResponseFormat,
        E: DeserializeOwned,
    {
        operation.call(self, input).await
    }

    /// Attaches credential headers and performs the exchange. Headers
    /// already on the request win over credential headers of the same name.
    pub(crate) async fn send(&self, mut request: HttpRequest) -> Result<HttpResponse, TransportError> {
        request.headers = merge_headers(self.credentials.headers(), &request.headers);
        self.transport.send(request).await
    }
}
