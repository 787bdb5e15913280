//! Callable operations.
//!
//! An [`Operation`] is a registered descriptor. Each call runs
//! build, one transport exchange, then interpretation, as a single async
//! task whose only suspension point is the exchange.

use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{Span, debug, instrument, warn};
use url::Url;

use crate::client::{Client, HttpResponse, Transport};
use crate::descriptor::OperationDescriptor;
use crate::error::{OperationError, TransportError};
use crate::operation_id::OperationId;
use crate::request::PreparedRequest;
use crate::response::ResponseFormat;

/// Turns a descriptor into a callable operation.
///
/// The descriptor was fully validated when it was built, so registration
/// cannot fail. Use [`Api::register`](crate::Api::register) to also reject
/// duplicate ids and routes across an API.
pub fn register<I, F, E>(descriptor: OperationDescriptor<I, F, E>) -> Operation<I, F, E> {
    Operation::new(descriptor)
}

/// A callable operation.
///
/// Cheap to clone and safe to share across tasks: it only holds the
/// immutable descriptor.
pub struct Operation<I, F, E> {
    descriptor: Arc<OperationDescriptor<I, F, E>>,
}

impl<I, F, E> Clone for Operation<I, F, E> {
    fn clone(&self) -> Self {
        Self {
            descriptor: Arc::clone(&self.descriptor),
        }
    }
}

impl<I, F, E> std::fmt::Debug for Operation<I, F, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Operation").field(&self.descriptor).finish()
    }
}

impl<I, F, E> Operation<I, F, E> {
    pub fn new(descriptor: OperationDescriptor<I, F, E>) -> Self {
        Self {
            descriptor: Arc::new(descriptor),
        }
    }

    pub fn descriptor(&self) -> &OperationDescriptor<I, F, E> {
        &self.descriptor
    }

    pub fn id(&self) -> &OperationId {
        self.descriptor.id()
    }
}

impl<I, F, E> Operation<I, F, E>
where
    I: Serialize,
    F: ResponseFormat,
    E: DeserializeOwned,
{
    /// Builds the request for `input` without sending it.
    ///
    /// ## Errors
    ///
    /// Returns a caller-contract error (`Validation` or
    /// `MissingPathParameter`) if `input` does not satisfy the descriptor.
    pub fn prepare(&self, base_url: &Url, input: &I) -> Result<PreparedRequest, OperationError<E>> {
        Ok(crate::request::build(&self.descriptor, base_url, input)?)
    }

    /// Interprets a response to a request built for this operation.
    pub fn interpret(
        &self,
        path_values: &Map<String, Value>,
        response: &HttpResponse,
    ) -> Result<F::Output, OperationError<E>> {
        crate::response::interpret(&self.descriptor, path_values, response)
    }

    /// Calls the operation: build, one exchange, interpret.
    ///
    /// No request is sent when building fails. Nothing is retried.
    ///
    /// ## Errors
    ///
    /// Every failure is an [`OperationError`]; see
    /// [`ErrorKind`](crate::ErrorKind) for how they are classified.
    #[instrument(
        name = "operation",
        skip_all,
        fields(
            operation.id = %self.descriptor.id(),
            http.method = %self.descriptor.method(),
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub async fn call<T: Transport>(
        &self,
        client: &Client<T>,
        input: &I,
    ) -> Result<F::Output, OperationError<E>> {
        let prepared =
            crate::request::build(&self.descriptor, client.credentials().base_url(), input)
                .inspect_err(|err| debug!(error = %err, "input rejected before sending"))?;
        Span::current().record("http.url", prepared.url().as_str());

        let (request, path_values) = prepared.into_http();
        let response = match client.send(request).await {
            Ok(response) => response,
            Err(TransportError::Cancelled) => {
                debug!("exchange cancelled by transport");
                return Err(OperationError::Cancelled);
            }
            Err(err) => {
                warn!(error = %err, "transport failure");
                Span::current().record("otel.status_code", "ERROR");
                return Err(OperationError::Transport(err));
            }
        };

        let span = Span::current();
        span.record("http.status_code", response.status);
        let otel_status = if response.is_success() {
            "OK"
        } else if response.status >= 500 {
            "ERROR"
        } else {
            "UNSET"
        };
        span.record("otel.status_code", otel_status);

        let result = self.interpret(&path_values, &response);
        match &result {
            Ok(_) => debug!(http.status_code = response.status, "operation succeeded"),
            Err(OperationError::Unrecognized(err)) => warn!(
                http.status_code = err.status,
                wire_code = ?err.wire_code,
                "unrecognized API error"
            ),
            Err(err) => debug!(kind = %err.kind(), "operation failed"),
        }
        result
    }

    /// Calls the operation, giving up with [`OperationError::Cancelled`] as
    /// soon as `cancel` completes.
    ///
    /// A cancelled exchange is dropped, which aborts it. If `cancel` is
    /// already complete, nothing is sent.
    ///
    /// ## Examples
    ///
    /// ```rust,ignore
    /// let token = tokio_util::sync::CancellationToken::new();
    /// let result = operation.call_until(&client, &input, token.cancelled()).await;
    /// ```
    pub async fn call_until<T, C>(
        &self,
        client: &Client<T>,
        input: &I,
        cancel: C,
    ) -> Result<F::Output, OperationError<E>>
    where
        T: Transport,
        C: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            () = cancel => {
                debug!(operation.id = %self.descriptor.id(), "operation cancelled");
                Err(OperationError::Cancelled)
            }
            result = self.call(client, input) => result,
        }
    }
}
