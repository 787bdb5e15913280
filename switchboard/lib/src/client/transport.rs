//! The transport seam between the runtime and the network.

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;
use url::Url;

use crate::error::TransportError;
use crate::method::RestMethod;

/// A request handed to a [`Transport`].
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: RestMethod,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<Bytes>,
}

/// The status and raw body a [`Transport`] hands back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs one HTTP exchange.
///
/// Implementations must not interpret the status: every response that
/// arrives, success or failure, is returned as `Ok`. Only failures of the
/// exchange itself are errors, and they are propagated by the runtime as-is.
///
/// ## Examples
///
/// ```rust
/// use std::future::Future;
///
/// use switchboard::{HttpRequest, HttpResponse, Transport, TransportError};
///
/// /// Answers every request with `204 No Content`.
/// struct NoContent;
///
/// impl Transport for NoContent {
///     fn send(
///         &self,
///         _request: HttpRequest,
///     ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
///         async { Ok(HttpResponse::new(204, Vec::new())) }
///     }
/// }
/// ```
pub trait Transport: Send + Sync {
    /// Sends the request and returns the response, whatever its status.
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        (**self).send(request)
    }
}

impl<T: Transport> Transport for &T {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        (**self).send(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range() {
        assert!(HttpResponse::new(200, Vec::new()).is_success());
        assert!(HttpResponse::new(204, Vec::new()).is_success());
        assert!(!HttpResponse::new(199, Vec::new()).is_success());
        assert!(!HttpResponse::new(304, Vec::new()).is_success());
        assert!(!HttpResponse::new(404, Vec::new()).is_success());
    }
}
