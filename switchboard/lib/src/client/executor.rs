//! The reqwest-backed [`Transport`].

use std::future::Future;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::debug;

use crate::client::transport::{HttpRequest, HttpResponse, Transport};
use crate::error::TransportError;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Builder for configuring a [`ReqwestTransport`].
#[derive(Debug)]
pub struct ReqwestTransportBuilder {
    timeout: Duration,
    default_headers: HeaderMap,
}

impl ReqwestTransportBuilder {
    fn new() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_headers: HeaderMap::new(),
        }
    }

    /// Sets the request timeout.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use std::time::Duration;
    /// use switchboard::ReqwestTransport;
    ///
    /// let transport = ReqwestTransport::builder()
    ///     .timeout(Duration::from_secs(60))
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Adds a header sent with every request, such as `User-Agent`.
    ///
    /// ## Errors
    ///
    /// Returns [`TransportError::InvalidHeader`] if the name or value is not
    /// valid HTTP.
    pub fn default_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, TransportError> {
        let (name, value) = header_pair(name.as_ref(), value.as_ref())?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Builds the [`ReqwestTransport`].
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn build(self) -> Result<ReqwestTransport, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(self.default_headers)
            .build()
            .map_err(TransportError::Http)?;

        Ok(ReqwestTransport { client })
    }
}

/// Sends requests with a shared `reqwest::Client`.
///
/// Cloning is cheap and clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn builder() -> ReqwestTransportBuilder {
        ReqwestTransportBuilder::new()
    }

    /// Creates a transport with default settings.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new() -> Result<Self, TransportError> {
        Self::builder().build()
    }

    /// Wraps an already configured client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn exchange(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method.into(), request.url);

        for (name, value) in &request.headers {
            let (name, value) = header_pair(name, value)?;
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        debug!(http.status_code = status, body_len = body.len(), "received response");

        Ok(HttpResponse { status, body })
    }
}

impl Transport for ReqwestTransport {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        self.exchange(request)
    }
}

fn header_pair(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), TransportError> {
    let name = HeaderName::try_from(name)
        .map_err(|e| TransportError::InvalidHeader(format!("invalid header name '{name}': {e}")))?;
    let value = HeaderValue::try_from(value)
        .map_err(|e| TransportError::InvalidHeader(format!("invalid value for '{name}': {e}")))?;
    Ok((name, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::RestMethod;
    use bytes::Bytes;
    use url::Url;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request(method: RestMethod, url: Url) -> HttpRequest {
        HttpRequest {
            method,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    #[test]
    fn rejects_invalid_default_header() {
        let result = ReqwestTransport::builder().default_header("bad header", "v");
        assert!(matches!(result, Err(TransportError::InvalidHeader(_))));

        let result = ReqwestTransport::builder().default_header("X-Ok", "line\nbreak");
        assert!(matches!(result, Err(TransportError::InvalidHeader(_))));
    }

    #[tokio::test]
    async fn sends_method_headers_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/teams"))
            .and(header("authorization", "Bearer t0k3n"))
            .and(header("x-client", "switchboard"))
            .and(body_json(serde_json::json!({"name": "infra"})))
            .respond_with(ResponseTemplate::new(201).set_body_string(r#"{"id":1}"#))
            .expect(1)
            .mount(&server)
            .await;

        let transport = ReqwestTransport::builder()
            .default_header("X-Client", "switchboard")
            .unwrap()
            .build()
            .unwrap();

        let url = Url::parse(&format!("{}/teams", server.uri())).unwrap();
        let mut req = request(RestMethod::Post, url);
        req.headers
            .push(("Authorization".into(), "Bearer t0k3n".into()));
        req.headers
            .push(("Content-Type".into(), "application/json".into()));
        req.body = Some(Bytes::from_static(br#"{"name":"infra"}"#));

        let response = transport.send(req).await.unwrap();
        assert_eq!(response.status, 201);
        assert_eq!(response.body, Bytes::from_static(br#"{"id":1}"#));
    }

    #[tokio::test]
    async fn error_statuses_are_responses() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new().unwrap();
        let url = Url::parse(&server.uri()).unwrap();
        let response = transport.send(request(RestMethod::Get, url)).await.unwrap();
        assert_eq!(response.status, 404);
        assert_eq!(response.body, Bytes::from_static(b"missing"));
    }

    #[tokio::test]
    async fn timeout_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let transport = ReqwestTransport::builder()
            .timeout(Duration::from_millis(50))
            .build()
            .unwrap();
        let url = Url::parse(&server.uri()).unwrap();
        let err = transport.send(request(RestMethod::Get, url)).await.unwrap_err();
        assert!(matches!(err, TransportError::Timeout));
    }

    #[tokio::test]
    async fn connection_failure_is_transport_error() {
        // Mock servers are pooled and outlive a drop, so reserve a port and
        // release it to get an address nothing listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        let url = Url::parse(&format!("http://127.0.0.1:{port}/")).unwrap();

        let transport = ReqwestTransport::new().unwrap();
        let err = transport.send(request(RestMethod::Get, url)).await.unwrap_err();
        assert!(matches!(
            err,
            TransportError::Connection(_) | TransportError::Http(_)
        ));
    }
}
