//! Response interpretation and error-message extraction.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::client::HttpResponse;
use crate::descriptor::OperationDescriptor;
use crate::error::{MalformedResponse, OperationError, UnrecognizedApiError};
use crate::response::ResponseFormat;
use crate::wire::WireCode;

/// Turns an HTTP response into the operation's result.
///
/// Success statuses decode the body with the output format. Failure
/// statuses are mapped to a [`WireCode`] through the fixed status table and
/// produce the first declared variant with that code, populated from
/// `path_values` and the message found in the body. Anything else is an
/// [`UnrecognizedApiError`].
///
/// Interpretation is pure, so the same response always yields the same
/// result.
pub fn interpret<I, F, E>(
    descriptor: &OperationDescriptor<I, F, E>,
    path_values: &Map<String, Value>,
    response: &HttpResponse,
) -> Result<F::Output, OperationError<E>>
where
    F: ResponseFormat,
    E: DeserializeOwned,
{
    let status = response.status;

    if response.is_success() {
        return F::decode(&response.body).map_err(|err| {
            debug!(
                operation.id = %descriptor.id(),
                http.status_code = status,
                error = %err,
                "success body failed to decode"
            );
            OperationError::MalformedResponse(MalformedResponse {
                status,
                reason: err.to_string(),
                body: response.body.clone(),
            })
        });
    }

    let wire_code = WireCode::from_status(status);
    let unrecognized = || {
        OperationError::Unrecognized(UnrecognizedApiError {
            status,
            wire_code,
            body: response.body.clone(),
        })
    };

    let Some(variant) = wire_code.and_then(|code| descriptor.variant_for(code)) else {
        return Err(unrecognized());
    };

    let message = extract_message(descriptor.message_pointers(), status, &response.body);
    match variant.construct::<E>(path_values, &message) {
        Ok(err) => Err(OperationError::Declared(err)),
        Err(err) => {
            warn!(
                operation.id = %descriptor.id(),
                variant = variant.tag(),
                error = %err,
                "declared error variant could not be constructed"
            );
            Err(unrecognized())
        }
    }
}

/// Finds the human-readable message of an error body.
///
/// Each JSON pointer is tried in order and the first non-empty string wins.
/// Bodies that are not JSON, or carry no message, get a generic message
/// naming the status.
///
/// ## Examples
///
/// ```rust
/// use switchboard::extract_message;
///
/// let pointers = vec!["/message".to_string(), "/error/message".to_string()];
///
/// let body = br#"{"error": {"message": "Team not found"}}"#;
/// assert_eq!(extract_message(&pointers, 404, body), "Team not found");
///
/// assert_eq!(
///     extract_message(&pointers, 404, b"<html>"),
///     "request failed with status 404 (Not Found)"
/// );
/// ```
pub fn extract_message(pointers: &[String], status: u16, body: &[u8]) -> String {
    let found = serde_json::from_slice::<Value>(body).ok().and_then(|json| {
        pointers.iter().find_map(|pointer| {
            json.pointer(pointer)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|message| !message.is_empty())
                .map(str::to_string)
        })
    });

    found.unwrap_or_else(|| {
        match StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
        {
            Some(reason) => format!("request failed with status {status} ({reason})"),
            None => format!("request failed with status {status}"),
        }
    })
}
