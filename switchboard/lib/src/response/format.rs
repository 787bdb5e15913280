//! Output formats an operation decodes its success body with.

use std::marker::PhantomData;

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::error::DecodeError;

/// How a success body is decoded into an operation's output.
///
/// Decoding is synchronous and pure; a failure becomes
/// [`MalformedResponse`](crate::error::MalformedResponse).
pub trait ResponseFormat: Send + Sync + 'static {
    /// The decoded output type.
    type Output: Send + 'static;

    /// The `Accept` header to send, if the format has one.
    const ACCEPT: Option<&'static str> = None;

    /// Decodes a success body.
    fn decode(body: &Bytes) -> Result<Self::Output, DecodeError>;
}

/// JSON body deserialized into `T`.
///
/// Strictness follows `T`: annotate it with `#[serde(deny_unknown_fields)]`
/// to reject extra fields, and use `Option` for fields the vendor may omit.
#[derive(Debug)]
pub struct JsonFormat<T>(PhantomData<fn() -> T>);

impl<T> ResponseFormat for JsonFormat<T>
where
    T: DeserializeOwned + Send + 'static,
{
    type Output = T;

    const ACCEPT: Option<&'static str> = Some("application/json");

    fn decode(body: &Bytes) -> Result<T, DecodeError> {
        Ok(serde_json::from_slice(body)?)
    }
}

/// UTF-8 text body.
#[derive(Debug)]
pub struct PlainTextFormat;

impl ResponseFormat for PlainTextFormat {
    type Output = String;

    const ACCEPT: Option<&'static str> = Some("text/plain");

    fn decode(body: &Bytes) -> Result<String, DecodeError> {
        Ok(String::from_utf8(body.to_vec())?)
    }
}

/// Raw body bytes.
#[derive(Debug)]
pub struct BinaryFormat;

impl ResponseFormat for BinaryFormat {
    type Output = Bytes;

    fn decode(body: &Bytes) -> Result<Bytes, DecodeError> {
        Ok(body.clone())
    }
}

/// No output. Any success status decodes to `()`, whatever the body holds
/// (typically nothing, as with `204 No Content`).
#[derive(Debug)]
pub struct VoidFormat;

impl ResponseFormat for VoidFormat {
    type Output = ();

    fn decode(_body: &Bytes) -> Result<(), DecodeError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, serde::Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Team {
        slug: String,
        description: Option<String>,
    }

    #[test]
    fn json_decodes_declared_shape() {
        let body = Bytes::from_static(br#"{"slug":"infra"}"#);
        let team = JsonFormat::<Team>::decode(&body).unwrap();
        assert_eq!(
            team,
            Team {
                slug: "infra".into(),
                description: None
            }
        );
    }

    #[test]
    fn json_rejects_extra_and_missing_fields() {
        let extra = Bytes::from_static(br#"{"slug":"infra","color":"red"}"#);
        assert!(matches!(
            JsonFormat::<Team>::decode(&extra),
            Err(DecodeError::Json(_))
        ));

        let missing = Bytes::from_static(br#"{"description":"x"}"#);
        assert!(JsonFormat::<Team>::decode(&missing).is_err());
    }

    #[test]
    fn json_rejects_empty_body() {
        assert!(JsonFormat::<Team>::decode(&Bytes::new()).is_err());
    }

    #[test]
    fn text_requires_utf8() {
        assert_eq!(
            PlainTextFormat::decode(&Bytes::from_static(b"pong")).unwrap(),
            "pong"
        );
        assert!(matches!(
            PlainTextFormat::decode(&Bytes::from_static(&[0xff, 0xfe])),
            Err(DecodeError::Utf8(_))
        ));
    }

    #[test]
    fn void_ignores_body() {
        assert!(VoidFormat::decode(&Bytes::new()).is_ok());
        assert!(VoidFormat::decode(&Bytes::from_static(b"{}")).is_ok());
    }

    #[test]
    fn accept_headers() {
        assert_eq!(JsonFormat::<Team>::ACCEPT, Some("application/json"));
        assert_eq!(VoidFormat::ACCEPT, None);
        assert_eq!(BinaryFormat::ACCEPT, None);
    }
}
