//! Declared error variants and their table-driven construction.
//!
//! An operation's API errors are a closed Rust enum deriving
//! `serde::Deserialize`. Each enum variant is declared on the descriptor as
//! an [`ErrorVariant`] pairing its tag (the enum variant name) with the wire
//! code that selects it. The interpreter builds the externally tagged JSON
//! form `{ "<tag>": { <path params>, "message": ... } }` and lets serde
//! construct the variant, so no per-operation matching code is needed.
//!
//! ```rust
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize, thiserror::Error)]
//! pub enum CreateTeamError {
//!     #[error("organization '{organization}' not found: {message}")]
//!     NotFound { organization: String, message: String },
//! }
//! ```

use std::fmt;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::schema::FieldKind;
use crate::wire::WireCode;

/// The field every variant carries the extracted error message in.
pub const MESSAGE_FIELD: &str = "message";

/// One declared error variant of an operation.
///
/// Created with [`ErrorVariant::new`]; its fields (every path parameter plus
/// [`MESSAGE_FIELD`]) are filled in when the descriptor is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorVariant {
    tag: String,
    wire_code: WireCode,
    fields: Vec<(String, FieldKind)>,
}

impl ErrorVariant {
    /// Declares that responses carrying `wire_code` produce the enum
    /// variant named `tag`.
    pub fn new(tag: impl Into<String>, wire_code: WireCode) -> Self {
        Self {
            tag: tag.into(),
            wire_code,
            fields: Vec::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn wire_code(&self) -> WireCode {
        self.wire_code
    }

    /// Field names and kinds the variant is populated with.
    pub fn fields(&self) -> &[(String, FieldKind)] {
        &self.fields
    }

    pub(crate) fn with_fields(mut self, fields: Vec<(String, FieldKind)>) -> Self {
        self.fields = fields;
        self
    }

    /// Builds the enum variant from path parameter values and a message.
    pub(crate) fn construct<E: DeserializeOwned>(
        &self,
        path_values: &Map<String, Value>,
        message: &str,
    ) -> Result<E, serde_json::Error> {
        let mut fields = Map::new();
        for (name, _) in &self.fields {
            if name == MESSAGE_FIELD {
                continue;
            }
            let value = path_values.get(name).cloned().unwrap_or(Value::Null);
            fields.insert(name.clone(), value);
        }
        fields.insert(MESSAGE_FIELD.to_string(), Value::String(message.to_string()));

        let mut tagged = Map::new();
        tagged.insert(self.tag.clone(), Value::Object(fields));
        serde_json::from_value(Value::Object(tagged))
    }

    /// Builds the variant from sample values of each field's kind, to prove
    /// at construction time that `E` has a matching variant.
    pub(crate) fn probe<E: DeserializeOwned>(&self) -> Result<E, serde_json::Error> {
        let samples: Map<String, Value> = self
            .fields
            .iter()
            .map(|(name, kind)| (name.clone(), kind.sample()))
            .collect();
        self.construct(&samples, "")
    }
}

/// The error type of operations that declare no API errors.
///
/// Uninhabited: every error status of such an operation surfaces as
/// [`UnrecognizedApiError`](crate::error::UnrecognizedApiError).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum NoErrors {}

impl fmt::Display for NoErrors {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl std::error::Error for NoErrors {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq, Deserialize)]
    enum TeamError {
        NotFound {
            organization: String,
            team: u64,
            message: String,
        },
        Forbidden {
            organization: String,
            message: String,
        },
    }

    fn not_found() -> ErrorVariant {
        ErrorVariant::new("NotFound", WireCode::NotFound).with_fields(vec![
            ("organization".into(), FieldKind::String),
            ("team".into(), FieldKind::Integer),
            (MESSAGE_FIELD.into(), FieldKind::String),
        ])
    }

    #[test]
    fn constructs_variant_from_path_values() {
        let path_values = match json!({"organization": "acme", "team": 7}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };

        let err: TeamError = not_found().construct(&path_values, "no such team").unwrap();
        assert_eq!(
            err,
            TeamError::NotFound {
                organization: "acme".into(),
                team: 7,
                message: "no such team".into(),
            }
        );
    }

    #[test]
    fn probe_accepts_matching_enum() {
        assert!(not_found().probe::<TeamError>().is_ok());

        let forbidden = ErrorVariant::new("Forbidden", WireCode::Forbidden).with_fields(vec![
            ("organization".into(), FieldKind::String),
            (MESSAGE_FIELD.into(), FieldKind::String),
        ]);
        assert!(forbidden.probe::<TeamError>().is_ok());
    }

    #[test]
    fn probe_rejects_unknown_tag() {
        let variant = ErrorVariant::new("Conflict", WireCode::Conflict)
            .with_fields(vec![(MESSAGE_FIELD.into(), FieldKind::String)]);
        assert!(variant.probe::<TeamError>().is_err());
    }

    #[test]
    fn probe_rejects_mismatched_field_kind() {
        let variant = ErrorVariant::new("NotFound", WireCode::NotFound).with_fields(vec![
            ("organization".into(), FieldKind::String),
            ("team".into(), FieldKind::String),
            (MESSAGE_FIELD.into(), FieldKind::String),
        ]);
        assert!(variant.probe::<TeamError>().is_err());
    }

    #[test]
    fn no_errors_cannot_be_constructed() {
        let variant = ErrorVariant::new("NotFound", WireCode::NotFound)
            .with_fields(vec![(MESSAGE_FIELD.into(), FieldKind::String)]);
        assert!(variant.probe::<NoErrors>().is_err());
    }
}
