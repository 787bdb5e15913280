//! Input schemas and their validation.
//!
//! Operation inputs are ordinary `Serialize` types. Before a request is
//! built the input is serialized to a JSON object and checked against the
//! descriptor's [`InputSchema`]: unknown fields are rejected, required fields
//! must be present and every present field must match its declared
//! [`FieldKind`]. A `null` value counts as absent, so `Option` fields that
//! are `None` satisfy optional fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString};

use crate::error::ValidationError;

/// The semantic type of an input field.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FieldKind {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
    /// Any JSON value is accepted.
    Any,
}

impl FieldKind {
    /// Returns `true` for kinds that can be rendered into a URL path.
    pub fn is_scalar(self) -> bool {
        matches!(
            self,
            Self::String | Self::Integer | Self::Number | Self::Boolean
        )
    }

    /// Returns `true` if `value` (assumed non-null) conforms to this kind.
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
            Self::Any => true,
        }
    }

    /// A representative value of this kind, used to probe error variants
    /// when a descriptor is built.
    pub(crate) fn sample(self) -> Value {
        match self {
            Self::String => Value::String(String::new()),
            Self::Integer => Value::from(0),
            Self::Number => Value::from(0.0),
            Self::Boolean => Value::Bool(false),
            Self::Array => Value::Array(Vec::new()),
            Self::Object => Value::Object(Map::new()),
            Self::Any => Value::Null,
        }
    }
}

/// A single field of an [`InputSchema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
}

/// The declared shape of an operation's input.
///
/// ## Examples
///
/// ```rust
/// use switchboard::{FieldKind, InputSchema};
///
/// let schema = InputSchema::new()
///     .required("organization", FieldKind::String)
///     .required("name", FieldKind::String)
///     .optional("description", FieldKind::String);
///
/// assert_eq!(schema.fields().len(), 3);
/// assert!(!schema.field("description").unwrap().required);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSchema {
    fields: Vec<Field>,
}

impl InputSchema {
    /// Creates a schema with no fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field that must be present and non-null.
    pub fn required(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(Field {
            name: name.into(),
            kind,
            required: true,
        });
        self
    }

    /// Adds a field that may be absent or null.
    pub fn optional(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(Field {
            name: name.into(),
            kind,
            required: false,
        });
        self
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Returns the first field name that is declared more than once.
    pub(crate) fn duplicate_field(&self) -> Option<&str> {
        self.fields.iter().enumerate().find_map(|(idx, field)| {
            self.fields[..idx]
                .iter()
                .any(|earlier| earlier.name == field.name)
                .then_some(field.name.as_str())
        })
    }

    /// Validates a serialized input against this schema.
    ///
    /// Required fields listed in `path_params` are skipped here; their
    /// absence is reported by path rendering as a missing path parameter.
    pub fn validate(
        &self,
        input: &Map<String, Value>,
        path_params: &[String],
    ) -> Result<(), ValidationError> {
        for (name, value) in input {
            let Some(field) = self.field(name) else {
                return Err(ValidationError::UnknownField {
                    field: name.clone(),
                });
            };
            if value.is_null() {
                continue;
            }
            if !field.kind.accepts(value) {
                return Err(ValidationError::InvalidType {
                    field: name.clone(),
                    expected: field.kind,
                    found: json_type(value),
                });
            }
        }

        let missing = self.fields.iter().find(|field| {
            field.required
                && !path_params.contains(&field.name)
                && input.get(&field.name).is_none_or(Value::is_null)
        });
        if let Some(field) = missing {
            return Err(ValidationError::MissingField {
                field: field.name.clone(),
            });
        }

        Ok(())
    }
}

/// Serializes an input value into the JSON object the schema is checked
/// against.
pub fn to_object<I: Serialize + ?Sized>(input: &I) -> Result<Map<String, Value>, ValidationError> {
    match serde_json::to_value(input) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ValidationError::NotAnObject {
            found: json_type(&other),
        }),
        Err(err) => Err(ValidationError::Serialization(err.to_string())),
    }
}

/// Name of a JSON value's type, for error messages.
pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
