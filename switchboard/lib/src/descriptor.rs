//! Operation descriptors with a type-state builder.
//!
//! An [`OperationDescriptor`] is the declaration of one API operation: its
//! method, path template, path parameters, input schema, output format and
//! ordered error variants. The [`DescriptorBuilder`] tracks the required
//! id/method/path in its type parameters and checks every remaining
//! invariant in [`build`](DescriptorBuilder::build), so a misdeclared
//! operation fails when it is constructed, not on its first call.

use std::fmt;
use std::marker::PhantomData;

use reqwest::header::{HeaderName, HeaderValue};
use serde::de::DeserializeOwned;

use crate::error::DescriptorError;
use crate::method::RestMethod;
use crate::operation_id::OperationId;
use crate::path::PathTemplate;
use crate::response::ResponseFormat;
use crate::schema::{FieldKind, InputSchema};
use crate::variant::{ErrorVariant, MESSAGE_FIELD};
use crate::wire::WireCode;

/// JSON pointers tried, in order, to find the message of an error body.
pub const DEFAULT_MESSAGE_POINTERS: &[&str] = &["/message", "/error/message", "/error", "/detail"];

/// Marker for builder state tracking.
pub mod builder_state {
    /// Marker for a required field that has not been set.
    #[derive(Debug)]
    pub struct Missing;
}

use builder_state::Missing;

/// The immutable declaration of one API operation.
///
/// ## Type Parameters
///
/// - `I`: the input type, serialized and validated against the input schema.
/// - `F`: the [`ResponseFormat`] success bodies decode with.
/// - `E`: the closed enum of declared API errors.
///
/// ## Examples
///
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use switchboard::{
///     ErrorVariant, FieldKind, InputSchema, OperationDescriptor, RestMethod, VoidFormat,
///     WireCode,
/// };
///
/// #[derive(Debug, Serialize)]
/// struct DeleteTeam {
///     organization: String,
///     team: String,
/// }
///
/// #[derive(Debug, Deserialize, thiserror::Error)]
/// enum DeleteTeamError {
///     #[error("{message}")]
///     Forbidden { organization: String, team: String, message: String },
/// }
///
/// let descriptor = OperationDescriptor::<DeleteTeam, VoidFormat, DeleteTeamError>::builder()
///     .id("DeleteTeam")
///     .method(RestMethod::Delete)
///     .path("/organizations/{organization}/teams/{team}")
///     .path_params(["organization", "team"])
///     .input(
///         InputSchema::new()
///             .required("organization", FieldKind::String)
///             .required("team", FieldKind::String),
///     )
///     .error(ErrorVariant::new("Forbidden", WireCode::Forbidden))
///     .build()
///     .unwrap();
///
/// assert_eq!(descriptor.path_params(), ["organization", "team"]);
/// ```
pub struct OperationDescriptor<I, F, E> {
    id: OperationId,
    method: RestMethod,
    template: PathTemplate,
    path_params: Vec<String>,
    input_schema: InputSchema,
    error_variants: Vec<ErrorVariant>,
    headers: Vec<(String, String)>,
    message_pointers: Vec<String>,
    description: Option<String>,
    _types: PhantomData<fn(&I) -> (F, E)>,
}

impl<I, F, E> OperationDescriptor<I, F, E> {
    /// Creates a new descriptor builder.
    pub fn builder() -> DescriptorBuilder<Missing, Missing, Missing, I, F, E> {
        DescriptorBuilder::new()
    }

    pub fn id(&self) -> &OperationId {
        &self.id
    }

    pub fn method(&self) -> RestMethod {
        self.method
    }

    pub fn template(&self) -> &PathTemplate {
        &self.template
    }

    /// The raw path template.
    pub fn path(&self) -> &str {
        self.template.as_str()
    }

    /// Declared path parameters, in declaration order.
    pub fn path_params(&self) -> &[String] {
        &self.path_params
    }

    pub fn input_schema(&self) -> &InputSchema {
        &self.input_schema
    }

    /// Declared error variants, in declaration order.
    pub fn error_variants(&self) -> &[ErrorVariant] {
        &self.error_variants
    }

    /// Headers sent with every request of this operation.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn message_pointers(&self) -> &[String] {
        &self.message_pointers
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The first declared variant carrying `wire_code`.
    pub fn variant_for(&self, wire_code: WireCode) -> Option<&ErrorVariant> {
        self.error_variants
            .iter()
            .find(|variant| variant.wire_code() == wire_code)
    }
}

impl<I, F, E> Clone for OperationDescriptor<I, F, E> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            method: self.method,
            template: self.template.clone(),
            path_params: self.path_params.clone(),
            input_schema: self.input_schema.clone(),
            error_variants: self.error_variants.clone(),
            headers: self.headers.clone(),
            message_pointers: self.message_pointers.clone(),
            description: self.description.clone(),
            _types: PhantomData,
        }
    }
}

impl<I, F, E> fmt::Debug for OperationDescriptor<I, F, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationDescriptor")
            .field("id", &self.id)
            .field("method", &self.method)
            .field("path", &self.template.as_str())
            .field("path_params", &self.path_params)
            .field("input_schema", &self.input_schema)
            .field("error_variants", &self.error_variants)
            .finish_non_exhaustive()
    }
}

/// Fields that can be set in any builder state.
struct Parts {
    path_params: Vec<String>,
    input_schema: InputSchema,
    error_variants: Vec<ErrorVariant>,
    headers: Vec<(String, String)>,
    message_pointers: Option<Vec<String>>,
    description: Option<String>,
}

/// Type-state builder for [`OperationDescriptor`].
///
/// `Id`, `M` and `P` start as [`Missing`] and become the set value's type
/// once `id`, `method` and `path` are called; `build` only exists when all
/// three are set.
pub struct DescriptorBuilder<Id, M, P, I, F, E> {
    id: Id,
    method: M,
    path: P,
    parts: Parts,
    _types: PhantomData<fn(&I) -> (F, E)>,
}

impl<I, F, E> DescriptorBuilder<Missing, Missing, Missing, I, F, E> {
    pub fn new() -> Self {
        Self {
            id: Missing,
            method: Missing,
            path: Missing,
            parts: Parts {
                path_params: Vec::new(),
                input_schema: InputSchema::new(),
                error_variants: Vec::new(),
                headers: Vec::new(),
                message_pointers: None,
                description: None,
            },
            _types: PhantomData,
        }
    }
}

impl<I, F, E> Default for DescriptorBuilder<Missing, Missing, Missing, I, F, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M, P, I, F, E> DescriptorBuilder<Missing, M, P, I, F, E> {
    /// Sets the operation id (alphabetic start, then alphanumerics or `_`).
    pub fn id(self, id: impl Into<String>) -> DescriptorBuilder<String, M, P, I, F, E> {
        DescriptorBuilder {
            id: id.into(),
            method: self.method,
            path: self.path,
            parts: self.parts,
            _types: PhantomData,
        }
    }
}

impl<Id, P, I, F, E> DescriptorBuilder<Id, Missing, P, I, F, E> {
    pub fn method(self, method: RestMethod) -> DescriptorBuilder<Id, RestMethod, P, I, F, E> {
        DescriptorBuilder {
            id: self.id,
            method,
            path: self.path,
            parts: self.parts,
            _types: PhantomData,
        }
    }
}

impl<Id, M, I, F, E> DescriptorBuilder<Id, M, Missing, I, F, E> {
    /// Sets the path template, e.g. `/organizations/{organization}/teams`.
    pub fn path(self, path: impl Into<String>) -> DescriptorBuilder<Id, M, String, I, F, E> {
        DescriptorBuilder {
            id: self.id,
            method: self.method,
            path: path.into(),
            parts: self.parts,
            _types: PhantomData,
        }
    }
}

impl<Id, M, P, I, F, E> DescriptorBuilder<Id, M, P, I, F, E> {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.parts.description = Some(description.into());
        self
    }

    /// Declares a path parameter. Each must be a placeholder of the
    /// template and a scalar field of the input schema.
    pub fn path_param(mut self, name: impl Into<String>) -> Self {
        self.parts.path_params.push(name.into());
        self
    }

    pub fn path_params<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.parts
            .path_params
            .extend(names.into_iter().map(Into::into));
        self
    }

    pub fn input(mut self, schema: InputSchema) -> Self {
        self.parts.input_schema = schema;
        self
    }

    /// Appends an error variant. Declaration order is lookup order.
    pub fn error(mut self, variant: ErrorVariant) -> Self {
        self.parts.error_variants.push(variant);
        self
    }

    /// Adds a header sent with every request of this operation.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.headers.push((name.into(), value.into()));
        self
    }

    /// Adds a JSON pointer to look for the error message at. The first call
    /// replaces [`DEFAULT_MESSAGE_POINTERS`].
    pub fn message_pointer(mut self, pointer: impl Into<String>) -> Self {
        self.parts
            .message_pointers
            .get_or_insert_with(Vec::new)
            .push(pointer.into());
        self
    }
}

impl<I, F, E> DescriptorBuilder<String, RestMethod, String, I, F, E>
where
    F: ResponseFormat,
    E: DeserializeOwned,
{
    /// Validates the declaration and builds the descriptor.
    ///
    /// ## Errors
    ///
    /// Returns a [`DescriptorError`] if the id or template is malformed, if
    /// path parameters and placeholders disagree, if a path parameter is
    /// not a scalar input field, if a header name or value is not valid
    /// HTTP, if variant tags or wire codes repeat, or if `E` has no variant
    /// matching a declared tag and its fields.
    pub fn build(self) -> Result<OperationDescriptor<I, F, E>, DescriptorError> {
        let id = OperationId::new(self.id)?;
        let template = PathTemplate::parse(self.path)?;
        let parts = self.parts;

        if let Some(field) = parts.input_schema.duplicate_field() {
            return Err(DescriptorError::DuplicateField {
                field: field.to_string(),
            });
        }
        check_path_params(&template, &parts.path_params, &parts.input_schema)?;
        check_headers(&parts.headers)?;
        let error_variants =
            check_variants::<E>(parts.error_variants, &parts.path_params, &parts.input_schema)?;

        let message_pointers = parts.message_pointers.unwrap_or_else(|| {
            DEFAULT_MESSAGE_POINTERS
                .iter()
                .map(|pointer| pointer.to_string())
                .collect()
        });

        Ok(OperationDescriptor {
            id,
            method: self.method,
            template,
            path_params: parts.path_params,
            input_schema: parts.input_schema,
            error_variants,
            headers: parts.headers,
            message_pointers,
            description: parts.description,
            _types: PhantomData,
        })
    }
}

fn check_path_params(
    template: &PathTemplate,
    path_params: &[String],
    schema: &InputSchema,
) -> Result<(), DescriptorError> {
    for (idx, parameter) in path_params.iter().enumerate() {
        if path_params[..idx].contains(parameter) {
            return Err(DescriptorError::DuplicatePathParameter {
                parameter: parameter.clone(),
            });
        }
        if parameter == MESSAGE_FIELD {
            return Err(DescriptorError::ReservedPathParameter {
                parameter: parameter.clone(),
            });
        }
        if !template.placeholders().any(|name| name == parameter) {
            return Err(DescriptorError::UnusedPathParameter {
                parameter: parameter.clone(),
                template: template.as_str().to_string(),
            });
        }
        match schema.field(parameter) {
            None => {
                return Err(DescriptorError::PathParameterNotInSchema {
                    parameter: parameter.clone(),
                });
            }
            Some(field) if !field.kind.is_scalar() => {
                return Err(DescriptorError::NonScalarPathParameter {
                    parameter: parameter.clone(),
                    kind: field.kind,
                });
            }
            Some(_) => {}
        }
    }

    if let Some(placeholder) = template
        .placeholders()
        .find(|name| !path_params.iter().any(|declared| declared == name))
    {
        return Err(DescriptorError::UndeclaredPlaceholder {
            placeholder: placeholder.to_string(),
            template: template.as_str().to_string(),
        });
    }

    Ok(())
}

fn check_headers(headers: &[(String, String)]) -> Result<(), DescriptorError> {
    for (name, value) in headers {
        HeaderName::try_from(name.as_str()).map_err(|e| DescriptorError::InvalidHeader {
            name: name.clone(),
            reason: e.to_string(),
        })?;
        HeaderValue::try_from(value.as_str()).map_err(|e| DescriptorError::InvalidHeader {
            name: name.clone(),
            reason: e.to_string(),
        })?;
    }
    Ok(())
}

fn check_variants<E: DeserializeOwned>(
    declared: Vec<ErrorVariant>,
    path_params: &[String],
    schema: &InputSchema,
) -> Result<Vec<ErrorVariant>, DescriptorError> {
    let mut fields: Vec<(String, FieldKind)> = path_params
        .iter()
        .map(|name| {
            let kind = schema.field(name).map_or(FieldKind::String, |field| field.kind);
            (name.clone(), kind)
        })
        .collect();
    fields.push((MESSAGE_FIELD.to_string(), FieldKind::String));

    let mut variants: Vec<ErrorVariant> = Vec::with_capacity(declared.len());
    for variant in declared {
        OperationId::new(variant.tag()).map_err(DescriptorError::InvalidVariantTag)?;

        if variants.iter().any(|existing| existing.tag() == variant.tag()) {
            return Err(DescriptorError::DuplicateVariantTag {
                tag: variant.tag().to_string(),
            });
        }
        if let Some(first) = variants
            .iter()
            .find(|existing| existing.wire_code() == variant.wire_code())
        {
            return Err(DescriptorError::DuplicateWireCode {
                wire_code: variant.wire_code(),
                first: first.tag().to_string(),
                second: variant.tag().to_string(),
            });
        }

        let variant = variant.with_fields(fields.clone());
        if let Err(err) = variant.probe::<E>() {
            return Err(DescriptorError::UnconstructibleVariant {
                tag: variant.tag().to_string(),
                reason: err.to_string(),
            });
        }
        variants.push(variant);
    }

    Ok(variants)
}
