//! API catalogs.
//!
//! An [`Api`] collects the operations of one vendor API at startup. On top
//! of the per-descriptor checks it rejects:
//!
//! - **Duplicate ids**: two operations with the same id
//! - **Duplicate routes**: two operations with the same method and the same
//!   template once placeholder names are ignored (`/teams/{a}` and
//!   `/teams/{b}` are one route)
//!
//! ## Examples
//!
//! ```
//! use serde::Serialize;
//! use switchboard::{Api, FieldKind, InputSchema, NoErrors, OperationDescriptor, RestMethod, VoidFormat};
//!
//! #[derive(Serialize)]
//! struct Ping {}
//!
//! let mut api = Api::new("Teams");
//! let ping = api
//!     .register(
//!         OperationDescriptor::<Ping, VoidFormat, NoErrors>::builder()
//!             .id("Ping")
//!             .method(RestMethod::Get)
//!             .path("/ping")
//!             .build()
//!             .unwrap(),
//!     )
//!     .unwrap();
//!
//! assert_eq!(ping.id().as_str(), "Ping");
//! assert_eq!(api.operations().len(), 1);
//! ```

use tracing::debug;

use crate::descriptor::OperationDescriptor;
use crate::error::DescriptorError;
use crate::method::RestMethod;
use crate::operation::Operation;
use crate::operation_id::OperationId;
use crate::wire::WireCode;

/// What a registered operation looks like, without its types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationSummary {
    pub id: OperationId,
    pub method: RestMethod,
    pub path: String,
    pub path_params: Vec<String>,
    pub description: Option<String>,
    /// Declared error variants as `(tag, wire code)`, in declaration order.
    pub errors: Vec<(String, WireCode)>,
    route: String,
}

impl OperationSummary {
    fn of<I, F, E>(descriptor: &OperationDescriptor<I, F, E>) -> Self {
        Self {
            id: descriptor.id().clone(),
            method: descriptor.method(),
            path: descriptor.path().to_string(),
            path_params: descriptor.path_params().to_vec(),
            description: descriptor.description().map(str::to_string),
            errors: descriptor
                .error_variants()
                .iter()
                .map(|variant| (variant.tag().to_string(), variant.wire_code()))
                .collect(),
            route: descriptor.template().shape(),
        }
    }
}

/// The registered operations of one vendor API.
#[derive(Debug, Clone, Default)]
pub struct Api {
    name: String,
    operations: Vec<OperationSummary>,
}

impl Api {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            operations: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers a descriptor and returns its callable operation.
    ///
    /// ## Errors
    ///
    /// - [`DescriptorError::DuplicateOperation`] if the id is taken.
    /// - [`DescriptorError::DuplicateRoute`] if another operation already
    ///   serves the same method and route.
    pub fn register<I, F, E>(
        &mut self,
        descriptor: OperationDescriptor<I, F, E>,
    ) -> Result<Operation<I, F, E>, DescriptorError> {
        let summary = OperationSummary::of(&descriptor);

        if self.operation(summary.id.as_str()).is_some() {
            return Err(DescriptorError::DuplicateOperation {
                id: summary.id.to_string(),
            });
        }
        if let Some(existing) = self
            .operations
            .iter()
            .find(|op| op.method == summary.method && op.route == summary.route)
        {
            return Err(DescriptorError::DuplicateRoute {
                method: summary.method,
                template: summary.path,
                existing: existing.id.to_string(),
            });
        }

        debug!(
            api = %self.name,
            operation.id = %summary.id,
            http.method = %summary.method,
            path = %summary.path,
            "registered operation"
        );
        self.operations.push(summary);
        Ok(Operation::new(descriptor))
    }

    /// Summaries of every registered operation, in registration order.
    pub fn operations(&self) -> &[OperationSummary] {
        &self.operations
    }

    pub fn operation(&self, id: &str) -> Option<&OperationSummary> {
        self.operations.iter().find(|op| op.id.as_str() == id)
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
