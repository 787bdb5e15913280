//! Request building.
//!
//! Turns a descriptor and a concrete input into a [`PreparedRequest`]. This
//! is pure: the input is validated, path parameters are substituted, and the
//! remaining fields become a JSON body or query string, all without I/O. Any
//! failure here is a caller-contract error and no request is ever sent.

use bytes::Bytes;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use crate::client::HttpRequest;
use crate::descriptor::OperationDescriptor;
use crate::error::{ContractError, ValidationError};
use crate::method::RestMethod;
use crate::response::ResponseFormat;
use crate::schema::{json_type, to_object};

const CONTENT_TYPE: &str = "Content-Type";
const ACCEPT: &str = "Accept";
const APPLICATION_JSON: &str = "application/json";

/// A fully built request, ready for a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    method: RestMethod,
    url: Url,
    headers: Vec<(String, String)>,
    body: Option<Bytes>,
    path_values: Map<String, Value>,
}

impl PreparedRequest {
    pub fn method(&self) -> RestMethod {
        self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Returns the value of the first header named `name`, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// The body parsed back into JSON, if there is one.
    pub fn json_body(&self) -> Option<Value> {
        self.body
            .as_ref()
            .and_then(|body| serde_json::from_slice(body).ok())
    }

    /// The original (unencoded) values of the path parameters, used to
    /// populate declared error variants.
    pub fn path_values(&self) -> &Map<String, Value> {
        &self.path_values
    }

    /// Splits into the transport request and the path values the response
    /// is interpreted with.
    pub(crate) fn into_http(self) -> (HttpRequest, Map<String, Value>) {
        let request = HttpRequest {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
        };
        (request, self.path_values)
    }
}

/// Builds the request for one call of `descriptor`.
///
/// ## Errors
///
/// - [`ContractError::Validation`] if the input does not serialize to an
///   object matching the input schema, a path parameter value cannot be
///   encoded, or a query value is a nested object.
/// - [`ContractError::MissingPathParameter`] if a path parameter is absent
///   or null.
///
/// ## Examples
///
/// ```rust
/// use serde::Serialize;
/// use switchboard::{FieldKind, InputSchema, JsonFormat, NoErrors, OperationDescriptor, RestMethod, request};
/// use url::Url;
///
/// #[derive(Serialize)]
/// struct CreateTeam {
///     organization: String,
///     name: String,
/// }
///
/// let descriptor = OperationDescriptor::<CreateTeam, JsonFormat<serde_json::Value>, NoErrors>::builder()
///     .id("CreateTeam")
///     .method(RestMethod::Post)
///     .path("/organizations/{organization}/teams")
///     .path_param("organization")
///     .input(
///         InputSchema::new()
///             .required("organization", FieldKind::String)
///             .required("name", FieldKind::String),
///     )
///     .build()
///     .unwrap();
///
/// let base = Url::parse("https://api.example.com/v1").unwrap();
/// let input = CreateTeam { organization: "acme".into(), name: "infra".into() };
/// let prepared = request::build(&descriptor, &base, &input).unwrap();
///
/// assert_eq!(prepared.url().as_str(), "https://api.example.com/v1/organizations/acme/teams");
/// assert_eq!(prepared.json_body(), Some(serde_json::json!({"name": "infra"})));
/// ```
pub fn build<I, F, E>(
    descriptor: &OperationDescriptor<I, F, E>,
    base_url: &Url,
    input: &I,
) -> Result<PreparedRequest, ContractError>
where
    I: Serialize,
    F: ResponseFormat,
{
    let object = to_object(input)?;
    let path_params = descriptor.path_params();
    descriptor.input_schema().validate(&object, path_params)?;

    let path = descriptor.template().render(&object)?;

    let mut path_values = Map::new();
    let mut remaining = Map::new();
    for (name, value) in object {
        if path_params.contains(&name) {
            path_values.insert(name, value);
        } else if !value.is_null() {
            remaining.insert(name, value);
        }
    }

    let mut url = join_path(base_url, &path);
    let mut headers = Vec::new();
    if let Some(accept) = F::ACCEPT {
        headers.push((ACCEPT.to_string(), accept.to_string()));
    }

    let method = descriptor.method();
    let body = if method.has_body() {
        let body = serde_json::to_vec(&Value::Object(remaining))
            .map_err(|err| ValidationError::Serialization(err.to_string()))?;
        headers.push((CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string()));
        Some(Bytes::from(body))
    } else {
        append_query(&mut url, &remaining)?;
        None
    };

    let headers = merge_headers(&headers, descriptor.headers());

    debug!(
        operation.id = %descriptor.id(),
        http.method = %method,
        http.url = %url,
        has_body = body.is_some(),
        "built request"
    );

    Ok(PreparedRequest {
        method,
        url,
        headers,
        body,
        path_values,
    })
}

/// Appends an already-encoded path to the base URL, keeping the base path.
fn join_path(base_url: &Url, path: &str) -> Url {
    let mut url = base_url.clone();
    let joined = format!("{}{}", base_url.path().trim_end_matches('/'), path);
    url.set_path(&joined);
    url.set_fragment(None);
    url
}

fn append_query(url: &mut Url, fields: &Map<String, Value>) -> Result<(), ValidationError> {
    let mut pairs = Vec::new();
    for (name, value) in fields {
        match value {
            Value::Array(items) => {
                for item in items.iter().filter(|item| !item.is_null()) {
                    pairs.push((name.as_str(), query_text(name, item)?));
                }
            }
            other => pairs.push((name.as_str(), query_text(name, other)?)),
        }
    }

    if !pairs.is_empty() {
        let mut query = url.query_pairs_mut();
        for (name, value) in pairs {
            query.append_pair(name, &value);
        }
    }
    Ok(())
}

fn query_text(name: &str, value: &Value) -> Result<String, ValidationError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(ValidationError::UnsupportedQueryValue {
            field: name.to_string(),
            found: json_type(other),
        }),
    }
}

/// Merges two header lists. Headers in `overrides` replace any header in
/// `base` with the same name, compared case-insensitively.
pub fn merge_headers(
    base: &[(String, String)],
    overrides: &[(String, String)],
) -> Vec<(String, String)> {
    let mut result: Vec<(String, String)> = base
        .iter()
        .filter(|(key, _)| !overrides.iter().any(|(k, _)| k.eq_ignore_ascii_case(key)))
        .cloned()
        .collect();
    result.extend(overrides.iter().cloned());
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::{JsonFormat, VoidFormat};
    use crate::schema::{FieldKind, InputSchema};
    use crate::variant::NoErrors;
    use serde_json::json;

    #[derive(Debug, Serialize)]
    struct CreateTeam {
        organization: String,
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    }

    #[derive(Debug, Serialize)]
    struct ListTeams {
        organization: String,
        per_page: Option<u32>,
        labels: Vec<String>,
    }

    #[derive(Debug, Serialize)]
    struct Filtered {
        organization: String,
        filter: Value,
    }

    fn base() -> Url {
        Url::parse("https://api.example.com").unwrap()
    }

    fn create_team() -> OperationDescriptor<CreateTeam, JsonFormat<Value>, NoErrors> {
        OperationDescriptor::builder()
            .id("CreateTeam")
            .method(RestMethod::Post)
            .path("/organizations/{organization}/teams")
            .path_param("organization")
            .input(
                InputSchema::new()
                    .required("organization", FieldKind::String)
                    .required("name", FieldKind::String)
                    .optional("description", FieldKind::String),
            )
            .build()
            .unwrap()
    }

    fn list_teams() -> OperationDescriptor<ListTeams, JsonFormat<Value>, NoErrors> {
        OperationDescriptor::builder()
            .id("ListTeams")
            .method(RestMethod::Get)
            .path("/organizations/{organization}/teams")
            .path_param("organization")
            .input(
                InputSchema::new()
                    .required("organization", FieldKind::String)
                    .optional("per_page", FieldKind::Integer)
                    .optional("labels", FieldKind::Array),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn create_team_request() {
        let input = CreateTeam {
            organization: "acme".into(),
            name: "infra".into(),
            description: None,
        };
        let prepared = build(&create_team(), &base(), &input).unwrap();

        assert_eq!(prepared.method(), RestMethod::Post);
        assert_eq!(
            prepared.url().as_str(),
            "https://api.example.com/organizations/acme/teams"
        );
        assert_eq!(prepared.json_body(), Some(json!({"name": "infra"})));
        assert_eq!(prepared.header("content-type"), Some("application/json"));
        assert_eq!(prepared.header("accept"), Some("application/json"));
        assert_eq!(prepared.path_values().get("organization"), Some(&json!("acme")));
    }

    #[test]
    fn base_path_is_preserved() {
        let input = CreateTeam {
            organization: "acme".into(),
            name: "infra".into(),
            description: Some("platform".into()),
        };
        for base in ["https://api.example.com/v1", "https://api.example.com/v1/"] {
            let prepared = build(&create_team(), &Url::parse(base).unwrap(), &input).unwrap();
            assert_eq!(
                prepared.url().as_str(),
                "https://api.example.com/v1/organizations/acme/teams"
            );
        }
    }

    #[test]
    fn encoded_path_values_survive_url_join() {
        let input = CreateTeam {
            organization: "a/b c".into(),
            name: "infra".into(),
            description: None,
        };
        let prepared = build(&create_team(), &base(), &input).unwrap();
        assert_eq!(prepared.url().path(), "/organizations/a%2Fb%20c/teams");
    }

    #[test]
    fn missing_required_field_is_validation_error() {
        #[derive(Serialize)]
        struct Partial {
            organization: String,
        }
        let descriptor = OperationDescriptor::<Partial, VoidFormat, NoErrors>::builder()
            .id("CreateTeam")
            .method(RestMethod::Post)
            .path("/organizations/{organization}/teams")
            .path_param("organization")
            .input(
                InputSchema::new()
                    .required("organization", FieldKind::String)
                    .required("name", FieldKind::String),
            )
            .build()
            .unwrap();

        let err = build(&descriptor, &base(), &Partial { organization: "acme".into() }).unwrap_err();
        assert_eq!(
            err,
            ContractError::Validation(ValidationError::MissingField {
                field: "name".into()
            })
        );
    }

    #[test]
    fn get_fields_become_query_parameters() {
        let input = ListTeams {
            organization: "acme".into(),
            per_page: Some(50),
            labels: vec!["a".into(), "b c".into()],
        };
        let prepared = build(&list_teams(), &base(), &input).unwrap();

        assert!(prepared.body().is_none());
        assert!(prepared.header("content-type").is_none());
        let pairs: Vec<(String, String)> = prepared
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("labels".to_string(), "a".to_string()),
                ("labels".to_string(), "b c".to_string()),
                ("per_page".to_string(), "50".to_string()),
            ]
        );
    }

    #[test]
    fn absent_query_values_are_omitted() {
        let input = ListTeams {
            organization: "acme".into(),
            per_page: None,
            labels: Vec::new(),
        };
        let prepared = build(&list_teams(), &base(), &input).unwrap();
        assert_eq!(prepared.url().query(), None);
    }

    #[test]
    fn nested_objects_cannot_be_query_values() {
        let descriptor = OperationDescriptor::<Filtered, VoidFormat, NoErrors>::builder()
            .id("ListTeams")
            .method(RestMethod::Get)
            .path("/organizations/{organization}/teams")
            .path_param("organization")
            .input(
                InputSchema::new()
                    .required("organization", FieldKind::String)
                    .optional("filter", FieldKind::Any),
            )
            .build()
            .unwrap();

        let input = Filtered {
            organization: "acme".into(),
            filter: json!({"privacy": "closed"}),
        };
        assert_eq!(
            build(&descriptor, &base(), &input).unwrap_err(),
            ContractError::Validation(ValidationError::UnsupportedQueryValue {
                field: "filter".into(),
                found: "object",
            })
        );
    }

    #[test]
    fn descriptor_headers_override_defaults() {
        let descriptor = OperationDescriptor::<ListTeams, JsonFormat<Value>, NoErrors>::builder()
            .id("ListTeams")
            .method(RestMethod::Get)
            .path("/organizations/{organization}/teams")
            .path_param("organization")
            .input(
                InputSchema::new()
                    .required("organization", FieldKind::String)
                    .optional("per_page", FieldKind::Integer)
                    .optional("labels", FieldKind::Array),
            )
            .header("accept", "application/vnd.teams+json")
            .build()
            .unwrap();

        let input = ListTeams {
            organization: "acme".into(),
            per_page: None,
            labels: Vec::new(),
        };
        let prepared = build(&descriptor, &base(), &input).unwrap();
        assert_eq!(prepared.headers().len(), 1);
        assert_eq!(prepared.header("Accept"), Some("application/vnd.teams+json"));
    }

    #[test]
    fn merge_headers_is_case_insensitive() {
        let base = vec![
            ("Authorization".to_string(), "Bearer a".to_string()),
            ("X-Trace".to_string(), "1".to_string()),
        ];
        let overrides = vec![("authorization".to_string(), "Bearer b".to_string())];
        assert_eq!(
            merge_headers(&base, &overrides),
            vec![
                ("X-Trace".to_string(), "1".to_string()),
                ("authorization".to_string(), "Bearer b".to_string()),
            ]
        );
    }
}
