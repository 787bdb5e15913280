//! Path templates with `{param}` placeholders.
//!
//! Templates are parsed once, when a descriptor is built, and rendered on
//! every call. Rendered values are percent-encoded so that every character
//! outside the RFC 3986 unreserved set survives as data rather than as path
//! structure.

use std::mem;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::{Map, Value};

use crate::error::{ContractError, TemplateError, ValidationError};
use crate::schema::json_type;

/// Everything except `A-Z a-z 0-9 - . _ ~` is encoded.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A parsed path template such as `/organizations/{organization}/teams`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    /// Parses a template, rejecting unbalanced braces and invalid names.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use switchboard::PathTemplate;
    ///
    /// let template = PathTemplate::parse("/organizations/{o}/teams/{t}").unwrap();
    /// assert_eq!(template.placeholders().collect::<Vec<_>>(), vec!["o", "t"]);
    ///
    /// assert!(PathTemplate::parse("/teams/{team").is_err());
    /// ```
    pub fn parse(template: impl Into<String>) -> Result<Self, TemplateError> {
        let raw = template.into();
        if !raw.starts_with('/') {
            return Err(TemplateError::MissingLeadingSlash { template: raw });
        }

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = raw.char_indices();

        while let Some((position, c)) = chars.next() {
            match c {
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, next) in chars.by_ref() {
                        match next {
                            '}' => {
                                closed = true;
                                break;
                            }
                            '{' => break,
                            other => name.push(other),
                        }
                    }
                    if !closed {
                        return Err(TemplateError::Unclosed {
                            template: raw.clone(),
                            position,
                        });
                    }
                    if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
                        return Err(TemplateError::InvalidPlaceholder {
                            template: raw.clone(),
                            name,
                        });
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(mem::take(&mut literal)));
                    }
                    segments.push(Segment::Param(name));
                }
                '}' => {
                    return Err(TemplateError::UnexpectedClose {
                        template: raw.clone(),
                        position,
                    });
                }
                other => literal.push(other),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { raw, segments })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Placeholder names in order of appearance, repeats included.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// The template with every placeholder name erased, so that
    /// `/teams/{a}` and `/teams/{b}` compare equal as routes.
    pub fn shape(&self) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.as_str(),
                Segment::Param(_) => "{}",
            })
            .collect()
    }

    /// Substitutes every placeholder with the encoded input value.
    pub fn render(&self, input: &Map<String, Value>) -> Result<String, ContractError> {
        let mut path = String::with_capacity(self.raw.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => path.push_str(text),
                Segment::Param(name) => {
                    let value = input.get(name).filter(|value| !value.is_null()).ok_or_else(
                        || ContractError::MissingPathParameter {
                            parameter: name.clone(),
                        },
                    )?;
                    path.push_str(&encode_value(name, value)?);
                }
            }
        }
        Ok(path)
    }
}

/// Encodes one path parameter value as a single path segment.
pub fn encode_value(name: &str, value: &Value) -> Result<String, ValidationError> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => {
            return Err(ValidationError::InvalidPathParameter {
                parameter: name.to_string(),
                reason: format!("must be a scalar, found {}", json_type(other)),
            });
        }
    };

    let reason = match text.as_str() {
        "" => "must not be empty",
        // URL parsing collapses dot segments even when percent-encoded.
        "." | ".." => "must not be a dot segment",
        _ => return Ok(utf8_percent_encode(&text, PATH_SEGMENT).to_string()),
    };
    Err(ValidationError::InvalidPathParameter {
        parameter: name.to_string(),
        reason: reason.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn parses_placeholders_in_order() {
        let template = PathTemplate::parse("/users/{user_id}/posts/{post_id}").unwrap();
        assert_eq!(
            template.placeholders().collect::<Vec<_>>(),
            vec!["user_id", "post_id"]
        );
        assert_eq!(template.shape(), "/users/{}/posts/{}");
    }

    #[test]
    fn template_without_placeholders() {
        let template = PathTemplate::parse("/health").unwrap();
        assert_eq!(template.placeholders().count(), 0);
        assert_eq!(template.render(&Map::new()).unwrap(), "/health");
    }

    #[test]
    fn rejects_malformed_templates() {
        assert!(matches!(
            PathTemplate::parse("teams"),
            Err(TemplateError::MissingLeadingSlash { .. })
        ));
        assert!(matches!(
            PathTemplate::parse("/teams/{team"),
            Err(TemplateError::Unclosed { position: 7, .. })
        ));
        assert!(matches!(
            PathTemplate::parse("/teams/team}"),
            Err(TemplateError::UnexpectedClose { .. })
        ));
        assert!(matches!(
            PathTemplate::parse("/teams/{}"),
            Err(TemplateError::InvalidPlaceholder { .. })
        ));
        assert!(matches!(
            PathTemplate::parse("/teams/{a b}"),
            Err(TemplateError::InvalidPlaceholder { .. })
        ));
        assert!(matches!(
            PathTemplate::parse("/teams/{a{b}}"),
            Err(TemplateError::Unclosed { .. })
        ));
    }

    #[test]
    fn renders_values() {
        let template = PathTemplate::parse("/organizations/{organization}/teams").unwrap();
        let input = object(json!({"organization": "acme", "name": "infra"}));
        assert_eq!(
            template.render(&input).unwrap(),
            "/organizations/acme/teams"
        );
    }

    #[test]
    fn renders_repeated_placeholders() {
        let template = PathTemplate::parse("/{a}/mirror/{a}").unwrap();
        let input = object(json!({"a": "x"}));
        assert_eq!(template.render(&input).unwrap(), "/x/mirror/x");
    }

    #[test]
    fn renders_scalars() {
        let template = PathTemplate::parse("/items/{id}/{flag}").unwrap();
        let input = object(json!({"id": 42, "flag": true}));
        assert_eq!(template.render(&input).unwrap(), "/items/42/true");
    }

    #[test]
    fn percent_encodes_reserved_characters() {
        let template = PathTemplate::parse("/teams/{team}").unwrap();
        let input = object(json!({"team": "a/b c?d#e%"}));
        assert_eq!(
            template.render(&input).unwrap(),
            "/teams/a%2Fb%20c%3Fd%23e%25"
        );
    }

    #[test]
    fn rejects_dot_segments() {
        let template = PathTemplate::parse("/teams/{team}").unwrap();
        for team in [".", ".."] {
            assert!(matches!(
                template.render(&object(json!({"team": team}))),
                Err(ContractError::Validation(
                    ValidationError::InvalidPathParameter { .. }
                ))
            ));
        }
        assert_eq!(
            template.render(&object(json!({"team": "v1.2"}))).unwrap(),
            "/teams/v1.2"
        );
    }

    #[test]
    fn missing_or_null_value_is_missing_path_parameter() {
        let template = PathTemplate::parse("/teams/{team}").unwrap();
        for input in [json!({}), json!({"team": null})] {
            assert_eq!(
                template.render(&object(input)),
                Err(ContractError::MissingPathParameter {
                    parameter: "team".into()
                })
            );
        }
    }

    #[test]
    fn empty_and_structured_values_are_invalid() {
        let template = PathTemplate::parse("/teams/{team}").unwrap();
        assert!(matches!(
            template.render(&object(json!({"team": ""}))),
            Err(ContractError::Validation(
                ValidationError::InvalidPathParameter { .. }
            ))
        ));
        assert!(matches!(
            template.render(&object(json!({"team": ["a"]}))),
            Err(ContractError::Validation(
                ValidationError::InvalidPathParameter { .. }
            ))
        ));
    }
}
