//! The HTTP method an operation is declared with.

use strum::{Display, EnumIter, EnumString};

/// HTTP method of an operation.
///
/// Only [`has_body`](RestMethod::has_body) affects request building: it
/// decides whether the non-path input fields become a JSON body or a query
/// string.
///
/// ## Examples
///
/// ```rust
/// use switchboard::RestMethod;
///
/// assert!(RestMethod::Patch.has_body());
/// assert!(!RestMethod::Delete.has_body());
/// assert_eq!("POST".parse::<RestMethod>().unwrap(), RestMethod::Post);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum RestMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl RestMethod {
    /// Returns `true` for POST, PUT and PATCH.
    pub fn has_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl From<RestMethod> for reqwest::Method {
    fn from(method: RestMethod) -> Self {
        match method {
            RestMethod::Get => Self::GET,
            RestMethod::Post => Self::POST,
            RestMethod::Put => Self::PUT,
            RestMethod::Patch => Self::PATCH,
            RestMethod::Delete => Self::DELETE,
            RestMethod::Head => Self::HEAD,
            RestMethod::Options => Self::OPTIONS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn wire_spelling_is_uppercase() {
        assert_eq!(RestMethod::Delete.to_string(), "DELETE");
        assert_eq!("PATCH".parse::<RestMethod>().unwrap(), RestMethod::Patch);
        assert!("patch".parse::<RestMethod>().is_err());
    }

    #[test]
    fn only_writes_carry_a_body() {
        let with_body: Vec<_> = RestMethod::iter().filter(RestMethod::has_body).collect();
        assert_eq!(
            with_body,
            vec![RestMethod::Post, RestMethod::Put, RestMethod::Patch]
        );
    }

    #[test]
    fn converts_to_reqwest_with_same_name() {
        for method in RestMethod::iter() {
            assert_eq!(reqwest::Method::from(method).as_str(), method.to_string());
        }
    }
}
