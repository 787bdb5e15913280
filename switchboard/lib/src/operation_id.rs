use std::fmt;

use thiserror::Error;

/// A validated identifier for an operation or an error variant tag.
///
/// Rules:
/// 1. Must start with an alphabetic character.
/// 2. Remaining characters must be alphanumeric or `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperationId(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationIdError {
    #[error("identifier cannot be empty")]
    Empty,
    #[error("identifier '{0}' must start with an alphabetic character")]
    InvalidStartCharacter(String),
    #[error("identifier '{id}' contains invalid character: '{ch}'")]
    InvalidCharacter { id: String, ch: char },
}

impl OperationId {
    /// Creates a new identifier, validating it first.
    pub fn new<S: Into<String>>(id: S) -> Result<Self, OperationIdError> {
        let s = id.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    fn validate(s: &str) -> Result<(), OperationIdError> {
        let mut chars = s.chars();

        match chars.next() {
            None => return Err(OperationIdError::Empty),
            Some(c) if !c.is_alphabetic() => {
                return Err(OperationIdError::InvalidStartCharacter(s.to_string()));
            }
            _ => {}
        }

        if let Some(ch) = chars.find(|c| !c.is_alphanumeric() && *c != '_') {
            return Err(OperationIdError::InvalidCharacter {
                id: s.to_string(),
                ch,
            });
        }

        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for OperationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<OperationId> for String {
    fn from(id: OperationId) -> Self {
        id.0
    }
}

impl TryFrom<String> for OperationId {
    type Error = OperationIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for OperationId {
    type Error = OperationIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_creation() {
        assert!(OperationId::new("CreateTeam").is_ok());
        assert!(OperationId::new("delete_team").is_ok());
        assert!(OperationId::new("A").is_ok());
        assert!(OperationId::new(String::from("NotFound2")).is_ok());
    }

    #[test]
    fn test_invalid_start() {
        assert_eq!(
            OperationId::new("_team"),
            Err(OperationIdError::InvalidStartCharacter("_team".into()))
        );
        assert!(matches!(
            OperationId::new("1st"),
            Err(OperationIdError::InvalidStartCharacter(_))
        ));
    }

    #[test]
    fn test_invalid_characters() {
        assert!(matches!(
            OperationId::new("create-team"),
            Err(OperationIdError::InvalidCharacter { ch: '-', .. })
        ));
        assert!(matches!(
            OperationId::new("not found"),
            Err(OperationIdError::InvalidCharacter { ch: ' ', .. })
        ));
    }

    #[test]
    fn test_empty() {
        assert_eq!(OperationId::new(""), Err(OperationIdError::Empty));
    }

    #[test]
    fn test_traits() {
        let id: OperationId = "Valid_Id".try_into().unwrap();
        assert_eq!(id.to_string(), "Valid_Id");

        let s: String = id.into();
        assert_eq!(s, "Valid_Id");
    }
}
