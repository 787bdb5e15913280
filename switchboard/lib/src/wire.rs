//! Vendor wire error codes and their fixed HTTP status table.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// The vendor's identifier for an error condition.
///
/// Each code maps to exactly one HTTP status. The interpreter maps a failure
/// status back to its code through this table; it never infers a code from
/// the body.
///
/// ## Examples
///
/// ```rust
/// use switchboard::WireCode;
///
/// assert_eq!(WireCode::from_status(404), Some(WireCode::NotFound));
/// assert_eq!(WireCode::NotFound.to_string(), "not_found");
/// assert_eq!(WireCode::UnprocessableEntity.status(), 422);
/// assert_eq!(WireCode::from_status(418), None);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WireCode {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    UnprocessableEntity,
    TooManyRequests,
    InternalServerError,
    ServiceUnavailable,
}

impl WireCode {
    /// The HTTP status this code is carried by.
    pub const fn status(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::UnprocessableEntity => 422,
            Self::TooManyRequests => 429,
            Self::InternalServerError => 500,
            Self::ServiceUnavailable => 503,
        }
    }

    /// Looks up the code for a failure status.
    pub fn from_status(status: u16) -> Option<Self> {
        Self::iter().find(|code| code.status() == status)
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}
