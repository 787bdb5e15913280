//! The API errors each team operation declares.
//!
//! Variant names are the tags the operations register, and every variant
//! carries the operation's path parameters plus the vendor's message. The
//! vendor answers `403` instead of `404` for teams the caller may not see,
//! so lookups declare both.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Error)]
pub enum ListTeamsError {
    #[error("organization '{organization}' not found: {message}")]
    NotFound {
        organization: String,
        message: String,
    },

    #[error("not authorized to list teams of '{organization}': {message}")]
    Forbidden {
        organization: String,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Error)]
pub enum GetTeamError {
    #[error("team '{team_slug}' not found in '{organization}': {message}")]
    NotFound {
        organization: String,
        team_slug: String,
        message: String,
    },

    #[error("access to team '{team_slug}' in '{organization}' denied: {message}")]
    Forbidden {
        organization: String,
        team_slug: String,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Error)]
pub enum CreateTeamError {
    #[error("organization '{organization}' not found: {message}")]
    NotFound {
        organization: String,
        message: String,
    },

    #[error("not allowed to create teams in '{organization}': {message}")]
    Forbidden {
        organization: String,
        message: String,
    },

    #[error("team rejected by '{organization}': {message}")]
    Unprocessable {
        organization: String,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Error)]
pub enum UpdateTeamError {
    #[error("team '{team_slug}' not found in '{organization}': {message}")]
    NotFound {
        organization: String,
        team_slug: String,
        message: String,
    },

    #[error("not allowed to update team '{team_slug}' in '{organization}': {message}")]
    Forbidden {
        organization: String,
        team_slug: String,
        message: String,
    },

    #[error("update of team '{team_slug}' rejected: {message}")]
    Unprocessable {
        organization: String,
        team_slug: String,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Error)]
pub enum DeleteTeamError {
    #[error("team '{team_slug}' not found in '{organization}': {message}")]
    NotFound {
        organization: String,
        team_slug: String,
        message: String,
    },

    #[error("not allowed to delete team '{team_slug}' in '{organization}': {message}")]
    Forbidden {
        organization: String,
        team_slug: String,
        message: String,
    },
}

/// Errors raised while setting up [`TeamsApi`](crate::TeamsApi).
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("invalid operation declaration: {0}")]
    Descriptor(#[from] switchboard::DescriptorError),

    #[error(transparent)]
    Credential(#[from] switchboard::CredentialError),

    #[error("failed to build HTTP transport: {0}")]
    Transport(#[from] switchboard::TransportError),
}
