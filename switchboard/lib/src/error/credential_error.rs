use thiserror::Error;

/// Errors raised while assembling [`Credentials`](crate::Credentials).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// None of the configured environment variables contained a value.
    #[error(
        "missing credentials: none of the following environment variables are set: {env_vars:?}"
    )]
    MissingCredential {
        /// The environment variable names that were checked.
        env_vars: Vec<String>,
    },

    /// The base URL could not be parsed.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
