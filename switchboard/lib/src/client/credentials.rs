//! Credentials: the base URL and the auth headers sent with every request.

use std::fmt;

use url::Url;

use crate::error::CredentialError;

/// Default header for bearer tokens.
const AUTHORIZATION: &str = "Authorization";

/// How a secret is attached to requests.
///
/// ## Examples
///
/// ```
/// use switchboard::AuthStrategy;
///
/// let bearer = AuthStrategy::BearerToken { header: None };
/// assert_eq!(
///     bearer.header_for("t0k3n"),
///     Some(("Authorization".to_string(), "Bearer t0k3n".to_string()))
/// );
///
/// let key = AuthStrategy::ApiKey { header: "X-API-Key".to_string() };
/// assert_eq!(
///     key.header_for("k3y"),
///     Some(("X-API-Key".to_string(), "k3y".to_string()))
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthStrategy {
    /// No authentication.
    #[default]
    None,

    /// `<header>: Bearer <token>`, where the header defaults to
    /// `Authorization`.
    BearerToken { header: Option<String> },

    /// `<header>: <key>`.
    ApiKey { header: String },
}

impl AuthStrategy {
    /// The header carrying `secret` under this strategy.
    pub fn header_for(&self, secret: &str) -> Option<(String, String)> {
        match self {
            Self::None => None,
            Self::BearerToken { header } => Some((
                header.as_deref().unwrap_or(AUTHORIZATION).to_string(),
                format!("Bearer {secret}"),
            )),
            Self::ApiKey { header } => Some((header.clone(), secret.to_string())),
        }
    }
}

/// The base URL and headers injected into every request.
///
/// The runtime treats credentials as opaque: headers are attached as given
/// and never parsed. Header values are redacted from `Debug` output.
///
/// ## Examples
///
/// ```
/// use switchboard::Credentials;
///
/// let credentials = Credentials::parse("https://api.example.com/v1")
///     .unwrap()
///     .bearer("t0k3n")
///     .header("X-Api-Version", "2024-01-01");
///
/// assert_eq!(credentials.headers().len(), 2);
/// assert!(!format!("{credentials:?}").contains("t0k3n"));
/// ```
#[derive(Clone)]
pub struct Credentials {
    base_url: Url,
    headers: Vec<(String, String)>,
}

impl Credentials {
    /// Credentials with no headers.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            headers: Vec::new(),
        }
    }

    /// Parses the base URL.
    ///
    /// ## Errors
    ///
    /// Returns [`CredentialError::InvalidBaseUrl`] if the URL does not parse
    /// or cannot carry a path (e.g. `mailto:`).
    pub fn parse(base_url: &str) -> Result<Self, CredentialError> {
        let url = Url::parse(base_url).map_err(|e| CredentialError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(CredentialError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot be a base".to_string(),
            });
        }
        Ok(Self::new(url))
    }

    /// Reads the secret from the first set variable of `env_vars` and
    /// attaches it with `strategy`.
    ///
    /// ## Errors
    ///
    /// - [`CredentialError::InvalidBaseUrl`] if `base_url` does not parse.
    /// - [`CredentialError::MissingCredential`] if the strategy needs a
    ///   secret and none of `env_vars` is set to a non-empty value.
    pub fn from_env(
        base_url: &str,
        strategy: &AuthStrategy,
        env_vars: &[&str],
    ) -> Result<Self, CredentialError> {
        Self::from_lookup(base_url, strategy, env_vars, |var| std::env::var(var).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(
        base_url: &str,
        strategy: &AuthStrategy,
        env_vars: &[&str],
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, CredentialError> {
        let credentials = Self::parse(base_url)?;
        if *strategy == AuthStrategy::None {
            return Ok(credentials);
        }

        let secret = env_vars
            .iter()
            .find_map(|var| lookup(var).filter(|value| !value.trim().is_empty()))
            .ok_or_else(|| CredentialError::MissingCredential {
                env_vars: env_vars.iter().map(|var| var.to_string()).collect(),
            })?;

        Ok(credentials.with_auth(strategy, &secret))
    }

    /// Attaches `secret` using `strategy`.
    pub fn with_auth(self, strategy: &AuthStrategy, secret: &str) -> Self {
        match strategy.header_for(secret) {
            Some((name, value)) => self.header(name, value),
            None => self,
        }
    }

    /// Adds `Authorization: Bearer <token>`.
    pub fn bearer(self, token: impl AsRef<str>) -> Self {
        self.with_auth(&AuthStrategy::BearerToken { header: None }, token.as_ref())
    }

    /// Adds `<header>: <key>`.
    pub fn api_key(self, header: impl Into<String>, key: impl AsRef<str>) -> Self {
        self.with_auth(
            &AuthStrategy::ApiKey {
                header: header.into(),
            },
            key.as_ref(),
        )
    }

    /// Adds a header, replacing any header of the same name (ignoring case).
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|(key, _)| !key.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(name, _)| (name.as_str(), "[REDACTED]"))
            .collect();
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url.as_str())
            .field("headers", &headers)
            .finish()
    }
}
