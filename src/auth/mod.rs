//! Authentication for the ChartMogul API.

use secrecy::{ExposeSecret, SecretString};

/// Authentication method attached to every request.
///
/// A deployment uses exactly one scheme; it is client configuration, never
/// hardcoded per call.
#[derive(Debug, Clone)]
pub enum AuthMethod {
    /// HTTP Basic with an account token and a secret access key.
    Basic {
        /// Account token (Basic username).
        account_token: SecretString,
        /// Secret access key (Basic password).
        access_key: SecretString,
    },
    /// A single API key carried as a bearer header.
    ApiKey(SecretString),
}

impl AuthMethod {
    /// Creates an HTTP Basic authentication method.
    pub fn basic(account_token: impl Into<String>, access_key: impl Into<String>) -> Self {
        Self::Basic {
            account_token: SecretString::new(account_token.into()),
            access_key: SecretString::new(access_key.into()),
        }
    }

    /// Creates an API key authentication method.
    pub fn api_key(key: impl Into<String>) -> Self {
        Self::ApiKey(SecretString::new(key.into()))
    }

    /// Gets the scheme name for logging. Never exposes secret material.
    pub fn scheme(&self) -> &'static str {
        match self {
            Self::Basic { .. } => "basic",
            Self::ApiKey(_) => "api_key",
        }
    }

    /// Attaches the credential to a request.
    pub(crate) fn apply(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            Self::Basic {
                account_token,
                access_key,
            } => request.basic_auth(
                account_token.expose_secret(),
                Some(access_key.expose_secret()),
            ),
            Self::ApiKey(key) => request.bearer_auth(key.expose_secret()),
        }
    }
}
