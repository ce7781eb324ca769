//! Authentication strategy for API requests.

use reqwest::RequestBuilder;
use reqwest::header::AUTHORIZATION;
use secrecy::{ExposeSecret, SecretString};

use geohosting_config::constants::AUTH_TOKEN_SCHEME;

/// How requests are authenticated.
#[derive(Debug, Clone, Default)]
pub enum AuthStrategy {
    /// No authorization header.
    #[default]
    Anonymous,
    /// `Authorization: Token <token>`.
    Token { token: SecretString },
}

impl AuthStrategy {
    /// Build a strategy from an optional token.
    pub fn from_token(token: Option<SecretString>) -> Self {
        match token {
            Some(token) => Self::Token { token },
            None => Self::Anonymous,
        }
    }

    /// Attach the authorization header, if any, to a request.
    pub(crate) fn apply(&self, builder: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Anonymous => builder,
            Self::Token { token } => builder.header(
                AUTHORIZATION,
                format!("{} {}", AUTH_TOKEN_SCHEME, token.expose_secret()),
            ),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Token { .. })
    }
}
