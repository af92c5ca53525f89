//! Access tokens and the providers that hand them out.
//!
//! Tokens are requested right before each call and dropped afterwards;
//! nothing here caches or persists them.

use std::fmt;
use std::future::Future;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::{DecreeError, Result};

/// How a token is presented in the `Authorization` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Personal access token, sent as HTTP basic auth with an empty user.
    #[default]
    Pat,
    /// OAuth / session token, sent as a bearer token.
    Bearer,
}

/// A short-lived credential.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    kind: TokenKind,
    secret: String,
}

impl AccessToken {
    pub fn new(kind: TokenKind, secret: impl Into<String>) -> Self {
        Self {
            kind,
            secret: secret.into(),
        }
    }

    pub fn bearer(secret: impl Into<String>) -> Self {
        Self::new(TokenKind::Bearer, secret)
    }

    pub fn pat(secret: impl Into<String>) -> Self {
        Self::new(TokenKind::Pat, secret)
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Value for the `Authorization` header.
    pub fn authorization_header(&self) -> String {
        match self.kind {
            TokenKind::Bearer => format!("Bearer {}", self.secret),
            TokenKind::Pat => {
                let encoded = STANDARD.encode(format!(":{}", self.secret));
                format!("Basic {encoded}")
            }
        }
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("kind", &self.kind)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Source of access tokens.
pub trait TokenProvider {
    fn access_token(&self) -> impl Future<Output = Result<AccessToken>> + Send;
}

/// Reads the token from an environment variable on every request.
#[derive(Debug, Clone)]
pub struct EnvTokenProvider {
    var: String,
    kind: TokenKind,
}

impl EnvTokenProvider {
    pub fn new(var: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            var: var.into(),
            kind,
        }
    }

    pub fn var(&self) -> &str {
        &self.var
    }
}

impl TokenProvider for EnvTokenProvider {
    async fn access_token(&self) -> Result<AccessToken> {
        match std::env::var(&self.var) {
            Ok(secret) if !secret.trim().is_empty() => {
                Ok(AccessToken::new(self.kind, secret.trim()))
            }
            _ => Err(DecreeError::MissingToken(self.var.clone())),
        }
    }
}

/// Always hands out the same token.
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: AccessToken,
}

impl StaticTokenProvider {
    pub fn new(token: AccessToken) -> Self {
        Self { token }
    }
}

impl TokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<AccessToken> {
        Ok(self.token.clone())
    }
}
