//! Configuration schema for decree.toml

use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::api::DEFAULT_API_VERSION;
use crate::auth::TokenKind;
use crate::status::DEFAULT_NOTICE_TTL;

/// Root configuration structure for decree.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecreeConfig {
    /// Organization URL, e.g. `https://dev.azure.com/fabrikam/`
    #[serde(default)]
    pub organization: String,

    /// Project whose policies are managed
    #[serde(default)]
    pub project: String,

    /// Display name used in permission messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,

    /// REST API version pinned on every request
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Seconds a success or error message stays visible
    #[serde(default = "default_message_ttl_secs")]
    pub message_ttl_secs: u64,

    /// Where the access token comes from
    #[serde(default)]
    pub token: TokenConfig,
}

/// Token source configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Environment variable holding the token
    #[serde(default = "default_token_env")]
    pub env: String,

    /// How the token is sent (`pat` or `bearer`)
    #[serde(default)]
    pub kind: TokenKind,
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_message_ttl_secs() -> u64 {
    DEFAULT_NOTICE_TTL.as_secs()
}

fn default_token_env() -> String {
    "DECREE_TOKEN".to_string()
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            env: default_token_env(),
            kind: TokenKind::default(),
        }
    }
}

impl Default for DecreeConfig {
    fn default() -> Self {
        Self {
            organization: String::new(),
            project: String::new(),
            user_name: None,
            api_version: default_api_version(),
            message_ttl_secs: default_message_ttl_secs(),
            token: TokenConfig::default(),
        }
    }
}

/// Values supplied on the command line, applied over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub organization: Option<String>,
    pub project: Option<String>,
    pub user_name: Option<String>,
}

impl DecreeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Template written by `decree config init`.
    pub fn template() -> Self {
        Self {
            organization: "https://dev.azure.com/your-organization/".to_string(),
            project: "YourProject".to_string(),
            ..Self::default()
        }
    }

    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(organization) = overrides.organization {
            self.organization = organization;
        }
        if let Some(project) = overrides.project {
            self.project = project;
        }
        if let Some(user_name) = overrides.user_name {
            self.user_name = Some(user_name);
        }
    }

    pub fn message_ttl(&self) -> Duration {
        Duration::from_secs(self.message_ttl_secs)
    }

    /// Name shown in permission messages; falls back to the login name.
    pub fn user_display_name(&self) -> String {
        self.user_name
            .clone()
            .or_else(|| std::env::var("USER").ok())
            .or_else(|| std::env::var("USERNAME").ok())
            .unwrap_or_else(|| "the current user".to_string())
    }

    /// Check the values that are present.
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.organization.is_empty() {
            let url = Url::parse(&self.organization)
                .with_context(|| format!("Invalid organization URL: '{}'", self.organization))?;
            if url.cannot_be_a_base() {
                anyhow::bail!("Invalid organization URL: '{}'", self.organization);
            }
        }
        if self.api_version.trim().is_empty() {
            anyhow::bail!("api_version must not be empty");
        }
        if self.message_ttl_secs == 0 {
            anyhow::bail!("message_ttl_secs must be at least 1");
        }
        if self.token.env.trim().is_empty() {
            anyhow::bail!("token.env must name an environment variable");
        }
        Ok(())
    }

    /// Check that enough is set to talk to a project.
    pub fn require_complete(&self) -> anyhow::Result<()> {
        self.validate()?;
        if self.organization.is_empty() {
            anyhow::bail!("No organization configured. Set 'organization' in decree.toml or pass --organization");
        }
        if self.project.trim().is_empty() {
            anyhow::bail!("No project configured. Set 'project' in decree.toml or pass --project");
        }
        Ok(())
    }
}
