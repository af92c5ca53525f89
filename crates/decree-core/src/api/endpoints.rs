//! URL construction for the project-scoped REST endpoints.

use url::Url;

use crate::error::{DecreeError, Result};

/// API version every endpoint is pinned to unless configured otherwise.
pub const DEFAULT_API_VERSION: &str = "4.1";

/// Builds endpoint URLs under `{organization}/{project}/_apis`.
#[derive(Debug, Clone)]
pub struct Endpoints {
    organization: Url,
    project: String,
    api_version: String,
}

impl Endpoints {
    pub fn new(organization: &str, project: impl Into<String>) -> Result<Self> {
        let organization =
            Url::parse(organization).map_err(|e| DecreeError::InvalidUrl(format!("{organization}: {e}")))?;
        if organization.cannot_be_a_base() {
            return Err(DecreeError::InvalidUrl(organization.to_string()));
        }
        Ok(Self {
            organization,
            project: project.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
        })
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn organization(&self) -> &Url {
        &self.organization
    }

    /// `GET {org}/{project}/_apis/git/repositories`
    pub fn repositories(&self) -> Url {
        self.build(&["git", "repositories"])
    }

    /// `GET {org}/{project}/_apis/policy/configurations`
    pub fn policy_configurations(&self) -> Url {
        self.build(&["policy", "configurations"])
    }

    /// `PUT`/`DELETE {org}/{project}/_apis/policy/configurations/{id}`
    pub fn policy_configuration(&self, id: i64) -> Url {
        let id = id.to_string();
        self.build(&["policy", "configurations", &id])
    }

    fn build(&self, tail: &[&str]) -> Url {
        let mut url = self.organization.clone();
        // cannot_be_a_base was rejected in new()
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push(&self.project)
                .push("_apis")
                .extend(tail);
        }
        url.set_query(None);
        url.query_pairs_mut()
            .append_pair("api-version", &self.api_version);
        url
    }
}
