//! Authenticated HTTP client for the project's REST endpoints.

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use super::Endpoints;
use crate::auth::AccessToken;
use crate::error::{DecreeError, Result};
use crate::model::{ListResponse, PolicyConfiguration, Repository};

/// Client for one organization/project pair.
///
/// Every call takes the token it should authenticate with; the client
/// itself holds no credentials.
#[derive(Debug, Clone)]
pub struct DevOpsClient {
    http: Client,
    endpoints: Endpoints,
}

impl DevOpsClient {
    pub fn new(endpoints: Endpoints) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("decree/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, endpoints })
    }

    pub fn with_http_client(http: Client, endpoints: Endpoints) -> Self {
        Self { http, endpoints }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn project(&self) -> &str {
        self.endpoints.project()
    }

    /// List every git repository in the project.
    pub async fn list_repositories(&self, token: &AccessToken) -> Result<Vec<Repository>> {
        let url = self.endpoints.repositories();
        let response = self.send(self.http.get(url.clone()), &url, token).await?;
        let listing: ListResponse<Repository> = decode(response, &url).await?;
        Ok(listing.value)
    }

    /// List every policy configuration in the project.
    pub async fn list_policies(
        &self,
        token: &AccessToken,
    ) -> Result<ListResponse<PolicyConfiguration>> {
        let url = self.endpoints.policy_configurations();
        let response = self.send(self.http.get(url.clone()), &url, token).await?;
        decode(response, &url).await
    }

    /// Replace a policy configuration with `policy`, addressed by its id.
    ///
    /// Any 2xx reply counts as accepted. The stored record is returned
    /// only when the reply body parses as one.
    pub async fn update_policy(
        &self,
        policy: &PolicyConfiguration,
        token: &AccessToken,
    ) -> Result<Option<PolicyConfiguration>> {
        let url = self.endpoints.policy_configuration(policy.id);
        let request = self.http.put(url.clone()).json(policy);
        let response = self.send(request, &url, token).await?;
        let body = response.bytes().await?;
        if body.is_empty() {
            return Ok(None);
        }
        match serde_json::from_slice(&body) {
            Ok(stored) => Ok(Some(stored)),
            Err(error) => {
                tracing::debug!(%url, %error, "update reply is not a policy record");
                Ok(None)
            }
        }
    }

    /// Delete a policy configuration.
    pub async fn delete_policy(&self, id: i64, token: &AccessToken) -> Result<()> {
        let url = self.endpoints.policy_configuration(id);
        self.send(self.http.delete(url.clone()), &url, token).await?;
        Ok(())
    }

    async fn send(
        &self,
        request: RequestBuilder,
        url: &Url,
        token: &AccessToken,
    ) -> Result<Response> {
        let response = request
            .header(AUTHORIZATION, token.authorization_header())
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(%url, %status, "policy service responded");

        if !status.is_success() {
            return Err(DecreeError::from_status(status, url.as_str()));
        }
        Ok(response)
    }
}

async fn decode<T: DeserializeOwned>(response: Response, url: &Url) -> Result<T> {
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|source| DecreeError::Decode {
        url: url.to_string(),
        source,
    })
}
