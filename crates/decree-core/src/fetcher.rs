//! Retrieves the project's policy configurations.

use crate::api::DevOpsClient;
use crate::auth::AccessToken;
use crate::error::Result;
use crate::model::PolicyConfiguration;

/// Result of a successful listing call.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// At least one policy came back.
    Found {
        count: usize,
        policies: Vec<PolicyConfiguration>,
    },
    /// The project has no policies, or the caller cannot see any.
    NoPoliciesFound { count: usize },
}

impl FetchOutcome {
    /// Total reported by the backend.
    pub fn count(&self) -> usize {
        match self {
            FetchOutcome::Found { count, .. } | FetchOutcome::NoPoliciesFound { count } => *count,
        }
    }
}

/// Fetches the full policy listing. Stores nothing; the caller owns the result.
#[derive(Debug, Clone, Copy)]
pub struct PolicyFetcher<'a> {
    client: &'a DevOpsClient,
}

impl<'a> PolicyFetcher<'a> {
    pub fn new(client: &'a DevOpsClient) -> Self {
        Self { client }
    }

    pub async fn fetch_all(&self, token: &AccessToken) -> Result<FetchOutcome> {
        let listing = self.client.list_policies(token).await?;

        if listing.is_empty() {
            tracing::info!(project = self.client.project(), "no policies found");
            return Ok(FetchOutcome::NoPoliciesFound {
                count: listing.count,
            });
        }

        tracing::info!(
            project = self.client.project(),
            count = listing.count,
            "fetched policy configurations"
        );
        Ok(FetchOutcome::Found {
            count: listing.count,
            policies: listing.value,
        })
    }
}
