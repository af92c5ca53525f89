//! The set of repositories in the project, loaded once per session.

use crate::api::DevOpsClient;
use crate::auth::AccessToken;
use crate::error::Result;
use crate::model::Repository;

/// Repositories in discovery order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepositoryDirectory {
    repositories: Vec<Repository>,
}

impl RepositoryDirectory {
    pub fn new(repositories: Vec<Repository>) -> Self {
        Self { repositories }
    }

    /// Fetch every repository of the client's project.
    pub async fn load_all(client: &DevOpsClient, token: &AccessToken) -> Result<Self> {
        let repositories = client.list_repositories(token).await?;
        tracing::info!(
            project = client.project(),
            count = repositories.len(),
            "loaded repository directory"
        );
        Ok(Self::new(repositories))
    }

    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    pub fn get(&self, id: &str) -> Option<&Repository> {
        self.repositories.iter().find(|repo| repo.id == id)
    }

    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }
}
