//! The operator's session: one owner for the repository directory, the
//! policy listing and the message board.
//!
//! Every mutating operation takes `&mut self`, so a second load or
//! submission cannot start while another one is still in flight.

use std::time::Duration;

use crate::api::{DevOpsClient, Endpoints};
use crate::auth::TokenProvider;
use crate::config::DecreeConfig;
use crate::directory::RepositoryDirectory;
use crate::error::{DecreeError, Result};
use crate::fetcher::{FetchOutcome, PolicyFetcher};
use crate::messages;
use crate::model::{PolicyConfiguration, Repository};
use crate::reconcile::{reconcile, reconcile_all};
use crate::render;
use crate::status::StatusBoard;
use crate::workflow::{
    Deletion, DeletionOutcome, Promotion, PromotionOutcome, WorkflowState, clear_scope,
};

/// Who is working on which project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebContext {
    pub organization: String,
    pub project: String,
    pub user_name: String,
}

/// Result of (re)loading the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingOutcome {
    Loaded { count: usize },
    /// Not an error: the project has no visible policies.
    Empty { count: usize, message: String },
    Failed { message: String },
}

pub struct Session<T> {
    client: DevOpsClient,
    tokens: T,
    context: WebContext,
    directory: RepositoryDirectory,
    policies: Vec<PolicyConfiguration>,
    total: usize,
    board: StatusBoard,
}

impl<T: TokenProvider> Session<T> {
    pub fn new(client: DevOpsClient, tokens: T, user_name: impl Into<String>) -> Self {
        let context = WebContext {
            organization: client.endpoints().organization().to_string(),
            project: client.project().to_string(),
            user_name: user_name.into(),
        };
        Self {
            client,
            tokens,
            context,
            directory: RepositoryDirectory::default(),
            policies: Vec::new(),
            total: 0,
            board: StatusBoard::default(),
        }
    }

    pub fn from_config(config: &DecreeConfig, tokens: T) -> Result<Self> {
        let endpoints = Endpoints::new(&config.organization, config.project.clone())?
            .with_api_version(config.api_version.clone());
        let client = DevOpsClient::new(endpoints)?;
        Ok(Self::new(client, tokens, config.user_display_name())
            .with_message_ttl(config.message_ttl()))
    }

    pub fn with_message_ttl(mut self, ttl: Duration) -> Self {
        self.board = StatusBoard::new(ttl);
        self
    }

    pub fn context(&self) -> &WebContext {
        &self.context
    }

    pub fn project(&self) -> &str {
        &self.context.project
    }

    pub fn repositories(&self) -> &[Repository] {
        self.directory.repositories()
    }

    pub fn policies(&self) -> &[PolicyConfiguration] {
        &self.policies
    }

    /// Total reported by the last listing call.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn policy(&self, id: i64) -> Option<&PolicyConfiguration> {
        self.policies.iter().find(|policy| policy.id == id)
    }

    /// Raw record for the details panel.
    pub fn details(&self, id: i64) -> Result<String> {
        self.policy(id)
            .map(render::details)
            .ok_or(DecreeError::UnknownPolicy(id))
    }

    pub fn board(&self) -> &StatusBoard {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut StatusBoard {
        &mut self.board
    }

    /// Load the repository directory, then the policy listing.
    pub async fn load(&mut self) -> ListingOutcome {
        if let Err(error) = self.load_repositories().await {
            let message = messages::repositories_failed(&error, &self.context.user_name, self.project());
            tracing::warn!(
                project = %self.context.project,
                user = %self.context.user_name,
                error = %error,
                "failed to load repositories"
            );
            self.board.error(message.clone());
            return ListingOutcome::Failed { message };
        }
        self.refresh_policies().await
    }

    /// Replace the repository directory.
    pub async fn load_repositories(&mut self) -> Result<usize> {
        let token = self.tokens.access_token().await?;
        self.directory = RepositoryDirectory::load_all(&self.client, &token).await?;
        Ok(self.directory.len())
    }

    /// Fetch the listing again and reconcile it against the current directory.
    pub async fn refresh_policies(&mut self) -> ListingOutcome {
        let fetched = self.fetch().await;
        match fetched {
            Ok(FetchOutcome::Found {
                count,
                mut policies,
            }) => {
                reconcile_all(&mut policies, self.directory.repositories());
                self.policies = policies;
                self.total = count;
                ListingOutcome::Loaded { count }
            }
            Ok(FetchOutcome::NoPoliciesFound { count }) => {
                self.policies.clear();
                self.total = count;
                let message = messages::no_policies(self.project());
                self.board.info(message.clone());
                ListingOutcome::Empty { count, message }
            }
            Err(error) => {
                tracing::warn!(
                    project = %self.context.project,
                    user = %self.context.user_name,
                    error = %error,
                    "failed to request policies"
                );
                let message = messages::list_failed(&error, &self.context.user_name, self.project());
                self.board.error(message.clone());
                ListingOutcome::Failed { message }
            }
        }
    }

    async fn fetch(&self) -> Result<FetchOutcome> {
        let token = self.tokens.access_token().await?;
        PolicyFetcher::new(&self.client).fetch_all(&token).await
    }

    /// Start promoting `policy_id`; the returned attempt awaits confirmation.
    pub fn begin_promotion(&self, policy_id: i64) -> Result<Promotion> {
        let policy = self
            .policy(policy_id)
            .ok_or(DecreeError::UnknownPolicy(policy_id))?;
        Ok(Promotion::begin(policy, self.project()))
    }

    /// Submit a confirmed promotion: clear the scope and send the update.
    ///
    /// A cancelled attempt is reported as such without any call. When the
    /// backend rejects the update the previous scope is restored locally.
    pub async fn promote(&mut self, promotion: &mut Promotion) -> Result<PromotionOutcome> {
        if promotion.state() == WorkflowState::Cancelled {
            return Ok(PromotionOutcome::Cancelled);
        }

        let id = promotion.policy_id();
        let index = self.index_of(id)?;
        promotion.advance(WorkflowState::Submitting)?;

        let previous_scope = clear_scope(&mut self.policies[index]);
        let submitted = self.submit_update(index).await;
        match submitted {
            Ok(stored) => {
                if let Some(stored) = stored {
                    self.policies[index].revision = stored.revision;
                }
                promotion.advance(WorkflowState::Succeeded)?;
                tracing::info!(policy = id, project = %self.context.project, "promoted policy to global");
                self.board.success(messages::PROMOTE_SUCCESS);
                Ok(PromotionOutcome::Succeeded {
                    message: messages::PROMOTE_SUCCESS.to_string(),
                })
            }
            Err(error) => {
                let policy = &mut self.policies[index];
                policy.settings.scope = previous_scope;
                policy.matched_repositories = reconcile(policy, self.directory.repositories());
                promotion.advance(WorkflowState::Failed)?;

                tracing::warn!(
                    policy = id,
                    project = %self.context.project,
                    user = %self.context.user_name,
                    error = %error,
                    "failed to promote policy"
                );
                let message = messages::promote_failed(&error, &self.context.user_name, self.project());
                self.board.error(message.clone());
                Ok(PromotionOutcome::Failed { message })
            }
        }
    }

    async fn submit_update(&self, index: usize) -> Result<Option<PolicyConfiguration>> {
        let token = self.tokens.access_token().await?;
        self.client.update_policy(&self.policies[index], &token).await
    }

    /// Start deleting `policy_id`; the returned attempt awaits confirmation.
    pub fn begin_deletion(&self, policy_id: i64) -> Result<Deletion> {
        let policy = self
            .policy(policy_id)
            .ok_or(DecreeError::UnknownPolicy(policy_id))?;
        Ok(Deletion::begin(policy))
    }

    /// Submit a confirmed deletion; on success the policy leaves the listing.
    pub async fn delete(&mut self, deletion: &mut Deletion) -> Result<DeletionOutcome> {
        if deletion.state() == WorkflowState::Cancelled {
            return Ok(DeletionOutcome::Cancelled);
        }

        let id = deletion.policy_id();
        let index = self.index_of(id)?;
        deletion.advance(WorkflowState::Submitting)?;

        let submitted = self.submit_delete(id).await;
        match submitted {
            Ok(()) => {
                self.policies.remove(index);
                self.total = self.total.saturating_sub(1);
                deletion.advance(WorkflowState::Succeeded)?;
                tracing::info!(policy = id, project = %self.context.project, "deleted policy");
                self.board.success(messages::DELETE_SUCCESS);
                Ok(DeletionOutcome::Succeeded {
                    message: messages::DELETE_SUCCESS.to_string(),
                })
            }
            Err(error) => {
                deletion.advance(WorkflowState::Failed)?;
                tracing::warn!(
                    policy = id,
                    project = %self.context.project,
                    user = %self.context.user_name,
                    error = %error,
                    "failed to delete policy"
                );
                let message =
                    messages::delete_failed(&error, &self.context.user_name, self.project(), id);
                self.board.error(message.clone());
                Ok(DeletionOutcome::Failed { message })
            }
        }
    }

    async fn submit_delete(&self, id: i64) -> Result<()> {
        let token = self.tokens.access_token().await?;
        self.client.delete_policy(id, &token).await
    }

    fn index_of(&self, id: i64) -> Result<usize> {
        self.policies
            .iter()
            .position(|policy| policy.id == id)
            .ok_or(DecreeError::UnknownPolicy(id))
    }
}
