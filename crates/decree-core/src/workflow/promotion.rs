//! Promote a repository-scoped policy to a project-wide one.

use crate::error::Result;
use crate::model::{PolicyConfiguration, ScopeEntry};

use super::{StateMachine, WorkflowState};

/// Policy configuration REST API reference, offered as the way to edit a
/// policy once it no longer belongs to a branch.
pub const REST_API_REFERENCE: &str =
    "https://docs.microsoft.com/en-us/rest/api/vsts/policy/configurations?view=vsts-rest-4.1";

/// What the operator is asked to confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionSummary {
    pub policy_id: i64,
    pub type_name: String,
    /// Branch refs of the scope, joined with ", ".
    pub branches: String,
    /// Names of the matched repositories, joined with " or ".
    pub repositories: String,
    pub project: String,
}

impl PromotionSummary {
    pub fn for_policy(policy: &PolicyConfiguration, project: &str) -> Self {
        let branches = policy.branches().collect::<Vec<_>>().join(", ");
        let repositories = policy
            .matched_repositories
            .iter()
            .map(|repo| repo.name.as_str())
            .collect::<Vec<_>>()
            .join(" or ");

        Self {
            policy_id: policy.id,
            type_name: policy.type_name().to_string(),
            branches,
            repositories,
            project: project.to_string(),
        }
    }

    pub fn confirmation_text(&self) -> String {
        format!(
            "By promoting this {} policy, it will be applied to all {} branches across every \
repository in the {} project. You will no longer be able to edit the policy by going to the {} \
branch policies. Decree or the Azure DevOps Services REST API ({REST_API_REFERENCE}) will be \
required to edit or delete the policy. Are you sure you want to proceed?",
            self.type_name, self.branches, self.project, self.repositories
        )
    }
}

/// One promotion attempt.
#[derive(Debug, Clone)]
pub struct Promotion {
    summary: PromotionSummary,
    machine: StateMachine,
}

impl Promotion {
    /// Start an attempt on `policy`; the result awaits confirmation.
    pub fn begin(policy: &PolicyConfiguration, project: &str) -> Self {
        let machine = StateMachine::begin();
        Self {
            summary: PromotionSummary::for_policy(policy, project),
            machine,
        }
    }

    pub fn policy_id(&self) -> i64 {
        self.summary.policy_id
    }

    pub fn summary(&self) -> &PromotionSummary {
        &self.summary
    }

    pub fn state(&self) -> WorkflowState {
        self.machine.state()
    }

    pub fn confirm(&mut self) -> Result<()> {
        self.machine.advance(WorkflowState::Confirmed)
    }

    pub fn cancel(&mut self) -> Result<()> {
        self.machine.advance(WorkflowState::Cancelled)
    }

    pub(crate) fn advance(&mut self, next: WorkflowState) -> Result<()> {
        self.machine.advance(next)
    }
}

/// How a promotion attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromotionOutcome {
    Cancelled,
    Succeeded { message: String },
    Failed { message: String },
}

/// Make `policy` global. Returns the scope it had before.
pub fn clear_scope(policy: &mut PolicyConfiguration) -> Vec<ScopeEntry> {
    // matched repositories of an empty scope are empty
    policy.matched_repositories.clear();
    std::mem::take(&mut policy.settings.scope)
}
