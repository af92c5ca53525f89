//! Delete a policy after confirmation.

use crate::error::Result;
use crate::model::PolicyConfiguration;

use super::{StateMachine, WorkflowState};

/// One delete attempt.
#[derive(Debug, Clone)]
pub struct Deletion {
    policy_id: i64,
    type_name: String,
    machine: StateMachine,
}

impl Deletion {
    pub fn begin(policy: &PolicyConfiguration) -> Self {
        let machine = StateMachine::begin();
        Self {
            policy_id: policy.id,
            type_name: policy.type_name().to_string(),
            machine,
        }
    }

    pub fn policy_id(&self) -> i64 {
        self.policy_id
    }

    pub fn confirmation_text(&self) -> String {
        format!(
            "Are you sure you want to delete this \"{}\" policy?",
            self.type_name
        )
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

/// How a delete attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionOutcome {
    Cancelled,
    Succeeded { message: String },
    Failed { message: String },
}
