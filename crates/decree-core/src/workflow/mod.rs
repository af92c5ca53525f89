//! Operator-confirmed workflows on a single policy.
//!
//! Both workflows walk the same state machine:
//!
//! ```text
//! Idle -> ConfirmationPending -> Confirmed -> Submitting -> Succeeded
//!                   |                                  \-> Failed
//!                   \-> Cancelled
//! ```

pub mod deletion;
pub mod promotion;

pub use deletion::{Deletion, DeletionOutcome};
pub use promotion::{Promotion, PromotionOutcome, PromotionSummary, clear_scope};

use crate::error::{DecreeError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkflowState {
    Idle,
    ConfirmationPending,
    Cancelled,
    Confirmed,
    Submitting,
    Succeeded,
    Failed,
}

impl WorkflowState {
    pub fn can_move_to(self, next: WorkflowState) -> bool {
        use WorkflowState::*;
        matches!(
            (self, next),
            (Idle, ConfirmationPending)
                | (ConfirmationPending, Cancelled)
                | (ConfirmationPending, Confirmed)
                | (Confirmed, Submitting)
                | (Submitting, Succeeded)
                | (Submitting, Failed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            WorkflowState::Cancelled | WorkflowState::Succeeded | WorkflowState::Failed
        )
    }
}

/// Current state plus the edge check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StateMachine {
    state: WorkflowState,
}

impl StateMachine {
    #[cfg(test)]
    pub(crate) fn new() -> Self {
        Self {
            state: WorkflowState::Idle,
        }
    }

    /// A machine that has taken the operator's gesture (Idle -> ConfirmationPending).
    pub(crate) fn begin() -> Self {
        Self {
            state: WorkflowState::ConfirmationPending,
        }
    }

    pub(crate) fn state(&self) -> WorkflowState {
        self.state
    }

    pub(crate) fn advance(&mut self, next: WorkflowState) -> Result<()> {
        if !self.state.can_move_to(next) {
            return Err(DecreeError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }
}
