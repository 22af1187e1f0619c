//! Hands a finished plan to the outside world one action at a time.
//!
//! The executor knows nothing about the engine it drives. The caller asks for
//! the next action, translates it into engine commands, waits for the engine to
//! say the command finished, and reports back. Whether to replan after a
//! failure is the caller's decision.

use crate::action::Action;
use crate::plan::Plan;
use crate::{PlanError, Result};

/// What the engine said about the action in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Completed,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionStatus {
    /// The next action can be issued.
    Ready,
    /// An action has been issued and no feedback has arrived yet.
    AwaitingCompletion,
    /// Every action completed.
    Finished,
    /// An action failed; the remaining actions will not be issued.
    Failed { step: usize, reason: String },
}

#[derive(Debug, Clone)]
pub struct PlanExecutor {
    plan: Plan,
    step: usize,
    status: ExecutionStatus,
}

impl PlanExecutor {
    pub fn new(plan: Plan) -> Self {
        let status = if plan.is_empty() {
            ExecutionStatus::Finished
        } else {
            ExecutionStatus::Ready
        };
        Self {
            plan,
            step: 0,
            status,
        }
    }

    pub fn status(&self) -> &ExecutionStatus {
        &self.status
    }

    /// Index of the action currently in flight, or of the next one to issue.
    pub fn step(&self) -> usize {
        self.step
    }

    pub fn remaining(&self) -> &[Action] {
        &self.plan.actions()[self.step.min(self.plan.len())..]
    }

    pub fn is_done(&self) -> bool {
        matches!(
            self.status,
            ExecutionStatus::Finished | ExecutionStatus::Failed { .. }
        )
    }

    /// Issues the next action. Returns `None` while an action is still in
    /// flight and once the executor has finished or failed.
    pub fn next_action(&mut self) -> Option<Action> {
        if self.status != ExecutionStatus::Ready {
            return None;
        }
        let action = *self.plan.actions().get(self.step)?;
        log::info!("Executing step {}/{}: {}", self.step + 1, self.plan.len(), action);
        self.status = ExecutionStatus::AwaitingCompletion;
        Some(action)
    }

    /// Records the outcome of the action in flight.
    ///
    /// Fails with [`PlanError::UnexpectedFeedback`] if nothing is in flight.
    pub fn report(&mut self, feedback: Feedback) -> Result<&ExecutionStatus> {
        if self.status != ExecutionStatus::AwaitingCompletion {
            return Err(PlanError::UnexpectedFeedback);
        }

        match feedback {
            Feedback::Completed => {
                self.step += 1;
                if self.step >= self.plan.len() {
                    log::info!("Plan execution completed successfully");
                    self.status = ExecutionStatus::Finished;
                } else {
                    self.status = ExecutionStatus::Ready;
                }
            }
            Feedback::Failed(reason) => {
                log::error!("Step {} failed: {}", self.step + 1, reason);
                self.status = ExecutionStatus::Failed {
                    step: self.step,
                    reason,
                };
            }
        }

        Ok(&self.status)
    }
}
