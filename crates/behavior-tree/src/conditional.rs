//! Condition-driven nodes.
//!
//! [`Decision`] branches once on a condition; [`RepeatUntil`] keeps running a
//! child for as long as a condition holds.

use async_trait::async_trait;
use tracing::{debug, trace};

use crate::decorator::IsSuccess;
use crate::node::evaluate_guarded;
use crate::{Node, NodeRef, Status};

/// Evaluates one of two subtrees depending on a condition.
///
/// # Semantics
///
/// - If `condition` succeeds, evaluates and returns `success_tree`
/// - Otherwise evaluates and returns `failure_tree`, or the generic failure
///   when there is none
///
/// The branch not taken is never evaluated.
pub struct Decision<T> {
    condition: NodeRef<T>,
    success_tree: NodeRef<T>,
    failure_tree: Option<NodeRef<T>>,
}

impl<T> Decision<T> {
    /// Creates a decision; without `failure_tree` a failed condition yields
    /// the generic failure.
    pub fn new(
        condition: NodeRef<T>,
        success_tree: NodeRef<T>,
        failure_tree: Option<NodeRef<T>>,
    ) -> Self {
        Self {
            condition,
            success_tree,
            failure_tree,
        }
    }
}

#[async_trait]
impl<T: Send + 'static> Node<T> for Decision<T> {
    async fn evaluate(&self) -> Status<T> {
        let condition = evaluate_guarded(self.condition.as_ref()).await;
        trace!(
            node = "decision",
            condition = condition.is_success(),
            "condition evaluated"
        );

        if condition.is_success() {
            evaluate_guarded(self.success_tree.as_ref()).await
        } else if let Some(failure_tree) = &self.failure_tree {
            evaluate_guarded(failure_tree.as_ref()).await
        } else {
            Status::failure()
        }
    }
}

/// Loop state of a single [`RepeatUntil`] evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopState {
    CheckingCondition,
    RunningChild,
    Done,
}

/// Runs a child repeatedly while a condition succeeds.
///
/// # Semantics
///
/// - Checks `condition`; on success evaluates `child` once and checks again
/// - Stops the first time `condition` fails, without evaluating `child`
/// - Returns the last `child` status, or the generic failure if `child`
///   never ran
///
/// The node enforces no iteration bound: a condition that never fails loops
/// forever. Callers own that hazard, e.g. by making the condition count
/// iterations or watch a deadline.
pub struct RepeatUntil<T> {
    condition: IsSuccess<T>,
    child: NodeRef<T>,
}

impl<T> RepeatUntil<T> {
    /// Creates a loop running `child` while `condition` succeeds.
    pub fn new(condition: NodeRef<T>, child: NodeRef<T>) -> Self {
        Self {
            condition: IsSuccess::new(condition),
            child,
        }
    }
}

#[async_trait]
impl<T: Send + 'static> Node<T> for RepeatUntil<T> {
    async fn evaluate(&self) -> Status<T> {
        let mut state = LoopState::CheckingCondition;
        let mut last = None;
        let mut iterations = 0usize;

        while state != LoopState::Done {
            state = match state {
                LoopState::CheckingCondition => {
                    if self.condition.evaluate().await.is_success() {
                        LoopState::RunningChild
                    } else {
                        LoopState::Done
                    }
                }
                LoopState::RunningChild => {
                    last = Some(evaluate_guarded(self.child.as_ref()).await);
                    iterations += 1;
                    // Let sibling tasks run even if neither node ever suspends.
                    tokio::task::yield_now().await;
                    LoopState::CheckingCondition
                }
                LoopState::Done => LoopState::Done,
            };
        }

        debug!(node = "repeat_until", iterations, "condition no longer holds");
        last.unwrap_or_else(Status::failure)
    }
}
