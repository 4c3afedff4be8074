//! Decorator nodes.
//!
//! Decorators wrap a single child node and reshape its status. This module
//! provides [`Inverter`] (NOT logic), [`AlwaysSucceed`] (failure suppression)
//! and [`IsSuccess`] (normalization to a plain success/failure).

use async_trait::async_trait;

use crate::node::evaluate_guarded;
use crate::{Node, NodeRef, Status};

/// Inverts the result of its child node.
///
/// # Semantics
///
/// - If the child succeeds, the inverter returns the generic failure
/// - If the child fails, the inverter returns `Success(Unit)`
///
/// This is analogous to a logical NOT (!) operation.
pub struct Inverter<T> {
    child: NodeRef<T>,
}

impl<T> Inverter<T> {
    /// Creates a new inverter that wraps the given child node.
    pub fn new(child: NodeRef<T>) -> Self {
        Self { child }
    }
}

#[async_trait]
impl<T: Send + 'static> Node<T> for Inverter<T> {
    async fn evaluate(&self) -> Status<T> {
        match evaluate_guarded(self.child.as_ref()).await {
            Status::Success(_) => Status::failure(),
            Status::Failure(_) => Status::unit(),
        }
    }
}

/// Always succeeds, regardless of the child's result.
///
/// # Semantics
///
/// - If the child succeeds, its status is returned unchanged
/// - If the child fails (or panics), returns `Success(Unit)`
///
/// This is useful for optional subtrees that shouldn't fail their parent.
pub struct AlwaysSucceed<T> {
    child: NodeRef<T>,
}

impl<T> AlwaysSucceed<T> {
    /// Creates a new always-succeed wrapper around the given child node.
    pub fn new(child: NodeRef<T>) -> Self {
        Self { child }
    }
}

#[async_trait]
impl<T: Send + 'static> Node<T> for AlwaysSucceed<T> {
    async fn evaluate(&self) -> Status<T> {
        match evaluate_guarded(self.child.as_ref()).await {
            success @ Status::Success(_) => success,
            Status::Failure(_) => Status::unit(),
        }
    }
}

/// Reduces its child's status to `Success(Unit)` or the generic failure.
///
/// Payloads and captured errors are dropped; a panicking child counts as a
/// failure. Used for conditions, where only the outcome matters.
pub struct IsSuccess<T> {
    child: NodeRef<T>,
}

impl<T> IsSuccess<T> {
    /// Creates a new is-success wrapper around the given child node.
    pub fn new(child: NodeRef<T>) -> Self {
        Self { child }
    }
}

#[async_trait]
impl<T: Send + 'static> Node<T> for IsSuccess<T> {
    async fn evaluate(&self) -> Status<T> {
        if evaluate_guarded(self.child.as_ref()).await.is_success() {
            Status::unit()
        } else {
            Status::failure()
        }
    }
}
