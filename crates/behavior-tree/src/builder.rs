//! Builder utilities for ergonomic behavior tree construction.
//!
//! This module provides helper functions to reduce boilerplate when building
//! behavior trees. Instead of writing verbose `Arc::new(Sequence::new(vec![...]))`,
//! you can use shorter functions like `sequence(vec![...])`.

use std::sync::Arc;

use crate::{
    AlwaysSucceed, ConfigError, Decision, Inverter, IsSuccess, NodeRef, Parallel, RepeatUntil,
    Sequence,
};

/// Creates a sequence node: succeeds only if every child succeeds.
///
/// Shorthand for `Arc::new(Sequence::new(children))`.
#[inline]
pub fn sequence<T: Send + 'static>(children: Vec<NodeRef<T>>) -> NodeRef<T> {
    Arc::new(Sequence::new(children))
}

/// Creates a sequence node that succeeds once `success_threshold` children
/// have succeeded.
///
/// # Errors
///
/// Returns [`ConfigError::ThresholdOutOfRange`] unless
/// `success_threshold <= children.len()`.
pub fn sequence_with_threshold<T: Send + 'static>(
    children: Vec<NodeRef<T>>,
    success_threshold: usize,
) -> Result<NodeRef<T>, ConfigError> {
    Ok(Arc::new(Sequence::with_threshold(
        children,
        success_threshold,
    )?))
}

/// Creates a fallback node: succeeds on the first child success.
///
/// Shorthand for `Arc::new(Sequence::fallback(children))`.
#[inline]
pub fn fallback<T: Send + 'static>(children: Vec<NodeRef<T>>) -> NodeRef<T> {
    Arc::new(Sequence::fallback(children))
}

/// Creates a selector node, a synonym of [`fallback`].
#[inline]
pub fn selector<T: Send + 'static>(children: Vec<NodeRef<T>>) -> NodeRef<T> {
    Arc::new(Sequence::fallback(children).named("selector"))
}

/// Creates a parallel node: every child runs concurrently and all must succeed.
///
/// Shorthand for `Arc::new(Parallel::new(children))`.
#[inline]
pub fn parallel<T: Send + 'static>(children: Vec<NodeRef<T>>) -> NodeRef<T> {
    Arc::new(Parallel::new(children))
}

/// Creates a parallel node that succeeds once `success_threshold` children
/// have succeeded.
///
/// # Errors
///
/// Returns [`ConfigError::ThresholdOutOfRange`] unless
/// `success_threshold <= children.len()`.
pub fn parallel_with_threshold<T: Send + 'static>(
    children: Vec<NodeRef<T>>,
    success_threshold: usize,
) -> Result<NodeRef<T>, ConfigError> {
    Ok(Arc::new(Parallel::with_threshold(
        children,
        success_threshold,
    )?))
}

/// Creates a decision node.
///
/// Shorthand for `Arc::new(Decision::new(condition, success_tree, failure_tree))`.
#[inline]
pub fn decision<T: Send + 'static>(
    condition: NodeRef<T>,
    success_tree: NodeRef<T>,
    failure_tree: Option<NodeRef<T>>,
) -> NodeRef<T> {
    Arc::new(Decision::new(condition, success_tree, failure_tree))
}

/// Creates a repeat-until node.
///
/// Shorthand for `Arc::new(RepeatUntil::new(condition, child))`.
#[inline]
pub fn repeat_until<T: Send + 'static>(condition: NodeRef<T>, child: NodeRef<T>) -> NodeRef<T> {
    Arc::new(RepeatUntil::new(condition, child))
}

/// Creates an inverter node.
///
/// Shorthand for `Arc::new(Inverter::new(child))`.
#[inline]
pub fn inverter<T: Send + 'static>(child: NodeRef<T>) -> NodeRef<T> {
    Arc::new(Inverter::new(child))
}

/// Creates an always-succeed node.
///
/// Shorthand for `Arc::new(AlwaysSucceed::new(child))`.
#[inline]
pub fn always_succeed<T: Send + 'static>(child: NodeRef<T>) -> NodeRef<T> {
    Arc::new(AlwaysSucceed::new(child))
}

/// Creates an is-success node.
///
/// Shorthand for `Arc::new(IsSuccess::new(child))`.
#[inline]
pub fn is_success<T: Send + 'static>(child: NodeRef<T>) -> NodeRef<T> {
    Arc::new(IsSuccess::new(child))
}
