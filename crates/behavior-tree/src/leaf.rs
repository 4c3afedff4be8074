//! Leaf adapters.
//!
//! Leaves do the actual work of a tree. Any type implementing [`Node`] is a
//! leaf; the adapters here turn async closures into nodes so small leaves
//! don't need a dedicated type.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::{Node, NodeRef, Status};

/// Leaf backed by a fallible async closure.
///
/// `Ok(value)` becomes `Success(Value(value))`, `Err(error)` becomes a
/// failure carrying the error.
pub struct Action<F> {
    f: F,
}

#[async_trait]
impl<T, E, F, Fut> Node<T> for Action<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<T, E>> + Send,
    E: Into<anyhow::Error>,
    T: Send + 'static,
{
    async fn evaluate(&self) -> Status<T> {
        match (self.f)().await {
            Ok(value) => Status::success(value),
            Err(error) => {
                let error: anyhow::Error = error.into();
                Status::error(error)
            }
        }
    }
}

/// Leaf backed by an async closure that produces a [`Status`] directly.
pub struct StatusFn<F> {
    f: F,
}

#[async_trait]
impl<T, F, Fut> Node<T> for StatusFn<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Status<T>> + Send,
    T: Send + 'static,
{
    async fn evaluate(&self) -> Status<T> {
        (self.f)().await
    }
}

/// Leaf backed by an async predicate.
///
/// `true` becomes `Success(Unit)`, `false` the generic failure.
pub struct Condition<F> {
    f: F,
}

#[async_trait]
impl<T, F, Fut> Node<T> for Condition<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = bool> + Send,
    T: Send + 'static,
{
    async fn evaluate(&self) -> Status<T> {
        if (self.f)().await {
            Status::unit()
        } else {
            Status::failure()
        }
    }
}

/// Leaf that always reports the same outcome.
#[derive(Debug, Clone, Copy)]
pub struct Constant {
    success: bool,
}

#[async_trait]
impl<T: Send + 'static> Node<T> for Constant {
    async fn evaluate(&self) -> Status<T> {
        if self.success {
            Status::unit()
        } else {
            Status::failure()
        }
    }
}

/// Creates a leaf from a fallible async closure.
pub fn action<T, E, F, Fut>(f: F) -> NodeRef<T>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    E: Into<anyhow::Error> + 'static,
    T: Send + 'static,
{
    Arc::new(Action { f })
}

/// Creates a leaf from an async closure returning a [`Status`].
pub fn status_fn<T, F, Fut>(f: F) -> NodeRef<T>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Status<T>> + Send + 'static,
    T: Send + 'static,
{
    Arc::new(StatusFn { f })
}

/// Creates a condition leaf from an async predicate.
pub fn condition<T, F, Fut>(f: F) -> NodeRef<T>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = bool> + Send + 'static,
    T: Send + 'static,
{
    Arc::new(Condition { f })
}

/// Creates a leaf that always succeeds without a value.
pub fn succeed<T: Send + 'static>() -> NodeRef<T> {
    Arc::new(Constant { success: true })
}

/// Creates a leaf that always fails with the generic failure.
pub fn fail<T: Send + 'static>() -> NodeRef<T> {
    Arc::new(Constant { success: false })
}
