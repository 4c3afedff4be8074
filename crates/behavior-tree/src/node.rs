//! Core node trait.
//!
//! This module defines the [`Node`] trait, the contract every leaf and every
//! combinator implements. The trait is generic over the leaf payload type `T`
//! so a whole tree shares one strongly typed [`Status<T>`].

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;

use crate::{NodeError, Status};

/// A behavior tree node: an asynchronous, argument-less unit of work.
///
/// Nodes are immutable once built. Evaluations are independent, so the same
/// node may be evaluated any number of times, including concurrently.
#[async_trait]
pub trait Node<T>: Send + Sync {
    /// Evaluate this node.
    ///
    /// # Returns
    ///
    /// - `Status::Success` with the node's payload if it succeeded
    /// - `Status::Failure` with a cause if it failed
    async fn evaluate(&self) -> Status<T>;
}

/// Shared handle to a node. Combinators own their children through it.
pub type NodeRef<T> = Arc<dyn Node<T>>;

/// Blanket implementation for boxed nodes.
///
/// This allows `Box<dyn Node<T>>` to also implement `Node<T>`, enabling
/// dynamic dispatch and heterogeneous collections of nodes.
#[async_trait]
impl<T: Send + 'static> Node<T> for Box<dyn Node<T>> {
    #[inline]
    async fn evaluate(&self) -> Status<T> {
        (**self).evaluate().await
    }
}

/// Evaluates `node`, converting a panic into a captured-error failure.
///
/// Combinators evaluate every child through this function, so a panicking
/// leaf never unwinds past its parent.
pub async fn evaluate_guarded<T, N>(node: &N) -> Status<T>
where
    N: Node<T> + ?Sized,
{
    // The call itself may panic before any future exists, so it runs inside
    // the guarded future too.
    match AssertUnwindSafe(async { node.evaluate().await })
        .catch_unwind()
        .await
    {
        Ok(status) => status,
        Err(panic) => {
            let message = panic_message(panic.as_ref());
            tracing::warn!(%message, "node panicked, converting to failure");
            Status::error(NodeError::Panicked { message })
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::pin::Pin;

    use super::*;

    struct Panics;

    #[async_trait]
    impl Node<()> for Panics {
        async fn evaluate(&self) -> Status<()> {
            panic!("leaf exploded");
        }
    }

    struct Succeeds;

    #[async_trait]
    impl Node<()> for Succeeds {
        async fn evaluate(&self) -> Status<()> {
            Status::unit()
        }
    }

    #[tokio::test]
    async fn guarded_passes_status_through() {
        assert_eq!(evaluate_guarded(&Succeeds).await, Status::unit());
    }

    #[tokio::test]
    async fn guarded_captures_panic() {
        let status = evaluate_guarded(&Panics).await;

        let captured = status.captured_error().expect("panic is captured");
        match captured.downcast_ref::<NodeError>() {
            Some(NodeError::Panicked { message }) => assert_eq!(message, "leaf exploded"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    /// Hand-written impl that panics before returning its future.
    struct PanicsEagerly;

    impl Node<()> for PanicsEagerly {
        fn evaluate<'life0, 'async_trait>(
            &'life0 self,
        ) -> Pin<Box<dyn Future<Output = Status<()>> + Send + 'async_trait>>
        where
            'life0: 'async_trait,
            Self: 'async_trait,
        {
            panic!("eager");
        }
    }

    #[tokio::test]
    async fn guarded_captures_panic_before_future_exists() {
        let status = evaluate_guarded(&PanicsEagerly).await;

        match status
            .captured_error()
            .and_then(|error| error.downcast_ref::<NodeError>())
        {
            Some(NodeError::Panicked { message }) => assert_eq!(message, "eager"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn boxed_node_delegates() {
        let boxed: Box<dyn Node<()>> = Box::new(Succeeds);
        assert!(boxed.evaluate().await.is_success());
    }
}
