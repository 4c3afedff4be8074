//! Error types for tree construction and evaluation.
//!
//! Construction errors are returned to the tree builder immediately.
//! Evaluation errors never propagate: they are wrapped into
//! [`Cause::Error`](crate::Cause::Error) at the nearest combinator.

use thiserror::Error;

/// Invalid combinator configuration, rejected at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("success threshold {threshold} is out of range [0, {children}]")]
    ThresholdOutOfRange { threshold: usize, children: usize },
}

/// Errors captured while evaluating nodes.
#[derive(Debug, Error)]
pub enum NodeError {
    #[error("node panicked during evaluation: {message}")]
    Panicked { message: String },

    #[error(
        "{node} evaluated {evaluated} children without reaching a threshold \
         ({successes} successes, {failures} failures)"
    )]
    ThresholdsExhausted {
        node: &'static str,
        evaluated: usize,
        successes: usize,
        failures: usize,
    },

    #[error("parallel evaluation requires a Tokio runtime")]
    NoRuntime(#[source] tokio::runtime::TryCurrentError),

    #[error("parallel child task join failed")]
    Join(#[source] tokio::task::JoinError),
}
