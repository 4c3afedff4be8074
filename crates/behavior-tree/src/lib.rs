//! Asynchronous behavior tree combinators.
//!
//! This library composes asynchronous leaf tasks into behavior trees: every
//! node is an async unit of work resolving to a [`Status`], and combinators
//! are nodes built from other nodes, so trees nest arbitrarily.
//!
//! - **Threshold semantics**: sequence and fallback are two settings of one
//!   aggregator that succeeds once `k` of `n` children succeed
//! - **Error containment**: errors and panics raised by a child become a
//!   failure carrying the error; they never unwind past a combinator
//! - **Cancellation**: the parallel composite aborts children that are still
//!   running once its outcome is decided
//!
//! # Architecture
//!
//! - [`Node`]: Core trait for all nodes
//! - [`Status`]: Success (with a [`Payload`]) or Failure (with a [`Cause`])
//! - Composite nodes: [`Sequence`], [`Parallel`]
//! - Conditional nodes: [`Decision`], [`RepeatUntil`]
//! - Decorator nodes: [`Inverter`], [`AlwaysSucceed`], [`IsSuccess`]
//! - [`builder`] functions and [`leaf`] adapters for building trees
//!
//! # Example
//!
//! ```rust,ignore
//! use async_behavior_tree::builder::{fallback, sequence};
//! use async_behavior_tree::leaf;
//!
//! let tree = fallback(vec![
//!     sequence(vec![leaf::condition(door_is_open), leaf::action(walk_through)]),
//!     leaf::action(open_door),
//! ]);
//! let status = tree.evaluate().await;
//! ```

pub mod builder;
pub mod composite;
pub mod conditional;
pub mod decorator;
pub mod error;
pub mod leaf;
pub mod node;
pub mod status;
pub mod threshold;

// Re-export core types for ergonomic API
pub use composite::{Parallel, Sequence};
pub use conditional::{Decision, RepeatUntil};
pub use decorator::{AlwaysSucceed, Inverter, IsSuccess};
pub use error::{ConfigError, NodeError};
pub use node::{Node, NodeRef, evaluate_guarded};
pub use status::{CapturedError, Cause, Payload, Status};
pub use threshold::Thresholds;
