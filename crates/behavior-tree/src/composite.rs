//! Composite nodes.
//!
//! Composite nodes aggregate the results of several children against a pair
//! of [`Thresholds`]. [`Sequence`] evaluates children one at a time and
//! short-circuits; [`Parallel`] evaluates them concurrently and cancels the
//! stragglers once the outcome is decided.
//!
//! Both generalize the classic AND/OR composites: a success threshold of `n`
//! is a sequence (AND), a success threshold of `1` is a fallback (OR), and any
//! `k` in between means "at least `k` of `n` must succeed".

use std::iter;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinSet;
use tracing::{debug, error, trace};

use crate::node::evaluate_guarded;
use crate::threshold::{Tally, Verdict};
use crate::{ConfigError, Node, NodeError, NodeRef, Payload, Status, Thresholds};

/// Evaluates children in order until a threshold is reached.
///
/// # Semantics
///
/// Children are evaluated left to right, each one completing before the next
/// starts:
/// - Once `success` children have succeeded, the sequence **stops** and returns
///   `Success` with every result gathered so far, in order
/// - Once `failure` children have failed, the sequence **stops** and returns
///   the failure of the child that tipped it
///
/// Children after the deciding one are never evaluated.
pub struct Sequence<T> {
    name: &'static str,
    children: Vec<NodeRef<T>>,
    thresholds: Thresholds,
}

impl<T> Sequence<T> {
    /// Creates a sequence in which every child must succeed.
    pub fn new(children: Vec<NodeRef<T>>) -> Self {
        let thresholds = Thresholds::all(children.len());
        Self {
            name: "sequence",
            children,
            thresholds,
        }
    }

    /// Creates a sequence that succeeds once `success_threshold` children have
    /// succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ThresholdOutOfRange`] if `success_threshold`
    /// exceeds the number of children.
    pub fn with_threshold(
        children: Vec<NodeRef<T>>,
        success_threshold: usize,
    ) -> Result<Self, ConfigError> {
        let thresholds = Thresholds::new(children.len(), success_threshold)?;
        Ok(Self {
            name: "sequence",
            children,
            thresholds,
        })
    }

    /// Creates a fallback: children are tried in priority order until one
    /// succeeds.
    pub fn fallback(children: Vec<NodeRef<T>>) -> Self {
        let thresholds = Thresholds::any(children.len());
        Self {
            name: "fallback",
            children,
            thresholds,
        }
    }

    /// Overrides the name used in log records.
    pub fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Returns the thresholds fixed at construction.
    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Returns the number of children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if there are no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

#[async_trait]
impl<T: Send + 'static> Node<T> for Sequence<T> {
    async fn evaluate(&self) -> Status<T> {
        if self.thresholds.is_trivial() {
            debug!(node = self.name, "no success required, succeeding immediately");
            return Status::Success(Payload::Children(Vec::new()));
        }

        let mut tally = Tally::new(self.thresholds);
        let mut results = Vec::with_capacity(self.children.len());

        for (index, child) in self.children.iter().enumerate() {
            let status = evaluate_guarded(child.as_ref()).await;
            trace!(
                node = self.name,
                index,
                success = status.is_success(),
                "child evaluated"
            );

            match tally.record(&status) {
                Verdict::Pending => results.push(status),
                Verdict::Succeeded => {
                    results.push(status);
                    debug!(
                        node = self.name,
                        index,
                        successes = tally.successes(),
                        "success threshold reached"
                    );
                    return Status::Success(Payload::Children(results));
                }
                Verdict::Failed => {
                    debug!(
                        node = self.name,
                        index,
                        failures = tally.failures(),
                        "failure threshold reached"
                    );
                    return status;
                }
            }
        }

        thresholds_exhausted(self.name, &tally)
    }
}

/// Evaluates all children concurrently until a threshold is reached.
///
/// # Semantics
///
/// Every child is spawned as its own Tokio task at once. Results are counted
/// in completion order but recorded at the child's original position:
/// - Once `success` children have succeeded, returns `Success` with the
///   results reported so far, ordered by child position
/// - Once `failure` children have failed, returns the failure of the child
///   that tipped it
///
/// Children that had not reported are left out of the success payload
/// rather than padded, so positions in it follow child order but only match
/// child indices when every child reported.
///
/// Either way the children still running are aborted and not awaited. If
/// the evaluation itself is dropped midway, all of its child tasks are
/// aborted as well.
///
/// Evaluation requires a Tokio runtime; without one it fails with
/// [`NodeError::NoRuntime`].
pub struct Parallel<T> {
    children: Vec<NodeRef<T>>,
    thresholds: Thresholds,
}

impl<T> Parallel<T> {
    /// Creates a parallel node in which every child must succeed.
    pub fn new(children: Vec<NodeRef<T>>) -> Self {
        let thresholds = Thresholds::all(children.len());
        Self {
            children,
            thresholds,
        }
    }

    /// Creates a parallel node that succeeds once `success_threshold` children
    /// have succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ThresholdOutOfRange`] if `success_threshold`
    /// exceeds the number of children.
    pub fn with_threshold(
        children: Vec<NodeRef<T>>,
        success_threshold: usize,
    ) -> Result<Self, ConfigError> {
        let thresholds = Thresholds::new(children.len(), success_threshold)?;
        Ok(Self {
            children,
            thresholds,
        })
    }

    /// Returns the thresholds fixed at construction.
    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Returns the number of children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if there are no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

#[async_trait]
impl<T: Send + 'static> Node<T> for Parallel<T> {
    async fn evaluate(&self) -> Status<T> {
        if self.thresholds.is_trivial() {
            debug!(node = "parallel", "no success required, succeeding immediately");
            return Status::Success(Payload::Children(Vec::new()));
        }

        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(err) => {
                error!(node = "parallel", "evaluated outside of a Tokio runtime");
                return Status::error(NodeError::NoRuntime(err));
            }
        };

        let mut tasks = JoinSet::new();
        for (index, child) in self.children.iter().enumerate() {
            let child = Arc::clone(child);
            tasks.spawn_on(
                async move { (index, evaluate_guarded(child.as_ref()).await) },
                &handle,
            );
        }

        let mut tally = Tally::new(self.thresholds);
        let mut slots: Vec<Option<Status<T>>> =
            iter::repeat_with(|| None).take(self.children.len()).collect();

        while let Some(joined) = tasks.join_next().await {
            let (index, status) = match joined {
                Ok(reported) => reported,
                Err(err) => {
                    error!(
                        node = "parallel",
                        reported = tally.reported(),
                        "child task ended without reporting"
                    );
                    tasks.abort_all();
                    return Status::error(NodeError::Join(err));
                }
            };
            trace!(
                node = "parallel",
                index,
                success = status.is_success(),
                "child completed"
            );

            match tally.record(&status) {
                Verdict::Pending => slots[index] = Some(status),
                Verdict::Succeeded => {
                    slots[index] = Some(status);
                    tasks.abort_all();
                    debug!(
                        node = "parallel",
                        index,
                        successes = tally.successes(),
                        cancelled = tasks.len(),
                        "success threshold reached"
                    );
                    return Status::Success(Payload::Children(
                        slots.into_iter().flatten().collect(),
                    ));
                }
                Verdict::Failed => {
                    tasks.abort_all();
                    debug!(
                        node = "parallel",
                        index,
                        failures = tally.failures(),
                        cancelled = tasks.len(),
                        "failure threshold reached"
                    );
                    return status;
                }
            }
        }

        thresholds_exhausted("parallel", &tally)
    }
}

/// Defect guard: validated thresholds always trigger by the last child.
fn thresholds_exhausted<T>(node: &'static str, tally: &Tally) -> Status<T> {
    error!(
        node,
        successes = tally.successes(),
        failures = tally.failures(),
        "children exhausted without reaching a threshold"
    );
    Status::error(NodeError::ThresholdsExhausted {
        node,
        evaluated: tally.reported(),
        successes: tally.successes(),
        failures: tally.failures(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::leaf;

    fn counted(calls: &Arc<AtomicUsize>, success: bool) -> NodeRef<&'static str> {
        let calls = Arc::clone(calls);
        leaf::status_fn(move || {
            let calls = Arc::clone(&calls);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                if success {
                    Status::success("ok")
                } else {
                    Status::failure()
                }
            }
        })
    }

    fn delayed(name: &'static str, millis: u64, success: bool) -> NodeRef<&'static str> {
        leaf::status_fn(move || async move {
            tokio::time::sleep(Duration::from_millis(millis)).await;
            if success {
                Status::success(name)
            } else {
                Status::failure()
            }
        })
    }

    #[tokio::test]
    async fn sequence_all_success() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seq = Sequence::new(vec![counted(&calls, true), counted(&calls, true)]);

        let status = seq.evaluate().await;
        assert_eq!(
            status,
            Status::Success(Payload::Children(vec![
                Status::success("ok"),
                Status::success("ok")
            ]))
        );
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn sequence_fails_on_first_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seq = Sequence::new(vec![
            counted(&calls, true),
            counted(&calls, false),
            counted(&calls, true), // Should not execute
        ]);

        assert_eq!(seq.evaluate().await, Status::failure());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn fallback_succeeds_on_first_success() {
        let calls = Arc::new(AtomicUsize::new(0));
        let sel = Sequence::fallback(vec![
            counted(&calls, false),
            counted(&calls, true),
            counted(&calls, true), // Should not execute
        ]);

        let status = sel.evaluate().await;
        assert_eq!(
            status,
            Status::Success(Payload::Children(vec![
                Status::failure(),
                Status::success("ok")
            ]))
        );
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn fallback_fails_when_all_fail() {
        let calls = Arc::new(AtomicUsize::new(0));
        let sel = Sequence::fallback(vec![counted(&calls, false), counted(&calls, false)]);

        assert_eq!(sel.evaluate().await, Status::failure());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn constructors_derive_thresholds() {
        let seq = Sequence::<()>::new(vec![leaf::succeed(), leaf::fail(), leaf::succeed()]);
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.thresholds(), Thresholds::all(3));

        let sel = Sequence::<()>::fallback(vec![leaf::fail(), leaf::fail()]);
        assert_eq!(sel.thresholds().success(), 1);
        assert_eq!(sel.thresholds().failure(), 2);

        let par = Parallel::<()>::with_threshold(vec![leaf::succeed(), leaf::fail()], 1).unwrap();
        assert_eq!(par.thresholds(), Thresholds::new(2, 1).unwrap());
        assert!(!par.is_empty());
        assert!(Parallel::<()>::new(Vec::new()).is_empty());
    }

    #[tokio::test]
    async fn empty_sequence_succeeds() {
        let seq = Sequence::<()>::new(Vec::new());
        assert!(seq.is_empty());
        assert_eq!(
            seq.evaluate().await,
            Status::Success(Payload::Children(Vec::new()))
        );
    }

    #[tokio::test]
    async fn zero_threshold_skips_children() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seq = Sequence::with_threshold(vec![counted(&calls, false)], 0).unwrap();

        assert!(seq.evaluate().await.is_success());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn sequence_returns_triggering_failure() {
        let failing: NodeRef<&'static str> =
            leaf::action(|| async { Err::<&'static str, _>(anyhow::anyhow!("lost connection")) });
        let seq = Sequence::new(vec![leaf::succeed(), failing]);

        let status = seq.evaluate().await;
        let captured = status.captured_error().expect("failure carries error");
        assert_eq!(captured.to_string(), "lost connection");
    }

    #[tokio::test]
    async fn threshold_out_of_range_is_rejected() {
        let result = Sequence::<()>::with_threshold(vec![leaf::succeed()], 2);
        assert!(matches!(
            result,
            Err(ConfigError::ThresholdOutOfRange {
                threshold: 2,
                children: 1
            })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn parallel_records_results_by_position() {
        let par = Parallel::new(vec![
            delayed("first", 30, true),
            delayed("second", 10, true),
            delayed("third", 20, true),
        ]);

        let status = par.evaluate().await;
        assert_eq!(
            status,
            Status::Success(Payload::Children(vec![
                Status::success("first"),
                Status::success("second"),
                Status::success("third")
            ]))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn parallel_failure_cancels_stragglers() {
        let calls = Arc::new(AtomicUsize::new(0));
        let slow = {
            let calls = Arc::clone(&calls);
            leaf::status_fn(move || {
                let calls = Arc::clone(&calls);
                async move {
                    tokio::time::sleep(Duration::from_secs(10)).await;
                    calls.fetch_add(1, Ordering::SeqCst);
                    Status::success("late")
                }
            })
        };
        let par = Parallel::new(vec![slow, delayed("tripwire", 5, false)]);

        assert_eq!(par.evaluate().await, Status::failure());

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn parallel_threshold_returns_reported_results_only() {
        let par = Parallel::with_threshold(
            vec![
                delayed("slow", 50, true),
                delayed("fast", 10, true),
                delayed("failing", 90, false),
            ],
            1,
        )
        .unwrap();

        let status = par.evaluate().await;
        assert_eq!(
            status,
            Status::Success(Payload::Children(vec![Status::success("fast")]))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn parallel_payload_positions_skip_unreported_children() {
        let par = Parallel::with_threshold(
            vec![
                delayed("never", 500, true),
                delayed("first", 10, true),
                delayed("second", 20, true),
            ],
            2,
        )
        .unwrap();

        let status = par.evaluate().await;
        let children = status
            .payload()
            .and_then(Payload::children)
            .expect("parallel succeeds");
        assert_eq!(children.len(), 2);
        assert_eq!(children[0], Status::success("first"));
        assert_eq!(children[1], Status::success("second"));
    }

    #[tokio::test]
    async fn parallel_captures_panicking_child() {
        struct Panics;

        #[async_trait]
        impl Node<&'static str> for Panics {
            async fn evaluate(&self) -> Status<&'static str> {
                panic!("child exploded");
            }
        }

        let par = Parallel::new(vec![leaf::succeed(), Arc::new(Panics) as NodeRef<_>]);

        let status = par.evaluate().await;
        let captured = status.captured_error().expect("panic is captured");
        assert!(matches!(
            captured.downcast_ref::<NodeError>(),
            Some(NodeError::Panicked { .. })
        ));
    }

    #[test]
    fn parallel_without_runtime_fails() {
        let par = Parallel::new(vec![leaf::succeed::<()>()]);
        let status = futures::executor::block_on(par.evaluate());

        let captured = status.captured_error().expect("failure carries error");
        assert!(matches!(
            captured.downcast_ref::<NodeError>(),
            Some(NodeError::NoRuntime(_))
        ));
    }
}
