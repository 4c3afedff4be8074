//! Success/failure thresholds shared by the aggregating composites.
//!
//! A composite over `n` children succeeds once `success` children have
//! succeeded and fails once `failure = n - success + 1` children have failed,
//! the point at which `success` successes are no longer reachable. Exactly one
//! of the two is reached by the time every child has reported.

use crate::{ConfigError, Status};

/// Threshold pair of an aggregating composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    success: usize,
    failure: usize,
}

impl Thresholds {
    /// Validates `success` against the number of children.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ThresholdOutOfRange`] unless `success <= children`.
    pub fn new(children: usize, success: usize) -> Result<Self, ConfigError> {
        if success > children {
            return Err(ConfigError::ThresholdOutOfRange {
                threshold: success,
                children,
            });
        }
        Ok(Self {
            success,
            failure: children - success + 1,
        })
    }

    /// Every child must succeed (AND).
    pub fn all(children: usize) -> Self {
        Self {
            success: children,
            failure: 1,
        }
    }

    /// A single success is enough (OR). Trivially satisfied with no children.
    pub fn any(children: usize) -> Self {
        let success = children.min(1);
        Self {
            success,
            failure: children - success + 1,
        }
    }

    /// Successes needed to succeed.
    #[inline]
    pub fn success(&self) -> usize {
        self.success
    }

    /// Failures that make success unreachable.
    #[inline]
    pub fn failure(&self) -> usize {
        self.failure
    }

    /// Returns `true` if no success is needed, so the outcome is known
    /// before any child runs.
    #[inline]
    pub fn is_trivial(&self) -> bool {
        self.success == 0
    }
}

/// Outcome of recording one child result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Verdict {
    Pending,
    Succeeded,
    Failed,
}

/// Running success/failure counts of a single evaluation.
#[derive(Debug)]
pub(crate) struct Tally {
    thresholds: Thresholds,
    successes: usize,
    failures: usize,
}

impl Tally {
    pub(crate) fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            successes: 0,
            failures: 0,
        }
    }

    pub(crate) fn record<T>(&mut self, status: &Status<T>) -> Verdict {
        if status.is_success() {
            self.successes += 1;
            if self.successes == self.thresholds.success {
                return Verdict::Succeeded;
            }
        } else {
            self.failures += 1;
            if self.failures == self.thresholds.failure {
                return Verdict::Failed;
            }
        }
        Verdict::Pending
    }

    pub(crate) fn successes(&self) -> usize {
        self.successes
    }

    pub(crate) fn failures(&self) -> usize {
        self.failures
    }

    pub(crate) fn reported(&self) -> usize {
        self.successes + self.failures
    }
}
