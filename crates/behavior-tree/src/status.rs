//! Status returned by behavior nodes.
//!
//! Every node evaluation resolves to exactly one [`Status`]. A success carries
//! a [`Payload`]; a failure carries a [`Cause`] telling a plain domain failure
//! apart from an error captured while evaluating a child.

use std::fmt;
use std::sync::Arc;

/// The result of evaluating a behavior node.
#[derive(Debug, Clone, PartialEq)]
pub enum Status<T> {
    /// The node succeeded.
    Success(Payload<T>),

    /// The node failed.
    ///
    /// A failure is a normal tree outcome, not an error condition. Errors
    /// raised by a child are carried in [`Cause::Error`] instead of unwinding.
    Failure(Cause),
}

/// Value carried by a successful [`Status`].
#[derive(Debug, Clone, PartialEq)]
pub enum Payload<T> {
    /// Success without a value (conditions, decorators).
    Unit,

    /// A value produced by a leaf.
    Value(T),

    /// Ordered child results that made an aggregator succeed.
    ///
    /// A sequence reports every child up to the deciding one. A parallel
    /// node reports only the children that finished before the decision,
    /// still in child order, without placeholders for the rest.
    Children(Vec<Status<T>>),
}

/// Why a node failed.
#[derive(Debug, Clone, PartialEq)]
pub enum Cause {
    /// The node reported failure without an underlying error.
    Domain,

    /// The node's evaluation raised an error, captured here.
    Error(CapturedError),
}

impl<T> Status<T> {
    /// A success carrying a leaf value.
    pub fn success(value: T) -> Self {
        Status::Success(Payload::Value(value))
    }

    /// A success without a value.
    pub fn unit() -> Self {
        Status::Success(Payload::Unit)
    }

    /// The generic failure, with no underlying error.
    pub fn failure() -> Self {
        Status::Failure(Cause::Domain)
    }

    /// A failure carrying a captured error.
    pub fn error(error: impl Into<CapturedError>) -> Self {
        Status::Failure(Cause::Error(error.into()))
    }

    /// Returns `true` if this status is `Success`.
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Status::Success(_))
    }

    /// Returns `true` if this status is `Failure`.
    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, Status::Failure(_))
    }

    /// Returns the payload of a success.
    pub fn payload(&self) -> Option<&Payload<T>> {
        match self {
            Status::Success(payload) => Some(payload),
            Status::Failure(_) => None,
        }
    }

    /// Returns the cause of a failure.
    pub fn cause(&self) -> Option<&Cause> {
        match self {
            Status::Success(_) => None,
            Status::Failure(cause) => Some(cause),
        }
    }

    /// Returns the captured error of a failure, if it carries one.
    pub fn captured_error(&self) -> Option<&CapturedError> {
        match self {
            Status::Failure(Cause::Error(error)) => Some(error),
            _ => None,
        }
    }

    /// Strips the payload, keeping only success or failure.
    ///
    /// A success becomes `Success(Unit)`, a failure keeps its cause.
    pub fn discard_payload(self) -> Self {
        match self {
            Status::Success(_) => Status::unit(),
            failure => failure,
        }
    }
}

impl<T> Payload<T> {
    /// Returns the leaf value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Payload::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the ordered child results, if any.
    pub fn children(&self) -> Option<&[Status<T>]> {
        match self {
            Payload::Children(children) => Some(children),
            _ => None,
        }
    }
}

/// An error raised while evaluating a node, preserved for inspection.
///
/// Clones share the same underlying error, and equality is identity: two
/// `CapturedError`s are equal only when they wrap the same allocation.
#[derive(Clone)]
pub struct CapturedError(Arc<anyhow::Error>);

impl CapturedError {
    /// Returns the wrapped error, e.g. to walk its source chain.
    pub fn inner(&self) -> &anyhow::Error {
        &self.0
    }

    /// Attempts to downcast the wrapped error to a concrete type.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        self.0.downcast_ref::<E>()
    }

    /// Returns `true` if both handles refer to the same captured error.
    pub fn same_as(&self, other: &CapturedError) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for CapturedError {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl fmt::Debug for CapturedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CapturedError").field(&self.0).finish()
    }
}

impl fmt::Display for CapturedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#}", self.0)
    }
}

impl From<anyhow::Error> for CapturedError {
    fn from(error: anyhow::Error) -> Self {
        Self(Arc::new(error))
    }
}

impl From<crate::NodeError> for CapturedError {
    fn from(error: crate::NodeError) -> Self {
        Self(Arc::new(anyhow::Error::new(error)))
    }
}
