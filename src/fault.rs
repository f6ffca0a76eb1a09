//! Captured-error values carried on the failure track
//!
//! A [`Fault`] records a failure that has been pulled into the outcome world:
//! either an error value handed to [`Outcome::failure`](crate::Outcome::failure)
//! or a panic payload captured by one of the adapters in [`crate::capture`].
//! Faults are cheap to clone (the record is shared behind an `Arc`) and
//! compare equal when they originate from the same error type and carry the
//! same message.
//!
//! Two concrete error types live alongside it: [`AssertionError`], produced
//! only by the `ensure` family of combinators, and [`AggregateFault`],
//! produced only by batch extraction over a collection of outcomes.
//!
//! # Examples
//!
//! ```
//! use sidetrack::Fault;
//!
//! let fault = Fault::msg("connection refused");
//! assert_eq!(fault.message(), "connection refused");
//! assert_eq!(fault, Fault::msg("connection refused"));
//! ```

use std::any::{Any, TypeId};
use std::error::Error as StdError;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Message recorded when a panic payload is neither `&str` nor `String`.
const OPAQUE_PANIC_MESSAGE: &str = "non-string panic payload";

/// Marker for faults built from a bare message.
struct MessageOrigin;

struct FaultRecord {
    kind: &'static str,
    id: TypeId,
    message: String,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

/// A captured error riding the failure track of an [`Outcome`](crate::Outcome).
///
/// A fault remembers the originating error's type (its *kind*), its display
/// message, and, when it was built from a typed error value, the boxed
/// error itself, reachable through [`Fault::downcast_ref`] and
/// [`Fault::source`]. Cloning is cheap: the underlying record is shared.
///
/// Equality follows the outcome model: two faults are equal when they
/// originate from the same type and carry the same message. The payload of
/// the original error beyond its message does not participate.
///
/// # Examples
///
/// ```
/// use std::fmt;
/// use sidetrack::Fault;
///
/// #[derive(Debug)]
/// struct Timeout;
///
/// impl fmt::Display for Timeout {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "operation timed out")
///     }
/// }
///
/// impl std::error::Error for Timeout {}
///
/// let fault = Fault::new(Timeout);
/// assert!(fault.is::<Timeout>());
/// assert_eq!(fault.message(), "operation timed out");
/// ```
#[derive(Clone)]
pub struct Fault {
    record: Arc<FaultRecord>,
}

impl Fault {
    /// Capture a typed error value.
    ///
    /// The error's `Display` output becomes the fault message and the error
    /// itself is retained for [`downcast_ref`](Fault::downcast_ref).
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Fault {
            record: Arc::new(FaultRecord {
                kind: std::any::type_name::<E>(),
                id: TypeId::of::<E>(),
                message: error.to_string(),
                source: Some(Box::new(error)),
            }),
        }
    }

    /// Build a fault from a bare message, with no typed source.
    ///
    /// # Examples
    ///
    /// ```
    /// use sidetrack::Fault;
    ///
    /// let fault = Fault::msg("no route to host");
    /// assert_eq!(fault.to_string(), "no route to host");
    /// ```
    pub fn msg(message: impl Into<String>) -> Self {
        Fault {
            record: Arc::new(FaultRecord {
                kind: "message",
                id: TypeId::of::<MessageOrigin>(),
                message: message.into(),
                source: None,
            }),
        }
    }

    /// Build a fault from a captured panic payload.
    ///
    /// `&str` and `String` payloads become the fault message; any other
    /// payload type is recorded opaquely. The payload's type id is retained,
    /// so faults captured from typed payloads (via `std::panic::panic_any`)
    /// still answer [`is`](Fault::is) for that type.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let id = (*payload).type_id();
        let message = if let Some(text) = payload.downcast_ref::<&'static str>() {
            (*text).to_string()
        } else if let Some(text) = payload.downcast_ref::<String>() {
            text.clone()
        } else {
            OPAQUE_PANIC_MESSAGE.to_string()
        };
        Fault {
            record: Arc::new(FaultRecord {
                kind: "panic",
                id,
                message,
                source: None,
            }),
        }
    }

    /// The originating error's type name, `"panic"` for captured panics, or
    /// `"message"` for bare-message faults.
    #[inline]
    pub fn kind(&self) -> &'static str {
        self.record.kind
    }

    /// The fault's display message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.record.message
    }

    /// Whether this fault originated from an error or panic payload of type
    /// `E`.
    #[inline]
    pub fn is<E: Any>(&self) -> bool {
        self.record.id == TypeId::of::<E>()
    }

    /// Borrow the originating typed error, if this fault was built from one.
    ///
    /// Faults captured from panics carry no source and always return `None`.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        self.record.source.as_ref()?.downcast_ref::<E>()
    }

    /// The originating error, when one was retained.
    pub fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self.record.source {
            Some(ref source) => Some(&**source as &(dyn StdError + 'static)),
            None => None,
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.record.message)
    }
}

impl fmt::Debug for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fault")
            .field("kind", &self.record.kind)
            .field("message", &self.record.message)
            .finish()
    }
}

impl PartialEq for Fault {
    fn eq(&self, other: &Self) -> bool {
        self.record.id == other.record.id && self.record.message == other.record.message
    }
}

impl Eq for Fault {}

impl Hash for Fault {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.record.id.hash(state);
        self.record.message.hash(state);
    }
}

// Fault deliberately does not implement std::error::Error: the blanket
// `From<E: Error>` below would otherwise overlap with the reflexive
// `From<Fault> for Fault`.
impl<E> From<E> for Fault
where
    E: StdError + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Fault::new(error)
    }
}

/// The error produced when an `ensure` predicate rejects a success value.
///
/// This is the only error kind the combinator layer raises on its own; every
/// other fault enters through explicit construction or panic capture.
///
/// # Examples
///
/// ```
/// use sidetrack::AssertionError;
///
/// let error = AssertionError::new("must be positive");
/// assert_eq!(error.to_string(), "must be positive");
/// assert_eq!(AssertionError::default().to_string(), "assertion failed");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionError {
    message: String,
}

impl AssertionError {
    /// Create an assertion error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        AssertionError {
            message: message.into(),
        }
    }

    /// The message supplied at the rejecting call site.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Default for AssertionError {
    fn default() -> Self {
        AssertionError::new("assertion failed")
    }
}

impl fmt::Display for AssertionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for AssertionError {}

/// An ordered bundle of faults from a batch extraction.
///
/// Produced only by [`sequence`](crate::traverse::OutcomeIterExt::sequence)
/// and [`sequence_all`](crate::parallel::sequence_all) when one or more
/// elements failed. Holds one entry per failing element, in input order; no
/// deduplication is performed.
///
/// # Examples
///
/// ```
/// use sidetrack::{Outcome, OutcomeIterExt};
///
/// let outcomes = vec![
///     Outcome::success(1),
///     Outcome::<i32>::failure(std::fmt::Error),
/// ];
/// let aggregate = outcomes.sequence().unwrap_err();
/// assert_eq!(aggregate.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateFault {
    faults: Vec<Fault>,
}

impl AggregateFault {
    pub(crate) fn new(faults: Vec<Fault>) -> Self {
        debug_assert!(!faults.is_empty());
        AggregateFault { faults }
    }

    /// The bundled faults, in the order their elements appeared in the input.
    #[inline]
    pub fn faults(&self) -> &[Fault] {
        &self.faults
    }

    /// Number of failing elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.faults.len()
    }

    /// An aggregate is never built from zero faults, so this is always false;
    /// provided for iterator-style call sites.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faults.is_empty()
    }

    /// Consume the aggregate and take ownership of the bundled faults.
    pub fn into_faults(self) -> Vec<Fault> {
        self.faults
    }
}

impl fmt::Display for AggregateFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} operation(s) failed", self.faults.len())?;
        for fault in &self.faults {
            write!(f, "; {}", fault)?;
        }
        Ok(())
    }
}

impl StdError for AggregateFault {}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::{AggregateFault, Fault};
    use serde::ser::SerializeStruct;
    use serde::{Serialize, Serializer};

    impl Serialize for Fault {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut state = serializer.serialize_struct("Fault", 2)?;
            state.serialize_field("kind", self.kind())?;
            state.serialize_field("message", self.message())?;
            state.end()
        }
    }

    impl Serialize for AggregateFault {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut state = serializer.serialize_struct("AggregateFault", 1)?;
            state.serialize_field("faults", self.faults())?;
            state.end()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn io_fault(message: &str) -> Fault {
        Fault::new(io::Error::new(io::ErrorKind::Other, message.to_string()))
    }

    #[test]
    fn typed_fault_keeps_kind_and_message() {
        let fault = io_fault("disk full");
        assert!(fault.is::<io::Error>());
        assert_eq!(fault.message(), "disk full");
        assert!(fault.kind().ends_with("Error"));
    }

    #[test]
    fn downcast_recovers_original_error() {
        let fault = io_fault("disk full");
        let original = fault.downcast_ref::<io::Error>().unwrap();
        assert_eq!(original.kind(), io::ErrorKind::Other);
        assert!(fault.downcast_ref::<fmt::Error>().is_none());
    }

    #[test]
    fn equality_is_kind_and_message() {
        assert_eq!(io_fault("a"), io_fault("a"));
        assert_ne!(io_fault("a"), io_fault("b"));
        // Same message, different originating type.
        assert_ne!(io_fault("a"), Fault::msg("a"));
    }

    #[test]
    fn clone_shares_the_record() {
        let fault = io_fault("x");
        let copy = fault.clone();
        assert_eq!(fault, copy);
        assert_eq!(copy.message(), "x");
    }

    #[test]
    fn string_panic_payload_becomes_message() {
        let fault = Fault::from_panic(Box::new("boom".to_string()));
        assert_eq!(fault.message(), "boom");
        assert_eq!(fault.kind(), "panic");
        assert!(fault.is::<String>());
        assert!(fault.source().is_none());
    }

    #[test]
    fn static_str_panic_payload_becomes_message() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("boom");
        let fault = Fault::from_panic(payload);
        assert_eq!(fault.message(), "boom");
        assert!(fault.is::<&'static str>());
    }

    #[test]
    fn opaque_panic_payload_is_recorded() {
        #[derive(Debug)]
        struct Marker;
        let fault = Fault::from_panic(Box::new(Marker));
        assert_eq!(fault.message(), OPAQUE_PANIC_MESSAGE);
        assert!(fault.is::<Marker>());
    }

    #[test]
    fn assertion_error_default_message() {
        assert_eq!(AssertionError::default().message(), "assertion failed");
        assert_eq!(
            AssertionError::new("must hold").to_string(),
            "must hold"
        );
    }

    #[test]
    fn aggregate_preserves_order_and_duplicates() {
        let aggregate =
            AggregateFault::new(vec![Fault::msg("a"), Fault::msg("b"), Fault::msg("a")]);
        assert_eq!(aggregate.len(), 3);
        assert_eq!(aggregate.faults()[0], Fault::msg("a"));
        assert_eq!(aggregate.faults()[2], Fault::msg("a"));
        assert_eq!(aggregate.to_string(), "3 operation(s) failed; a; b; a");
    }

    #[test]
    fn aggregate_converts_into_fault() {
        let aggregate = AggregateFault::new(vec![Fault::msg("a")]);
        let fault: Fault = aggregate.clone().into();
        assert!(fault.is::<AggregateFault>());
        assert_eq!(fault.downcast_ref::<AggregateFault>(), Some(&aggregate));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn fault_serializes_kind_and_message() {
        let json = serde_json::to_value(Fault::msg("bad input")).unwrap();
        assert_eq!(json["kind"], "message");
        assert_eq!(json["message"], "bad input");
    }
}
