//! The two-state outcome value
//!
//! An [`Outcome<T>`] is either a `Success` carrying a payload or a `Failure`
//! carrying a captured [`Fault`], never both, never neither. Outcomes are
//! immutable once constructed: every combinator consumes its input and
//! produces a new value, and a failure flows through an entire chain
//! unchanged until something terminal inspects it.
//!
//! Construction is always explicitly tagged through [`Outcome::success`] and
//! [`Outcome::failure`]; the tag is never inferred from the argument type,
//! so a payload that is itself an error type stays unambiguous.
//!
//! # Examples
//!
//! ```
//! use sidetrack::Outcome;
//!
//! let outcome = Outcome::success(21)
//!     .map(|x| x * 2)
//!     .ensure_that(|x| *x > 0, "must be positive");
//!
//! assert_eq!(outcome, Outcome::success(42));
//! ```

use crate::fault::Fault;

mod combinators;


/// A value that either succeeded with a payload or failed with a captured
/// fault.
///
/// Two successes are equal when their payloads are equal; two failures are
/// equal when their faults originate from the same error type and carry the
/// same message.
///
/// # Examples
///
/// ```
/// use sidetrack::{Fault, Outcome};
///
/// let success = Outcome::success("ready");
/// let failure = Outcome::<&str>::failure(Fault::msg("not ready"));
///
/// assert!(success.is_success());
/// assert!(failure.is_failure());
/// ```
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The computation produced a payload.
    Success(T),
    /// The computation failed; the fault rides along unchanged until
    /// inspected.
    Failure(Fault),
}

/// How a side computation's own outcome feeds back into the original
/// success, for [`Outcome::tap`] and friends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapMode {
    /// A failing side computation replaces the outcome with its fault; a
    /// succeeding one is discarded and the original success is kept.
    Propagate,
    /// The side computation's outcome is ignored entirely; the original
    /// success is always kept.
    Ignore,
}

impl<T> Outcome<T> {
    /// Tag a payload as a success.
    #[inline]
    pub fn success(value: T) -> Self {
        Outcome::Success(value)
    }

    /// Tag an error as a failure.
    ///
    /// Accepts anything convertible into a [`Fault`]: any
    /// `std::error::Error + Send + Sync` value, or a `Fault` itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use sidetrack::{Fault, Outcome};
    ///
    /// let from_error = Outcome::<i32>::failure(std::fmt::Error);
    /// let from_fault = Outcome::<i32>::failure(Fault::msg("declined"));
    /// assert!(from_error.is_failure());
    /// assert!(from_fault.is_failure());
    /// ```
    #[inline]
    pub fn failure(error: impl Into<Fault>) -> Self {
        Outcome::Failure(error.into())
    }

    /// Lift a `Result` into an outcome.
    #[inline]
    pub fn from_result<E>(result: Result<T, E>) -> Self
    where
        E: Into<Fault>,
    {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(error) => Outcome::Failure(error.into()),
        }
    }

    /// Convert into a `Result`, the `?`-compatible escape hatch out of the
    /// outcome world.
    #[inline]
    pub fn into_result(self) -> Result<T, Fault> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(fault) => Err(fault),
        }
    }

    /// Whether this outcome carries a payload.
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Whether this outcome carries a fault.
    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    /// Borrow the payload, if any.
    #[inline]
    pub fn as_success(&self) -> Option<&T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    /// Borrow the fault, if any.
    #[inline]
    pub fn as_fault(&self) -> Option<&Fault> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(fault) => Some(fault),
        }
    }

    /// Take the payload, if any.
    #[inline]
    pub fn into_success(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    /// Take the fault, if any.
    #[inline]
    pub fn into_fault(self) -> Option<Fault> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(fault) => Some(fault),
        }
    }

    /// Extract the payload, raising the carried fault as a panic on failure.
    ///
    /// This is the point where the outcome type becomes a removable safety
    /// net: a chain ending in `unwrap` behaves like ordinary
    /// panic-on-error code. Prefer [`into_result`](Outcome::into_result)
    /// where the caller can propagate instead.
    ///
    /// # Panics
    ///
    /// Panics with the fault's message if the outcome is a `Failure`.
    #[inline]
    pub fn unwrap(self) -> T {
        match self {
            Outcome::Success(value) => value,
            Outcome::Failure(fault) => {
                panic!("called `Outcome::unwrap()` on a `Failure` value: {}", fault)
            }
        }
    }

    /// Extract the fault, panicking on success.
    ///
    /// # Panics
    ///
    /// Panics if the outcome is a `Success`.
    #[inline]
    pub fn unwrap_fault(self) -> Fault {
        match self {
            Outcome::Success(_) => panic!("called `Outcome::unwrap_fault()` on a `Success` value"),
            Outcome::Failure(fault) => fault,
        }
    }

    /// Extract the payload or fall back to a default value.
    #[inline]
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Outcome::Success(value) => value,
            Outcome::Failure(_) => default,
        }
    }

    /// Extract the payload or compute a fallback from the fault.
    #[inline]
    pub fn unwrap_or_else<F>(self, f: F) -> T
    where
        F: FnOnce(Fault) -> T,
    {
        match self {
            Outcome::Success(value) => value,
            Outcome::Failure(fault) => f(fault),
        }
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T>
where
    E: Into<Fault>,
{
    fn from(result: Result<T, E>) -> Self {
        Outcome::from_result(result)
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for Outcome<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Outcome::Success(value) => {
                serializer.serialize_newtype_variant("Outcome", 0, "success", value)
            }
            Outcome::Failure(fault) => {
                serializer.serialize_newtype_variant("Outcome", 1, "failure", fault)
            }
        }
    }
}
