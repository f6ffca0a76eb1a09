//! Adapters lifting plain functions into the outcome world
//!
//! These adapters are the single entry point through which panics become
//! [`Fault`]s. Each one invokes a user function; a normal return is wrapped
//! as a success (a void function yields `Outcome<()>`, the placeholder
//! success payload), and an unwinding panic is routed through the supplied
//! [`PanicFilter`]: captured payloads become `Failure`, everything else is
//! re-raised with `std::panic::resume_unwind` and propagates untouched.
//!
//! Functions that already return an [`Outcome`] go through [`from_fn`],
//! which performs no interception at all: such functions are assumed to
//! encode their failures in their return value, so a physical panic from
//! one always propagates.
//!
//! # Examples
//!
//! ```
//! use sidetrack::{capture, Outcome, PanicFilter};
//!
//! fn divide(x: i32) -> i32 {
//!     10 / x
//! }
//!
//! let ok = capture(&PanicFilter::all(), || divide(2));
//! assert_eq!(ok, Outcome::success(5));
//!
//! let caught = capture(&PanicFilter::all(), || divide(0));
//! assert!(caught.is_failure());
//! ```

use std::future::Future;
use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};

use crate::fault::Fault;
use crate::filter::PanicFilter;
use crate::outcome::Outcome;

/// Run `f`, wrapping its return value as a success and routing panics
/// through `filter`.
///
/// The closure runs under `catch_unwind` behind an `AssertUnwindSafe`
/// wrapper; when the filter declines a payload the panic is resumed and
/// unwind safety is restored by the propagation itself.
///
/// # Examples
///
/// ```
/// use sidetrack::{capture, Outcome, PanicFilter};
///
/// let outcome = capture(&PanicFilter::all(), || "parsed".to_string());
/// assert_eq!(outcome, Outcome::success("parsed".to_string()));
///
/// // Void functions yield the placeholder payload.
/// let outcome: Outcome<()> = capture(&PanicFilter::all(), || {});
/// assert!(outcome.is_success());
/// ```
pub fn capture<T, F>(filter: &PanicFilter, f: F) -> Outcome<T>
where
    F: FnOnce() -> T,
{
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Outcome::Success(value),
        Err(payload) => {
            if filter.captures(payload.as_ref()) {
                Outcome::Failure(Fault::from_panic(payload))
            } else {
                resume_unwind(payload)
            }
        }
    }
}

/// Await `future`, wrapping its output as a success and routing panics
/// through `filter`.
///
/// The asynchronous counterpart of [`capture`]: suspension points are
/// exactly those of the wrapped future, and the filter is consulted only
/// if the future's poll unwinds.
///
/// # Examples
///
/// ```
/// use sidetrack::{capture_async, Outcome, PanicFilter};
///
/// # tokio_test::block_on(async {
/// let outcome = capture_async(&PanicFilter::all(), async { 41 + 1 }).await;
/// assert_eq!(outcome, Outcome::success(42));
///
/// let outcome: Outcome<i32> =
///     capture_async(&PanicFilter::all(), async { panic!("late failure") }).await;
/// assert!(outcome.is_failure());
/// # });
/// ```
pub async fn capture_async<T, Fut>(filter: &PanicFilter, future: Fut) -> Outcome<T>
where
    Fut: Future<Output = T>,
{
    use futures::FutureExt;

    match AssertUnwindSafe(future).catch_unwind().await {
        Ok(value) => Outcome::Success(value),
        Err(payload) => {
            if filter.captures(payload.as_ref()) {
                Outcome::Failure(Fault::from_panic(payload))
            } else {
                resume_unwind(payload)
            }
        }
    }
}

/// Invoke a function that already returns an [`Outcome`], with no panic
/// interception.
///
/// # Examples
///
/// ```
/// use sidetrack::{from_fn, Fault, Outcome};
///
/// let outcome = from_fn(|| Outcome::<i32>::failure(Fault::msg("declined")));
/// assert!(outcome.is_failure());
/// ```
pub fn from_fn<T, F>(f: F) -> Outcome<T>
where
    F: FnOnce() -> Outcome<T>,
{
    f()
}
