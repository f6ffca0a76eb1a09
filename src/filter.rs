//! Capture policies deciding which panics become faults
//!
//! A [`PanicFilter`] is a pure predicate over a panic payload. The adapters
//! in [`crate::capture`] consult it once per unwinding panic: a matched
//! payload is converted into a [`Fault`](crate::Fault), an unmatched one is
//! re-raised with `std::panic::resume_unwind` and propagates exactly like an
//! ordinary uncaught panic.
//!
//! Three canonical policies cover most call sites:
//!
//! ```
//! use sidetrack::PanicFilter;
//!
//! let everything = PanicFilter::all();
//! let nothing = PanicFilter::none();
//! let only_strings = PanicFilter::only::<String>();
//!
//! assert!(everything.captures(&"boom"));
//! assert!(!nothing.captures(&"boom"));
//! assert!(only_strings.captures(&"boom".to_string()));
//! assert!(!only_strings.captures(&42i32));
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A policy deciding whether a panic payload is captured as a fault.
///
/// Filters are cheap to clone and never unwind themselves. Rust has no
/// error-type inheritance, so [`PanicFilter::only`] matches the payload's
/// exact type; broader families are expressed with [`PanicFilter::new`].
#[derive(Clone)]
pub struct PanicFilter {
    predicate: Arc<dyn Fn(&(dyn Any + Send)) -> bool + Send + Sync>,
}

impl PanicFilter {
    /// A filter built from an arbitrary predicate over the panic payload.
    ///
    /// # Examples
    ///
    /// ```
    /// use sidetrack::PanicFilter;
    ///
    /// let short_messages = PanicFilter::new(|payload| {
    ///     payload
    ///         .downcast_ref::<String>()
    ///         .map(|text| text.len() < 10)
    ///         .unwrap_or(false)
    /// });
    /// assert!(short_messages.captures(&"short".to_string()));
    /// assert!(!short_messages.captures(&"a very long message".to_string()));
    /// ```
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&(dyn Any + Send)) -> bool + Send + Sync + 'static,
    {
        PanicFilter {
            predicate: Arc::new(predicate),
        }
    }

    /// Capture every panic.
    pub fn all() -> Self {
        PanicFilter::new(|_| true)
    }

    /// Capture no panic; everything re-raises.
    pub fn none() -> Self {
        PanicFilter::new(|_| false)
    }

    /// Capture only panics whose payload is of type `K`.
    ///
    /// Payloads of type `K` are raised with `std::panic::panic_any`; plain
    /// `panic!("...")` raises `&str` or `String` payloads.
    pub fn only<K: Any>() -> Self {
        PanicFilter::new(|payload| payload.is::<K>())
    }

    /// Apply the policy to a payload.
    #[inline]
    pub fn captures(&self, payload: &(dyn Any + Send)) -> bool {
        (self.predicate)(payload)
    }
}

impl Default for PanicFilter {
    /// The capture-all policy.
    fn default() -> Self {
        PanicFilter::all()
    }
}

impl fmt::Debug for PanicFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanicFilter").finish_non_exhaustive()
    }
}
