//! # Sidetrack
//!
//! > *Failures take the side track; the main line keeps moving.*
//!
//! A Rust library for railway-oriented programming: a two-state
//! [`Outcome`] value plus a combinator algebra for chaining synchronous and
//! asynchronous computations without error plumbing at every step. The
//! first failure in a chain is shunted onto the side track and carried past
//! every remaining step, unchanged, until something terminal inspects it.
//!
//! ## Quick Example
//!
//! ```rust
//! use sidetrack::{capture, Outcome, PanicFilter};
//!
//! fn parse_port(raw: &str) -> Outcome<u16> {
//!     capture(&PanicFilter::all(), || raw.trim().to_string())
//!         .and_then(|text| Outcome::from_result(text.parse::<u16>()))
//!         .ensure_that(|port| *port >= 1024, "reserved port")
//! }
//!
//! assert_eq!(parse_port(" 8080 "), Outcome::success(8080));
//! assert!(parse_port("22").is_failure());
//! assert!(parse_port("not a port").is_failure());
//! ```
//!
//! ## The three layers
//!
//! - **Capture** ([`capture()`]): adapters that run ordinary functions and
//!   decide, through a [`PanicFilter`], which panics become [`Fault`]s and
//!   which propagate untouched.
//! - **Chain** ([`Outcome`], [`PendingOutcomeExt`]): the single-value
//!   algebra (`and_then`, `tap`, `ensure`, `branch`, `fold`, `map_fault`)
//!   in synchronous and asynchronous forms.
//! - **Fan out** ([`OutcomeIterExt`], [`parallel`]): the same algebra lifted
//!   over collections of independently pending outcomes, with
//!   order-preserving fan-in and aggregate failure reporting.
//!
//! For asynchronous collections, see [`await_all`], [`await_any`],
//! [`outcome_stream`] and [`sequence_all`].

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod capture;
pub mod fault;
pub mod filter;
pub mod outcome;
pub mod parallel;
pub mod pending;
pub mod testing;
#[cfg(feature = "tracing")]
pub mod trace;
pub mod traverse;

// Re-exports
pub use capture::{capture, capture_async, from_fn};
pub use fault::{AggregateFault, AssertionError, Fault};
pub use filter::PanicFilter;
pub use outcome::{Outcome, TapMode};
pub use parallel::{
    await_all, await_any, outcome_stream, sequence_all, PendingIterExt,
};
pub use pending::PendingOutcomeExt;
pub use traverse::OutcomeIterExt;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::capture::{capture, capture_async, from_fn};
    pub use crate::fault::{AggregateFault, AssertionError, Fault};
    pub use crate::filter::PanicFilter;
    pub use crate::outcome::{Outcome, TapMode};
    pub use crate::parallel::{
        await_all, await_any, outcome_stream, sequence_all, PendingIterExt,
    };
    pub use crate::pending::PendingOutcomeExt;
    pub use crate::traverse::OutcomeIterExt;
}
