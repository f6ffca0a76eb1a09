//! Collection algebra over materialized outcomes
//!
//! [`OutcomeIterExt`] lifts the single-value algebra over any collection of
//! [`Outcome`]s: batch reducers, order-preserving extraction, and the
//! per-element `*_each` family. Every operation preserves input order, and
//! every `*_each` output depends only on the element at the same position.
//!
//! # Examples
//!
//! ```
//! use sidetrack::{Fault, Outcome, OutcomeIterExt};
//!
//! let outcomes = vec![
//!     Outcome::<i32>::failure(Fault::msg("first")),
//!     Outcome::success(5),
//!     Outcome::<i32>::failure(Fault::msg("second")),
//! ];
//!
//! let values: Vec<_> = outcomes.clone().successes().collect();
//! assert_eq!(values, vec![5]);
//!
//! let messages: Vec<_> = outcomes
//!     .faults()
//!     .map(|fault| fault.message().to_string())
//!     .collect();
//! assert_eq!(messages, vec!["first", "second"]);
//! ```

use crate::fault::{AggregateFault, Fault};
use crate::outcome::{Outcome, TapMode};

/// Extension trait lifting the outcome algebra over collections.
///
/// Implemented for every `IntoIterator` of outcomes. The reducers consume
/// the collection; the extraction and `*_each` methods return lazy,
/// single-pass, order-preserving iterators.
pub trait OutcomeIterExt<T>: IntoIterator<Item = Outcome<T>> + Sized {
    /// Whether every element succeeded. Vacuously true for empty input.
    fn all_succeeded(self) -> bool {
        self.into_iter().all(|outcome| outcome.is_success())
    }

    /// Whether at least one element succeeded. False for empty input.
    fn any_succeeded(self) -> bool {
        self.into_iter().any(|outcome| outcome.is_success())
    }

    /// Whether every element failed. Vacuously true for empty input.
    fn all_failed(self) -> bool {
        self.into_iter().all(|outcome| outcome.is_failure())
    }

    /// Whether at least one element failed. False for empty input.
    fn any_failed(self) -> bool {
        self.into_iter().any(|outcome| outcome.is_failure())
    }

    /// The success payloads in input order, skipping failures.
    fn successes(self) -> impl Iterator<Item = T> {
        self.into_iter().filter_map(Outcome::into_success)
    }

    /// The faults in input order, skipping successes.
    fn faults(self) -> impl Iterator<Item = Fault> {
        self.into_iter().filter_map(Outcome::into_fault)
    }

    /// Extract every payload, or aggregate every fault.
    ///
    /// Returns the ordered payloads when all elements succeeded (an empty
    /// input yields an empty vector), otherwise an [`AggregateFault`]
    /// holding one entry per failing element, in input order.
    ///
    /// # Examples
    ///
    /// ```
    /// use sidetrack::{Fault, Outcome, OutcomeIterExt};
    ///
    /// let all_good = vec![Outcome::success(1), Outcome::success(2)];
    /// assert_eq!(all_good.sequence().unwrap(), vec![1, 2]);
    ///
    /// let mixed = vec![
    ///     Outcome::success(1),
    ///     Outcome::<i32>::failure(Fault::msg("a")),
    ///     Outcome::<i32>::failure(Fault::msg("b")),
    /// ];
    /// let aggregate = mixed.sequence().unwrap_err();
    /// assert_eq!(aggregate.len(), 2);
    /// ```
    fn sequence(self) -> Result<Vec<T>, AggregateFault> {
        let mut values = Vec::new();
        let mut faults = Vec::new();

        for outcome in self {
            match outcome {
                Outcome::Success(value) => values.push(value),
                Outcome::Failure(fault) => faults.push(fault),
            }
        }

        if faults.is_empty() {
            Ok(values)
        } else {
            Err(AggregateFault::new(faults))
        }
    }

    /// Chain a dependent computation independently onto every element.
    fn and_then_each<U, F>(self, mut f: F) -> impl Iterator<Item = Outcome<U>>
    where
        F: FnMut(T) -> Outcome<U>,
    {
        self.into_iter().map(move |outcome| outcome.and_then(&mut f))
    }

    /// Run a side computation independently against every element.
    fn tap_each<U, F>(self, mode: TapMode, mut f: F) -> impl Iterator<Item = Outcome<T>>
    where
        F: FnMut(&T) -> Outcome<U>,
    {
        self.into_iter().map(move |outcome| outcome.tap(mode, &mut f))
    }

    /// Check every element's payload against a plain predicate.
    fn ensure_each<P>(
        self,
        mut predicate: P,
        message: impl Into<String>,
    ) -> impl Iterator<Item = Outcome<T>>
    where
        P: FnMut(&T) -> bool,
    {
        let message = message.into();
        self.into_iter()
            .map(move |outcome| outcome.ensure_that(&mut predicate, message.clone()))
    }

    /// Route every element's payload through one of two branches.
    fn branch_each<U, P, FT, FF>(
        self,
        mut predicate: P,
        mut on_true: FT,
        mut on_false: FF,
    ) -> impl Iterator<Item = Outcome<U>>
    where
        P: FnMut(&T) -> Outcome<bool>,
        FT: FnMut(T) -> Outcome<U>,
        FF: FnMut(T) -> Outcome<U>,
    {
        self.into_iter()
            .map(move |outcome| outcome.branch(&mut predicate, &mut on_true, &mut on_false))
    }

    /// Consume every element with one handler per state.
    fn fold_each<R, FS, FF>(self, mut on_success: FS, mut on_failure: FF) -> impl Iterator<Item = R>
    where
        FS: FnMut(T) -> R,
        FF: FnMut(Fault) -> R,
    {
        self.into_iter()
            .map(move |outcome| outcome.fold(&mut on_success, &mut on_failure))
    }
}

impl<T, I> OutcomeIterExt<T> for I where I: IntoIterator<Item = Outcome<T>> {}
