//! Single-value combinators over [`Outcome`]
//!
//! Every combinator here shares one rule: a `Failure` input passes through
//! unchanged without invoking any supplied function. That short-circuit is
//! what lets a chain be written for the success path only, with the first
//! fault riding the side track past every remaining step.
//!
//! Each combinator has a plain form whose arguments are already
//! outcome-aware, and a `*_capture` convenience form that accepts an
//! ordinary function plus a [`PanicFilter`], composed through
//! [`crate::capture`].

use crate::capture::capture;
use crate::fault::{AssertionError, Fault};
use crate::filter::PanicFilter;

use super::{Outcome, TapMode};

impl<T> Outcome<T> {
    /// Transform the payload with an infallible function.
    ///
    /// # Examples
    ///
    /// ```
    /// use sidetrack::Outcome;
    ///
    /// let outcome = Outcome::success(21).map(|x| x * 2);
    /// assert_eq!(outcome, Outcome::success(42));
    /// ```
    #[inline]
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Failure(fault) => Outcome::Failure(fault),
        }
    }

    /// Chain a dependent computation that itself produces an outcome.
    ///
    /// On `Success(v)` the result is `f(v)`, whatever its state; on
    /// `Failure` the fault passes through and `f` is never invoked. A panic
    /// inside `f` is not intercepted; use
    /// [`and_then_capture`](Outcome::and_then_capture) for that.
    ///
    /// # Examples
    ///
    /// ```
    /// use sidetrack::{Fault, Outcome};
    ///
    /// fn checked_half(x: i32) -> Outcome<i32> {
    ///     if x % 2 == 0 {
    ///         Outcome::success(x / 2)
    ///     } else {
    ///         Outcome::failure(Fault::msg("odd input"))
    ///     }
    /// }
    ///
    /// assert_eq!(Outcome::success(42).and_then(checked_half), Outcome::success(21));
    /// assert!(Outcome::success(3).and_then(checked_half).is_failure());
    /// ```
    #[inline]
    pub fn and_then<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Outcome<U>,
    {
        match self {
            Outcome::Success(value) => f(value),
            Outcome::Failure(fault) => Outcome::Failure(fault),
        }
    }

    /// Chain an ordinary value-returning function, capturing its panics
    /// through `filter`.
    ///
    /// Panics the filter declines are re-raised and bypass the outcome
    /// channel entirely.
    ///
    /// # Examples
    ///
    /// ```
    /// use sidetrack::{Outcome, PanicFilter};
    ///
    /// let outcome = Outcome::success(0)
    ///     .and_then_capture(&PanicFilter::all(), |x| 10 / x);
    /// assert!(outcome.is_failure());
    /// ```
    pub fn and_then_capture<U, F>(self, filter: &PanicFilter, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        self.and_then(|value| capture(filter, || f(value)))
    }

    /// Run a side computation against the payload, folding its outcome back
    /// per `mode`.
    ///
    /// With [`TapMode::Propagate`], a failing side computation replaces the
    /// outcome with its fault, while a succeeding one is discarded and the
    /// original success kept. With [`TapMode::Ignore`] the original success
    /// is kept no matter what the side computation produced.
    ///
    /// # Examples
    ///
    /// ```
    /// use sidetrack::{Fault, Outcome, TapMode};
    ///
    /// let audit = |x: &i32| -> Outcome<()> {
    ///     if *x < 100 {
    ///         Outcome::success(())
    ///     } else {
    ///         Outcome::failure(Fault::msg("too large to record"))
    ///     }
    /// };
    ///
    /// assert_eq!(Outcome::success(5).tap(TapMode::Propagate, audit), Outcome::success(5));
    /// assert!(Outcome::success(500).tap(TapMode::Propagate, audit).is_failure());
    /// assert_eq!(Outcome::success(500).tap(TapMode::Ignore, audit), Outcome::success(500));
    /// ```
    pub fn tap<U, F>(self, mode: TapMode, f: F) -> Outcome<T>
    where
        F: FnOnce(&T) -> Outcome<U>,
    {
        match self {
            Outcome::Success(value) => match (mode, f(&value)) {
                (TapMode::Propagate, Outcome::Failure(fault)) => Outcome::Failure(fault),
                _ => Outcome::Success(value),
            },
            Outcome::Failure(fault) => Outcome::Failure(fault),
        }
    }

    /// Run an ordinary void side function, capturing its panics through
    /// `filter` and folding per `mode`.
    pub fn tap_capture<F>(self, mode: TapMode, filter: &PanicFilter, f: F) -> Outcome<T>
    where
        F: FnOnce(&T),
    {
        self.tap(mode, |value| capture(filter, || f(value)))
    }

    /// Check the payload against a fallible predicate, failing with an
    /// [`AssertionError`] when it returns `false`.
    ///
    /// A predicate that itself fails passes its fault through; the
    /// assertion error is produced only for an explicit `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sidetrack::Outcome;
    ///
    /// let outcome = Outcome::success(-5)
    ///     .ensure(|x| Outcome::success(*x > 0), "must be positive");
    /// assert_eq!(outcome.unwrap_fault().message(), "must be positive");
    /// ```
    pub fn ensure<P>(self, predicate: P, message: impl Into<String>) -> Outcome<T>
    where
        P: FnOnce(&T) -> Outcome<bool>,
    {
        match self {
            Outcome::Success(value) => match predicate(&value) {
                Outcome::Success(true) => Outcome::Success(value),
                Outcome::Success(false) => Outcome::failure(AssertionError::new(message)),
                Outcome::Failure(fault) => Outcome::Failure(fault),
            },
            Outcome::Failure(fault) => Outcome::Failure(fault),
        }
    }

    /// Check the payload against a plain predicate.
    ///
    /// # Examples
    ///
    /// ```
    /// use sidetrack::Outcome;
    ///
    /// assert!(Outcome::success(5).ensure_that(|x| *x > 0, "must be positive").is_success());
    /// assert!(Outcome::success(-5).ensure_that(|x| *x > 0, "must be positive").is_failure());
    /// ```
    pub fn ensure_that<P>(self, predicate: P, message: impl Into<String>) -> Outcome<T>
    where
        P: FnOnce(&T) -> bool,
    {
        self.ensure(|value| Outcome::Success(predicate(value)), message)
    }

    /// Check the payload against an ordinary predicate whose panics are
    /// captured through `filter`.
    pub fn ensure_capture<P>(
        self,
        filter: &PanicFilter,
        predicate: P,
        message: impl Into<String>,
    ) -> Outcome<T>
    where
        P: FnOnce(&T) -> bool,
    {
        self.ensure(|value| capture(filter, || predicate(value)), message)
    }

    /// Route the payload into one of two outcome-producing branches.
    ///
    /// The predicate picks the branch; a failing predicate passes its fault
    /// through and neither branch runs. The result is whatever the chosen
    /// branch produces.
    ///
    /// # Examples
    ///
    /// ```
    /// use sidetrack::Outcome;
    ///
    /// let outcome = Outcome::success(7).branch(
    ///     |x| Outcome::success(*x % 2 == 0),
    ///     |x| Outcome::success(x / 2),
    ///     |x| Outcome::success(3 * x + 1),
    /// );
    /// assert_eq!(outcome, Outcome::success(22));
    /// ```
    pub fn branch<U, P, FT, FF>(self, predicate: P, on_true: FT, on_false: FF) -> Outcome<U>
    where
        P: FnOnce(&T) -> Outcome<bool>,
        FT: FnOnce(T) -> Outcome<U>,
        FF: FnOnce(T) -> Outcome<U>,
    {
        match self {
            Outcome::Success(value) => match predicate(&value) {
                Outcome::Success(true) => on_true(value),
                Outcome::Success(false) => on_false(value),
                Outcome::Failure(fault) => Outcome::Failure(fault),
            },
            Outcome::Failure(fault) => Outcome::Failure(fault),
        }
    }

    /// Route the payload on a plain predicate.
    pub fn branch_that<U, P, FT, FF>(self, predicate: P, on_true: FT, on_false: FF) -> Outcome<U>
    where
        P: FnOnce(&T) -> bool,
        FT: FnOnce(T) -> Outcome<U>,
        FF: FnOnce(T) -> Outcome<U>,
    {
        self.branch(
            |value| Outcome::Success(predicate(value)),
            on_true,
            on_false,
        )
    }

    /// Consume the outcome with one handler per state, exiting the outcome
    /// world.
    ///
    /// # Examples
    ///
    /// ```
    /// use sidetrack::{Fault, Outcome};
    ///
    /// let summary = Outcome::success(3).fold(
    ///     |x| format!("got {}", x),
    ///     |fault| format!("failed: {}", fault),
    /// );
    /// assert_eq!(summary, "got 3");
    ///
    /// let summary = Outcome::<i32>::failure(Fault::msg("offline")).fold(
    ///     |x| format!("got {}", x),
    ///     |fault| format!("failed: {}", fault),
    /// );
    /// assert_eq!(summary, "failed: offline");
    /// ```
    #[inline]
    pub fn fold<R, FS, FF>(self, on_success: FS, on_failure: FF) -> R
    where
        FS: FnOnce(T) -> R,
        FF: FnOnce(Fault) -> R,
    {
        match self {
            Outcome::Success(value) => on_success(value),
            Outcome::Failure(fault) => on_failure(fault),
        }
    }

    /// Remap the fault of a failure; successes pass through untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use sidetrack::{Fault, Outcome};
    ///
    /// let outcome = Outcome::<i32>::failure(Fault::msg("raw"))
    ///     .map_fault(|fault| Fault::msg(format!("wrapped: {}", fault)));
    /// assert_eq!(outcome.unwrap_fault().message(), "wrapped: raw");
    /// ```
    #[inline]
    pub fn map_fault<F, N>(self, f: F) -> Outcome<T>
    where
        F: FnOnce(Fault) -> N,
        N: Into<Fault>,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(fault) => Outcome::Failure(f(fault).into()),
        }
    }
}

impl<T> Outcome<Option<T>> {
    /// Assert the payload is present, unwrapping it on success.
    ///
    /// An absent payload fails with the default presence
    /// [`AssertionError`]; a failure input passes through unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use sidetrack::Outcome;
    ///
    /// assert_eq!(Outcome::success(Some(5)).ensure_some(), Outcome::success(5));
    /// assert!(Outcome::<Option<i32>>::success(None).ensure_some().is_failure());
    /// ```
    pub fn ensure_some(self) -> Outcome<T> {
        match self {
            Outcome::Success(Some(value)) => Outcome::Success(value),
            Outcome::Success(None) => {
                Outcome::failure(AssertionError::new("expected a value to be present"))
            }
            Outcome::Failure(fault) => Outcome::Failure(fault),
        }
    }
}
