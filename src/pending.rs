//! Combinators over pending outcomes
//!
//! A *pending outcome* is any `Future` whose output is an
//! [`Outcome<T>`](crate::Outcome). [`PendingOutcomeExt`] is blanket-implemented
//! for all of them and mirrors the synchronous combinator algebra: each
//! method awaits the pending outcome exactly once, applies the same logic as
//! its [`Outcome`] counterpart, and introduces no extra suspension points or
//! concurrency of its own.
//!
//! The `*_async` variants accept step functions that are themselves
//! asynchronous; they too suspend only where the supplied computation does.
//!
//! # Examples
//!
//! ```
//! use sidetrack::{Outcome, PendingOutcomeExt};
//!
//! # tokio_test::block_on(async {
//! let outcome = async { Outcome::success(21) }
//!     .and_then(|x| Outcome::success(x * 2))
//!     .ensure_that(|x| *x > 0, "must be positive")
//!     .await;
//! assert_eq!(outcome, Outcome::success(42));
//! # });
//! ```

use std::future::Future;

use crate::capture::capture;
use crate::fault::Fault;
use crate::filter::PanicFilter;
use crate::outcome::{Outcome, TapMode};

/// Extension trait mirroring the [`Outcome`] combinators on any
/// `Future<Output = Outcome<T>>`.
///
/// Implemented for every such future; each combinator returns a future that
/// can be chained further or awaited directly.
#[allow(async_fn_in_trait)]
pub trait PendingOutcomeExt<T>: Future<Output = Outcome<T>> + Sized {
    /// Await, then chain a dependent outcome-producing computation.
    ///
    /// # Examples
    ///
    /// ```
    /// use sidetrack::{Outcome, PendingOutcomeExt};
    ///
    /// # tokio_test::block_on(async {
    /// let outcome = async { Outcome::success(4) }
    ///     .and_then(|x| Outcome::success(x * 10))
    ///     .await;
    /// assert_eq!(outcome, Outcome::success(40));
    /// # });
    /// ```
    async fn and_then<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Outcome<U>,
    {
        self.await.and_then(f)
    }

    /// Await, then chain an asynchronous outcome-producing computation.
    ///
    /// The step future runs only for a success input.
    async fn and_then_async<U, F, Fut>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = Outcome<U>>,
    {
        match self.await {
            Outcome::Success(value) => f(value).await,
            Outcome::Failure(fault) => Outcome::Failure(fault),
        }
    }

    /// Await, then chain an ordinary value-returning function with its
    /// panics routed through `filter`.
    async fn and_then_capture<U, F>(self, filter: &PanicFilter, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        self.await.and_then_capture(filter, f)
    }

    /// Await, then run a side computation folded back per `mode`.
    async fn tap<U, F>(self, mode: TapMode, f: F) -> Outcome<T>
    where
        F: FnOnce(&T) -> Outcome<U>,
    {
        self.await.tap(mode, f)
    }

    /// Await, then run an asynchronous side computation folded back per
    /// `mode`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sidetrack::{Fault, Outcome, PendingOutcomeExt, TapMode};
    ///
    /// # tokio_test::block_on(async {
    /// let outcome = async { Outcome::success(5) }
    ///     .tap_async(TapMode::Ignore, |_| async {
    ///         Outcome::<()>::failure(Fault::msg("recording failed"))
    ///     })
    ///     .await;
    /// assert_eq!(outcome, Outcome::success(5));
    /// # });
    /// ```
    async fn tap_async<U, F, Fut>(self, mode: TapMode, f: F) -> Outcome<T>
    where
        F: FnOnce(&T) -> Fut,
        Fut: Future<Output = Outcome<U>>,
    {
        match self.await {
            Outcome::Success(value) => match (mode, f(&value).await) {
                (TapMode::Propagate, Outcome::Failure(fault)) => Outcome::Failure(fault),
                _ => Outcome::Success(value),
            },
            Outcome::Failure(fault) => Outcome::Failure(fault),
        }
    }

    /// Await, then run an ordinary void side function with its panics routed
    /// through `filter`.
    async fn tap_capture<F>(self, mode: TapMode, filter: &PanicFilter, f: F) -> Outcome<T>
    where
        F: FnOnce(&T),
    {
        self.await.tap_capture(mode, filter, f)
    }

    /// Await, then check the payload against a fallible predicate.
    async fn ensure<P>(self, predicate: P, message: impl Into<String>) -> Outcome<T>
    where
        P: FnOnce(&T) -> Outcome<bool>,
    {
        self.await.ensure(predicate, message)
    }

    /// Await, then check the payload against a plain predicate.
    async fn ensure_that<P>(self, predicate: P, message: impl Into<String>) -> Outcome<T>
    where
        P: FnOnce(&T) -> bool,
    {
        self.await.ensure_that(predicate, message)
    }

    /// Await, then check the payload against an asynchronous fallible
    /// predicate.
    async fn ensure_async<P, Fut>(self, predicate: P, message: impl Into<String>) -> Outcome<T>
    where
        P: FnOnce(&T) -> Fut,
        Fut: Future<Output = Outcome<bool>>,
    {
        match self.await {
            Outcome::Success(value) => match predicate(&value).await {
                Outcome::Success(true) => Outcome::Success(value),
                Outcome::Success(false) => {
                    Outcome::failure(crate::fault::AssertionError::new(message))
                }
                Outcome::Failure(fault) => Outcome::Failure(fault),
            },
            Outcome::Failure(fault) => Outcome::Failure(fault),
        }
    }

    /// Await, then check an ordinary predicate with its panics routed
    /// through `filter`.
    async fn ensure_capture<P>(
        self,
        filter: &PanicFilter,
        predicate: P,
        message: impl Into<String>,
    ) -> Outcome<T>
    where
        P: FnOnce(&T) -> bool,
    {
        let outcome = self.await;
        outcome.ensure(|value| capture(filter, || predicate(value)), message)
    }

    /// Await, then route the payload into one of two outcome-producing
    /// branches.
    async fn branch<U, P, FT, FF>(self, predicate: P, on_true: FT, on_false: FF) -> Outcome<U>
    where
        P: FnOnce(&T) -> Outcome<bool>,
        FT: FnOnce(T) -> Outcome<U>,
        FF: FnOnce(T) -> Outcome<U>,
    {
        self.await.branch(predicate, on_true, on_false)
    }

    /// Await, then route the payload into one of two asynchronous branches.
    async fn branch_async<U, P, FT, FF, FutT, FutF>(
        self,
        predicate: P,
        on_true: FT,
        on_false: FF,
    ) -> Outcome<U>
    where
        P: FnOnce(&T) -> Outcome<bool>,
        FT: FnOnce(T) -> FutT,
        FF: FnOnce(T) -> FutF,
        FutT: Future<Output = Outcome<U>>,
        FutF: Future<Output = Outcome<U>>,
    {
        match self.await {
            Outcome::Success(value) => match predicate(&value) {
                Outcome::Success(true) => on_true(value).await,
                Outcome::Success(false) => on_false(value).await,
                Outcome::Failure(fault) => Outcome::Failure(fault),
            },
            Outcome::Failure(fault) => Outcome::Failure(fault),
        }
    }

    /// Await, then consume the outcome with one handler per state.
    async fn fold<R, FS, FF>(self, on_success: FS, on_failure: FF) -> R
    where
        FS: FnOnce(T) -> R,
        FF: FnOnce(Fault) -> R,
    {
        self.await.fold(on_success, on_failure)
    }

    /// Await, then consume the outcome with asynchronous handlers.
    async fn fold_async<R, FS, FF, FutS, FutF>(self, on_success: FS, on_failure: FF) -> R
    where
        FS: FnOnce(T) -> FutS,
        FF: FnOnce(Fault) -> FutF,
        FutS: Future<Output = R>,
        FutF: Future<Output = R>,
    {
        match self.await {
            Outcome::Success(value) => on_success(value).await,
            Outcome::Failure(fault) => on_failure(fault).await,
        }
    }

    /// Await, then remap the fault of a failure.
    async fn map_fault<F, N>(self, f: F) -> Outcome<T>
    where
        F: FnOnce(Fault) -> N,
        N: Into<Fault>,
    {
        self.await.map_fault(f)
    }
}

impl<T, Fut> PendingOutcomeExt<T> for Fut where Fut: Future<Output = Outcome<T>> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fault::AssertionError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn ready(value: i32) -> impl Future<Output = Outcome<i32>> {
        async move { Outcome::success(value) }
    }

    fn failed() -> impl Future<Output = Outcome<i32>> {
        async { Outcome::failure(Fault::msg("pending failure")) }
    }

    #[tokio::test]
    async fn combinators_chain_without_awaiting_in_between() {
        let outcome = ready(3)
            .and_then(|x| Outcome::success(x + 1))
            .ensure_that(|x| *x == 4, "arithmetic drifted")
            .tap(TapMode::Ignore, |_| Outcome::success(()))
            .await;
        assert_eq!(outcome, Outcome::success(4));
    }

    #[tokio::test]
    async fn failure_short_circuits_across_await_points() {
        let calls = AtomicUsize::new(0);
        let outcome = failed()
            .and_then_async(|x| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move { Outcome::success(x) }
            })
            .await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(outcome.unwrap_fault(), Fault::msg("pending failure"));
    }

    #[tokio::test]
    async fn and_then_async_awaits_the_step() {
        let outcome = ready(4).and_then_async(|x| async move { Outcome::success(x * 10) }).await;
        assert_eq!(outcome, Outcome::success(40));
    }

    #[tokio::test]
    async fn and_then_capture_captures_async_step_panics() {
        let outcome = ready(0)
            .and_then_capture(&PanicFilter::all(), |x| 10 / x)
            .await;
        assert_eq!(outcome.unwrap_fault().kind(), "panic");
    }

    #[tokio::test]
    async fn tap_async_folds_per_mode() {
        let outcome = ready(5)
            .tap_async(TapMode::Propagate, |_| async {
                Outcome::<()>::failure(Fault::msg("side"))
            })
            .await;
        assert_eq!(outcome.unwrap_fault(), Fault::msg("side"));

        let outcome = ready(5)
            .tap_async(TapMode::Ignore, |_| async {
                Outcome::<()>::failure(Fault::msg("side"))
            })
            .await;
        assert_eq!(outcome, Outcome::success(5));
    }

    #[tokio::test]
    async fn ensure_async_produces_assertion_errors() {
        let outcome = ready(-5)
            .ensure_async(|x| {
                let positive = *x > 0;
                async move { Outcome::success(positive) }
            }, "must be positive")
            .await;
        let fault = outcome.unwrap_fault();
        assert!(fault.is::<AssertionError>());
        assert_eq!(fault.message(), "must be positive");
    }

    #[tokio::test]
    async fn branch_async_picks_a_side() {
        let outcome = ready(7)
            .branch_async(
                |x| Outcome::success(*x % 2 == 0),
                |x| async move { Outcome::success(x / 2) },
                |x| async move { Outcome::success(3 * x + 1) },
            )
            .await;
        assert_eq!(outcome, Outcome::success(22));
    }

    #[tokio::test]
    async fn fold_async_exits_the_outcome_world() {
        let report = failed()
            .fold_async(
                |x| async move { format!("got {}", x) },
                |fault| async move { format!("failed: {}", fault) },
            )
            .await;
        assert_eq!(report, "failed: pending failure");
    }

    #[tokio::test]
    async fn map_fault_remaps_pending_failures() {
        let outcome = failed().map_fault(|_| Fault::msg("remapped")).await;
        assert_eq!(outcome.unwrap_fault(), Fault::msg("remapped"));
    }
}
