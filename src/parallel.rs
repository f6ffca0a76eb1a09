//! Fan-in and fan-out over independently pending outcomes
//!
//! Each element of the input is an independent unit of asynchronous work.
//! The functions here start or continue every element's work without adding
//! synchronization between them: elements never communicate, and the
//! combinator layer holds no locks or queues.
//!
//! Ordering guarantee: every operation except [`await_any`] preserves input
//! order: `output[i]` corresponds to `input[i]` regardless of relative
//! completion time. [`await_any`] deliberately returns the first finisher
//! without positional meaning.
//!
//! Panics are never intercepted at this level: a panicking element unwinds
//! out of whichever call polls it, exactly like an ordinary uncaught panic.
//! Route element work through [`crate::capture`] first when panics should
//! ride the failure track instead.
//!
//! # Examples
//!
//! ```
//! use sidetrack::{await_all, Fault, Outcome};
//!
//! # tokio_test::block_on(async {
//! let pending = [
//!     Outcome::success(1),
//!     Outcome::<i32>::failure(Fault::msg("backend down")),
//! ]
//! .map(|outcome| async move { outcome });
//!
//! let outcomes = await_all(pending).await;
//! assert!(outcomes[0].is_success());
//! assert!(outcomes[1].is_failure());
//! # });
//! ```

use std::future::Future;

use futures::future::{join_all, select_all};
use futures::stream::FuturesOrdered;
use futures::Stream;

use crate::fault::{AggregateFault, Fault};
use crate::outcome::{Outcome, TapMode};
use crate::traverse::OutcomeIterExt;

/// Await every element, returning all outcomes in input order.
///
/// All elements are in flight concurrently; the result has the same length
/// and order as the input whatever the completion order.
pub async fn await_all<T, F, I>(pending: I) -> Vec<Outcome<T>>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Outcome<T>>,
{
    join_all(pending).await
}

/// Return the first element to finish, success or failure.
///
/// The remaining elements are dropped without being awaited; the combinator
/// neither waits for nor cancels their underlying work beyond that drop.
///
/// # Panics
///
/// Panics if `pending` is empty.
pub async fn await_any<T, F, I>(pending: I) -> Outcome<T>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Outcome<T>>,
{
    let pending: Vec<_> = pending.into_iter().map(|future| Box::pin(future)).collect();
    if pending.is_empty() {
        panic!("await_any called with no pending outcomes");
    }

    let (outcome, _index, _remaining) = select_all(pending).await;
    outcome
}

/// Re-expose the elements as a pull-based stream.
///
/// Every element is in flight while the stream is polled; items are yielded
/// in input order as they complete.
///
/// # Examples
///
/// ```
/// use futures::StreamExt;
/// use sidetrack::{outcome_stream, Outcome};
///
/// # tokio_test::block_on(async {
/// let pending = [1, 2].map(|x| async move { Outcome::success(x) });
/// let outcomes: Vec<_> = outcome_stream(pending).collect().await;
/// assert_eq!(outcomes, vec![Outcome::success(1), Outcome::success(2)]);
/// # });
/// ```
pub fn outcome_stream<T, F, I>(pending: I) -> impl Stream<Item = Outcome<T>>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Outcome<T>>,
{
    pending.into_iter().collect::<FuturesOrdered<F>>()
}

/// Await every element and extract every payload, or aggregate every fault.
///
/// The asynchronous counterpart of
/// [`OutcomeIterExt::sequence`](crate::traverse::OutcomeIterExt::sequence):
/// ordered payloads when all elements succeed (empty input yields an empty
/// vector), otherwise an [`AggregateFault`] with one entry per failing
/// element in input order.
pub async fn sequence_all<T, F, I>(pending: I) -> Result<Vec<T>, AggregateFault>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Outcome<T>>,
{
    await_all(pending).await.sequence()
}

/// Await every element; whether all succeeded. Vacuously true for empty
/// input.
pub async fn all_succeeded<T, F, I>(pending: I) -> bool
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Outcome<T>>,
{
    await_all(pending).await.all_succeeded()
}

/// Await every element; whether at least one succeeded. False for empty
/// input.
pub async fn any_succeeded<T, F, I>(pending: I) -> bool
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Outcome<T>>,
{
    await_all(pending).await.any_succeeded()
}

/// Await every element; whether all failed. Vacuously true for empty input.
pub async fn all_failed<T, F, I>(pending: I) -> bool
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Outcome<T>>,
{
    await_all(pending).await.all_failed()
}

/// Await every element; whether at least one failed. False for empty input.
pub async fn any_failed<T, F, I>(pending: I) -> bool
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Outcome<T>>,
{
    await_all(pending).await.any_failed()
}

/// Per-element combinators over collections of pending outcomes.
///
/// Each method wraps every element's future independently, producing a lazy,
/// same-length, order-preserving collection of new futures; `output[i]`
/// depends only on `input[i]`. The step functions must be `Clone` so each
/// element gets its own copy.
pub trait PendingIterExt<T, F>: IntoIterator<Item = F> + Sized
where
    F: Future<Output = Outcome<T>>,
{
    /// Chain a dependent computation independently onto every element.
    ///
    /// # Examples
    ///
    /// ```
    /// use sidetrack::{await_all, Outcome, PendingIterExt};
    ///
    /// # tokio_test::block_on(async {
    /// let pending = [1, 2].map(|x| async move { Outcome::success(x) });
    /// let doubled = pending.and_then_each(|x| Outcome::success(x * 2));
    /// let outcomes = await_all(doubled).await;
    /// assert_eq!(outcomes, vec![Outcome::success(2), Outcome::success(4)]);
    /// # });
    /// ```
    fn and_then_each<U, G>(self, f: G) -> impl Iterator<Item = impl Future<Output = Outcome<U>>>
    where
        G: FnOnce(T) -> Outcome<U> + Clone,
    {
        self.into_iter().map(move |pending| {
            let f = f.clone();
            async move { pending.await.and_then(f) }
        })
    }

    /// Chain an asynchronous dependent computation independently onto every
    /// element.
    fn and_then_each_async<U, G, Fut>(
        self,
        f: G,
    ) -> impl Iterator<Item = impl Future<Output = Outcome<U>>>
    where
        G: FnOnce(T) -> Fut + Clone,
        Fut: Future<Output = Outcome<U>>,
    {
        self.into_iter().map(move |pending| {
            let f = f.clone();
            async move {
                match pending.await {
                    Outcome::Success(value) => f(value).await,
                    Outcome::Failure(fault) => Outcome::Failure(fault),
                }
            }
        })
    }

    /// Run a side computation independently against every element.
    fn tap_each<U, G>(
        self,
        mode: TapMode,
        f: G,
    ) -> impl Iterator<Item = impl Future<Output = Outcome<T>>>
    where
        G: FnOnce(&T) -> Outcome<U> + Clone,
    {
        self.into_iter().map(move |pending| {
            let f = f.clone();
            async move { pending.await.tap(mode, f) }
        })
    }

    /// Check every element's payload against a plain predicate.
    fn ensure_each<P>(
        self,
        predicate: P,
        message: impl Into<String>,
    ) -> impl Iterator<Item = impl Future<Output = Outcome<T>>>
    where
        P: FnOnce(&T) -> bool + Clone,
    {
        let message = message.into();
        self.into_iter().map(move |pending| {
            let predicate = predicate.clone();
            let message = message.clone();
            async move { pending.await.ensure_that(predicate, message) }
        })
    }

    /// Route every element's payload through one of two branches.
    fn branch_each<U, P, FT, FF>(
        self,
        predicate: P,
        on_true: FT,
        on_false: FF,
    ) -> impl Iterator<Item = impl Future<Output = Outcome<U>>>
    where
        P: FnOnce(&T) -> Outcome<bool> + Clone,
        FT: FnOnce(T) -> Outcome<U> + Clone,
        FF: FnOnce(T) -> Outcome<U> + Clone,
    {
        self.into_iter().map(move |pending| {
            let predicate = predicate.clone();
            let on_true = on_true.clone();
            let on_false = on_false.clone();
            async move { pending.await.branch(predicate, on_true, on_false) }
        })
    }

    /// Consume every element with one handler per state.
    fn fold_each<R, FS, FF>(
        self,
        on_success: FS,
        on_failure: FF,
    ) -> impl Iterator<Item = impl Future<Output = R>>
    where
        FS: FnOnce(T) -> R + Clone,
        FF: FnOnce(Fault) -> R + Clone,
    {
        self.into_iter().map(move |pending| {
            let on_success = on_success.clone();
            let on_failure = on_failure.clone();
            async move { pending.await.fold(on_success, on_failure) }
        })
    }
}

impl<T, F, I> PendingIterExt<T, F> for I
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Outcome<T>>,
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::BoxFuture;
    use futures::{FutureExt, StreamExt};
    use std::panic::AssertUnwindSafe;
    use std::time::{Duration, Instant};

    fn delayed_success(value: i32, delay: Duration) -> BoxFuture<'static, Outcome<i32>> {
        async move {
            tokio::time::sleep(delay).await;
            Outcome::success(value)
        }
        .boxed()
    }

    fn delayed_failure(message: &str, delay: Duration) -> BoxFuture<'static, Outcome<i32>> {
        let message = message.to_string();
        async move {
            tokio::time::sleep(delay).await;
            Outcome::failure(Fault::msg(message))
        }
        .boxed()
    }

    fn ready(outcome: Outcome<i32>) -> BoxFuture<'static, Outcome<i32>> {
        async move { outcome }.boxed()
    }

    // ==================== await_all ====================

    #[tokio::test]
    async fn await_all_preserves_input_order() {
        let pending = vec![
            delayed_failure("e1", Duration::from_millis(30)),
            delayed_success(5, Duration::from_millis(10)),
            delayed_failure("e2", Duration::from_millis(20)),
        ];

        let outcomes = await_all(pending).await;
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].as_fault().unwrap().message(), "e1");
        assert_eq!(outcomes[1], Outcome::success(5));
        assert_eq!(outcomes[2].as_fault().unwrap().message(), "e2");
    }

    #[tokio::test]
    async fn await_all_empty_input() {
        let pending: Vec<BoxFuture<'static, Outcome<i32>>> = vec![];
        assert!(await_all(pending).await.is_empty());
    }

    #[tokio::test]
    async fn await_all_runs_elements_concurrently() {
        let delay = Duration::from_millis(50);
        let pending = vec![
            delayed_success(1, delay),
            delayed_success(2, delay),
            delayed_success(3, delay),
        ];

        let start = Instant::now();
        let outcomes = await_all(pending).await;
        let elapsed = start.elapsed();

        assert_eq!(outcomes.len(), 3);
        // Concurrent: ~50ms. Sequential would be ~150ms.
        assert!(
            elapsed < Duration::from_millis(120),
            "expected concurrent execution, got {:?}",
            elapsed
        );
    }

    // ==================== await_any ====================

    #[tokio::test]
    async fn await_any_returns_the_first_finisher() {
        let pending = vec![
            delayed_success(1, Duration::from_millis(100)),
            delayed_success(2, Duration::from_millis(10)),
            delayed_success(3, Duration::from_millis(100)),
        ];

        let outcome = await_any(pending).await;
        assert_eq!(outcome, Outcome::success(2));
    }

    #[tokio::test]
    async fn await_any_returns_a_first_finishing_failure() {
        let pending = vec![
            delayed_failure("fast failure", Duration::from_millis(10)),
            delayed_success(1, Duration::from_millis(100)),
        ];

        let outcome = await_any(pending).await;
        assert_eq!(outcome.unwrap_fault().message(), "fast failure");
    }

    #[tokio::test]
    async fn await_any_single_element() {
        let outcome = await_any(vec![ready(Outcome::success(42))]).await;
        assert_eq!(outcome, Outcome::success(42));
    }

    #[tokio::test]
    #[should_panic(expected = "await_any called with no pending outcomes")]
    async fn await_any_empty_panics() {
        let pending: Vec<BoxFuture<'static, Outcome<i32>>> = vec![];
        let _ = await_any(pending).await;
    }

    // ==================== outcome_stream ====================

    #[tokio::test]
    async fn stream_yields_in_input_order_despite_completion_order() {
        let pending = vec![
            delayed_success(1, Duration::from_millis(30)),
            delayed_success(2, Duration::from_millis(10)),
            delayed_failure("e", Duration::from_millis(20)),
        ];

        let outcomes: Vec<_> = outcome_stream(pending).collect().await;
        assert_eq!(outcomes[0], Outcome::success(1));
        assert_eq!(outcomes[1], Outcome::success(2));
        assert!(outcomes[2].is_failure());
    }

    #[tokio::test]
    async fn stream_is_pull_based() {
        let pending = vec![ready(Outcome::success(1)), ready(Outcome::success(2))];
        let mut stream = Box::pin(outcome_stream(pending));
        assert_eq!(stream.next().await, Some(Outcome::success(1)));
        assert_eq!(stream.next().await, Some(Outcome::success(2)));
        assert_eq!(stream.next().await, None);
    }

    // ==================== sequence_all ====================

    #[tokio::test]
    async fn sequence_all_returns_ordered_payloads() {
        let pending = vec![
            delayed_success(1, Duration::from_millis(20)),
            delayed_success(2, Duration::from_millis(5)),
        ];
        assert_eq!(sequence_all(pending).await.unwrap(), vec![1, 2]);
    }

    #[tokio::test]
    async fn sequence_all_aggregates_faults_in_order() {
        let pending = vec![
            ready(Outcome::success(1)),
            delayed_failure("a", Duration::from_millis(20)),
            delayed_failure("b", Duration::from_millis(5)),
        ];

        let aggregate = sequence_all(pending).await.unwrap_err();
        assert_eq!(aggregate.len(), 2);
        assert_eq!(aggregate.faults()[0].message(), "a");
        assert_eq!(aggregate.faults()[1].message(), "b");
    }

    #[tokio::test]
    async fn sequence_all_empty_input() {
        let pending: Vec<BoxFuture<'static, Outcome<i32>>> = vec![];
        assert_eq!(sequence_all(pending).await.unwrap(), Vec::<i32>::new());
    }

    // ==================== Quantifiers ====================

    #[tokio::test]
    async fn quantifiers_over_mixed_input() {
        let mixed = || {
            vec![
                ready(Outcome::success(1)),
                ready(Outcome::failure(Fault::msg("x"))),
            ]
        };
        assert!(!all_succeeded(mixed()).await);
        assert!(any_succeeded(mixed()).await);
        assert!(!all_failed(mixed()).await);
        assert!(any_failed(mixed()).await);
    }

    #[tokio::test]
    async fn quantifiers_empty_boundaries() {
        let empty = || Vec::<BoxFuture<'static, Outcome<i32>>>::new();
        assert!(all_succeeded(empty()).await);
        assert!(!any_succeeded(empty()).await);
        assert!(all_failed(empty()).await);
        assert!(!any_failed(empty()).await);
    }

    // ==================== Per-element combinators ====================

    #[tokio::test]
    async fn and_then_each_applies_per_element() {
        let pending = vec![
            ready(Outcome::success(1)),
            ready(Outcome::failure(Fault::msg("down"))),
            ready(Outcome::success(3)),
        ];

        let outcomes = await_all(pending.and_then_each(|x| Outcome::success(x * 2))).await;
        assert_eq!(outcomes[0], Outcome::success(2));
        assert!(outcomes[1].is_failure());
        assert_eq!(outcomes[2], Outcome::success(6));
    }

    #[tokio::test]
    async fn and_then_each_async_awaits_each_step() {
        let pending = vec![ready(Outcome::success(2)), ready(Outcome::success(3))];
        let squared = pending.and_then_each_async(|x| async move { Outcome::success(x * x) });
        let outcomes = await_all(squared).await;
        assert_eq!(outcomes, vec![Outcome::success(4), Outcome::success(9)]);
    }

    #[tokio::test]
    async fn tap_each_folds_per_mode() {
        let pending = vec![ready(Outcome::success(1)), ready(Outcome::success(200))];
        let tapped = pending.tap_each(TapMode::Propagate, |x| {
            if *x < 100 {
                Outcome::success(())
            } else {
                Outcome::failure(Fault::msg("too large"))
            }
        });

        let outcomes = await_all(tapped).await;
        assert_eq!(outcomes[0], Outcome::success(1));
        assert!(outcomes[1].is_failure());
    }

    #[tokio::test]
    async fn ensure_each_checks_every_payload() {
        let pending = vec![ready(Outcome::success(2)), ready(Outcome::success(-3))];
        let checked = pending.ensure_each(|x| *x > 0, "must be positive");

        let outcomes = await_all(checked).await;
        assert!(outcomes[0].is_success());
        assert_eq!(outcomes[1].as_fault().unwrap().message(), "must be positive");
    }

    #[tokio::test]
    async fn branch_each_routes_per_element() {
        let pending = vec![ready(Outcome::success(10)), ready(Outcome::success(7))];
        let routed = pending.branch_each(
            |x| Outcome::success(*x % 2 == 0),
            |x| Outcome::success(x / 2),
            |x| Outcome::success(3 * x + 1),
        );

        let outcomes = await_all(routed).await;
        assert_eq!(outcomes, vec![Outcome::success(5), Outcome::success(22)]);
    }

    #[tokio::test]
    async fn fold_each_consumes_per_element() {
        let pending = vec![
            ready(Outcome::success(5)),
            ready(Outcome::failure(Fault::msg("gone"))),
        ];
        let reports = pending.fold_each(|x| x.to_string(), |fault| fault.message().to_string());

        let collected: Vec<String> = await_all_plain(reports).await;
        assert_eq!(collected, vec!["5".to_string(), "gone".to_string()]);
    }

    async fn await_all_plain<R, F, I>(futures: I) -> Vec<R>
    where
        I: IntoIterator<Item = F>,
        F: Future<Output = R>,
    {
        futures::future::join_all(futures).await
    }

    #[tokio::test]
    async fn a_panicking_element_does_not_affect_siblings() {
        let pending = vec![ready(Outcome::success(1)), ready(Outcome::success(0))];
        let mut wrapped: Vec<_> = pending.and_then_each(|x| Outcome::success(10 / x)).collect();

        let exploding = wrapped.pop().unwrap();
        let sibling = wrapped.pop().unwrap();

        // The sibling is untouched by the other element's panic.
        assert_eq!(sibling.await, Outcome::success(10));

        // The panic surfaces only when the failing element is consumed.
        let unwound = AssertUnwindSafe(exploding).catch_unwind().await;
        assert!(unwound.is_err());
    }
}
