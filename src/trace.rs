//! Opt-in tracing for outcomes
//!
//! Core combinators are pure and stay silent. This module, available behind
//! the `tracing` feature, adds explicit logging points: [`OutcomeTracingExt`]
//! records failures passing through a chain, and pending outcomes compose
//! with `tracing::Instrument` directly since they are ordinary futures.

use crate::outcome::Outcome;

/// Extension trait recording failures through the `tracing` ecosystem.
pub trait OutcomeTracingExt<T>: Sized {
    /// Emit a `warn` event for a failure, passing the outcome through
    /// unchanged either way.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use sidetrack::trace::OutcomeTracingExt;
    ///
    /// let outcome = load_config()
    ///     .log_failure("config")
    ///     .and_then(parse_config);
    /// ```
    fn log_failure(self, target: &str) -> Self;
}

impl<T> OutcomeTracingExt<T> for Outcome<T> {
    fn log_failure(self, target: &str) -> Self {
        if let Outcome::Failure(ref fault) = self {
            tracing::warn!(
                target: "sidetrack",
                kind = fault.kind(),
                operation = target,
                "outcome failed: {}",
                fault
            );
        }
        self
    }
}

/// Pending-outcome counterpart of [`OutcomeTracingExt`].
#[allow(async_fn_in_trait)]
pub trait PendingTracingExt<T>: std::future::Future<Output = Outcome<T>> + Sized {
    /// Await, then emit a `warn` event for a failure.
    async fn log_failure(self, target: &str) -> Outcome<T> {
        OutcomeTracingExt::log_failure(self.await, target)
    }
}

impl<T, Fut> PendingTracingExt<T> for Fut where Fut: std::future::Future<Output = Outcome<T>> {}
