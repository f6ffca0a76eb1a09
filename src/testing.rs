//! Testing utilities for outcome-based code
//!
//! Assertion macros for the two outcome states, and, behind the `proptest`
//! feature, an `Arbitrary` implementation generating both successes and
//! failures for property-based tests.
//!
//! # Examples
//!
//! ```
//! use sidetrack::{assert_failure, assert_success, Fault, Outcome};
//!
//! let success = Outcome::success(42);
//! assert_success!(success);
//!
//! let failure = Outcome::<i32>::failure(Fault::msg("declined"));
//! assert_failure!(failure);
//! ```

/// Assert that an outcome is a `Success`.
///
/// Panics with the carried fault when it is a `Failure`.
///
/// # Example
///
/// ```
/// use sidetrack::{assert_success, Outcome};
///
/// let outcome = Outcome::success(42);
/// assert_success!(outcome);
/// ```
#[macro_export]
macro_rules! assert_success {
    ($outcome:expr) => {
        match $outcome {
            $crate::Outcome::Success(_) => {}
            $crate::Outcome::Failure(fault) => {
                panic!("Expected Success, got Failure: {:?}", fault);
            }
        }
    };
}

/// Assert that an outcome is a `Failure`.
///
/// Panics with the carried payload when it is a `Success`.
///
/// # Example
///
/// ```
/// use sidetrack::{assert_failure, Fault, Outcome};
///
/// let outcome = Outcome::<i32>::failure(Fault::msg("declined"));
/// assert_failure!(outcome);
/// ```
#[macro_export]
macro_rules! assert_failure {
    ($outcome:expr) => {
        match $outcome {
            $crate::Outcome::Failure(_) => {}
            $crate::Outcome::Success(value) => {
                panic!("Expected Failure, got Success: {:?}", value);
            }
        }
    };
}

/// Assert that an outcome is a `Failure` with the given fault message.
///
/// # Example
///
/// ```
/// use sidetrack::{assert_fault_message, Fault, Outcome};
///
/// let outcome = Outcome::<i32>::failure(Fault::msg("declined"));
/// assert_fault_message!(outcome, "declined");
/// ```
#[macro_export]
macro_rules! assert_fault_message {
    ($outcome:expr, $expected:expr) => {
        match $outcome {
            $crate::Outcome::Failure(fault) => {
                assert_eq!(fault.message(), $expected);
            }
            $crate::Outcome::Success(value) => {
                panic!(
                    "Expected Failure with message {:?}, got Success: {:?}",
                    $expected, value
                );
            }
        }
    };
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
impl<T> Arbitrary for crate::Outcome<T>
where
    T: Arbitrary + 'static,
{
    type Parameters = T::Parameters;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            any_with::<T>(args).prop_map(crate::Outcome::success),
            any::<String>().prop_map(|message| crate::Outcome::failure(crate::Fault::msg(message))),
        ]
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Fault, Outcome};

    #[test]
    fn assert_success_macro() {
        assert_success!(Outcome::success(42));
    }

    #[test]
    fn assert_failure_macro() {
        assert_failure!(Outcome::<i32>::failure(Fault::msg("declined")));
    }

    #[test]
    fn assert_fault_message_macro() {
        assert_fault_message!(Outcome::<i32>::failure(Fault::msg("declined")), "declined");
    }

    #[test]
    #[should_panic(expected = "Expected Success, got Failure")]
    fn assert_success_panics_on_failure() {
        assert_success!(Outcome::<i32>::failure(Fault::msg("declined")));
    }

    #[test]
    #[should_panic(expected = "Expected Failure, got Success")]
    fn assert_failure_panics_on_success() {
        assert_failure!(Outcome::success(42));
    }

    #[test]
    #[should_panic(expected = "Expected Failure with message")]
    fn assert_fault_message_panics_on_success() {
        assert_fault_message!(Outcome::success(42), "declined");
    }

    #[cfg(feature = "proptest")]
    mod proptest_tests {
        use crate::Outcome;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn arbitrary_generates_both_states(
                outcome in any::<Outcome<i32>>()
            ) {
                match outcome {
                    Outcome::Success(_) => prop_assert!(outcome.is_success()),
                    Outcome::Failure(_) => prop_assert!(outcome.is_failure()),
                }
            }
        }
    }
}
