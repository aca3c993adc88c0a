//! Assertion Hooks
//!
//! The verifier reports every failure through an `AssertionHooks`
//! implementation instead of asserting directly, which keeps it free of any
//! particular test framework.

use std::fmt;

use bean_kernel::Value;

/// Failure reporting supplied by the host test framework
pub trait AssertionHooks {
    /// Called when a property does not return the value it was given
    fn report_equality_failure(&mut self, message: &str, expected: &Value, actual: &Value);

    /// Called for every other failure: unsupported types and failed invocations
    ///
    /// Implementations backing a real test run should abort here (e.g. panic)
    /// rather than merely log.
    fn report_failure(&mut self, message: &str);
}

impl<H: AssertionHooks + ?Sized> AssertionHooks for &mut H {
    fn report_equality_failure(&mut self, message: &str, expected: &Value, actual: &Value) {
        (**self).report_equality_failure(message, expected, actual)
    }

    fn report_failure(&mut self, message: &str) {
        (**self).report_failure(message)
    }
}

/// Adapter for `#[test]` functions: every failure panics
#[derive(Debug, Clone, Copy, Default)]
pub struct PanickingHooks;

impl AssertionHooks for PanickingHooks {
    fn report_equality_failure(&mut self, message: &str, expected: &Value, actual: &Value) {
        panic!("{}: expected {}, got {}", message, expected, actual);
    }

    fn report_failure(&mut self, message: &str) {
        panic!("{}", message);
    }
}

/// A failure captured by `RecordingHooks`
#[derive(Debug, Clone, PartialEq)]
pub enum Failure {
    Equality {
        message: String,
        expected: Value,
        actual: Value,
    },
    General {
        message: String,
    },
}

impl Failure {
    pub fn message(&self) -> &str {
        match self {
            Failure::Equality { message, .. } | Failure::General { message } => message,
        }
    }

    pub fn is_equality(&self) -> bool {
        matches!(self, Failure::Equality { .. })
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Equality {
                message,
                expected,
                actual,
            } => write!(f, "{}: expected {}, got {}", message, expected, actual),
            Failure::General { message } => f.write_str(message),
        }
    }
}

/// Collects failures instead of aborting, for inspecting a run afterwards
#[derive(Debug, Clone, Default)]
pub struct RecordingHooks {
    failures: Vec<Failure>,
}

impl RecordingHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn equality_failures(&self) -> impl Iterator<Item = &Failure> {
        self.failures.iter().filter(|f| f.is_equality())
    }

    pub fn general_failures(&self) -> impl Iterator<Item = &Failure> {
        self.failures.iter().filter(|f| !f.is_equality())
    }

    /// Returns the failures whose message mentions `text`
    pub fn mentioning<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a Failure> + 'a {
        self.failures.iter().filter(move |f| f.message().contains(text))
    }

    pub fn clear(&mut self) {
        self.failures.clear();
    }
}

impl AssertionHooks for RecordingHooks {
    fn report_equality_failure(&mut self, message: &str, expected: &Value, actual: &Value) {
        self.failures.push(Failure::Equality {
            message: message.to_string(),
            expected: expected.clone(),
            actual: actual.clone(),
        });
    }

    fn report_failure(&mut self, message: &str) {
        self.failures.push(Failure::General {
            message: message.to_string(),
        });
    }
}

/// Hooks built from a pair of closures
pub struct FnHooks<E, F>
where
    E: FnMut(&str, &Value, &Value),
    F: FnMut(&str),
{
    on_mismatch: E,
    on_failure: F,
}

impl<E, F> FnHooks<E, F>
where
    E: FnMut(&str, &Value, &Value),
    F: FnMut(&str),
{
    pub fn new(on_mismatch: E, on_failure: F) -> Self {
        Self {
            on_mismatch,
            on_failure,
        }
    }
}

impl<E, F> AssertionHooks for FnHooks<E, F>
where
    E: FnMut(&str, &Value, &Value),
    F: FnMut(&str),
{
    fn report_equality_failure(&mut self, message: &str, expected: &Value, actual: &Value) {
        (self.on_mismatch)(message, expected, actual)
    }

    fn report_failure(&mut self, message: &str) {
        (self.on_failure)(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_hooks_collect_in_order() {
        let mut hooks = RecordingHooks::new();
        hooks.report_failure("first");
        hooks.report_equality_failure("second", &Value::Int(1), &Value::Int(2));

        assert_eq!(hooks.len(), 2);
        assert_eq!(hooks.failures()[0].message(), "first");
        assert_eq!(hooks.equality_failures().count(), 1);
        assert_eq!(hooks.general_failures().count(), 1);
        assert_eq!(hooks.mentioning("sec").count(), 1);
    }

    #[test]
    fn test_failure_display() {
        let failure = Failure::Equality {
            message: "Failed while testing property age".to_string(),
            expected: Value::Int(1),
            actual: Value::Int(2),
        };
        assert_eq!(
            failure.to_string(),
            "Failed while testing property age: expected 1, got 2"
        );
    }

    #[test]
    #[should_panic(expected = "Failed while testing property name")]
    fn test_panicking_hooks_panic_on_mismatch() {
        PanickingHooks.report_equality_failure(
            "Failed while testing property name",
            &Value::String("a".into()),
            &Value::Null,
        );
    }

    #[test]
    #[should_panic(expected = "Unable to build")]
    fn test_panicking_hooks_panic_on_failure() {
        PanickingHooks.report_failure("Unable to build an instance of Handle");
    }

    #[test]
    fn test_fn_hooks_forward_to_closures() {
        let mut mismatches = Vec::new();
        let mut failures = Vec::new();
        {
            let mut hooks = FnHooks::new(
                |message: &str, _expected: &Value, _actual: &Value| mismatches.push(message.to_string()),
                |message: &str| failures.push(message.to_string()),
            );
            hooks.report_equality_failure("m", &Value::Null, &Value::Null);
            hooks.report_failure("f");
        }
        assert_eq!(mismatches, vec!["m"]);
        assert_eq!(failures, vec!["f"]);
    }

    fn report_through<H: AssertionHooks>(mut hooks: H) {
        hooks.report_failure("through a reference");
    }

    #[test]
    fn test_mutable_reference_forwards() {
        let mut hooks = RecordingHooks::new();
        report_through(&mut hooks);
        assert_eq!(hooks.len(), 1);
    }
}
