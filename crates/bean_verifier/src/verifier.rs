//! Property Round-Trip Verifier
//!
//! For every accessor/mutator pair of a bean type the verifier builds a test
//! value, sets it on a fresh instance, reads it back and compares.
//!
//! # Failure handling
//!
//! - Per-property failures (unsupported type, mismatch, failed invocation)
//!   go to the hooks and the run moves on to the next property.
//! - Structural failures (malformed registration table, no usable
//!   constructor) abort the run with a `VerifyError`.
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut verifier = Verifier::new(RecordingHooks::new());
//! let summary = verifier.verify::<Customer>(&["id"])?;
//! assert!(verifier.hooks().is_empty());
//! ```

use std::any::type_name;
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};

use bean_kernel::{introspect, Bean, InvocationError, MethodInfo, TypeDescriptor, Value};
use tracing::{debug, instrument, trace};

use crate::config::VerifierConfig;
use crate::error::{SynthesisError, VerifyError};
use crate::hooks::{AssertionHooks, PanickingHooks};
use crate::report::{PropertyOutcome, SkipReason, VerificationSummary};
use crate::sentinels::{DefaultSentinels, SentinelValues};
use crate::synthesizer::synthesize;

/// Round-trip verifier for bean properties
pub struct Verifier<H, S = DefaultSentinels> {
    hooks: H,
    sentinels: S,
    config: VerifierConfig,
}

impl<H: AssertionHooks> Verifier<H> {
    /// Creates a verifier with the default sentinel table
    pub fn new(hooks: H) -> Self {
        Self::with_sentinels(hooks, DefaultSentinels)
    }
}

impl<H: AssertionHooks, S: SentinelValues> Verifier<H, S> {
    /// Creates a verifier with custom sentinel providers
    pub fn with_sentinels(hooks: H, sentinels: S) -> Self {
        Self {
            hooks,
            sentinels,
            config: VerifierConfig::default(),
        }
    }

    pub fn with_config(mut self, config: VerifierConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    pub fn into_hooks(self) -> H {
        self.hooks
    }

    /// Verifies every round-trippable property of `T`
    ///
    /// Properties named in `skip`, or in the configured skip list, are never
    /// touched. Returns an error only for failures that invalidate the whole
    /// run; everything else is reported through the hooks.
    #[instrument(skip_all, fields(bean = type_name::<T>()))]
    pub fn verify<T: Bean>(&mut self, skip: &[&str]) -> Result<VerificationSummary, VerifyError> {
        let class = T::bean_class();
        let mut properties = introspect(&class)?;

        let skip: HashSet<&str> = skip
            .iter()
            .copied()
            .chain(self.config.skip.iter().map(String::as_str))
            .collect();

        let mut summary = VerificationSummary::new(class.name());

        for property in properties.iter_mut() {
            let name = property.name().to_string();

            if skip.contains(name.as_str()) {
                trace!(property = %name, "skipped on request");
                summary.record(name, PropertyOutcome::Skipped { reason: SkipReason::Requested });
                continue;
            }

            property.find_boolean_is_accessor(&class);

            let (accessor, mutator) = match (property.accessor(), property.mutator()) {
                (Some(accessor), Some(mutator)) => (accessor, mutator),
                (None, _) => {
                    trace!(property = %name, "no accessor");
                    summary.record(name, PropertyOutcome::Skipped { reason: SkipReason::MissingAccessor });
                    continue;
                }
                (_, None) => {
                    trace!(property = %name, "no mutator");
                    summary.record(name, PropertyOutcome::Skipped { reason: SkipReason::MissingMutator });
                    continue;
                }
            };

            if !property.is_round_trippable() {
                trace!(property = %name, "accessor and mutator shapes differ");
                summary.record(name, PropertyOutcome::Skipped { reason: SkipReason::ShapeMismatch });
                continue;
            }

            let value_type = accessor.return_type();
            let expected = match self.synthesize_value(value_type) {
                Ok(value) => value,
                Err(err) => {
                    debug!(property = %name, error = %err, "unable to synthesize a test value");
                    self.hooks.report_failure(&format!(
                        "Unable to build an instance of {} for property {}, please supply a sentinel value for it: {}",
                        err.type_name(),
                        name,
                        err
                    ));
                    summary.record(
                        name,
                        PropertyOutcome::Unsupported {
                            type_name: err.type_name().to_string(),
                        },
                    );
                    continue;
                }
            };

            let mut bean = class.instantiate()?;

            let outcome = match round_trip(&mut bean, accessor, mutator, &expected, self.config.catch_panics) {
                Ok(actual) if actual == expected => {
                    debug!(property = %name, "round trip passed");
                    PropertyOutcome::Passed
                }
                Ok(actual) => {
                    debug!(property = %name, %expected, %actual, "round trip mismatch");
                    self.hooks.report_equality_failure(
                        &format!("Failed while testing property {}", name),
                        &expected,
                        &actual,
                    );
                    PropertyOutcome::Mismatch
                }
                Err(err) => {
                    debug!(property = %name, error = %err, "invocation failed");
                    self.hooks.report_failure(&format!(
                        "An exception was thrown while testing the property {}: {}",
                        name, err
                    ));
                    PropertyOutcome::InvocationFailed { cause: err.to_string() }
                }
            };
            summary.record(name, outcome);
        }

        debug!(
            tested = summary.properties.len() - summary.skipped().len(),
            failures = summary.failure_count(),
            "verification finished"
        );
        Ok(summary)
    }

    /// Synthesizes a test value, turning a panicking constructor into a failure
    fn synthesize_value(&self, ty: &TypeDescriptor) -> Result<Value, SynthesisError> {
        if !self.config.catch_panics {
            return synthesize(&self.sentinels, ty);
        }

        match panic::catch_unwind(AssertUnwindSafe(|| synthesize(&self.sentinels, ty))) {
            Ok(result) => result,
            Err(payload) => Err(SynthesisError::Construction {
                type_name: ty.name(),
                source: InvocationError::panicked(panic_message(payload.as_ref())),
            }),
        }
    }
}

/// Sets `value` through the mutator and reads it back through the accessor
fn round_trip<T>(
    bean: &mut T,
    accessor: &MethodInfo<T>,
    mutator: &MethodInfo<T>,
    value: &Value,
    catch_panics: bool,
) -> Result<Value, InvocationError> {
    let mut call = || {
        mutator.invoke(bean, vec![value.clone()])?;
        accessor.invoke(bean, Vec::new())
    };

    if !catch_panics {
        return call();
    }

    match panic::catch_unwind(AssertUnwindSafe(call)) {
        Ok(result) => result,
        Err(payload) => Err(InvocationError::panicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Verifies `T` with the default sentinels, panicking on any failure
///
/// Intended for direct use in `#[test]` functions.
pub fn assert_getters_and_setters<T: Bean>(skip: &[&str]) -> VerificationSummary {
    let mut verifier = Verifier::new(PanickingHooks);
    match verifier.verify::<T>(skip) {
        Ok(summary) => summary,
        Err(err) => panic!("Unable to verify {}: {}", type_name::<T>(), err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::RecordingHooks;
    use bean_kernel::BeanClass;

    #[derive(Debug, Default)]
    struct Point {
        x: i32,
        y: i32,
    }

    impl Bean for Point {
        fn bean_class() -> BeanClass<Self> {
            BeanClass::builder("Point")
                .default_constructor()
                .getter("getX", |p: &Point| p.x)
                .setter("setX", |p: &mut Point, v: i32| p.x = v)
                .getter("getY", |p: &Point| p.y)
                .setter("setY", |p: &mut Point, v: i32| p.y = v + 1)
                .build()
        }
    }

    #[test]
    fn test_mismatch_reported_and_run_continues() {
        let mut verifier = Verifier::new(RecordingHooks::new());
        let summary = verifier.verify::<Point>(&[]).unwrap();

        assert_eq!(summary.outcome_of("x"), Some(&PropertyOutcome::Passed));
        assert_eq!(summary.outcome_of("y"), Some(&PropertyOutcome::Mismatch));

        let hooks = verifier.hooks();
        assert_eq!(hooks.len(), 1);
        assert_eq!(hooks.failures()[0].message(), "Failed while testing property y");
    }

    #[test]
    fn test_configured_skip_list_applies() {
        let mut verifier = Verifier::new(RecordingHooks::new())
            .with_config(VerifierConfig::default().with_skip("y"));
        let summary = verifier.verify::<Point>(&[]).unwrap();

        assert!(verifier.hooks().is_empty());
        assert_eq!(summary.skipped(), vec!["y"]);
    }

    #[test]
    fn test_panic_message_extraction() {
        let boxed: Box<dyn std::any::Any + Send> = Box::new("static message");
        assert_eq!(panic_message(boxed.as_ref()), "static message");
        let boxed: Box<dyn std::any::Any + Send> = Box::new(String::from("owned message"));
        assert_eq!(panic_message(boxed.as_ref()), "owned message");
        let boxed: Box<dyn std::any::Any + Send> = Box::new(42);
        assert_eq!(panic_message(boxed.as_ref()), "unknown panic payload");
    }

    #[test]
    fn test_assert_getters_and_setters_passes_with_skip() {
        let summary = assert_getters_and_setters::<Point>(&["y"]);
        assert_eq!(summary.passed(), vec!["x"]);
    }

    #[test]
    #[should_panic(expected = "Failed while testing property y")]
    fn test_assert_getters_and_setters_panics_on_mismatch() {
        assert_getters_and_setters::<Point>(&[]);
    }
}
