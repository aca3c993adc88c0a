//! Verification summaries
//!
//! A summary records what happened to each discovered property. It is
//! informational only; failures are always signalled through the hooks.

use serde::Serialize;

/// Why a property was not tested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Named in the skip set
    Requested,
    MissingAccessor,
    MissingMutator,
    /// The mutator does not take exactly one argument of the accessor's type
    ShapeMismatch,
}

/// Outcome of one property
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PropertyOutcome {
    Passed,
    Mismatch,
    InvocationFailed { cause: String },
    Unsupported { type_name: String },
    Skipped { reason: SkipReason },
}

impl PropertyOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            PropertyOutcome::Mismatch
                | PropertyOutcome::InvocationFailed { .. }
                | PropertyOutcome::Unsupported { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyReport {
    pub name: String,
    #[serde(flatten)]
    pub outcome: PropertyOutcome,
}

/// Per-property outcomes of one verification run, in processing order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationSummary {
    pub bean: String,
    pub properties: Vec<PropertyReport>,
}

impl VerificationSummary {
    pub fn new(bean: impl Into<String>) -> Self {
        Self {
            bean: bean.into(),
            properties: Vec::new(),
        }
    }

    pub fn record(&mut self, name: impl Into<String>, outcome: PropertyOutcome) {
        self.properties.push(PropertyReport {
            name: name.into(),
            outcome,
        });
    }

    pub fn outcome_of(&self, name: &str) -> Option<&PropertyOutcome> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.outcome)
    }

    /// Names of the properties that round-tripped
    pub fn passed(&self) -> Vec<&str> {
        self.properties
            .iter()
            .filter(|p| p.outcome == PropertyOutcome::Passed)
            .map(|p| p.name.as_str())
            .collect()
    }

    /// Names of the properties that were not tested
    pub fn skipped(&self) -> Vec<&str> {
        self.properties
            .iter()
            .filter(|p| matches!(p.outcome, PropertyOutcome::Skipped { .. }))
            .map(|p| p.name.as_str())
            .collect()
    }

    pub fn failure_count(&self) -> usize {
        self.properties.iter().filter(|p| p.outcome.is_failure()).count()
    }

    /// Returns true if no property failed
    pub fn is_clean(&self) -> bool {
        self.failure_count() == 0
    }

    /// Renders the summary as JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
