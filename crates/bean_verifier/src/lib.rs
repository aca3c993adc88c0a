//! Bean Verifier - Round-trip testing of accessor/mutator pairs
//!
//! Eliminates hand-written unit tests for trivial property accessors: every
//! property of a bean is set to a representative test value and read back.
//!
//! # Modules
//!
//! - `verifier`: The round-trip verification run
//! - `synthesizer`: Test value construction per property type
//! - `sentinels`: The overridable default sentinel table
//! - `hooks`: Failure reporting adapters for test frameworks
//! - `report`: Per-property outcome summaries
//! - `config`: Environment-driven verifier configuration
//! - `generators`: Property-based test data generators
//!
//! # Example
//!
//! ```rust
//! use bean_kernel::{Bean, BeanClass};
//! use bean_verifier::assert_getters_and_setters;
//!
//! #[derive(Debug, Default)]
//! struct Customer {
//!     id: i64,
//!     name: String,
//! }
//!
//! impl Bean for Customer {
//!     fn bean_class() -> BeanClass<Self> {
//!         BeanClass::builder("Customer")
//!             .default_constructor()
//!             .getter("getId", |c: &Customer| c.id)
//!             .setter("setId", |c: &mut Customer, v: i64| c.id = v)
//!             .getter("getName", |c: &Customer| c.name.clone())
//!             .setter("setName", |c: &mut Customer, v: String| c.name = v)
//!             .build()
//!     }
//! }
//!
//! let summary = assert_getters_and_setters::<Customer>(&[]);
//! assert_eq!(summary.passed(), vec!["id", "name"]);
//! ```

pub mod verifier;
pub mod synthesizer;
pub mod sentinels;
pub mod hooks;
pub mod report;
pub mod config;
pub mod error;
pub mod generators;

pub use verifier::{Verifier, assert_getters_and_setters};
pub use synthesizer::synthesize;
pub use sentinels::{SentinelValues, DefaultSentinels};
pub use hooks::{AssertionHooks, PanickingHooks, RecordingHooks, FnHooks, Failure};
pub use report::{VerificationSummary, PropertyReport, PropertyOutcome, SkipReason};
pub use config::VerifierConfig;
pub use error::{SynthesisError, VerifyError};
