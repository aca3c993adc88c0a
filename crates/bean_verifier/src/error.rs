//! Error types for value synthesis and verification runs

use bean_kernel::{BeanError, InvocationError};
use thiserror::Error;

/// Failure to produce a test value for a property type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SynthesisError {
    #[error("no rule can build a value of type {0}")]
    Unsupported(String),

    #[error("enum {0} declares no constants")]
    EmptyEnum(String),

    #[error("constructor of {type_name} failed: {source}")]
    Construction {
        type_name: String,
        #[source]
        source: InvocationError,
    },
}

impl SynthesisError {
    /// Returns the name of the type that could not be synthesized
    pub fn type_name(&self) -> &str {
        match self {
            SynthesisError::Unsupported(name) | SynthesisError::EmptyEnum(name) => name,
            SynthesisError::Construction { type_name, .. } => type_name,
        }
    }
}

/// Failure that aborts a whole verification run
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error(transparent)]
    Bean(#[from] BeanError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),
}
