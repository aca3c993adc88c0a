//! Error types for bean introspection and invocation

use thiserror::Error;

/// Failure raised while invoking a constructor, accessor or mutator
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvocationError {
    #[error("wrong number of arguments for {method}: expected {expected}, got {actual}")]
    ArgumentCount {
        method: String,
        expected: usize,
        actual: usize,
    },

    #[error("argument {index} of {method} expects {expected}, got {actual}")]
    ArgumentMismatch {
        method: String,
        index: usize,
        expected: String,
        actual: String,
    },

    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),

    /// The method itself refused the call, e.g. a mutator's validation
    #[error("{0}")]
    Rejected(String),

    #[error("panicked: {0}")]
    Panicked(String),
}

impl InvocationError {
    pub fn rejected(message: impl Into<String>) -> Self {
        InvocationError::Rejected(message.into())
    }

    pub fn panicked(message: impl Into<String>) -> Self {
        InvocationError::Panicked(message.into())
    }
}

/// Failure converting a dynamic `Value` back into a concrete Rust type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("cannot convert {actual} to {expected}")]
    TypeMismatch { expected: String, actual: String },

    #[error("{enum_name} has no constant named {constant}")]
    UnknownConstant {
        enum_name: &'static str,
        constant: String,
    },
}

impl ConversionError {
    pub fn mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        ConversionError::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// Structural failure of a bean type as a whole
#[derive(Debug, Error)]
pub enum BeanError {
    #[error("Introspection error for {bean}: {message}")]
    Introspection { bean: String, message: String },

    #[error("{0} has no no-argument constructor")]
    NoConstructor(String),

    #[error("Unable to construct {bean}: {source}")]
    Construction {
        bean: String,
        #[source]
        source: InvocationError,
    },
}

impl BeanError {
    pub fn introspection(bean: impl Into<String>, message: impl Into<String>) -> Self {
        BeanError::Introspection {
            bean: bean.into(),
            message: message.into(),
        }
    }

    pub fn no_constructor(bean: impl Into<String>) -> Self {
        BeanError::NoConstructor(bean.into())
    }
}

/// Result type alias for bean operations
pub type BeanResult<T> = std::result::Result<T, BeanError>;
