//! Verifier configuration

use serde::Deserialize;

use crate::error::VerifyError;

/// Verifier configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Property names skipped on every run, in addition to per-call names
    pub skip: Vec<String>,
    /// Report panicking accessors, mutators and value constructors as
    /// failures instead of unwinding
    ///
    /// A caught panic still runs the process panic hook, which prints the
    /// panic message to stderr unless the host installs its own hook with
    /// `std::panic::set_hook`.
    pub catch_panics: bool,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            skip: Vec::new(),
            catch_panics: true,
        }
    }
}

impl VerifierConfig {
    /// Loads configuration from environment
    ///
    /// Reads `BEAN_VERIFIER_SKIP` (comma separated) and
    /// `BEAN_VERIFIER_CATCH_PANICS`, after loading a `.env` file if present.
    pub fn from_env() -> Result<Self, VerifyError> {
        dotenvy::dotenv().ok();
        Self::from_source(config::Environment::with_prefix("BEAN_VERIFIER"))
    }

    /// Loads configuration from an arbitrary environment source
    pub fn from_source(environment: config::Environment) -> Result<Self, VerifyError> {
        let config = config::Config::builder()
            .add_source(
                environment
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("skip"),
            )
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Adds a property name to the permanent skip list
    pub fn with_skip(mut self, name: impl Into<String>) -> Self {
        self.skip.push(name.into());
        self
    }

    pub fn with_catch_panics(mut self, catch_panics: bool) -> Self {
        self.catch_panics = catch_panics;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn environment(vars: &[(&str, &str)]) -> config::Environment {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config::Environment::with_prefix("BEAN_VERIFIER").source(Some(source))
    }

    #[test]
    fn test_default_config() {
        let config = VerifierConfig::default();
        assert!(config.skip.is_empty());
        assert!(config.catch_panics);
    }

    #[test]
    fn test_from_empty_environment_uses_defaults() {
        let config = VerifierConfig::from_source(environment(&[])).unwrap();
        assert_eq!(config, VerifierConfig::default());
    }

    #[test]
    fn test_from_environment() {
        let config = VerifierConfig::from_source(environment(&[
            ("BEAN_VERIFIER_SKIP", "id,createdAt"),
            ("BEAN_VERIFIER_CATCH_PANICS", "false"),
        ]))
        .unwrap();
        assert_eq!(config.skip, vec!["id".to_string(), "createdAt".to_string()]);
        assert!(!config.catch_panics);
    }

    #[test]
    fn test_invalid_value_is_a_configuration_error() {
        let err = VerifierConfig::from_source(environment(&[("BEAN_VERIFIER_CATCH_PANICS", "maybe")]))
            .unwrap_err();
        assert!(matches!(err, VerifyError::Configuration(_)));
        assert!(err.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_builder_methods() {
        let config = VerifierConfig::default()
            .with_skip("id")
            .with_catch_panics(false);
        assert_eq!(config.skip, vec!["id".to_string()]);
        assert!(!config.catch_panics);
    }
}
