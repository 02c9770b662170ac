//! Gateway credential configuration.

use crate::error::Error;

/// Environment variable holding the hosted project id.
pub const PROJECT_ID_VAR: &str = "FLOWMASTERY_PROJECT_ID";

/// Environment variable holding the public API key.
pub const PUBLIC_KEY_VAR: &str = "FLOWMASTERY_PUBLIC_KEY";

/// Credentials for constructing a connection to the hosted gateway.
///
/// The hosted SDK is initialized once per client with a project id and a
/// public key. Construction fails fast with [`Error::Configuration`] when
/// either value is absent, so no gateway call is ever attempted with missing
/// credentials.
///
/// # Examples
///
/// ```
/// use flowmastery::gateway::GatewayConfig;
///
/// let config = GatewayConfig::new("proj-123", "pk-abc");
/// assert_eq!(config.project_id, "proj-123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Hosted project identifier.
    pub project_id: String,
    /// Public API key.
    pub public_key: String,
}

impl GatewayConfig {
    /// Creates a config from explicit values.
    pub fn new(project_id: impl Into<String>, public_key: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            public_key: public_key.into(),
        }
    }

    /// Reads credentials from [`PROJECT_ID_VAR`] and [`PUBLIC_KEY_VAR`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when either variable is unset or
    /// empty.
    pub fn from_env() -> Result<Self, Error> {
        let project_id = read_var(PROJECT_ID_VAR)?;
        let public_key = read_var(PUBLIC_KEY_VAR)?;
        Ok(Self {
            project_id,
            public_key,
        })
    }
}

fn read_var(name: &str) -> Result<String, Error> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::Configuration(format!("{name} is not set"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_variables_fail_with_configuration_error() {
        // Use names that cannot collide with a real environment.
        let err = read_var("FLOWMASTERY_TEST_UNSET_VARIABLE").unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(err.to_string().contains("FLOWMASTERY_TEST_UNSET_VARIABLE"));
    }
}
