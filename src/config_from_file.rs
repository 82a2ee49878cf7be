//! Supports reading `MathConfig` from YAML file (optional)

use std::path::Path;
use tracing::debug;
use yaml_rust2::{Yaml, YamlLoader};

use crate::config::MathConfig;
use crate::math_error::MathError;

impl MathConfig {
    /// Read the configuration from YAML file. YAML file like this is supported:
    /// ```yaml
    /// epsilon: 1.0e-9
    /// strict: true
    /// ```
    /// Both keys are optional, missing ones keep their default values.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, MathError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Same as `from_yaml_file` but takes the YAML text directly.
    pub fn from_yaml_str(contents: &str) -> Result<Self, MathError> {
        let docs = YamlLoader::load_from_str(contents)
            .map_err(|e| MathError::ConfigError(format!("{}", e)))?;
        let mut config = MathConfig::default();
        let Some(doc) = docs.first() else {
            debug!("empty configuration document, using defaults");
            return Ok(config);
        };

        let epsilon = &doc["epsilon"];
        if !epsilon.is_badvalue() {
            let value = as_number(epsilon)
                .ok_or_else(|| MathError::ConfigError(format!("epsilon must be a number (got {:?})", epsilon)))?;
            if !value.is_finite() || value < 0.0 {
                return Err(MathError::ConfigError(format!(
                    "epsilon must be finite and not negative (got {})", value
                )));
            }
            config.epsilon = value;
        }

        let strict = &doc["strict"];
        if !strict.is_badvalue() {
            config.strict = strict.as_bool()
                .ok_or_else(|| MathError::ConfigError(format!("strict must be true or false (got {:?})", strict)))?;
        }

        debug!(epsilon = config.epsilon, strict = config.strict, "configuration loaded");
        Ok(config)
    }
}

/// YAML distinguishes integers and reals; both are accepted here.
fn as_number(value: &Yaml) -> Option<f64> {
    value.as_f64().or_else(|| value.as_i64().map(|i| i as f64))
}
