//! Full configuration validation.
//!
//! Each check pushes a message; everything found is reported together in a
//! single `ConfigError`.

mod helpers;
mod sections;

#[cfg(test)]
mod tests;

use crate::schema::OmniConfig;
use omni_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &OmniConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    sections::validate_window(&mut errors, config);
    sections::validate_layout(&mut errors, config);
    sections::validate_sessions(&mut errors, config);
    sections::validate_policy(&mut errors, config);
    sections::validate_broadcast(&mut errors, config);
    sections::validate_persistence(&mut errors, config);
    sections::validate_services(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
