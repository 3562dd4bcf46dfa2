//! Tests for the full validation pipeline.

use super::*;
use crate::schema::*;

#[test]
fn default_config_validates() {
    assert!(validate(&OmniConfig::default()).is_ok());
}

#[test]
fn catches_header_too_tall() {
    let mut config = OmniConfig::default();
    config.layout.header_height = 500;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("layout.header_height"));
}

#[test]
fn catches_min_larger_than_default() {
    let mut config = OmniConfig::default();
    config.window.min_width = 2000;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("minimum size exceeds default"));
}

#[test]
fn catches_bad_partition_prefix() {
    let mut config = OmniConfig::default();
    config.sessions.partition_prefix = "has space".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("sessions.partition_prefix"));
}

#[test]
fn catches_bad_background_color() {
    let mut config = OmniConfig::default();
    config.sessions.background_color = "white".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("sessions.background_color"));
}

#[test]
fn catches_uppercase_header_name() {
    let mut config = OmniConfig::default();
    config.policy.stripped_headers.push("X-Frame-Options".into());
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("policy.stripped_headers"));
}

#[test]
fn catches_site_recipe_without_hosts() {
    let mut config = OmniConfig::default();
    config.broadcast.sites.push(SiteRecipeConfig::default());
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("broadcast.sites[0]"));
}

#[test]
fn catches_debounce_too_short() {
    let mut config = OmniConfig::default();
    config.persistence.geometry_debounce_ms = 10;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("persistence.geometry_debounce_ms"));
}

#[test]
fn catches_duplicate_service_ids() {
    let mut config = OmniConfig::default();
    config
        .services
        .push(ServiceEntry::new("chatgpt", "https://example.com"));
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("duplicate service"));
}

#[test]
fn catches_service_without_scheme() {
    let mut config = OmniConfig::default();
    config.services = vec![ServiceEntry::new("Local", "localhost:3000")];
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("services[0].url"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = OmniConfig::default();
    config.layout.footer_height = 1000;
    config.broadcast.settle_delay_ms = 60000;
    config.persistence.geometry_debounce_ms = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("layout.footer_height"));
    assert!(err.contains("broadcast.settle_delay_ms"));
    assert!(err.contains("persistence.geometry_debounce_ms"));
}
