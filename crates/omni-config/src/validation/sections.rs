//! Per-section validators.

use std::collections::HashSet;

use crate::schema::OmniConfig;

use super::helpers::{validate_hex_color, validate_http_url, validate_not_empty, validate_range};

pub(crate) fn validate_window(errors: &mut Vec<String>, config: &OmniConfig) {
    let w = &config.window;
    validate_range(errors, "window.default_width", w.default_width, 400, 10000);
    validate_range(errors, "window.default_height", w.default_height, 300, 10000);
    validate_range(errors, "window.min_width", w.min_width, 200, 4000);
    validate_range(errors, "window.min_height", w.min_height, 200, 4000);
    if w.min_width > w.default_width || w.min_height > w.default_height {
        errors.push("window minimum size exceeds default size".into());
    }
}

pub(crate) fn validate_layout(errors: &mut Vec<String>, config: &OmniConfig) {
    validate_range(errors, "layout.header_height", config.layout.header_height, 0, 400);
    validate_range(errors, "layout.footer_height", config.layout.footer_height, 0, 400);
}

pub(crate) fn validate_sessions(errors: &mut Vec<String>, config: &OmniConfig) {
    let s = &config.sessions;
    validate_not_empty(errors, "sessions.partition_prefix", &s.partition_prefix);
    if !s
        .partition_prefix
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        errors.push(format!(
            "sessions.partition_prefix = {:?} may only contain [A-Za-z0-9_-]",
            s.partition_prefix
        ));
    }
    validate_hex_color(errors, "sessions.background_color", &s.background_color);
}

pub(crate) fn validate_policy(errors: &mut Vec<String>, config: &OmniConfig) {
    for header in &config.policy.stripped_headers {
        if header.is_empty() || header.chars().any(|c| c.is_ascii_uppercase() || c == ' ') {
            errors.push(format!(
                "policy.stripped_headers entry {header:?} must be a lowercase header name"
            ));
        }
    }
    for domain in &config.policy.trusted_domains {
        validate_not_empty(errors, "policy.trusted_domains entry", domain);
    }
}

pub(crate) fn validate_broadcast(errors: &mut Vec<String>, config: &OmniConfig) {
    let b = &config.broadcast;
    validate_range(errors, "broadcast.settle_delay_ms", b.settle_delay_ms, 0, 5000);
    validate_range(errors, "broadcast.keyup_delay_ms", b.keyup_delay_ms, 0, 5000);
    validate_range(
        errors,
        "broadcast.send_button_delay_ms",
        b.send_button_delay_ms,
        0,
        10000,
    );
    for (i, site) in b.sites.iter().enumerate() {
        if site.hosts.is_empty() {
            errors.push(format!("broadcast.sites[{i}] has no hosts"));
        }
    }
}

pub(crate) fn validate_persistence(errors: &mut Vec<String>, config: &OmniConfig) {
    validate_range(
        errors,
        "persistence.geometry_debounce_ms",
        config.persistence.geometry_debounce_ms,
        50,
        10000,
    );
}

pub(crate) fn validate_services(errors: &mut Vec<String>, config: &OmniConfig) {
    let mut seen = HashSet::new();
    for (i, service) in config.services.iter().enumerate() {
        validate_not_empty(errors, &format!("services[{i}].name"), &service.name);
        validate_http_url(errors, &format!("services[{i}].url"), &service.url);
        if !seen.insert(service.tab_id(false)) {
            errors.push(format!("duplicate service name {:?}", service.name));
        }
    }
}
