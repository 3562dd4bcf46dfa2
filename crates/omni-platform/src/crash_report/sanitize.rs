use std::sync::OnceLock;

use regex::Regex;

/// `(pattern, replacement)`. Specific patterns first, generic last.
const PATTERNS: &[(&str, &str)] = &[
    // Anthropic / OpenAI style keys and session keys
    (r"sk-ant-[a-zA-Z0-9_\-]{10,}", "[REDACTED]"),
    (r"sk-[a-zA-Z0-9]{20,}", "[REDACTED]"),
    (r"Bearer [a-zA-Z0-9._\-]+", "Bearer [REDACTED]"),
    // Whole cookie headers
    (r"(?i)((?:set-)?cookie:\s*)[^\r\n]+", "${1}[REDACTED]"),
    // OAuth and session values in query strings
    (
        r"(?i)([?&](?:code|token|access_token|id_token|refresh_token|session|session_token|auth|key)=)[^&\s#]+",
        "${1}[REDACTED]",
    ),
    (r"(?i)((?:token|secret|password)=)[a-zA-Z0-9]{32,}", "${1}[REDACTED]"),
];

fn compiled() -> &'static [(Regex, &'static str)] {
    static COMPILED: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        PATTERNS
            .iter()
            .filter_map(|(pattern, replacement)| {
                Regex::new(pattern).ok().map(|re| (re, *replacement))
            })
            .collect()
    })
}

/// Redact credentials that can appear in panic messages: API and session
/// keys, bearer tokens, cookie headers, and OAuth values in URLs.
pub fn sanitize_secrets(input: &str) -> String {
    let mut result = input.to_string();
    for (re, replacement) in compiled() {
        result = re.replace_all(&result, *replacement).into_owned();
    }
    result
}
