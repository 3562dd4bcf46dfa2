use std::backtrace::Backtrace;
use std::panic::PanicHookInfo;
use std::path::{Path, PathBuf};

use crate::paths::crash_report_dir;

use super::sanitize::sanitize_secrets;

/// Assemble the crash report document. Message and backtrace are
/// sanitized before they are embedded.
pub fn build_report(
    message: &str,
    location: Option<(&str, u32, u32)>,
    backtrace: &str,
) -> serde_json::Value {
    let location = location.map(|(file, line, column)| {
        serde_json::json!({
            "file": file,
            "line": line,
            "column": column,
        })
    });

    serde_json::json!({
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "os": std::env::consts::OS,
        "arch": std::env::consts::ARCH,
        "panic_message": sanitize_secrets(message),
        "location": location,
        "backtrace": sanitize_secrets(backtrace),
    })
}

/// Write `report` as `crash_<timestamp>.json` in `dir`. Never panics.
pub fn write_report_to(dir: &Path, report: &serde_json::Value) -> Option<PathBuf> {
    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S").to_string();
    let path = dir.join(format!("crash_{timestamp}.json"));

    std::fs::create_dir_all(dir).ok()?;
    std::fs::write(&path, serde_json::to_string_pretty(report).ok()?).ok()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600));
    }

    Some(path)
}

/// Panic-hook entry point. Returns the written path, or `None` if any step
/// failed.
pub fn write_crash_report(info: &PanicHookInfo) -> Option<PathBuf> {
    let message = if let Some(s) = info.payload().downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    };

    let location = info
        .location()
        .map(|loc| (loc.file(), loc.line(), loc.column()));
    let backtrace = Backtrace::force_capture().to_string();

    let report = build_report(&message, location, &backtrace);
    write_report_to(&crash_report_dir().ok()?, &report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_contains_sanitized_message() {
        let report = build_report(
            "load failed for https://x.test/cb?code=SECRET123",
            Some(("src/main.rs", 10, 5)),
            "",
        );
        let message = report["panic_message"].as_str().unwrap();
        assert!(!message.contains("SECRET123"));
        assert_eq!(report["location"]["line"], 10);
    }

    #[test]
    fn report_is_written_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let report = build_report("boom", None, "bt");
        let path = write_report_to(&dir.path().join("reports"), &report).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["panic_message"], "boom");
        assert!(parsed["location"].is_null());
    }
}
