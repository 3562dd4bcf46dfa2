//! Bundled assets served through the `omni` custom protocol.
//!
//! The shell page lives under `shell/` and internal error pages under
//! `internal/`. Requests resolve against an asset root on disk, with
//! in-memory overrides taking precedence.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const PROTOCOL_NAME: &str = "omni";

pub const SHELL_PAGE: &str = "shell/index.html";
pub const ERROR_PAGE: &str = "internal/error.html";

/// Why an AI context was replaced by the internal error page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorReason {
    Failed,
    Blocked,
}

impl ErrorReason {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorReason::Failed => "failed",
            ErrorReason::Blocked => "blocked",
        }
    }
}

/// Base URL of the custom protocol. WebView2 only routes custom schemes
/// through the `http://<scheme>.<host>` form.
pub fn internal_base() -> &'static str {
    if cfg!(target_os = "windows") {
        "http://omni.localhost/"
    } else {
        "omni://localhost/"
    }
}

pub fn internal_url(path: &str) -> String {
    format!("{}{}", internal_base(), path.trim_start_matches('/'))
}

pub fn is_internal_url(url: &str) -> bool {
    url.starts_with(internal_base())
}

pub fn error_page_url(reason: ErrorReason, failed_url: &str) -> String {
    format!(
        "{}?reason={}&url={}",
        internal_url(ERROR_PAGE),
        reason.as_str(),
        urlencoding::encode(failed_url)
    )
}

pub struct ContentProvider {
    base_dir: PathBuf,
    /// path -> (mime, data)
    overrides: HashMap<String, (String, Vec<u8>)>,
}

impl ContentProvider {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            overrides: HashMap::new(),
        }
    }

    pub fn add_override(
        &mut self,
        path: impl Into<String>,
        mime: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) {
        self.overrides
            .insert(path.into(), (mime.into(), data.into()));
    }

    /// Resolve a request path (query string ignored) to MIME type and bytes.
    pub fn resolve(&self, path: &str) -> Option<(Cow<'_, str>, Cow<'_, [u8]>)> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let decoded = urlencoding::decode(path).ok()?;
        let clean = decoded.trim_start_matches('/');
        if clean.is_empty() {
            return None;
        }

        if let Some((mime, data)) = self.overrides.get(clean) {
            return Some((Cow::Borrowed(mime.as_str()), Cow::Borrowed(data.as_slice())));
        }

        let file_path = self.base_dir.join(clean);

        // Canonicalize both sides so `..` and symlinks cannot leave the root.
        let canonical_base = std::fs::canonicalize(&self.base_dir).ok()?;
        let canonical_file = std::fs::canonicalize(&file_path).ok()?;
        if !canonical_file.starts_with(&canonical_base) {
            return None;
        }

        let data = std::fs::read(&canonical_file).ok()?;
        let mime = mime_from_extension(&file_path);
        Some((Cow::Owned(mime.to_string()), Cow::Owned(data)))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

fn mime_from_extension(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("js") | Some("mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("woff2") => "font/woff2",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Locate the bundled `assets` directory: next to the executable when
/// installed, else the workspace root during development.
pub fn locate_assets() -> Option<PathBuf> {
    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("assets")));
    let workspace = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(Path::parent)
        .map(|root| root.join("assets"));
    [beside_exe, workspace]
        .into_iter()
        .flatten()
        .find(|dir| dir.join(SHELL_PAGE).is_file())
}
