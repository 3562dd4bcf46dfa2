use std::path::{Path, PathBuf};

use omni_common::TabId;
use tracing::{debug, warn};
use wry::{PageLoadEvent, WebViewBuilder};

use crate::events::{ContextEvent, EventQueue, ShellEvent, TabEvent};

// =============================================================================
// SHELL NAVIGATION ALLOWLIST
// =============================================================================

/// The shell webview may only show bundled pages.
/// - `omni://` custom protocol
/// - `http://omni.localhost` (WebView2's rewrite of the custom protocol)
/// - `about:blank`
pub const SHELL_NAV_PREFIXES: &[&str] = &["omni://", "http://omni.localhost/", "about:blank"];

pub fn is_shell_navigation_allowed(url: &str) -> bool {
    SHELL_NAV_PREFIXES
        .iter()
        .any(|prefix| url.starts_with(prefix))
}

// =============================================================================
// AI CONTEXT HANDLERS
// =============================================================================

pub(super) fn attach_page_load_handler<'a>(
    builder: WebViewBuilder<'a>,
    events: EventQueue<TabEvent>,
    id: &TabId,
) -> WebViewBuilder<'a> {
    let id = id.clone();
    builder.with_on_page_load_handler(move |event, url| {
        let event = match event {
            PageLoadEvent::Started => ContextEvent::LoadStarted { url },
            PageLoadEvent::Finished => ContextEvent::LoadFinished { url },
        };
        events.push(TabEvent::new(id.clone(), event));
    })
}

pub(super) fn attach_title_handler<'a>(
    builder: WebViewBuilder<'a>,
    events: EventQueue<TabEvent>,
    id: &TabId,
) -> WebViewBuilder<'a> {
    let id = id.clone();
    builder.with_document_title_changed_handler(move |title| {
        events.push(TabEvent::new(id.clone(), ContextEvent::TitleChanged { title }));
    })
}

/// Sign-in flows open popups; they are allowed unless disabled in config.
pub(super) fn attach_new_window_handler<'a>(
    builder: WebViewBuilder<'a>,
    events: EventQueue<TabEvent>,
    id: &TabId,
    allow: bool,
) -> WebViewBuilder<'a> {
    let id = id.clone();
    builder.with_new_window_req_handler(move |url| {
        events.push(TabEvent::new(
            id.clone(),
            ContextEvent::PopupRequested { url },
        ));
        allow
    })
}

pub(super) fn attach_download_handlers<'a>(
    builder: WebViewBuilder<'a>,
    events: EventQueue<TabEvent>,
    id: &TabId,
    download_dir: Option<PathBuf>,
) -> WebViewBuilder<'a> {
    let started_events = events.clone();
    let started_id = id.clone();
    let finished_id = id.clone();
    builder
        .with_download_started_handler(move |url: String, path: &mut PathBuf| {
            if let Some(dir) = &download_dir {
                *path = dir.join(download_file_name(&url, path));
            }
            started_events.push(TabEvent::new(
                started_id.clone(),
                ContextEvent::DownloadStarted {
                    url,
                    path: path.clone(),
                },
            ));
            true
        })
        .with_download_completed_handler(move |url, path, success| {
            events.push(TabEvent::new(
                finished_id.clone(),
                ContextEvent::DownloadFinished { url, path, success },
            ));
        })
}

/// File name for a download: the engine's suggestion when it has one,
/// else the last URL path segment. Never contains a path separator.
pub fn download_file_name(url: &str, suggested: &Path) -> String {
    let from_suggestion = suggested
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .map(str::to_string);
    let from_url = || {
        url.split(['?', '#'])
            .next()
            .and_then(|u| u.rsplit('/').next())
            .filter(|s| !s.is_empty())
            .map(|s| {
                urlencoding::decode(s)
                    .map(|d| d.into_owned())
                    .unwrap_or_else(|_| s.to_string())
            })
    };
    let name = from_suggestion
        .or_else(from_url)
        .unwrap_or_else(|| "download".to_string());
    let clean: String = name
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':' | '\0') { '_' } else { c })
        .collect();
    match clean.trim_matches('.') {
        "" => "download".to_string(),
        _ => clean,
    }
}

// =============================================================================
// SHELL HANDLERS
// =============================================================================

pub(super) fn attach_shell_ipc_handler<'a>(
    builder: WebViewBuilder<'a>,
    events: EventQueue<ShellEvent>,
) -> WebViewBuilder<'a> {
    builder.with_ipc_handler(move |request| {
        let body = request.body().to_string();
        if serde_json::from_str::<serde_json::Value>(&body).is_err() {
            warn!(body_len = body.len(), "IPC message rejected: invalid JSON");
            return;
        }
        events.push(ShellEvent::Ipc { body });
    })
}

pub(super) fn attach_shell_page_load_handler<'a>(
    builder: WebViewBuilder<'a>,
    events: EventQueue<ShellEvent>,
) -> WebViewBuilder<'a> {
    builder.with_on_page_load_handler(move |event, url| {
        if let PageLoadEvent::Finished = event {
            events.push(ShellEvent::Loaded { url });
        }
    })
}

pub(super) fn attach_shell_navigation_handler(builder: WebViewBuilder<'_>) -> WebViewBuilder<'_> {
    builder.with_navigation_handler(|url| {
        if !is_shell_navigation_allowed(&url) {
            warn!(url = %url, "shell navigation blocked");
            return false;
        }
        debug!(url = %url, "shell navigation allowed");
        true
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_allows_bundled_pages_only() {
        assert!(is_shell_navigation_allowed("omni://localhost/shell/index.html"));
        assert!(is_shell_navigation_allowed("http://omni.localhost/shell/index.html"));
        assert!(is_shell_navigation_allowed("about:blank"));

        assert!(!is_shell_navigation_allowed("https://chat.openai.com"));
        assert!(!is_shell_navigation_allowed("http://omni.localhost.evil.test/"));
        assert!(!is_shell_navigation_allowed("file:///etc/passwd"));
        assert!(!is_shell_navigation_allowed("javascript:alert(1)"));
        assert!(!is_shell_navigation_allowed(""));
    }

    #[test]
    fn download_name_prefers_suggestion() {
        assert_eq!(
            download_file_name("https://x.test/a/file.bin", Path::new("/tmp/report.pdf")),
            "report.pdf"
        );
    }

    #[test]
    fn download_name_from_url() {
        assert_eq!(
            download_file_name("https://x.test/files/My%20Notes.md?dl=1", Path::new("")),
            "My Notes.md"
        );
    }

    #[test]
    fn download_name_fallback() {
        assert_eq!(download_file_name("https://x.test/", Path::new("")), "download");
        assert_eq!(download_file_name("https://x.test/..", Path::new("")), "download");
    }

    #[test]
    fn download_name_strips_separators() {
        assert_eq!(
            download_file_name("https://x.test/a%2F..%2Fb", Path::new("")),
            "a_.._b"
        );
    }
}
