use std::sync::Arc;

use omni_common::types::{Color, Rect, Size};
use omni_common::ViewError;
use tracing::{debug, info};
use wry::raw_window_handle::HasWindowHandle;
use wry::{WebView, WebViewBuilder};

use super::{engine_error, handlers, protocol, to_wry_rect};
use crate::content::{internal_url, ContentProvider, SHELL_PAGE};
use crate::events::{EventQueue, ShellEvent};
use crate::ipc::{js_dispatch_message, IPC_INIT_SCRIPT};
use crate::protocol::ShellSignal;

/// The presentation page: tab strip, launcher and dialogs. Covers the
/// whole window underneath the AI contexts.
pub struct ShellView {
    webview: WebView,
}

impl ShellView {
    pub fn create<W: HasWindowHandle>(
        window: &W,
        size: Size,
        content: Arc<ContentProvider>,
        events: EventQueue<ShellEvent>,
        devtools: bool,
        background: Color,
    ) -> Result<Self, ViewError> {
        let url = internal_url(SHELL_PAGE);
        let mut builder = WebViewBuilder::new()
            .with_url(&url)
            .with_bounds(to_wry_rect(full(size)))
            .with_devtools(devtools)
            .with_clipboard(true)
            .with_background_color(background.to_tuple())
            .with_initialization_script(IPC_INIT_SCRIPT);

        builder = handlers::attach_shell_ipc_handler(builder, events.clone());
        builder = handlers::attach_shell_page_load_handler(builder, events);
        builder = handlers::attach_shell_navigation_handler(builder);
        builder = protocol::attach_custom_protocol(builder, content);

        let webview = builder.build_as_child(window).map_err(engine_error)?;
        info!(url = %url, "shell created");
        Ok(Self { webview })
    }

    pub fn resize(&self, size: Size) -> Result<(), ViewError> {
        self.webview
            .set_bounds(to_wry_rect(full(size)))
            .map_err(engine_error)
    }

    pub fn send(&self, signal: &ShellSignal) -> Result<(), ViewError> {
        debug!(kind = signal.kind(), "signal to shell");
        let script = js_dispatch_message(signal.kind(), &signal.payload());
        self.webview.evaluate_script(&script).map_err(engine_error)
    }

    pub fn focus(&self) -> Result<(), ViewError> {
        self.webview.focus().map_err(engine_error)
    }
}

fn full(size: Size) -> Rect {
    Rect::new(0, 0, size.width, size.height)
}
