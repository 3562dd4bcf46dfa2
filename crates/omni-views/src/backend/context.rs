use std::path::PathBuf;
use std::sync::Arc;

use omni_common::types::{Color, Rect};
use omni_common::{TabId, ViewError};
use omni_config::schema::SessionsConfig;
use tracing::{debug, warn};
use wry::raw_window_handle::HasWindowHandle;
use wry::{WebContext, WebView, WebViewBuilder};

use super::{engine_error, handlers, protocol};
use crate::content::ContentProvider;
use crate::engine::{BrowsingContext, ContextFactory, ContextSpec, ScriptCallback};
use crate::events::{EventQueue, TabEvent};

/// Per-context engine options shared by every AI tab.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub user_agent: Option<String>,
    pub devtools: bool,
    pub clipboard: bool,
    pub allow_popups: bool,
    pub background: Color,
    pub download_dir: Option<PathBuf>,
}

impl EngineSettings {
    pub fn from_config(config: &SessionsConfig, download_dir: Option<PathBuf>) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            devtools: config.devtools,
            clipboard: config.clipboard,
            allow_popups: config.allow_popups,
            background: Color::from_hex(&config.background_color).unwrap_or_default(),
            download_dir,
        }
    }
}

pub fn to_wry_rect(rect: Rect) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::Position::Logical(wry::dpi::LogicalPosition::new(
            f64::from(rect.x),
            f64::from(rect.y),
        )),
        size: wry::dpi::Size::Logical(wry::dpi::LogicalSize::new(
            f64::from(rect.width),
            f64::from(rect.height),
        )),
    }
}

// =============================================================================
// FACTORY
// =============================================================================

pub struct WryFactory<W: HasWindowHandle> {
    window: Arc<W>,
    partitions_dir: PathBuf,
    events: EventQueue<TabEvent>,
    content: Option<Arc<ContentProvider>>,
    settings: EngineSettings,
}

impl<W: HasWindowHandle> WryFactory<W> {
    pub fn new(
        window: Arc<W>,
        partitions_dir: PathBuf,
        events: EventQueue<TabEvent>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            window,
            partitions_dir,
            events,
            content: None,
            settings,
        }
    }

    /// Serve internal pages (error/blocked) inside AI contexts.
    pub fn with_content(mut self, content: Arc<ContentProvider>) -> Self {
        self.content = Some(content);
        self
    }
}

impl<W: HasWindowHandle> ContextFactory for WryFactory<W> {
    type Context = WryContext;

    fn create(&mut self, spec: &ContextSpec) -> Result<WryContext, ViewError> {
        let data_dir = spec.partition.data_directory(&self.partitions_dir);
        if let Some(dir) = &data_dir {
            std::fs::create_dir_all(dir).map_err(|e| {
                ViewError::Engine(format!("partition directory {}: {e}", dir.display()))
            })?;
        }
        let incognito = !spec.partition.is_persistent();
        let mut web_context = WebContext::new(data_dir);

        let mut builder = WebViewBuilder::with_web_context(&mut web_context)
            .with_url(&spec.url)
            .with_bounds(to_wry_rect(Rect::default()))
            .with_visible(false)
            .with_incognito(incognito)
            .with_devtools(self.settings.devtools)
            .with_clipboard(self.settings.clipboard)
            .with_autoplay(true)
            .with_focused(false)
            .with_background_color(self.settings.background.to_tuple());

        for script in &spec.init_scripts {
            builder = builder.with_initialization_script(script);
        }
        if let Some(ua) = &self.settings.user_agent {
            builder = builder.with_user_agent(ua);
        }

        builder = handlers::attach_page_load_handler(builder, self.events.clone(), &spec.id);
        builder = handlers::attach_title_handler(builder, self.events.clone(), &spec.id);
        builder = handlers::attach_new_window_handler(
            builder,
            self.events.clone(),
            &spec.id,
            self.settings.allow_popups,
        );
        builder = handlers::attach_download_handlers(
            builder,
            self.events.clone(),
            &spec.id,
            self.settings.download_dir.clone(),
        );
        if let Some(content) = &self.content {
            builder = protocol::attach_custom_protocol(builder, Arc::clone(content));
        }

        let webview = builder
            .build_as_child(self.window.as_ref())
            .map_err(engine_error)?;

        debug!(
            tab = %spec.id,
            url = %spec.url,
            partition = spec.partition.name(),
            incognito,
            "webview created"
        );

        Ok(WryContext {
            webview,
            _web_context: web_context,
            id: spec.id.clone(),
            visible: false,
        })
    }
}

// =============================================================================
// CONTEXT
// =============================================================================

pub struct WryContext {
    // Dropped before the web context it was built from.
    webview: WebView,
    _web_context: WebContext,
    id: TabId,
    visible: bool,
}

impl BrowsingContext for WryContext {
    fn attach(&mut self, bounds: Rect) -> Result<(), ViewError> {
        self.webview
            .set_bounds(to_wry_rect(bounds))
            .map_err(engine_error)?;
        if !self.visible {
            self.webview.set_visible(true).map_err(engine_error)?;
            self.visible = true;
        }
        Ok(())
    }

    fn detach(&mut self) -> Result<(), ViewError> {
        if self.visible {
            self.webview.set_visible(false).map_err(engine_error)?;
            self.visible = false;
        }
        Ok(())
    }

    fn load_url(&mut self, url: &str) -> Result<(), ViewError> {
        self.webview.load_url(url).map_err(engine_error)
    }

    fn reload(&mut self) -> Result<(), ViewError> {
        self.webview.reload().map_err(engine_error)
    }

    fn evaluate(&self, script: &str) -> Result<(), ViewError> {
        self.webview.evaluate_script(script).map_err(engine_error)
    }

    fn evaluate_with_result(
        &self,
        script: &str,
        callback: ScriptCallback,
    ) -> Result<(), ViewError> {
        self.webview
            .evaluate_script_with_callback(script, callback)
            .map_err(engine_error)
    }

    fn focus(&self) -> Result<(), ViewError> {
        self.webview.focus().map_err(engine_error)
    }
}

impl Drop for WryContext {
    fn drop(&mut self) {
        if let Err(e) = self.webview.set_visible(false) {
            warn!(tab = %self.id, error = %e, "hide before destroy failed");
        }
        debug!(tab = %self.id, "webview destroyed");
    }
}
