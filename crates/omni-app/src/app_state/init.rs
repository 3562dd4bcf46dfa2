//! Window creation and view setup.

use std::path::PathBuf;
use std::sync::Arc;

use winit::dpi::{LogicalPosition, LogicalSize};
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowAttributes;

use omni_common::types::Color;
use omni_views::backend::{EngineSettings, ShellView, WryFactory};
use omni_views::content::{locate_assets, ContentProvider};
use omni_views::{ControllerSettings, EventQueue, ViewController};

use super::core::OmniApp;
use super::geometry::{load_geometry, logical_size};

impl OmniApp {
    /// Create the window, the shell page and the view controller.
    /// Returns `false` if initialization failed and the event loop should exit.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let window_config = &self.config.window;
        let geometry = load_geometry(&self.paths.window_state_file(), window_config);

        let mut attrs = WindowAttributes::default()
            .with_title(window_config.title.clone())
            .with_inner_size(LogicalSize::new(geometry.width, geometry.height))
            .with_min_inner_size(LogicalSize::new(
                window_config.min_width,
                window_config.min_height,
            ))
            .with_maximized(geometry.is_maximized);
        if let (Some(x), Some(y)) = (geometry.x, geometry.y) {
            attrs = attrs.with_position(LogicalPosition::new(x, y));
        }

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                return false;
            }
        };
        self.geometry = geometry;

        let size = logical_size(&window);
        let content = Arc::new(ContentProvider::new(assets_dir()));
        let background = Color::from_hex(&self.config.sessions.background_color).unwrap_or_default();

        // The shell goes in first so AI contexts stack above it.
        let shell = match ShellView::create(
            window.as_ref(),
            size,
            Arc::clone(&content),
            self.shell_events.clone(),
            self.config.sessions.devtools,
            background,
        ) {
            Ok(shell) => shell,
            Err(e) => {
                tracing::error!("Failed to create shell view: {e}");
                return false;
            }
        };

        let tab_events = EventQueue::new();
        let settings =
            EngineSettings::from_config(&self.config.sessions, omni_platform::download_dir().ok());
        let factory = WryFactory::new(
            Arc::clone(&window),
            self.paths.partitions_dir(),
            tab_events.clone(),
            settings,
        )
        .with_content(content);
        let controller = ViewController::new(
            factory,
            ControllerSettings::from(&self.config),
            tab_events,
            size,
        );

        self.bus_rx = Some(controller.subscribe());
        self.controller = Some(controller);
        self.shell = Some(shell);
        self.window = Some(window);
        tracing::info!(
            width = size.width,
            height = size.height,
            "Window created and views initialized"
        );
        true
    }
}

/// Bundled shell and internal pages.
fn assets_dir() -> PathBuf {
    match locate_assets() {
        Some(dir) => {
            tracing::info!(assets_dir = %dir.display(), "Serving bundled pages");
            dir
        }
        None => {
            let fallback = std::env::current_dir().unwrap_or_default().join("assets");
            tracing::warn!(
                path = %fallback.display(),
                "Assets directory not found; the shell page will not load"
            );
            fallback
        }
    }
}
