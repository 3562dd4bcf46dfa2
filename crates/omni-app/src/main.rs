mod app_state;
mod cli;

use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

use omni_config::OmniConfig;
use omni_platform::AppPaths;

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let path = omni_platform::crash_report::write_crash_report(info);

        eprintln!("\n--- Omni crashed ---");
        if let Some(p) = &path {
            eprintln!("Crash report written to: {}", p.display());
        }
        eprintln!("--------------------\n");

        default_hook(info);
    }));
}

fn main() {
    install_panic_hook();

    let args = cli::parse();

    let directive: Directive = args
        .log_level
        .as_deref()
        .and_then(|level| level.parse().ok())
        .unwrap_or_else(|| LevelFilter::INFO.into());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();

    tracing::info!("Omni v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {}", path.display());
    }
    let config = omni_config::load_config(args.config.as_deref()).unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        OmniConfig::default()
    });
    tracing::info!("Config loaded ({} services)", config.services.len());

    let paths = match AppPaths::resolve(args.data_dir.clone()) {
        Ok(paths) => paths,
        Err(e) => {
            tracing::error!("Cannot resolve data directory: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = paths.ensure() {
        tracing::warn!("Failed to create data directories: {e}");
    }

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            tracing::error!("Failed to create event loop: {e}");
            std::process::exit(1);
        }
    };
    let mut app = app_state::OmniApp::new(config, paths, args.fresh);

    tracing::info!("Entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {e}");
    }
    tracing::info!("Shutdown complete");
}
