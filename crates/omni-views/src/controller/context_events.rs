//! Reaction to engine callbacks, drained on the control thread.

use omni_common::events::Event;
use omni_common::TabId;
use tracing::{debug, info, trace, warn};

use super::ViewController;
use crate::content::{error_page_url, is_internal_url, ErrorReason};
use crate::engine::{BrowsingContext, ContextFactory};
use crate::events::{ContextEvent, TabEvent, LOAD_ABORTED};
use crate::inject::WEBDRIVER_SHIM;

impl<F: ContextFactory> ViewController<F> {
    /// Handle every queued engine event. Returns how many were handled.
    pub fn pump_events(&mut self) -> usize {
        let events = self.events.drain();
        let count = events.len();
        for event in events {
            self.handle_event(event);
        }
        count
    }

    pub fn handle_event(&mut self, TabEvent { id, event }: TabEvent) {
        if self.shut_down {
            return;
        }
        let Some(session) = self.registry.get_mut(&id) else {
            trace!(tab = %id, ?event, "event for closed tab dropped");
            return;
        };

        match event {
            ContextEvent::LoadStarted { url } => {
                session.loading = true;
                session.current_url = url;
                if let Err(e) = session.context.evaluate(WEBDRIVER_SHIM) {
                    debug!(tab = %id, error = %e, "shim injection failed");
                }
                self.event_bus.publish(Event::LoadingChanged {
                    id,
                    is_loading: true,
                });
            }
            ContextEvent::LoadFinished { url } => {
                session.loading = false;
                session.current_url = url.clone();
                self.event_bus.publish(Event::LoadingChanged {
                    id: id.clone(),
                    is_loading: false,
                });
                self.probe_blocked(&id, &url);
            }
            ContextEvent::LoadFailed { url, code } => {
                session.loading = false;
                self.event_bus.publish(Event::LoadingChanged {
                    id: id.clone(),
                    is_loading: false,
                });
                if code == LOAD_ABORTED {
                    debug!(tab = %id, url = %url, "load superseded");
                    return;
                }
                warn!(tab = %id, url = %url, code, "load failed");
                self.show_error_page(&id, ErrorReason::Failed, &url);
            }
            ContextEvent::BlockedPage { url } => {
                warn!(tab = %id, url = %url, "service refused access");
                self.show_error_page(&id, ErrorReason::Blocked, &url);
            }
            ContextEvent::TitleChanged { title } => {
                trace!(tab = %id, title = %title, "title changed");
                session.title = title;
            }
            ContextEvent::PopupRequested { url } => {
                info!(tab = %id, url = %url, "popup requested");
            }
            ContextEvent::DownloadStarted { url, path } => {
                info!(tab = %id, url = %url, path = %path.display(), "download started");
            }
            ContextEvent::DownloadFinished { url, path, success } => {
                let path = path.map(|p| p.display().to_string()).unwrap_or_default();
                if success {
                    info!(tab = %id, url = %url, path = %path, "download finished");
                } else {
                    warn!(tab = %id, url = %url, "download failed");
                }
            }
        }
    }

    /// Ask the page whether it is a block notice. A positive answer comes
    /// back through the event queue as `BlockedPage`.
    fn probe_blocked(&self, id: &TabId, url: &str) {
        let Some(script) = &self.probe_script else {
            return;
        };
        if is_internal_url(url) {
            return;
        }
        let Some(session) = self.registry.get(id) else {
            return;
        };

        let queue = self.events.clone();
        let tab = id.clone();
        let page = url.to_string();
        let callback = Box::new(move |result: String| {
            if result.trim() == "true" {
                queue.push(TabEvent::new(
                    tab.clone(),
                    ContextEvent::BlockedPage { url: page.clone() },
                ));
            }
        });
        if let Err(e) = session.context.evaluate_with_result(script, callback) {
            debug!(tab = %id, error = %e, "blocked-page probe failed");
        }
    }

    /// Replace the tab's page with the internal error page. Other tabs are
    /// untouched.
    fn show_error_page(&mut self, id: &TabId, reason: ErrorReason, url: &str) {
        let Some(session) = self.registry.get_mut(id) else {
            return;
        };
        if is_internal_url(url) || is_internal_url(&session.current_url) {
            return;
        }
        let target = error_page_url(reason, url);
        if let Err(e) = session.context.load_url(&target) {
            warn!(tab = %id, error = %e, "error page load failed");
        }
    }
}
