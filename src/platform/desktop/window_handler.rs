//=========================================================================
// Window Handler
//=========================================================================
//
// Winit `ApplicationHandler` driven by `pump_app_events`.
//
// Creates the window on the first `resumed()` and forwards mapped window
// events into a channel the platform drains from `get_next_event()`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

use crossbeam_channel::Sender;
use log::{debug, error, info, trace};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes, WindowId};

//=== Internal Dependencies ===============================================

use super::event_mapper::map_window_event;
use crate::platform::event::PlatformEvent;

//=== WindowHandler =======================================================

pub(super) struct WindowHandler {
    attributes: WindowAttributes,
    window: Option<Arc<Window>>,
    creation_error: Option<String>,
    event_sender: Sender<PlatformEvent>,
}

impl WindowHandler {
    pub(super) fn new(attributes: WindowAttributes, event_sender: Sender<PlatformEvent>) -> Self {
        Self {
            attributes,
            window: None,
            creation_error: None,
            event_sender,
        }
    }

    pub(super) fn window(&self) -> Option<&Arc<Window>> {
        self.window.as_ref()
    }

    pub(super) fn take_creation_error(&mut self) -> Option<String> {
        self.creation_error.take()
    }

    pub(super) fn has_settled(&self) -> bool {
        self.window.is_some() || self.creation_error.is_some()
    }

    /// Queues an event produced outside of `window_event` (e.g. loop exit).
    pub(super) fn push(&self, event: PlatformEvent) {
        // The receiver lives in the same platform struct, so this only fails
        // during teardown.
        let _ = self.event_sender.send(event);
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for WindowHandler {
    /// Creates the window if it does not exist yet.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists");
            return;
        }

        match event_loop.create_window(self.attributes.clone()) {
            Ok(window) => {
                let size = window.inner_size();
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    size.width,
                    size.height,
                    window.scale_factor()
                );
                self.window = Some(Arc::new(window));
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.creation_error = Some(e.to_string());
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match map_window_event(&event) {
            Some(mapped) => {
                trace!(target: "platform::input", "{:?}", mapped);
                self.push(mapped);
            }
            None => {
                // Focus, IME, redraw requests, ... are not needed by the loop.
            }
        }
    }
}
