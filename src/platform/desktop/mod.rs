//=========================================================================
// Desktop Platform
//
// Winit window + wgpu surface behind the `Platform` contract.
//
// Architecture:
// ```text
//  get_next_event()
//   ├─ try_recv() ──────────────────────────► PlatformEvent
//   └─ queue empty → pump_app_events(0 ms)
//                      └─ WindowHandler ──► Sender<PlatformEvent>
//
//  refresh_window()
//   ├─ Framebuffer::fill(clear colour)
//   ├─ DrawCallbacks::invoke_all(&mut Framebuffer)
//   └─ Presenter::present(&Framebuffer) ──► swapchain
// ```
//
// Key Design Decisions:
// - **Non-blocking polling**: the event loop is pumped with a zero
//   timeout only when the queue runs dry, so the frame engine owns the
//   cadence instead of winit
// - **Eager acquisition**: window and surface are created in `new()`;
//   each failing step maps to its own `PlatformInitError` subtype
// - **Teardown order**: draw callbacks (and the media they captured) are
//   dropped before the surface, the surface before the window, the
//   window before the event loop
//
//=========================================================================

//=== Submodules ==========================================================

mod event_mapper;
mod gpu;
mod window_handler;

//=== External Crates =====================================================

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Receiver};
use log::*;
use winit::dpi::PhysicalSize;
use winit::event_loop::EventLoop;
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowAttributes};

//=== Internal Imports ====================================================

use super::config::PlatformConfig;
use super::event::{EventKind, PlatformEvent};
use super::raster::{Bitmap, Color, Framebuffer};
use super::timing::delay_duration;
use crate::core::{BasePath, Canvas, DrawCallback, DrawCallbacks, MediaHandle, Platform, PlatformInitError};
use gpu::{FrameStatus, Presenter};
use window_handler::WindowHandler;

//=== Constants ===========================================================

/// Pump iterations allowed for the OS to deliver the first `resumed()`.
const WINDOW_CREATION_ATTEMPTS: usize = 50;
const WINDOW_CREATION_POLL: Duration = Duration::from_millis(10);

//=== DesktopPlatform =====================================================

/// Windowed backend.
///
/// Created via [`PlatformConfig::build`]. Must stay on the thread that
/// created it (winit requirement on macOS).
pub struct DesktopPlatform {
    // Field order is drop order.
    draw_callbacks: DrawCallbacks<Framebuffer>,
    framebuffer: Framebuffer,
    presenter: Presenter,
    window: Arc<Window>,
    handler: WindowHandler,
    event_receiver: Receiver<PlatformEvent>,
    event_loop: EventLoop<()>,

    clear_color: Color,
    epoch: Instant,
    base_path: BasePath,
    shutdown: bool,
}

impl DesktopPlatform {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(config: PlatformConfig) -> Result<Self, PlatformInitError> {
        let mut event_loop =
            EventLoop::new().map_err(|e| PlatformInitError::DeviceInit(e.to_string()))?;

        let attributes = WindowAttributes::default()
            .with_title(config.title.clone())
            .with_inner_size(PhysicalSize::new(config.width, config.height))
            .with_resizable(false);

        let (event_sender, event_receiver) = unbounded();
        let mut handler = WindowHandler::new(attributes, event_sender);

        //--- 1. Let the OS deliver resumed() and create the window -------
        for _ in 0..WINDOW_CREATION_ATTEMPTS {
            if let PumpStatus::Exit(code) =
                event_loop.pump_app_events(Some(WINDOW_CREATION_POLL), &mut handler)
            {
                return Err(PlatformInitError::WindowCreation(format!(
                    "event loop exited during startup (code {})",
                    code
                )));
            }
            if handler.has_settled() {
                break;
            }
        }

        if let Some(e) = handler.take_creation_error() {
            return Err(PlatformInitError::WindowCreation(e));
        }

        let window = handler.window().cloned().ok_or_else(|| {
            PlatformInitError::WindowCreation("window was not created by the event loop".into())
        })?;

        //--- 2. Acquire the drawing surface ------------------------------
        let size = window.inner_size();
        let presenter = Presenter::new(window.clone())?;
        let framebuffer = Framebuffer::new(size.width, size.height, config.clear_color);

        info!(
            target: "platform",
            "Desktop platform ready ({}x{})",
            size.width,
            size.height
        );

        Ok(Self {
            draw_callbacks: DrawCallbacks::new(),
            framebuffer,
            presenter,
            window,
            handler,
            event_receiver,
            event_loop,
            clear_color: config.clear_color,
            epoch: Instant::now(),
            base_path: config.base_path(),
            shutdown: false,
        })
    }

    //--- Internal Helpers -------------------------------------------------

    /// Processes pending OS events without waiting.
    fn pump(&mut self) {
        if let PumpStatus::Exit(code) =
            self.event_loop.pump_app_events(Some(Duration::ZERO), &mut self.handler)
        {
            info!(target: "platform", "Event loop exited (code {})", code);
            self.handler.push(PlatformEvent::Quit);
        }
    }

    fn apply_resize(&mut self, width: u32, height: u32) {
        debug!(target: "platform", "Resizing drawable to {}x{}", width, height);
        self.presenter.resize(width, height);
        self.framebuffer.resize(width, height, self.clear_color);
    }

    fn present(&mut self) -> FrameStatus {
        let status = self.presenter.present(&self.framebuffer);
        if status == FrameStatus::Presented {
            self.window.pre_present_notify();
        }
        status
    }
}

//=== Platform Contract ===================================================

impl Platform for DesktopPlatform {
    type Event = PlatformEvent;
    type EventKind = EventKind;
    type Media = Bitmap;
    type Canvas = Framebuffer;

    const QUIT_EVENT: EventKind = EventKind::Quit;

    fn init(&mut self) -> Result<(), PlatformInitError> {
        self.framebuffer.fill(self.clear_color);
        match self.present() {
            FrameStatus::Fatal => Err(PlatformInitError::SurfaceAcquisition(
                "surface lost before the first frame".into(),
            )),
            _ => Ok(()),
        }
    }

    fn shutdown(&mut self) {
        if !self.shutdown {
            info!(target: "platform", "Desktop platform shut down");
        }
        self.shutdown = true;
    }

    fn get_next_event(&mut self) -> Option<PlatformEvent> {
        if self.shutdown {
            return None;
        }

        let event = match self.event_receiver.try_recv() {
            Ok(event) => event,
            Err(_) => {
                self.pump();
                self.event_receiver.try_recv().ok()?
            }
        };

        if let PlatformEvent::Resized { width, height } = event {
            self.apply_resize(width, height);
        }

        Some(event)
    }

    fn classify(event: &PlatformEvent) -> EventKind {
        event.kind()
    }

    fn load_media(&self, path: &Path) -> MediaHandle<Bitmap> {
        MediaHandle::from(Bitmap::load(path))
    }

    fn show_centered_image(&mut self, media: Option<&Bitmap>) {
        self.framebuffer.show_centered_image(media);
    }

    fn base_path(&self) -> PathBuf {
        self.base_path.get().to_path_buf()
    }

    fn add_draw_callback(&mut self, callback: DrawCallback<Framebuffer>) {
        self.draw_callbacks.push(callback);
        debug!(
            target: "platform",
            "Draw callback registered ({} total)",
            self.draw_callbacks.len()
        );
    }

    fn refresh_window(&mut self) {
        self.framebuffer.fill(self.clear_color);
        self.draw_callbacks.invoke_all(&mut self.framebuffer);

        if self.present() == FrameStatus::Fatal {
            error!(target: "platform", "Frame dropped: surface unusable");
        }
    }

    fn get_time_in_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }

    fn delay(&mut self, time_in_ms: f64) {
        if let Some(duration) = delay_duration(time_in_ms) {
            thread::sleep(duration);
        }
    }
}

impl Drop for DesktopPlatform {
    fn drop(&mut self) {
        // Media captured by callbacks goes first; fields then drop in
        // declaration order (surface → window → event loop).
        self.draw_callbacks.release();
        info!(target: "platform", "Desktop platform released");
    }
}
