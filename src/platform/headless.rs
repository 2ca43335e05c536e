//=========================================================================
// Headless Platform
//=========================================================================
//
// Windowless backend rendering into an in-memory framebuffer.
//
// Events are injected through a channel instead of being polled from an
// OS, and time can run on a manual clock so a frame loop can be driven
// deterministically:
//
// ```text
//   Sender<PlatformEvent> ──► get_next_event()  (try_recv, never blocks)
//   Clock::Manual         ──► get_time_in_ms()  (advanced only by delay)
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Instant;

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use super::config::PlatformConfig;
use super::event::{EventKind, PlatformEvent};
use super::raster::{Bitmap, Color, Framebuffer};
use super::timing::delay_duration;
use crate::core::{BasePath, Canvas, DrawCallback, DrawCallbacks, MediaHandle, Platform, PlatformInitError};

//=== Clock ===============================================================

#[derive(Debug, Clone, Copy)]
enum Clock {
    /// Real monotonic time since construction.
    Monotonic(Instant),

    /// Simulated time; only `delay` and `set_time_ms` move it.
    Manual(f64),
}

//=== HeadlessPlatform ====================================================

/// Platform without a window.
///
/// Created via [`PlatformConfig::build_headless`].
pub struct HeadlessPlatform {
    draw_callbacks: DrawCallbacks<Framebuffer>,
    framebuffer: Framebuffer,
    clear_color: Color,

    event_sender: Sender<PlatformEvent>,
    event_receiver: Receiver<PlatformEvent>,

    clock: Clock,
    delays: Vec<f64>,
    frames_presented: u64,
    base_path: BasePath,
    shutdown: bool,
}

impl HeadlessPlatform {
    pub(crate) fn new(config: PlatformConfig) -> Self {
        let (event_sender, event_receiver) = unbounded();
        Self {
            draw_callbacks: DrawCallbacks::new(),
            framebuffer: Framebuffer::new(config.width, config.height, config.clear_color),
            clear_color: config.clear_color,
            event_sender,
            event_receiver,
            clock: Clock::Monotonic(Instant::now()),
            delays: Vec::new(),
            frames_presented: 0,
            base_path: config.base_path(),
            shutdown: false,
        }
    }

    /// Switches to a simulated clock starting at `start_ms`.
    pub fn with_manual_clock(mut self, start_ms: f64) -> Self {
        self.clock = Clock::Manual(start_ms);
        self
    }

    //--- Test/Driver Accessors --------------------------------------------

    /// Handle for injecting events into the queue.
    pub fn event_sender(&self) -> Sender<PlatformEvent> {
        self.event_sender.clone()
    }

    /// Number of events still queued.
    pub fn pending_events(&self) -> usize {
        self.event_receiver.len()
    }

    /// Moves the manual clock. Ignored on the monotonic clock.
    pub fn set_time_ms(&mut self, time_ms: f64) {
        if let Clock::Manual(now) = &mut self.clock {
            *now = time_ms;
        }
    }

    /// Every duration `delay` actually slept for, in call order.
    pub fn delays(&self) -> &[f64] {
        &self.delays
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn is_shutdown(&self) -> bool {
        self.shutdown
    }
}

//=== Platform Contract ===================================================

impl Platform for HeadlessPlatform {
    type Event = PlatformEvent;
    type EventKind = EventKind;
    type Media = Bitmap;
    type Canvas = Framebuffer;

    const QUIT_EVENT: EventKind = EventKind::Quit;

    fn init(&mut self) -> Result<(), PlatformInitError> {
        self.framebuffer.fill(self.clear_color);
        info!(target: "platform", "Headless platform initialized");
        Ok(())
    }

    fn shutdown(&mut self) {
        if !self.shutdown {
            debug!(target: "platform", "Headless platform shut down");
        }
        self.shutdown = true;
    }

    fn get_next_event(&mut self) -> Option<PlatformEvent> {
        if self.shutdown {
            return None;
        }
        self.event_receiver.try_recv().ok()
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
        self.frames_presented += 1;
        trace!(target: "platform", "Frame {} presented", self.frames_presented);
    }

    fn get_time_in_ms(&self) -> f64 {
        match self.clock {
            Clock::Monotonic(epoch) => epoch.elapsed().as_secs_f64() * 1000.0,
            Clock::Manual(now) => now,
        }
    }

    fn delay(&mut self, time_in_ms: f64) {
        let Some(duration) = delay_duration(time_in_ms) else {
            return;
        };
        self.delays.push(time_in_ms);

        match &mut self.clock {
            Clock::Monotonic(_) => thread::sleep(duration),
            Clock::Manual(now) => *now += time_in_ms,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::KeyCode;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn platform() -> HeadlessPlatform {
        PlatformConfig::new().with_size(100, 60).build_headless()
    }

    #[test]
    fn get_next_event_drains_in_order_without_blocking() {
        let mut platform = platform();
        let tx = platform.event_sender();

        assert_eq!(platform.get_next_event(), None, "Empty queue must not block");

        tx.send(PlatformEvent::KeyDown(KeyCode::KeyA)).unwrap();
        tx.send(PlatformEvent::Quit).unwrap();

        assert_eq!(platform.get_next_event(), Some(PlatformEvent::KeyDown(KeyCode::KeyA)));
        assert_eq!(platform.get_next_event(), Some(PlatformEvent::Quit));
        assert_eq!(platform.get_next_event(), None);
    }

    #[test]
    fn shutdown_stops_event_production() {
        let mut platform = platform();
        platform.event_sender().send(PlatformEvent::Quit).unwrap();

        platform.shutdown();
        platform.shutdown();

        assert!(platform.is_shutdown());
        assert_eq!(platform.get_next_event(), None);
    }

    #[test]
    fn refresh_clears_then_runs_callbacks_in_order() {
        let mut platform = platform();
        let order = Rc::new(RefCell::new(Vec::new()));

        let a = order.clone();
        platform.add_draw_callback(Box::new(move |fb: &mut Framebuffer| {
            a.borrow_mut().push(("A", fb.pixel(0, 0)));
            fb.fill(Color::BLACK);
        }));
        let b = order.clone();
        platform.add_draw_callback(Box::new(move |fb: &mut Framebuffer| {
            b.borrow_mut().push(("B", fb.pixel(0, 0)));
        }));

        platform.refresh_window();
        platform.refresh_window();

        let white = Some(Color::WHITE.to_argb());
        let black = Some(Color::BLACK.to_argb());
        assert_eq!(
            *order.borrow(),
            vec![("A", white), ("B", black), ("A", white), ("B", black)],
            "Each refresh starts from a cleared surface"
        );
        assert_eq!(platform.frames_presented(), 2);
    }

    #[test]
    fn show_centered_image_without_media_is_noop() {
        let mut platform = platform();
        platform.init().unwrap();
        let before = platform.framebuffer().clone();

        platform.show_centered_image(None);

        assert_eq!(platform.framebuffer(), &before);
    }

    #[test]
    fn load_media_from_missing_path_is_empty() {
        let platform = platform();
        assert!(platform.load_media(Path::new("/no/such/table_tennis.bmp")).is_empty());
    }

    #[test]
    fn manual_clock_advances_only_on_delay() {
        let mut platform = platform().with_manual_clock(10.0);
        assert_eq!(platform.get_time_in_ms(), 10.0);

        platform.delay(5.5);
        assert_eq!(platform.get_time_in_ms(), 15.5);

        platform.delay(0.0);
        platform.delay(-3.0);
        assert_eq!(platform.get_time_in_ms(), 15.5);
        assert_eq!(platform.delays(), &[5.5]);

        platform.set_time_ms(2.0);
        assert_eq!(platform.get_time_in_ms(), 2.0);
    }

    #[test]
    fn unbounded_delay_request_does_not_panic() {
        let mut platform = platform().with_manual_clock(0.0);

        platform.delay(f64::INFINITY);
        platform.delay(f64::NAN);

        assert_eq!(platform.delays().len(), 1);
        assert!(platform.get_time_in_ms().is_infinite());
    }

    #[test]
    fn monotonic_clock_never_goes_backwards() {
        let platform = platform();
        let first = platform.get_time_in_ms();
        let second = platform.get_time_in_ms();
        assert!(second >= first);
    }

    #[test]
    fn image_path_is_under_base_path() {
        let platform = PlatformConfig::new().with_base_path("/srv/pong").build_headless();
        assert_eq!(platform.image_path(), Path::new("/srv/pong").join("Images"));
    }
}
