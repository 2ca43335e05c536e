//=========================================================================
// Frame Engine
//
// Backend-agnostic loop driver.
//
// Architecture:
// ```text
//     FrameEngine::new(platform) ──init()──> run_event_loop() ──> Stopped
//
//     while Running:
//       1. wait_for_tick()   pace against the previous tick
//       2. drain_events()    poll until empty, Quit → Stopped
//       3. draw()            Platform::refresh_window()
// ```
//
// The engine owns only the run state and the last tick timestamp. All
// native resources belong to the platform, which it owns by value.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::Path;

use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use crate::core::{MediaHandle, Platform, PlatformInitError};

//=== EngineState =========================================================

/// Run state of a [`FrameEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Initial state; the frame loop keeps iterating.
    Running,

    /// A quit event was observed or quit was forced externally.
    Stopped,
}

//=== FrameEngine =========================================================

/// Fixed-cadence frame loop over any [`Platform`].
///
/// # Examples
///
/// ```no_run
/// use pong_engine::prelude::*;
///
/// let platform = PlatformConfig::new().build()?;
/// let mut engine = FrameEngine::new(platform);
/// engine.init()?;
///
/// let image = engine.load_media(engine.platform().image_path().join("table_tennis.bmp"));
/// if let Some(bitmap) = image.into_inner() {
///     engine.add_draw_callback(move |canvas: &mut Framebuffer| {
///         canvas.show_centered_image(Some(&bitmap));
///     });
/// }
///
/// engine.run_event_loop();
/// # Ok::<(), PlatformInitError>(())
/// ```
pub struct FrameEngine<P: Platform> {
    platform: P,
    state: EngineState,
    last_tick_time: f64,
}

impl<P: Platform> FrameEngine<P> {
    //--- Construction -----------------------------------------------------

    /// Wraps an already-constructed platform. The engine starts `Running`.
    pub fn new(platform: P) -> Self {
        Self {
            platform,
            state: EngineState::Running,
            last_tick_time: 0.0,
        }
    }

    /// Runs the platform's one-time setup. Call before [`run_event_loop`].
    ///
    /// [`run_event_loop`]: FrameEngine::run_event_loop
    ///
    /// # Errors
    ///
    /// Propagates the platform's [`PlatformInitError`]; nothing is retried.
    pub fn init(&mut self) -> Result<(), PlatformInitError> {
        info!(target: "engine", "Initializing platform");
        self.platform.init()?;
        info!(target: "engine", "Platform initialization complete");
        Ok(())
    }

    //--- Media & Drawing --------------------------------------------------

    /// Loads media through the platform. Empty on missing/undecodable files.
    pub fn load_media(&self, path: impl AsRef<Path>) -> MediaHandle<P::Media> {
        let path = path.as_ref();
        let media = self.platform.load_media(path);
        if media.is_empty() {
            debug!(target: "engine", "No media loaded from {}", path.display());
        }
        media
    }

    /// Registers a callback run on every refresh, after those registered
    /// before it.
    pub fn add_draw_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&mut P::Canvas) + 'static,
    {
        self.platform.add_draw_callback(Box::new(callback));
    }

    pub fn show_centered_image(&mut self, media: Option<&P::Media>) {
        self.platform.show_centered_image(media);
    }

    /// Renders one frame.
    pub fn draw(&mut self) {
        self.platform.refresh_window();
    }

    //--- Execution --------------------------------------------------------

    /// Drives tick → drain → draw until the engine is stopped.
    ///
    /// Returns immediately if the engine is already stopped.
    pub fn run_event_loop(&mut self) {
        info!(target: "engine", "Entering frame loop");
        let mut frames: u64 = 0;

        while self.state == EngineState::Running {
            self.wait_for_tick();
            self.drain_events();
            self.draw();
            frames += 1;
        }

        info!(target: "engine", "Frame loop exited after {} frames", frames);
    }

    /// Polls until the queue is empty. A quit event stops the engine but
    /// does not cut the drain short.
    ///
    /// Returns the number of events consumed.
    pub(crate) fn drain_events(&mut self) -> usize {
        let mut drained = 0;

        while let Some(event) = self.platform.get_next_event() {
            let kind = P::classify(&event);
            trace!(target: "engine", "Event {:?}", kind);

            if kind == P::QUIT_EVENT {
                if self.state == EngineState::Running {
                    info!(target: "engine", "Quit requested");
                }
                self.state = EngineState::Stopped;
            }
            drained += 1;
        }

        drained
    }

    /// Sleeps for the time elapsed since the last tick, then resamples
    /// the clock as the new tick timestamp.
    ///
    /// The first tick compares against a zero baseline.
    pub(crate) fn wait_for_tick(&mut self) {
        let current_tick_time = self.platform.get_time_in_ms();
        let time_to_next_tick = current_tick_time - self.last_tick_time;

        if time_to_next_tick > 0.0 {
            self.platform.delay(time_to_next_tick);
        }

        self.last_tick_time = self.platform.get_time_in_ms();
    }

    //--- State ------------------------------------------------------------

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// `true` once the engine has stopped.
    pub fn quit(&self) -> bool {
        self.state == EngineState::Stopped
    }

    /// Forces the run state. `true` stops the loop at its next check.
    pub fn set_quit(&mut self, quit: bool) {
        self.state = if quit {
            EngineState::Stopped
        } else {
            EngineState::Running
        };
    }

    /// Stops the engine and marks the platform as torn down.
    pub fn shutdown(&mut self) {
        self.state = EngineState::Stopped;
        self.platform.shutdown();
    }

    //--- Accessors --------------------------------------------------------

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
