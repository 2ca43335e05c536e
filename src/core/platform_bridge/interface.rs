//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// The capability contract every backend implements so the frame engine
// can drive it without knowing anything about windows, surfaces or
// native event types.
//
// Contract summary:
// ```text
//   init()                → one-time setup (paint first frame)
//   get_next_event()      → non-blocking poll, None when queue is empty
//   classify(&event)      → EventKind, compared against QUIT_EVENT
//   load_media(path)      → MediaHandle (empty on missing/undecodable)
//   show_centered_image() → blit centered, no-op on None
//   add_draw_callback()   → append to ordered registry
//   refresh_window()      → clear → callbacks (in order) → present
//   get_time_in_ms()      → monotonic milliseconds
//   delay(ms)             → sleep, no-op for ms <= 0
//   shutdown()            → idempotent torn-down flag
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::path::{Path, PathBuf};

//=== Internal Dependencies ===============================================

use super::PlatformInitError;
use crate::core::assets::IMAGE_DIR;
use crate::core::geometry::Rect;
use crate::core::media::MediaHandle;

//=== Canvas ==============================================================

/// Drawable surface of the frame currently being rendered.
///
/// Draw callbacks receive the canvas as their only argument; it is the
/// one piece of platform state they are allowed to touch.
pub trait Canvas {
    /// Media type this canvas can render.
    type Media;

    /// Drawable area in surface pixels.
    fn bounds(&self) -> Rect;

    /// Renders `media` centered within [`Canvas::bounds`].
    ///
    /// Does nothing when `media` is `None`.
    fn show_centered_image(&mut self, media: Option<&Self::Media>);
}

//=== Draw Callbacks ======================================================

/// Per-frame drawing procedure.
pub type DrawCallback<C> = Box<dyn FnMut(&mut C)>;

/// Append-only, insertion-ordered callback registry.
///
/// Callbacks live as long as the registry; there is no removal API.
pub struct DrawCallbacks<C> {
    callbacks: Vec<DrawCallback<C>>,
}

impl<C> DrawCallbacks<C> {
    pub fn new() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }

    pub fn push(&mut self, callback: DrawCallback<C>) {
        self.callbacks.push(callback);
    }

    /// Invokes every callback in registration order.
    pub fn invoke_all(&mut self, canvas: &mut C) {
        for callback in &mut self.callbacks {
            callback(canvas);
        }
    }

    /// Drops all callbacks (and anything they captured).
    pub(crate) fn release(&mut self) {
        self.callbacks.clear();
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl<C> Default for DrawCallbacks<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for DrawCallbacks<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawCallbacks")
            .field("len", &self.callbacks.len())
            .finish()
    }
}

//=== Platform ============================================================

/// Backend capability contract driven by [`FrameEngine`](crate::FrameEngine).
///
/// An implementation owns every native resource it touches (window,
/// drawable surface, event source) and releases them when dropped,
/// regardless of how the frame loop ended.
///
/// # Implementing
///
/// ```no_run
/// # use std::path::{Path, PathBuf};
/// # use pong_engine::core::{Canvas, DrawCallback, MediaHandle, Platform, PlatformInitError, Rect};
/// struct Null;
/// struct NullCanvas;
///
/// impl Canvas for NullCanvas {
///     type Media = ();
///     fn bounds(&self) -> Rect { Rect::default() }
///     fn show_centered_image(&mut self, _media: Option<&()>) {}
/// }
///
/// impl Platform for Null {
///     type Event = u8;
///     type EventKind = u8;
///     type Media = ();
///     type Canvas = NullCanvas;
///     const QUIT_EVENT: u8 = 0;
///
///     fn init(&mut self) -> Result<(), PlatformInitError> { Ok(()) }
///     fn get_next_event(&mut self) -> Option<u8> { None }
///     fn classify(event: &u8) -> u8 { *event }
///     fn load_media(&self, _path: &Path) -> MediaHandle<()> { MediaHandle::empty() }
///     fn show_centered_image(&mut self, _media: Option<&()>) {}
///     fn add_draw_callback(&mut self, _callback: DrawCallback<NullCanvas>) {}
///     fn refresh_window(&mut self) {}
///     fn get_time_in_ms(&self) -> f64 { 0.0 }
///     fn delay(&mut self, _time_in_ms: f64) {}
///     fn shutdown(&mut self) {}
///     fn base_path(&self) -> PathBuf { PathBuf::from(".") }
/// }
/// ```
pub trait Platform {
    /// Backend-defined input event.
    type Event;

    /// Classification tag of an event.
    type EventKind: Copy + Ord + fmt::Debug;

    /// Loaded, renderable media resource.
    type Media;

    /// Surface handed to draw callbacks during [`Platform::refresh_window`].
    type Canvas: Canvas<Media = Self::Media>;

    /// Event kind signaling that the user requested termination.
    const QUIT_EVENT: Self::EventKind;

    //--- Lifecycle --------------------------------------------------------

    /// One-time setup after construction (e.g. painting the first frame).
    ///
    /// # Errors
    ///
    /// Returns [`PlatformInitError`] if the underlying device cannot be used.
    fn init(&mut self) -> Result<(), PlatformInitError>;

    /// Marks the backend as torn down. Idempotent.
    ///
    /// After shutdown no further events are produced.
    fn shutdown(&mut self);

    //--- Events -----------------------------------------------------------

    /// Returns the next pending event without blocking.
    fn get_next_event(&mut self) -> Option<Self::Event>;

    /// Maps an event to its kind. Pure and total.
    fn classify(event: &Self::Event) -> Self::EventKind;

    //--- Media ------------------------------------------------------------

    /// Loads a media resource from `path`.
    ///
    /// Returns an empty handle when the file does not exist or cannot be
    /// decoded.
    fn load_media(&self, path: &Path) -> MediaHandle<Self::Media>;

    /// Renders `media` centered on the current drawable. No-op for `None`.
    fn show_centered_image(&mut self, media: Option<&Self::Media>);

    /// Directory assets are resolved against.
    fn base_path(&self) -> PathBuf;

    /// Directory image assets live in (`<base>/Images`).
    fn image_path(&self) -> PathBuf {
        self.base_path().join(IMAGE_DIR)
    }

    //--- Rendering --------------------------------------------------------

    /// Appends a callback invoked on every subsequent refresh.
    fn add_draw_callback(&mut self, callback: DrawCallback<Self::Canvas>);

    /// Clears the drawable, runs every draw callback in registration
    /// order, then presents the result.
    fn refresh_window(&mut self);

    //--- Time -------------------------------------------------------------

    /// Monotonic time since an arbitrary epoch, in milliseconds.
    fn get_time_in_ms(&self) -> f64;

    /// Blocks for at least `time_in_ms` milliseconds. No-op for `<= 0`.
    fn delay(&mut self, time_in_ms: f64);
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn callbacks_run_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut callbacks = DrawCallbacks::<Vec<&'static str>>::new();

        let a = log.clone();
        callbacks.push(Box::new(move |_| a.borrow_mut().push("A")));
        let b = log.clone();
        callbacks.push(Box::new(move |_| b.borrow_mut().push("B")));

        let mut canvas = Vec::new();
        for _ in 0..3 {
            callbacks.invoke_all(&mut canvas);
        }

        assert_eq!(*log.borrow(), vec!["A", "B", "A", "B", "A", "B"]);
    }

    #[test]
    fn callbacks_receive_the_canvas() {
        let mut callbacks = DrawCallbacks::<Vec<u32>>::new();
        callbacks.push(Box::new(|canvas| canvas.push(1)));
        callbacks.push(Box::new(|canvas| canvas.push(2)));

        let mut canvas = Vec::new();
        callbacks.invoke_all(&mut canvas);

        assert_eq!(canvas, vec![1, 2]);
    }

    #[test]
    fn release_drops_captured_state() {
        let shared = Rc::new(());
        let captured = shared.clone();
        let mut callbacks = DrawCallbacks::<()>::new();
        callbacks.push(Box::new(move |_| {
            let _ = &captured;
        }));

        assert_eq!(Rc::strong_count(&shared), 2);
        callbacks.release();
        assert_eq!(Rc::strong_count(&shared), 1);
        assert!(callbacks.is_empty());
    }

    #[test]
    fn empty_registry_is_noop() {
        let mut callbacks = DrawCallbacks::<u32>::default();
        let mut canvas = 5;
        callbacks.invoke_all(&mut canvas);
        assert_eq!(canvas, 5);
        assert_eq!(callbacks.len(), 0);
    }
}
