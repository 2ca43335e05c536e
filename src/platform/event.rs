//=========================================================================
// Platform Events
//=========================================================================
//
// Backend-neutral input events produced by the bundled platforms, and
// the kind tag the frame engine classifies them by.
//
//=========================================================================

//=== KeyCode =============================================================

/// Physical key identifier.
///
/// Only the keys a presentation loop plausibly cares about are named;
/// everything else maps to `Unidentified`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    ArrowDown, ArrowLeft, ArrowRight, ArrowUp,

    Space, Enter, Escape,

    Unidentified,
}

//=== MouseButton =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other,
}

//=== PlatformEvent =======================================================

/// Event returned by `Platform::get_next_event` for the bundled backends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlatformEvent {
    /// The user (or OS) asked the application to close.
    Quit,

    KeyDown(KeyCode),
    KeyUp(KeyCode),

    MouseMoved { x: f32, y: f32 },
    MouseButtonDown(MouseButton),
    MouseButtonUp(MouseButton),

    /// Drawable area changed size, in physical pixels.
    Resized { width: u32, height: u32 },
}

impl PlatformEvent {
    /// Classification tag of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Quit => EventKind::Quit,
            Self::KeyDown(_) | Self::KeyUp(_) => EventKind::Keyboard,
            Self::MouseMoved { .. } | Self::MouseButtonDown(_) | Self::MouseButtonUp(_) => {
                EventKind::Mouse
            }
            Self::Resized { .. } => EventKind::Window,
        }
    }
}

//=== EventKind ===========================================================

/// Totally-ordered event classification; `Quit` is the quit tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    Quit,
    Keyboard,
    Mouse,
    Window,
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_is_classified_as_quit() {
        assert_eq!(PlatformEvent::Quit.kind(), EventKind::Quit);
    }

    #[test]
    fn input_events_are_never_quit() {
        let events = [
            PlatformEvent::KeyDown(KeyCode::Escape),
            PlatformEvent::KeyUp(KeyCode::KeyQ),
            PlatformEvent::MouseMoved { x: 1.0, y: 2.0 },
            PlatformEvent::MouseButtonDown(MouseButton::Left),
            PlatformEvent::MouseButtonUp(MouseButton::Right),
            PlatformEvent::Resized { width: 10, height: 10 },
        ];

        for event in events {
            assert_ne!(event.kind(), EventKind::Quit, "{:?} must not quit", event);
        }
    }

    #[test]
    fn event_kinds_are_totally_ordered() {
        let mut kinds = vec![EventKind::Window, EventKind::Quit, EventKind::Mouse, EventKind::Keyboard];
        kinds.sort();
        assert_eq!(
            kinds,
            vec![EventKind::Quit, EventKind::Keyboard, EventKind::Mouse, EventKind::Window]
        );
    }
}
