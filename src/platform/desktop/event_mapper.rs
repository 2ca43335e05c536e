//=========================================================================
// Desktop Event Mapper
//
// Converts Winit window events to the engine's `PlatformEvent` type,
// keeping OS-specific input out of everything above the platform layer.
//
// Responsibilities:
// - Translate close requests into `PlatformEvent::Quit`
// - Translate keyboard, mouse and resize events
// - Drop everything the frame loop has no use for (focus, IME, ...)
//
//=========================================================================

use winit::event::{ElementState, KeyEvent, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

use crate::platform::event::{KeyCode, MouseButton, PlatformEvent};

//=== Key Conversion ======================================================
//
// Only a subset of codes is named; all others map to `Unidentified`.
//

impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Numeric keys -----------------------------------------------------
            Digit0 => KeyCode::Digit0, Digit1 => KeyCode::Digit1,
            Digit2 => KeyCode::Digit2, Digit3 => KeyCode::Digit3,
            Digit4 => KeyCode::Digit4, Digit5 => KeyCode::Digit5,
            Digit6 => KeyCode::Digit6, Digit7 => KeyCode::Digit7,
            Digit8 => KeyCode::Digit8, Digit9 => KeyCode::Digit9,

            //--- Alphabetic keys --------------------------------------------------
            KeyA => KeyCode::KeyA, KeyB => KeyCode::KeyB, KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD, KeyE => KeyCode::KeyE, KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG, KeyH => KeyCode::KeyH, KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ, KeyK => KeyCode::KeyK, KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM, KeyN => KeyCode::KeyN, KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP, KeyQ => KeyCode::KeyQ, KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS, KeyT => KeyCode::KeyT, KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV, KeyW => KeyCode::KeyW, KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY, KeyZ => KeyCode::KeyZ,

            //--- Navigation / control ---------------------------------------------
            ArrowDown => KeyCode::ArrowDown, ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight, ArrowUp => KeyCode::ArrowUp,
            Space => KeyCode::Space, Enter => KeyCode::Enter, Escape => KeyCode::Escape,

            //--- Fallback ---------------------------------------------------------
            _ => KeyCode::Unidentified,
        }
    }
}

impl From<PhysicalKey> for KeyCode {
    fn from(key: PhysicalKey) -> Self {
        match key {
            PhysicalKey::Code(code) => KeyCode::from(code),
            PhysicalKey::Unidentified(_) => KeyCode::Unidentified,
        }
    }
}

//=== Mouse Conversion ====================================================

impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

//=== Window Event Conversion =============================================

/// Maps a Winit window event, returning `None` for events the engine ignores.
pub(super) fn map_window_event(event: &WindowEvent) -> Option<PlatformEvent> {
    match event {
        WindowEvent::CloseRequested | WindowEvent::Destroyed => Some(PlatformEvent::Quit),

        WindowEvent::KeyboardInput {
            event: KeyEvent { physical_key, state, .. },
            ..
        } => Some(map_key(*physical_key, *state)),

        WindowEvent::MouseInput { state, button, .. } => {
            let button = MouseButton::from(*button);
            Some(match state {
                ElementState::Pressed => PlatformEvent::MouseButtonDown(button),
                ElementState::Released => PlatformEvent::MouseButtonUp(button),
            })
        }

        WindowEvent::CursorMoved { position, .. } => Some(PlatformEvent::MouseMoved {
            x: position.x as f32,
            y: position.y as f32,
        }),

        WindowEvent::Resized(size) => Some(PlatformEvent::Resized {
            width: size.width,
            height: size.height,
        }),

        _ => None,
    }
}

fn map_key(physical_key: PhysicalKey, state: ElementState) -> PlatformEvent {
    let key = KeyCode::from(physical_key);
    match state {
        ElementState::Pressed => PlatformEvent::KeyDown(key),
        ElementState::Released => PlatformEvent::KeyUp(key),
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
