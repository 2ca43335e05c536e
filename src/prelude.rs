//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use pong_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Frame loop
pub use crate::engine::{EngineState, FrameEngine};

// Platform contract
pub use crate::core::{Canvas, DrawCallback, MediaHandle, Platform, PlatformInitError, Rect};

// Backends
pub use crate::platform::{
    Bitmap, Color, DesktopPlatform, EventKind, Framebuffer, HeadlessPlatform, KeyCode, MouseButton,
    PlatformConfig, PlatformEvent,
};

// Logging
pub use crate::logging::{init_logging, LoggingConfig};
