//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges platform backends (winit/wgpu, headless, ...) with the frame
// engine.
//
// This module defines the contract between backends and the engine so a
// backend can be swapped without touching the loop.
//
// Components:
// - `interface`: `Platform` / `Canvas` traits and the draw-callback registry
// - `error`: fatal construction errors and their exit codes
//
//=========================================================================

//=== Module Declarations =================================================

mod error;
mod interface;

//=== Public API ==========================================================

pub use error::PlatformInitError;
pub use interface::{Canvas, DrawCallback, DrawCallbacks, Platform};
