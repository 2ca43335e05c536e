//=========================================================================
// Pong Engine — Library Root
//
// A minimal real-time presentation loop: a backend-agnostic frame engine
// driving a platform layer that owns the window, the drawing surface and
// the event queue.
//
// Typical usage:
// ```no_run
// use pong_engine::prelude::*;
//
// fn main() -> Result<(), PlatformInitError> {
//     let mut engine = FrameEngine::new(PlatformConfig::new().build()?);
//     engine.init()?;
//     engine.run_event_loop();
//     Ok(())
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the backend-neutral pieces: the `Platform` contract, the
// draw-callback registry, media handles and centering geometry.
//
// `platform` holds the concrete backends (desktop window, headless).
//
pub mod core;
pub mod logging;
pub mod platform;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `engine` defines the frame loop; only its types are exported.
//
mod engine;

//--- Public Exports ------------------------------------------------------

pub use engine::{EngineState, FrameEngine};
