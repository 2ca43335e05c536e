//=========================================================================
// Core
//
// Backend-agnostic building blocks of the frame engine.
//
// Responsibilities:
// - Define the platform capability contract (`platform_bridge`)
// - Own the value types that cross it: media handles, rectangles,
//   asset paths
//
// Notes:
// Nothing in here talks to an OS or a GPU. Concrete backends live in
// `crate::platform` and depend on this module, never the other way round.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod assets;
pub mod geometry;
pub mod media;
pub mod platform_bridge;

//=== Public API ==========================================================

pub use assets::BasePath;
pub use geometry::{centered_boundary_rects, split_margin, Margins, Rect};
pub use media::MediaHandle;
pub use platform_bridge::{Canvas, DrawCallback, DrawCallbacks, Platform, PlatformInitError};
