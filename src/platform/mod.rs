//=========================================================================
// Platform Subsystem
//
// Concrete backends implementing `core::Platform`.
//
// ```text
//                      ┌────────────────────────────┐
//   PlatformConfig ───►│ DesktopPlatform            │  winit window,
//                      │   WindowHandler, Presenter │  wgpu surface
//                      ├────────────────────────────┤
//                 └───►│ HeadlessPlatform           │  in-memory,
//                      │   channel-fed events       │  manual clock
//                      └────────────────────────────┘
//          both render into a `Framebuffer` and load `Bitmap` media
// ```
//
// Responsibilities:
// - Create and own the OS window and drawing surface
// - Convert OS events into `PlatformEvent`s
// - Decode media files into `Bitmap`s
// - Present the framebuffer once per refresh
//
//=========================================================================

//=== Submodules ==========================================================

mod config;
mod desktop;
mod event;
mod headless;
mod raster;
mod timing;

//=== Public API ==========================================================

pub use config::PlatformConfig;
pub use desktop::DesktopPlatform;
pub use event::{EventKind, KeyCode, MouseButton, PlatformEvent};
pub use headless::HeadlessPlatform;
pub use raster::{Bitmap, Color, Framebuffer};
