//=========================================================================
// Platform Configuration
//=========================================================================
//
// Builder for the bundled backends.
//
// ```text
//     PlatformConfig ──build()──────────> DesktopPlatform  (winit + wgpu)
//         │          ──build_headless()─> HeadlessPlatform (no window)
//         ├─ with_title()
//         ├─ with_size()
//         ├─ with_clear_color()
//         └─ with_base_path()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::PathBuf;

use log::info;

//=== Internal Dependencies ===============================================

use super::desktop::DesktopPlatform;
use super::headless::HeadlessPlatform;
use super::raster::Color;
use crate::core::{BasePath, PlatformInitError};

//=== PlatformConfig ======================================================

/// Configuration shared by every bundled backend.
///
/// # Default Values
///
/// - **Title**: `"Pong!"`
/// - **Size**: 1024 x 786 physical pixels
/// - **Clear colour**: white
/// - **Base path**: directory of the running executable
///
/// # Examples
///
/// ```no_run
/// use pong_engine::platform::{Color, PlatformConfig};
///
/// let platform = PlatformConfig::new()
///     .with_title("Table Tennis")
///     .with_size(640, 480)
///     .with_clear_color(Color::BLACK)
///     .build()?;
/// # Ok::<(), pong_engine::core::PlatformInitError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    pub(crate) title: String,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) clear_color: Color,
    pub(crate) base_path: Option<PathBuf>,
}

impl PlatformConfig {
    pub const DEFAULT_WIDTH: u32 = 1024;
    pub const DEFAULT_HEIGHT: u32 = 786;

    /// Creates a configuration with default settings.
    pub fn new() -> Self {
        Self {
            title: String::from("Pong!"),
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            clear_color: Color::WHITE,
            base_path: None,
        }
    }

    /// Sets the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the drawable size in physical pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        assert!(
            width > 0 && height > 0,
            "Window dimensions must be positive, got {}x{}",
            width,
            height
        );
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the colour the drawable is cleared to before each frame.
    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    /// Pins the asset base path instead of using the executable directory.
    pub fn with_base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Opens a window and acquires its drawing surface.
    ///
    /// # Errors
    ///
    /// Returns the [`PlatformInitError`] subtype matching the step that failed.
    pub fn build(self) -> Result<DesktopPlatform, PlatformInitError> {
        info!(
            target: "platform",
            "Building desktop platform \"{}\" ({}x{})",
            self.title,
            self.width,
            self.height
        );
        DesktopPlatform::new(self)
    }

    /// Builds a windowless backend rendering into memory.
    pub fn build_headless(self) -> HeadlessPlatform {
        info!(
            target: "platform",
            "Building headless platform ({}x{})",
            self.width,
            self.height
        );
        HeadlessPlatform::new(self)
    }

    pub(crate) fn base_path(&self) -> BasePath {
        match &self.base_path {
            Some(path) => BasePath::fixed(path.clone()),
            None => BasePath::from_executable(),
        }
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn defaults() {
        let config = PlatformConfig::new();
        assert_eq!(config.title, "Pong!");
        assert_eq!((config.width, config.height), (1024, 786));
        assert_eq!(config.clear_color, Color::WHITE);
        assert!(config.base_path.is_none());
    }

    #[test]
    fn fluent_api_chaining() {
        let config = PlatformConfig::new()
            .with_title("Test")
            .with_size(320, 200)
            .with_clear_color(Color::BLACK)
            .with_base_path("/srv/assets");

        assert_eq!(config.title, "Test");
        assert_eq!((config.width, config.height), (320, 200));
        assert_eq!(config.clear_color, Color::BLACK);
        assert_eq!(config.base_path().get(), Path::new("/srv/assets"));
    }

    #[test]
    #[should_panic(expected = "Window dimensions must be positive")]
    fn with_size_panics_on_zero_width() {
        PlatformConfig::new().with_size(0, 10);
    }

    #[test]
    #[should_panic(expected = "Window dimensions must be positive")]
    fn with_size_panics_on_zero_height() {
        PlatformConfig::new().with_size(10, 0);
    }
}
