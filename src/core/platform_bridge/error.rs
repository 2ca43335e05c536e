//=========================================================================
// Platform Initialization Errors
//=========================================================================
//
// Fatal failures raised while a backend acquires its device, window or
// drawing surface. They never occur inside the frame loop and are not
// retried; the process boundary maps each subtype to a stable exit code.
//
//=========================================================================

//=== PlatformInitError ===================================================

/// Unrecoverable backend construction failure.
///
/// Each variant carries the backend's diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformInitError {
    /// The graphics/input device could not be initialized.
    DeviceInit(String),

    /// The OS window could not be created.
    WindowCreation(String),

    /// No drawing surface could be obtained from the window.
    SurfaceAcquisition(String),
}

impl PlatformInitError {
    /// Stable process exit code for this failure subtype.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::DeviceInit(_) => 1,
            Self::WindowCreation(_) => 2,
            Self::SurfaceAcquisition(_) => 3,
        }
    }

    /// Backend diagnostic message.
    pub fn diagnostic(&self) -> &str {
        match self {
            Self::DeviceInit(msg) | Self::WindowCreation(msg) | Self::SurfaceAcquisition(msg) => {
                msg
            }
        }
    }
}

//--- Trait Implementations -----------------------------------------------

impl std::fmt::Display for PlatformInitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DeviceInit(e) => write!(f, "Could not initialize graphics device: {}", e),
            Self::WindowCreation(e) => write!(f, "Could not create window: {}", e),
            Self::SurfaceAcquisition(e) => write!(f, "Could not get surface from window: {}", e),
        }
    }
}

impl std::error::Error for PlatformInitError {}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct_and_stable() {
        assert_eq!(PlatformInitError::DeviceInit(String::new()).exit_code(), 1);
        assert_eq!(PlatformInitError::WindowCreation(String::new()).exit_code(), 2);
        assert_eq!(PlatformInitError::SurfaceAcquisition(String::new()).exit_code(), 3);
    }

    #[test]
    fn display_includes_backend_diagnostic() {
        let err = PlatformInitError::WindowCreation("no display".into());
        assert_eq!(err.to_string(), "Could not create window: no display");
        assert_eq!(err.diagnostic(), "no display");
    }

    #[test]
    fn is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<PlatformInitError>();
    }
}
