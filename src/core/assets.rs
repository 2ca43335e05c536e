//=========================================================================
// Asset Paths
//=========================================================================
//
// Resolves the directory media files are loaded from. The base path is
// computed on first access and reused afterwards.
//
// Resolution order:
//   explicit override → executable directory → working directory → "."
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::OnceCell;
use std::env;
use std::path::{Path, PathBuf};

use log::{debug, warn};

//=== Constants ===========================================================

/// Directory under the base path that holds image assets.
pub const IMAGE_DIR: &str = "Images";

//=== BasePath ============================================================

/// Lazily-resolved asset base directory.
#[derive(Debug, Default)]
pub struct BasePath {
    explicit: Option<PathBuf>,
    resolved: OnceCell<PathBuf>,
}

impl BasePath {
    /// Base path resolved from the running executable on first access.
    pub fn from_executable() -> Self {
        Self::default()
    }

    /// Base path pinned to `path`.
    pub fn fixed(path: impl Into<PathBuf>) -> Self {
        Self {
            explicit: Some(path.into()),
            resolved: OnceCell::new(),
        }
    }

    /// Returns the base directory, resolving it on the first call.
    pub fn get(&self) -> &Path {
        self.resolved.get_or_init(|| {
            let path = match &self.explicit {
                Some(path) => path.clone(),
                None => resolve_executable_dir(),
            };
            debug!(target: "platform", "Asset base path: {}", path.display());
            path
        })
    }

    /// Returns `<base>/Images`.
    pub fn image_path(&self) -> PathBuf {
        self.get().join(IMAGE_DIR)
    }
}

fn resolve_executable_dir() -> PathBuf {
    match env::current_exe() {
        Ok(exe) => {
            if let Some(dir) = exe.parent() {
                return dir.to_path_buf();
            }
        }
        Err(e) => {
            warn!(target: "platform", "Cannot locate executable: {}", e);
        }
    }

    env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_base_path_is_used_verbatim() {
        let base = BasePath::fixed("/opt/pong");
        assert_eq!(base.get(), Path::new("/opt/pong"));
        assert_eq!(base.image_path(), Path::new("/opt/pong").join(IMAGE_DIR));
    }

    #[test]
    fn resolution_is_memoized() {
        let base = BasePath::from_executable();
        let first: *const Path = base.get();
        let second: *const Path = base.get();
        assert!(std::ptr::eq(first, second), "Second access must reuse the cached path");
    }

    #[test]
    fn executable_base_path_matches_exe_dir() {
        let base = BasePath::from_executable();
        let exe = env::current_exe().expect("test binary has a path");
        assert_eq!(Some(base.get()), exe.parent());
    }
}
