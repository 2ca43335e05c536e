//=========================================================================
// Media Handle
//=========================================================================
//
// Owning handle for a loaded media resource. An empty handle is the
// normal result of a failed load, not an error.
//
// The backend resource is released when the handle (or the value taken
// out of it) is dropped, which happens exactly once by construction.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== MediaHandle =========================================================

/// Uniquely-owned, possibly-empty media resource.
///
/// Callers check [`MediaHandle::is_empty`] (or use [`MediaHandle::get`])
/// before rendering, although every render path also accepts an absent
/// resource as a no-op.
pub struct MediaHandle<M> {
    inner: Option<M>,
}

impl<M> MediaHandle<M> {
    pub fn new(media: M) -> Self {
        Self { inner: Some(media) }
    }

    pub fn empty() -> Self {
        Self { inner: None }
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_none()
    }

    pub fn get(&self) -> Option<&M> {
        self.inner.as_ref()
    }

    /// Releases ownership of the resource to the caller.
    ///
    /// Useful for moving the media into a draw callback.
    pub fn into_inner(self) -> Option<M> {
        self.inner
    }
}

impl<M> From<Option<M>> for MediaHandle<M> {
    fn from(inner: Option<M>) -> Self {
        Self { inner }
    }
}

impl<M> Default for MediaHandle<M> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<M> fmt::Debug for MediaHandle<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("MediaHandle(empty)")
        } else {
            f.write_str("MediaHandle(loaded)")
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Tracked(Rc<Cell<usize>>);

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn empty_handle_reports_empty() {
        let handle = MediaHandle::<u32>::empty();
        assert!(handle.is_empty());
        assert!(handle.get().is_none());
        assert_eq!(format!("{:?}", handle), "MediaHandle(empty)");
    }

    #[test]
    fn loaded_handle_exposes_media() {
        let handle = MediaHandle::new(7u32);
        assert!(!handle.is_empty());
        assert_eq!(handle.get(), Some(&7));
    }

    #[test]
    fn drop_releases_exactly_once() {
        let releases = Rc::new(Cell::new(0));
        let handle = MediaHandle::new(Tracked(releases.clone()));

        drop(handle);

        assert_eq!(releases.get(), 1);
    }

    #[test]
    fn into_inner_transfers_release_to_new_owner() {
        let releases = Rc::new(Cell::new(0));
        let handle = MediaHandle::new(Tracked(releases.clone()));

        let media = handle.into_inner();
        assert_eq!(releases.get(), 0, "Moving out must not release");

        drop(media);
        assert_eq!(releases.get(), 1);
    }

    #[test]
    fn from_option_round_trips_emptiness() {
        assert!(MediaHandle::<u8>::from(None).is_empty());
        assert!(!MediaHandle::from(Some(1u8)).is_empty());
    }
}
