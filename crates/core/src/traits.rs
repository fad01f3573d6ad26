//! Core behavioral traits for fridge components
//!
//! The lifecycle orchestrator depends on these seams instead of on concrete
//! storage, so it can be exercised without touching the real temp directory.

use crate::Result;

/// Scratch storage shared by the scripts of a single run
///
/// # Examples
///
/// ```ignore
/// fn reset(storage: &dyn ScratchStorage) -> Result<()> {
///     storage.clear()?;
///     storage.clear() // still fine, nothing left to remove
/// }
/// ```
pub trait ScratchStorage {
    /// Remove every stored value
    ///
    /// Must succeed when nothing is stored.
    fn clear(&self) -> Result<()>;
}

impl<T: ScratchStorage + ?Sized> ScratchStorage for &T {
    fn clear(&self) -> Result<()> {
        (**self).clear()
    }
}
