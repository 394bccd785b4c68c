//! Persistent storage seam

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::asset::{IMAGES_DIR, is_image_file};

/// Byte-stream storage (an SD card on the device)
///
/// Paths are absolute, `/`-separated logical paths such as `/images/a.gif`.
pub trait AssetStorage {
    type Error: Debug;

    /// Writer returned by [`AssetStorage::create`]; closing happens on drop
    type Writer<'a>: embedded_io::Write
    where
        Self: 'a;

    /// Create `dir` if it does not exist yet
    fn ensure_dir(&mut self, dir: &str) -> Result<(), Self::Error>;

    /// Open `path` for writing, truncating any previous content
    fn create(&mut self, path: &str) -> Result<Self::Writer<'_>, Self::Error>;

    /// Size of the file at `path`, `None` when it does not exist
    fn size(&mut self, path: &str) -> Option<usize>;

    /// Read from the start of `path` into `buf`, returning the bytes read
    fn read(&mut self, path: &str, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// File names (without directory) inside `dir`
    fn list(&mut self, dir: &str) -> Result<Vec<String>, Self::Error>;

    /// Delete the file at `path`
    fn remove(&mut self, path: &str) -> Result<(), Self::Error>;
}

/// Names of all displayable images in the images directory
pub fn list_images<S: AssetStorage>(storage: &mut S) -> Result<Vec<String>, S::Error> {
    let mut names = storage.list(IMAGES_DIR)?;
    names.retain(|name| is_image_file(name));
    names.sort();
    Ok(names)
}

/// Remove every displayable image, returning how many were deleted
pub fn clear_images<S: AssetStorage>(storage: &mut S) -> Result<usize, S::Error> {
    let names = list_images(storage)?;
    for name in &names {
        let path = alloc::format!("{IMAGES_DIR}/{name}");
        storage.remove(&path)?;
    }
    Ok(names.len())
}
