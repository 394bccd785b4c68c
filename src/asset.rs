//! Asset identity and classification

use core::fmt::{self, Write};

use heapless::String;

use crate::error::NotifyError;

/// Directory holding downloaded images
pub const IMAGES_DIR: &str = "/images";

/// Longest accepted asset name
pub const MAX_NAME_LEN: usize = 64;

/// Longest storage path (`/images/` + name)
pub const MAX_PATH_LEN: usize = MAX_NAME_LEN + 8;

/// Storage path of an asset
pub type AssetPath = String<MAX_PATH_LEN>;

/// Kind of asset, derived from its name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// Single frame image, rendered once
    Static,
    /// Animation, played frame by frame
    Animated,
}

impl AssetKind {
    /// Classify a file name by suffix (`.gif` is animated)
    pub fn of(name: &str) -> Self {
        if has_suffix(name, ".gif") {
            Self::Animated
        } else {
            Self::Static
        }
    }
}

/// Validated asset name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetName(String<MAX_NAME_LEN>);

impl AssetName {
    /// Validate an asset name
    ///
    /// Names must be non-empty, fit in [`MAX_NAME_LEN`] bytes and stay inside
    /// the images directory.
    pub fn new(name: &str) -> Result<Self, NotifyError> {
        let invalid = name.is_empty()
            || name == "."
            || name == ".."
            || name.contains(['/', '\\'])
            || name.chars().any(char::is_control);
        if invalid {
            return Err(NotifyError::InvalidName);
        }
        let mut inner = String::new();
        inner.push_str(name).map_err(|()| NotifyError::InvalidName)?;
        Ok(Self(inner))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn kind(&self) -> AssetKind {
        AssetKind::of(self.as_str())
    }

    /// Local storage path (`/images/<name>`)
    pub fn path(&self) -> AssetPath {
        let mut path = AssetPath::new();
        // Capacity covers the prefix plus the longest name
        let _ = write!(path, "{}/{}", IMAGES_DIR, self.0);
        path
    }
}

impl fmt::Display for AssetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check whether a directory entry is a displayable image
pub fn is_image_file(name: &str) -> bool {
    [".jpg", ".jpeg", ".gif"]
        .iter()
        .any(|suffix| has_suffix(name, suffix))
}

fn has_suffix(name: &str, suffix: &str) -> bool {
    name.len() >= suffix.len()
        && name
            .get(name.len() - suffix.len()..)
            .is_some_and(|tail| tail.eq_ignore_ascii_case(suffix))
}
