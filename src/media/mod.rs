//! Image acquisition: OS permission, file picker and clipboard behind one
//! capability trait, plus decoding of whatever the user picked.

mod clipboard;
mod decode;
mod desktop;

pub use decode::{
    decode_selection, EncodedImage, ImageDecodeError, SelectedImage, Thumbnail, THUMBNAIL_EDGE,
};
pub use desktop::DesktopMedia;

/// MIME filter handed to the image picker.
pub const IMAGE_MIME_FILTER: &str = "image/*";

/// What the platform says about read access to the user's images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    NotGranted,
    /// The platform has no such permission; treat as granted.
    NotRequired,
}

impl PermissionStatus {
    pub fn allows_access(self) -> bool {
        matches!(self, Self::Granted | Self::NotRequired)
    }
}

/// Raw selection as returned by the picker, before decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedImage {
    /// Display name (file name, or "clipboard").
    pub name: Option<String>,
    pub bytes: Vec<u8>,
}

impl PickedImage {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: Some(name.into()),
            bytes,
        }
    }
}

/// Platform capabilities the screen needs.
///
/// Every call may block on a native dialog; callers run them on the UI
/// thread, the way a mobile activity waits for its result launcher.
pub trait MediaAccess {
    /// Current permission state, without prompting.
    fn permission_status(&self) -> PermissionStatus;

    /// Prompt the user for read access. Returns whether it was granted.
    fn request_permission(&mut self) -> bool;

    /// Open the image chooser. `None` means the user cancelled.
    fn pick_image(&mut self, mime_filter: &str) -> Option<PickedImage>;

    /// Image currently on the clipboard, if any.
    fn paste_image(&mut self) -> Option<PickedImage> {
        None
    }
}

/// File extensions accepted for a MIME filter such as `image/*` or `image/png`.
pub fn extensions_for_mime(mime_filter: &str) -> Vec<&'static str> {
    const ALL: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "bmp"];
    match mime_filter {
        "image/png" => vec!["png"],
        "image/jpeg" => vec!["jpg", "jpeg"],
        "image/webp" => vec!["webp"],
        "image/gif" => vec!["gif"],
        "image/bmp" => vec!["bmp"],
        _ => ALL.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_filter_lists_every_supported_extension() {
        let exts = extensions_for_mime(IMAGE_MIME_FILTER);
        assert!(exts.contains(&"png"));
        assert!(exts.contains(&"jpeg"));
        assert!(exts.contains(&"gif"));
    }

    #[test]
    fn specific_filter_narrows_extensions() {
        assert_eq!(extensions_for_mime("image/jpeg"), vec!["jpg", "jpeg"]);
    }

    #[test]
    fn not_required_allows_access() {
        assert!(PermissionStatus::NotRequired.allows_access());
        assert!(PermissionStatus::Granted.allows_access());
        assert!(!PermissionStatus::NotGranted.allows_access());
    }
}
