use std::fs;
use std::path::{Path, PathBuf};

use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

use super::clipboard::ClipboardHandler;
use super::{extensions_for_mime, MediaAccess, PermissionStatus, PickedImage};
use crate::config::MediaConfig;

/// Native dialogs (`rfd`) and the system clipboard (`arboard`).
///
/// Desktop systems have no storage permission, so consent is modelled as a
/// Yes/No dialog. The answer lives only as long as this value.
pub struct DesktopMedia {
    require_consent: bool,
    granted: bool,
    start_dir: Option<PathBuf>,
    clipboard: Option<ClipboardHandler>,
}

impl DesktopMedia {
    pub fn new(config: &MediaConfig) -> Self {
        Self {
            require_consent: config.require_consent,
            granted: false,
            start_dir: config.start_dir.clone(),
            clipboard: None,
        }
    }

    fn clipboard(&mut self) -> Option<&mut ClipboardHandler> {
        if self.clipboard.is_none() {
            match ClipboardHandler::new() {
                Ok(handler) => self.clipboard = Some(handler),
                Err(err) => {
                    tracing::warn!("Clipboard unavailable: {}", err);
                    return None;
                }
            }
        }
        self.clipboard.as_mut()
    }
}

impl MediaAccess for DesktopMedia {
    fn permission_status(&self) -> PermissionStatus {
        if !self.require_consent {
            PermissionStatus::NotRequired
        } else if self.granted {
            PermissionStatus::Granted
        } else {
            PermissionStatus::NotGranted
        }
    }

    fn request_permission(&mut self) -> bool {
        let answer = MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title("GemRag")
            .set_description("Allow GemRag to read images from your files?")
            .set_buttons(MessageButtons::YesNo)
            .show();
        self.granted = matches!(answer, MessageDialogResult::Yes);
        tracing::info!(granted = self.granted, "Image access consent answered");
        self.granted
    }

    fn pick_image(&mut self, mime_filter: &str) -> Option<PickedImage> {
        let mut dialog = FileDialog::new()
            .set_title("Select an Image")
            .add_filter("Images", &extensions_for_mime(mime_filter));
        if let Some(dir) = &self.start_dir {
            dialog = dialog.set_directory(dir);
        }

        let path = dialog.pick_file()?;
        read_picked(&path)
    }

    fn paste_image(&mut self) -> Option<PickedImage> {
        match self.clipboard()?.image_png() {
            Ok(Some(bytes)) => Some(PickedImage::new("clipboard", bytes)),
            Ok(None) => None,
            Err(err) => {
                tracing::warn!("{}", err);
                None
            }
        }
    }
}

fn read_picked(path: &Path) -> Option<PickedImage> {
    match fs::read(path) {
        Ok(bytes) => {
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            tracing::debug!("Picked {} ({} bytes)", path.display(), bytes.len());
            Some(PickedImage::new(name, bytes))
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {}", path.display(), err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consent_not_required_when_disabled() {
        let config = MediaConfig {
            require_consent: false,
            ..MediaConfig::default()
        };
        let media = DesktopMedia::new(&config);
        assert_eq!(media.permission_status(), PermissionStatus::NotRequired);
    }

    #[test]
    fn consent_starts_not_granted() {
        let media = DesktopMedia::new(&MediaConfig::default());
        assert_eq!(media.permission_status(), PermissionStatus::NotGranted);
    }

    #[test]
    fn read_picked_uses_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cake.png");
        fs::write(&path, [1, 2, 3]).unwrap();

        let picked = read_picked(&path).unwrap();
        assert_eq!(picked.name.as_deref(), Some("cake.png"));
        assert_eq!(picked.bytes, vec![1, 2, 3]);
    }

    #[test]
    fn read_picked_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_picked(&dir.path().join("gone.png")).is_none());
    }
}
