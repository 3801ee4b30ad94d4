//! State for the main screen.

use crate::media::SelectedImage;
use crate::ui::mvi::UiState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionState {
    /// Not asked yet.
    #[default]
    Unknown,
    Granted,
    Denied,
}

/// Transient message, like a short toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    /// Remaining ticks before the notice disappears.
    pub ticks_left: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScreenState {
    pub prompt: String,
    /// Cursor position in the prompt, counted in chars.
    pub cursor: usize,
    pub image: Option<SelectedImage>,
    pub permission: PermissionState,
    pub notice: Option<Notice>,
    /// First visible line of the result pane.
    pub result_scroll: u16,
    /// Spinner frame counter, advanced on every tick.
    pub spinner_tick: u8,
}

impl UiState for ScreenState {}

impl ScreenState {
    /// Initial state with a pre-filled prompt, cursor at the end.
    pub fn with_prompt(prompt: impl Into<String>) -> Self {
        let prompt = prompt.into();
        Self {
            cursor: prompt.chars().count(),
            prompt,
            ..Self::default()
        }
    }

    /// Submit is enabled iff the prompt is non-empty and an image is selected.
    pub fn can_submit(&self) -> bool {
        !self.prompt.is_empty() && self.image.is_some()
    }

    /// Byte offset of the cursor in `prompt`.
    pub fn cursor_byte(&self) -> usize {
        self.prompt
            .char_indices()
            .nth(self.cursor)
            .map(|(idx, _)| idx)
            .unwrap_or(self.prompt.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        let state = ScreenState::default();
        assert!(state.prompt.is_empty());
        assert!(state.image.is_none());
        assert_eq!(state.permission, PermissionState::Unknown);
        assert!(!state.can_submit());
    }

    #[test]
    fn with_prompt_puts_cursor_at_end() {
        let state = ScreenState::with_prompt("héllo");
        assert_eq!(state.cursor, 5);
        assert_eq!(state.cursor_byte(), "héllo".len());
    }

    #[test]
    fn prompt_alone_cannot_submit() {
        assert!(!ScreenState::with_prompt("describe this").can_submit());
    }
}
