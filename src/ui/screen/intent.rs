//! Intents for the main screen.

use crate::media::SelectedImage;
use crate::ui::mvi::Intent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Left,
    Right,
    Home,
    End,
}

#[derive(Debug, Clone)]
pub enum ScreenIntent {
    /// Typed or pasted text, inserted at the cursor. Line breaks become spaces.
    InsertText(String),
    /// Delete the char before the cursor.
    Backspace,
    /// Delete the char under the cursor.
    Delete,
    MoveCursor(CursorMove),

    /// The platform answered the permission check or request.
    PermissionResolved { granted: bool },

    /// A pick was decoded; replaces any previous image.
    ImageSelected(Box<SelectedImage>),
    /// A pick could not be decoded.
    ImageCleared,

    ShowNotice { text: String, ticks: u16 },

    /// Event loop tick: advances the spinner and ages the notice.
    Tick,

    /// Scroll the result pane by `delta` lines.
    ScrollResult { delta: i32 },
    ResetScroll,
}

impl Intent for ScreenIntent {}
