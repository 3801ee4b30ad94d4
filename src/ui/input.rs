use crate::ui::app::App;
use crate::ui::screen::CursorMove;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Lines moved by PageUp/PageDown in the result pane.
const SCROLL_STEP: i32 = 5;

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if is_ctrl_char(key, 'q') || is_ctrl_char(key, 'c') || key.code == KeyCode::Esc {
        app.request_quit();
        return;
    }

    if is_ctrl_char(key, 'o') {
        app.select_image();
        return;
    }

    // Terminals cannot paste image data as text, so Ctrl+V reads the clipboard directly.
    if is_ctrl_char(key, 'v') {
        app.paste_image();
        return;
    }

    match key.code {
        KeyCode::Enter => app.submit(),
        KeyCode::PageUp => app.scroll_result(-SCROLL_STEP),
        KeyCode::PageDown => app.scroll_result(SCROLL_STEP),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Delete => app.delete(),
        KeyCode::Left => app.move_cursor(CursorMove::Left),
        KeyCode::Right => app.move_cursor(CursorMove::Right),
        KeyCode::Home => app.move_cursor(CursorMove::Home),
        KeyCode::End => app.move_cursor(CursorMove::End),
        KeyCode::Char(ch)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            app.insert_text(ch.to_string());
        }
        _ => {}
    }
}

fn is_ctrl_char(key: KeyEvent, ch: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char(code) if code.eq_ignore_ascii_case(&ch))
}
