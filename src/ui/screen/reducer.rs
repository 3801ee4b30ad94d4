//! Reducer for the main screen.

use crate::ui::mvi::Reducer;

use super::intent::{CursorMove, ScreenIntent};
use super::state::{Notice, PermissionState, ScreenState};

pub struct ScreenReducer;

impl Reducer for ScreenReducer {
    type State = ScreenState;
    type Intent = ScreenIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ScreenIntent::InsertText(text) => {
                let text: String = text
                    .chars()
                    .filter(|c| *c != '\r')
                    .map(|c| if c == '\n' || c == '\t' { ' ' } else { c })
                    .collect();
                let at = state.cursor_byte();
                state.prompt.insert_str(at, &text);
                state.cursor += text.chars().count();
            }

            ScreenIntent::Backspace => {
                if state.cursor > 0 {
                    state.cursor -= 1;
                    let at = state.cursor_byte();
                    state.prompt.remove(at);
                }
            }

            ScreenIntent::Delete => {
                if state.cursor < state.prompt.chars().count() {
                    let at = state.cursor_byte();
                    state.prompt.remove(at);
                }
            }

            ScreenIntent::MoveCursor(movement) => {
                let len = state.prompt.chars().count();
                state.cursor = match movement {
                    CursorMove::Left => state.cursor.saturating_sub(1),
                    CursorMove::Right => (state.cursor + 1).min(len),
                    CursorMove::Home => 0,
                    CursorMove::End => len,
                };
            }

            ScreenIntent::PermissionResolved { granted } => {
                state.permission = if granted {
                    PermissionState::Granted
                } else {
                    PermissionState::Denied
                };
            }

            ScreenIntent::ImageSelected(image) => {
                state.image = Some(*image);
            }

            ScreenIntent::ImageCleared => {
                state.image = None;
            }

            ScreenIntent::ShowNotice { text, ticks } => {
                state.notice = Some(Notice {
                    text,
                    ticks_left: ticks.max(1),
                });
            }

            ScreenIntent::Tick => {
                state.spinner_tick = state.spinner_tick.wrapping_add(1);
                state.notice = state.notice.take().and_then(|notice| {
                    let ticks_left = notice.ticks_left.saturating_sub(1);
                    (ticks_left > 0).then_some(Notice {
                        ticks_left,
                        ..notice
                    })
                });
            }

            ScreenIntent::ScrollResult { delta } => {
                let next = i64::from(state.result_scroll) + i64::from(delta);
                state.result_scroll = next.clamp(0, i64::from(u16::MAX)) as u16;
            }

            ScreenIntent::ResetScroll => {
                state.result_scroll = 0;
            }
        }
        state
    }
}
