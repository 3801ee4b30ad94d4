use crate::ui::theme::{GLOBAL_BORDER, HEADER_TEXT};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Key hints, most important first. Trailing ones are dropped on narrow terminals.
pub const HINTS: &[&str] = &[
    "^O Image",
    "Enter Go",
    "^Q Quit",
    "^V Paste",
    "PgUp/PgDn Scroll",
];

const SEPARATOR: &str = " │ ";

/// Bottom bar: as many hints as fit, version on the right.
pub struct Footer;

impl Default for Footer {
    fn default() -> Self {
        Self::new()
    }
}

impl Footer {
    pub fn new() -> Self {
        Self
    }

    pub fn widget(&self, area: Rect) -> Paragraph<'static> {
        let version = format!("v{} ", VERSION);
        let content_width = usize::from(area.width.saturating_sub(2));
        let hints = fitting_hints(content_width.saturating_sub(version.width() + 1));
        let padding = content_width
            .saturating_sub(hints.width())
            .saturating_sub(version.width());

        let text_style = Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM);
        let line = Line::from(vec![
            Span::styled(hints, text_style),
            Span::styled(" ".repeat(padding), text_style),
            Span::styled(version, text_style),
        ]);

        Paragraph::new(line).style(text_style).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}

/// Longest prefix of [`HINTS`] that fits in `budget` columns.
pub fn fitting_hints(budget: usize) -> String {
    let mut line = String::from(" ");
    for (idx, hint) in HINTS.iter().enumerate() {
        let addition = if idx == 0 {
            hint.to_string()
        } else {
            format!("{}{}", SEPARATOR, hint)
        };
        if line.width() + addition.width() > budget {
            break;
        }
        line.push_str(&addition);
    }
    if line.trim().is_empty() {
        String::new()
    } else {
        line
    }
}
