//! Frame rendering. Everything here is a pure function of the screen state
//! and the request outcome.

use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::layout::{bottom_centered_rect, layout_regions, prompt_row};
use crate::ui::preview::{preview_rows, thumbnail_lines};
use crate::ui::request::RequestOutcome;
use crate::ui::screen::{PermissionState, ScreenState};
use crate::ui::theme::{
    ACCENT, BUTTON_TEXT, GLOBAL_BORDER, GO_DISABLED, GO_ENABLED, HEADER_TEXT, PLACEHOLDER_TEXT,
    POPUP_BORDER, RESULT_TEXT, STATUS_ERROR,
};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Spinner animation frames.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub const RESULT_PLACEHOLDER: &str = "Results will appear here";
pub const PROMPT_PLACEHOLDER: &str = "Ask something about the image";
pub const SELECT_ACTION: &str = " Select an Image ";

pub fn draw(frame: &mut Frame<'_>, screen: &ScreenState, outcome: &RequestOutcome, model: &str) {
    let area = frame.area();
    let regions = layout_regions(area, image_panel_height(screen, area));

    frame.render_widget(Header::new(model).widget(), regions.header);
    draw_image_panel(frame, screen, regions.image);
    draw_prompt_row(frame, screen, regions.prompt);
    frame.render_widget(
        result_paragraph(outcome, screen.result_scroll, screen.spinner_tick),
        regions.result,
    );
    frame.render_widget(Footer::new().widget(regions.footer), regions.footer);

    if let Some(notice) = &screen.notice {
        let width = (notice.text.width() as u16).saturating_add(4);
        let rect = bottom_centered_rect(area, width, 3, regions.footer.height + 1);
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(notice.text.as_str())
                .alignment(Alignment::Center)
                .style(Style::default().fg(HEADER_TEXT))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(POPUP_BORDER)),
                ),
            rect,
        );
    }
}

/// Action line + preview, plus borders; the preview takes at most half the frame.
fn image_panel_height(screen: &ScreenState, area: Rect) -> u16 {
    let content = match &screen.image {
        Some(image) => 1 + preview_rows(&image.thumbnail),
        None => 2,
    };
    (content + 2).min((area.height / 2).max(4))
}

fn draw_image_panel(frame: &mut Frame<'_>, screen: &ScreenState, area: Rect) {
    let block = Block::default()
        .title(" Image ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GLOBAL_BORDER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let action = Span::styled(
        SELECT_ACTION,
        Style::default()
            .fg(BUTTON_TEXT)
            .bg(GO_ENABLED)
            .add_modifier(Modifier::BOLD),
    );
    let hint = Span::styled("  Ctrl+O", Style::default().fg(PLACEHOLDER_TEXT));

    let mut lines = Vec::new();
    match &screen.image {
        Some(image) => {
            lines.push(Line::from(vec![
                action,
                hint,
                Span::raw("   "),
                Span::styled(image.summary(), Style::default().fg(HEADER_TEXT)),
            ]));
            lines.extend(thumbnail_lines(
                &image.thumbnail,
                inner.width,
                inner.height.saturating_sub(1),
            ));
        }
        None => {
            lines.push(Line::from(vec![action, hint]));
            lines.push(if screen.permission == PermissionState::Denied {
                Line::styled(
                    "Permission denied. Press Ctrl+O to ask again.",
                    Style::default().fg(STATUS_ERROR),
                )
            } else {
                Line::styled("No image selected", Style::default().fg(PLACEHOLDER_TEXT))
            });
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_prompt_row(frame: &mut Frame<'_>, screen: &ScreenState, area: Rect) {
    let (input_area, button_area) = prompt_row(area);

    let block = Block::default()
        .title(" Prompt ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));
    let inner = block.inner(input_area);
    frame.render_widget(block, input_area);

    let (visible, cursor_col) = visible_prompt(&screen.prompt, screen.cursor, inner.width);
    let line = if screen.prompt.is_empty() {
        Line::styled(PROMPT_PLACEHOLDER, Style::default().fg(PLACEHOLDER_TEXT))
    } else {
        Line::styled(visible, Style::default().fg(HEADER_TEXT))
    };
    frame.render_widget(Paragraph::new(line), inner);
    if inner.width > 0 && inner.height > 0 {
        frame.set_cursor_position((inner.x + cursor_col, inner.y));
    }

    frame.render_widget(go_button(screen.can_submit()), button_area);
}

/// The "Go" button: blue when submit is possible, red otherwise.
pub fn go_button(enabled: bool) -> Paragraph<'static> {
    let bg = if enabled { GO_ENABLED } else { GO_DISABLED };
    let style = Style::default()
        .fg(BUTTON_TEXT)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    Paragraph::new("Go")
        .alignment(Alignment::Center)
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(BUTTON_TEXT).bg(bg)),
        )
}

/// Window of the prompt that keeps the cursor in view, and the cursor column
/// inside it. Both are measured in display columns, so wide chars take two.
pub fn visible_prompt(prompt: &str, cursor: usize, width: u16) -> (String, u16) {
    let width = usize::from(width.max(1));
    let widths: Vec<usize> = prompt.chars().map(|ch| ch.width().unwrap_or(0)).collect();
    let cursor = cursor.min(widths.len());

    // The cursor occupies the cell of the char under it, or one cell at the end.
    let mut used = widths.get(cursor).copied().unwrap_or(1).max(1);
    let mut start = cursor;
    while start > 0 && used + widths[start - 1] <= width {
        used += widths[start - 1];
        start -= 1;
    }

    let mut visible = String::new();
    let mut cols = 0;
    for (ch, ch_width) in prompt.chars().zip(&widths).skip(start) {
        if cols + ch_width > width {
            break;
        }
        cols += ch_width;
        visible.push(ch);
    }

    let cursor_col: usize = widths[start..cursor].iter().sum();
    (visible, cursor_col as u16)
}

/// Result pane for the current outcome.
pub fn result_paragraph(
    outcome: &RequestOutcome,
    scroll: u16,
    spinner_tick: u8,
) -> Paragraph<'static> {
    let block = Block::default()
        .title(" Result ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GLOBAL_BORDER));

    let paragraph = match outcome {
        RequestOutcome::Placeholder => Paragraph::new(Line::styled(
            RESULT_PLACEHOLDER,
            Style::default().fg(PLACEHOLDER_TEXT),
        )),
        RequestOutcome::Loading { .. } => {
            let spinner = SPINNER_FRAMES[(spinner_tick as usize) % SPINNER_FRAMES.len()];
            Paragraph::new(Line::from(vec![
                Span::styled(format!("{} ", spinner), Style::default().fg(ACCENT)),
                Span::styled("Generating...", Style::default().fg(HEADER_TEXT)),
            ]))
        }
        RequestOutcome::Success { text } => {
            Paragraph::new(text.clone()).style(Style::default().fg(RESULT_TEXT))
        }
        RequestOutcome::Error { message } => Paragraph::new(message.clone())
            .style(Style::default().fg(STATUS_ERROR).add_modifier(Modifier::BOLD)),
    };

    let scroll = if outcome.is_terminal() { scroll } else { 0 };
    paragraph
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(block)
}
