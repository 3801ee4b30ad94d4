//! Half-block rendering of the image thumbnail.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::media::Thumbnail;

const UPPER_HALF: &str = "▀";

/// Terminal rows needed for the whole thumbnail (two pixels per row).
pub fn preview_rows(thumbnail: &Thumbnail) -> u16 {
    thumbnail.height().div_ceil(2) as u16
}

/// One line per pair of pixel rows: the glyph's foreground paints the top
/// pixel, the background paints the bottom one. Clipped to `max_cols` × `max_rows`.
pub fn thumbnail_lines(thumbnail: &Thumbnail, max_cols: u16, max_rows: u16) -> Vec<Line<'static>> {
    let cols = thumbnail.width().min(u32::from(max_cols));
    let rows = u32::from(preview_rows(thumbnail).min(max_rows));

    (0..rows)
        .map(|row| {
            let spans: Vec<Span<'static>> = (0..cols)
                .map(|x| {
                    let top = thumbnail.pixel(x, row * 2).map(rgb).unwrap_or(Color::Reset);
                    let bottom = thumbnail
                        .pixel(x, row * 2 + 1)
                        .map(rgb)
                        .unwrap_or(Color::Reset);
                    Span::styled(UPPER_HALF, Style::default().fg(top).bg(bottom))
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> Thumbnail {
        // 2×3: rows of red, green, blue.
        Thumbnail::from_rgb(
            2,
            3,
            vec![[255, 0, 0], [255, 0, 0], [0, 255, 0], [0, 255, 0], [0, 0, 255], [0, 0, 255]],
        )
        .unwrap()
    }

    #[test]
    fn odd_height_rounds_up() {
        assert_eq!(preview_rows(&checker()), 2);
    }

    #[test]
    fn pairs_rows_into_fg_and_bg() {
        let lines = thumbnail_lines(&checker(), 10, 10);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans.len(), 2);

        let first = &lines[0].spans[0];
        assert_eq!(first.style.fg, Some(Color::Rgb(255, 0, 0)));
        assert_eq!(first.style.bg, Some(Color::Rgb(0, 255, 0)));

        let last = &lines[1].spans[0];
        assert_eq!(last.style.fg, Some(Color::Rgb(0, 0, 255)));
        assert_eq!(last.style.bg, Some(Color::Reset));
    }

    #[test]
    fn clipped_to_available_space() {
        let lines = thumbnail_lines(&checker(), 1, 1);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].spans.len(), 1);
    }
}
