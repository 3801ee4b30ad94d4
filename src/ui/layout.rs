use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Vertical regions of the screen, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regions {
    pub header: Rect,
    pub image: Rect,
    pub prompt: Rect,
    pub result: Rect,
    pub footer: Rect,
}

/// Width of the "Go" button, borders included.
pub const GO_BUTTON_WIDTH: u16 = 8;

/// Split the frame. `image_height` includes the panel borders.
pub fn layout_regions(area: Rect, image_height: u16) -> Regions {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(image_height),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(area);

    Regions {
        header: chunks[0],
        image: chunks[1],
        prompt: chunks[2],
        result: chunks[3],
        footer: chunks[4],
    }
}

/// Split the prompt row into the input field and the "Go" button.
pub fn prompt_row(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(GO_BUTTON_WIDTH)])
        .split(area);
    (chunks[0], chunks[1])
}

/// Rect of the given size centered horizontally, sitting `bottom_gap` rows above
/// the bottom of `area`. Clamped to `area`.
pub fn bottom_centered_rect(area: Rect, width: u16, height: u16, bottom_gap: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area
        .y
        .saturating_add(area.height.saturating_sub(height.saturating_add(bottom_gap)));
    Rect {
        x,
        y,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_stack_without_gaps() {
        let regions = layout_regions(Rect::new(0, 0, 80, 40), 10);
        assert_eq!(regions.header.height, 3);
        assert_eq!(regions.image.y, 3);
        assert_eq!(regions.image.height, 10);
        assert_eq!(regions.prompt.y, 13);
        assert_eq!(regions.result.y, 16);
        assert_eq!(regions.result.height, 21);
        assert_eq!(regions.footer.y, 37);
    }

    #[test]
    fn go_button_takes_fixed_width() {
        let (input, button) = prompt_row(Rect::new(0, 0, 50, 3));
        assert_eq!(button.width, GO_BUTTON_WIDTH);
        assert_eq!(input.width, 50 - GO_BUTTON_WIDTH);
    }

    #[test]
    fn bottom_centered_rect_is_clamped() {
        let area = Rect::new(0, 0, 20, 10);
        let rect = bottom_centered_rect(area, 30, 3, 4);
        assert_eq!(rect, Rect::new(0, 3, 20, 3));
    }
}
