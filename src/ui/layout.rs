use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::ui::components::typing_area::VISIBLE_LINES;

/// Screen regions while a session is on screen.
pub struct GameLayout {
    pub header: Rect,
    pub words: Rect,
    pub footer: Rect,
}

impl GameLayout {
    /// Header and text are kept together and vertically centered; the
    /// footer pins to the bottom row.
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);

        let body = centered_rect(80, 100, vertical[0]);
        // header (2) + bordered text block
        let block_height = (2 + VISIBLE_LINES as u16 + 2).min(body.height);
        let top = body.y + body.height.saturating_sub(block_height) / 2;
        let stacked = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(Rect::new(body.x, top, body.width, block_height));

        Self {
            header: stacked[0],
            words: stacked[1],
            footer: vertical[1],
        }
    }
}

/// Centers a rect of `percent_x` × `percent_y` of `area`, never smaller
/// than a usable minimum unless `area` itself is smaller.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_WIDTH: u16 = 40;
    const MIN_HEIGHT: u16 = 10;

    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(MIN_WIDTH).min(area.width);
    let target_h = requested_h.max(MIN_HEIGHT).min(area.height);

    let left = area.x.saturating_add(area.width.saturating_sub(target_w) / 2);
    let top = area.y.saturating_add(area.height.saturating_sub(target_h) / 2);

    Rect::new(left, top, target_w, target_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_stays_inside_area() {
        let area = Rect::new(0, 0, 120, 40);
        let r = centered_rect(50, 50, area);
        assert_eq!(r, Rect::new(30, 10, 60, 20));
    }

    #[test]
    fn centered_rect_respects_minimum_then_area() {
        let area = Rect::new(0, 0, 30, 8);
        let r = centered_rect(10, 10, area);
        assert_eq!(r, area);
    }

    #[test]
    fn game_layout_fits_screen() {
        let area = Rect::new(0, 0, 100, 30);
        let layout = GameLayout::new(area);
        assert_eq!(layout.footer.y, 29);
        assert_eq!(layout.header.height, 2);
        assert!(layout.words.height >= 3);
        assert!(layout.words.bottom() <= layout.footer.y);
        assert_eq!(layout.header.x, layout.words.x);
    }
}
