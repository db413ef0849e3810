use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::session::result::SessionResult;
use crate::ui::theme::Theme;

/// End-of-session summary.
pub struct Dashboard<'a> {
    pub result: &'a SessionResult,
    /// Best WPM for this duration, including the result being shown.
    pub personal_best: Option<u32>,
    pub theme: &'a Theme,
}

impl<'a> Dashboard<'a> {
    pub fn new(result: &'a SessionResult, personal_best: Option<u32>, theme: &'a Theme) -> Self {
        Self {
            result,
            personal_best,
            theme,
        }
    }

    pub fn is_new_best(&self) -> bool {
        self.personal_best.is_some_and(|pb| self.result.wpm >= pb)
    }
}

impl Widget for Dashboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let dim = Style::default().fg(colors.pending);

        let mut lines = vec![
            Line::from(Span::styled(
                "wpmx",
                Style::default().fg(colors.accent).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("{} wpm", self.result.wpm),
                Style::default().fg(colors.fg).add_modifier(Modifier::BOLD),
            )),
        ];

        match self.personal_best {
            Some(_) if self.is_new_best() => lines.push(Line::from(Span::styled(
                "new personal best!",
                Style::default().fg(colors.success).add_modifier(Modifier::BOLD),
            ))),
            Some(pb) => lines.push(Line::from(Span::styled(format!("pb: {pb} wpm"), dim))),
            None => {}
        }

        lines.push(Line::from(Span::styled(
            format!("{:.1}% accuracy", self.result.accuracy),
            Style::default().fg(colors.fg),
        )));
        lines.push(Line::from(Span::styled(
            format!("{}s", self.result.duration_secs),
            dim,
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Tab \u{2192} restart   Esc \u{2192} menu   q \u{2192} quit",
            dim,
        )));

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().bg(colors.bg))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(wpm: u32) -> SessionResult {
        SessionResult {
            wpm,
            accuracy: 96.4,
            duration_secs: 30,
        }
    }

    fn text(buf: &Buffer) -> String {
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn matching_best_counts_as_new_best() {
        let theme = Theme::default();
        let r = result(70);
        assert!(Dashboard::new(&r, Some(70), &theme).is_new_best());
        assert!(!Dashboard::new(&r, Some(71), &theme).is_new_best());
        assert!(!Dashboard::new(&r, None, &theme).is_new_best());
    }

    #[test]
    fn renders_score_lines() {
        let theme = Theme::default();
        let r = result(70);
        let area = Rect::new(0, 0, 50, 10);
        let mut buf = Buffer::empty(area);
        Dashboard::new(&r, Some(82), &theme).render(area, &mut buf);

        let rendered = text(&buf);
        assert!(rendered.contains("70 wpm"));
        assert!(rendered.contains("pb: 82 wpm"));
        assert!(rendered.contains("96.4% accuracy"));
        assert!(rendered.contains("30s"));
    }
}
