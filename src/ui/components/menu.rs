use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::store::schema::{DEFAULT_DURATION, DURATIONS};
use crate::ui::theme::Theme;

/// Duration picker shown before a session.
pub struct Menu<'a> {
    pub selected: usize,
    pub personal_best: Option<u32>,
    pub theme: &'a Theme,
}

impl<'a> Menu<'a> {
    pub fn new(theme: &'a Theme, duration: u32) -> Self {
        let selected = DURATIONS
            .iter()
            .position(|&d| d == duration)
            .or_else(|| DURATIONS.iter().position(|&d| d == DEFAULT_DURATION))
            .unwrap_or(0);
        Self {
            selected,
            personal_best: None,
            theme,
        }
    }

    pub fn duration(&self) -> u32 {
        DURATIONS[self.selected]
    }

    /// Clamps at the first entry rather than wrapping.
    pub fn prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1).min(DURATIONS.len() - 1);
    }
}

impl Widget for &Menu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let dim = Style::default().fg(colors.pending);

        let mut choices: Vec<Span> = Vec::new();
        for (i, d) in DURATIONS.iter().enumerate() {
            if i > 0 {
                choices.push(Span::raw("  "));
            }
            let style = if i == self.selected {
                Style::default()
                    .fg(colors.fg)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                dim
            };
            choices.push(Span::styled(format!("{d}s"), style));
        }

        let best = match self.personal_best {
            Some(wpm) => format!("pb: {wpm} wpm"),
            None => "no runs yet".to_string(),
        };

        let lines = vec![
            Line::from(Span::styled(
                "wpmx",
                Style::default().fg(colors.accent).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(choices),
            Line::from(Span::styled(best, dim)),
            Line::from(""),
            Line::from(Span::styled("h / l or \u{2190} / \u{2192} to choose, Enter to start", dim)),
            Line::from(""),
            Line::from(Span::styled("\u{2500}\u{2500}\u{2500} keys \u{2500}\u{2500}\u{2500}", dim)),
            Line::from(Span::styled("Tab    restart game", dim)),
            Line::from(Span::styled("Esc    back to menu", dim)),
            Line::from(Span::styled("q      quit", dim)),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().bg(colors.bg))
            .render(area, buf);
    }
}
