use std::ops::Range;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::SessionSnapshot;
use crate::ui::theme::ThemeColors;

/// Lines of words on screen at once.
pub const VISIBLE_LINES: usize = 3;

pub struct TypingArea<'a> {
    session: SessionSnapshot<'a>,
    colors: &'a ThemeColors,
}

impl<'a> TypingArea<'a> {
    pub fn new(session: SessionSnapshot<'a>, colors: &'a ThemeColors) -> Self {
        Self { session, colors }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WordKind {
    Past,
    Current,
    Future,
}

/// Cells a word occupies: the target or, when overtyped, the input.
fn word_width(word: &str, input: &str) -> usize {
    word.chars().count().max(input.chars().count())
}

/// Greedy line filling with one space between words. A word wider than the
/// line still gets a line of its own.
pub fn wrap_words(widths: &[usize], max_width: usize) -> Vec<Range<usize>> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut used = 0;

    for (i, &w) in widths.iter().enumerate() {
        if i > start && used + 1 + w > max_width {
            lines.push(start..i);
            start = i;
            used = w;
        } else if i == start {
            used = w;
        } else {
            used += 1 + w;
        }
    }
    if start < widths.len() {
        lines.push(start..widths.len());
    }
    lines
}

/// Window of lines keeping the current word on the second row once the
/// first line has been typed through.
pub fn visible_lines(lines: &[Range<usize>], current: usize) -> Range<usize> {
    let current_line = lines
        .iter()
        .position(|l| l.contains(&current))
        .unwrap_or(lines.len().saturating_sub(1));
    let first = current_line.saturating_sub(1);
    first..(first + VISIBLE_LINES).min(lines.len())
}

fn word_spans<'s>(word: &str, input: &str, kind: WordKind, colors: &ThemeColors) -> Vec<Span<'s>> {
    let correct = Style::default().fg(colors.correct);
    let incorrect = Style::default().fg(colors.incorrect);
    let pending = Style::default().fg(colors.pending);

    let typed: Vec<char> = input.chars().collect();
    let mut spans: Vec<Span> = Vec::with_capacity(typed.len().max(word.len()));

    for (j, target_ch) in word.chars().enumerate() {
        let style = match (kind, typed.get(j)) {
            (WordKind::Future, _) => pending,
            (_, Some(&c)) if c == target_ch => correct,
            (WordKind::Past, _) | (WordKind::Current, Some(_)) => incorrect,
            (WordKind::Current, None) if j == typed.len() => Style::default()
                .fg(colors.cursor)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            (WordKind::Current, None) => pending,
        };
        spans.push(Span::styled(target_ch.to_string(), style));
    }

    let extra_style = match kind {
        WordKind::Past => incorrect.add_modifier(Modifier::CROSSED_OUT),
        _ => incorrect,
    };
    for &c in typed.iter().skip(word.chars().count()) {
        spans.push(Span::styled(c.to_string(), extra_style));
    }

    spans
}

impl Widget for TypingArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let s = &self.session;
        let block = Block::bordered()
            .border_style(Style::default().fg(self.colors.border))
            .style(Style::default().bg(self.colors.bg));
        let inner_width = block.inner(area).width as usize;

        let input_for = |i: usize| s.word_inputs.get(i).map(String::as_str).unwrap_or("");
        let widths: Vec<usize> = s
            .words
            .iter()
            .enumerate()
            .map(|(i, w)| word_width(w, input_for(i)))
            .collect();
        let lines = wrap_words(&widths, inner_width.max(1));
        let window = visible_lines(&lines, s.current_word_index);

        let rendered: Vec<Line> = lines[window]
            .iter()
            .map(|range| {
                let mut spans = Vec::new();
                for i in range.clone() {
                    let kind = match i.cmp(&s.current_word_index) {
                        std::cmp::Ordering::Less => WordKind::Past,
                        std::cmp::Ordering::Equal => WordKind::Current,
                        std::cmp::Ordering::Greater => WordKind::Future,
                    };
                    if i > range.start {
                        spans.push(Span::raw(" "));
                    }
                    spans.extend(word_spans(&s.words[i], input_for(i), kind, self.colors));
                }
                Line::from(spans)
            })
            .collect();

        Paragraph::new(rendered).block(block).render(area, buf);
    }
}
