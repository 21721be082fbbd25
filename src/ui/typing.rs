use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::session::{CharState, Marker, TypingSession};
use crate::ui::theme::Palette;

/// Target text colored by what has been typed so far
pub struct TypingBox<'a> {
    pub session: &'a TypingSession,
    pub palette: Palette,
}

impl TypingBox<'_> {
    pub fn spans(&self) -> Vec<Span<'static>> {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let correct = bold.fg(self.palette.correct);
        let incorrect = bold.fg(self.palette.incorrect);
        let dim = bold.fg(self.palette.muted).add_modifier(Modifier::DIM);
        let cursor = dim.add_modifier(Modifier::UNDERLINED);

        let marker = self.session.cursor_marker();
        let typed = self.session.typed();
        let target = self.session.target();

        let mut spans: Vec<Span<'static>> = self
            .session
            .char_states()
            .enumerate()
            .map(|(idx, state)| match state {
                CharState::Correct => Span::styled(target[idx].to_string(), correct),
                CharState::Incorrect => Span::styled(
                    match typed[idx] {
                        ' ' => "·".to_owned(),
                        c => c.to_string(),
                    },
                    incorrect,
                ),
                CharState::Untyped if marker == Some(Marker::Cursor(idx)) => {
                    Span::styled(target[idx].to_string(), cursor)
                }
                CharState::Untyped => Span::styled(target[idx].to_string(), dim),
            })
            .collect();

        if marker == Some(Marker::EndOfInput) {
            spans.push(Span::styled("|", Style::default().fg(self.palette.accent)));
        }
        spans
    }

    /// Rows needed to show the whole prompt at `width` columns
    pub fn height_for(&self, width: u16) -> u16 {
        let text_width = self.session.target_text().width().max(1) as f64;
        let width = width.max(1) as f64;
        (text_width / width).ceil() as u16 + 1
    }
}

impl Widget for TypingBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let one_line = self.session.target_text().width() <= area.width as usize;
        Paragraph::new(Line::from(self.spans()))
            .alignment(if one_line {
                Alignment::Center
            } else {
                Alignment::Left
            })
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
