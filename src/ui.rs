pub mod screen;
pub mod theme;
pub mod typing;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::{app::App, session::SessionResult, ui::theme::Palette};

pub(crate) const HORIZONTAL_MARGIN: u16 = 5;
pub(crate) const VERTICAL_MARGIN: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        screen::current_view(&self.screen).render(self, area, buf);
    }
}

/// Vertically centered block of centered lines
pub(crate) fn render_centered(lines: Vec<Line<'static>>, area: Rect, buf: &mut Buffer) {
    let height = (lines.len() as u16).min(area.height);
    let top = area.height.saturating_sub(height) / 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN.min(area.width / 4))
        .constraints([
            Constraint::Length(top),
            Constraint::Min(height),
        ])
        .split(area);

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[1], buf);
}

/// "WPM: 42 | Accuracy: 97%", with a dash when nothing was typed
pub(crate) fn result_line(result: &SessionResult, palette: &Palette) -> Line<'static> {
    let wpm = if result.typing_began {
        result.wpm.to_string()
    } else {
        "—".to_string()
    };
    Line::from(Span::styled(
        format!("WPM: {} | Accuracy: {}%", wpm, result.accuracy),
        palette.bold(),
    ))
}
