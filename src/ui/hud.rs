use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::config::SCORE_LINES;

/// Renders the score line at the bottom and returns the board area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, score: u32) -> Rect {
    let [board_area, score_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(SCORE_LINES)]).areas(area);

    frame.render_widget(
        Paragraph::new(Line::from(format!("SCORE: {score}"))).alignment(Alignment::Left),
        score_area,
    );

    board_area
}
