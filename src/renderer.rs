use std::io;

use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Block;

use crate::game::Snapshot;
use crate::snake::Position;
use crate::ui::hud::render_hud;
use crate::ui::menu::render_pause_menu;

pub const GLYPH_SNAKE: &str = "o";
pub const GLYPH_FOOD: &str = "X";

/// Draws game snapshots. The control loop calls this after releasing the
/// state lock.
pub trait Renderer {
    fn present(&mut self, snapshot: &Snapshot) -> io::Result<()>;
}

impl<B: Backend> Renderer for Terminal<B> {
    fn present(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        self.draw(|frame| render(frame, snapshot))?;
        Ok(())
    }
}

/// Renders the full frame from a snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot) {
    let area = frame.area();
    let board_area = render_hud(frame, area, snapshot.score);

    // Border cells line up with the arena's wall cells.
    let board = Rect {
        x: board_area.x,
        y: board_area.y,
        width: (snapshot.arena.cols + 2).min(board_area.width),
        height: (snapshot.arena.rows + 2).min(board_area.height),
    };
    frame.render_widget(Block::bordered(), board);

    for food in &snapshot.food {
        put(frame, board, *food, GLYPH_FOOD);
    }
    for segment in &snapshot.segments {
        put(frame, board, *segment, GLYPH_SNAKE);
    }

    if snapshot.paused {
        render_pause_menu(frame, board);
    }
}

fn put(frame: &mut Frame<'_>, board: Rect, position: Position, glyph: &str) {
    let Some((x, y)) = cell_to_terminal(board, position) else {
        return;
    };
    frame.buffer_mut().set_string(x, y, glyph, Style::default());
}

fn cell_to_terminal(board: Rect, position: Position) -> Option<(u16, u16)> {
    let x = board.x.checked_add(u16::try_from(position.col).ok()?)?;
    let y = board.y.checked_add(u16::try_from(position.row).ok()?)?;
    if x >= board.right() || y >= board.bottom() {
        return None;
    }
    Some((x, y))
}
