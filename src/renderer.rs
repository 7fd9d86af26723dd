use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::GridSize;
use crate::engine::{GameState, SimulationEngine};
use crate::snake::Position;
use crate::theme::{BORDER_PLAY_AREA, GLYPH_CELL, Theme, cell_width};
use crate::ui::hud::{HudInfo, render_hud};
use crate::ui::menu::render_death_menu;

/// Renders the full frame from a read-only view of the engine.
pub fn render(frame: &mut Frame<'_>, engine: &SimulationEngine, hud_info: HudInfo<'_>) {
    let theme = hud_info.theme;
    let play_area = render_hud(frame, frame.area(), engine, &hud_info);

    let board = board_rect(play_area, engine.bounds());
    let block = Block::bordered()
        .border_set(BORDER_PLAY_AREA)
        .border_style(Style::new().fg(theme.border))
        .style(Style::new().bg(theme.play_bg));

    let inner = block.inner(board);
    frame.render_widget(block, board);

    render_food(frame, inner, engine, theme);
    render_snake(frame, inner, engine, theme);

    if engine.state() == GameState::Die {
        render_death_menu(
            frame,
            play_area,
            engine.score(),
            hud_info.best_score,
            engine.death_reason(),
            theme,
        );
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, engine: &SimulationEngine, theme: &Theme) {
    let Some(food) = engine.food() else {
        return;
    };
    let Some((x, y)) = logical_to_terminal(inner, engine.bounds(), food) else {
        return;
    };

    frame
        .buffer_mut()
        .set_string(x, y, GLYPH_CELL, Style::new().fg(theme.food));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, engine: &SimulationEngine, theme: &Theme) {
    let bounds = engine.bounds();
    let body_style = Style::new().fg(theme.snake_body);
    let head_style = body_style.fg(theme.snake_head).add_modifier(Modifier::BOLD);

    let buffer = frame.buffer_mut();
    // Tail first so the head wins if it overlaps the body on death.
    let segments: Vec<&Position> = engine.body().collect();
    for (index, segment) in segments.iter().enumerate().rev() {
        let Some((x, y)) = logical_to_terminal(inner, bounds, **segment) else {
            continue;
        };
        let style = if index == 0 { head_style } else { body_style };
        buffer.set_string(x, y, GLYPH_CELL, style);
    }
}

/// Board rectangle (grid plus border) centred in `area`, clipped to fit.
fn board_rect(area: Rect, bounds: GridSize) -> Rect {
    let width = bounds
        .cols
        .saturating_mul(cell_width())
        .saturating_add(2)
        .min(area.width);
    let height = bounds.rows.saturating_add(2).min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(cell_width())?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(cell_width()) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
