use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::engine::SimulationEngine;
use crate::theme::Theme;

const SEPARATOR: &str = " │ ";

/// Values shown alongside the engine state that the engine does not own.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo<'a> {
    pub best_score: u32,
    pub theme: &'a Theme,
}

/// Renders the one-line HUD and returns the remaining play area above it.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    engine: &SimulationEngine,
    info: &HudInfo<'_>,
) -> Rect {
    let layout = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]);
    let [play_area, hud_area] = layout.areas(area);

    let line = info_line(
        engine.score(),
        info.best_score,
        engine.snake().len(),
        engine.speed(),
        info.theme,
    );
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), hud_area);

    play_area
}

fn info_line(score: u32, best: u32, length: usize, speed: f64, theme: &Theme) -> Line<'static> {
    let label = Style::default().fg(theme.hud_text);
    let value = Style::default().fg(theme.hud_value);

    Line::from(vec![
        Span::styled("Score ", label),
        Span::styled(score.to_string(), value),
        Span::styled(SEPARATOR, label),
        Span::styled("Best ", label),
        Span::styled(best.max(score).to_string(), value),
        Span::styled(SEPARATOR, label),
        Span::styled("Length ", label),
        Span::styled(length.to_string(), value),
        Span::styled(SEPARATOR, label),
        Span::styled("Speed ", label),
        Span::styled(format!("{speed:.2}/s"), value),
    ])
}
