use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::engine::DeathReason;
use crate::theme::Theme;

/// Draws the death screen as a centered popup over the frozen board.
pub fn render_death_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    previous_best: u32,
    death_reason: Option<DeathReason>,
    theme: &Theme,
) {
    let popup = centered_popup(area, 70, 50);
    frame.render_widget(Clear, popup);

    let mut lines = vec![
        Line::styled(
            "YOU LOST!",
            Style::default()
                .fg(theme.death_title)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!("Score: {score}")),
        Line::from(format!("Best: {}", previous_best.max(score))),
        Line::from(cause_text(death_reason)),
    ];
    if score > previous_best {
        lines.push(Line::from("New best score!"));
    }
    lines.push(Line::from(""));
    lines.push(Line::from("[Click]/[Enter] Restart"));
    lines.push(Line::from("[Q]/[Esc] Quit"));

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

fn cause_text(death_reason: Option<DeathReason>) -> &'static str {
    match death_reason {
        Some(DeathReason::WallCollision) => "Cause: hit the wall",
        Some(DeathReason::SelfCollision) => "Cause: bit yourself",
        None => "",
    }
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
