//! Mini-game screen: arithmetic challenges as a reward break

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::state::GameState;
use crate::theme::Theme;

use super::layout::centered_rect;

/// Draw the game screen
pub fn draw(frame: &mut Frame, area: Rect, state: &GameState, theme: &Theme) {
    let overlay = centered_rect(60, 60, area);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .title(" Math Challenge ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_secondary));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Reward yourself with a quick game break!",
            Style::default().fg(theme.fg_muted),
        )),
        Line::from(""),
    ];

    if let Some(challenge) = &state.round.current {
        lines.push(Line::from(Span::styled(
            challenge.prompt(),
            Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
        lines.push(super::status_line::input_line("Your answer: ", &state.input, theme));
    }

    if let Some((correct, expected)) = state.last_result {
        lines.push(Line::from(""));
        if correct {
            lines.push(Line::from(Span::styled(
                "\u{2713} Correct!",
                Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                format!("\u{2717} Incorrect. The answer was {expected}"),
                Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
            )));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(
            "Score: {}    Answered: {}",
            state.round.score, state.round.questions_answered
        ),
        Style::default().fg(theme.fg_secondary),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Enter] Submit    [Esc] Exit game",
        Style::default().fg(theme.fg_muted),
    )));

    let para = Paragraph::new(lines).alignment(ratatui::layout::Alignment::Center);
    frame.render_widget(para, inner);
}
