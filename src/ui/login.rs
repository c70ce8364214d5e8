//! Login screen: name entry, role selection, teacher passphrase

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::state::{InputState, LoginStage, LoginState};
use crate::theme::Theme;

use super::layout::centered_rect;

const TITLE: &str = "GAKKO";
const TAGLINE: &str = "Learn anywhere, anytime - even offline";

/// Draw the login screen
pub fn draw(frame: &mut Frame, area: Rect, state: &LoginState, theme: &Theme) {
    let overlay = centered_rect(50, 50, area);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .title(" Welcome ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_secondary));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            TITLE,
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(TAGLINE, Style::default().fg(theme.fg_muted))),
        Line::from(""),
        Line::from(""),
    ];

    match state.stage {
        LoginStage::Name => {
            lines.push(Line::from(Span::styled(
                "What is your name?",
                Style::default().fg(theme.fg_primary),
            )));
            lines.push(Line::from(""));
            lines.push(super::status_line::input_line("> ", &state.input, theme));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "[Enter] Continue",
                Style::default().fg(theme.fg_muted),
            )));
        }
        LoginStage::Role => {
            lines.push(Line::from(Span::styled(
                "How are you joining today?",
                Style::default().fg(theme.fg_primary),
            )));
            lines.push(Line::from(""));
            for (i, label) in ["Student", "Teacher"].iter().enumerate() {
                let selected = state.role_cursor == i;
                let prefix = if selected { "●" } else { "○" };
                let style = if selected {
                    Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.fg_secondary)
                };
                lines.push(Line::from(Span::styled(format!("  {prefix} {label}"), style)));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "[j/k] Select    [Enter] Confirm",
                Style::default().fg(theme.fg_muted),
            )));
        }
        LoginStage::Passphrase => {
            lines.push(Line::from(Span::styled(
                "Teacher passphrase",
                Style::default().fg(theme.fg_primary),
            )));
            lines.push(Line::from(""));
            // Masked entry; the passphrase is a deterrent, not a secret
            let masked = InputState {
                value: "*".repeat(state.input.value.chars().count()),
                cursor: state.input.cursor,
            };
            lines.push(super::status_line::input_line("> ", &masked, theme));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "[Enter] Confirm    [Esc] Back",
                Style::default().fg(theme.fg_muted),
            )));
        }
    }

    let para = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(para, inner);
}
