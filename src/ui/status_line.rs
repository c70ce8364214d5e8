//! Bottom status line component

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::state::{InputState, StatusState};
use crate::theme::Theme;

/// Draw the status line at the bottom of the screen
pub fn draw(frame: &mut Frame, area: Rect, state: &StatusState, hint: &str, theme: &Theme) {
    let (text, style) = if let Some(ref msg) = state.message {
        let style = if state.is_error {
            Style::default().fg(theme.error)
        } else {
            Style::default().fg(theme.fg_muted)
        };
        (msg.clone(), style)
    } else {
        (hint.to_string(), Style::default().fg(theme.fg_muted))
    };

    let paragraph = Paragraph::new(Line::from(Span::styled(text, style)));
    frame.render_widget(paragraph, area);
}

/// Build a line rendering an input buffer with a visible cursor
pub fn input_line(prefix: &str, input: &InputState, theme: &Theme) -> Line<'static> {
    let base_style = Style::default().fg(theme.fg_secondary);
    let text = format!("{prefix}{}", input.value);
    let cursor_pos = prefix.chars().count() + input.cursor;

    let chars: Vec<char> = text.chars().collect();
    let mut spans = Vec::new();

    if cursor_pos > 0 {
        let before: String = chars.iter().take(cursor_pos).collect();
        spans.push(Span::styled(before, base_style));
    }

    let cursor_char = chars.get(cursor_pos).copied().unwrap_or(' ');
    let cursor_style =
        Style::default().fg(theme.bg_primary).bg(theme.fg_primary).add_modifier(Modifier::BOLD);
    spans.push(Span::styled(cursor_char.to_string(), cursor_style));

    if cursor_pos + 1 < chars.len() {
        let after: String = chars.iter().skip(cursor_pos + 1).collect();
        spans.push(Span::styled(after, base_style));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_at_start() {
        let theme = Theme::default();
        let input = InputState { value: "test".into(), cursor: 0 };
        let line = input_line("", &input, &theme);
        assert_eq!(line.spans.len(), 2); // cursor + rest
    }

    #[test]
    fn cursor_at_end() {
        let theme = Theme::default();
        let input = InputState { value: "test".into(), cursor: 4 };
        let line = input_line("", &input, &theme);
        assert_eq!(line.spans.len(), 2); // before + cursor (space)
    }

    #[test]
    fn prefix_shifts_the_cursor() {
        let theme = Theme::default();
        let input = InputState { value: "test".into(), cursor: 2 };
        let line = input_line("> ", &input, &theme);
        assert_eq!(line.spans.len(), 3); // before + cursor + after

        let rendered: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(rendered, "> test");
    }
}
