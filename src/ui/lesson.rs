//! Lesson screen: content followed by the quiz, then results

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::state::LessonState;
use crate::catalog::Lesson;
use crate::progress::engine::{GradeOutcome, PASS_THRESHOLD};
use crate::theme::Theme;

/// Draw the lesson screen
pub fn draw(frame: &mut Frame, area: Rect, lesson: &Lesson, state: &LessonState, theme: &Theme) {
    let chunks = Layout::vertical([Constraint::Length(7), Constraint::Min(5)]).split(area);

    draw_content(frame, chunks[0], lesson, theme);

    if let Some(ref outcome) = state.outcome {
        draw_results(frame, chunks[1], lesson, outcome, theme);
    } else {
        draw_question(frame, chunks[1], lesson, state, theme);
    }
}

/// Draw the lesson body text
fn draw_content(frame: &mut Frame, area: Rect, lesson: &Lesson, theme: &Theme) {
    let block = Block::default()
        .title(format!(" {} ", lesson.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.bg_primary));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width.max(1) as usize;
    let wrapped = textwrap::wrap(&lesson.content, width);
    let lines: Vec<Line> = wrapped
        .into_iter()
        .map(|l| Line::from(Span::styled(l.into_owned(), Style::default().fg(theme.fg_primary))))
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Draw the current quiz question
fn draw_question(frame: &mut Frame, area: Rect, lesson: &Lesson, state: &LessonState, theme: &Theme) {
    let block = Block::default()
        .title(" Quiz ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_primary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let current = state.current_question;
    let total = lesson.quiz.len();

    let Some(question) = lesson.quiz.get(current) else {
        return;
    };

    let mut lines = vec![];

    lines.push(Line::from(Span::styled(
        format!("Question {} of {}", current + 1, total),
        Style::default().fg(theme.fg_muted),
    )));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        question.prompt.clone(),
        Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    for (i, option) in question.options.iter().enumerate() {
        let is_selected = i == state.selected_option;
        let prefix = if is_selected { "\u{25CF}" } else { "\u{25CB}" }; // ● or ○
        let letter = (b'A' + i as u8) as char;

        let style = if is_selected {
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg_secondary)
        };

        lines.push(Line::from(Span::styled(format!("  {} {}) {}", prefix, letter, option), style)));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[j/k] Select    [Enter] Confirm answer    [Esc] Back to courses",
        Style::default().fg(theme.fg_muted),
    )));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

/// Draw the graded results
fn draw_results(
    frame: &mut Frame,
    area: Rect,
    lesson: &Lesson,
    outcome: &GradeOutcome,
    theme: &Theme,
) {
    let block = Block::default()
        .title(" Quiz Results ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_primary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![Line::from("")];

    if outcome.passed {
        lines.push(Line::from(Span::styled(
            format!("Passed! You scored {}%", outcome.score_percent),
            Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            format!(
                "You scored {}%. You need {PASS_THRESHOLD}% to pass. Try again!",
                outcome.score_percent
            ),
            Style::default().fg(theme.warning).add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(""));

    // Per-question feedback, revealing the right answer for misses
    for (i, question) in lesson.quiz.iter().enumerate() {
        let correct = outcome.per_question.get(i).copied().unwrap_or(false);
        if correct {
            lines.push(Line::from(Span::styled(
                format!("  \u{2713} Question {}: correct", i + 1),
                Style::default().fg(theme.success),
            )));
        } else {
            let answer = question
                .options
                .get(question.correct_index)
                .map(String::as_str)
                .unwrap_or("?");
            lines.push(Line::from(Span::styled(
                format!("  \u{2717} Question {}: incorrect - answer: {}", i + 1, answer),
                Style::default().fg(theme.error),
            )));
        }
    }

    if outcome.already_completed {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Already completed - no points awarded again",
            Style::default().fg(theme.fg_muted),
        )));
    }
    for badge in &outcome.new_achievements {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Achievement unlocked: {badge}"),
            Style::default().fg(theme.warning).add_modifier(Modifier::BOLD),
        )));
    }
    if outcome.newly_unlocked_game {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Game unlocked! Press 3 to play",
            Style::default().fg(theme.info).add_modifier(Modifier::BOLD),
        )));
    }

    lines.push(Line::from(""));
    if outcome.passed {
        lines.push(Line::from(Span::styled(
            "[Enter] Back to courses",
            Style::default().fg(theme.fg_muted),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "[Enter] Retry    [Esc] Back to courses",
            Style::default().fg(theme.fg_muted),
        )));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}
