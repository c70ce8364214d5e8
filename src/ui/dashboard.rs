//! Learner dashboard: headline metrics and per-course progress

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use crate::catalog::Catalog;
use crate::catalog::authoring::course_progress;
use crate::progress::LearnerProfile;
use crate::theme::Theme;

/// Draw the dashboard screen
pub fn draw(frame: &mut Frame, area: Rect, catalog: &Catalog, profile: &LearnerProfile, theme: &Theme) {
    let block = Block::default()
        .title(" Dashboard ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_primary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let per_course = course_progress(catalog, &profile.completed_lesson_ids);
    let gauges_height = (per_course.len() as u16) * 3;
    let chunks = Layout::vertical([
        Constraint::Length(6),
        Constraint::Length(gauges_height),
        Constraint::Min(0),
    ])
    .split(inner);

    draw_metrics(frame, chunks[0], catalog, profile, theme);

    // One gauge per course, dangling profile ids contribute nothing
    let rows = Layout::vertical(vec![Constraint::Length(3); per_course.len()]).split(chunks[1]);
    for (row, progress) in rows.iter().zip(&per_course) {
        let ratio = if progress.total > 0 {
            progress.completed as f64 / progress.total as f64
        } else {
            0.0
        };
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title(format!(
                        " {} ({}/{} lessons) ",
                        progress.name, progress.completed, progress.total
                    ))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.border)),
            )
            .gauge_style(Style::default().fg(theme.accent_primary).bg(theme.bg_tertiary))
            .ratio(ratio.clamp(0.0, 1.0));
        frame.render_widget(gauge, *row);
    }

    draw_achievements(frame, chunks[2], profile, theme);
}

/// Headline numbers
fn draw_metrics(
    frame: &mut Frame,
    area: Rect,
    catalog: &Catalog,
    profile: &LearnerProfile,
    theme: &Theme,
) {
    let completed_in_catalog =
        catalog.lesson_ids().filter(|id| profile.has_completed(id)).count();

    let metric = |label: &str, value: String| {
        vec![
            Line::from(Span::styled(
                value,
                Style::default().fg(theme.fg_secondary).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(label.to_string(), Style::default().fg(theme.fg_muted))),
        ]
    };

    let cells = Layout::horizontal(vec![Constraint::Ratio(1, 4); 4]).split(area);
    let values = [
        ("Total Points", profile.points.to_string()),
        ("Lessons Completed", completed_in_catalog.to_string()),
        ("Current Streak", profile.current_streak.to_string()),
        ("Achievements", profile.achievements.len().to_string()),
    ];

    for (cell, (label, value)) in cells.iter().zip(values) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border));
        let cell_inner = block.inner(*cell);
        frame.render_widget(block, *cell);
        frame.render_widget(
            Paragraph::new(metric(label, value))
                .alignment(ratatui::layout::Alignment::Center),
            cell_inner,
        );
    }
}

/// Unlocked badges, in unlock order
fn draw_achievements(frame: &mut Frame, area: Rect, profile: &LearnerProfile, theme: &Theme) {
    let mut lines = vec![Line::from("")];

    if profile.achievements.is_empty() {
        lines.push(Line::from(Span::styled(
            "No achievements yet - complete lessons to earn badges",
            Style::default().fg(theme.fg_muted),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Achievements",
            Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
        )));
        for badge in &profile.achievements {
            lines.push(Line::from(Span::styled(
                format!("  \u{2605} {badge}"),
                Style::default().fg(theme.warning),
            )));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[r] Reset progress    [1] Courses    [Esc] Back",
        Style::default().fg(theme.fg_muted),
    )));

    frame.render_widget(Paragraph::new(lines), area);
}
