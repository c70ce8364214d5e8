//! Teacher surface: manage courses, the add-lesson wizard, and statistics

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::state::{AddLessonForm, FormStage, ManageState};
use crate::catalog::Catalog;
use crate::catalog::authoring::{OPTIONS_PER_QUESTION, catalog_stats, course_progress};
use crate::progress::LearnerProfile;
use crate::theme::Theme;

use super::layout::centered_rect;

/// Draw the manage-courses screen
pub fn draw_manage(
    frame: &mut Frame,
    area: Rect,
    catalog: &Catalog,
    state: &ManageState,
    theme: &Theme,
) {
    let block = Block::default()
        .title(" Manage Courses ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_primary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    let mut flat_index = 0;

    for (course_idx, (name, course)) in catalog.courses.iter().enumerate() {
        let is_expanded = state.expanded_courses.contains(&course_idx);
        let expand_icon = if is_expanded { "▼" } else { "▶" };
        let is_selected = flat_index == state.selected_index;

        let course_text = format!("{} {} ({} lessons)", expand_icon, name, course.lessons.len());
        let style = if is_selected {
            Style::default()
                .fg(theme.bg_primary)
                .bg(theme.accent_primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg_primary)
        };
        lines.push(Line::from(Span::styled(course_text, style)));
        flat_index += 1;

        if is_expanded {
            for lesson in &course.lessons {
                let is_selected = flat_index == state.selected_index;
                let style = if is_selected {
                    Style::default()
                        .fg(theme.bg_primary)
                        .bg(theme.accent_primary)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.fg_secondary)
                };
                lines.push(Line::from(Span::styled(
                    format!("   {} [{}]", lesson.title, lesson.id),
                    style,
                )));
                flat_index += 1;
            }
        }
    }

    if catalog.courses.is_empty() {
        lines.push(Line::from(Span::styled(
            "No courses yet - press n to create one",
            Style::default().fg(theme.fg_muted),
        )));
    }

    lines.push(Line::from(""));
    if let Some(input) = &state.new_course_input {
        lines.push(super::status_line::input_line("New course name: ", input, theme));
    } else {
        lines.push(Line::from(Span::styled(
            "[n] New course    [a] Add lesson    [d] Delete lesson    [t] Statistics    [Esc] Log out",
            Style::default().fg(theme.fg_muted),
        )));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

/// Draw the add-lesson wizard as a centered overlay
pub fn draw_add_lesson(frame: &mut Frame, area: Rect, form: &AddLessonForm, theme: &Theme) {
    let overlay = centered_rect(70, 70, area);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .title(format!(" Add Lesson to {} ", form.course))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_secondary));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let mut lines = vec![Line::from("")];

    // Progress so far
    if !form.title.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Title: {}", form.title),
            Style::default().fg(theme.fg_secondary),
        )));
    }
    if !form.content.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Content: {}", form.content),
            Style::default().fg(theme.fg_secondary),
        )));
    }
    if !form.questions.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Questions so far: {}", form.questions.len()),
            Style::default().fg(theme.fg_secondary),
        )));
    }
    lines.push(Line::from(""));

    if form.stage == FormStage::Confirm {
        lines.push(Line::from(Span::styled(
            "Question saved.",
            Style::default().fg(theme.success),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[Enter] Save lesson    [a] Add another question    [Esc] Discard",
            Style::default().fg(theme.fg_muted),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            form.field_label(),
            Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
        )));
        if let FormStage::Option(i) = form.stage {
            lines.push(Line::from(Span::styled(
                format!("({} of {OPTIONS_PER_QUESTION} options)", i + 1),
                Style::default().fg(theme.fg_muted),
            )));
        }
        lines.push(Line::from(""));
        lines.push(super::status_line::input_line("> ", &form.input, theme));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[Enter] Next field    [Esc] Discard lesson",
            Style::default().fg(theme.fg_muted),
        )));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

/// Draw the statistics screen
pub fn draw_statistics(
    frame: &mut Frame,
    area: Rect,
    catalog: &Catalog,
    profile: &LearnerProfile,
    theme: &Theme,
) {
    let block = Block::default()
        .title(" Statistics ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_primary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let stats = catalog_stats(catalog, &profile.completed_lesson_ids);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Courses: {}", stats.courses),
            Style::default().fg(theme.fg_primary),
        )),
        Line::from(Span::styled(
            format!("Lessons: {}", stats.lessons),
            Style::default().fg(theme.fg_primary),
        )),
        Line::from(Span::styled(
            format!(
                "Learner completions: {} ({})",
                stats.completed_lessons,
                if profile.name.is_empty() { "no learner yet" } else { profile.name.as_str() }
            ),
            Style::default().fg(theme.fg_primary),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Per course",
            Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
        )),
    ];

    for progress in course_progress(catalog, &profile.completed_lesson_ids) {
        lines.push(Line::from(Span::styled(
            format!("  {}: {}/{} lessons completed", progress.name, progress.completed, progress.total),
            Style::default().fg(theme.fg_secondary),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Esc] Back to manage courses",
        Style::default().fg(theme.fg_muted),
    )));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}
