//! Course browser component
//!
//! A flat-index tree of courses and their lessons. The same tree helpers
//! back the teacher's manage-courses screen.

use std::collections::HashSet;

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::state::BrowserState;
use crate::catalog::{Catalog, Lesson};
use crate::progress::LearnerProfile;
use crate::theme::Theme;

/// Status indicators for lessons
const STATUS_NOT_STARTED: &str = "○";
const STATUS_COMPLETED: &str = "✓";

/// Represents an item in the browser tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserItem {
    Course(usize),
    Lesson(usize, usize),
}

/// Calculate total visible items for a catalog and expansion set
pub fn visible_items(catalog: &Catalog, expanded: &HashSet<usize>) -> usize {
    let mut count = 0;
    for (course_idx, (_, course)) in catalog.courses.iter().enumerate() {
        count += 1; // Course itself
        if expanded.contains(&course_idx) {
            count += course.lessons.len();
        }
    }
    count
}

/// Get the course/lesson at a given flat index
pub fn item_at_index(
    catalog: &Catalog,
    expanded: &HashSet<usize>,
    target_index: usize,
) -> Option<BrowserItem> {
    let mut current_idx = 0;
    for (course_idx, (_, course)) in catalog.courses.iter().enumerate() {
        if current_idx == target_index {
            return Some(BrowserItem::Course(course_idx));
        }
        current_idx += 1;

        if expanded.contains(&course_idx) {
            for (lesson_idx, _lesson) in course.lessons.iter().enumerate() {
                if current_idx == target_index {
                    return Some(BrowserItem::Lesson(course_idx, lesson_idx));
                }
                current_idx += 1;
            }
        }
    }
    None
}

/// Resolve a tree position to the course name and lesson
pub fn lesson_at(catalog: &Catalog, course_idx: usize, lesson_idx: usize) -> Option<(&str, &Lesson)> {
    let (name, course) = catalog.courses.iter().nth(course_idx)?;
    let lesson = course.lessons.get(lesson_idx)?;
    Some((name.as_str(), lesson))
}

/// Draw the course browser
pub fn draw(
    frame: &mut Frame,
    area: Rect,
    catalog: &Catalog,
    browser: &mut BrowserState,
    profile: &LearnerProfile,
    theme: &Theme,
) {
    let block = Block::default()
        .title(" Courses ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_primary));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Update visible height for scroll calculations
    browser.visible_height = inner.height as usize;

    if catalog.courses.is_empty() {
        let msg = Paragraph::new("No courses yet\n\nA teacher can add some")
            .style(Style::default().fg(theme.fg_muted))
            .wrap(Wrap { trim: true });
        frame.render_widget(msg, inner);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    let mut flat_index = 0;

    for (course_idx, (name, course)) in catalog.courses.iter().enumerate() {
        let is_expanded = browser.expanded_courses.contains(&course_idx);
        let expand_icon = if is_expanded { "▼" } else { "▶" };

        let completed = course.lessons.iter().filter(|l| profile.has_completed(&l.id)).count();
        let is_selected = flat_index == browser.selected_index;

        let course_text =
            format!("{} {} ({}/{})", expand_icon, name, completed, course.lessons.len());
        let course_style = if is_selected {
            Style::default()
                .fg(theme.bg_primary)
                .bg(theme.accent_primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg_primary)
        };
        lines.push(Line::from(Span::styled(course_text, course_style)));
        flat_index += 1;

        if is_expanded {
            for lesson in &course.lessons {
                let is_selected = flat_index == browser.selected_index;
                let done = profile.has_completed(&lesson.id);
                let status = if done { STATUS_COMPLETED } else { STATUS_NOT_STARTED };

                let lesson_text = format!("   {} {}", status, lesson.title);
                let lesson_style = if is_selected {
                    Style::default()
                        .fg(theme.bg_primary)
                        .bg(theme.accent_primary)
                        .add_modifier(Modifier::BOLD)
                } else if done {
                    Style::default().fg(theme.success)
                } else {
                    Style::default().fg(theme.fg_secondary)
                };

                lines.push(Line::from(Span::styled(lesson_text, lesson_style)));
                flat_index += 1;
            }
        }
    }

    let visible_height = inner.height as usize;
    let start = browser.scroll_offset;
    let end = (start + visible_height).min(lines.len());
    let visible_lines: Vec<Line> = lines.into_iter().skip(start).take(end - start).collect();

    frame.render_widget(Paragraph::new(visible_lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Course, Question};

    fn test_catalog() -> Catalog {
        let q = Question {
            prompt: "q".into(),
            options: vec!["a".into(), "b".into()],
            correct_index: 0,
        };
        let mut catalog = Catalog::default();
        catalog.courses.insert(
            "Alpha".into(),
            Course {
                lessons: vec![
                    Lesson::new("alpha_1", "One", "...", vec![q.clone()]),
                    Lesson::new("alpha_2", "Two", "...", vec![q.clone()]),
                ],
            },
        );
        catalog
            .courses
            .insert("Beta".into(), Course { lessons: vec![Lesson::new("beta_1", "One", "...", vec![q])] });
        catalog
    }

    #[test]
    fn visible_items_collapsed() {
        let catalog = test_catalog();
        // With no courses expanded, only course headers are visible
        assert_eq!(visible_items(&catalog, &HashSet::new()), 2);
    }

    #[test]
    fn visible_items_expanded() {
        let catalog = test_catalog();
        let expanded: HashSet<usize> = [0].into();
        // Course 1 expanded (2 lessons) + course 2 collapsed = 1 + 2 + 1 = 4
        assert_eq!(visible_items(&catalog, &expanded), 4);
    }

    #[test]
    fn item_at_index_courses() {
        let catalog = test_catalog();
        let expanded = HashSet::new();

        assert_eq!(item_at_index(&catalog, &expanded, 0), Some(BrowserItem::Course(0)));
        assert_eq!(item_at_index(&catalog, &expanded, 1), Some(BrowserItem::Course(1)));
        assert_eq!(item_at_index(&catalog, &expanded, 2), None);
    }

    #[test]
    fn item_at_index_lessons() {
        let catalog = test_catalog();
        let expanded: HashSet<usize> = [0].into();

        assert_eq!(item_at_index(&catalog, &expanded, 0), Some(BrowserItem::Course(0)));
        assert_eq!(item_at_index(&catalog, &expanded, 1), Some(BrowserItem::Lesson(0, 0)));
        assert_eq!(item_at_index(&catalog, &expanded, 2), Some(BrowserItem::Lesson(0, 1)));
        assert_eq!(item_at_index(&catalog, &expanded, 3), Some(BrowserItem::Course(1)));
    }

    #[test]
    fn lesson_at_resolves_course_name() {
        let catalog = test_catalog();
        let (name, lesson) = lesson_at(&catalog, 1, 0).unwrap();
        assert_eq!(name, "Beta");
        assert_eq!(lesson.id, "beta_1");
        assert!(lesson_at(&catalog, 1, 5).is_none());
    }
}
