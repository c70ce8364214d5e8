//! UI rendering components

pub mod courses;
pub mod dashboard;
pub mod game;
pub mod layout;
pub mod lesson;
pub mod login;
pub mod status_line;
pub mod teacher;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::Style;
use ratatui::widgets::Paragraph;

use crate::app::nav::Screen;
use crate::app::state::AppState;
use crate::config::Config;

/// Key hints per screen, shown when the status line has no message
fn hint_for(screen: Screen) -> &'static str {
    match screen {
        Screen::Login => "[Enter] Continue  [Ctrl+C] Quit",
        Screen::Courses => "[j/k] Move  [Enter] Open  [1] Courses  [2] Dashboard  [3] Game  [Esc] Log out  [q] Quit",
        Screen::Lesson => "[j/k] Select  [Enter] Confirm  [Esc] Back",
        Screen::Dashboard => "[r] Reset progress  [1] Courses  [3] Game  [Esc] Back",
        Screen::Game => "[Enter] Submit answer  [Esc] Exit game",
        Screen::ManageCourses => "[n] New course  [a] Add lesson  [d] Delete lesson  [t] Statistics  [Esc] Log out",
        Screen::AddLesson => "[Enter] Next field  [Esc] Discard",
        Screen::Statistics => "[Esc] Back",
    }
}

/// Main draw function
pub fn draw(frame: &mut Frame, state: &mut AppState, config: &Config) {
    let theme = config.active_theme();
    let screen = state.nav.screen();

    // Fill background
    let area = frame.area();
    frame.render_widget(Paragraph::new("").style(Style::default().bg(theme.bg_primary)), area);

    let chunks = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).split(area);
    let main_area = chunks[0];
    let status_area = chunks[1];

    match screen {
        Screen::Login => {
            login::draw(frame, main_area, &state.login, &theme);
        }
        Screen::Courses => {
            courses::draw(
                frame,
                main_area,
                &state.catalog,
                &mut state.browser,
                &state.profile,
                &theme,
            );
        }
        Screen::Lesson => {
            let lesson = state
                .lesson
                .lesson_id
                .as_deref()
                .and_then(|id| state.catalog.find_lesson(id))
                .map(|(_, lesson)| lesson.clone());
            if let Some(lesson) = lesson {
                lesson::draw(frame, main_area, &lesson, &state.lesson, &theme);
            }
        }
        Screen::Dashboard => {
            dashboard::draw(frame, main_area, &state.catalog, &state.profile, &theme);
        }
        Screen::Game => {
            game::draw(frame, main_area, &state.game, &theme);
        }
        Screen::ManageCourses => {
            teacher::draw_manage(frame, main_area, &state.catalog, &state.teacher.manage, &theme);
        }
        Screen::AddLesson => {
            if let Some(form) = &state.teacher.form {
                teacher::draw_add_lesson(frame, main_area, form, &theme);
            }
        }
        Screen::Statistics => {
            teacher::draw_statistics(frame, main_area, &state.catalog, &state.profile, &theme);
        }
    }

    status_line::draw(frame, status_area, &state.status, hint_for(screen), &theme);
}
