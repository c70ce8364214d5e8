//! Application state and event handling
//!
//! The controller owns the state, dispatches one key event at a time, and
//! performs the persistence side effects after each mutating operation. A
//! failed save is logged and swallowed; the in-memory state stays
//! authoritative for the rest of the session.

pub mod input;
pub mod nav;
pub mod state;

use std::io::{self, Stdout};
use std::path::PathBuf;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::thread_rng;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::catalog::authoring;
use crate::catalog::{Catalog, Lesson};
use crate::config::Config;
use crate::progress::LearnerProfile;
use crate::progress::engine;
use crate::ui;
use crate::ui::courses::{BrowserItem, item_at_index, lesson_at, visible_items};
use input::{Action, key_to_action};
use nav::{NavContext, Role, Screen};
use state::{AddLessonForm, AppState, GameState, LoginStage};

/// The main application
pub struct App {
    /// Application configuration
    config: Config,

    /// Current application state
    state: AppState,

    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,

    /// Where the catalog snapshot lives
    catalog_path: PathBuf,

    /// Where the profile snapshot lives
    profile_path: PathBuf,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config) -> Result<Self> {
        let catalog_path = Config::catalog_path()?;
        let profile_path = Config::profile_path()?;

        let mut state = AppState {
            catalog: Catalog::load_or_default(&catalog_path),
            profile: LearnerProfile::load_or_default(&profile_path),
            ..Default::default()
        };
        // A returning learner skips straight to role selection.
        if !state.profile.name.is_empty() {
            state.login.stage = LoginStage::Role;
        }

        let terminal = Self::setup_terminal()?;

        Ok(Self { config, state, terminal, catalog_path, profile_path })
    }

    /// Set up the terminal for TUI rendering
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore the terminal to its original state
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Run the application main loop
    pub fn run(&mut self) -> Result<()> {
        // Set up panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(panic_info);
        }));

        loop {
            // Draw UI
            self.terminal.draw(|frame| {
                ui::draw(frame, &mut self.state, &self.config);
            })?;

            // Handle events, one interaction at a time
            if event::poll(std::time::Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        // Ctrl+C always quits, even mid text entry
                        if key.modifiers.contains(KeyModifiers::CONTROL)
                            && key.code == KeyCode::Char('c')
                        {
                            break;
                        }
                        match self.handle_key(key.code) {
                            Ok(true) => break, // Exit requested
                            Ok(false) => {}    // Continue
                            Err(e) => {
                                tracing::error!("Error handling key: {}", e);
                            }
                        }
                    }
                }
            }
        }

        self.restore_terminal()?;
        Ok(())
    }

    /// Facts the navigator needs for gated transitions
    fn nav_ctx(&self) -> NavContext {
        NavContext {
            game_unlocked: self.state.profile.game_unlocked,
            lesson_selected: self.state.lesson.lesson_id.is_some(),
        }
    }

    /// Persist the profile, swallowing failures
    fn persist_profile(&self) {
        if let Err(e) = self.state.profile.save(&self.profile_path) {
            tracing::warn!("Failed to persist profile, keeping in-memory state: {e}");
        }
    }

    /// Persist the catalog, swallowing failures
    fn persist_catalog(&self) {
        if let Err(e) = self.state.catalog.save(&self.catalog_path) {
            tracing::warn!("Failed to persist catalog, keeping in-memory state: {e}");
        }
    }

    /// Handle a key press, returns true if should exit
    fn handle_key(&mut self, key: KeyCode) -> Result<bool> {
        self.state.status.clear();

        match self.state.nav.screen() {
            Screen::Login => self.handle_login(key),
            Screen::Courses => self.handle_courses(key),
            Screen::Lesson => self.handle_lesson(key),
            Screen::Dashboard => self.handle_dashboard(key),
            Screen::Game => self.handle_game(key),
            Screen::ManageCourses => self.handle_manage(key),
            Screen::AddLesson => self.handle_add_lesson(key),
            Screen::Statistics => self.handle_statistics(key),
        }
    }

    fn handle_login(&mut self, key: KeyCode) -> Result<bool> {
        match self.state.login.stage {
            LoginStage::Name => match key {
                KeyCode::Char(c) => self.state.login.input.insert_char(c),
                KeyCode::Backspace => self.state.login.input.delete_char(),
                KeyCode::Left => self.state.login.input.move_left(),
                KeyCode::Right => self.state.login.input.move_right(),
                KeyCode::Enter => {
                    let name = self.state.login.input.take();
                    let name = name.trim();
                    if name.is_empty() {
                        self.state.status.set_error("enter a name to begin");
                    } else {
                        self.state.profile.name = name.to_string();
                        self.persist_profile();
                        self.state.login.stage = LoginStage::Role;
                    }
                }
                _ => {}
            },
            LoginStage::Role => match key {
                KeyCode::Char('j') | KeyCode::Down | KeyCode::Char('k') | KeyCode::Up => {
                    self.state.login.role_cursor = 1 - self.state.login.role_cursor;
                }
                KeyCode::Enter => {
                    if self.state.login.role_cursor == 0 {
                        self.state.nav.login(Role::Student);
                    } else {
                        self.state.login.input.clear();
                        self.state.login.stage = LoginStage::Passphrase;
                    }
                }
                _ => {}
            },
            LoginStage::Passphrase => match key {
                KeyCode::Char(c) => self.state.login.input.insert_char(c),
                KeyCode::Backspace => self.state.login.input.delete_char(),
                KeyCode::Enter => {
                    let attempt = self.state.login.input.take();
                    if self.config.passphrase_matches(&attempt) {
                        self.state.login.stage = LoginStage::Role;
                        self.state.nav.login(Role::Teacher);
                    } else {
                        self.state.status.set_error("incorrect passphrase");
                    }
                }
                KeyCode::Esc => {
                    self.state.login.input.clear();
                    self.state.login.stage = LoginStage::Role;
                }
                _ => {}
            },
        }
        Ok(false)
    }

    fn handle_courses(&mut self, key: KeyCode) -> Result<bool> {
        let Some(action) = key_to_action(key, self.config.vim_mode) else {
            return Ok(false);
        };

        match action {
            Action::Down => {
                let max = visible_items(&self.state.catalog, &self.state.browser.expanded_courses);
                if self.state.browser.selected_index + 1 < max {
                    self.state.browser.selected_index += 1;
                }
                self.state.browser.ensure_selection_visible();
            }
            Action::Up => {
                self.state.browser.selected_index =
                    self.state.browser.selected_index.saturating_sub(1);
                self.state.browser.ensure_selection_visible();
            }
            Action::Top => {
                self.state.browser.selected_index = 0;
                self.state.browser.ensure_selection_visible();
            }
            Action::Bottom => {
                let max = visible_items(&self.state.catalog, &self.state.browser.expanded_courses);
                self.state.browser.selected_index = max.saturating_sub(1);
                self.state.browser.ensure_selection_visible();
            }
            Action::Select => {
                let item = item_at_index(
                    &self.state.catalog,
                    &self.state.browser.expanded_courses,
                    self.state.browser.selected_index,
                );
                match item {
                    Some(BrowserItem::Course(idx)) => {
                        if !self.state.browser.expanded_courses.remove(&idx) {
                            self.state.browser.expanded_courses.insert(idx);
                        }
                    }
                    Some(BrowserItem::Lesson(course_idx, lesson_idx)) => {
                        self.open_lesson(course_idx, lesson_idx);
                    }
                    None => {}
                }
            }
            Action::Dashboard => {
                let ctx = self.nav_ctx();
                let _ = self.state.nav.goto(Screen::Dashboard, ctx);
            }
            Action::Game => self.enter_game(),
            Action::Back => {
                self.state.nav.logout();
                self.state.login.stage = LoginStage::Role;
            }
            Action::Quit => return Ok(true),
            _ => {}
        }
        Ok(false)
    }

    /// Open a lesson from the browser, starting a fresh attempt
    fn open_lesson(&mut self, course_idx: usize, lesson_idx: usize) {
        let Some((_, lesson)) = lesson_at(&self.state.catalog, course_idx, lesson_idx) else {
            return;
        };

        if self.state.profile.has_completed(&lesson.id) {
            self.state.status.set_message("Already completed - nice work!");
            return;
        }

        let id = lesson.id.clone();
        self.state.lesson.open(id);
        let ctx = self.nav_ctx();
        if let Err(e) = self.state.nav.goto(Screen::Lesson, ctx) {
            self.state.status.set_error(e.to_string());
        }
    }

    /// Enter the game screen, surfacing the locked signal when gated
    fn enter_game(&mut self) {
        let ctx = self.nav_ctx();
        match self.state.nav.goto(Screen::Game, ctx) {
            Ok(()) => {
                self.state.game = GameState::default();
                self.state.game.round.challenge(&mut thread_rng());
            }
            Err(e) => self.state.status.set_error(e.to_string()),
        }
    }

    /// Leave the current screen for the course browser
    fn back_to_courses(&mut self) {
        self.state.lesson = state::LessonState::default();
        let ctx = self.nav_ctx();
        let _ = self.state.nav.goto(Screen::Courses, ctx);
    }

    fn handle_lesson(&mut self, key: KeyCode) -> Result<bool> {
        let Some(lesson) = self
            .state
            .lesson
            .lesson_id
            .as_deref()
            .and_then(|id| self.state.catalog.find_lesson(id))
            .map(|(_, lesson)| lesson.clone())
        else {
            // Lesson vanished (e.g. deleted by a teacher in another role
            // session); nothing to grade.
            self.back_to_courses();
            return Ok(false);
        };

        if self.state.lesson.outcome.is_some() {
            return self.handle_lesson_results(key);
        }

        let Some(action) = key_to_action(key, self.config.vim_mode) else {
            return Ok(false);
        };

        let option_count =
            lesson.quiz.get(self.state.lesson.current_question).map_or(0, |q| q.options.len());

        match action {
            Action::Down => {
                if option_count > 0 {
                    self.state.lesson.selected_option =
                        (self.state.lesson.selected_option + 1) % option_count;
                }
            }
            Action::Up => {
                if option_count > 0 {
                    self.state.lesson.selected_option =
                        (self.state.lesson.selected_option + option_count - 1) % option_count;
                }
            }
            Action::Select => {
                let question = self.state.lesson.current_question;
                self.state.lesson.attempt.select(question, self.state.lesson.selected_option);

                if question + 1 < lesson.quiz.len() {
                    self.state.lesson.current_question += 1;
                    self.state.lesson.selected_option = 0;
                } else {
                    self.submit_quiz(&lesson);
                }
            }
            Action::Back => self.back_to_courses(),
            _ => {}
        }
        Ok(false)
    }

    /// Grade the finished attempt and apply the outcome
    fn submit_quiz(&mut self, lesson: &Lesson) {
        match engine::grade_and_apply(&self.state.profile, lesson, &self.state.lesson.attempt) {
            Ok((updated, outcome)) => {
                if updated != self.state.profile {
                    self.state.profile = updated;
                    self.persist_profile();
                }
                self.state.lesson.outcome = Some(outcome);
            }
            Err(e) => {
                self.state.status.set_error(e.to_string());
                self.back_to_courses();
            }
        }
    }

    /// Keys on the graded-results view
    fn handle_lesson_results(&mut self, key: KeyCode) -> Result<bool> {
        let passed = self.state.lesson.outcome.as_ref().is_some_and(|o| o.passed);
        match key {
            KeyCode::Enter => {
                if passed {
                    self.back_to_courses();
                } else {
                    // Retry with a fresh attempt on the same lesson
                    self.state.lesson.retry();
                }
            }
            KeyCode::Esc => self.back_to_courses(),
            _ => {}
        }
        Ok(false)
    }

    fn handle_dashboard(&mut self, key: KeyCode) -> Result<bool> {
        let Some(action) = key_to_action(key, self.config.vim_mode) else {
            return Ok(false);
        };

        match action {
            Action::Reset => {
                self.state.profile.reset();
                self.persist_profile();
                self.state.status.set_message("Progress reset");
            }
            Action::Courses | Action::Back => {
                let ctx = self.nav_ctx();
                let _ = self.state.nav.goto(Screen::Courses, ctx);
            }
            Action::Game => self.enter_game(),
            Action::Quit => return Ok(true),
            _ => {}
        }
        Ok(false)
    }

    fn handle_game(&mut self, key: KeyCode) -> Result<bool> {
        match key {
            KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
                self.state.game.input.insert_char(c);
            }
            KeyCode::Backspace => self.state.game.input.delete_char(),
            KeyCode::Enter => {
                let text = self.state.game.input.take();
                let Ok(answer) = text.trim().parse::<i32>() else {
                    self.state.status.set_error("enter a whole number");
                    return Ok(false);
                };

                let expected =
                    self.state.game.round.current.map(|c| c.expected_answer).unwrap_or_default();
                if let Some(correct) = self.state.game.round.submit(answer) {
                    self.state.game.last_result = Some((correct, expected));
                }
                // Counters persist for the session; the next challenge is
                // generated immediately.
                self.state.game.round.challenge(&mut thread_rng());
            }
            KeyCode::Esc => {
                // Exiting resets the round counters
                self.state.game = GameState::default();
                let ctx = self.nav_ctx();
                let _ = self.state.nav.goto(Screen::Courses, ctx);
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_manage(&mut self, key: KeyCode) -> Result<bool> {
        // Text entry mode for a new course name
        if self.state.teacher.manage.new_course_input.is_some() {
            match key {
                KeyCode::Char(c) => {
                    if let Some(input) = &mut self.state.teacher.manage.new_course_input {
                        input.insert_char(c);
                    }
                }
                KeyCode::Backspace => {
                    if let Some(input) = &mut self.state.teacher.manage.new_course_input {
                        input.delete_char();
                    }
                }
                KeyCode::Enter => {
                    let name = self
                        .state
                        .teacher
                        .manage
                        .new_course_input
                        .take()
                        .map(|mut i| i.take())
                        .unwrap_or_default();
                    match authoring::create_course(&mut self.state.catalog, &name) {
                        Ok(()) => {
                            self.persist_catalog();
                            self.state.status.set_message(format!("Course \"{}\" created", name.trim()));
                        }
                        Err(e) => self.state.status.set_error(e.to_string()),
                    }
                }
                KeyCode::Esc => {
                    self.state.teacher.manage.new_course_input = None;
                }
                _ => {}
            }
            return Ok(false);
        }

        let Some(action) = key_to_action(key, self.config.vim_mode) else {
            return Ok(false);
        };

        match action {
            Action::Down => {
                let max =
                    visible_items(&self.state.catalog, &self.state.teacher.manage.expanded_courses);
                if self.state.teacher.manage.selected_index + 1 < max {
                    self.state.teacher.manage.selected_index += 1;
                }
            }
            Action::Up => {
                self.state.teacher.manage.selected_index =
                    self.state.teacher.manage.selected_index.saturating_sub(1);
            }
            Action::Select => {
                let item = item_at_index(
                    &self.state.catalog,
                    &self.state.teacher.manage.expanded_courses,
                    self.state.teacher.manage.selected_index,
                );
                if let Some(BrowserItem::Course(idx)) = item {
                    if !self.state.teacher.manage.expanded_courses.remove(&idx) {
                        self.state.teacher.manage.expanded_courses.insert(idx);
                    }
                }
            }
            Action::NewCourse => {
                self.state.teacher.manage.new_course_input = Some(Default::default());
            }
            Action::AddLesson => self.start_add_lesson(),
            Action::DeleteLesson => self.delete_selected_lesson(),
            Action::Statistics => {
                let ctx = self.nav_ctx();
                let _ = self.state.nav.goto(Screen::Statistics, ctx);
            }
            Action::Back => {
                self.state.nav.logout();
                self.state.login.stage = LoginStage::Role;
            }
            Action::Quit => return Ok(true),
            _ => {}
        }
        Ok(false)
    }

    /// Open the add-lesson wizard for the selected course
    fn start_add_lesson(&mut self) {
        let item = item_at_index(
            &self.state.catalog,
            &self.state.teacher.manage.expanded_courses,
            self.state.teacher.manage.selected_index,
        );
        let course_idx = match item {
            Some(BrowserItem::Course(idx)) | Some(BrowserItem::Lesson(idx, _)) => idx,
            None => {
                self.state.status.set_error("select a course first");
                return;
            }
        };
        let Some((name, _)) = self.state.catalog.courses.iter().nth(course_idx) else {
            return;
        };

        self.state.teacher.form = Some(AddLessonForm::new(name.clone()));
        let ctx = self.nav_ctx();
        let _ = self.state.nav.goto(Screen::AddLesson, ctx);
    }

    /// Delete the lesson under the cursor
    fn delete_selected_lesson(&mut self) {
        let item = item_at_index(
            &self.state.catalog,
            &self.state.teacher.manage.expanded_courses,
            self.state.teacher.manage.selected_index,
        );
        let Some(BrowserItem::Lesson(course_idx, lesson_idx)) = item else {
            self.state.status.set_error("select a lesson to delete");
            return;
        };
        let Some((course_name, lesson)) = lesson_at(&self.state.catalog, course_idx, lesson_idx)
        else {
            return;
        };
        let course_name = course_name.to_string();
        let lesson_id = lesson.id.clone();

        match authoring::delete_lesson(&mut self.state.catalog, &course_name, &lesson_id) {
            Ok(()) => {
                self.persist_catalog();
                self.state.status.set_message(format!("Deleted lesson \"{lesson_id}\""));
                let max =
                    visible_items(&self.state.catalog, &self.state.teacher.manage.expanded_courses);
                if self.state.teacher.manage.selected_index >= max {
                    self.state.teacher.manage.selected_index = max.saturating_sub(1);
                }
            }
            Err(e) => self.state.status.set_error(e.to_string()),
        }
    }

    fn handle_add_lesson(&mut self, key: KeyCode) -> Result<bool> {
        let Some(form) = &mut self.state.teacher.form else {
            let ctx = self.nav_ctx();
            let _ = self.state.nav.goto(Screen::ManageCourses, ctx);
            return Ok(false);
        };

        if form.wants_text() {
            match key {
                KeyCode::Char(c) => form.input.insert_char(c),
                KeyCode::Backspace => form.input.delete_char(),
                KeyCode::Left => form.input.move_left(),
                KeyCode::Right => form.input.move_right(),
                KeyCode::Enter => {
                    if let Err(msg) = form.commit_input() {
                        self.state.status.set_error(msg);
                    }
                }
                KeyCode::Esc => self.discard_form(),
                _ => {}
            }
            return Ok(false);
        }

        // Review stage
        match key {
            KeyCode::Enter => self.save_form(),
            KeyCode::Char('a') => form.start_next_question(),
            KeyCode::Esc => self.discard_form(),
            _ => {}
        }
        Ok(false)
    }

    /// Persist the completed form as a new lesson
    fn save_form(&mut self) {
        let Some(form) = self.state.teacher.form.take() else {
            return;
        };

        match authoring::add_lesson(
            &mut self.state.catalog,
            &form.course,
            &form.title,
            &form.content,
            form.questions.clone(),
        ) {
            Ok(id) => {
                self.persist_catalog();
                self.state.status.set_message(format!("Lesson \"{id}\" added"));
                let ctx = self.nav_ctx();
                let _ = self.state.nav.goto(Screen::ManageCourses, ctx);
            }
            Err(e) => {
                // Rejected whole: put the form back so nothing is lost
                self.state.status.set_error(e.to_string());
                self.state.teacher.form = Some(form);
            }
        }
    }

    /// Abandon the wizard without touching the catalog
    fn discard_form(&mut self) {
        self.state.teacher.form = None;
        let ctx = self.nav_ctx();
        let _ = self.state.nav.goto(Screen::ManageCourses, ctx);
    }

    fn handle_statistics(&mut self, key: KeyCode) -> Result<bool> {
        let Some(action) = key_to_action(key, self.config.vim_mode) else {
            return Ok(false);
        };

        match action {
            Action::Back => {
                let ctx = self.nav_ctx();
                let _ = self.state.nav.goto(Screen::ManageCourses, ctx);
            }
            Action::Quit => return Ok(true),
            _ => {}
        }
        Ok(false)
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}
