//! Screen navigation and gating
//!
//! A small state machine over the application's screens. Gated transitions
//! (game lock, teacher role, lesson selection) are rejected without moving,
//! so the caller can surface the refusal while the current screen stays up.

use thiserror::Error;

use crate::progress::engine::GAME_UNLOCK_COMPLETIONS;

/// Which screen is currently displayed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Login,
    Courses,
    Lesson,
    Dashboard,
    Game,
    ManageCourses,
    AddLesson,
    Statistics,
}

impl Screen {
    /// Whether this screen belongs to the teacher surface
    pub fn is_teacher(self) -> bool {
        matches!(self, Screen::ManageCourses | Screen::AddLesson | Screen::Statistics)
    }
}

/// Session role, chosen once at login
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Student,
    Teacher,
}

/// Why a transition was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NavError {
    #[error("complete {GAME_UNLOCK_COMPLETIONS} lessons to unlock the game")]
    GameLocked,
    #[error("log in first")]
    NotLoggedIn,
    #[error("teacher access required")]
    TeacherOnly,
    #[error("select a lesson first")]
    NoLessonSelected,
}

/// Facts the navigator needs to admit a transition
#[derive(Debug, Clone, Copy, Default)]
pub struct NavContext {
    pub game_unlocked: bool,
    pub lesson_selected: bool,
}

/// The session's screen/role state machine
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    screen: Screen,
    role: Option<Role>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The active screen
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// The session role, if logged in
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// Complete login with a role; lands on that role's home screen
    pub fn login(&mut self, role: Role) {
        self.role = Some(role);
        self.screen = match role {
            Role::Student => Screen::Courses,
            Role::Teacher => Screen::ManageCourses,
        };
    }

    /// Clear the role and return to the login screen
    ///
    /// Only the session is cleared; the persisted profile and catalog are
    /// untouched.
    pub fn logout(&mut self) {
        self.role = None;
        self.screen = Screen::Login;
    }

    /// Attempt a transition; on refusal the current screen is unchanged
    pub fn goto(&mut self, target: Screen, ctx: NavContext) -> Result<(), NavError> {
        if target == Screen::Login {
            // Login is only reachable through logout.
            self.logout();
            return Ok(());
        }

        let role = self.role.ok_or(NavError::NotLoggedIn)?;

        if target.is_teacher() && role != Role::Teacher {
            return Err(NavError::TeacherOnly);
        }
        if target == Screen::Game && !ctx.game_unlocked {
            return Err(NavError::GameLocked);
        }
        if target == Screen::Lesson && !ctx.lesson_selected {
            return Err(NavError::NoLessonSelected);
        }

        self.screen = target;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unlocked() -> NavContext {
        NavContext { game_unlocked: true, lesson_selected: true }
    }

    #[test]
    fn starts_logged_out() {
        let nav = Navigator::new();
        assert_eq!(nav.screen(), Screen::Login);
        assert_eq!(nav.role(), None);
    }

    #[test]
    fn nothing_is_reachable_before_login() {
        let mut nav = Navigator::new();
        for target in [Screen::Courses, Screen::Dashboard, Screen::Game, Screen::ManageCourses] {
            assert_eq!(nav.goto(target, unlocked()), Err(NavError::NotLoggedIn));
            assert_eq!(nav.screen(), Screen::Login);
        }
    }

    #[test]
    fn student_login_lands_on_courses() {
        let mut nav = Navigator::new();
        nav.login(Role::Student);
        assert_eq!(nav.screen(), Screen::Courses);
        assert_eq!(nav.role(), Some(Role::Student));
    }

    #[test]
    fn teacher_login_lands_on_manage_courses() {
        let mut nav = Navigator::new();
        nav.login(Role::Teacher);
        assert_eq!(nav.screen(), Screen::ManageCourses);
    }

    #[test]
    fn locked_game_is_rejected_in_place() {
        let mut nav = Navigator::new();
        nav.login(Role::Student);

        let ctx = NavContext { game_unlocked: false, lesson_selected: false };
        assert_eq!(nav.goto(Screen::Game, ctx), Err(NavError::GameLocked));
        assert_eq!(nav.screen(), Screen::Courses);
    }

    #[test]
    fn unlocked_game_is_reachable() {
        let mut nav = Navigator::new();
        nav.login(Role::Student);
        nav.goto(Screen::Game, unlocked()).unwrap();
        assert_eq!(nav.screen(), Screen::Game);
    }

    #[test]
    fn lesson_needs_a_selection() {
        let mut nav = Navigator::new();
        nav.login(Role::Student);

        let ctx = NavContext { game_unlocked: false, lesson_selected: false };
        assert_eq!(nav.goto(Screen::Lesson, ctx), Err(NavError::NoLessonSelected));

        let ctx = NavContext { game_unlocked: false, lesson_selected: true };
        nav.goto(Screen::Lesson, ctx).unwrap();
        assert_eq!(nav.screen(), Screen::Lesson);
    }

    #[test]
    fn teacher_screens_are_role_gated() {
        let mut nav = Navigator::new();
        nav.login(Role::Student);

        for target in [Screen::ManageCourses, Screen::AddLesson, Screen::Statistics] {
            assert_eq!(nav.goto(target, unlocked()), Err(NavError::TeacherOnly));
        }
        assert_eq!(nav.screen(), Screen::Courses);
    }

    #[test]
    fn teacher_reaches_statistics() {
        let mut nav = Navigator::new();
        nav.login(Role::Teacher);
        nav.goto(Screen::Statistics, NavContext::default()).unwrap();
        assert_eq!(nav.screen(), Screen::Statistics);
    }

    #[test]
    fn logout_clears_the_role() {
        let mut nav = Navigator::new();
        nav.login(Role::Teacher);
        nav.logout();

        assert_eq!(nav.screen(), Screen::Login);
        assert_eq!(nav.role(), None);
        assert_eq!(nav.goto(Screen::Courses, unlocked()), Err(NavError::NotLoggedIn));
    }

    #[test]
    fn role_persists_across_transitions() {
        let mut nav = Navigator::new();
        nav.login(Role::Student);
        nav.goto(Screen::Dashboard, NavContext::default()).unwrap();
        nav.goto(Screen::Courses, NavContext::default()).unwrap();
        assert_eq!(nav.role(), Some(Role::Student));
    }
}
