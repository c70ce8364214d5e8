//! Event handling utilities

use crossterm::event::KeyCode;

/// Map a key to an action
///
/// Arrow keys always navigate; the vim-style letters (j/k/h/l/g/G) only
/// when vim mode is enabled in the config.
pub fn key_to_action(key: KeyCode, vim_mode: bool) -> Option<Action> {
    if vim_mode {
        match key {
            KeyCode::Char('j') => return Some(Action::Down),
            KeyCode::Char('k') => return Some(Action::Up),
            KeyCode::Char('h') => return Some(Action::Left),
            KeyCode::Char('l') => return Some(Action::Right),
            KeyCode::Char('g') => return Some(Action::Top),
            KeyCode::Char('G') => return Some(Action::Bottom),
            _ => {}
        }
    }

    match key {
        KeyCode::Down => Some(Action::Down),
        KeyCode::Up => Some(Action::Up),
        KeyCode::Left => Some(Action::Left),
        KeyCode::Right => Some(Action::Right),
        KeyCode::Home => Some(Action::Top),
        KeyCode::End => Some(Action::Bottom),
        KeyCode::Enter => Some(Action::Select),
        KeyCode::Esc => Some(Action::Back),
        // Screen switches, mirroring the three navigation tabs
        KeyCode::Char('1') => Some(Action::Courses),
        KeyCode::Char('2') => Some(Action::Dashboard),
        KeyCode::Char('3') => Some(Action::Game),
        // Teacher surface
        KeyCode::Char('n') => Some(Action::NewCourse),
        KeyCode::Char('a') => Some(Action::AddLesson),
        KeyCode::Char('d') => Some(Action::DeleteLesson),
        KeyCode::Char('t') => Some(Action::Statistics),
        // Profile reset (dashboard only)
        KeyCode::Char('r') => Some(Action::Reset),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

/// Actions that can be taken in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    Up,
    Down,
    Left,
    Right,
    Top,
    Bottom,

    // Selection
    Select,
    Back,

    // Screen switches
    Courses,
    Dashboard,
    Game,
    Statistics,

    // Teacher operations
    NewCourse,
    AddLesson,
    DeleteLesson,

    // Profile
    Reset,

    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vim_j_maps_to_down() {
        assert_eq!(key_to_action(KeyCode::Char('j'), true), Some(Action::Down));
    }

    #[test]
    fn vim_letters_ignored_without_vim_mode() {
        assert_eq!(key_to_action(KeyCode::Char('j'), false), None);
        assert_eq!(key_to_action(KeyCode::Char('k'), false), None);
    }

    #[test]
    fn arrows_work_in_both_modes() {
        assert_eq!(key_to_action(KeyCode::Down, true), Some(Action::Down));
        assert_eq!(key_to_action(KeyCode::Down, false), Some(Action::Down));
    }

    #[test]
    fn digits_switch_screens() {
        assert_eq!(key_to_action(KeyCode::Char('1'), true), Some(Action::Courses));
        assert_eq!(key_to_action(KeyCode::Char('2'), true), Some(Action::Dashboard));
        assert_eq!(key_to_action(KeyCode::Char('3'), true), Some(Action::Game));
    }

    #[test]
    fn teacher_keys_map_to_operations() {
        assert_eq!(key_to_action(KeyCode::Char('n'), true), Some(Action::NewCourse));
        assert_eq!(key_to_action(KeyCode::Char('a'), true), Some(Action::AddLesson));
        assert_eq!(key_to_action(KeyCode::Char('d'), true), Some(Action::DeleteLesson));
        assert_eq!(key_to_action(KeyCode::Char('t'), true), Some(Action::Statistics));
    }

    #[test]
    fn unknown_key_returns_none() {
        assert_eq!(key_to_action(KeyCode::Char('x'), true), None);
    }
}
