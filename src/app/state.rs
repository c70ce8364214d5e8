//! Application state definitions

use std::collections::HashSet;

use crate::catalog::Catalog;
use crate::catalog::authoring::{OPTIONS_PER_QUESTION, QuestionDraft};
use crate::game::GameRound;
use crate::progress::LearnerProfile;
use crate::progress::engine::{GradeOutcome, QuizAttempt};

use super::nav::Navigator;

/// A single-line text input buffer
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Current contents
    pub value: String,
    /// Cursor position in characters
    pub cursor: usize,
}

impl InputState {
    /// Convert character index to byte index
    fn char_to_byte_index(&self, char_idx: usize) -> usize {
        self.value.char_indices().nth(char_idx).map(|(i, _)| i).unwrap_or(self.value.len())
    }

    /// Get the number of characters in the buffer
    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    /// Insert a character at cursor
    pub fn insert_char(&mut self, c: char) {
        let byte_idx = self.char_to_byte_index(self.cursor);
        self.value.insert(byte_idx, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_idx = self.char_to_byte_index(self.cursor);
            self.value.remove(byte_idx);
        }
    }

    /// Move cursor left
    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Move cursor right
    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    /// Take the contents, leaving an empty buffer
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.value)
    }

    /// Clear the buffer
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

/// Bottom status line: one message at a time
#[derive(Debug, Clone, Default)]
pub struct StatusState {
    /// Message to display
    pub message: Option<String>,
    /// Whether the message is an error
    pub is_error: bool,
}

impl StatusState {
    /// Set a status message
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = false;
    }

    /// Set an error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = true;
    }

    /// Clear the message
    pub fn clear(&mut self) {
        self.message = None;
        self.is_error = false;
    }
}

/// Login flow stages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoginStage {
    /// First run: asking for the learner's name
    #[default]
    Name,
    /// Choosing between student and teacher
    Role,
    /// Teacher role needs the passphrase
    Passphrase,
}

/// State for the login screen
#[derive(Debug, Clone, Default)]
pub struct LoginState {
    pub stage: LoginStage,
    pub input: InputState,
    /// 0 = student, 1 = teacher
    pub role_cursor: usize,
}

/// State for the course/lesson browser tree
#[derive(Debug, Clone, Default)]
pub struct BrowserState {
    /// Currently selected item index (flat index in tree)
    pub selected_index: usize,
    /// Which course indices are expanded
    pub expanded_courses: HashSet<usize>,
    /// Scroll offset for long catalogs
    pub scroll_offset: usize,
    /// Visible height in items (updated on render)
    pub visible_height: usize,
}

impl BrowserState {
    /// Ensure the selected item is visible by adjusting scroll offset
    pub fn ensure_selection_visible(&mut self) {
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        }
        let visible = self.visible_height.saturating_sub(2);
        if visible > 0 && self.selected_index >= self.scroll_offset + visible {
            self.scroll_offset = self.selected_index.saturating_sub(visible) + 1;
        }
    }
}

/// State for the lesson screen: the attempt in progress and, after
/// submission, the graded outcome
#[derive(Debug, Clone, Default)]
pub struct LessonState {
    /// Id of the lesson being viewed
    pub lesson_id: Option<String>,
    /// Selections made so far
    pub attempt: QuizAttempt,
    /// Question the cursor is on
    pub current_question: usize,
    /// Highlighted option for the current question
    pub selected_option: usize,
    /// Set once the attempt has been submitted and graded
    pub outcome: Option<GradeOutcome>,
}

impl LessonState {
    /// Begin a fresh attempt at a lesson
    pub fn open(&mut self, lesson_id: impl Into<String>) {
        let lesson_id = lesson_id.into();
        self.attempt = QuizAttempt::new(lesson_id.clone());
        self.lesson_id = Some(lesson_id);
        self.current_question = 0;
        self.selected_option = 0;
        self.outcome = None;
    }

    /// Throw away the graded outcome and start over on the same lesson
    pub fn retry(&mut self) {
        if let Some(id) = self.lesson_id.clone() {
            self.open(id);
        }
    }
}

/// State for the game screen
#[derive(Debug, Clone, Default)]
pub struct GameState {
    pub round: GameRound,
    /// Answer entry buffer
    pub input: InputState,
    /// Result of the last submitted answer, with the answer that was right
    pub last_result: Option<(bool, i32)>,
}

/// State for the teacher's manage-courses screen
#[derive(Debug, Clone, Default)]
pub struct ManageState {
    /// Currently selected item index (flat index in tree)
    pub selected_index: usize,
    /// Which course indices are expanded
    pub expanded_courses: HashSet<usize>,
    /// When set, the teacher is typing a new course name
    pub new_course_input: Option<InputState>,
}

/// Which field the add-lesson wizard is collecting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStage {
    Title,
    Content,
    Prompt,
    Option(usize),
    CorrectIndex,
    /// All fields gathered; waiting for save / another question / cancel
    Confirm,
}

/// The add-lesson wizard: fields are collected one at a time
#[derive(Debug, Clone)]
pub struct AddLessonForm {
    /// Course the lesson will be added to
    pub course: String,
    pub title: String,
    pub content: String,
    /// Completed questions
    pub questions: Vec<QuestionDraft>,
    /// Question currently being assembled
    pub draft: QuestionDraft,
    pub stage: FormStage,
    pub input: InputState,
}

impl AddLessonForm {
    /// Start a form for a course
    pub fn new(course: impl Into<String>) -> Self {
        Self {
            course: course.into(),
            title: String::new(),
            content: String::new(),
            questions: Vec::new(),
            draft: QuestionDraft::default(),
            stage: FormStage::Title,
            input: InputState::default(),
        }
    }

    /// Label for the field being collected
    pub fn field_label(&self) -> String {
        match self.stage {
            FormStage::Title => "Lesson title".into(),
            FormStage::Content => "Lesson content".into(),
            FormStage::Prompt => format!("Question {} prompt", self.questions.len() + 1),
            FormStage::Option(i) => {
                format!("Question {} option {}", self.questions.len() + 1, i + 1)
            }
            FormStage::CorrectIndex => {
                format!("Correct option number (1-{OPTIONS_PER_QUESTION})")
            }
            FormStage::Confirm => "Review".into(),
        }
    }

    /// Commit the input buffer to the current field and advance
    ///
    /// Returns an error message (and stays on the field) when the input is
    /// unusable; full validation happens in authoring when the form is saved.
    pub fn commit_input(&mut self) -> Result<(), String> {
        let value = self.input.value.trim().to_string();
        if value.is_empty() {
            return Err("this field cannot be empty".into());
        }

        match self.stage {
            FormStage::Title => {
                self.title = value;
                self.stage = FormStage::Content;
            }
            FormStage::Content => {
                self.content = value;
                self.stage = FormStage::Prompt;
            }
            FormStage::Prompt => {
                self.draft.prompt = value;
                self.stage = FormStage::Option(0);
            }
            FormStage::Option(i) => {
                self.draft.options.push(value);
                self.stage = if i + 1 < OPTIONS_PER_QUESTION {
                    FormStage::Option(i + 1)
                } else {
                    FormStage::CorrectIndex
                };
            }
            FormStage::CorrectIndex => {
                let n: usize = value
                    .parse()
                    .map_err(|_| format!("enter a number between 1 and {OPTIONS_PER_QUESTION}"))?;
                if n < 1 || n > OPTIONS_PER_QUESTION {
                    return Err(format!("enter a number between 1 and {OPTIONS_PER_QUESTION}"));
                }
                self.draft.correct_index = n - 1;
                self.questions.push(std::mem::take(&mut self.draft));
                self.stage = FormStage::Confirm;
            }
            FormStage::Confirm => {}
        }

        self.input.clear();
        Ok(())
    }

    /// From the review stage, begin collecting another question
    pub fn start_next_question(&mut self) {
        if self.stage == FormStage::Confirm {
            self.stage = FormStage::Prompt;
        }
    }

    /// Whether the form is in a text-entry stage
    pub fn wants_text(&self) -> bool {
        self.stage != FormStage::Confirm
    }
}

/// Which teacher sub-screen state is live
#[derive(Debug, Clone, Default)]
pub struct TeacherState {
    pub manage: ManageState,
    /// Present while the add-lesson wizard is open
    pub form: Option<AddLessonForm>,
}

/// Full application state
#[derive(Debug, Default)]
pub struct AppState {
    /// Screen and role state machine
    pub nav: Navigator,

    /// The course catalog
    pub catalog: Catalog,

    /// The learner's progress
    pub profile: LearnerProfile,

    /// Login screen state
    pub login: LoginState,

    /// Course browser state
    pub browser: BrowserState,

    /// Lesson/quiz state
    pub lesson: LessonState,

    /// Game screen state
    pub game: GameState,

    /// Teacher screens state
    pub teacher: TeacherState,

    /// Bottom status line
    pub status: StatusState,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn input_handles_multibyte_characters() {
        let mut input = InputState::default();
        for c in "héllo".chars() {
            input.insert_char(c);
        }
        assert_eq!(input.value, "héllo");

        input.move_left();
        input.move_left();
        input.delete_char();
        assert_eq!(input.value, "hélo");
    }

    #[test]
    fn input_take_resets_cursor() {
        let mut input = InputState::default();
        input.insert_char('h');
        input.insert_char('i');

        assert_eq!(input.take(), "hi");
        assert_eq!(input.cursor, 0);
        assert!(input.value.is_empty());
    }

    #[test]
    fn lesson_open_resets_the_attempt() {
        let mut lesson = LessonState::default();
        lesson.open("math_1");
        lesson.attempt.select(0, 2);
        lesson.current_question = 1;

        lesson.open("math_2");

        assert_eq!(lesson.lesson_id.as_deref(), Some("math_2"));
        assert_eq!(lesson.attempt.answered(), 0);
        assert_eq!(lesson.current_question, 0);
        assert!(lesson.outcome.is_none());
    }

    #[test]
    fn lesson_retry_keeps_the_lesson() {
        let mut lesson = LessonState::default();
        lesson.open("math_1");
        lesson.attempt.select(0, 2);

        lesson.retry();

        assert_eq!(lesson.lesson_id.as_deref(), Some("math_1"));
        assert_eq!(lesson.attempt.answered(), 0);
    }

    #[test]
    fn browser_scrolls_selection_into_view() {
        let mut browser = BrowserState { visible_height: 6, ..Default::default() };

        browser.selected_index = 10;
        browser.ensure_selection_visible();
        assert!(browser.scroll_offset > 0);

        browser.selected_index = 0;
        browser.ensure_selection_visible();
        assert_eq!(browser.scroll_offset, 0);
    }

    #[test]
    fn form_walks_through_every_field() {
        let mut form = AddLessonForm::new("History");

        for text in ["Rome", "The Roman Empire"] {
            form.input.value = text.into();
            form.commit_input().unwrap();
        }
        assert_eq!(form.stage, FormStage::Prompt);

        form.input.value = "Who founded Rome?".into();
        form.commit_input().unwrap();
        for opt in ["Romulus", "Caesar", "Nero", "Hannibal"] {
            form.input.value = opt.into();
            form.commit_input().unwrap();
        }
        assert_eq!(form.stage, FormStage::CorrectIndex);

        form.input.value = "1".into();
        form.commit_input().unwrap();

        assert_eq!(form.stage, FormStage::Confirm);
        assert_eq!(form.title, "Rome");
        assert_eq!(form.questions.len(), 1);
        assert_eq!(form.questions[0].correct_index, 0);
        assert_eq!(form.questions[0].options.len(), 4);
    }

    #[test]
    fn form_rejects_empty_fields_and_bad_numbers() {
        let mut form = AddLessonForm::new("History");

        form.input.value = "   ".into();
        assert!(form.commit_input().is_err());
        assert_eq!(form.stage, FormStage::Title);

        form.input.value = "Rome".into();
        form.commit_input().unwrap();
        form.input.value = "Body".into();
        form.commit_input().unwrap();
        form.input.value = "Prompt?".into();
        form.commit_input().unwrap();
        for opt in ["a", "b", "c", "d"] {
            form.input.value = opt.into();
            form.commit_input().unwrap();
        }

        form.input.value = "5".into();
        assert!(form.commit_input().is_err());
        assert_eq!(form.stage, FormStage::CorrectIndex);

        form.input.value = "two".into();
        assert!(form.commit_input().is_err());

        form.input.value = "2".into();
        form.commit_input().unwrap();
        assert_eq!(form.questions[0].correct_index, 1);
    }

    #[test]
    fn form_collects_multiple_questions() {
        let mut form = AddLessonForm::new("History");
        let fill = ["Rome", "Body", "Q1?", "a", "b", "c", "d", "1"];
        for text in fill {
            form.input.value = text.into();
            form.commit_input().unwrap();
        }

        form.start_next_question();
        assert_eq!(form.stage, FormStage::Prompt);

        for text in ["Q2?", "a", "b", "c", "d", "4"] {
            form.input.value = text.into();
            form.commit_input().unwrap();
        }

        assert_eq!(form.questions.len(), 2);
        assert_eq!(form.questions[1].correct_index, 3);
    }
}
