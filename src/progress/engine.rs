//! Grading and the completion cascade
//!
//! [`grade_and_apply`] is the one place learner progress advances: it grades
//! a quiz attempt against a lesson and, on a first-time pass, applies the
//! completion cascade (points, streak, game unlock, achievements) to a new
//! profile value. It performs no I/O and never mutates its inputs, so
//! callers can diff old against new and decide what to persist.

use std::collections::HashMap;

use crate::catalog::Lesson;
use crate::error::{Error, Result};
use crate::progress::LearnerProfile;

/// Minimum score (percent) to pass a quiz
pub const PASS_THRESHOLD: u8 = 70;

/// Points awarded per newly completed lesson
pub const POINTS_PER_LESSON: u32 = 10;

/// Completions needed to unlock the mini-game
pub const GAME_UNLOCK_COMPLETIONS: usize = 3;

/// Badge names and their thresholds
pub const ACHIEVEMENT_FIRST_LESSON: &str = "First Lesson";
pub const ACHIEVEMENT_FIVE_LESSONS: &str = "5 Lessons";
pub const ACHIEVEMENT_FIFTY_POINTS: &str = "50 Points";
const FIVE_LESSONS_AT: usize = 5;
const FIFTY_POINTS_AT: u32 = 50;

/// One quiz attempt in progress; never persisted
#[derive(Debug, Clone, Default)]
pub struct QuizAttempt {
    /// Lesson being attempted
    pub lesson_id: String,
    /// Question index -> selected option index
    pub selected: HashMap<usize, usize>,
}

impl QuizAttempt {
    /// Start a fresh attempt for a lesson
    pub fn new(lesson_id: impl Into<String>) -> Self {
        Self { lesson_id: lesson_id.into(), selected: HashMap::new() }
    }

    /// Record the learner's selection for a question
    pub fn select(&mut self, question_index: usize, option_index: usize) {
        self.selected.insert(question_index, option_index);
    }

    /// Number of questions answered so far
    pub fn answered(&self) -> usize {
        self.selected.len()
    }
}

/// What grading produced, for the UI to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeOutcome {
    /// Whether the attempt met the pass threshold
    pub passed: bool,
    /// Score as an integer percentage (0-100)
    pub score_percent: u8,
    /// Correctness per question, in quiz order
    pub per_question: Vec<bool>,
    /// The lesson was already complete; nothing was awarded
    pub already_completed: bool,
    /// This pass flipped the game unlock
    pub newly_unlocked_game: bool,
    /// Badges unlocked by this pass, in unlock order
    pub new_achievements: Vec<String>,
}

/// Grade an attempt and, on a first-time pass, apply the completion cascade
///
/// A failing attempt and a re-pass of a completed lesson both return the
/// input profile unchanged (cloned). Selections that are missing or out of
/// range count as incorrect, not as errors. The only error is a lesson with
/// an empty quiz, which is invalid configuration.
pub fn grade_and_apply(
    profile: &LearnerProfile,
    lesson: &Lesson,
    attempt: &QuizAttempt,
) -> Result<(LearnerProfile, GradeOutcome)> {
    if lesson.quiz.is_empty() {
        return Err(Error::Configuration(format!("lesson \"{}\" has no questions", lesson.id)));
    }

    let per_question: Vec<bool> = lesson
        .quiz
        .iter()
        .enumerate()
        .map(|(i, question)| attempt.selected.get(&i) == Some(&question.correct_index))
        .collect();
    let correct_count = per_question.iter().filter(|&&c| c).count();
    let score_percent = (100 * correct_count / lesson.quiz.len()) as u8;
    let passed = score_percent >= PASS_THRESHOLD;

    if !passed {
        let outcome = GradeOutcome {
            passed: false,
            score_percent,
            per_question,
            already_completed: false,
            newly_unlocked_game: false,
            new_achievements: Vec::new(),
        };
        return Ok((profile.clone(), outcome));
    }

    if profile.has_completed(&lesson.id) {
        // Re-passing must not double-award points, streak, or badges.
        let outcome = GradeOutcome {
            passed: true,
            score_percent,
            per_question,
            already_completed: true,
            newly_unlocked_game: false,
            new_achievements: Vec::new(),
        };
        return Ok((profile.clone(), outcome));
    }

    let mut updated = profile.clone();
    updated.completed_lesson_ids.insert(lesson.id.clone());
    updated.points += POINTS_PER_LESSON;
    updated.current_streak += 1;

    let newly_unlocked_game =
        !updated.game_unlocked && updated.completed_lesson_ids.len() >= GAME_UNLOCK_COMPLETIONS;
    if newly_unlocked_game {
        updated.game_unlocked = true;
    }

    // Each check is independent and keyed off the post-update state; a badge
    // is appended only the first time its threshold is crossed.
    let mut new_achievements = Vec::new();
    let mut unlock = |name: &str, reached: bool, profile: &mut LearnerProfile| {
        if reached && !profile.has_achievement(name) {
            profile.achievements.push(name.to_string());
            new_achievements.push(name.to_string());
        }
    };
    unlock(ACHIEVEMENT_FIRST_LESSON, updated.completed_lesson_ids.len() == 1, &mut updated);
    unlock(
        ACHIEVEMENT_FIVE_LESSONS,
        updated.completed_lesson_ids.len() == FIVE_LESSONS_AT,
        &mut updated,
    );
    unlock(ACHIEVEMENT_FIFTY_POINTS, updated.points >= FIFTY_POINTS_AT, &mut updated);

    let outcome = GradeOutcome {
        passed: true,
        score_percent,
        per_question,
        already_completed: false,
        newly_unlocked_game,
        new_achievements,
    };
    Ok((updated, outcome))
}
