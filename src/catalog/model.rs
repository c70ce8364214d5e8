//! Content model for the course catalog
//!
//! Defines the typed records for courses, lessons, and quiz questions.
//! The catalog is a name-keyed mapping of courses, each holding an ordered
//! sequence of lessons; lesson ids are globally unique across the catalog.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Allowed range for the number of options on a question
pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 4;

/// A multiple-choice question
///
/// Option order is significant: it is the display and selection order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Question text shown to the learner
    pub prompt: String,
    /// Answer options in display order (2-4 entries)
    pub options: Vec<String>,
    /// Index into `options` of the correct answer
    pub correct_index: usize,
}

impl Question {
    /// Create a question, validating the option count and correct index
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
    ) -> Result<Self> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(Error::Validation("question prompt is empty".into()));
        }
        if options.len() < MIN_OPTIONS || options.len() > MAX_OPTIONS {
            return Err(Error::Validation(format!(
                "question needs {MIN_OPTIONS}-{MAX_OPTIONS} options, got {}",
                options.len()
            )));
        }
        if correct_index >= options.len() {
            return Err(Error::Validation(format!(
                "correct option index {correct_index} is out of range for {} options",
                options.len()
            )));
        }
        Ok(Self { prompt, options, correct_index })
    }
}

/// A content unit with a title, explanatory text, and a quiz
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    /// Globally unique identifier (e.g. "math_1")
    pub id: String,
    /// Display title
    pub title: String,
    /// Explanatory body text
    pub content: String,
    /// Quiz questions in order
    pub quiz: Vec<Question>,
}

impl Lesson {
    /// Create a new lesson
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        quiz: Vec<Question>,
    ) -> Self {
        Self { id: id.into(), title: title.into(), content: content.into(), quiz }
    }
}

/// A named course: an ordered sequence of lessons
///
/// The course name lives in the catalog map key, not here, so the
/// serialized form is exactly `name -> { lessons: [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Lessons in display order
    pub lessons: Vec<Lesson>,
}

impl Course {
    /// Find a lesson by id
    pub fn lesson(&self, lesson_id: &str) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.id == lesson_id)
    }
}

/// The full course catalog, keyed by unique course name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Document format version
    #[serde(default)]
    pub version: u32,
    /// Course name -> course, iterated in name order
    pub courses: BTreeMap<String, Course>,
}

impl Catalog {
    /// Get a course by name
    pub fn course(&self, name: &str) -> Option<&Course> {
        self.courses.get(name)
    }

    /// Find a lesson anywhere in the catalog, with its course name
    pub fn find_lesson(&self, lesson_id: &str) -> Option<(&str, &Lesson)> {
        for (name, course) in &self.courses {
            if let Some(lesson) = course.lesson(lesson_id) {
                return Some((name.as_str(), lesson));
            }
        }
        None
    }

    /// Total lesson count across all courses
    pub fn total_lessons(&self) -> usize {
        self.courses.values().map(|c| c.lessons.len()).sum()
    }

    /// Iterate over every lesson id in the catalog
    pub fn lesson_ids(&self) -> impl Iterator<Item = &str> {
        self.courses.values().flat_map(|c| c.lessons.iter()).map(|l| l.id.as_str())
    }
}
