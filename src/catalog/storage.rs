//! Catalog persistence
//!
//! The catalog is persisted as a single JSON snapshot, read in full at
//! session start and overwritten in full after each authoring operation.

use std::path::Path;

use super::model::{Catalog, Course, Lesson, Question};
use crate::error::Result;

/// Current catalog document version
pub const CATALOG_VERSION: u32 = 1;

impl Catalog {
    /// Load the catalog from disk, seeding the default catalog if the file
    /// does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::seeded())
        }
    }

    /// Load the catalog, falling back to the seeded default on any failure
    ///
    /// Load failures are recoverable by policy: the session continues with
    /// defaults and the next save overwrites the bad document.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::warn!("Failed to load catalog from {path:?}, using seeded default: {e}");
                Self::seeded()
            }
        }
    }

    /// Save the catalog to disk as a full snapshot
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;

        Ok(())
    }

    /// The default catalog shipped with a fresh installation
    pub fn seeded() -> Self {
        fn q(prompt: &str, options: [&str; 4], correct_index: usize) -> Question {
            Question {
                prompt: prompt.into(),
                options: options.iter().map(|s| s.to_string()).collect(),
                correct_index,
            }
        }

        let mut catalog = Catalog { version: CATALOG_VERSION, ..Default::default() };

        catalog.courses.insert(
            "Mathematics".into(),
            Course {
                lessons: vec![
                    Lesson::new(
                        "math_1",
                        "Addition Basics",
                        "Learn to add numbers from 1-10",
                        vec![
                            q("What is 3 + 4?", ["6", "7", "8", "9"], 1),
                            q("What is 5 + 2?", ["6", "7", "8", "9"], 1),
                        ],
                    ),
                    Lesson::new(
                        "math_2",
                        "Subtraction Basics",
                        "Learn to subtract numbers from 1-10",
                        vec![
                            q("What is 8 - 3?", ["4", "5", "6", "7"], 1),
                            q("What is 9 - 4?", ["4", "5", "6", "7"], 1),
                        ],
                    ),
                    Lesson::new(
                        "math_3",
                        "Multiplication Tables",
                        "Learn multiplication tables 1-5",
                        vec![
                            q("What is 3 x 4?", ["10", "11", "12", "13"], 2),
                            q("What is 5 x 3?", ["13", "14", "15", "16"], 2),
                        ],
                    ),
                ],
            },
        );

        catalog.courses.insert(
            "Science".into(),
            Course {
                lessons: vec![
                    Lesson::new(
                        "sci_1",
                        "Water Cycle",
                        "Understanding evaporation, condensation, and precipitation",
                        vec![
                            q(
                                "What happens when water heats up?",
                                ["It freezes", "It evaporates", "It melts", "Nothing"],
                                1,
                            ),
                            q(
                                "What are clouds made of?",
                                ["Cotton", "Water vapor", "Smoke", "Air"],
                                1,
                            ),
                        ],
                    ),
                    Lesson::new(
                        "sci_2",
                        "Plants and Photosynthesis",
                        "How plants make their own food",
                        vec![q(
                            "What do plants need for photosynthesis?",
                            ["Water and soil", "Sunlight and water", "Air only", "Nothing"],
                            1,
                        )],
                    ),
                    Lesson::new(
                        "sci_3",
                        "The Solar System",
                        "Learn about planets and the sun",
                        vec![q(
                            "How many planets are in our solar system?",
                            ["7", "8", "9", "10"],
                            1,
                        )],
                    ),
                ],
            },
        );

        catalog.courses.insert(
            "English".into(),
            Course {
                lessons: vec![
                    Lesson::new(
                        "eng_1",
                        "Parts of Speech",
                        "Nouns, verbs, and adjectives",
                        vec![q(
                            "What is a noun?",
                            [
                                "Action word",
                                "Describing word",
                                "Person/place/thing",
                                "Connecting word",
                            ],
                            2,
                        )],
                    ),
                    Lesson::new(
                        "eng_2",
                        "Sentence Structure",
                        "Building complete sentences",
                        vec![q(
                            "Every sentence needs a subject and a...",
                            ["Noun", "Verb", "Adjective", "Article"],
                            1,
                        )],
                    ),
                    Lesson::new(
                        "eng_3",
                        "Reading Comprehension",
                        "Understanding what you read",
                        vec![q(
                            "What helps you understand a story better?",
                            ["Reading fast", "Skipping words", "Thinking about it", "Reading once"],
                            2,
                        )],
                    ),
                ],
            },
        );

        catalog
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn seeded_catalog_has_three_courses() {
        let catalog = Catalog::seeded();
        assert_eq!(catalog.courses.len(), 3);
        assert_eq!(catalog.total_lessons(), 9);
        assert!(catalog.course("Mathematics").is_some());
        assert!(catalog.course("Science").is_some());
        assert!(catalog.course("English").is_some());
    }

    #[test]
    fn seeded_lesson_ids_are_unique() {
        let catalog = Catalog::seeded();
        let ids: Vec<&str> = catalog.lesson_ids().collect();
        let mut deduped = ids.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(ids.len(), deduped.len());
    }

    #[test]
    fn seeded_correct_indices_are_in_range() {
        let catalog = Catalog::seeded();
        for course in catalog.courses.values() {
            for lesson in &course.lessons {
                assert!(!lesson.quiz.is_empty(), "lesson {} has no quiz", lesson.id);
                for question in &lesson.quiz {
                    assert!(question.correct_index < question.options.len());
                }
            }
        }
    }

    #[test]
    fn load_missing_file_seeds_defaults() {
        let dir = TempDir::new().unwrap();
        let catalog = Catalog::load(&dir.path().join("catalog.json")).unwrap();
        assert_eq!(catalog, Catalog::seeded());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");

        let catalog = Catalog::seeded();
        catalog.save(&path).unwrap();
        let loaded = Catalog::load(&path).unwrap();

        assert_eq!(loaded, catalog);
    }

    #[test]
    fn load_or_default_recovers_from_corrupt_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, "{ not json").unwrap();

        let catalog = Catalog::load_or_default(&path);
        assert_eq!(catalog, Catalog::seeded());
    }

    #[test]
    fn versionless_document_still_loads() {
        let json = r#"{"courses":{"Solo":{"lessons":[]}}}"#;
        let catalog: Catalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.version, 0);
        assert!(catalog.course("Solo").is_some());
    }

    #[test]
    fn catalog_document_is_keyed_by_course_name() {
        let catalog = Catalog::seeded();
        let json = serde_json::to_string(&catalog).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["courses"]["Mathematics"]["lessons"].is_array());
    }
}
