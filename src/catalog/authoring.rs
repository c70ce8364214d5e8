//! Authoring operations over the catalog
//!
//! Thin CRUD used by the teacher surface. Every operation is all-or-nothing:
//! validation happens before any mutation, so a rejected call leaves the
//! catalog untouched. Persisting the mutated catalog is the caller's job.

use std::collections::BTreeSet;

use super::model::{Catalog, Course, Lesson, Question};
use crate::error::{Error, Result};

/// Number of options every authored question must have
pub const OPTIONS_PER_QUESTION: usize = 4;

/// Unvalidated question input from the authoring form
#[derive(Debug, Clone, Default)]
pub struct QuestionDraft {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

/// Create an empty course with the given name
pub fn create_course(catalog: &mut Catalog, name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation("course name is empty".into()));
    }
    if catalog.courses.contains_key(name) {
        return Err(Error::DuplicateName(name.to_string()));
    }
    catalog.courses.insert(name.to_string(), Course::default());
    Ok(())
}

/// Add a lesson to an existing course
///
/// The lesson id is derived from the course name and lesson count, probing
/// upward past ids already taken (so deleting then adding cannot collide).
pub fn add_lesson(
    catalog: &mut Catalog,
    course_name: &str,
    title: &str,
    content: &str,
    questions: Vec<QuestionDraft>,
) -> Result<String> {
    if !catalog.courses.contains_key(course_name) {
        return Err(Error::Validation(format!("course \"{course_name}\" does not exist")));
    }
    if title.trim().is_empty() {
        return Err(Error::Validation("lesson title is empty".into()));
    }
    if content.trim().is_empty() {
        return Err(Error::Validation("lesson content is empty".into()));
    }
    if questions.is_empty() {
        return Err(Error::Validation("lesson needs at least one question".into()));
    }

    let mut quiz = Vec::with_capacity(questions.len());
    for (i, draft) in questions.into_iter().enumerate() {
        if draft.options.len() != OPTIONS_PER_QUESTION {
            return Err(Error::Validation(format!(
                "question {} needs exactly {OPTIONS_PER_QUESTION} options, got {}",
                i + 1,
                draft.options.len()
            )));
        }
        if draft.options.iter().any(|o| o.trim().is_empty()) {
            return Err(Error::Validation(format!("question {} has an empty option", i + 1)));
        }
        let question =
            Question::new(draft.prompt, draft.options, draft.correct_index).map_err(|e| {
                Error::Validation(format!("question {}: {e}", i + 1))
            })?;
        quiz.push(question);
    }

    let id = derive_lesson_id(catalog, course_name);
    let lesson = Lesson::new(id.clone(), title.trim(), content.trim(), quiz);
    // Existence was checked above, so the course must be present.
    if let Some(course) = catalog.courses.get_mut(course_name) {
        course.lessons.push(lesson);
    }
    Ok(id)
}

/// Remove a lesson from a course
///
/// Unknown course or lesson id signals `NotFound`. Completed-lesson ids in
/// learner profiles are not touched; dangling ids are ignored wherever
/// progress is computed.
pub fn delete_lesson(catalog: &mut Catalog, course_name: &str, lesson_id: &str) -> Result<()> {
    let course = catalog
        .courses
        .get_mut(course_name)
        .ok_or_else(|| Error::NotFound(format!("course \"{course_name}\"")))?;

    let len_before = course.lessons.len();
    course.lessons.retain(|l| l.id != lesson_id);
    if course.lessons.len() == len_before {
        return Err(Error::NotFound(format!("lesson \"{lesson_id}\" in course \"{course_name}\"")));
    }
    Ok(())
}

/// Derive the next lesson id for a course: slugified name + count, bumped
/// past any id already present in the catalog
fn derive_lesson_id(catalog: &Catalog, course_name: &str) -> String {
    let slug = slugify(course_name);
    let count = catalog.course(course_name).map_or(0, |c| c.lessons.len());

    let mut n = count + 1;
    loop {
        let candidate = format!("{slug}_{n}");
        if catalog.find_lesson(&candidate).is_none() {
            return candidate;
        }
        n += 1;
    }
}

/// Lowercase alphanumeric slug; everything else collapses to underscores
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_sep = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_sep = false;
        } else if !last_was_sep {
            slug.push('_');
            last_was_sep = true;
        }
    }
    while slug.ends_with('_') {
        slug.pop();
    }
    if slug.is_empty() { "course".to_string() } else { slug }
}

/// Per-course completion numbers for the dashboard and statistics views
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseProgress {
    pub name: String,
    pub completed: usize,
    pub total: usize,
}

/// Completion per course, counting only lessons that still exist in the
/// catalog (dangling profile ids contribute nothing)
pub fn course_progress(catalog: &Catalog, completed_ids: &BTreeSet<String>) -> Vec<CourseProgress> {
    catalog
        .courses
        .iter()
        .map(|(name, course)| CourseProgress {
            name: name.clone(),
            completed: course.lessons.iter().filter(|l| completed_ids.contains(&l.id)).count(),
            total: course.lessons.len(),
        })
        .collect()
}

/// Aggregate statistics for the teacher view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogStats {
    pub courses: usize,
    pub lessons: usize,
    pub completed_lessons: usize,
}

/// Compute catalog-wide aggregates against a learner's completion set
pub fn catalog_stats(catalog: &Catalog, completed_ids: &BTreeSet<String>) -> CatalogStats {
    CatalogStats {
        courses: catalog.courses.len(),
        lessons: catalog.total_lessons(),
        completed_lessons: catalog.lesson_ids().filter(|id| completed_ids.contains(*id)).count(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn drafts(n: usize) -> Vec<QuestionDraft> {
        (0..n)
            .map(|i| QuestionDraft {
                prompt: format!("Question {i}?"),
                options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                correct_index: 0,
            })
            .collect()
    }

    #[test]
    fn create_course_rejects_empty_name() {
        let mut catalog = Catalog::default();
        assert!(matches!(create_course(&mut catalog, "   "), Err(Error::Validation(_))));
        assert!(catalog.courses.is_empty());
    }

    #[test]
    fn create_course_rejects_duplicates() {
        let mut catalog = Catalog::default();
        create_course(&mut catalog, "History").unwrap();
        assert!(matches!(
            create_course(&mut catalog, "History"),
            Err(Error::DuplicateName(name)) if name == "History"
        ));
    }

    #[test]
    fn create_course_inserts_empty_course() {
        let mut catalog = Catalog::default();
        create_course(&mut catalog, "History").unwrap();
        assert!(catalog.course("History").unwrap().lessons.is_empty());
    }

    #[test]
    fn add_lesson_requires_existing_course() {
        let mut catalog = Catalog::default();
        let result = add_lesson(&mut catalog, "Ghost", "Title", "Body", drafts(1));
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn add_lesson_validates_fields_in_order() {
        let mut catalog = Catalog::default();
        create_course(&mut catalog, "History").unwrap();

        let err = add_lesson(&mut catalog, "History", " ", "Body", drafts(1)).unwrap_err();
        assert!(err.to_string().contains("title"));

        let err = add_lesson(&mut catalog, "History", "Title", " ", drafts(1)).unwrap_err();
        assert!(err.to_string().contains("content"));

        let err = add_lesson(&mut catalog, "History", "Title", "Body", vec![]).unwrap_err();
        assert!(err.to_string().contains("question"));
    }

    #[test]
    fn add_lesson_validates_question_shape() {
        let mut catalog = Catalog::default();
        create_course(&mut catalog, "History").unwrap();

        let mut bad = drafts(1);
        bad[0].options.pop();
        let err = add_lesson(&mut catalog, "History", "Title", "Body", bad).unwrap_err();
        assert!(err.to_string().contains("exactly 4 options"));

        let mut bad = drafts(1);
        bad[0].correct_index = 4;
        assert!(add_lesson(&mut catalog, "History", "Title", "Body", bad).is_err());

        let mut bad = drafts(1);
        bad[0].options[2] = "  ".into();
        let err = add_lesson(&mut catalog, "History", "Title", "Body", bad).unwrap_err();
        assert!(err.to_string().contains("empty option"));
    }

    #[test]
    fn add_lesson_derives_sequential_ids() {
        let mut catalog = Catalog::default();
        create_course(&mut catalog, "World History").unwrap();

        let first = add_lesson(&mut catalog, "World History", "One", "Body", drafts(1)).unwrap();
        let second = add_lesson(&mut catalog, "World History", "Two", "Body", drafts(1)).unwrap();

        assert_eq!(first, "world_history_1");
        assert_eq!(second, "world_history_2");
    }

    #[test]
    fn add_lesson_probes_past_deleted_ids() {
        let mut catalog = Catalog::default();
        create_course(&mut catalog, "History").unwrap();
        add_lesson(&mut catalog, "History", "One", "Body", drafts(1)).unwrap();
        add_lesson(&mut catalog, "History", "Two", "Body", drafts(1)).unwrap();
        add_lesson(&mut catalog, "History", "Three", "Body", drafts(1)).unwrap();

        // Removing the middle lesson leaves history_3 taken; the next add
        // must not reuse it.
        delete_lesson(&mut catalog, "History", "history_2").unwrap();
        let id = add_lesson(&mut catalog, "History", "Four", "Body", drafts(1)).unwrap();

        assert_eq!(id, "history_4");
        let ids: Vec<&str> = catalog.lesson_ids().collect();
        let mut deduped = ids.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(ids.len(), deduped.len());
    }

    #[test]
    fn delete_lesson_signals_not_found() {
        let mut catalog = Catalog::default();
        create_course(&mut catalog, "History").unwrap();

        assert!(matches!(
            delete_lesson(&mut catalog, "Ghost", "x"),
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            delete_lesson(&mut catalog, "History", "history_9"),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn delete_lesson_removes_only_the_match() {
        let mut catalog = Catalog::default();
        create_course(&mut catalog, "History").unwrap();
        add_lesson(&mut catalog, "History", "One", "Body", drafts(1)).unwrap();
        add_lesson(&mut catalog, "History", "Two", "Body", drafts(2)).unwrap();

        delete_lesson(&mut catalog, "History", "history_1").unwrap();

        let course = catalog.course("History").unwrap();
        assert_eq!(course.lessons.len(), 1);
        assert_eq!(course.lessons[0].id, "history_2");
    }

    #[test]
    fn slugify_collapses_punctuation() {
        assert_eq!(slugify("World History"), "world_history");
        assert_eq!(slugify("C++ & Friends!"), "c_friends");
        assert_eq!(slugify("日本語"), "course");
    }

    #[test]
    fn progress_ignores_dangling_ids() {
        let catalog = Catalog::seeded();
        let completed: BTreeSet<String> =
            ["math_1".to_string(), "deleted_lesson".to_string()].into();

        let stats = catalog_stats(&catalog, &completed);
        assert_eq!(stats.completed_lessons, 1);

        let progress = course_progress(&catalog, &completed);
        let math = progress.iter().find(|p| p.name == "Mathematics").unwrap();
        assert_eq!((math.completed, math.total), (1, 3));
    }

    #[test]
    fn catalog_stats_counts_everything() {
        let catalog = Catalog::seeded();
        let stats = catalog_stats(&catalog, &BTreeSet::new());
        assert_eq!(stats, CatalogStats { courses: 3, lessons: 9, completed_lessons: 0 });
    }
}
