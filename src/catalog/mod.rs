//! Course catalog: content model, persistence, and authoring operations

pub mod authoring;
pub mod model;
pub mod storage;

pub use model::{Catalog, Course, Lesson, Question};
