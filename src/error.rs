//! Error types shared across the catalog, progress, and authoring layers

use thiserror::Error;

/// Errors that can occur while operating on the catalog or learner progress
#[derive(Debug, Error)]
pub enum Error {
    /// A lesson is malformed (e.g. has no quiz questions)
    #[error("invalid lesson configuration: {0}")]
    Configuration(String),

    /// Authoring input failed a field constraint
    #[error("validation failed: {0}")]
    Validation(String),

    /// A course with this name already exists
    #[error("a course named \"{0}\" already exists")]
    DuplicateName(String),

    /// The named course or lesson does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// Reading or writing a persisted document failed
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted document could not be parsed or serialized
    #[error("malformed document: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl Error {
    /// Check if this error came from persistence (load/save) rather than
    /// a rejected operation
    pub fn is_persistence(&self) -> bool {
        matches!(self, Error::Io(_) | Error::Malformed(_))
    }

    /// Check if this error should be surfaced to the user as a rejection
    /// of the requested operation
    pub fn is_rejection(&self) -> bool {
        !self.is_persistence()
    }
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persistence_errors_are_classified() {
        let io = Error::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert!(io.is_persistence());
        assert!(!io.is_rejection());
    }

    #[test]
    fn rejections_are_classified() {
        assert!(Error::DuplicateName("Math".into()).is_rejection());
        assert!(Error::Validation("title is empty".into()).is_rejection());
        assert!(Error::NotFound("course \"Math\"".into()).is_rejection());
    }

    #[test]
    fn error_messages_name_the_subject() {
        let err = Error::DuplicateName("Science".into());
        assert!(err.to_string().contains("Science"));
    }
}
