//! Learner progress: the profile record and its persistence
//!
//! The profile is one learner's mutable state, persisted as a single JSON
//! snapshot after every mutation. Mutation itself happens only in
//! [`engine`] (quiz submission) or through [`LearnerProfile::reset`].

pub mod engine;

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Current profile document version
pub const PROFILE_VERSION: u32 = 1;

/// One learner's progress state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnerProfile {
    /// Document format version
    #[serde(default)]
    pub version: u32,

    /// Learner's display name; empty until first login
    pub name: String,

    /// Total points earned (10 per completed lesson)
    pub points: u32,

    /// Ids of completed lessons
    pub completed_lesson_ids: BTreeSet<String>,

    /// Consecutive successful lesson completions
    pub current_streak: u32,

    /// Unlocked badges, in unlock order; each appears at most once
    pub achievements: Vec<String>,

    /// Whether the mini-game has been unlocked
    pub game_unlocked: bool,
}

impl LearnerProfile {
    /// Create a fresh profile for a named learner
    pub fn new(name: impl Into<String>) -> Self {
        Self { version: PROFILE_VERSION, name: name.into(), ..Default::default() }
    }

    /// Load the profile from disk; a missing file yields an empty profile
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::new(String::new()))
        }
    }

    /// Load the profile, falling back to an empty one on any failure
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!("Failed to load profile from {path:?}, starting empty: {e}");
                Self::new(String::new())
            }
        }
    }

    /// Save the profile to disk as a full snapshot
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;

        Ok(())
    }

    /// Wipe all progress while keeping the learner's name
    pub fn reset(&mut self) {
        *self = Self::new(std::mem::take(&mut self.name));
    }

    /// Check whether a lesson has been completed
    pub fn has_completed(&self, lesson_id: &str) -> bool {
        self.completed_lesson_ids.contains(lesson_id)
    }

    /// Check whether a badge has already been unlocked
    pub fn has_achievement(&self, name: &str) -> bool {
        self.achievements.iter().any(|a| a == name)
    }
}
