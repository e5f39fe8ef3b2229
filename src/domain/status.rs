// Copyright (c) 2025 - Cowboy AI, Inc.
//! 4D Life-Cycle Vocabulary
//!
//! Devices carry a [`Status4D`] describing where they stand in the planning
//! timeline; operators look at the facility through a [`Phase`]. Both are
//! closed sets, so every consumer matches on them exhaustively.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Unrecognized status or phase label
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VocabularyError {
    #[error("Unknown 4D status: {0}")]
    UnknownStatus(String),

    #[error("Unknown phase: {0}")]
    UnknownPhase(String),
}

/// Device life-cycle status across project phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status4D {
    /// Installed today and kept in the plan
    ExistingRetained,
    /// Installed today and scheduled for removal
    ExistingRemoved,
    /// Planned for the next build-out
    Proposed,
    /// Planned for a later build-out
    Future,
    /// Planned position or configuration of an existing asset
    Modified,
}

impl Status4D {
    /// Every status, in declaration order
    pub const ALL: [Status4D; 5] = [
        Status4D::ExistingRetained,
        Status4D::ExistingRemoved,
        Status4D::Proposed,
        Status4D::Future,
        Status4D::Modified,
    ];

    /// Get the canonical wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExistingRetained => "EXISTING_RETAINED",
            Self::ExistingRemoved => "EXISTING_REMOVED",
            Self::Proposed => "PROPOSED",
            Self::Future => "FUTURE",
            Self::Modified => "MODIFIED",
        }
    }

    /// Removed devices are logically absent: they never block rack space
    pub fn is_removed(&self) -> bool {
        matches!(self, Self::ExistingRemoved)
    }

    /// Get human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ExistingRetained => "Existing (Retained)",
            Self::ExistingRemoved => "Existing (Removed)",
            Self::Proposed => "Proposed",
            Self::Future => "Future",
            Self::Modified => "Modified",
        }
    }
}

impl fmt::Display for Status4D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status4D {
    type Err = VocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| VocabularyError::UnknownStatus(s.to_string()))
    }
}

/// Named point in the facility's planning timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// The facility as it stands today
    AsIs,
    /// The facility after the current project
    ToBe,
    /// The facility after all planned projects
    Future,
}

impl Phase {
    /// Every phase, in timeline order
    pub const ALL: [Phase; 3] = [Phase::AsIs, Phase::ToBe, Phase::Future];

    /// Get the canonical wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AsIs => "AS_IS",
            Self::ToBe => "TO_BE",
            Self::Future => "FUTURE",
        }
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::AsIs
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = VocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|phase| phase.as_str().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| VocabularyError::UnknownPhase(s.to_string()))
    }
}
