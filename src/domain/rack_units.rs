// Copyright (c) 2025 - Cowboy AI, Inc.
//! Rack-Unit Interval Value Object
//!
//! Rack slots are 1-based and a device spanning `height` units from
//! `start` occupies the closed range `[start, start + height - 1]`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed range of rack units occupied (or requested) by a device
///
/// # Invariants
/// - `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct URange {
    start: i32,
    end: i32,
}

impl URange {
    /// Build the range covered by a device of `height` units placed at `start`
    ///
    /// Heights below one are clamped to one, so malformed catalog data still
    /// yields a one-unit footprint instead of an empty or inverted range.
    pub fn from_start_height(start: i32, height: i32) -> Self {
        let height = clamp_height(height);
        Self {
            start,
            end: start.saturating_add(height - 1),
        }
    }

    /// First occupied unit
    pub fn start(&self) -> i32 {
        self.start
    }

    /// Last occupied unit (inclusive)
    pub fn end(&self) -> i32 {
        self.end
    }

    /// Number of units covered
    pub fn height(&self) -> i32 {
        self.end - self.start + 1
    }

    /// Overlap test: `a.start <= b.end && b.start <= a.end`
    pub fn overlaps(&self, other: &URange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// True when the range lies inside a rack of `rack_height` units
    pub fn fits_within(&self, rack_height: i32) -> bool {
        self.start >= 1 && self.end <= rack_height
    }
}

impl fmt::Display for URange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U{}-U{}", self.start, self.end)
    }
}

/// Clamp a device height to at least one rack unit
pub fn clamp_height(height: i32) -> i32 {
    height.max(1)
}
