// Copyright (c) 2025 - Cowboy AI, Inc.
//! Phase/Status Visibility Projector
//!
//! Pure lookup from a planning [`Phase`] to the set of [`Status4D`] values
//! visible in it, combined with the operator's per-status toggles.
//!
//! | Phase  | Visible statuses                                   |
//! |--------|----------------------------------------------------|
//! | AS_IS  | EXISTING_RETAINED, EXISTING_REMOVED                |
//! | TO_BE  | EXISTING_RETAINED, PROPOSED, MODIFIED              |
//! | FUTURE | EXISTING_RETAINED, PROPOSED, FUTURE, MODIFIED      |

use serde::{Deserialize, Serialize};

use crate::domain::{Device, Phase, Status4D};

/// True if `status` is part of `phase`
pub fn phase_allows(phase: Phase, status: Status4D) -> bool {
    match (phase, status) {
        (_, Status4D::ExistingRetained) => true,
        (Phase::AsIs, Status4D::ExistingRemoved) => true,
        (Phase::AsIs, Status4D::Proposed | Status4D::Future | Status4D::Modified) => false,
        (Phase::ToBe | Phase::Future, Status4D::ExistingRemoved) => false,
        (Phase::ToBe | Phase::Future, Status4D::Proposed | Status4D::Modified) => true,
        (Phase::ToBe, Status4D::Future) => false,
        (Phase::Future, Status4D::Future) => true,
    }
}

/// Statuses visible in `phase`, in declaration order
pub fn visible_statuses(phase: Phase) -> Vec<Status4D> {
    Status4D::ALL
        .into_iter()
        .filter(|status| phase_allows(phase, *status))
        .collect()
}

/// Operator-controlled per-status visibility switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct StatusToggles {
    pub existing_retained: bool,
    pub existing_removed: bool,
    pub proposed: bool,
    pub future: bool,
    pub modified: bool,
}

impl Default for StatusToggles {
    fn default() -> Self {
        Self::all_enabled()
    }
}

impl StatusToggles {
    pub fn all_enabled() -> Self {
        Self {
            existing_retained: true,
            existing_removed: true,
            proposed: true,
            future: true,
            modified: true,
        }
    }

    pub fn is_enabled(&self, status: Status4D) -> bool {
        match status {
            Status4D::ExistingRetained => self.existing_retained,
            Status4D::ExistingRemoved => self.existing_removed,
            Status4D::Proposed => self.proposed,
            Status4D::Future => self.future,
            Status4D::Modified => self.modified,
        }
    }

    /// Copy with one status switched on or off
    pub fn with(mut self, status: Status4D, enabled: bool) -> Self {
        let slot = match status {
            Status4D::ExistingRetained => &mut self.existing_retained,
            Status4D::ExistingRemoved => &mut self.existing_removed,
            Status4D::Proposed => &mut self.proposed,
            Status4D::Future => &mut self.future,
            Status4D::Modified => &mut self.modified,
        };
        *slot = enabled;
        self
    }
}

/// Visible iff the phase allows the status and its toggle is on
pub fn is_status_visible(status: Status4D, phase: Phase, toggles: &StatusToggles) -> bool {
    phase_allows(phase, status) && toggles.is_enabled(status)
}

pub fn is_device_visible(device: &Device, phase: Phase, toggles: &StatusToggles) -> bool {
    is_status_visible(device.status_4d, phase, toggles)
}

/// Devices visible under `phase` and `toggles`, in input order
pub fn visible_devices<'a>(
    devices: &'a [Device],
    phase: Phase,
    toggles: &'a StatusToggles,
) -> impl Iterator<Item = &'a Device> + 'a {
    devices
        .iter()
        .filter(move |device| is_device_visible(device, phase, toggles))
}
