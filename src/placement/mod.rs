// Copyright (c) 2025 - Cowboy AI, Inc.
//! Device Placement
//!
//! Synchronous, pure checks invoked while a planner drags a device onto a
//! candidate rack and slot.
//!
//! - [`validate_placement`] / [`PlacementValidator`] - legality plus advisories
//! - [`available_slots`] - every legal starting U for a given height
//! - [`PlacementValidator::plan_move`] - candidate values for a committed move

pub mod moves;
pub mod slots;
pub mod validator;

pub use moves::{MovePlan, RackPowerChange};
pub use slots::{available_slots, available_slots_excluding};
pub use validator::{
    projected_rack_power_kw, validate_placement, PlacementError, PlacementValidation,
    PlacementValidator, PlacementWarning,
};
