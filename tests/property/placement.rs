// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Placement
//!
//! Verifies occupancy, boundary, idempotence and finder/validator agreement
//! for arbitrary rack layouts.

use proptest::prelude::*;
use twin_capacity::domain::invariants::check_overlaps;
use twin_capacity::visibility::phase_allows;
use twin_capacity::{
    available_slots, validate_placement, Device, Phase, Rack, RackId, Status4D,
};

use crate::fixtures::{device_with_status, rack_with_height};

// ============================================================================
// Strategies
// ============================================================================

fn status() -> impl Strategy<Value = Status4D> {
    prop::sample::select(Status4D::ALL.to_vec())
}

/// Rack plus an arbitrary (possibly self-overlapping) set of occupants
fn rack_layout() -> impl Strategy<Value = (Rack, Vec<Device>)> {
    (4i32..=60).prop_flat_map(|height| {
        let occupant = (1..=height, 1i32..=6, status());
        prop::collection::vec(occupant, 0..12).prop_map(move |drafts| {
            let devices = drafts
                .into_iter()
                .enumerate()
                .map(|(i, (u_start, u_height, status))| {
                    device_with_status(&format!("d{i}"), "r1", u_start, u_height, status)
                })
                .collect();
            (rack_with_height("r1", height), devices)
        })
    })
}

/// Sequence of placement requests `(u_start, u_height)`
fn requests() -> impl Strategy<Value = Vec<(i32, i32)>> {
    prop::collection::vec((-2i32..=50, 0i32..=8), 0..40)
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: Devices admitted one by one through the validator never overlap
    #[test]
    fn prop_validated_placements_never_overlap(requests in requests()) {
        let racks = vec![rack_with_height("r1", 42)];
        let mut placed: Vec<Device> = Vec::new();

        for (i, (u_start, u_height)) in requests.into_iter().enumerate() {
            let candidate = device_with_status(&format!("n{i}"), "staging", 1, u_height, Status4D::Proposed);
            let result = validate_placement(&candidate, &RackId::new("r1"), u_start, &placed, &racks);
            if result.is_valid() {
                placed.push(candidate.relocated(RackId::new("r1"), u_start));
            }
        }

        prop_assert!(check_overlaps(&placed, &racks).is_empty());
        for device in &placed {
            prop_assert!(device.range().fits_within(42));
        }
    }

    /// Property: The topmost legal start is accepted and one above it rejected
    #[test]
    fn prop_boundary_is_exact(rack_height in 1i32..=60, device_height in 1i32..=10) {
        prop_assume!(device_height <= rack_height);
        let racks = vec![rack_with_height("r1", rack_height)];
        let candidate = device_with_status("d", "staging", 1, device_height, Status4D::Proposed);
        let top = rack_height - device_height + 1;

        let at_top = validate_placement(&candidate, &RackId::new("r1"), top, &[], &racks);
        let past_top = validate_placement(&candidate, &RackId::new("r1"), top + 1, &[], &racks);

        prop_assert!(at_top.is_valid());
        prop_assert!(!past_top.is_valid());
    }

    /// Property: Validation is pure
    #[test]
    fn prop_validation_is_idempotent(
        (rack, devices) in rack_layout(),
        u_start in -5i32..=65,
        height in 0i32..=8,
    ) {
        let racks = vec![rack];
        let candidate = device_with_status("c", "staging", 1, height, Status4D::Proposed);

        let first = validate_placement(&candidate, &RackId::new("r1"), u_start, &devices, &racks);
        let second = validate_placement(&candidate, &RackId::new("r1"), u_start, &devices, &racks);

        prop_assert_eq!(first, second);
    }

    /// Property: A U is returned by the finder iff validating there succeeds
    #[test]
    fn prop_finder_matches_validator((rack, devices) in rack_layout(), height in 1i32..=8) {
        let rack_height = rack.u_height;
        let racks = vec![rack];
        let candidate = device_with_status("c", "staging", 1, height, Status4D::Proposed);
        let slots = available_slots(&RackId::new("r1"), height, &devices, &racks);

        prop_assert!(slots.windows(2).all(|w| w[0] < w[1]), "slots must be ascending");
        for u in 1..=rack_height {
            let result = validate_placement(&candidate, &RackId::new("r1"), u, &devices, &racks);
            prop_assert_eq!(slots.contains(&u), result.is_valid(), "disagreement at U{}", u);
        }
    }

    /// Property: FUTURE shows everything TO_BE shows; AS_IS shows no planned gear
    #[test]
    fn prop_phase_monotonicity(status in status()) {
        if phase_allows(Phase::ToBe, status) {
            prop_assert!(phase_allows(Phase::Future, status));
        }
        if matches!(status, Status4D::Proposed | Status4D::Future | Status4D::Modified) {
            prop_assert!(!phase_allows(Phase::AsIs, status));
        }
    }
}
