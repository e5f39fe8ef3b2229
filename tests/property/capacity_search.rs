// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for the Capacity Search
//!
//! Arbitrary multi-room facilities with mixed power draw and occupancy.

use proptest::prelude::*;
use std::collections::HashSet;
use twin_capacity::{
    find_best_capacity_block, rank_capacity_blocks, Device, FacilitySnapshot, Phase, Rack,
    Status4D,
};

use crate::fixtures::{device_with_status, rack, room};

const ROOMS: [&str; 3] = ["hall-1", "hall-2", "hall-3"];

// ============================================================================
// Strategies
// ============================================================================

fn phase() -> impl Strategy<Value = Phase> {
    prop::sample::select(Phase::ALL.to_vec())
}

/// One rack: room index, draw in half-kW steps, occupants
fn rack_parts() -> impl Strategy<Value = (usize, u32, Vec<(i32, Status4D)>)> {
    (
        0..ROOMS.len(),
        0u32..=24,
        prop::collection::vec(
            (1i32..=8, prop::sample::select(Status4D::ALL.to_vec())),
            0..5,
        ),
    )
}

fn facility_parts() -> impl Strategy<Value = (Vec<Rack>, Vec<Device>)> {
    prop::collection::vec(rack_parts(), 0..16).prop_map(|drafts| {
        let mut racks = Vec::new();
        let mut devices = Vec::new();
        for (i, (room_index, half_kw, occupants)) in drafts.into_iter().enumerate() {
            let rack_id = format!("r{i:02}");
            racks.push(rack(&rack_id, ROOMS[room_index], 10.0, f64::from(half_kw) / 2.0));

            let mut u_start = 1;
            for (j, (u_height, status)) in occupants.into_iter().enumerate() {
                devices.push(device_with_status(
                    &format!("{rack_id}-d{j}"),
                    &rack_id,
                    u_start,
                    u_height,
                    status,
                ));
                u_start += u_height;
            }
        }
        (racks, devices)
    })
}

fn build(racks: Vec<Rack>, devices: Vec<Device>) -> FacilitySnapshot {
    FacilitySnapshot::new(ROOMS.iter().map(|id| room(id)).collect(), racks, devices)
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: Every suggestion clears the floor, stays in one room and is 3-6 racks
    #[test]
    fn prop_suggestions_respect_floor_and_shape((racks, devices) in facility_parts(), phase in phase()) {
        let snapshot = build(racks, devices);

        for suggestion in rank_capacity_blocks(&snapshot, phase, usize::MAX) {
            prop_assert!(suggestion.average_headroom_kw() >= 2.0);
            prop_assert!((3..=6).contains(&suggestion.rack_ids.len()));

            let rooms: HashSet<_> = suggestion
                .rack_ids
                .iter()
                .filter_map(|id| snapshot.rack(id))
                .map(|r| r.room_id.clone())
                .collect();
            prop_assert_eq!(rooms.len(), 1);
            prop_assert!(rooms.contains(&suggestion.room_id));
        }
    }

    /// Property: Shuffling rack and device order never changes the answer
    #[test]
    fn prop_result_independent_of_input_order(
        (racks, devices) in facility_parts(),
        phase in phase(),
        rotation in 0usize..16,
    ) {
        let forward = find_best_capacity_block(&build(racks.clone(), devices.clone()), phase);

        let mut shuffled_racks = racks;
        shuffled_racks.reverse();
        if !shuffled_racks.is_empty() {
            let by = rotation % shuffled_racks.len();
            shuffled_racks.rotate_left(by);
        }
        let mut shuffled_devices = devices;
        shuffled_devices.reverse();

        let shuffled = find_best_capacity_block(&build(shuffled_racks, shuffled_devices), phase);
        prop_assert_eq!(forward, shuffled);
    }

    /// Property: The ranking starts with the best block and is ordered by score
    #[test]
    fn prop_rank_head_is_best((racks, devices) in facility_parts(), phase in phase()) {
        let snapshot = build(racks, devices);
        let best = find_best_capacity_block(&snapshot, phase);
        let ranked = rank_capacity_blocks(&snapshot, phase, usize::MAX);

        prop_assert_eq!(best.as_ref(), ranked.first());
        prop_assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }
}
