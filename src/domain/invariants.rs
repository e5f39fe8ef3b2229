// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Snapshot Invariant Checks
//!
//! Reports (never repairs) data-quality problems in a facility snapshot.
//! All functions are pure and deterministic: racks are visited in input
//! order and devices are compared pairwise in input order.
//!
//! # Invariant Categories
//!
//! 1. **Structural**: devices reference a known rack and fit inside it
//! 2. **Occupancy**: non-removed devices in one rack never overlap
//! 3. **Aggregates**: cached `current_power_kw` matches installed draw
//! 4. **Identity**: how many records of one logical asset are visible at once

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

use super::{Device, DeviceId, LogicalEquipmentId, Phase, Rack, RackId, URange};
use crate::visibility::{is_device_visible, phase_allows, StatusToggles};

/// Snapshot data-quality finding
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InvariantViolation {
    #[error("device {device_id} references unknown rack {rack_id}")]
    UnknownRack { device_id: DeviceId, rack_id: RackId },

    #[error("device {device_id} at {range} does not fit in rack {rack_id} ({rack_height}U)")]
    OutOfBounds {
        device_id: DeviceId,
        rack_id: RackId,
        range: URange,
        rack_height: i32,
    },

    #[error("devices {first} ({first_range}) and {second} ({second_range}) overlap in rack {rack_id}")]
    Overlap {
        rack_id: RackId,
        first: DeviceId,
        first_range: URange,
        second: DeviceId,
        second_range: URange,
    },

    #[error("rack {rack_id} caches {cached_kw:.2} kW but installed devices draw {device_sum_kw:.2} kW")]
    PowerDrift {
        rack_id: RackId,
        cached_kw: f64,
        device_sum_kw: f64,
    },

    #[error("logical equipment {logical_equipment_id} has {} visible records in {phase}", .device_ids.len())]
    MultipleVisibleInstances {
        logical_equipment_id: LogicalEquipmentId,
        phase: Phase,
        device_ids: Vec<DeviceId>,
    },
}

/// Devices that reference a rack missing from `racks`
pub fn check_rack_references(devices: &[Device], racks: &[Rack]) -> Vec<InvariantViolation> {
    devices
        .iter()
        .filter(|device| !racks.iter().any(|rack| rack.id == device.rack_id))
        .map(|device| InvariantViolation::UnknownRack {
            device_id: device.id.clone(),
            rack_id: device.rack_id.clone(),
        })
        .collect()
}

/// `1 <= u_start` and `u_start + u_height - 1 <= rack.u_height`
pub fn check_bounds(devices: &[Device], racks: &[Rack]) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    for rack in racks {
        for device in devices.iter().filter(|d| d.rack_id == rack.id) {
            let range = device.range();
            if !range.fits_within(rack.u_height) {
                violations.push(InvariantViolation::OutOfBounds {
                    device_id: device.id.clone(),
                    rack_id: rack.id.clone(),
                    range,
                    rack_height: rack.u_height,
                });
            }
        }
    }
    violations
}

/// Pairwise overlap between non-removed devices sharing a rack
pub fn check_overlaps(devices: &[Device], racks: &[Rack]) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    for rack in racks {
        let occupants: Vec<&Device> = devices
            .iter()
            .filter(|d| d.rack_id == rack.id && d.occupies_space())
            .collect();

        for (i, first) in occupants.iter().enumerate() {
            for second in &occupants[i + 1..] {
                let (first_range, second_range) = (first.range(), second.range());
                if first_range.overlaps(&second_range) {
                    violations.push(InvariantViolation::Overlap {
                        rack_id: rack.id.clone(),
                        first: first.id.clone(),
                        first_range,
                        second: second.id.clone(),
                        second_range,
                    });
                }
            }
        }
    }
    violations
}

/// Cached rack power vs. the draw of devices installed today
///
/// "Installed today" means visible in [`Phase::AsIs`]; the cache is never
/// corrected here, only compared.
pub fn check_power_drift(
    devices: &[Device],
    racks: &[Rack],
    tolerance_kw: f64,
) -> Vec<InvariantViolation> {
    racks
        .iter()
        .filter_map(|rack| {
            let device_sum_kw: f64 = devices
                .iter()
                .filter(|d| d.rack_id == rack.id && phase_allows(Phase::AsIs, d.status_4d))
                .map(|d| d.power_kw)
                .sum();

            if (device_sum_kw - rack.current_power_kw).abs() > tolerance_kw {
                warn!(
                    rack = %rack.id,
                    cached_kw = rack.current_power_kw,
                    device_sum_kw,
                    "rack power cache drift"
                );
                Some(InvariantViolation::PowerDrift {
                    rack_id: rack.id.clone(),
                    cached_kw: rack.current_power_kw,
                    device_sum_kw,
                })
            } else {
                None
            }
        })
        .collect()
}

/// Logical assets with more than one record visible under `phase`/`toggles`
///
/// Several visible records may be intentional (both ends of a relocation),
/// so this is informational only.
pub fn check_visible_instances(
    devices: &[Device],
    phase: Phase,
    toggles: &StatusToggles,
) -> Vec<InvariantViolation> {
    let mut by_asset: BTreeMap<&LogicalEquipmentId, Vec<DeviceId>> = BTreeMap::new();
    for device in devices.iter().filter(|d| is_device_visible(d, phase, toggles)) {
        by_asset
            .entry(&device.logical_equipment_id)
            .or_default()
            .push(device.id.clone());
    }

    by_asset
        .into_iter()
        .filter(|(_, ids)| ids.len() > 1)
        .map(|(logical_equipment_id, device_ids)| InvariantViolation::MultipleVisibleInstances {
            logical_equipment_id: logical_equipment_id.clone(),
            phase,
            device_ids,
        })
        .collect()
}

/// Run every check; findings are grouped by category in the order above
pub fn check_snapshot_integrity(
    devices: &[Device],
    racks: &[Rack],
    phase: Phase,
    power_drift_tolerance_kw: f64,
) -> Vec<InvariantViolation> {
    let mut violations = check_rack_references(devices, racks);
    violations.extend(check_bounds(devices, racks));
    violations.extend(check_overlaps(devices, racks));
    violations.extend(check_power_drift(devices, racks, power_drift_tolerance_kw));
    violations.extend(check_visible_instances(
        devices,
        phase,
        &StatusToggles::all_enabled(),
    ));
    violations
}
