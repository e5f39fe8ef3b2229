// Copyright (c) 2025 - Cowboy AI, Inc.
//! Free-Slot Finder
//!
//! Enumerates every legal starting U for a device of a given height. Racks
//! are small (tens of units, a handful of occupants), so a straight scan of
//! positions × occupants is all that is needed.

use crate::domain::{clamp_height, Device, DeviceId, Rack, RackId, URange};

use super::validator::occupants;

/// Ascending 1-based start positions where a device of `device_height` fits
///
/// An unknown rack or a full rack yields an empty list, never an error.
pub fn available_slots(
    rack_id: &RackId,
    device_height: i32,
    devices: &[Device],
    racks: &[Rack],
) -> Vec<i32> {
    available_slots_excluding(rack_id, device_height, devices, racks, None)
}

/// Same as [`available_slots`] but ignores `exclude` when it already sits in
/// the rack, matching the validator's view when re-slotting a device
pub fn available_slots_excluding(
    rack_id: &RackId,
    device_height: i32,
    devices: &[Device],
    racks: &[Rack],
    exclude: Option<&DeviceId>,
) -> Vec<i32> {
    let Some(rack) = racks.iter().find(|rack| &rack.id == rack_id) else {
        return Vec::new();
    };

    let height = clamp_height(device_height);
    let occupied: Vec<URange> = occupants(devices, &rack.id, exclude)
        .map(Device::range)
        .collect();

    let last_start = rack.u_height - height + 1;
    (1..=last_start)
        .filter(|&u| {
            let candidate = URange::from_start_height(u, height);
            !occupied.iter().any(|range| range.overlaps(&candidate))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DeviceTypeId, LogicalEquipmentId, RoomId, Status4D, Transform};
    use pretty_assertions::assert_eq;

    fn rack(u_height: i32) -> Rack {
        Rack {
            id: RackId::new("r1"),
            room_id: RoomId::new("room"),
            name: "R1".to_string(),
            u_height,
            transform: Transform::default(),
            power_kw_limit: Some(10.0),
            current_power_kw: 0.0,
        }
    }

    fn device(id: &str, u_start: i32, u_height: i32, status: Status4D) -> Device {
        Device {
            id: DeviceId::new(id),
            rack_id: RackId::new("r1"),
            device_type_id: DeviceTypeId::new("dt"),
            logical_equipment_id: LogicalEquipmentId::new(id),
            name: id.to_string(),
            u_start,
            u_height,
            status_4d: status,
            power_kw: 0.0,
            updated_at: None,
        }
    }

    #[test]
    fn test_empty_rack_every_position() {
        let slots = available_slots(&RackId::new("r1"), 2, &[], &[rack(6)]);
        assert_eq!(slots, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_gaps_between_devices() {
        let devices = [
            device("a", 1, 2, Status4D::ExistingRetained),
            device("b", 5, 1, Status4D::Proposed),
        ];
        let slots = available_slots(&RackId::new("r1"), 2, &devices, &[rack(8)]);
        assert_eq!(slots, vec![3, 6, 7]);
    }

    #[test]
    fn test_removed_devices_free_their_space() {
        let devices = [device("a", 1, 4, Status4D::ExistingRemoved)];
        let slots = available_slots(&RackId::new("r1"), 4, &devices, &[rack(4)]);
        assert_eq!(slots, vec![1]);
    }

    #[test]
    fn test_full_or_unknown_rack_is_empty() {
        let devices = [device("a", 1, 4, Status4D::ExistingRetained)];
        assert!(available_slots(&RackId::new("r1"), 1, &devices, &[rack(4)]).is_empty());
        assert!(available_slots(&RackId::new("missing"), 1, &[], &[rack(4)]).is_empty());
        assert!(available_slots(&RackId::new("r1"), 5, &[], &[rack(4)]).is_empty());
    }

    #[test]
    fn test_excluding_self() {
        let devices = [device("a", 2, 2, Status4D::ExistingRetained)];
        let me = DeviceId::new("a");
        let slots = available_slots_excluding(&RackId::new("r1"), 2, &devices, &[rack(4)], Some(&me));
        assert_eq!(slots, vec![1, 2, 3]);
    }

    #[test]
    fn test_zero_height_clamped() {
        let slots = available_slots(&RackId::new("r1"), 0, &[], &[rack(3)]);
        assert_eq!(slots, vec![1, 2, 3]);
    }
}
