// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for twin-capacity
//!
//! Deterministic builders for racks, devices and snapshots. Every id is
//! derived from the arguments so scenarios read like the facility they model.

#![allow(dead_code)]

use twin_capacity::domain::{
    Device, DeviceId, DeviceTypeId, LogicalEquipmentId, Rack, RackId, Room, RoomId, Status4D,
    Transform,
};
use twin_capacity::FacilitySnapshot;

pub const ROOM_A: &str = "room-a";

pub fn room(id: &str) -> Room {
    Room {
        id: RoomId::new(id),
        floor_id: None,
        name: format!("Hall {id}"),
        transform: Transform::default(),
        area_m2: None,
    }
}

/// 42U rack in `room` with the given power limit and current draw
pub fn rack(id: &str, room: &str, limit_kw: f64, current_kw: f64) -> Rack {
    Rack {
        id: RackId::new(id),
        room_id: RoomId::new(room),
        name: id.to_uppercase(),
        u_height: 42,
        transform: Transform::default(),
        power_kw_limit: Some(limit_kw),
        current_power_kw: current_kw,
    }
}

pub fn rack_with_height(id: &str, u_height: i32) -> Rack {
    Rack {
        u_height,
        ..rack(id, ROOM_A, 10.0, 0.0)
    }
}

pub fn device(id: &str, rack: &str, u_start: i32, u_height: i32) -> Device {
    Device {
        id: DeviceId::new(id),
        rack_id: RackId::new(rack),
        device_type_id: DeviceTypeId::new("dt-1u-server"),
        logical_equipment_id: LogicalEquipmentId::new(format!("asset-{id}")),
        name: format!("srv-{id}"),
        u_start,
        u_height,
        status_4d: Status4D::ExistingRetained,
        power_kw: 0.4,
        updated_at: None,
    }
}

pub fn device_with_status(
    id: &str,
    rack: &str,
    u_start: i32,
    u_height: i32,
    status: Status4D,
) -> Device {
    Device {
        status_4d: status,
        ..device(id, rack, u_start, u_height)
    }
}

/// Single-room snapshot
pub fn snapshot(racks: Vec<Rack>, devices: Vec<Device>) -> FacilitySnapshot {
    FacilitySnapshot::new(vec![room(ROOM_A)], racks, devices)
}

pub fn rack_ids(ids: &[&str]) -> Vec<RackId> {
    ids.iter().map(|id| RackId::new(*id)).collect()
}
