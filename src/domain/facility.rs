// Copyright (c) 2025 - Cowboy AI, Inc.
//! Facility Hierarchy Entities
//!
//! Site → Building → Floor → Room → Rack → Device. Each entity points to its
//! parent by id; the snapshot owns all of them in flat collections.
//!
//! # Invariants
//! - `1 <= device.u_start` and `device.u_start + device.u_height - 1 <= rack.u_height`
//! - Non-removed devices in the same rack never overlap
//! - `rack.current_power_kw` is a cached aggregate maintained by the
//!   persistence layer, never recomputed here

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    BuildingId, DeviceId, DeviceTypeId, FloorId, LogicalEquipmentId, RackId, RoomId, SiteId,
    Status4D, URange,
};

/// Placement transform relative to the parent's coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    pub position: [f64; 3],
    pub rotation: [f64; 3],
    pub scale: [f64; 3],
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
        }
    }
}

/// WGS84 coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Operational status of a site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SiteStatus {
    #[default]
    Operational,
    Construction,
    Planned,
    Decommissioned,
}

/// Data-center site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: SiteId,
    pub name: String,

    #[serde(default)]
    pub region: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<GeoCoordinates>,

    #[serde(default)]
    pub rack_count: u32,

    #[serde(default)]
    pub ai_ready_racks: u32,

    #[serde(default)]
    pub status: SiteStatus,

    /// Pointer to the site's scene/config resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_ref: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    pub id: BuildingId,
    pub site_id: SiteId,
    pub name: String,

    #[serde(default)]
    pub transform: Transform,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Floor {
    pub id: FloorId,
    pub building_id: BuildingId,
    pub name: String,

    /// 0 = ground, negative = below grade
    #[serde(default)]
    pub level: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation_m: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,

    /// Absent in legacy data until snapshot normalization assigns a default floor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_id: Option<FloorId>,

    pub name: String,

    #[serde(default)]
    pub transform: Transform,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_m2: Option<f64>,
}

/// Equipment rack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rack {
    pub id: RackId,
    pub room_id: RoomId,
    pub name: String,

    /// Total rack-unit capacity
    #[serde(default = "default_rack_height")]
    pub u_height: i32,

    #[serde(default)]
    pub transform: Transform,

    /// `None` (or a non-positive value) means no limit has been configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_kw_limit: Option<f64>,

    #[serde(default)]
    pub current_power_kw: f64,
}

fn default_rack_height() -> i32 {
    Rack::STANDARD_HEIGHT
}

impl Rack {
    /// Standard full-height rack
    pub const STANDARD_HEIGHT: i32 = 42;

    /// Configured power limit, if any
    pub fn configured_limit_kw(&self) -> Option<f64> {
        self.power_kw_limit.filter(|limit| *limit > 0.0)
    }

    /// `limit - current`; an unconfigured limit counts as zero
    pub fn power_headroom_kw(&self) -> f64 {
        self.configured_limit_kw().unwrap_or(0.0) - self.current_power_kw
    }
}

/// Installed (or planned) device record
///
/// Several records may share a `logical_equipment_id` when one asset is
/// represented in different phases or positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: DeviceId,
    pub rack_id: RackId,
    pub device_type_id: DeviceTypeId,
    pub logical_equipment_id: LogicalEquipmentId,
    pub name: String,

    /// 1-based lowest occupied slot
    pub u_start: i32,

    /// Slot span; values below one are treated as one
    #[serde(default = "default_device_height")]
    pub u_height: i32,

    #[serde(rename = "status4D")]
    pub status_4d: Status4D,

    #[serde(default)]
    pub power_kw: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_device_height() -> i32 {
    1
}

impl Device {
    /// Range of units this device occupies
    pub fn range(&self) -> URange {
        URange::from_start_height(self.u_start, self.u_height)
    }

    /// Removed devices are logically absent and never block space
    pub fn occupies_space(&self) -> bool {
        !self.status_4d.is_removed()
    }

    /// Candidate copy of this device placed at a new position
    pub fn relocated(&self, rack_id: RackId, u_start: i32) -> Self {
        Self {
            rack_id,
            u_start,
            ..self.clone()
        }
    }
}
