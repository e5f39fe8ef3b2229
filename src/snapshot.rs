// Copyright (c) 2025 - Cowboy AI, Inc.
//! Facility Snapshot
//!
//! Immutable, in-memory view of the facility handed to every engine call.
//! Writers produce a new snapshot instead of mutating one in use.
//!
//! Legacy documents may omit the building/floor levels. [`FacilitySnapshot::normalize`]
//! patches those gaps once at ingestion so consumers can always walk the
//! full Site → Building → Floor → Room chain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;
use tracing::{debug, warn};

use crate::domain::{
    Building, BuildingId, Device, DeviceId, DeviceType, DeviceTypeId, Floor, FloorId, Rack,
    RackId, Room, RoomId, Site, SiteId, SiteStatus, Transform,
};
use crate::errors::{CapacityError, CapacityResult};

pub const DEFAULT_SITE_ID: &str = "default-site";
pub const DEFAULT_BUILDING_ID: &str = "default-building";
pub const DEFAULT_FLOOR_ID: &str = "default-floor";

/// Read-only facility state consumed by the engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilitySnapshot {
    #[serde(default)]
    pub sites: Vec<Site>,

    #[serde(default)]
    pub buildings: Vec<Building>,

    #[serde(default)]
    pub floors: Vec<Floor>,

    #[serde(default)]
    pub rooms: Vec<Room>,

    #[serde(default)]
    pub racks: Vec<Rack>,

    #[serde(default)]
    pub devices: Vec<Device>,

    #[serde(default)]
    pub device_types: Vec<DeviceType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<DateTime<Utc>>,
}

impl FacilitySnapshot {
    /// Build a normalized snapshot from the three collections the engine needs
    pub fn new(rooms: Vec<Room>, racks: Vec<Rack>, devices: Vec<Device>) -> Self {
        Self {
            rooms,
            racks,
            devices,
            ..Self::default()
        }
        .normalize()
    }

    /// Parse and normalize a JSON snapshot document
    pub fn from_json(json: &str) -> CapacityResult<Self> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.ingest()
    }

    /// Parse and normalize a JSON snapshot from a reader
    pub fn from_reader<R: Read>(reader: R) -> CapacityResult<Self> {
        let snapshot: Self = serde_json::from_reader(reader)?;
        snapshot.ingest()
    }

    fn ingest(self) -> CapacityResult<Self> {
        self.check_unique_ids()?;
        Ok(self.normalize())
    }

    /// Fill in synthetic default building/floor records for legacy data
    ///
    /// - Rooms without a floor, or pointing at an unknown one, are attached
    ///   to [`DEFAULT_FLOOR_ID`]
    /// - Floors pointing at an unknown building are attached to [`DEFAULT_BUILDING_ID`]
    /// - The default building belongs to the first site, or to a synthetic
    ///   [`DEFAULT_SITE_ID`] when the snapshot has none
    ///
    /// Normalizing an already normalized snapshot is a no-op.
    pub fn normalize(mut self) -> Self {
        let default_floor = FloorId::new(DEFAULT_FLOOR_ID);
        let default_building = BuildingId::new(DEFAULT_BUILDING_ID);

        let known_floors: HashSet<FloorId> = self.floors.iter().map(|f| f.id.clone()).collect();
        let mut orphan_rooms = 0usize;
        for room in &mut self.rooms {
            let attached = room
                .floor_id
                .as_ref()
                .is_some_and(|floor_id| known_floors.contains(floor_id));
            if attached {
                continue;
            }
            if let Some(floor_id) = room.floor_id.as_ref().filter(|id| **id != default_floor) {
                debug!(
                    room = %room.id,
                    floor = %floor_id,
                    "room references unknown floor, attaching to {}",
                    DEFAULT_FLOOR_ID
                );
            }
            room.floor_id = Some(default_floor.clone());
            orphan_rooms += 1;
        }
        if orphan_rooms > 0 && !self.floors.iter().any(|f| f.id == default_floor) {
            warn!(
                rooms = orphan_rooms,
                "snapshot has rooms without a floor, synthesizing {}", DEFAULT_FLOOR_ID
            );
            self.floors.push(Floor {
                id: default_floor,
                building_id: default_building.clone(),
                name: "Default Floor".to_string(),
                level: 0,
                elevation_m: None,
            });
        }

        let known_buildings: HashSet<BuildingId> =
            self.buildings.iter().map(|b| b.id.clone()).collect();
        let mut needs_default_building = false;
        for floor in &mut self.floors {
            if !known_buildings.contains(&floor.building_id) {
                if floor.building_id != default_building {
                    debug!(
                        floor = %floor.id,
                        building = %floor.building_id,
                        "floor references unknown building, attaching to {}",
                        DEFAULT_BUILDING_ID
                    );
                }
                floor.building_id = default_building.clone();
                needs_default_building = true;
            }
        }

        if needs_default_building {
            let site_id = match self.sites.first() {
                Some(site) => site.id.clone(),
                None => {
                    warn!("snapshot has no sites, synthesizing {}", DEFAULT_SITE_ID);
                    let site = Site {
                        id: SiteId::new(DEFAULT_SITE_ID),
                        name: "Default Site".to_string(),
                        region: String::new(),
                        coordinates: None,
                        rack_count: 0,
                        ai_ready_racks: 0,
                        status: SiteStatus::default(),
                        scene_ref: None,
                    };
                    let id = site.id.clone();
                    self.sites.push(site);
                    id
                }
            };
            warn!("synthesizing {} for site {}", DEFAULT_BUILDING_ID, site_id);
            self.buildings.push(Building {
                id: default_building,
                site_id,
                name: "Default Building".to_string(),
                transform: Transform::default(),
            });
        }

        self
    }

    fn check_unique_ids(&self) -> CapacityResult<()> {
        ensure_unique("site", self.sites.iter().map(|s| s.id.as_str()))?;
        ensure_unique("room", self.rooms.iter().map(|r| r.id.as_str()))?;
        ensure_unique("rack", self.racks.iter().map(|r| r.id.as_str()))?;
        ensure_unique("device", self.devices.iter().map(|d| d.id.as_str()))
    }

    pub fn rack(&self, id: &RackId) -> Option<&Rack> {
        self.racks.iter().find(|rack| &rack.id == id)
    }

    pub fn device(&self, id: &DeviceId) -> Option<&Device> {
        self.devices.iter().find(|device| &device.id == id)
    }

    pub fn room(&self, id: &RoomId) -> Option<&Room> {
        self.rooms.iter().find(|room| &room.id == id)
    }

    pub fn device_type(&self, id: &DeviceTypeId) -> Option<&DeviceType> {
        self.device_types.iter().find(|dt| &dt.id == id)
    }

    /// Devices recorded in `rack_id`, regardless of status
    pub fn devices_in_rack<'a>(&'a self, rack_id: &'a RackId) -> impl Iterator<Item = &'a Device> {
        self.devices.iter().filter(move |d| &d.rack_id == rack_id)
    }

    pub fn racks_in_room<'a>(&'a self, room_id: &'a RoomId) -> impl Iterator<Item = &'a Rack> {
        self.racks.iter().filter(move |r| &r.room_id == room_id)
    }

    /// Site owning `rack_id`, walking Room → Floor → Building
    pub fn site_of_rack(&self, rack_id: &RackId) -> Option<&SiteId> {
        let rack = self.rack(rack_id)?;
        let room = self.room(&rack.room_id)?;
        let floor_id = room.floor_id.as_ref()?;
        let floor = self.floors.iter().find(|f| &f.id == floor_id)?;
        let building = self.buildings.iter().find(|b| b.id == floor.building_id)?;
        Some(&building.site_id)
    }
}

fn ensure_unique<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> CapacityResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CapacityError::InvalidSnapshot(format!(
                "duplicate {kind} id {id}"
            )));
        }
    }
    Ok(())
}
