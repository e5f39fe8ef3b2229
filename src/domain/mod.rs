// Copyright (c) 2025 - Cowboy AI, Inc.
//! Facility Domain Models
//!
//! Typed entities for the physical hierarchy and the 4D life-cycle
//! vocabulary. No I/O; the only behavior is derived values (ranges,
//! headroom) and pure invariant checks.
//!
//! # Value Objects
//!
//! - [`URange`] - closed rack-unit interval with overlap test
//! - [`Status4D`] / [`Phase`] - closed life-cycle vocabularies
//! - Identity newtypes ([`RackId`], [`DeviceId`], ...)
//!
//! # Entities
//!
//! - [`Site`] → [`Building`] → [`Floor`] → [`Room`] → [`Rack`] → [`Device`]
//! - [`DeviceType`] - catalog entry

pub mod device_type;
pub mod facility;
pub mod ids;
pub mod invariants;
pub mod rack_units;
pub mod status;

pub use device_type::{DeviceCategory, DeviceType};
pub use facility::{
    Building, Device, Floor, GeoCoordinates, Rack, Room, Site, SiteStatus, Transform,
};
pub use ids::{
    BuildingId, DeviceId, DeviceTypeId, FloorId, LogicalEquipmentId, RackId, RoomId, SiteId,
};
pub use invariants::{check_snapshot_integrity, InvariantViolation};
pub use rack_units::{clamp_height, URange};
pub use status::{Phase, Status4D, VocabularyError};
