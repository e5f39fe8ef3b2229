//! Rack capacity and placement engine for data-center digital twins
//!
//! Pure, synchronous functions over an immutable [`FacilitySnapshot`]:
//! placement validation, free-slot enumeration, phase visibility and the
//! contiguous-block capacity search. Nothing here performs I/O or mutates
//! the snapshot; callers commit the returned candidates themselves.

pub mod capacity;
pub mod config;
pub mod domain;
pub mod errors;
pub mod placement;
pub mod snapshot;
pub mod visibility;

// Re-export commonly used types
pub use capacity::{
    find_best_capacity_block, rank_capacity_blocks, site_capacity_counters, CapacitySearch,
    CapacitySuggestion, RackUtilization, SiteCapacityCounters,
};
pub use config::{CapacitySearchConfig, PlannerConfig};
pub use domain::{Device, DeviceId, Phase, Rack, RackId, Room, RoomId, Status4D};
pub use errors::{CapacityError, CapacityResult};
pub use placement::{
    available_slots, validate_placement, MovePlan, PlacementError, PlacementValidation,
    PlacementValidator, PlacementWarning,
};
pub use snapshot::FacilitySnapshot;
pub use visibility::{is_device_visible, visible_statuses, StatusToggles};
