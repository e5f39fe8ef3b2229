// Copyright (c) 2025 - Cowboy AI, Inc.
//! Placement Validator
//!
//! Decides whether a device may be slotted into a rack at a given U position.
//!
//! # Check Order
//!
//! 1. **Structural** (fatal, short-circuit): rack exists, U position within
//!    `[1, rack.u_height]`, device top within the rack
//! 2. **Conflicts**: one error per overlapping non-removed device; scanning
//!    continues so every collision is reported
//! 3. **Advisories**: power headroom and GPU cooling warnings, which never
//!    affect validity
//!
//! The validator is pure: identical inputs always give identical results.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::config::PlannerConfig;
use crate::domain::{clamp_height, Device, DeviceId, DeviceType, Rack, RackId, URange};

/// Error that makes a placement invalid
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlacementError {
    #[error("target rack {rack_id} not found")]
    RackNotFound { rack_id: RackId },

    #[error("U position must be between 1 and {rack_height}")]
    UPositionOutOfBounds { u_start: i32, rack_height: i32 },

    #[error("device of {device_height}U at U{u_start} would reach U{top}, exceeding rack height of {rack_height}U")]
    ExceedsRackHeight {
        u_start: i32,
        device_height: i32,
        top: i32,
        rack_height: i32,
    },

    #[error("conflicts with {device_name} ({device_id}) at {range}")]
    Conflict {
        device_id: DeviceId,
        device_name: String,
        range: URange,
    },
}

/// Advisory that never blocks a placement
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlacementWarning {
    #[error("projected load of {projected_kw:.2} kW exceeds rack power capacity of {limit_kw:.2} kW")]
    ExceedsPowerCapacity { projected_kw: f64, limit_kw: f64 },

    #[error("projected load of {projected_kw:.2} kW is within {band_pct:.0}% of power limit ({limit_kw:.2} kW)")]
    NearPowerLimit {
        projected_kw: f64,
        limit_kw: f64,
        band_pct: f64,
    },

    #[error("rack {rack_name} has no power capacity configured; projected load is {projected_kw:.2} kW")]
    PowerCapacityUnconfigured { rack_name: String, projected_kw: f64 },

    #[error("{device_name} is a GPU workload: verify cooling capacity and power redundancy")]
    GpuWorkload { device_name: String },
}

/// Outcome of a placement check
///
/// `valid` is true iff `errors` is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementValidation {
    valid: bool,
    errors: Vec<PlacementError>,
    warnings: Vec<PlacementWarning>,
}

impl PlacementValidation {
    fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn push_error(&mut self, error: PlacementError) {
        self.valid = false;
        self.errors.push(error);
    }

    fn push_warning(&mut self, warning: PlacementWarning) {
        self.warnings.push(warning);
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn errors(&self) -> &[PlacementError] {
        &self.errors
    }

    pub fn warnings(&self) -> &[PlacementWarning] {
        &self.warnings
    }

    /// True if any error is a collision with another device
    pub fn has_conflicts(&self) -> bool {
        self.errors
            .iter()
            .any(|e| matches!(e, PlacementError::Conflict { .. }))
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }
}

/// Placement validator bound to a configuration and an optional device catalog
#[derive(Debug, Clone, Copy)]
pub struct PlacementValidator<'a> {
    config: &'a PlannerConfig,
    device_types: &'a [DeviceType],
}

impl<'a> PlacementValidator<'a> {
    pub fn new(config: &'a PlannerConfig) -> Self {
        Self {
            config,
            device_types: &[],
        }
    }

    /// Use catalog entries when deciding whether a device is a GPU workload
    pub fn with_catalog(mut self, device_types: &'a [DeviceType]) -> Self {
        self.device_types = device_types;
        self
    }

    /// Bound catalog, or `catalog` when none was bound
    pub(crate) fn or_catalog<'b>(&self, catalog: &'b [DeviceType]) -> PlacementValidator<'b>
    where
        'a: 'b,
    {
        PlacementValidator {
            config: self.config,
            device_types: if self.device_types.is_empty() {
                catalog
            } else {
                self.device_types
            },
        }
    }

    /// Check placing `device` at `target_u_start` in `target_rack_id`
    pub fn validate(
        &self,
        device: &Device,
        target_rack_id: &RackId,
        target_u_start: i32,
        devices: &[Device],
        racks: &[Rack],
    ) -> PlacementValidation {
        let mut result = PlacementValidation::new();

        let Some(rack) = racks.iter().find(|rack| &rack.id == target_rack_id) else {
            result.push_error(PlacementError::RackNotFound {
                rack_id: target_rack_id.clone(),
            });
            return result;
        };

        if target_u_start < 1 || target_u_start > rack.u_height {
            result.push_error(PlacementError::UPositionOutOfBounds {
                u_start: target_u_start,
                rack_height: rack.u_height,
            });
            return result;
        }

        let device_height = clamp_height(device.u_height);
        let candidate = URange::from_start_height(target_u_start, device_height);
        if candidate.end() > rack.u_height {
            result.push_error(PlacementError::ExceedsRackHeight {
                u_start: target_u_start,
                device_height,
                top: candidate.end(),
                rack_height: rack.u_height,
            });
            return result;
        }

        for occupant in occupants(devices, &rack.id, Some(&device.id)) {
            let range = occupant.range();
            if range.overlaps(&candidate) {
                debug!(
                    device = %device.id,
                    rack = %rack.id,
                    conflict = %occupant.id,
                    %range,
                    "placement conflict"
                );
                result.push_error(PlacementError::Conflict {
                    device_id: occupant.id.clone(),
                    device_name: occupant.name.clone(),
                    range,
                });
            }
        }

        if let Some(warning) = self.power_advisory(device, rack) {
            result.push_warning(warning);
        }

        if self.is_gpu_workload(device) {
            result.push_warning(PlacementWarning::GpuWorkload {
                device_name: device.name.clone(),
            });
        }

        result
    }

    fn power_advisory(&self, device: &Device, rack: &Rack) -> Option<PlacementWarning> {
        let projected_kw = projected_rack_power_kw(device, rack);

        match rack.configured_limit_kw() {
            None => Some(PlacementWarning::PowerCapacityUnconfigured {
                rack_name: rack.name.clone(),
                projected_kw,
            }),
            Some(limit_kw) if projected_kw > limit_kw => {
                Some(PlacementWarning::ExceedsPowerCapacity {
                    projected_kw,
                    limit_kw,
                })
            }
            Some(limit_kw) if projected_kw >= limit_kw * (1.0 - self.config.power_warning_ratio) => {
                Some(PlacementWarning::NearPowerLimit {
                    projected_kw,
                    limit_kw,
                    band_pct: self.config.power_warning_ratio * 100.0,
                })
            }
            Some(_) => None,
        }
    }

    fn is_gpu_workload(&self, device: &Device) -> bool {
        if self.config.mentions_gpu(device.device_type_id.as_str()) {
            return true;
        }
        self.device_types
            .iter()
            .find(|dt| dt.id == device.device_type_id)
            .is_some_and(|dt| {
                dt.is_gpu()
                    || self.config.mentions_gpu(dt.category.as_str())
                    || self.config.mentions_gpu(&dt.model)
            })
    }
}

/// Rack load after moving `device` into `rack`
///
/// The device's current draw is subtracted first when it already sits in
/// this rack, so re-slotting within a rack does not double count.
pub fn projected_rack_power_kw(device: &Device, rack: &Rack) -> f64 {
    let existing = if device.rack_id == rack.id {
        device.power_kw
    } else {
        0.0
    };
    rack.current_power_kw - existing + device.power_kw
}

/// Non-removed devices in `rack_id`, optionally skipping one device
pub(crate) fn occupants<'a>(
    devices: &'a [Device],
    rack_id: &'a RackId,
    exclude: Option<&'a DeviceId>,
) -> impl Iterator<Item = &'a Device> + 'a {
    devices.iter().filter(move |d| {
        &d.rack_id == rack_id && d.occupies_space() && exclude.map_or(true, |id| &d.id != id)
    })
}

/// Validate with default configuration and no catalog
pub fn validate_placement(
    device: &Device,
    target_rack_id: &RackId,
    target_u_start: i32,
    devices: &[Device],
    racks: &[Rack],
) -> PlacementValidation {
    let config = PlannerConfig::default();
    PlacementValidator::new(&config).validate(device, target_rack_id, target_u_start, devices, racks)
}
