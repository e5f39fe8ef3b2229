// Copyright (c) 2025 - Cowboy AI, Inc.
//! Move Planning
//!
//! Turns a validated placement into the candidate values the persistence
//! layer would commit: the relocated device and the rack power aggregates
//! it has to recompute. Nothing in the snapshot is touched.

use serde::Serialize;
use tracing::info;

use crate::domain::{Device, RackId};
use crate::snapshot::FacilitySnapshot;

use super::validator::{PlacementValidation, PlacementValidator};

/// Cached rack power before and after a planned move
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RackPowerChange {
    pub rack_id: RackId,
    pub current_kw: f64,
    pub projected_kw: f64,
}

/// Result of planning a device move
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovePlan {
    pub validation: PlacementValidation,

    /// Present only when the placement is valid
    pub updated_device: Option<Device>,

    /// Rack power aggregates the caller must persist alongside the device
    pub power_changes: Vec<RackPowerChange>,
}

impl MovePlan {
    pub fn is_valid(&self) -> bool {
        self.validation.is_valid()
    }
}

impl PlacementValidator<'_> {
    /// Validate a move against `snapshot` and build the candidate result
    pub fn plan_move(
        &self,
        snapshot: &FacilitySnapshot,
        device: &Device,
        target_rack_id: &RackId,
        target_u_start: i32,
    ) -> MovePlan {
        let validation = self.or_catalog(&snapshot.device_types).validate(
            device,
            target_rack_id,
            target_u_start,
            &snapshot.devices,
            &snapshot.racks,
        );

        if !validation.is_valid() {
            return MovePlan {
                validation,
                updated_device: None,
                power_changes: Vec::new(),
            };
        }

        let mut power_changes = Vec::with_capacity(2);
        let same_rack = &device.rack_id == target_rack_id;
        if !same_rack {
            if let Some(source) = snapshot.rack(&device.rack_id) {
                power_changes.push(RackPowerChange {
                    rack_id: source.id.clone(),
                    current_kw: source.current_power_kw,
                    projected_kw: source.current_power_kw - device.power_kw,
                });
            }
        }
        if let Some(target) = snapshot.rack(target_rack_id) {
            power_changes.push(RackPowerChange {
                rack_id: target.id.clone(),
                current_kw: target.current_power_kw,
                projected_kw: super::validator::projected_rack_power_kw(device, target),
            });
        }

        info!(
            device = %device.id,
            from = %device.rack_id,
            to = %target_rack_id,
            u_start = target_u_start,
            "planned device move"
        );

        MovePlan {
            validation,
            updated_device: Some(device.relocated(target_rack_id.clone(), target_u_start)),
            power_changes,
        }
    }
}
