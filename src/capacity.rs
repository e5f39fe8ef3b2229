// Copyright (c) 2025 - Cowboy AI, Inc.
//! Capacity Search Engine ("AI-ready capacity")
//!
//! Recommends a contiguous group of racks inside one room for a dense new
//! deployment, trading free rack units against electrical headroom.
//!
//! # Algorithm
//!
//! ```text
//! for room in rooms (ascending room id):
//!     racks = room racks sorted by (name, id)
//!     for size in min_block_size..=max_block_size (≤ rack count):
//!         for every window of `size` consecutive racks:
//!             free_u     = Σ (u_height - Σ visible device heights)
//!             headroom   = Σ (limit - current_power)
//!             reject if headroom / size < min_avg_headroom_kw
//!             score      = free_u + power_weight × headroom
//! best = highest score; ties keep the earliest block in the order above
//! ```
//!
//! Rack-name order is only a proxy for physical adjacency. The enumeration
//! order is fully determined by ids and names, so the result does not
//! depend on the order racks appear in the snapshot.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::config::CapacitySearchConfig;
use crate::domain::{clamp_height, Device, Phase, Rack, RackId, RoomId, SiteId};
use crate::snapshot::FacilitySnapshot;
use crate::visibility::phase_allows;

/// Space and power left in one rack under a phase
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RackUtilization {
    pub rack_id: RackId,
    pub used_u: i32,
    pub free_u: i32,
    pub power_headroom_kw: f64,
}

/// Occupied units count every device the phase shows, including removed
/// ones in [`Phase::AsIs`] where they are still physically present.
pub fn rack_utilization(rack: &Rack, devices: &[Device], phase: Phase) -> RackUtilization {
    let used_u: i32 = devices
        .iter()
        .filter(|d| d.rack_id == rack.id && phase_allows(phase, d.status_4d))
        .map(|d| clamp_height(d.u_height))
        .sum();

    RackUtilization {
        rack_id: rack.id.clone(),
        used_u,
        free_u: rack.u_height - used_u,
        power_headroom_kw: rack.power_headroom_kw(),
    }
}

/// Recommended block of contiguous racks
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacitySuggestion {
    pub room_id: RoomId,
    pub rack_ids: Vec<RackId>,
    pub total_free_u: i32,
    pub total_power_headroom_kw: f64,
    pub score: f64,
    pub summary: String,
}

impl CapacitySuggestion {
    pub fn average_headroom_kw(&self) -> f64 {
        self.total_power_headroom_kw / self.rack_ids.len() as f64
    }
}

/// Capacity search bound to a configuration
#[derive(Debug, Clone, Copy)]
pub struct CapacitySearch<'a> {
    config: &'a CapacitySearchConfig,
}

impl<'a> CapacitySearch<'a> {
    pub fn new(config: &'a CapacitySearchConfig) -> Self {
        Self { config }
    }

    /// Best block across all rooms, or `None` if nothing clears the power floor
    pub fn find_best(&self, snapshot: &FacilitySnapshot, phase: Phase) -> Option<CapacitySuggestion> {
        let mut best: Option<CapacitySuggestion> = None;
        self.for_each_accepted(snapshot, phase, |candidate| {
            if best.as_ref().map_or(true, |b| candidate.score > b.score) {
                best = Some(candidate);
            }
        });

        match &best {
            Some(suggestion) => info!(
                phase = %phase,
                room = %suggestion.room_id,
                racks = suggestion.rack_ids.len(),
                score = suggestion.score,
                "selected capacity block"
            ),
            None => info!(phase = %phase, "no rack block clears the power floor"),
        }
        best
    }

    /// Up to `limit` accepted blocks, best first
    ///
    /// Equal scores keep enumeration order, so the first element always
    /// equals [`CapacitySearch::find_best`].
    pub fn rank(
        &self,
        snapshot: &FacilitySnapshot,
        phase: Phase,
        limit: usize,
    ) -> Vec<CapacitySuggestion> {
        let mut accepted = Vec::new();
        self.for_each_accepted(snapshot, phase, |candidate| accepted.push(candidate));
        accepted.sort_by(|a, b| b.score.total_cmp(&a.score));
        accepted.truncate(limit);
        accepted
    }

    fn for_each_accepted<F>(&self, snapshot: &FacilitySnapshot, phase: Phase, mut visit: F)
    where
        F: FnMut(CapacitySuggestion),
    {
        for (room_id, racks) in racks_by_room(&snapshot.racks) {
            let room_name = snapshot
                .room(room_id)
                .map_or_else(|| room_id.to_string(), |room| room.name.clone());
            let utilization: Vec<RackUtilization> = racks
                .iter()
                .map(|rack| rack_utilization(rack, &snapshot.devices, phase))
                .collect();

            let max_size = self.config.max_block_size.min(racks.len());
            for size in self.config.min_block_size.max(1)..=max_size {
                for start in 0..=(racks.len() - size) {
                    let window = &utilization[start..start + size];
                    let total_free_u: i32 = window.iter().map(|u| u.free_u).sum();
                    let total_power_headroom_kw: f64 =
                        window.iter().map(|u| u.power_headroom_kw).sum();
                    let average = total_power_headroom_kw / size as f64;

                    if average < self.config.min_avg_headroom_kw {
                        debug!(
                            room = %room_id,
                            first = %window[0].rack_id,
                            size,
                            average_headroom_kw = average,
                            "rejected block below power floor"
                        );
                        continue;
                    }

                    let score =
                        f64::from(total_free_u) + self.config.power_weight * total_power_headroom_kw;
                    let names: Vec<&str> = racks[start..start + size]
                        .iter()
                        .map(|rack| rack.name.as_str())
                        .collect();
                    debug!(room = %room_id, racks = ?names, score, "accepted block");

                    visit(CapacitySuggestion {
                        room_id: room_id.clone(),
                        rack_ids: window.iter().map(|u| u.rack_id.clone()).collect(),
                        total_free_u,
                        total_power_headroom_kw,
                        score,
                        summary: summarize(&room_name, &names, total_free_u, total_power_headroom_kw),
                    });
                }
            }
        }
    }
}

fn racks_by_room(racks: &[Rack]) -> BTreeMap<&RoomId, Vec<&Rack>> {
    let mut rooms: BTreeMap<&RoomId, Vec<&Rack>> = BTreeMap::new();
    for rack in racks {
        rooms.entry(&rack.room_id).or_default().push(rack);
    }
    for racks in rooms.values_mut() {
        racks.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
    }
    rooms
}

fn summarize(room_name: &str, names: &[&str], free_u: i32, headroom_kw: f64) -> String {
    let span = match (names.first(), names.last()) {
        (Some(first), Some(last)) => format!("{first}..{last}"),
        _ => String::new(),
    };
    format!(
        "{} contiguous racks in {room_name} ({span}): {free_u}U free, {headroom_kw:.1} kW power headroom",
        names.len()
    )
}

/// Best block using the default search parameters
pub fn find_best_capacity_block(
    snapshot: &FacilitySnapshot,
    phase: Phase,
) -> Option<CapacitySuggestion> {
    let config = CapacitySearchConfig::default();
    CapacitySearch::new(&config).find_best(snapshot, phase)
}

/// Top `limit` blocks using the default search parameters
pub fn rank_capacity_blocks(
    snapshot: &FacilitySnapshot,
    phase: Phase,
    limit: usize,
) -> Vec<CapacitySuggestion> {
    let config = CapacitySearchConfig::default();
    CapacitySearch::new(&config).rank(snapshot, phase, limit)
}

/// Derived site counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteCapacityCounters {
    pub site_id: SiteId,
    pub rack_count: u32,
    pub ai_ready_racks: u32,
}

/// `rackCount` and `aiReadyRacks` per site
///
/// A rack is AI-ready when it has free space and its own headroom meets the
/// per-rack floor used by the block search. Racks whose hierarchy cannot be
/// resolved to a site are skipped.
pub fn site_capacity_counters(
    snapshot: &FacilitySnapshot,
    phase: Phase,
    config: &CapacitySearchConfig,
) -> Vec<SiteCapacityCounters> {
    let mut by_site: BTreeMap<SiteId, (u32, u32)> = BTreeMap::new();
    for rack in &snapshot.racks {
        let Some(site_id) = snapshot.site_of_rack(&rack.id) else {
            debug!(rack = %rack.id, "rack has no resolvable site");
            continue;
        };
        let utilization = rack_utilization(rack, &snapshot.devices, phase);
        let ready = utilization.free_u > 0
            && utilization.power_headroom_kw >= config.min_avg_headroom_kw;

        let counters = by_site.entry(site_id.clone()).or_default();
        counters.0 += 1;
        if ready {
            counters.1 += 1;
        }
    }

    by_site
        .into_iter()
        .map(|(site_id, (rack_count, ai_ready_racks))| SiteCapacityCounters {
            site_id,
            rack_count,
            ai_ready_racks,
        })
        .collect()
}
