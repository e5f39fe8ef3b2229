// Copyright (c) 2025 - Cowboy AI, Inc.
//! Capacity Report
//!
//! Loads a facility snapshot document, runs the integrity checks and the
//! AI-ready capacity search for one phase, and prints the result as JSON.
//!
//! Run with: cargo run --bin capacity-report -- path/to/snapshot.json
//!
//! Environment:
//! - `SNAPSHOT_PATH` - snapshot file (overridden by the first argument)
//! - `PHASE` - AS_IS, TO_BE or FUTURE (default AS_IS)
//! - `REPORT_TOP` - number of ranked blocks to list (default 5)
//! - `TWIN_*` - engine tuning, see `PlannerConfig::from_env`

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use tracing::{info, warn};
use twin_capacity::{
    capacity::site_capacity_counters, domain::check_snapshot_integrity, CapacitySearch,
    FacilitySnapshot, Phase, PlannerConfig,
};

/// Configuration for a report run
#[derive(Debug, Clone)]
struct ReportConfig {
    snapshot_path: String,
    phase: Phase,
    top: usize,
    planner: PlannerConfig,
}

impl ReportConfig {
    /// Load configuration from arguments and environment variables
    fn from_env() -> Result<Self> {
        let snapshot_path = std::env::args()
            .nth(1)
            .or_else(|| std::env::var("SNAPSHOT_PATH").ok())
            .context("no snapshot given: pass a path or set SNAPSHOT_PATH")?;

        let phase = match std::env::var("PHASE") {
            Ok(raw) => raw.parse().context("PHASE is not a valid phase")?,
            Err(_) => Phase::AsIs,
        };

        let top = match std::env::var("REPORT_TOP") {
            Ok(raw) => raw.parse().context("REPORT_TOP must be a number")?,
            Err(_) => 5,
        };

        let planner = PlannerConfig::from_env().context("invalid engine configuration")?;

        Ok(Self {
            snapshot_path,
            phase,
            top,
            planner,
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    phase: Phase,
    best: Option<twin_capacity::CapacitySuggestion>,
    ranked: Vec<twin_capacity::CapacitySuggestion>,
    sites: Vec<twin_capacity::SiteCapacityCounters>,
    integrity: Vec<twin_capacity::domain::InvariantViolation>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ReportConfig::from_env()?;
    info!("📋 Configuration loaded:");
    info!("  - Snapshot: {}", config.snapshot_path);
    info!("  - Phase: {}", config.phase);
    info!("  - Ranked blocks: {}", config.top);

    let file = File::open(&config.snapshot_path)
        .with_context(|| format!("failed to open {}", config.snapshot_path))?;
    let snapshot = FacilitySnapshot::from_reader(BufReader::new(file))
        .context("failed to load facility snapshot")?;
    info!(
        "✅ Loaded {} racks and {} devices in {} rooms",
        snapshot.racks.len(),
        snapshot.devices.len(),
        snapshot.rooms.len()
    );

    let integrity = check_snapshot_integrity(
        &snapshot.devices,
        &snapshot.racks,
        config.phase,
        config.planner.power_drift_tolerance_kw,
    );
    if !integrity.is_empty() {
        warn!("⚠️ {} integrity findings", integrity.len());
    }

    let search = CapacitySearch::new(&config.planner.capacity);
    let best = search.find_best(&snapshot, config.phase);
    let ranked = search.rank(&snapshot, config.phase, config.top);
    let sites = site_capacity_counters(&snapshot, config.phase, &config.planner.capacity);

    match &best {
        Some(suggestion) => info!("🏁 {}", suggestion.summary),
        None => info!("🏁 No suitable capacity in phase {}", config.phase),
    }

    let report = Report {
        phase: config.phase,
        best,
        ranked,
        sites,
        integrity,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("failed to render report")?
    );
    Ok(())
}
