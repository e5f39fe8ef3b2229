// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! Occupancy, boundary and phase properties of the placement engine, and
//! floor/determinism properties of the capacity search.

mod capacity_search;
mod placement;
