// Copyright (c) 2025 - Cowboy AI, Inc.
//! Engine tuning configuration
//!
//! Defaults reproduce the planning rules used by the facility tooling. Every
//! knob can be overridden from a JSON/TOML document (serde) or from
//! `TWIN_*` environment variables.

use serde::{Deserialize, Serialize};

use crate::errors::{CapacityError, CapacityResult};

/// Capacity search parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacitySearchConfig {
    /// Smallest contiguous block considered
    #[serde(default = "default_min_block_size")]
    pub min_block_size: usize,

    /// Largest contiguous block considered (inclusive)
    #[serde(default = "default_max_block_size")]
    pub max_block_size: usize,

    /// Blocks whose average per-rack headroom falls below this are rejected
    #[serde(default = "default_min_avg_headroom_kw")]
    pub min_avg_headroom_kw: f64,

    /// Score = free U + `power_weight` × headroom kW
    #[serde(default = "default_power_weight")]
    pub power_weight: f64,
}

fn default_min_block_size() -> usize {
    3
}

fn default_max_block_size() -> usize {
    6
}

fn default_min_avg_headroom_kw() -> f64 {
    2.0
}

fn default_power_weight() -> f64 {
    5.0
}

impl Default for CapacitySearchConfig {
    fn default() -> Self {
        Self {
            min_block_size: default_min_block_size(),
            max_block_size: default_max_block_size(),
            min_avg_headroom_kw: default_min_avg_headroom_kw(),
            power_weight: default_power_weight(),
        }
    }
}

/// Configuration for the placement validator and capacity search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Projected load above `limit × (1 - ratio)` triggers the near-limit advisory
    #[serde(default = "default_power_warning_ratio")]
    pub power_warning_ratio: f64,

    /// Case-insensitive keywords marking a GPU workload
    #[serde(default = "default_gpu_keywords")]
    pub gpu_keywords: Vec<String>,

    /// Allowed gap between cached rack power and the device sum
    #[serde(default = "default_power_drift_tolerance_kw")]
    pub power_drift_tolerance_kw: f64,

    #[serde(default)]
    pub capacity: CapacitySearchConfig,
}

fn default_power_warning_ratio() -> f64 {
    0.10
}

fn default_gpu_keywords() -> Vec<String> {
    vec!["gpu".to_string()]
}

fn default_power_drift_tolerance_kw() -> f64 {
    0.01
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            power_warning_ratio: default_power_warning_ratio(),
            gpu_keywords: default_gpu_keywords(),
            power_drift_tolerance_kw: default_power_drift_tolerance_kw(),
            capacity: CapacitySearchConfig::default(),
        }
    }
}

impl PlannerConfig {
    /// Load configuration from `TWIN_*` environment variables
    pub fn from_env() -> CapacityResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> CapacityResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = parse_var(&lookup, "TWIN_POWER_WARNING_RATIO")? {
            config.power_warning_ratio = value;
        }
        if let Some(raw) = lookup("TWIN_GPU_KEYWORDS") {
            config.gpu_keywords = raw
                .split(',')
                .map(|keyword| keyword.trim().to_lowercase())
                .filter(|keyword| !keyword.is_empty())
                .collect();
        }
        if let Some(value) = parse_var(&lookup, "TWIN_POWER_DRIFT_TOLERANCE_KW")? {
            config.power_drift_tolerance_kw = value;
        }
        if let Some(value) = parse_var(&lookup, "TWIN_MIN_BLOCK_SIZE")? {
            config.capacity.min_block_size = value;
        }
        if let Some(value) = parse_var(&lookup, "TWIN_MAX_BLOCK_SIZE")? {
            config.capacity.max_block_size = value;
        }
        if let Some(value) = parse_var(&lookup, "TWIN_MIN_AVG_HEADROOM_KW")? {
            config.capacity.min_avg_headroom_kw = value;
        }
        if let Some(value) = parse_var(&lookup, "TWIN_POWER_WEIGHT")? {
            config.capacity.power_weight = value;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> CapacityResult<()> {
        if !(0.0..1.0).contains(&self.power_warning_ratio) {
            return Err(CapacityError::Configuration(format!(
                "power_warning_ratio must be in [0, 1), got {}",
                self.power_warning_ratio
            )));
        }
        if self.power_drift_tolerance_kw < 0.0 {
            return Err(CapacityError::Configuration(
                "power_drift_tolerance_kw must not be negative".to_string(),
            ));
        }

        let capacity = &self.capacity;
        if capacity.min_block_size < 1 {
            return Err(CapacityError::Configuration(
                "min_block_size must be at least 1".to_string(),
            ));
        }
        if capacity.max_block_size < capacity.min_block_size {
            return Err(CapacityError::Configuration(format!(
                "max_block_size ({}) is smaller than min_block_size ({})",
                capacity.max_block_size, capacity.min_block_size
            )));
        }
        if capacity.min_avg_headroom_kw < 0.0 || capacity.power_weight < 0.0 {
            return Err(CapacityError::Configuration(
                "capacity floor and power weight must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    /// True if `text` contains any configured GPU keyword
    pub fn mentions_gpu(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.gpu_keywords
            .iter()
            .any(|keyword| !keyword.is_empty() && text.contains(&keyword.to_lowercase()))
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> CapacityResult<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
            CapacityError::Configuration(format!("{key} has an invalid value: {raw:?}"))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = PlannerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.capacity.min_block_size, 3);
        assert_eq!(config.capacity.max_block_size, 6);
        assert_eq!(config.capacity.min_avg_headroom_kw, 2.0);
        assert_eq!(config.capacity.power_weight, 5.0);
    }

    #[test]
    fn test_overrides_from_lookup() {
        let config = PlannerConfig::from_lookup(lookup_from(&[
            ("TWIN_MAX_BLOCK_SIZE", "8"),
            ("TWIN_GPU_KEYWORDS", "GPU, h100 ,"),
            ("TWIN_POWER_WEIGHT", "2.5"),
        ]))
        .unwrap();

        assert_eq!(config.capacity.max_block_size, 8);
        assert_eq!(config.capacity.power_weight, 2.5);
        assert_eq!(config.gpu_keywords, vec!["gpu", "h100"]);
    }

    #[test]
    fn test_malformed_value_is_configuration_error() {
        let result = PlannerConfig::from_lookup(lookup_from(&[("TWIN_MIN_BLOCK_SIZE", "three")]));
        assert!(matches!(result, Err(CapacityError::Configuration(_))));
    }

    #[test]
    fn test_inverted_block_sizes_rejected() {
        let result = PlannerConfig::from_lookup(lookup_from(&[
            ("TWIN_MIN_BLOCK_SIZE", "5"),
            ("TWIN_MAX_BLOCK_SIZE", "4"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_partial_document_uses_defaults() {
        let config: PlannerConfig =
            serde_json::from_str(r#"{ "capacity": { "max_block_size": 4 } }"#).unwrap();
        assert_eq!(config.capacity.max_block_size, 4);
        assert_eq!(config.capacity.min_block_size, 3);
        assert_eq!(config.power_warning_ratio, 0.10);
    }

    #[test]
    fn test_mentions_gpu() {
        let config = PlannerConfig::default();
        assert!(config.mentions_gpu("dt-GPU-8x"));
        assert!(!config.mentions_gpu("dt-storage"));
    }
}
