// Copyright (c) 2025 - Cowboy AI, Inc.
//! Device Catalog Domain Model
//!
//! Catalog entries describe equipment models independently of where any
//! instance of them is installed.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::DeviceTypeId;

/// Equipment category taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceCategory {
    /// General purpose server
    Server,
    /// Accelerator-dense server (GPU, AI training/inference)
    GpuServer,
    /// Switch, router, firewall
    Network,
    /// Storage array or shelf
    Storage,
    /// PDU, UPS, power shelf
    Power,
    /// Patch panel, cable manager, blanking panel
    Passive,
    /// Anything not covered above
    #[serde(other)]
    Other,
}

impl DeviceCategory {
    /// Get the canonical string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Server => "server",
            Self::GpuServer => "gpu_server",
            Self::Network => "network",
            Self::Storage => "storage",
            Self::Power => "power",
            Self::Passive => "passive",
            Self::Other => "other",
        }
    }

    /// Parse from a loosely formatted catalog label
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "server" | "compute" | "physical_server" => Self::Server,
            "gpu_server" | "gpu" | "ai" | "accelerator" => Self::GpuServer,
            "network" | "switch" | "router" | "firewall" => Self::Network,
            "storage" | "storage_array" | "nas" => Self::Storage,
            "power" | "pdu" | "ups" => Self::Power,
            "passive" | "patch_panel" | "blank" => Self::Passive,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for DeviceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog entry for an equipment model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceType {
    pub id: DeviceTypeId,

    pub category: DeviceCategory,

    /// Reference (vendor) model name
    pub model: String,

    #[serde(default = "default_u_height")]
    pub u_height: i32,

    #[serde(default)]
    pub power_kw: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thermal_btu_h: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu_slots: Option<u32>,
}

fn default_u_height() -> i32 {
    1
}

impl DeviceType {
    /// True if the catalog marks this model as a GPU workload
    pub fn is_gpu(&self) -> bool {
        self.category == DeviceCategory::GpuServer || self.gpu_slots.is_some_and(|n| n > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parsing() {
        assert_eq!(DeviceCategory::parse("GPU Server"), DeviceCategory::GpuServer);
        assert_eq!(DeviceCategory::parse("switch"), DeviceCategory::Network);
        assert_eq!(DeviceCategory::parse("toaster"), DeviceCategory::Other);
    }

    #[test]
    fn test_unknown_category_deserializes_as_other() {
        let category: DeviceCategory = serde_json::from_str("\"quantum\"").unwrap();
        assert_eq!(category, DeviceCategory::Other);
    }

    #[test]
    fn test_is_gpu() {
        let mut device_type = DeviceType {
            id: DeviceTypeId::new("dt-1"),
            category: DeviceCategory::Server,
            model: "R750".to_string(),
            u_height: 2,
            power_kw: 0.8,
            thermal_btu_h: None,
            gpu_slots: None,
        };
        assert!(!device_type.is_gpu());

        device_type.gpu_slots = Some(4);
        assert!(device_type.is_gpu());
    }
}
