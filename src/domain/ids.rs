// Copyright (c) 2025 - Cowboy AI, Inc.
//! Identity Value Objects for the Facility Hierarchy
//!
//! Every level of the hierarchy references its parent by identity, never by
//! embedding. Each level gets its own newtype so a `RackId` can never be
//! passed where a `RoomId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an identifier string
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the identifier as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Site identity
    SiteId
);
string_id!(
    /// Building identity
    BuildingId
);
string_id!(
    /// Floor identity
    FloorId
);
string_id!(
    /// Room identity
    RoomId
);
string_id!(
    /// Rack identity
    RackId
);
string_id!(
    /// Device record identity (one per phase/relocation record)
    DeviceId
);
string_id!(
    /// Device catalog entry identity
    DeviceTypeId
);
string_id!(
    /// Stable identity of a physical asset across relocations and phases
    LogicalEquipmentId
);
