//! Resource domain model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A bookable campus resource as persisted by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub id: String,
    pub name: String,
    pub resource_type: ResourceType,
    pub description: Option<String>,
    pub status: ResourceStatus,
    pub location: Option<String>,
    pub capacity: Option<i32>,
    pub owner_id: String,
    pub responsible_person: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Category of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceType {
    Room,
    Lab,
    Hall,
    Equipment,
    Cafeteria,
    Library,
    Parking,
    Sports,
}

/// Lifecycle state of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceStatus {
    Available,
    Booked,
    Maintenance,
    Unavailable,
}

/// A stored or supplied label did not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl ResourceType {
    pub const ALL: [ResourceType; 8] = [
        ResourceType::Room,
        ResourceType::Lab,
        ResourceType::Hall,
        ResourceType::Equipment,
        ResourceType::Cafeteria,
        ResourceType::Library,
        ResourceType::Parking,
        ResourceType::Sports,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Room => "ROOM",
            ResourceType::Lab => "LAB",
            ResourceType::Hall => "HALL",
            ResourceType::Equipment => "EQUIPMENT",
            ResourceType::Cafeteria => "CAFETERIA",
            ResourceType::Library => "LIBRARY",
            ResourceType::Parking => "PARKING",
            ResourceType::Sports => "SPORTS",
        }
    }
}

impl ResourceStatus {
    pub const ALL: [ResourceStatus; 4] = [
        ResourceStatus::Available,
        ResourceStatus::Booked,
        ResourceStatus::Maintenance,
        ResourceStatus::Unavailable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceStatus::Available => "AVAILABLE",
            ResourceStatus::Booked => "BOOKED",
            ResourceStatus::Maintenance => "MAINTENANCE",
            ResourceStatus::Unavailable => "UNAVAILABLE",
        }
    }
}

impl FromStr for ResourceType {
    type Err = UnknownVariant;

    /// Exact, case-sensitive match on the upper-case label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "resource type",
                value: s.to_string(),
            })
    }
}

impl FromStr for ResourceStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "resource status",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
