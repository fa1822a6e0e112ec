//! API-facing request and response representations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::model::{ResourceStatus, ResourceType};
use super::patch::Patch;

/// Create payload. Required fields are optional here so that validation can
/// report every missing field at once instead of failing on the first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResourceRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub resource_type: Option<ResourceType>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub capacity: Option<i32>,
    pub owner_id: Option<String>,
    pub responsible_person: Option<String>,
}

/// Partial-update payload. Only fields carrying a value are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateResourceRequest {
    pub name: Patch<String>,
    #[serde(rename = "type")]
    pub resource_type: Patch<ResourceType>,
    pub description: Patch<String>,
    pub location: Patch<String>,
    pub capacity: Patch<i32>,
    pub status: Patch<ResourceStatus>,
    pub owner_id: Patch<String>,
    pub responsible_person: Patch<String>,
}

/// A create payload that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewResource {
    pub name: String,
    pub resource_type: ResourceType,
    pub description: Option<String>,
    pub location: Option<String>,
    pub capacity: Option<i32>,
    pub owner_id: String,
    pub responsible_person: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceResponse {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
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

/// Plain acknowledgement body, e.g. after a delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
