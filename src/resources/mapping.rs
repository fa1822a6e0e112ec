//! Conversions between persisted records and API representations.

use chrono::{DateTime, Utc};

use super::dto::{NewResource, ResourceResponse};
use super::model::{Resource, ResourceStatus};

impl From<Resource> for ResourceResponse {
    fn from(r: Resource) -> Self {
        Self {
            id: r.id,
            name: r.name,
            resource_type: r.resource_type,
            description: r.description,
            status: r.status,
            location: r.location,
            capacity: r.capacity,
            owner_id: r.owner_id,
            responsible_person: r.responsible_person,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

impl NewResource {
    /// Build the record to persist. New resources always start AVAILABLE
    /// with both timestamps equal.
    pub fn into_resource(self, id: String, now: DateTime<Utc>) -> Resource {
        Resource {
            id,
            name: self.name,
            resource_type: self.resource_type,
            description: self.description,
            status: ResourceStatus::Available,
            location: self.location,
            capacity: self.capacity,
            owner_id: self.owner_id,
            responsible_person: self.responsible_person,
            created_at: now,
            updated_at: now,
        }
    }
}
