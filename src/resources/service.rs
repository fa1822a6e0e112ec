//! Resource service.
//!
//! Orchestrates store access: assigns ids and timestamps on creation, applies
//! partial-update merges, and maps records to API responses. Absence is
//! reported as `None`/`false`, never as an error.

use chrono::{DateTime, SubsecRound, Utc};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use super::dto::{CreateResourceRequest, ResourceResponse, UpdateResourceRequest};
use super::model::{Resource, ResourceStatus, ResourceType};
use super::page::{Page, PageRequest};
use super::store::{ResourceStore, StoreError};
use super::validation::{validate_create, validate_update, ValidationError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("store failure: {0}")]
    Store(#[from] StoreError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Current time at the precision the store keeps.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// A timestamp strictly after `previous`, normally the current time.
fn refreshed_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = now();
    if now > previous {
        now
    } else {
        previous + chrono::Duration::microseconds(1)
    }
}

fn merge_update(resource: &mut Resource, request: UpdateResourceRequest) {
    request.name.apply_to(&mut resource.name);
    request.resource_type.apply_to(&mut resource.resource_type);
    request.description.apply_to_option(&mut resource.description);
    request.location.apply_to_option(&mut resource.location);
    request.capacity.apply_to_option(&mut resource.capacity);
    request.status.apply_to(&mut resource.status);
    request.owner_id.apply_to(&mut resource.owner_id);
    request
        .responsible_person
        .apply_to_option(&mut resource.responsible_person);
    resource.updated_at = refreshed_timestamp(resource.updated_at);
}

pub struct ResourceService<S> {
    store: S,
}

impl<S: ResourceStore> ResourceService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate and persist a new resource. Nothing is written when
    /// validation fails.
    pub async fn create_resource(
        &self,
        request: CreateResourceRequest,
    ) -> ServiceResult<ResourceResponse> {
        let new = validate_create(request)?;
        let resource = new.into_resource(Uuid::new_v4().to_string(), now());
        let resource = self.store.save(resource).await?;

        info!(
            resource_id = %resource.id,
            resource_type = %resource.resource_type,
            owner_id = %resource.owner_id,
            "Resource created"
        );
        Ok(resource.into())
    }

    pub async fn get_resource_by_id(&self, id: &str) -> ServiceResult<Option<ResourceResponse>> {
        if id.trim().is_empty() {
            return Ok(None);
        }
        let resource = self.store.get(id).await?;
        debug!(resource_id = %id, found = resource.is_some(), "Resource lookup");
        Ok(resource.map(Into::into))
    }

    pub async fn get_all_resources(
        &self,
        page: u32,
        size: u32,
    ) -> ServiceResult<Page<ResourceResponse>> {
        let request = PageRequest::new(page, size)?;
        let page = self.store.list(request).await?;
        Ok(page.map(Into::into))
    }

    pub async fn get_resources_by_type(
        &self,
        resource_type: ResourceType,
        page: u32,
        size: u32,
    ) -> ServiceResult<Page<ResourceResponse>> {
        let request = PageRequest::new(page, size)?;
        let page = self.store.list_by_type(resource_type, request).await?;
        Ok(page.map(Into::into))
    }

    pub async fn get_resources_by_status(
        &self,
        status: ResourceStatus,
        page: u32,
        size: u32,
    ) -> ServiceResult<Page<ResourceResponse>> {
        let request = PageRequest::new(page, size)?;
        let page = self.store.list_by_status(status, request).await?;
        Ok(page.map(Into::into))
    }

    pub async fn get_resources_by_type_and_status(
        &self,
        resource_type: ResourceType,
        status: ResourceStatus,
        page: u32,
        size: u32,
    ) -> ServiceResult<Page<ResourceResponse>> {
        let request = PageRequest::new(page, size)?;
        let page = self
            .store
            .list_by_type_and_status(resource_type, status, request)
            .await?;
        Ok(page.map(Into::into))
    }

    pub async fn get_available_resources(
        &self,
        page: u32,
        size: u32,
    ) -> ServiceResult<Page<ResourceResponse>> {
        self.get_resources_by_status(ResourceStatus::Available, page, size)
            .await
    }

    /// Merge the supplied fields into the stored record. `None` when the id
    /// is unknown.
    pub async fn update_resource(
        &self,
        id: &str,
        request: UpdateResourceRequest,
    ) -> ServiceResult<Option<ResourceResponse>> {
        // An unknown id is reported as missing even when the body is invalid.
        if let Err(err) = validate_update(&request) {
            if !self.store.exists(id).await? {
                return Ok(None);
            }
            return Err(err.into());
        }

        let updated = self
            .store
            .modify(id, move |resource| merge_update(resource, request))
            .await?;

        if let Some(resource) = &updated {
            info!(resource_id = %resource.id, "Resource updated");
        }
        Ok(updated.map(Into::into))
    }

    pub async fn update_resource_status(
        &self,
        id: &str,
        status: ResourceStatus,
    ) -> ServiceResult<bool> {
        let updated = self
            .store
            .modify(id, |resource| {
                resource.status = status;
                resource.updated_at = refreshed_timestamp(resource.updated_at);
            })
            .await?;

        if updated.is_some() {
            info!(resource_id = %id, status = %status, "Resource status updated");
        }
        Ok(updated.is_some())
    }

    pub async fn delete_resource(&self, id: &str) -> ServiceResult<bool> {
        let deleted = self.store.delete(id).await?;
        if deleted {
            info!(resource_id = %id, "Resource deleted");
        }
        Ok(deleted)
    }

    pub async fn get_resources_by_owner(
        &self,
        owner_id: &str,
    ) -> ServiceResult<Vec<ResourceResponse>> {
        let resources = self.store.list_by_owner(owner_id).await?;
        Ok(resources.into_iter().map(Into::into).collect())
    }

    pub async fn ping(&self) -> ServiceResult<()> {
        self.store.ping().await?;
        Ok(())
    }
}
