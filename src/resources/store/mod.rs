//! Resource persistence.
//!
//! [`ResourceStore`] is the data-access seam used by the service. Each query
//! is written out explicitly by the implementation; [`SqliteResourceStore`]
//! is the production one.

mod schema;
mod sqlite;

use std::future::Future;

use thiserror::Error;

use super::model::{Resource, ResourceStatus, ResourceType, UnknownVariant};
use super::page::{Page, PageRequest};

pub use schema::run_migrations;
pub use sqlite::SqliteResourceStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("corrupt resource row {id}: {source}")]
    Corrupt {
        id: String,
        #[source]
        source: UnknownVariant,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

pub trait ResourceStore: Send + Sync + 'static {
    fn get(&self, id: &str) -> impl Future<Output = StoreResult<Option<Resource>>> + Send;

    /// Insert, or overwrite the record with the same id.
    fn save(&self, resource: Resource) -> impl Future<Output = StoreResult<Resource>> + Send;

    /// Returns whether a record was removed.
    fn delete(&self, id: &str) -> impl Future<Output = StoreResult<bool>> + Send;

    fn exists(&self, id: &str) -> impl Future<Output = StoreResult<bool>> + Send;

    fn list(&self, page: PageRequest) -> impl Future<Output = StoreResult<Page<Resource>>> + Send;

    fn list_by_type(
        &self,
        resource_type: ResourceType,
        page: PageRequest,
    ) -> impl Future<Output = StoreResult<Page<Resource>>> + Send;

    fn list_by_status(
        &self,
        status: ResourceStatus,
        page: PageRequest,
    ) -> impl Future<Output = StoreResult<Page<Resource>>> + Send;

    fn list_by_type_and_status(
        &self,
        resource_type: ResourceType,
        status: ResourceStatus,
        page: PageRequest,
    ) -> impl Future<Output = StoreResult<Page<Resource>>> + Send;

    /// All resources of one owner, unpaginated, in store order.
    fn list_by_owner(&self, owner_id: &str)
        -> impl Future<Output = StoreResult<Vec<Resource>>> + Send;

    /// Read, mutate and write back one record inside a single transaction.
    /// Returns `None` without writing when the id is unknown.
    fn modify<F>(&self, id: &str, f: F) -> impl Future<Output = StoreResult<Option<Resource>>> + Send
    where
        F: FnOnce(&mut Resource) + Send;

    /// Round-trip to the backing database.
    fn ping(&self) -> impl Future<Output = StoreResult<()>> + Send;
}
