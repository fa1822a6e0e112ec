//! Resource management domain.
//!
//! # Data Flow
//! ```text
//! handler (http)
//!     → validation.rs (payload checks, field-level violations)
//!     → service.rs (ids, timestamps, partial merge)
//!     → store/ (explicit SQL against SQLite)
//!     → mapping.rs (record → response)
//! ```

pub mod dto;
pub mod mapping;
pub mod model;
pub mod page;
pub mod patch;
pub mod service;
pub mod store;
pub mod validation;

pub use dto::{
    CreateResourceRequest, MessageResponse, NewResource, ResourceResponse, UpdateResourceRequest,
};
pub use model::{Resource, ResourceStatus, ResourceType};
pub use page::{Page, PageRequest, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
pub use patch::Patch;
pub use service::{ResourceService, ServiceError, ServiceResult};
pub use store::{ResourceStore, SqliteResourceStore, StoreError};
pub use validation::{FieldViolation, ValidationError};
