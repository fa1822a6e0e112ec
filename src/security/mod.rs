//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request under /resources:
//!     → authorization.rs (management request? read X-User-Role)
//!     → role.rs (decode label, check capability)
//!     → PASS: role attached to request extensions, handler runs
//!     → BLOCKED: 401 / 403 returned before any handler
//!
//! Every response:
//!     → headers.rs (security response headers, when enabled)
//! ```
//!
//! # Design Decisions
//! - The role header is an unverified hint, not authentication
//! - Decoding and capability checks are pure functions over a closed enum

pub mod authorization;
pub mod headers;
pub mod role;

pub use authorization::{
    authorize, is_management_request, role_authorization_middleware, AuthorizationError,
    ROLE_HEADER,
};
pub use role::{InvalidRole, UserRole};
