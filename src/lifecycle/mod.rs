//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config → Connect store → Apply schema → Build service → Bind listener
//!
//! Shutdown (shutdown.rs, signals.rs):
//!     SIGTERM / SIGINT / trigger → Stop accepting → Drain requests → Exit
//! ```

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{open_store, start, Started, StartupError};
