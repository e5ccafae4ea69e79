//! Musicverse Core - shared infrastructure for the musicverse workspace
//!
//! Error handling, logging setup and configuration used by the session manager,
//! the catalog engine and the terminal front end.

pub mod config;
pub mod error;
pub mod logging;

pub use config::*;
pub use error::*;
pub use logging::*;

// Re-export commonly used external types
pub use tracing;
