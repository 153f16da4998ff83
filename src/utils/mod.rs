//! Utility modules for error handling and logging.

pub mod errors;
pub mod logger;

pub use errors::{MirrorError, Result};
