//! FTP Mirror Library
//!
//! One-way pull mirror: fetches configured remote files over FTP when they
//! are newer than the local copies, preserving each replaced local file as a
//! timestamped backup first.

pub mod config;
pub mod fs;
pub mod sync;
pub mod transport;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use utils::errors::MirrorError;
pub type Result<T> = std::result::Result<T, MirrorError>;
