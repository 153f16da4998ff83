//! Local filesystem helpers.

pub mod dirs;
pub mod metadata;
