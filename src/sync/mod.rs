//! Per-pair synchronization: path resolution, staleness decisions, backups,
//! and the engine that drives them over one transport session.

pub mod backup;
pub mod engine;
pub mod exists;
pub mod resolve;
pub mod staleness;
pub mod transfer;
