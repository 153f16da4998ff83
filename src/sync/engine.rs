//! The per-pair mirror engine.
//!
//! Drives each configured pair through resolve, directory setup, staleness
//! classification, backup, and fetch, one pair at a time over a single
//! transport session, and collects every pair's outcome into a run report.

use std::fmt;
use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::config::SyncSettings;
use crate::fs::dirs::ensure_dir;
use crate::sync::backup::create_backup;
use crate::sync::exists::remote_exists;
use crate::sync::resolve::{resolve, ResolvedPair};
use crate::sync::staleness::{evaluate, Freshness};
use crate::sync::transfer::fetch;
use crate::transport::Transport;
use crate::utils::errors::{MirrorError, Result};

/// What happened to one pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    /// No local copy existed; the remote file was fetched
    Fetched,
    /// A stale local copy was backed up, then replaced
    BackedUpAndFetched,
    /// The local copy is as new as the remote; nothing was done
    SkippedUpToDate,
    /// The remote file is gone; any local copy was left untouched
    SkippedRemoteMissing,
    /// This pair failed; later pairs are unaffected unless the session died
    Failed(String),
}

impl fmt::Display for TransferOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetched => write!(f, "fetched"),
            Self::BackedUpAndFetched => write!(f, "backed up and fetched"),
            Self::SkippedUpToDate => write!(f, "up to date"),
            Self::SkippedRemoteMissing => write!(f, "skipped, not on remote"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// One pair's line in the run report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairReport {
    pub remote_path: String,
    pub local_path: PathBuf,
    pub outcome: TransferOutcome,
}

/// Aggregated result of a whole run, one entry per configured pair.
#[derive(Debug)]
pub struct RunReport {
    pub pairs: Vec<PairReport>,
    /// Set when the transport session died mid-run
    pub fatal: Option<MirrorError>,
}

/// The three distinct end states of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Every pair fetched or skipped cleanly
    Success,
    /// The batch ran to the end, but at least one pair failed
    CompletedWithErrors,
    /// The session died; later pairs were never attempted
    Fatal,
}

/// Per-outcome totals for the end-of-run summary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeCounts {
    pub fetched: usize,
    pub backed_up_and_fetched: usize,
    pub up_to_date: usize,
    pub remote_missing: usize,
    pub failed: usize,
}

impl RunReport {
    pub fn status(&self) -> RunStatus {
        if self.fatal.is_some() {
            RunStatus::Fatal
        } else if self
            .pairs
            .iter()
            .any(|p| matches!(p.outcome, TransferOutcome::Failed(_)))
        {
            RunStatus::CompletedWithErrors
        } else {
            RunStatus::Success
        }
    }

    pub fn counts(&self) -> OutcomeCounts {
        let mut counts = OutcomeCounts::default();
        for pair in &self.pairs {
            match pair.outcome {
                TransferOutcome::Fetched => counts.fetched += 1,
                TransferOutcome::BackedUpAndFetched => counts.backed_up_and_fetched += 1,
                TransferOutcome::SkippedUpToDate => counts.up_to_date += 1,
                TransferOutcome::SkippedRemoteMissing => counts.remote_missing += 1,
                TransferOutcome::Failed(_) => counts.failed += 1,
            }
        }
        counts
    }
}

/// Mirror every configured pair over one transport session.
///
/// Pairs are processed strictly in configuration order. A failing pair is
/// recorded and the run moves on; a session-level failure marks every
/// remaining pair as failed without touching it. The session is closed
/// before returning, whatever the outcome.
pub fn run<T: Transport>(transport: &mut T, settings: &SyncSettings) -> RunReport {
    let mut pairs = Vec::with_capacity(settings.pairs.len());
    let mut fatal: Option<MirrorError> = None;

    for pair in &settings.pairs {
        let resolved = resolve(settings, pair);

        if fatal.is_some() {
            pairs.push(PairReport {
                remote_path: resolved.remote_path,
                local_path: resolved.local_path,
                outcome: TransferOutcome::Failed("aborted: transport session lost".to_string()),
            });
            continue;
        }

        let outcome = match process_pair(transport, &resolved) {
            Ok(outcome) => {
                info!("{}: {outcome}", resolved.local_path.display());
                outcome
            }
            Err(e) if e.is_fatal() => {
                error!("{}: {e}", resolved.local_path.display());
                let outcome = TransferOutcome::Failed(e.to_string());
                fatal = Some(e);
                outcome
            }
            Err(e) => {
                warn!("{}: {e}", resolved.local_path.display());
                TransferOutcome::Failed(e.to_string())
            }
        };

        pairs.push(PairReport {
            remote_path: resolved.remote_path,
            local_path: resolved.local_path,
            outcome,
        });
    }

    if let Err(e) = transport.close() {
        warn!("Failed to close transport session: {e}");
    }

    RunReport { pairs, fatal }
}

/// Run one pair through the decision ladder.
fn process_pair<T: Transport>(transport: &mut T, pair: &ResolvedPair) -> Result<TransferOutcome> {
    ensure_dir(&pair.local_dir)?;
    ensure_dir(&pair.backup_dir)?;

    let freshness = if pair.local_path.is_file() {
        let remote_mtime = transport.modified_time(&pair.remote_path)?;
        evaluate(&pair.local_path, remote_mtime)?
    } else {
        // No local copy, so no point asking the remote for its mtime.
        Freshness::Absent
    };

    match freshness {
        Freshness::Current => Ok(TransferOutcome::SkippedUpToDate),
        Freshness::Absent => {
            if !remote_exists(transport, &pair.remote_path)? {
                return Ok(TransferOutcome::SkippedRemoteMissing);
            }
            fetch(transport, &pair.remote_path, &pair.local_path)?;
            Ok(TransferOutcome::Fetched)
        }
        Freshness::Stale => {
            // The backup must be on disk before any overwrite can happen.
            create_backup(&pair.local_path, &pair.backup_dir)?;
            if !remote_exists(transport, &pair.remote_path)? {
                return Ok(TransferOutcome::SkippedRemoteMissing);
            }
            fetch(transport, &pair.remote_path, &pair.local_path)?;
            Ok(TransferOutcome::BackedUpAndFetched)
        }
    }
}
