//! Error types for discovery, rewriting, acquisition and selection
//!
//! Filesystem and acquisition failures are grouped in `ConvertError`. They are
//! fatal for the operation that raised them. Selection failures live in
//! `SelectionError` and are recoverable: the selector stays where it was.
//! `RewriteError` wraps the `ConvertError` that stopped a rewrite pass
//! together with the outcomes recorded up to that point, since the pass is not
//! transactional and files rewritten before the failure stay rewritten.

use std::path::PathBuf;

use thiserror::Error;

use crate::rewriter::RewriteReport;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("directory {} cannot be read: {reason}", .path.display())]
    DirectoryUnreadable { path: PathBuf, reason: String },
    #[error("destination directory {} is not empty", .path.display())]
    DestinationNotEmpty { path: PathBuf },
    #[error("{tool} is not installed on this system")]
    AcquisitionToolMissing { tool: String },
    #[error("failed to clone {url}: {reason}")]
    AcquisitionFailed { url: String, reason: String },
    #[error("failed to read {}: {reason}", .path.display())]
    FileReadFailure { path: PathBuf, reason: String },
    #[error("failed to write {}: {reason}", .path.display())]
    FileWriteFailure { path: PathBuf, reason: String },
    #[error("replacement rule for '{replacement}' has an empty pattern")]
    EmptyPattern { replacement: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("there is nothing to select from")]
    EmptyInput,
    #[error("no items are selected")]
    NoSelection,
    #[error("the selection session has already ended")]
    SessionClosed,
}

#[derive(Error, Debug)]
#[error("rewrite pass aborted after {} file(s)", .report.outcomes.len())]
pub struct RewriteError {
    pub report: RewriteReport,
    #[source]
    pub source: ConvertError,
}
