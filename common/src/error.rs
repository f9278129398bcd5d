//! # Error Taxonomy
//!
//! Per-hostname failures ([`ResolutionFailure`], [`ProbeFailure`],
//! [`InvalidHostnameError`]) are absorbed into the validation record and never
//! reach the caller. Only [`RunError`] surfaces at run level.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// A discovery tool could not contribute any hostnames.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("`{tool}` is not installed or cannot be started: {reason}")]
    Unavailable { tool: String, reason: String },

    #[error("`{tool}` did not finish within {timeout:?}")]
    TimedOut { tool: String, timeout: Duration },

    #[error("`{tool}` failed: {source}")]
    Io {
        tool: String,
        #[source]
        source: std::io::Error,
    },
}

impl ToolError {
    pub fn tool(&self) -> &str {
        match self {
            ToolError::Unavailable { tool, .. }
            | ToolError::TimedOut { tool, .. }
            | ToolError::Io { tool, .. } => tool,
        }
    }
}

/// A hostname reached the classifier without the target as its suffix.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("`{hostname}` is not within `{target}`")]
pub struct InvalidHostnameError {
    pub hostname: String,
    pub target: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolutionFailure {
    #[error("no records for {0}")]
    NoRecords(String),
    #[error("lookup for {0} timed out")]
    TimedOut(String),
    #[error("lookup for {hostname} failed: {reason}")]
    Lookup { hostname: String, reason: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProbeFailure {
    #[error("probe of {0} timed out")]
    TimedOut(String),
    #[error("could not connect to {hostname}: {reason}")]
    Connect { hostname: String, reason: String },
    #[error("request to {hostname} failed: {reason}")]
    Request { hostname: String, reason: String },
}

/// Failures that abort a run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("no discovery tool produced any output")]
    NoToolOutput,

    #[error("no subdomains of {0} were found")]
    NoSubdomains(String),

    #[error("failed to write report {}: {source}", path.display())]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize report: {0}")]
    Serialize(String),
}
