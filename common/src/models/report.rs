use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::ValidationRecord;
use super::subdomain::Level;

/// Per-level subdomain counts, serialized as `{"APEX": .., "L2": .., "L3": ..}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCounts {
    #[serde(rename = "APEX")]
    pub apex: usize,
    #[serde(rename = "L2")]
    pub l2: usize,
    #[serde(rename = "L3")]
    pub l3: usize,
}

impl LevelCounts {
    pub fn tally<'a>(records: impl IntoIterator<Item = &'a ValidationRecord>) -> Self {
        let mut counts = Self::default();
        for record in records {
            match record.level {
                Level::Apex => counts.apex += 1,
                Level::L2 => counts.l2 += 1,
                Level::L3 => counts.l3 += 1,
            }
        }
        counts
    }
}

/// Which discovery tools took part in a run and what each contributed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSummary {
    /// Tools that contributed at least one accepted hostname.
    pub tools_used: BTreeSet<String>,
    /// Tools that were missing, crashed or timed out.
    pub failed_tools: BTreeSet<String>,
    /// Accepted hostnames per tool that ran, including those with zero.
    pub tool_counts: BTreeMap<String, usize>,
}

/// The final result of a run, ready to be serialized.
///
/// `records` is sorted by hostname, `total_found == records.len()` and
/// `total_active` counts the active records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub target: String,
    pub timestamp: DateTime<Utc>,
    pub duration_ms: u64,
    #[serde(flatten)]
    pub tools: ToolSummary,
    pub total_found: usize,
    pub total_active: usize,
    pub subdomains_by_level: LevelCounts,
    pub records: Vec<ValidationRecord>,
}

impl RunReport {
    pub fn active_records(&self) -> impl Iterator<Item = &ValidationRecord> {
        self.records.iter().filter(|record| record.active)
    }
}
