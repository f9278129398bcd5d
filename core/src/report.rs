//! Final statistics and the two report views of a run.

use chrono::{DateTime, Utc};
use subrecon_common::models::record::ValidationRecord;
use subrecon_common::models::report::{LevelCounts, RunReport, ToolSummary};
use subrecon_common::models::target::Domain;

pub mod writer;

/// Assembles the full report of a run.
///
/// `started_at` becomes the report timestamp; the duration runs from there to
/// now. Records are sorted by hostname so two runs over the same hosts diff
/// cleanly.
pub fn build(
    target: &Domain,
    records: Vec<ValidationRecord>,
    tools: ToolSummary,
    started_at: DateTime<Utc>,
) -> RunReport {
    let duration_ms = (Utc::now() - started_at).num_milliseconds().max(0) as u64;
    from_records(target.to_string(), started_at, duration_ms, tools, records)
}

/// The same run restricted to its active records, with counts recomputed.
pub fn active_view(report: &RunReport) -> RunReport {
    from_records(
        report.target.clone(),
        report.timestamp,
        report.duration_ms,
        report.tools.clone(),
        report.active_records().cloned().collect(),
    )
}

fn from_records(
    target: String,
    timestamp: DateTime<Utc>,
    duration_ms: u64,
    tools: ToolSummary,
    mut records: Vec<ValidationRecord>,
) -> RunReport {
    records.sort_by(|a, b| a.hostname.cmp(&b.hostname));

    RunReport {
        target,
        timestamp,
        duration_ms,
        tools,
        total_found: records.len(),
        total_active: records.iter().filter(|record| record.active).count(),
        subdomains_by_level: LevelCounts::tally(&records),
        records,
    }
}

/// One line per hostname with a short status annotation.
pub fn render_text(report: &RunReport) -> String {
    let mut out = String::new();
    for record in &report.records {
        out.push_str(&record_line(record));
        out.push('\n');
    }
    out
}

pub fn record_line(record: &ValidationRecord) -> String {
    let status = match record.http_status {
        Some(code) => code.to_string(),
        None => "inactive".to_string(),
    };

    let mut line = format!("{} [{}]", record.hostname, status);
    if let Some(ip) = &record.ip {
        line.push(' ');
        line.push_str(ip);
    }
    if let Some(cname) = &record.cname {
        line.push_str(" -> ");
        line.push_str(cname);
    }
    line
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
