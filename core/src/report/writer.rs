use std::path::{Path, PathBuf};

use subrecon_common::error::RunError;
use subrecon_common::models::report::RunReport;
use tokio::fs;
use tracing::debug;

use super::{active_view, render_text};

const STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const STAGING_SUFFIX: &str = "partial";

/// Paths of the four artifacts written for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenReports {
    pub all_json: PathBuf,
    pub all_txt: PathBuf,
    pub active_json: PathBuf,
    pub active_txt: PathBuf,
}

/// Writes the full and active-only views of a report, as JSON and text.
///
/// The four files appear together or not at all: each is staged under a
/// `.partial` name, and only renamed into place once every one was written.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub async fn write(&self, report: &RunReport) -> Result<WrittenReports, RunError> {
        let stamp = report.timestamp.format(STAMP_FORMAT).to_string();
        let artifact = |view: &str, ext: &str| {
            self.output_dir
                .join(format!("subdomains_{view}_{}_{stamp}.{ext}", report.target))
        };

        let active = active_view(report);
        let written = WrittenReports {
            all_json: artifact("all", "json"),
            all_txt: artifact("all", "txt"),
            active_json: artifact("active", "json"),
            active_txt: artifact("active", "txt"),
        };

        let contents: [(&Path, String); 4] = [
            (written.all_json.as_path(), to_json(report)?),
            (written.all_txt.as_path(), render_text(report)),
            (written.active_json.as_path(), to_json(&active)?),
            (written.active_txt.as_path(), render_text(&active)),
        ];

        fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| RunError::ReportWrite {
                path: self.output_dir.clone(),
                source,
            })?;

        let mut staged: Vec<PathBuf> = Vec::with_capacity(contents.len());
        for (path, body) in &contents {
            let partial = staging_path(path);
            if let Err(source) = fs::write(&partial, body).await {
                staged.push(partial);
                discard(&staged).await;
                return Err(RunError::ReportWrite {
                    path: path.to_path_buf(),
                    source,
                });
            }
            staged.push(partial);
        }

        let mut placed: Vec<PathBuf> = Vec::with_capacity(contents.len());
        for ((path, _), partial) in contents.iter().zip(&staged) {
            if let Err(source) = fs::rename(partial, path).await {
                discard(&staged).await;
                discard(&placed).await;
                return Err(RunError::ReportWrite {
                    path: path.to_path_buf(),
                    source,
                });
            }
            placed.push(path.to_path_buf());
        }

        Ok(written)
    }
}

fn to_json(report: &RunReport) -> Result<String, RunError> {
    serde_json::to_string_pretty(report).map_err(|e| RunError::Serialize(e.to_string()))
}

fn staging_path(path: &Path) -> PathBuf {
    let mut staged = path.as_os_str().to_owned();
    staged.push(".");
    staged.push(STAGING_SUFFIX);
    PathBuf::from(staged)
}

/// Best-effort removal after a failed write.
async fn discard(paths: &[PathBuf]) {
    for path in paths {
        if let Err(e) = fs::remove_file(path).await {
            debug!("could not remove {}: {e}", path.display());
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
