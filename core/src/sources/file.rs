use std::path::{Path, PathBuf};

use async_trait::async_trait;
use subrecon_common::error::ToolError;
use subrecon_common::models::target::Domain;

use super::SubdomainSource;
use super::external::parse_output;

/// Hostnames read from a file, e.g. output of a tool that was run separately.
#[derive(Debug, Clone)]
pub struct HostListFile {
    path: PathBuf,
    name: String,
}

impl HostListFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path: PathBuf = path.into();
        let name = format!("file:{}", file_label(&path));
        Self { path, name }
    }

    /// One source per path. Files sharing a file name are named by their full
    /// path instead, so each keeps its own entry in the report.
    pub fn for_paths(paths: &[PathBuf]) -> Vec<Self> {
        paths
            .iter()
            .map(|path| {
                let label = file_label(path);
                let shared = paths
                    .iter()
                    .filter(|other| file_label(other) == label)
                    .count()
                    > 1;

                if shared {
                    Self {
                        path: path.clone(),
                        name: format!("file:{}", path.display()),
                    }
                } else {
                    Self::new(path.clone())
                }
            })
            .collect()
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[async_trait]
impl SubdomainSource for HostListFile {
    fn name(&self) -> &str {
        &self.name
    }

    async fn enumerate(&self, _target: &Domain) -> Result<Vec<String>, ToolError> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| ToolError::Io {
                tool: self.name.clone(),
                source,
            })?;

        Ok(parse_output(&contents))
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
