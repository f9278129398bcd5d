//! External enumeration tools run as subprocesses.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use console::strip_ansi_codes;
use subrecon_common::error::ToolError;
use subrecon_common::models::target::Domain;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use super::SubdomainSource;

const AVAILABILITY_TIMEOUT: Duration = Duration::from_secs(10);
const DOMAIN_PLACEHOLDER: &str = "{domain}";

/// How to invoke one known tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolSpec {
    pub name: &'static str,
    pub program: &'static str,
    pub args: &'static [&'static str],
    /// Part of the default selection when the user names no tools.
    pub default: bool,
}

pub const CATALOGUE: &[ToolSpec] = &[
    ToolSpec {
        name: "subscraper",
        program: "subscraper",
        args: &["-d", DOMAIN_PLACEHOLDER, "-silent", "-active"],
        default: true,
    },
    ToolSpec {
        name: "subfinder",
        program: "subfinder",
        args: &["-d", DOMAIN_PLACEHOLDER, "-all", "-silent"],
        default: true,
    },
    ToolSpec {
        name: "assetfinder",
        program: "assetfinder",
        args: &["--subs-only", DOMAIN_PLACEHOLDER],
        default: true,
    },
    ToolSpec {
        name: "sublist3r",
        program: "sublist3r",
        args: &["-d", DOMAIN_PLACEHOLDER],
        default: true,
    },
    // Passive amass runs can take far longer than the others.
    ToolSpec {
        name: "amass",
        program: "amass",
        args: &["enum", "-passive", "-d", DOMAIN_PLACEHOLDER],
        default: false,
    },
];

/// Resolves user-supplied tool names against the [`CATALOGUE`].
///
/// An empty selection yields the default tools.
pub fn select(names: &[String], run_timeout: Duration) -> anyhow::Result<Vec<ExternalTool>> {
    if names.is_empty() {
        return Ok(CATALOGUE
            .iter()
            .filter(|spec| spec.default)
            .map(|spec| ExternalTool::new(*spec, run_timeout))
            .collect());
    }

    names
        .iter()
        .map(|name| {
            let name = name.trim().to_ascii_lowercase();
            CATALOGUE
                .iter()
                .find(|spec| spec.name == name)
                .map(|spec| ExternalTool::new(*spec, run_timeout))
                .ok_or_else(|| {
                    let known: Vec<&str> = CATALOGUE.iter().map(|spec| spec.name).collect();
                    anyhow::anyhow!("unknown tool '{name}', expected one of: {}", known.join(", "))
                })
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct ExternalTool {
    spec: ToolSpec,
    run_timeout: Duration,
}

impl ExternalTool {
    pub fn new(spec: ToolSpec, run_timeout: Duration) -> Self {
        Self { spec, run_timeout }
    }

    pub fn args(&self, target: &Domain) -> Vec<String> {
        self.spec
            .args
            .iter()
            .map(|arg| arg.replace(DOMAIN_PLACEHOLDER, target.as_str()))
            .collect()
    }

    /// Checks that the program can be started at all by asking it for `--help`.
    pub async fn check_available(&self) -> Result<(), ToolError> {
        let mut command = Command::new(self.spec.program);
        command
            .arg("--help")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        match timeout(AVAILABILITY_TIMEOUT, command.status()).await {
            Ok(Ok(_status)) => Ok(()),
            Ok(Err(e)) => Err(self.unavailable(e.to_string())),
            Err(_elapsed) => Err(self.unavailable("did not answer --help in time".into())),
        }
    }

    fn unavailable(&self, reason: String) -> ToolError {
        ToolError::Unavailable {
            tool: self.spec.name.to_string(),
            reason,
        }
    }
}

#[async_trait]
impl SubdomainSource for ExternalTool {
    fn name(&self) -> &str {
        self.spec.name
    }

    async fn enumerate(&self, target: &Domain) -> Result<Vec<String>, ToolError> {
        self.check_available().await?;

        let args = self.args(target);
        debug!("{} {}", self.spec.program, args.join(" "));

        let child = Command::new(self.spec.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.unavailable(e.to_string()))?;

        // Dropping the output future on timeout drops the child, which kills it.
        let output = timeout(self.run_timeout, child.wait_with_output())
            .await
            .map_err(|_elapsed| ToolError::TimedOut {
                tool: self.spec.name.to_string(),
                timeout: self.run_timeout,
            })?
            .map_err(|source| ToolError::Io {
                tool: self.spec.name.to_string(),
                source,
            })?;

        if !output.status.success() {
            warn!(
                "{} exited with {}: {}",
                self.spec.name,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(parse_output(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Splits tool output into candidate lines, dropping colour codes and blanks.
pub fn parse_output(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(|line| strip_ansi_codes(line).trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
