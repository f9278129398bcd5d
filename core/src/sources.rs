//! Discovery sources.
//!
//! A source is anything that can list raw hostnames for a target: an external
//! enumeration tool run as a subprocess ([`external`]) or a plain list on disk
//! ([`file`]). Sources are black boxes to the rest of the pipeline; their
//! output is only trusted after the aggregator has canonicalized it.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use subrecon_common::error::ToolError;
use subrecon_common::models::target::Domain;
use tracing::{info, warn};

use crate::shutdown::Shutdown;

pub mod external;
pub mod file;

/// One place raw hostnames come from.
#[async_trait]
pub trait SubdomainSource: Send + Sync {
    fn name(&self) -> &str;

    async fn enumerate(&self, target: &Domain) -> Result<Vec<String>, ToolError>;
}

/// Raw output of every source that was asked, keyed by source name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolResults {
    pub outputs: BTreeMap<String, Vec<String>>,
    pub failed: BTreeSet<String>,
}

impl ToolResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_output(&mut self, tool: impl Into<String>, hostnames: Vec<String>) {
        self.outputs.entry(tool.into()).or_default().extend(hostnames);
    }

    pub fn record_failure(&mut self, tool: impl Into<String>) {
        self.failed.insert(tool.into());
    }

    /// True if at least one source printed at least one line.
    pub fn has_output(&self) -> bool {
        self.outputs.values().any(|hosts| !hosts.is_empty())
    }
}

/// Runs every source one after the other.
///
/// A failing source is recorded and skipped; it never stops the others.
/// Sources not yet started when `shutdown` fires are not run at all.
pub async fn collect(
    sources: &[Box<dyn SubdomainSource>],
    target: &Domain,
    shutdown: &Shutdown,
) -> ToolResults {
    let mut results = ToolResults::new();

    for source in sources {
        if shutdown.is_triggered() {
            warn!("Run cancelled, skipping {}", source.name());
            continue;
        }

        info!("Running {}...", source.name());
        match source.enumerate(target).await {
            Ok(hostnames) => {
                info!("{} printed {} lines", source.name(), hostnames.len());
                results.record_output(source.name(), hostnames);
            }
            Err(e) => {
                warn!("{e}");
                results.record_failure(e.tool());
            }
        }
    }

    results
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shutdown;

    struct Fixed(&'static str, Vec<&'static str>);

    #[async_trait]
    impl SubdomainSource for Fixed {
        fn name(&self) -> &str {
            self.0
        }

        async fn enumerate(&self, _target: &Domain) -> Result<Vec<String>, ToolError> {
            Ok(self.1.iter().map(|s| s.to_string()).collect())
        }
    }

    struct Missing;

    #[async_trait]
    impl SubdomainSource for Missing {
        fn name(&self) -> &str {
            "missing"
        }

        async fn enumerate(&self, _target: &Domain) -> Result<Vec<String>, ToolError> {
            Err(ToolError::Unavailable {
                tool: "missing".into(),
                reason: "not found".into(),
            })
        }
    }

    fn target() -> Domain {
        "testfire.net".parse().unwrap()
    }

    #[tokio::test]
    async fn collect_tolerates_failing_sources() {
        let sources: Vec<Box<dyn SubdomainSource>> = vec![
            Box::new(Missing),
            Box::new(Fixed("subfinder", vec!["www.testfire.net"])),
            Box::new(Fixed("assetfinder", vec![])),
        ];

        let results = collect(&sources, &target(), &Shutdown::never()).await;

        assert!(results.has_output());
        assert_eq!(results.failed, BTreeSet::from(["missing".to_string()]));
        assert_eq!(results.outputs["subfinder"], vec!["www.testfire.net"]);
        assert!(results.outputs["assetfinder"].is_empty());
    }

    #[tokio::test]
    async fn collect_skips_sources_after_shutdown() {
        let (trigger, shutdown) = shutdown::channel();
        trigger.trigger();

        let sources: Vec<Box<dyn SubdomainSource>> =
            vec![Box::new(Fixed("subfinder", vec!["www.testfire.net"]))];

        let results = collect(&sources, &target(), &shutdown).await;

        assert!(!results.has_output());
        assert!(results.failed.is_empty());
    }

    #[test]
    fn has_output_ignores_empty_tools() {
        let mut results = ToolResults::new();
        results.record_output("assetfinder", vec![]);
        assert!(!results.has_output());

        results.record_output("subfinder", vec!["a.testfire.net".into()]);
        assert!(results.has_output());
    }
}
