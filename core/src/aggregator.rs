//! Merges raw tool output into one canonical, deduplicated set of subdomains.
//!
//! Every tool quirk is absorbed here: whatever a source prints is reduced to
//! the canonical hostname form, anything outside the target is dropped, and
//! duplicates across tools collapse into a single [`Subdomain`].

use std::collections::BTreeSet;

use subrecon_common::models::hostname;
use subrecon_common::models::report::ToolSummary;
use subrecon_common::models::subdomain::Subdomain;
use subrecon_common::models::target::Domain;
use tracing::{info, warn};

use crate::classifier;
use crate::sources::ToolResults;

/// The unique subdomain set of a run, plus what each tool contributed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    pub subdomains: BTreeSet<Subdomain>,
    pub tools: ToolSummary,
}

impl Aggregation {
    pub fn is_empty(&self) -> bool {
        self.subdomains.is_empty()
    }

    pub fn len(&self) -> usize {
        self.subdomains.len()
    }
}

pub fn merge(target: &Domain, results: &ToolResults) -> Aggregation {
    let mut aggregation = Aggregation {
        tools: ToolSummary {
            failed_tools: results.failed.clone(),
            ..ToolSummary::default()
        },
        ..Aggregation::default()
    };

    for (tool, raw_hosts) in &results.outputs {
        let accepted: BTreeSet<String> = raw_hosts
            .iter()
            .filter_map(|raw| hostname::normalize(raw))
            .filter(|host| target.contains(host))
            .collect();

        info!("{tool}: {} subdomains accepted", accepted.len());
        aggregation.tools.tool_counts.insert(tool.clone(), accepted.len());
        if !accepted.is_empty() {
            aggregation.tools.tools_used.insert(tool.clone());
        }

        for host in accepted {
            match classifier::classify(&host, target) {
                Ok(level) => {
                    aggregation
                        .subdomains
                        .insert(Subdomain::new(host, target.clone(), level));
                }
                Err(e) => warn!("Skipping hostname: {e}"),
            }
        }
    }

    aggregation
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
    use subrecon_common::models::subdomain::Level;

    fn target() -> Domain {
        "testfire.net".parse().unwrap()
    }

    fn results(tools: &[(&str, Vec<&str>)]) -> ToolResults {
        let mut results = ToolResults::new();
        for (tool, hosts) in tools {
            results.record_output(*tool, hosts.iter().map(|h| h.to_string()).collect());
        }
        results
    }

    fn levels(aggregation: &Aggregation) -> Vec<(&str, Level)> {
        aggregation
            .subdomains
            .iter()
            .map(|sub| (sub.hostname.as_str(), sub.level))
            .collect()
    }

    #[test]
    fn merge_normalizes_filters_and_classifies() {
        let input = results(&[(
            "subfinder",
            vec![
                "www.testfire.net",
                "HTTP://Admin.testfire.net/",
                "testfire.net",
                "*.shop.testfire.net",
                "evil.com",
            ],
        )]);

        let aggregation = merge(&target(), &input);

        assert_eq!(
            levels(&aggregation),
            vec![
                ("admin.testfire.net", Level::L2),
                ("shop.testfire.net", Level::L2),
                ("testfire.net", Level::Apex),
                ("www.testfire.net", Level::L2),
            ]
        );
    }

    #[test]
    fn merge_deduplicates_across_tools_and_records_contributors() {
        let mut input = results(&[
            ("subfinder", vec!["www.testfire.net", "demo.testfire.net"]),
            ("assetfinder", vec!["WWW.TESTFIRE.NET", "https://demo.testfire.net/"]),
            ("sublist3r", vec!["unrelated.org"]),
        ]);
        input.record_failure("amass");

        let aggregation = merge(&target(), &input);

        assert_eq!(aggregation.len(), 2);
        assert_eq!(
            aggregation.tools.tools_used,
            BTreeSet::from(["assetfinder".to_string(), "subfinder".to_string()])
        );
        assert_eq!(aggregation.tools.tool_counts["sublist3r"], 0);
        assert_eq!(aggregation.tools.tool_counts["assetfinder"], 2);
        assert!(aggregation.tools.failed_tools.contains("amass"));
    }

    #[test]
    fn merge_ignores_tool_order_and_is_idempotent() {
        let forward = results(&[
            ("subfinder", vec!["a.testfire.net", "b.testfire.net"]),
            ("assetfinder", vec!["b.testfire.net", "c.x.testfire.net"]),
        ]);
        let backward = results(&[
            ("assetfinder", vec!["c.x.testfire.net", "b.testfire.net"]),
            ("subfinder", vec!["b.testfire.net", "a.testfire.net"]),
        ]);

        let first = merge(&target(), &forward);
        assert_eq!(first, merge(&target(), &backward));
        assert_eq!(first, merge(&target(), &forward));
    }

    #[test]
    fn merge_keeps_only_hosts_within_target() {
        let input = results(&[(
            "subfinder",
            vec![
                "x.testfire.net",
                "testfire.net.evil.com",
                "nottestfire.net",
                "[INF] Loading provider config",
                "",
            ],
        )]);

        let aggregation = merge(&target(), &input);

        for sub in &aggregation.subdomains {
            assert!(sub.hostname == "testfire.net" || sub.hostname.ends_with(".testfire.net"));
        }
        assert_eq!(aggregation.len(), 1);
    }

    #[test]
    fn merge_of_nothing_is_empty() {
        let aggregation = merge(&target(), &ToolResults::new());
        assert!(aggregation.is_empty());
        assert!(aggregation.tools.tools_used.is_empty());
    }
}
