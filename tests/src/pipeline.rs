use std::fs;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use subrecon_common::error::{ProbeFailure, ResolutionFailure, RunError, ToolError};
use subrecon_common::models::record::DnsAnswer;
use subrecon_common::models::report::RunReport;
use subrecon_common::models::target::Domain;
use subrecon_core::recon::ReconService;
use subrecon_core::report::writer::ReportWriter;
use subrecon_core::shutdown::{self, Shutdown};
use subrecon_core::sources::SubdomainSource;
use subrecon_core::sources::file::HostListFile;
use subrecon_core::validator::{Limits, Prober, Resolver, Validator};

struct Fixed(&'static str, Vec<&'static str>);

#[async_trait]
impl SubdomainSource for Fixed {
    fn name(&self) -> &str {
        self.0
    }

    async fn enumerate(&self, _target: &Domain) -> Result<Vec<String>, ToolError> {
        Ok(self.1.iter().map(|host| host.to_string()).collect())
    }
}

struct Broken(&'static str);

#[async_trait]
impl SubdomainSource for Broken {
    fn name(&self) -> &str {
        self.0
    }

    async fn enumerate(&self, _target: &Domain) -> Result<Vec<String>, ToolError> {
        Err(ToolError::TimedOut {
            tool: self.0.to_string(),
            timeout: Duration::from_secs(300),
        })
    }
}

/// Resolves everything except `api.test.vulnweb.com`.
struct LabResolver;

#[async_trait]
impl Resolver for LabResolver {
    async fn resolve(&self, hostname: &str) -> Result<DnsAnswer, ResolutionFailure> {
        if hostname == "api.test.vulnweb.com" {
            return Err(ResolutionFailure::NoRecords(hostname.to_string()));
        }
        Ok(DnsAnswer {
            ip: Some("44.228.249.3".into()),
            cname: None,
        })
    }
}

/// `www` serves a page, `testphp` answers 404, the rest refuse connections.
struct LabProber;

#[async_trait]
impl Prober for LabProber {
    async fn probe(&self, hostname: &str) -> Result<u16, ProbeFailure> {
        match hostname {
            "www.vulnweb.com" => Ok(200),
            "testphp.vulnweb.com" => Ok(404),
            _ => Err(ProbeFailure::Connect {
                hostname: hostname.to_string(),
                reason: "connection refused".into(),
            }),
        }
    }
}

fn target() -> Domain {
    "vulnweb.com".parse().unwrap()
}

fn validator() -> Validator {
    Validator::new(
        Arc::new(LabResolver),
        Arc::new(LabProber),
        Limits {
            concurrency: 4,
            dns_timeout: Duration::from_secs(1),
            http_timeout: Duration::from_secs(1),
        },
    )
}

fn lab_sources() -> Vec<Box<dyn SubdomainSource>> {
    vec![
        Box::new(Fixed(
            "subfinder",
            vec!["www.vulnweb.com", "testphp.vulnweb.com", "evil.com"],
        )),
        Box::new(Fixed(
            "assetfinder",
            vec!["WWW.vulnweb.com.", "api.test.vulnweb.com", "notvulnweb.com"],
        )),
        Box::new(Broken("sublist3r")),
    ]
}

fn read_report(path: &std::path::Path) -> RunReport {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn full_run_produces_consistent_reports() {
    let out = tempfile::tempdir().unwrap();
    let service = ReconService::new(lab_sources(), validator(), ReportWriter::new(out.path()));

    let outcome = service.run(&target(), &Shutdown::never()).await.unwrap();
    let report = &outcome.report;

    let hosts: Vec<&str> = report.records.iter().map(|r| r.hostname.as_str()).collect();
    assert_eq!(
        hosts,
        vec!["api.test.vulnweb.com", "testphp.vulnweb.com", "www.vulnweb.com"]
    );
    assert_eq!(report.total_found, 3);
    assert_eq!(report.total_active, 2);
    assert_eq!(report.subdomains_by_level.l2, 2);
    assert_eq!(report.subdomains_by_level.l3, 1);
    assert!(report.tools.tools_used.contains("subfinder"));
    assert!(report.tools.tools_used.contains("assetfinder"));
    assert!(report.tools.failed_tools.contains("sublist3r"));
    assert_eq!(report.tools.tool_counts["assetfinder"], 2);
    assert_eq!(outcome.skipped, 0);

    let api = &report.records[0];
    assert!(!api.active);
    assert_eq!(api.ip, None);
    assert_eq!(api.http_status, None);

    let testphp = &report.records[1];
    assert!(testphp.active);
    assert_eq!(testphp.http_status, Some(404));

    let all = read_report(&outcome.files.all_json);
    assert_eq!(all.total_found, 3);
    assert_eq!(all.records, report.records);

    let active = read_report(&outcome.files.active_json);
    assert_eq!(active.total_found, 2);
    assert!(active.records.iter().all(|r| r.active));

    let active_txt = fs::read_to_string(&outcome.files.active_txt).unwrap();
    assert_eq!(
        active_txt,
        "testphp.vulnweb.com [404] 44.228.249.3\nwww.vulnweb.com [200] 44.228.249.3\n"
    );
}

#[tokio::test]
async fn every_tool_failing_is_an_error() {
    let out = tempfile::tempdir().unwrap();
    let sources: Vec<Box<dyn SubdomainSource>> =
        vec![Box::new(Broken("subfinder")), Box::new(Broken("amass"))];
    let service = ReconService::new(sources, validator(), ReportWriter::new(out.path()));

    let err = service.run(&target(), &Shutdown::never()).await.unwrap_err();
    assert!(matches!(err, RunError::NoToolOutput));
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn output_outside_the_target_is_no_subdomains() {
    let out = tempfile::tempdir().unwrap();
    let sources: Vec<Box<dyn SubdomainSource>> =
        vec![Box::new(Fixed("subfinder", vec!["evil.com", "vulnweb.com.evil.com", ""]))];
    let service = ReconService::new(sources, validator(), ReportWriter::new(out.path()));

    let err = service.run(&target(), &Shutdown::never()).await.unwrap_err();
    assert!(matches!(err, RunError::NoSubdomains(ref t) if t == "vulnweb.com"));
}

#[tokio::test]
async fn host_file_feeds_the_pipeline() {
    let out = tempfile::tempdir().unwrap();
    let mut hosts = tempfile::NamedTempFile::new().unwrap();
    writeln!(hosts, "https://www.vulnweb.com:443/login").unwrap();
    writeln!(hosts, "\x1b[32mtestphp.vulnweb.com\x1b[0m").unwrap();
    writeln!(hosts).unwrap();

    let sources: Vec<Box<dyn SubdomainSource>> = vec![Box::new(HostListFile::new(hosts.path()))];
    let service = ReconService::new(sources, validator(), ReportWriter::new(out.path()));

    let outcome = service.run(&target(), &Shutdown::never()).await.unwrap();

    assert_eq!(outcome.report.total_found, 2);
    assert_eq!(outcome.report.total_active, 2);
    assert_eq!(outcome.report.tools.tools_used.len(), 1);
}

#[tokio::test]
async fn cancelled_validation_still_writes_reports() {
    let out = tempfile::tempdir().unwrap();
    let service = ReconService::new(lab_sources(), validator(), ReportWriter::new(out.path()));

    let aggregation = service.discover(&target(), &Shutdown::never()).await.unwrap();

    let (trigger, shutdown) = shutdown::channel();
    trigger.trigger();
    let validation = service.validate(&aggregation, &shutdown, None).await;
    assert_eq!(validation.skipped, 3);

    let outcome = service
        .finish(&target(), aggregation, validation, Utc::now())
        .await
        .unwrap();
    assert_eq!(outcome.report.total_found, 0);
    assert!(outcome.files.all_json.exists());
    assert_eq!(outcome.skipped, 3);
}

#[tokio::test]
async fn unwritable_output_is_a_report_error() {
    let blocker = tempfile::NamedTempFile::new().unwrap();
    let service = ReconService::new(lab_sources(), validator(), ReportWriter::new(blocker.path()));

    let err = service.run(&target(), &Shutdown::never()).await.unwrap_err();
    assert!(matches!(err, RunError::ReportWrite { .. }));
}
