//! # Reconnaissance Service
//!
//! Implements the "enumerate a domain" use case.
//!
//! The service owns the collaborators of a run (discovery sources, the
//! validator and the report writer) and drives them stage by stage. The
//! stages are public on their own so a front end can report progress between
//! them; [`ReconService::run`] chains them for callers that do not care.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use subrecon_common::config::Config;
use subrecon_common::error::RunError;
use subrecon_common::models::report::RunReport;
use subrecon_common::models::target::Domain;
use subrecon_common::success;
use tracing::info;

use crate::aggregator::{self, Aggregation};
use crate::report::{self, writer::ReportWriter, writer::WrittenReports};
use crate::shutdown::Shutdown;
use crate::sources::{self, SubdomainSource, external, file::HostListFile};
use crate::validator::{ProgressCallback, Validation, Validator};

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct ReconOutcome {
    pub report: RunReport,
    pub files: WrittenReports,
    /// Hosts left unvalidated because the run was cancelled.
    pub skipped: usize,
}

pub struct ReconService {
    sources: Vec<Box<dyn SubdomainSource>>,
    validator: Validator,
    writer: ReportWriter,
}

impl ReconService {
    pub fn new(
        sources: Vec<Box<dyn SubdomainSource>>,
        validator: Validator,
        writer: ReportWriter,
    ) -> Self {
        Self {
            sources,
            validator,
            writer,
        }
    }

    /// Service wired with the configured tools, host files, system resolver
    /// and HTTP client.
    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        let mut sources: Vec<Box<dyn SubdomainSource>> = Vec::new();

        // Host files without an explicit tool selection means an offline run.
        let offline = cfg.tools.is_empty() && !cfg.host_files.is_empty();
        if !offline {
            for tool in external::select(&cfg.tools, cfg.tool_timeout)? {
                sources.push(Box::new(tool));
            }
        }
        for source in HostListFile::for_paths(&cfg.host_files) {
            sources.push(Box::new(source));
        }

        Ok(Self::new(
            sources,
            Validator::from_config(cfg)?,
            ReportWriter::new(cfg.output_dir.clone()),
        ))
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|source| source.name()).collect()
    }

    pub fn output_dir(&self) -> PathBuf {
        self.writer.output_dir().to_path_buf()
    }

    /// Runs the sources and merges their output into the unique set.
    pub async fn discover(&self, target: &Domain, shutdown: &Shutdown) -> Result<Aggregation, RunError> {
        let results = sources::collect(&self.sources, target, shutdown).await;
        if !results.has_output() {
            return Err(RunError::NoToolOutput);
        }

        let aggregation = aggregator::merge(target, &results);
        if aggregation.is_empty() {
            return Err(RunError::NoSubdomains(target.to_string()));
        }

        success!("{} unique subdomains of {target}", aggregation.len());
        Ok(aggregation)
    }

    pub async fn validate(
        &self,
        aggregation: &Aggregation,
        shutdown: &Shutdown,
        on_validated: Option<ProgressCallback>,
    ) -> Validation {
        info!(
            "Validating {} hosts, {} at a time",
            aggregation.len(),
            self.validator.limits().concurrency
        );
        self.validator
            .validate_all(&aggregation.subdomains, shutdown, on_validated)
            .await
    }

    /// Builds the report and writes every artifact.
    pub async fn finish(
        &self,
        target: &Domain,
        aggregation: Aggregation,
        validation: Validation,
        started_at: DateTime<Utc>,
    ) -> Result<ReconOutcome, RunError> {
        let report = report::build(target, validation.records, aggregation.tools, started_at);
        let files = self.writer.write(&report).await?;

        success!("Reports written to {}", self.writer.output_dir().display());
        Ok(ReconOutcome {
            report,
            files,
            skipped: validation.skipped,
        })
    }

    /// One complete run: discover, validate, report.
    pub async fn run(&self, target: &Domain, shutdown: &Shutdown) -> Result<ReconOutcome, RunError> {
        let started_at = Utc::now();
        let aggregation = self.discover(target, shutdown).await?;
        let validation = self.validate(&aggregation, shutdown, None).await;
        self.finish(target, aggregation, validation, started_at).await
    }
}
