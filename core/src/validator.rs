//! Liveness validation of the unique subdomain set.
//!
//! Every hostname gets one DNS step and one HTTP step, each bounded by its
//! own timeout. The two steps are independent: a failed lookup does not
//! prevent the probe, since some environments reach hosts through paths the
//! resolver does not see.
//!
//! Hosts are validated on a bounded pool of tokio tasks. Whatever goes wrong
//! for one host, including a panic in its task, ends up as absent fields on
//! that host's [`ValidationRecord`] and never affects the others.

use std::collections::BTreeSet;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use futures::FutureExt;
use subrecon_common::config::Config;
use subrecon_common::error::{ProbeFailure, ResolutionFailure};
use subrecon_common::models::record::{DnsAnswer, ValidationRecord};
use subrecon_common::models::subdomain::Subdomain;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::shutdown::Shutdown;

pub mod dns;
pub mod http;

/// Looks up the address and canonical name of a host.
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(&self, hostname: &str) -> Result<DnsAnswer, ResolutionFailure>;
}

/// Issues a single HTTP request and reports the final status code.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, hostname: &str) -> Result<u16, ProbeFailure>;
}

pub type ProgressCallback = Box<dyn Fn(usize) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub concurrency: usize,
    pub dns_timeout: Duration,
    pub http_timeout: Duration,
}

impl From<&Config> for Limits {
    fn from(cfg: &Config) -> Self {
        Self {
            concurrency: cfg.concurrency_limit,
            dns_timeout: cfg.dns_timeout,
            http_timeout: cfg.http_timeout,
        }
    }
}

/// Records produced by [`Validator::validate_all`].
#[derive(Debug, Clone, Default)]
pub struct Validation {
    pub records: Vec<ValidationRecord>,
    /// Hosts never dispatched because the run was cancelled.
    pub skipped: usize,
}

#[derive(Clone)]
pub struct Validator {
    resolver: Arc<dyn Resolver>,
    prober: Arc<dyn Prober>,
    limits: Limits,
}

impl Validator {
    pub fn new(resolver: Arc<dyn Resolver>, prober: Arc<dyn Prober>, limits: Limits) -> Self {
        Self {
            resolver,
            prober,
            limits,
        }
    }

    /// Validator backed by the system resolver and a real HTTP client.
    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        let resolver = dns::SystemResolver::new(cfg.dns_timeout)?;
        let prober = http::HttpProber::new(cfg.http_timeout, cfg.max_redirects, &cfg.user_agent)?;
        Ok(Self::new(Arc::new(resolver), Arc::new(prober), Limits::from(cfg)))
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub async fn validate(&self, subdomain: &Subdomain) -> ValidationRecord {
        let host: &str = &subdomain.hostname;

        let dns: DnsAnswer = match timeout(self.limits.dns_timeout, self.resolver.resolve(host)).await {
            Ok(Ok(answer)) => answer,
            Ok(Err(failure)) => {
                debug!("{failure}");
                DnsAnswer::default()
            }
            Err(_elapsed) => {
                debug!("{}", ResolutionFailure::TimedOut(host.to_string()));
                DnsAnswer::default()
            }
        };

        let http_status: Option<u16> = match timeout(self.limits.http_timeout, self.prober.probe(host)).await {
            Ok(Ok(status)) => Some(status),
            Ok(Err(failure)) => {
                debug!("{failure}");
                None
            }
            Err(_elapsed) => {
                debug!("{}", ProbeFailure::TimedOut(host.to_string()));
                None
            }
        };

        ValidationRecord::new(subdomain, dns, http_status)
    }

    /// Validates every subdomain with at most `limits.concurrency` in flight.
    ///
    /// Once `shutdown` fires no further hosts are dispatched; hosts already
    /// running finish normally. `on_validated` receives the running count of
    /// finished hosts.
    pub async fn validate_all(
        &self,
        subdomains: &BTreeSet<Subdomain>,
        shutdown: &Shutdown,
        on_validated: Option<ProgressCallback>,
    ) -> Validation {
        let semaphore = Arc::new(Semaphore::new(self.limits.concurrency.max(1)));
        let finished = Arc::new(AtomicUsize::new(0));
        let callback: Option<Arc<ProgressCallback>> = on_validated.map(Arc::new);

        let mut tasks: JoinSet<ValidationRecord> = JoinSet::new();
        let mut queue = subdomains.iter();
        let mut skipped: usize = 0;

        while let Some(subdomain) = queue.next() {
            let permit = tokio::select! {
                biased;
                _ = shutdown.cancelled() => None,
                permit = semaphore.clone().acquire_owned() => permit.ok(),
            };

            let Some(permit) = permit else {
                skipped = 1 + queue.count();
                warn!("Validation cancelled, {skipped} hosts were not checked");
                break;
            };

            let validator = self.clone();
            let subdomain = subdomain.clone();
            let finished = finished.clone();
            let callback = callback.clone();

            tasks.spawn(async move {
                let _permit = permit;
                let record = match AssertUnwindSafe(validator.validate(&subdomain)).catch_unwind().await {
                    Ok(record) => record,
                    Err(_panic) => {
                        warn!("Validation of {} panicked", subdomain.hostname);
                        ValidationRecord::inactive(&subdomain)
                    }
                };
                let count = finished.fetch_add(1, Ordering::Relaxed) + 1;
                if let Some(cb) = &callback {
                    cb(count);
                }
                record
            });
        }

        let mut records: Vec<ValidationRecord> = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(record) => records.push(record),
                Err(e) => warn!("Validation task did not complete: {e}"),
            }
        }

        Validation { records, skipped }
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
