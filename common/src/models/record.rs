use serde::{Deserialize, Serialize};

use super::subdomain::{Level, Subdomain};

/// What DNS had to say about a hostname. Both fields are best-effort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DnsAnswer {
    pub ip: Option<String>,
    pub cname: Option<String>,
}

/// The outcome of validating one [`Subdomain`].
///
/// Failures are never carried as errors, only as absent fields: a host whose
/// lookup failed has no `ip`, a host whose probe failed has no `http_status`
/// and is inactive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRecord {
    pub hostname: String,
    pub ip: Option<String>,
    pub cname: Option<String>,
    pub http_status: Option<u16>,
    pub active: bool,
    pub level: Level,
}

impl ValidationRecord {
    pub fn new(subdomain: &Subdomain, dns: DnsAnswer, http_status: Option<u16>) -> Self {
        Self {
            hostname: subdomain.hostname.clone(),
            ip: dns.ip,
            cname: dns.cname,
            active: http_status.is_some(),
            http_status,
            level: subdomain.level,
        }
    }

    /// Record for a host whose validation produced nothing at all.
    pub fn inactive(subdomain: &Subdomain) -> Self {
        Self::new(subdomain, DnsAnswer::default(), None)
    }
}
