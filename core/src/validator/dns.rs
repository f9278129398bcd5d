use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::TokioResolver;
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::proto::rr::{RData, RecordType};
use subrecon_common::error::ResolutionFailure;
use subrecon_common::models::record::DnsAnswer;

use super::Resolver;

/// Resolver built from the host's system configuration.
pub struct SystemResolver {
    resolver: TokioResolver,
}

impl SystemResolver {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let mut builder = TokioResolver::builder(TokioConnectionProvider::default())?;
        let opts = builder.options_mut();
        opts.timeout = timeout;
        opts.attempts = 1;

        Ok(Self {
            resolver: builder.build(),
        })
    }
}

#[async_trait]
impl Resolver for SystemResolver {
    async fn resolve(&self, hostname: &str) -> Result<DnsAnswer, ResolutionFailure> {
        // Trailing dot keeps the search list out of the lookup.
        let fqdn = format!("{hostname}.");

        let (ips, cnames) = tokio::join!(
            self.resolver.lookup_ip(fqdn.as_str()),
            self.resolver.lookup(fqdn.as_str(), RecordType::CNAME),
        );

        let ips = ips.map_err(|e| ResolutionFailure::Lookup {
            hostname: hostname.to_string(),
            reason: e.to_string(),
        })?;

        let ip: IpAddr = ips
            .iter()
            .find(IpAddr::is_ipv4)
            .or_else(|| ips.iter().next())
            .ok_or_else(|| ResolutionFailure::NoRecords(hostname.to_string()))?;

        let cname: Option<String> = cnames.ok().and_then(|lookup| {
            lookup.iter().find_map(|rdata| match rdata {
                RData::CNAME(name) => Some(name.to_string().trim_end_matches('.').to_string()),
                _ => None,
            })
        });

        Ok(DnsAnswer {
            ip: Some(ip.to_string()),
            cname,
        })
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
