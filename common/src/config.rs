use std::path::PathBuf;
use std::time::Duration;

use crate::models::target::Domain;

pub const DEFAULT_CONCURRENCY: usize = 20;
pub const DEFAULT_DNS_TIMEOUT: Duration = Duration::from_secs(3);
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_MAX_REDIRECTS: usize = 5;
pub const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(300);
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_USER_AGENT: &str = concat!("subrecon/", env!("CARGO_PKG_VERSION"));

/// Everything a single run needs to know.
#[derive(Debug, Clone)]
pub struct Config {
    pub target: Domain,

    /// Upper bound on hosts being validated at the same time.
    pub concurrency_limit: usize,
    pub dns_timeout: Duration,
    pub http_timeout: Duration,
    pub max_redirects: usize,

    /// Bound on each discovery tool subprocess.
    pub tool_timeout: Duration,
    /// Once elapsed, no further hosts are dispatched for validation.
    pub run_timeout: Option<Duration>,

    /// Tool names to run. Empty selects the default catalogue.
    pub tools: Vec<String>,
    /// Files with one raw hostname per line, merged like tool output.
    pub host_files: Vec<PathBuf>,

    pub output_dir: PathBuf,
    pub user_agent: String,

    pub quiet: u8,
}

impl Config {
    pub fn new(target: Domain) -> Self {
        Self {
            target,
            concurrency_limit: DEFAULT_CONCURRENCY,
            dns_timeout: DEFAULT_DNS_TIMEOUT,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            tool_timeout: DEFAULT_TOOL_TIMEOUT,
            run_timeout: None,
            tools: Vec::new(),
            host_files: Vec::new(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            quiet: 0,
        }
    }
}
