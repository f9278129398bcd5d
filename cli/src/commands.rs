pub mod enumerate;
pub mod tools;

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};
use subrecon_common::config::{self, Config};
use subrecon_common::models::target::Domain;

#[derive(Parser)]
#[command(name = "subrecon")]
#[command(about = "Subdomain enumeration with DNS and HTTP validation.")]
#[command(version)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Skip the banner
    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Print less; -qq leaves only the summary
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Show per-host DNS and HTTP failures
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Discover and validate the subdomains of a domain
    #[command(alias = "e")]
    Enumerate(EnumerateArgs),
    /// List the supported discovery tools and whether they are installed
    #[command(alias = "t")]
    Tools,
}

#[derive(Args)]
pub struct EnumerateArgs {
    /// Apex domain to enumerate, e.g. vulnweb.com
    pub domain: Domain,

    /// Discovery tools to run, comma separated (default: all default tools)
    #[arg(short, long = "tools", value_delimiter = ',')]
    pub tools: Vec<String>,

    /// Extra hostnames, one per line; alone it replaces the tools
    #[arg(long = "hosts-file", value_name = "FILE")]
    pub host_files: Vec<PathBuf>,

    /// Directory for the JSON and text reports
    #[arg(short, long, default_value = config::DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Hosts validated at the same time
    #[arg(short, long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..=1024))]
    pub concurrency: u32,

    /// DNS lookup timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 3, value_parser = clap::value_parser!(u64).range(1..))]
    pub dns_timeout: u64,

    /// HTTP probe timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    pub http_timeout: u64,

    /// Redirects followed before the last response is kept
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(0..=30))]
    pub max_redirects: u32,

    /// Per-tool timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 300, value_parser = clap::value_parser!(u64).range(1..))]
    pub tool_timeout: u64,

    /// Stop dispatching new validations after this many seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub run_timeout: Option<u64>,
}

impl EnumerateArgs {
    pub fn into_config(self, quiet: u8) -> Config {
        let mut cfg = Config::new(self.domain);
        cfg.tools = self.tools;
        cfg.host_files = self.host_files;
        cfg.output_dir = self.output;
        cfg.concurrency_limit = self.concurrency as usize;
        cfg.dns_timeout = Duration::from_secs(self.dns_timeout);
        cfg.http_timeout = Duration::from_secs(self.http_timeout);
        cfg.max_redirects = self.max_redirects as usize;
        cfg.tool_timeout = Duration::from_secs(self.tool_timeout);
        cfg.run_timeout = self.run_timeout.map(Duration::from_secs);
        cfg.quiet = quiet;
        cfg
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
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
