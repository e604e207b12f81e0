//! Command-line options.
//!
//! `Cli` is what `clap` parses; [`Cli::into_config`] validates it into the
//! library [`Config`]. All validation happens here, before any input is read
//! or any request is made.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tokio::sync::Semaphore;

use crate::config::constants::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::config::types::{ApiFlavor, Config, LogFormat, LogLevel, OutputFormat};
use crate::error_handling::ConfigError;
use crate::filter::ExclusionSet;
use crate::lookup::parse_base_url;

/// Command-line options and configuration.
///
/// # Examples
///
/// ```bash
/// echo "1.2.3.4" | portmap internetdb
/// echo "1.2.3.4/24" | portmap shodan --asn --exclude-ports 80,443
/// portmap internetdb ips.txt -c 16 --json -o results.json
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "portmap",
    version,
    about = "Reports open ports for domains, IPs and CIDR ranges using Shodan data."
)]
pub struct Cli {
    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub silent: bool,

    /// API to query and its options
    #[command(subcommand)]
    pub command: Command,
}

/// API selection. Both subcommands accept the same options.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Query https://internetdb.shodan.io/
    Internetdb(LookupArgs),
    /// Query https://api.shodan.io/shodan/host/
    Shodan(LookupArgs),
}

/// Options shared by every lookup subcommand.
#[derive(Debug, Args)]
pub struct LookupArgs {
    /// Files to read targets from (stdin when omitted)
    #[arg(value_parser)]
    pub inputs: Vec<PathBuf>,

    /// Number of concurrent lookups
    #[arg(short = 'c', long, default_value_t = crate::config::DEFAULT_THREADS)]
    pub threads: usize,

    /// Show ASN and organization
    #[arg(long)]
    pub asn: bool,

    /// Show resolved IP address
    #[arg(long)]
    pub ip: bool,

    /// Show hostnames reported by the API
    #[arg(long)]
    pub hostnames: bool,

    /// Exclude ports (comma-separated)
    #[arg(long, default_value = "")]
    pub exclude_ports: String,

    /// Also write every record to this file
    #[arg(short, long, value_parser)]
    pub output: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Report per-target failures
    #[arg(long)]
    pub verbose: bool,

    /// Seconds to wait after a failed lookup (0 disables)
    #[arg(long, default_value_t = 1)]
    pub failure_delay: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Override the API base URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Validates the parsed options into a [`Config`].
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for an unparseable exclude-port list, a thread
    /// count of zero or above `Semaphore::MAX_PERMITS`, or an invalid API URL.
    pub fn into_config(self) -> Result<Config, ConfigError> {
        let (flavor, args) = match self.command {
            Command::Internetdb(args) => (ApiFlavor::InternetDb, args),
            Command::Shodan(args) => (ApiFlavor::ShodanHost, args),
        };
        args.into_config(flavor)
    }
}

impl LookupArgs {
    fn into_config(self, flavor: ApiFlavor) -> Result<Config, ConfigError> {
        let exclude_ports: ExclusionSet = self.exclude_ports.parse()?;

        if self.threads == 0 {
            return Err(ConfigError::InvalidThreads);
        }
        if self.threads > Semaphore::MAX_PERMITS {
            return Err(ConfigError::TooManyThreads {
                requested: self.threads,
                max: Semaphore::MAX_PERMITS,
            });
        }

        if let Some(ref api_url) = self.api_url {
            parse_base_url(api_url)?;
        }

        Ok(Config {
            inputs: self.inputs,
            flavor,
            api_url: self.api_url,
            threads: self.threads,
            show_asn: self.asn,
            show_ip: self.ip,
            show_hostnames: self.hostnames,
            exclude_ports,
            output: self.output,
            format: if self.json {
                OutputFormat::Json
            } else {
                OutputFormat::Plain
            },
            verbose: self.verbose,
            failure_delay: Duration::from_secs(self.failure_delay),
            timeout_seconds: self.timeout_seconds,
            user_agent: self.user_agent,
            log_level: self.log_level,
            log_format: self.log_format,
        })
    }
}
