//! CLI argument definitions using clap derive macros.

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;

use sharelink_core::AppConfig;
use sharelink_core::api::{DEFAULT_API_BASE_URL, HttpTimeouts};
use sharelink_core::link::DEFAULT_PROVIDER_HOST;

/// Browse and download files from public cloud-disk share links.
///
/// Starts a small web server: paste a share link, page through its files,
/// download one file or a zip of several.
#[derive(Parser, Debug)]
#[command(name = "sharelink")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Address to listen on
    #[arg(short, long, env = "SHARELINK_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// Base URL of the public resource API
    #[arg(long, env = "SHARELINK_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    /// Host whose share links are accepted
    #[arg(long, env = "SHARELINK_PROVIDER_HOST", default_value = DEFAULT_PROVIDER_HOST)]
    pub provider_host: String,

    /// Items per listing page (1-1000)
    #[arg(short = 'p', long, env = "SHARELINK_PAGE_SIZE", default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..=1000))]
    pub page_size: u32,

    /// Listing cache lifetime in seconds (0 disables caching, max 86400)
    #[arg(long, env = "SHARELINK_CACHE_TTL_SECS", default_value_t = 300, value_parser = clap::value_parser!(u64).range(0..=86_400))]
    pub cache_ttl_secs: u64,

    /// Upstream connect timeout in seconds (1-3600)
    #[arg(long, env = "SHARELINK_CONNECT_TIMEOUT_SECS", default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub connect_timeout_secs: u64,

    /// Upstream read timeout in seconds (1-3600)
    #[arg(long, env = "SHARELINK_READ_TIMEOUT_SECS", default_value_t = 300, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub read_timeout_secs: u64,

    /// Concurrent file downloads when building a zip (1-32)
    #[arg(short = 'c', long, env = "SHARELINK_ARCHIVE_CONCURRENCY", default_value_t = 4, value_parser = clap::value_parser!(u8).range(1..=32))]
    pub archive_concurrency: u8,
}

impl Args {
    /// Converts parsed flags into the library configuration.
    pub fn to_config(&self) -> AppConfig {
        AppConfig {
            bind: self.bind,
            api_base_url: self.api_base_url.clone(),
            provider_host: self.provider_host.clone(),
            page_size: self.page_size,
            cache_ttl: Duration::from_secs(self.cache_ttl_secs),
            timeouts: HttpTimeouts {
                connect_secs: self.connect_timeout_secs,
                read_secs: self.read_timeout_secs,
            },
            archive_concurrency: usize::from(self.archive_concurrency),
        }
    }

    /// Default tracing filter when `RUST_LOG` is unset.
    pub fn default_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_args_parses_successfully() {
        let args = Args::try_parse_from(["sharelink"]).unwrap();
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
        assert_eq!(args.page_size, 100);
        assert_eq!(args.cache_ttl_secs, 300);
        assert_eq!(args.archive_concurrency, 4);
    }

    #[test]
    fn test_cli_defaults_match_library_config() {
        let args = Args::try_parse_from(["sharelink"]).unwrap();
        assert_eq!(args.to_config(), AppConfig::default());
    }

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let args = Args::try_parse_from(["sharelink", "-v"]).unwrap();
        assert_eq!(args.verbose, 1);
        assert_eq!(args.default_log_level(), "debug");

        let args = Args::try_parse_from(["sharelink", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
        assert_eq!(args.default_log_level(), "trace");
    }

    #[test]
    fn test_cli_quiet_wins_over_verbose() {
        let args = Args::try_parse_from(["sharelink", "-q", "-v"]).unwrap();
        assert_eq!(args.default_log_level(), "error");
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        let err = Args::try_parse_from(["sharelink", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_version_flag_shows_version() {
        let err = Args::try_parse_from(["sharelink", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_cli_invalid_flag_returns_error() {
        let err = Args::try_parse_from(["sharelink", "--invalid-flag"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_cli_bind_and_overrides() {
        let args = Args::try_parse_from([
            "sharelink",
            "--bind",
            "0.0.0.0:8080",
            "--page-size",
            "25",
            "--cache-ttl-secs",
            "0",
            "--read-timeout-secs",
            "60",
            "-c",
            "8",
        ])
        .unwrap();
        let config = args.to_config();
        assert_eq!(config.bind.to_string(), "0.0.0.0:8080");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.cache_ttl, Duration::ZERO);
        assert_eq!(config.timeouts.read_secs, 60);
        assert_eq!(config.archive_concurrency, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_page_size_zero_rejected() {
        let err = Args::try_parse_from(["sharelink", "--page-size", "0"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_page_size_above_max_rejected() {
        let result = Args::try_parse_from(["sharelink", "-p", "1001"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_archive_concurrency_range() {
        assert!(Args::try_parse_from(["sharelink", "-c", "1"]).is_ok());
        assert!(Args::try_parse_from(["sharelink", "-c", "32"]).is_ok());
        assert!(Args::try_parse_from(["sharelink", "-c", "33"]).is_err());
        assert!(Args::try_parse_from(["sharelink", "-c", "0"]).is_err());
    }

    #[test]
    fn test_cli_invalid_bind_rejected() {
        let err = Args::try_parse_from(["sharelink", "--bind", "not-an-address"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
