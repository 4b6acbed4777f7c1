//! Clap derive structures for the `cipi` CLI.

use std::path::PathBuf;

use clap::{Args, Parser};

/// cipi -- Cisco Prime Infrastructure device inventory as CSV
#[derive(Debug, Parser)]
#[command(
    name = "cipi",
    version,
    about = "Export Cisco Prime Infrastructure device inventory as CSV",
    long_about = "Query the Prime Infrastructure REST API (or a saved JSON response) for the\n\
        device inventory and print the selected attributes as CSV, or dump the\n\
        raw document."
)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionOpts,

    #[command(flatten)]
    pub output: OutputOpts,

    /// Configuration profile to use
    #[arg(long, env = "CIPI_PROFILE")]
    pub profile: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

// ── Connection ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
#[command(next_help_heading = "Connection")]
pub struct ConnectionOpts {
    /// Prime host
    #[arg(long, short = 'H', env = "CIPI_HOST")]
    pub host: Option<String>,

    /// Prime API port [default: 443]
    #[arg(long, short = 'P', env = "CIPI_PORT", value_parser = clap::value_parser!(u16).range(1..))]
    pub port: Option<u16>,

    /// HTTPS connection timeout in seconds [default: 5]
    #[arg(long, short = 't', env = "CIPI_TIMEOUT", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// API username
    #[arg(long, short = 'u', env = "CIPI_USERNAME")]
    pub username: Option<String>,

    /// API password
    #[arg(long, short = 'p', env = "CIPI_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Read JSON data from a file instead of connecting to a Prime server
    #[arg(long, short = 'i', value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Maximum number of devices requested [default: 1000]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_results: Option<u32>,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "CIPI_INSECURE")]
    pub insecure: bool,

    /// Custom CA certificate (PEM)
    #[arg(long, value_name = "FILE")]
    pub ca_cert: Option<PathBuf>,
}

// ── Output ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
#[command(next_help_heading = "Output")]
#[allow(clippy::struct_excessive_bools)]
pub struct OutputOpts {
    /// Device attributes to display, separated by commas. Defaults to all
    #[arg(long, short = 'a', value_name = "ATTRS")]
    pub device_attributes: Option<String>,

    /// Suppress the CSV header
    #[arg(long)]
    pub no_csv_header: bool,

    /// Print the data as a compact JSON dump
    #[arg(long)]
    pub dump: bool,

    /// Print the data as a single-line native structure dump
    #[arg(long)]
    pub dump_native: bool,

    /// Print the data as a pretty-printed native structure dump
    #[arg(long)]
    pub dump_native_pretty: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn short_flags_parse() {
        let cli = Cli::try_parse_from([
            "cipi", "-H", "prime", "-P", "8443", "-u", "admin", "-p", "pw", "-t", "9", "-a",
            "deviceName,ipAddress", "--no-csv-header",
        ])
        .unwrap();

        assert_eq!(cli.connection.host.as_deref(), Some("prime"));
        assert_eq!(cli.connection.port, Some(8443));
        assert_eq!(cli.connection.timeout, Some(9));
        assert_eq!(
            cli.output.device_attributes.as_deref(),
            Some("deviceName,ipAddress")
        );
        assert!(cli.output.no_csv_header);
    }

    #[test]
    fn port_zero_is_rejected() {
        assert!(Cli::try_parse_from(["cipi", "-P", "0"]).is_err());
        assert!(Cli::try_parse_from(["cipi", "-P", "65536"]).is_err());
    }
}
