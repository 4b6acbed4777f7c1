//! CLI configuration — resolves flags, env vars, and the active profile
//! into a `cipi_core::Invocation`.
//!
//! Precedence: CLI flag (or its env var) > profile > `[defaults]`.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use cipi_api::{DeviceQuery, TlsMode};
use cipi_config::{Config, Profile};
use cipi_core::{DataSource, Invocation, OutputMode, RemoteSource, attributes};

use crate::cli::Cli;
use crate::error::CliError;

/// The resolved invocation plus the config path used for diagnostics.
pub struct Resolved {
    pub invocation: Invocation,
    pub config_path: String,
}

/// Load the config file and resolve the invocation against it.
pub fn resolve(cli: &Cli) -> Result<Resolved, CliError> {
    let path = cipi_config::config_path();
    let config_path = path.display().to_string();

    let cfg = cipi_config::load_config_from(&path)
        .map_err(|e| CliError::from_config(&e, &config_path))?;
    let invocation = build_invocation(cli, &cfg, &config_path)?;

    Ok(Resolved {
        invocation,
        config_path,
    })
}

/// Translate CLI flags + config into an `Invocation`.
pub fn build_invocation(cli: &Cli, cfg: &Config, config_path: &str) -> Result<Invocation, CliError> {
    let profile_name = cfg.active_profile_name(cli.profile.as_deref());
    let profile = match cfg.profiles.get(&profile_name) {
        Some(profile) => Some(profile),
        // Only an explicitly requested profile has to exist.
        None if cli.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: cfg.profile_names(),
                path: config_path.to_owned(),
            });
        }
        None => None,
    };
    tracing::debug!(profile = %profile_name, found = profile.is_some(), "resolving invocation");

    // 1. Attributes (flag > profile > full whitelist)
    let attributes = match (&cli.output.device_attributes, profile) {
        (Some(raw), _) => attributes::parse_list(raw),
        (None, Some(Profile {
            attributes: Some(list),
            ..
        })) => list.clone(),
        _ => Vec::new(),
    };

    // 2. Output mode
    let mode = OutputMode::from_flags(
        cli.output.dump,
        cli.output.dump_native,
        cli.output.dump_native_pretty,
    );

    // 3. Source (file input short-circuits the connection settings)
    let source = match cli.connection.input {
        Some(ref path) => DataSource::File(path.clone()),
        None => DataSource::Remote(remote_source(cli, cfg, profile, &profile_name)),
    };

    Ok(Invocation {
        source,
        attributes,
        mode,
        header: !cli.output.no_csv_header,
    })
}

fn remote_source(
    cli: &Cli,
    cfg: &Config,
    profile: Option<&Profile>,
    profile_name: &str,
) -> RemoteSource {
    let opts = &cli.connection;
    let defaults = &cfg.defaults;

    let host = opts
        .host
        .clone()
        .or_else(|| profile.and_then(|p| p.host.clone()));
    let username = opts
        .username
        .clone()
        .or_else(|| profile.and_then(|p| p.username.clone()));
    let password = opts
        .password
        .clone()
        .map(SecretString::from)
        .or_else(|| profile.and_then(|p| cipi_config::resolve_password(p, profile_name)));

    let port = opts
        .port
        .or_else(|| profile.and_then(|p| p.port))
        .unwrap_or(defaults.port);
    let timeout = opts
        .timeout
        .or_else(|| profile.and_then(|p| p.timeout))
        .unwrap_or(defaults.timeout);
    let max_results = opts
        .max_results
        .or_else(|| profile.and_then(|p| p.max_results))
        .unwrap_or(defaults.max_results);

    RemoteSource {
        host,
        port,
        username,
        password,
        timeout: Duration::from_secs(timeout),
        tls: tls_mode(cli, cfg, profile),
        query: DeviceQuery {
            full_detail: true,
            max_results,
        },
    }
}

fn tls_mode(cli: &Cli, cfg: &Config, profile: Option<&Profile>) -> TlsMode {
    let insecure = cli.connection.insecure
        || profile
            .and_then(|p| p.insecure)
            .unwrap_or(cfg.defaults.insecure);
    let ca_cert: Option<PathBuf> = cli
        .connection
        .ca_cert
        .clone()
        .or_else(|| profile.and_then(|p| p.ca_cert.clone()));

    if insecure {
        TlsMode::DangerAcceptInvalid
    } else if let Some(path) = ca_cert {
        TlsMode::CustomCa(path)
    } else {
        TlsMode::System
    }
}
