//! Configuration module for the Graylog check.
//!
//! Everything comes from command line flags, plus a single environment
//! variable that switches on debug output.

use crate::check::{Severity, Thresholds};
use crate::target::Target;

use clap::Parser;
use std::env;
use std::fmt;
use thiserror::Error;

/// Environment variable enabling debug output when set to a non-empty value.
pub const DEBUG_ENV: &str = "NCG2";

/// Default Graylog API URL.
pub const DEFAULT_URL: &str = "http://localhost:12900";

/// Command line flags.
#[derive(Parser, Debug)]
#[command(
    name = "check_graylog",
    about = "Check the health of a Graylog server through its REST API",
    disable_version_flag = true
)]
pub struct Cli {
    /// Graylog API URL
    #[arg(short = 'l', value_name = "URL", default_value = DEFAULT_URL)]
    pub link: String,

    /// API username
    #[arg(short = 'u', value_name = "USER")]
    pub user: Option<String>,

    /// API password
    #[arg(short = 'p', value_name = "PASS")]
    pub pass: Option<String>,

    /// Accept insecure SSL/TLS certificates. (optional)
    #[arg(long)]
    pub insecure: bool,

    /// Index error warning limit, absolute or N%. (optional)
    #[arg(short = 'w', value_name = "LIMIT")]
    pub warning: Option<String>,

    /// Index error critical limit, absolute or N%. (optional)
    #[arg(short = 'c', value_name = "LIMIT")]
    pub critical: Option<String>,

    /// Display version and license information. (info)
    #[arg(long)]
    pub version: bool,
}

/// Configuration errors.
///
/// The display text is what ends up in the status line.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("API Username/Password is mandatory.")]
    MissingCredentials,
    #[error("Cannot parse given URL.")]
    InvalidUrl(String),
    #[error("Port number is missing. Please try {scheme}://hostname:port")]
    MissingPort { scheme: String },
    #[error("Only HTTP is supported as protocol.")]
    UnsupportedScheme(String),
    #[error("Cannot parse given index {level} error value.")]
    InvalidThreshold { level: &'static str, value: String },
}

impl ConfigError {
    pub fn severity(&self) -> Severity {
        Severity::Unknown
    }

    /// The offending input or parser message, for debug logging.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ConfigError::InvalidUrl(reason) => Some(reason),
            ConfigError::UnsupportedScheme(scheme) => Some(scheme),
            ConfigError::InvalidThreshold { value, .. } => Some(value),
            ConfigError::MissingCredentials | ConfigError::MissingPort { .. } => None,
        }
    }
}

/// API credentials. Held in memory for the lifetime of the process only.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Resolved configuration for one check run.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    pub target: Target,
    pub credentials: Credentials,
    /// Skip TLS certificate verification.
    pub insecure: bool,
    /// Index failure limits. `None` unless both were given.
    pub thresholds: Option<Thresholds>,
    pub debug: bool,
}

impl CheckConfig {
    /// Validate the parsed flags.
    ///
    /// Credentials are checked first, then the URL, then the thresholds.
    pub fn resolve(cli: Cli, debug: bool) -> Result<Self, ConfigError> {
        let credentials = match (non_empty(cli.user), non_empty(cli.pass)) {
            (Some(username), Some(password)) => Credentials { username, password },
            _ => return Err(ConfigError::MissingCredentials),
        };

        let target = Target::parse(&cli.link)?;

        let thresholds = match (non_empty(cli.warning), non_empty(cli.critical)) {
            (Some(warning), Some(critical)) => Some(Thresholds::parse(&warning, &critical)?),
            _ => None,
        };

        Ok(Self {
            target,
            credentials,
            insecure: cli.insecure,
            thresholds,
            debug,
        })
    }
}

/// Read the debug toggle from the environment.
pub fn debug_enabled() -> bool {
    env::var_os(DEBUG_ENV).is_some_and(|v| !v.is_empty())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
