//! check_graylog - monitoring plugin for Graylog servers.
//!
//! Queries the Graylog REST API once and prints a single status line of
//! the form `STATE - message|perfdata`, exiting with the state's code.

mod api;
mod check;
mod config;
mod target;

use api::GraylogClient;
use check::{run_check, Report, Severity};
use config::{CheckConfig, Cli, ConfigError};

use clap::{CommandFactory, Parser};
use std::process;
use tracing_subscriber::filter::{LevelFilter, ParseError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// License information
const AUTHOR: &str = "Antonino Catinello";
const YEAR: &str = "2016 - 2018";
const COPYRIGHT: &str = "\u{00A9}";
const CONTRIBUTORS: &str = "kahluagenie, theherodied";

#[tokio::main]
async fn main() {
    // clap would exit with 2 on bad flags, which reads as CRITICAL.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            process::exit(Severity::Unknown.exit_code());
        }
    };

    let debug = config::debug_enabled();
    if let Err(e) = init_logging(debug) {
        eprintln!("invalid log filter: {}", e);
    }

    if cli.version {
        println!("{}", version_text());
        process::exit(Severity::Unknown.exit_code());
    }

    let report = match CheckConfig::resolve(cli, debug) {
        Ok(cfg) => execute(&cfg).await,
        Err(ConfigError::MissingCredentials) => {
            println!("{}", ConfigError::MissingCredentials);
            println!("{}", Cli::command().render_help());
            process::exit(Severity::Unknown.exit_code());
        }
        Err(e) => {
            tracing::debug!(error = ?e, detail = ?e.detail(), "invalid configuration");
            Report::failure(e.severity(), e.to_string())
        }
    };

    println!("{}", report);
    process::exit(report.severity.exit_code());
}

async fn execute(cfg: &CheckConfig) -> Report {
    tracing::debug!(
        url = %cfg.target,
        insecure = cfg.insecure,
        thresholds = ?cfg.thresholds,
        "starting check"
    );

    match GraylogClient::from_config(cfg) {
        Ok(client) => run_check(&client, cfg.thresholds.as_ref()).await,
        Err(e) => e.into(),
    }
}

fn version_text() -> String {
    format!(
        "Version: {} License: {} {} {} {}\nContributors: {}",
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_LICENSE"),
        COPYRIGHT,
        YEAR,
        AUTHOR,
        CONTRIBUTORS
    )
}

/// Log to stderr so stdout only carries the status line.
fn init_logging(debug: bool) -> Result<(), ParseError> {
    let base = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(log_filter(base, debug)?)
        .init();

    Ok(())
}

/// The debug toggle adds its directive on top of whatever `RUST_LOG` says.
fn log_filter(base: EnvFilter, debug: bool) -> Result<EnvFilter, ParseError> {
    if !debug {
        return Ok(base);
    }
    Ok(base.add_directive("check_graylog=debug".parse()?))
}
