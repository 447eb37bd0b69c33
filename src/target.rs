//! Base URL resolution for the Graylog REST API.

use crate::config::ConfigError;

use reqwest::Url;
use std::fmt;

/// A validated API base URL: scheme, host, port and optional path prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    base: String,
}

impl Target {
    /// Validate a raw URL string and normalize it into a base target.
    ///
    /// The port must be written out explicitly, even when it matches the
    /// scheme default. Query strings and fragments are dropped.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(e.to_string()))?;

        if !has_explicit_port(raw) {
            return Err(ConfigError::MissingPort {
                scheme: url.scheme().to_string(),
            });
        }

        // Url lowercases the scheme, so "HTTP" and "Https" land here too.
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(url.scheme().to_string()));
        }

        let host = url
            .host_str()
            .ok_or_else(|| ConfigError::InvalidUrl(format!("no host in {}", raw)))?;
        let port = url.port_or_known_default().ok_or_else(|| ConfigError::MissingPort {
            scheme: url.scheme().to_string(),
        })?;

        Ok(Self {
            base: format!(
                "{}://{}:{}{}",
                url.scheme(),
                host,
                port,
                url.path().trim_end_matches('/')
            ),
        })
    }

    /// Full URL of an API endpoint below this target.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }

    pub fn as_str(&self) -> &str {
        &self.base
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the authority part of `raw` ends in `:<digits>`.
///
/// `Url::port` hides ports equal to the scheme default, so the check has
/// to look at the text the user actually passed.
fn has_explicit_port(raw: &str) -> bool {
    let rest = raw.split_once("://").map_or(raw, |(_, rest)| rest);
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, host)| host);

    // Skip over bracketed IPv6 literals.
    let after_host = match host_port.rfind(']') {
        Some(idx) => &host_port[idx + 1..],
        None => host_port,
    };

    match after_host.rsplit_once(':') {
        Some((_, port)) => !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}
