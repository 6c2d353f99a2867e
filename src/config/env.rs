// src/config/env.rs
// Environment-based configuration - single source of truth for all env vars

use crate::error::TraceError;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

/// Which MCP transport to serve on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transport {
    /// stdio transport (default, for agent runtimes that spawn the server)
    #[default]
    Stdio,
    /// Streamable HTTP transport on host:port
    Http,
}

impl FromStr for Transport {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stdio" => Ok(Transport::Stdio),
            "http" => Ok(Transport::Http),
            other => Err(TraceError::Config(format!(
                "unknown transport '{}' (expected stdio or http)",
                other
            ))),
        }
    }
}

/// Server settings loaded from environment variables
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the CommonTrace API (COMMONTRACE_API_BASE_URL)
    pub api_base_url: String,
    /// Bearer token for the API (COMMONTRACE_API_KEY)
    pub api_key: Option<String>,
    /// MCP transport mode (COMMONTRACE_MCP_TRANSPORT)
    pub transport: Transport,
    /// Bind host for the http transport (COMMONTRACE_MCP_HOST)
    pub host: String,
    /// Bind port for the http transport (COMMONTRACE_MCP_PORT)
    pub port: u16,
    /// Failures before the circuit trips (COMMONTRACE_CIRCUIT_FAILURE_THRESHOLD)
    pub circuit_failure_threshold: u32,
    /// How long a tripped circuit stays open (COMMONTRACE_CIRCUIT_RECOVERY_TIMEOUT, seconds)
    pub circuit_recovery_timeout: Duration,
    /// Timeout for search/get/list_tags calls (COMMONTRACE_READ_TIMEOUT, seconds)
    pub read_timeout: Duration,
    /// Timeout for contribute/vote/amend calls (COMMONTRACE_WRITE_TIMEOUT, seconds)
    pub write_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            api_key: None,
            transport: Transport::Stdio,
            host: "0.0.0.0".to_string(),
            port: 8080,
            circuit_failure_threshold: 5,
            circuit_recovery_timeout: Duration::from_secs(30),
            read_timeout: Duration::from_secs(10),
            write_timeout: Duration::from_secs(30),
        }
    }
}

impl Settings {
    /// Load all settings from environment variables (call once at startup)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let transport = read_var("COMMONTRACE_MCP_TRANSPORT")
            .and_then(|t| match t.parse::<Transport>() {
                Ok(t) => Some(t),
                Err(e) => {
                    warn!("{} - using stdio", e);
                    None
                }
            })
            .unwrap_or_default();

        let settings = Self {
            api_base_url: read_var("COMMONTRACE_API_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            api_key: read_var("COMMONTRACE_API_KEY"),
            transport,
            host: read_var("COMMONTRACE_MCP_HOST").unwrap_or(defaults.host),
            port: parse_var("COMMONTRACE_MCP_PORT").unwrap_or(defaults.port),
            circuit_failure_threshold: parse_var("COMMONTRACE_CIRCUIT_FAILURE_THRESHOLD")
                .unwrap_or(defaults.circuit_failure_threshold),
            circuit_recovery_timeout: duration_var(
                "COMMONTRACE_CIRCUIT_RECOVERY_TIMEOUT",
                defaults.circuit_recovery_timeout,
            ),
            read_timeout: duration_var("COMMONTRACE_READ_TIMEOUT", defaults.read_timeout),
            write_timeout: duration_var("COMMONTRACE_WRITE_TIMEOUT", defaults.write_timeout),
        };

        debug!(
            base_url = %settings.api_base_url,
            transport = ?settings.transport,
            "Settings loaded"
        );
        settings
    }

    /// Bind address for the http transport
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigValidation {
        let mut validation = ConfigValidation::new();

        if self.api_key.is_none() {
            validation.add_warning(
                "No COMMONTRACE_API_KEY configured - contributions and votes will be rejected upstream.",
            );
        }

        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://") {
            validation.add_error(format!(
                "COMMONTRACE_API_BASE_URL '{}' is not an http(s) URL",
                self.api_base_url
            ));
        }

        if self.circuit_failure_threshold == 0 {
            validation.add_error("COMMONTRACE_CIRCUIT_FAILURE_THRESHOLD must be at least 1");
        }

        validation
    }
}

/// Read an env var, filtering empty values
fn read_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read and parse an env var, warning (not failing) on parse errors
fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    let raw = read_var(name)?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(var = name, value = %raw, "Could not parse env var, using default");
            None
        }
    }
}

/// Read a duration env var given in seconds, warning (not failing) on
/// values a Duration cannot hold (negative, NaN, overflow)
fn duration_var(name: &str, default: Duration) -> Duration {
    let Some(secs) = parse_var::<f64>(name) else {
        return default;
    };
    match Duration::try_from_secs_f64(secs) {
        Ok(d) => d,
        Err(_) => {
            warn!(
                var = name,
                value = secs,
                "Duration must be a non-negative number of seconds, using default"
            );
            default
        }
    }
}

/// Configuration validation result
#[derive(Debug, Default)]
pub struct ConfigValidation {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl ConfigValidation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Format as a human-readable report
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        if !self.errors.is_empty() {
            lines.push("Errors:".to_string());
            for err in &self.errors {
                lines.push(format!("  - {}", err));
            }
        }

        if !self.warnings.is_empty() {
            lines.push("Warnings:".to_string());
            for warn in &self.warnings {
                lines.push(format!("  - {}", warn));
            }
        }

        if lines.is_empty() {
            "Configuration OK".to_string()
        } else {
            lines.join("\n")
        }
    }
}
