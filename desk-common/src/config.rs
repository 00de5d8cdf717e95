//! Configuration management for Desk services.
//!
//! All configuration is read once from the process environment at startup.
//! Missing required values fail fast with a named error so a misconfigured
//! deployment never reaches the serving loop.
//!
//! # Environment Variable Mapping
//!
//! ## Jira (required)
//! - `JIRA_BASE_URL` → jira.base_url (trailing `/` trimmed)
//! - `JIRA_EMAIL` → jira.email
//! - `JIRA_API_TOKEN` → jira.api_token
//!
//! ## Jira (optional)
//! - `JIRA_PROJECT_KEY` → jira.project_key (default "IIS")
//! - `JIRA_ISSUE_TYPE` → jira.issue_type (default "Task")
//!
//! ## Service
//! - `DESK_BIND_ADDRESS` → service.bind (default "127.0.0.1")
//! - `DESK_ACTION_PORT` → service.port (default 4470)
//!
//! ## Observability
//! - `DESK_LOG_LEVEL` → observability.log_level (default "info")
//! - `DESK_LOG_FORMAT` → observability.log_format (default "pretty")

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ============================================================================
// Service Configuration
// ============================================================================

/// Network settings for the action service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Bind address. Default: "127.0.0.1" (local only).
    #[serde(default = "default_bind_address")]
    pub bind: String,

    /// Listen port for the action service.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind: default_bind_address(),
            port: default_port(),
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    4470
}

// ============================================================================
// Jira Configuration
// ============================================================================

/// Connection settings for the Jira Cloud REST API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraConfig {
    /// Base URL of the Jira site, without trailing slash.
    pub base_url: String,

    /// Account email used for Basic auth.
    pub email: String,

    /// Raw API token used for Basic auth.
    pub api_token: String,

    /// Project key new issues are created under.
    #[serde(default = "default_project_key")]
    pub project_key: String,

    /// Issue type name for created issues.
    #[serde(default = "default_issue_type")]
    pub issue_type: String,
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            email: String::new(),
            api_token: String::new(),
            project_key: default_project_key(),
            issue_type: default_issue_type(),
        }
    }
}

fn default_project_key() -> String {
    "IIS".to_string()
}

fn default_issue_type() -> String {
    "Task".to_string()
}

// ============================================================================
// Observability Configuration
// ============================================================================

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Base log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Output format: "json" or "pretty".
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

// ============================================================================
// Root Configuration
// ============================================================================

/// Unified configuration for the Desk services.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub jira: JiraConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Required variables produce `Error::Config` naming the missing key.
    pub fn from_env() -> Result<Self> {
        let base_url = trim_base_url(&required_var("JIRA_BASE_URL")?);
        let email = required_var("JIRA_EMAIL")?;
        let api_token = required_var("JIRA_API_TOKEN")?;

        let port = match optional_var("DESK_ACTION_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| Error::Config(format!("DESK_ACTION_PORT is not a valid port: {raw}")))?,
            None => default_port(),
        };

        Ok(Self {
            service: ServiceConfig {
                bind: optional_var("DESK_BIND_ADDRESS").unwrap_or_else(default_bind_address),
                port,
            },
            jira: JiraConfig {
                base_url,
                email,
                api_token,
                project_key: optional_var("JIRA_PROJECT_KEY").unwrap_or_else(default_project_key),
                issue_type: optional_var("JIRA_ISSUE_TYPE").unwrap_or_else(default_issue_type),
            },
            observability: ObservabilityConfig {
                log_level: optional_var("DESK_LOG_LEVEL").unwrap_or_else(default_log_level),
                log_format: optional_var("DESK_LOG_FORMAT").unwrap_or_else(default_log_format),
            },
        })
    }
}

/// Read a required environment variable, failing with a named error.
fn required_var(name: &str) -> Result<String> {
    match optional_var(name) {
        Some(value) => Ok(value),
        None => Err(Error::Config(format!("{name} is not set"))),
    }
}

/// Read an optional environment variable; empty values count as unset.
fn optional_var(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

/// Trim trailing slashes so path joining stays predictable.
fn trim_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_base_url() {
        assert_eq!(trim_base_url("https://x.atlassian.net/"), "https://x.atlassian.net");
        assert_eq!(trim_base_url("https://x.atlassian.net//"), "https://x.atlassian.net");
        assert_eq!(trim_base_url("https://x.atlassian.net"), "https://x.atlassian.net");
    }

    #[test]
    fn test_section_defaults() {
        let config = Config::default();
        assert_eq!(config.service.bind, "127.0.0.1");
        assert_eq!(config.service.port, 4470);
        assert_eq!(config.jira.project_key, "IIS");
        assert_eq!(config.jira.issue_type, "Task");
        assert_eq!(config.observability.log_level, "info");
        assert_eq!(config.observability.log_format, "pretty");
    }

    // Environment mutation happens in a single test so parallel test threads
    // never race on the same variables.
    #[test]
    fn test_from_env() {
        let vars = [
            "JIRA_BASE_URL",
            "JIRA_EMAIL",
            "JIRA_API_TOKEN",
            "JIRA_PROJECT_KEY",
            "JIRA_ISSUE_TYPE",
            "DESK_ACTION_PORT",
        ];
        for var in vars {
            std::env::remove_var(var);
        }

        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("JIRA_BASE_URL"));

        std::env::set_var("JIRA_BASE_URL", "https://example.atlassian.net/");
        std::env::set_var("JIRA_EMAIL", "bot@example.com");
        std::env::set_var("JIRA_API_TOKEN", "token-123");

        let config = Config::from_env().unwrap();
        assert_eq!(config.jira.base_url, "https://example.atlassian.net");
        assert_eq!(config.jira.project_key, "IIS");
        assert_eq!(config.jira.issue_type, "Task");
        assert_eq!(config.service.port, 4470);

        std::env::set_var("JIRA_PROJECT_KEY", "OPS");
        std::env::set_var("DESK_ACTION_PORT", "9100");
        let config = Config::from_env().unwrap();
        assert_eq!(config.jira.project_key, "OPS");
        assert_eq!(config.service.port, 9100);

        std::env::set_var("DESK_ACTION_PORT", "not-a-port");
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("DESK_ACTION_PORT"));

        for var in vars {
            std::env::remove_var(var);
        }
    }
}
