//! Jira Cloud API client for ticket operations.

use anyhow::Result;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Method;
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;

use desk_common::config::JiraConfig;

use crate::document::AdfDocument;

/// Fixed timeout applied to every Jira call. A single attempt is made; retry
/// policy belongs to the calling agent, not this adapter.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

// ============================================================================
// Result Type
// ============================================================================

/// Normalized outcome of a Jira call.
///
/// Transport failures and non-2xx responses are captured here instead of
/// propagating, so the caller decides how to surface them. Serializable so
/// error replies can attach the raw outcome verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct TicketResult {
    /// HTTP status of the remote call (synthetic 500 on transport failure).
    pub status: u16,
    /// Short error label, present only on failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Parsed JSON body on success; raw body text or error text otherwise.
    pub body: Value,
}

impl TicketResult {
    /// Successful call with a parsed body.
    fn ok(status: u16, body: Value) -> Self {
        Self {
            status,
            error: None,
            body,
        }
    }

    /// Non-2xx response; the raw body is kept for relaying.
    fn http_error(status: u16, raw_body: String) -> Self {
        Self {
            status,
            error: Some("Jira HTTP error".to_string()),
            body: Value::String(raw_body),
        }
    }

    /// Transport-level failure (timeout, DNS, connection refused).
    fn transport_error(message: String) -> Self {
        Self {
            status: 500,
            error: Some("Jira transport error".to_string()),
            body: Value::String(message),
        }
    }

    /// Whether the remote call succeeded.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// ============================================================================
// Client
// ============================================================================

/// Jira Cloud REST API client.
pub struct JiraClient {
    client: reqwest::Client,
    base_url: String,
    project_key: String,
    issue_type: String,
}

impl JiraClient {
    /// Create a new Jira client authenticating with Basic auth.
    pub fn new(
        base_url: impl Into<String>,
        email: &str,
        api_token: &str,
    ) -> Result<Self> {
        let credentials = BASE64.encode(format!("{}:{}", email, api_token));

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Basic {}", credentials))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let base_url: String = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            project_key: "IIS".to_string(),
            issue_type: "Task".to_string(),
        })
    }

    /// Create a client from the shared Jira configuration section.
    pub fn from_config(config: &JiraConfig) -> Result<Self> {
        Ok(Self::new(&config.base_url, &config.email, &config.api_token)?
            .with_project_key(&config.project_key)
            .with_issue_type(&config.issue_type))
    }

    /// Set the project key new issues are created under.
    pub fn with_project_key(mut self, key: impl Into<String>) -> Self {
        self.project_key = key.into();
        self
    }

    /// Set the issue type name for created issues.
    pub fn with_issue_type(mut self, name: impl Into<String>) -> Self {
        self.issue_type = name.into();
        self
    }

    /// Base URL of the Jira site.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Human-facing URL for an issue key.
    pub fn browse_url(&self, issue_key: &str) -> String {
        format!("{}/browse/{}", self.base_url, issue_key)
    }

    /// Create an issue with a plain-text summary and a single-paragraph ADF
    /// description.
    pub async fn create_issue(&self, summary: &str, description: &str) -> TicketResult {
        let request = CreateIssueRequest {
            fields: NewIssueFields {
                project: ProjectRef {
                    key: self.project_key.clone(),
                },
                issuetype: IssueTypeRef {
                    name: self.issue_type.clone(),
                },
                summary: summary.to_string(),
                description: AdfDocument::paragraph(description),
            },
        };

        let payload = match serde_json::to_value(&request) {
            Ok(value) => value,
            Err(e) => return TicketResult::transport_error(format!("payload encoding: {e}")),
        };

        self.request(Method::POST, "/rest/api/3/issue", Some(payload))
            .await
    }

    /// Fetch an issue by key.
    pub async fn get_issue(&self, issue_key: &str) -> TicketResult {
        let path = format!("/rest/api/3/issue/{}", issue_key);
        self.request(Method::GET, &path, None).await
    }

    /// Issue one request and normalize every outcome into a `TicketResult`.
    async fn request(&self, method: Method, path: &str, payload: Option<Value>) -> TicketResult {
        let url = format!("{}{}", self.base_url, path);

        let mut builder = self.client.request(method.clone(), &url);
        if let Some(ref payload) = payload {
            builder = builder.json(payload);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(method = %method, url = %url, error = %e, "Jira request failed in transport");
                return TicketResult::transport_error(e.to_string());
            }
        };

        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();

        if (200..300).contains(&status) {
            let body = if text.is_empty() {
                json!({})
            } else {
                serde_json::from_str(&text).unwrap_or(Value::String(text))
            };
            TicketResult::ok(status, body)
        } else {
            tracing::warn!(status, url = %url, "Jira returned an error response");
            TicketResult::http_error(status, text)
        }
    }
}

// ============================================================================
// API Types
// ============================================================================

/// Request to create an issue.
#[derive(Debug, Clone, Serialize)]
struct CreateIssueRequest {
    fields: NewIssueFields,
}

/// Fields of a new issue.
#[derive(Debug, Clone, Serialize)]
struct NewIssueFields {
    project: ProjectRef,
    issuetype: IssueTypeRef,
    summary: String,
    description: AdfDocument,
}

/// Reference to the target project.
#[derive(Debug, Clone, Serialize)]
struct ProjectRef {
    key: String,
}

/// Reference to the issue type by name.
#[derive(Debug, Clone, Serialize)]
struct IssueTypeRef {
    name: String,
}
