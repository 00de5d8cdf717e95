//! Compact issue projection.
//!
//! A fetched Jira issue carries far more than the agent needs; this module
//! projects it down to the handful of fields worth relaying in a reply.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// API Types
// ============================================================================

/// Issue representation as returned by the Jira API (only the fields this
/// service reads; everything else is ignored).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Issue {
    pub key: Option<String>,
    pub fields: Option<IssueFields>,
}

/// The `fields` section of a Jira issue.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueFields {
    pub summary: Option<String>,
    pub status: Option<NamedField>,
    pub priority: Option<NamedField>,
    pub assignee: Option<UserField>,
    pub reporter: Option<UserField>,
    pub created: Option<String>,
    pub updated: Option<String>,
}

/// A Jira field carrying a `name` (status, priority).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamedField {
    pub name: Option<String>,
}

/// A Jira user reference (assignee, reporter).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserField {
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}

// ============================================================================
// Compact Record
// ============================================================================

/// Compact record handed back to the agent runtime.
///
/// Absent fields serialize as `null` so the reply shape is stable.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompactIssue {
    pub key: Option<String>,
    pub summary: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assignee: Option<String>,
    pub reporter: Option<String>,
    pub created: Option<String>,
    pub updated: Option<String>,
    pub browse_url: Option<String>,
}

impl CompactIssue {
    /// Project a typed issue into the compact record.
    pub fn from_issue(issue: &Issue, base_url: &str) -> Self {
        let fields = issue.fields.clone().unwrap_or_default();

        Self {
            key: issue.key.clone(),
            summary: fields.summary,
            status: fields.status.and_then(|f| f.name),
            priority: fields.priority.and_then(|f| f.name),
            assignee: fields.assignee.and_then(|u| u.display_name),
            reporter: fields.reporter.and_then(|u| u.display_name),
            created: fields.created,
            updated: fields.updated,
            browse_url: issue
                .key
                .as_ref()
                .map(|key| format!("{}/browse/{}", base_url, key)),
        }
    }

    /// Project a raw response body; an unreadable body degrades to an
    /// all-null record rather than failing.
    pub fn from_value(body: &Value, base_url: &str) -> Self {
        let issue: Issue = serde_json::from_value(body.clone()).unwrap_or_default();
        Self::from_issue(&issue, base_url)
    }
}
