//! Handler entry point for action-group invocations.
//!
//! Linear flow: normalize parameters, resolve intent, make at most one Jira
//! call, wrap the outcome in the response envelope. Every path returns
//! exactly one envelope; no failure escapes this boundary.

use serde_json::{json, Value};

use desk_common::util::truncate_with_ellipsis;
use desk_jira::{CompactIssue, JiraClient};

use crate::envelope::{build_envelope, ResponseEnvelope};
use crate::event::{collect_parameters, InvocationEvent};
use crate::intent::{resolve_intent, TicketIntent};

/// Handle one invocation end to end.
pub async fn handle_invocation(event: &InvocationEvent, jira: &JiraClient) -> ResponseEnvelope {
    let params = collect_parameters(event);
    tracing::debug!(
        parameter_count = params.len(),
        "Normalized invocation parameters"
    );

    match resolve_intent(&params) {
        TicketIntent::Fetch { issue_key } => {
            tracing::info!(issue_key = %issue_key, "Fetching ticket");
            let result = jira.get_issue(&issue_key).await;

            if result.status == 200 {
                let ticket = CompactIssue::from_value(&result.body, jira.base_url());
                build_envelope(event, 200, &json!({"mode": "fetch", "ticket": ticket}))
            } else {
                tracing::warn!(issue_key = %issue_key, status = result.status, "Ticket fetch failed");
                build_envelope(
                    event,
                    result.status,
                    &json!({"mode": "fetch", "error": "Failed to fetch ticket", "jira": result}),
                )
            }
        }
        TicketIntent::Create {
            summary,
            description,
        } => {
            tracing::info!(
                summary = %truncate_with_ellipsis(&summary, 60),
                "Creating ticket"
            );
            let result = jira.create_issue(&summary, &description).await;

            if result.status == 200 || result.status == 201 {
                let key = result.body.get("key").and_then(Value::as_str);
                let browse_url = key.map(|key| jira.browse_url(key));
                tracing::info!(key = key.unwrap_or("<none>"), "Ticket created");
                build_envelope(
                    event,
                    200,
                    &json!({
                        "mode": "create",
                        "result": "created",
                        "key": key,
                        "browseUrl": browse_url,
                        "jira": result.body,
                    }),
                )
            } else {
                tracing::warn!(status = result.status, "Ticket creation failed");
                build_envelope(
                    event,
                    result.status,
                    &json!({"mode": "create", "error": "Failed to create ticket", "jira": result}),
                )
            }
        }
        TicketIntent::Invalid { reason } => {
            tracing::info!(reason = %reason, "Rejecting invocation");
            build_envelope(event, 400, &json!({"error": reason, "received": params}))
        }
    }
}
