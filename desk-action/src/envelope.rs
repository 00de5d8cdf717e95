//! Response envelope construction.
//!
//! Every outcome — success, validation failure, remote error, diagnostic —
//! leaves through `build_envelope`; no other component emits a reply. The
//! runtime correlates replies through the routing keys it sent, so those are
//! echoed verbatim, and a request missing them gets a diagnostic envelope
//! instead of a protocol violation.

use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::event::InvocationEvent;

/// Protocol version the agent runtime expects.
const MESSAGE_VERSION: &str = "1.0";

// ============================================================================
// Envelope Types
// ============================================================================

/// Fixed reply structure parsed by the agent runtime.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub message_version: String,
    pub response: ActionResponse,
    /// Echoed from the event on the normal path; omitted on diagnostics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_attributes: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_session_attributes: Option<HashMap<String, String>>,
}

/// The `response` section carrying correlation keys and the result body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    pub action_group: String,
    pub api_path: String,
    pub http_method: String,
    pub http_status_code: u16,
    pub response_body: ResponseBody,
}

/// Result body keyed by content type.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseBody {
    #[serde(rename = "application/json")]
    pub json: JsonContent,
}

/// The JSON content holder; the runtime expects the body as a JSON string,
/// not a nested object.
#[derive(Debug, Clone, Serialize)]
pub struct JsonContent {
    pub body: String,
}

impl ResponseBody {
    fn from_value(body: &Value) -> Self {
        Self {
            json: JsonContent {
                body: serde_json::to_string(body).unwrap_or_else(|_| "{}".to_string()),
            },
        }
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Wrap a result body in the fixed envelope, echoing correlation keys.
///
/// When any routing key is missing the caller-supplied status and body are
/// ignored and a status-500 diagnostic envelope is returned naming the
/// missing keys and echoing the event's top-level keys.
pub fn build_envelope(event: &InvocationEvent, status: u16, body: &Value) -> ResponseEnvelope {
    let action_group = routing_value(&event.action_group);
    let api_path = routing_value(&event.api_path);
    let http_method = routing_value(&event.http_method);

    let mut missing = Vec::new();
    if action_group.is_none() {
        missing.push("actionGroup");
    }
    if api_path.is_none() {
        missing.push("apiPath");
    }
    if http_method.is_none() {
        missing.push("httpMethod");
    }

    if !missing.is_empty() {
        let diagnostic = json!({
            "error": "Missing required routing keys in event",
            "missing": missing,
            "eventKeys": event.top_level_keys(),
        });

        return ResponseEnvelope {
            message_version: MESSAGE_VERSION.to_string(),
            response: ActionResponse {
                action_group: action_group.unwrap_or("UNKNOWN").to_string(),
                api_path: api_path.unwrap_or("/UNKNOWN").to_string(),
                http_method: http_method.unwrap_or("POST").to_string(),
                http_status_code: 500,
                response_body: ResponseBody::from_value(&diagnostic),
            },
            session_attributes: None,
            prompt_session_attributes: None,
        };
    }

    ResponseEnvelope {
        message_version: MESSAGE_VERSION.to_string(),
        response: ActionResponse {
            action_group: action_group.unwrap_or_default().to_string(),
            api_path: api_path.unwrap_or_default().to_string(),
            http_method: http_method.unwrap_or_default().to_string(),
            http_status_code: status,
            response_body: ResponseBody::from_value(body),
        },
        session_attributes: Some(event.session_attributes.clone().unwrap_or_default()),
        prompt_session_attributes: Some(event.prompt_session_attributes.clone().unwrap_or_default()),
    }
}

/// Empty strings count as missing, matching the runtime contract.
fn routing_value(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::InvocationEvent;
    use serde_json::json;

    fn event_from(value: Value) -> InvocationEvent {
        InvocationEvent::from_value(&value)
    }

    /// Decode the JSON string nested in the envelope body.
    fn body_of(envelope: &ResponseEnvelope) -> Value {
        serde_json::from_str(&envelope.response.response_body.json.body).unwrap()
    }

    #[test]
    fn test_normal_path_copies_routing_keys() {
        let event = event_from(json!({
            "actionGroup": "ticket-actions",
            "apiPath": "/tickets",
            "httpMethod": "POST",
            "sessionAttributes": {"team": "infra"}
        }));

        let envelope = build_envelope(&event, 200, &json!({"mode": "fetch"}));

        assert_eq!(envelope.message_version, "1.0");
        assert_eq!(envelope.response.action_group, "ticket-actions");
        assert_eq!(envelope.response.api_path, "/tickets");
        assert_eq!(envelope.response.http_method, "POST");
        assert_eq!(envelope.response.http_status_code, 200);
        assert_eq!(body_of(&envelope)["mode"], "fetch");
        assert_eq!(
            envelope.session_attributes.as_ref().unwrap().get("team"),
            Some(&"infra".to_string())
        );
        // Absent prompt attributes echo as an empty map, not null.
        assert!(envelope.prompt_session_attributes.as_ref().unwrap().is_empty());
    }

    #[test]
    fn test_missing_http_method_forces_diagnostic() {
        let event = event_from(json!({
            "actionGroup": "ticket-actions",
            "apiPath": "/tickets",
            "inputText": "hello"
        }));

        // Caller-supplied status and body must be ignored.
        let envelope = build_envelope(&event, 200, &json!({"mode": "create"}));

        assert_eq!(envelope.response.http_status_code, 500);
        assert_eq!(envelope.response.http_method, "POST");

        let body = body_of(&envelope);
        let missing: Vec<&str> = body["missing"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(missing, vec!["httpMethod"]);

        let keys: Vec<&str> = body["eventKeys"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert!(keys.contains(&"actionGroup"));
        assert!(keys.contains(&"inputText"));

        assert!(envelope.session_attributes.is_none());
    }

    #[test]
    fn test_empty_routing_key_counts_as_missing() {
        let event = event_from(json!({
            "actionGroup": "",
            "apiPath": "/tickets",
            "httpMethod": "POST"
        }));

        let envelope = build_envelope(&event, 200, &json!({}));

        assert_eq!(envelope.response.http_status_code, 500);
        assert_eq!(envelope.response.action_group, "UNKNOWN");
        let body = body_of(&envelope);
        assert_eq!(body["missing"][0], "actionGroup");
    }

    #[test]
    fn test_envelope_serializes_expected_shape() {
        let event = event_from(json!({
            "actionGroup": "ticket-actions",
            "apiPath": "/tickets",
            "httpMethod": "POST"
        }));

        let envelope = build_envelope(&event, 404, &json!({"error": "nope"}));
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["messageVersion"], "1.0");
        assert_eq!(json["response"]["httpStatusCode"], 404);
        let nested = json["response"]["responseBody"]["application/json"]["body"]
            .as_str()
            .unwrap();
        assert!(nested.contains("\"error\""));
        assert_eq!(json["sessionAttributes"], json!({}));
    }
}
