//! Invocation event model and parameter normalization.
//!
//! The agent runtime encodes tool parameters three different ways depending
//! on how the action group is defined: a flat name/value list, a nested JSON
//! object under `requestBody`, or a string-encoded JSON `body`. Everything
//! downstream works on the single mapping produced here.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

// ============================================================================
// Event Types
// ============================================================================

/// One entry of the invocation's explicit parameter list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Parameter {
    pub name: Option<String>,
    pub value: Option<Value>,
}

/// The `requestBody` section of an invocation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestBody {
    /// Payloads keyed by content type; only `application/json` is read.
    pub content: Option<HashMap<String, Value>>,
}

/// Structured tool invocation from the agent runtime.
///
/// Decoded leniently: every field is optional, and unknown top-level keys are
/// retained so the diagnostic envelope can echo them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationEvent {
    pub action_group: Option<String>,
    pub api_path: Option<String>,
    pub http_method: Option<String>,
    pub parameters: Option<Vec<Parameter>>,
    pub request_body: Option<RequestBody>,
    /// Some runtime setups pass the payload as a JSON string here.
    pub body: Option<Value>,
    pub session_attributes: Option<HashMap<String, String>>,
    pub prompt_session_attributes: Option<HashMap<String, String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InvocationEvent {
    /// Decode an event from raw JSON; a structurally unreadable payload
    /// degrades to an empty event (which the envelope builder reports as a
    /// routing-key contract violation) rather than failing the request.
    pub fn from_value(value: &Value) -> Self {
        match serde_json::from_value(value.clone()) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(error = %e, "Invocation event did not decode; using empty event");
                Self::default()
            }
        }
    }

    /// Names of all top-level keys present on the event, for diagnostics.
    pub fn top_level_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();

        let known: &[(&str, bool)] = &[
            ("actionGroup", self.action_group.is_some()),
            ("apiPath", self.api_path.is_some()),
            ("httpMethod", self.http_method.is_some()),
            ("parameters", self.parameters.is_some()),
            ("requestBody", self.request_body.is_some()),
            ("body", self.body.is_some()),
            ("sessionAttributes", self.session_attributes.is_some()),
            ("promptSessionAttributes", self.prompt_session_attributes.is_some()),
        ];
        for (name, present) in known {
            if *present {
                keys.push((*name).to_string());
            }
        }

        keys.extend(self.extra.keys().cloned());
        keys
    }
}

// ============================================================================
// Parameter Normalizer
// ============================================================================

/// Merge the three parameter encodings into one mapping.
///
/// Precedence: explicit parameter list, then nested JSON content, then the
/// string-encoded `body`. A key set by a higher-precedence source is never
/// overwritten, and no malformed input surfaces an error here — bad sources
/// just contribute fewer parameters.
pub fn collect_parameters(event: &InvocationEvent) -> HashMap<String, String> {
    let mut out = HashMap::new();

    for param in event.parameters.iter().flatten() {
        if let (Some(name), Some(value)) = (&param.name, &param.value) {
            if let Some(text) = value_to_string(value) {
                out.insert(name.clone(), text);
            }
        }
    }

    let app_json = event
        .request_body
        .as_ref()
        .and_then(|rb| rb.content.as_ref())
        .and_then(|content| content.get("application/json"));

    if let Some(Value::Object(map)) = app_json {
        match map.get("properties") {
            Some(Value::Array(props)) => {
                for prop in props {
                    let name = prop.get("name").and_then(Value::as_str);
                    let value = prop.get("value");
                    if let (Some(name), Some(value)) = (name, value) {
                        if let Some(text) = value_to_string(value) {
                            out.entry(name.to_string()).or_insert(text);
                        }
                    }
                }
            }
            _ => {
                // Sometimes the runtime passes the JSON object directly
                for (key, value) in map {
                    if let Some(text) = value_to_string(value) {
                        out.entry(key.clone()).or_insert(text);
                    }
                }
            }
        }
    }

    if let Some(Value::String(raw)) = &event.body {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => {
                for (key, value) in map {
                    if let Some(text) = value_to_string(&value) {
                        out.entry(key).or_insert(text);
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                // Other sources may still suffice; ignore the bad body.
                tracing::debug!(error = %e, "Ignoring unparseable string body");
            }
        }
    }

    out
}

/// Render a JSON value as a parameter string; `null` counts as absent.
fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
