//! Intent resolution for ticket invocations.
//!
//! The runtime does not tell us whether the caller wants to create or fetch a
//! ticket; the decision is inferred from the normalized parameters. A
//! detected issue key anywhere in the key/summary/description fields means
//! fetch; otherwise a complete summary + description pair means create. This
//! lets the agent pass either structured parameters or conversational text
//! containing a ticket reference without classifying the request itself.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Aliases accepted for the create-path summary, in priority order.
const SUMMARY_KEYS: &[&str] = &["summary", "name", "title"];

/// Aliases accepted for the create-path description, in priority order.
const DESCRIPTION_KEYS: &[&str] = &["description", "details", "body", "text"];

/// Aliases accepted for an explicit issue key, in priority order.
const ISSUE_KEY_KEYS: &[&str] = &["issueKey", "ticketKey", "key"];

/// Detects `PROJECT-123` style issue keys anywhere in text.
static ISSUE_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b[A-Za-z]{2,}-\d+\b").expect("issue key pattern is valid"));

/// Resolved intent for one invocation. Computed once, consumed once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketIntent {
    /// Fetch an existing ticket by key.
    Fetch { issue_key: String },
    /// Create a new ticket.
    Create { summary: String, description: String },
    /// Neither path is satisfiable with the given parameters.
    Invalid { reason: String },
}

/// Decide what the caller wants from the normalized parameters.
///
/// A detected issue key wins over create even when summary and description
/// are also populated.
pub fn resolve_intent(params: &HashMap<String, String>) -> TicketIntent {
    let summary = pick_first(params, SUMMARY_KEYS);
    let description = pick_first(params, DESCRIPTION_KEYS);
    let explicit_key = pick_first(params, ISSUE_KEY_KEYS);

    let candidates = [
        explicit_key.as_deref(),
        summary.as_deref(),
        description.as_deref(),
    ];
    if let Some(issue_key) = find_issue_key(&candidates) {
        return TicketIntent::Fetch { issue_key };
    }

    match (summary, description) {
        (Some(summary), Some(description)) => TicketIntent::Create {
            summary,
            description,
        },
        _ => TicketIntent::Invalid {
            reason: "Provide either a ticket key (to fetch) or summary+description (to create)."
                .to_string(),
        },
    }
}

/// First value across an alias list that is non-empty after trimming.
fn pick_first(params: &HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = params.get(*key) {
            if !value.trim().is_empty() {
                return Some(value.clone());
            }
        }
    }
    None
}

/// Scan candidate texts, in order, for an issue key; matches are upper-cased.
fn find_issue_key(texts: &[Option<&str>]) -> Option<String> {
    for text in texts.iter().flatten() {
        if let Some(found) = ISSUE_KEY_RE.find(text) {
            return Some(found.as_str().to_uppercase());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_explicit_issue_key_yields_fetch() {
        let intent = resolve_intent(&params(&[("issueKey", "IIS-42")]));
        assert_eq!(
            intent,
            TicketIntent::Fetch {
                issue_key: "IIS-42".into()
            }
        );
    }

    #[test]
    fn test_key_detected_in_free_text() {
        let intent = resolve_intent(&params(&[("text", "please check IIS-501 status")]));
        assert_eq!(
            intent,
            TicketIntent::Fetch {
                issue_key: "IIS-501".into()
            }
        );
    }

    #[test]
    fn test_key_match_is_case_insensitive_and_upper_cased() {
        let intent = resolve_intent(&params(&[("summary", "follow up on iis-77 soon")]));
        assert_eq!(
            intent,
            TicketIntent::Fetch {
                issue_key: "IIS-77".into()
            }
        );
    }

    #[test]
    fn test_detected_key_wins_over_create() {
        let intent = resolve_intent(&params(&[
            ("summary", "Dup of OPS-9"),
            ("description", "full details here"),
        ]));
        assert_eq!(
            intent,
            TicketIntent::Fetch {
                issue_key: "OPS-9".into()
            }
        );
    }

    #[test]
    fn test_create_with_summary_and_description() {
        let intent = resolve_intent(&params(&[
            ("summary", "Disk full"),
            ("description", "Host X disk at 95%"),
        ]));
        assert_eq!(
            intent,
            TicketIntent::Create {
                summary: "Disk full".into(),
                description: "Host X disk at 95%".into()
            }
        );
    }

    #[test]
    fn test_alias_priority() {
        let intent = resolve_intent(&params(&[
            ("title", "from title"),
            ("name", "from name"),
            ("details", "some details"),
        ]));
        assert_eq!(
            intent,
            TicketIntent::Create {
                summary: "from name".into(),
                description: "some details".into()
            }
        );
    }

    #[test]
    fn test_missing_description_is_invalid() {
        let intent = resolve_intent(&params(&[("summary", "Disk full")]));
        assert!(matches!(intent, TicketIntent::Invalid { .. }));
    }

    #[test]
    fn test_whitespace_only_fields_are_invalid() {
        let intent = resolve_intent(&params(&[("summary", "   "), ("description", "\t")]));
        assert!(matches!(intent, TicketIntent::Invalid { .. }));
    }

    #[test]
    fn test_empty_params_are_invalid() {
        let intent = resolve_intent(&HashMap::new());
        assert!(matches!(intent, TicketIntent::Invalid { .. }));
    }

    #[test]
    fn test_plain_words_do_not_match_key_pattern() {
        let intent = resolve_intent(&params(&[
            ("summary", "Printer offline"),
            ("description", "3rd floor printer not reachable"),
        ]));
        assert!(matches!(intent, TicketIntent::Create { .. }));
    }
}
