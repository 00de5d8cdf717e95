//! Atlassian Document Format (ADF) construction.
//!
//! Jira Cloud API v3 represents rich-text fields as ADF documents. Created
//! issues only need a minimal document: one paragraph wrapping plain text.

use serde::Serialize;

/// A minimal ADF document.
#[derive(Debug, Clone, Serialize)]
pub struct AdfDocument {
    #[serde(rename = "type")]
    node_type: &'static str,
    version: u32,
    content: Vec<AdfNode>,
}

/// A node inside an ADF document (paragraph or text leaf).
#[derive(Debug, Clone, Serialize)]
struct AdfNode {
    #[serde(rename = "type")]
    node_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<Vec<AdfNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

impl AdfDocument {
    /// Build a single-paragraph document wrapping the given plain text.
    pub fn paragraph(text: &str) -> Self {
        Self {
            node_type: "doc",
            version: 1,
            content: vec![AdfNode {
                node_type: "paragraph",
                content: Some(vec![AdfNode {
                    node_type: "text",
                    content: None,
                    text: Some(text.to_string()),
                }]),
                text: None,
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_document_shape() {
        let doc = AdfDocument::paragraph("Host X disk at 95%");
        let json = serde_json::to_value(&doc).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "type": "doc",
                "version": 1,
                "content": [
                    {
                        "type": "paragraph",
                        "content": [
                            {"type": "text", "text": "Host X disk at 95%"}
                        ]
                    }
                ]
            })
        );
    }

    #[test]
    fn test_paragraph_document_empty_text() {
        let doc = AdfDocument::paragraph("");
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("\"text\":\"\""));
    }
}
