//! Core types for ReaderKit

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Representation requested from the Reader engine
///
/// Sent upstream as the value of the `X-Respond-With` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    /// Page content as markdown, bypassing readability processing
    Markdown,
    /// `documentElement.outerHTML`
    Html,
    /// `document.body.innerText`
    Text,
    /// URL of a screen-size screenshot
    Screenshot,
    /// URL of a full-page screenshot
    Pageshot,
}

impl ResponseKind {
    /// All kinds, in catalog order
    pub const ALL: [ResponseKind; 5] = [
        ResponseKind::Markdown,
        ResponseKind::Html,
        ResponseKind::Text,
        ResponseKind::Screenshot,
        ResponseKind::Pageshot,
    ];

    /// Header value for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseKind::Markdown => "markdown",
            ResponseKind::Html => "html",
            ResponseKind::Text => "text",
            ResponseKind::Screenshot => "screenshot",
            ResponseKind::Pageshot => "pageshot",
        }
    }
}

impl FromStr for ResponseKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResponseKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                "Invalid response kind: must be one of markdown, html, text, screenshot, pageshot"
                    .to_string()
            })
    }
}

impl std::fmt::Display for ResponseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arguments accepted by every Reader tool
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ToolArguments {
    /// The URL to fetch
    pub url: String,
}

/// Tool definition as advertised by `tools/list`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Unique tool name
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// JSON Schema of the tool arguments
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

/// Single content item of a tool result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolContent {
    /// Content type, always "text" here
    #[serde(rename = "type")]
    pub content_type: String,
    /// Text payload
    pub text: String,
}

impl ToolContent {
    /// Create a text content item
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content_type: "text".to_string(),
            text: text.into(),
        }
    }
}

/// Result payload of `tools/call`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallToolResult {
    pub content: Vec<ToolContent>,
}

/// Server metadata returned on a plain GET of the endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerMetadata {
    pub name: String,
    pub version: String,
    pub description: String,
}

impl Default for ServerMetadata {
    fn default() -> Self {
        Self {
            name: crate::SERVER_NAME.to_string(),
            version: crate::SERVER_VERSION.to_string(),
            description: crate::SERVER_DESCRIPTION.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_kind_from_str() {
        assert_eq!(
            "markdown".parse::<ResponseKind>().unwrap(),
            ResponseKind::Markdown
        );
        assert_eq!(
            "PAGESHOT".parse::<ResponseKind>().unwrap(),
            ResponseKind::Pageshot
        );
        assert!("pdf".parse::<ResponseKind>().is_err());
    }

    #[test]
    fn test_response_kind_serde() {
        let json = serde_json::to_string(&ResponseKind::Screenshot).unwrap();
        assert_eq!(json, "\"screenshot\"");

        let kind: ResponseKind = serde_json::from_str("\"html\"").unwrap();
        assert_eq!(kind, ResponseKind::Html);
    }

    #[test]
    fn test_response_kind_display_matches_header_value() {
        for kind in ResponseKind::ALL {
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }

    #[test]
    fn test_tool_content_serializes_type_field() {
        let value = serde_json::to_value(ToolContent::text("hi")).unwrap();
        assert_eq!(value, serde_json::json!({"type": "text", "text": "hi"}));
    }
}
