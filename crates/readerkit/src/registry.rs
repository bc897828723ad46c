//! Static catalog of Reader tools
//!
//! Every tool takes a single `url` argument and differs only in the
//! [`ResponseKind`] it asks the Reader engine for.

use crate::types::{ResponseKind, ToolArguments, ToolDescriptor};
use schemars::schema_for;

/// Static definition of one tool
#[derive(Debug, Clone, Copy)]
pub struct ToolSpec {
    pub name: &'static str,
    pub kind: ResponseKind,
    pub description: &'static str,
    /// Description of the `url` property in the input schema
    pub url_description: &'static str,
}

/// The tool catalog, in listing order
pub static TOOLS: [ToolSpec; 5] = [
    ToolSpec {
        name: "get_markdown",
        kind: ResponseKind::Markdown,
        description: "Convert a URL to markdown format. This bypasses readability processing and returns the raw content as markdown.",
        url_description: "The URL to fetch and convert to markdown",
    },
    ToolSpec {
        name: "get_html",
        kind: ResponseKind::Html,
        description: "Convert a URL to HTML format. Returns documentElement.outerHTML.",
        url_description: "The URL to fetch and convert to HTML",
    },
    ToolSpec {
        name: "get_text",
        kind: ResponseKind::Text,
        description: "Convert a URL to plain text format. Returns document.body.innerText.",
        url_description: "The URL to fetch and convert to text",
    },
    ToolSpec {
        name: "get_screenshot",
        kind: ResponseKind::Screenshot,
        description: "Take a screen-size screenshot of a URL. Returns the URL of the screenshot image.",
        url_description: "The URL to screenshot",
    },
    ToolSpec {
        name: "get_pageshot",
        kind: ResponseKind::Pageshot,
        description: "Take a full-page screenshot of a URL. Returns the URL of the full-page screenshot image.",
        url_description: "The URL to take a full-page screenshot of",
    },
];

/// List all tools in catalog order
pub fn list_tools() -> Vec<ToolDescriptor> {
    TOOLS
        .iter()
        .map(|spec| ToolDescriptor {
            name: spec.name.to_string(),
            description: spec.description.to_string(),
            input_schema: input_schema(spec.url_description),
        })
        .collect()
}

/// Look up the response kind for a tool name
///
/// Returns `None` for names outside the catalog.
pub fn response_kind_for(name: &str) -> Option<ResponseKind> {
    TOOLS
        .iter()
        .find(|spec| spec.name == name)
        .map(|spec| spec.kind)
}

/// Catalog entry serving a response kind
pub fn tool_for_kind(kind: ResponseKind) -> &'static ToolSpec {
    match kind {
        ResponseKind::Markdown => &TOOLS[0],
        ResponseKind::Html => &TOOLS[1],
        ResponseKind::Text => &TOOLS[2],
        ResponseKind::Screenshot => &TOOLS[3],
        ResponseKind::Pageshot => &TOOLS[4],
    }
}

/// Input schema for a tool, with the `url` description specialised
fn input_schema(url_description: &str) -> serde_json::Value {
    let schema = schema_for!(ToolArguments);
    let mut value = serde_json::to_value(schema).unwrap_or_default();

    if let Some(url) = value
        .get_mut("properties")
        .and_then(|p| p.get_mut("url"))
        .and_then(|u| u.as_object_mut())
    {
        url.insert(
            "description".to_string(),
            serde_json::Value::String(url_description.to_string()),
        );
    }

    value
}
