//! Uniform result wrapper returned for every handled tool call.

use rmcp::model::{CallToolResult, Content};
use serde_json::Value;

/// One item of an envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentItem {
    Text(String),
}

/// Ordered content items plus an error flag.
///
/// Handled calls (including rejected arguments and upstream failures)
/// always produce exactly one text item.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultEnvelope {
    items: Vec<ContentItem>,
    is_error: bool,
}

impl ResultEnvelope {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            items: vec![ContentItem::Text(text.into())],
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            items: vec![ContentItem::Text(text.into())],
            is_error: true,
        }
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    /// Text of the first item.
    pub fn first_text(&self) -> Option<&str> {
        self.items.iter().map(|ContentItem::Text(text)| text.as_str()).next()
    }

    pub fn into_call_result(self) -> CallToolResult {
        let content: Vec<Content> = self
            .items
            .into_iter()
            .map(|ContentItem::Text(text)| Content::text(text))
            .collect();
        if self.is_error {
            CallToolResult::error(content)
        } else {
            CallToolResult::success(content)
        }
    }
}

/// What an action handler produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Human-readable acknowledgement.
    Message(String),
    /// Structured payload, rendered as indented JSON.
    Data(Value),
}

impl Reply {
    pub fn message(text: impl Into<String>) -> Self {
        Reply::Message(text.into())
    }
}

/// Renders handler replies into envelopes.
pub struct ResponseFormatter;

impl ResponseFormatter {
    pub fn render(reply: Reply) -> ResultEnvelope {
        match reply {
            Reply::Message(text) => ResultEnvelope::text(text),
            Reply::Data(value) => ResultEnvelope::text(Self::pretty(&value)),
        }
    }

    /// Two-space indented JSON.
    pub fn pretty(value: &Value) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    }
}
