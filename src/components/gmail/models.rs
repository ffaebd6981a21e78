use serde::{Deserialize, Serialize};

/// Raw Gmail message as returned by `users.messages.get`
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawMessage {
    pub id: String,
    /// Listing-provided one-line summary
    #[serde(default)]
    pub snippet: String,
    /// Capture time in epoch milliseconds; the API sends it as a string
    #[serde(default)]
    pub internal_date: String,
    #[serde(default)]
    pub payload: MessagePayload,
}

/// Nested message payload: headers plus either a direct body or a parts list
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MessagePayload {
    #[serde(default)]
    pub headers: Vec<MessageHeader>,
    #[serde(default)]
    pub body: Option<PartBody>,
    #[serde(default)]
    pub parts: Option<Vec<MessagePart>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageHeader {
    pub name: String,
    pub value: String,
}

/// One MIME part of a multi-part message
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePart {
    pub mime_type: String,
    #[serde(default)]
    pub body: Option<PartBody>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct PartBody {
    /// URL-safe base64 encoded content
    #[serde(default)]
    pub data: Option<String>,
}

/// Message body reduced to the two shapes the API actually produces
#[derive(Debug, Clone)]
pub enum MessageBody {
    /// No parts list; the payload body carries the content directly
    Single { data: Option<String> },
    /// Multi-part message with per-part MIME types
    Multi(Vec<MessagePart>),
}

impl MessagePayload {
    /// Collapse the optional parts list into the tagged body shape
    pub fn body_shape(&self) -> MessageBody {
        match &self.parts {
            Some(parts) => MessageBody::Multi(parts.clone()),
            None => MessageBody::Single {
                data: self.body.as_ref().and_then(|body| body.data.clone()),
            },
        }
    }
}

/// Flattened message record handed back to the assistant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedEmail {
    pub snippet: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}
