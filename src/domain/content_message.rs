//! Usage: Parse string messages posted by loaded content over the webview bridge.

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundMessage {
    User(UserIdentity),
    Ignored,
}

fn user_id(user: &serde_json::Map<String, Value>) -> Option<String> {
    match user.get("id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub fn parse(raw: &str) -> Result<InboundMessage, String> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| format!("CONTENT_MESSAGE_PARSE: {e}"))?;

    let Some(user) = value.get("user").and_then(Value::as_object) else {
        return Ok(InboundMessage::Ignored);
    };

    match user_id(user) {
        Some(id) => Ok(InboundMessage::User(UserIdentity { id })),
        None => {
            tracing::warn!("content message carried a user object without a usable id");
            Ok(InboundMessage::Ignored)
        }
    }
}
