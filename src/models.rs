use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModelStatus {
    #[default]
    Active,
    Inactive,
}

impl ModelStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelStatus::Active => "active",
            ModelStatus::Inactive => "inactive",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(ModelStatus::Active),
            "inactive" => Some(ModelStatus::Inactive),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub api_endpoint: String,
    #[serde(default)]
    pub status: ModelStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Plugin {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Partial update for a model. Only `Some` fields are sent.
#[derive(Serialize, Clone, PartialEq, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ModelPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ModelStatus>,
}

/// Partial update for a plugin. Only `Some` fields are sent.
#[derive(Serialize, Clone, PartialEq, Debug, Default)]
pub struct PluginPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl PluginPatch {
    pub fn enabled(enabled: bool) -> Self {
        Self { enabled: Some(enabled), ..Default::default() }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

pub fn new_message_id() -> String {
    Uuid::now_v7().to_string()
}

/// Server ids arrive as strings, numbers or ObjectId wrappers.
fn wire_id(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(id) if id.is_empty() => None,
        Value::String(id) => Some(id.clone()),
        Value::Object(map) => map.get("$oid").and_then(Value::as_str).map(str::to_string),
        other => Some(other.to_string()),
    }
}

/// RFC 3339, naive `YYYY-MM-DD HH:MM:SS` (read as UTC) or epoch milliseconds.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(raw) => {
            let raw = raw.trim();
            DateTime::parse_from_rfc3339(raw)
                .map(|ts| ts.with_timezone(&Utc))
                .ok()
                .or_else(|| {
                    [
                        "%Y-%m-%d %H:%M:%S",
                        "%Y-%m-%d %H:%M:%S%.f",
                        "%Y-%m-%dT%H:%M:%S",
                        "%Y-%m-%dT%H:%M:%S%.f",
                    ]
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                    .map(|naive| naive.and_utc())
                })
        }
        Value::Number(millis) => millis.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    }
}

fn lenient_timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<Utc>>, D::Error> {
    let raw = Option::<Value>::deserialize(d)?;
    Ok(raw.as_ref().and_then(parse_timestamp))
}

/// One entry of the visible conversation log.
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: new_message_id(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    #[serde(rename = "_id")]
    pub id: String,
    pub model_id: String,
    #[serde(default)]
    pub plugin_ids: Vec<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NewConversation {
    pub model_id: String,
    pub plugin_ids: Vec<String>,
    pub title: String,
}

#[derive(Serialize, Clone, PartialEq, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConversationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin_ids: Option<Vec<String>>,
}

/// A message as stored server-side under a conversation.
#[derive(Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct StoredMessage {
    #[serde(rename = "_id")]
    pub id: String,
    pub conversation_id: String,
    pub role: Role,
    pub content: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    pub conversation_id: String,
    pub content: String,
    pub role: Role,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageResponse {
    #[serde(default)]
    pub user_message: Option<StoredMessage>,
    #[serde(default)]
    pub assistant_message: Option<EmbeddedReply>,
}

/// The assistant reply inside a `POST /messages` response. Every field is
/// optional on the wire: the reply is already stored server-side, so a loose
/// shape must not be treated as a failed send.
#[derive(Deserialize, Debug, Default)]
pub struct EmbeddedReply {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(rename = "_id", default)]
    pub object_id: Option<Value>,
    #[serde(default)]
    pub role: Option<Value>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub timestamp: Option<Value>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<Value>,
}

impl EmbeddedReply {
    pub fn into_message(self) -> ChatMessage {
        let id = wire_id(self.id.as_ref())
            .or_else(|| wire_id(self.object_id.as_ref()))
            .unwrap_or_else(new_message_id);
        let role = self
            .role
            .and_then(|role| serde_json::from_value(role).ok())
            .unwrap_or(Role::Assistant);
        let timestamp = [self.timestamp.as_ref(), self.created_at.as_ref()]
            .into_iter()
            .flatten()
            .find_map(parse_timestamp)
            .unwrap_or_else(Utc::now);
        if self.content.is_none() {
            tracing::warn!(%id, "assistant reply had no content");
        }

        ChatMessage {
            id,
            role,
            content: self.content.unwrap_or_default(),
            timestamp,
        }
    }
}

// Legacy single-endpoint chat API
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LegacyChatRequest {
    pub model_id: String,
    pub plugin_ids: Vec<String>,
    pub message: String,
}

#[derive(Deserialize, Debug)]
pub struct LegacyChatResponse {
    #[serde(default)]
    pub id: Option<Value>,
    pub message: String,
    #[serde(default)]
    pub timestamp: Option<Value>,
}

impl LegacyChatResponse {
    pub fn into_message(self) -> ChatMessage {
        let id = wire_id(self.id.as_ref()).unwrap_or_else(new_message_id);
        let timestamp = self
            .timestamp
            .as_ref()
            .and_then(parse_timestamp)
            .unwrap_or_else(Utc::now);

        ChatMessage {
            id,
            role: Role::Assistant,
            content: self.message,
            timestamp,
        }
    }
}

#[derive(Deserialize, Clone, PartialEq, Debug, Default)]
pub struct DeleteConfirmation {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn model_reads_backend_field_names() {
        let model: Model = serde_json::from_value(json!({
            "_id": "m1",
            "name": "GPT",
            "description": "general purpose",
            "apiEndpoint": "https://llm.local/v1",
            "status": "inactive",
            "createdAt": "2024-05-01T10:00:00Z",
        }))
        .unwrap();

        assert_eq!(model.id, "m1");
        assert_eq!(model.api_endpoint, "https://llm.local/v1");
        assert_eq!(model.status, ModelStatus::Inactive);
        assert!(model.created_at.is_some());
        assert!(model.updated_at.is_none());
    }

    #[test]
    fn patch_only_serializes_provided_fields() {
        let body = serde_json::to_value(PluginPatch::enabled(false)).unwrap();
        assert_eq!(body, json!({ "enabled": false }));

        let body = serde_json::to_value(ModelPatch {
            api_endpoint: Some("http://x".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(body, json!({ "apiEndpoint": "http://x" }));
    }

    #[test]
    fn embedded_assistant_message_accepts_server_names() {
        let resp: CreateMessageResponse = serde_json::from_value(json!({
            "userMessage": { "_id": "u1", "conversationId": "c1", "role": "user", "content": "hi" },
            "assistantMessage": { "_id": "a1", "role": "assistant", "content": "hello", "createdAt": "2024-05-01T10:00:00Z" }
        }))
        .unwrap();

        let reply = resp.assistant_message.unwrap().into_message();
        assert_eq!(reply.id, "a1");
        assert_eq!(reply.role, Role::Assistant);
        assert_eq!(reply.timestamp.to_rfc3339(), "2024-05-01T10:00:00+00:00");
        assert_eq!(resp.user_message.unwrap().conversation_id, "c1");
    }

    fn embedded(reply: serde_json::Value) -> ChatMessage {
        let resp: CreateMessageResponse =
            serde_json::from_value(json!({ "assistantMessage": reply })).unwrap();
        resp.assistant_message.unwrap().into_message()
    }

    #[test]
    fn embedded_reply_with_both_id_names_decodes() {
        let reply = embedded(json!({ "_id": "a1", "id": "a1", "role": "assistant", "content": "hello" }));
        assert_eq!(reply.id, "a1");
        assert_eq!(reply.content, "hello");

        let reply = embedded(json!({ "_id": { "$oid": "65f0c2" }, "content": "x" }));
        assert_eq!(reply.id, "65f0c2");
        assert_eq!(reply.role, Role::Assistant);
    }

    #[test]
    fn embedded_reply_with_both_timestamp_names_prefers_timestamp() {
        let reply = embedded(json!({
            "_id": "a1",
            "role": "assistant",
            "content": "hello",
            "timestamp": "2024-01-01T10:00:00Z",
            "createdAt": "2024-01-01T09:00:00Z",
            "updatedAt": "2024-01-01T09:00:00Z",
        }));
        assert_eq!(reply.timestamp.to_rfc3339(), "2024-01-01T10:00:00+00:00");
    }

    #[test]
    fn embedded_reply_with_odd_timestamp_still_decodes() {
        let reply = embedded(json!({ "_id": "a1", "content": "hello", "createdAt": "2024-01-01 10:00:00" }));
        assert_eq!(reply.timestamp.to_rfc3339(), "2024-01-01T10:00:00+00:00");

        let before = Utc::now();
        let reply = embedded(json!({ "_id": "a2", "content": "hello", "createdAt": "yesterday-ish" }));
        assert!(reply.timestamp >= before);

        let reply = embedded(json!({ "content": "hello", "createdAt": 1_704_103_200_000_i64 }));
        assert_eq!(reply.timestamp.to_rfc3339(), "2024-01-01T10:00:00+00:00");
        assert!(!reply.id.is_empty());
    }

    #[test]
    fn stored_message_tolerates_unparseable_created_at() {
        let stored: StoredMessage = serde_json::from_value(json!({
            "_id": "u1", "id": "u1", "conversationId": "c1", "role": "user", "content": "hi", "createdAt": "soon"
        }))
        .unwrap();
        assert_eq!(stored.id, "u1");
        assert!(stored.created_at.is_none());
    }

    #[test]
    fn legacy_reply_defaults_missing_timestamp() {
        let before = Utc::now();
        let reply = LegacyChatResponse {
            id: Some(json!(42)),
            message: "fallback".into(),
            timestamp: None,
        }
        .into_message();

        assert_eq!(reply.id, "42");
        assert_eq!(reply.role, Role::Assistant);
        assert!(reply.timestamp >= before);
    }

    #[test]
    fn legacy_reply_keeps_server_timestamp() {
        let reply = LegacyChatResponse {
            id: Some(json!("r1")),
            message: "ok".into(),
            timestamp: Some("2023-01-02T03:04:05.000Z".into()),
        }
        .into_message();

        assert_eq!(reply.timestamp.to_rfc3339(), "2023-01-02T03:04:05+00:00");
    }
}
