use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::models::{
    ChatMessage, EmbeddedReply, LegacyChatRequest, NewConversation, NewMessage, Role,
};
use crate::services::resources::{Backend, ConversationsApi, LegacyChatApi, MessagesApi};

const TITLE_LEN: usize = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct SendRequest {
    pub text: String,
    pub model_id: String,
    pub plugin_ids: BTreeSet<String>,
}

impl SendRequest {
    pub fn new<I, S>(text: impl Into<String>, model_id: impl Into<String>, plugin_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            text: text.into(),
            model_id: model_id.into(),
            plugin_ids: plugin_ids.into_iter().map(Into::into).collect(),
        }
    }

    /// First 30 characters of the message, with "..." when cut.
    pub fn conversation_title(&self) -> String {
        let mut title: String = self.text.chars().take(TITLE_LEN).collect();
        if self.text.chars().count() > TITLE_LEN {
            title.push_str("...");
        }
        title
    }

    fn plugin_id_list(&self) -> Vec<String> {
        self.plugin_ids.iter().cloned().collect()
    }
}

/// One way of obtaining an assistant reply.
#[async_trait(?Send)]
pub trait SendStrategy {
    fn name(&self) -> &'static str;

    async fn send(&self, request: &SendRequest) -> Result<ChatMessage, ApiError>;
}

/// Creates a conversation, posts the user message into it and returns the
/// assistant reply embedded in the response.
pub struct ConversationStrategy {
    conversations: ConversationsApi,
    messages: MessagesApi,
}

impl ConversationStrategy {
    pub fn new(conversations: ConversationsApi, messages: MessagesApi) -> Self {
        Self { conversations, messages }
    }
}

#[async_trait(?Send)]
impl SendStrategy for ConversationStrategy {
    fn name(&self) -> &'static str {
        "conversation"
    }

    async fn send(&self, request: &SendRequest) -> Result<ChatMessage, ApiError> {
        // A new conversation per send, even inside an open session.
        let conversation = self
            .conversations
            .create(&NewConversation {
                model_id: request.model_id.clone(),
                plugin_ids: request.plugin_id_list(),
                title: request.conversation_title(),
            })
            .await?;
        tracing::debug!(conversation_id = %conversation.id, "conversation created");

        let resp = self
            .messages
            .create(&NewMessage {
                conversation_id: conversation.id.clone(),
                content: request.text.clone(),
                role: Role::User,
            })
            .await?;

        resp.assistant_message.map(EmbeddedReply::into_message).ok_or_else(|| {
            ApiError::Decode(format!(
                "message response for conversation {} had no assistantMessage",
                conversation.id
            ))
        })
    }
}

pub struct LegacyStrategy {
    chat: LegacyChatApi,
}

impl LegacyStrategy {
    pub fn new(chat: LegacyChatApi) -> Self {
        Self { chat }
    }
}

#[async_trait(?Send)]
impl SendStrategy for LegacyStrategy {
    fn name(&self) -> &'static str {
        "legacy"
    }

    async fn send(&self, request: &SendRequest) -> Result<ChatMessage, ApiError> {
        self.chat
            .send(&LegacyChatRequest {
                model_id: request.model_id.clone(),
                plugin_ids: request.plugin_id_list(),
                message: request.text.clone(),
            })
            .await
    }
}

/// Tries each strategy in order and returns the first reply. When all fail the
/// last strategy's error is returned.
pub async fn first_success(
    strategies: &[Box<dyn SendStrategy>],
    request: &SendRequest,
) -> Result<ChatMessage, ApiError> {
    let mut last_err = ApiError::Network("no send strategy configured".into());
    for (idx, strategy) in strategies.iter().enumerate() {
        match strategy.send(request).await {
            Ok(reply) => return Ok(reply),
            Err(err) => {
                if let Some(next) = strategies.get(idx + 1) {
                    tracing::warn!(
                        failed = strategy.name(),
                        next = next.name(),
                        error = %err,
                        "send failed, falling back"
                    );
                }
                last_err = err;
            }
        }
    }
    Err(last_err)
}

/// What the conversation controller needs from the backend.
#[async_trait(?Send)]
pub trait ChatSender {
    async fn send_message(&self, request: &SendRequest) -> Result<ChatMessage, ApiError>;
}

pub struct ChatService {
    strategies: Vec<Box<dyn SendStrategy>>,
}

impl ChatService {
    /// Conversation API first, legacy `/chat` second.
    pub fn new(backend: &Backend) -> Self {
        Self::with_strategies(vec![
            Box::new(ConversationStrategy::new(
                backend.conversations.clone(),
                backend.messages.clone(),
            )),
            Box::new(LegacyStrategy::new(backend.legacy_chat.clone())),
        ])
    }

    pub fn with_strategies(strategies: Vec<Box<dyn SendStrategy>>) -> Self {
        Self { strategies }
    }
}

#[async_trait(?Send)]
impl ChatSender for ChatService {
    async fn send_message(&self, request: &SendRequest) -> Result<ChatMessage, ApiError> {
        tracing::info!(
            model_id = %request.model_id,
            plugins = request.plugin_ids.len(),
            "sending chat message"
        );
        first_success(&self.strategies, request).await
    }
}
