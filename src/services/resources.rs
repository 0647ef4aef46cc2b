use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::models::{
    ChatMessage, Conversation, CreateMessageResponse, DeleteConfirmation, LegacyChatRequest,
    LegacyChatResponse, Model, NewMessage, Plugin, StoredMessage,
};
use crate::services::http::ApiClient;

/// List/get/create/update/delete against one REST collection.
/// Every call is a single request with no retry.
pub struct ResourceClient<E> {
    api: ApiClient,
    collection: &'static str,
    _entity: PhantomData<E>,
}

impl<E> Clone for ResourceClient<E> {
    fn clone(&self) -> Self {
        Self { api: self.api.clone(), collection: self.collection, _entity: PhantomData }
    }
}

impl<E> PartialEq for ResourceClient<E> {
    fn eq(&self, other: &Self) -> bool {
        self.api == other.api && self.collection == other.collection
    }
}

impl<E: DeserializeOwned> ResourceClient<E> {
    pub fn new(api: ApiClient, collection: &'static str) -> Self {
        Self { api, collection, _entity: PhantomData }
    }

    fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.collection, id)
    }

    pub async fn list(&self) -> Result<Vec<E>, ApiError> {
        self.api.get(self.collection).await
    }

    pub async fn get(&self, id: &str) -> Result<E, ApiError> {
        self.api.get(&self.item_path(id)).await
    }

    /// The server assigns the identifier and timestamps.
    pub async fn create<F: Serialize + ?Sized>(&self, fields: &F) -> Result<E, ApiError> {
        self.api.post(self.collection, fields).await
    }

    /// Merge-patch: only the fields present in `patch` change.
    pub async fn update<P: Serialize + ?Sized>(&self, id: &str, patch: &P) -> Result<E, ApiError> {
        self.api.patch(&self.item_path(id), patch).await
    }

    pub async fn delete(&self, id: &str) -> Result<DeleteConfirmation, ApiError> {
        self.api.delete(&self.item_path(id)).await
    }
}

pub type ModelsApi = ResourceClient<Model>;
pub type PluginsApi = ResourceClient<Plugin>;
pub type ConversationsApi = ResourceClient<Conversation>;

/// Messages only exist under a conversation: no get or update.
#[derive(Clone, PartialEq)]
pub struct MessagesApi {
    api: ApiClient,
}

impl MessagesApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list_by_conversation(&self, conversation_id: &str) -> Result<Vec<StoredMessage>, ApiError> {
        self.api.get(&format!("messages/conversation/{}", conversation_id)).await
    }

    pub async fn create(&self, message: &NewMessage) -> Result<CreateMessageResponse, ApiError> {
        self.api.post("messages", message).await
    }

    pub async fn delete(&self, id: &str) -> Result<DeleteConfirmation, ApiError> {
        self.api.delete(&format!("messages/{}", id)).await
    }
}

/// The single-endpoint chat API that predates conversations.
#[derive(Clone, PartialEq)]
pub struct LegacyChatApi {
    api: ApiClient,
}

impl LegacyChatApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn send(&self, request: &LegacyChatRequest) -> Result<ChatMessage, ApiError> {
        let resp: LegacyChatResponse = self.api.post("chat", request).await?;
        Ok(resp.into_message())
    }
}

/// Every client the application uses, built over one shared [`ApiClient`].
#[derive(Clone, PartialEq)]
pub struct Backend {
    pub models: ModelsApi,
    pub plugins: PluginsApi,
    pub conversations: ConversationsApi,
    pub messages: MessagesApi,
    pub legacy_chat: LegacyChatApi,
}

impl Backend {
    pub fn new(api: ApiClient) -> Self {
        Self {
            models: ResourceClient::new(api.clone(), "models"),
            plugins: ResourceClient::new(api.clone(), "plugins"),
            conversations: ResourceClient::new(api.clone(), "conversations"),
            messages: MessagesApi::new(api.clone()),
            legacy_chat: LegacyChatApi::new(api),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConversationPatch, ModelPatch, PluginPatch, Role};
    use crate::services::http::mock::{client, MockTransport};
    use reqwest::Method;
    use serde_json::json;

    fn model_json(id: &str, name: &str) -> serde_json::Value {
        json!({ "_id": id, "name": name, "description": "d", "apiEndpoint": "http://e", "status": "active" })
    }

    #[tokio::test]
    async fn models_crud_maps_to_rest_routes() {
        let transport = MockTransport::new();
        transport
            .respond(200, json!([model_json("m1", "GPT")]))
            .respond(200, model_json("m1", "GPT"))
            .respond(201, model_json("m2", "Claude"))
            .respond(200, model_json("m2", "Claude 2"))
            .respond(200, json!({ "message": "deleted" }));
        let backend = Backend::new(client(&transport));

        assert_eq!(backend.models.list().await.unwrap().len(), 1);
        assert_eq!(backend.models.get("m1").await.unwrap().name, "GPT");
        let created = backend
            .models
            .create(&json!({ "name": "Claude", "description": "d", "apiEndpoint": "http://e", "status": "active" }))
            .await
            .unwrap();
        assert_eq!(created.id, "m2");
        let patch = ModelPatch { name: Some("Claude 2".into()), ..Default::default() };
        assert_eq!(backend.models.update("m2", &patch).await.unwrap().name, "Claude 2");
        backend.models.delete("m2").await.unwrap();

        let calls: Vec<(Method, String)> = transport
            .requests
            .borrow()
            .iter()
            .map(|r| (r.method.clone(), r.url.trim_start_matches("http://localhost:5000/api").to_string()))
            .collect();
        assert_eq!(
            calls,
            vec![
                (Method::GET, "/models".to_string()),
                (Method::GET, "/models/m1".to_string()),
                (Method::POST, "/models".to_string()),
                (Method::PATCH, "/models/m2".to_string()),
                (Method::DELETE, "/models/m2".to_string()),
            ]
        );
        assert_eq!(transport.request(3).body, Some(json!({ "name": "Claude 2" })));
    }

    #[tokio::test]
    async fn plugin_toggle_sends_only_enabled_flag() {
        let transport = MockTransport::new();
        transport.respond(
            200,
            json!({ "_id": "p1", "name": "Search", "description": "web", "version": "1.0.0", "enabled": false }),
        );
        let backend = Backend::new(client(&transport));

        let plugin = backend.plugins.update("p1", &PluginPatch::enabled(false)).await.unwrap();
        assert!(!plugin.enabled);
        assert_eq!(transport.request(0).url, "http://localhost:5000/api/plugins/p1");
        assert_eq!(transport.request(0).body, Some(json!({ "enabled": false })));
    }

    #[tokio::test]
    async fn messages_are_scoped_to_conversation() {
        let transport = MockTransport::new();
        transport
            .respond(200, json!([{ "_id": "x", "conversationId": "c9", "role": "user", "content": "hi" }]))
            .respond(200, json!({}));
        let backend = Backend::new(client(&transport));

        let messages = backend.messages.list_by_conversation("c9").await.unwrap();
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(transport.request(0).url, "http://localhost:5000/api/messages/conversation/c9");

        backend.messages.delete("x").await.unwrap();
        assert_eq!(transport.request(1).url, "http://localhost:5000/api/messages/x");
    }

    #[tokio::test]
    async fn conversation_rename_patches_title_only() {
        let transport = MockTransport::new();
        transport.respond(200, json!({ "_id": "c1", "modelId": "m1", "title": "Renamed" }));
        let backend = Backend::new(client(&transport));

        let patch = ConversationPatch { title: Some("Renamed".into()), ..Default::default() };
        let conversation = backend.conversations.update("c1", &patch).await.unwrap();
        assert_eq!(conversation.title, "Renamed");
        assert!(conversation.plugin_ids.is_empty());
        assert_eq!(transport.request(0).method, Method::PATCH);
        assert_eq!(transport.request(0).body, Some(json!({ "title": "Renamed" })));
    }

    #[tokio::test]
    async fn failures_propagate_untouched() {
        let transport = MockTransport::new();
        transport.respond_raw(500, "boom").fail("offline");
        let backend = Backend::new(client(&transport));

        let err = backend.plugins.list().await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        let err = backend.conversations.get("c1").await.unwrap_err();
        assert!(err.is_network());
    }
}
