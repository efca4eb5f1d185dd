#![allow(dead_code, clippy::unwrap_used, clippy::missing_panics_doc, missing_debug_implementations, unreachable_pub)]
use async_trait::async_trait;
use chat_relay_server::api::{app_router, mgmt_router};
use chat_relay_server::config::Config;
use chat_relay_server::domain::conversation::ConversationKey;
use chat_relay_server::domain::message::Message;
use chat_relay_server::storage::{InMemoryMessageStore, MessageStore, StorageError};
use chat_relay_server::{App, telemetry};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::net::TcpListener;

pub struct TestApp {
    pub server_url: String,
    pub mgmt_url: String,
    pub client: reqwest::Client,
    pub config: Config,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_store(Arc::new(InMemoryMessageStore::new())).await
    }

    pub async fn spawn_with_store(store: Arc<dyn MessageStore>) -> Self {
        Self::spawn_with(Config::default(), store).await
    }

    pub async fn spawn_with(config: Config, store: Arc<dyn MessageStore>) -> Self {
        telemetry::init_test_telemetry();

        let app = App::with_store(&config, store);

        let api_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mgmt_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let server_url = format!("http://{}", api_listener.local_addr().unwrap());
        let mgmt_url = format!("http://{}", mgmt_listener.local_addr().unwrap());

        let router = app_router(app.state);
        let mgmt = mgmt_router(app.mgmt_state);
        tokio::spawn(async move {
            axum::serve(api_listener, router).await.unwrap();
        });
        tokio::spawn(async move {
            axum::serve(mgmt_listener, mgmt).await.unwrap();
        });

        Self { server_url, mgmt_url, client: reqwest::Client::new(), config }
    }

    pub async fn send(&self, chat: &str, sender: &str, text: &str) -> reqwest::Response {
        self.client
            .post(format!("{}/api/send", self.server_url))
            .json(&json!({ "chat": chat, "sender": sender, "text": text }))
            .send()
            .await
            .unwrap()
    }

    pub async fn send_ok(&self, chat: &str, sender: &str, text: &str) {
        let resp = self.send(chat, sender, text).await;
        assert_eq!(resp.status(), 200, "send failed for {chat}/{sender}");
    }

    pub async fn pull(&self, body: Value) -> reqwest::Response {
        self.client.get(format!("{}/api/pull", self.server_url)).json(&body).send().await.unwrap()
    }

    pub async fn pull_json(&self, body: Value) -> Value {
        let resp = self.pull(body).await;
        assert_eq!(resp.status(), 200);
        resp.json().await.unwrap()
    }
}

pub fn texts(body: &Value) -> Vec<String> {
    body["messages"].as_array().unwrap().iter().map(|m| m["text"].as_str().unwrap().to_string()).collect()
}

/// A store whose every operation fails.
#[derive(Debug, Default)]
pub struct UnavailableStore;

#[async_trait]
impl MessageStore for UnavailableStore {
    async fn append(&self, _key: &ConversationKey, _message: &Message) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("connection refused".into()))
    }

    async fn range(
        &self,
        _key: &ConversationKey,
        _start: i64,
        _end: i64,
        _reverse: bool,
    ) -> Result<Vec<Message>, StorageError> {
        Err(StorageError::Unavailable("connection refused".into()))
    }

    async fn ping(&self) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("connection refused".into()))
    }
}
