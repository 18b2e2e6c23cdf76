#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

use chat_client::{
    ChatBackend, ClientError, Result,
    message::{ChatResponse, LoadChatResponse, Message, MessageRole, NewChatResponse, UploadResponse},
};

/// Backend double that replays queued responses and records every call.
#[derive(Default)]
pub struct ScriptedBackend {
    pub new_chats: Mutex<VecDeque<NewChatResponse>>,
    pub replies: Mutex<VecDeque<ChatResponse>>,
    pub histories: Mutex<HashMap<String, LoadChatResponse>>,
    pub uploads: Mutex<VecDeque<UploadResponse>>,
    pub calls: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chat_ids(ids: &[&str]) -> Self {
        let backend = Self::new();
        for id in ids {
            backend.push_new_chat(Some(*id), None);
        }
        backend
    }

    pub fn push_new_chat(&self, chat_id: Option<&str>, error: Option<&str>) {
        self.new_chats.lock().unwrap().push_back(NewChatResponse {
            chat_id: chat_id.map(str::to_string),
            error: error.map(str::to_string),
        });
    }

    pub fn push_reply(&self, reply: Option<&str>, error: Option<&str>) {
        self.replies.lock().unwrap().push_back(ChatResponse {
            reply: reply.map(str::to_string),
            error: error.map(str::to_string),
        });
    }

    pub fn set_history(&self, chat_id: &str, messages: Vec<Message>) {
        self.histories.lock().unwrap().insert(
            chat_id.to_string(),
            LoadChatResponse { messages, error: None },
        );
    }

    pub fn set_history_with_error(&self, chat_id: &str, messages: Vec<Message>, error: &str) {
        self.histories.lock().unwrap().insert(
            chat_id.to_string(),
            LoadChatResponse { messages, error: Some(error.to_string()) },
        );
    }

    pub fn push_upload(&self, message: Option<&str>, error: Option<&str>) {
        self.uploads.lock().unwrap().push_back(UploadResponse {
            message: message.map(str::to_string),
            error: error.map(str::to_string),
        });
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn new_chat(&self) -> Result<NewChatResponse> {
        self.record("new_chat".into());
        self.new_chats
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(ClientError::MissingField("chat_id"))
    }

    async fn send_message(&self, chat_id: &str, message: &str) -> Result<ChatResponse> {
        self.record(format!("chat/{}:{}", chat_id, message));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(ClientError::MissingField("reply"))
    }

    async fn load_chat(&self, chat_id: &str) -> Result<LoadChatResponse> {
        self.record(format!("load_chat/{}", chat_id));
        Ok(self
            .histories
            .lock()
            .unwrap()
            .get(chat_id)
            .cloned()
            .unwrap_or_else(|| LoadChatResponse {
                messages: Vec::new(),
                error: Some("Chat ID not found".into()),
            }))
    }

    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<UploadResponse> {
        self.record(format!("upload/{}:{}", file_name, bytes.len()));
        self.uploads
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(ClientError::MissingField("message"))
    }
}

pub type Conversations = Arc<Mutex<HashMap<String, Vec<Message>>>>;

/// In-process stand-in for the chat server, bound to an ephemeral port.
pub struct StubServer {
    pub addr: SocketAddr,
    pub conversations: Conversations,
}

impl StubServer {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

pub async fn spawn_stub_server() -> StubServer {
    let conversations: Conversations = Arc::new(Mutex::new(HashMap::new()));

    let app = Router::new()
        .route("/new_chat", post(new_chat))
        .route("/chat/{id}", post(chat))
        .route("/load_chat/{id}", get(load_chat))
        .route("/upload", post(upload))
        .layer(TraceLayer::new_for_http())
        .with_state(conversations.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubServer { addr, conversations }
}

async fn new_chat(State(conversations): State<Conversations>) -> Json<Value> {
    let chat_id = uuid::Uuid::new_v4().to_string();
    conversations.lock().unwrap().insert(
        chat_id.clone(),
        vec![Message::new(MessageRole::System, "You are a helpful HR assistant.")],
    );
    Json(json!({ "chat_id": chat_id }))
}

async fn chat(
    State(conversations): State<Conversations>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let message = body["message"].as_str().unwrap_or_default().to_string();
    let mut guard = conversations.lock().unwrap();
    let Some(history) = guard.get_mut(&id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Chat ID not found. Please create new Chat!" })),
        );
    };
    let reply = format!("echo: {}", message);
    history.push(Message::new(MessageRole::User, message));
    history.push(Message::new(MessageRole::Assistant, reply.clone()));
    (StatusCode::OK, Json(json!({ "reply": reply })))
}

async fn load_chat(
    State(conversations): State<Conversations>,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    match conversations.lock().unwrap().get(&id) {
        Some(history) => (StatusCode::OK, Json(json!({ "messages": history }))),
        None => (StatusCode::NOT_FOUND, Json(json!({ "error": "Chat ID not found" }))),
    }
}

async fn upload(mut multipart: Multipart) -> (StatusCode, Json<Value>) {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let name = field.file_name().unwrap_or_default().to_string();
        let Ok(bytes) = field.bytes().await else {
            break;
        };
        if name.ends_with(".txt") {
            return (
                StatusCode::OK,
                Json(json!({ "message": format!("Received {} ({} bytes)", name, bytes.len()) })),
            );
        }
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "Invalid file type" })));
    }
    (StatusCode::BAD_REQUEST, Json(json!({ "error": "No file part" })))
}
