// src/services/backend.rs
use async_trait::async_trait;
use reqwest::{Response, Url, multipart};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{
    config::ClientConfig,
    error::{ClientError, Result},
    message::{ChatRequest, ChatResponse, LoadChatResponse, NewChatResponse, UploadResponse},
};

/// The four backend calls the controller depends on.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn new_chat(&self) -> Result<NewChatResponse>;

    async fn send_message(&self, chat_id: &str, message: &str) -> Result<ChatResponse>;

    async fn load_chat(&self, chat_id: &str) -> Result<LoadChatResponse>;

    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<UploadResponse>;
}

#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ClientError::Config(format!("invalid base url '{}': {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Config(format!("'{}' cannot be a base url", base_url)));
        }
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // Ids are pushed as path segments so they get percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// The backend answers with a JSON body on every status, errors included.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            warn!(%status, url = %response.url(), "backend returned non-success status");
        } else {
            debug!(%status, url = %response.url(), "backend response");
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn new_chat(&self) -> Result<NewChatResponse> {
        let response = self.http.post(self.endpoint(&["new_chat"])).send().await?;
        Self::decode(response).await
    }

    async fn send_message(&self, chat_id: &str, message: &str) -> Result<ChatResponse> {
        let response = self
            .http
            .post(self.endpoint(&["chat", chat_id]))
            .json(&ChatRequest { message })
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn load_chat(&self, chat_id: &str) -> Result<LoadChatResponse> {
        let response = self.http.get(self.endpoint(&["load_chat", chat_id])).send().await?;
        Self::decode(response).await
    }

    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<UploadResponse> {
        let part = multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("application/octet-stream")?;
        let form = multipart::Form::new().part("file", part);
        let response = self
            .http
            .post(self.endpoint(&["upload"]))
            .multipart(form)
            .send()
            .await?;
        Self::decode(response).await
    }
}
