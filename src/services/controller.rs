// src/services/controller.rs
use std::path::Path;

use tracing::{debug, info, warn};

use crate::{
    error::{ClientError, NO_ACTIVE_SESSION, Result},
    message::{ChatResponse, backend_error},
    services::backend::ChatBackend,
    state::{SendTicket, SessionState},
    view::{BubbleId, BubbleKind, ChatView},
};

/// A send whose user bubble and placeholder are already on screen.
#[derive(Debug)]
pub struct PendingReply {
    pub ticket: SendTicket,
    pub message: String,
    placeholder: BubbleId,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// The placeholder now shows `reply`. `error` was shown in the banner too.
    Replied { reply: String, error: Option<String> },
    /// A newer send or a session switch overtook this reply; it was dropped.
    Stale,
}

/// Drives one conversation view: session switching, sending, history and uploads.
pub struct ChatController<B, V> {
    backend: B,
    view: V,
    state: SessionState,
}

impl<B: ChatBackend, V: ChatView> ChatController<B, V> {
    pub fn new(backend: B, view: V) -> Self {
        Self { backend, view, state: SessionState::new() }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn show_error(&mut self, message: &str) {
        self.view.show_error(message);
    }

    pub fn clear_error(&mut self) {
        self.view.clear_error();
    }

    /// Ask the backend for a new conversation and make it active.
    ///
    /// An `error` in the response is shown, and a `chat_id` sent alongside it
    /// is still adopted.
    pub async fn create_session(&mut self) -> Result<String> {
        self.clear_error();
        let response = self.backend.new_chat().await?;

        if let Some(error) = backend_error(&response.error) {
            warn!(%error, "new_chat returned an error");
            self.view.show_error(error);
        }

        let Some(chat_id) = response.chat_id.filter(|id| !id.is_empty()) else {
            return Err(match response.error {
                Some(error) if !error.trim().is_empty() => ClientError::Backend(error),
                _ => ClientError::MissingField("chat_id"),
            });
        };

        self.state.activate(chat_id.clone());
        self.view.clear_log();
        let entry = self.state.add_entry(chat_id.clone());
        self.view.add_sidebar_entry(&entry.display_label, &entry.target_id);
        info!(%chat_id, label = %entry.display_label, "created session");
        Ok(chat_id)
    }

    /// Send `text` to the active session and render the reply.
    pub async fn send_message(&mut self, text: &str) -> Result<SendOutcome> {
        let pending = self.begin_send(text)?;
        let response = self
            .backend
            .send_message(&pending.ticket.chat_id, &pending.message)
            .await;
        self.finish_send(pending, response)
    }

    /// Local half of a send: validate, render the user bubble and the
    /// placeholder, clear the input and stamp the request.
    pub fn begin_send(&mut self, text: &str) -> Result<PendingReply> {
        self.clear_error();
        let message = text.trim();
        if message.is_empty() {
            return Err(ClientError::EmptyMessage);
        }
        let Some(ticket) = self.state.issue_ticket() else {
            self.view.show_error(NO_ACTIVE_SESSION);
            return Err(ClientError::NoActiveSession);
        };

        self.view.append_bubble(BubbleKind::User, message);
        self.view.clear_input();
        let placeholder = self.view.append_placeholder();

        debug!(chat_id = %ticket.chat_id, seq = ticket.seq, "sending message");
        Ok(PendingReply { ticket, message: message.to_string(), placeholder })
    }

    /// Apply the backend's answer to a pending send.
    pub fn finish_send(
        &mut self,
        pending: PendingReply,
        response: Result<ChatResponse>,
    ) -> Result<SendOutcome> {
        let PendingReply { ticket, placeholder, .. } = pending;

        if !self.state.is_current(&ticket) {
            debug!(chat_id = %ticket.chat_id, seq = ticket.seq, "dropping stale reply");
            if ticket.epoch == self.state.epoch() {
                self.view.remove_bubble(placeholder);
            }
            return Ok(SendOutcome::Stale);
        }

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                self.view.remove_bubble(placeholder);
                return Err(e);
            }
        };

        let error = backend_error(&response.error).map(str::to_string);
        if let Some(error) = &error {
            warn!(chat_id = %ticket.chat_id, %error, "chat returned an error");
            self.view.show_error(error);
        }

        match response.reply {
            Some(reply) => {
                self.view.set_bubble_text(placeholder, &reply);
                Ok(SendOutcome::Replied { reply, error })
            }
            None => {
                self.view.remove_bubble(placeholder);
                Err(match error {
                    Some(error) => ClientError::Backend(error),
                    None => ClientError::MissingField("reply"),
                })
            }
        }
    }

    /// Switch to `chat_id` and render its history. Returns how many bubbles
    /// were rendered.
    pub async fn load_session(&mut self, chat_id: &str) -> Result<usize> {
        self.clear_error();
        self.view.clear_log();
        self.state.activate(chat_id);

        let response = self.backend.load_chat(chat_id).await?;

        let error = backend_error(&response.error).map(str::to_string);
        if let Some(error) = &error {
            warn!(%chat_id, %error, "load_chat returned an error");
            self.view.show_error(error);
        }

        let mut rendered = 0;
        for message in response.messages.iter().filter(|m| !m.is_system()) {
            self.view.append_bubble(BubbleKind::for_role(&message.role), message.text());
            rendered += 1;
        }
        debug!(%chat_id, rendered, total = response.messages.len(), "loaded history");

        match error {
            Some(error) if response.messages.is_empty() => Err(ClientError::Backend(error)),
            _ => Ok(rendered),
        }
    }

    /// Upload the file at `path` and alert with the backend's verdict.
    pub async fn upload_file(&mut self, path: &Path) -> Result<String> {
        self.clear_error();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        info!(%file_name, size = bytes.len(), "uploading file");

        let response = self.backend.upload(&file_name, bytes).await?;

        let message = response.message.filter(|m| !m.is_empty());
        let error = backend_error(&response.error).map(str::to_string);
        match (message, error) {
            (Some(message), _) => {
                self.view.alert(&message);
                Ok(message)
            }
            (None, Some(error)) => {
                self.view.alert(&error);
                Err(ClientError::Backend(error))
            }
            (None, None) => Err(ClientError::MissingField("message")),
        }
    }
}
