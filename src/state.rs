// src/state.rs
use std::collections::HashMap;

use tracing::debug;

/// One clickable sidebar item. Created once per new conversation, never removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversationListEntry {
    pub display_label: String,
    pub target_id: String,
}

/// Stamp carried by an in-flight send so its reply can be checked for staleness.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendTicket {
    pub chat_id: String,
    pub seq: u64,
    pub epoch: u64,
}

/// Client-side conversation state, owned by the controller and threaded
/// through every operation.
#[derive(Debug, Default)]
pub struct SessionState {
    active: Option<String>,
    sidebar: Vec<ConversationListEntry>,
    sequences: HashMap<String, u64>,
    // Bumped every time the message log is cleared.
    epoch: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn sidebar(&self) -> &[ConversationListEntry] {
        &self.sidebar
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Replace the active session and start a fresh log epoch.
    pub fn activate(&mut self, chat_id: impl Into<String>) {
        let chat_id = chat_id.into();
        debug!(%chat_id, "activating session");
        self.active = Some(chat_id);
        self.epoch += 1;
    }

    /// Append a sidebar entry labeled by position, independent of the id.
    pub fn add_entry(&mut self, target_id: impl Into<String>) -> &ConversationListEntry {
        let display_label = format!("Chat {}", self.sidebar.len() + 1);
        self.sidebar.push(ConversationListEntry {
            display_label,
            target_id: target_id.into(),
        });
        &self.sidebar[self.sidebar.len() - 1]
    }

    /// Look up a sidebar target by 1-based position or by raw id.
    pub fn resolve_target(&self, key: &str) -> Option<String> {
        if let Ok(n) = key.parse::<usize>() {
            if let Some(entry) = n.checked_sub(1).and_then(|i| self.sidebar.get(i)) {
                return Some(entry.target_id.clone());
            }
        }
        self.sidebar
            .iter()
            .find(|e| e.target_id == key || e.display_label == key)
            .map(|e| e.target_id.clone())
    }

    /// Issue the next sequence number for a send on the active session.
    pub fn issue_ticket(&mut self) -> Option<SendTicket> {
        let chat_id = self.active.clone()?;
        let seq = self.sequences.entry(chat_id.clone()).or_insert(0);
        *seq += 1;
        Some(SendTicket {
            chat_id,
            seq: *seq,
            epoch: self.epoch,
        })
    }

    /// A reply is current only if nothing newer was sent to its session and
    /// the log it was rendered into has not been cleared since.
    pub fn is_current(&self, ticket: &SendTicket) -> bool {
        self.epoch == ticket.epoch
            && self.active.as_deref() == Some(ticket.chat_id.as_str())
            && self.sequences.get(&ticket.chat_id).copied() == Some(ticket.seq)
    }
}
