// src/view/memory.rs
use super::{BubbleId, BubbleKind, ChatView};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bubble {
    pub id: BubbleId,
    pub kind: BubbleKind,
    pub text: String,
}

/// In-memory view that keeps exactly what a screen would show.
#[derive(Debug, Default)]
pub struct MemoryView {
    pub bubbles: Vec<Bubble>,
    pub error: Option<String>,
    pub sidebar: Vec<(String, String)>,
    pub alerts: Vec<String>,
    pub input: String,
    next_id: u64,
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.bubbles.iter().map(|b| b.text.as_str()).collect()
    }
}

impl ChatView for MemoryView {
    fn append_bubble(&mut self, kind: BubbleKind, text: &str) -> BubbleId {
        self.next_id += 1;
        let id = BubbleId(self.next_id);
        self.bubbles.push(Bubble { id, kind, text: text.to_string() });
        id
    }

    fn set_bubble_text(&mut self, id: BubbleId, text: &str) {
        if let Some(bubble) = self.bubbles.iter_mut().find(|b| b.id == id) {
            bubble.text = text.to_string();
        }
    }

    fn remove_bubble(&mut self, id: BubbleId) {
        self.bubbles.retain(|b| b.id != id);
    }

    fn clear_log(&mut self) {
        self.bubbles.clear();
    }

    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    fn clear_error(&mut self) {
        self.error = None;
    }

    fn add_sidebar_entry(&mut self, label: &str, target_id: &str) {
        self.sidebar.push((label.to_string(), target_id.to_string()));
    }

    fn clear_input(&mut self) {
        self.input.clear();
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}
