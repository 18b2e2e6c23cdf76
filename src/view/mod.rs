// src/view/mod.rs
pub mod memory;
pub mod terminal;

use crate::message::MessageRole;

pub use memory::MemoryView;
pub use terminal::TerminalView;

/// Placeholder text shown while a reply is pending.
pub const TYPING_PLACEHOLDER: &str = "Typing...";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BubbleKind {
    User,
    Assistant,
}

impl BubbleKind {
    /// Everything that is not the user renders on the assistant side.
    pub fn for_role(role: &MessageRole) -> Self {
        match role {
            MessageRole::User => BubbleKind::User,
            _ => BubbleKind::Assistant,
        }
    }
}

/// Handle to a rendered bubble. Handles die when the log is cleared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BubbleId(pub u64);

/// Rendering surface the controller drives.
pub trait ChatView {
    fn append_bubble(&mut self, kind: BubbleKind, text: &str) -> BubbleId;

    /// Assistant-side bubble standing in for a reply that has not arrived.
    fn append_placeholder(&mut self) -> BubbleId {
        self.append_bubble(BubbleKind::Assistant, TYPING_PLACEHOLDER)
    }

    /// Replace a bubble's text in place. Unknown handles are ignored.
    fn set_bubble_text(&mut self, id: BubbleId, text: &str);

    fn remove_bubble(&mut self, id: BubbleId);

    fn clear_log(&mut self);

    /// Show the single error banner, replacing whatever it held.
    fn show_error(&mut self, message: &str);

    fn clear_error(&mut self);

    fn add_sidebar_entry(&mut self, label: &str, target_id: &str);

    fn clear_input(&mut self);

    /// Blocking notice.
    fn alert(&mut self, message: &str);
}
