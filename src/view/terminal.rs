// src/view/terminal.rs
use std::collections::HashMap;
use std::io::Write;

use tracing::warn;

use super::{BubbleId, BubbleKind, ChatView};

/// Line-oriented view. A terminal cannot rewrite earlier lines, so a
/// placeholder is printed once and its final text is printed when it lands.
pub struct TerminalView<W: Write> {
    out: W,
    live: HashMap<BubbleId, BubbleKind>,
    next_id: u64,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self { out, live: HashMap::new(), next_id: 0 }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn prefix(kind: BubbleKind) -> &'static str {
        match kind {
            BubbleKind::User => "you",
            BubbleKind::Assistant => "bot",
        }
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text).and_then(|_| self.out.flush()) {
            warn!(error = %e, "failed to write to terminal");
        }
    }
}

impl<W: Write> ChatView for TerminalView<W> {
    fn append_bubble(&mut self, kind: BubbleKind, text: &str) -> BubbleId {
        self.next_id += 1;
        let id = BubbleId(self.next_id);
        self.live.insert(id, kind);
        self.line(&format!("{}> {}", Self::prefix(kind), text));
        id
    }

    fn append_placeholder(&mut self) -> BubbleId {
        self.next_id += 1;
        let id = BubbleId(self.next_id);
        self.live.insert(id, BubbleKind::Assistant);
        self.line(&format!("{}> …", Self::prefix(BubbleKind::Assistant)));
        id
    }

    fn set_bubble_text(&mut self, id: BubbleId, text: &str) {
        if let Some(kind) = self.live.get(&id).copied() {
            self.line(&format!("{}> {}", Self::prefix(kind), text));
        }
    }

    fn remove_bubble(&mut self, id: BubbleId) {
        self.live.remove(&id);
    }

    fn clear_log(&mut self) {
        self.live.clear();
        self.line("──────────");
    }

    fn show_error(&mut self, message: &str) {
        self.line(&format!("[error] {}", message));
    }

    fn clear_error(&mut self) {}

    fn add_sidebar_entry(&mut self, label: &str, target_id: &str) {
        self.line(&format!("+ {} ({})", label, target_id));
    }

    fn clear_input(&mut self) {}

    fn alert(&mut self, message: &str) {
        self.line(&format!("[!] {}", message));
    }
}
