// src/services/composer.rs

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Enter,
    Backspace,
    Char(char),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub shift: bool,
}

impl KeyPress {
    pub fn plain(key: Key) -> Self {
        Self { key, shift: false }
    }

    pub fn shifted(key: Key) -> Self {
        Self { key, shift: true }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum InputAction {
    /// Keep composing.
    Edited,
    /// Enter without Shift: submit the buffer. No newline is inserted.
    Submit(String),
}

/// Text input buffer implementing the send-on-Enter contract.
#[derive(Debug, Default)]
pub struct Composer {
    buffer: String,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn handle_key(&mut self, press: KeyPress) -> InputAction {
        match press.key {
            Key::Enter if !press.shift => InputAction::Submit(self.buffer.clone()),
            Key::Enter => {
                self.buffer.push('\n');
                InputAction::Edited
            }
            Key::Backspace => {
                self.buffer.pop();
                InputAction::Edited
            }
            Key::Char(c) => {
                self.buffer.push(c);
                InputAction::Edited
            }
        }
    }

    /// Feed one terminal line. A trailing `\` stands in for Shift+Enter.
    pub fn feed_line(&mut self, line: &str) -> InputAction {
        let line = line.trim_end_matches(['\r', '\n']);
        let (body, continued) = match line.strip_suffix('\\') {
            Some(body) => (body, true),
            None => (line, false),
        };
        for c in body.chars() {
            self.handle_key(KeyPress::plain(Key::Char(c)));
        }
        if continued {
            self.handle_key(KeyPress::shifted(Key::Enter))
        } else {
            self.handle_key(KeyPress::plain(Key::Enter))
        }
    }
}
