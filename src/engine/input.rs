//! Input Buffer
//!
//! Single-line input with a character-indexed cursor. The cursor always sits
//! in `0..=len`, whatever sequence of edits is applied.

/// Which keystrokes a buffer accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFilter {
    /// ASCII letters only, stored lowercased
    Letters,
    /// Any non-control character
    Printable,
}

impl InputFilter {
    /// Map a raw character to what gets stored, or `None` if it is rejected
    pub fn accept(&self, ch: char) -> Option<char> {
        match self {
            InputFilter::Letters if ch.is_ascii_alphabetic() => Some(ch.to_ascii_lowercase()),
            InputFilter::Letters => None,
            InputFilter::Printable if !ch.is_control() => Some(ch),
            InputFilter::Printable => None,
        }
    }
}

/// Uncommitted line of input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
    cursor: usize,
    max_len: Option<usize>,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer that silently drops inserts past `max_len` characters
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            max_len: Some(max_len),
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn max_len(&self) -> Option<usize> {
        self.max_len
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.max_len.map_or(false, |max| self.len() >= max)
    }

    /// Insert at the cursor. Returns false when the buffer is full.
    pub fn insert(&mut self, ch: char) -> bool {
        if self.is_full() {
            return false;
        }
        let idx = self.byte_index(self.cursor);
        self.text.insert(idx, ch);
        self.cursor += 1;
        true
    }

    /// Backspace
    pub fn delete_before(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let idx = self.byte_index(self.cursor - 1);
        self.text.remove(idx);
        self.cursor -= 1;
    }

    /// Delete key
    pub fn delete_at(&mut self) {
        if self.cursor >= self.len() {
            return;
        }
        let idx = self.byte_index(self.cursor);
        self.text.remove(idx);
    }

    /// Move the cursor by `delta` characters, clamped to the line
    pub fn move_cursor(&mut self, delta: isize) {
        let target = self.cursor as isize + delta;
        self.cursor = target.clamp(0, self.len() as isize) as usize;
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.len();
    }

    /// Replace the whole line, cursor at the end
    pub fn replace(&mut self, text: &str) {
        self.text = match self.max_len {
            Some(max) => text.chars().take(max).collect(),
            None => text.to_string(),
        };
        self.cursor = self.len();
    }

    pub fn reset(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Text left and right of the cursor, for rendering
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.text.split_at(self.byte_index(self.cursor))
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(idx, _)| idx)
            .unwrap_or(self.text.len())
    }
}
