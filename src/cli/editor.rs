//! Text Editor Module
//!
//! Multi-line editor for the `email.txt` body. Cursor columns count
//! characters, never bytes.

/// Cursor movement directions
#[derive(Debug, Clone, Copy)]
pub enum CursorDirection {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
}

/// Multi-line text editor with cursor management
#[derive(Debug, Clone)]
pub struct TextEditor {
    lines: Vec<String>,
    cursor_x: usize,
    cursor_y: usize,
}

fn byte_index(line: &str, column: usize) -> usize {
    line.char_indices()
        .nth(column)
        .map(|(idx, _)| idx)
        .unwrap_or(line.len())
}

fn char_len(line: &str) -> usize {
    line.chars().count()
}

impl TextEditor {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor_x: 0,
            cursor_y: 0,
        }
    }

    pub fn get_text(&self) -> String {
        self.lines.join("\n")
    }

    /// True when the body holds nothing but whitespace
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|line| line.trim().is_empty())
    }

    pub fn insert_char(&mut self, ch: char) {
        let line = &mut self.lines[self.cursor_y];
        let at = byte_index(line, self.cursor_x);
        line.insert(at, ch);
        self.cursor_x += 1;
    }

    /// Backspace
    pub fn delete_char(&mut self) {
        if self.cursor_x > 0 {
            let line = &mut self.lines[self.cursor_y];
            let at = byte_index(line, self.cursor_x - 1);
            line.remove(at);
            self.cursor_x -= 1;
        } else if self.cursor_y > 0 {
            let line = self.lines.remove(self.cursor_y);
            self.cursor_y -= 1;
            self.cursor_x = char_len(&self.lines[self.cursor_y]);
            self.lines[self.cursor_y].push_str(&line);
        }
    }

    /// Delete key
    pub fn delete_char_forward(&mut self) {
        let len = char_len(&self.lines[self.cursor_y]);
        if self.cursor_x < len {
            let line = &mut self.lines[self.cursor_y];
            let at = byte_index(line, self.cursor_x);
            line.remove(at);
        } else if self.cursor_y + 1 < self.lines.len() {
            let next_line = self.lines.remove(self.cursor_y + 1);
            self.lines[self.cursor_y].push_str(&next_line);
        }
    }

    pub fn handle_enter(&mut self) {
        let line = &mut self.lines[self.cursor_y];
        let at = byte_index(line, self.cursor_x);
        let right = line.split_off(at);

        self.lines.insert(self.cursor_y + 1, right);
        self.cursor_y += 1;
        self.cursor_x = 0;
    }

    pub fn move_cursor(&mut self, direction: CursorDirection) {
        match direction {
            CursorDirection::Left => {
                if self.cursor_x > 0 {
                    self.cursor_x -= 1;
                } else if self.cursor_y > 0 {
                    self.cursor_y -= 1;
                    self.cursor_x = char_len(&self.lines[self.cursor_y]);
                }
            }
            CursorDirection::Right => {
                if self.cursor_x < char_len(&self.lines[self.cursor_y]) {
                    self.cursor_x += 1;
                } else if self.cursor_y + 1 < self.lines.len() {
                    self.cursor_y += 1;
                    self.cursor_x = 0;
                }
            }
            CursorDirection::Up => {
                if self.cursor_y > 0 {
                    self.cursor_y -= 1;
                    self.cursor_x = self.cursor_x.min(char_len(&self.lines[self.cursor_y]));
                }
            }
            CursorDirection::Down => {
                if self.cursor_y + 1 < self.lines.len() {
                    self.cursor_y += 1;
                    self.cursor_x = self.cursor_x.min(char_len(&self.lines[self.cursor_y]));
                }
            }
            CursorDirection::Home => self.cursor_x = 0,
            CursorDirection::End => self.cursor_x = char_len(&self.lines[self.cursor_y]),
        }
    }

    /// Ctrl+W
    pub fn delete_word_backward(&mut self) {
        if self.cursor_x == 0 {
            return;
        }
        let line = &mut self.lines[self.cursor_y];
        let chars: Vec<char> = line.chars().collect();

        let mut new_x = self.cursor_x;
        while new_x > 0 && chars[new_x - 1].is_whitespace() {
            new_x -= 1;
        }
        while new_x > 0 && !chars[new_x - 1].is_whitespace() {
            new_x -= 1;
        }

        let start = byte_index(line, new_x);
        let end = byte_index(line, self.cursor_x);
        line.drain(start..end);
        self.cursor_x = new_x;
    }

    /// Drop everything
    pub fn clear(&mut self) {
        self.lines = vec![String::new()];
        self.cursor_x = 0;
        self.cursor_y = 0;
    }

    pub fn insert_text(&mut self, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                self.handle_enter();
            } else if ch != '\r' {
                self.insert_char(ch);
            }
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn get_cursor_position(&self) -> (usize, usize) {
        (self.cursor_x, self.cursor_y)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

impl Default for TextEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_editor_basic_operations() {
        let mut editor = TextEditor::new();

        editor.insert_char('H');
        editor.insert_char('i');
        assert_eq!(editor.get_text(), "Hi");

        editor.delete_char();
        assert_eq!(editor.get_text(), "H");

        editor.move_cursor(CursorDirection::Home);
        assert_eq!(editor.get_cursor_position(), (0, 0));
    }

    #[test]
    fn test_text_editor_multiline() {
        let mut editor = TextEditor::new();

        editor.insert_text("First line\nSecond line");
        assert_eq!(editor.line_count(), 2);
        assert_eq!(editor.get_text(), "First line\nSecond line");

        editor.move_cursor(CursorDirection::Home);
        editor.delete_char();
        assert_eq!(editor.get_text(), "First lineSecond line");
        assert_eq!(editor.get_cursor_position(), (10, 0));
    }

    #[test]
    fn test_multibyte_editing() {
        let mut editor = TextEditor::new();
        editor.insert_text("héllo wörld");
        editor.move_cursor(CursorDirection::Left);
        editor.delete_char();
        assert_eq!(editor.get_text(), "héllo wörd");

        editor.move_cursor(CursorDirection::Home);
        editor.move_cursor(CursorDirection::Right);
        editor.delete_char_forward();
        assert_eq!(editor.get_text(), "hllo wörd");
    }

    #[test]
    fn test_word_deletion() {
        let mut editor = TextEditor::new();
        editor.insert_text("hello wörld");
        editor.delete_word_backward();
        assert_eq!(editor.get_text(), "hello ");
    }

    #[test]
    fn test_blank_detection_and_clear() {
        let mut editor = TextEditor::new();
        editor.insert_text("  \n ");
        assert!(editor.is_blank());
        editor.insert_char('x');
        assert!(!editor.is_blank());
        editor.clear();
        assert_eq!(editor.get_text(), "");
        assert_eq!(editor.line_count(), 1);
    }
}
