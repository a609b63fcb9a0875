//! Command History Module
//!
//! Append-only command log with arrow-key recall. Recall moves a cursor over
//! the log and never touches the entries themselves.

use std::collections::VecDeque;

/// Command history with a bounded recall cursor
#[derive(Debug, Clone)]
pub struct CommandHistory {
    commands: VecDeque<String>,
    max_size: usize,
    current_index: Option<usize>,
}

impl CommandHistory {
    /// Create a new command history with specified maximum size
    pub fn new(max_size: usize) -> Self {
        Self {
            commands: VecDeque::new(),
            max_size: max_size.max(1),
            current_index: None,
        }
    }

    /// Add a command to the history. Blank commands are skipped, repeats are kept.
    pub fn record(&mut self, cmd: &str) {
        let cmd = cmd.trim();

        if !cmd.is_empty() {
            // Remove oldest command if at capacity
            if self.commands.len() >= self.max_size {
                self.commands.pop_front();
            }
            self.commands.push_back(cmd.to_string());
        }

        self.current_index = None;
    }

    /// Step back in history (up arrow). Clamps at the oldest entry.
    pub fn recall_previous(&mut self) -> Option<String> {
        if self.commands.is_empty() {
            return None;
        }

        let idx = match self.current_index {
            None => self.commands.len() - 1,
            Some(idx) => idx.saturating_sub(1),
        };
        self.current_index = Some(idx);
        self.commands.get(idx).cloned()
    }

    /// Step forward in history (down arrow).
    ///
    /// Returns `None` when not recalling. Stepping past the newest entry leaves
    /// recall mode and returns an empty line once.
    pub fn recall_next(&mut self) -> Option<String> {
        let idx = self.current_index? + 1;
        if idx >= self.commands.len() {
            self.current_index = None;
            return Some(String::new());
        }
        self.current_index = Some(idx);
        self.commands.get(idx).cloned()
    }

    /// Commands in chronological order (oldest first)
    pub fn entries(&self) -> Vec<String> {
        self.commands.iter().cloned().collect()
    }

    /// Search for commands containing the given pattern, most recent first
    pub fn search(&self, pattern: &str) -> Vec<String> {
        let pattern = pattern.to_lowercase();
        self.commands
            .iter()
            .filter(|cmd| cmd.to_lowercase().contains(&pattern))
            .rev()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Current recall position, `None` when not recalling
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new(1000)
    }
}
