//! Key model and input routing
//!
//! Terminal instances never read the keyboard themselves: the front end turns
//! raw events into `Key`s and an `InputRouter` decides which instance gets them.

/// Keys the engine understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Tab,
    Esc,
}

/// Explicit ownership of keyboard input among several targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRouter<T> {
    active: Option<T>,
}

impl<T: Copy + PartialEq> InputRouter<T> {
    pub fn new(active: Option<T>) -> Self {
        Self { active }
    }

    pub fn active(&self) -> Option<T> {
        self.active
    }

    pub fn is_active(&self, target: T) -> bool {
        self.active == Some(target)
    }

    pub fn activate(&mut self, target: T) {
        self.active = Some(target);
    }

    pub fn release(&mut self) {
        self.active = None;
    }

    /// Swap ownership between two targets (Tab between editor and terminal)
    pub fn toggle(&mut self, a: T, b: T) {
        self.active = if self.active == Some(a) { Some(b) } else { Some(a) };
    }
}

const KONAMI: [Key; 10] = [
    Key::Up,
    Key::Up,
    Key::Down,
    Key::Down,
    Key::Left,
    Key::Right,
    Key::Left,
    Key::Right,
    Key::Char('b'),
    Key::Char('a'),
];

/// Watches the last ten keys for ↑ ↑ ↓ ↓ ← → ← → B A
#[derive(Debug, Clone, Default)]
pub struct KonamiDetector {
    recent: Vec<Key>,
}

impl KonamiDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one key. Returns true when the sequence completes; the window then starts over.
    pub fn feed(&mut self, key: Key) -> bool {
        let key = match key {
            Key::Char(ch) => Key::Char(ch.to_ascii_lowercase()),
            other => other,
        };

        self.recent.push(key);
        if self.recent.len() > KONAMI.len() {
            self.recent.remove(0);
        }

        if self.recent.as_slice() == KONAMI {
            self.recent.clear();
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.recent.clear();
    }
}
