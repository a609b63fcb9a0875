//! Application state
//!
//! Owns every terminal instance and decides where each key goes. Nothing here
//! touches the real terminal; `Shell` feeds it events and elapsed time and
//! performs the relay calls it asks for.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, info, warn};

use super::config::TerminalConfig;
use super::editor::{CursorDirection, TextEditor};
use crate::engine::git::{GitSignal, GitTerminal, GitWorkflow};
use crate::engine::keys::{InputRouter, Key, KonamiDetector};
use crate::engine::lock::{LockScreen, LockSignal, LockWorkflow};
use crate::engine::secret::{OverlayEvent, SecretOverlay, SecretTerminal, SecretWorkflow};
use crate::engine::terminal::{KeyOutcome, Profile, SubmitOutcome, Terminal};
use crate::engine::BootSequence;
use crate::relay::{ContactForm, RelayError};
use crate::theme::{OverlayFlag, Theme, ThemeStore, ThemeToggle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Boot,
    Lock,
    Contact,
}

/// Which half of the contact screen owns the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Editor,
    Terminal,
}

/// Map a crossterm key to the engine's key model
pub fn key_from_event(event: &KeyEvent) -> Option<Key> {
    let key = match event.code {
        KeyCode::Char(ch) => Key::Char(ch),
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Tab => Key::Tab,
        KeyCode::Esc => Key::Esc,
        _ => return None,
    };
    Some(key)
}

pub struct App {
    screen: Screen,
    boot: BootSequence,
    lock: LockScreen,
    git: GitTerminal,
    secret: Option<SecretTerminal>,
    secret_profile: Profile,
    overlay: SecretOverlay,
    overlay_flag: OverlayFlag,
    theme: ThemeStore,
    toggle: ThemeToggle,
    editor: TextEditor,
    router: InputRouter<Pane>,
    konami: KonamiDetector,
    effects: Vec<ContactForm>,
    should_exit: bool,
}

impl App {
    pub fn new(config: &TerminalConfig, theme: ThemeStore) -> Self {
        let lock = Terminal::new(config.tune(Profile::lock()), LockWorkflow::new());
        let git = Terminal::new(
            config.tune(Profile::git()),
            GitWorkflow::new().with_reply_to(&config.relay.reply_to),
        );
        let overlay_flag = OverlayFlag::new();
        let toggle = ThemeToggle::new(&overlay_flag);

        let mut app = Self {
            screen: Screen::Boot,
            boot: BootSequence::new(),
            lock,
            git,
            secret: None,
            secret_profile: config.tune(Profile::secret()),
            overlay: SecretOverlay::new(),
            overlay_flag,
            theme,
            toggle,
            editor: TextEditor::new(),
            router: InputRouter::new(None),
            konami: KonamiDetector::new(),
            effects: Vec::new(),
            should_exit: false,
        };
        if config.skip_boot {
            app.boot.skip();
            app.enter_lock();
        }
        app
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn boot(&self) -> &BootSequence {
        &self.boot
    }

    pub fn lock(&self) -> &LockScreen {
        &self.lock
    }

    pub fn git(&self) -> &GitTerminal {
        &self.git
    }

    pub fn secret(&self) -> Option<&SecretTerminal> {
        self.secret.as_ref()
    }

    pub fn overlay(&self) -> &SecretOverlay {
        &self.overlay
    }

    pub fn editor(&self) -> &TextEditor {
        &self.editor
    }

    pub fn active_pane(&self) -> Option<Pane> {
        self.router.active()
    }

    pub fn theme(&self) -> Theme {
        self.theme.theme()
    }

    pub fn theme_toggle_visible(&self) -> bool {
        self.toggle.is_visible()
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    /// Contact forms waiting to be sent
    pub fn take_effects(&mut self) -> Vec<ContactForm> {
        std::mem::take(&mut self.effects)
    }

    /// Outcome of a relay call started from `take_effects`
    pub fn finish_push(&mut self, outcome: Result<bool, RelayError>) {
        self.git.finish_push(outcome);
    }

    fn enter_lock(&mut self) {
        debug!("screen: lock");
        self.screen = Screen::Lock;
        self.router.release();
    }

    fn enter_contact(&mut self) {
        info!("screen: contact");
        self.lock.unmount();
        self.screen = Screen::Contact;
        self.router.activate(Pane::Editor);
        self.git.set_active(false);
    }

    pub fn handle_key(&mut self, event: KeyEvent) {
        if event.kind != KeyEventKind::Press {
            return;
        }

        if event.modifiers.contains(KeyModifiers::CONTROL) {
            self.handle_control_key(event.code);
            return;
        }

        let Some(key) = key_from_event(&event) else {
            return;
        };

        if self.overlay.is_visible() {
            self.handle_overlay_key(key);
            return;
        }

        if self.konami.feed(key) && self.overlay.request_open() {
            info!("konami code entered");
            self.overlay_flag.set(true);
            return;
        }

        match self.screen {
            Screen::Boot => {
                if self.boot.skip() {
                    self.enter_lock();
                }
            }
            Screen::Lock => {
                self.lock.handle_key(key);
            }
            Screen::Contact => self.handle_contact_key(key),
        }
    }

    fn handle_control_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('c') => self.should_exit = true,
            KeyCode::Char('t') => match self.toggle.press(&mut self.theme) {
                Ok(theme) => debug!(%theme, "theme toggled"),
                Err(err) => warn!(error = %err, "failed to save theme"),
            },
            KeyCode::Char('w') if self.editor_has_focus() => {
                self.editor.delete_word_backward();
                self.editor_changed();
            }
            _ => {}
        }
    }

    fn handle_overlay_key(&mut self, key: Key) {
        if key == Key::Esc {
            self.overlay.request_close();
            return;
        }
        if let Some(secret) = self.secret.as_mut() {
            secret.handle_key(key);
        }
    }

    fn editor_has_focus(&self) -> bool {
        self.screen == Screen::Contact && self.router.is_active(Pane::Editor)
    }

    fn handle_contact_key(&mut self, key: Key) {
        if key == Key::Tab {
            self.router.toggle(Pane::Editor, Pane::Terminal);
            self.git.set_active(self.router.is_active(Pane::Terminal));
            return;
        }

        if self.router.is_active(Pane::Terminal) {
            if let KeyOutcome::Submitted(SubmitOutcome::Effect(form)) = self.git.handle_key(key) {
                self.effects.push(form);
            }
            return;
        }

        match key {
            Key::Char(ch) => self.editor.insert_char(ch),
            Key::Enter => self.editor.handle_enter(),
            Key::Backspace => self.editor.delete_char(),
            Key::Delete => self.editor.delete_char_forward(),
            Key::Left => self.editor.move_cursor(CursorDirection::Left),
            Key::Right => self.editor.move_cursor(CursorDirection::Right),
            Key::Up => self.editor.move_cursor(CursorDirection::Up),
            Key::Down => self.editor.move_cursor(CursorDirection::Down),
            Key::Home => self.editor.move_cursor(CursorDirection::Home),
            Key::End => self.editor.move_cursor(CursorDirection::End),
            Key::Tab | Key::Esc => return,
        }
        self.editor_changed();
    }

    fn editor_changed(&mut self) {
        let text = self.editor.get_text();
        self.git.content_changed(&text);
    }

    /// Pasted text goes to whichever pane has focus
    pub fn handle_paste(&mut self, text: &str) {
        if self.editor_has_focus() && !self.overlay.is_visible() {
            self.editor.insert_text(text);
            self.editor_changed();
        }
    }

    /// A click anywhere; on the lock screen it skips typing `start`
    pub fn handle_click(&mut self) {
        if self.screen == Screen::Lock && !self.overlay.is_visible() && self.lock.bypass() {
            info!("lock bypassed by click");
        }
    }

    /// Advance every clock by `dt`
    pub fn tick(&mut self, dt: Duration) {
        match self.screen {
            Screen::Boot => {
                if self.boot.advance(dt) {
                    self.enter_lock();
                }
            }
            Screen::Lock => {
                if self.lock.advance(dt).contains(&LockSignal::Unlocked) {
                    self.enter_contact();
                }
            }
            Screen::Contact => {}
        }

        // The contact terminal keeps running behind the overlay
        if self.git.advance(dt).contains(&GitSignal::Reset) {
            self.editor.clear();
        }

        for event in self.overlay.advance(dt) {
            match event {
                OverlayEvent::Opened => {
                    let profile = self.secret_profile.clone();
                    self.secret = Some(Terminal::new(profile, SecretWorkflow));
                }
                OverlayEvent::Closed => {
                    if let Some(mut secret) = self.secret.take() {
                        secret.unmount();
                    }
                    self.overlay_flag.set(false);
                    self.konami.reset();
                }
            }
        }

        if let Some(secret) = self.secret.as_mut() {
            secret.advance(dt);
        }
    }
}
