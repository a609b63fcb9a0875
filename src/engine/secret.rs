//! Secret page terminal: no workflow steps, just the easter eggs and the catalogue.

use std::time::Duration;

use tracing::info;

use super::commands::{command_not_found, Command, EasterEgg};
use super::lock::UNLOCK_COMMAND;
use super::scheduler::Scheduler;
use super::terminal::{Dispatch, Profile, Session, Terminal, Workflow};

pub const KONAMI_LABEL: &str = "↑ ↑ ↓ ↓ ← → ← → B A";

const OPEN_DELAY: Duration = Duration::from_millis(350);
const CLOSE_DELAY: Duration = Duration::from_millis(500);

/// One entry of the hidden-command catalogue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogueEntry {
    pub command: String,
    pub description: &'static str,
}

/// Every hidden command with its description, `start` first
pub fn catalogue() -> Vec<CatalogueEntry> {
    let mut entries = vec![CatalogueEntry {
        command: UNLOCK_COMMAND.to_string(),
        description: "Unlock the terminal and enter the main site",
    }];
    entries.extend(EasterEgg::all().into_iter().map(|egg| CatalogueEntry {
        command: egg.to_string(),
        description: egg.description(),
    }));
    entries
}

#[derive(Debug, Default)]
pub struct SecretWorkflow;

impl Workflow for SecretWorkflow {
    type Effect = ();
    type Signal = ();

    fn dispatch(&mut self, command: &Command, _session: &mut Session) -> Dispatch<()> {
        Dispatch::Reply(command_not_found(command))
    }
}

pub type SecretTerminal = Terminal<SecretWorkflow>;

impl Terminal<SecretWorkflow> {
    pub fn secret_terminal() -> Self {
        Terminal::new(Profile::secret(), SecretWorkflow)
    }
}

/// Visibility of the secret page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    Closed,
    Opening,
    Open,
    Closing,
}

/// Raised when an animated transition finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEvent {
    Opened,
    Closed,
}

/// Open/close transitions of the secret page
#[derive(Debug)]
pub struct SecretOverlay {
    state: OverlayState,
    timers: Scheduler<OverlayEvent>,
}

impl SecretOverlay {
    pub fn new() -> Self {
        Self {
            state: OverlayState::Closed,
            timers: Scheduler::new(),
        }
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    /// True from the moment the page starts opening until it is fully closed
    pub fn is_visible(&self) -> bool {
        self.state != OverlayState::Closed
    }

    /// Konami matched. Ignored unless fully closed.
    pub fn request_open(&mut self) -> bool {
        if self.state != OverlayState::Closed {
            return false;
        }
        self.state = OverlayState::Opening;
        self.timers.schedule_in(OPEN_DELAY, OverlayEvent::Opened);
        true
    }

    /// Esc pressed. Ignored unless fully open.
    pub fn request_close(&mut self) -> bool {
        if self.state != OverlayState::Open {
            return false;
        }
        self.state = OverlayState::Closing;
        self.timers.schedule_in(CLOSE_DELAY, OverlayEvent::Closed);
        true
    }

    pub fn advance(&mut self, dt: Duration) -> Vec<OverlayEvent> {
        let mut events = Vec::new();
        let target = self.timers.deadline_after(dt);
        while let Some(event) = self.timers.pop_due(target) {
            self.state = match event {
                OverlayEvent::Opened => OverlayState::Open,
                OverlayEvent::Closed => OverlayState::Closed,
            };
            info!(?event, "secret page");
            events.push(event);
        }
        self.timers.settle(target);
        events
    }
}

impl Default for SecretOverlay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::terminal::SubmitOutcome;

    #[test]
    fn test_overlay_transitions() {
        let mut overlay = SecretOverlay::new();
        assert!(!overlay.request_close());
        assert!(overlay.request_open());
        assert!(!overlay.request_open());
        assert!(overlay.is_visible());

        assert!(overlay.advance(Duration::from_millis(349)).is_empty());
        assert_eq!(overlay.advance(Duration::from_millis(1)), vec![OverlayEvent::Opened]);
        assert_eq!(overlay.state(), OverlayState::Open);

        assert!(overlay.request_close());
        assert_eq!(overlay.state(), OverlayState::Closing);
        assert_eq!(overlay.advance(Duration::from_millis(500)), vec![OverlayEvent::Closed]);
        assert!(!overlay.is_visible());
    }

    #[test]
    fn test_catalogue_lists_every_command() {
        let entries = catalogue();
        assert_eq!(entries.len(), EasterEgg::all().len() + 1);
        assert_eq!(entries[0].command, "start");
        assert!(entries.iter().any(|entry| entry.command == "matrix"));
        assert!(entries.iter().all(|entry| !entry.description.is_empty()));
    }

    #[test]
    fn test_secret_terminal_replies() {
        let mut terminal = SecretTerminal::secret_terminal();
        assert_eq!(
            terminal.submit("sudo"),
            SubmitOutcome::EasterEgg(EasterEgg::Sudo)
        );
        assert_eq!(
            terminal.submit("git push"),
            SubmitOutcome::Replied("bash: git: command not found".to_string())
        );
        assert_eq!(terminal.transcript().len(), 2);
    }
}
