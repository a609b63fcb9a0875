//! Scripted Terminal
//!
//! `Terminal<W>` is the one interpreter every instance runs on. It owns the
//! input line, history, transcript and typewriter, applies the easter-egg
//! table, and hands everything else to its `Workflow`.

use std::time::Duration;

use tracing::{debug, trace};

use super::commands::{Command, EasterEgg};
use super::history::CommandHistory;
use super::input::{InputBuffer, InputFilter};
use super::keys::Key;
use super::scheduler::Scheduler;
use super::typewriter::{Typewriter, TypewriterOptions};

pub const ARROW_HINT: &str = "use ↑ ↓";
const ARROW_HINT_DELAY: Duration = Duration::from_millis(500);

/// Per-instance parameters
#[derive(Debug, Clone)]
pub struct Profile {
    pub name: &'static str,
    pub prompt: String,
    pub filter: InputFilter,
    pub max_len: Option<usize>,
    /// Left/Right/Home/End/Delete are live
    pub cursor_keys: bool,
    /// Up/Down recall history
    pub history_keys: bool,
    /// Submitted lines are echoed into the transcript
    pub echo: bool,
    /// Show the arrow-key hint after the first typed reply
    pub arrow_hint: bool,
    pub typing: TypewriterOptions,
    pub help_reply: String,
    pub listing_reply: String,
    pub history_size: usize,
}

impl Profile {
    pub fn lock() -> Self {
        Self {
            name: "lock",
            prompt: ">".to_string(),
            filter: InputFilter::Letters,
            max_len: Some(6),
            cursor_keys: false,
            history_keys: false,
            echo: false,
            arrow_hint: false,
            typing: TypewriterOptions::new(35, Some(3000), 30),
            help_reply: "Available commands: start".to_string(),
            listing_reply: "portfolio.exe  README.md  skills/".to_string(),
            history_size: 1000,
        }
    }

    pub fn git() -> Self {
        Self {
            name: "git",
            prompt: "visitor/portfolio $".to_string(),
            filter: InputFilter::Printable,
            max_len: None,
            cursor_keys: true,
            history_keys: true,
            echo: true,
            arrow_hint: true,
            typing: TypewriterOptions::new(15, Some(3000), 10),
            help_reply: "Available git commands: git add, git commit, git push".to_string(),
            listing_reply: "email.txt  package.json  src/".to_string(),
            history_size: 1000,
        }
    }

    pub fn secret() -> Self {
        Self {
            name: "secret",
            prompt: "~/secrets $".to_string(),
            filter: InputFilter::Printable,
            max_len: None,
            cursor_keys: true,
            history_keys: true,
            echo: true,
            arrow_hint: false,
            typing: TypewriterOptions::new(25, Some(3000), 15),
            help_reply: "Every command on this page works in every terminal. Try one.".to_string(),
            listing_reply: "commands.md  konami.code".to_string(),
            history_size: 1000,
        }
    }

    pub fn with_history_size(mut self, size: usize) -> Self {
        self.history_size = size;
        self
    }

    /// Scale every typewriter interval, 1.0 keeps the defaults
    pub fn with_speed(mut self, factor: f64) -> Self {
        if factor > 0.0 && factor.is_finite() {
            let scale = |d: Duration| d.div_f64(factor);
            self.typing.char_interval = scale(self.typing.char_interval);
            self.typing.erase_interval = scale(self.typing.erase_interval);
            self.typing.hold = self.typing.hold.map(scale);
        }
        self
    }

    /// Reply for an easter egg in this instance
    pub fn reply_for(&self, egg: EasterEgg) -> Option<String> {
        match egg {
            EasterEgg::Help => Some(self.help_reply.clone()),
            EasterEgg::Ls => Some(self.listing_reply.clone()),
            other => other.canned_reply().map(str::to_string),
        }
    }
}

/// State every workflow may read and write during dispatch
#[derive(Debug)]
pub struct Session {
    pub input: InputBuffer,
    pub history: CommandHistory,
    pub transcript: Vec<String>,
    pub presenter: Typewriter,
}

impl Session {
    fn new(profile: &Profile) -> Self {
        let input = match profile.max_len {
            Some(max) => InputBuffer::with_max_len(max),
            None => InputBuffer::new(),
        };
        Self {
            input,
            history: CommandHistory::new(profile.history_size),
            transcript: Vec::new(),
            presenter: Typewriter::new(profile.typing),
        }
    }
}

/// What a workflow made of a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch<E> {
    /// Accepted with no typed reply (usually a step transition)
    Accepted,
    /// Type this message out
    Reply(String),
    /// Accepted; the caller must carry out this effect
    Effect(E),
    /// The current step takes no workflow commands
    Rejected,
}

/// Result of `Terminal::submit`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome<E> {
    /// Blank line or nothing to do
    Ignored,
    EasterEgg(EasterEgg),
    Accepted,
    Replied(String),
    Effect(E),
    Rejected,
}

/// Result of `Terminal::handle_key`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome<E> {
    /// Key not routed here or not accepted in this state
    Ignored,
    /// The input line changed or the cursor moved
    Edited,
    Submitted(SubmitOutcome<E>),
}

/// Step state machine plugged into a terminal
pub trait Workflow {
    /// Work the driver must perform on the workflow's behalf
    type Effect;
    /// Notifications raised while time advances
    type Signal;

    /// Whether keystrokes reach the terminal in the current state
    fn accepts_keys(&self) -> bool {
        true
    }

    /// Whether step commands are dispatched; easter eggs always are
    fn accepts_commands(&self) -> bool {
        true
    }

    fn dispatch(&mut self, command: &Command, session: &mut Session) -> Dispatch<Self::Effect>;

    fn advance(&mut self, _dt: Duration, _session: &mut Session) -> Vec<Self::Signal> {
        Vec::new()
    }

    /// Drop every pending timer; nothing may fire afterwards
    fn unmount(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TerminalTimer {
    ArrowHint,
}

/// A mounted terminal instance
#[derive(Debug)]
pub struct Terminal<W: Workflow> {
    profile: Profile,
    session: Session,
    workflow: W,
    active: bool,
    mounted: bool,
    arrow_hint: bool,
    arrow_hint_pending: bool,
    timers: Scheduler<TerminalTimer>,
}

impl<W: Workflow> Terminal<W> {
    pub fn new(profile: Profile, workflow: W) -> Self {
        let session = Session::new(&profile);
        Self {
            profile,
            session,
            workflow,
            active: true,
            mounted: true,
            arrow_hint: false,
            arrow_hint_pending: false,
            timers: Scheduler::new(),
        }
    }

    /// Submit one line. Blank lines are ignored.
    pub fn submit(&mut self, raw: &str) -> SubmitOutcome<W::Effect> {
        if !self.mounted || raw.trim().is_empty() {
            return SubmitOutcome::Ignored;
        }

        let command = Command::new(raw);
        debug!(instance = self.profile.name, command = %command.normalized, "submit");

        self.session.history.record(&command.normalized);
        self.session.input.reset();
        if self.profile.echo {
            let line = format!("{} {}", self.profile.prompt, command.raw);
            self.session.transcript.push(line);
        }

        if let Some(egg) = EasterEgg::parse(&command.normalized) {
            match egg {
                EasterEgg::Clear => self.session.transcript.clear(),
                _ => {
                    if let Some(reply) = self.profile.reply_for(egg) {
                        self.say(&reply);
                    }
                }
            }
            return SubmitOutcome::EasterEgg(egg);
        }

        if !self.workflow.accepts_commands() {
            return SubmitOutcome::Rejected;
        }

        match self.workflow.dispatch(&command, &mut self.session) {
            Dispatch::Accepted => SubmitOutcome::Accepted,
            Dispatch::Reply(message) => {
                self.say(&message);
                SubmitOutcome::Replied(message)
            }
            Dispatch::Effect(effect) => SubmitOutcome::Effect(effect),
            Dispatch::Rejected => SubmitOutcome::Rejected,
        }
    }

    /// Route one key into the instance
    pub fn handle_key(&mut self, key: Key) -> KeyOutcome<W::Effect> {
        if !self.mounted || !self.active || !self.workflow.accepts_keys() {
            return KeyOutcome::Ignored;
        }

        let cursor_keys = self.profile.cursor_keys;
        let input = &mut self.session.input;
        match key {
            Key::Enter => {
                if input.is_blank() {
                    return KeyOutcome::Ignored;
                }
                let line = input.text().to_string();
                return KeyOutcome::Submitted(self.submit(&line));
            }
            Key::Backspace => input.delete_before(),
            Key::Delete if cursor_keys => input.delete_at(),
            Key::Left if cursor_keys => input.move_cursor(-1),
            Key::Right if cursor_keys => input.move_cursor(1),
            Key::Home if cursor_keys => input.home(),
            Key::End if cursor_keys => input.end(),
            Key::Up if self.profile.history_keys => match self.session.history.recall_previous() {
                Some(previous) => self.session.input.replace(&previous),
                None => return KeyOutcome::Ignored,
            },
            Key::Down if self.profile.history_keys => match self.session.history.recall_next() {
                Some(next) => self.session.input.replace(&next),
                None => return KeyOutcome::Ignored,
            },
            Key::Char(ch) => match self.profile.filter.accept(ch) {
                Some(ch) => {
                    if !input.insert(ch) {
                        return KeyOutcome::Ignored;
                    }
                }
                None => return KeyOutcome::Ignored,
            },
            _ => return KeyOutcome::Ignored,
        }
        KeyOutcome::Edited
    }

    /// Advance every timer of this instance by `dt`
    pub fn advance(&mut self, dt: Duration) -> Vec<W::Signal> {
        if !self.mounted {
            return Vec::new();
        }

        self.session.presenter.advance(dt);

        let target = self.timers.deadline_after(dt);
        while let Some(timer) = self.timers.pop_due(target) {
            match timer {
                TerminalTimer::ArrowHint => {
                    self.arrow_hint_pending = false;
                    self.arrow_hint = true;
                }
            }
        }
        self.timers.settle(target);

        self.workflow.advance(dt, &mut self.session)
    }

    /// Type a transient message through the presenter
    pub fn say(&mut self, message: &str) {
        trace!(instance = self.profile.name, reply = message, "typing reply");
        self.session.presenter.play(message);

        let wants_hint = self.profile.arrow_hint && !self.arrow_hint && !self.arrow_hint_pending;
        if wants_hint && !self.session.history.is_empty() {
            self.arrow_hint_pending = true;
            self.timers.schedule_in(ARROW_HINT_DELAY, TerminalTimer::ArrowHint);
        }
    }

    /// Tear down: cancel every pending timer of the instance
    pub fn unmount(&mut self) {
        debug!(instance = self.profile.name, "unmount");
        self.mounted = false;
        self.timers.cancel_all();
        self.arrow_hint_pending = false;
        self.session.presenter.cancel();
        self.workflow.unmount();
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Whether this instance currently owns keyboard input
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn workflow(&self) -> &W {
        &self.workflow
    }

    pub fn input(&self) -> &InputBuffer {
        &self.session.input
    }

    pub fn history(&self) -> &CommandHistory {
        &self.session.history
    }

    pub fn transcript(&self) -> &[String] {
        &self.session.transcript
    }

    pub fn presenter(&self) -> &Typewriter {
        &self.session.presenter
    }

    pub fn arrow_hint(&self) -> Option<&'static str> {
        self.arrow_hint.then_some(ARROW_HINT)
    }

    /// Split borrow used by instance-specific operations
    pub(crate) fn parts_mut(&mut self) -> (&mut W, &mut Session) {
        (&mut self.workflow, &mut self.session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::commands::command_not_found;
    use crate::engine::typewriter::Phase;

    /// Workflow that only knows `ping`
    #[derive(Debug, Default)]
    struct Echo {
        open: bool,
    }

    impl Workflow for Echo {
        type Effect = ();
        type Signal = ();

        fn accepts_commands(&self) -> bool {
            self.open
        }

        fn dispatch(&mut self, command: &Command, _session: &mut Session) -> Dispatch<()> {
            match command.normalized.as_str() {
                "ping" => Dispatch::Reply("pong".to_string()),
                "go" => Dispatch::Effect(()),
                _ => Dispatch::Reply(command_not_found(command)),
            }
        }
    }

    fn terminal() -> Terminal<Echo> {
        Terminal::new(Profile::git(), Echo { open: true })
    }

    fn type_line(terminal: &mut Terminal<Echo>, line: &str) -> KeyOutcome<()> {
        for ch in line.chars() {
            terminal.handle_key(Key::Char(ch));
        }
        terminal.handle_key(Key::Enter)
    }

    #[test]
    fn test_easter_egg_precedence() {
        let mut terminal = terminal();
        let outcome = terminal.submit("  WHOAMI ");
        assert_eq!(outcome, SubmitOutcome::EasterEgg(EasterEgg::Whoami));
        assert!(terminal.presenter().message().starts_with("who am i?"));
        assert_eq!(terminal.history().entries(), vec!["whoami"]);
    }

    #[test]
    fn test_easter_egg_works_when_commands_closed() {
        let mut terminal = Terminal::new(Profile::git(), Echo { open: false });
        assert_eq!(terminal.submit("ping"), SubmitOutcome::Rejected);
        assert_eq!(
            terminal.submit("help"),
            SubmitOutcome::EasterEgg(EasterEgg::Help)
        );
        assert_eq!(terminal.presenter().message(), Profile::git().help_reply);
    }

    #[test]
    fn test_clear_empties_transcript_without_reply() {
        let mut terminal = terminal();
        terminal.submit("ping");
        assert_eq!(terminal.transcript().len(), 1);

        terminal.submit("clear");
        assert!(terminal.transcript().is_empty());
        assert_eq!(terminal.presenter().message(), "pong");
    }

    #[test]
    fn test_enter_submits_and_clears_buffer() {
        let mut terminal = terminal();
        let outcome = type_line(&mut terminal, "ping");
        assert_eq!(
            outcome,
            KeyOutcome::Submitted(SubmitOutcome::Replied("pong".to_string()))
        );
        assert!(terminal.input().is_empty());
        assert_eq!(terminal.presenter().phase(), Phase::Typing);
    }

    #[test]
    fn test_blank_enter_is_ignored() {
        let mut terminal = terminal();
        assert_eq!(type_line(&mut terminal, "   "), KeyOutcome::Ignored);
        assert!(terminal.history().is_empty());
    }

    #[test]
    fn test_history_keys_fill_buffer() {
        let mut terminal = terminal();
        terminal.submit("ping");
        terminal.submit("nope");

        terminal.handle_key(Key::Up);
        assert_eq!(terminal.input().text(), "nope");
        terminal.handle_key(Key::Up);
        assert_eq!(terminal.input().text(), "ping");
        assert_eq!(terminal.input().cursor(), 4);
        terminal.handle_key(Key::Down);
        terminal.handle_key(Key::Down);
        assert_eq!(terminal.input().text(), "");
        assert_eq!(terminal.handle_key(Key::Down), KeyOutcome::Ignored);
    }

    #[test]
    fn test_inactive_terminal_ignores_keys() {
        let mut terminal = terminal();
        terminal.set_active(false);
        assert_eq!(terminal.handle_key(Key::Char('x')), KeyOutcome::Ignored);
        assert!(terminal.input().is_empty());
    }

    #[test]
    fn test_arrow_hint_after_first_reply() {
        let mut terminal = terminal();
        terminal.submit("ping");
        assert!(terminal.arrow_hint().is_none());
        terminal.advance(Duration::from_millis(499));
        assert!(terminal.arrow_hint().is_none());
        terminal.advance(Duration::from_millis(1));
        assert_eq!(terminal.arrow_hint(), Some(ARROW_HINT));
    }

    #[test]
    fn test_unmount_cancels_everything() {
        let mut terminal = terminal();
        terminal.submit("ping");
        terminal.unmount();
        terminal.advance(Duration::from_secs(10));

        assert!(terminal.arrow_hint().is_none());
        assert!(!terminal.presenter().is_active());
        assert_eq!(terminal.submit("ping"), SubmitOutcome::Ignored);
    }

    #[test]
    fn test_speed_scales_timings() {
        let profile = Profile::lock().with_speed(2.0);
        let char_secs = profile.typing.char_interval.as_secs_f64();
        assert!((char_secs - 0.0175).abs() < 1e-6);
        let hold_secs = profile.typing.hold.unwrap().as_secs_f64();
        assert!((hold_secs - 1.5).abs() < 1e-6);
    }
}
