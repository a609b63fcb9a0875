//! Git Workflow
//!
//! Mock `write → add → commit → push → complete` flow in front of the contact
//! form. The email body is edited outside the terminal; this workflow watches
//! it through `content_changed` and gates the git commands on the current step.

use std::fmt;
use std::sync::OnceLock;
use std::time::Duration;

use chrono::{DateTime, Local};
use rand::Rng;
use regex::Regex;
use tracing::{debug, info, warn};

use super::commands::{command_not_found, not_a_git_command, Command};
use super::scheduler::{Scheduler, TimerId};
use super::terminal::{Dispatch, Profile, Session, Terminal, Workflow};
use super::typewriter::{Typewriter, TypewriterOptions};
use crate::relay::{ContactForm, RelayError};

pub const DEFAULT_SUBJECT: &str = "Portfolio Contact";
pub const DEFAULT_REPLY_TO: &str = "visitor@example.com";
pub const PUSH_FAILED: &str = "error: failed to push some refs to 'origin'";

const RESET_DELAY: Duration = Duration::from_millis(3000);

/// Position in the workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GitStep {
    Write,
    Add,
    Commit,
    Push,
    Complete,
}

impl fmt::Display for GitStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Write => "write",
            Self::Add => "add",
            Self::Commit => "commit",
            Self::Push => "push",
            Self::Complete => "complete",
        };
        write!(f, "{}", name)
    }
}

/// Commands recognized while at `add`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddCommand {
    Stage,
    MissingPath,
    UnknownPath(String),
}

/// Commands recognized while at `commit`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitCommand {
    Commit(String),
    EmptyMessage,
    UnterminatedQuote,
    MissingQuotes,
    MissingMessageFlag,
    InvalidSyntax,
}

/// Commands recognized while at `push`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushCommand {
    Push,
    MissingUpstream,
    MissingBranch,
    InvalidSyntax,
}

/// Step-scoped parse of one command, with an explicit fallback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCommand {
    Add(AddCommand),
    Commit(CommitCommand),
    Push(PushCommand),
    /// `git <x>` the current step does not know
    UnknownGit,
    /// Anything else
    Unknown,
}

fn commit_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"^git commit -m ".*"$"#).expect("commit pattern is a valid regex")
    })
}

impl GitCommand {
    /// Parse `command` as seen from `step`
    pub fn parse(step: GitStep, command: &Command) -> Self {
        if !command.is_git() {
            return Self::Unknown;
        }
        match step {
            GitStep::Add if command.is_git_sub("add") => Self::Add(Self::parse_add(command)),
            GitStep::Commit if command.is_git_sub("commit") => {
                Self::Commit(Self::parse_commit(command))
            }
            GitStep::Push if command.is_git_sub("push") => Self::Push(Self::parse_push(command)),
            _ => Self::UnknownGit,
        }
    }

    fn parse_add(command: &Command) -> AddCommand {
        let tokens = command.tokens();
        match tokens.as_slice() {
            ["git", "add", "email.txt"] | ["git", "add", "."] => AddCommand::Stage,
            ["git", "add"] => AddCommand::MissingPath,
            [_, _, path, ..] => AddCommand::UnknownPath(path.to_string()),
            _ => AddCommand::MissingPath,
        }
    }

    fn parse_commit(command: &Command) -> CommitCommand {
        let normalized = command.normalized.as_str();
        let quotes = normalized.matches('"').count();

        if commit_pattern().is_match(normalized) && quotes >= 2 {
            // Message keeps its original case
            let raw = command.raw.as_str();
            let message = match (raw.find('"'), raw.rfind('"')) {
                (Some(first), Some(last)) if last > first => &raw[first + 1..last],
                _ => "",
            };
            if message.is_empty() {
                return CommitCommand::EmptyMessage;
            }
            return CommitCommand::Commit(message.to_string());
        }
        if normalized.starts_with("git commit -m \"") {
            return CommitCommand::UnterminatedQuote;
        }
        if normalized.starts_with("git commit -m ") && quotes == 0 {
            return CommitCommand::MissingQuotes;
        }
        if !normalized.contains("-m") {
            return CommitCommand::MissingMessageFlag;
        }
        CommitCommand::InvalidSyntax
    }

    fn parse_push(command: &Command) -> PushCommand {
        let tokens = command.tokens();
        match tokens.as_slice() {
            ["git", "push"]
            | ["git", "push", "origin", "main"]
            | ["git", "push", "-u", "origin", "main"] => PushCommand::Push,
            _ => {
                let has = |needle: &str| tokens.iter().any(|token| *token == needle);
                if has("-u") && !has("origin") {
                    PushCommand::MissingUpstream
                } else if has("origin") && !has("main") {
                    PushCommand::MissingBranch
                } else {
                    PushCommand::InvalidSyntax
                }
            }
        }
    }
}

/// Status badge of `email.txt`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Modified,
    Staged,
    Committed,
    Pushed,
}

impl FileStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Modified => "• modified",
            Self::Staged => "+ staged",
            Self::Committed => "✓ committed",
            Self::Pushed => "↗ pushed",
        }
    }
}

/// Notifications raised by the workflow's own timers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitSignal {
    /// The completed flow reset itself; the editor must be emptied
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GitTimer {
    Reset,
}

/// Mock git workflow state
#[derive(Debug)]
pub struct GitWorkflow {
    step: GitStep,
    content: String,
    is_added: bool,
    is_committed: bool,
    is_pushed: bool,
    commit_message: String,
    sending: bool,
    reply_to: String,
    sent_at: Option<DateTime<Local>>,
    hint: Typewriter,
    timers: Scheduler<GitTimer>,
    reset_timer: Option<TimerId>,
}

impl GitWorkflow {
    pub fn new() -> Self {
        let mut workflow = Self {
            step: GitStep::Write,
            content: String::new(),
            is_added: false,
            is_committed: false,
            is_pushed: false,
            commit_message: String::new(),
            sending: false,
            reply_to: DEFAULT_REPLY_TO.to_string(),
            sent_at: None,
            hint: Typewriter::new(TypewriterOptions::new(25, None, 15)),
            timers: Scheduler::new(),
            reset_timer: None,
        };
        workflow.refresh_hint();
        workflow
    }

    pub fn with_reply_to(mut self, reply_to: &str) -> Self {
        self.reply_to = reply_to.to_string();
        self
    }

    pub fn step(&self) -> GitStep {
        self.step
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn commit_message(&self) -> &str {
        &self.commit_message
    }

    pub fn is_added(&self) -> bool {
        self.is_added
    }

    pub fn is_committed(&self) -> bool {
        self.is_committed
    }

    pub fn is_pushed(&self) -> bool {
        self.is_pushed
    }

    /// True while the submit effect is in flight
    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub fn sent_at(&self) -> Option<DateTime<Local>> {
        self.sent_at
    }

    /// Step hint line as currently revealed
    pub fn hint(&self) -> &Typewriter {
        &self.hint
    }

    pub fn file_status(&self) -> FileStatus {
        if self.is_pushed {
            FileStatus::Pushed
        } else if self.is_committed {
            FileStatus::Committed
        } else if self.is_added {
            FileStatus::Staged
        } else {
            FileStatus::Modified
        }
    }

    /// Hint text for the current step
    pub fn hint_text(&self) -> &'static str {
        match self.step {
            GitStep::Write => "Write your email body in the editor, then use git add email.txt",
            GitStep::Add => "Type: git add email.txt",
            GitStep::Commit => "Type: git commit -m \"your email subject\"",
            GitStep::Push if self.sending => "Sending email...",
            GitStep::Push => "Type: git push -u origin main",
            GitStep::Complete => "Email successfully sent!",
        }
    }

    fn refresh_hint(&mut self) {
        let text = self.hint_text();
        self.hint.retype(text);
    }

    fn set_step(&mut self, step: GitStep) {
        if self.step != step {
            debug!(from = %self.step, to = %step, "git step");
            self.step = step;
            self.refresh_hint();
        }
    }

    fn clear_flow(&mut self, session: &mut Session) {
        if let Some(timer) = self.reset_timer.take() {
            self.timers.cancel(timer);
        }
        self.is_added = false;
        self.is_committed = false;
        self.is_pushed = false;
        self.commit_message.clear();
        session.transcript.clear();
        session.input.reset();
        self.set_step(GitStep::Write);
    }

    fn content_changed(&mut self, text: &str, session: &mut Session) {
        self.content = text.to_string();
        let blank = text.trim().is_empty();

        if !blank && self.step == GitStep::Write {
            self.set_step(GitStep::Add);
        } else if blank && self.step != GitStep::Write {
            info!("email body emptied, workflow back to write");
            self.clear_flow(session);
        }
    }

    fn contact_form(&self) -> ContactForm {
        let subject = if self.commit_message.is_empty() {
            DEFAULT_SUBJECT.to_string()
        } else {
            self.commit_message.clone()
        };
        ContactForm {
            subject,
            message: self.content.clone(),
            reply_to: self.reply_to.clone(),
        }
    }

    fn dispatch_add(&mut self, add: AddCommand) -> Dispatch<ContactForm> {
        match add {
            AddCommand::Stage => {
                self.is_added = true;
                self.set_step(GitStep::Commit);
                Dispatch::Accepted
            }
            AddCommand::MissingPath => {
                Dispatch::Reply("fatal: no files specified. Try 'git add email.txt'".to_string())
            }
            AddCommand::UnknownPath(path) => Dispatch::Reply(format!(
                "fatal: pathspec '{}' did not match any files. Try 'git add email.txt' instead.",
                path
            )),
        }
    }

    fn dispatch_commit(&mut self, commit: CommitCommand, session: &mut Session) -> Dispatch<ContactForm> {
        let error = match commit {
            CommitCommand::Commit(message) => {
                let hash: u32 = rand::thread_rng().gen_range(0..0x1000_0000);
                session
                    .transcript
                    .push(format!("[main {:07x}] {}", hash, message));
                session
                    .transcript
                    .push(" 1 file changed, email.txt".to_string());
                self.commit_message = message;
                self.is_committed = true;
                self.set_step(GitStep::Push);
                return Dispatch::Accepted;
            }
            CommitCommand::EmptyMessage => "Aborting commit due to empty commit message.",
            CommitCommand::UnterminatedQuote => {
                "fatal: unterminated quote. Missing closing \" in commit message."
            }
            CommitCommand::MissingQuotes => {
                "fatal: commit message must be enclosed in quotes. Use: git commit -m \"your message\""
            }
            CommitCommand::MissingMessageFlag => {
                "fatal: no commit message provided. Use: git commit -m \"your message\""
            }
            CommitCommand::InvalidSyntax => {
                "error: invalid git commit syntax. Use: git commit -m \"your message\""
            }
        };
        Dispatch::Reply(error.to_string())
    }

    fn dispatch_push(&mut self, push: PushCommand) -> Dispatch<ContactForm> {
        let error = match push {
            PushCommand::Push => {
                if self.sending {
                    return Dispatch::Rejected;
                }
                self.sending = true;
                self.refresh_hint();
                info!("push accepted, submitting contact form");
                return Dispatch::Effect(self.contact_form());
            }
            PushCommand::MissingUpstream => {
                "fatal: upstream branch missing. Use: git push -u origin main"
            }
            PushCommand::MissingBranch => "fatal: branch name missing. Use: git push origin main",
            PushCommand::InvalidSyntax => {
                "error: invalid push command. Try: git push or git push -u origin main"
            }
        };
        Dispatch::Reply(error.to_string())
    }

    /// Apply the outcome of the submit effect. Returns a message to type, if any.
    fn finish_push(
        &mut self,
        outcome: Result<bool, RelayError>,
        session: &mut Session,
    ) -> Option<&'static str> {
        self.sending = false;

        if self.step != GitStep::Push {
            warn!(step = %self.step, "push finished after the workflow moved on; ignoring");
            self.refresh_hint();
            return None;
        }

        match outcome {
            Ok(true) => {
                let now = Local::now();
                info!(at = %now.format("%H:%M:%S"), "contact form delivered");
                session.transcript.push("To origin".to_string());
                session.transcript.push("   main -> main".to_string());
                self.sent_at = Some(now);
                self.is_pushed = true;
                self.set_step(GitStep::Complete);
                self.reset_timer = Some(self.timers.schedule_in(RESET_DELAY, GitTimer::Reset));
                None
            }
            Ok(false) => {
                warn!("relay answered without a positive acknowledgment");
                self.refresh_hint();
                Some(PUSH_FAILED)
            }
            Err(err) => {
                warn!(error = %err, "contact form submission failed");
                self.refresh_hint();
                Some(PUSH_FAILED)
            }
        }
    }
}

impl Default for GitWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

impl Workflow for GitWorkflow {
    type Effect = ContactForm;
    type Signal = GitSignal;

    fn accepts_keys(&self) -> bool {
        !self.sending && !matches!(self.step, GitStep::Write | GitStep::Complete)
    }

    fn accepts_commands(&self) -> bool {
        !matches!(self.step, GitStep::Write | GitStep::Complete)
    }

    fn dispatch(&mut self, command: &Command, session: &mut Session) -> Dispatch<ContactForm> {
        match GitCommand::parse(self.step, command) {
            GitCommand::Add(add) => self.dispatch_add(add),
            GitCommand::Commit(commit) => self.dispatch_commit(commit, session),
            GitCommand::Push(push) => self.dispatch_push(push),
            GitCommand::UnknownGit => Dispatch::Reply(not_a_git_command(command)),
            GitCommand::Unknown => Dispatch::Reply(command_not_found(command)),
        }
    }

    fn advance(&mut self, dt: Duration, session: &mut Session) -> Vec<GitSignal> {
        self.hint.advance(dt);

        let mut signals = Vec::new();
        let target = self.timers.deadline_after(dt);
        while let Some(timer) = self.timers.pop_due(target) {
            match timer {
                GitTimer::Reset => {
                    info!("workflow complete, resetting");
                    self.reset_timer = None;
                    self.content.clear();
                    self.sent_at = None;
                    self.clear_flow(session);
                    signals.push(GitSignal::Reset);
                }
            }
        }
        self.timers.settle(target);
        signals
    }

    fn unmount(&mut self) {
        self.timers.cancel_all();
        self.reset_timer = None;
        self.hint.cancel();
    }
}

/// The contact terminal instance
pub type GitTerminal = Terminal<GitWorkflow>;

impl Terminal<GitWorkflow> {
    pub fn git_terminal() -> Self {
        Terminal::new(Profile::git(), GitWorkflow::new())
    }

    /// The editor content changed; may move the workflow forward or back to `write`
    pub fn content_changed(&mut self, text: &str) {
        let (workflow, session) = self.parts_mut();
        workflow.content_changed(text, session);
    }

    /// Feed the submit effect's outcome back in
    pub fn finish_push(&mut self, outcome: Result<bool, RelayError>) {
        let (workflow, session) = self.parts_mut();
        if let Some(message) = workflow.finish_push(outcome, session) {
            self.say(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::commands::{EasterEgg, WHOAMI_REPLY};
    use crate::engine::keys::Key;
    use crate::engine::terminal::{KeyOutcome, SubmitOutcome};

    fn at_step(step: GitStep) -> GitTerminal {
        let mut terminal = GitTerminal::git_terminal();
        if step == GitStep::Write {
            return terminal;
        }
        terminal.content_changed("Hello");
        if step == GitStep::Add {
            return terminal;
        }
        terminal.submit("git add email.txt");
        if step == GitStep::Commit {
            return terminal;
        }
        terminal.submit("git commit -m \"Fix bug\"");
        if step == GitStep::Push {
            return terminal;
        }
        terminal.submit("git push");
        terminal.finish_push(Ok(true));
        terminal
    }

    fn reply(terminal: &mut GitTerminal, line: &str) -> String {
        match terminal.submit(line) {
            SubmitOutcome::Replied(message) => message,
            other => panic!("expected a reply to {:?}, got {:?}", line, other),
        }
    }

    #[test]
    fn test_happy_path_and_auto_reset() {
        let mut terminal = GitTerminal::git_terminal();
        assert_eq!(terminal.workflow().step(), GitStep::Write);

        terminal.content_changed("Hello");
        assert_eq!(terminal.workflow().step(), GitStep::Add);

        assert_eq!(terminal.submit("git add email.txt"), SubmitOutcome::Accepted);
        assert_eq!(terminal.workflow().step(), GitStep::Commit);
        assert_eq!(terminal.workflow().file_status(), FileStatus::Staged);

        assert_eq!(terminal.submit("git commit -m \"Fix bug\""), SubmitOutcome::Accepted);
        assert_eq!(terminal.workflow().step(), GitStep::Push);
        assert_eq!(terminal.workflow().commit_message(), "Fix bug");

        let form = match terminal.submit("git push -u origin main") {
            SubmitOutcome::Effect(form) => form,
            other => panic!("expected submit effect, got {:?}", other),
        };
        assert_eq!(form.subject, "Fix bug");
        assert_eq!(form.message, "Hello");
        assert_eq!(form.reply_to, DEFAULT_REPLY_TO);
        assert!(terminal.workflow().is_sending());

        terminal.finish_push(Ok(true));
        assert_eq!(terminal.workflow().step(), GitStep::Complete);
        assert!(!terminal.workflow().is_sending());
        assert_eq!(terminal.workflow().file_status(), FileStatus::Pushed);

        assert!(terminal.advance(Duration::from_millis(2999)).is_empty());
        assert_eq!(terminal.workflow().step(), GitStep::Complete);
        assert_eq!(terminal.advance(Duration::from_millis(1)), vec![GitSignal::Reset]);

        let workflow = terminal.workflow();
        assert_eq!(workflow.step(), GitStep::Write);
        assert!(!workflow.is_added() && !workflow.is_committed() && !workflow.is_pushed());
        assert!(workflow.commit_message().is_empty());
        assert!(workflow.content().is_empty());
        assert!(terminal.transcript().is_empty());
    }

    #[test]
    fn test_add_errors() {
        let mut terminal = at_step(GitStep::Add);
        assert_eq!(
            reply(&mut terminal, "git add notes.md"),
            "fatal: pathspec 'notes.md' did not match any files. Try 'git add email.txt' instead."
        );
        assert_eq!(
            reply(&mut terminal, "git add"),
            "fatal: no files specified. Try 'git add email.txt'"
        );
        assert_eq!(
            reply(&mut terminal, "git push"),
            "git: 'push' is not a git command. See 'git --help'."
        );
        assert_eq!(reply(&mut terminal, "make"), "bash: make: command not found");
        assert_eq!(terminal.workflow().step(), GitStep::Add);

        assert_eq!(terminal.submit("GIT ADD ."), SubmitOutcome::Accepted);
        assert_eq!(terminal.workflow().step(), GitStep::Commit);
    }

    #[test]
    fn test_commit_errors() {
        let mut terminal = at_step(GitStep::Commit);
        let cases = [
            (
                "git commit -m no-quotes",
                "fatal: commit message must be enclosed in quotes. Use: git commit -m \"your message\"",
            ),
            (
                "git commit -m \"half open",
                "fatal: unterminated quote. Missing closing \" in commit message.",
            ),
            (
                "git commit",
                "fatal: no commit message provided. Use: git commit -m \"your message\"",
            ),
            ("git commit -m \"\"", "Aborting commit due to empty commit message."),
            (
                "git commit -m",
                "error: invalid git commit syntax. Use: git commit -m \"your message\"",
            ),
            (
                "git add .",
                "git: 'add' is not a git command. See 'git --help'.",
            ),
        ];
        for (line, expected) in cases {
            assert_eq!(reply(&mut terminal, line), expected, "for {:?}", line);
            assert_eq!(terminal.workflow().step(), GitStep::Commit);
        }
    }

    #[test]
    fn test_commit_message_between_first_and_last_quote() {
        let mut terminal = at_step(GitStep::Commit);
        terminal.submit("git commit -m \"Say \"hi\" Please\"");
        assert_eq!(terminal.workflow().commit_message(), "Say \"hi\" Please");
    }

    #[test]
    fn test_push_errors() {
        let mut terminal = at_step(GitStep::Push);
        assert_eq!(
            reply(&mut terminal, "git push -u"),
            "fatal: upstream branch missing. Use: git push -u origin main"
        );
        assert_eq!(
            reply(&mut terminal, "git push origin"),
            "fatal: branch name missing. Use: git push origin main"
        );
        assert_eq!(
            reply(&mut terminal, "git push main"),
            "error: invalid push command. Try: git push or git push -u origin main"
        );
        assert_eq!(terminal.workflow().step(), GitStep::Push);
    }

    #[test]
    fn test_push_failure_stays_at_push() {
        for outcome in [
            Ok(false),
            Err(RelayError::Rejected("no".to_string())),
        ] {
            let mut terminal = at_step(GitStep::Push);
            assert!(matches!(terminal.submit("git push"), SubmitOutcome::Effect(_)));
            terminal.finish_push(outcome);

            assert_eq!(terminal.workflow().step(), GitStep::Push);
            assert!(!terminal.workflow().is_sending());
            assert_eq!(terminal.presenter().message(), PUSH_FAILED);

            // The user may retry
            assert!(matches!(terminal.submit("git push origin main"), SubmitOutcome::Effect(_)));
        }
    }

    #[test]
    fn test_keys_ignored_while_sending() {
        let mut terminal = at_step(GitStep::Push);
        terminal.submit("git push");
        assert_eq!(terminal.handle_key(Key::Char('g')), KeyOutcome::Ignored);
        assert_eq!(terminal.submit("git push"), SubmitOutcome::Rejected);
        assert_eq!(terminal.workflow().hint_text(), "Sending email...");
    }

    #[test]
    fn test_blank_content_returns_to_write() {
        for step in [GitStep::Add, GitStep::Commit, GitStep::Push, GitStep::Complete] {
            let mut terminal = at_step(step);
            terminal.content_changed("   \n");
            let workflow = terminal.workflow();
            assert_eq!(workflow.step(), GitStep::Write, "from {}", step);
            assert!(!workflow.is_added() && !workflow.is_committed() && !workflow.is_pushed());
            assert!(terminal.transcript().is_empty());
            assert!(terminal.input().is_empty());
        }
    }

    #[test]
    fn test_blank_content_from_complete_cancels_reset() {
        let mut terminal = at_step(GitStep::Complete);
        terminal.content_changed("");
        terminal.content_changed("New mail");
        assert!(terminal.advance(Duration::from_secs(5)).is_empty());
        assert_eq!(terminal.workflow().step(), GitStep::Add);
        assert_eq!(terminal.workflow().content(), "New mail");
    }

    #[test]
    fn test_write_and_complete_only_take_easter_eggs() {
        for step in [GitStep::Write, GitStep::Complete] {
            let mut terminal = at_step(step);
            assert_eq!(terminal.handle_key(Key::Char('l')), KeyOutcome::Ignored);
            assert_eq!(terminal.submit("git add ."), SubmitOutcome::Rejected);
            assert_eq!(
                terminal.submit("whoami"),
                SubmitOutcome::EasterEgg(EasterEgg::Whoami)
            );
            assert_eq!(terminal.presenter().message(), WHOAMI_REPLY);
            assert_eq!(terminal.workflow().step(), step);
        }
    }

    #[test]
    fn test_whoami_in_every_step() {
        for step in [GitStep::Add, GitStep::Commit, GitStep::Push] {
            let mut terminal = at_step(step);
            assert_eq!(
                terminal.submit("whoami"),
                SubmitOutcome::EasterEgg(EasterEgg::Whoami)
            );
            assert_eq!(terminal.workflow().step(), step);
        }
    }

    #[test]
    fn test_late_push_result_is_ignored() {
        let mut terminal = at_step(GitStep::Push);
        terminal.submit("git push");
        terminal.content_changed("");
        terminal.finish_push(Ok(true));
        assert_eq!(terminal.workflow().step(), GitStep::Write);
        assert!(!terminal.workflow().is_pushed());
    }

    #[test]
    fn test_hint_follows_step() {
        let mut terminal = at_step(GitStep::Add);
        terminal.advance(Duration::from_secs(10));
        assert_eq!(terminal.workflow().hint().visible_text(), "Type: git add email.txt");
    }

    #[test]
    fn test_commit_appends_transcript() {
        let terminal = at_step(GitStep::Push);
        let transcript = terminal.transcript();
        assert!(transcript.iter().any(|line| line.ends_with("] Fix bug")));
        assert_eq!(transcript[0], "visitor/portfolio $ git add email.txt");
    }
}
