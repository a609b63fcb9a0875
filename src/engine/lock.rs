//! Lock Screen Workflow
//!
//! Single step, `locked`. Typing `start` plays the consumption/flip sequence
//! and raises `LockSignal::Unlocked` once; the instance never locks again.

use std::time::Duration;

use tracing::info;

use super::commands::Command;
use super::scheduler::Scheduler;
use super::terminal::{Dispatch, Profile, Session, Terminal, Workflow};

pub const UNLOCK_COMMAND: &str = "start";
pub const NOT_FOUND: &str = "command not found";

/// Gap before each character of `start` is consumed
const CONSUME_GAPS_MS: [u64; 5] = [80, 80, 60, 80, 130];
const FLIP_AT: Duration = Duration::from_millis(1100);
const UNLOCK_AT: Duration = Duration::from_millis(1400);

/// Phase of the unlock transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockPhase {
    Locked,
    Consuming,
    Flipping,
    Unlocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LockTimer {
    Consume(usize),
    Flip,
    Unlock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockSignal {
    Unlocked,
}

#[derive(Debug, Default)]
pub struct LockWorkflow {
    phase: LockPhase,
    consumed: usize,
    timers: Scheduler<LockTimer>,
}

impl Default for LockPhase {
    fn default() -> Self {
        LockPhase::Locked
    }
}

impl LockWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> LockPhase {
        self.phase
    }

    /// Characters of `start` already consumed by the transition
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, LockPhase::Consuming | LockPhase::Flipping)
    }

    pub fn is_unlocked(&self) -> bool {
        self.phase == LockPhase::Unlocked
    }

    fn begin_unlock(&mut self) {
        info!("unlock sequence started");
        self.phase = LockPhase::Consuming;
        self.consumed = 0;

        let mut at = Duration::ZERO;
        for (idx, gap) in CONSUME_GAPS_MS.iter().enumerate() {
            at += Duration::from_millis(*gap);
            self.timers.schedule_in(at, LockTimer::Consume(idx + 1));
        }
        self.timers.schedule_in(FLIP_AT, LockTimer::Flip);
        self.timers.schedule_in(UNLOCK_AT, LockTimer::Unlock);
    }
}

impl Workflow for LockWorkflow {
    type Effect = ();
    type Signal = LockSignal;

    fn accepts_keys(&self) -> bool {
        self.phase == LockPhase::Locked
    }

    fn accepts_commands(&self) -> bool {
        self.phase == LockPhase::Locked
    }

    fn dispatch(&mut self, command: &Command, _session: &mut Session) -> Dispatch<()> {
        if command.normalized == UNLOCK_COMMAND {
            self.begin_unlock();
            return Dispatch::Accepted;
        }
        Dispatch::Reply(NOT_FOUND.to_string())
    }

    fn advance(&mut self, dt: Duration, session: &mut Session) -> Vec<LockSignal> {
        let mut signals = Vec::new();
        let target = self.timers.deadline_after(dt);

        while let Some(timer) = self.timers.pop_due(target) {
            match timer {
                LockTimer::Consume(count) => self.consumed = count,
                LockTimer::Flip => self.phase = LockPhase::Flipping,
                LockTimer::Unlock => {
                    self.phase = LockPhase::Unlocked;
                    session.presenter.cancel();
                    info!("terminal unlocked");
                    signals.push(LockSignal::Unlocked);
                }
            }
        }
        self.timers.settle(target);
        signals
    }

    fn unmount(&mut self) {
        self.timers.cancel_all();
    }
}

/// The lock screen instance
pub type LockScreen = Terminal<LockWorkflow>;

impl Terminal<LockWorkflow> {
    pub fn lock_screen() -> Self {
        Terminal::new(Profile::lock(), LockWorkflow::new())
    }

    /// Remainder of `start` to show after the cursor while the input is a prefix of it
    pub fn ghost_text(&self) -> &'static str {
        let typed = self.input().text();
        if UNLOCK_COMMAND.starts_with(typed) {
            &UNLOCK_COMMAND[typed.len()..]
        } else {
            ""
        }
    }

    /// Tap-anywhere shortcut: behaves exactly like typing `start`
    pub fn bypass(&mut self) -> bool {
        if !self.workflow().accepts_commands() {
            return false;
        }
        let (workflow, session) = self.parts_mut();
        session.input.reset();
        workflow.begin_unlock();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::keys::Key;
    use crate::engine::terminal::{KeyOutcome, SubmitOutcome};

    fn type_word(lock: &mut LockScreen, word: &str) -> KeyOutcome<()> {
        for ch in word.chars() {
            lock.handle_key(Key::Char(ch));
        }
        lock.handle_key(Key::Enter)
    }

    fn run_for(lock: &mut LockScreen, total: Duration, step: Duration) -> usize {
        let mut unlocked = 0;
        let mut elapsed = Duration::ZERO;
        while elapsed < total {
            unlocked += lock.advance(step).len();
            elapsed += step;
        }
        unlocked
    }

    #[test]
    fn test_start_unlocks_once_after_full_delay() {
        let mut lock = LockScreen::lock_screen();
        let outcome = type_word(&mut lock, "start");
        assert_eq!(outcome, KeyOutcome::Submitted(SubmitOutcome::Accepted));
        assert_eq!(lock.workflow().phase(), LockPhase::Consuming);

        assert_eq!(run_for(&mut lock, Duration::from_millis(1390), Duration::from_millis(10)), 0);
        assert_eq!(lock.workflow().consumed(), 5);
        assert_eq!(lock.workflow().phase(), LockPhase::Flipping);

        assert_eq!(run_for(&mut lock, Duration::from_millis(10), Duration::from_millis(10)), 1);
        assert!(lock.workflow().is_unlocked());

        assert_eq!(run_for(&mut lock, Duration::from_secs(5), Duration::from_millis(100)), 0);
    }

    #[test]
    fn test_consumption_curve() {
        let mut lock = LockScreen::lock_screen();
        lock.submit("start");

        let expected = [(80, 1), (160, 2), (220, 3), (300, 4), (430, 5)];
        let mut now = 0;
        for (at, consumed) in expected {
            lock.advance(Duration::from_millis(at - 1 - now));
            assert_eq!(lock.workflow().consumed(), consumed - 1);
            lock.advance(Duration::from_millis(1));
            assert_eq!(lock.workflow().consumed(), consumed);
            now = at;
        }
    }

    #[test]
    fn test_unknown_word_is_not_found() {
        let mut lock = LockScreen::lock_screen();
        let outcome = type_word(&mut lock, "begin");
        assert_eq!(
            outcome,
            KeyOutcome::Submitted(SubmitOutcome::Replied(NOT_FOUND.to_string()))
        );
        assert!(lock.input().is_empty());
        assert_eq!(lock.workflow().phase(), LockPhase::Locked);
        assert_eq!(run_for(&mut lock, Duration::from_secs(5), Duration::from_millis(50)), 0);
    }

    #[test]
    fn test_input_capped_and_filtered() {
        let mut lock = LockScreen::lock_screen();
        for ch in "St4rt!now".chars() {
            lock.handle_key(Key::Char(ch));
        }
        assert_eq!(lock.input().text(), "strtno");
        lock.handle_key(Key::Left);
        lock.handle_key(Key::Backspace);
        assert_eq!(lock.input().text(), "strtn");
    }

    #[test]
    fn test_ghost_text() {
        let mut lock = LockScreen::lock_screen();
        assert_eq!(lock.ghost_text(), "start");
        lock.handle_key(Key::Char('s'));
        lock.handle_key(Key::Char('t'));
        assert_eq!(lock.ghost_text(), "art");
        lock.handle_key(Key::Char('x'));
        assert_eq!(lock.ghost_text(), "");
    }

    #[test]
    fn test_keys_ignored_while_transitioning() {
        let mut lock = LockScreen::lock_screen();
        lock.submit("start");
        assert_eq!(lock.handle_key(Key::Char('a')), KeyOutcome::Ignored);
        assert_eq!(lock.submit("start"), SubmitOutcome::Rejected);
    }

    #[test]
    fn test_whoami_keeps_lock() {
        let mut lock = LockScreen::lock_screen();
        lock.submit("whoami");
        assert_eq!(lock.workflow().phase(), LockPhase::Locked);
        assert!(lock.presenter().is_active());
    }

    #[test]
    fn test_bypass() {
        let mut lock = LockScreen::lock_screen();
        lock.handle_key(Key::Char('z'));
        assert!(lock.bypass());
        assert!(lock.input().is_empty());
        assert!(!lock.bypass());
        assert_eq!(run_for(&mut lock, Duration::from_millis(1400), Duration::from_millis(100)), 1);
    }

    #[test]
    fn test_unmount_mid_transition_never_unlocks() {
        let mut lock = LockScreen::lock_screen();
        lock.submit("start");
        lock.advance(Duration::from_millis(500));
        lock.unmount();
        assert_eq!(run_for(&mut lock, Duration::from_secs(3), Duration::from_millis(100)), 0);
        assert!(!lock.workflow().is_unlocked());
    }
}
