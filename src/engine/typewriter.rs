//! Typewriter Presenter
//!
//! Reveals a message one character at a time, holds it, then erases it.
//! Exactly one session is alive per presenter: starting a new one cancels the
//! pending ticks of the old one before anything else happens.

use std::time::Duration;

use super::scheduler::Scheduler;

/// Animation phase of the current session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Typing,
    Holding,
    Erasing,
}

/// Timing for a typewriter session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypewriterOptions {
    /// Time between revealed characters
    pub char_interval: Duration,
    /// Time fully visible before erasing starts; `None` keeps the text up
    pub hold: Option<Duration>,
    /// Time between removed characters
    pub erase_interval: Duration,
    /// Pause between erasing old text and typing new text in `retype`
    pub settle: Duration,
}

impl TypewriterOptions {
    pub fn new(char_ms: u64, hold_ms: Option<u64>, erase_ms: u64) -> Self {
        Self {
            char_interval: Duration::from_millis(char_ms),
            hold: hold_ms.map(Duration::from_millis),
            erase_interval: Duration::from_millis(erase_ms),
            settle: Duration::from_millis(100),
        }
    }
}

impl Default for TypewriterOptions {
    fn default() -> Self {
        Self::new(35, Some(3000), 30)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tick {
    Reveal,
    BeginErase,
    Erase,
    Resume,
}

/// Interruptible reveal-hold-erase animation
#[derive(Debug)]
pub struct Typewriter {
    options: TypewriterOptions,
    message: String,
    char_count: usize,
    visible: usize,
    phase: Phase,
    queued: Option<String>,
    generation: u64,
    scheduler: Scheduler<Tick>,
}

impl Typewriter {
    pub fn new(options: TypewriterOptions) -> Self {
        Self {
            options,
            message: String::new(),
            char_count: 0,
            visible: 0,
            phase: Phase::Idle,
            queued: None,
            generation: 0,
            scheduler: Scheduler::new(),
        }
    }

    /// Start a new session, aborting whatever is in flight
    pub fn play(&mut self, message: &str) {
        self.scheduler.cancel_all();
        self.queued = None;
        self.begin(message.to_string());
    }

    /// Erase whatever is visible, pause, then type `message`
    pub fn retype(&mut self, message: &str) {
        self.scheduler.cancel_all();
        self.queued = Some(message.to_string());

        if self.visible > 0 {
            self.phase = Phase::Erasing;
            self.scheduler
                .schedule_in(self.options.erase_interval, Tick::Erase);
        } else {
            self.phase = Phase::Idle;
            self.scheduler.schedule_in(self.options.settle, Tick::Resume);
        }
    }

    /// Stop immediately and hide everything
    pub fn cancel(&mut self) {
        self.scheduler.cancel_all();
        self.queued = None;
        self.visible = 0;
        self.phase = Phase::Idle;
    }

    /// Advance virtual time by `dt`, applying every tick that falls due
    pub fn advance(&mut self, dt: Duration) {
        let target = self.scheduler.deadline_after(dt);
        while let Some(tick) = self.scheduler.pop_due(target) {
            self.apply(tick);
        }
        self.scheduler.settle(target);
    }

    fn begin(&mut self, message: String) {
        self.generation += 1;
        self.char_count = message.chars().count();
        self.message = message;
        self.visible = 0;

        if self.char_count == 0 {
            self.phase = Phase::Idle;
            return;
        }

        self.phase = Phase::Typing;
        self.scheduler
            .schedule_in(self.options.char_interval, Tick::Reveal);
    }

    fn apply(&mut self, tick: Tick) {
        match tick {
            Tick::Reveal => {
                self.visible = (self.visible + 1).min(self.char_count);
                if self.visible < self.char_count {
                    self.scheduler
                        .schedule_in(self.options.char_interval, Tick::Reveal);
                    return;
                }
                self.phase = Phase::Holding;
                if let Some(hold) = self.options.hold {
                    self.scheduler.schedule_in(hold, Tick::BeginErase);
                }
            }
            Tick::BeginErase => {
                self.phase = Phase::Erasing;
                self.scheduler
                    .schedule_in(self.options.erase_interval, Tick::Erase);
            }
            Tick::Erase => {
                self.visible = self.visible.saturating_sub(1);
                if self.visible > 0 {
                    self.scheduler
                        .schedule_in(self.options.erase_interval, Tick::Erase);
                    return;
                }
                self.phase = Phase::Idle;
                if self.queued.is_some() {
                    self.scheduler.schedule_in(self.options.settle, Tick::Resume);
                }
            }
            Tick::Resume => {
                if let Some(next) = self.queued.take() {
                    self.begin(next);
                }
            }
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Characters currently shown
    pub fn visible_len(&self) -> usize {
        self.visible
    }

    /// Full message of the current (or last) session
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The revealed prefix of the current message
    pub fn visible_text(&self) -> &str {
        let end = self
            .message
            .char_indices()
            .nth(self.visible)
            .map(|(idx, _)| idx)
            .unwrap_or(self.message.len());
        &self.message[..end]
    }

    /// True while anything is on screen or still scheduled
    pub fn is_active(&self) -> bool {
        self.phase != Phase::Idle || !self.scheduler.is_idle()
    }

    /// Number of sessions started so far
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::new(TypewriterOptions::default())
    }
}
