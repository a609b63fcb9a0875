//! Boot sequence shown before the lock screen

use std::time::Duration;

use tracing::debug;

use super::scheduler::Scheduler;

pub const BOOT_STAGES: [&str; 3] = [
    "Initializing shell environment",
    "Loading system modules",
    "Mounting file system",
];

const STAGE_INTERVAL: Duration = Duration::from_millis(600);
const HOLD: Duration = Duration::from_millis(600);
const EXIT: Duration = Duration::from_millis(800);
const DOT_INTERVAL_MS: u128 = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BootTimer {
    Stage(usize),
    Exit,
    Done,
}

/// Status of one boot line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    Hidden,
    Loading,
    Ok,
}

impl StageStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Hidden => "",
            Self::Loading => "..",
            Self::Ok => "OK",
        }
    }
}

#[derive(Debug)]
pub struct BootSequence {
    stage: usize,
    exiting: bool,
    done: bool,
    elapsed: Duration,
    timers: Scheduler<BootTimer>,
}

impl BootSequence {
    pub fn new() -> Self {
        let mut timers = Scheduler::new();
        let mut at = Duration::ZERO;
        for stage in 1..=BOOT_STAGES.len() {
            at += STAGE_INTERVAL;
            timers.schedule_in(at, BootTimer::Stage(stage));
        }
        timers.schedule_in(at + HOLD, BootTimer::Exit);
        timers.schedule_in(at + HOLD + EXIT, BootTimer::Done);

        Self {
            stage: 0,
            exiting: false,
            done: false,
            elapsed: Duration::ZERO,
            timers,
        }
    }

    /// Advance time; returns true once, when the sequence hands off
    pub fn advance(&mut self, dt: Duration) -> bool {
        if self.done {
            return false;
        }
        self.elapsed += dt;

        let mut finished = false;
        let target = self.timers.deadline_after(dt);
        while let Some(timer) = self.timers.pop_due(target) {
            match timer {
                BootTimer::Stage(stage) => {
                    debug!(stage, "boot stage");
                    self.stage = stage;
                }
                BootTimer::Exit => self.exiting = true,
                BootTimer::Done => {
                    self.done = true;
                    finished = true;
                }
            }
        }
        self.timers.settle(target);
        finished
    }

    /// Jump straight to the hand-off
    pub fn skip(&mut self) -> bool {
        if self.done {
            return false;
        }
        self.timers.cancel_all();
        self.stage = BOOT_STAGES.len();
        self.exiting = true;
        self.done = true;
        true
    }

    pub fn status(&self, index: usize) -> StageStatus {
        if index < self.stage {
            StageStatus::Ok
        } else if index == self.stage {
            StageStatus::Loading
        } else {
            StageStatus::Hidden
        }
    }

    pub fn lines(&self) -> Vec<(StageStatus, &'static str)> {
        BOOT_STAGES
            .iter()
            .enumerate()
            .map(|(idx, text)| (self.status(idx), *text))
            .collect()
    }

    /// Animated trailing dots for the loading line
    pub fn dots(&self) -> &'static str {
        match (self.elapsed.as_millis() / DOT_INTERVAL_MS) % 4 {
            0 => "",
            1 => ".",
            2 => "..",
            _ => "...",
        }
    }

    pub fn is_exiting(&self) -> bool {
        self.exiting
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

impl Default for BootSequence {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stages_then_exit() {
        let mut boot = BootSequence::new();
        assert_eq!(boot.status(0), StageStatus::Loading);
        assert_eq!(boot.status(1), StageStatus::Hidden);

        assert!(!boot.advance(Duration::from_millis(600)));
        assert_eq!(boot.status(0), StageStatus::Ok);
        assert_eq!(boot.status(1), StageStatus::Loading);

        assert!(!boot.advance(Duration::from_millis(1200)));
        assert!(boot.lines().iter().all(|(status, _)| *status == StageStatus::Ok));
        assert!(!boot.is_exiting());

        assert!(!boot.advance(Duration::from_millis(600)));
        assert!(boot.is_exiting());

        assert!(!boot.advance(Duration::from_millis(799)));
        assert!(boot.advance(Duration::from_millis(1)));
        assert!(!boot.advance(Duration::from_secs(1)));
    }

    #[test]
    fn test_skip() {
        let mut boot = BootSequence::new();
        assert!(boot.skip());
        assert!(boot.is_done());
        assert!(!boot.skip());
        assert!(!boot.advance(Duration::from_secs(5)));
    }

    #[test]
    fn test_dots_cycle() {
        let mut boot = BootSequence::new();
        assert_eq!(boot.dots(), "");
        boot.advance(Duration::from_millis(1200));
        assert_eq!(boot.dots(), "...");
        boot.advance(Duration::from_millis(400));
        assert_eq!(boot.dots(), "");
    }
}
