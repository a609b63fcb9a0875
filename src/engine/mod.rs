//! Terminal engine: the scripted interpreter and the three workflows that run on it.

pub mod boot;
pub mod commands;
pub mod git;
pub mod history;
pub mod input;
pub mod keys;
pub mod lock;
pub mod scheduler;
pub mod secret;
pub mod terminal;
pub mod typewriter;

pub use boot::BootSequence;
pub use commands::{Command, EasterEgg};
pub use git::{FileStatus, GitSignal, GitStep, GitTerminal, GitWorkflow};
pub use history::CommandHistory;
pub use input::{InputBuffer, InputFilter};
pub use keys::{InputRouter, Key, KonamiDetector};
pub use lock::{LockPhase, LockScreen, LockSignal, LockWorkflow};
pub use scheduler::{Scheduler, TimerId};
pub use secret::{catalogue, OverlayEvent, SecretOverlay, SecretTerminal, SecretWorkflow};
pub use terminal::{Dispatch, KeyOutcome, Profile, Session, SubmitOutcome, Terminal, Workflow};
pub use typewriter::{Phase, Typewriter, TypewriterOptions};
