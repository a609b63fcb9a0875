//! shellgate - a scripted terminal gate in front of a contact form
//!
//! A lock screen that opens on `start`, then a mock `git` workflow whose
//! `push` delivers the email body to a form relay.
//!
//! # Features
//!
//! - **Scripted terminals**: one interpreter (`engine::Terminal`) driven by
//!   per-instance workflows for the lock screen, the git flow and the secret page
//! - **Typewriter replies**: every message types out, holds and erases on a
//!   virtual clock, so timing is testable without sleeping
//! - **Contact relay**: Formspree-compatible form POST behind the `SubmitRelay` trait
//! - **Extras**: boot sequence, Konami-code secret page, persisted dark/light theme
//!
//! # Quick Start
//!
//! ```rust
//! use std::time::Duration;
//! use shellgate::engine::{GitStep, GitTerminal, SubmitOutcome};
//!
//! let mut terminal = GitTerminal::git_terminal();
//! terminal.content_changed("Hello!");
//! terminal.submit("git add email.txt");
//! terminal.submit("git commit -m \"Hi\"");
//!
//! let SubmitOutcome::Effect(form) = terminal.submit("git push") else {
//!     panic!("push should hand over a contact form");
//! };
//! assert_eq!(form.subject, "Hi");
//!
//! terminal.finish_push(Ok(true));
//! assert_eq!(terminal.workflow().step(), GitStep::Complete);
//! terminal.advance(Duration::from_secs(3));
//! assert_eq!(terminal.workflow().step(), GitStep::Write);
//! ```

pub mod cli;
pub mod engine;
pub mod error;
pub mod logging;
pub mod relay;
pub mod theme;

// Re-export commonly used types for convenience
pub use error::{ConfigError, RelayError, ThemeError};
pub use relay::{ContactForm, FormspreeClient, SubmitRelay};
pub use theme::{OverlayFlag, Theme, ThemeStore};
