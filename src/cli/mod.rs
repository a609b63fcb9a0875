//! Terminal front end
//!
//! ## Module Structure
//!
//! - `config` - Configuration file, palettes and profile tuning
//! - `editor` - Multi-line editor for the email body
//! - `app` - Screens, focus and key routing
//! - `ui` - ratatui rendering
//! - `shell` - Raw-mode event loop and relay dispatch
//! - `utils` - Text layout helpers

pub mod app;
pub mod config;
pub mod editor;
pub mod shell;
pub mod ui;
pub mod utils;

pub use app::{App, Pane, Screen};
pub use config::TerminalConfig;
pub use editor::{CursorDirection, TextEditor};
pub use shell::Shell;
