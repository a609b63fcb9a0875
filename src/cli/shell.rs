//! Terminal driver
//!
//! Sets up raw mode and the alternate screen, then loops: draw, poll one
//! event, advance the clocks by the real elapsed time, start relay calls and
//! collect their outcomes.

use std::io;
use std::sync::Arc;
use std::time::Instant;

use crossterm::{
    cursor,
    event::{self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture, Event, MouseEventKind},
    execute, terminal,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tokio::time::Duration;
use tracing::{debug, info};

use super::app::App;
use super::config::TerminalConfig;
use super::ui;
use crate::relay::{RelayError, SubmitRelay};

const FRAME: Duration = Duration::from_millis(16);

pub struct Shell {
    app: App,
    config: TerminalConfig,
    relay: Arc<dyn SubmitRelay>,
    outcomes_tx: mpsc::UnboundedSender<Result<bool, RelayError>>,
    outcomes_rx: mpsc::UnboundedReceiver<Result<bool, RelayError>>,
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl Shell {
    pub fn new(app: App, config: TerminalConfig, relay: Arc<dyn SubmitRelay>) -> io::Result<Self> {
        let stdout = io::stdout();
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        terminal::enable_raw_mode()?;
        enter_screen(terminal.backend_mut())?;

        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();
        Ok(Self {
            app,
            config,
            relay,
            outcomes_tx,
            outcomes_rx,
            terminal,
        })
    }

    pub async fn run(&mut self) -> io::Result<()> {
        let mut last = Instant::now();

        while !self.app.should_exit() {
            self.render()?;
            self.handle_input()?;

            let now = Instant::now();
            self.app.tick(now - last);
            last = now;

            for form in self.app.take_effects() {
                let relay = Arc::clone(&self.relay);
                let tx = self.outcomes_tx.clone();
                tokio::spawn(async move {
                    let outcome = relay.submit(&form).await;
                    let _ = tx.send(outcome);
                });
            }

            while let Ok(outcome) = self.outcomes_rx.try_recv() {
                debug!(ok = outcome.is_ok(), "relay call finished");
                self.app.finish_push(outcome);
            }
        }

        info!("shutting down");
        self.cleanup()
    }

    fn render(&mut self) -> io::Result<()> {
        let app = &self.app;
        let config = &self.config;
        self.terminal.draw(|f| ui::draw(f, app, config))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        if event::poll(FRAME)? {
            match event::read()? {
                Event::Key(key) => self.app.handle_key(key),
                Event::Mouse(mouse) => {
                    if let MouseEventKind::Down(_) = mouse.kind {
                        self.app.handle_click();
                    }
                }
                Event::Paste(text) => self.app.handle_paste(&text),
                _ => {}
            }
        }
        Ok(())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            DisableBracketedPaste,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }
}

/// Switch to the alternate screen. Raw mode must already be on; it is turned
/// back off if the switch fails, since no `Shell` exists yet to restore it.
fn enter_screen<W: io::Write>(out: &mut W) -> io::Result<()> {
    let entered = execute!(
        out,
        terminal::EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste,
        cursor::Show
    );
    if let Err(err) = entered {
        let _ = terminal::disable_raw_mode();
        return Err(err);
    }
    Ok(())
}

impl Drop for Shell {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenPipe;

    impl io::Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_failed_screen_switch_leaves_raw_mode_off() {
        let err = enter_screen(&mut BrokenPipe).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert!(!terminal::is_raw_mode_enabled().unwrap_or(false));
    }

    #[test]
    fn test_screen_switch_writes_escape_sequences() {
        let mut out = Vec::new();
        enter_screen(&mut out).unwrap();
        assert!(!out.is_empty());
    }
}
