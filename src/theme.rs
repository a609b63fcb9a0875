//! Theme preference and the overlay-open flag.
//!
//! The preference is one `"dark" | "light"` value stored under the `theme` key
//! of a small JSON file. Other keys in that file are left alone.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde_json::{Map, Value};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::error::ThemeError;

pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ThemeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(ThemeError::UnknownTheme(other.to_string())),
        }
    }
}

/// OS color-scheme preference from a `COLORFGBG` value (`"fg;bg"`)
pub fn theme_from_colorfgbg(value: Option<&str>) -> Theme {
    let background = value
        .and_then(|value| value.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok());

    match background {
        Some(7) | Some(9..=15) => Theme::Light,
        _ => Theme::Dark,
    }
}

pub fn system_preference() -> Theme {
    theme_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
}

/// Persisted theme preference
#[derive(Debug)]
pub struct ThemeStore {
    path: PathBuf,
    entries: Map<String, Value>,
    theme: Theme,
}

impl ThemeStore {
    /// Open the store, falling back to the OS preference when nothing is saved
    pub fn open(path: &Path) -> Result<Self, ThemeError> {
        Self::open_with_default(path, system_preference())
    }

    pub fn open_with_default(path: &Path, fallback: Theme) -> Result<Self, ThemeError> {
        let entries = match fs::read_to_string(path) {
            Ok(contents) if contents.trim().is_empty() => Map::new(),
            Ok(contents) => serde_json::from_str::<Map<String, Value>>(&contents)?,
            Err(err) if err.kind() == ErrorKind::NotFound => Map::new(),
            Err(err) => return Err(err.into()),
        };

        let saved = entries
            .get(THEME_KEY)
            .and_then(Value::as_str)
            .map(Theme::from_str);
        let theme = match saved {
            Some(Ok(theme)) => theme,
            Some(Err(err)) => {
                debug!(error = %err, "ignoring saved theme");
                fallback
            }
            None => fallback,
        };

        Ok(Self {
            path: path.to_path_buf(),
            entries,
            theme,
        })
    }

    /// A store that was never opened from disk; `save` creates the file
    pub fn in_memory(path: &Path, theme: Theme) -> Self {
        Self {
            path: path.to_path_buf(),
            entries: Map::new(),
            theme,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when a preference has been written
    pub fn is_saved(&self) -> bool {
        self.entries.contains_key(THEME_KEY)
    }

    /// Flip the theme and persist the choice
    pub fn toggle(&mut self) -> Result<Theme, ThemeError> {
        self.set(self.theme.toggled())?;
        Ok(self.theme)
    }

    pub fn set(&mut self, theme: Theme) -> Result<(), ThemeError> {
        self.theme = theme;
        self.entries
            .insert(THEME_KEY.to_string(), Value::String(theme.to_string()));
        self.save()?;
        info!(%theme, "theme saved");
        Ok(())
    }

    fn save(&self) -> Result<(), ThemeError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let contents = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

/// Publishes whether a full-screen overlay is open
#[derive(Debug)]
pub struct OverlayFlag {
    sender: watch::Sender<bool>,
}

impl OverlayFlag {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self { sender }
    }

    pub fn set(&self, open: bool) {
        let previous = self.sender.send_replace(open);
        if previous != open {
            debug!(open, "overlay flag");
        }
    }

    pub fn is_open(&self) -> bool {
        *self.sender.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.sender.subscribe()
    }
}

impl Default for OverlayFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Theme toggle control; hidden while an overlay is open
#[derive(Debug, Clone)]
pub struct ThemeToggle {
    overlay: watch::Receiver<bool>,
}

impl ThemeToggle {
    pub fn new(flag: &OverlayFlag) -> Self {
        Self {
            overlay: flag.subscribe(),
        }
    }

    pub fn is_visible(&self) -> bool {
        !*self.overlay.borrow()
    }

    /// Toggle unless hidden. Returns the theme now in effect.
    pub fn press(&self, store: &mut ThemeStore) -> Result<Theme, ThemeError> {
        if !self.is_visible() {
            return Ok(store.theme());
        }
        store.toggle()
    }

    /// Wait for the next overlay change; `None` once the flag is gone
    pub async fn changed(&mut self) -> Option<bool> {
        self.overlay.changed().await.ok()?;
        Some(*self.overlay.borrow())
    }
}
