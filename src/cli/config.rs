//! Terminal Configuration
//!
//! Settings for the relay endpoint, typing speed, history size, file locations
//! and the two color palettes. The config file is optional; every field has a
//! default.
//!
//! Lookup order:
//! 1. `$SHELLGATE_CONFIG`
//! 2. `~/.config/shellgate/config.json`

use std::fs;
use std::path::{Path, PathBuf};

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::engine::terminal::Profile;
use crate::error::ConfigError;
use crate::relay::formspree::DEFAULT_ENDPOINT;
use crate::theme::Theme;

/// Where the contact form goes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    pub endpoint: String,
    pub reply_to: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            reply_to: crate::engine::git::DEFAULT_REPLY_TO.to_string(),
        }
    }
}

/// Colors for one theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub frame_color: String,
    pub text_color: String,
    pub accent_color: String,
    pub error_color: String,
}

impl Palette {
    fn dark() -> Self {
        Self {
            frame_color: "DarkGray".to_string(),
            text_color: "White".to_string(),
            accent_color: "Green".to_string(),
            error_color: "Red".to_string(),
        }
    }

    fn light() -> Self {
        Self {
            frame_color: "Gray".to_string(),
            text_color: "Black".to_string(),
            accent_color: "Blue".to_string(),
            error_color: "Red".to_string(),
        }
    }

    pub fn frame(&self) -> Color {
        parse_color(&self.frame_color, Color::DarkGray)
    }

    pub fn text(&self) -> Color {
        parse_color(&self.text_color, Color::White)
    }

    pub fn accent(&self) -> Color {
        parse_color(&self.accent_color, Color::Green)
    }

    pub fn error(&self) -> Color {
        parse_color(&self.error_color, Color::Red)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::dark()
    }
}

/// Configuration for the terminal front end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    pub relay: RelayConfig,
    pub max_history_size: usize,
    /// Multiplier on every typewriter interval
    pub typing_speed: f64,
    pub skip_boot: bool,
    pub theme_file: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub log_level: String,
    pub dark: Palette,
    pub light: Palette,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            relay: RelayConfig::default(),
            max_history_size: 1000,
            typing_speed: 1.0,
            skip_boot: false,
            theme_file: None,
            log_file: None,
            log_level: "info".to_string(),
            dark: Palette::dark(),
            light: Palette::light(),
        }
    }
}

impl TerminalConfig {
    /// Load from the default location, defaults when no file exists
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: TerminalConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("SHELLGATE_CONFIG") {
            return PathBuf::from(path);
        }
        Self::config_dir().join("config.json")
    }

    fn config_dir() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".config/shellgate")
    }

    pub fn theme_path(&self) -> PathBuf {
        self.theme_file
            .clone()
            .unwrap_or_else(|| Self::config_dir().join("preferences.json"))
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| Self::config_dir().join("shellgate.log"))
    }

    pub fn palette(&self, theme: Theme) -> &Palette {
        match theme {
            Theme::Dark => &self.dark,
            Theme::Light => &self.light,
        }
    }

    /// Apply history size and speed to an instance profile
    pub fn tune(&self, profile: Profile) -> Profile {
        profile
            .with_history_size(self.max_history_size)
            .with_speed(self.typing_speed)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_history_size == 0 || self.max_history_size > 100_000 {
            return Err(ConfigError::ValidationError(format!(
                "max_history_size must be between 1 and 100000, got {}",
                self.max_history_size
            )));
        }

        if !self.typing_speed.is_finite() || !(0.1..=10.0).contains(&self.typing_speed) {
            return Err(ConfigError::ValidationError(format!(
                "typing_speed must be between 0.1 and 10.0, got {}",
                self.typing_speed
            )));
        }

        let endpoint = self.relay.endpoint.as_str();
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(ConfigError::ValidationError(format!(
                "relay.endpoint must be an http(s) URL, got {:?}",
                endpoint
            )));
        }

        if !self.relay.reply_to.contains('@') {
            return Err(ConfigError::ValidationError(format!(
                "relay.reply_to must be an email address, got {:?}",
                self.relay.reply_to
            )));
        }

        Ok(())
    }
}

/// Color by name, `fallback` for anything unknown
pub fn parse_color(name: &str, fallback: Color) -> Color {
    match name {
        "Black" => Color::Black,
        "White" => Color::White,
        "Gray" => Color::Gray,
        "DarkGray" => Color::DarkGray,
        "Red" => Color::Red,
        "Green" => Color::Green,
        "Yellow" => Color::Yellow,
        "Blue" => Color::Blue,
        "Cyan" => Color::Cyan,
        "Magenta" => Color::Magenta,
        "LightGreen" => Color::LightGreen,
        "LightBlue" => Color::LightBlue,
        _ => fallback,
    }
}
