//! Persisted user preferences.
//!
//! The settings file is a flat JSON object with five fields:
//!
//! ```json
//! {
//!   "interval": 0.1,
//!   "count": 0,
//!   "button": "Left",
//!   "modifier": "Ctrl",
//!   "number": "1"
//! }
//! ```
//!
//! A missing or unreadable file is replaced with the defaults. Every accepted
//! edit is written back immediately.

use crate::error::{ClickerError, Result};
use crate::hotkey::Hotkey;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::{
    env, fmt, fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::{debug, info, warn};

pub const DEFAULT_CONFIG_FILE: &str = "mouse_simulator_config.json";

/// Environment variable overriding the settings file location.
pub const CONFIG_ENV: &str = "MOUSE_CLICKER_CONFIG";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickButton {
    #[default]
    Left,
    Right,
    Middle,
}

impl ClickButton {
    pub const ALL: [ClickButton; 3] = [ClickButton::Left, ClickButton::Right, ClickButton::Middle];

    pub fn label(self) -> &'static str {
        match self {
            ClickButton::Left => "Left",
            ClickButton::Right => "Right",
            ClickButton::Middle => "Middle",
        }
    }
}

impl fmt::Display for ClickButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modifier {
    #[default]
    Ctrl,
    Alt,
}

impl Modifier {
    pub const ALL: [Modifier; 2] = [Modifier::Ctrl, Modifier::Alt];

    pub fn label(self) -> &'static str {
        match self {
            Modifier::Ctrl => "Ctrl",
            Modifier::Alt => "Alt",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A number-row digit usable as the hotkey trigger. Always `'1'..='9'`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Digit(char);

impl Digit {
    pub fn new(c: char) -> Result<Self> {
        if ('1'..='9').contains(&c) {
            Ok(Self(c))
        } else {
            Err(ClickerError::InvalidDigit(c.to_string()))
        }
    }

    pub fn as_char(self) -> char {
        self.0
    }

    /// Character code of the digit, as reported by hooks that only expose a
    /// raw key code for number-row keys.
    pub fn code(self) -> u32 {
        self.0 as u32
    }

    pub fn all() -> impl Iterator<Item = Digit> {
        ('1'..='9').map(Digit)
    }
}

impl Default for Digit {
    fn default() -> Self {
        Self('1')
    }
}

impl TryFrom<String> for Digit {
    type Error = ClickerError;

    fn try_from(value: String) -> Result<Self> {
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Digit::new(c),
            _ => Err(ClickerError::InvalidDigit(value)),
        }
    }
}

impl From<Digit> for String {
    fn from(digit: Digit) -> Self {
        digit.0.to_string()
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seconds between clicks. Always positive.
    #[serde(rename = "interval")]
    pub interval_secs: f64,
    /// Clicks per activation, 0 for unlimited.
    #[serde(rename = "count")]
    pub click_count: u32,
    pub button: ClickButton,
    pub modifier: Modifier,
    pub number: Digit,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            interval_secs: 0.1,
            click_count: 0,
            button: ClickButton::Left,
            modifier: Modifier::Ctrl,
            number: Digit::default(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        let representable = matches!(
            Duration::try_from_secs_f64(self.interval_secs),
            Ok(interval) if !interval.is_zero()
        );
        if !representable {
            return Err(ClickerError::invalid_settings(format!(
                "interval must be a positive number of seconds, got {}",
                self.interval_secs
            )));
        }
        Ok(())
    }

    /// Interval as a [`Duration`]. Values `validate` would reject map to the
    /// default interval.
    pub fn interval(&self) -> Duration {
        match Duration::try_from_secs_f64(self.interval_secs) {
            Ok(interval) if !interval.is_zero() => interval,
            _ => Settings::default().interval(),
        }
    }

    /// Interval as whole milliseconds, the unit the settings panel edits in.
    pub fn interval_ms(&self) -> u64 {
        (self.interval_secs * 1000.0).round() as u64
    }

    pub fn hotkey(&self) -> Hotkey {
        Hotkey {
            modifier: self.modifier,
            digit: self.number,
        }
    }
}

/// Owns the current [`Settings`] and the file they persist to.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    current: RwLock<Settings>,
}

impl SettingsStore {
    /// Settings path from [`CONFIG_ENV`], or [`DEFAULT_CONFIG_FILE`] in the
    /// working directory.
    pub fn default_path() -> PathBuf {
        env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Load settings from `path`. Never fails: on any problem the defaults are
    /// applied and written back.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match read_settings(&path) {
            Ok(settings) => {
                debug!("loaded settings from {}: {:?}", path.display(), settings);
                Self {
                    path,
                    current: RwLock::new(settings),
                }
            }
            Err(e) => {
                if path.exists() {
                    warn!("settings file {} unusable ({}); using defaults", path.display(), e);
                } else {
                    info!("no settings file at {}; writing defaults", path.display());
                }
                let store = Self {
                    path,
                    current: RwLock::new(Settings::default()),
                };
                store.save();
                store
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copy of the current settings.
    pub fn get(&self) -> Settings {
        *self.current.read()
    }

    /// Persist the current settings. Write failures are logged and dropped.
    pub fn save(&self) {
        if let Err(e) = self.try_save() {
            warn!("failed to save settings to {}: {}", self.path.display(), e);
        }
    }

    pub fn try_save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.get())?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Apply an interval typed in milliseconds. Empty, non-numeric and zero
    /// input is ignored. Returns whether the edit was applied.
    pub fn apply_interval_ms(&self, text: &str) -> bool {
        let Ok(ms) = text.trim().parse::<u64>() else {
            return false;
        };
        if ms == 0 {
            return false;
        }
        self.update(|s| s.interval_secs = ms as f64 / 1000.0);
        true
    }

    /// Apply a click count. Empty, non-numeric and negative input is ignored.
    pub fn apply_count(&self, text: &str) -> bool {
        let Ok(count) = text.trim().parse::<u32>() else {
            return false;
        };
        self.update(|s| s.click_count = count);
        true
    }

    pub fn set_button(&self, button: ClickButton) {
        self.update(|s| s.button = button);
    }

    pub fn set_modifier(&self, modifier: Modifier) {
        self.update(|s| s.modifier = modifier);
    }

    pub fn set_number(&self, number: Digit) {
        self.update(|s| s.number = number);
    }

    fn update(&self, edit: impl FnOnce(&mut Settings)) {
        {
            let mut settings = self.current.write();
            edit(&mut settings);
        }
        self.save();
    }
}

fn read_settings(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)?;
    let settings: Settings = serde_json::from_str(&content)?;
    settings.validate()?;
    Ok(settings)
}
