//! Error types shared across the clicker.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClickerError {
    /// Settings file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Settings file is not valid JSON for the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Settings parsed but break an invariant (e.g. non-positive interval).
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("invalid number key '{0}': expected a single digit 1-9")]
    InvalidDigit(String),

    /// The platform refused to inject a click.
    #[error("failed to inject {button} click: {reason}")]
    Injection { button: String, reason: String },

    /// The global keyboard hook could not be installed.
    #[error("keyboard hook error: {0}")]
    Hook(String),
}

pub type Result<T> = std::result::Result<T, ClickerError>;

impl ClickerError {
    pub fn invalid_settings(message: impl Into<String>) -> Self {
        Self::InvalidSettings(message.into())
    }

    pub fn injection(button: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Injection {
            button: button.into(),
            reason: reason.into(),
        }
    }

    pub fn hook(message: impl Into<String>) -> Self {
        Self::Hook(message.into())
    }
}
