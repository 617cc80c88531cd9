//! Auto-clicker toggled by a global modifier + digit hotkey.
//!
//! Pressing the configured combo (Ctrl or Alt plus a number-row digit) starts
//! clicking the chosen mouse button at a fixed interval; pressing it again
//! stops. A non-zero click count stops the run automatically once reached.
//! Preferences live in a small JSON file in the working directory.

pub mod app;
pub mod clicker;
pub mod error;
pub mod hotkey;
#[cfg(feature = "hooks")]
pub mod listener;
pub mod logging;
pub mod mouse;
pub mod settings;
mod update;

#[cfg(test)]
mod tests;

pub use app::ClickerApp;
pub use clicker::{Clicker, UiEvent};
pub use error::{ClickerError, Result};
pub use hotkey::{Hotkey, HotkeyDetector, KeyId};
pub use settings::{ClickButton, Digit, Modifier, Settings, SettingsStore};
