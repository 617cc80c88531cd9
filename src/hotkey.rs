//! Modifier + digit hotkey detection.
//!
//! The detector is fed raw press/release events from the keyboard hook and
//! tracks which keys are held. It fires once when the configured combo becomes
//! satisfied and stays latched until the modifier or the digit is released,
//! so key repeat while the combo is held does not toggle again.

use crate::settings::{Digit, Modifier};
use std::{collections::HashSet, fmt};
use tracing::trace;

/// The configured trigger combination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hotkey {
    pub modifier: Modifier,
    pub digit: Digit,
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}", self.modifier, self.digit)
    }
}

/// Non-printable keys the detector cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpecialKey {
    CtrlLeft,
    CtrlRight,
    /// Side-less Ctrl, for hooks that don't distinguish left and right.
    /// rdev always reports a side.
    Ctrl,
    AltLeft,
    AltRight,
    /// Side-less Alt, for hooks that don't distinguish left and right.
    /// rdev always reports a side.
    Alt,
}

/// Identity of a key as reported by the hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyId {
    /// Key that reports a printable character.
    Char(char),
    Special(SpecialKey),
    /// Key known only by its platform key code.
    Raw(u32),
}

impl KeyId {
    pub fn is_modifier(self, modifier: Modifier) -> bool {
        use SpecialKey::*;
        match (modifier, self) {
            (Modifier::Ctrl, KeyId::Special(CtrlLeft | CtrlRight | Ctrl)) => true,
            (Modifier::Alt, KeyId::Special(AltLeft | AltRight | Alt)) => true,
            _ => false,
        }
    }

    pub fn is_digit(self, digit: Digit) -> bool {
        match self {
            KeyId::Char(c) => c == digit.as_char(),
            KeyId::Raw(code) => code == digit.code(),
            KeyId::Special(_) => false,
        }
    }

    fn is_part_of(self, hotkey: Hotkey) -> bool {
        self.is_modifier(hotkey.modifier) || self.is_digit(hotkey.digit)
    }
}

#[derive(Debug, Default)]
pub struct HotkeyDetector {
    pressed: HashSet<KeyId>,
    fired: bool,
}

impl HotkeyDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Returns `true` exactly once per fresh press of
    /// `hotkey`; the caller should toggle clicking when it does.
    pub fn on_press(&mut self, key: KeyId, hotkey: Hotkey) -> bool {
        self.pressed.insert(key);

        let modifier_held = self.pressed.iter().any(|k| k.is_modifier(hotkey.modifier));
        let digit_held = self.pressed.iter().any(|k| k.is_digit(hotkey.digit));
        trace!(
            "press {:?}: modifier={}, digit={}, fired={}",
            key,
            modifier_held,
            digit_held,
            self.fired
        );

        if modifier_held && digit_held && !self.fired {
            self.fired = true;
            return true;
        }
        false
    }

    /// Record a key release. Releasing either half of the combo re-arms the
    /// detector. Keys that were never recorded are ignored.
    pub fn on_release(&mut self, key: KeyId, hotkey: Hotkey) {
        if key.is_part_of(hotkey) {
            self.fired = false;
        }
        self.pressed.remove(&key);
        trace!("release {:?}: fired={}", key, self.fired);
    }

    pub fn is_held(&self, key: KeyId) -> bool {
        self.pressed.contains(&key)
    }

    pub fn is_latched(&self) -> bool {
        self.fired
    }
}
