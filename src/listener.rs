use crate::clicker::Clicker;
use crate::error::ClickerError;
use crate::hotkey::{Hotkey, HotkeyDetector, KeyId, SpecialKey};
use crate::settings::SettingsStore;
use rdev::{listen, EventType, Key};
use std::{sync::Arc, thread, time::Duration};
use tracing::{debug, warn};

/// Map a hook key onto the detector's key identity. Keys that can never be
/// part of a hotkey are dropped.
pub fn key_id(key: Key) -> Option<KeyId> {
    let id = match key {
        Key::ControlLeft => KeyId::Special(SpecialKey::CtrlLeft),
        Key::ControlRight => KeyId::Special(SpecialKey::CtrlRight),
        Key::Alt => KeyId::Special(SpecialKey::AltLeft),
        Key::AltGr => KeyId::Special(SpecialKey::AltRight),
        Key::Num0 | Key::Kp0 => KeyId::Char('0'),
        Key::Num1 | Key::Kp1 => KeyId::Char('1'),
        Key::Num2 | Key::Kp2 => KeyId::Char('2'),
        Key::Num3 | Key::Kp3 => KeyId::Char('3'),
        Key::Num4 | Key::Kp4 => KeyId::Char('4'),
        Key::Num5 | Key::Kp5 => KeyId::Char('5'),
        Key::Num6 | Key::Kp6 => KeyId::Char('6'),
        Key::Num7 | Key::Kp7 => KeyId::Char('7'),
        Key::Num8 | Key::Kp8 => KeyId::Char('8'),
        Key::Num9 | Key::Kp9 => KeyId::Char('9'),
        Key::Unknown(code) => KeyId::Raw(code),
        _ => return None,
    };
    Some(id)
}

/// Feed one hook event to the detector. Returns `true` when the hotkey fired.
pub fn process_event(detector: &mut HotkeyDetector, event: &EventType, hotkey: Hotkey) -> bool {
    match event {
        EventType::KeyPress(key) => match key_id(*key) {
            Some(id) => detector.on_press(id, hotkey),
            None => false,
        },
        EventType::KeyRelease(key) => {
            if let Some(id) = key_id(*key) {
                detector.on_release(id, hotkey);
            }
            false
        }
        _ => false,
    }
}

/// Start the global keyboard hook on its own thread. Keys are observed, not
/// grabbed, so other applications still receive them. The hook is reinstalled
/// if it fails.
pub fn spawn_listener(settings: Arc<SettingsStore>, clicker: Arc<Clicker>) {
    debug!("starting keyboard listener");
    thread::spawn(move || loop {
        let settings = Arc::clone(&settings);
        let clicker = Arc::clone(&clicker);
        let mut detector = HotkeyDetector::new();

        let result = listen(move |event| {
            let hotkey = settings.get().hotkey();
            if process_event(&mut detector, &event.event_type, hotkey) {
                debug!("hotkey {} pressed", hotkey);
                clicker.toggle();
            }
        });

        match result {
            Ok(()) => warn!("keyboard listener exited unexpectedly; restarting shortly"),
            Err(e) => warn!("{}; retrying shortly", ClickerError::hook(format!("{:?}", e))),
        }
        thread::sleep(Duration::from_millis(500));
    });
}
