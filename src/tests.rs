#[cfg(test)]
mod tests {
    use crate::app::{status_text, ClickerApp};
    use crate::clicker::tests::{recording_factory, wait_until, ClickLog};
    use crate::clicker::{Clicker, UiEvent};
    use crate::settings::{ClickButton, Digit, Modifier, SettingsStore};
    use std::fs;
    use std::sync::{mpsc, Arc};
    use std::time::Duration;
    use tempfile::{tempdir, TempDir};

    fn app_with(interval_ms: &str, count: &str) -> (TempDir, ClickerApp, ClickLog) {
        let dir = tempdir().unwrap();
        let store = Arc::new(SettingsStore::load(dir.path().join("settings.json")));
        store.apply_interval_ms(interval_ms);
        store.apply_count(count);

        let log: ClickLog = Arc::default();
        let (tx, rx) = mpsc::channel();
        let clicker = Arc::new(Clicker::with_injector(&store, tx, recording_factory(&log)));
        (dir, ClickerApp::new(store, clicker, rx), log)
    }

    #[test]
    fn test_three_clicks_then_completed_status() {
        let (_dir, mut app, log) = app_with("50", "3");
        assert_eq!(app.status(), "Ready: press Ctrl + 1 to start");

        app.clicker.toggle();
        assert!(wait_until(Duration::from_secs(2), || {
            app.drain_events();
            app.status() == "Status: completed 3 clicks."
        }));

        let log = log.lock();
        assert_eq!(log.len(), 3);
        assert!(log.iter().all(|(_, b)| *b == ClickButton::Left));
        for pair in log.windows(2) {
            assert!(pair[1].0 - pair[0].0 >= Duration::from_millis(45));
        }
    }

    #[test]
    fn test_status_texts() {
        let hotkey = crate::hotkey::Hotkey {
            modifier: Modifier::Alt,
            digit: Digit::new('5').unwrap(),
        };
        assert_eq!(status_text(&UiEvent::Started), "Status: clicking...");
        assert_eq!(
            status_text(&UiEvent::Stopped {
                hotkey: Some(hotkey)
            }),
            "Status: stopped. Press Alt + 5 to start again"
        );
        assert_eq!(status_text(&UiEvent::Completed(7)), "Status: completed 7 clicks.");
    }

    #[test]
    fn test_text_fields_skip_invalid_input() {
        let (_dir, mut app, _log) = app_with("100", "0");

        app.interval_input = "fast".into();
        app.count_input = "12".into();
        app.apply_text_fields();
        assert_eq!(app.settings.get().interval_ms(), 100);
        assert_eq!(app.settings.get().click_count, 12);

        app.interval_input = "75".into();
        app.count_input = String::new();
        app.apply_text_fields();
        assert_eq!(app.settings.get().interval_ms(), 75);
        assert_eq!(app.settings.get().click_count, 12);
    }

    #[test]
    fn test_selections_update_ready_text() {
        let (_dir, mut app, _log) = app_with("100", "0");

        app.select_modifier(Modifier::Alt);
        app.select_number(Digit::new('5').unwrap());
        app.select_button(ClickButton::Right);

        assert_eq!(app.status(), "Ready: press Alt + 5 to start");
        let settings = app.settings.get();
        assert_eq!(settings.modifier, Modifier::Alt);
        assert_eq!(settings.number.as_char(), '5');
        assert_eq!(settings.button, ClickButton::Right);
    }

    #[test]
    fn test_shutdown_saves_and_stops() {
        let (_dir, mut app, _log) = app_with("20", "0");
        app.clicker.toggle();
        fs::remove_file(app.settings.path()).unwrap();

        app.shutdown();
        app.shutdown();
        assert!(!app.clicker.is_active());
        assert!(app.settings.path().exists());
        assert!(wait_until(Duration::from_secs(1), || !app.clicker.is_worker_running()));
    }

    #[cfg(feature = "hooks")]
    mod hook_events {
        use super::*;
        use crate::hotkey::{Hotkey, HotkeyDetector, KeyId, SpecialKey};
        use crate::listener::{key_id, process_event};
        use rdev::{EventType, Key};

        fn count_toggles(hotkey: Hotkey, events: &[EventType]) -> usize {
            let mut detector = HotkeyDetector::new();
            events
                .iter()
                .filter(|e| process_event(&mut detector, e, hotkey))
                .count()
        }

        fn hotkey(modifier: Modifier, digit: char) -> Hotkey {
            Hotkey {
                modifier,
                digit: Digit::new(digit).unwrap(),
            }
        }

        #[test]
        fn test_alt_five_retriggers_after_digit_release() {
            let events = [
                EventType::KeyPress(Key::Alt),
                EventType::KeyPress(Key::Num5),
                EventType::KeyPress(Key::Num5),
                EventType::KeyPress(Key::Alt),
                EventType::KeyRelease(Key::Num5),
                EventType::KeyPress(Key::Num5),
                EventType::KeyRelease(Key::Num5),
                EventType::KeyRelease(Key::Alt),
            ];
            assert_eq!(count_toggles(hotkey(Modifier::Alt, '5'), &events), 2);
        }

        #[test]
        fn test_right_ctrl_and_keypad_digit() {
            let events = [
                EventType::KeyPress(Key::ControlRight),
                EventType::KeyPress(Key::Kp1),
            ];
            assert_eq!(count_toggles(hotkey(Modifier::Ctrl, '1'), &events), 1);
        }

        #[test]
        fn test_raw_key_code_digit() {
            let events = [
                EventType::KeyPress(Key::ControlLeft),
                EventType::KeyPress(Key::Unknown('3' as u32)),
                EventType::KeyRelease(Key::Unknown('3' as u32)),
                EventType::KeyPress(Key::Unknown('3' as u32)),
            ];
            assert_eq!(count_toggles(hotkey(Modifier::Ctrl, '3'), &events), 2);
        }

        #[test]
        fn test_other_keys_and_mouse_events_are_ignored() {
            let events = [
                EventType::KeyPress(Key::ShiftLeft),
                EventType::KeyPress(Key::Num1),
                EventType::MouseMove { x: 10.0, y: 10.0 },
                EventType::KeyRelease(Key::ShiftLeft),
                EventType::KeyRelease(Key::F5),
            ];
            assert_eq!(count_toggles(hotkey(Modifier::Ctrl, '1'), &events), 0);
            assert_eq!(key_id(Key::ShiftLeft), None);
            assert_eq!(key_id(Key::AltGr), Some(KeyId::Special(SpecialKey::AltRight)));
        }

        #[test]
        fn test_hotkey_drives_clicker() {
            let (_dir, mut app, log) = app_with("20", "0");
            let mut detector = HotkeyDetector::new();
            let mut feed = |event: EventType| {
                let hotkey = app.settings.get().hotkey();
                if process_event(&mut detector, &event, hotkey) {
                    app.clicker.toggle();
                }
            };

            feed(EventType::KeyPress(Key::ControlLeft));
            feed(EventType::KeyPress(Key::Num1));
            assert!(wait_until(Duration::from_secs(1), || log.lock().len() >= 2));

            feed(EventType::KeyRelease(Key::Num1));
            feed(EventType::KeyPress(Key::Num1));
            assert!(wait_until(Duration::from_secs(1), || !app.clicker.is_worker_running()));
            assert!(!app.clicker.is_active());

            app.drain_events();
            assert_eq!(app.status(), "Status: stopped. Press Ctrl + 1 to start again");
        }
    }
}
