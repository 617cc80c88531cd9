use crate::clicker::{Clicker, UiEvent};
use crate::hotkey::Hotkey;
use crate::settings::{ClickButton, Digit, Modifier, SettingsStore};
use std::sync::{mpsc::Receiver, Arc};
use tracing::debug;

// -------------- UI State --------------
pub struct ClickerApp {
    pub(crate) settings: Arc<SettingsStore>,
    pub(crate) clicker: Arc<Clicker>,
    events: Receiver<UiEvent>,

    pub(crate) interval_input: String,
    pub(crate) count_input: String,
    pub(crate) status: String,
    closed: bool,
}

impl ClickerApp {
    pub fn new(settings: Arc<SettingsStore>, clicker: Arc<Clicker>, events: Receiver<UiEvent>) -> Self {
        let current = settings.get();
        Self {
            interval_input: current.interval_ms().to_string(),
            count_input: current.click_count.to_string(),
            status: ready_text(current.hotkey()),
            settings,
            clicker,
            events,
            closed: false,
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Apply every status update queued by the hook and worker threads.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            debug!("ui event: {:?}", event);
            self.status = status_text(&event);
        }
    }

    /// Commit the text fields. Input that is not a valid number is left out.
    pub fn apply_text_fields(&mut self) {
        self.settings.apply_interval_ms(&self.interval_input);
        self.settings.apply_count(&self.count_input);
        self.show_ready();
    }

    pub fn select_button(&mut self, button: ClickButton) {
        self.settings.set_button(button);
        self.show_ready();
    }

    pub fn select_modifier(&mut self, modifier: Modifier) {
        self.settings.set_modifier(modifier);
        self.show_ready();
    }

    pub fn select_number(&mut self, number: Digit) {
        self.settings.set_number(number);
        self.show_ready();
    }

    /// Save settings and stop clicking. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.settings.save();
        self.clicker.shutdown();
    }

    fn show_ready(&mut self) {
        self.status = ready_text(self.settings.get().hotkey());
    }
}

pub fn ready_text(hotkey: Hotkey) -> String {
    format!("Ready: press {} to start", hotkey)
}

pub fn status_text(event: &UiEvent) -> String {
    match event {
        UiEvent::Started => "Status: clicking...".to_string(),
        UiEvent::Stopped { hotkey: Some(hotkey) } => {
            format!("Status: stopped. Press {} to start again", hotkey)
        }
        UiEvent::Stopped { hotkey: None } => "Status: stopped".to_string(),
        UiEvent::Completed(total) => format!("Status: completed {} clicks.", total),
        UiEvent::Failed(reason) => format!("Status: stopped ({})", reason),
    }
}
