use crate::error::Result;
use crate::hotkey::Hotkey;
use crate::mouse::{EnigoInjector, MouseInjector};
use crate::settings::{ClickButton, Settings, SettingsStore};
use parking_lot::Mutex;
use std::{
    sync::{mpsc::Sender, Arc, Weak},
    thread::{self, JoinHandle},
    time::Duration,
};
use tracing::{debug, error, info, trace};

/// Status updates sent from the hook and worker threads to the UI thread.
#[derive(Clone, Debug, PartialEq)]
pub enum UiEvent {
    Started,
    Stopped { hotkey: Option<Hotkey> },
    Completed(u32),
    Failed(String),
}

/// Builds the injector used by a worker. Called on the worker thread.
pub type InjectorFactory = Arc<dyn Fn() -> Box<dyn MouseInjector> + Send + Sync>;

/// Settings captured when a worker starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClickPlan {
    pub interval: Duration,
    pub button: ClickButton,
    /// 0 for unlimited.
    pub total: u32,
}

impl From<&Settings> for ClickPlan {
    fn from(settings: &Settings) -> Self {
        Self {
            interval: settings.interval(),
            button: settings.button,
            total: settings.click_count,
        }
    }
}

// -------------- Shared State --------------
#[derive(Default)]
struct ClickState {
    active: bool,
    /// Cleared by the worker under the same lock in which it observes
    /// `active == false`.
    worker_running: bool,
    worker: Option<JoinHandle<()>>,
}

struct Shared {
    state: Mutex<ClickState>,
    events: Sender<UiEvent>,
}

impl Shared {
    fn notify(&self, event: UiEvent) {
        if self.events.send(event).is_err() {
            trace!("status receiver gone; dropping update");
        }
    }

    fn finish(&self) {
        let mut state = self.state.lock();
        state.active = false;
        state.worker_running = false;
    }
}

/// Resets the clicking state if the worker thread unwinds, so the next toggle
/// can spawn a fresh worker.
struct UnwindGuard<'a>(&'a Shared);

impl Drop for UnwindGuard<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            error!("click worker panicked");
            let mut state = self.0.state.lock();
            state.active = false;
            state.worker_running = false;
            self.0.notify(UiEvent::Failed("click worker panicked".to_string()));
        }
    }
}

// -------------- Toggle Coordinator --------------
/// Starts and stops the click worker. At most one worker is alive at a time.
pub struct Clicker {
    shared: Arc<Shared>,
    settings: Weak<SettingsStore>,
    injector: InjectorFactory,
}

impl Clicker {
    pub fn new(settings: &Arc<SettingsStore>, events: Sender<UiEvent>) -> Self {
        Self::with_injector(
            settings,
            events,
            Arc::new(|| Box::new(EnigoInjector::new()) as Box<dyn MouseInjector>),
        )
    }

    pub fn with_injector(
        settings: &Arc<SettingsStore>,
        events: Sender<UiEvent>,
        injector: InjectorFactory,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(ClickState::default()),
                events,
            }),
            settings: Arc::downgrade(settings),
            injector,
        }
    }

    pub fn toggle(&self) {
        let hotkey = self.current_hotkey();
        let mut state = self.shared.state.lock();
        if state.active {
            self.deactivate(&mut state, hotkey);
        } else {
            self.activate(&mut state);
        }
    }

    pub fn start(&self) {
        let mut state = self.shared.state.lock();
        if !state.active {
            self.activate(&mut state);
        }
    }

    /// Ask the worker to stop. It exits at its next check, at most one
    /// interval from now.
    pub fn stop(&self) {
        let hotkey = self.current_hotkey();
        let mut state = self.shared.state.lock();
        if state.active {
            self.deactivate(&mut state, hotkey);
        }
    }

    pub fn is_active(&self) -> bool {
        self.shared.state.lock().active
    }

    pub fn is_worker_running(&self) -> bool {
        self.shared.state.lock().worker_running
    }

    /// Stop clicking without waiting for the worker, which is left to exit on
    /// its own.
    pub fn shutdown(&self) {
        let mut state = self.shared.state.lock();
        state.active = false;
        if let Some(worker) = state.worker.take() {
            if !worker.is_finished() {
                debug!("abandoning click worker at shutdown");
            }
        }
    }

    fn current_hotkey(&self) -> Option<Hotkey> {
        self.settings.upgrade().map(|store| store.get().hotkey())
    }

    fn activate(&self, state: &mut ClickState) {
        state.active = true;
        info!("clicking activated");
        if !state.worker_running {
            state.worker_running = true;
            state.worker = Some(self.spawn_worker());
        } else {
            debug!("previous worker still running; it will resume");
        }
        self.shared.notify(UiEvent::Started);
    }

    fn deactivate(&self, state: &mut ClickState, hotkey: Option<Hotkey>) {
        state.active = false;
        info!("clicking deactivated");
        self.shared.notify(UiEvent::Stopped { hotkey });
    }

    fn spawn_worker(&self) -> JoinHandle<()> {
        let shared = Arc::clone(&self.shared);
        let settings = Weak::clone(&self.settings);
        let injector = Arc::clone(&self.injector);

        thread::spawn(move || {
            let _guard = UnwindGuard(&shared);
            let Some(plan) = settings.upgrade().map(|store| ClickPlan::from(&store.get())) else {
                debug!("settings dropped before the click worker started; aborting");
                shared.finish();
                return;
            };
            debug!("starting click worker: {:?}", plan);

            let mut mouse = injector();
            match run_clicks(&shared, plan, mouse.as_mut()) {
                Ok(()) => debug!("click worker exited"),
                Err(e) => {
                    error!("click worker failed: {}", e);
                    let mut state = shared.state.lock();
                    state.active = false;
                    state.worker_running = false;
                    shared.notify(UiEvent::Failed(e.to_string()));
                }
            }
        })
    }
}

// -------------- Click Engine --------------
fn run_clicks(shared: &Shared, plan: ClickPlan, mouse: &mut dyn MouseInjector) -> Result<()> {
    let mut done: u32 = 0;
    loop {
        {
            let mut state = shared.state.lock();
            if !state.active {
                state.worker_running = false;
                return Ok(());
            }
        }

        mouse.click(plan.button)?;

        if plan.total > 0 {
            done += 1;
            if done >= plan.total {
                let mut state = shared.state.lock();
                state.active = false;
                state.worker_running = false;
                info!("completed {} clicks", plan.total);
                shared.notify(UiEvent::Completed(plan.total));
                return Ok(());
            }
        }

        thread::sleep(plan.interval);
    }
}
