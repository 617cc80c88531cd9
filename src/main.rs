use eframe::egui;
use mouse_clicker::{logging, Clicker, ClickerApp, SettingsStore};
use std::sync::{mpsc, Arc};
use tracing::info;

fn main() -> eframe::Result<()> {
    logging::init();

    let settings = Arc::new(SettingsStore::load(SettingsStore::default_path()));
    info!("using settings file {}", settings.path().display());

    let (events_tx, events_rx) = mpsc::channel();
    let clicker = Arc::new(Clicker::new(&settings, events_tx));

    #[cfg(feature = "hooks")]
    mouse_clicker::listener::spawn_listener(Arc::clone(&settings), Arc::clone(&clicker));

    let mut opts = eframe::NativeOptions::default();
    opts.viewport.inner_size = Some(egui::vec2(380.0, 300.0));
    opts.viewport.resizable = Some(false);
    opts.follow_system_theme = true;

    eframe::run_native(
        "Mouse Clicker",
        opts,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Box::new(ClickerApp::new(settings, clicker, events_rx))
        }),
    )
}
