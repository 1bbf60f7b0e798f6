use homeboard::app::HomeboardApp;
use homeboard::settings::{settings_path, Settings};
use homeboard::{logging, theme};

use eframe::egui;

fn main() -> anyhow::Result<()> {
    let settings_file = settings_path();
    // A missing or corrupt settings file never blocks startup.
    let (settings, load_err) = match Settings::load(&settings_file) {
        Ok(settings) => (settings, None),
        Err(err) => (Settings::default(), Some(err)),
    };
    logging::init(settings.debug_logging);
    if let Some(err) = load_err {
        tracing::warn!("settings file is unreadable, using defaults: {err}");
    }

    let (width, height) = settings.window_size.unwrap_or((1280.0, 860.0));
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width, height])
            .with_min_inner_size([720.0, 480.0])
            .with_title("Homeboard"),
        ..Default::default()
    };

    let initial_theme = settings.theme;
    eframe::run_native(
        "Homeboard",
        native_options,
        Box::new(move |cc| {
            theme::apply(&cc.egui_ctx, initial_theme);
            Box::new(HomeboardApp::new(settings, settings_file))
        }),
    )
    .map_err(|err| anyhow::anyhow!("failed to start the UI: {err}"))?;
    Ok(())
}
