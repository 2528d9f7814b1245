#![deny(missing_docs)]
#![deny(warnings)]

//! Entry point for the egui-based Vocalscan UI.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use eframe::egui;
use egui::viewport::IconData;
use vocalscan::config;
use vocalscan::egui_app::controller::Controller;
use vocalscan::egui_app::ui::{EguiApp, MIN_VIEWPORT_SIZE};
use vocalscan::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let app_config = match config::load_or_default() {
        Ok(app_config) => app_config,
        Err(err) => {
            tracing::warn!("Falling back to default config: {err}");
            config::AppConfig::default()
        }
    };
    let api_base_url = config::resolve_api_base_url(&app_config);
    tracing::info!("Classification endpoint: {api_base_url}/classify");

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(MIN_VIEWPORT_SIZE * 1.2)
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_drag_and_drop(true);
    if let Some(icon) = decode_icon(include_bytes!("../assets/logo.png")) {
        viewport = viewport.with_icon(icon);
    } else {
        eprintln!("Failed to decode logo.png for the window icon.");
    }

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Vocalscan",
        native_options,
        Box::new(move |_cc| Ok(Box::new(EguiApp::new(Controller::new(api_base_url))))),
    )?;
    Ok(())
}

/// Convert raw embedded bytes into icon-friendly RGBA data.
fn decode_icon(bytes: &[u8]) -> Option<IconData> {
    let image = image::load_from_memory(bytes).ok()?.to_rgba8();
    let (width, height) = image.dimensions();
    Some(IconData {
        rgba: image.into_raw(),
        width,
        height,
    })
}
