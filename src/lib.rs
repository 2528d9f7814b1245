//! Library exports for reuse in integration tests.
/// Application directory helpers.
pub mod app_dirs;
/// Client for the remote classification endpoint.
pub mod classifier;
/// Endpoint configuration.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
/// Logging setup.
pub mod logging;
/// Playback for the bundled demonstration clips.
pub mod samples;

mod http_client;
