//! egui application modules: shared state, controller, renderer.

/// Maintains app state and bridges the classifier and player to the UI.
pub mod controller;
/// Shared state types consumed by the renderer.
pub mod state;
/// Palette and widget visuals.
pub mod style;
/// egui renderer.
pub mod ui;

mod jobs;
