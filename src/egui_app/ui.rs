//! egui renderer for the application UI.

use std::time::Duration;

use eframe::egui::{
    self, Align2, Button, Color32, CornerRadius, FontId, Grid, RichText, Sense, Spinner, Stroke,
    StrokeKind, TextureHandle, TextureOptions, Ui, Vec2,
};

use super::controller::Controller;
use super::state::format_probability;
use super::style;
use crate::samples::SampleId;

/// Smallest window that still fits the cards, picker and table.
pub const MIN_VIEWPORT_SIZE: Vec2 = Vec2::new(460.0, 560.0);

const SAMPLE_CARD_SIZE: f32 = 160.0;

const HUMAN_IMAGE: &[u8] = include_bytes!("../../assets/images/human.png");
const ROBOT_IMAGE: &[u8] = include_bytes!("../../assets/images/robot.png");

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: Controller,
    visuals_set: bool,
    sample_textures: Option<[TextureHandle; 2]>,
}

impl EguiApp {
    pub fn new(controller: Controller) -> Self {
        Self {
            controller,
            visuals_set: false,
            sample_textures: None,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn ensure_sample_textures(&mut self, ctx: &egui::Context) {
        if self.sample_textures.is_some() {
            return;
        }
        let human = load_sample_texture(ctx, "sample_human", HUMAN_IMAGE);
        let robot = load_sample_texture(ctx, "sample_robot", ROBOT_IMAGE);
        if let (Some(human), Some(robot)) = (human, robot) {
            self.sample_textures = Some([human, robot]);
        }
    }

    fn consume_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if dropped.is_empty() {
            return;
        }
        let paths = dropped.into_iter().filter_map(|file| file.path).collect();
        self.controller.handle_dropped_paths(paths);
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar")
            .frame(egui::Frame::default().fill(style::palette().bg_primary))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.add_space(8.0);
                    ui.heading("Audio Classifier");
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Close").clicked() {
                            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                });
            });
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .frame(egui::Frame::default().fill(style::palette().bg_primary))
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                ui.horizontal(|ui| {
                    ui.add_space(8.0);
                    ui.painter().circle_filled(
                        ui.cursor().min + egui::vec2(6.0, 10.0),
                        6.0,
                        status.badge_color,
                    );
                    ui.add_space(16.0);
                    ui.label(&status.badge_label);
                    ui.separator();
                    ui.label(&status.text);
                });
            });
    }

    fn render_samples(&mut self, ui: &mut Ui) {
        let Some(textures) = self.sample_textures.clone() else {
            return;
        };
        let mut toggles: Vec<SampleId> = Vec::new();
        ui.horizontal(|ui| {
            for (sample, texture) in SampleId::ALL.into_iter().zip(textures.iter()) {
                let playing = self.controller.ui.playing.get(sample);
                if render_sample_card(ui, sample, texture, playing) {
                    toggles.push(sample);
                }
                ui.add_space(12.0);
            }
        });
        for sample in toggles {
            self.controller.toggle_sample(sample);
        }
    }

    fn render_picker(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        let hovering_drop = ui.input(|i| !i.raw.hovered_files.is_empty());

        let size = Vec2::new(ui.available_width().min(400.0), 88.0);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click());
        let stroke = if hovering_drop {
            Stroke::new(1.5, palette.accent_ice)
        } else {
            Stroke::new(1.0, palette.panel_outline)
        };
        ui.painter()
            .rect_filled(rect, CornerRadius::ZERO, palette.bg_secondary);
        ui.painter()
            .rect_stroke(rect, CornerRadius::ZERO, stroke, StrokeKind::Inside);

        let text = if hovering_drop {
            "Drop the file here…".to_string()
        } else if let Some(file) = &self.controller.ui.selected {
            format!("Selected: {}", file.name)
        } else {
            "Drag & drop or click to choose an audio file".to_string()
        };
        let color = if hovering_drop {
            palette.accent_ice
        } else {
            palette.text_primary
        };
        ui.painter().text(
            rect.center(),
            Align2::CENTER_CENTER,
            text,
            FontId::proportional(14.0),
            color,
        );

        if response.clicked() {
            self.controller.pick_file_via_dialog();
        }
    }

    fn render_classify(&mut self, ui: &mut Ui) {
        let in_flight = self.controller.ui.show_spinner();
        ui.horizontal(|ui| {
            let label = if in_flight { "Processing…" } else { "Classify" };
            let clicked = ui
                .add_enabled(self.controller.ui.can_classify(), Button::new(label))
                .clicked();
            if in_flight {
                ui.add(Spinner::new());
            }
            if clicked {
                self.controller.classify_selected();
            }
        });
    }

    fn render_result(&mut self, ui: &mut Ui) {
        if self.controller.ui.show_spinner() {
            ui.horizontal(|ui| {
                ui.add(Spinner::new());
                ui.label("Analyzing your audio…");
            });
            return;
        }
        if !self.controller.ui.show_result() {
            return;
        }
        let Some(result) = self.controller.ui.result else {
            return;
        };
        let palette = style::palette();
        Grid::new("result_table")
            .striped(true)
            .min_col_width(120.0)
            .show(ui, |ui| {
                ui.label(RichText::new("Class").color(palette.text_muted));
                ui.label(RichText::new("Probability").color(palette.text_muted));
                ui.end_row();
                ui.label(SampleId::Human.label());
                ui.label(format_probability(result.human_prob));
                ui.end_row();
                ui.label(SampleId::Robot.label());
                ui.label(format_probability(result.ai_prob));
                ui.end_row();
            });
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.ensure_sample_textures(ctx);

        self.controller.poll_jobs();
        self.controller.refresh_playback();
        self.consume_dropped_files(ctx);

        self.render_top_bar(ctx);
        self.render_status(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                self.render_samples(ui);
                ui.add_space(16.0);
                self.render_picker(ui);
                ui.add_space(12.0);
                self.render_classify(ui);
                ui.add_space(16.0);
                self.render_result(ui);
            });
        });

        // Finished jobs and exhausted sinks are only observed on repaint.
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

/// Draw one image card with the play/pause overlay; returns true on click.
fn render_sample_card(
    ui: &mut Ui,
    sample: SampleId,
    texture: &TextureHandle,
    playing: bool,
) -> bool {
    let size = Vec2::splat(SAMPLE_CARD_SIZE);
    ui.vertical(|ui| {
        let image = egui::Image::new(texture).fit_to_exact_size(size);
        let rect = ui.add(image).rect;
        let icon = if playing { "⏸" } else { "▶" };
        let overlay = Button::new(RichText::new(icon).size(28.0).color(Color32::WHITE))
            .fill(Color32::from_black_alpha(96))
            .min_size(size);
        let clicked = ui.put(rect, overlay).clicked();
        ui.label(RichText::new(sample.label()).color(style::palette().text_muted));
        clicked
    })
    .inner
}

fn load_sample_texture(ctx: &egui::Context, name: &str, bytes: &[u8]) -> Option<TextureHandle> {
    let image = decode_color_image(bytes)?;
    Some(ctx.load_texture(name, image, TextureOptions::LINEAR))
}

/// Convert embedded PNG bytes into an egui color image.
fn decode_color_image(bytes: &[u8]) -> Option<egui::ColorImage> {
    let image = image::load_from_memory(bytes).ok()?.to_rgba8();
    let size = [image.width() as usize, image.height() as usize];
    Some(egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_sample_images_decode() {
        assert!(decode_color_image(HUMAN_IMAGE).is_some());
        assert!(decode_color_image(ROBOT_IMAGE).is_some());
    }
}
