//! The three display regions of the window, driven by the upload controller.

use client_core::{DisplaySurface, Region, ResultsView};
use eframe::egui::{self, TextureHandle};

use crate::media::{decode_results_preview, PreviewImage};
use crate::ui::theme::{banner_colors, error_colors};

#[derive(Default)]
pub struct RegionPanels {
    loading_visible: bool,
    results_visible: bool,
    error_visible: bool,
    error_message: String,
    results: Option<ResultsView>,
    preview: Option<PreviewImage>,
    preview_texture: Option<TextureHandle>,
}

impl RegionPanels {
    pub fn is_visible(&self, region: Region) -> bool {
        match region {
            Region::Loading => self.loading_visible,
            Region::Results => self.results_visible,
            Region::Error => self.error_visible,
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        if self.loading_visible {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Analyzing image...");
            });
        }

        if self.error_visible {
            let colors = error_colors();
            egui::Frame::group(ui.style())
                .fill(colors.fill)
                .stroke(egui::Stroke::new(1.0, colors.stroke))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.colored_label(colors.text, &self.error_message);
                });
        }

        if self.results_visible {
            self.show_results(ui);
        }
    }

    fn show_results(&mut self, ui: &mut egui::Ui) {
        let Some(view) = &self.results else {
            return;
        };

        let colors = banner_colors(view.banner.severity);
        egui::Frame::group(ui.style())
            .fill(colors.fill)
            .stroke(egui::Stroke::new(1.0, colors.stroke))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(egui::RichText::new(&view.banner.title).strong().color(colors.text));
                ui.colored_label(colors.text, view.banner.description);
            });

        ui.add_space(8.0);
        egui::Grid::new("score_bars")
            .num_columns(3)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                for bar in &view.scores {
                    ui.label(bar.kind.label());
                    ui.add(
                        egui::ProgressBar::new(bar.width_percent / 100.0)
                            .desired_width(280.0),
                    );
                    ui.label(&bar.text);
                    ui.end_row();
                }
            });

        ui.add_space(8.0);
        match &self.preview {
            Some(preview) => {
                let texture = self.preview_texture.get_or_insert_with(|| {
                    let color_image = egui::ColorImage::from_rgba_unmultiplied(
                        [preview.width, preview.height],
                        &preview.rgba,
                    );
                    ui.ctx().load_texture(
                        "classification-preview",
                        color_image,
                        egui::TextureOptions::LINEAR,
                    )
                });
                ui.add(egui::Image::new(&*texture).max_size(egui::vec2(480.0, 480.0)));
            }
            None => {
                ui.weak("Preview unavailable");
            }
        }
    }
}

impl DisplaySurface for RegionPanels {
    fn set_visible(&mut self, region: Region, visible: bool) {
        match region {
            Region::Loading => self.loading_visible = visible,
            Region::Results => self.results_visible = visible,
            Region::Error => self.error_visible = visible,
        }
    }

    fn set_error_message(&mut self, message: &str) {
        self.error_message = message.to_string();
    }

    fn set_results(&mut self, view: &ResultsView) {
        self.preview = match decode_results_preview(view) {
            Ok(preview) => Some(preview),
            Err(err) => {
                tracing::warn!("classification preview decode failed: {err}");
                None
            }
        };
        self.preview_texture = None;
        self.results = Some(view.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::{controller::render, UiState};
    use shared::{domain::NudityLevel, protocol::ClassificationResult};

    impl RegionPanels {
        fn error_message(&self) -> &str {
            &self.error_message
        }

        fn results(&self) -> Option<&ResultsView> {
            self.results.as_ref()
        }

        fn has_preview(&self) -> bool {
            self.preview.is_some()
        }
    }

    fn view(image: &str) -> ResultsView {
        let nudity_score = 72.0;
        ResultsView::from_result(&ClassificationResult {
            image: image.to_string(),
            nudity_score,
            safe_score: 20.0,
            sexy_score: 8.0,
            nudity_level: NudityLevel::from_score(nudity_score),
        })
    }

    #[test]
    fn render_toggles_exactly_one_region() {
        let mut panels = RegionPanels::default();

        render(&mut panels, &UiState::Loading);
        assert!(panels.is_visible(Region::Loading));

        render(&mut panels, &UiState::Error("boom".to_string()));
        assert!(!panels.is_visible(Region::Loading));
        assert!(panels.is_visible(Region::Error));
        assert_eq!(panels.error_message(), "boom");

        render(&mut panels, &UiState::Results(view("AAA")));
        assert!(!panels.is_visible(Region::Error));
        assert!(panels.is_visible(Region::Results));

        render(&mut panels, &UiState::Idle);
        assert!(!panels.is_visible(Region::Results));
    }

    #[test]
    fn undecodable_preview_still_shows_scores() {
        let mut panels = RegionPanels::default();
        render(&mut panels, &UiState::Results(view("AAA")));

        assert!(!panels.has_preview());
        let results = panels.results().expect("results kept");
        assert_eq!(results.banner.title, "Nudity Level: High");
    }
}
