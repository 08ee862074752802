use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use client_core::{ClassifyOutcome, SelectedFile, UploadController};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::error::ClassifyError;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{describe_backend_failure, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::regions::RegionPanels;

const IDLE_REPAINT_INTERVAL: Duration = Duration::from_millis(100);
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

pub struct ClassifierApp {
    controller: UploadController<RegionPanels>,
    selected_path: Option<PathBuf>,
    selected: Option<SelectedFile>,
    selection_error: Option<String>,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    endpoint: String,
    status: String,
}

impl ClassifierApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            controller: UploadController::new(RegionPanels::default()),
            selected_path: None,
            selected: None,
            selection_error: None,
            cmd_tx,
            ui_rx,
            endpoint: endpoint.into(),
            status: "Starting classifier...".to_string(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => self.status = message,
                UiEvent::ClassifyFinished {
                    submission,
                    outcome,
                } => {
                    self.controller
                        .finish_submit(submission, outcome, Instant::now());
                }
                UiEvent::BackendUnavailable(message) => {
                    tracing::error!("classifier backend unavailable: {message}");
                    self.status = describe_backend_failure(&message);
                }
            }
        }
    }

    fn pick_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .add_filter("All files", &["*"])
            .pick_file()
        else {
            return;
        };
        self.select_path(path);
    }

    fn select_path(&mut self, path: PathBuf) {
        self.controller.on_file_selected();
        match SelectedFile::load(&path) {
            Ok(file) => {
                self.status = format!("Selected {}", file.file_name);
                self.selected = Some(file);
                self.selection_error = None;
            }
            Err(err) => {
                tracing::warn!("failed to read '{}': {err}", path.display());
                let message = format!("Could not read {}: {err}", path.display());
                self.status = message.clone();
                self.selected = None;
                self.controller.show_error(message.clone(), Instant::now());
                self.selection_error = Some(message);
            }
        }
        self.selected_path = Some(path);
    }

    fn submit(&mut self) {
        let now = Instant::now();
        if let Some(message) = &self.selection_error {
            self.controller.show_error(message.clone(), now);
            return;
        }
        let Some(submission) = self.controller.begin_submit(self.selected.clone(), now) else {
            return;
        };

        let id = submission.id;
        if let Err(reason) =
            dispatch_backend_command(&self.cmd_tx, BackendCommand::Classify(submission))
        {
            self.status = describe_backend_failure(&reason);
            self.controller.finish_submit(
                id,
                ClassifyOutcome::Failure(ClassifyError::network(reason)),
                now,
            );
        }
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Choose image...").clicked() {
                self.pick_file();
            }
            let selected = self
                .selected_path
                .as_ref()
                .and_then(|path| path.file_name())
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "No file chosen".to_string());
            ui.label(selected);
        });

        ui.add_space(6.0);
        if ui.button("Analyze").clicked() {
            self.submit();
        }
    }
}

impl eframe::App for ClassifierApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.controller.poll_dismiss(Instant::now());

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.weak(&self.status);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(&self.endpoint);
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Image Nudity Classifier");
            ui.add_space(8.0);
            self.show_form(ui);
            ui.separator();
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.controller.display_mut().show(ui);
            });
        });

        let repaint_after = self
            .controller
            .dismiss_due_in(Instant::now())
            .map_or(IDLE_REPAINT_INTERVAL, |due| due.min(IDLE_REPAINT_INTERVAL));
        ctx.request_repaint_after(repaint_after);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use client_core::{Region, UiState};
    use crossbeam_channel::bounded;
    use shared::{domain::NudityLevel, protocol::ClassificationResult};

    fn app() -> (ClassifierApp, Receiver<BackendCommand>, Sender<UiEvent>) {
        let (cmd_tx, cmd_rx) = bounded(4);
        let (ui_tx, ui_rx) = bounded(4);
        (
            ClassifierApp::new(cmd_tx, ui_rx, "http://127.0.0.1:5000/classify"),
            cmd_rx,
            ui_tx,
        )
    }

    #[test]
    fn submit_without_selection_queues_nothing() {
        let (mut app, cmd_rx, _ui_tx) = app();
        app.submit();

        assert!(cmd_rx.try_recv().is_err());
        assert!(app.controller.display().is_visible(Region::Error));
    }

    #[test]
    fn submission_round_trip_renders_results() {
        let (mut app, cmd_rx, ui_tx) = app();
        app.selected = Some(SelectedFile::new(
            "a.jpg",
            Some("image/jpeg".to_string()),
            vec![1, 2, 3],
        ));

        app.submit();
        assert!(app.controller.display().is_visible(Region::Loading));
        let BackendCommand::Classify(submission) = cmd_rx.try_recv().expect("queued");
        assert_eq!(submission.file.file_name, "a.jpg");

        ui_tx
            .send(UiEvent::ClassifyFinished {
                submission: submission.id,
                outcome: ClassifyOutcome::Success(ClassificationResult {
                    image: String::new(),
                    nudity_score: 50.0,
                    safe_score: 40.0,
                    sexy_score: 10.0,
                    nudity_level: NudityLevel::from_score(50.0),
                }),
            })
            .expect("send outcome");
        app.process_ui_events();

        assert!(matches!(app.controller.state(), UiState::Results(_)));
        assert!(!app.controller.display().is_visible(Region::Loading));
    }

    #[test]
    fn unreadable_file_error_is_shown_instead_of_missing_selection() {
        let (mut app, cmd_rx, _ui_tx) = app();
        let missing = std::env::temp_dir().join("classifier_gui_missing_file.png");
        let _ = std::fs::remove_file(&missing);

        app.select_path(missing);
        assert!(app.controller.display().is_visible(Region::Error));
        let UiState::Error(shown) = app.controller.state().clone() else {
            panic!("expected error state");
        };
        assert!(shown.starts_with("Could not read"));

        app.controller.on_file_selected();
        app.submit();
        assert_eq!(app.controller.state(), &UiState::Error(shown));
        assert!(cmd_rx.try_recv().is_err());
    }

    #[test]
    fn dead_backend_settles_into_error() {
        let (mut app, cmd_rx, _ui_tx) = app();
        drop(cmd_rx);
        app.selected = Some(SelectedFile::new(
            "a.png",
            Some("image/png".to_string()),
            Vec::new(),
        ));

        app.submit();

        assert!(matches!(app.controller.state(), UiState::Error(_)));
        assert!(!app.controller.display().is_visible(Region::Loading));
        assert_eq!(
            app.status,
            "Classifier worker stopped; restart the application."
        );
    }
}
