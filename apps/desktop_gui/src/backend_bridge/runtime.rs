//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{ClassifyClient, HttpClassifyClient};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(
    client: HttpClassifyClient,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendUnavailable(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(serve_commands(Arc::new(client), cmd_rx, ui_tx));
    });
}

/// Each classification runs as its own task; nothing is cancelled or
/// de-duplicated, so outcomes reach the UI in completion order.
pub async fn serve_commands(
    client: Arc<dyn ClassifyClient>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    let _ = ui_tx.try_send(UiEvent::Info("Classifier ready".to_string()));
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            BackendCommand::Classify(submission) => {
                let client = client.clone();
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    tracing::info!(
                        submission = submission.id,
                        file_name = %submission.file.file_name,
                        "backend: classify"
                    );
                    let outcome = client.classify(submission.file).await;
                    if ui_tx
                        .send(UiEvent::ClassifyFinished {
                            submission: submission.id,
                            outcome,
                        })
                        .is_err()
                    {
                        tracing::warn!(
                            submission = submission.id,
                            "ui event queue closed before classification finished"
                        );
                    }
                });
            }
        }
    }
    tracing::debug!("backend command queue closed");
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use client_core::{ClassifyOutcome, SelectedFile, Submission};
    use crossbeam_channel::bounded;
    use shared::error::ClassifyError;

    struct EchoFailure;

    #[async_trait]
    impl ClassifyClient for EchoFailure {
        async fn classify(&self, file: SelectedFile) -> ClassifyOutcome {
            ClassifyOutcome::Failure(ClassifyError::server(500, Some(file.file_name)))
        }
    }

    #[test]
    fn classification_outcomes_are_forwarded_to_ui() {
        let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(4);
        let (ui_tx, ui_rx) = bounded::<UiEvent>(4);
        let worker = thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .expect("runtime");
            runtime.block_on(serve_commands(Arc::new(EchoFailure), cmd_rx, ui_tx));
        });

        cmd_tx
            .send(BackendCommand::Classify(Submission {
                id: 7,
                file: SelectedFile::new("a.png", Some("image/png".to_string()), Vec::new()),
            }))
            .expect("queue command");

        assert!(matches!(ui_rx.recv().expect("ready"), UiEvent::Info(_)));
        match ui_rx.recv().expect("outcome") {
            UiEvent::ClassifyFinished {
                submission,
                outcome: ClassifyOutcome::Failure(err),
            } => {
                assert_eq!(submission, 7);
                assert_eq!(err.user_message(), "a.png");
            }
            _ => panic!("unexpected ui event"),
        }

        drop(cmd_tx);
        worker.join().expect("worker exits");
    }
}
