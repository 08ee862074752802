//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), String> {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => Err("UI command queue is full; please retry".to_string()),
        Err(TrySendError::Disconnected(_)) => Err(
            "Backend command processor disconnected (possible startup/runtime failure)"
                .to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use client_core::{SelectedFile, Submission};
    use crossbeam_channel::bounded;

    fn classify(id: u64) -> BackendCommand {
        BackendCommand::Classify(Submission {
            id,
            file: SelectedFile::new("a.png", Some("image/png".to_string()), Vec::new()),
        })
    }

    #[test]
    fn reports_full_queue() {
        let (tx, _rx) = bounded(1);
        assert!(dispatch_backend_command(&tx, classify(1)).is_ok());
        let err = dispatch_backend_command(&tx, classify(2)).expect_err("full");
        assert!(err.contains("full"));
    }

    #[test]
    fn reports_disconnected_worker() {
        let (tx, rx) = bounded(1);
        drop(rx);
        let err = dispatch_backend_command(&tx, classify(1)).expect_err("disconnected");
        assert!(err.contains("disconnected"));
    }
}
