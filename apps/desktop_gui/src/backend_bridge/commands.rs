//! Backend commands queued from UI to backend worker.

use client_core::Submission;

pub enum BackendCommand {
    Classify(Submission),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Classify(_) => "classify",
        }
    }
}
