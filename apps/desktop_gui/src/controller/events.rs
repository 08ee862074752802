//! Backend-to-UI events.

use client_core::ClassifyOutcome;

pub enum UiEvent {
    Info(String),
    ClassifyFinished {
        submission: u64,
        outcome: ClassifyOutcome,
    },
    BackendUnavailable(String),
}

pub fn describe_backend_failure(message: &str) -> String {
    let lower = message.to_ascii_lowercase();
    if lower.contains("disconnected") {
        "Classifier worker stopped; restart the application.".to_string()
    } else if lower.contains("backend worker startup failure") {
        "Classifier worker failed to start; restart the application.".to_string()
    } else {
        format!("Classifier unavailable: {message}")
    }
}
