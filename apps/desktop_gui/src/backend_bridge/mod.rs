//! Bridge between the UI thread and the async classification worker.

pub mod commands;
pub mod runtime;
