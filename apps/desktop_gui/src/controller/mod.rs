//! Controller layer: UI events and command orchestration around the upload controller.

pub mod events;
pub mod orchestration;
