//! UI layer for the desktop classifier: app shell, display regions and theme.

pub mod app;
pub mod regions;
pub mod theme;

pub use app::ClassifierApp;
