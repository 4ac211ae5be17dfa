//! UI layer for the desktop GUI: app shell, panels, and banners.

pub mod app;

pub use app::LabelingApp;
