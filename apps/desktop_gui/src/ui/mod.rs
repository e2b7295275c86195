//! UI layer for the desktop GUI: the prediction form window.

pub mod app;

pub use app::PredictorApp;
