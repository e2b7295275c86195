//! Bridge between the egui thread and the prediction worker.

pub mod commands;
pub mod runtime;
