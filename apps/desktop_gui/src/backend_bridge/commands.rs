//! Backend commands queued from UI to backend worker.

use shared::domain::TopN;

pub enum BackendCommand {
    ExampleClicked { index: usize },
    Submit { sequence: String, top_n: TopN },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::ExampleClicked { .. } => "example_clicked",
            BackendCommand::Submit { .. } => "submit",
        }
    }
}
