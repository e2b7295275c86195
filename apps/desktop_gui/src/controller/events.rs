//! UI/backend events and error modeling for the desktop GUI.

use client_core::{RenderedResults, NETWORK_ERROR_MESSAGE};
use shared::{
    domain::TopN,
    error::{EMPTY_SEQUENCE_MESSAGE, INVALID_CHARACTERS_MESSAGE, TOO_LONG_MESSAGE},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleButton {
    pub label: String,
    pub sequence: String,
}

pub enum UiEvent {
    ExamplesBound(Vec<ExampleButton>),
    SequenceInput(String),
    TopN(TopN),
    Busy(bool),
    ShowError(UiError),
    HideError,
    Results(Box<RenderedResults>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Validation,
    Transport,
    Server,
    Backend,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    category: UiErrorCategory,
    message: String,
}

impl UiError {
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let category = if [EMPTY_SEQUENCE_MESSAGE, INVALID_CHARACTERS_MESSAGE, TOO_LONG_MESSAGE]
            .contains(&message.as_str())
        {
            UiErrorCategory::Validation
        } else if message == NETWORK_ERROR_MESSAGE {
            UiErrorCategory::Transport
        } else if message
            .to_ascii_lowercase()
            .contains("backend worker startup failure")
        {
            UiErrorCategory::Backend
        } else {
            UiErrorCategory::Server
        };

        Self { category, message }
    }

    pub fn title(&self) -> &'static str {
        match self.category {
            UiErrorCategory::Validation => "Check the sequence",
            UiErrorCategory::Transport => "Service unreachable",
            UiErrorCategory::Server => "Prediction failed",
            UiErrorCategory::Backend => "Worker unavailable",
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
