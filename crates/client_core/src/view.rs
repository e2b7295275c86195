//! The page surface the form controller drives.
//!
//! [`FormView`] is the seam between the controller and whatever shows the
//! form (a terminal, an egui window, a document model). [`PageState`] is the
//! document model itself, keyed by the same element ids the web page uses.

use std::fmt::Write as _;

use shared::{domain::TopN, protocol::PredictionResponse};

use crate::{
    presets::ExampleSequence,
    render::{escape_html, RenderedResults},
};

pub mod ids {
    pub const PREDICTION_FORM: &str = "prediction-form";
    pub const SEQUENCE: &str = "sequence";
    pub const TOP_N: &str = "top_n";
    pub const RESULTS_SECTION: &str = "results-section";
    pub const ERROR_SECTION: &str = "error-section";
    pub const ERROR_MESSAGE: &str = "error-message";
    pub const SEQUENCE_INFO: &str = "sequence-info";
    pub const PREDICTIONS_TABLE: &str = "predictions-table";
    pub const EXAMPLE_BUTTON_CLASS: &str = "example-btn";
    pub const HIDDEN_CLASS: &str = "d-none";
}

pub const SUBMIT_LABEL: &str = "Predict Functions";
pub const SUBMIT_BUSY_LABEL: &str = "Predicting...";

pub trait FormView: Send {
    /// Registers one clickable control per example.
    fn bind_examples(&mut self, examples: &[ExampleSequence]);
    fn sequence_input(&self) -> String;
    fn set_sequence_input(&mut self, value: &str);
    fn top_n(&self) -> TopN;
    fn set_top_n(&mut self, top_n: TopN);
    /// Disables the submit control and shows the busy label, or restores it.
    fn set_busy(&mut self, busy: bool);
    /// Sets the error text, reveals the error region and hides results.
    fn show_error(&mut self, message: &str);
    fn hide_error(&mut self);
    /// Fills and reveals the results region and hides the error region.
    fn show_results(&mut self, response: &PredictionResponse, rendered: RenderedResults);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub disabled: bool,
    pub label: String,
}

impl Default for SubmitControl {
    fn default() -> Self {
        Self {
            disabled: false,
            label: SUBMIT_LABEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleControl {
    pub label: String,
    pub data_sequence: String,
}

/// In-memory model of the prediction page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    pub sequence: String,
    pub top_n: TopN,
    pub submit: SubmitControl,
    pub examples: Vec<ExampleControl>,
    pub error_visible: bool,
    pub error_message: String,
    pub results_visible: bool,
    pub sequence_info_html: String,
    pub predictions_table_html: String,
    pub last_results: Option<RenderedResults>,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            sequence: String::new(),
            top_n: TopN::default(),
            submit: SubmitControl::default(),
            examples: Vec::new(),
            error_visible: false,
            error_message: String::new(),
            results_visible: false,
            sequence_info_html: String::new(),
            predictions_table_html: String::new(),
            last_results: None,
        }
    }
}

impl PageState {
    pub fn new(top_n: TopN) -> Self {
        Self {
            top_n,
            ..Self::default()
        }
    }

    /// Serializes the page as a standalone HTML document.
    pub fn to_html(&self) -> String {
        let mut html = String::from(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>Venomics Function Predictor</title></head>\n<body>\n",
        );

        let _ = write!(html, "<form id=\"{}\">\n", ids::PREDICTION_FORM);
        let _ = write!(
            html,
            "<textarea id=\"{}\" name=\"sequence\">{}</textarea>\n",
            ids::SEQUENCE,
            escape_html(&self.sequence)
        );
        for example in &self.examples {
            let _ = write!(
                html,
                "<button type=\"button\" class=\"{}\" data-sequence=\"{}\">{}</button>\n",
                ids::EXAMPLE_BUTTON_CLASS,
                escape_html(&example.data_sequence),
                escape_html(&example.label)
            );
        }
        let _ = write!(html, "<select id=\"{}\" name=\"top_n\">", ids::TOP_N);
        for choice in TopN::CHOICES {
            let selected = if choice == self.top_n { " selected" } else { "" };
            let _ = write!(html, "<option value=\"{choice}\"{selected}>{choice}</option>");
        }
        html.push_str("</select>\n");
        let disabled = if self.submit.disabled { " disabled" } else { "" };
        let _ = write!(
            html,
            "<button type=\"submit\"{disabled}>{}</button>\n</form>\n",
            escape_html(&self.submit.label)
        );

        let _ = write!(
            html,
            "<div id=\"{}\" class=\"alert alert-danger{}\"><span id=\"{}\">{}</span></div>\n",
            ids::ERROR_SECTION,
            hidden_suffix(self.error_visible),
            ids::ERROR_MESSAGE,
            escape_html(&self.error_message)
        );
        let _ = write!(
            html,
            "<section id=\"{}\" class=\"results{}\">\n<div id=\"{}\">{}</div>\n<div id=\"{}\">{}</div>\n</section>\n",
            ids::RESULTS_SECTION,
            hidden_suffix(self.results_visible),
            ids::SEQUENCE_INFO,
            self.sequence_info_html,
            ids::PREDICTIONS_TABLE,
            self.predictions_table_html
        );

        html.push_str("</body>\n</html>\n");
        html
    }
}

fn hidden_suffix(visible: bool) -> String {
    if visible {
        String::new()
    } else {
        format!(" {}", ids::HIDDEN_CLASS)
    }
}

impl FormView for PageState {
    fn bind_examples(&mut self, examples: &[ExampleSequence]) {
        self.examples = examples
            .iter()
            .map(|example| ExampleControl {
                label: example.label.to_string(),
                data_sequence: example.sequence.to_string(),
            })
            .collect();
    }

    fn sequence_input(&self) -> String {
        self.sequence.clone()
    }

    fn set_sequence_input(&mut self, value: &str) {
        self.sequence = value.to_string();
    }

    fn top_n(&self) -> TopN {
        self.top_n
    }

    fn set_top_n(&mut self, top_n: TopN) {
        self.top_n = top_n;
    }

    fn set_busy(&mut self, busy: bool) {
        self.submit.disabled = busy;
        self.submit.label = if busy { SUBMIT_BUSY_LABEL } else { SUBMIT_LABEL }.to_string();
    }

    fn show_error(&mut self, message: &str) {
        self.error_message = message.to_string();
        self.error_visible = true;
        self.results_visible = false;
    }

    fn hide_error(&mut self) {
        self.error_visible = false;
    }

    fn show_results(&mut self, _response: &PredictionResponse, rendered: RenderedResults) {
        self.sequence_info_html = rendered.sequence_info_html.clone();
        self.predictions_table_html = rendered.predictions_table_html.clone();
        self.last_results = Some(rendered);
        self.error_visible = false;
        self.results_visible = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::EXAMPLE_SEQUENCES;

    #[test]
    fn fresh_page_hides_both_regions_and_enables_submit() {
        let page = PageState::default();
        assert!(!page.error_visible);
        assert!(!page.results_visible);
        assert_eq!(page.submit, SubmitControl::default());

        let html = page.to_html();
        assert!(html.contains("<div id=\"error-section\" class=\"alert alert-danger d-none\">"));
        assert!(html.contains("<section id=\"results-section\" class=\"results d-none\">"));
        assert!(html.contains("<button type=\"submit\">Predict Functions</button>"));
    }

    #[test]
    fn error_hides_results() {
        let mut page = PageState::default();
        page.results_visible = true;
        page.show_error("Prediction failed");
        assert!(page.error_visible);
        assert!(!page.results_visible);
        assert_eq!(page.error_message, "Prediction failed");

        page.hide_error();
        assert!(!page.error_visible);
        assert_eq!(page.error_message, "Prediction failed");
    }

    #[test]
    fn busy_toggles_label_and_disabled_flag() {
        let mut page = PageState::default();
        page.set_busy(true);
        assert!(page.submit.disabled);
        assert_eq!(page.submit.label, SUBMIT_BUSY_LABEL);
        assert!(page.to_html().contains("<button type=\"submit\" disabled>Predicting...</button>"));

        page.set_busy(false);
        assert_eq!(page.submit, SubmitControl::default());
    }

    #[test]
    fn document_lists_example_controls_and_selected_top_n() {
        let mut page = PageState::new(TopN::All);
        page.bind_examples(EXAMPLE_SEQUENCES);
        page.set_sequence_input("<b>");

        let html = page.to_html();
        assert_eq!(html.matches("class=\"example-btn\"").count(), EXAMPLE_SEQUENCES.len());
        assert!(html.contains("data-sequence=\"GIGAVLKVLTTGLPALISWIKRKRQQ\">Melittin</button>"));
        assert!(html.contains("<option value=\"all\" selected>all</option>"));
        assert!(html.contains("<textarea id=\"sequence\" name=\"sequence\">&lt;b&gt;</textarea>"));
    }
}
