use std::time::Duration;

use client_core::{
    view::{SUBMIT_BUSY_LABEL, SUBMIT_LABEL},
    RenderedResults, ResultRow,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{ConfidenceBand, TopN, MAX_SEQUENCE_LEN};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{ExampleButton, UiError, UiErrorCategory, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

pub struct PredictorApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    sequence_input: String,
    top_n: TopN,
    examples: Vec<ExampleButton>,
    busy: bool,
    error: Option<UiError>,
    results: Option<RenderedResults>,
    status: Option<String>,
}

impl PredictorApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>, top_n: TopN) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            sequence_input: String::new(),
            top_n,
            examples: Vec::new(),
            busy: false,
            error: None,
            results: None,
            status: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::ExamplesBound(examples) => self.examples = examples,
            UiEvent::SequenceInput(sequence) => self.sequence_input = sequence,
            UiEvent::TopN(top_n) => self.top_n = top_n,
            UiEvent::Busy(busy) => self.busy = busy,
            UiEvent::ShowError(error) => {
                self.error = Some(error);
                self.results = None;
            }
            UiEvent::HideError => self.error = None,
            UiEvent::Results(results) => {
                self.results = Some(*results);
                self.error = None;
            }
        }
    }

    fn dispatch(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
    }

    fn submit(&mut self) {
        let cmd = BackendCommand::Submit {
            sequence: self.sequence_input.clone(),
            top_n: self.top_n,
        };
        self.dispatch(cmd);
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        ui.label("Protein sequence");
        ui.add(
            egui::TextEdit::multiline(&mut self.sequence_input)
                .font(egui::TextStyle::Monospace)
                .desired_rows(6)
                .desired_width(f32::INFINITY)
                .hint_text(format!(
                    "Paste up to {MAX_SEQUENCE_LEN} residues using the 20 standard amino-acid codes"
                )),
        );

        let mut clicked_example = None;
        ui.horizontal_wrapped(|ui| {
            ui.label("Examples:");
            for (index, example) in self.examples.iter().enumerate() {
                if ui
                    .button(example.label.as_str())
                    .on_hover_text(example.sequence.as_str())
                    .clicked()
                {
                    clicked_example = Some(index);
                }
            }
        });
        if let Some(index) = clicked_example {
            self.dispatch(BackendCommand::ExampleClicked { index });
        }

        ui.add_space(6.0);
        let mut submit = false;
        ui.horizontal(|ui| {
            ui.label("Top predictions");
            egui::ComboBox::from_id_salt("top_n")
                .selected_text(self.top_n.to_string())
                .show_ui(ui, |ui| {
                    for choice in TopN::CHOICES {
                        ui.selectable_value(&mut self.top_n, choice, choice.to_string());
                    }
                });

            let label = if self.busy { SUBMIT_BUSY_LABEL } else { SUBMIT_LABEL };
            if ui.add_enabled(!self.busy, egui::Button::new(label)).clicked() {
                submit = true;
            }
            if self.busy {
                ui.spinner();
            }
        });
        if submit {
            self.submit();
        }
    }

    fn show_error(&self, ui: &mut egui::Ui) {
        let Some(error) = &self.error else {
            return;
        };
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.colored_label(band_color(ConfidenceBand::Low), error.title());
            ui.label(error.message());
            if error.category() == UiErrorCategory::Transport {
                ui.small("Check the server_url setting or VENOMICS_SERVER_URL.");
            }
        });
    }

    fn show_results(&self, ui: &mut egui::Ui) {
        let Some(results) = &self.results else {
            return;
        };

        ui.heading("Results");
        ui.label(format!("Sequence ({} amino acids):", results.sequence_length));
        ui.code(results.sequence.as_str());
        ui.add_space(6.0);

        if results.rows.is_empty() {
            ui.label("No predictions returned.");
            return;
        }

        egui::Grid::new("predictions_table")
            .num_columns(3)
            .striped(true)
            .spacing([16.0, 8.0])
            .show(ui, |ui| {
                ui.strong("Rank");
                ui.strong("Function");
                ui.strong("Confidence");
                ui.end_row();

                for row in &results.rows {
                    show_row(ui, row);
                    ui.end_row();
                }
            });
    }
}

fn show_row(ui: &mut egui::Ui, row: &ResultRow) {
    ui.label(row.rank.to_string());
    ui.vertical(|ui| {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(row.go_term.as_str()).monospace().strong());
            ui.label(row.name.as_str());
        });
        ui.small(row.definition.as_str());
    });
    ui.add(
        egui::ProgressBar::new((row.bar_width() / 100.0) as f32)
            .fill(band_color(row.band))
            .desired_width(180.0)
            .text(format!("{}%", row.confidence_percent)),
    );
}

fn band_color(band: ConfidenceBand) -> egui::Color32 {
    let [r, g, b] = band.rgb();
    egui::Color32::from_rgb(r, g, b)
}

impl eframe::App for PredictorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading("Venomics Function Predictor");
            if let Some(status) = &self.status {
                ui.colored_label(band_color(ConfidenceBand::Medium), status.as_str());
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.show_form(ui);
                ui.separator();
                self.show_error(ui);
                self.show_results(ui);
            });
        });

        if self.busy {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
