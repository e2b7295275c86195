//! Runtime bridge between UI command queue and the prediction worker.

use std::{sync::Arc, thread};

use client_core::{
    presets::ExampleSequence, ClientSettings, FormController, FormEvent, FormView,
    PredictionClient, RenderedResults, EXAMPLE_SEQUENCES,
};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use shared::{domain::TopN, protocol::PredictionResponse};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{ExampleButton, UiError, UiEvent};

/// Form view living on the worker; forwards every change to the egui thread.
pub struct ChannelView {
    sequence: String,
    top_n: TopN,
    ui_tx: Sender<UiEvent>,
}

impl ChannelView {
    pub fn new(ui_tx: Sender<UiEvent>, top_n: TopN) -> Self {
        Self {
            sequence: String::new(),
            top_n,
            ui_tx,
        }
    }

    /// Takes the field values the UI already shows, without echoing them back.
    pub fn sync_form(&mut self, sequence: String, top_n: TopN) {
        self.sequence = sequence;
        self.top_n = top_n;
    }

    fn emit(&self, event: UiEvent) {
        match self.ui_tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => tracing::warn!("ui event queue full; dropping update"),
            Err(TrySendError::Disconnected(_)) => tracing::debug!("ui closed; dropping update"),
        }
    }
}

impl FormView for ChannelView {
    fn bind_examples(&mut self, examples: &[ExampleSequence]) {
        let buttons = examples
            .iter()
            .map(|example| ExampleButton {
                label: example.label.to_string(),
                sequence: example.sequence.to_string(),
            })
            .collect();
        self.emit(UiEvent::ExamplesBound(buttons));
    }

    fn sequence_input(&self) -> String {
        self.sequence.clone()
    }

    fn set_sequence_input(&mut self, value: &str) {
        self.sequence = value.to_string();
        self.emit(UiEvent::SequenceInput(self.sequence.clone()));
    }

    fn top_n(&self) -> TopN {
        self.top_n
    }

    fn set_top_n(&mut self, top_n: TopN) {
        self.top_n = top_n;
        self.emit(UiEvent::TopN(top_n));
    }

    fn set_busy(&mut self, busy: bool) {
        self.emit(UiEvent::Busy(busy));
    }

    fn show_error(&mut self, message: &str) {
        self.emit(UiEvent::ShowError(UiError::from_message(message)));
    }

    fn hide_error(&mut self) {
        self.emit(UiEvent::HideError);
    }

    fn show_results(&mut self, _response: &PredictionResponse, rendered: RenderedResults) {
        self.emit(UiEvent::Results(Box::new(rendered)));
    }
}

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: ClientSettings) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::ShowError(UiError::from_message(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                ))));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let client = match PredictionClient::from_settings(&settings) {
            Ok(client) => client,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::ShowError(UiError::from_message(format!(
                    "backend worker startup failure: {err:#}"
                ))));
                tracing::error!("failed to build prediction client: {err:#}");
                return;
            }
        };
        tracing::info!(endpoint = %client.predict_url(), "prediction worker ready");

        let view = ChannelView::new(ui_tx, settings.top_n);
        let controller = Arc::new(FormController::initialize(view, client, EXAMPLE_SEQUENCES));

        for cmd in cmd_rx.iter() {
            let controller = controller.clone();
            runtime.spawn(async move {
                match cmd {
                    BackendCommand::ExampleClicked { index } => {
                        controller.handle(FormEvent::ExampleClicked(index)).await;
                    }
                    BackendCommand::Submit { sequence, top_n } => {
                        controller
                            .submit_with(|view| view.sync_form(sequence, top_n))
                            .await;
                    }
                }
            });
        }
        tracing::debug!("command queue closed; prediction worker exiting");
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    #[test]
    fn sync_form_does_not_echo_but_set_sequence_input_does() {
        let (ui_tx, ui_rx) = bounded(8);
        let mut view = ChannelView::new(ui_tx, TopN::default());

        view.sync_form("MKV".to_string(), TopN::All);
        assert!(ui_rx.try_recv().is_err());
        assert_eq!(view.sequence_input(), "MKV");
        assert_eq!(view.top_n(), TopN::All);

        view.set_sequence_input("GIGAVLK");
        assert!(matches!(ui_rx.try_recv(), Ok(UiEvent::SequenceInput(s)) if s == "GIGAVLK"));
    }

    #[test]
    fn view_calls_become_ui_events() {
        let (ui_tx, ui_rx) = bounded(8);
        let mut view = ChannelView::new(ui_tx, TopN::default());

        view.bind_examples(EXAMPLE_SEQUENCES);
        view.set_busy(true);
        view.show_error("bad input");
        view.hide_error();

        assert!(matches!(ui_rx.try_recv(), Ok(UiEvent::ExamplesBound(b)) if b.len() == EXAMPLE_SEQUENCES.len()));
        assert!(matches!(ui_rx.try_recv(), Ok(UiEvent::Busy(true))));
        assert!(matches!(ui_rx.try_recv(), Ok(UiEvent::ShowError(e)) if e.message() == "bad input"));
        assert!(matches!(ui_rx.try_recv(), Ok(UiEvent::HideError)));
    }

    #[test]
    fn full_queue_drops_updates_without_panicking() {
        let (ui_tx, _ui_rx) = bounded(1);
        let mut view = ChannelView::new(ui_tx, TopN::default());
        view.set_busy(true);
        view.set_busy(false);
    }
}
