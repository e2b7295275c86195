//! Form controller: validate, submit, render.

use std::sync::atomic::{AtomicBool, Ordering};

use shared::{
    domain::{Sequence, TopN},
    error::ValidationError,
    protocol::PredictionRequest,
};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    presets::ExampleSequence,
    render::render_results,
    view::FormView,
    PredictError, Predictor,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    /// Click on the example control at this index.
    ExampleClicked(usize),
    Submit,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Rendered { predictions: usize },
    Invalid(ValidationError),
    Failed(PredictError),
    /// Another submission was still in flight.
    Ignored,
    /// The event did not involve a submission.
    Handled,
}

impl SubmitOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, SubmitOutcome::Rendered { .. })
    }
}

pub struct FormController<V: FormView, P: Predictor> {
    view: Mutex<V>,
    predictor: P,
    examples: Vec<ExampleSequence>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when a submission ends, however it ends.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<V: FormView, P: Predictor> FormController<V, P> {
    /// Binds the example controls and returns a controller ready for events.
    pub fn initialize(mut view: V, predictor: P, examples: &[ExampleSequence]) -> Self {
        view.bind_examples(examples);
        info!(examples = examples.len(), "prediction form initialized");
        Self {
            view: Mutex::new(view),
            predictor,
            examples: examples.to_vec(),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn examples(&self) -> &[ExampleSequence] {
        &self.examples
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn handle(&self, event: FormEvent) -> SubmitOutcome {
        match event {
            FormEvent::ExampleClicked(index) => {
                self.select_example(index).await;
                SubmitOutcome::Handled
            }
            FormEvent::Submit => self.submit().await,
        }
    }

    /// Copies the example's sequence into the input. Unknown indices are ignored.
    pub async fn select_example(&self, index: usize) {
        let Some(example) = self.examples.get(index) else {
            debug!(index, "no example bound at index");
            return;
        };
        debug!(label = example.label, "example selected");
        self.view.lock().await.set_sequence_input(example.sequence);
    }

    /// Replaces the form fields, as typing into them would.
    pub async fn fill_form(&self, sequence: &str, top_n: TopN) {
        let mut view = self.view.lock().await;
        view.set_sequence_input(sequence);
        view.set_top_n(top_n);
    }

    pub async fn submit(&self) -> SubmitOutcome {
        self.submit_with(|_| {}).await
    }

    /// Applies `prepare` to the view and submits the resulting form fields,
    /// both under one view lock so a concurrent caller cannot swap the fields
    /// in between.
    pub async fn submit_with(&self, prepare: impl FnOnce(&mut V)) -> SubmitOutcome {
        let (raw, top_n) = {
            let mut view = self.view.lock().await;
            prepare(&mut view);
            (view.sequence_input(), view.top_n())
        };

        let sequence = match Sequence::parse(&raw) {
            Ok(sequence) => sequence,
            Err(error) => {
                debug!(%error, "sequence rejected before submission");
                self.view.lock().await.show_error(error.user_message());
                return SubmitOutcome::Invalid(error);
            }
        };

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("submission ignored, a prediction is already in flight");
            return SubmitOutcome::Ignored;
        }
        let _guard = InFlightGuard(&self.in_flight);

        {
            let mut view = self.view.lock().await;
            view.set_busy(true);
            view.hide_error();
        }

        info!(sequence_length = sequence.len(), %top_n, "submitting prediction request");
        let request = PredictionRequest::new(sequence, top_n);
        let result = self.predictor.predict(&request).await;

        let mut view = self.view.lock().await;
        let outcome = match result {
            Ok(response) => {
                let predictions = response.predictions.len();
                info!(predictions, "prediction rendered");
                let rendered = render_results(&response);
                view.show_results(&response, rendered);
                SubmitOutcome::Rendered { predictions }
            }
            Err(error) => {
                warn!(%error, "prediction failed");
                view.show_error(error.user_message());
                SubmitOutcome::Failed(error)
            }
        };
        view.set_busy(false);
        outcome
    }

    /// Runs `f` against the view, for front-ends that read state back out.
    pub async fn with_view<R>(&self, f: impl FnOnce(&mut V) -> R) -> R {
        let mut view = self.view.lock().await;
        f(&mut view)
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
