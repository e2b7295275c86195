use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::{ErrorBody, PredictionRequest, PredictionResponse};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

pub mod config;
pub mod controller;
pub mod presets;
pub mod render;
pub mod view;

pub use config::{load_settings, ClientSettings};
pub use controller::{FormController, FormEvent, SubmitOutcome};
pub use presets::{ExampleSequence, EXAMPLE_SEQUENCES};
pub use render::{render_results, RenderedResults, ResultRow};
pub use view::{FormView, PageState};

pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";
pub const PREDICTION_FAILED_MESSAGE: &str = "Prediction failed";

#[derive(Debug, Error)]
pub enum PredictError {
    /// The service answered with a non-2xx status.
    #[error("prediction service returned {status}: {message}")]
    Server { status: u16, message: String },
    /// The request never completed or the body was not usable JSON.
    #[error("prediction request failed: {0}")]
    Network(String),
}

impl PredictError {
    pub fn user_message(&self) -> &str {
        match self {
            PredictError::Server { message, .. } => message,
            PredictError::Network(_) => NETWORK_ERROR_MESSAGE,
        }
    }
}

impl From<reqwest::Error> for PredictError {
    fn from(value: reqwest::Error) -> Self {
        PredictError::Network(value.to_string())
    }
}

#[async_trait]
pub trait Predictor: Send + Sync {
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> std::result::Result<PredictionResponse, PredictError>;
}

pub struct PredictionClient {
    http: Client,
    predict_url: Url,
}

impl PredictionClient {
    pub fn new(server_url: &str) -> Result<Self> {
        Ok(Self {
            http: Client::new(),
            predict_url: config::predict_url(server_url)?,
        })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            predict_url: config::predict_url(&settings.server_url)?,
        })
    }

    pub fn predict_url(&self) -> &Url {
        &self.predict_url
    }
}

#[async_trait]
impl Predictor for PredictionClient {
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> std::result::Result<PredictionResponse, PredictError> {
        let res = self
            .http
            .post(self.predict_url.clone())
            .json(request)
            .send()
            .await?;
        let status = res.status();
        // Both outcomes carry a JSON body; an unreadable one counts as a transport failure.
        let body: serde_json::Value = res.json().await?;
        debug!(status = status.as_u16(), "prediction service responded");

        if status.is_success() {
            return serde_json::from_value::<PredictionResponse>(body).map_err(|e| {
                warn!(error = %e, "prediction response did not match the expected shape");
                PredictError::Network(format!("malformed prediction response: {e}"))
            });
        }

        let message = serde_json::from_value::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message())
            .unwrap_or_else(|| PREDICTION_FAILED_MESSAGE.to_string());
        Err(PredictError::Server {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
