use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{ConfidenceBand, Sequence, TopN};

/// Body of `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub sequence: Sequence,
    pub top_n: TopN,
}

impl PredictionRequest {
    pub fn new(sequence: Sequence, top_n: TopN) -> Self {
        Self { sequence, top_n }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// Echo of the submitted sequence. The service may shorten it for display.
    pub sequence: String,
    pub sequence_length: u64,
    pub predictions: Vec<Prediction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub go_term: String,
    pub name: String,
    pub definition: String,
    pub confidence: f64,
    pub confidence_percent: f64,
}

impl Prediction {
    pub fn band(&self) -> ConfidenceBand {
        ConfidenceBand::for_confidence(self.confidence)
    }
}

/// Body the service sends with a non-2xx status.
///
/// `error` is normally a string but any JSON value is accepted and shown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl ErrorBody {
    /// Display text for `error`. Falsy values (`null`, `false`, `0`, `""`)
    /// count as absent.
    pub fn message(&self) -> Option<String> {
        match self.error.as_ref()? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            Value::Number(n) => Some(n.to_string()),
            other => Some(other.to_string()),
        }
    }
}
