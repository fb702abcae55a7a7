use serde::{Deserialize, Serialize};

/// Request body for `POST /predict`: the seven form fields coerced to
/// numbers, serialized as a flat JSON object with the same keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    pub age: f64,
    pub weight: f64,
    pub duration: f64,
    pub steps: f64,
    pub heart_rate: f64,
    pub sleep: f64,
    pub daily_calories: f64,
}

/// Response body from the prediction service. Only `calories` is consumed;
/// any extra fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionResponse {
    pub calories: f64,
}

/// Display state of a prediction session. Exactly one variant is active at
/// a time; `Loading` never survives a settled submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState {
    /// Ready for input, nothing submitted yet (or reset after a result).
    Idle,

    /// A request is in flight.
    Loading,

    /// The last submission failed; holds the user-facing message.
    Error(String),

    /// The last submission succeeded; holds the estimate rounded to the
    /// nearest whole calorie.
    Result(i64),
}

impl SubmissionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SubmissionState::Loading)
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, SubmissionState::Error(_) | SubmissionState::Result(_))
    }
}
