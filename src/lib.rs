pub mod cli;
pub mod client;
pub mod config;
pub mod core;
pub mod form;
pub mod session;

pub use crate::client::HttpPredictionClient;
pub use crate::core::error::{PredictError, PredictResult};
pub use crate::core::types::{PredictionRequest, PredictionResponse, SubmissionState};
pub use crate::core::CalorieEstimator;
pub use crate::form::{FormValues, MetricField};
pub use crate::session::PredictionSession;
